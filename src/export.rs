use std::io::{self, Write};

use crate::automaton::StateMatrix;

/// Writes `frequency<TAB>density` lines, ready for gnuplot or a spreadsheet.
pub fn write_density<W, I>(mut out: W, curve: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = (f64, f64)>,
{
    writeln!(out, "# frequency\tdensity")?;
    for (frequency, density) in curve {
        writeln!(out, "{}\t{}", frequency, density)?;
    }
    out.flush()
}

/// Plain PGM image of the space-time pattern, one pixel per cell, time
/// running downwards. Live cells are black.
pub fn write_pgm<W: Write>(mut out: W, matrix: &StateMatrix) -> io::Result<()> {
    writeln!(out, "P2")?;
    writeln!(out, "{} {}", matrix.width(), matrix.depth())?;
    writeln!(out, "255")?;

    for row in matrix.rows() {
        let line: Vec<&str> = row
            .iter()
            .map(|&cell| if cell == 1 { "0" } else { "255" })
            .collect();
        writeln!(out, "{}", line.join(" "))?;
    }
    out.flush()
}
