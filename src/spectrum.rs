//! Power spectrum of an automaton's space-time pattern.
//!
//! Every column of the matrix is treated as a signal over time. Its Fourier
//! component is evaluated directly at each requested frequency, which need
//! not be a multiple of `1 / T`, so no FFT is involved.

use std::f64::consts::PI;

use log::debug;
use num_complex::Complex64;
use rayon::prelude::*;

use crate::automaton::StateMatrix;
use crate::error::{Error, Result};

/// Fourier component of column `column` at `frequency`:
/// `(1/T) * sum_t x[t] * exp(-2 pi i t f / T)`.
///
/// Panics if `column` is out of range.
pub fn transform(matrix: &StateMatrix, column: usize, frequency: f64) -> Complex64 {
    let depth = matrix.depth() as f64;
    let omega = -2.0 * PI * frequency / depth;
    let sum: Complex64 = matrix
        .column(column)
        .enumerate()
        .filter(|&(_, x)| x != 0)
        .map(|(t, x)| Complex64::from_polar(f64::from(x), omega * t as f64))
        .sum();
    sum / depth
}

/// Spectral density `S(f) = (1/T) * sum_i |X_i(f)|^2` for every frequency,
/// in input order.
///
/// `width` and `depth` must match the matrix. An empty frequency list gives an
/// empty result.
pub fn density(
    matrix: &StateMatrix,
    width: usize,
    depth: usize,
    frequencies: &[f64],
) -> Result<Vec<f64>> {
    check_dimensions(matrix, width, depth)?;
    debug!(
        "density of {}x{} matrix at {} frequencies",
        depth,
        width,
        frequencies.len()
    );
    Ok(frequencies.iter().map(|&f| power(matrix, f)).collect())
}

/// Same as [`density`], with frequencies spread over the rayon thread pool.
pub fn density_par(
    matrix: &StateMatrix,
    width: usize,
    depth: usize,
    frequencies: &[f64],
) -> Result<Vec<f64>> {
    check_dimensions(matrix, width, depth)?;
    debug!(
        "density of {}x{} matrix at {} frequencies on {} threads",
        depth,
        width,
        frequencies.len(),
        rayon::current_num_threads()
    );
    Ok(frequencies.par_iter().map(|&f| power(matrix, f)).collect())
}

fn check_dimensions(matrix: &StateMatrix, width: usize, depth: usize) -> Result<()> {
    if matrix.width() != width || matrix.depth() != depth {
        return Err(Error::invalid(format!(
            "matrix is {}x{}, expected {}x{}",
            matrix.depth(),
            matrix.width(),
            depth,
            width
        )));
    }
    Ok(())
}

/// All columns at once: the phase factors only depend on `t`, so they are
/// computed once per frequency and the matrix is walked row by row.
fn power(matrix: &StateMatrix, frequency: f64) -> f64 {
    let depth = matrix.depth() as f64;
    let omega = -2.0 * PI * frequency / depth;
    let twiddles: Vec<Complex64> = (0..matrix.depth())
        .map(|t| Complex64::from_polar(1.0, omega * t as f64))
        .collect();

    let mut sums = vec![Complex64::new(0.0, 0.0); matrix.width()];
    for (row, w) in matrix.rows().zip(&twiddles) {
        for (acc, &cell) in sums.iter_mut().zip(row) {
            if cell != 0 {
                *acc += *w;
            }
        }
    }

    let total: f64 = sums.iter().map(|&x| (x / depth).norm_sqr()).sum();
    total / depth
}
