use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::error::{Error, Result};
use crate::source::BitSource;

/// Lookup table of an elementary cellular automaton.
///
/// The table is big-endian over the neighbourhood: entry 0 is the next state
/// for `(1, 1, 1)` and entry 7 the next state for `(0, 0, 0)`. Reading the
/// table as a binary number left to right gives the Wolfram rule number, so
/// `[0, 1, 1, 0, 1, 1, 1, 0]` is rule 110.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rule {
    table: [u8; 8],
}

impl Rule {
    pub fn from_table(table: &[u8]) -> Result<Self> {
        if table.len() != 8 {
            return Err(Error::invalid(format!(
                "rule table needs 8 entries, got {}",
                table.len()
            )));
        }
        if let Some(pos) = table.iter().position(|&b| b > 1) {
            return Err(Error::invalid(format!(
                "rule entry {} is {}, expected 0 or 1",
                pos, table[pos]
            )));
        }

        let mut rule = [0; 8];
        rule.copy_from_slice(table);
        Ok(Self { table: rule })
    }

    pub fn from_number(number: u8) -> Self {
        let mut table = [0; 8];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = (number >> (7 - i)) & 1;
        }
        Self { table }
    }

    pub fn number(&self) -> u8 {
        self.table.iter().fold(0, |acc, &b| (acc << 1) | b)
    }

    pub fn table(&self) -> &[u8; 8] {
        &self.table
    }

    /// Next state of a cell given its neighbourhood, all three 0 or 1.
    pub fn lookup(&self, left: u8, center: u8, right: u8) -> u8 {
        debug_assert!(left <= 1 && center <= 1 && right <= 1);
        let index = 7 - (4 * left + 2 * center + right) as usize;
        self.table[index]
    }
}

/// Accepts either an 8 character table (`"01101110"`) or a rule number (`"110"`).
impl FromStr for Rule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.len() == 8 && s.chars().all(|c| c == '0' || c == '1') {
            let table: Vec<u8> = s.bytes().map(|b| b - b'0').collect();
            return Self::from_table(&table);
        }
        s.parse::<u8>()
            .map(Self::from_number)
            .map_err(|_| Error::invalid(format!("{:?} is neither a rule number nor a rule table", s)))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "rule {} (", self.number())?;
        for b in &self.table {
            write!(f, "{}", b)?;
        }
        write!(f, ")")
    }
}

/// Space-time pattern of an automaton run.
///
/// Row `t` is the state at timestep `t`, column `i` is cell `i`. Cells are
/// stored row-major and are always 0 or 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateMatrix {
    cells: Vec<u8>,
    width: usize,
    depth: usize,
}

impl StateMatrix {
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self> {
        let depth = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        if depth == 0 || width == 0 {
            return Err(Error::invalid("state matrix must have at least one cell"));
        }
        if let Some(t) = rows.iter().position(|row| row.len() != width) {
            return Err(Error::invalid(format!(
                "row {} has {} cells, expected {}",
                t,
                rows[t].len(),
                width
            )));
        }

        let cells: Vec<u8> = rows.concat();
        if cells.iter().any(|&c| c > 1) {
            return Err(Error::invalid("state matrix cells must be 0 or 1"));
        }
        Ok(Self { cells, width, depth })
    }

    /// Number of cells per row (N).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of timesteps (T).
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn get(&self, t: usize, i: usize) -> u8 {
        self.row(t)[i]
    }

    pub fn row(&self, t: usize) -> &[u8] {
        &self.cells[t * self.width..(t + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Time series of cell `i`.
    pub fn column(&self, i: usize) -> impl Iterator<Item = u8> + '_ {
        assert!(i < self.width, "column {} out of range", i);
        self.rows().map(move |row| row[i])
    }
}

/// Runs `rule` for `depth` timesteps on `width` cells.
///
/// Row 0 takes one bit per cell from `bits`, in column order. Every later row
/// updates columns `1..width - 1` from the previous row; the two edge columns
/// keep their row 0 value for the whole run.
pub fn construct<S>(width: usize, depth: usize, rule: &Rule, bits: &mut S) -> Result<StateMatrix>
where
    S: BitSource + ?Sized,
{
    if width < 1 {
        return Err(Error::invalid("width must be at least 1"));
    }
    if depth < 1 {
        return Err(Error::invalid("depth must be at least 1"));
    }

    let mut cells = vec![0u8; width * depth];
    for cell in cells[..width].iter_mut() {
        *cell = bits.next_bit() & 1;
    }

    for t in 1..depth {
        let (prev, next) = cells[(t - 1) * width..(t + 1) * width].split_at_mut(width);
        next[0] = prev[0];
        next[width - 1] = prev[width - 1];
        for i in 1..width.saturating_sub(1) {
            next[i] = rule.lookup(prev[i - 1], prev[i], prev[i + 1]);
        }
    }

    debug!("built {}x{} matrix for {}", depth, width, rule);
    Ok(StateMatrix { cells, width, depth })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{PatternBits, RandomBits};

    const RULE_110: [u8; 8] = [0, 1, 1, 0, 1, 1, 1, 0];

    struct Counting {
        draws: usize,
    }

    impl BitSource for Counting {
        fn next_bit(&mut self) -> u8 {
            self.draws += 1;
            (self.draws % 2) as u8
        }
    }

    #[test]
    fn rule_number_matches_table() {
        let rule = Rule::from_number(110);
        assert_eq!(rule.table(), &RULE_110);
        assert_eq!(Rule::from_table(&RULE_110).unwrap().number(), 110);
    }

    #[test]
    fn rule_number_round_trips() {
        for n in 0..=255u8 {
            assert_eq!(Rule::from_number(n).number(), n);
        }
    }

    #[test]
    fn rule_110_lookup() {
        let rule = Rule::from_table(&RULE_110).unwrap();
        let expected = [
            ((1, 1, 1), 0),
            ((1, 1, 0), 1),
            ((1, 0, 1), 1),
            ((1, 0, 0), 0),
            ((0, 1, 1), 1),
            ((0, 1, 0), 1),
            ((0, 0, 1), 1),
            ((0, 0, 0), 0),
        ];
        for &((l, c, r), next) in expected.iter() {
            assert_eq!(rule.lookup(l, c, r), next, "neighbourhood {}{}{}", l, c, r);
        }
    }

    #[test]
    fn rejects_bad_tables() {
        assert!(Rule::from_table(&[0, 1, 1, 0, 1, 1, 1]).is_err());
        assert!(Rule::from_table(&[0, 1, 1, 0, 1, 1, 1, 0, 0]).is_err());
        assert!(Rule::from_table(&[0, 1, 2, 0, 1, 1, 1, 0]).is_err());
    }

    #[test]
    fn parses_numbers_and_tables() {
        let rule: Rule = "110".parse().unwrap();
        assert_eq!(rule, "01101110".parse::<Rule>().unwrap());
        assert_eq!("00000110".parse::<Rule>().unwrap().number(), 6);
        assert!("256".parse::<Rule>().is_err());
        assert!("rule".parse::<Rule>().is_err());
    }

    #[test]
    fn display_shows_number_and_table() {
        assert_eq!(Rule::from_number(30).to_string(), "rule 30 (00011110)");
    }

    #[test]
    fn rejects_empty_dimensions() {
        let rule = Rule::from_number(110);
        let mut bits = RandomBits::seeded(0);
        assert!(construct(0, 10, &rule, &mut bits).is_err());
        assert!(construct(10, 0, &rule, &mut bits).is_err());
    }

    #[test]
    fn boundaries_stay_fixed() {
        for &number in [30u8, 90, 110, 255].iter() {
            let rule = Rule::from_number(number);
            let m = construct(50, 40, &rule, &mut RandomBits::seeded(3)).unwrap();
            for t in 0..m.depth() {
                assert_eq!(m.get(t, 0), m.get(0, 0));
                assert_eq!(m.get(t, 49), m.get(0, 49));
            }
        }
    }

    #[test]
    fn cells_are_binary() {
        let m = construct(64, 64, &Rule::from_number(110), &mut RandomBits::seeded(9)).unwrap();
        assert!(m.rows().all(|row| row.iter().all(|&c| c <= 1)));
    }

    #[test]
    fn deterministic_under_seed() {
        let rule = Rule::from_number(110);
        let a = construct(30, 30, &rule, &mut RandomBits::seeded(11)).unwrap();
        let b = construct(30, 30, &rule, &mut RandomBits::seeded(11)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn interior_follows_rule() {
        let rule = Rule::from_number(110);
        let m = construct(20, 20, &rule, &mut RandomBits::seeded(5)).unwrap();
        for t in 1..m.depth() {
            for i in 1..m.width() - 1 {
                let expected = rule.lookup(m.get(t - 1, i - 1), m.get(t - 1, i), m.get(t - 1, i + 1));
                assert_eq!(m.get(t, i), expected);
            }
        }
    }

    #[test]
    fn narrow_rows_never_change() {
        for width in 1..3 {
            let m = construct(width, 6, &Rule::from_number(110), &mut RandomBits::seeded(2)).unwrap();
            for t in 0..m.depth() {
                assert_eq!(m.row(t), m.row(0));
            }
        }
    }

    #[test]
    fn draws_one_bit_per_cell() {
        let mut source = Counting { draws: 0 };
        let m = construct(7, 5, &Rule::from_number(110), &mut source).unwrap();
        assert_eq!(source.draws, 7);
        assert_eq!(m.row(0), &[1u8, 0, 1, 0, 1, 0, 1][..]);
    }

    #[test]
    fn identity_rule_is_constant_in_time() {
        let mut bits: PatternBits = "1101".parse().unwrap();
        let m = construct(9, 12, &Rule::from_number(204), &mut bits).unwrap();
        for t in 0..m.depth() {
            assert_eq!(m.row(t), m.row(0));
        }
    }

    #[test]
    fn from_rows_validates_shape() {
        assert!(StateMatrix::from_rows(&[]).is_err());
        assert!(StateMatrix::from_rows(&[vec![]]).is_err());
        assert!(StateMatrix::from_rows(&[vec![0, 1], vec![1]]).is_err());
        assert!(StateMatrix::from_rows(&[vec![0, 3]]).is_err());

        let m = StateMatrix::from_rows(&[vec![0, 1, 1], vec![1, 0, 0]]).unwrap();
        assert_eq!((m.depth(), m.width()), (2, 3));
        assert_eq!(m.column(1).collect::<Vec<_>>(), vec![1u8, 0]);
    }
}
