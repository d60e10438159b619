pub mod pattern;
pub mod random;

pub use self::pattern::PatternBits;
pub use self::random::RandomBits;

/// Supplies the initial row of an automaton, one cell at a time.
pub trait BitSource {
    /// Next bit, always 0 or 1.
    fn next_bit(&mut self) -> u8;
}
