use std::str::FromStr;

use super::BitSource;
use crate::error::{Error, Result};

/// Repeats a fixed bit pattern forever.
///
/// Useful for hand-checkable initial rows such as `"10101..."`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternBits {
    bits: Vec<u8>,
    index: usize,
}

impl PatternBits {
    pub fn new(bits: Vec<u8>) -> Result<Self> {
        if bits.is_empty() {
            return Err(Error::invalid("bit pattern is empty"));
        }
        if let Some(b) = bits.iter().find(|&&b| b > 1) {
            return Err(Error::invalid(format!("bit pattern entry {} is not 0 or 1", b)));
        }
        Ok(Self { bits, index: 0 })
    }

    pub fn bits(&self) -> &[u8] {
        &self.bits
    }
}

impl FromStr for PatternBits {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bits = s
            .chars()
            .map(|c| match c {
                '0' => Ok(0),
                '1' => Ok(1),
                other => Err(Error::invalid(format!(
                    "bit pattern {:?} contains {:?}",
                    s, other
                ))),
            })
            .collect::<Result<Vec<u8>>>()?;
        Self::new(bits)
    }
}

impl BitSource for PatternBits {
    fn next_bit(&mut self) -> u8 {
        let bit = self.bits[self.index];
        self.index += 1;
        if self.index == self.bits.len() {
            self.index = 0;
        }
        bit
    }
}
