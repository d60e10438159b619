pub mod automaton;
pub mod config;
pub mod error;
pub mod export;
pub mod source;
pub mod spectrum;
pub mod util;

pub use crate::automaton::{construct, Rule, StateMatrix};
pub use crate::error::{Error, Result};
pub use crate::spectrum::{density, density_par, transform};
