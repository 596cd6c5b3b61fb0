//! Complex numbers rounded to two decimals, their arithmetic, and a view of the complex plane.
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod io;
pub mod shell;
pub mod tui;

pub use crate::core::complex_number::{ComplexNumber, DivisionMode};
pub use crate::core::error::CoreError;
