//! Command-line front end for the payroll pipeline.
//!
//! The argument surface lives in the library so the binary stays a thin
//! wrapper and tests can drive [`cli::run_with_args`] directly.

pub mod cli;
mod input;
mod render;

pub use input::{load_dataset, InputFormat, InputSource};
pub use render::money;
