/// Shared utilities: error type, result alias and argument safety helpers.
pub mod error;
pub mod result;
pub mod shell;
