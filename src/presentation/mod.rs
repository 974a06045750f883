/// Presentation layer: the command-line interface.
pub mod cli;
