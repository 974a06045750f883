/// Application layer: repository discovery and the run orchestrators.
pub mod services;
pub mod use_cases;
