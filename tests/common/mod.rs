//! Common test utilities and helpers
//!
//! Shared by the integration test binaries; not every binary uses every
//! helper.

#![allow(dead_code)]

pub mod fake_vcs;
pub mod test_fixtures;
