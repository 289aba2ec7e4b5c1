//! Shared utilities.
//!
//! Scoped working-directory changes and test helpers.

pub mod cwd;

#[cfg(test)]
pub mod testutil;
