pub mod config;
pub mod profile;

pub use config::{ConfigError, ReviewConfig};
pub use profile::{MafColumns, ReviewProfile, ReviewerKind};

#[cfg(test)]
#[path = "../../tests/src_inline/model/tests.rs"]
mod tests;
