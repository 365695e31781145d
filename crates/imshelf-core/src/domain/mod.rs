//! Domain models shared across the crate

pub mod record;

pub use record::{CoverSize, Record};
