//! Corpus records and the inverted tables built over them
//!
//! - Record: one table row with its resolved code/description
//! - Record index: exact, word, bigram and trigram tables for candidate filtering

pub mod record;
pub mod record_index;

pub use record::*;
pub use record_index::*;
