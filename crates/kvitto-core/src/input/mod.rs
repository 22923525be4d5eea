//! Input normalization for heterogeneous email exports.

mod normalizer;

pub use normalizer::parse_emails;
