//! Accent-derived styles.

mod service;

pub use service::{Theme, parse_color};
