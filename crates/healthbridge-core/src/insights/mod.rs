//! Insight aggregation and formatting over ranked match lists.

mod aggregate;
mod format;

pub use aggregate::*;
pub use format::*;
