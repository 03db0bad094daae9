//! Filtering of the working set and the chart-ready aggregates computed over it.
//!
//! Everything in here is pure: the functions only read records and return plain data,
//! rendering is up to the caller.

mod filter;
pub use self::filter::*;
mod aggregate;
pub use self::aggregate::*;

#[cfg(test)]
mod tests;
