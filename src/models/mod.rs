//! Data models for guests and admission lookups.

pub mod guest;
pub mod verdict;

pub use guest::{ADULT_BIRTH_YEAR_LIMIT, Guest};
pub use verdict::{Admission, LookupResponse, RemovalResponse, Verdict};
