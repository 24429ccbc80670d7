//! Priority engine, ranking, and suggestion selection.
//!
//! Everything here is a pure function of its arguments: no I/O, no clock
//! reads, no mutation of the tasks passed in.

pub mod priority;
pub mod ranking;
pub mod suggest;

pub use priority::effective_priority;
pub use ranking::{compare, rank, RankedTask};
pub use suggest::{suggest, SuggestMode};
