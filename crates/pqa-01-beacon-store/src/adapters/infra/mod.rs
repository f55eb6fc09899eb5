//! Infrastructure adapters.

mod time;

pub use time::{ManualTimeSource, SystemTimeSource};
