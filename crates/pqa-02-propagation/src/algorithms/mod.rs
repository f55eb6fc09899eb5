//! # Algorithms Module
//!
//! Interface grouping and best-set selection. Pure functions; all I/O
//! happens in the service.

pub mod grouping;
pub mod selection;

pub use grouping::{interface_groups, interface_subgroups, neighbouring_ases};
pub use selection::{rank_and_truncate, select_n_best};
