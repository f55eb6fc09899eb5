//! # PQA Beaconing Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks
//! └── src/
//!     ├── fixtures.rs   # Topologies and beacon factories
//!     └── integration/  # Store + engine scenarios
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p pqa-tests
//! cargo test -p pqa-tests integration::
//! cargo bench -p pqa-tests
//! ```

pub mod fixtures;
pub mod integration;
