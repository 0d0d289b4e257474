//! # Lexicon Test Suite
//!
//! Unified test crate for flows that cross subsystem boundaries.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs     # Shared node wiring, clock and seed data
//!     ├── flows.rs        # Review → vote → promotion → ledger → rankings
//!     ├── concurrency.rs  # Racing voters and jobs on one critical section
//!     └── ledger.rs       # Ingestion resumability and ranking windows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p lx-tests
//! cargo test -p lx-tests integration::concurrency
//! ```

#![allow(dead_code)]

pub mod integration;
