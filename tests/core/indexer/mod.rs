//! Indexer layer tests
//!
//! End-to-end expansion scenarios and chunk payload checks.

mod test_changed_files;
mod test_expansion;
mod test_payloads;
