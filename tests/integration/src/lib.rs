//! End-to-end tests of the DNS workflows against recording test doubles.
//!
//! This test suite validates:
//! - Record editing on a verified resolver (set, delete, format rejection)
//! - Subdomain minting in an owned, recognized collection
//! - Collection deployment for an owned `.ton` domain
//! - Busy guards and stale-result handling under concurrent actions
//! - Configuration loading and network profiles


#[cfg(test)]
mod record_editor_tests;


#[cfg(test)]
mod collection_tests;

#[cfg(test)]
mod concurrency_tests;
