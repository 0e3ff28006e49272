//! Test Module
//!
//! Integration test suite for the assistant core.
//!
//! ## Test Categories
//! - `pipeline_tests`: full process_message flows over the in-memory store
//! - `store_tests`: memory store query and counter semantics

pub mod store_tests;
