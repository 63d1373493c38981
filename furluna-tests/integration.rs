//! Integration tests for Furluna
//!
//! These tests drive the crates together: the places API is replaced by a
//! local mock server, pages live in temporary directories, and the site is
//! served on an ephemeral port.

#[path = "style.rs"]
mod style;

#[path = "integration/listing_workflow.rs"]
mod listing_workflow;
#[path = "integration/site_server.rs"]
mod site_server;
