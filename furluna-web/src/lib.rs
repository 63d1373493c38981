//! Furluna Web - site server and hospital listing

#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Serves the pet-care site's static pages, validates the account forms, and
//! keeps the hospital listing on the appointment page current.

pub mod handlers;
pub mod listing;
pub mod server;
pub mod templates;

// Re-export main types
pub use listing::{ListingRefresher, RefreshError, RefreshReport};
pub use server::{AppState, ServerError, build_router, run_server};
