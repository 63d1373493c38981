//! Static page routes
//!
//! Each page is a file under the public directory, served as-is.

use std::path::Path;

use axum::routing::{MethodRouter, get_service};
use tower_http::services::ServeFile;

use crate::server::AppState;

/// A fixed route backed by one file of the public directory.
#[derive(Debug, Clone, Copy)]
pub struct PageRoute {
    /// Request path
    pub route: &'static str,
    /// File path relative to the public directory
    pub file: &'static str,
}

const fn page(route: &'static str, file: &'static str) -> PageRoute {
    PageRoute { route, file }
}

/// Every named page and stylesheet/script alias the site links to.
pub const PAGE_ROUTES: &[PageRoute] = &[
    page("/", "index.html"),
    page("/signup", "signup.html"),
    page("/login", "login.html"),
    page("/dashboard", "dashboard.html"),
    page("/my_pets", "my_pets.html"),
    page("/schedule_appt", "schedule_appt.html"),
    page("/medications", "medications.html"),
    page("/css/main", "assets/css/main.css"),
    page("/css/noscript", "assets/css/noscript.css"),
    page("/hyperspace/main", "hyperspace/assets/css/main.css"),
    page("/hyperspace/noscript", "hyperspace/assets/css/noscript.css"),
    page("/hyperspace/mainjs", "hyperspace/assets/js/main.js"),
    page("/hyperspace/utiljs", "hyperspace/assets/js/util.js"),
];

/// GET service answering with `file` from `public_dir`.
///
/// The file is read per request, so a freshly patched listing page is served
/// without a restart. A missing file answers 404.
pub fn page_service(public_dir: &Path, file: &str) -> MethodRouter<AppState> {
    get_service(ServeFile::new(public_dir.join(file)))
}
