//! HTTP request handlers organized by functionality

pub mod forms;
pub mod pages;
pub mod status;

// Re-export handler functions
pub use forms::{FieldError, LoginForm, SignupForm, login, signup};
pub use pages::{PAGE_ROUTES, PageRoute, page_service};
pub use status::{healthz, listing_status};
