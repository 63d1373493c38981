//! Static page storage.
//!
//! Locates the delimited listing region inside a static HTML page and
//! rewrites it in place without ever leaving a half-written file behind.

pub mod patcher;
pub mod region;

use std::path::PathBuf;

pub use patcher::RegionPatcher;
pub use region::{END_MARKER, OPENING_MARKER, RegionSearch, locate_region};
use serde::Serialize;

/// Errors raised while patching a page region.
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    /// The page has no region to replace and the policy forbids creating one
    #[error("No listing region in {path}: {reason}")]
    RegionNotFound {
        /// Page that was searched
        path: PathBuf,
        /// Which marker was missing
        reason: String,
    },

    /// The fragment would leave the page unpatchable next time
    #[error("Invalid fragment: {reason}")]
    InvalidFragment {
        /// What is wrong with the fragment
        reason: String,
    },

    /// Reading the page or writing its replacement failed
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

/// How a patch changed the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PatchAction {
    /// An existing region was replaced
    Replaced,
    /// A new region was created because none existed
    Appended,
    /// The page already held this exact content, nothing was written
    Unchanged,
}

/// Result of a successful patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatchOutcome {
    pub action: PatchAction,
    /// Size of the page after patching
    pub bytes: usize,
}
