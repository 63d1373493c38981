//! Hospital listing refresh
//!
//! Runs the search, renders the cards and patches them into the appointment
//! page. Every trigger (startup, periodic timer, CLI) goes through
//! [`ListingRefresher::refresh`], which shares one [`RegionPatcher`] so page
//! writes never interleave.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use furluna_core::config::{FurlunaConfig, ListingConfig, SearchFailurePolicy};
use furluna_core::storage::{PatchError, PatchOutcome, RegionPatcher};
use furluna_search::{HospitalFinder, PhotoUrlBuilder, PlaceSearchError};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::templates::{render_hospitals, render_search_error};

/// Errors that abort a listing refresh.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    /// Finder or photo URL setup failed
    #[error("Search setup failed: {0}")]
    Search(#[from] PlaceSearchError),

    /// The page could not be patched
    #[error("Patch failed: {0}")]
    Patch(#[from] PatchError),
}

/// Summary of one refresh run.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshReport {
    /// When the refresh finished
    pub refreshed_at: DateTime<Utc>,
    /// Number of hospital cards rendered
    pub places: usize,
    /// Search failure, if the search did not succeed
    pub search_error: Option<String>,
    /// Page patch result; `None` when the page was left alone or the patch failed
    pub patch: Option<PatchOutcome>,
    /// Why the page could not be patched, if it could not
    pub refresh_error: Option<String>,
}

/// Keeps the hospital listing region of the appointment page current.
#[derive(Debug)]
pub struct ListingRefresher {
    finder: HospitalFinder,
    photos: PhotoUrlBuilder,
    patcher: RegionPatcher,
    settings: ListingConfig,
    last_report: RwLock<Option<RefreshReport>>,
}

impl ListingRefresher {
    /// Creates a refresher from its parts.
    pub fn new(finder: HospitalFinder, photos: PhotoUrlBuilder, settings: ListingConfig) -> Self {
        Self {
            finder,
            photos,
            patcher: RegionPatcher::new(settings.missing_region),
            settings,
            last_report: RwLock::new(None),
        }
    }

    /// Creates a refresher for the configured runtime mode and places API.
    ///
    /// # Errors
    /// - `RefreshError::Search` - HTTP client or photo URL setup failed
    pub fn from_config(config: &FurlunaConfig) -> Result<Self, RefreshError> {
        let finder = HospitalFinder::from_config(config)?;
        let photos = PhotoUrlBuilder::from_config(&config.places)?;
        Ok(Self::new(finder, photos, config.listing.clone()))
    }

    /// Listing settings this refresher runs with.
    pub fn settings(&self) -> &ListingConfig {
        &self.settings
    }

    /// Report of the most recent refresh, successful or not.
    pub async fn last_report(&self) -> Option<RefreshReport> {
        self.last_report.read().await.clone()
    }

    /// Searches, renders and patches the listing once.
    ///
    /// A failed search never aborts the refresh: it is logged and handled
    /// according to the configured [`SearchFailurePolicy`]. A failed patch is
    /// recorded in the last report before the error is returned.
    ///
    /// # Errors
    /// - `RefreshError::Patch` - Page missing, unreadable, unwritable or without region
    pub async fn refresh(&self) -> Result<RefreshReport, RefreshError> {
        let coordinate = self.settings.coordinate;
        let radius = self.settings.radius;

        let (fragment, places, search_error) =
            match self.finder.try_find(coordinate, radius).await {
                Ok(places) => (
                    Some(render_hospitals(&places, &self.photos)),
                    places.len(),
                    None,
                ),
                Err(e) => {
                    tracing::error!(%coordinate, %radius, error = %e, "Error fetching nearby hospitals");
                    let fragment = match self.settings.search_failure {
                        SearchFailurePolicy::ErrorNotice => Some(render_search_error()),
                        SearchFailurePolicy::EmptyListing => Some(render_hospitals(&[], &self.photos)),
                        SearchFailurePolicy::KeepExisting => None,
                    };
                    (fragment, 0, Some(e.to_string()))
                }
            };

        let patched = match fragment {
            Some(fragment) => self
                .patcher
                .patch(&self.settings.target_file, &fragment)
                .await
                .map(Some),
            None => {
                tracing::warn!(
                    path = %self.settings.target_file.display(),
                    "search failed, keeping existing listing"
                );
                Ok(None)
            }
        };

        let mut report = RefreshReport {
            refreshed_at: Utc::now(),
            places,
            search_error,
            patch: None,
            refresh_error: None,
        };
        match patched {
            Ok(patch) => report.patch = patch,
            Err(e) => {
                report.refresh_error = Some(e.to_string());
                *self.last_report.write().await = Some(report);
                return Err(e.into());
            }
        }
        *self.last_report.write().await = Some(report.clone());

        tracing::info!(
            places = report.places,
            path = %self.settings.target_file.display(),
            "Hospitals listing refreshed"
        );
        Ok(report)
    }

    /// Refreshes now, then on every configured interval.
    ///
    /// Without an interval the task ends after the first run. Failures are
    /// logged and do not stop later runs.
    pub fn spawn_refresh_task(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                if let Err(e) = self.refresh().await {
                    tracing::error!(error = %e, "Hospital listing refresh failed");
                }

                let Some(interval) = self.settings.refresh_interval else {
                    break;
                };
                tokio::time::sleep(interval).await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use furluna_core::config::MissingRegionPolicy;
    use furluna_core::storage::{END_MARKER, PatchAction};
    use furluna_search::PlaceResult;
    use furluna_search::providers::MockPlacesProvider;
    use tempfile::tempdir;

    use super::*;

    const PAGE: &str = "<html><body>\n<div id=\"wrapper\">\n<p>stale</p><!-- END OF REPLACEMENT -->\n</div>\n</body></html>\n";

    fn refresher(
        provider: MockPlacesProvider,
        target: &Path,
        search_failure: SearchFailurePolicy,
    ) -> ListingRefresher {
        let settings = ListingConfig {
            target_file: target.to_path_buf(),
            search_failure,
            ..Default::default()
        };
        ListingRefresher::new(
            HospitalFinder::new(Arc::new(provider)),
            PhotoUrlBuilder::new("https://maps.googleapis.com", 400, None).unwrap(),
            settings,
        )
    }

    #[tokio::test]
    async fn test_refresh_writes_cards() {
        let dir = tempdir().unwrap();
        let page = dir.path().join("schedule_appt.html");
        std::fs::write(&page, PAGE).unwrap();

        let provider = MockPlacesProvider::returning(vec![
            PlaceResult::with_photo("Happy Paws Vet", "abc123"),
            PlaceResult::without_photo("City Animal Hospital"),
        ]);
        let refresher = refresher(provider, &page, SearchFailurePolicy::ErrorNotice);

        let report = refresher.refresh().await.unwrap();

        assert_eq!(report.places, 2);
        assert!(report.search_error.is_none());
        assert_eq!(report.patch.unwrap().action, PatchAction::Replaced);

        let written = std::fs::read_to_string(&page).unwrap();
        assert!(!written.contains("stale"));
        assert_eq!(written.matches("<section>").count(), 2);
        assert_eq!(written.matches(END_MARKER).count(), 1);
        assert!(refresher.last_report().await.is_some());
    }

    #[tokio::test]
    async fn test_search_failure_writes_error_notice() {
        let dir = tempdir().unwrap();
        let page = dir.path().join("schedule_appt.html");
        std::fs::write(&page, PAGE).unwrap();

        let refresher = refresher(
            MockPlacesProvider::failing("connection refused"),
            &page,
            SearchFailurePolicy::ErrorNotice,
        );
        let report = refresher.refresh().await.unwrap();

        assert_eq!(report.places, 0);
        assert!(report.search_error.unwrap().contains("connection refused"));
        let written = std::fs::read_to_string(&page).unwrap();
        assert!(written.contains("<p>Error fetching nearby hospitals</p><!-- END OF REPLACEMENT -->"));
    }

    #[tokio::test]
    async fn test_search_failure_with_empty_listing_policy() {
        let dir = tempdir().unwrap();
        let page = dir.path().join("schedule_appt.html");
        std::fs::write(&page, PAGE).unwrap();

        let refresher = refresher(
            MockPlacesProvider::failing("timeout"),
            &page,
            SearchFailurePolicy::EmptyListing,
        );
        refresher.refresh().await.unwrap();

        let written = std::fs::read_to_string(&page).unwrap();
        assert!(written.contains("<div id=\"wrapper\">\n<!-- END OF REPLACEMENT -->\n</div>"));
    }

    #[tokio::test]
    async fn test_search_failure_with_keep_existing_policy() {
        let dir = tempdir().unwrap();
        let page = dir.path().join("schedule_appt.html");
        std::fs::write(&page, PAGE).unwrap();

        let refresher = refresher(
            MockPlacesProvider::failing("timeout"),
            &page,
            SearchFailurePolicy::KeepExisting,
        );
        let report = refresher.refresh().await.unwrap();

        assert!(report.patch.is_none());
        assert_eq!(std::fs::read_to_string(&page).unwrap(), PAGE);
    }

    #[tokio::test]
    async fn test_missing_region_fails_refresh() {
        let dir = tempdir().unwrap();
        let page = dir.path().join("schedule_appt.html");
        std::fs::write(&page, "<html><body></body></html>").unwrap();

        let refresher = refresher(
            MockPlacesProvider::returning(vec![]),
            &page,
            SearchFailurePolicy::ErrorNotice,
        );
        assert_eq!(
            refresher.settings().missing_region,
            MissingRegionPolicy::Fail
        );

        let result = refresher.refresh().await;
        assert!(matches!(
            result,
            Err(RefreshError::Patch(PatchError::RegionNotFound { .. }))
        ));

        let report = refresher.last_report().await.unwrap();
        assert!(report.patch.is_none());
        assert!(report.refresh_error.unwrap().contains("region"));
    }

    #[tokio::test]
    async fn test_failed_refresh_replaces_previous_report() {
        let dir = tempdir().unwrap();
        let page = dir.path().join("schedule_appt.html");
        std::fs::write(&page, PAGE).unwrap();

        let refresher = refresher(
            MockPlacesProvider::returning(vec![PlaceResult::without_photo("Vet")]),
            &page,
            SearchFailurePolicy::ErrorNotice,
        );

        refresher.refresh().await.unwrap();
        let first = refresher.last_report().await.unwrap();
        assert!(first.refresh_error.is_none());
        assert!(first.patch.is_some());

        std::fs::remove_file(&page).unwrap();
        let result = refresher.refresh().await;
        assert!(matches!(
            result,
            Err(RefreshError::Patch(PatchError::Io { .. }))
        ));

        let second = refresher.last_report().await.unwrap();
        assert!(second.refreshed_at >= first.refreshed_at);
        assert!(second.patch.is_none());
        assert!(second.refresh_error.is_some());
    }

    #[tokio::test]
    async fn test_refresh_task_without_interval_runs_once() {
        let dir = tempdir().unwrap();
        let page = dir.path().join("schedule_appt.html");
        std::fs::write(&page, PAGE).unwrap();

        let provider = Arc::new(MockPlacesProvider::returning(vec![PlaceResult::without_photo(
            "Vet",
        )]));
        let refresher = Arc::new(ListingRefresher::new(
            HospitalFinder::new(provider.clone()),
            PhotoUrlBuilder::new("https://maps.googleapis.com", 400, None).unwrap(),
            ListingConfig {
                target_file: page.clone(),
                ..Default::default()
            },
        ));

        refresher.clone().spawn_refresh_task().await.unwrap();

        assert_eq!(provider.calls(), 1);
        assert!(std::fs::read_to_string(&page).unwrap().contains("<h2>Vet</h2>"));
    }
}
