//! Furluna web server
//!
//! Serves the site pages from the public directory, accepts the account
//! forms and keeps the appointment page's hospital listing refreshed.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use furluna_core::FurlunaConfig;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers::{PAGE_ROUTES, healthz, listing_status, login, page_service, signup};
use crate::listing::{ListingRefresher, RefreshError};

/// Shared state for request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration the server was started with
    pub config: Arc<FurlunaConfig>,
    /// Listing refresher shared with the background refresh task
    pub refresher: Arc<ListingRefresher>,
}

impl AppState {
    /// Creates state, building the refresher from `config`.
    ///
    /// # Errors
    /// - `RefreshError::Search` - Places client or photo URL setup failed
    pub fn from_config(config: FurlunaConfig) -> Result<Self, RefreshError> {
        let refresher = ListingRefresher::from_config(&config)?;
        Ok(Self {
            config: Arc::new(config),
            refresher: Arc::new(refresher),
        })
    }
}

/// Errors that stop the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Listing refresher could not be set up
    #[error("Failed to set up listing refresh: {0}")]
    Setup(#[from] RefreshError),

    /// Listening socket could not be bound
    #[error("Failed to bind {address}: {source}")]
    Bind {
        /// Requested bind address
        address: String,
        /// Underlying socket error
        #[source]
        source: std::io::Error,
    },

    /// Serving connections failed
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Builds the application router.
pub fn build_router(state: AppState) -> Router {
    let public_dir = state.config.server.public_dir.clone();

    let mut router = Router::new();
    for page in PAGE_ROUTES {
        router = router.route(page.route, page_service(&public_dir, page.file));
    }

    router
        // Form submissions share their page's path
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/healthz", get(healthz))
        .route("/api/listing/status", get(listing_status))
        .fallback_service(ServeDir::new(&public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the server until Ctrl-C.
///
/// With `refresh_listing` set, the hospital listing is refreshed in the
/// background right away and then on the configured interval.
///
/// # Errors
/// - `ServerError::Setup` - Listing refresher could not be built
/// - `ServerError::Bind` - Address in use or not permitted
/// - `ServerError::Serve` - Accept loop failed
pub async fn run_server(config: FurlunaConfig, refresh_listing: bool) -> Result<(), ServerError> {
    let address = config.bind_address();
    let state = AppState::from_config(config)?;

    if refresh_listing {
        state.refresher.clone().spawn_refresh_task();
    } else {
        tracing::info!("Listing refresh disabled");
    }

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;

    tracing::info!(
        address = %address,
        mode = %state.config.runtime_mode,
        public_dir = %state.config.server.public_dir.display(),
        "Furluna server running"
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use furluna_search::providers::MockPlacesProvider;
    use furluna_search::{HospitalFinder, PhotoUrlBuilder};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;

    fn test_state() -> (TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>Furluna</h1>").unwrap();
        std::fs::create_dir_all(dir.path().join("assets/css")).unwrap();
        std::fs::write(dir.path().join("assets/css/main.css"), "body {}").unwrap();
        std::fs::write(dir.path().join("logo.svg"), "<svg/>").unwrap();

        let config = FurlunaConfig::for_testing(dir.path());
        let refresher = ListingRefresher::new(
            HospitalFinder::new(Arc::new(MockPlacesProvider::returning(vec![]))),
            PhotoUrlBuilder::new("https://maps.googleapis.com", 400, None).unwrap(),
            config.listing.clone(),
        );
        let state = AppState {
            config: Arc::new(config),
            refresher: Arc::new(refresher),
        };
        (dir, state)
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn form_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_index_page() {
        let (_dir, state) = test_state();
        let response = build_router(state).oneshot(get_request("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "<h1>Furluna</h1>");
    }

    #[tokio::test]
    async fn test_stylesheet_alias() {
        let (_dir, state) = test_state();
        let response = build_router(state).oneshot(get_request("/css/main")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/css"));
    }

    #[tokio::test]
    async fn test_missing_page_is_not_found() {
        let (_dir, state) = test_state();
        let response = build_router(state).oneshot(get_request("/medications")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_fallback_serves_public_dir() {
        let (_dir, state) = test_state();
        let response = build_router(state).oneshot(get_request("/logo.svg")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "<svg/>");
    }

    #[tokio::test]
    async fn test_healthz() {
        let (_dir, state) = test_state();
        let response = build_router(state).oneshot(get_request("/healthz")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ok");
    }

    #[tokio::test]
    async fn test_listing_status_before_refresh() {
        let (_dir, state) = test_state();
        let response = build_router(state)
            .oneshot(get_request("/api/listing/status"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "null");
    }

    #[tokio::test]
    async fn test_valid_signup_redirects_to_dashboard() {
        let (_dir, state) = test_state();
        let request = form_post(
            "/signup",
            "name=Sam&email=sam%40example.com&password=hunter2hunter2&confirm_password=hunter2hunter2",
        );
        let response = build_router(state).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/dashboard");
    }

    #[tokio::test]
    async fn test_invalid_login_lists_errors() {
        let (_dir, state) = test_state();
        let response = build_router(state)
            .oneshot(form_post("/login", "email=nobody"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_text(response).await;
        assert!(body.contains("<li>email: is not a valid address</li>"));
        assert!(body.contains("<li>password: is required</li>"));
    }
}
