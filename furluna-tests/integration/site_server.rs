//! Site served over a real socket

use std::sync::Arc;

use furluna_core::FurlunaConfig;
use furluna_search::providers::MockPlacesProvider;
use furluna_search::{HospitalFinder, PhotoUrlBuilder, PlaceResult};
use furluna_web::{AppState, ListingRefresher, build_router};
use reqwest::StatusCode;
use reqwest::redirect::Policy;
use tempfile::TempDir;

const LISTING_PAGE: &str = "<html><body>\n<div id=\"wrapper\">\n<!-- END OF REPLACEMENT -->\n</div>\n</body></html>\n";

struct TestSite {
    _dir: TempDir,
    base_url: String,
    state: AppState,
    client: reqwest::Client,
}

async fn start_site(places: Vec<PlaceResult>) -> TestSite {
    let dir = tempfile::tempdir().unwrap();
    let public = dir.path();
    for page in ["index.html", "signup.html", "login.html", "dashboard.html", "my_pets.html"] {
        std::fs::write(public.join(page), format!("<title>{page}</title>")).unwrap();
    }
    std::fs::write(public.join("schedule_appt.html"), LISTING_PAGE).unwrap();
    std::fs::create_dir_all(public.join("hyperspace/assets/js")).unwrap();
    std::fs::write(public.join("hyperspace/assets/js/util.js"), "// util").unwrap();

    let config = FurlunaConfig::for_testing(public);
    let refresher = ListingRefresher::new(
        HospitalFinder::new(Arc::new(MockPlacesProvider::returning(places))),
        PhotoUrlBuilder::new("https://maps.googleapis.com", 400, None).unwrap(),
        config.listing.clone(),
    );
    let state = AppState {
        config: Arc::new(config),
        refresher: Arc::new(refresher),
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let router = build_router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestSite {
        _dir: dir,
        base_url: format!("http://{address}"),
        state,
        client: reqwest::Client::builder()
            .redirect(Policy::none())
            .build()
            .unwrap(),
    }
}

impl TestSite {
    async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .unwrap()
    }

    async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(format!("{}{path}", self.base_url))
            .form(fields)
            .send()
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn test_named_pages_are_served() {
    let site = start_site(vec![]).await;

    for (route, page) in [
        ("/", "index.html"),
        ("/signup", "signup.html"),
        ("/login", "login.html"),
        ("/dashboard", "dashboard.html"),
        ("/my_pets", "my_pets.html"),
    ] {
        let response = site.get(route).await;
        assert_eq!(response.status(), StatusCode::OK, "{route}");
        assert_eq!(response.text().await.unwrap(), format!("<title>{page}</title>"));
    }

    let script = site.get("/hyperspace/utiljs").await;
    assert_eq!(script.status(), StatusCode::OK);
    assert_eq!(script.text().await.unwrap(), "// util");
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let site = start_site(vec![]).await;
    assert_eq!(site.get("/no/such/page").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(site.get("/medications").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_refreshed_listing_is_served_without_restart() {
    let site = start_site(vec![
        PlaceResult::with_photo("Happy Paws Vet", "abc123"),
        PlaceResult::without_photo("City Animal Hospital"),
    ])
    .await;

    let before = site.get("/schedule_appt").await.text().await.unwrap();
    assert!(!before.contains("Happy Paws Vet"));

    site.state.refresher.refresh().await.unwrap();

    let after = site.get("/schedule_appt").await.text().await.unwrap();
    assert!(after.contains("<h2>Happy Paws Vet</h2>"));
    assert!(after.contains("<h2>City Animal Hospital</h2>"));

    let status: serde_json::Value = site
        .get("/api/listing/status")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(status["places"], 2);
    assert_eq!(status["patch"]["action"], "Replaced");
}

#[tokio::test]
async fn test_signup_and_login_forms() {
    let site = start_site(vec![]).await;

    let signup = site
        .post_form(
            "/signup",
            &[
                ("name", "Sam"),
                ("email", "sam@example.com"),
                ("password", "whiskers-and-paws"),
                ("confirm_password", "whiskers-and-paws"),
            ],
        )
        .await;
    assert_eq!(signup.status(), StatusCode::SEE_OTHER);
    assert_eq!(signup.headers()["location"], "/dashboard");

    let bad_signup = site
        .post_form(
            "/signup",
            &[
                ("name", "Sam"),
                ("email", "sam@example.com"),
                ("password", "whiskers-and-paws"),
                ("confirm_password", "whiskers"),
            ],
        )
        .await;
    assert_eq!(bad_signup.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(
        bad_signup
            .text()
            .await
            .unwrap()
            .contains("confirm_password: does not match password")
    );

    let login = site
        .post_form("/login", &[("email", "sam@example.com"), ("password", "x")])
        .await;
    assert_eq!(login.status(), StatusCode::SEE_OTHER);
}
