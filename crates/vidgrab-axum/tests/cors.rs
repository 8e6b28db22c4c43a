//! Integration tests for CORS preflight handling.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use tower::ServiceExt;

use common::{Behavior, FakeEngine, test_app};
use vidgrab_axum::CorsConfig;

fn preflight(origin: &str) -> Request<Body> {
    Request::builder()
        .method(Method::OPTIONS)
        .uri("/download/")
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn allow_all_mirrors_origin_with_credentials() {
    let root = tempfile::tempdir().unwrap();
    let app = test_app(FakeEngine::new(Behavior::Empty), root.path(), &CorsConfig::AllowAll);

    let response = app.oneshot(preflight("http://example.com")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://example.com"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
    assert!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .unwrap()
            .to_str()
            .unwrap()
            .contains("POST")
    );
}

#[tokio::test]
async fn origin_list_only_allows_listed_origins() {
    let root = tempfile::tempdir().unwrap();
    let cors = CorsConfig::from_origins(vec!["http://localhost:3000".to_string()]);

    let app = test_app(FakeEngine::new(Behavior::Empty), root.path(), &cors);
    let allowed = app.oneshot(preflight("http://localhost:3000")).await.unwrap();
    assert_eq!(
        allowed
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:3000"
    );

    let app = test_app(FakeEngine::new(Behavior::Empty), root.path(), &cors);
    let denied = app.oneshot(preflight("http://evil.example")).await.unwrap();
    assert!(
        denied
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
