use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["service"], "fleet-tracking");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = create_test_app();
    let response = app
        .oneshot(Request::get("/api/unknown").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_gps_data_rejects_get() {
    let app = create_test_app();
    let response = app
        .oneshot(Request::get("/gps/data").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// Función helper para crear la app de test - misma forma que el router real,
// sin base de datos
fn create_test_app() -> axum::Router {
    axum::Router::new()
        .route(
            "/health",
            axum::routing::get(|| async {
                axum::Json(json!({ "status": "ok", "service": "fleet-tracking" }))
            }),
        )
        .route(
            "/gps/data",
            axum::routing::post(|| async { axum::Json(json!({ "status": "success" })) }),
        )
}
