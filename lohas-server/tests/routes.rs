use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use lohas::{
    data::source::Resource, Category, LocationCollection, LocationFeature, LocationProperties,
    MemoryDataSource,
};
use std::sync::Arc;
use tower::ServiceExt;

fn source() -> MemoryDataSource {
    let park = LocationFeature::new(
        LocationProperties {
            id: "p1".to_string(),
            name: "青埔公園".to_string(),
            category: "park".to_string(),
            ..Default::default()
        },
        121.5,
        25.0,
    );
    MemoryDataSource::new(
        vec![Category::new("park", "公園", "#0f0")],
        LocationCollection::new(vec![park]),
    )
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn categories_are_served_at_root_and_under_api() {
    for uri in ["/categories", "/api/categories"] {
        let app = lohas_server::build_router(Arc::new(source()));
        let (status, body) = get_json(app, uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body[0]["id"], "park");
        assert_eq!(body[0]["color"], "#0f0");
    }
}

#[tokio::test]
async fn locations_keep_wire_coordinate_order() {
    let app = lohas_server::build_router(Arc::new(source()));
    let (status, body) = get_json(app, "/api/locations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "FeatureCollection");
    assert_eq!(body["features"][0]["geometry"]["type"], "Point");
    assert_eq!(
        body["features"][0]["geometry"]["coordinates"],
        serde_json::json!([121.5, 25.0])
    );
}

#[tokio::test]
async fn failures_answer_500_with_error_body() {
    let failing = source().with_failure(Resource::Locations, 503);
    let app = lohas_server::build_router(Arc::new(failing));
    let (status, body) = get_json(app, "/locations").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("locations"));
}

#[tokio::test]
async fn health_check() {
    let app = lohas_server::build_router(Arc::new(source()));
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = lohas_server::build_router(Arc::new(source()));
    let (status, _) = get_json(app, "/api/unknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
