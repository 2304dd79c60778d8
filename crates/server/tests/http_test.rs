//! Router tests: requests go through the full axum stack via `oneshot`.

use std::io::Write;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use data_loader::Catalog;
use serde_json::{json, Value};
use server::{create_router, AppState};
use tempfile::NamedTempFile;
use tower::ServiceExt;

const CSV: &str = "\
name,brand,spirit_type,abv,shelf_price
Premium Vodka Reserve,Acme,vodka,40,5.00
House Vodka,Acme,Vodka,40,10.00
Premium Bourbon,Barrel,whiskey,45,15.00
Premium Vodka Gold,Acme,VODKA,40,
Dark Rum,Isle,rum,40,25.00
Bad Row,Acme,gin,41,not-a-price
Rye One,Barrel,whiskey,46,30.00
Rye Two,Barrel,whiskey,47,32.00
Rye Three,Barrel,whiskey,44,34.00
Rye Four,Barrel,whiskey,45,36.00
";

fn app() -> Router {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(CSV.as_bytes()).unwrap();
    let catalog = Catalog::load_from_file(file.path()).unwrap();
    create_router(AppState::new(Arc::new(catalog)))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn ids(body: &Value) -> Vec<u64> {
    body["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["records"], 9);
}

#[tokio::test]
async fn test_list_all_in_load_order() {
    let (status, body) = get(app(), "/v1/liquors").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 9);
    assert_eq!(ids(&body), vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
}

#[tokio::test]
async fn test_category_and_name_filters() {
    let (status, body) = get(app(), "/v1/liquors?category=vodka&name_contains=premium").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 4]);
}

#[tokio::test]
async fn test_pagination_reports_total() {
    let (status, body) = get(app(), "/v1/liquors?limit=2&offset=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![2, 3]);
    assert_eq!(body["total"], 9);
    assert_eq!(body["offset"], 1);
}

#[tokio::test]
async fn test_invalid_range_is_400() {
    let (status, body) = get(app(), "/v1/liquors?price_min=20&price_max=10").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_QUERY");
}

#[tokio::test]
async fn test_unknown_and_repeated_options_are_400() {
    let (status, _) = get(app(), "/v1/liquors?colour=amber").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get(app(), "/v1/liquors?category=rum&category=gin").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_QUERY");
}

#[tokio::test]
async fn test_get_by_id() {
    let (status, body) = get(app(), "/v1/liquors/3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Premium Bourbon");

    let (status, body) = get(app(), "/v1/liquors/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_stats_include_skipped_rows() {
    let (status, body) = get(app(), "/v1/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["record_count"], 9);
    assert_eq!(body["rows_read"], 10);
    assert_eq!(body["rows_skipped"], 1);
}

#[tokio::test]
async fn test_personal_recommendations() {
    let body = json!({
        "username": "ana",
        "bar": [
            {"product": {"name": "Knob Creek", "brand": "Jim Beam", "spirit": "whiskey", "proof": 90, "average_msrp": 40}}
        ]
    });
    let (status, body) = post(app(), "/v1/recommendations/personal", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "ana");

    let recs = body["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 5);
    assert_eq!(recs[0]["id"], 3);
    assert!(recs[0]["reason"].as_str().unwrap().contains("whiskey"));
}

#[tokio::test]
async fn test_room_recommendations() {
    let body = json!({
        "members": [
            {"username": "ana", "bar": [
                {"product": {"name": "A", "brand": "B", "spirit": "whiskey", "proof": 90, "average_msrp": 40}}
            ]},
            {"username": "ben", "bar": []}
        ]
    });
    let (status, body) = post(app(), "/v1/recommendations/room", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["members"], json!(["ana", "ben"]));
    for rec in body["recommendations"].as_array().unwrap() {
        assert!(rec["influenced_by"].is_string());
    }
}

#[tokio::test]
async fn test_empty_room_is_400() {
    let (status, _) = post(app(), "/v1/recommendations/room", json!({"members": []})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_insufficient_candidates_is_422() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"name,spirit_type,abv,shelf_price\nSolo,rum,40,20\n").unwrap();
    let catalog = Catalog::load_from_file(file.path()).unwrap();
    let app = create_router(AppState::new(Arc::new(catalog)));

    let (status, body) = post(app, "/v1/recommendations/personal", json!({"username": "ana"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INSUFFICIENT_CANDIDATES");
}

#[tokio::test]
async fn test_bar_numbers_may_be_strings() {
    let body = json!({
        "username": "ana",
        "bar": [
            {"product": {"name": "Knob Creek", "brand": "Jim Beam", "spirit": "whiskey", "proof": "90", "average_msrp": "40.00"}}
        ]
    });
    let (status, body) = post(app(), "/v1/recommendations/personal", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile"]["avg_proof"], 90.0);
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_undecodable_bar_is_400_api_error() {
    let body = json!({
        "username": "ana",
        "bar": [
            {"product": {"name": "A", "brand": "B", "spirit": "gin", "proof": "strong", "average_msrp": 25}}
        ]
    });
    let (status, body) = post(app(), "/v1/recommendations/personal", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(body["details"].as_str().unwrap().contains("strong"));
}

#[tokio::test]
async fn test_malformed_room_body_is_400_api_error() {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/recommendations/room")
        .header("content-type", "application/json")
        .body(Body::from("{\"members\": ["))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "BAD_REQUEST");
}
