use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::Request;
use clinicmap_core::{Branch, Clinic};
use tower::ServiceExt;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn branch(name: &str, street: &str, locality: &str) -> Branch {
    Branch {
        name: name.to_string(),
        street: Some(street.to_string()),
        locality: locality.to_string(),
        phone: None,
    }
}

fn sample_clinics() -> Vec<Clinic> {
    vec![
        Clinic::new(
            1,
            "Alpha Fertility",
            vec![
                branch("Downtown", "100 Congress Ave", "Austin, TX 78701"),
                branch("Uptown", "200 Elm St", "Dallas, TX 75201"),
            ],
        ),
        Clinic::new(
            2,
            "Beta Clinic",
            vec![branch("Main", "1 Virginia St", "Reno, NV 89501")],
        ),
        Clinic::new(
            3,
            "Gamma Reproductive",
            vec![branch("Main", "5 Broadway", "New York, NY 10004")],
        ),
    ]
}

fn app_with(resolver: GeocodeResolver<MapboxClient>) -> Router {
    build_app(AppState {
        clinics: Arc::new(sample_clinics()),
        resolver: Arc::new(resolver),
        page_size: 12,
    })
}

fn app() -> Router {
    app_with(GeocodeResolver::disabled())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json = serde_json::from_slice(&body).expect("json parse");
    (status, json)
}

fn names(json: &serde_json::Value) -> Vec<String> {
    json["data"]["items"]
        .as_array()
        .expect("items array")
        .iter()
        .map(|c| c["name"].as_str().expect("name").to_string())
        .collect()
}

#[test]
fn api_error_validation_error_maps_to_bad_request() {
    let response = ApiError::new("req-1", "validation_error", "invalid input").into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn api_error_unknown_code_maps_to_500() {
    let response = ApiError::new("req-1", "internal_error", "boom").into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn health_reports_counts_and_geocoder_state() {
    let (status, json) = get_json(app(), "/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["clinics"], 3);
    assert_eq!(json["data"]["geocoder"], "disabled");
    assert!(json["meta"]["request_id"].is_string());
}

#[tokio::test]
async fn list_filters_by_text() {
    let (status, json) = get_json(app(), "/api/v1/clinics?q=tx").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&json), ["Alpha Fertility"]);
    assert_eq!(json["data"]["items"][0]["regions"], serde_json::json!(["TX"]));
}

#[tokio::test]
async fn list_filters_by_region_code_or_slug() {
    let (_, by_code) = get_json(app(), "/api/v1/clinics?region=NV").await;
    assert_eq!(names(&by_code), ["Beta Clinic"]);

    let (_, by_slug) = get_json(app(), "/api/v1/clinics?region=new-york").await;
    assert_eq!(names(&by_slug), ["Gamma Reproductive"]);
}

#[tokio::test]
async fn list_sorts_and_paginates() {
    let (_, json) =
        get_json(app(), "/api/v1/clinics?sort=branchCount&per_page=1&page=1").await;
    assert_eq!(names(&json), ["Alpha Fertility"]);
    assert_eq!(json["data"]["total_items"], 3);
    assert_eq!(json["data"]["total_pages"], 3);

    let (_, page_two) = get_json(app(), "/api/v1/clinics?per_page=2&page=2").await;
    assert_eq!(names(&page_two), ["Gamma Reproductive"]);
}

#[tokio::test]
async fn unknown_sort_is_validation_error() {
    let (status, json) = get_json(app(), "/api/v1/clinics?sort=rating").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn regions_lists_facets() {
    let (status, json) = get_json(app(), "/api/v1/regions").await;
    assert_eq!(status, StatusCode::OK);
    let codes: Vec<&str> = json["data"]
        .as_array()
        .expect("array")
        .iter()
        .map(|f| f["code"].as_str().expect("code"))
        .collect();
    assert_eq!(codes, ["NV", "NY", "TX"]);
}

#[tokio::test]
async fn detail_resolves_exact_and_partial_slugs() {
    let (status, json) = get_json(app(), "/api/v1/clinics/alpha-fertility").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["name"], "Alpha Fertility");
    assert_eq!(json["data"]["match_score"], 100.0);

    let (_, partial) = get_json(app(), "/api/v1/clinics/beta").await;
    assert_eq!(partial["data"]["slug"], "beta-clinic");
    assert_eq!(partial["data"]["match_score"], 90.0);
}

#[tokio::test]
async fn detail_slugifies_display_names() {
    let (status, json) = get_json(app(), "/api/v1/clinics/Alpha%20Fertility").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["slug"], "alpha-fertility");
    assert_eq!(json["data"]["match_score"], 100.0);
}

#[tokio::test]
async fn detail_with_blank_slug_is_not_found() {
    let (status, _) = get_json(app(), "/api/v1/clinics/---").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get_json(app(), "/api/v1/clinics/---/map").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn detail_without_match_is_not_found() {
    let (status, json) = get_json(app(), "/api/v1/clinics/omega-center").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn map_without_credential_returns_location_list() {
    let (status, json) = get_json(app(), "/api/v1/clinics/alpha-fertility/map").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["geocoder"], "disabled");
    assert_eq!(json["data"]["render"]["mode"], "location_list");
    assert_eq!(json["data"]["render"]["reason"], "no_resolved_locations");
    assert_eq!(
        json["data"]["render"]["locations"]
            .as_array()
            .expect("locations")
            .len(),
        2
    );
    // default country-wide view
    assert_eq!(json["data"]["commands"][0]["op"], "set_view");
}

#[tokio::test]
async fn map_with_geocoder_returns_bounds_and_markers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"/100%20Congress[^/]*\.json$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "features": [{ "center": [-97.7431, 30.2672] }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"/200%20Elm[^/]*\.json$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "features": [{ "center": [-96.7970, 32.7767] }]
        })))
        .mount(&server)
        .await;

    let client =
        MapboxClient::with_base_url("pk.test", "us", 5, &server.uri()).expect("client");
    let (status, json) = get_json(
        app_with(GeocodeResolver::new(client)),
        "/api/v1/clinics/alpha-fertility/map",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["geocoder"], "enabled");
    let render = &json["data"]["render"];
    assert_eq!(render["mode"], "map");
    assert_eq!(render["viewport"]["kind"], "bounds");
    assert_eq!(render["markers"].as_array().expect("markers").len(), 2);

    let ops: Vec<&str> = json["data"]["commands"]
        .as_array()
        .expect("commands")
        .iter()
        .map(|c| c["op"].as_str().expect("op"))
        .collect();
    assert_eq!(ops, ["add_marker", "add_marker", "fit_bounds"]);
}

#[tokio::test]
async fn map_for_unknown_clinic_is_not_found() {
    let (status, _) = get_json(app(), "/api/v1/clinics/zzz/map").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
