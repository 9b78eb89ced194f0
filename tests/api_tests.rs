use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use cvd_risk_calculator::{handlers::create_router, services::RiskCalculator, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    create_router(AppState::new(RiskCalculator::with_defaults().unwrap()))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn calculate_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/risk/calculate")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn reference_profile() -> Value {
    json!({
        "age": 60,
        "sex": "Male",
        "systolic_bp": 145.0,
        "total_cholesterol": 5.0,
        "hdl_cholesterol": 1.0,
        "smoker": false,
        "diabetes": false,
        "egfr": 80.0,
        "crp": 2.0,
        "vascular_disease_count": 0,
        "baseline_ldl": 3.5,
        "hba1c": 7.0
    })
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model"], "smart");
}

#[tokio::test]
async fn test_calculate_endpoint() {
    let response = app()
        .oneshot(calculate_request(json!({
            "profile": reference_profile(),
            "therapies": {
                "pre_existing": ["Atorvastatin 20 mg"],
                "add_on": ["Ezetimibe"]
            },
            "interventions": ["Mediterranean diet", "Physical activity"],
            "sbp_target": 125.0,
            "horizon": "10yr"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["calculation_id"].is_string());
    assert!(body["calculated_at"].is_string());
    let outcome = &body["result"]["outcome"];
    assert_eq!(outcome["status"], "estimated");
    assert_eq!(outcome["baseline_risk"], 23.9);
    assert_eq!(outcome["post_intervention_risk"], 10.3);
    assert_eq!(outcome["absolute_risk_reduction"], 13.6);
    assert_eq!(outcome["relative_risk_reduction"], 56.9);
    assert_eq!(body["result"]["projected_ldl"], 1.89);
    assert_eq!(body["patient_summary"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_calculate_rejects_out_of_range_input() {
    let mut profile = reference_profile();
    profile["age"] = json!(25);

    let response = app()
        .oneshot(calculate_request(json!({
            "profile": profile,
            "interventions": ["Yoga"],
            "sbp_target": 120.0
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["status"], 400);
    let violations = body["violations"].as_array().unwrap();
    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0]["kind"], "out_of_range");
    assert_eq!(violations[0]["field"], "age");
    assert_eq!(violations[1]["kind"], "unknown_intervention");
}

#[tokio::test]
async fn test_calculate_rejects_malformed_body() {
    let response = app()
        .oneshot(calculate_request(json!({ "sbp_target": 120.0 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_lifetime_not_applicable_is_not_an_error() {
    let mut profile = reference_profile();
    profile["age"] = json!(87);

    let response = app()
        .oneshot(calculate_request(json!({
            "profile": profile,
            "sbp_target": 130.0,
            "horizon": "lifetime"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["result"]["outcome"]["status"], "not_applicable");
}

#[tokio::test]
async fn test_reference_tables() {
    let response = app()
        .oneshot(Request::builder().uri("/api/v1/reference/therapies").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let therapies = body_json(response).await;
    assert_eq!(therapies.as_array().unwrap().len(), 8);
    assert_eq!(therapies[0]["name"], "Atorvastatin 20 mg");

    let response = app()
        .oneshot(Request::builder().uri("/api/v1/reference/interventions").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let interventions = body_json(response).await;
    assert_eq!(interventions.as_array().unwrap().len(), 11);

    let response = app()
        .oneshot(Request::builder().uri("/api/v1/reference/model").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let model = body_json(response).await;
    assert_eq!(model["model"], "smart");
    assert_eq!(model["covariates"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_citation_lookup() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/reference/citations/Ezetimibe")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let citation = body_json(response).await;
    assert_eq!(citation["trial"], "IMPROVE-IT");

    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/reference/citations/Niacin")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["status"], 404);
}
