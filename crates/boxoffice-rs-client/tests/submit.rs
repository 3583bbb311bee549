use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use boxoffice_rs_client::{PredictionClient, Predictor, SubmissionError};
use boxoffice_rs_model::{
    ContentRating, Country, Genre, InputFields, Language, PredictedFields,
};
use chrono::NaiveDate;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Arc;

/// Canned reply plus every JSON payload the stub service received.
#[derive(Clone)]
struct StubService {
    status: StatusCode,
    body: String,
    payloads: Arc<Mutex<Vec<Value>>>,
}

async fn handle_submit(State(service): State<StubService>, body: String) -> (StatusCode, String) {
    let payload = serde_json::from_str(&body).unwrap_or(Value::Null);
    service.payloads.lock().push(payload);
    (service.status, service.body.clone())
}

/// Start a stub prediction service and return its submit URL.
async fn spawn_service(status: StatusCode, body: impl Into<String>) -> (String, StubService) {
    let service = StubService {
        status,
        body: body.into(),
        payloads: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .route("/api/submit", post(handle_submit))
        .with_state(service.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    (format!("http://{addr}/api/submit"), service)
}

fn scenario_input() -> InputFields {
    InputFields {
        title: "X".to_string(),
        description: String::new(),
        filming_location: String::new(),
        duration: 120,
        content_rating: ContentRating::Pg13,
        release_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("date"),
        genres: vec![Genre::Drama],
        languages: vec![Language::English],
        countries: vec![Country::UnitedStates],
        budget: 1_000_000,
        stars: vec!["A".to_string()],
        writers: vec!["B".to_string()],
        director: "Y".to_string(),
        production_companies: vec!["C".to_string()],
    }
}

#[tokio::test]
async fn submit_posts_input_and_parses_prediction() {
    let (url, service) = spawn_service(
        StatusCode::OK,
        json!({"received": {
            "predicted_grossWorldwide": 1000,
            "predicted_openingWeekendGross": 200,
            "predicted_wins": 1,
            "predicted_nominations": 2,
            "predicted_IMDB_Rating": 7.5
        }})
        .to_string(),
    )
    .await;
    let client = PredictionClient::new(url);

    let predicted = client.submit(&scenario_input()).await.expect("submit");

    assert_eq!(
        predicted,
        PredictedFields {
            opening_weekend_gross: 200.0,
            gross_worldwide: 1000.0,
            awards: 1,
            nominations: 2,
            rating: 7.5,
            critic_score: 0.0,
        }
    );
    let payloads = service.payloads.lock();
    assert_eq!(payloads.len(), 1);
    let payload = &payloads[0];
    assert_eq!(payload["mpaRating"], json!("PG-13"));
    assert_eq!(payload["releaseDate"], json!("2024-01-01"));
    assert_eq!(payload["productionCompanies"], json!(["C"]));
    assert_eq!(payload["filming_location"], json!(""));
    assert_eq!(payload["countries"], json!(["United States"]));
}

#[tokio::test]
async fn predictor_trait_delegates_to_submit() {
    let (url, service) = spawn_service(StatusCode::OK, r#"{"received":{}}"#).await;
    let predictor: Box<dyn Predictor> = Box::new(PredictionClient::new(url));

    let predicted = predictor.predict(&scenario_input()).await.expect("predict");

    assert_eq!(predicted, PredictedFields::default());
    assert_eq!(service.payloads.lock().len(), 1);
}

#[tokio::test]
async fn server_error_maps_to_status_error() {
    let (url, service) =
        spawn_service(StatusCode::INTERNAL_SERVER_ERROR, "model not loaded").await;
    let client = PredictionClient::new(url);

    let err = client.submit(&scenario_input()).await.unwrap_err();

    assert_eq!(
        err,
        SubmissionError::Status {
            status: 500,
            body: "model not loaded".to_string(),
        }
    );
    // No retry on failure.
    assert_eq!(service.payloads.lock().len(), 1);
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let (url, _service) = spawn_service(StatusCode::OK, "ok").await;
    let err = PredictionClient::new(url)
        .submit(&scenario_input())
        .await
        .unwrap_err();
    assert!(matches!(err, SubmissionError::MalformedResponse(_)));
}

#[tokio::test]
async fn body_without_received_is_malformed() {
    let (url, _service) =
        spawn_service(StatusCode::OK, r#"{"predicted_wins": 3}"#).await;
    let err = PredictionClient::new(url)
        .submit(&scenario_input())
        .await
        .unwrap_err();
    assert!(matches!(err, SubmissionError::MalformedResponse(_)));
    assert!(err.to_string().contains("received"));
}

#[tokio::test]
async fn unreachable_service_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = PredictionClient::new(format!("http://{addr}/api/submit"))
        .submit(&scenario_input())
        .await
        .unwrap_err();
    assert!(matches!(err, SubmissionError::Transport(_)));
}
