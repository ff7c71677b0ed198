use super::*;
use std::sync::Arc;

use axum::{http::StatusCode, routing::get, routing::post, Json, Router};
use serde_json::json;
use shared::domain::FormInput;
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

#[derive(Clone)]
struct CaptureState {
    tx: Arc<Mutex<Option<oneshot::Sender<Value>>>>,
    reply: Value,
}

async fn handle_predict(
    axum::extract::State(state): axum::extract::State<CaptureState>,
    Json(payload): Json<Value>,
) -> Json<Value> {
    if let Some(tx) = state.tx.lock().await.take() {
        let _ = tx.send(payload);
    }
    Json(state.reply)
}

async fn spawn_router(app: Router) -> anyhow::Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

async fn spawn_prediction_server(reply: Value) -> anyhow::Result<(String, oneshot::Receiver<Value>)> {
    let (tx, rx) = oneshot::channel();
    let state = CaptureState {
        tx: Arc::new(Mutex::new(Some(tx))),
        reply,
    };
    let app = Router::new()
        .route("/predict", post(handle_predict))
        .with_state(state);
    Ok((spawn_router(app).await?, rx))
}

fn wheat_in_punjab() -> PredictRequest {
    PredictRequest::from_input(&FormInput {
        state: "Punjab".into(),
        season: "Rabi".into(),
        crop_type: "Wheat".into(),
        rainfall: "650".into(),
        avg_temp: "21.5".into(),
        pesticide_usage: "1.2".into(),
        fertilizer: "120".into(),
        area: "3".into(),
    })
}

#[test]
fn endpoint_keeps_base_path_prefix() {
    let client = HttpPredictionClient::new("http://localhost:8000").expect("client");
    assert_eq!(client.endpoint("predict").as_str(), "http://localhost:8000/predict");

    let client = HttpPredictionClient::new("https://farm.example/api/").expect("client");
    assert_eq!(client.endpoint("predict").as_str(), "https://farm.example/api/predict");
    assert_eq!(client.endpoint("").as_str(), "https://farm.example/api/");
}

#[test]
fn rejects_non_http_base_urls() {
    assert!(matches!(
        HttpPredictionClient::new("localhost:8000"),
        Err(PredictionError::InvalidEndpoint(_))
    ));
    assert!(matches!(
        HttpPredictionClient::new("not a url"),
        Err(PredictionError::InvalidEndpoint(_))
    ));
}

#[tokio::test]
async fn posts_full_form_payload_as_json() {
    let (server_url, payload_rx) = spawn_prediction_server(json!({
        "predicted_yield": 4523.7,
        "recommendations": ["Increase irrigation"],
    }))
    .await
    .expect("spawn server");
    let client = HttpPredictionClient::new(&server_url).expect("client");

    let body = client.predict(&wheat_in_punjab()).await.expect("predict");
    assert_eq!(body["predicted_yield"], json!(4523.7));

    let payload = payload_rx.await.expect("payload");
    assert_eq!(
        payload,
        json!({
            "state": "Punjab",
            "season": "Rabi",
            "crop_type": "Wheat",
            "rainfall": 650.0,
            "avg_temp": 21.5,
            "pesticide_usage": 1.2,
            "fertilizer": 120.0,
            "area": 3.0,
        })
    );
}

#[tokio::test]
async fn non_success_status_is_a_transport_failure() {
    let app = Router::new().route(
        "/predict",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": "Prediction failed: model missing" })),
            )
        }),
    );
    let server_url = spawn_router(app).await.expect("spawn server");
    let client = HttpPredictionClient::new(&server_url).expect("client");

    let err = client.predict(&wheat_in_punjab()).await.expect_err("status");
    assert_eq!(err, PredictionError::Status { status: 500 });
    assert_eq!(err.to_string(), "Request failed with status code 500");
}

#[tokio::test]
async fn non_json_body_is_a_decode_failure() {
    let app = Router::new().route("/predict", post(|| async { "definitely not json" }));
    let server_url = spawn_router(app).await.expect("spawn server");
    let client = HttpPredictionClient::new(&server_url).expect("client");

    let err = client.predict(&wheat_in_punjab()).await.expect_err("decode");
    assert!(matches!(err, PredictionError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn unreachable_service_is_a_network_failure() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = HttpPredictionClient::new(&format!("http://{addr}")).expect("client");
    let err = client.predict(&wheat_in_punjab()).await.expect_err("network");
    assert!(matches!(err, PredictionError::Network(_)), "{err:?}");
}

#[tokio::test]
async fn reads_service_banner_from_root() {
    let app = Router::new().route(
        "/",
        get(|| async { Json(json!({ "message": "FastAPI is live. Use POST /predict to get yield." })) }),
    );
    let server_url = spawn_router(app).await.expect("spawn server");
    let client = HttpPredictionClient::new(&server_url).expect("client");

    let banner = client.service_banner().await.expect("banner");
    assert_eq!(banner.message, "FastAPI is live. Use POST /predict to get yield.");
}

#[tokio::test]
async fn http_client_drives_a_full_submission() {
    let (server_url, _payload_rx) = spawn_prediction_server(json!({
        "predicted_yield": 4523.7,
        "recommendations": ["Increase irrigation", "Use balanced NPK fertilizer"],
    }))
    .await
    .expect("spawn server");
    let controller = SubmissionController::new(
        HttpPredictionClient::new(&server_url).expect("client"),
        TracingNotifier,
    );

    let mut store = FormStore::new();
    for (field, value) in shared::domain::FormField::ALL
        .into_iter()
        .zip(["Kerala", "Kharif", "Rice", "2800", "27", "0.8", "90", "12"])
    {
        store.set_field(field, value);
    }

    let outcome = controller.submit(&mut store).await.expect("accepted");
    assert!(outcome.is_success());
    let view = ResultView::from_result(store.result());
    assert_eq!(view.yield_text.as_deref(), Some("4523.70 kg/ha"));
    assert_eq!(
        view.recommendations,
        Some(vec![
            "Increase irrigation".to_string(),
            "Use balanced NPK fertilizer".to_string()
        ])
    );
}
