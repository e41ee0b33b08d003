use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use tokio::net::TcpListener;

use jyotish_data::birth::{Ayanamsha, BirthInput, BirthPayload, ObservationPoint};
use jyotish_data::charts::{self, CHARTS, ChartSpec};
use jyotish_data::client::http::{HttpConfig, build_client};
use jyotish_data::client::{ChartFetcher, NoProgress};
use jyotish_data::report::{self, Artifacts};

type CallLog = Arc<Mutex<Vec<(String, Instant)>>>;

/// Records every call; `slow` sleeps, `broken` returns text, the rest succeed
async fn mock_chart(
    State(log): State<CallLog>,
    Path(endpoint): Path<String>,
    Json(_payload): Json<Value>,
) -> impl IntoResponse {
    log.lock().unwrap().push((endpoint.clone(), Instant::now()));

    match endpoint.as_str() {
        "slow" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            (StatusCode::OK, "{}").into_response()
        }
        "broken" => (StatusCode::OK, "<html>maintenance</html>").into_response(),
        _ => Json(json!({
            "statusCode": 200,
            "output": [
                {"0": {"name": "Ascendant", "current_sign": 7, "normDegree": 1.0}},
                {"1": {"current_sign": 1, "normDegree": 15.5, "isRetro": "false", "house_number": 7}}
            ]
        }))
        .into_response(),
    }
}

async fn spawn_mock() -> (String, CallLog) {
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new()
        .route("/{*endpoint}", post(mock_chart))
        .with_state(log.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{}/", addr), log)
}

fn test_birth() -> BirthInput {
    BirthInput {
        name: "Test".to_string(),
        year: 2000,
        month: 1,
        date: 1,
        hours: 12,
        minutes: 0,
        seconds: 0,
        latitude: 0.0,
        longitude: 0.0,
        timezone: 5.5,
        observation_point: ObservationPoint::Topocentric,
        ayanamsha: Ayanamsha::Lahiri,
    }
}

fn spec(endpoint: &'static str) -> ChartSpec {
    ChartSpec {
        id: endpoint,
        endpoint,
        default_selected: false,
    }
}

#[tokio::test]
async fn test_single_chart_end_to_end() {
    let (url, _log) = spawn_mock().await;
    let fetcher = ChartFetcher::with_client(reqwest::Client::new(), &url, Duration::ZERO);
    let birth = test_birth();
    let selection = charts::resolve_selection(&["D1"]).unwrap();

    let results = fetcher
        .fetch_all(Some("key"), &BirthPayload::from(&birth), &selection, &NoProgress)
        .await;

    let artifacts = Artifacts::build(&birth, &results).unwrap();
    let temp_dir = TempDir::new().unwrap();
    let (json_path, text_path) = artifacts.write_to(temp_dir.path()).unwrap();

    let raw: Value = serde_json::from_str(&std::fs::read_to_string(json_path).unwrap()).unwrap();
    assert_eq!(raw, serde_json::to_value(&results).unwrap());
    assert_eq!(raw["D1 (Rasi Chart)"]["statusCode"], json!(200));

    let text = std::fs::read_to_string(text_path).unwrap();
    assert!(text.contains("Timezone: UTC+05:30 IST"));
    assert!(text.contains(
        "-- D1 (Rasi Chart) --\nAscendant: Libra 1.00°, Direct\nSun: Aries 15.50°, Direct, House 7"
    ));

    let footer = report::footer_json(&text).unwrap();
    assert_eq!(BirthInput::from_json(footer).unwrap(), birth);
}

#[tokio::test]
async fn test_charts_are_fetched_in_selection_order() {
    let (url, log) = spawn_mock().await;
    let fetcher = ChartFetcher::with_client(reqwest::Client::new(), &url, Duration::ZERO);
    let selection = charts::resolve_selection(&["D10", "D1", "planets/extended"]).unwrap();

    let results = fetcher
        .fetch_all(Some("key"), &BirthPayload::from(&test_birth()), &selection, &NoProgress)
        .await;

    let called: Vec<String> = log.lock().unwrap().iter().map(|(e, _)| e.clone()).collect();
    assert_eq!(called, vec!["d10-chart-info", "planets", "planets/extended"]);

    let ids: Vec<&str> = results.iter().map(|(id, _)| id).collect();
    assert_eq!(
        ids,
        vec!["D10 (Dasamsa Chart)", "D1 (Rasi Chart)", "Planets Extended Info"]
    );
}

#[tokio::test]
async fn test_call_delay_separates_requests() {
    let (url, log) = spawn_mock().await;
    let delay = Duration::from_millis(200);
    let fetcher = ChartFetcher::with_client(reqwest::Client::new(), &url, delay);
    let selection: Vec<&ChartSpec> = CHARTS.iter().take(3).collect();

    let started = Instant::now();
    fetcher
        .fetch_all(Some("key"), &BirthPayload::from(&test_birth()), &selection, &NoProgress)
        .await;
    let elapsed = started.elapsed();

    let calls = log.lock().unwrap().clone();
    assert_eq!(calls.len(), 3);
    for pair in calls.windows(2) {
        assert!(pair[1].1.duration_since(pair[0].1) >= delay);
    }
    // No pause after the last chart
    assert!(elapsed >= delay * 2);
    assert!(elapsed < delay * 3 + Duration::from_secs(1));
}

#[tokio::test]
async fn test_timeout_and_bad_body_are_recorded() {
    let (url, _log) = spawn_mock().await;
    let client = build_client(&HttpConfig::with_timeout(Duration::from_millis(300))).unwrap();
    let fetcher = ChartFetcher::with_client(client, &url, Duration::ZERO);

    let slow = spec("slow");
    let broken = spec("broken");
    let planets = spec("planets");
    let selection = vec![&slow, &broken, &planets];

    let steps = Mutex::new(Vec::new());
    let progress = |done: usize, total: usize| steps.lock().unwrap().push((done, total));
    let results = fetcher
        .fetch_all(Some("key"), &BirthPayload::from(&test_birth()), &selection, &progress)
        .await;

    assert_eq!(
        serde_json::to_value(results.get("slow").unwrap()).unwrap(),
        json!({"statusCode": 408, "error": "Request Timeout"})
    );

    let broken = serde_json::to_value(results.get("broken").unwrap()).unwrap();
    assert_eq!(broken["statusCode"], Value::Null);
    assert!(broken["error"].as_str().unwrap().starts_with("Invalid JSON"));

    // Earlier failures do not stop the batch
    assert!(results.get("planets").unwrap().is_ok());
    assert_eq!(results.failed(), 2);
    assert_eq!(*steps.lock().unwrap(), vec![(1, 3), (2, 3), (3, 3)]);

    let text = report::generate(&test_birth(), &results);
    assert!(text.contains("-- slow --\nERROR: Request Timeout\n"));
}

#[tokio::test]
async fn test_unreachable_host_yields_null_status() {
    let fetcher = ChartFetcher::with_client(
        reqwest::Client::new(),
        "http://127.0.0.1:9/",
        Duration::ZERO,
    );
    let planets = spec("planets");

    let results = fetcher
        .fetch_all(Some("key"), &BirthPayload::from(&test_birth()), &[&planets], &NoProgress)
        .await;

    let record = serde_json::to_value(results.get("planets").unwrap()).unwrap();
    assert_eq!(record["statusCode"], Value::Null);
    assert!(!record["error"].as_str().unwrap().is_empty());
}
