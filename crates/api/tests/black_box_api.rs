use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use reqwest::StatusCode;
use saddlebook_core::{Clock, FixedClock};
use saddlebook_infra::{JsonFileLedgerStore, LedgerStore};
use serde_json::json;

struct TestServer {
    base_url: String,
    clock: Arc<FixedClock>,
    data_file: std::path::PathBuf,
    handle: tokio::task::JoinHandle<()>,
    _dir: tempfile::TempDir,
}

impl TestServer {
    async fn spawn() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let data_file = dir.path().join("students.json");
        Self::spawn_with_file(dir, data_file).await
    }

    async fn spawn_with_file(dir: tempfile::TempDir, data_file: std::path::PathBuf) -> Self {
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2025, 10, 1, 9, 0, 0).unwrap()));
        let store: Arc<dyn LedgerStore> = Arc::new(JsonFileLedgerStore::new(&data_file));
        let shared_clock: Arc<dyn Clock> = clock.clone();
        let services = Arc::new(saddlebook_api::app::services::with_parts(store, shared_clock));

        // Same router as prod, bound to an ephemeral port.
        let app = saddlebook_api::app::build_app(services);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            clock,
            data_file,
            handle,
            _dir: dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn student(name: &str, amount: serde_json::Value) -> serde_json::Value {
    json!({
        "ad_soyad": name,
        "veli_telefon": "05551234567",
        "sinif": "5-A",
        "at_bilgisi": "Yildiz",
        "ucret_turu": "aylik",
        "odenen_tutar": amount,
        "ogretmen": "Burak",
        "tarih": "2025-10-04",
        "saat": "10:30"
    })
}

async fn register(client: &reqwest::Client, srv: &TestServer, name: &str, amount: serde_json::Value) {
    let res = client
        .post(srv.url("/api/students/register"))
        .json(&student(name, amount))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
}

async fn list_names(client: &reqwest::Client, srv: &TestServer) -> Vec<String> {
    let body: serde_json::Value = client
        .get(srv.url("/api/students"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    body.as_array()
        .unwrap()
        .iter()
        .map(|r| r["ad_soyad"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn empty_store_lists_nothing() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/api/students")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn register_returns_created_record_with_defaults() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/api/students/register"))
        .json(&student("Elif", json!("12.50")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: serde_json::Value = res.json().await.unwrap();
    let data = &body["data"];
    assert_eq!(data["ad_soyad"], "Elif");
    assert_eq!(data["odenen_tutar"], json!(12.5));
    assert_eq!(data["ders_hakki"], 8);
    assert_eq!(data["odeme_durumu"], "unpaid");
    assert_eq!(data["ders_programi"], "2025-10-04 10:30");
    assert!(data["kayit_zamani"].as_str().unwrap().starts_with("2025-10-01T09:00:00"));

    // Persisted to the file.
    let stored = JsonFileLedgerStore::new(&srv.data_file).load().unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn register_validation_errors_are_400_with_message() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let mut body = student("Elif", json!(10));
    body.as_object_mut().unwrap().remove("saat");
    let res = client
        .post(srv.url("/api/students/register"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let err: serde_json::Value = res.json().await.unwrap();
    assert!(err["error"].as_str().unwrap().contains("saat"));
    assert_eq!(err["code"], "validation_error");

    let res = client
        .post(srv.url("/api/students/register"))
        .json(&student("Elif", json!("abc")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let err: serde_json::Value = res.json().await.unwrap();
    assert!(err["error"].as_str().unwrap().contains("odenen_tutar"));

    let res = client
        .post(srv.url("/api/students/register"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    assert!(list_names(&client, &srv).await.is_empty());
}

#[tokio::test]
async fn get_and_delete_by_index() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    for name in ["a", "b", "c"] {
        register(&client, &srv, name, json!(10)).await;
    }

    let res = client.get(srv.url("/api/students/1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["ad_soyad"], "b");

    let res = client.delete(srv.url("/api/students/0")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["deleted_student"]["ad_soyad"], "a");

    assert_eq!(list_names(&client, &srv).await, ["b", "c"]);
}

#[tokio::test]
async fn out_of_range_indices_are_404_and_change_nothing() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    for name in ["a", "b", "c"] {
        register(&client, &srv, name, json!(10)).await;
    }
    let before = std::fs::read(&srv.data_file).unwrap();

    for path in ["/api/students/3", "/api/students/-1", "/api/students/abc"] {
        let res = client.get(srv.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "GET {path}");
        let err: serde_json::Value = res.json().await.unwrap();
        assert_eq!(err["code"], "not_found");

        let res = client.delete(srv.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "DELETE {path}");
    }

    for path in ["/api/students/7/decrease-credit", "/api/students/7/mark-paid"] {
        let res = client.post(srv.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "POST {path}");
    }

    assert_eq!(std::fs::read(&srv.data_file).unwrap(), before);
}

#[tokio::test]
async fn decrease_credit_until_guard() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    register(&client, &srv, "a", json!(10)).await;

    for expected in (0..8).rev() {
        let res = client
            .post(srv.url("/api/students/0/decrease-credit"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["ders_hakki"], expected);
    }

    let res = client
        .post(srv.url("/api/students/0/decrease-credit"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let err: serde_json::Value = res.json().await.unwrap();
    assert_eq!(err["code"], "guard_rejected");
    assert_eq!(err["error"], "no lesson credits remaining");
}

#[tokio::test]
async fn mark_paid_is_idempotent_and_moves_cash_totals() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    register(&client, &srv, "paid", json!(100)).await;
    register(&client, &srv, "pending", json!("50")).await;

    for _ in 0..2 {
        let res = client
            .post(srv.url("/api/students/0/mark-paid"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["data"]["odeme_durumu"], "paid");
    }

    let res = client.get(srv.url("/api/cashier/total")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["paid_total"], json!(100.0));
    assert_eq!(body["pending_total"], json!(50.0));
    assert_eq!(body["grand_total"], json!(150.0));
    assert_eq!(body["total_amount"], json!(150.0));
    assert_eq!(body["record_count"], 2);
}

#[tokio::test]
async fn lapsed_credits_are_reset_on_read_and_persisted() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    register(&client, &srv, "a", json!(10)).await;
    for _ in 0..3 {
        client
            .post(srv.url("/api/students/0/decrease-credit"))
            .send()
            .await
            .unwrap();
    }

    srv.clock.advance(Duration::days(31));

    let body: serde_json::Value = client
        .get(srv.url("/api/students"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body[0]["ders_hakki"], 0);

    let stored = JsonFileLedgerStore::new(&srv.data_file).load().unwrap();
    assert_eq!(stored.records()[0].lesson_credits(), 0);
}

#[tokio::test]
async fn corrupt_store_serves_an_empty_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("students.json");
    std::fs::write(&data_file, "[{ broken").unwrap();
    let srv = TestServer::spawn_with_file(dir, data_file).await;
    let client = reqwest::Client::new();

    assert!(list_names(&client, &srv).await.is_empty());

    let body: serde_json::Value = client
        .get(srv.url("/api/cashier/total"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["record_count"], 0);
}
