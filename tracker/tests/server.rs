use std::path::Path;

use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use rule_tracker::{
    app_state::AppState,
    config::{Config, database_config::DatabaseConfig, registry_config::RegistryConfig},
    server::create_router,
};
use serde_json::{Value, json};
use tempfile::TempDir;

const BASELINE_TEXT: &str = "(a) Members shall maintain margin.\n(b) Reports are due monthly.";
const AMENDED_TEXT: &str = "(a) Members must maintain margin.\n(b) Reports are due monthly.";
const RECORDS_TEXT: &str = "(a) Members shall preserve books and records for six years.";

#[derive(Debug)]
struct TestServer {
    directory: TempDir,
    base_url: String,
    client: reqwest::Client,
}

impl TestServer {
    async fn start() -> Self {
        let directory = tempfile::tempdir().unwrap();
        let registry_path = directory.path().join("tracked_rules.json");
        let margin_path = directory.path().join("4210.txt");
        let records_path = directory.path().join("3110.txt");
        std::fs::write(&margin_path, BASELINE_TEXT).unwrap();
        std::fs::write(&records_path, RECORDS_TEXT).unwrap();
        std::fs::write(
            &registry_path,
            json!([
                {
                    "id": "4210",
                    "name": "Margin Requirements",
                    "url": format!("file://{}", margin_path.display()),
                },
                {
                    "id": "3110",
                    "name": "Books and Records",
                    "url": format!("file://{}", records_path.display()),
                },
            ])
            .to_string(),
        )
        .unwrap();

        let config = Config {
            database: DatabaseConfig::for_path(&directory.path().join("regulations.db")),
            registry: RegistryConfig {
                path: registry_path,
            },
            ..Config::default()
        };
        let state = AppState::from_config(config).await.unwrap();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, create_router(state)).await.unwrap();
        });

        Self {
            directory,
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn directory(&self) -> &Path { self.directory.path() }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let response = self
            .client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .unwrap();
        (response.status(), response.json().await.unwrap())
    }

    async fn audit(&self, rule_id: &str) -> Value {
        self.client
            .post(format!("{}/rules/{rule_id}/audit", self.base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn test_rules_and_ping() {
    let server = TestServer::start().await;

    let (status, body) = server.get("/ping").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["serverVersion"].is_string());

    let (status, body) = server.get("/rules").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], "4210");
    assert_eq!(body[0]["name"], "Margin Requirements");
}

#[tokio::test]
async fn test_audit_history_and_redline() {
    let server = TestServer::start().await;

    assert_eq!(server.audit("4210").await["outcome"], "baselineEstablished");
    assert_eq!(server.audit("4210").await["outcome"], "noChange");

    std::fs::write(server.directory().join("4210.txt"), AMENDED_TEXT).unwrap();
    let outcome = server.audit("4210").await;
    assert_eq!(outcome["outcome"], "changeLogged");
    assert_eq!(outcome["version"]["label"], "Change Detected");

    let (status, history) = server.get("/rules/4210/versions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history["summary"]["versionCount"], 2);
    assert_eq!(history["versions"][0]["label"], "Change Detected");

    let latest_id = history["versions"][0]["id"].as_i64().unwrap();
    let (status, version) = server.get(&format!("/versions/{latest_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(version["text"], AMENDED_TEXT);

    let (status, redline) = server.get("/rules/4210/redline?full=true").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(redline["identical"], false);
    assert_eq!(redline["stats"], json!({"added": 1, "deleted": 1, "unchanged": 1}));
    assert_eq!(redline["rows"].as_array().unwrap().len(), 2);
    assert_eq!(redline["rows"][0]["left"]["status"], "deleted");
    assert_eq!(redline["rows"][0]["right"]["text"], "(a) Members must maintain margin.");
    assert_eq!(redline["error"], Value::Null);
}

#[tokio::test]
async fn test_errors() {
    let server = TestServer::start().await;

    let (status, body) = server.get("/versions/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("Version `42` not found"));

    let (status, redline) = server.get("/rules/4210/redline").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(redline["rows"], json!([]));
    assert!(redline["error"]["message"].is_string());

    let (status, _) = server.get("/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let response = server
        .client
        .post(format!("{}/rules/9999/audit", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_redline_only_compares_versions_of_the_rule() {
    let server = TestServer::start().await;
    let margin = server.audit("4210").await["version"]["id"].as_i64().unwrap();
    let records = server.audit("3110").await["version"]["id"].as_i64().unwrap();

    let (status, redline) = server
        .get(&format!("/rules/4210/redline?from={margin}&to={records}"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(redline["rows"], json!([]));
    assert_eq!(redline["to"], Value::Null);
    assert!(
        redline["error"]["message"]
            .as_str()
            .unwrap()
            .contains(&format!("Version `{records}` does not belong to rule `4210`"))
    );

    let (_, redline) = server
        .get(&format!("/rules/3110/redline?from={records}&to={records}"))
        .await;
    assert_eq!(redline["error"], Value::Null);
    assert_eq!(redline["identical"], true);
    assert_eq!(redline["from"]["documentId"], "3110");

    let (_, redline) = server
        .get(&format!("/rules/2010/redline?from={margin}&to={margin}"))
        .await;
    assert!(redline["error"]["message"].is_string());
}
