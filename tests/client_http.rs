use madrassa::api::{ApiClient, ApiTransport, ListQuery};
use madrassa::commands::{self, Command, CommandContext};
use madrassa::config::Config;
use madrassa::error::Error;
use madrassa::models::{ClassGroup, Student};
use madrassa::repository::{InMemoryStore, Repository};
use mockito::{Matcher, Server};
use reqwest::Method;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;

#[tokio::test]
async fn test_bearer_token_and_envelope() {
    let mut server = Server::new_async().await;
    let url = format!("{}/api", server.url());

    let mock = server
        .mock("GET", "/api/class-groups")
        .match_query(Matcher::UrlEncoded("academicYear".into(), "2024-2025".into()))
        .match_header("authorization", "Bearer secret-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "classGroups": [
                    { "id": "g1", "name": "Groep 3", "academicYear": "2024-2025" }
                ],
                "totalCount": 1
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = ApiClient::with_base(&url, Some("secret-token".into())).unwrap();
    let repo: Repository<ClassGroup> = Repository::new(Arc::new(client));
    let groups = repo.list_by("academicYear", "2024-2025").await.unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].name, "Groep 3");
    mock.assert();
}

#[tokio::test]
async fn test_status_mapping() {
    let mut server = Server::new_async().await;
    let client = ApiClient::with_base(&server.url(), None).unwrap();

    let missing = server
        .mock("GET", "/students/404")
        .with_status(404)
        .create_async()
        .await;
    let broken = server
        .mock("GET", "/students")
        .with_status(500)
        .with_body("database on fire")
        .create_async()
        .await;

    let repo: Repository<Student> = Repository::new(Arc::new(client));
    assert!(matches!(repo.get("404").await, Err(Error::NotFound(_))));
    assert!(matches!(
        repo.list(&ListQuery::new()).await,
        Err(Error::Api { status: 500 })
    ));

    missing.assert();
    broken.assert();
}

#[tokio::test]
async fn test_empty_body_is_null() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", "/students/s1")
        .with_status(204)
        .create_async()
        .await;

    let client = ApiClient::with_base(&server.url(), None).unwrap();
    let value = client
        .request(Method::DELETE, "/students/s1", None)
        .await
        .unwrap();

    assert_eq!(value, Value::Null);
    mock.assert();
}

#[tokio::test]
async fn test_json_body_is_sent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PATCH", "/students/s1")
        .match_body(Matcher::Json(json!({ "status": "graduated" })))
        .with_status(200)
        .with_body(
            json!({ "id": "s1", "firstName": "Amina", "lastName": "Haddou", "status": "graduated" })
                .to_string(),
        )
        .create_async()
        .await;

    let client = ApiClient::with_base(&server.url(), None).unwrap();
    let repo: Repository<Student> = Repository::new(Arc::new(client));
    let student = repo
        .patch("s1", &json!({ "status": "graduated" }))
        .await
        .unwrap();

    assert_eq!(student.status.as_str(), "graduated");
    mock.assert();
}

#[tokio::test]
async fn test_unreachable_api() {
    // Nothing listens on port 1
    let client = ApiClient::with_base("http://127.0.0.1:1/api", None).unwrap();
    let result = client.request(Method::GET, "/students", None).await;

    match result {
        Err(err) => assert!(err.is_unavailable(), "got {:?}", err),
        Ok(value) => panic!("expected failure, got {}", value),
    }
}

#[tokio::test]
async fn test_ping_command() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/programs")
        .match_query(Matcher::UrlEncoded("limit".into(), "1".into()))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let config = Config::with_api_url(server.url());
    let client = ApiClient::new(&config).unwrap();
    let ctx = CommandContext::new(
        Arc::new(RwLock::new(config)),
        Arc::new(client),
        Arc::new(InMemoryStore::default()),
    )
    .with_json(true);

    let output = commands::run(&ctx, Command::Ping).await.unwrap();
    let pong: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(pong["apiUrl"], server.url());
    mock.assert();
}
