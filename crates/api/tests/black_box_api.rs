use std::sync::Arc;

use empowrhr_api::ApiConfig;
use empowrhr_api::app::{self, AppServices};
use empowrhr_auth::{PasswordPolicy, RegistrationPolicy, Role};
use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(registration: RegistrationPolicy) -> Self {
        let config = ApiConfig {
            password: PasswordPolicy::insecure_fast(),
            registration,
            ..ApiConfig::default()
        };
        let services = Arc::new(AppServices::in_memory(&config).unwrap());

        // Same router as prod, bound to an ephemeral port.
        let app = app::build_app(services, &config).unwrap();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
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

async fn register(client: &reqwest::Client, srv: &TestServer, body: serde_json::Value) -> reqwest::Response {
    client
        .post(srv.url("/api/auth/register"))
        .json(&body)
        .send()
        .await
        .unwrap()
}

async fn login(client: &reqwest::Client, srv: &TestServer, identifier: &str, secret: &str) -> reqwest::Response {
    client
        .post(srv.url("/api/auth/login"))
        .json(&json!({ "identifier": identifier, "secret": secret }))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn root_and_health_respond() {
    let srv = TestServer::spawn(RegistrationPolicy::default()).await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "EMS Backend is running!");

    let res = client.get(srv.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn register_then_login_round_trip() {
    let srv = TestServer::spawn(RegistrationPolicy::default()).await;
    let client = reqwest::Client::new();

    let res = register(&client, &srv, json!({ "identifier": "alice", "secret": "pw123456" })).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "User created");

    let res = login(&client, &srv, "alice", "pw123456").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "identifier": "alice", "role": "employee" }));
}

#[tokio::test]
async fn wrong_secret_and_unknown_identifier_get_the_same_401() {
    let srv = TestServer::spawn(RegistrationPolicy::default()).await;
    let client = reqwest::Client::new();
    register(&client, &srv, json!({ "identifier": "alice", "secret": "pw123456" })).await;

    let wrong = login(&client, &srv, "alice", "wrongpw").await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let wrong: serde_json::Value = wrong.json().await.unwrap();

    let missing = login(&client, &srv, "nobody", "wrongpw").await;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    let missing: serde_json::Value = missing.json().await.unwrap();

    assert_eq!(wrong, missing);
    assert_eq!(wrong["message"], "Invalid credentials");
}

#[tokio::test]
async fn duplicate_registration_conflicts_and_keeps_original_secret() {
    let srv = TestServer::spawn(RegistrationPolicy::default()).await;
    let client = reqwest::Client::new();

    let res = register(&client, &srv, json!({ "identifier": "alice", "secret": "pw123456" })).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = register(&client, &srv, json!({ "identifier": "alice", "secret": "other-secret" })).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["message"].is_string());

    assert_eq!(login(&client, &srv, "alice", "pw123456").await.status(), StatusCode::OK);
    assert_eq!(
        login(&client, &srv, "alice", "other-secret").await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn legacy_username_password_fields_are_accepted() {
    let srv = TestServer::spawn(RegistrationPolicy::default()).await;
    let client = reqwest::Client::new();

    let res = register(&client, &srv, json!({ "username": "bob", "password": "pw123456" })).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .post(srv.url("/api/auth/login"))
        .json(&json!({ "username": "bob", "password": "pw123456" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn fixed_policy_ignores_requested_role() {
    let srv = TestServer::spawn(RegistrationPolicy::Fixed(Role::Employee)).await;
    let client = reqwest::Client::new();

    register(&client, &srv, json!({ "identifier": "eve", "secret": "pw123456", "role": "superadmin" })).await;
    let body: serde_json::Value = login(&client, &srv, "eve", "pw123456").await.json().await.unwrap();
    assert_eq!(body["role"], "employee");
}

#[tokio::test]
async fn fixed_policy_accepts_unrecognised_role() {
    let srv = TestServer::spawn(RegistrationPolicy::Fixed(Role::Employee)).await;
    let client = reqwest::Client::new();

    let res = register(&client, &srv, json!({ "identifier": "carol", "secret": "pw123456", "role": "manager" })).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = login(&client, &srv, "carol", "pw123456").await.json().await.unwrap();
    assert_eq!(body["role"], "employee");
}

#[tokio::test]
async fn request_policy_honours_requested_role() {
    let srv = TestServer::spawn(RegistrationPolicy::FromRequest(Role::Employee)).await;
    let client = reqwest::Client::new();

    register(&client, &srv, json!({ "identifier": "root", "secret": "pw123456", "role": "superadmin" })).await;
    let body: serde_json::Value = login(&client, &srv, "root", "pw123456").await.json().await.unwrap();
    assert_eq!(body["role"], "superadmin");

    let res = register(&client, &srv, json!({ "identifier": "x", "secret": "pw123456", "role": "manager" })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_and_empty_bodies_are_rejected_with_a_message() {
    let srv = TestServer::spawn(RegistrationPolicy::default()).await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/api/auth/login"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["message"].is_string());

    let res = login(&client, &srv, "", "").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = register(&client, &srv, json!({ "identifier": "shorty", "secret": "abc" })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
