#![allow(dead_code)]

use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use forum_api::config::AppConfig;
use forum_api::middleware::RateLimiter;
use forum_api::server::AppState;
use forum_api::testing::TestApp;
use reqwest::StatusCode;
use serde_json::{json, Value};

static SERVER: OnceLock<TestApp> = OnceLock::new();

fn free_port() -> Result<u16> {
    portpicker::pick_unused_port().context("failed to pick free port")
}

/// Spawns a dedicated memory-backed server guarded by `limiter` and waits
/// until it answers.
pub async fn spawn_limited_server(limiter: RateLimiter) -> Result<TestApp> {
    let (state, store) = AppState::in_memory(&AppConfig::test());
    let state = state.with_rate_limiter(Arc::new(limiter));

    let server = TestApp::spawn_with_state(state, store, free_port()?)?;
    wait_ready(&server, Duration::from_secs(10)).await?;
    Ok(server)
}

async fn wait_ready(server: &TestApp, timeout: Duration) -> Result<()> {
    let client = reqwest::Client::new();
    let deadline = Instant::now() + timeout;
    loop {
        if Instant::now() > deadline {
            break;
        }
        if let Ok(resp) = client.get(server.url("/health")).send().await {
            if resp.status() == StatusCode::OK {
                return Ok(());
            }
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    anyhow::bail!("server did not become ready on {} within {:?}", server.base_url, timeout)
}

/// Shared server with rate limiting disabled.
pub async fn ensure_server() -> Result<&'static TestApp> {
    let server = SERVER.get_or_init(|| {
        let port = free_port().expect("failed to pick free port");
        TestApp::spawn(AppConfig::test(), port).expect("failed to spawn test server")
    });
    wait_ready(server, Duration::from_secs(10)).await?;
    Ok(server)
}

pub fn unique_username() -> String {
    format!("user_{}", uuid::Uuid::new_v4().simple())
}

/// Authenticated test user.
pub struct Session {
    pub id: String,
    pub username: String,
    pub access_token: String,
    pub refresh_token: String,
}

pub async fn register_and_login(client: &reqwest::Client, server: &TestApp) -> Result<Session> {
    let username = unique_username();

    let res = client
        .post(server.url("/users"))
        .json(&json!({ "username": username, "password": "secret", "fullname": "Forum Tester" }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "register failed: {}", res.status());
    let body: Value = res.json().await?;
    let id = body["data"]["addedUser"]["id"].as_str().context("missing user id")?.to_string();

    let res = client
        .post(server.url("/authentications"))
        .json(&json!({ "username": username, "password": "secret" }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "login failed: {}", res.status());
    let body: Value = res.json().await?;

    Ok(Session {
        id,
        username,
        access_token: body["data"]["accessToken"].as_str().context("missing access token")?.to_string(),
        refresh_token: body["data"]["refreshToken"].as_str().context("missing refresh token")?.to_string(),
    })
}

pub async fn create_thread(client: &reqwest::Client, server: &TestApp, session: &Session) -> Result<String> {
    let res = client
        .post(server.url("/threads"))
        .bearer_auth(&session.access_token)
        .json(&json!({ "title": "sebuah thread", "body": "sebuah body thread" }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "create thread failed: {}", res.status());
    let body: Value = res.json().await?;
    Ok(body["data"]["addedThread"]["id"].as_str().context("missing thread id")?.to_string())
}

pub async fn create_comment(
    client: &reqwest::Client,
    server: &TestApp,
    session: &Session,
    thread_id: &str,
    content: &str,
) -> Result<String> {
    let res = client
        .post(server.url(&format!("/threads/{}/comments", thread_id)))
        .bearer_auth(&session.access_token)
        .json(&json!({ "content": content }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "create comment failed: {}", res.status());
    let body: Value = res.json().await?;
    Ok(body["data"]["addedComment"]["id"].as_str().context("missing comment id")?.to_string())
}

pub async fn get_thread(
    client: &reqwest::Client,
    server: &TestApp,
    session: &Session,
    thread_id: &str,
) -> Result<Value> {
    let res = client
        .get(server.url(&format!("/threads/{}", thread_id)))
        .bearer_auth(&session.access_token)
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "get thread failed: {}", res.status());
    let body: Value = res.json().await?;
    Ok(body["data"]["thread"].clone())
}
