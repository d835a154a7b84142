mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn threads_require_authentication() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/threads"))
        .json(&json!({ "title": "t", "body": "b" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "fail");

    let res = client
        .post(server.url("/threads"))
        .bearer_auth("not-a-token")
        .json(&json!({ "title": "t", "body": "b" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn create_then_read_thread() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let session = common::register_and_login(&client, server).await?;

    let res = client
        .post(server.url("/threads"))
        .bearer_auth(&session.access_token)
        .json(&json!({ "title": "t", "body": "b" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "success");

    let added = &body["data"]["addedThread"];
    assert_eq!(added["title"], "t");
    assert_eq!(added["owner"], session.id.as_str());
    let thread_id = added["id"].as_str().unwrap_or_default();
    assert!(thread_id.starts_with("thread-"));

    let thread = common::get_thread(&client, server, &session, thread_id).await?;
    assert_eq!(thread["id"], thread_id);
    assert_eq!(thread["title"], "t");
    assert_eq!(thread["body"], "b");
    assert_eq!(thread["username"], session.username.as_str());
    assert!(thread["date"].is_string());
    assert_eq!(thread["comments"], json!([]));
    Ok(())
}

#[tokio::test]
async fn create_thread_validates_payload() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let session = common::register_and_login(&client, server).await?;

    let res = client
        .post(server.url("/threads"))
        .bearer_auth(&session.access_token)
        .json(&json!({ "title": "t" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .post(server.url("/threads"))
        .bearer_auth(&session.access_token)
        .json(&json!({ "title": 123, "body": true }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "fail");
    Ok(())
}

#[tokio::test]
async fn unknown_thread_is_not_found() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let session = common::register_and_login(&client, server).await?;

    let res = client
        .get(server.url("/threads/thread-does-not-exist"))
        .bearer_auth(&session.access_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "thread not found");
    Ok(())
}
