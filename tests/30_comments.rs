mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn comment_on_missing_thread_is_not_found() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let session = common::register_and_login(&client, server).await?;

    let res = client
        .post(server.url("/threads/thread-missing/comments"))
        .bearer_auth(&session.access_token)
        .json(&json!({ "content": "hi" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn add_comment_returns_summary() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let session = common::register_and_login(&client, server).await?;
    let thread_id = common::create_thread(&client, server, &session).await?;

    let res = client
        .post(server.url(&format!("/threads/{}/comments", thread_id)))
        .bearer_auth(&session.access_token)
        .json(&json!({ "content": "sebuah comment" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await?;
    let added = &body["data"]["addedComment"];
    assert!(added["id"].as_str().unwrap_or_default().starts_with("comment-"));
    assert_eq!(added["content"], "sebuah comment");
    assert_eq!(added["owner"], session.id.as_str());

    let res = client
        .post(server.url(&format!("/threads/{}/comments", thread_id)))
        .bearer_auth(&session.access_token)
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn only_owner_deletes_and_detail_masks_content() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let owner = common::register_and_login(&client, server).await?;
    let other = common::register_and_login(&client, server).await?;
    let thread_id = common::create_thread(&client, server, &owner).await?;
    let comment_id = common::create_comment(&client, server, &owner, &thread_id, "komentar asli").await?;
    let url = server.url(&format!("/threads/{}/comments/{}", thread_id, comment_id));

    let res = client.delete(&url).bearer_auth(&other.access_token).send().await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let thread = common::get_thread(&client, server, &owner, &thread_id).await?;
    assert_eq!(thread["comments"][0]["content"], "komentar asli");

    let res = client.delete(&url).bearer_auth(&owner.access_token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body, json!({ "status": "success" }));

    let thread = common::get_thread(&client, server, &owner, &thread_id).await?;
    assert_eq!(thread["comments"][0]["content"], "**komentar telah dihapus**");
    assert_eq!(thread["comments"][0]["username"], owner.username.as_str());

    // Stored content is untouched
    let stored = server.store.comment(&comment_id).await;
    assert_eq!(stored.map(|c| c.content).as_deref(), Some("komentar asli"));

    let res = client.delete(&url).bearer_auth(&owner.access_token).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn like_toggles_on_and_off() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let owner = common::register_and_login(&client, server).await?;
    let liker = common::register_and_login(&client, server).await?;
    let thread_id = common::create_thread(&client, server, &owner).await?;
    let comment_id = common::create_comment(&client, server, &owner, &thread_id, "like me").await?;
    let url = server.url(&format!("/threads/{}/comments/{}/likes", thread_id, comment_id));

    let res = client.put(&url).bearer_auth(&liker.access_token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let thread = common::get_thread(&client, server, &owner, &thread_id).await?;
    assert_eq!(thread["comments"][0]["likeCount"], 1);

    let res = client.put(&url).bearer_auth(&liker.access_token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let thread = common::get_thread(&client, server, &owner, &thread_id).await?;
    assert_eq!(thread["comments"][0]["likeCount"], 0);

    let res = client
        .put(server.url(&format!("/threads/{}/comments/comment-missing/likes", thread_id)))
        .bearer_auth(&liker.access_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn comments_are_listed_oldest_first() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let session = common::register_and_login(&client, server).await?;
    let thread_id = common::create_thread(&client, server, &session).await?;

    let first = common::create_comment(&client, server, &session, &thread_id, "first").await?;
    let second = common::create_comment(&client, server, &session, &thread_id, "second").await?;

    let thread = common::get_thread(&client, server, &session, &thread_id).await?;
    assert_eq!(thread["comments"][0]["id"], first.as_str());
    assert_eq!(thread["comments"][1]["id"], second.as_str());
    assert_eq!(thread["comments"][0]["replies"], json!([]));
    Ok(())
}
