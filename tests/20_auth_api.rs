mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn register_then_login_round_trip() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };

    let (token, user) = common::register_and_login(&server.base_url).await?;
    assert!(!token.is_empty());
    assert!(user["id"].is_string());
    assert_eq!(user["name"], "Test User");
    Ok(())
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = reqwest::Client::new();

    let email = format!("user-{}@example.com", uuid::Uuid::new_v4());
    let res = client
        .post(format!("{}/auth/register", server.base_url))
        .json(&json!({ "email": email, "name": "Test User", "password": "test-password-123" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .post(format!("{}/auth/login", server.base_url))
        .json(&json!({ "email": email, "password": "not-the-password" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn duplicate_email_conflicts() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = reqwest::Client::new();

    let email = format!("user-{}@example.com", uuid::Uuid::new_v4());
    let payload = json!({ "email": email, "name": "Test User", "password": "test-password-123" });

    let res = client
        .post(format!("{}/auth/register", server.base_url))
        .json(&payload)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .post(format!("{}/auth/register", server.base_url))
        .json(&payload)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn register_rejects_short_password() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/register", server.base_url))
        .json(&json!({
            "email": format!("user-{}@example.com", uuid::Uuid::new_v4()),
            "name": "Test User",
            "password": "short",
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["field_errors"]["password"].is_string(), "missing field error: {}", body);
    Ok(())
}

#[tokio::test]
async fn menus_require_authentication() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = reqwest::Client::new();

    // No token
    let res = client.get(format!("{}/menus", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Garbage token
    let res = client
        .get(format!("{}/menus", server.base_url))
        .bearer_auth("not-a-jwt")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
