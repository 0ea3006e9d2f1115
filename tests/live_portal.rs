//! Tests against the real portal.
//!
//! Run with `WP_USERNAME`/`WP_PASSWORD` set and `--ignored`.

use webclass::models::{Credentials, PortalConfig, SessionToken};
use webclass::{FailureKind, PortalClient};

async fn login() -> (PortalClient, SessionToken) {
    let credentials = Credentials::from_env().unwrap();
    let client = PortalClient::new(PortalConfig::default()).unwrap();
    let token = client
        .authenticate(&credentials.username, &credentials.password)
        .await
        .unwrap();
    assert!(client.is_valid(&token).await);
    (client, token)
}

#[tokio::test]
#[ignore]
async fn test_authenticate_failed() {
    let client = PortalClient::new(PortalConfig::default()).unwrap();
    let err = client
        .authenticate("wrong_user", "wrong_password")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some(FailureKind::Auth));
}

#[tokio::test]
#[ignore]
async fn test_check_token_failed() {
    let client = PortalClient::new(PortalConfig::default()).unwrap();
    assert!(!client.is_valid(&SessionToken::from("wrong_token")).await);
}

#[tokio::test]
#[ignore]
async fn test_timetable() {
    let (client, token) = login().await;
    let grid = client.extract_timetable(&token).await.unwrap();
    println!("{grid}");
}

#[tokio::test]
#[ignore]
async fn test_notifications() {
    let (client, token) = login().await;
    let feed = client.extract_notifications(&token).await.unwrap();
    println!("{feed}");
}
