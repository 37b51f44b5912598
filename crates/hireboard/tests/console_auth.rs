//! End-to-end console flows through the composed routers: first-admin setup, login,
//! role checks, and session revocation after deactivation.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::{Extension, Router};
use chrono::Duration;
use serde_json::{json, Value};
use tower::ServiceExt;

use hireboard::accounts::{account_router, AccountService};
use hireboard::auth::{Authenticator, TokenIssuer};
use hireboard::stats::{stats_router, StatsService};
use hireboard::storage::memory::{
    MemoryAdminStore, MemoryAuditLog, MemoryPostStore, MemoryUserStore,
};
use hireboard::users::{user_router, User, UserAdminService, UserId, UserRepository};

fn console() -> Router {
    let admins = Arc::new(MemoryAdminStore::default());
    let users = Arc::new(MemoryUserStore::default());
    let posts = Arc::new(MemoryPostStore::default());
    let audit = Arc::new(MemoryAuditLog::default());
    users
        .insert(User::new(
            UserId("user-1".into()),
            "ada@example.com",
            "Ada Lovelace",
        ))
        .expect("seed user");

    let tokens = Arc::new(TokenIssuer::new(b"console-tests", Duration::hours(2)));
    let accounts = AccountService::new(admins.clone(), audit.clone(), tokens.clone());
    let user_admin = UserAdminService::new(users.clone(), audit.clone());
    let stats = StatsService::new(users, posts, admins.clone(), audit);

    Router::new()
        .merge(account_router(Arc::new(accounts)))
        .merge(user_router(Arc::new(user_admin)))
        .merge(stats_router(Arc::new(stats)))
        .layer(Extension(Authenticator::new(tokens, admins)))
}

async fn call(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("route executes");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    (status, serde_json::from_slice(&bytes).expect("json payload"))
}

async fn login(router: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    call(
        router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await
}

#[tokio::test]
async fn setup_login_and_role_enforcement() {
    let router = console();

    let (status, body) = call(&router, Method::GET, "/api/setup/status", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({ "needsSetup": true, "adminCount": 0 }));

    let (status, body) = call(
        &router,
        Method::POST,
        "/api/setup/create-first-admin",
        None,
        Some(json!({
            "email": "root@example.com",
            "password": "correct-horse",
            "name": "Root"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["role"], "SUPER_ADMIN");
    assert!(body["data"].get("passwordHash").is_none());

    let (status, _) = call(
        &router,
        Method::POST,
        "/api/setup/create-first-admin",
        None,
        Some(json!({
            "email": "late@example.com",
            "password": "correct-horse",
            "name": "Late"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = login(&router, "root@example.com", "wrong-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, body) = login(&router, "root@example.com", "correct-horse").await;
    assert_eq!(status, StatusCode::OK);
    let root_token = body["data"]["token"].as_str().expect("token").to_string();

    let (status, body) = call(&router, Method::GET, "/api/auth/me", Some(&root_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "root@example.com");

    let (status, body) = call(
        &router,
        Method::POST,
        "/api/admins",
        Some(&root_token),
        Some(json!({
            "email": "mod@example.com",
            "password": "moderate-me",
            "name": "Mod"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["role"], "MODERATOR");
    let moderator_id = body["data"]["id"].as_str().expect("id").to_string();

    let (_, body) = login(&router, "mod@example.com", "moderate-me").await;
    let mod_token = body["data"]["token"].as_str().expect("token").to_string();

    let (status, _) = call(&router, Method::GET, "/api/admins", Some(&mod_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call(
        &router,
        Method::PUT,
        "/api/users/user-1/block",
        Some(&mod_token),
        Some(json!({ "reason": ["harassment"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(
        &router,
        Method::PUT,
        "/api/users/user-1/block",
        Some(&mod_token),
        Some(json!({ "reason": "harassment" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isBlocked"], true);
    assert_eq!(body["data"]["blockedReason"], "harassment");

    let (status, body) = call(
        &router,
        Method::PUT,
        &format!("/api/admins/{moderator_id}/deactivate"),
        Some(&root_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isActive"], false);

    let (status, _) = call(&router, Method::GET, "/api/auth/me", Some(&mod_token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = login(&router, "mod@example.com", "moderate-me").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = call(
        &router,
        Method::GET,
        "/api/stats/overview",
        Some(&root_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["users"]["blocked"], 1);
    assert_eq!(body["data"]["admins"], json!({ "total": 2, "active": 1 }));
    let actions: Vec<_> = body["data"]["recentActions"]
        .as_array()
        .expect("recent actions")
        .iter()
        .map(|record| record["action"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(
        actions,
        vec!["DEACTIVATE_ADMIN", "BLOCK_USER", "CREATE_ADMIN", "CREATE_ADMIN"]
    );
}

#[tokio::test]
async fn super_admin_cannot_deactivate_self() {
    let router = console();
    call(
        &router,
        Method::POST,
        "/api/setup/create-first-admin",
        None,
        Some(json!({
            "email": "root@example.com",
            "password": "correct-horse",
            "name": "Root"
        })),
    )
    .await;
    let (_, body) = login(&router, "root@example.com", "correct-horse").await;
    let token = body["data"]["token"].as_str().expect("token").to_string();
    let id = body["data"]["admin"]["id"].as_str().expect("id").to_string();

    let (status, body) = call(
        &router,
        Method::PUT,
        &format!("/api/admins/{id}/deactivate"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "admins cannot deactivate themselves");

    let (status, body) = call(&router, Method::POST, "/api/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "logged out");
}
