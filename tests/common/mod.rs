use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use vape::router::init_router;
use vape::state::AppState;
use vape::utils::email::RecordingMailer;
use vape_auth::create_access_token;
use vape_config::{CorsConfig, EmailConfig, JwtConfig};
use vape_db::MemoryUserDirectory;
use vape_models::User;

pub const ADMIN_ID: i64 = 1;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub directory: Arc<MemoryUserDirectory>,
    pub mailer: Arc<RecordingMailer>,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    }
}

/// SMTP disabled, rendering from the bundled `templates/email`.
#[allow(dead_code)]
pub fn test_email_config() -> EmailConfig {
    EmailConfig {
        enabled: false,
        smtp_host: "localhost".to_string(),
        smtp_port: 1025,
        smtp_username: String::new(),
        smtp_password: String::new(),
        from_email: "noreply@example.com".to_string(),
        from_name: "Test".to_string(),
        template_dir: "templates/email".to_string(),
    }
}

pub fn test_user(id: i64) -> User {
    let now = Utc::now();
    User {
        id,
        email: format!("user{}@example.com", id),
        name: format!("User {}", id),
        admin: id == ADMIN_ID,
        created_at: now,
        updated_at: now,
    }
}

/// Builds the full router over an in-memory directory holding users 1
/// (admin), 5 and 6.
pub async fn setup_test_app() -> TestApp {
    let directory = Arc::new(
        MemoryUserDirectory::with_users([test_user(ADMIN_ID), test_user(5), test_user(6)]).await,
    );
    let mailer = Arc::new(RecordingMailer::new());

    let state = AppState {
        directory: directory.clone(),
        mailer: mailer.clone(),
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
    };

    TestApp {
        router: init_router(state.clone()),
        state,
        directory,
        mailer,
    }
}

pub fn token_for(id: i64, admin: bool) -> String {
    create_access_token(id, &format!("user{}@example.com", id), admin, &test_jwt_config()).unwrap()
}

/// Sends one request through the router and returns the status and the
/// decoded JSON body.
pub async fn send(
    app: &TestApp,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}
