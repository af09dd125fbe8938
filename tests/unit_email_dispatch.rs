mod common;

use std::collections::HashMap;
use std::time::Duration;

use axum::http::StatusCode;
use common::{send, setup_test_app, test_email_config, token_for};
use vape::modules::users::service::UserService;
use vape::utils::email::{EmailService, Mailer, TemplatedEmail};

const WAIT: Duration = Duration::from_secs(2);

#[tokio::test]
async fn test_dispatch_returns_user_and_sends_in_background() {
    let app = setup_test_app().await;

    let user = UserService::send_templated_email(&app.state, 5, "welcome", None)
        .await
        .unwrap();
    assert_eq!(user.id, 5);

    let sent = tokio::time::timeout(WAIT, app.mailer.wait_for(1))
        .await
        .expect("email was never sent");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to_email, "user5@example.com");
    assert_eq!(sent[0].to_name, "User 5");
    assert_eq!(sent[0].template, "welcome");
    assert!(sent[0].vars.is_empty());
}

#[tokio::test]
async fn test_dispatch_passes_vars_through() {
    let app = setup_test_app().await;
    let vars = HashMap::from([(
        "reset_url".to_string(),
        "https://app.example.com/reset/abc".to_string(),
    )]);

    UserService::send_templated_email(&app.state, 6, "password-reset", Some(vars.clone()))
        .await
        .unwrap();

    let sent = tokio::time::timeout(WAIT, app.mailer.wait_for(1))
        .await
        .expect("email was never sent");
    assert_eq!(sent[0].vars, vars);
}

#[tokio::test]
async fn test_dispatch_for_missing_user_fails_and_sends_nothing() {
    let app = setup_test_app().await;

    let err = UserService::send_templated_email(&app.state, 999, "welcome", None)
        .await
        .unwrap_err();

    assert_eq!(err.status, StatusCode::NOT_FOUND);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(app.mailer.sent().await.is_empty());
}

#[tokio::test]
async fn test_dispatch_directory_failure_is_internal_error() {
    let app = setup_test_app().await;
    app.directory.set_failing(true);

    let err = UserService::send_templated_email(&app.state, 5, "welcome", None)
        .await
        .unwrap_err();

    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(app.mailer.sent().await.is_empty());
}

#[tokio::test]
async fn test_delivery_failure_is_not_reported_to_caller() {
    let app = setup_test_app().await;
    app.mailer.set_failing(true);

    let user = UserService::send_templated_email(&app.state, 5, "welcome", None)
        .await
        .unwrap();
    assert_eq!(user.id, 5);

    let sent = tokio::time::timeout(WAIT, app.mailer.wait_for(1))
        .await
        .expect("send was never attempted");
    assert_eq!(sent.len(), 1);

    // The service keeps answering after a failed background send.
    let (status, _) = send(&app, "GET", "/users/5", Some(&token_for(5, false)), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_email_service_renders_bundled_templates_when_disabled() {
    let service = EmailService::new(test_email_config());

    for template in ["welcome", "password-reset"] {
        let result = service
            .send_templated(TemplatedEmail {
                to_email: "user5@example.com".to_string(),
                to_name: "User 5".to_string(),
                template: template.to_string(),
                vars: HashMap::new(),
            })
            .await;
        assert!(result.is_ok(), "{}", template);
    }
}

#[tokio::test]
async fn test_email_service_unknown_template_fails() {
    let service = EmailService::new(test_email_config());

    let err = service
        .send_templated(TemplatedEmail {
            to_email: "user5@example.com".to_string(),
            to_name: "User 5".to_string(),
            template: "does-not-exist".to_string(),
            vars: HashMap::new(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_email_service_refuses_template_paths() {
    let service = EmailService::new(test_email_config());

    for template in ["../email/welcome", "../../Cargo", "email/../welcome"] {
        let result = service
            .send_templated(TemplatedEmail {
                to_email: "user5@example.com".to_string(),
                to_name: "User 5".to_string(),
                template: template.to_string(),
                vars: HashMap::new(),
            })
            .await;
        assert!(result.is_err(), "{}", template);
    }
}
