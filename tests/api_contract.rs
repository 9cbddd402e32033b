mod common;

use esports_portal::client::{ApiClient, ClientError, RegistrationApi};
use esports_portal::models::{NewAdmin, NewPayment, NewRegistration, NewUser};
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{spawn_app, spawn_app_with_admin_token, spawn_unmigrated_app};

#[tokio::test]
async fn register_user_returns_submitted_fields() {
    let app = spawn_app().await;

    let response = app
        .http
        .post(app.url("/api/register"))
        .json(&json!({"name": "A", "email": "a@x.com", "password": "p"}))
        .send()
        .await
        .expect("send");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("json body");
    assert_eq!(body["message"], "User registered");
    assert_eq!(body["user"]["name"], "A");
    assert_eq!(body["user"]["email"], "a@x.com");
    assert_eq!(body["user"]["password"], "p");
    assert!(body["user"]["id"].is_i64());
}

#[tokio::test]
async fn created_rows_show_up_in_listings() {
    let app = spawn_app().await;

    let user = app
        .client
        .register_user(&NewUser {
            name: "Ravi".to_string(),
            email: "ravi@example.com".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .expect("register user");
    let payment = app
        .client
        .make_payment(&NewPayment {
            user_id: user.id,
            amount: 249,
            status: "Paid".to_string(),
        })
        .await
        .expect("record payment");
    let admin = app
        .client
        .create_admin(&NewAdmin {
            name: "Ops".to_string(),
            email: "ops@example.com".to_string(),
            password: "secret".to_string(),
        })
        .await
        .expect("add admin");

    assert_eq!(payment.user_id, user.id);
    assert_eq!(payment.amount, 249);
    assert_eq!(payment.status, "Paid");
    assert!(!payment.created_at.is_empty());

    assert_eq!(app.client.list_users().await.expect("users"), vec![user]);
    assert_eq!(app.client.list_payments().await.expect("payments"), vec![payment]);
    assert_eq!(app.client.list_admins().await.expect("admins"), vec![admin]);
}

#[tokio::test]
async fn missing_column_is_a_500_and_inserts_nothing() {
    let app = spawn_app().await;

    let response = app
        .http
        .post(app.url("/api/register"))
        .json(&json!({"name": "A", "email": "a@x.com"}))
        .send()
        .await
        .expect("send");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.expect("json body");
    assert!(body["error"].as_str().expect("error string").contains("password"));
    assert!(app.client.list_users().await.expect("users").is_empty());
}

#[tokio::test]
async fn wrongly_typed_and_non_json_bodies_share_the_error_shape() {
    let app = spawn_app().await;

    let typed = app
        .http
        .post(app.url("/api/payment"))
        .json(&json!({"user_id": "one", "amount": 249, "status": "Paid"}))
        .send()
        .await
        .expect("send");
    assert_eq!(typed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = typed.json().await.expect("json body");
    assert!(body["error"].is_string());

    let raw = app
        .http
        .post(app.url("/api/register-event"))
        .body("user_id=1")
        .send()
        .await
        .expect("send");
    assert_eq!(raw.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = raw.json().await.expect("json body");
    assert!(body["error"].is_string());

    assert!(app.client.list_payments().await.expect("payments").is_empty());
    assert!(app
        .client
        .list_registrations()
        .await
        .expect("registrations")
        .is_empty());
}

#[tokio::test]
async fn unknown_route_becomes_api_error() {
    let app = spawn_app().await;
    let misrouted = ApiClient::new(format!("{}/nowhere", app.address));

    match misrouted.list_users().await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 404);
            assert!(message.contains("404"));
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn payment_for_unknown_user_is_still_recorded() {
    let app = spawn_app().await;

    let payment = app
        .client
        .make_payment(&NewPayment {
            user_id: 999_999,
            amount: 249,
            status: "Paid".to_string(),
        })
        .await
        .expect("no foreign key on payments");

    assert_eq!(payment.user_id, 999_999);
    assert!(app.client.list_users().await.expect("users").is_empty());
    assert_eq!(app.client.list_payments().await.expect("payments").len(), 1);
}

#[tokio::test]
async fn registrations_list_contains_both_events() {
    let app = spawn_app().await;

    for event_name in ["BGMI Campus Clash", "Valorant Night Cup"] {
        app.client
            .register_event(&NewRegistration {
                user_id: 1,
                event_name: event_name.to_string(),
            })
            .await
            .expect("register event");
    }

    let rows = app.client.list_registrations().await.expect("registrations");
    assert!(rows.len() >= 2);
    let names: Vec<_> = rows.iter().map(|r| r.event_name.as_str()).collect();
    assert!(names.contains(&"BGMI Campus Clash"));
    assert!(names.contains(&"Valorant Night Cup"));
}

#[tokio::test]
async fn identical_submissions_create_distinct_rows() {
    let app = spawn_app().await;
    let request = NewRegistration {
        user_id: 7,
        event_name: "Campus Clash".to_string(),
    };

    let first = app.client.register_event(&request).await.expect("first");
    let second = app.client.register_event(&request).await.expect("second");

    assert_ne!(first.id, second.id);
    assert_eq!(first.event_name, second.event_name);
    assert_eq!(app.client.list_registrations().await.expect("rows").len(), 2);
}

#[tokio::test]
async fn admin_routes_require_token_when_configured() {
    let app = spawn_app_with_admin_token(Some("s3cret")).await;
    let admin = NewAdmin {
        name: "Ops".to_string(),
        email: "ops@example.com".to_string(),
        password: "secret".to_string(),
    };

    match app.client.create_admin(&admin).await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "missing or invalid admin token");
        }
        other => panic!("expected 401, got {other:?}"),
    }
    let wrong = app.client.clone().with_admin_token("guess");
    assert!(matches!(
        wrong.list_admins().await,
        Err(ClientError::Api { status: 401, .. })
    ));

    let authorized = app.client.clone().with_admin_token("s3cret");
    let created = authorized.create_admin(&admin).await.expect("create admin");
    assert_eq!(authorized.list_admins().await.expect("admins"), vec![created]);

    // the public endpoints stay open
    assert!(app.client.list_users().await.expect("users").is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_registrations_all_succeed() {
    let app = spawn_app().await;
    let mut tasks = tokio::task::JoinSet::new();

    for i in 0..50 {
        let client = app.client.clone();
        tasks.spawn(async move {
            client
                .register_event(&NewRegistration {
                    user_id: i,
                    event_name: format!("Campus Clash #{i}"),
                })
                .await
        });
    }

    while let Some(joined) = tasks.join_next().await {
        joined.expect("task").expect("register event");
    }
    let rows = app.client.list_registrations().await.expect("registrations");
    assert_eq!(rows.len(), 50);
}

#[tokio::test]
async fn missing_schema_surfaces_the_driver_message() {
    let app = spawn_unmigrated_app().await;

    let response = app
        .http
        .post(app.url("/api/register"))
        .json(&json!({"name": "A", "email": "a@x.com", "password": "p"}))
        .send()
        .await
        .expect("send");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.expect("json body");
    assert_eq!(body["error"], "no such table: users");

    match app.client.list_payments().await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "no such table: payments");
        }
        other => panic!("expected 500, got {other:?}"),
    }
}
