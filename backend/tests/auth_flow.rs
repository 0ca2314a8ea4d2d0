//! End-to-end authentication flow: signup, duplicate signup, login, and
//! identity echo through the token cookie.

mod support;

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;
use serde_json::{json, Value};

use support::{api_app, harness, signup, token_cookie};

#[actix_web::test]
async fn signup_login_and_identity_echo_round_trip() {
    let harness = harness();
    let app = test::init_service(api_app(&harness)).await;

    // Signup sets the identity cookie and returns the account.
    let res = signup(&app, "Alex", "alex@example.com", "secret1").await;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = token_cookie(&res);
    let body: Value = test::read_body_json(res).await;
    let user_id = body["user"]["id"].as_str().expect("user id").to_owned();
    assert_eq!(body["user"]["email"], "alex@example.com");

    // The embedded id is resolvable via the me endpoint.
    let me = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(me.status(), StatusCode::OK);
    let me_body: Value = test::read_body_json(me).await;
    assert_eq!(me_body["user"]["id"], user_id.as_str());

    // A second signup with the same email is a duplicate account, 400.
    let duplicate = signup(&app, "Alex Again", "alex@example.com", "secret2").await;
    assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
    let dup_body: Value = test::read_body_json(duplicate).await;
    assert_eq!(dup_body["code"], "duplicate_account");

    // Login with the wrong password is invalid credentials, 401.
    let bad_login = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": "alex@example.com", "password": "wrong" }))
            .to_request(),
    )
    .await;
    assert_eq!(bad_login.status(), StatusCode::UNAUTHORIZED);
    let bad_body: Value = test::read_body_json(bad_login).await;
    assert_eq!(bad_body["code"], "invalid_credentials");

    // Login with the right password issues a fresh cookie for the same user.
    let login = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": "alex@example.com", "password": "secret1" }))
            .to_request(),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);
    let login_body: Value = test::read_body_json(login).await;
    assert_eq!(login_body["user"]["id"], user_id.as_str());
}

#[rstest]
#[case(json!({ "name": "A", "email": "a@example.com", "password": "secret1" }), "name")]
#[case(json!({ "name": "Alex", "email": "not-an-email", "password": "secret1" }), "email")]
#[case(json!({ "name": "Alex", "email": "a@example.com", "password": "short" }), "password")]
#[actix_web::test]
async fn signup_validation_reports_the_offending_field(
    #[case] payload: Value,
    #[case] field: &str,
) {
    let harness = harness();
    let app = test::init_service(api_app(&harness)).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/signup")
            .set_json(payload)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], field);
}

#[actix_web::test]
async fn me_is_null_for_anonymous_and_garbage_cookies() {
    let harness = harness();
    let app = test::init_service(api_app(&harness)).await;

    let anonymous = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/auth/me").to_request(),
    )
    .await;
    assert_eq!(anonymous.status(), StatusCode::OK);
    let body: Value = test::read_body_json(anonymous).await;
    assert!(body["user"].is_null());

    let garbage = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .cookie(Cookie::new("token", "not-a-jwt"))
            .to_request(),
    )
    .await;
    assert_eq!(garbage.status(), StatusCode::OK);
    let body: Value = test::read_body_json(garbage).await;
    assert!(body["user"].is_null());
}

#[actix_web::test]
async fn federated_only_account_is_pointed_at_google_login() {
    let harness = harness();
    let app = test::init_service(api_app(&harness)).await;

    // First federated login provisions the account.
    let callback = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/auth/google/callback?code=fixture-code")
            .to_request(),
    )
    .await;
    assert_eq!(callback.status(), StatusCode::FOUND);

    // Password login against it fails with the distinct federated hint.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": "fed@example.com", "password": "whatever" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["code"], "federated_account");
}

#[actix_web::test]
async fn a_second_federated_login_reuses_the_account() {
    let harness = harness();
    let app = test::init_service(api_app(&harness)).await;

    for _ in 0..2 {
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/auth/google/callback?code=fixture-code")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
    }

    use backend::domain::ports::UserRepository;
    use backend::domain::Email;
    let provisioned = harness
        .users
        .find_by_email(&Email::new("fed@example.com").expect("email"))
        .await
        .expect("query")
        .expect("account provisioned");
    assert!(provisioned.password_hash.is_none());
}

#[actix_web::test]
async fn logout_clears_the_identity_cookie() {
    let harness = harness();
    let app = test::init_service(api_app(&harness)).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let cleared = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "token")
        .expect("removal cookie present");
    assert_eq!(cleared.value(), "");
}
