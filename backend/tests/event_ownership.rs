//! Event hosting and the ownership gate: creation records the caller,
//! deletion is owner-only, and the permissive no-creator default is
//! controlled by configuration.

mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};

use backend::domain::event::{EventDraft, EventDraftParams};
use backend::domain::ports::EventRepository;
use backend::domain::{Event, OwnershipPolicy};

use support::{api_app, harness, harness_with_policy, signup, token_cookie};

fn event_payload(title: &str, fee: i64) -> Value {
    json!({
        "title": title,
        "sport": "Football",
        "city": "Pune",
        "start": "2026-09-01",
        "type": "Team",
        "fee": fee,
        "prize": "Trophy",
        "org": "City Sports Club",
        "customQuestions": ["Jersey size?"],
    })
}

/// Insert an event with no recorded creator, as legacy data would have it.
async fn seed_unowned_event(harness: &support::TestHarness) -> String {
    let draft = EventDraft::try_new(EventDraftParams {
        title: "Legacy Cup".into(),
        sport: "Cricket".into(),
        city: "Mumbai".into(),
        start: "2026-10-01".into(),
        participation_type: "Team".into(),
        fee: 0,
        prize: "Medals".into(),
        organiser: "Old Committee".into(),
        ..EventDraftParams::default()
    })
    .expect("valid draft");
    let event = Event::create(draft, None);
    let id = event.id.to_string();
    harness.events.create(&event).await.expect("seed event");
    id
}

#[actix_web::test]
async fn create_records_the_caller_as_creator() {
    let harness = harness();
    let app = test::init_service(api_app(&harness)).await;

    let res = signup(&app, "Alex", "alex@example.com", "secret1").await;
    let cookie = token_cookie(&res);
    let body: Value = test::read_body_json(res).await;
    let user_id = body["user"]["id"].as_str().expect("user id").to_owned();

    let created = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/events")
            .cookie(cookie)
            .set_json(event_payload("City Cup", 500))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::OK);
    let event: Value = test::read_body_json(created).await;
    assert_eq!(event["creatorId"], user_id.as_str());
    assert_eq!(event["fee"], 500);
    assert_eq!(event["type"], "Team");
}

#[actix_web::test]
async fn anonymous_creation_is_unauthorized() {
    let harness = harness();
    let app = test::init_service(api_app(&harness)).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/events")
            .set_json(event_payload("City Cup", 500))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn a_negative_fee_is_rejected() {
    let harness = harness();
    let app = test::init_service(api_app(&harness)).await;

    let res = signup(&app, "Alex", "alex@example.com", "secret1").await;
    let cookie = token_cookie(&res);

    let created = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/events")
            .cookie(cookie)
            .set_json(event_payload("City Cup", -1))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(created).await;
    assert_eq!(body["details"]["field"], "fee");
}

#[actix_web::test]
async fn deletion_is_permitted_only_for_the_creator() {
    let harness = harness();
    let app = test::init_service(api_app(&harness)).await;

    let host = signup(&app, "Host", "host@example.com", "secret1").await;
    let host_cookie = token_cookie(&host);
    let created = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/events")
            .cookie(host_cookie.clone())
            .set_json(event_payload("City Cup", 500))
            .to_request(),
    )
    .await;
    let event: Value = test::read_body_json(created).await;
    let event_id = event["id"].as_str().expect("event id").to_owned();

    // A different resolved identity is forbidden.
    let intruder = signup(&app, "Intruder", "intruder@example.com", "secret1").await;
    let intruder_cookie = token_cookie(&intruder);
    let forbidden = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/events/{event_id}"))
            .cookie(intruder_cookie)
            .to_request(),
    )
    .await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    // Anonymous is unauthorized.
    let anonymous = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/events/{event_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    // The creator succeeds.
    let deleted = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/events/{event_id}"))
            .cookie(host_cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::OK);

    // Deleting again is a clean not-found, never an internal error.
    let again = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/events/{event_id}"))
            .cookie(host_cookie)
            .to_request(),
    )
    .await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn an_event_without_a_creator_may_be_deleted_by_default() {
    let harness = harness();
    let app = test::init_service(api_app(&harness)).await;
    let event_id = seed_unowned_event(&harness).await;

    let caller = signup(&app, "Anyone", "anyone@example.com", "secret1").await;
    let cookie = token_cookie(&caller);

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/events/{event_id}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn the_permissive_default_can_be_tightened_by_configuration() {
    let harness = harness_with_policy(OwnershipPolicy {
        allow_unowned_mutation: false,
    });
    let app = test::init_service(api_app(&harness)).await;
    let event_id = seed_unowned_event(&harness).await;

    let caller = signup(&app, "Anyone", "anyone@example.com", "secret1").await;
    let cookie = token_cookie(&caller);

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/events/{event_id}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn listings_are_public_and_scoped_listings_are_not() {
    let harness = harness();
    let app = test::init_service(api_app(&harness)).await;

    let host = signup(&app, "Host", "host@example.com", "secret1").await;
    let host_cookie = token_cookie(&host);
    for title in ["First", "Second"] {
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/events")
                .cookie(host_cookie.clone())
                .set_json(event_payload(title, 100))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    // Public listing, newest first.
    let listed = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/events").to_request(),
    )
    .await;
    assert_eq!(listed.status(), StatusCode::OK);
    let body: Value = test::read_body_json(listed).await;
    let titles: Vec<&str> = body
        .as_array()
        .expect("array body")
        .iter()
        .map(|e| e["title"].as_str().expect("title"))
        .collect();
    assert_eq!(titles, ["Second", "First"]);

    // The caller's own listing requires identity.
    let anonymous = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/events/mine")
            .to_request(),
    )
    .await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let mine = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/events/mine")
            .cookie(host_cookie)
            .to_request(),
    )
    .await;
    assert_eq!(mine.status(), StatusCode::OK);
    let mine_body: Value = test::read_body_json(mine).await;
    assert_eq!(mine_body.as_array().map(Vec::len), Some(2));
}

#[actix_web::test]
async fn missing_events_are_not_found() {
    let harness = harness();
    let app = test::init_service(api_app(&harness)).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/events/7b1a85f6-5717-4562-b3fc-2c963f66afa6")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
