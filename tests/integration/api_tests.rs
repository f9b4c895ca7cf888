//! Resource endpoints and authorization over HTTP

use crate::call_json;
use crate::common::fixtures::{create_club, create_member};
use crate::common::{EventFactory, PASSWORD, TestContext};
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use campus_clubs::core::models::Role;
use campus_clubs::server::create_app;
use serde_json::json;

fn event_body() -> serde_json::Value {
    json!({
        "name": "Robot Wars",
        "description": "Bring your bots",
        "venue": "Gym",
        "start_time": "2030-03-01T18:00",
        "end_time": "2030-03-01T21:00",
        "capacity": "40"
    })
}

#[actix_web::test]
async fn test_health() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.data())).await;

    let (status, body) = call_json!(app, TestRequest::get().uri("/health"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].as_str().is_some());
}

#[actix_web::test]
async fn test_clubs_listing_and_detail() {
    let ctx = TestContext::new().await;
    let club = create_club(ctx.db(), "Chess").await;
    create_member(ctx.db(), "a@x.com", Role::President, Some(club.id)).await;
    create_member(ctx.db(), "b@x.com", Role::Member, Some(club.id)).await;
    EventFactory::new(club.id).create(ctx.db()).await;
    let app = test::init_service(create_app(ctx.data())).await;

    let (status, body) = call_json!(app, TestRequest::get().uri("/clubs"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["club_name"], "Chess");
    assert_eq!(body[0]["type"], "technical");
    assert_eq!(body[0]["membersCount"], 2);

    let (status, body) = call_json!(
        app,
        TestRequest::get().uri(&format!("/clubs/{}", club.id))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["membersCount"], 2);
    assert_eq!(body["eventCount"], 1);
    assert_eq!(body["members"].as_array().map(Vec::len), Some(2));
    assert!(body["members"][0].get("password_hash").is_none());

    let (status, body) = call_json!(app, TestRequest::get().uri("/clubs/999"));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Club not found");

    let (status, _) = call_json!(app, TestRequest::get().uri("/clubs/not-a-number"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_create_club_requires_super_admin() {
    let ctx = TestContext::new().await;
    let club = create_club(ctx.db(), "Chess").await;
    let president = create_member(ctx.db(), "p@x.com", Role::President, Some(club.id)).await;
    let admin = create_member(ctx.db(), "admin@x.com", Role::SuperAdmin, None).await;
    let app = test::init_service(create_app(ctx.data())).await;

    let body = json!({
        "club_name": "Astronomy",
        "description": "Stargazing",
        "logo_image": "https://img/astro.png",
        "type": "hobby"
    });

    let (status, _) = call_json!(app, TestRequest::post().uri("/clubs").set_json(&body));
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, resp) = call_json!(
        app,
        TestRequest::post()
            .uri("/clubs")
            .insert_header(ctx.bearer(&president))
            .set_json(&body)
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(resp["error"], "Your role is not permitted to perform this action");

    let (status, _) = call_json!(
        app,
        TestRequest::post()
            .uri("/clubs")
            .insert_header(ctx.bearer(&admin))
            .set_json(json!({ "club_name": "Astronomy" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, created) = call_json!(
        app,
        TestRequest::post()
            .uri("/clubs")
            .insert_header(ctx.bearer(&admin))
            .set_json(&body)
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["club_name"], "Astronomy");
    assert_eq!(created["type"], "hobby");
}

#[actix_web::test]
async fn test_create_event_infers_club() {
    let ctx = TestContext::new().await;
    let club = create_club(ctx.db(), "Robotics").await;
    let handler = create_member(ctx.db(), "h@x.com", Role::Handler, Some(club.id)).await;
    let member = create_member(ctx.db(), "m@x.com", Role::Member, Some(club.id)).await;
    let app = test::init_service(create_app(ctx.data())).await;

    let (status, _) = call_json!(
        app,
        TestRequest::post()
            .uri("/events")
            .insert_header(ctx.bearer(&member))
            .set_json(event_body())
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, event) = call_json!(
        app,
        TestRequest::post()
            .uri("/events")
            .insert_header(ctx.bearer(&handler))
            .set_json(event_body())
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(event["club_id"], club.id);
    assert_eq!(event["capacity"], 40);
    assert_eq!(event["restrict_email_domain"], false);

    let (status, detail) = call_json!(
        app,
        TestRequest::get().uri(&format!("/events/{}", event["id"]))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["attendees"], 0);
    assert_eq!(detail["seatsLeft"], 40);

    let (status, events) = call_json!(app, TestRequest::get().uri("/events"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(events.as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn test_create_event_validation() {
    let ctx = TestContext::new().await;
    let club = create_club(ctx.db(), "Robotics").await;
    let president = create_member(ctx.db(), "p@x.com", Role::President, Some(club.id)).await;
    let admin = create_member(ctx.db(), "admin@x.com", Role::SuperAdmin, None).await;
    let app = test::init_service(create_app(ctx.data())).await;

    let mut backwards = event_body();
    backwards["end_time"] = json!("2030-03-01T17:00");
    let (status, body) = call_json!(
        app,
        TestRequest::post()
            .uri("/events")
            .insert_header(ctx.bearer(&president))
            .set_json(backwards)
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "start_time must be before end_time");

    let mut restricted = event_body();
    restricted["restrict_email_domain"] = json!(true);
    let (status, _) = call_json!(
        app,
        TestRequest::post()
            .uri("/events")
            .insert_header(ctx.bearer(&president))
            .set_json(restricted)
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut negative = event_body();
    negative["capacity"] = json!(-1);
    let (status, _) = call_json!(
        app,
        TestRequest::post()
            .uri("/events")
            .insert_header(ctx.bearer(&president))
            .set_json(negative)
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Super-administrators must say which club the event belongs to
    let (status, body) = call_json!(
        app,
        TestRequest::post()
            .uri("/events")
            .insert_header(ctx.bearer(&admin))
            .set_json(event_body())
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "club_id is required");

    let mut for_club = event_body();
    for_club["club_id"] = json!(club.id);
    let (status, _) = call_json!(
        app,
        TestRequest::post()
            .uri("/events")
            .insert_header(ctx.bearer(&admin))
            .set_json(for_club)
    );
    assert_eq!(status, StatusCode::CREATED);
}

#[actix_web::test]
async fn test_update_event_of_other_club_is_forbidden() {
    let ctx = TestContext::new().await;
    let club_a = create_club(ctx.db(), "Alpha").await;
    let club_b = create_club(ctx.db(), "Beta").await;
    let president_a = create_member(ctx.db(), "pa@x.com", Role::President, Some(club_a.id)).await;
    let event_b = EventFactory::new(club_b.id).create(ctx.db()).await;
    let app = test::init_service(create_app(ctx.data())).await;

    let (status, body) = call_json!(
        app,
        TestRequest::put()
            .uri(&format!("/events/{}", event_b.id))
            .insert_header(ctx.bearer(&president_a))
            .set_json(json!({ "name": "Hijacked" }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "This resource belongs to another club");

    let stored = ctx.db().find_event_by_id(event_b.id).await.unwrap().unwrap();
    assert_eq!(stored, event_b);

    let (status, _) = call_json!(
        app,
        TestRequest::delete()
            .uri(&format!("/events/{}", event_b.id))
            .insert_header(ctx.bearer(&president_a))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(ctx.db().find_event_by_id(event_b.id).await.unwrap().is_some());
}

#[actix_web::test]
async fn test_update_event_check_ordering() {
    let ctx = TestContext::new().await;
    let club = create_club(ctx.db(), "Alpha").await;
    let president = create_member(ctx.db(), "p@x.com", Role::President, Some(club.id)).await;
    let member = create_member(ctx.db(), "m@x.com", Role::Member, Some(club.id)).await;
    let app = test::init_service(create_app(ctx.data())).await;

    // A privileged caller learns that the event is missing
    let (status, _) = call_json!(
        app,
        TestRequest::put()
            .uri("/events/999")
            .insert_header(ctx.bearer(&president))
            .set_json(json!({ "name": "Ghost" }))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    // An unprivileged caller is stopped by the role gate first
    let (status, _) = call_json!(
        app,
        TestRequest::put()
            .uri("/events/999")
            .insert_header(ctx.bearer(&member))
            .set_json(json!({ "name": "Ghost" }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call_json!(
        app,
        TestRequest::put()
            .uri("/events/999")
            .set_json(json!({ "name": "Ghost" }))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_update_event_partially() {
    let ctx = TestContext::new().await;
    let club = create_club(ctx.db(), "Alpha").await;
    let other = create_club(ctx.db(), "Beta").await;
    let vp = create_member(ctx.db(), "vp@x.com", Role::VicePresident, Some(club.id)).await;
    let event = EventFactory::new(club.id).capacity(10).create(ctx.db()).await;
    let app = test::init_service(create_app(ctx.data())).await;
    let uri = format!("/events/{}", event.id);

    let (status, updated) = call_json!(
        app,
        TestRequest::put()
            .uri(&uri)
            .insert_header(ctx.bearer(&vp))
            .set_json(json!({
                "venue": "Main Hall",
                "capacity": null,
                "restrict_email_domain": true,
                "allowed_email_domain": "@College.edu"
            }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["venue"], "Main Hall");
    assert_eq!(updated["name"], event.name);
    assert!(updated["capacity"].is_null());
    assert_eq!(updated["allowed_email_domain"], "college.edu");

    let (status, _) = call_json!(
        app,
        TestRequest::put()
            .uri(&uri)
            .insert_header(ctx.bearer(&vp))
            .set_json(json!({ "end_time": "2000-01-01T00:00:00Z" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call_json!(
        app,
        TestRequest::put()
            .uri(&uri)
            .insert_header(ctx.bearer(&vp))
            .set_json(json!({ "club_id": other.id }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let stored = ctx.db().find_event_by_id(event.id).await.unwrap().unwrap();
    assert_eq!(stored.club_id, club.id);
    assert_eq!(stored.venue, "Main Hall");
}

#[actix_web::test]
async fn test_delete_event() {
    let ctx = TestContext::new().await;
    let club = create_club(ctx.db(), "Alpha").await;
    let president = create_member(ctx.db(), "p@x.com", Role::President, Some(club.id)).await;
    let event = EventFactory::new(club.id).create(ctx.db()).await;
    let app = test::init_service(create_app(ctx.data())).await;
    let uri = format!("/events/{}", event.id);

    let resp = test::call_service(
        &app,
        TestRequest::delete()
            .uri(&uri)
            .insert_header(ctx.bearer(&president))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let (status, _) = call_json!(app, TestRequest::get().uri(&uri));
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_register_over_http() {
    let ctx = TestContext::new().await;
    let club = create_club(ctx.db(), "Alpha").await;
    let event = EventFactory::new(club.id).capacity(2).create(ctx.db()).await;
    let app = test::init_service(create_app(ctx.data())).await;
    let uri = format!("/events/{}/register", event.id);

    let register = |email: &str| {
        TestRequest::post()
            .uri(&uri)
            .set_json(json!({ "name": "Guest", "email": email, "phone": "555-0100" }))
    };

    let (status, body) = call_json!(app, register("a@x.com"));
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["event_id"], event.id);
    assert_eq!(body["email"], "a@x.com");

    let (status, body) = call_json!(app, register("A@x.com"));
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "You have already registered for this event");

    let (status, _) = call_json!(app, register("b@x.com"));
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call_json!(app, register("c@x.com"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Event is full");

    let (status, _) = call_json!(app, register("not-an-email"));
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call_json!(
        app,
        TestRequest::post()
            .uri(&uri)
            .set_json(json!({ "email": "d@x.com" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "name is required");

    let (status, _) = call_json!(
        app,
        TestRequest::post()
            .uri("/events/999/register")
            .set_json(json!({ "name": "Guest", "email": "a@x.com" }))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(ctx.db().count_registrations(event.id).await.unwrap(), 2);
}

#[actix_web::test]
async fn test_domain_restricted_registration_over_http() {
    let ctx = TestContext::new().await;
    let club = create_club(ctx.db(), "Alpha").await;
    let event = EventFactory::new(club.id)
        .restricted(Some("college.edu"))
        .create(ctx.db())
        .await;
    let app = test::init_service(create_app(ctx.data())).await;
    let uri = format!("/events/{}/register", event.id);

    let (status, _) = call_json!(
        app,
        TestRequest::post()
            .uri(&uri)
            .set_json(json!({ "name": "Student", "email": "user@college.edu" }))
    );
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = call_json!(
        app,
        TestRequest::post()
            .uri(&uri)
            .set_json(json!({ "name": "Outsider", "email": "user@gmail.com" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_list_registrations_is_club_scoped() {
    let ctx = TestContext::new().await;
    let club_a = create_club(ctx.db(), "Alpha").await;
    let club_b = create_club(ctx.db(), "Beta").await;
    let president_a = create_member(ctx.db(), "pa@x.com", Role::President, Some(club_a.id)).await;
    let president_b = create_member(ctx.db(), "pb@x.com", Role::President, Some(club_b.id)).await;
    let event = EventFactory::new(club_a.id).create(ctx.db()).await;
    let app = test::init_service(create_app(ctx.data())).await;

    for email in ["a@x.com", "b@x.com"] {
        let (status, _) = call_json!(
            app,
            TestRequest::post()
                .uri(&format!("/events/{}/register", event.id))
                .set_json(json!({ "name": "Guest", "email": email }))
        );
        assert_eq!(status, StatusCode::CREATED);
    }

    let uri = format!("/events/{}/registrations", event.id);

    let (status, _) = call_json!(app, TestRequest::get().uri(&uri));
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call_json!(
        app,
        TestRequest::get().uri(&uri).insert_header(ctx.bearer(&president_b))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = call_json!(
        app,
        TestRequest::get().uri(&uri).insert_header(ctx.bearer(&president_a))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}

#[actix_web::test]
async fn test_gallery() {
    let ctx = TestContext::new().await;
    let club_a = create_club(ctx.db(), "Alpha").await;
    let club_b = create_club(ctx.db(), "Beta").await;
    let handler_a = create_member(ctx.db(), "ha@x.com", Role::Handler, Some(club_a.id)).await;
    let vp_a = create_member(ctx.db(), "vpa@x.com", Role::VicePresident, Some(club_a.id)).await;
    let president_b = create_member(ctx.db(), "pb@x.com", Role::President, Some(club_b.id)).await;
    let app = test::init_service(create_app(ctx.data())).await;

    let image = json!({ "url": "https://img/1.png", "text": "Kickoff" });

    let (status, _) = call_json!(
        app,
        TestRequest::post()
            .uri("/gallery")
            .insert_header(ctx.bearer(&vp_a))
            .set_json(&image)
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, created) = call_json!(
        app,
        TestRequest::post()
            .uri("/gallery")
            .insert_header(ctx.bearer(&handler_a))
            .set_json(&image)
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["club_id"], club_a.id);

    let (status, _) = call_json!(
        app,
        TestRequest::post()
            .uri("/gallery")
            .insert_header(ctx.bearer(&handler_a))
            .set_json(json!({ "text": "no url" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, all) = call_json!(app, TestRequest::get().uri("/gallery"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all[0]["club"]["club_name"], "Alpha");

    let (_, only_b) = call_json!(
        app,
        TestRequest::get().uri(&format!("/gallery/{}", club_b.id))
    );
    assert_eq!(only_b.as_array().map(Vec::len), Some(0));

    let uri = format!("/gallery/{}", created["id"]);
    let (status, _) = call_json!(
        app,
        TestRequest::delete().uri(&uri).insert_header(ctx.bearer(&president_b))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call_json!(
        app,
        TestRequest::delete().uri(&uri).insert_header(ctx.bearer(&handler_a))
    );
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = call_json!(
        app,
        TestRequest::delete().uri(&uri).insert_header(ctx.bearer(&handler_a))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_members_lifecycle() {
    let ctx = TestContext::new().await;
    let club_a = create_club(ctx.db(), "Alpha").await;
    let club_b = create_club(ctx.db(), "Beta").await;
    let president = create_member(ctx.db(), "pa@x.com", Role::President, Some(club_a.id)).await;
    let outsider = create_member(ctx.db(), "mb@x.com", Role::Member, Some(club_b.id)).await;
    let admin = create_member(ctx.db(), "admin@x.com", Role::SuperAdmin, None).await;
    let app = test::init_service(create_app(ctx.data())).await;

    let (status, created) = call_json!(
        app,
        TestRequest::post()
            .uri("/members")
            .insert_header(ctx.bearer(&president))
            .set_json(json!({
                "name": "New Member",
                "email": "New@X.com",
                "password": "member-password",
                "role": "handler"
            }))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["email"], "new@x.com");
    assert_eq!(created["role"], "HANDLER");
    assert_eq!(created["club_id"], club_a.id);
    assert!(created.get("password_hash").is_none());

    let (status, _) = call_json!(
        app,
        TestRequest::post()
            .uri("/members")
            .insert_header(ctx.bearer(&president))
            .set_json(json!({ "name": "Dup", "email": "new@x.com", "password": "member-password" }))
    );
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = call_json!(
        app,
        TestRequest::post()
            .uri("/members")
            .insert_header(ctx.bearer(&president))
            .set_json(json!({
                "name": "Boss",
                "email": "boss@x.com",
                "password": "member-password",
                "role": "SUPER_ADMIN"
            }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The new account can sign in
    let (status, _) = call_json!(
        app,
        TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({ "email": "new@x.com", "password": "member-password" }))
    );
    assert_eq!(status, StatusCode::OK);

    let member_uri = format!("/members/{}", created["id"]);
    let (status, updated) = call_json!(
        app,
        TestRequest::put()
            .uri(&member_uri)
            .insert_header(ctx.bearer(&president))
            .set_json(json!({ "phone": "555-0101", "role": "VICE_PRESIDENT" }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["phone"], "555-0101");
    assert_eq!(updated["role"], "VICE_PRESIDENT");
    assert_eq!(updated["name"], "New Member");

    let (status, _) = call_json!(
        app,
        TestRequest::put()
            .uri(&member_uri)
            .insert_header(ctx.bearer(&president))
            .set_json(json!({ "club_id": club_b.id }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call_json!(
        app,
        TestRequest::put()
            .uri(&format!("/members/{}", outsider.id))
            .insert_header(ctx.bearer(&president))
            .set_json(json!({ "name": "Renamed" }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call_json!(
        app,
        TestRequest::put()
            .uri(&format!("/members/{}", admin.id))
            .insert_header(ctx.bearer(&president))
            .set_json(json!({ "name": "Demoted" }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, moved) = call_json!(
        app,
        TestRequest::put()
            .uri(&member_uri)
            .insert_header(ctx.bearer(&admin))
            .set_json(json!({ "club_id": club_b.id }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["club_id"], club_b.id);

    let (status, _) = call_json!(
        app,
        TestRequest::delete()
            .uri(&member_uri)
            .insert_header(ctx.bearer(&president))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call_json!(
        app,
        TestRequest::delete()
            .uri(&member_uri)
            .insert_header(ctx.bearer(&admin))
    );
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, members) = call_json!(app, TestRequest::get().uri("/members"));
    assert_eq!(status, StatusCode::OK);
    let emails: Vec<&str> = members
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|m| m["email"].as_str())
        .collect();
    assert!(!emails.contains(&"new@x.com"));
    assert!(emails.contains(&"admin@x.com"));

    let (status, _) = call_json!(
        app,
        TestRequest::delete()
            .uri(&member_uri)
            .insert_header(ctx.bearer(&admin))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Fixture accounts still work with the shared password
    assert!(ctx.state.auth.login("pa@x.com", PASSWORD).await.is_ok());
}
