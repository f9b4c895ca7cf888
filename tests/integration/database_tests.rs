//! Storage layer tests

use crate::common::fixtures::{create_club, create_member};
use crate::common::{EventFactory, TestDatabase};
use campus_clubs::ClubError;
use campus_clubs::core::models::{NewMember, NewRegistration, Role};
use chrono::{Duration, Utc};

fn attempt(email: &str) -> NewRegistration {
    NewRegistration {
        name: "Guest".to_string(),
        email: email.to_string(),
        phone: None,
    }
}

#[tokio::test]
async fn test_health_check() {
    let test_db = TestDatabase::new().await;
    assert!(test_db.db().health_check().await.is_ok());
}

#[tokio::test]
async fn test_member_counts_are_derived() {
    let test_db = TestDatabase::new().await;
    let db = test_db.db();

    let chess = create_club(db, "Chess").await;
    let drama = create_club(db, "Drama").await;
    create_member(db, "a@x.com", Role::President, Some(chess.id)).await;
    create_member(db, "b@x.com", Role::Member, Some(chess.id)).await;
    let leaving = create_member(db, "c@x.com", Role::Member, Some(chess.id)).await;

    assert!(db.delete_member(leaving.id).await.unwrap());

    let clubs = db.list_clubs().await.unwrap();
    let count = |club_id| {
        clubs
            .iter()
            .find(|c| c.club.id == club_id)
            .map(|c| c.members_count)
            .unwrap()
    };
    assert_eq!(count(chess.id), 2);
    assert_eq!(count(drama.id), 0);
}

#[tokio::test]
async fn test_club_detail() {
    let test_db = TestDatabase::new().await;
    let db = test_db.db();

    let club = create_club(db, "Robotics").await;
    create_member(db, "lead@x.com", Role::President, Some(club.id)).await;
    EventFactory::new(club.id).create(db).await;
    EventFactory::new(club.id).name("Demo Day").create(db).await;

    let detail = db.get_club_detail(club.id).await.unwrap().unwrap();
    assert_eq!(detail.club.club_name, "Robotics");
    assert_eq!(detail.members_count, 1);
    assert_eq!(detail.members.len(), 1);
    assert_eq!(detail.members[0].email, "lead@x.com");
    assert_eq!(detail.members[0].role, Role::President);
    assert_eq!(detail.event_count, 2);

    assert!(db.get_club_detail(club.id + 100).await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_member_email_conflicts() {
    let test_db = TestDatabase::new().await;
    let db = test_db.db();
    let club = create_club(db, "Chess").await;
    create_member(db, "dup@x.com", Role::Member, Some(club.id)).await;

    let user = db.find_user_by_email("dup@x.com").await.unwrap().unwrap();

    let err = db
        .create_member(NewMember {
            name: "Again".to_string(),
            email: "dup@x.com".to_string(),
            phone: None,
            role: Role::Member,
            club_id: Some(club.id),
            password_hash: user.password_hash.clone(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClubError::Conflict(_)));
}

#[tokio::test]
async fn test_event_detail_seats_left() {
    let test_db = TestDatabase::new().await;
    let db = test_db.db();
    let club = create_club(db, "Chess").await;
    let event = EventFactory::new(club.id).capacity(3).create(db).await;

    db.register_for_event(event.id, &attempt("a@x.com")).await.unwrap();

    let detail = db.get_event_detail(event.id).await.unwrap().unwrap();
    assert_eq!(detail.attendees, 1);
    assert_eq!(detail.seats_left, Some(2));

    let open = EventFactory::new(club.id).create(db).await;
    let detail = db.get_event_detail(open.id).await.unwrap().unwrap();
    assert_eq!(detail.seats_left, None);
}

#[tokio::test]
async fn test_delete_event_removes_registrations() {
    let test_db = TestDatabase::new().await;
    let db = test_db.db();
    let club = create_club(db, "Chess").await;
    let event = EventFactory::new(club.id).create(db).await;
    db.register_for_event(event.id, &attempt("a@x.com")).await.unwrap();

    assert!(db.delete_event(event.id).await.unwrap());
    assert!(db.find_event_by_id(event.id).await.unwrap().is_none());
    assert_eq!(db.count_registrations(event.id).await.unwrap(), 0);
    assert!(!db.delete_event(event.id).await.unwrap());
}

#[tokio::test]
async fn test_update_event_persists_changes() {
    let test_db = TestDatabase::new().await;
    let db = test_db.db();
    let club = create_club(db, "Chess").await;
    let mut event = EventFactory::new(club.id).create(db).await;

    event.venue = "Main Hall".to_string();
    event.capacity = Some(50);
    let updated = db.update_event(&event).await.unwrap();
    assert_eq!(updated.venue, "Main Hall");
    assert_eq!(updated.capacity, Some(50));
    assert!(updated.updated_at >= event.updated_at);

    event.id += 100;
    assert!(matches!(
        db.update_event(&event).await.unwrap_err(),
        ClubError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_registrations_newest_first() {
    let test_db = TestDatabase::new().await;
    let db = test_db.db();
    let club = create_club(db, "Chess").await;
    let event = EventFactory::new(club.id).create(db).await;

    for email in ["a@x.com", "b@x.com", "c@x.com"] {
        db.register_for_event(event.id, &attempt(email)).await.unwrap();
    }

    let emails: Vec<String> = db
        .list_registrations(event.id)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.email)
        .collect();
    assert_eq!(emails, ["c@x.com", "b@x.com", "a@x.com"]);
}

#[tokio::test]
async fn test_gallery_embeds_club() {
    let test_db = TestDatabase::new().await;
    let db = test_db.db();
    let chess = create_club(db, "Chess").await;
    let drama = create_club(db, "Drama").await;

    db.add_gallery_image(chess.id, "https://img/1.png".to_string(), None)
        .await
        .unwrap();
    let image = db
        .add_gallery_image(drama.id, "https://img/2.png".to_string(), Some("Opening".to_string()))
        .await
        .unwrap();

    let all = db.list_gallery(None).await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|entry| entry.club.is_some()));

    let drama_only = db.list_gallery(Some(drama.id)).await.unwrap();
    assert_eq!(drama_only.len(), 1);
    assert_eq!(drama_only[0].image.id, image.id);
    assert_eq!(
        drama_only[0].club.as_ref().map(|c| c.club_name.as_str()),
        Some("Drama")
    );

    assert!(db.delete_gallery_image(image.id).await.unwrap());
    assert!(db.find_gallery_image(image.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_refresh_token_is_single_use() {
    let test_db = TestDatabase::new().await;
    let db = test_db.db();
    let user = create_member(db, "admin@x.com", Role::SuperAdmin, None).await;

    let expires = Utc::now() + Duration::days(1);
    db.store_refresh_token("jti-1", user.id, expires).await.unwrap();

    assert!(!db.consume_refresh_token("jti-1", user.id + 1).await.unwrap());
    assert!(db.consume_refresh_token("jti-1", user.id).await.unwrap());
    assert!(!db.consume_refresh_token("jti-1", user.id).await.unwrap());
    assert!(!db.consume_refresh_token("unknown", user.id).await.unwrap());
}

#[tokio::test]
async fn test_revoke_and_purge_refresh_tokens() {
    let test_db = TestDatabase::new().await;
    let db = test_db.db();
    let user = create_member(db, "admin@x.com", Role::SuperAdmin, None).await;

    let later = Utc::now() + Duration::days(1);
    db.store_refresh_token("live-1", user.id, later).await.unwrap();
    db.store_refresh_token("live-2", user.id, later).await.unwrap();
    db.store_refresh_token("stale", user.id, Utc::now() - Duration::days(1))
        .await
        .unwrap();

    assert_eq!(db.purge_expired_refresh_tokens().await.unwrap(), 1);
    assert_eq!(db.revoke_user_refresh_tokens(user.id).await.unwrap(), 2);
    assert!(!db.consume_refresh_token("live-1", user.id).await.unwrap());
}

#[tokio::test]
async fn test_rotate_refresh_token() {
    let test_db = TestDatabase::new().await;
    let db = test_db.db();
    let user = create_member(db, "admin@x.com", Role::SuperAdmin, None).await;
    let later = Utc::now() + Duration::days(1);

    db.store_refresh_token("first", user.id, later).await.unwrap();
    assert!(db.rotate_refresh_token("first", user.id, "second", later).await.unwrap());

    // A used token stores nothing
    assert!(!db.rotate_refresh_token("first", user.id, "third", later).await.unwrap());
    assert!(!db.consume_refresh_token("third", user.id).await.unwrap());
    assert!(db.consume_refresh_token("second", user.id).await.unwrap());
}

#[tokio::test]
async fn test_failed_rotation_keeps_presented_token() {
    let test_db = TestDatabase::new().await;
    let db = test_db.db();
    let user = create_member(db, "admin@x.com", Role::SuperAdmin, None).await;
    let later = Utc::now() + Duration::days(1);

    db.store_refresh_token("current", user.id, later).await.unwrap();
    db.store_refresh_token("taken", user.id, later).await.unwrap();

    // The new id collides, so the whole rotation rolls back
    assert!(db.rotate_refresh_token("current", user.id, "taken", later).await.is_err());
    assert!(db.consume_refresh_token("current", user.id).await.unwrap());
}

#[tokio::test]
async fn test_password_change_revokes_sessions_together() {
    let test_db = TestDatabase::new().await;
    let db = test_db.db();
    let user = create_member(db, "admin@x.com", Role::SuperAdmin, None).await;
    let later = Utc::now() + Duration::days(1);

    db.store_refresh_token("a", user.id, later).await.unwrap();
    db.store_refresh_token("b", user.id, later).await.unwrap();

    assert_eq!(
        db.change_password_revoking_sessions(user.id, "new-hash").await.unwrap(),
        2
    );
    assert!(!db.consume_refresh_token("a", user.id).await.unwrap());
    let stored = db.find_user_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.password_hash, "new-hash");

    assert!(matches!(
        db.change_password_revoking_sessions(user.id + 100, "x").await,
        Err(ClubError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_failed_member_update_keeps_sessions() {
    let test_db = TestDatabase::new().await;
    let db = test_db.db();
    let club = create_club(db, "Chess").await;
    let mut ada = create_member(db, "ada@x.com", Role::Member, Some(club.id)).await;
    create_member(db, "bob@x.com", Role::Member, Some(club.id)).await;

    let later = Utc::now() + Duration::days(1);
    db.store_refresh_token("ada-session", ada.id, later).await.unwrap();

    ada.email = "bob@x.com".to_string();
    ada.password_hash = "new-hash".to_string();
    assert!(matches!(
        db.update_member_revoking_sessions(&ada).await,
        Err(ClubError::Conflict(_))
    ));
    assert!(db.consume_refresh_token("ada-session", ada.id).await.unwrap());

    ada.email = "ada@x.com".to_string();
    let saved = db.update_member_revoking_sessions(&ada).await.unwrap();
    assert_eq!(saved.password_hash, "new-hash");
}
