use chrono::{Duration, TimeZone, Utc};
use member_registry::domain::{MemberRepositoryError, NewMember};
use test_context::test_context;

use crate::helpers::{get_test_member, TestDb};

#[test_context(TestDb)]
#[tokio::test]
#[ignore = "requires a running PostgreSQL server"]
async fn should_assign_identifier_and_keep_fields(db: &mut TestDb) {
    let member = get_test_member();

    let created = db
        .repository
        .new_member(member.clone())
        .await
        .expect("Failed to create member");

    assert!(created.id.value_of() > 0);
    assert_eq!(created.details(), member);
    assert!(created.created_at <= created.updated_at);
}

#[test_context(TestDb)]
#[tokio::test]
#[ignore = "requires a running PostgreSQL server"]
async fn should_find_created_member_with_lookups(db: &mut TestDb) {
    let created = db
        .repository
        .new_member(get_test_member())
        .await
        .expect("Failed to create member");

    let found = db
        .repository
        .find_by_id(&created.id.to_string())
        .await
        .expect("Member should be found");

    assert_eq!(found.full_name, "emoshu company");
    assert_eq!(found.details(), created.details());
    assert_eq!(found.created_at, created.created_at);

    let employment_status =
        found.employment_status.as_ref().expect("Missing employment status");
    assert_eq!(employment_status.id, 1);
    assert_eq!(employment_status.name, "full-time");

    let status = found.status.as_ref().expect("Missing status");
    assert_eq!(status.id, 1);
    assert_eq!(status.name, "active");

    let again = db
        .repository
        .find_by_id(&created.id.to_string())
        .await
        .expect("Member should still be found");
    assert_eq!(again, found);
}

#[test_context(TestDb)]
#[tokio::test]
#[ignore = "requires a running PostgreSQL server"]
async fn should_keep_end_date(db: &mut TestDb) {
    let start_date = Utc.with_ymd_and_hms(2018, 4, 1, 0, 0, 0).unwrap();
    let member = NewMember {
        no: "2".to_string(),
        start_date,
        end_date: Some(start_date + Duration::days(365)),
        employment_status_id: 2,
        status_id: 2,
        ..get_test_member()
    };

    let created = db.repository.new_member(member.clone()).await.unwrap();
    let found = db
        .repository
        .find_by_id(&created.id.to_string())
        .await
        .unwrap();

    assert_eq!(found.details(), member);
    assert_eq!(found.status.map(|s| s.name), Some("retired".to_string()));
}

#[test_context(TestDb)]
#[tokio::test]
#[ignore = "requires a running PostgreSQL server"]
async fn should_return_not_found_for_unknown_id(db: &mut TestDb) {
    assert_eq!(
        db.repository.find_by_id("999").await,
        Err(MemberRepositoryError::NotFound("999".to_string()))
    );
}

#[test_context(TestDb)]
#[tokio::test]
#[ignore = "requires a running PostgreSQL server"]
async fn should_fail_for_unknown_lookup(db: &mut TestDb) {
    let member = NewMember {
        status_id: 42,
        ..get_test_member()
    };

    let result = db.repository.new_member(member).await;

    assert!(
        matches!(result, Err(MemberRepositoryError::PersistenceFailure(_))),
        "Foreign key violation should be a persistence failure"
    );
}
