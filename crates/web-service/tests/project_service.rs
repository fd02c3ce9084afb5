//! 项目服务集成测试

mod common;

use common::{fixture, grant, stored_project, FixtureBuilder, TEST_PAGINATION};
use web_service::events::DomainEvent;
use web_service::models::err::{AppError, FieldError};
use web_service::models::projects::NewProject;
use web_service::services::ProjectServiceTrait;

fn new_project(name: &str, organization_id: &str) -> NewProject {
    NewProject {
        id: None,
        name: name.to_string(),
        organization_id: organization_id.to_string(),
    }
}

#[tokio::test]
async fn create_persists_stamps_and_publishes_after_save() {
    let fx = fixture();

    let before = chrono::Utc::now();
    let project = fx.service.create(Some(new_project("Alpha", "org1"))).await.unwrap();

    assert_eq!(project.name, "Alpha");
    assert_eq!(project.organization_id, "org1");
    assert!(!project.id.is_empty());
    assert!(project.created_at >= before);

    assert_eq!(fx.projects.all(), vec![project.clone()]);
    assert_eq!(fx.events.events(), vec![DomainEvent::ProjectCreated(project)]);
    assert_eq!(fx.journal.entries(), vec!["save:Alpha", "publish:Alpha"]);
}

#[tokio::test]
async fn second_create_with_same_name_is_duplicate() {
    let fx = fixture();

    fx.service.create(Some(new_project("Alpha", "org1"))).await.unwrap();
    let err = fx.service.create(Some(new_project("Alpha", "org1"))).await.unwrap_err();

    assert!(matches!(
        err,
        AppError::DuplicateName { ref name, ref organization_id } if name == "Alpha" && organization_id == "org1"
    ));
    assert_eq!(fx.projects.all().len(), 1);
    assert_eq!(fx.events.events().len(), 1);
}

#[tokio::test]
async fn duplicate_is_detected_regardless_of_other_fields() {
    let fx = FixtureBuilder::default()
        .projects(vec![stored_project("existing", "Alpha", "org1", 0)])
        .build();

    let mut input = new_project("Alpha", "org1");
    input.id = Some("another-id".to_string());

    let err = fx.service.create(Some(input)).await.unwrap_err();
    assert!(matches!(err, AppError::DuplicateName { .. }));
    assert!(fx.journal.entries().is_empty());
}

#[tokio::test]
async fn same_name_in_another_organization_is_allowed() {
    let fx = fixture();

    fx.service.create(Some(new_project("Alpha", "org1"))).await.unwrap();
    fx.service.create(Some(new_project("Alpha", "org2"))).await.unwrap();

    assert_eq!(fx.projects.all().len(), 2);
}

#[tokio::test]
async fn store_constraint_violation_maps_to_duplicate_name() {
    let fx = FixtureBuilder::default()
        .blind_precheck()
        .projects(vec![stored_project("existing", "Alpha", "org1", 0)])
        .build();

    let err = fx.service.create(Some(new_project("Alpha", "org1"))).await.unwrap_err();

    assert!(matches!(err, AppError::DuplicateName { .. }));
    assert!(fx.events.events().is_empty());
}

#[tokio::test]
async fn names_stay_unique_per_organization_after_many_creates() {
    let fx = FixtureBuilder::default().blind_precheck().build();

    for name in ["Alpha", "Beta", "Alpha", "Gamma", "Beta", "Alpha"] {
        for org in ["org1", "org2"] {
            let _ = fx.service.create(Some(new_project(name, org))).await;
        }
    }

    let mut pairs: Vec<_> = fx
        .projects
        .all()
        .into_iter()
        .map(|p| (p.organization_id, p.name))
        .collect();
    let total = pairs.len();
    pairs.sort();
    pairs.dedup();

    assert_eq!(total, 6);
    assert_eq!(pairs.len(), total);
    assert_eq!(fx.events.events().len(), 6);
}

#[tokio::test]
async fn create_none_is_invalid_argument_without_writes() {
    let fx = fixture();

    let err = fx.service.create(None).await.unwrap_err();

    assert!(matches!(err, AppError::InvalidArgument(_)));
    assert!(fx.projects.all().is_empty());
    assert!(fx.journal.entries().is_empty());
}

#[tokio::test]
async fn validation_failure_reports_all_fields() {
    let fx = fixture();

    let err = fx.service.create(Some(new_project(" ", ""))).await.unwrap_err();

    match err {
        AppError::ValidationFailed(errors) => assert_eq!(
            errors,
            vec![
                FieldError::new("name", "Project name is required."),
                FieldError::new("organization_id", "Organization id is required."),
            ]
        ),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(fx.projects.all().is_empty());
}

#[tokio::test]
async fn inactive_or_missing_organization_is_rejected_without_writes() {
    let fx = fixture();

    for org in ["dormant", "nowhere"] {
        let err = fx.service.create(Some(new_project("Alpha", org))).await.unwrap_err();
        assert!(matches!(err, AppError::OrganizationInactive { ref organization_id } if organization_id == org));
    }

    assert!(fx.projects.all().is_empty());
    assert!(fx.events.events().is_empty());
}

#[tokio::test]
async fn organization_is_checked_before_uniqueness() {
    let fx = FixtureBuilder::default()
        .projects(vec![stored_project("existing", "Alpha", "dormant", 0)])
        .build();

    let err = fx.service.create(Some(new_project("Alpha", "dormant"))).await.unwrap_err();
    assert!(matches!(err, AppError::OrganizationInactive { .. }));
}

#[tokio::test]
async fn supplied_id_is_kept_and_whitespace_trimmed() {
    let fx = fixture();

    let project = fx
        .service
        .create(Some(NewProject {
            id: Some("proj-42".to_string()),
            name: "  Alpha ".to_string(),
            organization_id: " org1".to_string(),
        }))
        .await
        .unwrap();

    assert_eq!(project.id, "proj-42");
    assert_eq!(project.name, "Alpha");
    assert_eq!(project.organization_id, "org1");
}

#[tokio::test]
async fn length_limits_apply_to_trimmed_values() {
    let fx = fixture();
    let name = format!("{}  ", "x".repeat(99));

    let project = fx.service.create(Some(new_project(&name, " org1 "))).await.unwrap();

    assert_eq!(project.name, "x".repeat(99));
    assert_eq!(fx.projects.all().len(), 1);
}

#[tokio::test]
async fn store_failure_propagates_and_publishes_nothing() {
    let fx = FixtureBuilder::default().failing_writes().build();

    let err = fx.service.create(Some(new_project("Alpha", "org1"))).await.unwrap_err();

    assert!(matches!(err, AppError::RepositoryError(_)));
    assert!(fx.events.events().is_empty());
}

#[tokio::test]
async fn get_by_id_returns_project_or_none() {
    let fx = fixture();
    let created = fx.service.create(Some(new_project("Alpha", "org1"))).await.unwrap();

    assert_eq!(fx.service.get_by_id(&created.id).await.unwrap(), Some(created));
    assert_eq!(fx.service.get_by_id("unknown").await.unwrap(), None);
}

#[tokio::test]
async fn get_by_id_rejects_blank_id() {
    let fx = fixture();

    assert!(matches!(fx.service.get_by_id("").await, Err(AppError::InvalidArgument(_))));
    assert!(matches!(fx.service.get_by_id("   ").await, Err(AppError::InvalidArgument(_))));
}

#[tokio::test]
async fn access_requires_active_grant_for_exact_pair() {
    let fx = FixtureBuilder::default()
        .grants(vec![grant("p1", "u1", true), grant("p1", "u2", false), grant("p2", "u3", true)])
        .build();

    assert!(fx.service.check_project_user_access("p1", "u1").await.unwrap());
    assert!(!fx.service.check_project_user_access("p1", "u2").await.unwrap());
    assert!(!fx.service.check_project_user_access("p1", "u3").await.unwrap());
    assert!(!fx.service.check_project_user_access("p2", "u1").await.unwrap());
    assert!(!fx.service.check_project_user_access("p9", "u9").await.unwrap());
}

#[tokio::test]
async fn access_check_rejects_blank_ids() {
    let fx = fixture();

    assert!(matches!(
        fx.service.check_project_user_access("", "u1").await,
        Err(AppError::InvalidArgument(_))
    ));
    assert!(matches!(
        fx.service.check_project_user_access("p1", " ").await,
        Err(AppError::InvalidArgument(_))
    ));
}

fn seeded() -> common::Fixture {
    let projects = (1..=25)
        .map(|i| stored_project(&format!("p{i:02}"), &format!("Project {i:02}"), "org1", i))
        .chain([stored_project("other", "Elsewhere", "org2", 0)])
        .collect();
    FixtureBuilder::default().projects(projects).build()
}

#[tokio::test]
async fn search_normalizes_zero_page_and_limit_to_defaults() {
    let fx = seeded();

    let page = fx.service.search("org1", Some(0), Some(0), None, None).await.unwrap();

    assert_eq!(page.page, 1);
    assert_eq!(page.limit, TEST_PAGINATION.default_page_size);
    assert_eq!(page.items.len(), 10);
    // 默认按创建时间倒序
    assert_eq!(page.items[0].id, "p25");
    assert!(page.items.iter().all(|p| p.organization_id == "org1"));
}

#[tokio::test]
async fn search_clamps_limit_to_max() {
    let fx = seeded();

    let page = fx.service.search("org1", Some(1), Some(u32::MAX), None, None).await.unwrap();

    assert_eq!(page.limit, TEST_PAGINATION.max_page_size);
    assert_eq!(page.items.len(), 25);
}

#[tokio::test]
async fn search_pages_and_sorts() {
    let fx = seeded();

    let page = fx
        .service
        .search("org1", Some(3), Some(10), Some("name"), Some("asc"))
        .await
        .unwrap();

    let ids: Vec<_> = page.items.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p21", "p22", "p23", "p24", "p25"]);
}

#[tokio::test]
async fn search_past_the_end_or_unknown_org_is_empty() {
    let fx = seeded();

    assert!(fx.service.search("org1", Some(99), None, None, None).await.unwrap().items.is_empty());
    assert!(fx.service.search("nobody", None, None, None, None).await.unwrap().items.is_empty());
}

#[tokio::test]
async fn search_ignores_invalid_sort_inputs() {
    let fx = seeded();

    let page = fx
        .service
        .search("org1", None, Some(1), Some("drop table"), Some("up"))
        .await
        .unwrap();

    assert_eq!(page.items[0].id, "p25");
}
