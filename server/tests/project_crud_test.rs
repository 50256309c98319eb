//! CRUD behavior for projects, their slugs and their default targets.

use sqlx::SqlitePool;

use server::organization::models::OrganizationRecord;
use server::organization::mutations::{CreateOrganizationInput, create_organization};
use server::project::db::{fetch_project_by_slug, fetch_projects_for_organization};
use server::project::models::{ProjectRecord, ProjectType};
use server::project::mutations::{
    CreateProjectInput, DeleteProjectInput, UpdateProjectSlugInput, create_project,
    delete_project, update_project_slug,
};
use server::target::db::fetch_targets_for_project;
use server::test_helpers;

async fn seed_organization(pool: &SqlitePool, slug: &str) -> OrganizationRecord {
    let result = create_organization(
        pool,
        CreateOrganizationInput {
            slug: slug.to_string(),
        },
    )
    .await
    .unwrap();

    result
        .ok
        .expect("organization should be created")
        .created_organization
        .0
}

async fn seed_project(pool: &SqlitePool, organization: &str, name: &str) -> ProjectRecord {
    let result = create_project(
        pool,
        CreateProjectInput {
            organization: organization.to_string(),
            name: name.to_string(),
            project_type: ProjectType::Single,
        },
    )
    .await
    .unwrap();

    result
        .ok
        .expect("project should be created")
        .created_project
        .0
}

async fn rename(
    pool: &SqlitePool,
    organization: &str,
    project: &str,
    slug: &str,
) -> server::project::mutations::UpdateProjectSlugResult {
    update_project_slug(
        pool,
        UpdateProjectSlugInput {
            organization: organization.to_string(),
            project: project.to_string(),
            slug: slug.to_string(),
        },
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn creating_a_project_provisions_default_targets() {
    let pool = test_helpers::create_test_pool().await.unwrap();
    seed_organization(&pool, "acme").await;

    let result = create_project(
        &pool,
        CreateProjectInput {
            organization: "acme".to_string(),
            name: "graph-api".to_string(),
            project_type: ProjectType::Single,
        },
    )
    .await
    .unwrap();

    assert!(result.error.is_none());
    let ok = result.ok.expect("project should be created");
    assert_eq!(ok.created_targets.len(), 3);

    let mut slugs: Vec<&str> = ok
        .created_targets
        .iter()
        .map(|target| target.0.slug.as_str())
        .collect();
    slugs.sort_unstable();
    assert_eq!(slugs, ["development", "production", "staging"]);

    for target in &ok.created_targets {
        assert_eq!(target.0.slug, target.0.name);
    }

    // The stored rows match what the mutation returned.
    let stored = fetch_targets_for_project(&pool, &ok.created_project.0.id)
        .await
        .unwrap();
    assert_eq!(stored.len(), 3);
}

#[tokio::test]
async fn project_slugs_are_derived_from_display_names() {
    let pool = test_helpers::create_test_pool().await.unwrap();
    seed_organization(&pool, "acme").await;

    let project = seed_project(&pool, "acme", "My GraphQL API").await;

    assert_eq!(project.slug, "my-graphql-api");
    assert_eq!(project.name, "My GraphQL API");
}

#[tokio::test]
async fn creating_a_project_with_a_taken_slug_fails() {
    let pool = test_helpers::create_test_pool().await.unwrap();
    seed_organization(&pool, "acme").await;
    seed_project(&pool, "acme", "foo").await;

    let result = create_project(
        &pool,
        CreateProjectInput {
            organization: "acme".to_string(),
            name: "foo".to_string(),
            project_type: ProjectType::Single,
        },
    )
    .await
    .unwrap();

    assert!(result.ok.is_none());
    assert_eq!(
        result.error.unwrap().message,
        "Project slug is already taken"
    );
}

#[tokio::test]
async fn renaming_a_project_changes_its_name() {
    let pool = test_helpers::create_test_pool().await.unwrap();
    seed_organization(&pool, "acme").await;
    seed_project(&pool, "acme", "foo").await;

    let result = rename(&pool, "acme", "foo", "bar").await;

    assert!(result.error.is_none());
    let ok = result.ok.expect("rename should succeed");
    assert_eq!(ok.project.0.slug, "bar");
    assert_eq!(ok.project.0.name, "bar");
    assert_eq!(ok.selector.project, "bar");
    assert_eq!(ok.selector.organization, "acme");
}

#[tokio::test]
async fn renaming_to_the_current_slug_is_a_noop() {
    let pool = test_helpers::create_test_pool().await.unwrap();
    let organization = seed_organization(&pool, "acme").await;
    let project = seed_project(&pool, "acme", "foo").await;

    let result = rename(&pool, "acme", "foo", "foo").await;

    assert!(result.error.is_none());
    let ok = result.ok.expect("self-rename should succeed");
    assert_eq!(ok.project.0.slug, "foo");
    assert_eq!(ok.project.0.name, "foo");
    assert_eq!(ok.selector.project, "foo");

    let stored = fetch_project_by_slug(&pool, &organization.id, "foo")
        .await
        .unwrap()
        .expect("project should still exist");
    assert_eq!(stored.id, project.id);
    assert_eq!(stored.name, "foo");
}

#[tokio::test]
async fn renaming_to_a_taken_slug_fails() {
    let pool = test_helpers::create_test_pool().await.unwrap();
    let organization = seed_organization(&pool, "acme").await;
    let foo = seed_project(&pool, "acme", "foo").await;
    let bar = seed_project(&pool, "acme", "bar").await;

    let result = rename(&pool, "acme", "foo", "bar").await;

    assert!(result.ok.is_none());
    assert_eq!(
        result.error.unwrap().message,
        "Project slug is already taken"
    );

    // Neither project changed.
    let stored = fetch_projects_for_organization(&pool, &organization.id)
        .await
        .unwrap();
    assert_eq!(stored.len(), 2);
    for record in stored {
        let original = if record.id == foo.id { &foo } else { &bar };
        assert_eq!(record.slug, original.slug);
        assert_eq!(record.name, original.name);
    }
}

#[tokio::test]
async fn renaming_to_a_slug_taken_in_another_organization_succeeds() {
    let pool = test_helpers::create_test_pool().await.unwrap();
    seed_organization(&pool, "acme").await;
    seed_organization(&pool, "umbrella").await;
    seed_project(&pool, "acme", "foo").await;
    seed_project(&pool, "umbrella", "shared").await;

    let result = rename(&pool, "acme", "foo", "shared").await;

    assert!(result.error.is_none());
    let ok = result.ok.expect("cross-organization slugs never conflict");
    assert_eq!(ok.project.0.slug, "shared");
    assert_eq!(ok.project.0.name, "shared");
}

#[tokio::test]
async fn renaming_to_a_reserved_slug_fails() {
    let pool = test_helpers::create_test_pool().await.unwrap();
    let organization = seed_organization(&pool, "acme").await;
    let project = seed_project(&pool, "acme", "foo").await;

    for reserved in ["view", "new"] {
        let result = rename(&pool, "acme", "foo", reserved).await;

        assert!(result.ok.is_none(), "{reserved} must be rejected");
        assert_eq!(result.error.unwrap().message, "Slug is reserved");
    }

    let stored = fetch_project_by_slug(&pool, &organization.id, "foo")
        .await
        .unwrap()
        .expect("project should be unchanged");
    assert_eq!(stored.id, project.id);
    assert_eq!(stored.name, "foo");
}

#[tokio::test]
async fn deleting_a_project_removes_its_targets() {
    let pool = test_helpers::create_test_pool().await.unwrap();
    seed_organization(&pool, "acme").await;
    let project = seed_project(&pool, "acme", "foo").await;

    let result = delete_project(
        &pool,
        DeleteProjectInput {
            organization: "acme".to_string(),
            project: "foo".to_string(),
        },
    )
    .await
    .unwrap();

    assert!(result.error.is_none());
    assert_eq!(result.ok.unwrap().deleted_project.0.id, project.id);

    let targets = fetch_targets_for_project(&pool, &project.id).await.unwrap();
    assert!(targets.is_empty());
}
