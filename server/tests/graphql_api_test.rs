//! Wire-shape tests against the executable schema.

use async_graphql::{Request, Variables};
use serde_json::{Value, json};

use server::graphql::{AppSchema, build_schema};
use server::test_helpers;

const CREATE_ORGANIZATION: &str = r#"
mutation CreateOrganization($input: CreateOrganizationInput!) {
  createOrganization(input: $input) {
    ok { createdOrganization { cleanId name } }
    error { message }
  }
}
"#;

const CREATE_PROJECT: &str = r#"
mutation CreateProject($input: CreateProjectInput!) {
  createProject(input: $input) {
    ok {
      createdProject { cleanId name }
      createdTargets { cleanId name }
    }
    error { message }
  }
}
"#;

const UPDATE_PROJECT_SLUG: &str = r#"
mutation UpdateProjectSlug($input: UpdateProjectSlugInput!) {
  updateProjectSlug(input: $input) {
    ok {
      selector { organization project }
      project { name cleanId }
    }
    error { message }
  }
}
"#;

const DELETE_PROJECT: &str = r#"
mutation DeleteProject($input: DeleteProjectInput!) {
  deleteProject(input: $input) {
    ok { deletedProject { cleanId } }
    error { message }
  }
}
"#;

const PROJECTS: &str = r#"
query Projects($organization: String!) {
  projects(organization: $organization) { cleanId name }
}
"#;

const AUDIT_LOGS: &str = r#"
query AuditLogs($organization: String!) {
  auditLogs(organization: $organization) {
    __typename
    ... on ProjectCreatedAuditLog { eventTime projectName projectType }
    ... on ProjectDeletedAuditLog { eventTime projectName }
  }
}
"#;

async fn execute(schema: &AppSchema, query: &str, variables: Value) -> Value {
    let request = Request::new(query).variables(Variables::from_json(variables));
    let response = schema.execute(request).await;
    assert!(
        response.errors.is_empty(),
        "unexpected GraphQL errors: {:?}",
        response.errors
    );
    response.data.into_json().unwrap()
}

async fn schema_with_organization(slug: &str) -> AppSchema {
    let pool = test_helpers::create_test_pool().await.unwrap();
    let schema = build_schema(pool);
    let data = execute(
        &schema,
        CREATE_ORGANIZATION,
        json!({"input": {"slug": slug}}),
    )
    .await;
    assert_eq!(
        data["createOrganization"]["ok"]["createdOrganization"]["cleanId"],
        slug
    );
    schema
}

async fn create_single_project(schema: &AppSchema, organization: &str, name: &str) -> Value {
    execute(
        schema,
        CREATE_PROJECT,
        json!({"input": {"organization": organization, "name": name, "type": "SINGLE"}}),
    )
    .await
}

#[tokio::test]
async fn create_project_returns_the_fixed_target_set() {
    let schema = schema_with_organization("acme").await;

    let data = create_single_project(&schema, "acme", "foo").await;

    assert_eq!(
        data,
        json!({
            "createProject": {
                "ok": {
                    "createdProject": {"cleanId": "foo", "name": "foo"},
                    "createdTargets": [
                        {"cleanId": "development", "name": "development"},
                        {"cleanId": "staging", "name": "staging"},
                        {"cleanId": "production", "name": "production"},
                    ],
                },
                "error": null,
            }
        })
    );
}

#[tokio::test]
async fn update_project_slug_returns_the_ok_shape() {
    let schema = schema_with_organization("acme").await;
    create_single_project(&schema, "acme", "foo").await;

    let data = execute(
        &schema,
        UPDATE_PROJECT_SLUG,
        json!({"input": {"organization": "acme", "project": "foo", "slug": "bar"}}),
    )
    .await;

    assert_eq!(
        data,
        json!({
            "updateProjectSlug": {
                "ok": {
                    "selector": {"organization": "acme", "project": "bar"},
                    "project": {"name": "bar", "cleanId": "bar"},
                },
                "error": null,
            }
        })
    );
}

#[tokio::test]
async fn update_project_slug_conflict_returns_the_error_shape() {
    let schema = schema_with_organization("acme").await;
    create_single_project(&schema, "acme", "foo").await;
    create_single_project(&schema, "acme", "bar").await;

    let data = execute(
        &schema,
        UPDATE_PROJECT_SLUG,
        json!({"input": {"organization": "acme", "project": "foo", "slug": "bar"}}),
    )
    .await;

    assert_eq!(
        data,
        json!({
            "updateProjectSlug": {
                "ok": null,
                "error": {"message": "Project slug is already taken"},
            }
        })
    );

    // Both projects still listed with their original identities.
    let data = execute(&schema, PROJECTS, json!({"organization": "acme"})).await;
    assert_eq!(
        data,
        json!({
            "projects": [
                {"cleanId": "bar", "name": "bar"},
                {"cleanId": "foo", "name": "foo"},
            ]
        })
    );
}

#[tokio::test]
async fn audit_logs_expose_typed_entries_newest_first() {
    let schema = schema_with_organization("acme").await;
    create_single_project(&schema, "acme", "foo").await;
    execute(
        &schema,
        DELETE_PROJECT,
        json!({"input": {"organization": "acme", "project": "foo"}}),
    )
    .await;

    let data = execute(&schema, AUDIT_LOGS, json!({"organization": "acme"})).await;
    let entries = data["auditLogs"].as_array().unwrap();
    assert_eq!(entries.len(), 2);

    assert_eq!(entries[0]["__typename"], "ProjectDeletedAuditLog");
    assert_eq!(entries[0]["projectName"], "foo");

    assert_eq!(entries[1]["__typename"], "ProjectCreatedAuditLog");
    assert_eq!(entries[1]["projectName"], "foo");
    assert_eq!(entries[1]["projectType"], "SINGLE");

    for entry in entries {
        let event_time = entry["eventTime"].as_str().unwrap();
        assert!(
            chrono::DateTime::parse_from_rfc3339(event_time).is_ok(),
            "eventTime should be RFC 3339: {event_time}"
        );
        assert!(event_time.ends_with('Z'));
    }
}
