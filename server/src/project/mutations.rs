use async_graphql::{InputObject, SimpleObject};
use metrics::counter;
use sqlx::SqlitePool;

use super::db::{fetch_project_by_slug, project_slug_taken};
use super::models::{ProjectNode, ProjectRecord, ProjectSelector, ProjectType};
use crate::audit_log::db::record_event;
use crate::audit_log::models::{AuditLogEvent, ProjectCreatedPayload, ProjectDeletedPayload};
use crate::db::is_unique_violation;
use crate::graphql::errors::{MutationError, bad_user_input, internal_error};
use crate::organization::db::fetch_organization_by_slug;
use crate::organization::models::OrganizationRecord;
use crate::target::db::provision_default_targets;
use crate::target::models::{TargetNode, TargetRecord};
use crate::validation::slug::{
    RESERVED_SLUG_MESSAGE, derive_slug, is_reserved_slug, validate_slug,
};

pub const PROJECT_SLUG_TAKEN_MESSAGE: &str = "Project slug is already taken";

/// Candidate-slug checks, in order: format, reserved word, self-match
/// short-circuit, per-organization uniqueness. Returns the rejection
/// message, if any. Read-only.
async fn reject_candidate_slug(
    pool: &SqlitePool,
    organization_id: &str,
    current_slug: Option<&str>,
    candidate: &str,
) -> Result<Option<String>, sqlx::Error> {
    if let Err(message) = validate_slug(candidate) {
        return Ok(Some(message.to_string()));
    }
    if is_reserved_slug(candidate) {
        return Ok(Some(RESERVED_SLUG_MESSAGE.to_string()));
    }
    if current_slug == Some(candidate) {
        return Ok(None);
    }
    if project_slug_taken(pool, organization_id, candidate).await? {
        return Ok(Some(PROJECT_SLUG_TAKEN_MESSAGE.to_string()));
    }
    Ok(None)
}

async fn resolve_organization(
    pool: &SqlitePool,
    slug: &str,
) -> async_graphql::Result<OrganizationRecord> {
    fetch_organization_by_slug(pool, slug)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| bad_user_input("organization not found"))
}

async fn resolve_project(
    pool: &SqlitePool,
    organization_id: &str,
    slug: &str,
) -> async_graphql::Result<ProjectRecord> {
    fetch_project_by_slug(pool, organization_id, slug)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| bad_user_input("project not found"))
}

#[derive(InputObject)]
pub struct CreateProjectInput {
    pub organization: String,
    pub name: String,
    #[graphql(name = "type")]
    pub project_type: ProjectType,
}

#[derive(SimpleObject)]
pub struct CreateProjectOk {
    pub created_project: ProjectNode,
    pub created_targets: Vec<TargetNode>,
}

#[derive(SimpleObject)]
pub struct CreateProjectResult {
    pub ok: Option<CreateProjectOk>,
    pub error: Option<MutationError>,
}

impl CreateProjectResult {
    fn created(project: ProjectRecord, targets: Vec<TargetRecord>) -> Self {
        CreateProjectResult {
            ok: Some(CreateProjectOk {
                created_project: ProjectNode(project),
                created_targets: targets.into_iter().map(TargetNode::from).collect(),
            }),
            error: None,
        }
    }

    fn rejected(message: impl Into<String>) -> Self {
        CreateProjectResult {
            ok: None,
            error: Some(MutationError::new(message)),
        }
    }
}

/// Create a project and its fixed target set in a single transaction.
/// Partial creation is never observable: a failed target or audit insert
/// rolls the project back.
pub async fn create_project(
    pool: &SqlitePool,
    input: CreateProjectInput,
) -> async_graphql::Result<CreateProjectResult> {
    let organization = resolve_organization(pool, &input.organization).await?;

    let slug = match derive_slug(&input.name) {
        Ok(slug) => slug,
        Err(message) => return Ok(CreateProjectResult::rejected(message)),
    };
    if let Some(message) = reject_candidate_slug(pool, &organization.id, None, &slug)
        .await
        .map_err(internal_error)?
    {
        return Ok(CreateProjectResult::rejected(message));
    }

    let record = ProjectRecord {
        id: cuid2::create_id(),
        organization_id: organization.id.clone(),
        slug,
        name: input.name,
        project_type: input.project_type.as_str().to_string(),
    };

    let mut tx = pool.begin().await.map_err(internal_error)?;

    let insert = sqlx::query(
        "INSERT INTO projects (id, organization_id, slug, name, project_type) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&record.id)
    .bind(&record.organization_id)
    .bind(&record.slug)
    .bind(&record.name)
    .bind(&record.project_type)
    .execute(&mut *tx)
    .await;

    if let Err(err) = insert {
        return if is_unique_violation(&err) {
            Ok(CreateProjectResult::rejected(PROJECT_SLUG_TAKEN_MESSAGE))
        } else {
            Err(internal_error(err))
        };
    }

    let targets = provision_default_targets(&mut tx, &record.id)
        .await
        .map_err(internal_error)?;

    record_event(
        &mut tx,
        &organization.id,
        &AuditLogEvent::ProjectCreated(ProjectCreatedPayload {
            project_id: record.id.clone(),
            project_name: record.name.clone(),
            project_type: record.project_type.clone(),
        }),
    )
    .await
    .map_err(internal_error)?;

    tx.commit().await.map_err(internal_error)?;

    counter!("registry.project_created", "type" => record.project_type.clone()).increment(1);

    Ok(CreateProjectResult::created(record, targets))
}

#[derive(InputObject)]
pub struct UpdateProjectSlugInput {
    pub organization: String,
    pub project: String,
    pub slug: String,
}

#[derive(SimpleObject)]
pub struct UpdateProjectSlugOk {
    pub selector: ProjectSelector,
    pub project: ProjectNode,
}

#[derive(SimpleObject)]
pub struct UpdateProjectSlugResult {
    pub ok: Option<UpdateProjectSlugOk>,
    pub error: Option<MutationError>,
}

impl UpdateProjectSlugResult {
    fn renamed(organization_slug: &str, project: ProjectRecord) -> Self {
        UpdateProjectSlugResult {
            ok: Some(UpdateProjectSlugOk {
                selector: ProjectSelector {
                    organization: organization_slug.to_string(),
                    project: project.slug.clone(),
                },
                project: ProjectNode(project),
            }),
            error: None,
        }
    }

    fn rejected(message: impl Into<String>) -> Self {
        UpdateProjectSlugResult {
            ok: None,
            error: Some(MutationError::new(message)),
        }
    }
}

/// Change a project's slug; the display name follows it. Renaming to the
/// current slug is an idempotent no-op. A rejected candidate leaves the
/// stored row untouched.
pub async fn update_project_slug(
    pool: &SqlitePool,
    input: UpdateProjectSlugInput,
) -> async_graphql::Result<UpdateProjectSlugResult> {
    let organization = resolve_organization(pool, &input.organization).await?;
    let project = resolve_project(pool, &organization.id, &input.project).await?;

    if let Some(message) =
        reject_candidate_slug(pool, &organization.id, Some(&project.slug), &input.slug)
            .await
            .map_err(internal_error)?
    {
        counter!("registry.project_slug_renamed", "outcome" => "rejected").increment(1);
        return Ok(UpdateProjectSlugResult::rejected(message));
    }

    if project.slug == input.slug {
        counter!("registry.project_slug_renamed", "outcome" => "noop").increment(1);
        return Ok(UpdateProjectSlugResult::renamed(&organization.slug, project));
    }

    let update = sqlx::query("UPDATE projects SET slug = ?, name = ? WHERE id = ?")
        .bind(&input.slug)
        .bind(&input.slug)
        .bind(&project.id)
        .execute(pool)
        .await;

    if let Err(err) = update {
        // Two concurrent renames can both pass the uniqueness pre-check;
        // the unique index on (organization_id, slug) decides the loser.
        return if is_unique_violation(&err) {
            counter!("registry.project_slug_renamed", "outcome" => "rejected").increment(1);
            Ok(UpdateProjectSlugResult::rejected(PROJECT_SLUG_TAKEN_MESSAGE))
        } else {
            Err(internal_error(err))
        };
    }

    counter!("registry.project_slug_renamed", "outcome" => "renamed").increment(1);

    let renamed = ProjectRecord {
        slug: input.slug.clone(),
        name: input.slug,
        ..project
    };
    Ok(UpdateProjectSlugResult::renamed(&organization.slug, renamed))
}

#[derive(InputObject)]
pub struct DeleteProjectInput {
    pub organization: String,
    pub project: String,
}

#[derive(SimpleObject)]
pub struct DeleteProjectOk {
    pub deleted_project: ProjectNode,
}

#[derive(SimpleObject)]
pub struct DeleteProjectResult {
    pub ok: Option<DeleteProjectOk>,
    pub error: Option<MutationError>,
}

/// Delete a project and, via FK cascade, its targets. The audit entry is
/// written in the same transaction.
pub async fn delete_project(
    pool: &SqlitePool,
    input: DeleteProjectInput,
) -> async_graphql::Result<DeleteProjectResult> {
    let organization = resolve_organization(pool, &input.organization).await?;
    let project = resolve_project(pool, &organization.id, &input.project).await?;

    let mut tx = pool.begin().await.map_err(internal_error)?;

    sqlx::query("DELETE FROM projects WHERE id = ?")
        .bind(&project.id)
        .execute(&mut *tx)
        .await
        .map_err(internal_error)?;

    record_event(
        &mut tx,
        &organization.id,
        &AuditLogEvent::ProjectDeleted(ProjectDeletedPayload {
            project_id: project.id.clone(),
            project_name: project.name.clone(),
        }),
    )
    .await
    .map_err(internal_error)?;

    tx.commit().await.map_err(internal_error)?;

    counter!("registry.project_deleted").increment(1);

    Ok(DeleteProjectResult {
        ok: Some(DeleteProjectOk {
            deleted_project: ProjectNode(project),
        }),
        error: None,
    })
}
