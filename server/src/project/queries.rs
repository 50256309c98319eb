use async_graphql::{Context, ID, Object};
use sqlx::SqlitePool;

use super::db::{fetch_project_by_slug, fetch_projects_for_organization};
use super::models::{ProjectNode, ProjectType};
use crate::graphql::errors::{bad_user_input, internal_error};
use crate::organization::db::fetch_organization_by_slug;
use crate::target::db::fetch_targets_for_project;
use crate::target::models::TargetNode;

#[Object]
impl ProjectNode {
    async fn id(&self) -> ID {
        ID::from(self.0.id.clone())
    }

    async fn clean_id(&self) -> &str {
        &self.0.slug
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn project_type(&self) -> async_graphql::Result<ProjectType> {
        ProjectType::parse(&self.0.project_type).ok_or_else(|| {
            internal_error(format!("unknown project type: {}", self.0.project_type))
        })
    }

    async fn targets(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<TargetNode>> {
        let pool = ctx.data::<SqlitePool>()?;
        let records = fetch_targets_for_project(pool, &self.0.id)
            .await
            .map_err(internal_error)?;
        Ok(records.into_iter().map(TargetNode::from).collect())
    }
}

/// Projects of an organization addressed by internal id; used by the
/// organization's field resolver.
pub async fn projects_for_organization(
    pool: &SqlitePool,
    organization_id: &str,
) -> async_graphql::Result<Vec<ProjectNode>> {
    let records = fetch_projects_for_organization(pool, organization_id)
        .await
        .map_err(internal_error)?;
    Ok(records.into_iter().map(ProjectNode::from).collect())
}

pub async fn get_projects(
    pool: &SqlitePool,
    organization_slug: String,
) -> async_graphql::Result<Vec<ProjectNode>> {
    let organization = fetch_organization_by_slug(pool, &organization_slug)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| bad_user_input("organization not found"))?;
    projects_for_organization(pool, &organization.id).await
}

pub async fn get_project(
    pool: &SqlitePool,
    organization_slug: String,
    project_slug: String,
) -> async_graphql::Result<Option<ProjectNode>> {
    let Some(organization) = fetch_organization_by_slug(pool, &organization_slug)
        .await
        .map_err(internal_error)?
    else {
        return Ok(None);
    };

    let record = fetch_project_by_slug(pool, &organization.id, &project_slug)
        .await
        .map_err(internal_error)?;
    Ok(record.map(ProjectNode::from))
}
