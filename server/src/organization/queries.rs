use async_graphql::{Context, ID, Object};
use sqlx::SqlitePool;

use super::db::{fetch_all_organizations, fetch_organization_by_slug};
use super::models::OrganizationNode;
use crate::graphql::errors::internal_error;
use crate::project::models::ProjectNode;
use crate::project::queries::projects_for_organization;

#[Object]
impl OrganizationNode {
    async fn id(&self) -> ID {
        ID::from(self.0.id.clone())
    }

    async fn clean_id(&self) -> &str {
        &self.0.slug
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn projects(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<ProjectNode>> {
        let pool = ctx.data::<SqlitePool>()?;
        projects_for_organization(pool, &self.0.id).await
    }
}

pub async fn get_all_organizations(
    pool: &SqlitePool,
) -> async_graphql::Result<Vec<OrganizationNode>> {
    let records = fetch_all_organizations(pool).await.map_err(internal_error)?;
    Ok(records.into_iter().map(OrganizationNode::from).collect())
}

pub async fn get_organization(
    pool: &SqlitePool,
    slug: String,
) -> async_graphql::Result<Option<OrganizationNode>> {
    let record = fetch_organization_by_slug(pool, &slug)
        .await
        .map_err(internal_error)?;
    Ok(record.map(OrganizationNode::from))
}
