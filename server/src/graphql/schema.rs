use async_graphql::{Context, EmptySubscription, Object, Schema};
use sqlx::SqlitePool;

use crate::audit_log::models::AuditLog;
use crate::organization::models::OrganizationNode;
use crate::organization::mutations::{CreateOrganizationInput, CreateOrganizationResult};
use crate::project::models::ProjectNode;
use crate::project::mutations::{
    CreateProjectInput, CreateProjectResult, DeleteProjectInput, DeleteProjectResult,
    UpdateProjectSlugInput, UpdateProjectSlugResult,
};

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn organizations(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Vec<OrganizationNode>> {
        let pool = ctx.data::<SqlitePool>()?;
        crate::organization::queries::get_all_organizations(pool).await
    }

    async fn organization(
        &self,
        ctx: &Context<'_>,
        slug: String,
    ) -> async_graphql::Result<Option<OrganizationNode>> {
        let pool = ctx.data::<SqlitePool>()?;
        crate::organization::queries::get_organization(pool, slug).await
    }

    async fn projects(
        &self,
        ctx: &Context<'_>,
        organization: String,
    ) -> async_graphql::Result<Vec<ProjectNode>> {
        let pool = ctx.data::<SqlitePool>()?;
        crate::project::queries::get_projects(pool, organization).await
    }

    async fn project(
        &self,
        ctx: &Context<'_>,
        organization: String,
        project: String,
    ) -> async_graphql::Result<Option<ProjectNode>> {
        let pool = ctx.data::<SqlitePool>()?;
        crate::project::queries::get_project(pool, organization, project).await
    }

    async fn audit_logs(
        &self,
        ctx: &Context<'_>,
        organization: String,
    ) -> async_graphql::Result<Vec<AuditLog>> {
        let pool = ctx.data::<SqlitePool>()?;
        crate::audit_log::queries::audit_logs_for_organization(pool, organization).await
    }
}

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_organization(
        &self,
        ctx: &Context<'_>,
        input: CreateOrganizationInput,
    ) -> async_graphql::Result<CreateOrganizationResult> {
        let pool = ctx.data::<SqlitePool>()?;
        crate::organization::mutations::create_organization(pool, input).await
    }

    async fn create_project(
        &self,
        ctx: &Context<'_>,
        input: CreateProjectInput,
    ) -> async_graphql::Result<CreateProjectResult> {
        let pool = ctx.data::<SqlitePool>()?;
        crate::project::mutations::create_project(pool, input).await
    }

    async fn update_project_slug(
        &self,
        ctx: &Context<'_>,
        input: UpdateProjectSlugInput,
    ) -> async_graphql::Result<UpdateProjectSlugResult> {
        let pool = ctx.data::<SqlitePool>()?;
        crate::project::mutations::update_project_slug(pool, input).await
    }

    async fn delete_project(
        &self,
        ctx: &Context<'_>,
        input: DeleteProjectInput,
    ) -> async_graphql::Result<DeleteProjectResult> {
        let pool = ctx.data::<SqlitePool>()?;
        crate::project::mutations::delete_project(pool, input).await
    }
}

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(pool: SqlitePool) -> AppSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .data(pool)
    .finish()
}
