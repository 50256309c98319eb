use async_graphql::{InputObject, SimpleObject};
use metrics::counter;
use sqlx::SqlitePool;

use super::db::organization_slug_taken;
use super::models::{OrganizationNode, OrganizationRecord};
use crate::db::is_unique_violation;
use crate::graphql::errors::{MutationError, internal_error};
use crate::validation::slug::{RESERVED_SLUG_MESSAGE, is_reserved_slug, validate_slug};

pub const ORGANIZATION_SLUG_TAKEN_MESSAGE: &str = "Organization slug is already taken";

#[derive(InputObject)]
pub struct CreateOrganizationInput {
    pub slug: String,
}

#[derive(SimpleObject)]
pub struct CreateOrganizationOk {
    pub created_organization: OrganizationNode,
}

#[derive(SimpleObject)]
pub struct CreateOrganizationResult {
    pub ok: Option<CreateOrganizationOk>,
    pub error: Option<MutationError>,
}

impl CreateOrganizationResult {
    fn created(record: OrganizationRecord) -> Self {
        CreateOrganizationResult {
            ok: Some(CreateOrganizationOk {
                created_organization: OrganizationNode(record),
            }),
            error: None,
        }
    }

    fn rejected(message: impl Into<String>) -> Self {
        CreateOrganizationResult {
            ok: None,
            error: Some(MutationError::new(message)),
        }
    }
}

/// Organization slugs are unique platform-wide, unlike project slugs which
/// are only scoped to their organization.
pub async fn create_organization(
    pool: &SqlitePool,
    input: CreateOrganizationInput,
) -> async_graphql::Result<CreateOrganizationResult> {
    if let Err(message) = validate_slug(&input.slug) {
        return Ok(CreateOrganizationResult::rejected(message));
    }
    if is_reserved_slug(&input.slug) {
        return Ok(CreateOrganizationResult::rejected(RESERVED_SLUG_MESSAGE));
    }
    if organization_slug_taken(pool, &input.slug)
        .await
        .map_err(internal_error)?
    {
        return Ok(CreateOrganizationResult::rejected(
            ORGANIZATION_SLUG_TAKEN_MESSAGE,
        ));
    }

    let id = cuid2::create_id();
    let insert = sqlx::query("INSERT INTO organizations (id, slug, name) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(&input.slug)
        .bind(&input.slug)
        .execute(pool)
        .await;

    if let Err(err) = insert {
        if is_unique_violation(&err) {
            return Ok(CreateOrganizationResult::rejected(
                ORGANIZATION_SLUG_TAKEN_MESSAGE,
            ));
        }
        return Err(internal_error(err));
    }

    counter!("registry.organization_created").increment(1);

    Ok(CreateOrganizationResult::created(OrganizationRecord {
        id,
        name: input.slug.clone(),
        slug: input.slug,
    }))
}
