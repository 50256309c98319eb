use super::models::OrganizationRecord;
use sqlx::SqlitePool;

pub async fn fetch_organization_by_slug(
    pool: &SqlitePool,
    slug: &str,
) -> Result<Option<OrganizationRecord>, sqlx::Error> {
    sqlx::query_as::<_, OrganizationRecord>(
        "SELECT id, slug, name FROM organizations WHERE slug = ?",
    )
    .bind(slug)
    .fetch_optional(pool)
    .await
}

pub async fn organization_slug_taken(
    pool: &SqlitePool,
    slug: &str,
) -> Result<bool, sqlx::Error> {
    let exists: Option<i64> =
        sqlx::query_scalar("SELECT 1 FROM organizations WHERE slug = ? LIMIT 1")
            .bind(slug)
            .fetch_optional(pool)
            .await?;
    Ok(exists.is_some())
}

pub async fn fetch_all_organizations(
    pool: &SqlitePool,
) -> Result<Vec<OrganizationRecord>, sqlx::Error> {
    sqlx::query_as::<_, OrganizationRecord>(
        "SELECT id, slug, name FROM organizations ORDER BY slug",
    )
    .fetch_all(pool)
    .await
}
