use super::models::ProjectRecord;
use sqlx::SqlitePool;

pub async fn fetch_project_by_slug(
    pool: &SqlitePool,
    organization_id: &str,
    slug: &str,
) -> Result<Option<ProjectRecord>, sqlx::Error> {
    sqlx::query_as::<_, ProjectRecord>(
        "SELECT id, organization_id, slug, name, project_type FROM projects \
         WHERE organization_id = ? AND slug = ?",
    )
    .bind(organization_id)
    .bind(slug)
    .fetch_optional(pool)
    .await
}

/// Uniqueness is scoped to the owning organization; the same slug in a
/// different organization never conflicts.
pub async fn project_slug_taken(
    pool: &SqlitePool,
    organization_id: &str,
    slug: &str,
) -> Result<bool, sqlx::Error> {
    let exists: Option<i64> = sqlx::query_scalar(
        "SELECT 1 FROM projects WHERE organization_id = ? AND slug = ? LIMIT 1",
    )
    .bind(organization_id)
    .bind(slug)
    .fetch_optional(pool)
    .await?;
    Ok(exists.is_some())
}

pub async fn fetch_projects_for_organization(
    pool: &SqlitePool,
    organization_id: &str,
) -> Result<Vec<ProjectRecord>, sqlx::Error> {
    sqlx::query_as::<_, ProjectRecord>(
        "SELECT id, organization_id, slug, name, project_type FROM projects \
         WHERE organization_id = ? ORDER BY slug",
    )
    .bind(organization_id)
    .fetch_all(pool)
    .await
}
