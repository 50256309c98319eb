use sqlx::{Sqlite, SqlitePool, Transaction};

use super::models::{DEFAULT_TARGETS, TargetRecord};

pub async fn fetch_targets_for_project(
    pool: &SqlitePool,
    project_id: &str,
) -> Result<Vec<TargetRecord>, sqlx::Error> {
    sqlx::query_as::<_, TargetRecord>(
        "SELECT id, project_id, slug, name FROM targets WHERE project_id = ? ORDER BY slug",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await
}

/// Insert the fixed target set for a freshly created project. Runs inside
/// the project-creation transaction so a failed insert rolls the project
/// back with it.
pub async fn provision_default_targets(
    tx: &mut Transaction<'_, Sqlite>,
    project_id: &str,
) -> Result<Vec<TargetRecord>, sqlx::Error> {
    let mut created = Vec::with_capacity(DEFAULT_TARGETS.len());

    for slug in DEFAULT_TARGETS {
        let id = cuid2::create_id();
        sqlx::query("INSERT INTO targets (id, project_id, slug, name) VALUES (?, ?, ?, ?)")
            .bind(&id)
            .bind(project_id)
            .bind(slug)
            .bind(slug)
            .execute(&mut **tx)
            .await?;

        created.push(TargetRecord {
            id,
            project_id: project_id.to_string(),
            slug: slug.to_string(),
            name: slug.to_string(),
        });
    }

    Ok(created)
}
