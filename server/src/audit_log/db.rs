use sqlx::{Sqlite, SqlitePool, Transaction};

use super::models::{AuditLogEvent, AuditLogRow};

/// Append an audit entry inside the caller's transaction, so the entry
/// commits or rolls back together with the mutation it records.
pub async fn record_event(
    tx: &mut Transaction<'_, Sqlite>,
    organization_id: &str,
    event: &AuditLogEvent,
) -> anyhow::Result<()> {
    let id = cuid2::create_id();
    let metadata = event.to_metadata()?;
    let event_time = chrono::Utc::now().timestamp_millis();

    sqlx::query(
        "INSERT INTO audit_log (id, organization_id, event_action, event_time, metadata) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(organization_id)
    .bind(event.action())
    .bind(event_time)
    .bind(&metadata)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Newest first; rowid breaks same-millisecond ties in insertion order.
pub async fn fetch_events_for_organization(
    pool: &SqlitePool,
    organization_id: &str,
) -> Result<Vec<AuditLogRow>, sqlx::Error> {
    sqlx::query_as::<_, AuditLogRow>(
        "SELECT id, organization_id, event_action, event_time, metadata FROM audit_log \
         WHERE organization_id = ? ORDER BY event_time DESC, rowid DESC",
    )
    .bind(organization_id)
    .fetch_all(pool)
    .await
}
