use async_graphql::ID;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::SqlitePool;

use super::db::fetch_events_for_organization;
use super::models::{
    AuditLog, AuditLogEvent, AuditLogRow, ProjectCreatedAuditLog, ProjectDeletedAuditLog,
};
use crate::graphql::errors::{bad_user_input, internal_error};
use crate::organization::db::fetch_organization_by_slug;

pub async fn audit_logs_for_organization(
    pool: &SqlitePool,
    organization_slug: String,
) -> async_graphql::Result<Vec<AuditLog>> {
    let organization = fetch_organization_by_slug(pool, &organization_slug)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| bad_user_input("organization not found"))?;

    let rows = fetch_events_for_organization(pool, &organization.id)
        .await
        .map_err(internal_error)?;

    rows.into_iter()
        .map(|row| to_graphql(row).map_err(internal_error))
        .collect()
}

/// Boundary mapping from storage rows to the wire union. Timestamps are
/// normalized to RFC 3339 with millisecond precision here and nowhere else.
fn to_graphql(row: AuditLogRow) -> anyhow::Result<AuditLog> {
    let event = AuditLogEvent::decode(&row.event_action, &row.metadata)?;
    let event_time = format_event_time(row.event_time)?;
    let id = ID::from(row.id);

    Ok(match event {
        AuditLogEvent::ProjectCreated(payload) => AuditLog::ProjectCreated(ProjectCreatedAuditLog {
            id,
            event_time,
            project_id: payload.project_id,
            project_name: payload.project_name,
            project_type: payload.project_type,
        }),
        AuditLogEvent::ProjectDeleted(payload) => AuditLog::ProjectDeleted(ProjectDeletedAuditLog {
            id,
            event_time,
            project_id: payload.project_id,
            project_name: payload.project_name,
        }),
    })
}

fn format_event_time(millis: i64) -> anyhow::Result<String> {
    let timestamp = DateTime::<Utc>::from_timestamp_millis(millis)
        .ok_or_else(|| anyhow::anyhow!("audit log timestamp out of range: {millis}"))?;
    Ok(timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_times_render_as_utc_rfc3339() {
        assert_eq!(format_event_time(0).unwrap(), "1970-01-01T00:00:00.000Z");
        assert_eq!(
            format_event_time(1_700_000_000_123).unwrap(),
            "2023-11-14T22:13:20.123Z"
        );
    }
}
