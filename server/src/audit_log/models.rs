use anyhow::bail;
use async_graphql::{ID, SimpleObject, Union};
use serde::{Deserialize, Serialize};

pub const PROJECT_CREATED_ACTION: &str = "PROJECT_CREATED";
pub const PROJECT_DELETED_ACTION: &str = "PROJECT_DELETED";

/// Raw storage row. `event_time` is milliseconds since the epoch;
/// `metadata` is the action-specific JSON payload.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct AuditLogRow {
    pub id: String,
    pub organization_id: String,
    pub event_action: String,
    pub event_time: i64,
    pub metadata: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreatedPayload {
    pub project_id: String,
    pub project_name: String,
    pub project_type: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDeletedPayload {
    pub project_id: String,
    pub project_name: String,
}

/// Closed set of audit events. Decoding matches exhaustively on the stored
/// action; an action outside this set is a decode error, not a variant.
#[derive(Clone, Debug)]
pub enum AuditLogEvent {
    ProjectCreated(ProjectCreatedPayload),
    ProjectDeleted(ProjectDeletedPayload),
}

impl AuditLogEvent {
    pub fn action(&self) -> &'static str {
        match self {
            AuditLogEvent::ProjectCreated(_) => PROJECT_CREATED_ACTION,
            AuditLogEvent::ProjectDeleted(_) => PROJECT_DELETED_ACTION,
        }
    }

    pub fn to_metadata(&self) -> serde_json::Result<String> {
        match self {
            AuditLogEvent::ProjectCreated(payload) => serde_json::to_string(payload),
            AuditLogEvent::ProjectDeleted(payload) => serde_json::to_string(payload),
        }
    }

    pub fn decode(action: &str, metadata: &str) -> anyhow::Result<AuditLogEvent> {
        match action {
            PROJECT_CREATED_ACTION => {
                Ok(AuditLogEvent::ProjectCreated(serde_json::from_str(metadata)?))
            }
            PROJECT_DELETED_ACTION => {
                Ok(AuditLogEvent::ProjectDeleted(serde_json::from_str(metadata)?))
            }
            other => bail!("unknown audit log action: {other}"),
        }
    }
}

#[derive(SimpleObject)]
pub struct ProjectCreatedAuditLog {
    pub id: ID,
    pub event_time: String,
    pub project_id: String,
    pub project_name: String,
    pub project_type: String,
}

#[derive(SimpleObject)]
pub struct ProjectDeletedAuditLog {
    pub id: ID,
    pub event_time: String,
    pub project_id: String,
    pub project_name: String,
}

#[derive(Union)]
pub enum AuditLog {
    ProjectCreated(ProjectCreatedAuditLog),
    ProjectDeleted(ProjectDeletedAuditLog),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_keys_are_camel_case() {
        let value = serde_json::to_value(ProjectCreatedPayload {
            project_id: "p1".into(),
            project_name: "graph-api".into(),
            project_type: "SINGLE".into(),
        })
        .unwrap();

        assert_eq!(value["projectId"], "p1");
        assert_eq!(value["projectName"], "graph-api");
        assert_eq!(value["projectType"], "SINGLE");
    }

    #[test]
    fn events_round_trip_through_metadata() {
        let event = AuditLogEvent::ProjectDeleted(ProjectDeletedPayload {
            project_id: "p2".into(),
            project_name: "legacy".into(),
        });

        let metadata = event.to_metadata().unwrap();
        let decoded = AuditLogEvent::decode(event.action(), &metadata).unwrap();

        match decoded {
            AuditLogEvent::ProjectDeleted(payload) => {
                assert_eq!(payload.project_id, "p2");
                assert_eq!(payload.project_name, "legacy");
            }
            other => panic!("decoded wrong variant: {other:?}"),
        }
    }

    #[test]
    fn unknown_actions_fail_to_decode() {
        let err = AuditLogEvent::decode("TARGET_EXPLODED", "{}").unwrap_err();
        assert!(err.to_string().contains("TARGET_EXPLODED"));
    }
}
