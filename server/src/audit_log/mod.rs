pub mod db;
pub mod models;
pub mod queries;

pub use models::{AuditLog, AuditLogEvent};
