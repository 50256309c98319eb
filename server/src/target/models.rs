use async_graphql::{ID, Object};

/// Fixed environment targets provisioned with every project. Slug and
/// display name are identical and never renamed afterwards.
pub const DEFAULT_TARGETS: &[&str] = &["development", "staging", "production"];

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct TargetRecord {
    pub id: String,
    pub project_id: String,
    pub slug: String,
    pub name: String,
}

#[derive(Clone)]
pub struct TargetNode(pub TargetRecord);

#[Object]
impl TargetNode {
    async fn id(&self) -> ID {
        ID::from(self.0.id.clone())
    }

    async fn clean_id(&self) -> &str {
        &self.0.slug
    }

    async fn name(&self) -> &str {
        &self.0.name
    }
}

impl From<TargetRecord> for TargetNode {
    fn from(record: TargetRecord) -> Self {
        TargetNode(record)
    }
}
