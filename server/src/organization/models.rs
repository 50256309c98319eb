#[derive(Clone, Debug, sqlx::FromRow)]
pub struct OrganizationRecord {
    pub id: String,
    pub slug: String,
    pub name: String,
}

#[derive(Clone)]
pub struct OrganizationNode(pub OrganizationRecord);

impl From<OrganizationRecord> for OrganizationNode {
    fn from(record: OrganizationRecord) -> Self {
        OrganizationNode(record)
    }
}
