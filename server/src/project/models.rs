use async_graphql::{Enum, SimpleObject};

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct ProjectRecord {
    pub id: String,
    pub organization_id: String,
    pub slug: String,
    pub name: String,
    pub project_type: String,
}

#[derive(Clone)]
pub struct ProjectNode(pub ProjectRecord);

impl From<ProjectRecord> for ProjectNode {
    fn from(record: ProjectRecord) -> Self {
        ProjectNode(record)
    }
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum ProjectType {
    Single,
    Federation,
    Stitching,
}

impl ProjectType {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectType::Single => "SINGLE",
            ProjectType::Federation => "FEDERATION",
            ProjectType::Stitching => "STITCHING",
        }
    }

    pub fn parse(value: &str) -> Option<ProjectType> {
        match value {
            "SINGLE" => Some(ProjectType::Single),
            "FEDERATION" => Some(ProjectType::Federation),
            "STITCHING" => Some(ProjectType::Stitching),
            _ => None,
        }
    }
}

/// Composite key addressing a project in requests; echoed back by the
/// rename mutation with the new slug.
#[derive(Clone, SimpleObject)]
pub struct ProjectSelector {
    pub organization: String,
    pub project: String,
}
