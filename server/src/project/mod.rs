pub mod db;
pub mod models;
pub mod mutations;
pub mod queries;

pub use models::{ProjectNode, ProjectType};
pub use mutations::{CreateProjectInput, DeleteProjectInput, UpdateProjectSlugInput};
