pub mod db;
pub mod models;
pub mod mutations;
pub mod queries;

pub use models::OrganizationNode;
pub use mutations::CreateOrganizationInput;
