use async_graphql::{Error, ErrorExtensions, SimpleObject};

pub fn bad_user_input(message: impl Into<String>) -> Error {
    Error::new(message.into()).extend_with(|_, e| e.set("code", "BAD_USER_INPUT"))
}

pub fn internal_error(err: impl std::fmt::Display) -> Error {
    Error::new(err.to_string())
}

/// Error half of the tagged `{ ok, error }` mutation results. Business-rule
/// rejections land here; they are never raised as GraphQL errors.
#[derive(Clone, Debug, SimpleObject)]
pub struct MutationError {
    pub message: String,
}

impl MutationError {
    pub fn new(message: impl Into<String>) -> Self {
        MutationError {
            message: message.into(),
        }
    }
}
