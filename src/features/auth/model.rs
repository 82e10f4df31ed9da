use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Caller identity taken from a verified bearer token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// The token subject
    pub user_id: String,
    pub roles: Vec<String>,
}
