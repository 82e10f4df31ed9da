use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::model::AuthenticatedUser;

/// DTO for the /api/protected response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProtectedResponseDto {
    pub message: String,
    pub user_id: String,
    pub roles: Vec<String>,
}

impl From<AuthenticatedUser> for ProtectedResponseDto {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            message: "Protected API route".to_string(),
            user_id: user.user_id,
            roles: user.roles,
        }
    }
}
