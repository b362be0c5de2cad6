use serde::Serialize;
use crate::domain::models::auth::authenticated_user::Identity;

/// 공통 응답 래퍼
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// 로그인한 회원 정보 응답
#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub username: String,
    pub role: String,
    pub email: String,
}

impl From<&Identity> for MemberResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            username: identity.subject.clone(),
            role: identity.role.clone(),
            email: identity.email.clone(),
        }
    }
}
