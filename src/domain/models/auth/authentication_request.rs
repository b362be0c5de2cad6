//! 인증 처리 결과와 인가 요구사항
//!
//! - [`AuthOutcome`] - 인증 게이트가 요청 하나를 처리한 결과
//! - [`RejectedCredential`] - 토큰이 거부된 사유 (요청 extensions 에 기록)
//! - [`RequiredRole`] - 라우트가 요구하는 권한
//! - [`AccessDenied`] - 인가 실패 응답

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use crate::core::auth_error::AuthError;
use crate::domain::models::auth::authenticated_user::Identity;

/// 인증 게이트 처리 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// 토큰이 없는 요청
    Anonymous,
    /// 토큰 검증 성공
    Authenticated(Identity),
    /// 토큰이 있었지만 거부됨
    Unauthenticated(AuthError),
}

impl AuthOutcome {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            AuthOutcome::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }
}

/// 거부된 토큰의 실패 종류
///
/// 회원 정보 대신 요청 extensions 에 기록되어, 인가 단계에서 응답 코드로 사용됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedCredential(pub AuthError);

/// 라우트별 필요 권한
#[derive(Debug, Clone)]
pub enum RequiredRole {
    /// 단일 권한 필요
    Single(String),
    /// 여러 권한 중 하나 필요
    Any(Vec<String>),
}

impl RequiredRole {
    pub fn is_satisfied(&self, role: &str) -> bool {
        match self {
            RequiredRole::Single(required_role) => required_role == role,
            RequiredRole::Any(required_roles) => required_roles.iter().any(|r| r == role),
        }
    }
}

/// 인가 실패
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDenied {
    /// 인증 정보 없음. 토큰이 거부된 경우 그 사유를 포함합니다.
    Unauthenticated(Option<AuthError>),
    /// 권한 부족
    Forbidden,
}

impl AccessDenied {
    pub fn code(&self) -> &'static str {
        match self {
            AccessDenied::Unauthenticated(Some(reason)) => reason.code(),
            AccessDenied::Unauthenticated(None) => "AUTHENTICATION_REQUIRED",
            AccessDenied::Forbidden => "INSUFFICIENT_PERMISSIONS",
        }
    }
}

impl std::fmt::Display for AccessDenied {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessDenied::Unauthenticated(Some(reason)) => write!(f, "{}", reason),
            AccessDenied::Unauthenticated(None) => f.write_str("인증이 필요합니다"),
            AccessDenied::Forbidden => f.write_str("접근 권한이 없습니다"),
        }
    }
}

impl ResponseError for AccessDenied {
    fn status_code(&self) -> StatusCode {
        match self {
            AccessDenied::Unauthenticated(Some(reason)) => reason.status(),
            AccessDenied::Unauthenticated(None) => StatusCode::UNAUTHORIZED,
            AccessDenied::Forbidden => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.code(),
            "message": self.to_string()
        }))
    }
}
