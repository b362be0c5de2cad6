//! 토큰 인증 에러 분류
//!
//! 토큰 디코딩/검증/폐기 확인 단계에서 발생하는 실패를 서로 구분 가능한
//! 종류로 나눕니다. 클라이언트는 종류에 따라 다르게 복구합니다.
//!
//! | 종류 | 클라이언트 동작 |
//! |------|-----------------|
//! | `TokenExpired` | 리프레시 토큰으로 조용히 재발급 |
//! | `RefreshExpired` | 다시 로그인 |
//! | `TokenRevoked` | 다시 로그인 (로그아웃된 토큰) |
//! | `MalformedInput` / `SignatureInvalid` / `UnsupportedFormat` | 토큰 폐기 후 다시 로그인 |
//!
//! `Config`는 서버 기동 시점에만 발생하며 요청 단위 에러가 아닙니다.

use actix_web::http::StatusCode;
use thiserror::Error;
use crate::caching::key_store::KeyStoreError;

/// 토큰 인증 실패 종류
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// 비어 있거나 토큰 형태가 아닌 입력
    #[error("토큰이 비어 있거나 형식이 잘못되었습니다")]
    MalformedInput,

    /// 서명 불일치 또는 위조된 토큰
    #[error("유효하지 않은 토큰 서명입니다")]
    SignatureInvalid,

    /// 서명은 유효하지만 만료 시각이 지남
    #[error("토큰이 만료되었습니다")]
    TokenExpired,

    /// 서명은 유효하지만 예상하지 못한 구조 (클레임 누락, 알 수 없는 타입 태그 등)
    #[error("지원하지 않는 토큰 형식입니다: {0}")]
    UnsupportedFormat(String),

    /// 로그아웃으로 무효화된 액세스 토큰
    #[error("로그아웃된 토큰입니다")]
    TokenRevoked,

    /// 리프레시 토큰의 재발급 가능 기간이 지남
    #[error("리프레시 토큰이 만료되었습니다")]
    RefreshExpired,

    /// 재발급 시 회원 정보를 다시 찾을 수 없음
    #[error("회원을 찾을 수 없습니다: {0}")]
    IdentityNotFound(String),

    /// KeyStore 접근 실패
    #[error("KeyStore 오류: {0}")]
    KeyStore(String),

    /// 서명 키 등 설정 오류 (기동 시점 전용)
    #[error("인증 설정 오류: {0}")]
    Config(String),
}

impl AuthError {
    /// 클라이언트에게 전달하는 안정적인 에러 코드
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MalformedInput => "EMPTY_ACCESS_TOKEN",
            AuthError::SignatureInvalid => "INVALID_TOKEN",
            AuthError::TokenExpired => "EXPIRED_ACCESS_TOKEN",
            AuthError::UnsupportedFormat(_) => "UNSUPPORTED_TOKEN",
            AuthError::TokenRevoked => "LOGGED_OUT_TOKEN",
            AuthError::RefreshExpired => "EXPIRED_REFRESH_TOKEN",
            AuthError::IdentityNotFound(_) => "MEMBER_NOT_FOUND",
            AuthError::KeyStore(_) => "KEY_STORE_UNAVAILABLE",
            AuthError::Config(_) => "CONFIG_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::KeyStore(_) => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

impl From<KeyStoreError> for AuthError {
    fn from(err: KeyStoreError) -> Self {
        AuthError::KeyStore(err.to_string())
    }
}

impl actix_web::ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status())
            .json(serde_json::json!({
                "error": self.code(),
                "message": self.to_string()
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_each_kind_has_distinct_code() {
        let kinds = [
            AuthError::MalformedInput,
            AuthError::SignatureInvalid,
            AuthError::TokenExpired,
            AuthError::UnsupportedFormat("typ".to_string()),
            AuthError::TokenRevoked,
            AuthError::RefreshExpired,
            AuthError::IdentityNotFound("alice".to_string()),
            AuthError::KeyStore("down".to_string()),
            AuthError::Config("secret".to_string()),
        ];

        let mut codes: Vec<&str> = kinds.iter().map(|k| k.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_credential_errors_are_unauthorized() {
        assert_eq!(AuthError::TokenExpired.error_response().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::RefreshExpired.error_response().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::TokenRevoked.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_infrastructure_errors_are_not_unauthorized() {
        assert_eq!(
            AuthError::KeyStore("connection refused".to_string()).error_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AuthError::Config("missing".to_string()).error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
