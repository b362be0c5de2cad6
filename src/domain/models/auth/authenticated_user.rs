//! 인증된 회원 정보와 핸들러용 추출기
//!
//! 인증 미들웨어가 토큰 검증에 성공하면 [`Identity`]를 요청 extensions 에 바인딩합니다.
//! 핸들러는 [`AuthenticatedMember`] 또는 [`OptionalMember`]로 이를 꺼내 씁니다.
//!
//! ```rust,ignore
//! #[get("/api/member/me")]
//! async fn me(member: AuthenticatedMember) -> impl Responder {
//!     HttpResponse::Ok().json(member.identity())
//! }
//! ```

use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use crate::domain::models::auth::authentication_request::{AccessDenied, RejectedCredential};

/// 토큰에 담기는 회원 식별 정보
///
/// 발급 시점의 회원 정보이며, 검증할 때마다 다시 조회하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// 고유 사용자명
    pub subject: String,
    /// 권한 (예: `USER`, `ADMIN`)
    pub role: String,
    pub email: String,
}

impl Identity {
    pub fn new(subject: impl Into<String>, role: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            role: role.into(),
            email: email.into(),
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }

    /// 재발급 시 회원 정보를 다시 조회해야 하는지 여부
    pub fn is_incomplete(&self) -> bool {
        self.role.trim().is_empty() || self.email.trim().is_empty()
    }
}

/// 인증 필수 핸들러용 추출기
///
/// 바인딩된 [`Identity`]가 없으면 401을 반환합니다. 인증 미들웨어가 토큰을 거부했다면
/// 그 사유 코드(`EXPIRED_ACCESS_TOKEN` 등)가 응답에 담깁니다.
#[derive(Debug, Clone)]
pub struct AuthenticatedMember(pub Identity);

impl AuthenticatedMember {
    pub fn identity(&self) -> &Identity {
        &self.0
    }

    pub fn subject(&self) -> &str {
        &self.0.subject
    }
}

impl FromRequest for AuthenticatedMember {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let extensions = req.extensions();
        match extensions.get::<Identity>() {
            Some(identity) => ready(Ok(AuthenticatedMember(identity.clone()))),
            None => {
                let reason = extensions.get::<RejectedCredential>().map(|r| r.0.clone());
                ready(Err(AccessDenied::Unauthenticated(reason).into()))
            }
        }
    }
}

/// 인증 선택 핸들러용 추출기 (항상 성공)
#[derive(Debug, Clone)]
pub struct OptionalMember(pub Option<Identity>);

impl FromRequest for OptionalMember {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let identity = req.extensions().get::<Identity>().cloned();
        ready(Ok(OptionalMember(identity)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;
    use crate::core::AuthError;

    #[actix_web::test]
    async fn test_extracts_bound_identity() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(Identity::new("alice", "USER", "a@x.com"));

        let member = AuthenticatedMember::extract(&req).await.unwrap();
        assert_eq!(member.subject(), "alice");

        let optional = OptionalMember::extract(&req).await.unwrap();
        assert_eq!(optional.0.map(|i| i.role), Some("USER".to_string()));
    }

    #[actix_web::test]
    async fn test_missing_identity_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(RejectedCredential(AuthError::TokenExpired));

        let err = AuthenticatedMember::extract(&req).await.unwrap_err();
        assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);

        let optional = OptionalMember::extract(&req).await.unwrap();
        assert!(optional.0.is_none());
    }

    #[test]
    fn test_incomplete_identity() {
        assert!(Identity::new("alice", "", "a@x.com").is_incomplete());
        assert!(Identity::new("alice", "USER", " ").is_incomplete());
        assert!(!Identity::new("alice", "USER", "a@x.com").is_incomplete());
    }
}
