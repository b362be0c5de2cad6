//! 요청 단위 인증 게이트
//!
//! 요청 하나를 한 번만 처리합니다.
//!
//! ```text
//! INIT ──토큰 없음──▶ ANONYMOUS
//!   │
//!   └─토큰 추출──▶ EXTRACTED ──검증 성공──▶ AUTHENTICATED (Identity 바인딩)
//!                      │
//!                      └──검증 실패──▶ UNAUTHENTICATED (RejectedCredential 기록)
//! ```
//!
//! 요청 인증에는 액세스 토큰만 사용됩니다. 리프레시 토큰은 거부 사유(`UnsupportedFormat`)로 기록되며,
//! 재발급 엔드포인트는 게이트 결과와 무관하게 리프레시 토큰을 직접 검증합니다.
//!
//! 게이트는 응답을 만들지 않습니다. 잘못된 토큰이 와도 요청은 계속 진행되며,
//! 거부 여부는 하위의 [`AuthorizationGuard`](crate::middlewares::AuthorizationGuard)나
//! 핸들러 추출기가 결정합니다.

use std::sync::Arc;
use actix_web::http::header;
use actix_web::{HttpMessage, HttpRequest};
use crate::config::TokenSource;
use crate::core::auth_error::AuthError;
use crate::domain::models::auth::{AuthOutcome, RejectedCredential};
use crate::domain::models::token::redact;
use crate::services::auth::token_service::TokenLifecycleManager;

const BEARER_PREFIX: &str = "Bearer ";

pub struct AuthenticationGate {
    manager: Arc<TokenLifecycleManager>,
    source: TokenSource,
}

impl AuthenticationGate {
    pub fn new(manager: Arc<TokenLifecycleManager>, source: TokenSource) -> Self {
        Self { manager, source }
    }

    /// 설정된 위치에서 토큰을 꺼냅니다.
    ///
    /// `Authorization` 헤더의 스킴이 `Bearer`가 아니면 토큰이 없는 것으로 봅니다.
    pub fn extract_token(&self, req: &HttpRequest) -> Option<String> {
        match &self.source {
            TokenSource::Header => bearer_token(req),
            TokenSource::Cookie { name } => req.cookie(name).map(|c| c.value().trim().to_string()),
        }
    }

    /// 토큰을 검증하고 결과를 요청 extensions 에 기록합니다.
    ///
    /// # Returns
    ///
    /// * `AuthOutcome::Anonymous` - 토큰 없음
    /// * `AuthOutcome::Authenticated` - [`Identity`](crate::domain::Identity) 바인딩됨
    /// * `AuthOutcome::Unauthenticated` - [`RejectedCredential`] 기록됨
    pub async fn intercept(&self, req: &HttpRequest) -> AuthOutcome {
        let Some(token) = self.extract_token(req) else {
            log::debug!("인증 토큰 없음: {} {}", req.method(), req.path());
            return AuthOutcome::Anonymous;
        };

        match self.manager.authenticate(&token).await {
            Ok(identity) => {
                log::debug!("인증 성공 - 사용자: {}, 경로: {}", identity.subject, req.path());
                req.extensions_mut().insert(identity.clone());
                AuthOutcome::Authenticated(identity)
            }
            Err(err) => {
                match &err {
                    AuthError::KeyStore(cause) => {
                        log::error!("토큰 상태 조회 실패 - 토큰: {}, 원인: {}", redact(&token), cause)
                    }
                    _ => log::debug!("토큰 거부 ({}) - 토큰: {}", err.code(), redact(&token)),
                }
                req.extensions_mut().insert(RejectedCredential(err.clone()));
                AuthOutcome::Unauthenticated(err)
            }
        }
    }
}

/// `Authorization: Bearer <token>` 헤더에서 토큰을 꺼냅니다.
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?.trim();

    let scheme_len = BEARER_PREFIX.len() - 1;
    if value.len() < scheme_len || !value[..scheme_len].eq_ignore_ascii_case("Bearer") {
        return None;
    }

    let rest = &value[scheme_len..];
    if !rest.is_empty() && !rest.starts_with(' ') {
        // "Bearerxyz" 같은 다른 스킴
        return None;
    }

    Some(rest.trim().to_string())
}
