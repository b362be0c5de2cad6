//! 토큰 생명주기 관리
//!
//! 액세스/리프레시 토큰 발급, 로그아웃, 검증, 재발급을 담당합니다.
//! 서명 검증은 상태 없이 [`TokenCodec`]이 처리하고, 폐기 여부는 KeyStore 에 기록된
//! 상태로 판단합니다.
//!
//! ## 검증 규칙
//!
//! | 토큰 | KeyStore 값 | 결과 |
//! |------|-------------|------|
//! | 액세스 | `"logout"` | `TokenRevoked` |
//! | 액세스 | 없음 | 성공 |
//! | 리프레시 | 없음 | `RefreshExpired` |
//! | 리프레시 | 사용자명 | 성공 |

use std::sync::Arc;
use chrono::Duration;
use crate::core::auth_error::AuthError;
use crate::domain::models::auth::authenticated_user::Identity;
use crate::domain::models::token::{redact, DecodedToken, RevocationMarker, TokenPair, TokenType};
use crate::repositories::members::IdentitySource;
use crate::repositories::tokens::RevocationRepository;
use crate::services::auth::token_codec::TokenCodec;

pub struct TokenLifecycleManager {
    codec: TokenCodec,
    revocations: RevocationRepository,
    identities: Option<Arc<dyn IdentitySource>>,
    access_lifetime: Duration,
    refresh_lifetime: Duration,
}

impl TokenLifecycleManager {
    pub fn new(
        codec: TokenCodec,
        revocations: RevocationRepository,
        access_lifetime: Duration,
        refresh_lifetime: Duration,
    ) -> Self {
        Self {
            codec,
            revocations,
            identities: None,
            access_lifetime,
            refresh_lifetime,
        }
    }

    /// 재발급 시 불완전한 회원 정보를 보충할 조회 포트를 연결합니다.
    pub fn with_identity_source(mut self, identities: Arc<dyn IdentitySource>) -> Self {
        self.identities = Some(identities);
        self
    }

    /// 액세스/리프레시 토큰 쌍을 발급합니다.
    ///
    /// 리프레시 토큰은 남은 수명만큼의 TTL 로 KeyStore 에 등록되며,
    /// 액세스 토큰은 저장하지 않습니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::KeyStore` - 리프레시 토큰 등록 실패
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let pair = manager.issue_pair(&member.identity()).await?;
    /// ```
    pub async fn issue_pair(&self, identity: &Identity) -> Result<TokenPair, AuthError> {
        let access_token = self.codec.encode(identity, TokenType::Access, self.access_lifetime)?;
        let refresh_token = self.codec.encode(identity, TokenType::Refresh, self.refresh_lifetime)?;

        let expires_at = self.codec.expiry_of(&refresh_token)?;
        let ttl = self.codec.remaining_lifetime(expires_at);
        self.revocations
            .store_refresh_token(&refresh_token, &identity.subject, ttl)
            .await?;

        log::info!("토큰 발급 - 사용자: {}, 권한: {}", identity.subject, identity.role);

        Ok(TokenPair::bearer(
            access_token,
            refresh_token,
            self.access_lifetime.num_seconds(),
        ))
    }

    /// 액세스 토큰을 만료 전에 무효화합니다.
    ///
    /// 이미 만료된 토큰은 기록할 필요가 없으므로 아무 것도 쓰지 않고 성공합니다.
    ///
    /// # Errors
    ///
    /// * 코덱 에러 (`MalformedInput`, `SignatureInvalid`, `UnsupportedFormat`)
    /// * `UnsupportedFormat` - 리프레시 토큰을 전달한 경우
    /// * `KeyStore` - 기록 실패
    pub async fn logout(&self, access_token: &str) -> Result<(), AuthError> {
        let decoded = match self.codec.decode(access_token) {
            Ok(decoded) => decoded,
            Err(AuthError::TokenExpired) => {
                log::debug!("이미 만료된 토큰 로그아웃 요청: {}", redact(access_token));
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        if decoded.token_type != TokenType::Access {
            return Err(AuthError::UnsupportedFormat(
                "logout requires an access token".to_string(),
            ));
        }

        let ttl = self.codec.remaining_lifetime(decoded.expires_at);
        if ttl <= Duration::zero() {
            return Ok(());
        }

        self.revocations.mark_logged_out(access_token.trim(), ttl).await?;

        log::info!("로그아웃 - 사용자: {}", decoded.identity.subject);
        Ok(())
    }

    /// 토큰을 검증하고 회원 정보를 돌려줍니다.
    ///
    /// # Errors
    ///
    /// * 코덱 에러 (`TokenExpired`, `SignatureInvalid`, `MalformedInput`, `UnsupportedFormat`)
    /// * `TokenRevoked` - 로그아웃된 액세스 토큰
    /// * `RefreshExpired` - KeyStore 에 없는 리프레시 토큰
    /// * `KeyStore` - 조회 실패
    pub async fn validate(&self, token: &str) -> Result<Identity, AuthError> {
        self.check(token).await.map(|decoded| decoded.identity)
    }

    /// 요청 인가용 검증. [`validate`](Self::validate)에 더해 액세스 토큰만 허용합니다.
    ///
    /// 리프레시 토큰은 재발급에만 쓰이며 로그아웃으로 무효화되지 않으므로,
    /// 일반 요청의 인증 수단으로 받아들이지 않습니다.
    ///
    /// # Errors
    ///
    /// * [`validate`](Self::validate)의 모든 에러
    /// * `UnsupportedFormat` - 리프레시 토큰인 경우
    pub async fn authenticate(&self, token: &str) -> Result<Identity, AuthError> {
        let decoded = self.check(token).await?;

        if decoded.token_type != TokenType::Access {
            return Err(AuthError::UnsupportedFormat(
                "refresh token cannot authorize requests".to_string(),
            ));
        }

        Ok(decoded.identity)
    }

    /// 리프레시 토큰으로 새 액세스 토큰을 발급합니다.
    ///
    /// 리프레시 토큰은 소비되지 않으며 KeyStore 항목이 만료될 때까지 계속 사용할 수 있습니다.
    /// 토큰의 권한이나 이메일이 비어 있으면 회원 정보를 다시 조회합니다.
    ///
    /// # Errors
    ///
    /// * `UnsupportedFormat` - 리프레시 토큰이 아닌 경우
    /// * `RefreshExpired` - 재발급 가능 기간이 지났거나 리프레시 토큰 자체가 만료된 경우
    /// * `IdentityNotFound` - 보충 조회 시 회원이 없는 경우
    pub async fn rotate(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let decoded = match self.check(refresh_token).await {
            Ok(decoded) => decoded,
            // 서명 만료된 리프레시 토큰은 재로그인 대상
            Err(AuthError::TokenExpired) if self.codec.type_of(refresh_token) == Ok(TokenType::Refresh) => {
                return Err(AuthError::RefreshExpired);
            }
            Err(e) => return Err(e),
        };

        if decoded.token_type != TokenType::Refresh {
            return Err(AuthError::UnsupportedFormat(
                "reissue requires a refresh token".to_string(),
            ));
        }

        let identity = self.complete_identity(decoded.identity).await?;
        let access_token = self.codec.encode(&identity, TokenType::Access, self.access_lifetime)?;

        log::info!("액세스 토큰 재발급 - 사용자: {}", identity.subject);

        Ok(TokenPair::bearer(
            access_token,
            refresh_token.trim().to_string(),
            self.access_lifetime.num_seconds(),
        ))
    }

    async fn check(&self, token: &str) -> Result<DecodedToken, AuthError> {
        let decoded = self.codec.decode(token)?;
        let marker = self.revocations.marker(token.trim()).await?;

        match (decoded.token_type, marker) {
            (TokenType::Access, Some(RevocationMarker::Logout)) => Err(AuthError::TokenRevoked),
            (TokenType::Refresh, None) => Err(AuthError::RefreshExpired),
            _ => Ok(decoded),
        }
    }

    async fn complete_identity(&self, identity: Identity) -> Result<Identity, AuthError> {
        if !identity.is_incomplete() {
            return Ok(identity);
        }

        match &self.identities {
            Some(source) => source.find_by_subject(&identity.subject).await,
            None => Err(AuthError::IdentityNotFound(identity.subject)),
        }
    }
}
