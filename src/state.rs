//! 애플리케이션 공유 상태
//!
//! `main`에서 한 번 조립되어 `web::Data<AppState>`로 모든 워커에 공유됩니다.
//! 내부 값은 모두 `Arc`로 감싼 불변 객체입니다.

use std::sync::Arc;
use chrono::Duration;
use crate::caching::KeyStore;
use crate::config::{Environment, JwtSettings, TokenSource, DEFAULT_ACCESS_COOKIE, DEFAULT_REFRESH_COOKIE};
use crate::core::auth_error::AuthError;
use crate::core::clock::Clock;
use crate::middlewares::AuthenticationGate;
use crate::repositories::members::{IdentitySource, MemberStore};
use crate::repositories::tokens::RevocationRepository;
use crate::services::auth::{TokenCodec, TokenLifecycleManager};
use crate::services::members::MemberService;

/// 토큰 쿠키 설정
#[derive(Debug, Clone)]
pub struct CookiePolicy {
    pub access_name: String,
    pub refresh_name: String,
    /// 운영 환경에서만 `Secure`
    pub secure: bool,
    pub access_max_age: Duration,
    pub refresh_max_age: Duration,
}

impl CookiePolicy {
    pub fn new(settings: &JwtSettings, environment: Environment) -> Self {
        let access_name = match &settings.token_source {
            TokenSource::Cookie { name } => name.clone(),
            TokenSource::Header => DEFAULT_ACCESS_COOKIE.to_string(),
        };

        Self {
            access_name,
            refresh_name: DEFAULT_REFRESH_COOKIE.to_string(),
            secure: environment.is_production(),
            access_max_age: settings.access_token_lifetime,
            refresh_max_age: settings.refresh_token_lifetime,
        }
    }
}

pub struct AppState {
    pub tokens: Arc<TokenLifecycleManager>,
    pub gate: Arc<AuthenticationGate>,
    pub members: Arc<MemberService>,
    pub cookies: CookiePolicy,
}

impl AppState {
    /// 설정과 저장소로 서비스 그래프를 조립합니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::Config` - 서명 키가 잘못된 경우 (기동 중단)
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let members = Arc::new(MongoMemberRepository::new(&database));
    /// let state = AppState::build(&settings, env, Arc::new(SystemClock), key_store, members)?;
    /// ```
    pub fn build<M>(
        settings: &JwtSettings,
        environment: Environment,
        clock: Arc<dyn Clock>,
        key_store: Arc<dyn KeyStore>,
        members: Arc<M>,
    ) -> Result<Self, AuthError>
    where
        M: MemberStore + 'static,
    {
        let codec = TokenCodec::new(&settings.secret, clock)?;
        let identities: Arc<dyn IdentitySource> = members.clone();
        let member_store: Arc<dyn MemberStore> = members;

        let tokens = Arc::new(
            TokenLifecycleManager::new(
                codec,
                RevocationRepository::new(key_store),
                settings.access_token_lifetime,
                settings.refresh_token_lifetime,
            )
            .with_identity_source(identities),
        );

        let gate = Arc::new(AuthenticationGate::new(tokens.clone(), settings.token_source.clone()));
        let members = Arc::new(MemberService::new(member_store, tokens.clone()));

        Ok(Self {
            tokens,
            gate,
            members,
            cookies: CookiePolicy::new(settings, environment),
        })
    }
}
