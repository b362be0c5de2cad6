//! 해방 매물 서비스 백엔드
//!
//! 상태 없는 서명 토큰(JWT)과 Redis 기반 토큰 상태 저장소로 구성된 인증 계층입니다.
//! 짧은 수명의 액세스 토큰과 긴 수명의 리프레시 토큰을 발급하고,
//! 로그아웃/재발급 상태는 토큰 잔여 수명만큼의 TTL 로 KeyStore 에 기록합니다.
//!
//! # Architecture
//!
//! ```text
//! client
//!   │
//!   ▼
//! AuthMiddleware ── AuthenticationGate ── TokenLifecycleManager ── TokenCodec
//!   │                                           │
//!   ▼                                           ▼
//! AuthorizationGuard                       KeyStore (Redis / memory)
//!   │
//!   ▼
//! Handlers ── MemberService ── MemberStore (MongoDB)
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! let state = AppState::build(&settings, env, Arc::new(SystemClock), key_store, members)?;
//! let pair = state.tokens.issue_pair(&identity).await?;
//! let identity = state.tokens.validate(&pair.access_token).await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod routes;
pub mod handlers;
pub mod middlewares;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;
