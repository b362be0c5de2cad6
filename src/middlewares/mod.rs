//! 미들웨어 모듈
//!
//! # 제공 미들웨어
//!
//! ### 1. 인증 미들웨어 (AuthMiddleware)
//! - 설정된 위치(Bearer 헤더 또는 쿠키)에서 토큰 추출
//! - 토큰 검증 후 [`Identity`](crate::domain::Identity)를 request extension 에 저장
//! - 실패해도 요청을 막지 않고 실패 사유만 기록
//!
//! ### 2. 인가 가드 (AuthorizationGuard)
//! - 스코프 단위로 인증/권한 요구
//! - 401/403 응답 생성
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! App::new()
//!     .wrap(AuthMiddleware::new(gate.clone())) // 모든 요청에 인증 게이트
//!     .service(
//!         web::scope("/api/mypage")
//!             .wrap(AuthorizationGuard::authenticated()) // 보호된 라우트
//!             .service(mypage)
//!     )
//! ```

pub mod auth_gate;
pub mod auth_middleware;
pub mod authorization;
mod auth_inner;

pub use auth_gate::AuthenticationGate;
pub use auth_middleware::AuthMiddleware;
pub use authorization::AuthorizationGuard;
