//! # Core Module
//!
//! 애플리케이션 전역에서 쓰이는 기반 타입을 모아 둔 모듈입니다.
//!
//! - [`errors`] - HTTP 응답으로 변환되는 `AppError`
//! - [`auth_error`] - 토큰 인증 실패 분류 `AuthError`
//! - [`clock`] - 토큰 만료와 TTL 계산에 쓰이는 시간 소스

pub mod auth_error;
pub mod clock;
pub mod errors;

pub use auth_error::AuthError;
pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::*;
