//! # Configuration Module
//!
//! 환경 변수 기반 설정을 한곳에서 관리합니다.
//! `.env.<profile>` 파일은 `main`에서 먼저 로드되며, 이 모듈은 로드된 환경 변수를 읽기만 합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 서버, MongoDB, Redis, Rate Limiting, 실행 환경
//! - [`auth_config`] - JWT 서명 키, 토큰 수명, 토큰 추출 위치
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{JwtSettings, ServerConfig};
//!
//! let jwt = JwtSettings::from_env().expect("JWT 설정 오류");
//! let server = ServerConfig::from_env();
//! println!("bind: {}", server.bind_address());
//! ```

pub mod auth_config;
pub mod data_config;

pub use auth_config::*;
pub use data_config::{
    Environment, KeyStoreBackend, MongoConfig, RateLimitConfig, RedisConfig, ServerConfig,
};
