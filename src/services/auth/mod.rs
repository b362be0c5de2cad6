//! 인증 서비스 모듈
//!
//! - [`token_codec`] - HS256 서명/검증, 만료 판정
//! - [`token_service`] - 발급, 로그아웃, 검증, 재발급
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{TokenCodec, TokenLifecycleManager};
//!
//! let codec = TokenCodec::new(&settings.secret, clock)?;
//! let manager = TokenLifecycleManager::new(codec, revocations, access, refresh);
//! let pair = manager.issue_pair(&identity).await?;
//! let identity = manager.validate(&pair.access_token).await?;
//! ```

pub mod token_codec;
pub mod token_service;

pub use token_codec::*;
pub use token_service::*;
