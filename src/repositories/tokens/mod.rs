//! 토큰 상태 리포지토리 모듈
//!
//! 리프레시 토큰의 재발급 가능 여부와 액세스 토큰의 로그아웃 여부를 KeyStore 에 기록합니다.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::repositories::tokens::RevocationRepository;
//!
//! let repo = RevocationRepository::new(key_store);
//! repo.store_refresh_token(&refresh_token, "alice", ttl).await?;
//! repo.mark_logged_out(&access_token, ttl).await?;
//! ```

pub mod token_repository;

pub use token_repository::*;
