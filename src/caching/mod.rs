//! 캐싱 계층 모듈
//!
//! 토큰 폐기/재발급 상태를 보관하는 KeyStore 와 그 구현체를 제공합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::{KeyStore, redis::RedisClient};
//!
//! let store = RedisClient::new(&RedisConfig::from_env()).await?;
//! store.set(&access_token, "logout", Duration::milliseconds(ttl_ms)).await?;
//! let marker = store.get(&access_token).await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! KEY_STORE=memory                  # Redis 없이 메모리 저장소 사용
//! ```

pub mod key_store;
pub mod memory;
pub mod redis;

pub use key_store::{KeyStore, KeyStoreError};
pub use memory::MemoryKeyStore;
pub use self::redis::RedisClient;
