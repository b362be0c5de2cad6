//! # KeyStore 추상화
//!
//! 토큰 폐기/재발급 상태를 담는 TTL 지원 키-값 저장소 인터페이스입니다.
//! 키는 토큰 문자열 전체, 값은 `"logout"` 또는 리프레시 토큰의 사용자명입니다.
//!
//! ## 구현체
//!
//! | 구현체 | 용도 |
//! |--------|------|
//! | [`RedisClient`](crate::caching::redis::RedisClient) | 운영 환경 |
//! | [`MemoryKeyStore`](crate::caching::memory::MemoryKeyStore) | 테스트, Redis 없는 로컬 실행 |

use async_trait::async_trait;
use chrono::Duration;
use thiserror::Error;

/// KeyStore 접근 실패
#[derive(Error, Debug)]
pub enum KeyStoreError {
    /// 저장소에 연결할 수 없음
    #[error("connection failed: {0}")]
    Connection(String),

    /// 명령 실행 실패
    #[error("command failed: {0}")]
    Command(String),
}

impl From<redis::RedisError> for KeyStoreError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_connection_dropped() || err.is_connection_refusal() || err.is_timeout() {
            KeyStoreError::Connection(err.to_string())
        } else {
            KeyStoreError::Command(err.to_string())
        }
    }
}

/// TTL 지원 키-값 저장소
///
/// 모든 연산은 단일 키 단위로 원자적입니다.
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// 값을 저장하고 `ttl` 이후 자동으로 만료시킵니다.
    ///
    /// `ttl`이 0 이하이면 값을 보관하지 않으며, 기존 값이 있으면 삭제합니다.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), KeyStoreError>;

    /// 만료되지 않은 값을 조회합니다.
    async fn get(&self, key: &str) -> Result<Option<String>, KeyStoreError>;

    /// 키를 삭제합니다. 키가 없어도 성공입니다.
    async fn delete(&self, key: &str) -> Result<(), KeyStoreError>;
}
