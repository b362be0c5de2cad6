//! # Redis KeyStore
//!
//! 운영 환경에서 사용하는 [`KeyStore`] 구현체입니다.
//! `ConnectionManager`를 사용하므로 연결이 끊겨도 다음 명령에서 자동으로 재연결되며,
//! 클론 비용이 작아 요청마다 복제해 사용합니다.
//!
//! TTL은 밀리초 단위(`PSETEX`)로 저장되어 토큰 만료 시각과 정확히 맞춰집니다.

use async_trait::async_trait;
use chrono::Duration;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use crate::caching::key_store::{KeyStore, KeyStoreError};
use crate::config::RedisConfig;

/// Redis 클라이언트 래퍼
#[derive(Clone)]
pub struct RedisClient {
    conn: ConnectionManager,
}

impl RedisClient {
    /// Redis 에 연결하고 `PING`으로 가용성을 확인합니다.
    ///
    /// # Arguments
    ///
    /// * `config` - `REDIS_URL` 기반 연결 설정
    ///
    /// # Errors
    ///
    /// * `KeyStoreError::Connection` - 잘못된 URL, 서버 연결 실패, 인증 실패
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let redis = RedisClient::new(&RedisConfig::from_env()).await?;
    /// ```
    pub async fn new(config: &RedisConfig) -> Result<Self, KeyStoreError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| KeyStoreError::Connection(e.to_string()))?;

        let mut conn = ConnectionManager::new(client)
            .await
            .map_err(|e| KeyStoreError::Connection(e.to_string()))?;

        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        log::info!("Redis 연결 성공: {}", config.display_url());

        Ok(Self { conn })
    }
}

#[async_trait]
impl KeyStore for RedisClient {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), KeyStoreError> {
        let mut conn = self.conn.clone();
        let millis = ttl.num_milliseconds();

        if millis <= 0 {
            let _: () = conn.del(key).await?;
            return Ok(());
        }

        let _: () = conn.pset_ex(key, value, millis as u64).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, KeyStoreError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn delete(&self, key: &str) -> Result<(), KeyStoreError> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(key).await?;
        Ok(())
    }
}
