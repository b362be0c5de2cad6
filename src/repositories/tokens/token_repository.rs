use std::sync::Arc;
use chrono::Duration;
use crate::caching::key_store::{KeyStore, KeyStoreError};
use crate::domain::models::token::{redact, RevocationMarker};

/// 토큰 상태(폐기/재발급 가능) 저장소
///
/// KeyStore 위에서 토큰 문자열 전체를 키로 사용합니다.
///
/// | 상황 | 키 | 값 | TTL |
/// |------|----|----|-----|
/// | 리프레시 토큰 발급 | 리프레시 토큰 | 사용자명 | 토큰 잔여 수명 |
/// | 로그아웃 | 액세스 토큰 | `"logout"` | 토큰 잔여 수명 |
///
/// TTL 이 토큰 잔여 수명과 같으므로 항목은 토큰이 만료되는 시점에 함께 사라집니다.
#[derive(Clone)]
pub struct RevocationRepository {
    store: Arc<dyn KeyStore>,
}

impl RevocationRepository {
    pub fn new(store: Arc<dyn KeyStore>) -> Self {
        Self { store }
    }

    /// 리프레시 토큰을 재발급 가능 상태로 등록합니다.
    pub async fn store_refresh_token(
        &self,
        refresh_token: &str,
        subject: &str,
        ttl: Duration,
    ) -> Result<(), KeyStoreError> {
        self.store.set(refresh_token, subject, ttl).await?;

        log::debug!(
            "리프레시 토큰 등록 - 사용자: {}, 토큰: {}, TTL: {}ms",
            subject,
            redact(refresh_token),
            ttl.num_milliseconds()
        );
        Ok(())
    }

    /// 액세스 토큰을 로그아웃 상태로 표시합니다.
    pub async fn mark_logged_out(&self, access_token: &str, ttl: Duration) -> Result<(), KeyStoreError> {
        self.store.set(access_token, RevocationMarker::LOGOUT, ttl).await?;

        log::debug!(
            "로그아웃 표시 - 토큰: {}, TTL: {}ms",
            redact(access_token),
            ttl.num_milliseconds()
        );
        Ok(())
    }

    /// 토큰에 기록된 상태를 조회합니다.
    pub async fn marker(&self, token: &str) -> Result<Option<RevocationMarker>, KeyStoreError> {
        let value = self.store.get(token).await.map_err(|e| {
            log::error!("KeyStore 조회 실패 - 토큰: {}, 원인: {}", redact(token), e);
            e
        })?;

        Ok(value.as_deref().map(RevocationMarker::parse))
    }
}
