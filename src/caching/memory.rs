//! 메모리 KeyStore
//!
//! 주입된 [`Clock`] 기준으로 만료를 판정하는 `HashMap` 기반 저장소입니다.
//! 만료된 항목은 해당 키를 조회할 때와, 값을 저장할 때마다 전체적으로 정리됩니다.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use crate::caching::key_store::{KeyStore, KeyStoreError};
use crate::core::clock::Clock;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

pub struct MemoryKeyStore {
    entries: RwLock<HashMap<String, Entry>>,
    clock: Arc<dyn Clock>,
}

impl MemoryKeyStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// 만료되지 않은 항목 수
    pub fn len(&self) -> usize {
        let now = self.clock.now();
        self.entries
            .read()
            .map(|entries| entries.values().filter(|e| e.expires_at > now).count())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn poisoned() -> KeyStoreError {
        KeyStoreError::Command("memory store lock poisoned".to_string())
    }
}

#[async_trait]
impl KeyStore for MemoryKeyStore {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), KeyStoreError> {
        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;
        let now = self.clock.now();
        entries.retain(|_, entry| entry.expires_at > now);

        if ttl <= Duration::zero() {
            entries.remove(key);
            return Ok(());
        }

        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: now + ttl,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, KeyStoreError> {
        let now = self.clock.now();

        {
            let entries = self.entries.read().map_err(|_| Self::poisoned())?;
            match entries.get(key) {
                Some(entry) if entry.expires_at > now => return Ok(Some(entry.value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        // 만료된 항목 정리
        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;
        if entries.get(key).is_some_and(|e| e.expires_at <= now) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn delete(&self, key: &str) -> Result<(), KeyStoreError> {
        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;
        entries.remove(key);
        Ok(())
    }
}
