//! 테스트 공용 fixture
//!
//! 수동 시계와 메모리 KeyStore 로 구성한 토큰 관리자, 고정 회원 저장소를 제공합니다.

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use crate::caching::key_store::{KeyStore, KeyStoreError};
use crate::caching::memory::MemoryKeyStore;
use crate::core::clock::ManualClock;
use crate::core::errors::AppError;
use crate::domain::entities::members::member::Member;
use crate::domain::models::auth::authenticated_user::Identity;
use crate::repositories::members::{IdentitySource, MemberStore};
use crate::repositories::tokens::RevocationRepository;
use crate::services::auth::token_codec::TokenCodec;
use crate::services::auth::token_service::TokenLifecycleManager;

/// base64("haebang-test-signing-key-0123456789abcdef"), 41바이트
pub const TEST_SECRET: &str = "aGFlYmFuZy10ZXN0LXNpZ25pbmcta2V5LTAxMjM0NTY3ODlhYmNkZWY=";

pub fn test_identity() -> Identity {
    Identity::new("alice", "USER", "a@x.com")
}

pub struct Fixture {
    pub clock: Arc<ManualClock>,
    pub store: Arc<MemoryKeyStore>,
    pub manager: Arc<TokenLifecycleManager>,
    access_seconds: i64,
    refresh_seconds: i64,
}

impl Fixture {
    pub fn with_identity_source(self, identities: Arc<dyn IdentitySource>) -> Self {
        let manager = build_manager(&self.clock, self.store.clone(), self.access_seconds, self.refresh_seconds)
            .with_identity_source(identities);
        Self {
            manager: Arc::new(manager),
            ..self
        }
    }
}

/// 정각에서 시작하는 수동 시계 기반 fixture
pub fn fixture(access_seconds: i64, refresh_seconds: i64) -> Fixture {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let clock = Arc::new(ManualClock::starting_at(start));
    let store = Arc::new(MemoryKeyStore::new(clock.clone()));
    let manager = build_manager(&clock, store.clone(), access_seconds, refresh_seconds);

    Fixture {
        clock,
        store,
        manager: Arc::new(manager),
        access_seconds,
        refresh_seconds,
    }
}

fn build_manager(
    clock: &Arc<ManualClock>,
    store: Arc<dyn KeyStore>,
    access_seconds: i64,
    refresh_seconds: i64,
) -> TokenLifecycleManager {
    let codec = TokenCodec::new(TEST_SECRET, clock.clone()).unwrap();
    TokenLifecycleManager::new(
        codec,
        RevocationRepository::new(store),
        Duration::seconds(access_seconds),
        Duration::seconds(refresh_seconds),
    )
}

/// 모든 연산이 연결 실패를 반환하는 KeyStore
pub struct FailingKeyStore;

#[async_trait]
impl KeyStore for FailingKeyStore {
    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), KeyStoreError> {
        Err(KeyStoreError::Connection("connection refused".to_string()))
    }

    async fn get(&self, _key: &str) -> Result<Option<String>, KeyStoreError> {
        Err(KeyStoreError::Connection("connection refused".to_string()))
    }

    async fn delete(&self, _key: &str) -> Result<(), KeyStoreError> {
        Err(KeyStoreError::Connection("connection refused".to_string()))
    }
}

pub fn failing_manager() -> TokenLifecycleManager {
    let clock = Arc::new(ManualClock::starting_at(Utc::now()));
    build_manager(&clock, Arc::new(FailingKeyStore), 60, 100)
}

/// 고정된 회원 목록을 가진 저장소 (비밀번호는 bcrypt 해시로 저장)
pub struct StaticMemberStore {
    members: HashMap<String, Member>,
}

impl StaticMemberStore {
    pub fn empty() -> Self {
        Self { members: HashMap::new() }
    }

    pub fn with_member(username: &str, role: &str, email: &str, password: &str) -> Self {
        // 테스트 속도를 위해 최소 cost 사용
        let hash = bcrypt::hash(password, 4).unwrap();
        let mut member = Member::new(username.to_string(), email.to_string(), hash);
        member.role = role.to_string();

        let mut members = HashMap::new();
        members.insert(username.to_string(), member);
        Self { members }
    }
}

#[async_trait]
impl MemberStore for StaticMemberStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Member>, AppError> {
        Ok(self.members.get(username).cloned())
    }
}
