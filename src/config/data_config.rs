//! # Data & Server Configuration
//!
//! 서버 바인딩, 데이터 저장소(MongoDB, Redis), Rate Limiting, 실행 환경 설정입니다.
//! 모든 설정은 환경 변수에서 읽으며, 값이 없거나 파싱에 실패하면 기본값을 사용합니다.
//!
//! 각 설정 타입은 `from_env()`와 테스트용 `from_lookup()`을 제공합니다.
//! `from_lookup()`은 임의의 조회 함수를 받아 프로세스 환경을 건드리지 않고 검증할 수 있습니다.
//!
//! ## 환경 변수
//!
//! | 변수 | 기본값 |
//! |------|--------|
//! | `ENVIRONMENT` | `production` |
//! | `HOST` / `PORT` / `WORKERS` | `127.0.0.1` / `8080` / `4` |
//! | `REDIS_URL` | `redis://localhost:6379` |
//! | `KEY_STORE` | `redis` (`memory` 선택 가능) |
//! | `MONGODB_URI` / `DATABASE_NAME` | `mongodb://localhost:27017` / `haebang_dev` |
//! | `RATE_LIMIT_PER_SECOND` / `RATE_LIMIT_BURST_SIZE` | `100` / `200` |

use std::env;
use std::str::FromStr;

/// 환경 변수 조회 함수 (`env::var`의 대체 가능 버전)
pub(crate) fn env_lookup(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// 숫자 설정값을 읽고, 없거나 잘못된 경우 기본값을 사용합니다.
pub(crate) fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display + Copy,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse::<T>().unwrap_or_else(|e| {
            log::error!("{} 파싱 실패: {}. 기본값 {} 사용", key, e, default);
            default
        }),
        None => default,
    }
}

/// 실행 환경
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// `ENVIRONMENT` 환경 변수로 현재 환경을 결정합니다. 알 수 없는 값은 `Production`.
    pub fn current() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        lookup("ENVIRONMENT")
            .map(|value| Self::parse(&value))
            .unwrap_or(Environment::Production)
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// HTTP 서버 바인딩 설정
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8080u16),
            workers: parse_or(&lookup, "WORKERS", 4usize).max(1),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Redis 연결 설정
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisConfig {
    pub url: String,
}

impl RedisConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        Self {
            url: lookup("REDIS_URL").unwrap_or_else(|| "redis://localhost:6379".to_string()),
        }
    }

    /// 로그 출력용 URL (비밀번호 마스킹)
    pub fn display_url(&self) -> String {
        match (self.url.find("://"), self.url.rfind('@')) {
            (Some(scheme_end), Some(at)) if at > scheme_end => {
                format!("{}://***@{}", &self.url[..scheme_end], &self.url[at + 1..])
            }
            _ => self.url.clone(),
        }
    }
}

/// 토큰 상태 저장소 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStoreBackend {
    Redis,
    Memory,
}

impl KeyStoreBackend {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        match lookup("KEY_STORE").map(|v| v.to_lowercase()).as_deref() {
            Some("memory") => KeyStoreBackend::Memory,
            _ => KeyStoreBackend::Redis,
        }
    }
}

/// MongoDB 연결 설정
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    pub uri: String,
    pub database_name: String,
}

impl MongoConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        Self {
            uri: lookup("MONGODB_URI").unwrap_or_else(|| "mongodb://localhost:27017".to_string()),
            database_name: lookup("DATABASE_NAME").unwrap_or_else(|| "haebang_dev".to_string()),
        }
    }
}

/// Rate Limiting 설정
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        Self {
            per_second: parse_or(&lookup, "RATE_LIMIT_PER_SECOND", 100u64).max(1),
            burst_size: parse_or(&lookup, "RATE_LIMIT_BURST_SIZE", 200u32).max(1),
        }
    }
}
