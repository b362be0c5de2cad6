//! # Authentication Configuration
//!
//! JWT 서명 키, 토큰 수명, 토큰 추출 위치 설정입니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! JWT_SECRET="<base64, 디코딩 후 32바이트 이상>"   # 필수
//! JWT_ACCESS_TOKEN_SECONDS=3600                     # 액세스 토큰 수명 (초)
//! JWT_REFRESH_TOKEN_SECONDS=1209600                 # 리프레시 토큰 수명 (초, 14일)
//! AUTH_TOKEN_SOURCE=header                          # header | cookie
//! AUTH_COOKIE_NAME=ATK                              # cookie 모드에서 읽을 쿠키 이름
//! ```
//!
//! 서명 키가 없거나 수명이 0 이하이면 [`AuthError::Config`]로 기동이 중단됩니다.

use chrono::Duration;
use crate::config::data_config::{env_lookup, parse_or};
use crate::core::auth_error::AuthError;

pub const DEFAULT_ACCESS_TOKEN_SECONDS: i64 = 3600;
pub const DEFAULT_REFRESH_TOKEN_SECONDS: i64 = 14 * 24 * 3600;
pub const DEFAULT_ACCESS_COOKIE: &str = "ATK";
pub const DEFAULT_REFRESH_COOKIE: &str = "RTK";

/// 요청에서 토큰을 꺼낼 위치
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// `Authorization: Bearer <token>` 헤더
    Header,
    /// 이름이 지정된 쿠키
    Cookie { name: String },
}

impl TokenSource {
    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: &F) -> Result<Self, AuthError> {
        let source = lookup("AUTH_TOKEN_SOURCE").unwrap_or_else(|| "header".to_string());

        match source.trim().to_lowercase().as_str() {
            "header" => Ok(TokenSource::Header),
            "cookie" => Ok(TokenSource::Cookie {
                name: lookup("AUTH_COOKIE_NAME")
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_ACCESS_COOKIE.to_string()),
            }),
            other => Err(AuthError::Config(format!(
                "AUTH_TOKEN_SOURCE must be 'header' or 'cookie', got '{}'",
                other
            ))),
        }
    }
}

/// JWT 관련 설정 묶음
#[derive(Debug, Clone)]
pub struct JwtSettings {
    /// base64 인코딩된 HMAC 서명 키
    pub secret: String,
    pub access_token_lifetime: Duration,
    pub refresh_token_lifetime: Duration,
    pub token_source: TokenSource,
}

impl JwtSettings {
    /// 프로세스 환경 변수에서 설정을 읽습니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::Config` - `JWT_SECRET` 누락, 수명 0 이하, 알 수 없는 토큰 추출 위치
    pub fn from_env() -> Result<Self, AuthError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, AuthError> {
        let secret = lookup("JWT_SECRET")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AuthError::Config("JWT_SECRET must be set".to_string()))?;

        let access_seconds = parse_or(&lookup, "JWT_ACCESS_TOKEN_SECONDS", DEFAULT_ACCESS_TOKEN_SECONDS);
        let refresh_seconds = parse_or(&lookup, "JWT_REFRESH_TOKEN_SECONDS", DEFAULT_REFRESH_TOKEN_SECONDS);

        if access_seconds <= 0 || refresh_seconds <= 0 {
            return Err(AuthError::Config(format!(
                "token lifetimes must be positive (access={}, refresh={})",
                access_seconds, refresh_seconds
            )));
        }

        Ok(Self {
            secret,
            access_token_lifetime: Duration::seconds(access_seconds),
            refresh_token_lifetime: Duration::seconds(refresh_seconds),
            token_source: TokenSource::from_lookup(&lookup)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_secret_only() {
        let settings = JwtSettings::from_lookup(lookup_from(&[("JWT_SECRET", "c2VjcmV0")])).unwrap();

        assert_eq!(settings.secret, "c2VjcmV0");
        assert_eq!(settings.access_token_lifetime, Duration::hours(1));
        assert_eq!(settings.refresh_token_lifetime, Duration::days(14));
        assert_eq!(settings.token_source, TokenSource::Header);
    }

    #[test]
    fn test_missing_secret_is_config_error() {
        assert!(matches!(
            JwtSettings::from_lookup(lookup_from(&[])),
            Err(AuthError::Config(_))
        ));
        assert!(matches!(
            JwtSettings::from_lookup(lookup_from(&[("JWT_SECRET", "   ")])),
            Err(AuthError::Config(_))
        ));
    }

    #[test]
    fn test_non_positive_lifetime_is_config_error() {
        let result = JwtSettings::from_lookup(lookup_from(&[
            ("JWT_SECRET", "c2VjcmV0"),
            ("JWT_ACCESS_TOKEN_SECONDS", "0"),
        ]));
        assert!(matches!(result, Err(AuthError::Config(_))));
    }

    #[test]
    fn test_cookie_source() {
        let settings = JwtSettings::from_lookup(lookup_from(&[
            ("JWT_SECRET", "c2VjcmV0"),
            ("AUTH_TOKEN_SOURCE", "Cookie"),
        ]))
        .unwrap();
        assert_eq!(settings.token_source, TokenSource::Cookie { name: "ATK".to_string() });

        let settings = JwtSettings::from_lookup(lookup_from(&[
            ("JWT_SECRET", "c2VjcmV0"),
            ("AUTH_TOKEN_SOURCE", "cookie"),
            ("AUTH_COOKIE_NAME", "access"),
        ]))
        .unwrap();
        assert_eq!(settings.token_source, TokenSource::Cookie { name: "access".to_string() });
    }

    #[test]
    fn test_unknown_source_is_config_error() {
        let result = JwtSettings::from_lookup(lookup_from(&[
            ("JWT_SECRET", "c2VjcmV0"),
            ("AUTH_TOKEN_SOURCE", "query"),
        ]));
        assert!(matches!(result, Err(AuthError::Config(_))));
    }
}
