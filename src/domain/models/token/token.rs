//! JWT 토큰 도메인 모델
//!
//! 토큰 종류, 클레임, 디코딩 결과, 발급 응답, 폐기 마커를 정의합니다.
//!
//! ## 토큰 구조
//!
//! ```text
//! header  { "alg": "HS256", "typ": "ATK" | "RTK" }
//! payload { "username", "auth", "email", "iat", "exp" }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::domain::models::auth::authenticated_user::Identity;

/// 토큰 종류
///
/// JWT 헤더의 `typ` 값으로 직렬화되며, 리터럴은 클라이언트와 공유됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    /// 액세스 토큰 (`ATK`)
    #[serde(rename = "ATK")]
    Access,
    /// 리프레시 토큰 (`RTK`)
    #[serde(rename = "RTK")]
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "ATK",
            TokenType::Refresh => "RTK",
        }
    }

    /// 헤더 `typ` 문자열을 해석합니다. 알 수 없는 값은 `None`.
    pub fn from_header(typ: &str) -> Option<Self> {
        match typ {
            "ATK" => Some(TokenType::Access),
            "RTK" => Some(TokenType::Refresh),
            _ => None,
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 사용자명 (subject)
    pub username: String,
    /// 권한 (예: `USER`, `ADMIN`)
    pub auth: String,
    pub email: String,
    /// 발급 시각 (Unix timestamp, 초)
    pub iat: i64,
    /// 만료 시각 (Unix timestamp, 초)
    pub exp: i64,
}

impl TokenClaims {
    pub fn identity(&self) -> Identity {
        Identity {
            subject: self.username.clone(),
            role: self.auth.clone(),
            email: self.email.clone(),
        }
    }
}

/// 서명과 만료가 검증된 토큰
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedToken {
    pub token_type: TokenType,
    pub identity: Identity,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// 토큰 발급 응답
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// 항상 `"Bearer"`
    pub grant_type: String,
    pub access_token: String,
    pub refresh_token: String,
    /// 액세스 토큰 수명 (초)
    pub expires_in: i64,
}

impl TokenPair {
    pub fn bearer(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            grant_type: "Bearer".to_string(),
            access_token,
            refresh_token,
            expires_in,
        }
    }
}

/// KeyStore 에 저장되는 토큰 상태 값
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevocationMarker {
    /// 로그아웃으로 무효화된 액세스 토큰
    Logout,
    /// 재발급 가능한 리프레시 토큰의 소유자
    Subject(String),
}

impl RevocationMarker {
    pub const LOGOUT: &'static str = "logout";

    pub fn parse(raw: &str) -> Self {
        if raw == Self::LOGOUT {
            RevocationMarker::Logout
        } else {
            RevocationMarker::Subject(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RevocationMarker::Logout => Self::LOGOUT,
            RevocationMarker::Subject(subject) => subject,
        }
    }
}

/// 로그 출력용으로 토큰 앞부분만 남깁니다.
pub fn redact(token: &str) -> String {
    let prefix: String = token.chars().take(12).collect();
    if prefix.len() < token.len() {
        format!("{}...", prefix)
    } else {
        prefix
    }
}
