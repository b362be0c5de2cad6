//! JWT 인코딩/디코딩
//!
//! HS256 서명과 만료 검증을 담당합니다. 시간은 주입된 [`Clock`]에서 가져오므로
//! 테스트에서 실제로 기다리지 않고 만료를 재현할 수 있습니다.
//!
//! ## 검증 순서
//!
//! 1. 빈 입력, 읽을 수 없는 헤더 → `MalformedInput`
//! 2. 서명 검증 → `SignatureInvalid`
//! 3. 서명 확인 후 클레임/`typ` 구조 검사 → `UnsupportedFormat`
//! 4. 만료 검사 (`now >= exp`) → `TokenExpired`
//!
//! 헤더는 서명보다 먼저 해석되므로, 헤더 단계의 실패는 `UnsupportedFormat`으로 분류하지 않습니다.
//!
//! 서명이 만료보다 먼저 검사되므로, 만료된 정상 토큰은 항상 `TokenExpired`가 됩니다.

use std::sync::Arc;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use crate::core::auth_error::AuthError;
use crate::core::clock::Clock;
use crate::domain::models::auth::authenticated_user::Identity;
use crate::domain::models::token::{DecodedToken, TokenClaims, TokenType};

/// HS256 서명 키 최소 길이 (256 bit)
pub const MIN_SECRET_BYTES: usize = 32;

pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    /// base64 로 인코딩된 서명 키로 코덱을 만듭니다.
    ///
    /// # Arguments
    ///
    /// * `secret_b64` - base64(STANDARD) 인코딩된 HMAC 키
    /// * `clock` - 발급/만료 판정에 사용할 시계
    ///
    /// # Errors
    ///
    /// * `AuthError::Config` - 키가 비어 있거나, base64 가 아니거나, 32바이트 미만인 경우
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let codec = TokenCodec::new(&settings.secret, Arc::new(SystemClock))?;
    /// ```
    pub fn new(secret_b64: &str, clock: Arc<dyn Clock>) -> Result<Self, AuthError> {
        let secret_b64 = secret_b64.trim();
        if secret_b64.is_empty() {
            return Err(AuthError::Config("JWT secret is empty".to_string()));
        }

        let secret = STANDARD
            .decode(secret_b64)
            .map_err(|e| AuthError::Config(format!("JWT secret is not valid base64: {}", e)))?;

        if secret.len() < MIN_SECRET_BYTES {
            return Err(AuthError::Config(format!(
                "JWT secret must be at least {} bytes, got {}",
                MIN_SECRET_BYTES,
                secret.len()
            )));
        }

        // 만료는 주입된 시계로 직접 판정
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(&secret),
            decoding_key: DecodingKey::from_secret(&secret),
            validation,
            clock,
        })
    }

    /// 회원 정보를 담은 서명 토큰을 만듭니다.
    ///
    /// `iat`는 현재 시각, `exp`는 `현재 시각 + lifetime` (초 단위)입니다.
    pub fn encode(&self, identity: &Identity, token_type: TokenType, lifetime: Duration) -> Result<String, AuthError> {
        let now = self.clock.now();
        let claims = TokenClaims {
            username: identity.subject.clone(),
            auth: identity.role.clone(),
            email: identity.email.clone(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some(token_type.as_str().to_string());

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| AuthError::Config(format!("토큰 서명 실패: {}", e)))
    }

    /// 서명과 만료를 검증하고 토큰 내용을 돌려줍니다.
    ///
    /// # Errors
    ///
    /// * `MalformedInput` - 빈 입력, 세 부분으로 나뉘지 않는 문자열
    /// * `SignatureInvalid` - 서명 불일치, 다른 알고리즘, 디코딩 불가한 서명
    /// * `UnsupportedFormat` - 클레임 누락, JSON 이 아닌 payload, 알 수 없는 `typ`
    /// * `TokenExpired` - 서명은 유효하지만 `now >= exp`
    pub fn decode(&self, token: &str) -> Result<DecodedToken, AuthError> {
        let decoded = self.verify(token)?;

        if self.clock.now() >= decoded.expires_at {
            return Err(AuthError::TokenExpired);
        }

        Ok(decoded)
    }

    /// 서명이나 만료를 확인하지 않고 헤더의 토큰 종류만 읽습니다.
    pub fn type_of(&self, token: &str) -> Result<TokenType, AuthError> {
        let token = non_empty(token)?;
        let header = decode_header(token).map_err(unreadable_header)?;
        token_type_of(&header)
    }

    /// 서명은 검증하되 만료는 무시하고 `exp`를 돌려줍니다.
    pub fn expiry_of(&self, token: &str) -> Result<DateTime<Utc>, AuthError> {
        Ok(self.verify(token)?.expires_at)
    }

    /// `exp`까지 남은 시간 (밀리초 단위, 이미 지났으면 0 이하)
    pub fn remaining_lifetime(&self, expires_at: DateTime<Utc>) -> Duration {
        Duration::milliseconds(expires_at.timestamp_millis() - self.clock.now().timestamp_millis())
    }

    fn verify(&self, token: &str) -> Result<DecodedToken, AuthError> {
        let token = non_empty(token)?;
        decode_header(token).map_err(unreadable_header)?;

        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(classify)?;
        let token_type = token_type_of(&data.header)?;

        Ok(DecodedToken {
            token_type,
            identity: data.claims.identity(),
            issued_at: timestamp(data.claims.iat, "iat")?,
            expires_at: timestamp(data.claims.exp, "exp")?,
        })
    }
}

fn non_empty(token: &str) -> Result<&str, AuthError> {
    let token = token.trim();
    if token.is_empty() {
        Err(AuthError::MalformedInput)
    } else {
        Ok(token)
    }
}

fn token_type_of(header: &Header) -> Result<TokenType, AuthError> {
    let typ = header
        .typ
        .as_deref()
        .ok_or_else(|| AuthError::UnsupportedFormat("missing typ header".to_string()))?;

    TokenType::from_header(typ)
        .ok_or_else(|| AuthError::UnsupportedFormat(format!("unknown token type '{}'", typ)))
}

fn timestamp(secs: i64, claim: &str) -> Result<DateTime<Utc>, AuthError> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| AuthError::UnsupportedFormat(format!("{} out of range", claim)))
}

/// 서명 검증 전 헤더 해석 실패. 서명되지 않은 입력이므로 구조 문제로 보지 않습니다.
fn unreadable_header(err: jsonwebtoken::errors::Error) -> AuthError {
    log::debug!("토큰 헤더 해석 실패: {}", err);
    AuthError::MalformedInput
}

/// jsonwebtoken 에러를 인증 실패 종류로 분류합니다.
///
/// 헤더가 이미 읽힌 뒤에만 호출되므로, payload 의 디코딩/역직렬화 실패는 서명 확인 이후에 발생합니다.
fn classify(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::InvalidToken => AuthError::MalformedInput,
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::Json(_) | ErrorKind::Utf8(_) | ErrorKind::Base64(_) => {
            AuthError::UnsupportedFormat(err.to_string())
        }
        ErrorKind::MissingRequiredClaim(claim) => {
            AuthError::UnsupportedFormat(format!("missing claim '{}'", claim))
        }
        _ => AuthError::SignatureInvalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use chrono::TimeZone;
    use crate::core::clock::ManualClock;
    use crate::testing::{TEST_SECRET, test_identity};

    fn codec() -> (Arc<ManualClock>, TokenCodec) {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let clock = Arc::new(ManualClock::starting_at(start));
        let codec = TokenCodec::new(TEST_SECRET, clock.clone()).unwrap();
        (clock, codec)
    }

    fn tamper_signature(token: &str) -> String {
        let (head, signature) = token.rsplit_once('.').unwrap();
        let mut chars: Vec<char> = signature.chars().collect();
        chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
        format!("{}.{}", head, chars.into_iter().collect::<String>())
    }

    #[test]
    fn test_decode_returns_encoded_identity_and_type() {
        let (clock, codec) = codec();
        let identity = test_identity();

        let token = codec.encode(&identity, TokenType::Access, Duration::seconds(60)).unwrap();
        let decoded = codec.decode(&token).unwrap();

        assert_eq!(decoded.identity, identity);
        assert_eq!(decoded.token_type, TokenType::Access);
        assert_eq!(decoded.issued_at, clock.now());
        assert_eq!(decoded.expires_at, clock.now() + Duration::seconds(60));
        assert_eq!(codec.type_of(&token).unwrap(), TokenType::Access);
    }

    #[test]
    fn test_expired_token_is_token_expired_not_signature_invalid() {
        let (clock, codec) = codec();
        let token = codec.encode(&test_identity(), TokenType::Access, Duration::seconds(2)).unwrap();

        clock.advance(Duration::milliseconds(1999));
        assert!(codec.decode(&token).is_ok());

        clock.advance(Duration::milliseconds(1));
        assert_eq!(codec.decode(&token), Err(AuthError::TokenExpired));

        // 만료와 무관하게 exp 는 조회 가능
        assert!(codec.expiry_of(&token).is_ok());
    }

    #[test]
    fn test_tampered_signature_is_rejected() {
        let (_clock, codec) = codec();
        let token = codec.encode(&test_identity(), TokenType::Access, Duration::seconds(60)).unwrap();

        assert_eq!(codec.decode(&tamper_signature(&token)), Err(AuthError::SignatureInvalid));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let (clock, codec) = codec();
        let other_secret = STANDARD.encode([7u8; 48]);
        let other = TokenCodec::new(&other_secret, clock).unwrap();

        let token = other.encode(&test_identity(), TokenType::Refresh, Duration::seconds(60)).unwrap();
        assert_eq!(codec.decode(&token), Err(AuthError::SignatureInvalid));
        // 헤더는 서명 확인 없이 읽힘
        assert_eq!(codec.type_of(&token).unwrap(), TokenType::Refresh);
    }

    #[test]
    fn test_empty_and_garbage_input_is_malformed() {
        let (_clock, codec) = codec();

        assert_eq!(codec.decode(""), Err(AuthError::MalformedInput));
        assert_eq!(codec.decode("   "), Err(AuthError::MalformedInput));
        assert_eq!(codec.decode("not-a-token"), Err(AuthError::MalformedInput));
        assert_eq!(codec.type_of(""), Err(AuthError::MalformedInput));
    }

    #[test]
    fn test_unknown_type_tag_is_unsupported() {
        let (clock, codec) = codec();
        let claims = TokenClaims {
            username: "alice".to_string(),
            auth: "USER".to_string(),
            email: "a@x.com".to_string(),
            iat: clock.now().timestamp(),
            exp: clock.now().timestamp() + 60,
        };
        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        let secret = STANDARD.decode(TEST_SECRET).unwrap();
        let token = encode(&header, &claims, &EncodingKey::from_secret(&secret)).unwrap();

        assert!(matches!(codec.decode(&token), Err(AuthError::UnsupportedFormat(_))));
        assert!(matches!(codec.type_of(&token), Err(AuthError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_unsigned_token_with_unreadable_header_is_malformed() {
        let (_clock, codec) = codec();
        let payload = URL_SAFE_NO_PAD.encode(r#"{"username":"alice"}"#);

        let broken_json = format!("{}.{}.sig", URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"#), payload);
        assert_eq!(codec.decode(&broken_json), Err(AuthError::MalformedInput));
        assert_eq!(codec.type_of(&broken_json), Err(AuthError::MalformedInput));

        let alg_none = format!("{}.{}.", URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"ATK"}"#), payload);
        assert_eq!(codec.decode(&alg_none), Err(AuthError::MalformedInput));

        let not_base64 = format!("!!!.{}.sig", payload);
        assert_eq!(codec.decode(&not_base64), Err(AuthError::MalformedInput));
    }

    #[test]
    fn test_missing_claims_are_unsupported() {
        let (clock, codec) = codec();
        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("ATK".to_string());
        let payload = serde_json::json!({ "username": "alice", "exp": clock.now().timestamp() + 60 });
        let secret = STANDARD.decode(TEST_SECRET).unwrap();
        let token = encode(&header, &payload, &EncodingKey::from_secret(&secret)).unwrap();

        assert!(matches!(codec.decode(&token), Err(AuthError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_invalid_secret_is_config_error() {
        let clock = Arc::new(ManualClock::starting_at(Utc::now()));

        assert!(matches!(TokenCodec::new("", clock.clone()), Err(AuthError::Config(_))));
        assert!(matches!(TokenCodec::new("%%not base64%%", clock.clone()), Err(AuthError::Config(_))));

        let short = STANDARD.encode([1u8; 16]);
        assert!(matches!(TokenCodec::new(&short, clock), Err(AuthError::Config(_))));
    }

    #[test]
    fn test_remaining_lifetime_in_millis() {
        let (clock, codec) = codec();
        let token = codec.encode(&test_identity(), TokenType::Access, Duration::seconds(10)).unwrap();
        let exp = codec.expiry_of(&token).unwrap();

        clock.advance(Duration::milliseconds(2500));
        assert_eq!(codec.remaining_lifetime(exp), Duration::milliseconds(7500));
    }
}
