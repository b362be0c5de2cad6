use std::sync::Arc;
use validator::Validate;
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::dto::members::LoginRequest;
use crate::domain::entities::members::member::Member;
use crate::domain::models::token::TokenPair;
use crate::repositories::members::MemberStore;
use crate::services::auth::token_service::TokenLifecycleManager;

const INVALID_CREDENTIALS: &str = "아이디 또는 비밀번호가 올바르지 않습니다";

/// 회원 로그인 서비스
pub struct MemberService {
    members: Arc<dyn MemberStore>,
    tokens: Arc<TokenLifecycleManager>,
}

impl MemberService {
    pub fn new(members: Arc<dyn MemberStore>, tokens: Arc<TokenLifecycleManager>) -> Self {
        Self { members, tokens }
    }

    /// 아이디/비밀번호를 확인하고 토큰 쌍을 발급합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 빈 아이디 또는 비밀번호
    /// * `AppError::AuthenticationError` - 회원이 없거나 비밀번호 불일치
    /// * `AppError::Auth` - 토큰 발급 실패 (KeyStore 장애 등)
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let pair = member_service.login(request).await?;
    /// ```
    pub async fn login(&self, request: &LoginRequest) -> AppResult<(Member, TokenPair)> {
        request
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let member = self.verify_password(&request.username, &request.password).await?;
        let pair = self.tokens.issue_pair(&member.identity()).await?;

        log::info!("로그인 성공 - 사용자: {}", member.username);
        Ok((member, pair))
    }

    async fn verify_password(&self, username: &str, password: &str) -> AppResult<Member> {
        let member = self
            .members
            .find_by_username(username)
            .await?
            .ok_or_else(|| {
                log::warn!("로그인 실패 - 존재하지 않는 사용자: {}", username);
                AppError::AuthenticationError(INVALID_CREDENTIALS.to_string())
            })?;

        let is_valid = bcrypt::verify(password, &member.password_hash).context("비밀번호 검증 실패")?;

        if !is_valid {
            log::warn!("로그인 실패 - 비밀번호 불일치: {}", username);
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
        }

        Ok(member)
    }
}
