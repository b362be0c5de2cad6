//! 회원 엔티티
//!
//! MongoDB `members` 컬렉션에 저장되는 회원 문서입니다.
//! 로그인 시 이 문서에서 토큰에 담을 [`Identity`]를 만듭니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::domain::models::auth::authenticated_user::Identity;

pub const DEFAULT_ROLE: &str = "USER";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 로그인 아이디 (고유)
    pub username: String,
    pub email: String,
    /// bcrypt 해시
    pub password_hash: String,
    #[serde(default = "default_role")]
    pub role: String,
    pub created_at: DateTime,
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

impl Member {
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            id: None,
            username,
            email,
            password_hash,
            role: default_role(),
            created_at: DateTime::now(),
        }
    }

    pub fn identity(&self) -> Identity {
        Identity::new(&self.username, &self.role, &self.email)
    }
}
