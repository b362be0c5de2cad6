use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};
use crate::core::auth_error::AuthError;
use crate::core::errors::AppError;
use crate::db::Database;
use crate::domain::entities::members::member::Member;
use crate::domain::models::auth::authenticated_user::Identity;

pub const MEMBER_COLLECTION: &str = "members";

/// 회원 조회 저장소
#[async_trait]
pub trait MemberStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<Member>, AppError>;
}

/// 사용자명으로 토큰에 담을 회원 정보를 찾는 조회 포트
///
/// 재발급 시 리프레시 토큰에 권한이나 이메일이 비어 있을 때 사용됩니다.
#[async_trait]
pub trait IdentitySource: Send + Sync {
    /// # Errors
    ///
    /// * `AuthError::IdentityNotFound` - 회원이 없거나 조회에 실패한 경우
    async fn find_by_subject(&self, subject: &str) -> Result<Identity, AuthError>;
}

#[async_trait]
impl<T: MemberStore + ?Sized> IdentitySource for T {
    async fn find_by_subject(&self, subject: &str) -> Result<Identity, AuthError> {
        match self.find_by_username(subject).await {
            Ok(Some(member)) => Ok(member.identity()),
            Ok(None) => Err(AuthError::IdentityNotFound(subject.to_string())),
            Err(e) => {
                log::error!("회원 조회 실패 - 사용자: {}, 원인: {}", subject, e);
                Err(AuthError::IdentityNotFound(subject.to_string()))
            }
        }
    }
}

/// MongoDB `members` 컬렉션 저장소
#[derive(Clone)]
pub struct MongoMemberRepository {
    collection: Collection<Member>,
}

impl MongoMemberRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.get_database().collection::<Member>(MEMBER_COLLECTION),
        }
    }

    /// `username` 고유 인덱스를 생성합니다. 이미 있으면 아무 일도 하지 않습니다.
    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        let index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection
            .create_index(index)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl MemberStore for MongoMemberRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Member>, AppError> {
        self.collection
            .find_one(doc! { "username": username })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}
