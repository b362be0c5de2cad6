//! # Domain Layer Module
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - MongoDB 에 저장되는 회원 문서
//! ├── dto       - 요청/응답 본문
//! └── models    - 토큰, 회원 식별 정보, 인증 결과
//! ```
//!
//! 토큰 관련 타입은 저장소와 무관한 값 객체이며, 토큰 한 번 발급되면 변경되지 않습니다.

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::{Member, DEFAULT_ROLE};
pub use dto::{ApiResponse, LoginRequest, LogoutRequest, MemberResponse};
pub use models::{
    AccessDenied, AuthOutcome, AuthenticatedMember, DecodedToken, Identity, OptionalMember,
    RejectedCredential, RequiredRole, RevocationMarker, TokenClaims, TokenPair, TokenType,
};
