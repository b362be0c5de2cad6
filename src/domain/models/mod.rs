//! # Domain Models
//!
//! 저장소에 영속되지 않는 인증 관련 모델입니다.
//!
//! - [`auth`] - 회원 식별 정보, 인증 결과, 인가 요구사항
//! - [`token`] - 토큰 종류, 클레임, 발급 응답, 폐기 마커

pub mod auth;
pub mod token;

pub use auth::*;
pub use token::*;
