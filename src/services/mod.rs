//! 비즈니스 로직 계층
//!
//! - [`auth`] - 토큰 코덱과 토큰 생명주기 관리
//! - [`members`] - 회원 로그인

pub mod auth;
pub mod members;
