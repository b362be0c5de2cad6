//! # Data Transfer Objects
//!
//! HTTP 요청 본문과 응답 본문 타입입니다.

pub mod members;

pub use members::*;
