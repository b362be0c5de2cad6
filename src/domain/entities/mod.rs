//! # Domain Entities
//!
//! MongoDB 에 영속되는 문서 타입입니다.

pub mod members;

pub use members::*;
