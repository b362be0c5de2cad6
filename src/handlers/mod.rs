//! HTTP 핸들러
//!
//! 핸들러는 요청을 서비스 호출로 옮기고 `AppError`를 그대로 반환합니다.
//! 상태 코드와 에러 본문은 `ResponseError` 구현이 결정합니다.

pub mod member_handlers;
