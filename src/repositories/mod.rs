//! 데이터 액세스 계층
//!
//! - [`members`] - MongoDB 회원 조회, 재발급용 회원 정보 조회 포트
//! - [`tokens`] - KeyStore 기반 토큰 상태 기록
//!
//! 저장소는 trait 객체(`Arc<dyn ...>`)로 서비스에 주입되므로 테스트에서는 메모리 구현으로 교체됩니다.

pub mod members;
pub mod tokens;
