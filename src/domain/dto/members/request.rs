use serde::Deserialize;
use validator::Validate;

/// 아이디/비밀번호 로그인 요청
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50, message = "아이디를 입력해주세요"))]
    pub username: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 로그아웃 요청 본문
///
/// 웹 클라이언트는 쿠키에 든 토큰을 본문에도 함께 보냅니다. 본문의 `access_token`은
/// 인증 게이트와 같은 위치(헤더 또는 쿠키)에 토큰이 없을 때만 사용됩니다.
/// 그 밖의 필드는 무시됩니다.
#[derive(Debug, Default, Deserialize)]
pub struct LogoutRequest {
    pub access_token: Option<String>,
}
