//! 회원 인증 HTTP 핸들러
//!
//! | Method | Path | 인증 | 설명 |
//! |--------|------|------|------|
//! | POST | `/api/member/login` | - | 로그인, 토큰 쌍 발급 + 쿠키 설정 |
//! | POST | `/api/member/logout` | - | 액세스 토큰 무효화 + 쿠키 삭제 |
//! | GET | `/api/member/reissue` | 리프레시 토큰 | 액세스 토큰 재발급 |
//! | GET | `/api/member/me` | 필요 | 로그인한 회원 정보 |

use actix_web::cookie::{time, Cookie, SameSite};
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use chrono::Duration;
use crate::core::auth_error::AuthError;
use crate::core::errors::AppError;
use crate::domain::dto::members::{ApiResponse, LoginRequest, LogoutRequest, MemberResponse};
use crate::domain::models::auth::AuthenticatedMember;
use crate::middlewares::auth_gate::bearer_token;
use crate::middlewares::AuthorizationGuard;
use crate::state::{AppState, CookiePolicy};

pub const USERNAME_COOKIE: &str = "username";

fn token_cookie<'c>(name: &str, value: &str, max_age: Duration, policy: &CookiePolicy) -> Cookie<'c> {
    Cookie::build(name.to_string(), value.to_string())
        .path("/")
        .http_only(true)
        .secure(policy.secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age.num_seconds()))
        .finish()
}

fn removal_cookie<'c>(name: &str) -> Cookie<'c> {
    let mut cookie = Cookie::build(name.to_string(), "").path("/").finish();
    cookie.make_removal();
    cookie
}

#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let (member, pair) = state.members.login(&payload).await?;
    let policy = &state.cookies;

    let mut username = token_cookie(USERNAME_COOKIE, &member.username, policy.refresh_max_age, policy);
    username.set_http_only(false);

    Ok(HttpResponse::Ok()
        .cookie(token_cookie(&policy.access_name, &pair.access_token, policy.access_max_age, policy))
        .cookie(token_cookie(&policy.refresh_name, &pair.refresh_token, policy.refresh_max_age, policy))
        .cookie(username)
        .json(ApiResponse::success(pair)))
}

/// 현재 요청의 액세스 토큰을 무효화하고 토큰 쿠키를 삭제합니다.
///
/// 인증 없이 호출할 수 있으므로 만료된 토큰을 가진 클라이언트도 로그아웃할 수 있습니다.
/// 폐기 대상은 인증 게이트와 같은 위치에서 꺼낸 토큰이며,
/// 그 위치에 토큰이 없을 때만 본문의 `access_token`을 사용합니다.
///
/// 토큰이 없거나 이미 쓸 수 없는 토큰이면 기록 없이 쿠키만 삭제합니다.
/// KeyStore 장애는 그대로 에러로 반환됩니다.
#[post("/logout")]
pub async fn logout(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: Option<web::Json<LogoutRequest>>,
) -> Result<HttpResponse, AppError> {
    let token = state
        .gate
        .extract_token(&req)
        .or_else(|| body.and_then(|b| b.into_inner().access_token));

    match token {
        Some(token) => match state.tokens.logout(&token).await {
            Ok(()) => log::info!("로그아웃 처리 완료"),
            Err(err @ AuthError::KeyStore(_)) => return Err(err.into()),
            Err(err) => log::debug!("폐기할 수 없는 토큰으로 로그아웃 ({})", err.code()),
        },
        None => log::debug!("토큰 없이 로그아웃 요청"),
    }

    let policy = &state.cookies;
    Ok(HttpResponse::Ok()
        .cookie(removal_cookie(&policy.access_name))
        .cookie(removal_cookie(&policy.refresh_name))
        .cookie(removal_cookie(USERNAME_COOKIE))
        .json(ApiResponse::message("로그아웃 되었습니다")))
}

/// 리프레시 토큰으로 액세스 토큰을 재발급합니다.
///
/// 리프레시 토큰은 `Authorization: Bearer` 헤더에서 먼저 찾고, 없으면 `RTK` 쿠키를 사용합니다.
#[get("/reissue")]
pub async fn reissue(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let policy = &state.cookies;
    let refresh_token = bearer_token(&req)
        .or_else(|| req.cookie(&policy.refresh_name).map(|c| c.value().to_string()))
        .ok_or(AppError::Auth(AuthError::MalformedInput))?;

    let pair = state.tokens.rotate(&refresh_token).await?;

    Ok(HttpResponse::Ok()
        .cookie(token_cookie(&policy.access_name, &pair.access_token, policy.access_max_age, policy))
        .json(ApiResponse::success(pair)))
}

#[get("/me", wrap = "AuthorizationGuard::authenticated()")]
pub async fn me(member: AuthenticatedMember) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(MemberResponse::from(member.identity())))
}
