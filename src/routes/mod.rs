//! 라우트 구성
//!
//! 인증 게이트(`AuthMiddleware`)는 `main`에서 앱 전체에 적용되며,
//! 인증이 필요한 엔드포인트는 `AuthorizationGuard`로 개별 보호됩니다.

use actix_web::web;
use serde_json::json;
use crate::handlers;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);

    configure_member_routes(cfg);
}

fn configure_member_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/member")
            .service(handlers::member_handlers::login)
            .service(handlers::member_handlers::logout)
            .service(handlers::member_handlers::reissue)
            .service(handlers::member_handlers::me),
    );
}

#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "haebang_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, init_service, read_body_json, TestRequest};
    use actix_web::App;

    #[actix_web::test]
    async fn test_health_check() {
        let app = init_service(App::new().configure(configure_all_routes)).await;
        let resp = call_service(&app, TestRequest::get().uri("/health").to_request()).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = read_body_json(resp).await;
        assert_eq!(body["status"], "healthy");
    }
}
