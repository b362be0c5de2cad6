//! 해방 백엔드 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 인증 계층을 조립합니다.
//! MongoDB(회원)와 Redis(토큰 상태) 연결을 설정하고 JWT 인증 기반의 REST API를 제공합니다.

use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use haebang_backend::caching::{KeyStore, MemoryKeyStore, RedisClient};
use haebang_backend::config::{
    Environment, JwtSettings, KeyStoreBackend, MongoConfig, RateLimitConfig, RedisConfig, ServerConfig,
};
use haebang_backend::core::SystemClock;
use haebang_backend::db::Database;
use haebang_backend::middlewares::AuthMiddleware;
use haebang_backend::repositories::members::MongoMemberRepository;
use haebang_backend::routes::configure_all_routes;
use haebang_backend::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 해방 백엔드 시작중...");

    let environment = Environment::current();
    let jwt_settings = JwtSettings::from_env().expect("JWT 설정 오류");

    // 데이터 스토어 초기화
    let (database, key_store) = initialize_data_stores().await;

    let members = Arc::new(MongoMemberRepository::new(&database));
    if let Err(e) = members.ensure_indexes().await {
        error!("회원 컬렉션 인덱스 생성 실패: {}", e);
    }

    let state = AppState::build(
        &jwt_settings,
        environment,
        Arc::new(SystemClock),
        key_store,
        members,
    )
    .expect("인증 서비스 초기화 실패");

    info!(
        "✅ 인증 서비스 초기화 완료 (환경: {:?}, 토큰 위치: {:?})",
        environment, jwt_settings.token_source
    );

    // HTTP 서버 시작
    start_http_server(web::Data::new(state)).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, CORS, 로깅, 경로 정규화, 인증 게이트 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(state: web::Data<AppState>) -> std::io::Result<()> {
    let server_config = ServerConfig::from_env();
    let bind_address = server_config.bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 API: http://{}/api/member", bind_address);

    let rate_limit_config = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .expect("Rate Limiting 설정 오류");

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        let cors = configure_cors();

        App::new()
            .app_data(state.clone())
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            // 인증 게이트는 토큰을 검증해 요청에 회원 정보를 바인딩할 뿐 요청을 거부하지 않음
            .wrap(AuthMiddleware::new(state.gate.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(server_config.workers)
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// `RUST_LOG` 기반 로깅 초기화 (기본값: "info,actix_web=debug")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// MongoDB 와 토큰 상태 저장소를 초기화합니다
///
/// `KEY_STORE=memory` 이면 프로세스 메모리 저장소를 사용합니다. (단일 인스턴스 개발용)
///
/// # Panics
///
/// * MongoDB 연결 실패 시
/// * Redis 연결 실패 시
async fn initialize_data_stores() -> (Database, Arc<dyn KeyStore>) {
    info!("📡 데이터베이스 연결 중...");

    let database = Database::new(&MongoConfig::from_env())
        .await
        .expect("데이터베이스 연결 실패");

    info!("✅ MongoDB 연결 성공");

    let key_store: Arc<dyn KeyStore> = match KeyStoreBackend::from_env() {
        KeyStoreBackend::Redis => {
            let redis_client = RedisClient::new(&RedisConfig::from_env())
                .await
                .expect("Redis 연결 실패");
            info!("✅ Redis 연결 성공");
            Arc::new(redis_client)
        }
        KeyStoreBackend::Memory => {
            info!("⚠️ 메모리 토큰 저장소 사용 (재시작 시 로그아웃 상태 유실)");
            Arc::new(MemoryKeyStore::new(Arc::new(SystemClock)))
        }
    };

    (database, key_store)
}

/// CORS 설정을 구성합니다
///
/// 토큰 쿠키를 주고받기 위해 자격 증명을 허용합니다.
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            header::ACCESS_CONTROL_REQUEST_METHOD,
        ])
        .supports_credentials()
        .max_age(3600)
}
