//! 인증 미들웨어
//!
//! 모든 요청을 [`AuthenticationGate`]에 통과시킨 뒤 다음 서비스로 넘깁니다.
//! 이 미들웨어는 요청을 거부하지 않으며, 인증 결과는 요청 extensions 에만 기록됩니다.
//!
//! ```rust,ignore
//! App::new()
//!     .wrap(AuthMiddleware::new(gate.clone()))
//!     .service(
//!         web::scope("/api/mypage")
//!             .wrap(AuthorizationGuard::authenticated())
//!             .service(mypage),
//!     )
//! ```

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;
use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};
use crate::middlewares::auth_gate::AuthenticationGate;
use crate::middlewares::auth_inner::AuthMiddlewareService;

pub struct AuthMiddleware {
    gate: Arc<AuthenticationGate>,
}

impl AuthMiddleware {
    pub fn new(gate: Arc<AuthenticationGate>) -> Self {
        Self { gate }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            gate: self.gate.clone(),
        }))
    }
}
