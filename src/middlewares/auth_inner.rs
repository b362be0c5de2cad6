//! AuthMiddleware 가 감싸는 서비스
use std::rc::Rc;
use std::sync::Arc;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::Error;
use futures_util::future::LocalBoxFuture;
use crate::middlewares::auth_gate::AuthenticationGate;

pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub gate: Arc<AuthenticationGate>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let gate = self.gate.clone();

        Box::pin(async move {
            // 결과는 extensions 에 기록되므로 여기서는 분기하지 않음
            gate.intercept(req.request()).await;

            service.call(req).await
        })
    }
}
