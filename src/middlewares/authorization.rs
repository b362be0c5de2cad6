//! 인가 가드
//!
//! [`AuthMiddleware`](crate::middlewares::AuthMiddleware)가 남긴 인증 결과를 보고
//! 라우트 스코프 단위로 접근을 막습니다.
//!
//! | 상황 | 응답 |
//! |------|------|
//! | 토큰 없음 | 401 `AUTHENTICATION_REQUIRED` |
//! | 토큰 거부됨 | 401 거부 사유 코드 (`EXPIRED_ACCESS_TOKEN` 등) |
//! | 권한 부족 | 403 `INSUFFICIENT_PERMISSIONS` |

use std::future::{ready, Ready};
use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;
use crate::domain::models::auth::{AccessDenied, Identity, RejectedCredential, RequiredRole};

pub struct AuthorizationGuard {
    required_role: Option<RequiredRole>,
}

impl AuthorizationGuard {
    /// 인증된 회원이면 통과
    pub fn authenticated() -> Self {
        Self { required_role: None }
    }

    pub fn with_role(role: &str) -> Self {
        Self {
            required_role: Some(RequiredRole::Single(role.to_string())),
        }
    }

    pub fn with_any_role(roles: Vec<&str>) -> Self {
        Self {
            required_role: Some(RequiredRole::Any(roles.into_iter().map(str::to_string).collect())),
        }
    }

    /// 요청 extensions 에 기록된 인증 결과로 접근 가능 여부를 판정합니다.
    fn check(required_role: Option<&RequiredRole>, req: &ServiceRequest) -> Result<(), AccessDenied> {
        let extensions = req.extensions();

        let Some(identity) = extensions.get::<Identity>() else {
            let reason = extensions.get::<RejectedCredential>().map(|r| r.0.clone());
            return Err(AccessDenied::Unauthenticated(reason));
        };

        if let Some(required) = required_role {
            if !required.is_satisfied(&identity.role) {
                log::warn!(
                    "권한 부족 - 사용자: {} ({}), 필요 권한: {:?}",
                    identity.subject,
                    identity.role,
                    required
                );
                return Err(AccessDenied::Forbidden);
            }
        }

        Ok(())
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthorizationGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthorizationGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthorizationGuardService {
            service: Rc::new(service),
            required_role: self.required_role.clone(),
        }))
    }
}

pub struct AuthorizationGuardService<S> {
    service: Rc<S>,
    required_role: Option<RequiredRole>,
}

impl<S, B> Service<ServiceRequest> for AuthorizationGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let decision = AuthorizationGuard::check(self.required_role.as_ref(), &req);

        Box::pin(async move {
            if let Err(denied) = decision {
                log::debug!("접근 거부 ({}): {}", denied.code(), req.path());
                let response = denied.error_response();
                let (req, _) = req.into_parts();
                return Ok(ServiceResponse::new(req, response).map_into_right_body());
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;
    use crate::core::AuthError;

    fn request_with(identity: Option<Identity>, rejected: Option<AuthError>) -> ServiceRequest {
        let req = TestRequest::default().to_srv_request();
        if let Some(identity) = identity {
            req.extensions_mut().insert(identity);
        }
        if let Some(err) = rejected {
            req.extensions_mut().insert(RejectedCredential(err));
        }
        req
    }

    #[test]
    fn test_any_role_guard() {
        let guard = AuthorizationGuard::with_any_role(vec!["USER", "ADMIN"]);
        let admin = request_with(Some(Identity::new("root", "ADMIN", "r@x.com")), None);
        let guest = request_with(Some(Identity::new("g", "GUEST", "g@x.com")), None);

        assert!(AuthorizationGuard::check(guard.required_role.as_ref(), &admin).is_ok());
        assert_eq!(
            AuthorizationGuard::check(guard.required_role.as_ref(), &guest),
            Err(AccessDenied::Forbidden)
        );
    }

    #[test]
    fn test_rejected_credential_is_reported() {
        let req = request_with(None, Some(AuthError::SignatureInvalid));
        let denied = AuthorizationGuard::check(None, &req).unwrap_err();

        assert_eq!(denied.code(), "INVALID_TOKEN");
        assert_eq!(denied.status_code(), StatusCode::UNAUTHORIZED);
    }
}
