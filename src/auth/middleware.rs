//! Authentication and role gates.
//!
//! `AuthMiddleware` must wrap outside `AdminOnly` on admin routes: actix runs the
//! last `.wrap()` first, so register them as `.wrap(AdminOnly).wrap(AuthMiddleware)`.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::extractors::AuthenticatedUser;
use crate::auth::token::TokenService;
use crate::error::AppError;

/// Scheme word expected in the `Authorization` header. Existing clients send
/// `token <jwt>`, not `Bearer <jwt>`.
pub const AUTH_SCHEME_PREFIX: &str = "token ";

/// Returns the raw token from an `Authorization` header value, if it uses our scheme.
pub fn extract_token(header_value: Option<&str>) -> Option<&str> {
    header_value
        .and_then(|value| value.strip_prefix(AUTH_SCHEME_PREFIX))
        .filter(|token| !token.is_empty())
}

fn reject<B>(req: ServiceRequest, err: AppError) -> ServiceResponse<EitherBody<B>> {
    let response = err.error_response();
    req.into_response(response).map_into_right_body()
}

/// Validates the request's token and attaches an `AuthenticatedUser` to it.
///
/// Requires a `web::Data<TokenService>` in app data.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = extract_token(
            req.headers()
                .get("Authorization")
                .and_then(|value| value.to_str().ok()),
        )
        .map(str::to_owned);

        // Wrong or missing scheme is rejected before the token is ever decoded.
        let Some(token) = token else {
            let err = AppError::Unauthorized("missing or invalid token".into());
            return Box::pin(async move { Ok(reject(req, err)) });
        };

        let Some(tokens) = req.app_data::<web::Data<TokenService>>().cloned() else {
            log::error!("TokenService is not registered as app data");
            let err = AppError::InternalServerError("authentication unavailable".into());
            return Box::pin(async move { Ok(reject(req, err)) });
        };

        match tokens.validate(&token) {
            Ok(claims) => {
                req.extensions_mut().insert(AuthenticatedUser {
                    username: claims.username,
                    role: claims.role,
                });
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            Err(token_err) => {
                log::warn!("Rejected token on {} {}: {}", req.method(), req.path(), token_err);
                let err = AppError::Unauthorized("invalid token".into());
                Box::pin(async move { Ok(reject(req, err)) })
            }
        }
    }
}

/// Lets the request through only if `AuthMiddleware` attached an identity whose role
/// is exactly `"Admin"`.
///
/// Without an attached identity the request is rejected as unauthenticated, never as
/// forbidden.
pub struct AdminOnly;

impl<S, B> Transform<S, ServiceRequest> for AdminOnly
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AdminOnlyService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminOnlyService { service }))
    }
}

pub struct AdminOnlyService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AdminOnlyService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let decision = match req.extensions().get::<AuthenticatedUser>() {
            None => Err(AppError::Unauthorized("missing or invalid token".into())),
            Some(user) if user.is_admin() => Ok(()),
            Some(user) => {
                log::warn!(
                    "User {} with role {} denied {} {}",
                    user.username,
                    user.role,
                    req.method(),
                    req.path()
                );
                Err(AppError::Forbidden("admin access only".into()))
            }
        };

        match decision {
            Ok(()) => {
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            Err(err) => Box::pin(async move { Ok(reject(req, err)) }),
        }
    }
}
