use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::extract::TypedHeader;
use db::repositories::UserRepository;
use headers::{Authorization, authorization::Bearer};
use services::{Identity, user_service::UserService};
use util::state::AppState;

use crate::auth::{
    claims::AuthUser,
    decode_jwt,
    guards::Empty,
};
use crate::response::ApiResponse;
use crate::routes::common::service_error_response;

/// Extracts `AuthUser` from a `Bearer` token in the `Authorization` header.
///
/// # Errors
/// - `401 Unauthorized` if the header is missing, malformed, or the token is invalid or expired.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| (StatusCode::UNAUTHORIZED, "Missing or invalid Authorization header"))?;

        let claims = decode_jwt(bearer.token())
            .map_err(|_| (StatusCode::UNAUTHORIZED, "Invalid or expired token"))?;

        Ok(AuthUser(claims))
    }
}

/// The authenticated caller with its role resolved from the `users` table.
///
/// The token only proves who the caller is; whether they are an admin is read
/// fresh on every request.
#[derive(Debug, Clone, Copy)]
pub struct Caller(pub Identity);

impl FromRequestParts<AppState> for Caller {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ApiResponse::<Empty>::error("Authentication required")),
                )
                    .into_response()
            })?;

        UserService::new(UserRepository::new(state.db_clone()))
            .identify(claims.sub)
            .await
            .map(Caller)
            .map_err(service_error_response)
    }
}
