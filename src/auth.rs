//! The boundary with the external authentication layer.
//!
//! Token verification happens upstream of this service: the fronting
//! proxy authenticates the caller and forwards the verified user ID as a
//! header on the internal hop. The middleware here turns that header into
//! a request extension and rejects requests that arrive without one.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{Error, models::UserID};

/// The request header carrying the verified caller identity.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Middleware function that requires a verified caller identity on the
/// request.
///
/// **Note**: Route handlers can use the function argument
/// `Extension(user_id): Extension<UserID>` to receive the user ID.
pub async fn identity_guard(mut request: Request, next: Next) -> Response {
    let user_id = match parse_identity(&request) {
        Some(user_id) => user_id,
        None => return Error::Unauthenticated.into_response(),
    };

    request.extensions_mut().insert(user_id);

    next.run(request).await
}

fn parse_identity(request: &Request) -> Option<UserID> {
    request
        .headers()
        .get(USER_ID_HEADER)?
        .to_str()
        .ok()?
        .parse::<i64>()
        .ok()
        .map(UserID::new)
}
