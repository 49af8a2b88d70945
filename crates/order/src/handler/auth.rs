use crate::domain::auth::{AuthContext, Role};
use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use shared::errors::{ErrorKind, HttpError};
use tracing::warn;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Builds the caller's context from the identity headers set by the
/// upstream gateway.
pub fn auth_from_headers(headers: &HeaderMap) -> AuthContext {
    let user_id = headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<i32>().ok());

    let role = headers
        .get(USER_ROLE_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<Role>().ok())
        .unwrap_or(Role::Guest);

    AuthContext::new(user_id, role)
}

/// Lets only signed-in admin or staff through and hands the context
/// to handlers as an extension.
pub async fn staff_middleware(mut req: Request, next: Next) -> Result<Response, HttpError> {
    let auth = auth_from_headers(req.headers());

    if !auth.can_manage_orders() {
        warn!(
            "⛔ Rejected {} {} for role {:?}",
            req.method(),
            req.uri().path(),
            auth.role
        );
        return Err(HttpError {
            kind: ErrorKind::Forbidden,
            message: "Only staff or admin may access this resource".into(),
        });
    }

    req.extensions_mut().insert(auth);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(user: Option<&str>, role: Option<&str>) -> HeaderMap {
        let mut map = HeaderMap::new();
        if let Some(user) = user {
            map.insert(USER_ID_HEADER, HeaderValue::from_str(user).unwrap());
        }
        if let Some(role) = role {
            map.insert(USER_ROLE_HEADER, HeaderValue::from_str(role).unwrap());
        }
        map
    }

    #[test]
    fn staff_headers_grant_access() {
        let auth = auth_from_headers(&headers(Some("12"), Some("Staff")));
        assert_eq!(auth, AuthContext::staff(12));
        assert!(auth.can_manage_orders());
    }

    #[test]
    fn missing_or_malformed_headers_fall_back_to_guest() {
        let anonymous = auth_from_headers(&headers(None, None));
        assert_eq!(anonymous, AuthContext::new(None, Role::Guest));

        let garbled = auth_from_headers(&headers(Some("abc"), Some("admin")));
        assert_eq!(garbled.user_id, None);
        assert!(!garbled.can_manage_orders());
    }
}
