//! Request identity and role gates.
//!
//! Authentication happens upstream (SSO proxy). The proxy forwards the user id
//! in `X-User-Id` and the user's directory groups in `X-User-Groups`
//! (comma-separated). This layer turns them into a [`CurrentUser`] stored in
//! the request extensions; handlers receive it as `Extension<CurrentUser>`.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

use super::AppState;
use crate::access::{CurrentUser, RoleSet, View};
use crate::config::split_list;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_GROUPS_HEADER: &str = "x-user-groups";

/// Resolve the caller into a [`CurrentUser`]. Requests without a user id are rejected.
pub async fn identify_user(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    let user_id = header_value(&request, USER_ID_HEADER).filter(|id| !id.is_empty());
    let Some(user_id) = user_id else {
        tracing::warn!("Missing {} header", USER_ID_HEADER);
        return Err((StatusCode::UNAUTHORIZED, "Authentication required".to_string()));
    };

    let groups = header_value(&request, USER_GROUPS_HEADER)
        .map(|value| split_list(&value))
        .unwrap_or_default();
    let roles = RoleSet::from_groups(groups.as_slice(), &state.config.role_groups);
    tracing::debug!(user = %user_id, ?roles, "Identified user");

    request
        .extensions_mut()
        .insert(CurrentUser::new(user_id, roles));
    Ok(next.run(request).await)
}

/// Reject the request unless the identified user may open `view`.
pub fn require(user: &CurrentUser, view: View) -> Result<(), (StatusCode, String)> {
    user.authorize(view).map_err(|denied| {
        tracing::warn!(user = %user.id, ?view, "Access denied");
        (StatusCode::FORBIDDEN, denied.to_string())
    })
}

fn header_value(request: &Request<Body>, name: &str) -> Option<String> {
    request
        .headers()
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.trim().to_string())
}
