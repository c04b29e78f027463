//! Development-mode identity.
//!
//! Requests carry the acting role in `X-Dev-User-Role` and optionally a user
//! id in `X-Dev-User-Id`. A bearer token may be present too; it is accepted
//! as is.

use axum::{
    extract::{Request, State},
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Error as AxumError, Header, HeaderMapExt};
use engine::Role;

use crate::{ServerError, server::ServerState};

static DEV_USER_ROLE: HeaderName = HeaderName::from_static(api_types::headers::DEV_USER_ROLE);
static DEV_USER_ID: HeaderName = HeaderName::from_static(api_types::headers::DEV_USER_ID);

/// `TypedHeader` for the acting role.
#[derive(Debug, PartialEq)]
pub(crate) struct DevUserRole(pub Role);

/// `TypedHeader` selecting a specific development user.
#[derive(Debug, PartialEq)]
pub(crate) struct DevUserId(pub i64);

fn single_value<'i, I>(values: &mut I) -> Result<&'i str, AxumError>
where
    I: Iterator<Item = &'i HeaderValue>,
{
    let value = values.next().ok_or_else(AxumError::invalid)?;
    value.to_str().map_err(|_| AxumError::invalid())
}

fn encode_value<E: Extend<HeaderValue>>(values: &mut E, value: &str, name: &str) {
    match HeaderValue::from_str(value) {
        Ok(value) => values.extend(std::iter::once(value)),
        Err(_) => tracing::error!("failed to encode {name} header"),
    }
}

impl Header for DevUserRole {
    fn name() -> &'static HeaderName {
        &DEV_USER_ROLE
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, AxumError>
    where
        Self: Sized,
        I: Iterator<Item = &'i HeaderValue>,
    {
        let value = single_value(values)?;
        let Ok(role) = value.parse() else {
            return Err(AxumError::invalid());
        };
        Ok(DevUserRole(role))
    }

    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        encode_value(values, self.0.as_str(), api_types::headers::DEV_USER_ROLE);
    }
}

impl Header for DevUserId {
    fn name() -> &'static HeaderName {
        &DEV_USER_ID
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, AxumError>
    where
        Self: Sized,
        I: Iterator<Item = &'i HeaderValue>,
    {
        let value = single_value(values)?;
        let Ok(id) = value.trim().parse() else {
            return Err(AxumError::invalid());
        };
        Ok(DevUserId(id))
    }

    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        encode_value(values, &self.0.to_string(), api_types::headers::DEV_USER_ID);
    }
}

/// Resolves the acting [`engine::Actor`] and stores it in the request
/// extensions.
pub(crate) async fn identify(
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let headers = request.headers();
    let role = match headers.typed_try_get::<DevUserRole>() {
        Ok(Some(DevUserRole(role))) => role,
        Ok(None) => {
            return Err(ServerError::Unauthorized(
                "missing X-Dev-User-Role header".to_string(),
            ));
        }
        Err(_) => {
            return Err(ServerError::Unauthorized(
                "invalid X-Dev-User-Role header".to_string(),
            ));
        }
    };
    let user_id = headers
        .typed_try_get::<DevUserId>()
        .map_err(|_| ServerError::Unauthorized("invalid X-Dev-User-Id header".to_string()))?
        .map(|DevUserId(id)| id);

    let actor = state.engine.resolve_actor(role, user_id).await?;
    request.extensions_mut().insert(actor);
    Ok(next.run(request).await)
}
