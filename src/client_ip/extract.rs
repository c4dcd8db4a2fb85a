use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::{HeaderSet, Resolution, resolve};

/// Extractor yielding the [`Resolution`] for the current request.
///
/// Never rejects; an unresolvable request carries the `0.0.0.0` sentinel.
#[derive(Debug, Clone)]
pub struct ClientIp(pub Resolution);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let resolution = resolve(&HeaderSet::from_header_map(&parts.headers));

        tracing::debug!(
            ip = %resolution.ip,
            source = resolution.source,
            confidence = resolution.confidence,
            environment = %resolution.debug.environment,
            "client ip resolved"
        );

        Ok(Self(resolution))
    }
}
