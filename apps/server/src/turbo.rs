//! Turbo Stream fragments and content negotiation.
//!
//! A turbo stream wraps one DOM operation (`append`, `remove`) that the
//! Hotwire Turbo client applies to the current page.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderValue},
    response::{IntoResponse, Response},
};

use crate::templates::escape_html;

pub const TURBO_STREAM_MIME: &str = "text/vnd.turbo-stream.html";

/// DOM id of the list that new birthday rows are appended to.
pub const BIRTHDAYS_TARGET: &str = "birthdays";

/// Appends `content` as the last child of the element with id `target`.
pub fn append(target: &str, content: &str) -> String {
    format!(
        r#"<turbo-stream action="append" target="{}"><template>{}</template></turbo-stream>"#,
        escape_html(target),
        content
    )
}

/// Removes the element with id `target`.
pub fn remove(target: &str) -> String {
    format!(
        r#"<turbo-stream action="remove" target="{}"></turbo-stream>"#,
        escape_html(target)
    )
}

/// Response carrying one or more turbo-stream fragments.
pub struct TurboStream(pub String);

impl IntoResponse for TurboStream {
    fn into_response(self) -> Response {
        (
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/vnd.turbo-stream.html; charset=utf-8"),
            )],
            self.0,
        )
            .into_response()
    }
}

/// Whether the client asked for turbo-stream responses in its `Accept` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurboStreamSupport(pub bool);

impl TurboStreamSupport {
    pub fn from_accept<'a>(values: impl IntoIterator<Item = &'a HeaderValue>) -> Self {
        let accepted = values
            .into_iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(','))
            .filter_map(|media_range| media_range.split(';').next())
            .any(|media_type| media_type.trim().eq_ignore_ascii_case(TURBO_STREAM_MIME));
        Self(accepted)
    }

    pub fn is_supported(self) -> bool {
        self.0
    }
}

impl<S> FromRequestParts<S> for TurboStreamSupport
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_accept(parts.headers.get_all(header::ACCEPT)))
    }
}
