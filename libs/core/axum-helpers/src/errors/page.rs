//! Minimal HTML page used for every error response.

use std::sync::LazyLock;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use handlebars::Handlebars;
use serde::Serialize;

use super::ErrorCode;

const ERROR_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{{status}} {{reason}}</title>
</head>
<body>
  <h1>{{status}} {{reason}}</h1>
  <p>{{message}}</p>
  <p><small>{{error}} ({{code}})</small></p>
</body>
</html>
"#;

static REGISTRY: LazyLock<Handlebars<'static>> = LazyLock::new(Handlebars::new);

#[derive(Serialize)]
struct ErrorPage<'a> {
    status: u16,
    reason: &'a str,
    message: &'a str,
    error: &'a str,
    code: i32,
}

/// Render an error page with the given status.
///
/// `message` is escaped by Handlebars, so user input can be passed safely.
pub fn render(status: StatusCode, code: ErrorCode, message: &str) -> Response {
    let page = ErrorPage {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Error"),
        message,
        error: code.as_str(),
        code: code.code(),
    };

    match REGISTRY.render_template(ERROR_TEMPLATE, &page) {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render error page: {}", e);
            (status, page.reason.to_string()).into_response()
        }
    }
}
