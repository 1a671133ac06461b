use std::sync::Arc;

use axum::{
    extract::State,
    http::Uri,
    response::{Html, IntoResponse, Json},
};
use serde::Serialize;

use crate::{AppState, Locale};

pub async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Serialize)]
pub struct LocalesResponse {
    pub locales: Vec<String>,
    pub default: String,
}

pub async fn api_locales(State(state): State<Arc<AppState>>) -> Json<LocalesResponse> {
    let locales = &state.config.locales;
    Json(LocalesResponse {
        locales: locales.iter().map(str::to_string).collect(),
        default: locales.default_locale().to_string(),
    })
}

/// Placeholder for the CMS-backed page renderer. Only reachable through the
/// locale middleware, so the first path segment is a supported locale.
pub async fn page(Locale(locale): Locale, uri: Uri) -> impl IntoResponse {
    let rest = uri
        .path()
        .trim_start_matches('/')
        .strip_prefix(locale.as_str())
        .unwrap_or_default();
    let rest = if rest.is_empty() { "/" } else { rest };

    Html(format!(
        "<!doctype html><html lang=\"{locale}\"><head><meta charset=\"utf-8\"></head>\
         <body data-locale=\"{locale}\" data-path=\"{}\"></body></html>",
        escape_html(rest)
    ))
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
