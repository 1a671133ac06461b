use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use catalog_locale::{cookie, resolve, CookieSettings, LocaleDecision, RequestContext};

use crate::AppState;

/// Locale of the current request. Inserted by [`locale_routing`] on
/// pass-through; extracting it on a route the middleware skipped yields 404.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(pub String);

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Locale>()
            .cloned()
            .ok_or(StatusCode::NOT_FOUND)
    }
}

/// Resolve the request's locale, then either redirect to the locale-prefixed
/// path or pass through with a corrected cookie. Never fails the request.
pub async fn locale_routing(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let config = &state.config;
    let path = req.uri().path().to_string();

    if config.matcher.is_excluded(&path) {
        return next.run(req).await;
    }

    let decision = {
        let headers = req.headers();
        let ctx = RequestContext {
            path: &path,
            cookie: read_cookie(headers, &config.cookie.name),
            accept_language: headers
                .get(header::ACCEPT_LANGUAGE)
                .and_then(|v| v.to_str().ok()),
        };
        resolve(&ctx, &config.locales)
    };

    match decision {
        LocaleDecision::Redirect { locale, location } => {
            let location = match req.uri().query() {
                Some(query) => format!("{location}?{query}"),
                None => location,
            };
            debug!(%locale, %path, "Redirecting to localized path");

            let mut response = StatusCode::TEMPORARY_REDIRECT.into_response();
            let headers = response.headers_mut();
            if let Ok(value) = HeaderValue::from_str(&location)
                .or_else(|_| HeaderValue::from_str(&format!("/{locale}")))
            {
                headers.insert(header::LOCATION, value);
            }
            headers.insert(
                header::VARY,
                HeaderValue::from_static("Cookie, Accept-Language"),
            );
            append_locale_cookie(headers, &config.cookie, &locale);
            response
        }
        LocaleDecision::PassThrough { locale, set_cookie } => {
            debug!(%locale, set_cookie, "Serving localized path");
            req.extensions_mut().insert(Locale(locale.clone()));

            let mut response = next.run(req).await;
            if set_cookie {
                append_locale_cookie(response.headers_mut(), &config.cookie, &locale);
            }
            response
        }
    }
}

/// Locale cookie value from any `Cookie` header the client sent.
fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|h| cookie::parse_cookie(h, name))
}

fn append_locale_cookie(headers: &mut HeaderMap, settings: &CookieSettings, locale: &str) {
    let value = cookie::locale_cookie(&settings.name, locale, settings.max_age_secs);
    match HeaderValue::from_str(&value) {
        Ok(value) => {
            headers.append(header::SET_COOKIE, value);
        }
        Err(e) => warn!(error = %e, "Locale cookie is not a valid header value"),
    }
}
