//! End-to-end tests for locale routing through the full router.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response, StatusCode},
    Router,
};
use tower::ServiceExt;

use catalog_locale::config::FileConfig;
use catalog_locale::LocaleConfig;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn config(supported: &str, default: &str) -> LocaleConfig {
    let supported = supported.to_string();
    let default = default.to_string();
    LocaleConfig::from_sources(FileConfig::default(), move |key| match key {
        "SUPPORTED_LOCALES" => Some(supported.clone()),
        "DEFAULT_LOCALE" => Some(default.clone()),
        _ => None,
    })
    .expect("test config is valid")
}

fn app() -> Router {
    catalog_web::build_router(config("fr,en,de", "fr"))
}

async fn send(
    app: Router,
    uri: &str,
    cookie: Option<&str>,
    accept_language: Option<&str>,
) -> Response<Body> {
    let mut req = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    if let Some(accept_language) = accept_language {
        req = req.header(header::ACCEPT_LANGUAGE, accept_language);
    }
    app.oneshot(req.body(Body::empty()).unwrap()).await.unwrap()
}

fn location(res: &Response<Body>) -> &str {
    res.headers()
        .get(header::LOCATION)
        .expect("redirect has a Location")
        .to_str()
        .unwrap()
}

fn set_cookie(res: &Response<Body>) -> Option<&str> {
    res.headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap())
}

async fn body_text(res: Response<Body>) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn locale_cookie(locale: &str) -> String {
    format!("NEXT_LOCALE={locale}; Path=/; Max-Age=31536000; SameSite=Lax")
}

// ---------------------------------------------------------------------------
// Localized paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn localized_path_with_matching_cookie_is_untouched() {
    for locale in ["fr", "en", "de"] {
        let uri = format!("/{locale}/products/widget");
        let cookie = format!("NEXT_LOCALE={locale}");
        let res = send(app(), &uri, Some(cookie.as_str()), Some("ja")).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(set_cookie(&res), None);
        let body = body_text(res).await;
        assert!(body.contains(&format!("lang=\"{locale}\"")));
        assert!(body.contains("data-path=\"/products/widget\""));
    }
}

#[tokio::test]
async fn localized_path_corrects_cookie() {
    let res = send(app(), "/de/about", Some("NEXT_LOCALE=fr"), None).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get(header::LOCATION).is_none());
    assert_eq!(set_cookie(&res), Some(locale_cookie("de").as_str()));
}

#[tokio::test]
async fn localized_path_replaces_invalid_cookie() {
    let res = send(app(), "/en", Some("NEXT_LOCALE=xx; theme=dark"), Some("de")).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(set_cookie(&res), Some(locale_cookie("en").as_str()));
    assert!(body_text(res).await.contains("data-path=\"/\""));
}

#[tokio::test]
async fn localized_path_with_trailing_slash_is_served() {
    let res = send(app(), "/en/", Some("NEXT_LOCALE=en"), None).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(set_cookie(&res), None);
    let body = body_text(res).await;
    assert!(body.contains("lang=\"en\""));
    assert!(body.contains("data-path=\"/\""));

    let res = send(app(), "/de/", Some("NEXT_LOCALE=fr"), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(set_cookie(&res), Some(locale_cookie("de").as_str()));
}

#[tokio::test]
async fn doubled_leading_slash_is_not_treated_as_localized() {
    let res = send(app(), "//en/x", Some("NEXT_LOCALE=de"), None).await;

    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&res), "/de//en/x");
}

// ---------------------------------------------------------------------------
// Redirects
// ---------------------------------------------------------------------------

#[tokio::test]
async fn header_fallback_redirects() {
    let res = send(app(), "/products", None, Some("ja-JP,zh-CN,en;q=0.5")).await;

    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&res), "/en/products");
    assert_eq!(set_cookie(&res), Some(locale_cookie("en").as_str()));
}

#[tokio::test]
async fn cookie_beats_header() {
    let res = send(app(), "/products", Some("NEXT_LOCALE=de"), Some("en,fr")).await;

    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&res), "/de/products");
    assert_eq!(set_cookie(&res), Some(locale_cookie("de").as_str()));
}

#[tokio::test]
async fn invalid_cookie_is_ignored() {
    let res = send(app(), "/products", Some("NEXT_LOCALE=<script>"), Some("de")).await;

    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&res), "/de/products");
}

#[tokio::test]
async fn default_fallback() {
    for header in [None, Some(""), Some("ja,zh;q=0.8"), Some("*")] {
        let res = send(app(), "/products", None, header).await;
        assert_eq!(location(&res), "/fr/products", "header {header:?}");
        assert_eq!(set_cookie(&res), Some(locale_cookie("fr").as_str()));
    }
}

#[tokio::test]
async fn equal_quality_first_listed_wins() {
    for (header, expected) in [
        ("de,fr,en", "/de"),
        ("en,de,fr", "/en"),
        ("fr;q=0.5,en;q=0.5,de;q=0.5", "/fr"),
        ("en;q=0.5,fr;q=0.5", "/en"),
    ] {
        let res = send(app(), "/", None, Some(header)).await;
        assert_eq!(location(&res), expected, "header {header}");
    }
}

#[tokio::test]
async fn higher_quality_wins_regardless_of_order() {
    for header in ["de;q=0.9,en;q=0.4", "en;q=0.4,de;q=0.9"] {
        let res = send(app(), "/catalog", None, Some(header)).await;
        assert_eq!(location(&res), "/de/catalog", "header {header}");
    }
}

#[tokio::test]
async fn root_redirects_without_trailing_slash() {
    let res = send(app(), "/", None, None).await;

    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&res), "/fr");
}

#[tokio::test]
async fn redirect_preserves_query() {
    let res = send(app(), "/products?category=valves&page=2", None, Some("en")).await;
    assert_eq!(location(&res), "/en/products?category=valves&page=2");

    let res = send(app(), "/?utm_source=mail", None, None).await;
    assert_eq!(location(&res), "/fr?utm_source=mail");
}

#[tokio::test]
async fn redirect_varies_on_inputs() {
    let res = send(app(), "/products", None, None).await;
    assert_eq!(
        res.headers().get(header::VARY).unwrap(),
        "Cookie, Accept-Language"
    );
}

#[tokio::test]
async fn redirect_target_is_served() {
    let first = send(app(), "/products", None, Some("de")).await;
    let target = location(&first).to_string();

    let second = send(app(), &target, Some("NEXT_LOCALE=de"), Some("de")).await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(set_cookie(&second), None);
}

// ---------------------------------------------------------------------------
// Exclusions and API
// ---------------------------------------------------------------------------

#[tokio::test]
async fn excluded_paths_bypass_locale_routing() {
    let res = send(app(), "/api/health", None, Some("de")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(set_cookie(&res), None);
    assert_eq!(body_text(res).await, "ok");

    for path in ["/favicon.ico", "/robots.txt", "/_next/static/app.js", "/studio/desk"] {
        let res = send(app(), path, None, Some("de")).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{path}");
        assert_eq!(set_cookie(&res), None, "{path}");
    }
}

#[tokio::test]
async fn configured_patterns_bypass_locale_routing() {
    let config = LocaleConfig::from_sources(FileConfig::default(), |key| match key {
        "LOCALE_EXCLUDE_PATTERNS" => Some(r"\.pdf$".to_string()),
        _ => None,
    })
    .unwrap();
    let app = catalog_web::build_router(config);

    let res = send(app.clone(), "/catalogs/2025.pdf", None, None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = send(app, "/catalogs", None, None).await;
    assert_eq!(location(&res), "/fr/catalogs");
}

#[tokio::test]
async fn api_locales_lists_configuration() {
    let res = send(app(), "/api/locales", None, None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body_text(res).await).unwrap();
    assert_eq!(json["locales"], serde_json::json!(["fr", "en", "de"]));
    assert_eq!(json["default"], "fr");
}

#[tokio::test]
async fn custom_cookie_name() {
    let config = LocaleConfig::from_sources(FileConfig::default(), |key| match key {
        "LOCALE_COOKIE_NAME" => Some("site_lang".to_string()),
        "LOCALE_COOKIE_MAX_AGE" => Some("600".to_string()),
        _ => None,
    })
    .unwrap();
    let app = catalog_web::build_router(config);

    let res = send(app.clone(), "/about", Some("site_lang=en"), None).await;
    assert_eq!(location(&res), "/en/about");
    assert_eq!(
        set_cookie(&res),
        Some("site_lang=en; Path=/; Max-Age=600; SameSite=Lax")
    );

    // the default name is no longer read
    let res = send(app, "/about", Some("NEXT_LOCALE=en"), None).await;
    assert_eq!(location(&res), "/fr/about");
}
