//! HTTP surface: renders pages through a per-request [`Localizer`].

use crate::config::Config;
use crate::i18n::{
    InstalledLocales, JsonCatalog, LanguageLink, Localizer, RequestUrl, Sections, Settings,
    TITLE_SECTION,
};
use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// Catalog key of the page title.
const TITLE_KEY: &str = "site.title";

/// Catalog key of the page heading.
const HEADING_KEY: &str = "site.welcome";

/// Shared, read-only state of the service.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<JsonCatalog>,
    pub locales: Arc<InstalledLocales>,
}

/// Rendered page data.
#[derive(Debug, Serialize)]
pub struct PageView {
    pub language: String,
    pub title: String,
    pub heading: String,
    pub locale: Option<String>,
    pub links: Vec<LanguageLink>,
}

/// Build the service router; the language switch lives at
/// `<base>/lang/:code`.
pub fn router(state: AppState) -> Router {
    let switch_route = format!("{}/lang/:code", state.config.base_path.trim_end_matches('/'));

    Router::new()
        .route(&switch_route, get(switch_language))
        .fallback(render_page)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn render_page(State(state): State<AppState>, uri: Uri) -> Json<PageView> {
    let current = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    let url = RequestUrl::new(state.config.base_path.clone(), current);
    let mut settings = Settings::from_config(&state.config);
    let mut sections = Sections::new();

    let mut view = {
        let mut localizer = Localizer::new(
            state.catalog.as_ref(),
            &url,
            &mut settings,
            &mut sections,
            state.locales.as_ref(),
        );
        localizer.title(TITLE_KEY);

        PageView {
            language: localizer.current(),
            title: String::new(),
            heading: localizer.translate(HEADING_KEY, Some("welcome")),
            locale: localizer.locale(None),
            links: localizer.links(),
        }
    };
    view.title = sections.get(TITLE_SECTION).unwrap_or(TITLE_KEY).to_string();

    debug!(path = %current, language = %view.language, "Rendered page");
    Json(view)
}

async fn switch_language(State(state): State<AppState>, Path(code): Path<String>) -> Response {
    let base = state.config.base_path.clone();
    let url = RequestUrl::new(base.clone(), base);
    let mut settings = Settings::from_config(&state.config);
    let mut sections = Sections::new();
    let mut localizer = Localizer::new(
        state.catalog.as_ref(),
        &url,
        &mut settings,
        &mut sections,
        state.locales.as_ref(),
    );

    if localizer.valid(&code) {
        let target = localizer.to(&code, true);
        info!("Switching language to {} ({})", code, target);
        Redirect::temporary(&target).into_response()
    } else {
        (StatusCode::NOT_FOUND, format!("Unknown language: {}", code)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_state(base_path: &str) -> AppState {
        AppState {
            config: Arc::new(Config {
                base_path: base_path.to_string(),
                default_language: "en".to_string(),
                languages: vec!["en".to_string(), "fr".to_string()],
                lang_dir: "lang".to_string(),
                port: 0,
            }),
            catalog: Arc::new(
                JsonCatalog::new()
                    .with_language("en", json!({ "site": { "title": "Home", "welcome": "hello" } }))
                    .with_language("fr", json!({ "site": { "title": "Accueil" } })),
            ),
            locales: Arc::new(InstalledLocales::new(["en_US.UTF-8", "fr_FR.UTF-8"])),
        }
    }

    async fn get_json(app: Router, uri: &str) -> Value {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_page_in_url_language() {
        let page = get_json(router(test_state("/app")), "/app/fr/page").await;
        assert_eq!(page["language"], "fr");
        assert_eq!(page["title"], "Accueil");
        // Missing in French: falls back to the capitalized default
        assert_eq!(page["heading"], "Welcome");
        assert_eq!(page["locale"], "fr_FR.UTF8");
        assert_eq!(page["links"][0]["url"], "/app/en/page");
        assert_eq!(page["links"][1]["active"], true);
    }

    #[tokio::test]
    async fn test_page_default_language() {
        let page = get_json(router(test_state("")), "/about").await;
        assert_eq!(page["language"], "en");
        assert_eq!(page["title"], "Home");
        assert_eq!(page["heading"], "Hello");
        assert_eq!(page["links"][1]["url"], "/fr/about");
    }

    #[tokio::test]
    async fn test_switch_language_redirects() {
        let response = router(test_state("/app"))
            .oneshot(Request::builder().uri("/app/lang/fr").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/app/fr");
    }

    #[tokio::test]
    async fn test_switch_route_outside_base_renders_page() {
        let page = get_json(router(test_state("/app")), "/lang/fr").await;
        assert_eq!(page["language"], "en");
    }

    #[tokio::test]
    async fn test_switch_route_at_root_without_base() {
        let response = router(test_state(""))
            .oneshot(Request::builder().uri("/lang/fr").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/fr");
    }

    #[tokio::test]
    async fn test_switch_unknown_language() {
        let response = router(test_state("/app"))
            .oneshot(Request::builder().uri("/app/lang/xx").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
