// src/server.rs

//! HTTP adapter: maps requests onto router navigations.

use std::sync::Arc;

use axum::Router as HttpRouter;
use axum::extract::State;
use axum::http::header::{COOKIE, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::services::ServeDir;
use url::form_urlencoded;

use crate::error::Result;
use crate::router::{PageStatus, Route, Router, canonical_path, root_redirect};
use crate::session::ViewQuery;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    router: Arc<Router>,
}

impl AppState {
    pub fn new(router: Arc<Router>) -> Self {
        Self { router }
    }
}

/// Build the axum application.
///
/// `/img` is served from the configured image directory when one is set;
/// every other GET or HEAD goes through the page router. Other methods
/// get `405 Method Not Allowed`.
pub fn build_app(state: AppState) -> HttpRouter {
    let image_dir = state.router.config().site.image_dir.clone();
    let app = HttpRouter::new().fallback(get(handle_page));
    let app = match image_dir {
        Some(dir) => app.nest_service("/img", ServeDir::new(dir)),
        None => app,
    };
    app.with_state(state)
}

/// Bind the configured address and serve until Ctrl+C or SIGTERM.
pub async fn serve(router: Arc<Router>, bind: &str) -> Result<()> {
    let app = build_app(AppState::new(router));

    log::info!("Binding to {}", bind);
    let listener = TcpListener::bind(bind).await?;
    log::info!("Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server shut down");
    Ok(())
}

async fn handle_page(State(state): State<AppState>, uri: Uri, headers: HeaderMap) -> Response {
    let router = &state.router;
    let site = &router.config().site;
    let path = uri.path();
    let query = ViewQuery::parse(uri.query());

    let route = router.route(path);
    log::debug!("GET {} -> {:?}", uri, route);

    match route {
        Route::Redirect(_) => {
            let restore = cookie_value(&headers, &site.restore_cookie);
            let target = root_redirect(restore.as_deref(), &site.listing);
            let mut response = redirect(StatusCode::TEMPORARY_REDIRECT, &target);
            if restore.is_some() {
                log::info!("Restoring deep link {}", target);
                let clear = format!("{}=; Path=/; Max-Age=0", site.restore_cookie);
                if let Ok(value) = HeaderValue::from_str(&clear) {
                    response.headers_mut().insert(SET_COOKIE, value);
                }
            }
            response
        }
        Route::Home | Route::YearDetail(_) if !path.ends_with('/') => {
            let mut target = canonical_path(path);
            if let Some(q) = uri.query() {
                target = format!("{target}?{q}");
            }
            redirect(StatusCode::PERMANENT_REDIRECT, &target)
        }
        route => {
            let page = router.render(route, &query).await;
            let status = match page.status {
                PageStatus::Ok => StatusCode::OK,
                PageStatus::BadRequest => StatusCode::BAD_REQUEST,
                PageStatus::NotFound => StatusCode::NOT_FOUND,
                PageStatus::BadGateway => StatusCode::BAD_GATEWAY,
            };
            (status, Html(router.document(&page).await)).into_response()
        }
    }
}

fn redirect(status: StatusCode, target: &str) -> Response {
    match HeaderValue::from_str(target) {
        Ok(location) => (status, [(LOCATION, location)]).into_response(),
        Err(_) => StatusCode::BAD_REQUEST.into_response(),
    }
}

/// Value of a named cookie, percent-decoded.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| percent_decode(value))
        .filter(|value| !value.is_empty())
}

fn percent_decode(value: &str) -> String {
    // Treat the value as a lone form key so `%2F` etc. decode; keep `+` literal.
    let escaped = value.replace('+', "%2B");
    form_urlencoded::parse(escaped.as_bytes())
        .next()
        .map(|(key, _)| key.into_owned())
        .unwrap_or_default()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        log::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                log::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                log::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; awardhub_restore=%2Fsteamawards%2F2023%2F"),
        );
        assert_eq!(
            cookie_value(&headers, "awardhub_restore").as_deref(),
            Some("/steamawards/2023/")
        );
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn test_empty_cookie_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("awardhub_restore="));
        assert_eq!(cookie_value(&headers, "awardhub_restore"), None);
    }

    #[test]
    fn test_percent_decode_keeps_plus() {
        assert_eq!(percent_decode("/a+b%3Fq%3D1"), "/a+b?q=1");
        assert_eq!(percent_decode("/plain/"), "/plain/");
    }
}
