// src/router.rs

//! URL routing and the navigation pipeline.
//!
//! ```text
//! /                        -> redirect to /{listing}/ (or a restored deep link)
//! /{listing}/              -> year listing
//! /{listing}/{year}/       -> year detail (?q=keyword&award=id)
//! /{listing}/{not-a-year}/ -> inline input error
//! anything else            -> not found
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::AppError;
use crate::models::Config;
use crate::services::{RowStore, available_years, build_year_data, resolve_image};
use crate::session::{ViewQuery, ViewSession};
use crate::views::{self, DocumentProps, HomeProps, PageView, YearProps, notice};

/// View state selected by a URL path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    YearDetail(i32),
    NotFound,
    /// Bare root; go to the given canonical path
    Redirect(String),
    /// Listing path with a second segment that is not a year
    InvalidYear(String),
}

/// Resolve a path to a route.
///
/// Any query string is ignored and empty segments are dropped, so
/// `/steamawards` and `/steamawards/` both resolve to [`Route::Home`].
pub fn parse_route(path: &str, listing: &str) -> Route {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [] => Route::Redirect(format!("/{listing}/")),
        [first] if *first == listing => Route::Home,
        [first, second] if *first == listing => parse_year(second)
            .map(Route::YearDetail)
            .unwrap_or_else(|| Route::InvalidYear((*second).to_string())),
        _ => Route::NotFound,
    }
}

fn parse_year(segment: &str) -> Option<i32> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

/// Path with a trailing slash, the form every in-app link uses.
pub fn canonical_path(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

/// Where the bare root should send the visitor.
///
/// A pending deep-link restoration wins over the listing redirect, but only
/// for local paths that resolve to a listing or year page.
pub fn root_redirect(restore: Option<&str>, listing: &str) -> String {
    let listing_path = format!("/{listing}/");
    let Some(target) = restore.map(str::trim) else {
        return listing_path;
    };
    if !target.starts_with('/') || target.starts_with("//") || target.contains('\\') {
        return listing_path;
    }

    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target, None),
    };
    match parse_route(path, listing) {
        Route::Home | Route::YearDetail(_) => {
            let path = canonical_path(path);
            match query.filter(|q| !q.is_empty()) {
                Some(query) => format!("{path}?{query}"),
                None => path,
            }
        }
        _ => listing_path,
    }
}

/// Response status class of a rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Ok,
    BadRequest,
    NotFound,
    BadGateway,
}

/// A page view with its title and status.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub status: PageStatus,
    pub title: String,
    pub view: PageView,
}

impl Page {
    fn ok(title: impl Into<String>, view: PageView) -> Self {
        Self {
            status: PageStatus::Ok,
            title: title.into(),
            view,
        }
    }
}

/// Outcome of a navigation.
#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    Page(Page),
    Redirect(String),
    /// A newer navigation started while this one was loading
    Superseded,
}

/// Top-level controller: route parsing, data loading, view selection.
pub struct Router {
    config: Arc<Config>,
    store: Arc<RowStore>,
    epoch: AtomicU64,
}

impl Router {
    pub fn new(config: Arc<Config>, store: Arc<RowStore>) -> Self {
        Self {
            config,
            store,
            epoch: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &RowStore {
        &self.store
    }

    pub fn route(&self, path: &str) -> Route {
        parse_route(path, &self.config.site.listing)
    }

    /// Take a ticket for a new navigation, superseding any in flight.
    pub fn begin_navigation(&self) -> u64 {
        self.epoch.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `ticket` still belongs to the latest navigation.
    pub fn is_current(&self, ticket: u64) -> bool {
        self.epoch.load(Ordering::SeqCst) == ticket
    }

    /// Navigate for a single display: results of superseded navigations
    /// are discarded instead of overwriting a newer page.
    pub async fn navigate(&self, path: &str, query: &ViewQuery) -> Navigation {
        let ticket = self.begin_navigation();
        let outcome = self.resolve(path, query).await;
        if !self.is_current(ticket) {
            log::debug!("Navigation to {} superseded", path);
            return Navigation::Superseded;
        }
        outcome
    }

    /// Resolve a path to a redirect or a rendered page.
    pub async fn resolve(&self, path: &str, query: &ViewQuery) -> Navigation {
        match self.route(path) {
            Route::Redirect(target) => Navigation::Redirect(target),
            route => Navigation::Page(self.render(route, query).await),
        }
    }

    /// Render the page for a route.
    ///
    /// Load failures and bad year segments become inline error pages; the
    /// router stays usable for the next navigation.
    pub async fn render(&self, route: Route, query: &ViewQuery) -> Page {
        let site = &self.config.site;
        match route {
            Route::Home | Route::Redirect(_) => match self.store.get_rows().await {
                Ok(rows) => {
                    let years = available_years(&rows);
                    Page::ok(
                        "",
                        PageView::Home(HomeProps {
                            years,
                            site: site.clone(),
                        }),
                    )
                }
                Err(e) => self.error_page(e),
            },
            Route::YearDetail(year) => match self.store.get_rows().await {
                Ok(rows) => {
                    let data = build_year_data(
                        year,
                        &rows,
                        &self.config.source.label,
                        &site.placeholder_image,
                    );
                    log::debug!("Built {} awards for {}", data.awards.len(), year);
                    let session = ViewSession::open(data, query, &self.config.carousel);
                    let image = session.selected_award().map(|award| {
                        resolve_image(
                            &award.winner.icon_url,
                            site.image_dir.as_deref(),
                            &site.placeholder_image,
                        )
                    });
                    let view = PageView::Year(YearProps::new(&session, image, site));
                    Page::ok(format!("{year} Awards"), view)
                }
                Err(e) => self.error_page(e),
            },
            Route::InvalidYear(segment) => self.error_page(AppError::input(segment)),
            Route::NotFound => Page {
                status: PageStatus::NotFound,
                title: "Not found".to_string(),
                view: PageView::Notice(notice::not_found(site)),
            },
        }
    }

    fn error_page(&self, err: AppError) -> Page {
        if err.is_user_facing() {
            log::warn!("Rendering error notice: {}", err);
        } else {
            log::error!("Unexpected error while rendering: {}", err);
        }
        let status = match err {
            AppError::Input(_) => PageStatus::BadRequest,
            _ => PageStatus::BadGateway,
        };
        Page {
            status,
            title: "Error".to_string(),
            view: PageView::Notice(notice::error(&err, &self.config.site)),
        }
    }

    /// Full HTML document for a page.
    pub async fn document(&self, page: &Page) -> String {
        views::render_document(DocumentProps {
            site_title: self.config.site.title.clone(),
            page_title: page.title.clone(),
            carousel: self.config.carousel.clone(),
            view: page.view.clone(),
        })
        .await
    }
}
