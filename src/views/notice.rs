// src/views/notice.rs

//! Not-found and inline error notices.

use yew::prelude::*;

use crate::error::AppError;
use crate::models::SiteConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    NotFound,
    Error,
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub struct NoticeProps {
    pub kind: NoticeKind,
    pub heading: String,
    pub detail: String,
    /// Link target of the way back
    pub back_href: String,
}

/// Static not-found message with a way back.
pub fn not_found(site: &SiteConfig) -> NoticeProps {
    NoticeProps {
        kind: NoticeKind::NotFound,
        heading: "Page not found".to_string(),
        detail: "The page you requested does not exist.".to_string(),
        back_href: site.listing_path(),
    }
}

/// Inline notice for a failed load or a bad URL segment.
pub fn error(err: &AppError, site: &SiteConfig) -> NoticeProps {
    let (heading, detail) = match err {
        AppError::Input(segment) => (
            "Invalid year",
            format!("\"{segment}\" is not a valid award year."),
        ),
        AppError::Network { status } => (
            "Could not load awards",
            format!("The data service answered with HTTP {status}."),
        ),
        AppError::Api(message) => ("Could not load awards", message.clone()),
        other => ("Could not load awards", other.to_string()),
    };

    NoticeProps {
        kind: NoticeKind::Error,
        heading: heading.to_string(),
        detail,
        back_href: site.listing_path(),
    }
}

#[function_component(Notice)]
pub fn notice(props: &NoticeProps) -> Html {
    let (class, role) = match props.kind {
        NoticeKind::NotFound => ("notice not-found", None),
        NoticeKind::Error => ("notice error", Some(AttrValue::from("alert"))),
    };

    html! {
        <section class={class} role={role}>
            <h1>{ props.heading.clone() }</h1>
            <p>{ props.detail.clone() }</p>
            <a class="back" href={props.back_href.clone()}>{ "Back to all years" }</a>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::tests::tags_with;
    use crate::views::{PageView, render_body};

    #[tokio::test]
    async fn test_error_message_is_escaped() {
        let err = AppError::api("<script>alert(1)</script>");
        let html = render_body(PageView::Notice(error(&err, &SiteConfig::default()))).await;
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(tags_with(&html, "role=\"alert\"")[0].contains("notice error"));
    }

    #[test]
    fn test_input_error_names_segment() {
        let props = error(&AppError::input("abc"), &SiteConfig::default());
        assert_eq!(props.heading, "Invalid year");
        assert_eq!(props.detail, "\"abc\" is not a valid award year.");
    }

    #[test]
    fn test_network_error_names_status() {
        let props = error(&AppError::Network { status: 503 }, &SiteConfig::default());
        assert!(props.detail.contains("HTTP 503"));
    }

    #[tokio::test]
    async fn test_not_found_links_back() {
        let html = render_body(PageView::Notice(not_found(&SiteConfig::default()))).await;
        let links = tags_with(&html, "href=");
        assert_eq!(links.len(), 1);
        assert!(links[0].contains("href=\"/steamawards/\""));
        assert!(tags_with(&html, "role=").is_empty());
    }
}
