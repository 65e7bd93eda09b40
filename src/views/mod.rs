//! Page views.
//!
//! Every view is a yew function component rendered to a string on the
//! server with [`ServerRenderer`]; yew escapes text and attribute values, so
//! endpoint data can be passed straight through props.

pub mod home;
pub mod layout;
pub mod notice;
pub mod year;

use yew::ServerRenderer;
use yew::prelude::*;

pub use home::HomeProps;
pub use layout::DocumentProps;
pub use notice::NoticeProps;
pub use year::YearProps;

/// Body of a page, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Home(HomeProps),
    Year(YearProps),
    Notice(NoticeProps),
}

impl PageView {
    pub(crate) fn to_html(&self) -> Html {
        match self {
            PageView::Home(props) => html! { <home::HomePage ..props.clone() /> },
            PageView::Year(props) => html! { <year::YearPage ..props.clone() /> },
            PageView::Notice(props) => html! { <notice::Notice ..props.clone() /> },
        }
    }
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub struct PageBodyProps {
    pub view: PageView,
}

#[function_component(PageBody)]
pub fn page_body(props: &PageBodyProps) -> Html {
    props.view.to_html()
}

/// Render a page body without the document shell.
pub async fn render_body(view: PageView) -> String {
    ServerRenderer::<PageBody>::with_props(move || PageBodyProps { view })
        .hydratable(false)
        .render()
        .await
}

/// Render a complete HTML document.
pub async fn render_document(props: DocumentProps) -> String {
    let html = ServerRenderer::<layout::Document>::with_props(move || props)
        .hydratable(false)
        .render()
        .await;
    format!("<!DOCTYPE html>{html}")
}
