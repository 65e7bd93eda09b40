// src/views/layout.rs

//! Document shell shared by every page.

use yew::prelude::*;

use crate::models::CarouselConfig;
use crate::views::PageView;

const BASE_STYLE: &str = "\
body{margin:0;font-family:system-ui,sans-serif;background:#10141c;color:#e8ecf2}\
main{max-width:1100px;margin:0 auto;padding:24px}\
a{color:#8fc3ff}\
.year-list{display:grid;grid-template-columns:repeat(auto-fill,minmax(140px,1fr));gap:12px;list-style:none;padding:0}\
.year-list a{display:block;padding:18px;border-radius:10px;background:#1b2230;text-align:center;font-size:1.4em;text-decoration:none}\
.featured{display:flex;gap:24px;align-items:center;margin:24px 0}\
.featured img{width:320px;border-radius:10px}\
.chip a{display:block;box-sizing:border-box;padding:12px;border-radius:8px;background:#1b2230;text-decoration:none;overflow:hidden}\
.chip.is-active a{outline:2px solid #8fc3ff}\
.notice{padding:24px;border-radius:10px;background:#1b2230}\
.notice.error{border-left:4px solid #ff6b6b}";

// Centers the active chip using the measured layout; far jumps are instant.
const SCROLL_SCRIPT: &str = "\
document.querySelectorAll('.chips').forEach(function(el){\
var c=el.querySelector('.is-active');if(!c)return;\
var t=Math.max(0,c.offsetLeft-(el.clientWidth-c.offsetWidth)/2);\
var far=Math.abs(t-el.scrollLeft)>Number(el.dataset.jumpRatio)*el.clientWidth;\
el.scrollTo({left:t,behavior:far?'instant':'smooth'});});";

/// Stylesheet with the chip strip laid out from `carousel`.
///
/// Chips are border-box and fixed width, so chip `i` starts at
/// `i * (chip_width + chip_gap)` inside a strip at most `viewport_width` wide.
pub fn stylesheet(carousel: &CarouselConfig) -> String {
    format!(
        "{BASE_STYLE}\
.chips{{display:flex;gap:{gap}px;max-width:{viewport}px;overflow-x:auto;list-style:none;margin:0;padding:0 0 12px;position:relative}}\
.chip{{flex:0 0 {width}px;box-sizing:border-box}}",
        gap = carousel.chip_gap,
        viewport = carousel.viewport_width,
        width = carousel.chip_width,
    )
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub struct DocumentProps {
    pub site_title: String,
    /// Empty for pages titled by the site alone
    pub page_title: String,
    pub carousel: CarouselConfig,
    pub view: PageView,
}

#[function_component(Document)]
pub fn document(props: &DocumentProps) -> Html {
    let title = if props.page_title.is_empty() {
        props.site_title.clone()
    } else {
        format!("{} · {}", props.page_title, props.site_title)
    };
    let style = Html::from_html_unchecked(AttrValue::from(stylesheet(&props.carousel)));
    let script = Html::from_html_unchecked(AttrValue::from(SCROLL_SCRIPT));

    html! {
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <title>{ title }</title>
                <style>{ style }</style>
            </head>
            <body>
                <main>{ props.view.to_html() }</main>
                <script>{ script }</script>
            </body>
        </html>
    }
}
