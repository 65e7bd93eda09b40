// src/views/year.rs

//! Year detail: header, featured award, and the chip strip.

use yew::prelude::*;

use crate::models::{Award, SiteConfig, YearData};
use crate::services::carousel::{JUMP_THRESHOLD_RATIO, ScrollPlan};
use crate::services::ResolvedImage;
use crate::session::{ViewQuery, ViewSession};

#[derive(Properties, Debug, Clone, PartialEq)]
pub struct YearProps {
    pub data: YearData,
    pub keyword: String,
    /// Original indices of the awards visible under `keyword`
    pub visible: Vec<usize>,
    pub selected: Option<usize>,
    pub scroll: Option<ScrollPlan>,
    /// Resolved image of the selected award; `icon_url` is used when absent
    pub image: Option<ResolvedImage>,
    pub site: SiteConfig,
}

impl YearProps {
    /// Snapshot of a view session, ready to render.
    pub fn new(session: &ViewSession, image: Option<ResolvedImage>, site: &SiteConfig) -> Self {
        Self {
            data: session.data().clone(),
            keyword: session.keyword().to_string(),
            visible: session.filtered().index_map,
            selected: session.selected_index(),
            scroll: session.scroll(),
            image,
            site: site.clone(),
        }
    }

    fn selected_award(&self) -> Option<&Award> {
        self.selected.and_then(|i| self.data.awards.get(i))
    }
}

#[function_component(YearPage)]
pub fn year_page(props: &YearProps) -> Html {
    let featured = props
        .selected_award()
        .map(|award| featured(award, props.image.as_ref()));

    html! {
        <section class="year">
            { header(props) }
            { for featured }
            { chip_strip(props) }
        </section>
    }
}

fn header(props: &YearProps) -> Html {
    let total = props.data.awards.len();
    let count = if props.keyword.is_empty() {
        format!("{total} awards")
    } else {
        format!("Showing {} of {total} awards", props.visible.len())
    };

    html! {
        <header>
            <h1>{ format!("{} Awards", props.data.year) }</h1>
            <p class="count">{ count }</p>
            <form class="search" method="get" role="search">
                <input
                    type="search"
                    name="q"
                    value={props.keyword.clone()}
                    placeholder="Search awards or games"
                    aria-label="Search awards or games"
                />
            </form>
            <a class="back" href={props.site.listing_path()}>{ "All years" }</a>
        </header>
    }
}

fn featured(award: &Award, image: Option<&ResolvedImage>) -> Html {
    let winner = &award.winner;
    let (src, stage) = match image {
        Some(resolved) => (resolved.src.clone(), resolved.stage.as_str()),
        None => (winner.icon_url.clone(), "primary"),
    };

    let links: Vec<Html> = [(&winner.blogger_url, "Review"), (&winner.steam_url, "Steam")]
        .into_iter()
        .filter_map(|(url, label)| url.as_ref().map(|url| external_link(url, label)))
        .collect();
    let links = (!links.is_empty()).then(|| html! { <p class="links">{ for links }</p> });

    html! {
        <article class="featured" id={award.id.clone()}>
            <img src={src} alt={winner.game_name.clone()} loading="lazy" data-fallback-stage={stage} />
            <div class="featured-info">
                <p class="award-name">{ award.name.clone() }</p>
                <h2>{ winner.game_name.clone() }</h2>
                { for links }
            </div>
        </article>
    }
}

fn external_link(url: &str, label: &'static str) -> Html {
    html! {
        <a href={url.to_string()} target="_blank" rel="noopener noreferrer">{ label }</a>
    }
}

fn chip_strip(props: &YearProps) -> Html {
    if props.visible.is_empty() {
        return html! {
            <p class="empty">{ format!("No awards match \"{}\".", props.keyword) }</p>
        };
    }

    let keyword = (!props.keyword.is_empty()).then(|| props.keyword.clone());
    let scroll_left = props.scroll.map(|plan| AttrValue::from(plan.target.to_string()));
    let scroll_mode = props.scroll.map(|plan| AttrValue::from(plan.mode.as_str()));

    let chips = props.visible.iter().filter_map(|&original| {
        let award = props.data.awards.get(original)?;
        let active = props.selected == Some(original);
        let query = ViewQuery {
            keyword: keyword.clone(),
            award: Some(award.id.clone()),
        };
        let current = active.then(|| AttrValue::from("true"));

        Some(html! {
            <li class={classes!("chip", active.then_some("is-active"))} data-index={original.to_string()}>
                <a href={format!("?{}", query.to_query_string())} aria-current={current}>
                    <span class="chip-award">{ award.name.clone() }</span>
                    <span class="chip-game">{ award.winner.game_name.clone() }</span>
                </a>
            </li>
        })
    });

    html! {
        <ul
            class="chips"
            data-jump-ratio={JUMP_THRESHOLD_RATIO.to_string()}
            data-scroll-left={scroll_left}
            data-scroll-mode={scroll_mode}
        >
            { for chips }
        </ul>
    }
}
