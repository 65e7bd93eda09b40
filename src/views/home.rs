// src/views/home.rs

//! Year listing.

use yew::prelude::*;

use crate::models::SiteConfig;

#[derive(Properties, Debug, Clone, PartialEq)]
pub struct HomeProps {
    /// Years to list, in display order
    pub years: Vec<i32>,
    pub site: SiteConfig,
}

/// One navigable entry per year, in the order given.
#[function_component(HomePage)]
pub fn home_page(props: &HomeProps) -> Html {
    let summary = if props.years.is_empty() {
        html! { <p class="empty">{ "No award years are available yet." }</p> }
    } else {
        html! { <p class="count">{ format!("{} years of awards", props.years.len()) }</p> }
    };

    html! {
        <section class="home">
            <h1>{ props.site.title.clone() }</h1>
            { summary }
            <ul class="year-list">
                { for props.years.iter().map(|&year| html! {
                    <li class="year">
                        <a href={props.site.year_path(year)}>{ year.to_string() }</a>
                    </li>
                }) }
            </ul>
        </section>
    }
}
