// src/session.rs

//! Per-view interaction state for the year detail page.

use url::form_urlencoded;

use crate::models::{Award, CarouselConfig, YearData};
use crate::services::carousel::{self, ScrollPlan, Viewport};
use crate::services::search::{FilterResult, filter_awards};

/// Interaction parameters carried in the page query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    /// Search keyword (`q`)
    pub keyword: Option<String>,
    /// Selected award id (`award`)
    pub award: Option<String>,
}

impl ViewQuery {
    /// Parse `q` and `award` from a raw query string; other keys are ignored.
    pub fn parse(query: Option<&str>) -> Self {
        let mut parsed = Self::default();
        for (key, value) in form_urlencoded::parse(query.unwrap_or("").as_bytes()) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "q" => parsed.keyword = Some(value.to_string()),
                "award" => parsed.award = Some(value.to_string()),
                _ => {}
            }
        }
        parsed
    }

    /// Encode back into a query string (without the leading `?`).
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(award) = &self.award {
            serializer.append_pair("award", award);
        }
        if let Some(keyword) = &self.keyword {
            serializer.append_pair("q", keyword);
        }
        serializer.finish()
    }
}

/// State of one rendered year view: data, keyword, selection and scroll.
///
/// Built when the view opens and dropped when the next navigation renders;
/// nothing leaks between views.
#[derive(Debug, Clone)]
pub struct ViewSession {
    data: YearData,
    keyword: String,
    /// Index into the unfiltered award list
    selected: Option<usize>,
    viewport: Viewport,
    scroll: Option<ScrollPlan>,
    geometry: CarouselConfig,
}

impl ViewSession {
    /// Open a session, applying the query's keyword and selection.
    pub fn open(data: YearData, query: &ViewQuery, geometry: &CarouselConfig) -> Self {
        let mut session = Self {
            data,
            keyword: String::new(),
            selected: None,
            viewport: Viewport {
                scroll_left: 0.0,
                client_width: geometry.viewport_width,
            },
            scroll: None,
            geometry: geometry.clone(),
        };

        session.set_keyword(query.keyword.as_deref().unwrap_or(""));
        if let Some(original) = query.award.as_deref().and_then(|id| session.data.position(id)) {
            session.select(original);
        }
        session
    }

    pub fn data(&self) -> &YearData {
        &self.data
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Awards visible under the current keyword.
    pub fn filtered(&self) -> FilterResult<'_> {
        filter_awards(&self.data.awards, &self.keyword)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_award(&self) -> Option<&Award> {
        self.selected.and_then(|i| self.data.awards.get(i))
    }

    /// Last planned strip scroll, if a selection has been made.
    pub fn scroll(&self) -> Option<ScrollPlan> {
        self.scroll
    }

    /// Change the keyword.
    ///
    /// A selection hidden by the new filter moves to the first visible award.
    pub fn set_keyword(&mut self, keyword: &str) {
        self.keyword = keyword.trim().to_string();

        let first_visible = {
            let filtered = self.filtered();
            let still_visible = self
                .selected
                .is_some_and(|i| filtered.position_of(i).is_some());
            if still_visible {
                None
            } else {
                Some(filtered.index_map.first().copied())
            }
        };

        match first_visible {
            None => {
                if let Some(i) = self.selected {
                    self.select(i);
                }
            }
            Some(Some(i)) => self.select(i),
            Some(None) => {
                self.selected = None;
                self.scroll = None;
            }
        }
    }

    /// Select an award by its position in the unfiltered list.
    ///
    /// Ignored when the index is out of range or hidden by the keyword.
    pub fn select(&mut self, original: usize) {
        let Some(position) = self.filtered().position_of(original) else {
            return;
        };

        let plan = carousel::plan_scroll(self.viewport, carousel::chip_box(&self.geometry, position));
        self.viewport.scroll_left = plan.target;
        self.scroll = Some(plan);
        self.selected = Some(original);
    }

    /// Select by position within the filtered strip.
    pub fn select_filtered(&mut self, position: usize) {
        let original = self.filtered().index_map.get(position).copied();
        if let Some(original) = original {
            self.select(original);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ScrollMode;
    use crate::services::build_year_data;
    use serde_json::json;

    fn year_data(count: usize) -> YearData {
        let rows: Vec<crate::models::Row> = serde_json::from_value(json!(
            (0..count)
                .map(|i| json!({"Year": 2024, "Title": format!("Award {i}"), "Winner": format!("Game {i}")}))
                .collect::<Vec<_>>()
        ))
        .unwrap();
        build_year_data(2024, &rows, "test", crate::utils::slug::PLACEHOLDER_IMAGE)
    }

    fn geometry() -> CarouselConfig {
        CarouselConfig {
            chip_width: 100.0,
            chip_gap: 0.0,
            viewport_width: 500.0,
        }
    }

    #[test]
    fn test_query_parse_and_encode() {
        let query = ViewQuery::parse(Some("q=Best+Game&award=foo_2&x=1"));
        assert_eq!(query.keyword.as_deref(), Some("Best Game"));
        assert_eq!(query.award.as_deref(), Some("foo_2"));
        assert_eq!(query.to_query_string(), "award=foo_2&q=Best+Game");

        assert_eq!(ViewQuery::parse(Some("q=%20%20")), ViewQuery::default());
        assert_eq!(ViewQuery::parse(None), ViewQuery::default());
    }

    #[test]
    fn test_open_defaults_to_first_award() {
        let session = ViewSession::open(year_data(3), &ViewQuery::default(), &geometry());
        assert_eq!(session.selected_index(), Some(0));
        assert_eq!(session.scroll().map(|s| s.target), Some(0.0));
    }

    #[test]
    fn test_open_with_selected_award() {
        let query = ViewQuery {
            keyword: None,
            award: Some("game_12".into()),
        };
        let session = ViewSession::open(year_data(20), &query, &geometry());
        assert_eq!(session.selected_index(), Some(12));
        let plan = session.scroll().unwrap();
        // chip at 1200, centered in 500 => 1000; far from 0 => jump
        assert_eq!(plan.target, 1000.0);
        assert_eq!(plan.mode, ScrollMode::Instant);
    }

    #[test]
    fn test_nearby_selection_animates() {
        let mut session = ViewSession::open(year_data(20), &ViewQuery::default(), &geometry());
        session.select(12);
        session.select(13);
        assert_eq!(session.scroll().unwrap().mode, ScrollMode::Smooth);
    }

    #[test]
    fn test_keyword_hides_selection() {
        let mut session = ViewSession::open(year_data(15), &ViewQuery::default(), &geometry());
        session.set_keyword("game 1");
        // matches Game 1, Game 10..14
        assert_eq!(session.filtered().index_map, [1, 10, 11, 12, 13, 14]);
        assert_eq!(session.selected_index(), Some(1));

        session.select_filtered(2);
        assert_eq!(session.selected_index(), Some(11));

        session.set_keyword("nothing matches");
        assert_eq!(session.selected_index(), None);
        assert!(session.selected_award().is_none());
    }

    #[test]
    fn test_select_hidden_award_is_ignored() {
        let query = ViewQuery {
            keyword: Some("game 2".into()),
            award: Some("game_0".into()),
        };
        let mut session = ViewSession::open(year_data(5), &query, &geometry());
        assert_eq!(session.selected_index(), Some(2));
        session.select(4);
        assert_eq!(session.selected_index(), Some(2));
    }
}
