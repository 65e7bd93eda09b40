// src/services/transform.rs

//! Row to award reshaping.

use std::collections::{BTreeSet, HashMap, HashSet};

use url::Url;

use crate::models::{Award, Row, Winner, YearData};
use crate::utils::{image_path, slugify};

/// Honoree name used when a row names none.
pub const UNKNOWN_GAME: &str = "Unknown Game";

/// Build the award list for one year.
///
/// Rows whose `Year` does not coerce to exactly `year` are skipped. Blank
/// titles and honorees get fallback names, duplicates of an
/// `(award, winner)` pair are dropped, and source order is kept. Winners
/// without a usable image name get `placeholder` as `icon_url`. Never fails.
pub fn build_year_data(year: i32, rows: &[Row], source: &str, placeholder: &str) -> YearData {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut id_counts: HashMap<String, usize> = HashMap::new();
    let mut awards = Vec::new();

    for (idx, row) in rows.iter().filter(|r| r.year() == Some(year)).enumerate() {
        let position = idx + 1;
        let name = row
            .title()
            .map(str::to_string)
            .unwrap_or_else(|| format!("Award {position}"));
        let game_name = row.honoree().unwrap_or(UNKNOWN_GAME).to_string();

        if !seen.insert((name.clone(), game_name.clone())) {
            log::debug!("Dropping duplicate award {:?} / {:?}", name, game_name);
            continue;
        }

        let base_id = row
            .honoree()
            .map(slugify)
            .filter(|s| !s.is_empty())
            .or_else(|| row.title().map(slugify).filter(|s| !s.is_empty()))
            .unwrap_or_else(|| format!("award_{position}"));

        awards.push(Award {
            id: unique_id(base_id, &mut id_counts),
            winner: Winner {
                icon_url: image_path(year, &game_name, placeholder),
                game_name,
                blogger_url: row.blogger_url().and_then(web_link),
                steam_url: row.steam_url().and_then(web_link),
            },
            name,
            nominees: Vec::new(),
        });
    }

    YearData {
        year,
        source: source.to_string(),
        awards,
    }
}

/// Keep a link only when it is an absolute `http` or `https` URL.
fn web_link(raw: &str) -> Option<String> {
    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Some(raw.to_string()),
        Ok(url) => {
            log::warn!("Dropping {} link {:?}", url.scheme(), raw);
            None
        }
        Err(_) => None,
    }
}

/// Suffix repeated ids with `_2`, `_3`, ... so selection keys stay unique.
fn unique_id(base: String, counts: &mut HashMap<String, usize>) -> String {
    let count = counts.entry(base.clone()).or_insert(0);
    *count += 1;
    if *count == 1 {
        return base;
    }
    let mut n = *count;
    loop {
        let candidate = format!("{base}_{n}");
        if !counts.contains_key(&candidate) {
            counts.insert(candidate.clone(), 1);
            return candidate;
        }
        n += 1;
    }
}

/// Distinct years present in the rows, newest first.
pub fn available_years(rows: &[Row]) -> Vec<i32> {
    rows.iter()
        .filter_map(Row::year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .collect()
}
