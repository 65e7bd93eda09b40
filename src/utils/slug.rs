// src/utils/slug.rs

//! Display name to URL/file token conversion.

use std::sync::LazyLock;

use regex::Regex;

/// Default image used when no year or usable name is available.
pub const PLACEHOLDER_IMAGE: &str = "/img/placeholder.webp";

pub(crate) static NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("static regex"));

/// Convert a display name into a lowercase `[a-z0-9_]` token.
///
/// Never fails; names with no usable characters yield an empty string.
///
/// # Examples
/// ```
/// use awardhub::utils::slugify;
///
/// assert_eq!(slugify("Baldur's Gate 3"), "baldur_s_gate_3");
/// assert_eq!(slugify("Rock & Roll™"), "rock_and_roll");
/// ```
pub fn slugify(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let mut prepared = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        match c {
            '&' => prepared.push_str("and"),
            '™' | '®' | '©' => {}
            // possessive and plain apostrophes both become separators
            '\'' | '’' | '‘' | '`' => prepared.push('_'),
            _ => prepared.push(c),
        }
    }

    NON_ALNUM
        .replace_all(&prepared, "_")
        .trim_matches('_')
        .to_string()
}

/// Primary image path for a game in a given award year.
///
/// Falls back to `placeholder` for a non-positive year or a name that
/// slugifies to nothing.
pub fn image_path(year: i32, name: &str, placeholder: &str) -> String {
    let slug = slugify(name);
    if year <= 0 || slug.is_empty() {
        return placeholder.to_string();
    }
    format!("/img/{year}/{slug}.webp")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_well_formed(slug: &str) -> bool {
        slug.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
            && !slug.starts_with('_')
            && !slug.ends_with('_')
            && !slug.contains("__")
    }

    #[test]
    fn test_basic_names() {
        assert_eq!(slugify("Game of the Year"), "game_of_the_year");
        assert_eq!(slugify("  Hades II  "), "hades_ii");
        assert_eq!(slugify("Red Dead Redemption 2"), "red_dead_redemption_2");
    }

    #[test]
    fn test_symbols() {
        assert_eq!(slugify("Sid Meier's Civilization® VI"), "sid_meier_s_civilization_vi");
        assert_eq!(slugify("Half-Life: Alyx"), "half_life_alyx");
        assert_eq!(slugify("Tom Clancy’s The Division™"), "tom_clancy_s_the_division");
        assert_eq!(slugify("Papers & Please"), "papers_and_please");
    }

    #[test]
    fn test_empty_and_symbol_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("™®"), "");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("'''"), "");
    }

    #[test]
    fn test_charset_and_determinism() {
        let names = [
            "Game of the Year",
            "  _leading and trailing_  ",
            "Ünïcödé Tïtle",
            "Labor of Love!!",
            "A--B__C",
            "DOOM Eternal",
            "It's ''quoted''",
            "日本語のゲーム",
        ];
        for name in names {
            let slug = slugify(name);
            assert!(is_well_formed(&slug), "{name:?} -> {slug:?}");
            assert_eq!(slug, slugify(name));
        }
    }

    #[test]
    fn test_image_path() {
        assert_eq!(
            image_path(2024, "Black Myth: Wukong", PLACEHOLDER_IMAGE),
            "/img/2024/black_myth_wukong.webp"
        );
        assert_eq!(image_path(0, "Foo", PLACEHOLDER_IMAGE), PLACEHOLDER_IMAGE);
        assert_eq!(image_path(-1, "Foo", PLACEHOLDER_IMAGE), PLACEHOLDER_IMAGE);
        assert_eq!(image_path(2024, "™", PLACEHOLDER_IMAGE), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_image_path_uses_given_placeholder() {
        assert_eq!(image_path(0, "Foo", "/static/none.png"), "/static/none.png");
        assert_eq!(image_path(2024, "!!!", "/static/none.png"), "/static/none.png");
    }
}
