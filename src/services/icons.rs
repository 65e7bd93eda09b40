// src/services/icons.rs

//! Offline icon filler for exported year files.
//!
//! Walks `steam_awards_*.json` exports and points every winner and
//! nominee `icon_url` at the first matching file under the image directory:
//!
//! ```text
//! img/
//! └── 2023/
//!     ├── baldurs_gate_3.jpg
//!     └── red_dead_redemption_2.png
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{AppError, Result};
use crate::utils::slug::NON_ALNUM;

/// `icon_url` written when no image matches.
pub const ICON_PLACEHOLDER: &str = "img/*";

const FILE_PREFIX: &str = "steam_awards_";
const FILE_SUFFIX: &str = ".json";
const EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp"];
const NAME_SUFFIXES: &[&str] = &["", "_2", "_3", "_4", "_5"];

/// Summary of a fill run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FillReport {
    pub updated: usize,
    pub total: usize,
}

/// Slug matching how image files are named on disk.
///
/// Apostrophes are dropped rather than turned into separators, and an
/// empty result becomes `"unknown"`.
pub fn file_slug(text: &str) -> String {
    let prepared: String = text
        .trim()
        .to_lowercase()
        .replace('&', "and")
        .chars()
        .filter(|c| !matches!(c, '®' | '™' | '’' | '\''))
        .collect();

    let slug = NON_ALNUM.replace_all(&prepared, "_");
    match slug.trim_matches('_') {
        "" => "unknown".to_string(),
        slug => slug.to_string(),
    }
}

/// First image under `img_dir/{year}/` named after `base_slug`.
///
/// Returns a site-relative path such as `img/2023/foo_2.png`.
pub fn find_image_for(img_dir: &Path, year: i64, base_slug: &str) -> Option<String> {
    let year_dir = img_dir.join(year.to_string());
    if !year_dir.is_dir() {
        return None;
    }

    NAME_SUFFIXES.iter().find_map(|suffix| {
        EXTENSIONS.iter().find_map(|ext| {
            let file_name = format!("{base_slug}{suffix}{ext}");
            year_dir
                .join(&file_name)
                .is_file()
                .then(|| format!("img/{year}/{file_name}"))
        })
    })
}

/// Fill every `icon_url` in matching files under `data_dir`.
pub fn fill_icon_urls(data_dir: &Path, img_dir: &Path) -> Result<FillReport> {
    if !data_dir.is_dir() {
        return Err(AppError::config(format!(
            "Data directory not found: {}",
            data_dir.display()
        )));
    }

    let files = export_files(data_dir)?;
    if files.is_empty() {
        return Err(AppError::config(format!(
            "No JSON files matched: {}/{FILE_PREFIX}*{FILE_SUFFIX}",
            data_dir.display()
        )));
    }

    let mut report = FillReport {
        total: files.len(),
        ..FillReport::default()
    };

    for path in files {
        let content = fs::read_to_string(&path)?;
        let mut data: Value = serde_json::from_str(&content)?;
        let year = export_year(&data).ok_or_else(|| {
            AppError::validation(format!("Missing or invalid year in {}", path.display()))
        })?;

        if fill_year(&mut data, year, img_dir) {
            fs::write(&path, serde_json::to_string_pretty(&data)?)?;
            report.updated += 1;
            log::info!("Updated icons in {}", path.display());
        } else {
            log::info!("No changes for {}", path.display());
        }
    }

    Ok(report)
}

fn export_files(data_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(data_dir)? {
        let path = entry?.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(FILE_PREFIX) && n.ends_with(FILE_SUFFIX));
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn export_year(data: &Value) -> Option<i64> {
    match data.get("year")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Fill winners and nominees of every award; true if anything changed.
fn fill_year(data: &mut Value, year: i64, img_dir: &Path) -> bool {
    let Some(awards) = data.get_mut("awards").and_then(Value::as_array_mut) else {
        return false;
    };

    let mut changed = false;
    for award in awards {
        if let Some(winner) = award.get_mut("winner").filter(|w| w.is_object()) {
            changed |= fill_game_icon(winner, year, img_dir);
        }
        if let Some(nominees) = award.get_mut("nominees").and_then(Value::as_array_mut) {
            for nominee in nominees.iter_mut().filter(|n| n.is_object()) {
                changed |= fill_game_icon(nominee, year, img_dir);
            }
        }
    }
    changed
}

fn fill_game_icon(game: &mut Value, year: i64, img_dir: &Path) -> bool {
    let name = game
        .get("game_name")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or("");

    let icon = if name.is_empty() {
        ICON_PLACEHOLDER.to_string()
    } else {
        find_image_for(img_dir, year, &file_slug(name)).unwrap_or_else(|| ICON_PLACEHOLDER.into())
    };

    let before = game.get("icon_url").cloned();
    game["icon_url"] = Value::String(icon);
    before.as_ref() != game.get("icon_url")
}
