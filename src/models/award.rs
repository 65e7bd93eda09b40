//! Normalized award structures.

use serde::{Deserialize, Serialize};

/// The honored game of an award.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub game_name: String,

    /// Primary image path, or the placeholder
    pub icon_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blogger_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steam_url: Option<String>,
}

/// One award entry for a given year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    /// Stable `[a-z0-9_]` identifier, unique within its year
    pub id: String,

    pub name: String,

    pub winner: Winner,

    /// Never populated from the endpoint; exported files may carry them.
    #[serde(default)]
    pub nominees: Vec<Winner>,
}

/// All awards for one year, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearData {
    pub year: i32,
    pub source: String,
    pub awards: Vec<Award>,
}

impl YearData {
    /// Position of the award with the given id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.awards.iter().position(|a| a.id == id)
    }
}
