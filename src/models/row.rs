//! Raw record from the spreadsheet-backed endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One spreadsheet row, kept as loose JSON.
///
/// Every accessor degrades to `None` on a missing or mistyped column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Map<String, Value>);

impl Row {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// `Year` coerced to an integer.
    ///
    /// Accepts JSON numbers and numeric strings ("2024", " 2024 ", "2024.0",
    /// "2.024e3") whose value is a whole number.
    pub fn year(&self) -> Option<i32> {
        match self.0.get("Year")? {
            Value::Number(n) => match n.as_i64() {
                Some(v) => i32::try_from(v).ok(),
                None => whole_year(n.as_f64()?),
            },
            Value::String(s) => whole_year(s.trim().parse::<f64>().ok()?),
            _ => None,
        }
    }

    /// Award title.
    pub fn title(&self) -> Option<&str> {
        self.text("Title")
    }

    /// Honoree: `Winner`, falling back to `Merit`.
    pub fn honoree(&self) -> Option<&str> {
        self.text("Winner").or_else(|| self.text("Merit"))
    }

    pub fn blogger_url(&self) -> Option<&str> {
        self.text("Blogger")
    }

    pub fn steam_url(&self) -> Option<&str> {
        self.text("Steam")
    }

    /// Trimmed, non-empty string column.
    fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key)? {
            Value::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then_some(trimmed)
            }
            _ => None,
        }
    }
}

fn whole_year(value: f64) -> Option<i32> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return None;
    }
    Some(value as i32)
}

impl From<Map<String, Value>> for Row {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_year_coercion() {
        assert_eq!(row(json!({"Year": 2024})).year(), Some(2024));
        assert_eq!(row(json!({"Year": "2023"})).year(), Some(2023));
        assert_eq!(row(json!({"Year": " 2022 "})).year(), Some(2022));
        assert_eq!(row(json!({"Year": 2021.0})).year(), Some(2021));
        assert_eq!(row(json!({"Year": 2021.5})).year(), None);
        assert_eq!(row(json!({"Year": "2024.0"})).year(), Some(2024));
        assert_eq!(row(json!({"Year": "2.024e3"})).year(), Some(2024));
        assert_eq!(row(json!({"Year": "2024.5"})).year(), None);
        assert_eq!(row(json!({"Year": "inf"})).year(), None);
        assert_eq!(row(json!({"Year": ""})).year(), None);
        assert_eq!(row(json!({"Year": "99999999999"})).year(), None);
        assert_eq!(row(json!({"Year": "twenty"})).year(), None);
        assert_eq!(row(json!({"Year": null})).year(), None);
        assert_eq!(row(json!({})).year(), None);
    }

    #[test]
    fn test_honoree_prefers_winner() {
        let r = row(json!({"Winner": "Foo", "Merit": "Bar"}));
        assert_eq!(r.honoree(), Some("Foo"));

        let r = row(json!({"Winner": "  ", "Merit": "Bar"}));
        assert_eq!(r.honoree(), Some("Bar"));

        let r = row(json!({"Winner": 42}));
        assert_eq!(r.honoree(), None);
    }
}
