use std::collections::BTreeMap;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::cell::RawRow;
use crate::decode::SheetRows;

/// How a column intent picks its column out of the header list.
#[derive(Debug, Clone)]
pub enum ColumnMatcher {
    /// Case-insensitive substring.
    Contains(String),
    /// Exact, case-sensitive column name.
    Exact(String),
    Pattern(Regex),
}

impl ColumnMatcher {
    pub fn contains(needle: impl Into<String>) -> Self {
        ColumnMatcher::Contains(needle.into())
    }

    pub fn exact(name: impl Into<String>) -> Self {
        ColumnMatcher::Exact(name.into())
    }

    pub fn matches(&self, column: &str) -> bool {
        match self {
            ColumnMatcher::Contains(needle) => {
                column.to_lowercase().contains(&needle.to_lowercase())
            }
            ColumnMatcher::Exact(name) => column == name,
            ColumnMatcher::Pattern(re) => re.is_match(column),
        }
    }

    /// First column in `columns` order that matches.
    pub fn find<'a>(&self, columns: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
        columns.into_iter().find(|c| self.matches(c))
    }
}

/// The fields a card needs, each bound to a column matcher.
#[derive(Debug, Clone)]
pub struct ColumnIntents {
    pub quote: ColumnMatcher,
    pub teammate: ColumnMatcher,
    pub name: ColumnMatcher,
    pub photo: ColumnMatcher,
}

impl Default for ColumnIntents {
    fn default() -> Self {
        Self::with_quote(ColumnMatcher::contains("reason"))
    }
}

impl ColumnIntents {
    pub fn with_quote(quote: ColumnMatcher) -> Self {
        Self {
            quote,
            teammate: ColumnMatcher::exact("Teammate"),
            name: ColumnMatcher::exact("Name"),
            photo: ColumnMatcher::exact("Photo"),
        }
    }

    /// Bind every intent to a concrete column, first match in `headers`
    /// order. Intents with no matching column stay `None`.
    pub fn resolve<'a>(&self, headers: impl IntoIterator<Item = &'a str>) -> ResolvedColumns {
        let headers: Vec<&str> = headers.into_iter().collect();
        let pick = |m: &ColumnMatcher| m.find(headers.iter().copied()).map(str::to_string);
        ResolvedColumns {
            quote: pick(&self.quote),
            teammate: pick(&self.teammate),
            name: pick(&self.name),
            photo: pick(&self.photo),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub quote: Option<String>,
    pub teammate: Option<String>,
    pub name: Option<String>,
    pub photo: Option<String>,
}

/// Attributed name to photo asset path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoTable {
    entries: BTreeMap<String, String>,
}

impl Default for PhotoTable {
    fn default() -> Self {
        [("Evelin Ortiz", "/Eve.jpg"), ("Isabel Moreira", "/isa.jpeg")]
            .into_iter()
            .collect()
    }
}

impl PhotoTable {
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PhotoTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// One rendered shout-out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CardRecord {
    pub quote_text: String,
    pub teammate_name: String,
    pub attributed_name: String,
    pub photo_key: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Projector {
    pub intents: ColumnIntents,
    pub photos: PhotoTable,
}

impl Projector {
    pub fn new(intents: ColumnIntents, photos: PhotoTable) -> Self {
        Self { intents, photos }
    }

    /// Project a whole sheet. Columns are resolved once against the declared
    /// headers, not per row.
    pub fn project_sheet(&self, sheet: &SheetRows) -> Vec<CardRecord> {
        let resolved = self.intents.resolve(sheet.headers.iter().map(String::as_str));
        debug!(?resolved, rows = sheet.rows.len(), "resolved card columns");
        sheet
            .rows
            .iter()
            .map(|row| self.project_resolved(&resolved, row))
            .collect()
    }

    /// Project a single row, resolving columns against the row's own keys.
    pub fn project(&self, row: &RawRow) -> CardRecord {
        let resolved = self.intents.resolve(row.columns());
        self.project_resolved(&resolved, row)
    }

    pub fn project_resolved(&self, resolved: &ResolvedColumns, row: &RawRow) -> CardRecord {
        let text = |column: &Option<String>| {
            column
                .as_deref()
                .and_then(|c| row.get(c))
                .map(|v| v.to_string())
                .unwrap_or_default()
        };

        let attributed_name = text(&resolved.name);
        let has_photo = resolved
            .photo
            .as_deref()
            .and_then(|c| row.get(c))
            .is_some_and(|v| v.is_truthy());
        // Photos are keyed by the attributed name, never the teammate.
        let photo_key = if has_photo {
            self.photos.lookup(&attributed_name).map(str::to_string)
        } else {
            None
        };

        CardRecord {
            quote_text: text(&resolved.quote),
            teammate_name: text(&resolved.teammate),
            attributed_name,
            photo_key,
        }
    }
}
