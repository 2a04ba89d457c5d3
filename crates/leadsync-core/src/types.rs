//! Core types for leadsync-core.
//!
//! This module defines the raw side of the pipeline (a [`RawPage`] and its
//! ordered [`Properties`]) and the canonical side ([`CleanLead`],
//! [`CleanHistoryItem`]). Raw pages decode straight from the page store's
//! JSON; canonical records serialize with the field names downstream callers
//! already consume.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Property kinds and values
// ---------------------------------------------------------------------------

/// Kind tag carried by every property, independent of its column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Title,
    RichText,
    Select,
    Relation,
    PhoneNumber,
    Url,
    Date,
    /// Any store kind the engine does not read (number, checkbox and so on).
    Unsupported,
}

impl PropertyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyKind::Title => "title",
            PropertyKind::RichText => "rich_text",
            PropertyKind::Select => "select",
            PropertyKind::Relation => "relation",
            PropertyKind::PhoneNumber => "phone_number",
            PropertyKind::Url => "url",
            PropertyKind::Date => "date",
            PropertyKind::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One run of formatted text. Only the plain rendering is kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TextRun {
    #[serde(default)]
    pub plain_text: String,
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            plain_text: text.into(),
        }
    }
}

/// The chosen tag of a select property.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectTag {
    #[serde(default)]
    pub name: String,
}

/// A link to another page in the store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelationLink {
    pub id: String,
}

/// Start/end pair of a date property. Both ends are raw ISO-8601 strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

/// Value of a single column, tagged by its kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "WireProperty")]
pub enum PropertyValue {
    Title(Vec<TextRun>),
    RichText(Vec<TextRun>),
    Select(Option<SelectTag>),
    Relation(Vec<RelationLink>),
    PhoneNumber(Option<String>),
    Url(Option<String>),
    Date(Option<DateRange>),
    /// A kind outside the ones above; holds the store's kind name.
    Unsupported(String),
}

impl PropertyValue {
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyValue::Title(_) => PropertyKind::Title,
            PropertyValue::RichText(_) => PropertyKind::RichText,
            PropertyValue::Select(_) => PropertyKind::Select,
            PropertyValue::Relation(_) => PropertyKind::Relation,
            PropertyValue::PhoneNumber(_) => PropertyKind::PhoneNumber,
            PropertyValue::Url(_) => PropertyKind::Url,
            PropertyValue::Date(_) => PropertyKind::Date,
            PropertyValue::Unsupported(_) => PropertyKind::Unsupported,
        }
    }

    /// The kind name as written in the store document.
    pub fn kind_name(&self) -> &str {
        match self {
            PropertyValue::Unsupported(kind) => kind.as_str(),
            other => other.kind().as_str(),
        }
    }

    /// First run of a title value.
    pub fn title_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Title(runs) => runs.first().map(|run| run.plain_text.as_str()),
            _ => None,
        }
    }

    /// First run of a rich-text value.
    pub fn rich_text(&self) -> Option<&str> {
        match self {
            PropertyValue::RichText(runs) => runs.first().map(|run| run.plain_text.as_str()),
            _ => None,
        }
    }

    /// Name of the chosen tag of a select value.
    pub fn select_name(&self) -> Option<&str> {
        match self {
            PropertyValue::Select(Some(tag)) => Some(tag.name.as_str()),
            _ => None,
        }
    }

    /// Linked page identifiers of a relation value, in link order.
    pub fn relation_ids(&self) -> impl Iterator<Item = &str> {
        let links: &[RelationLink] = match self {
            PropertyValue::Relation(links) => links,
            _ => &[],
        };
        links.iter().map(|link| link.id.as_str())
    }

    /// A non-empty phone number value.
    pub fn phone_number(&self) -> Option<&str> {
        match self {
            PropertyValue::PhoneNumber(Some(number)) if !number.is_empty() => Some(number.as_str()),
            _ => None,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            PropertyValue::Url(Some(url)) => Some(url.as_str()),
            _ => None,
        }
    }

    /// Start timestamp of a date value.
    pub fn date_start(&self) -> Option<&str> {
        match self {
            PropertyValue::Date(Some(DateRange {
                start: Some(start), ..
            })) => Some(start.as_str()),
            _ => None,
        }
    }
}

/// Store encoding of a property: `{"type": "<kind>", "<kind>": <payload>}`.
#[derive(Deserialize)]
struct WireProperty {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    title: Option<Vec<TextRun>>,
    #[serde(default)]
    rich_text: Option<Vec<TextRun>>,
    #[serde(default)]
    select: Option<SelectTag>,
    #[serde(default)]
    relation: Option<Vec<RelationLink>>,
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    date: Option<DateRange>,
}

impl From<WireProperty> for PropertyValue {
    fn from(wire: WireProperty) -> Self {
        match wire.kind.as_str() {
            "title" => PropertyValue::Title(wire.title.unwrap_or_default()),
            "rich_text" => PropertyValue::RichText(wire.rich_text.unwrap_or_default()),
            "select" => PropertyValue::Select(wire.select),
            "relation" => PropertyValue::Relation(wire.relation.unwrap_or_default()),
            "phone_number" => PropertyValue::PhoneNumber(wire.phone_number),
            "url" => PropertyValue::Url(wire.url),
            "date" => PropertyValue::Date(wire.date),
            _ => PropertyValue::Unsupported(wire.kind),
        }
    }
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// Column-name → value mapping that keeps the store's column order.
///
/// Order matters: column discovery walks columns left to right and the first
/// hit wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties(Vec<(String, PropertyValue)>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. Lookups by name return the earliest column.
    pub fn push(&mut self, column: impl Into<String>, value: PropertyValue) {
        self.0.push((column.into(), value));
    }

    pub fn get(&self, column: &str) -> Option<&PropertyValue> {
        self.0
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Column names in native order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, PropertyValue)> for Properties {
    fn from_iter<I: IntoIterator<Item = (String, PropertyValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for Properties {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PropertiesVisitor;

        impl<'de> Visitor<'de> for PropertiesVisitor {
            type Value = Properties;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of column names to property values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Properties, A::Error> {
                let mut columns = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, value)) = map.next_entry::<String, PropertyValue>()? {
                    columns.push((name, value));
                }
                Ok(Properties(columns))
            }
        }

        deserializer.deserialize_map(PropertiesVisitor)
    }
}

/// One record as delivered by the page store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawPage {
    /// Opaque store identifier.
    pub id: String,
    /// Creation timestamp (ISO-8601) assigned by the store.
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub properties: Properties,
}

// ---------------------------------------------------------------------------
// Canonical lead
// ---------------------------------------------------------------------------

/// Which column supplied a lead's class tier, so a later update can be written
/// back to the same column in the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassSource {
    #[serde(rename = "claseColName")]
    pub column: String,
    /// The column's kind as the store names it (`select`, `rich_text`,
    /// `status`), kept even for kinds the engine does not read.
    #[serde(rename = "claseColType")]
    pub kind: String,
}

/// Canonical lead summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanLead {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    /// Always the configured category label; the store has no category signal.
    pub category: String,
    #[serde(rename = "clase")]
    pub class_tier: String,
    pub agent: String,
    pub is_selected: bool,
    pub is_synced: bool,
    #[serde(rename = "notionData")]
    pub class_source: ClassSource,
}

// ---------------------------------------------------------------------------
// Canonical history entry
// ---------------------------------------------------------------------------

/// Interaction kind of a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKind {
    Note,
    Call,
    Email,
}

impl fmt::Display for HistoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryKind::Note => write!(f, "note"),
            HistoryKind::Call => write!(f, "call"),
            HistoryKind::Email => write!(f, "email"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    pub name: String,
    #[serde(rename = "avatarUrl")]
    pub avatar_url: String,
}

/// Canonical history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanHistoryItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: HistoryKind,
    pub title: String,
    /// Short display form of `iso_date`.
    pub timestamp: String,
    /// The timestamp exactly as read from the page.
    pub iso_date: String,
    pub description: String,
    pub user: Author,
    pub client_id: Option<String>,
    /// Only set when no client identifier could be linked.
    pub client_name: Option<String>,
    pub is_synced: bool,
}
