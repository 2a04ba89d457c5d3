//! Batch normalizer: drives a transformer over an ordered sequence of pages.
//!
//! Every page is converted on its own. A failing page becomes a [`Skipped`]
//! entry (and a `warn` event) and the batch carries on; output keeps the
//! relative input order of the pages that survived.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, PageError, Result};
use crate::history::transform_history;
use crate::lead::transform_lead;
use crate::resolver::Rules;
use crate::types::{CleanHistoryItem, CleanLead, RawPage};

/// Which canonical shape a batch produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Lead,
    History,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Lead => write!(f, "lead"),
            RecordKind::History => write!(f, "history"),
        }
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lead" | "leads" => Ok(RecordKind::Lead),
            "history" => Ok(RecordKind::History),
            other => Err(format!("unknown record kind '{other}' (expected lead or history)")),
        }
    }
}

/// A canonical record of either shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CleanRecord {
    Lead(CleanLead),
    History(CleanHistoryItem),
}

/// A page left out of the output.
#[derive(Debug)]
pub struct Skipped {
    /// Position of the page in the input.
    pub index: usize,
    pub page_id: Option<String>,
    pub reason: PageError,
}

/// Output of one batch: the converted records and the pages that were dropped,
/// both in input order.
#[derive(Debug)]
pub struct Batch<T> {
    pub records: Vec<T>,
    pub skipped: Vec<Skipped>,
}

impl<T> Batch<T> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            skipped: Vec::new(),
        }
    }

    fn skip(&mut self, index: usize, page_id: Option<String>, reason: PageError) {
        tracing::warn!(
            index,
            page_id = page_id.as_deref().unwrap_or("<unknown>"),
            %reason,
            "skipping page"
        );
        self.skipped.push(Skipped {
            index,
            page_id,
            reason,
        });
    }

    fn map<U>(self, f: impl FnMut(T) -> U) -> Batch<U> {
        Batch {
            records: self.records.into_iter().map(f).collect(),
            skipped: self.skipped,
        }
    }
}

/// Applies the lead or history transformer page by page.
#[derive(Debug, Clone, Default)]
pub struct BatchNormalizer {
    rules: Rules,
}

impl BatchNormalizer {
    pub fn new(rules: Rules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn leads(&self, pages: &[RawPage]) -> Batch<CleanLead> {
        self.run_with(pages.iter().map(Ok), transform_lead)
    }

    pub fn history(&self, pages: &[RawPage]) -> Batch<CleanHistoryItem> {
        self.run_with(pages.iter().map(Ok), transform_history)
    }

    /// Convert `pages` into records of `kind`, keeping the skip report.
    pub fn run(&self, pages: &[RawPage], kind: RecordKind) -> Batch<CleanRecord> {
        self.dispatch(pages.iter().map(Ok), kind)
    }

    /// Convert `pages` into records of `kind`. Dropped pages are only logged.
    pub fn normalize(&self, pages: &[RawPage], kind: RecordKind) -> Vec<CleanRecord> {
        self.run(pages, kind).records
    }

    /// Convert a store document: either a bare list of pages or an object
    /// carrying one under `results`. Each page decodes on its own, so a page
    /// with an unexpected shape is skipped like any other failing page.
    pub fn normalize_json(&self, document: &Value, kind: RecordKind) -> Result<Batch<CleanRecord>> {
        let items = page_list(document)?;
        let slots = items.iter().map(|item| {
            RawPage::deserialize(item).map_err(|err| {
                let page_id = item.get("id").and_then(Value::as_str).map(str::to_string);
                (page_id, PageError::Malformed(err))
            })
        });
        Ok(self.dispatch(slots, kind))
    }

    /// [`normalize_json`](Self::normalize_json) over a JSON string.
    pub fn normalize_json_str(&self, document: &str, kind: RecordKind) -> Result<Batch<CleanRecord>> {
        let value: Value = serde_json::from_str(document)?;
        self.normalize_json(&value, kind)
    }

    fn dispatch<P: Borrow<RawPage>>(
        &self,
        slots: impl ExactSizeIterator<Item = Slot<P>>,
        kind: RecordKind,
    ) -> Batch<CleanRecord> {
        match kind {
            RecordKind::Lead => self.run_with(slots, transform_lead).map(CleanRecord::Lead),
            RecordKind::History => self
                .run_with(slots, transform_history)
                .map(CleanRecord::History),
        }
    }

    fn run_with<P: Borrow<RawPage>, T>(
        &self,
        slots: impl ExactSizeIterator<Item = Slot<P>>,
        transform: impl Fn(&RawPage, &Rules) -> std::result::Result<T, PageError>,
    ) -> Batch<T> {
        let pages = slots.len();
        let mut batch = Batch::with_capacity(pages);
        for (index, slot) in slots.enumerate() {
            let page = match slot {
                Ok(page) => page,
                Err((page_id, reason)) => {
                    batch.skip(index, page_id, reason);
                    continue;
                }
            };
            let page = page.borrow();
            match transform(page, &self.rules) {
                Ok(record) => batch.records.push(record),
                Err(reason) => batch.skip(index, Some(page.id.clone()), reason),
            }
        }
        tracing::debug!(
            pages,
            records = batch.records.len(),
            skipped = batch.skipped.len(),
            "normalized batch"
        );
        batch
    }
}

/// A decoded page, or the id and reason of one that failed to decode.
type Slot<P> = std::result::Result<P, (Option<String>, PageError)>;

fn page_list(document: &Value) -> Result<&Vec<Value>> {
    match document {
        Value::Array(items) => Ok(items),
        Value::Object(map) => match map.get("results") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(Error::NotAPageList {
                found: "an object without a results list",
            }),
        },
        Value::Null => Err(Error::NotAPageList { found: "null" }),
        Value::Bool(_) => Err(Error::NotAPageList { found: "a boolean" }),
        Value::Number(_) => Err(Error::NotAPageList { found: "a number" }),
        Value::String(_) => Err(Error::NotAPageList { found: "a string" }),
    }
}
