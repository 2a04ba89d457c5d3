//! History transformer: one [`RawPage`] into one [`CleanHistoryItem`].
//!
//! Client linkage tries three strategies in order, each only when the previous
//! one found nothing:
//!
//! 1. the first relation column whose name matches the client pattern and
//!    has at least one link;
//! 2. the first relation column with at least one link, whatever its name;
//! 3. a display name read from the column resolved for the client-name role
//!    (select tag or rich-text run), recorded without an identifier.

use crate::error::PageError;
use crate::resolver::Rules;
use crate::timestamp;
use crate::types::{Author, CleanHistoryItem, HistoryKind, Properties, PropertyValue, RawPage};

/// Result of client linkage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientLink {
    Id(String),
    Name(String),
    Unlinked,
}

/// Convert one page into a history entry.
pub fn transform_history(page: &RawPage, rules: &Rules) -> Result<CleanHistoryItem, PageError> {
    if page.id.trim().is_empty() {
        return Err(PageError::MissingId);
    }
    let props = &page.properties;
    let labels = &rules.labels;

    let author = rules
        .author
        .lookup(props)
        .and_then(|(_, value)| value.title_text())
        .unwrap_or(labels.author.as_str());

    let title = rules
        .interaction
        .lookup(props)
        .and_then(|(_, value)| value.rich_text().or_else(|| value.select_name()))
        .unwrap_or(labels.history_title.as_str());

    let description = rules
        .description
        .lookup(props)
        .and_then(|(_, value)| value.rich_text())
        .unwrap_or_default();

    let iso_date = rules
        .date
        .lookup(props)
        .and_then(|(_, value)| value.date_start())
        .or(page.created_time.as_deref())
        .ok_or(PageError::MissingTimestamp)?;
    let display = timestamp::parse(iso_date)?.display(&labels.timestamp_format);

    let (client_id, client_name) = match link_client(props, rules) {
        ClientLink::Id(id) => (Some(id), None),
        ClientLink::Name(name) => (None, Some(name)),
        ClientLink::Unlinked => (None, None),
    };

    Ok(CleanHistoryItem {
        id: page.id.clone(),
        kind: classify(title, rules),
        title: title.to_string(),
        timestamp: display,
        iso_date: iso_date.to_string(),
        description: description.to_string(),
        user: Author {
            name: author.to_string(),
            avatar_url: String::new(),
        },
        client_id,
        client_name,
        is_synced: true,
    })
}

/// Link a history page to its client.
pub fn link_client(props: &Properties, rules: &Rules) -> ClientLink {
    let named = props
        .iter()
        .filter(|(column, _)| rules.client.name_matches(column))
        .find_map(|(_, value)| value.relation_ids().next());
    if let Some(id) = named {
        return ClientLink::Id(id.to_string());
    }

    if let Some(id) = props.iter().find_map(|(_, value)| value.relation_ids().next()) {
        return ClientLink::Id(id.to_string());
    }

    let name = rules
        .client_name
        .lookup(props)
        .and_then(|(_, value)| match value {
            PropertyValue::Select(_) => value.select_name(),
            PropertyValue::RichText(_) => value.rich_text(),
            _ => None,
        });
    match name {
        Some(name) => ClientLink::Name(name.to_string()),
        None => ClientLink::Unlinked,
    }
}

/// Classify a history title.
///
/// The two checks are independent and run in order, so a title carrying both
/// a call term and an email term ends up as [`HistoryKind::Email`].
pub fn classify(title: &str, rules: &Rules) -> HistoryKind {
    let lower = title.to_lowercase();
    let mut kind = HistoryKind::Note;
    if rules.call_terms.iter().any(|term| lower.contains(term.as_str())) {
        kind = HistoryKind::Call;
    }
    if rules.email_terms.iter().any(|term| lower.contains(term.as_str())) {
        kind = HistoryKind::Email;
    }
    kind
}
