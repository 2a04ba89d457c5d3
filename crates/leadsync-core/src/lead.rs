//! Lead transformer: one [`RawPage`] into one [`CleanLead`].
//!
//! Each field is resolved independently and falls back to its configured
//! label, so a page is never dropped because a column is missing.

use serde_json::{json, Map, Value};

use crate::error::PageError;
use crate::resolver::Rules;
use crate::types::{ClassSource, CleanLead, PropertyKind, PropertyValue, RawPage};

/// Convert one page into a lead.
pub fn transform_lead(page: &RawPage, rules: &Rules) -> Result<CleanLead, PageError> {
    if page.id.trim().is_empty() {
        return Err(PageError::MissingId);
    }
    let props = &page.properties;
    let labels = &rules.labels;

    let name = rules
        .lead_name
        .lookup(props)
        .and_then(|(_, value)| value.title_text())
        .unwrap_or(labels.lead_name.as_str());

    let address = rules
        .address
        .lookup(props)
        .and_then(|(_, value)| value.rich_text())
        .unwrap_or(labels.address.as_str());

    let phone = rules
        .phone
        .lookup(props)
        .and_then(|(_, value)| value.phone_number().or_else(|| value.rich_text()))
        .unwrap_or_default();

    let website = rules
        .website
        .lookup(props)
        .and_then(|(_, value)| value.url())
        .unwrap_or_default();

    let class_column = rules.class_tier.lookup(props);
    let class_tier = class_column
        .and_then(|(_, value)| class_text(value))
        .unwrap_or(labels.class_tier.as_str());
    let class_source = match class_column {
        Some((column, value)) => ClassSource {
            column: column.to_string(),
            kind: value.kind_name().to_string(),
        },
        None => ClassSource {
            column: rules.class_tier_column.clone(),
            kind: PropertyKind::Select.as_str().to_string(),
        },
    };

    let agent = rules
        .agent
        .lookup(props)
        .and_then(|(_, value)| value.select_name())
        .unwrap_or(labels.agent.as_str());

    Ok(CleanLead {
        id: page.id.clone(),
        name: name.to_string(),
        address: address.to_string(),
        phone: phone.to_string(),
        website: website.to_string(),
        category: labels.category.clone(),
        class_tier: class_tier.to_string(),
        agent: agent.to_string(),
        is_selected: false,
        is_synced: true,
        class_source,
    })
}

/// Class tiers live in either a select tag or a rich-text run.
fn class_text(value: &PropertyValue) -> Option<&str> {
    match value {
        PropertyValue::Select(_) => value.select_name(),
        PropertyValue::RichText(_) => value.rich_text(),
        _ => None,
    }
}

impl ClassSource {
    /// Property patch that writes `tier` back to the recorded column, shaped
    /// for the column's kind. Anything other than rich text is written as a
    /// select tag.
    pub fn update_payload(&self, tier: &str) -> Value {
        let property = if self.kind == PropertyKind::RichText.as_str() {
            json!({ "rich_text": [{ "text": { "content": tier } }] })
        } else {
            json!({ "select": { "name": tier } })
        };
        let mut patch = Map::new();
        patch.insert(self.column.clone(), property);
        Value::Object(patch)
    }
}
