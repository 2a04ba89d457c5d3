//! Key resolution: finds the column that plays a semantic role in a page.
//!
//! Column names and order are operator-defined, so every role is described by
//! a [`RoleRule`]: an optional kind hint, an optional case-insensitive name
//! pattern and an optional fallback column name. [`resolve`] walks the columns
//! once, left to right, and for each column checks the kind hint first and
//! the name pattern second. The first column passing either check wins, so an
//! early column matching only by name beats a later column matching by kind.

use regex::{Regex, RegexBuilder};
use std::fmt;

use crate::config::{LabelsConfig, NormalizerConfig};
use crate::error::{Error, Result};
use crate::types::{Properties, PropertyKind, PropertyValue};

/// A semantic field the transformers need, independent of the column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    LeadName,
    Address,
    Phone,
    Website,
    ClassTier,
    Agent,
    Author,
    Interaction,
    Description,
    Client,
    ClientName,
    Date,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::LeadName => "lead_name",
            Role::Address => "address",
            Role::Phone => "phone",
            Role::Website => "website",
            Role::ClassTier => "class_tier",
            Role::Agent => "agent",
            Role::Author => "author",
            Role::Interaction => "interaction",
            Role::Description => "description",
            Role::Client => "client",
            Role::ClientName => "client_name",
            Role::Date => "date",
        };
        f.write_str(name)
    }
}

/// Find the column that best matches a role.
///
/// Returns `fallback` when no column passes either check. The fallback may
/// name a column the page does not have; callers treat that as "not found".
pub fn resolve<'a>(
    columns: &[&'a str],
    properties: &Properties,
    type_hint: Option<PropertyKind>,
    pattern: Option<&Regex>,
    fallback: Option<&'a str>,
) -> Option<&'a str> {
    for &column in columns {
        if let Some(hint) = type_hint {
            if properties.get(column).map(PropertyValue::kind) == Some(hint) {
                return Some(column);
            }
        }
        if let Some(pattern) = pattern {
            if pattern.is_match(column) {
                return Some(column);
            }
        }
    }
    fallback
}

/// How one role is discovered.
#[derive(Debug, Clone)]
pub struct RoleRule {
    pub role: Role,
    pub type_hint: Option<PropertyKind>,
    pub pattern: Option<Regex>,
    pub fallback: Option<String>,
}

impl RoleRule {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            type_hint: None,
            pattern: None,
            fallback: None,
        }
    }

    pub fn with_type(mut self, kind: PropertyKind) -> Self {
        self.type_hint = Some(kind);
        self
    }

    /// Compile `pattern` case-insensitively. An empty pattern means no name check.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            self.pattern = None;
            return Ok(self);
        }
        let compiled = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| Error::InvalidPattern {
                role: self.role,
                source,
            })?;
        self.pattern = Some(compiled);
        Ok(self)
    }

    pub fn with_fallback(mut self, column: impl Into<String>) -> Self {
        self.fallback = Some(column.into());
        self
    }

    /// Whether a column name passes this rule's name check.
    pub fn name_matches(&self, column: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(column))
    }

    /// Resolve the role against a page's columns.
    pub fn resolve<'a>(&'a self, properties: &'a Properties) -> Option<&'a str> {
        let columns: Vec<&str> = properties.columns().collect();
        resolve(
            &columns,
            properties,
            self.type_hint,
            self.pattern.as_ref(),
            self.fallback.as_deref(),
        )
    }

    /// Resolve the role and fetch the column's value, if the page has it.
    pub fn lookup<'a>(&'a self, properties: &'a Properties) -> Option<(&'a str, &'a PropertyValue)> {
        let column = self.resolve(properties)?;
        let value = properties.get(column);
        tracing::trace!(role = %self.role, column, found = value.is_some(), "resolved role");
        value.map(|value| (column, value))
    }
}

/// The compiled role table plus the labels and terms the transformers need.
#[derive(Debug, Clone)]
pub struct Rules {
    pub lead_name: RoleRule,
    pub address: RoleRule,
    pub phone: RoleRule,
    pub website: RoleRule,
    pub class_tier: RoleRule,
    pub agent: RoleRule,
    pub author: RoleRule,
    pub interaction: RoleRule,
    pub description: RoleRule,
    /// Name check for the relation scan; never resolved through [`resolve`].
    pub client: RoleRule,
    pub client_name: RoleRule,
    pub date: RoleRule,
    /// Side-channel column recorded when no class-tier column exists.
    pub class_tier_column: String,
    pub labels: LabelsConfig,
    pub call_terms: Vec<String>,
    pub email_terms: Vec<String>,
}

impl Rules {
    /// Compile a config into a rule table.
    pub fn from_config(config: &NormalizerConfig) -> Result<Self> {
        let columns = &config.columns;
        let patterns = &config.patterns;
        validate_timestamp_format(&config.labels.timestamp_format)?;

        Ok(Self {
            lead_name: RoleRule::new(Role::LeadName)
                .with_type(PropertyKind::Title)
                .with_fallback(&columns.lead_title),
            address: RoleRule::new(Role::Address).with_pattern(&patterns.address)?,
            phone: RoleRule::new(Role::Phone).with_pattern(&patterns.phone)?,
            website: RoleRule::new(Role::Website).with_pattern(&patterns.website)?,
            class_tier: RoleRule::new(Role::ClassTier).with_pattern(&patterns.class_tier)?,
            agent: RoleRule::new(Role::Agent).with_pattern(&patterns.agent)?,
            author: RoleRule::new(Role::Author)
                .with_type(PropertyKind::Title)
                .with_fallback(&columns.author),
            interaction: RoleRule::new(Role::Interaction)
                .with_pattern(&patterns.interaction)?
                .with_fallback(&columns.interaction),
            description: RoleRule::new(Role::Description)
                .with_pattern(&patterns.description)?
                .with_fallback(&columns.description),
            client: RoleRule::new(Role::Client).with_pattern(&patterns.client)?,
            client_name: RoleRule::new(Role::ClientName).with_pattern(&patterns.client)?,
            date: RoleRule::new(Role::Date).with_pattern(&patterns.date)?,
            class_tier_column: columns.class_tier.clone(),
            labels: config.labels.clone(),
            call_terms: lowercase_all(&config.classify.call_terms),
            email_terms: lowercase_all(&config.classify.email_terms),
        })
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::from_config(&NormalizerConfig::defaults())
            .expect("built-in default rules must compile")
    }
}

fn lowercase_all(terms: &[String]) -> Vec<String> {
    terms.iter().map(|term| term.to_lowercase()).collect()
}

fn validate_timestamp_format(format: &str) -> Result<()> {
    use chrono::format::{Item, StrftimeItems};

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(Error::InvalidTimestampFormat(format.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
