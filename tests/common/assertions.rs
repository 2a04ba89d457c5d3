//! Domain-specific assertion macros for leadsync harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that say which
//! record and which normalization invariant was violated.

use leadsync_core::{CleanLead, RawPage};

// ---------------------------------------------------------------------------
// Lead assertions
// ---------------------------------------------------------------------------

/// Assert that a `CleanLead` carries every field default.
///
/// ```rust
/// assert_lead_defaults!(lead);
/// ```
#[macro_export]
macro_rules! assert_lead_defaults {
    ($lead:expr) => {{
        let lead: &leadsync_core::CleanLead = &$lead;
        pretty_assertions::assert_eq!(lead.name, "Sin Nombre", "lead {:?}: name", lead.id);
        pretty_assertions::assert_eq!(
            lead.address,
            "Dirección no especificada",
            "lead {:?}: address",
            lead.id
        );
        pretty_assertions::assert_eq!(lead.phone, "", "lead {:?}: phone", lead.id);
        pretty_assertions::assert_eq!(lead.website, "", "lead {:?}: website", lead.id);
        pretty_assertions::assert_eq!(lead.class_tier, "C", "lead {:?}: class tier", lead.id);
        pretty_assertions::assert_eq!(lead.agent, "Sin Asignar", "lead {:?}: agent", lead.id);
    }};
}

// ---------------------------------------------------------------------------
// History assertions
// ---------------------------------------------------------------------------

/// Assert that a `CleanHistoryItem` has a specific kind.
///
/// ```rust
/// assert_history_kind!(item, HistoryKind::Call);
/// ```
#[macro_export]
macro_rules! assert_history_kind {
    ($item:expr, $kind:expr) => {{
        let item: &leadsync_core::CleanHistoryItem = &$item;
        let expected: leadsync_core::HistoryKind = $kind;
        if item.kind != expected {
            panic!(
                "assert_history_kind! failed:\n  expected: {:?}\n  actual:   {:?}\n  title: {:?}",
                expected, item.kind, item.title
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Batch assertions
// ---------------------------------------------------------------------------

/// Assert that `output_ids` is an in-order subsequence of `input_ids`.
pub fn assert_order_preserved(input_ids: &[&str], output_ids: &[&str]) {
    let mut remaining = input_ids.iter();
    for id in output_ids {
        if !remaining.any(|candidate| candidate == id) {
            panic!(
                "output id {id:?} is missing from the input or out of order.\n  input:  {input_ids:?}\n  output: {output_ids:?}"
            );
        }
    }
}

/// Ids of raw pages, in order.
pub fn page_ids(pages: &[RawPage]) -> Vec<&str> {
    pages.iter().map(|page| page.id.as_str()).collect()
}

/// Ids of leads, in order.
pub fn lead_ids(leads: &[CleanLead]) -> Vec<&str> {
    leads.iter().map(|lead| lead.id.as_str()).collect()
}
