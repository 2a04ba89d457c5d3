//! leadsync-core: column discovery and record normalization.
//!
//! Pages arrive from an operator-defined page store whose column names, order
//! and kinds are not known at build time. This crate discovers which column
//! plays which role and normalizes every page into a canonical
//! [`CleanLead`] or [`CleanHistoryItem`].
//!
//! # Architecture
//!
//! ```text
//! RawPage sequence ──► BatchNormalizer ──► Vec<CleanRecord>
//!                            │
//!               ┌────────────┴────────────┐
//!         transform_lead           transform_history
//!               └────────────┬────────────┘
//!                   resolver (one rule per role)
//! ```
//!
//! Everything here is pure and synchronous: no I/O happens during a
//! transform, inputs are never mutated, and a failing page only removes that
//! page from the output.

pub mod batch;
pub mod config;
pub mod error;
pub mod history;
pub mod lead;
pub mod resolver;
pub mod timestamp;
pub mod types;

pub use batch::{Batch, BatchNormalizer, CleanRecord, RecordKind, Skipped};
pub use config::NormalizerConfig;
pub use error::{Error, PageError, Result};
pub use history::{classify, link_client, transform_history, ClientLink};
pub use lead::transform_lead;
pub use resolver::{resolve, Role, RoleRule, Rules};
pub use types::{
    Author, ClassSource, CleanHistoryItem, CleanLead, DateRange, HistoryKind, Properties,
    PropertyKind, PropertyValue, RawPage, RelationLink, SelectTag, TextRun,
};
