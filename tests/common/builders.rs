//! Test builders: ergonomic constructors for `RawPage` fixtures.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. Columns are kept in the order they are added, which is the
//! order column discovery sees them.

use leadsync_core::{
    DateRange, Properties, PropertyValue, RawPage, RelationLink, SelectTag, TextRun,
};

// ---------------------------------------------------------------------------
// PageBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`RawPage`] test fixtures.
///
/// # Example
///
/// ```rust
/// let page = PageBuilder::new("lead-1")
///     .title("Nombre", "Transportes Rivera")
///     .rich_text("Dirección", "Av. Juárez 100")
///     .select("Clase", "A")
///     .build();
/// ```
pub struct PageBuilder {
    id: String,
    created_time: Option<String>,
    properties: Properties,
}

impl PageBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_time: Some("2024-01-15T10:00:00.000Z".to_string()),
            properties: Properties::new(),
        }
    }

    pub fn created(mut self, created_time: impl Into<String>) -> Self {
        self.created_time = Some(created_time.into());
        self
    }

    pub fn no_created_time(mut self) -> Self {
        self.created_time = None;
        self
    }

    pub fn value(mut self, column: &str, value: PropertyValue) -> Self {
        self.properties.push(column, value);
        self
    }

    pub fn title(self, column: &str, text: &str) -> Self {
        self.value(column, PropertyValue::Title(vec![TextRun::new(text)]))
    }

    pub fn rich_text(self, column: &str, text: &str) -> Self {
        self.value(column, PropertyValue::RichText(vec![TextRun::new(text)]))
    }

    pub fn empty_rich_text(self, column: &str) -> Self {
        self.value(column, PropertyValue::RichText(vec![]))
    }

    pub fn select(self, column: &str, name: &str) -> Self {
        self.value(
            column,
            PropertyValue::Select(Some(SelectTag {
                name: name.to_string(),
            })),
        )
    }

    pub fn relation(self, column: &str, ids: &[&str]) -> Self {
        let links = ids
            .iter()
            .map(|id| RelationLink { id: id.to_string() })
            .collect();
        self.value(column, PropertyValue::Relation(links))
    }

    pub fn phone(self, column: &str, number: &str) -> Self {
        self.value(column, PropertyValue::PhoneNumber(Some(number.to_string())))
    }

    pub fn url(self, column: &str, url: &str) -> Self {
        self.value(column, PropertyValue::Url(Some(url.to_string())))
    }

    pub fn date(self, column: &str, start: &str) -> Self {
        self.value(
            column,
            PropertyValue::Date(Some(DateRange {
                start: Some(start.to_string()),
                end: None,
            })),
        )
    }

    pub fn build(self) -> RawPage {
        RawPage {
            id: self.id,
            created_time: self.created_time,
            properties: self.properties,
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// A lead page with every role populated under Spanish column names.
pub fn full_lead_page(id: &str) -> RawPage {
    PageBuilder::new(id)
        .title("Nombre", "Transportes Rivera")
        .rich_text("Dirección", "Av. Juárez 100, CDMX")
        .phone("Teléfono", "+52 55 5555 0101")
        .url("Sitio web", "https://rivera.example")
        .select("Clase", "A")
        .select("Responsable", "Laura")
        .build()
}

/// A history page linked to `client_id` through a "Cliente" relation.
pub fn linked_history_page(id: &str, client_id: &str) -> RawPage {
    PageBuilder::new(id)
        .title("Asesor", "Laura")
        .rich_text("Contacto", "Llamada de seguimiento")
        .rich_text("Comentario", "Pidió cotización")
        .relation("Cliente", &[client_id])
        .date("Fecha", "2024-03-05T14:30:00Z")
        .build()
}

/// A history page that fails conversion: no date column and no creation time.
pub fn undated_history_page(id: &str) -> RawPage {
    PageBuilder::new(id)
        .rich_text("Contacto", "Nota suelta")
        .no_created_time()
        .build()
}

/// Build `n` lead pages with ids `lead-0` through `lead-{n-1}`.
pub fn build_lead_pages(n: usize) -> Vec<RawPage> {
    (0..n).map(|i| full_lead_page(&format!("lead-{i}"))).collect()
}
