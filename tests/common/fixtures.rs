//! Static store documents used across harnesses.
//!
//! Each fixture is a JSON document in the shape the page store returns from a
//! database query: an object with a `results` list of pages, columns in the
//! order the operator created them.

/// A lead query response: one fully populated page, one page with English
/// column names and text-typed class/phone columns, one nearly empty page.
pub const LEADS_RESPONSE: &str = r#"{
  "object": "list",
  "results": [
    {
      "id": "1a2b-lead",
      "created_time": "2024-02-01T09:00:00.000Z",
      "properties": {
        "Responsable": { "id": "r1", "type": "select", "select": { "id": "s1", "name": "Laura", "color": "blue" } },
        "Clase": { "id": "c1", "type": "select", "select": { "id": "s2", "name": "B", "color": "green" } },
        "Dirección": { "id": "d1", "type": "rich_text", "rich_text": [{ "type": "text", "plain_text": "Calle 5 #12, Monterrey" }] },
        "Teléfono": { "id": "t1", "type": "phone_number", "phone_number": "+52 81 1234 5678" },
        "Web": { "id": "w1", "type": "url", "url": "https://acero.example" },
        "Nombre": { "id": "title", "type": "title", "title": [{ "type": "text", "plain_text": "Aceros del Norte" }] }
      }
    },
    {
      "id": "3c4d-lead",
      "created_time": "2024-02-02T09:00:00.000Z",
      "properties": {
        "Company": { "id": "title", "type": "title", "title": [{ "plain_text": "Blue Harbor Logistics" }] },
        "Phone": { "id": "p1", "type": "rich_text", "rich_text": [{ "plain_text": "555-0199" }] },
        "Class tier": { "id": "c2", "type": "rich_text", "rich_text": [{ "plain_text": "A" }] },
        "Employees": { "id": "n1", "type": "number", "number": 40 },
        "Website": { "id": "w2", "type": "url", "url": null }
      }
    },
    {
      "id": "5e6f-lead",
      "created_time": "2024-02-03T09:00:00.000Z",
      "properties": {
        "Notas": { "id": "x1", "type": "rich_text", "rich_text": [] }
      }
    }
  ],
  "has_more": false
}"#;

/// A history query response covering each client-linkage strategy.
pub const HISTORY_RESPONSE: &str = r#"{
  "object": "list",
  "results": [
    {
      "id": "h-named",
      "created_time": "2024-03-01T08:00:00.000Z",
      "properties": {
        "Proyecto": { "type": "relation", "relation": [{ "id": "proj-9" }] },
        "Cliente": { "type": "relation", "relation": [{ "id": "client-1" }, { "id": "client-2" }] },
        "Contacto": { "type": "select", "select": { "name": "Llamada" } },
        "Asesor": { "type": "title", "title": [{ "plain_text": "Laura" }] },
        "Fecha": { "type": "date", "date": { "start": "2024-03-05T14:30:00Z", "end": null } }
      }
    },
    {
      "id": "h-any-relation",
      "created_time": "2024-03-02T08:00:00.000Z",
      "properties": {
        "Asesor": { "type": "title", "title": [{ "plain_text": "Marco" }] },
        "Vinculo": { "type": "relation", "relation": [{ "id": "client-7" }] },
        "Detalle": { "type": "rich_text", "rich_text": [{ "plain_text": "Envió brochure por correo" }] }
      }
    },
    {
      "id": "h-name-only",
      "created_time": "2024-03-03T16:45:00.000Z",
      "properties": {
        "Asesor": { "type": "title", "title": [] },
        "Empresa": { "type": "rich_text", "rich_text": [{ "plain_text": "Grupo Sol" }] },
        "Contacto": { "type": "rich_text", "rich_text": [{ "plain_text": "WhatsApp" }] }
      }
    }
  ]
}"#;

/// A history document whose second page cannot be converted (unparseable date).
pub const HISTORY_WITH_BAD_DATE: &str = r#"[
  { "id": "ok-1", "created_time": "2024-03-01T08:00:00Z", "properties": {} },
  { "id": "broken", "created_time": "2024-03-01T08:00:00Z",
    "properties": { "Fecha": { "type": "date", "date": { "start": "next tuesday" } } } },
  { "id": "ok-2", "created_time": "2024-03-02T08:00:00Z", "properties": {} }
]"#;

/// Parse a fixture document.
pub fn fixture(document: &str) -> serde_json::Value {
    serde_json::from_str(document).expect("fixture must be valid JSON")
}
