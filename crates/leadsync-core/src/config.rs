//! Configuration types for leadsync.
//!
//! [`NormalizerConfig::load`] reads `~/.config/leadsync/config.toml` when it
//! exists, layered over the hardcoded defaults. [`NormalizerConfig::defaults`]
//! returns the same defaults without touching the filesystem (useful in tests).
//!
//! The config only carries strings; [`Rules::from_config`](crate::Rules::from_config)
//! compiles it into the role table the transformers use.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::Result;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[columns]
lead_title  = "Name"
author      = "Asesor"
interaction = "Contacto"
description = "Comentario"
class_tier  = "Clase"

[patterns]
address     = "address|direcci|ubicaci"
phone       = "phone|tel"
website     = "web|url"
class_tier  = "clase|class"
agent       = "responsable|agent"
interaction = "contacto|prospeccion"
description = "comentario|detalle|descri"
client      = "cliente|empresa|lead|relation"
date        = "fecha|date"

[labels]
lead_name        = "Sin Nombre"
address          = "Dirección no especificada"
agent            = "Sin Asignar"
category         = "Otros"
class_tier       = "C"
author           = "Sistema"
history_title    = "Nota"
timestamp_format = "%b %d, %H:%M"

[classify]
call_terms  = ["llamada", "tel"]
email_terms = ["mail", "correo", "what"]
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level normalizer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct NormalizerConfig {
    #[serde(default)]
    pub columns: ColumnsConfig,
    #[serde(default)]
    pub patterns: PatternsConfig,
    #[serde(default)]
    pub labels: LabelsConfig,
    #[serde(default)]
    pub classify: ClassifyConfig,
}

/// `[columns]`: column names tried when no column matches a role.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColumnsConfig {
    pub lead_title: String,
    pub author: String,
    pub interaction: String,
    pub description: String,
    /// Recorded as the class-tier source when no class column exists.
    pub class_tier: String,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            lead_title: "Name".to_string(),
            author: "Asesor".to_string(),
            interaction: "Contacto".to_string(),
            description: "Comentario".to_string(),
            class_tier: "Clase".to_string(),
        }
    }
}

/// `[patterns]`: case-insensitive column-name patterns, one per role.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PatternsConfig {
    pub address: String,
    pub phone: String,
    pub website: String,
    pub class_tier: String,
    pub agent: String,
    pub interaction: String,
    pub description: String,
    pub client: String,
    pub date: String,
}

impl Default for PatternsConfig {
    fn default() -> Self {
        Self {
            address: "address|direcci|ubicaci".to_string(),
            phone: "phone|tel".to_string(),
            website: "web|url".to_string(),
            class_tier: "clase|class".to_string(),
            agent: "responsable|agent".to_string(),
            interaction: "contacto|prospeccion".to_string(),
            description: "comentario|detalle|descri".to_string(),
            client: "cliente|empresa|lead|relation".to_string(),
            date: "fecha|date".to_string(),
        }
    }
}

/// `[labels]`: field defaults and the display timestamp format.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LabelsConfig {
    pub lead_name: String,
    pub address: String,
    pub agent: String,
    pub category: String,
    pub class_tier: String,
    pub author: String,
    pub history_title: String,
    /// `chrono` strftime format for the display timestamp.
    pub timestamp_format: String,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            lead_name: "Sin Nombre".to_string(),
            address: "Dirección no especificada".to_string(),
            agent: "Sin Asignar".to_string(),
            category: "Otros".to_string(),
            class_tier: "C".to_string(),
            author: "Sistema".to_string(),
            history_title: "Nota".to_string(),
            timestamp_format: "%b %d, %H:%M".to_string(),
        }
    }
}

/// `[classify]`: title terms that mark a history entry as a call or email.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifyConfig {
    pub call_terms: Vec<String>,
    pub email_terms: Vec<String>,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            call_terms: vec!["llamada".to_string(), "tel".to_string()],
            email_terms: vec![
                "mail".to_string(),
                "correo".to_string(),
                "what".to_string(),
            ],
        }
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

impl NormalizerConfig {
    /// Load from `~/.config/leadsync/config.toml`, layered on top of the
    /// built-in defaults. A missing file is not an error.
    pub fn load() -> Result<Self> {
        Self::layered(&config_path(), false)
    }

    /// Load from an explicit path, layered on top of the built-in defaults.
    /// The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::layered(path, true)
    }

    /// Parse an inline TOML document over the built-in defaults.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    fn layered(path: &Path, required: bool) -> Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(required))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// Default user config location, honouring `XDG_CONFIG_HOME`.
pub fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("leadsync")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
