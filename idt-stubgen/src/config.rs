/// Generator configuration: the vector range, the names of the kernel symbols
/// written into the output, and which blocks to emit.
///
/// Config files are JSON. Every key is optional; missing keys take the
/// defaults that reproduce the kernel's stock `interrupt_handler_19..255` table.
use crate::vector::{VectorRange, DEFAULT_LOWER, DEFAULT_UPPER};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be a C identifier, got '{value}'")]
    InvalidIdentifier { field: &'static str, value: String },
    #[error("unknown section: '{0}'. Use 'all', 'handlers', 'gates', or 'prototypes'.")]
    UnknownSection(String),
}

/// Which blocks of output to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Handler definitions followed by gate registrations.
    #[default]
    All,
    Handlers,
    Gates,
    /// `void interrupt_handler_N(void);` declarations for a header.
    #[serde(alias = "protos")]
    Prototypes,
}

impl Section {
    pub fn parse(s: &str) -> Result<Section, ConfigError> {
        match s {
            "all" => Ok(Section::All),
            "handlers" => Ok(Section::Handlers),
            "gates" => Ok(Section::Gates),
            "prototypes" | "protos" => Ok(Section::Prototypes),
            other => Err(ConfigError::UnknownSection(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::All => "all",
            Section::Handlers => "handlers",
            Section::Gates => "gates",
            Section::Prototypes => "prototypes",
        }
    }

    pub fn includes_handlers(&self) -> bool {
        matches!(self, Section::All | Section::Handlers)
    }

    pub fn includes_gates(&self) -> bool {
        matches!(self, Section::All | Section::Gates)
    }
}

/// Names of the kernel-side collaborators the generated C refers to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Symbols {
    /// Prepended to the vector number to form each handler's name.
    pub handler_prefix: String,
    pub exception_macro: String,
    pub gate_macro: String,
    /// The gate descriptor array, indexed by vector number.
    pub table: String,
    /// Leading whitespace of the message passed to the exception macro.
    pub message_indent: String,
}

impl Default for Symbols {
    fn default() -> Self {
        Self {
            handler_prefix: "interrupt_handler_".into(),
            exception_macro: "EXCEPTION".into(),
            gate_macro: "SET_INTERRUPT_GATE".into(),
            table: "idt".into(),
            message_indent: "      ".into(),
        }
    }
}

impl Symbols {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_identifier("handler_prefix", &self.handler_prefix)?;
        check_identifier("exception_macro", &self.exception_macro)?;
        check_identifier("gate_macro", &self.gate_macro)?;
        check_identifier("table", &self.table)?;
        Ok(())
    }
}

/// Everything the emitter needs for one generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub lower: u32,
    pub upper: u32,
    pub section: Section,
    /// When set, gate registrations are wrapped in `void <name>(void) { ... }`.
    pub wrap_gates: Option<String>,
    pub symbols: Symbols,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            lower: DEFAULT_LOWER,
            upper: DEFAULT_UPPER,
            section: Section::All,
            wrap_gates: None,
            symbols: Symbols::default(),
        }
    }
}

impl GeneratorConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GeneratorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn range(&self) -> VectorRange {
        VectorRange::new(self.lower, self.upper)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.symbols.validate()?;
        if let Some(name) = &self.wrap_gates {
            check_identifier("wrap_gates", name)?;
        }
        Ok(())
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_c_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn check_identifier(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if is_c_identifier(value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidIdentifier {
            field,
            value: value.to_string(),
        })
    }
}
