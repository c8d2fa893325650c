//! Host application boundary
//!
//! Everything the exporter needs from the CAD host goes through [`Host`]:
//! the active document, the DXF translator and the command surface. The
//! scanner and orchestrator never see host-specific types.

use std::fmt;
use std::path::Path;

use crate::core::error::{HostError, TranslatorError};
use crate::entities::{Document, FlatPattern};

/// Identifier under which the host registers its DXF translator
pub const DXF_TRANSLATOR_ID: &str = "{C24E3AC4-122E-11D5-8E91-0010B541CD80}";

/// Options passed to the translator for each file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Render the flat pattern view rather than the folded model
    pub flat_pattern_view: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            flat_pattern_view: true,
        }
    }
}

/// Converts a flat pattern into a DXF file on disk
pub trait Translator {
    /// Write `pattern` to `destination`, replacing any existing file
    fn save_copy_as(
        &self,
        pattern: &FlatPattern,
        options: &ExportOptions,
        destination: &Path,
    ) -> Result<(), TranslatorError>;
}

/// A user command as presented in the host's ribbon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDefinition {
    /// Unique internal name
    pub internal_name: &'static str,
    /// Button caption
    pub display_name: &'static str,
    /// Tooltip
    pub description: &'static str,
    /// Panel the button is placed in
    pub panel: &'static str,
}

/// Handle returned by the host for a registered command
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandId(pub String);

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the exporter consumes from (and provides to) the host
pub trait Host {
    /// The document currently active in the host, if any
    fn active_document(&self) -> Option<&Document>;

    /// Look up a translator by its fixed identifier
    fn translator(&self, id: &str) -> Option<&dyn Translator>;

    /// Add a button for `command` to the host UI
    fn add_command(&mut self, command: &CommandDefinition) -> Result<CommandId, HostError>;

    /// Remove a previously added button
    fn remove_command(&mut self, id: &CommandId) -> Result<(), HostError>;
}
