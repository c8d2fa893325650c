//! Model files - a YAML description of an assembly acting as the host
//!
//! A model file stands in for a CAD session: it describes the active
//! document (an assembly or a single part), the part documents it places,
//! and where each sheet-metal part's computed flat pattern lives.
//!
//! ```yaml
//! name: Frame.iam
//! parts:
//!   - name: Side.ipt
//!     sheet_metal:
//!       thickness: 0.12          # model units (cm)
//!       flat_pattern: flat/Side.dxf
//!   - name: Bolt.ipt
//! occurrences:
//!   - Side.ipt
//!   - Side.ipt
//!   - part: Bolt.ipt
//!     name: "Bolt:M6"
//! ```

pub mod translator;

use miette::Diagnostic;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;
use tracing::debug;

use crate::core::error::HostError;
use crate::core::host::{CommandDefinition, CommandId, Host, Translator, DXF_TRANSLATOR_ID};
use crate::entities::{Assembly, Document, FlatPattern, Occurrence, PartDocument};
use crate::yaml::{YamlContentError, YamlSyntaxError};

pub use translator::FlatPatternCopyTranslator;

/// Errors loading a model file
#[derive(Debug, Error, Diagnostic)]
pub enum ManifestError {
    #[error("cannot read model file {path}: {source}")]
    #[diagnostic(code(sheetdxf::manifest::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] YamlSyntaxError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Content(#[from] YamlContentError),
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum DocumentKind {
    #[default]
    Assembly,
    Part,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SheetMetalEntry {
    thickness: f64,
    #[serde(default)]
    flat_pattern: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartEntry {
    name: String,
    #[serde(default)]
    sheet_metal: Option<SheetMetalEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OccurrenceEntry {
    Part(String),
    Named { part: String, name: String },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModelFile {
    name: String,
    #[serde(rename = "type", default)]
    kind: DocumentKind,
    #[serde(default)]
    parts: Vec<PartEntry>,
    #[serde(default)]
    occurrences: Vec<OccurrenceEntry>,
    #[serde(default)]
    sheet_metal: Option<SheetMetalEntry>,
}

/// Host backed by a model file
pub struct ManifestHost {
    document: Document,
    translators: HashMap<String, Box<dyn Translator>>,
    commands: Vec<(CommandId, CommandDefinition)>,
}

impl ManifestHost {
    /// Load a model file; flat pattern paths resolve relative to its directory
    pub fn open(path: &Path) -> Result<Self, ManifestError> {
        let source = std::fs::read_to_string(path).map_err(|e| ManifestError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::parse(&source, &path.display().to_string(), base_dir)
    }

    /// Parse model file contents
    pub fn parse(source: &str, filename: &str, base_dir: &Path) -> Result<Self, ManifestError> {
        let document = parse_document(source, filename)?;
        debug!(document = %document.display_name(), file = filename, "loaded model file");

        let mut host = Self {
            document,
            translators: HashMap::new(),
            commands: Vec::new(),
        };
        host.register_translator(
            DXF_TRANSLATOR_ID,
            Box::new(FlatPatternCopyTranslator::new(base_dir)),
        );
        Ok(host)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Make a translator available under `id`, replacing any previous one
    pub fn register_translator(&mut self, id: impl Into<String>, translator: Box<dyn Translator>) {
        self.translators.insert(id.into(), translator);
    }

    /// Commands currently registered
    pub fn commands(&self) -> impl Iterator<Item = (&CommandId, &CommandDefinition)> {
        self.commands.iter().map(|(id, def)| (id, def))
    }
}

impl Host for ManifestHost {
    fn active_document(&self) -> Option<&Document> {
        Some(&self.document)
    }

    fn translator(&self, id: &str) -> Option<&dyn Translator> {
        self.translators.get(id).map(|t| t.as_ref())
    }

    fn add_command(&mut self, command: &CommandDefinition) -> Result<CommandId, HostError> {
        if self
            .commands
            .iter()
            .any(|(_, def)| def.internal_name == command.internal_name)
        {
            return Err(HostError::DuplicateCommand(command.internal_name.to_string()));
        }
        let id = CommandId(command.internal_name.to_string());
        self.commands.push((id.clone(), command.clone()));
        Ok(id)
    }

    fn remove_command(&mut self, id: &CommandId) -> Result<(), HostError> {
        let idx = self
            .commands
            .iter()
            .position(|(c, _)| c == id)
            .ok_or_else(|| HostError::UnknownCommand(id.0.clone()))?;
        self.commands.remove(idx);
        Ok(())
    }
}

fn parse_document(source: &str, filename: &str) -> Result<Document, ManifestError> {
    let model: ModelFile = serde_yml::from_str(source)
        .map_err(|e| YamlSyntaxError::from_serde_error(&e, source, filename))?;
    let content_error = |message: String, needle: &str, help: Option<&str>| {
        YamlContentError::at_text(message, source, filename, needle, help.map(str::to_string))
    };

    if model.kind == DocumentKind::Part {
        if !model.parts.is_empty() || !model.occurrences.is_empty() {
            return Err(content_error(
                format!("part document {} cannot have parts or occurrences", model.name),
                "type",
                Some("remove `parts` and `occurrences`, or use `type: assembly`"),
            )
            .into());
        }
        let part = build_part(&model.name, model.sheet_metal, &content_error)?;
        return Ok(Document::Part(Rc::new(part)));
    }

    if model.sheet_metal.is_some() {
        return Err(content_error(
            format!("assembly {} cannot be sheet metal", model.name),
            "sheet_metal",
            Some("move `sheet_metal` onto an entry under `parts`"),
        )
        .into());
    }

    let mut parts: HashMap<String, Rc<PartDocument>> = HashMap::new();
    for entry in model.parts {
        if parts.contains_key(&entry.name) {
            return Err(content_error(
                format!("part {} is listed more than once", entry.name),
                &format!("name: {}", entry.name),
                Some("each part document appears once; list repeats under `occurrences`"),
            )
            .into());
        }
        let part = build_part(&entry.name, entry.sheet_metal, &content_error)?;
        parts.insert(entry.name, Rc::new(part));
    }

    let mut assembly = Assembly::new(model.name);
    for entry in model.occurrences {
        let (part_name, name) = match entry {
            OccurrenceEntry::Part(part) => (part, None),
            OccurrenceEntry::Named { part, name } => (part, Some(name)),
        };
        let part = parts.get(&part_name).ok_or_else(|| {
            let mut known: Vec<_> = parts.keys().map(String::as_str).collect();
            known.sort_unstable();
            content_error(
                format!("occurrence references unknown part {}", part_name),
                &part_name,
                Some(format!("known parts: {}", known.join(", ")).as_str()),
            )
        })?;
        match name {
            Some(name) => assembly.occurrences.push(Occurrence::new(name, Rc::clone(part))),
            None => {
                assembly.place(part);
            }
        }
    }

    Ok(Document::Assembly(assembly))
}

fn build_part(
    name: &str,
    sheet_metal: Option<SheetMetalEntry>,
    content_error: &dyn Fn(String, &str, Option<&str>) -> YamlContentError,
) -> Result<PartDocument, ManifestError> {
    let Some(sm) = sheet_metal else {
        return Ok(PartDocument::generic(name));
    };

    if !sm.thickness.is_finite() || sm.thickness <= 0.0 {
        return Err(content_error(
            format!("part {} has invalid thickness {}", name, sm.thickness),
            "thickness",
            Some("thickness must be a positive number in model units (cm)"),
        )
        .into());
    }

    Ok(PartDocument::sheet_metal(
        name,
        sm.thickness,
        sm.flat_pattern.map(FlatPattern::new),
    ))
}
