//! Error taxonomy for scanning and exporting

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a translator while writing one file
#[derive(Debug, Error, Diagnostic)]
pub enum TranslatorError {
    #[error("flat pattern source not found: {0}")]
    #[diagnostic(code(sheetdxf::translator::source))]
    MissingSource(PathBuf),

    #[error("unsupported export request: {0}")]
    #[diagnostic(code(sheetdxf::translator::unsupported))]
    Unsupported(String),

    #[error("I/O error on {path}: {source}")]
    #[diagnostic(code(sheetdxf::translator::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    #[diagnostic(code(sheetdxf::translator::failed))]
    Failed(String),
}

/// Errors raised by the host's command surface
#[derive(Debug, Error, Diagnostic)]
pub enum HostError {
    #[error("command '{0}' is already registered")]
    #[diagnostic(code(sheetdxf::host::duplicate_command))]
    DuplicateCommand(String),

    #[error("command '{0}' is not registered")]
    #[diagnostic(code(sheetdxf::host::unknown_command))]
    UnknownCommand(String),
}

/// Errors reported to the user while running the export command
#[derive(Debug, Error, Diagnostic)]
pub enum ExportError {
    #[error("the active document is not an assembly")]
    #[diagnostic(
        code(sheetdxf::export::not_an_assembly),
        help("open or create an assembly and run the command again")
    )]
    NotAnAssembly { document: Option<String> },

    #[error("no flat pattern for {part}")]
    #[diagnostic(
        code(sheetdxf::export::missing_flat_pattern),
        help("create the flat pattern in the part document, then export again")
    )]
    MissingFlatPattern { part: String },

    #[error("DXF translator {id} not found or does not support saving")]
    #[diagnostic(code(sheetdxf::export::translator_unavailable))]
    ExportCapabilityUnavailable { id: String },

    #[error("failed to save DXF for {part}: {source}")]
    #[diagnostic(code(sheetdxf::export::failed))]
    ExportFailed {
        part: String,
        #[source]
        source: TranslatorError,
    },

    #[error("'{name}' derived from {part} is not a valid file name")]
    #[diagnostic(
        code(sheetdxf::export::invalid_file_name),
        help("rename the part document or set `file_names: sanitize`")
    )]
    InvalidFileName { part: String, name: String },

    #[error("'{name}' for {part} would overwrite the file already saved for {other}")]
    #[diagnostic(
        code(sheetdxf::export::file_name_collision),
        help("rename one of the part documents so their file names differ")
    )]
    FileNameCollision {
        part: String,
        other: String,
        name: String,
    },

    #[error("no output directory configured and no desktop folder found")]
    #[diagnostic(
        code(sheetdxf::export::no_output_dir),
        help("set `output_dir` in the configuration or pass --output-dir")
    )]
    OutputDirectoryUnresolved,

    #[error("cannot use output directory {path}: {source}")]
    #[diagnostic(code(sheetdxf::export::output_dir))]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    /// Part the error concerns, if it is scoped to a single group
    pub fn part(&self) -> Option<&str> {
        match self {
            ExportError::MissingFlatPattern { part }
            | ExportError::ExportFailed { part, .. }
            | ExportError::InvalidFileName { part, .. }
            | ExportError::FileNameCollision { part, .. } => Some(part),
            _ => None,
        }
    }

    /// True if the error stops the whole invocation rather than one group
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ExportError::MissingFlatPattern { .. }
                | ExportError::ExportFailed { .. }
                | ExportError::InvalidFileName { .. }
                | ExportError::FileNameCollision { .. }
        )
    }
}
