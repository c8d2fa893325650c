//! YAML error diagnostics with source spans

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// YAML syntax or shape error with source location
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(sheetdxf::yaml::syntax))]
pub struct YamlSyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    /// The underlying error message
    message: String,
}

impl YamlSyntaxError {
    /// Create a syntax error from a serde_yml error
    pub fn from_serde_error(err: &serde_yml::Error, source: &str, filename: &str) -> Self {
        let (line, column) = err
            .location()
            .map(|loc| (loc.line(), loc.column()))
            .unwrap_or((1, 1));

        let offset = line_col_to_offset(source, line, column);
        let message = err.to_string();
        let help = generate_help(&message);

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(1)),
            help,
            message,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A well-formed document whose content does not make sense
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(sheetdxf::yaml::content))]
pub struct YamlContentError {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    message: String,
}

impl YamlContentError {
    /// Point at the first occurrence of `needle` in the source, or at the
    /// start of the file if it cannot be found
    pub fn at_text(
        message: impl Into<String>,
        source: &str,
        filename: &str,
        needle: &str,
        help: Option<String>,
    ) -> Self {
        let span = match source.find(needle) {
            Some(start) if !needle.is_empty() => SourceSpan::from(start..start + needle.len()),
            _ => SourceSpan::from(0..0),
        };

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span,
            help,
            message: message.into(),
        }
    }

    pub fn offset(&self) -> usize {
        self.span.offset()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Convert a 1-based line/column to a byte offset
fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let mut line_start = 0;
    for (idx, l) in source.split_inclusive('\n').enumerate() {
        if idx + 1 == line {
            let col = l
                .char_indices()
                .nth(column.saturating_sub(1))
                .map(|(i, _)| i)
                .unwrap_or(l.len());
            return line_start + col;
        }
        line_start += l.len();
    }
    source.len().saturating_sub(1)
}

/// Generate helpful suggestions based on error message
fn generate_help(message: &str) -> Option<String> {
    let msg_lower = message.to_lowercase();

    if msg_lower.contains("tab") {
        return Some(
            "YAML requires spaces for indentation, not tabs. Replace tabs with spaces.".to_string(),
        );
    }

    if msg_lower.contains("unknown field") {
        return Some(unknown_field_help(&msg_lower).to_string());
    }

    if msg_lower.contains("missing field `name`") {
        return Some("Every document and part needs a display name: `name: Bracket.ipt`".to_string());
    }

    if msg_lower.contains("thickness") {
        return Some("Thickness is a number in model units (cm): `thickness: 0.2`".to_string());
    }

    if msg_lower.contains("mapping values are not allowed") {
        return Some("You may be missing a space after ':' or have incorrect indentation.".to_string());
    }

    if msg_lower.contains("expected block end") {
        return Some("Check your indentation - it may be inconsistent.".to_string());
    }

    None
}

/// Keys accepted at the level named by serde's "expected ..." list
fn unknown_field_help(msg_lower: &str) -> &'static str {
    let expected = msg_lower.split_once("expected").map(|(_, e)| e).unwrap_or("");
    if expected.contains("`thickness`") {
        "`sheet_metal` accepts: thickness, flat_pattern"
    } else if expected.contains("`occurrences`") {
        "Model files accept: name, type, parts, occurrences, sheet_metal"
    } else if expected.contains("`sheet_metal`") {
        "Entries under `parts` accept: name, sheet_metal"
    } else {
        "Model files accept: name, type, parts, occurrences, sheet_metal; \
         entries under `parts` accept: name, sheet_metal; \
         `sheet_metal` accepts: thickness, flat_pattern"
    }
}
