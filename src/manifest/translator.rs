//! Translator for model files: flat patterns are pre-computed DXF files

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::error::TranslatorError;
use crate::core::host::{ExportOptions, Translator};
use crate::entities::FlatPattern;

/// Resolves a flat pattern handle as a path relative to the model file and
/// copies it to the destination
#[derive(Debug, Clone)]
pub struct FlatPatternCopyTranslator {
    base_dir: PathBuf,
}

impl FlatPatternCopyTranslator {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Where the flat pattern for `pattern` is read from
    pub fn source_path(&self, pattern: &FlatPattern) -> PathBuf {
        self.base_dir.join(pattern.handle())
    }
}

impl Translator for FlatPatternCopyTranslator {
    fn save_copy_as(
        &self,
        pattern: &FlatPattern,
        options: &ExportOptions,
        destination: &Path,
    ) -> Result<(), TranslatorError> {
        if !options.flat_pattern_view {
            return Err(TranslatorError::Unsupported(
                "only the flat pattern view can be exported".to_string(),
            ));
        }

        let source = self.source_path(pattern);
        if !source.is_file() {
            return Err(TranslatorError::MissingSource(source));
        }

        if is_same_file(&source, destination) {
            return Err(TranslatorError::Failed(format!(
                "flat pattern {} is the destination file",
                source.display()
            )));
        }

        debug!(source = %source.display(), destination = %destination.display(), "copying flat pattern");
        fs::copy(&source, destination).map_err(|e| TranslatorError::Io {
            path: destination.to_path_buf(),
            source: e,
        })?;
        Ok(())
    }
}

/// Copying a file onto itself truncates it
fn is_same_file(source: &Path, destination: &Path) -> bool {
    match (fs::canonicalize(source), fs::canonicalize(destination)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
