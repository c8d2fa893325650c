//! Output file naming
//!
//! File names encode material thickness and how many times the part is
//! used in the assembly:
//!
//! ```text
//! <part-base-name>[-t<thickness>mm][-<count>pcs].dxf
//! ```
//!
//! Thickness is given in model units (centimeters) and rendered in
//! millimeters with one decimal digit. Rust's float formatting does not
//! consult the locale, so `1.2` is always written with a point.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::core::error::ExportError;

/// Extension of every exported file
pub const DXF_EXTENSION: &str = "dxf";

/// Model units (cm) to millimeters
const MM_PER_MODEL_UNIT: f64 = 10.0;

/// Characters no file system we write to accepts in a file name
const ILLEGAL_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Device names Windows refuses as file stems
const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Which segments go into a file name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameStyle {
    /// Base name plus thickness and occurrence count
    #[default]
    Counted,
    /// Base name only
    Minimal,
}

/// What to do with display names that are not valid file names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileNamePolicy {
    /// Replace offending characters and warn
    #[default]
    Sanitize,
    /// Refuse to export the part
    Reject,
}

/// A file name ready to be joined onto the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedName {
    pub file_name: String,

    /// Name before sanitizing, if sanitizing changed it
    pub renamed_from: Option<String>,
}

/// Strip one extension suffix from a display name ("A.ipt" -> "A")
pub fn base_name(display_name: &str) -> &str {
    match display_name.rfind('.') {
        Some(idx) if idx > 0 && !display_name[idx..].contains(['/', '\\']) => {
            &display_name[..idx]
        }
        _ => display_name,
    }
}

/// Render a thickness in model units as millimeters with one decimal
///
/// Halves round away from zero (0.125 cm is "1.3"), not to even.
pub fn format_thickness(thickness: f64) -> String {
    let mm = (thickness * MM_PER_MODEL_UNIT * 10.0).round() / 10.0;
    format!("{:.1}", mm)
}

/// Build the unsanitized file name
pub fn raw_file_name(display_name: &str, thickness: Option<f64>, count: Option<u32>) -> String {
    let mut name = base_name(display_name).to_string();
    if let Some(t) = thickness {
        name.push_str(&format!("-t{}mm", format_thickness(t)));
    }
    if let Some(n) = count {
        name.push_str(&format!("-{}pcs", n));
    }
    name.push('.');
    name.push_str(DXF_EXTENSION);
    name
}

/// Make a file stem safe for use as a single path component
pub fn sanitize_stem(stem: &str) -> Cow<'_, str> {
    let replaced: String = stem
        .chars()
        .map(|c| {
            if ILLEGAL_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    let trimmed = replaced.trim_end_matches(['.', ' ']);

    let mut out = if trimmed.is_empty() {
        "_".to_string()
    } else {
        trimmed.to_string()
    };

    let device = out.split('.').next().unwrap_or("").to_ascii_uppercase();
    if RESERVED_NAMES.contains(&device.as_str()) {
        out.insert(0, '_');
    }

    if out == stem {
        Cow::Borrowed(stem)
    } else {
        Cow::Owned(out)
    }
}

/// Naming policy applied to every exported part
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NamingPolicy {
    pub style: NameStyle,
    pub file_names: FileNamePolicy,
}

impl NamingPolicy {
    /// Derive the file name (without directory) for a part
    pub fn file_name(
        &self,
        display_name: &str,
        thickness: Option<f64>,
        count: Option<u32>,
    ) -> Result<DerivedName, ExportError> {
        let raw = match self.style {
            NameStyle::Counted => raw_file_name(display_name, thickness, count),
            NameStyle::Minimal => raw_file_name(display_name, None, None),
        };

        let stem = &raw[..raw.len() - DXF_EXTENSION.len() - 1];
        let clean = match sanitize_stem(stem) {
            Cow::Borrowed(_) => None,
            Cow::Owned(clean) => Some(clean),
        };

        match (clean, self.file_names) {
            (None, _) => Ok(DerivedName {
                file_name: raw,
                renamed_from: None,
            }),
            (Some(clean), FileNamePolicy::Sanitize) => Ok(DerivedName {
                file_name: format!("{}.{}", clean, DXF_EXTENSION),
                renamed_from: Some(raw),
            }),
            (Some(_), FileNamePolicy::Reject) => Err(ExportError::InvalidFileName {
                part: display_name.to_string(),
                name: raw,
            }),
        }
    }

    /// Derive the full output path inside `output_dir`
    pub fn output_path(
        &self,
        output_dir: &Path,
        display_name: &str,
        thickness: Option<f64>,
        count: Option<u32>,
    ) -> Result<(PathBuf, DerivedName), ExportError> {
        let name = self.file_name(display_name, thickness, count)?;
        Ok((output_dir.join(&name.file_name), name))
    }
}
