//! Part documents - what an occurrence in an assembly points at

use std::fmt;

/// Opaque handle to a computed flat pattern
///
/// The handle is only meaningful to the host that produced it; its
/// translator resolves it when exporting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlatPattern(String);

impl FlatPattern {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn handle(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FlatPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sheet-metal specific data of a part definition
#[derive(Debug, Clone, PartialEq)]
pub struct SheetMetal {
    /// Material thickness in model units (centimeters)
    pub thickness: f64,

    /// Unfolded geometry, absent until the authoring tool computes it
    pub flat_pattern: Option<FlatPattern>,
}

/// Part definition kinds the exporter distinguishes
#[derive(Debug, Clone, PartialEq)]
pub enum PartDefinition {
    Generic,
    SheetMetal(SheetMetal),
}

impl PartDefinition {
    /// Sheet-metal data, if this is a sheet-metal part
    pub fn as_sheet_metal(&self) -> Option<&SheetMetal> {
        match self {
            PartDefinition::SheetMetal(sm) => Some(sm),
            PartDefinition::Generic => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PartDefinition::Generic => "generic",
            PartDefinition::SheetMetal(_) => "sheet-metal",
        }
    }
}

/// A part document as loaded by the host
#[derive(Debug, Clone, PartialEq)]
pub struct PartDocument {
    /// File name as shown by the host (e.g. "Bracket.ipt")
    pub display_name: String,

    pub definition: PartDefinition,
}

impl PartDocument {
    pub fn new(display_name: impl Into<String>, definition: PartDefinition) -> Self {
        Self {
            display_name: display_name.into(),
            definition,
        }
    }

    /// Shorthand for a generic (non sheet-metal) part
    pub fn generic(display_name: impl Into<String>) -> Self {
        Self::new(display_name, PartDefinition::Generic)
    }

    /// Shorthand for a sheet-metal part
    pub fn sheet_metal(
        display_name: impl Into<String>,
        thickness: f64,
        flat_pattern: Option<FlatPattern>,
    ) -> Self {
        Self::new(
            display_name,
            PartDefinition::SheetMetal(SheetMetal {
                thickness,
                flat_pattern,
            }),
        )
    }
}
