//! sheetdxf: flat pattern export for sheet-metal assemblies
//!
//! Walks the occurrences of an assembly, groups them by part document and
//! writes one DXF per sheet-metal part, named after the part, its
//! thickness and how many times it is used.

pub mod cli;
pub mod core;
pub mod entities;
pub mod manifest;
pub mod yaml;
