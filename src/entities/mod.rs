//! Host document model
//!
//! The exporter sees the following document types:
//!
//! - [`Assembly`] - Ordered occurrences of part documents
//! - [`Occurrence`] - One placement of a part, sharing its [`PartDocument`]
//! - [`PartDocument`] - A part with a [`PartDefinition`] (generic or sheet metal)
//! - [`FlatPattern`] - Opaque handle to a computed sheet-metal unfolding

pub mod assembly;
pub mod part;

pub use assembly::{Assembly, Document, Occurrence};
pub use part::{FlatPattern, PartDefinition, PartDocument, SheetMetal};
