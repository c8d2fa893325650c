//! Assembly documents - placed instances of part documents

use std::rc::Rc;

use crate::entities::part::PartDocument;

/// One placement of a part inside an assembly
///
/// Occurrences share their part document: placing the same part five times
/// yields five occurrences pointing at one `PartDocument`.
#[derive(Debug, Clone)]
pub struct Occurrence {
    /// Occurrence name as shown in the browser tree (e.g. "Bracket:2")
    pub name: String,

    part: Rc<PartDocument>,
}

impl Occurrence {
    pub fn new(name: impl Into<String>, part: Rc<PartDocument>) -> Self {
        Self {
            name: name.into(),
            part,
        }
    }

    /// The underlying part document
    pub fn part(&self) -> &PartDocument {
        &self.part
    }

    /// True if both occurrences place the very same document instance
    pub fn shares_document(&self, other: &Occurrence) -> bool {
        Rc::ptr_eq(&self.part, &other.part)
    }
}

/// Assembly document - ordered list of occurrences
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    /// File name as shown by the host (e.g. "Frame.iam")
    pub display_name: String,

    /// Top-level occurrences in browser order
    pub occurrences: Vec<Occurrence>,
}

impl Assembly {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            occurrences: Vec::new(),
        }
    }

    /// Place a part, naming the occurrence `<base>:<n>` the way CAD browsers do
    pub fn place(&mut self, part: &Rc<PartDocument>) -> &Occurrence {
        let base = crate::core::naming::base_name(&part.display_name);
        let n = self
            .occurrences
            .iter()
            .filter(|o| Rc::ptr_eq(&o.part, part))
            .count()
            + 1;
        self.occurrences
            .push(Occurrence::new(format!("{}:{}", base, n), Rc::clone(part)));
        &self.occurrences[self.occurrences.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }
}

/// Any document the host can have open
#[derive(Debug, Clone)]
pub enum Document {
    Assembly(Assembly),
    Part(Rc<PartDocument>),
}

impl Document {
    pub fn display_name(&self) -> &str {
        match self {
            Document::Assembly(asm) => &asm.display_name,
            Document::Part(part) => &part.display_name,
        }
    }

    pub fn as_assembly(&self) -> Option<&Assembly> {
        match self {
            Document::Assembly(asm) => Some(asm),
            Document::Part(_) => None,
        }
    }
}
