//! Assembly scanner - groups occurrences by part identity
//!
//! A single pass over the assembly's occurrences counts how many times each
//! distinct part is placed and remembers the first occurrence of each as its
//! representative. Groups come out in first-seen order.

use std::collections::HashMap;
use tracing::debug;

use crate::core::identity::PartIdentity;
use crate::entities::{Assembly, Occurrence};

/// All occurrences of one part identity
#[derive(Debug, Clone)]
pub struct Group<'a> {
    pub identity: PartIdentity,

    /// First occurrence encountered for this identity
    pub representative: &'a Occurrence,

    /// Number of occurrences, always at least 1
    pub count: u32,
}

/// Result of scanning one assembly
#[derive(Debug, Clone, Default)]
pub struct ScanResult<'a> {
    groups: Vec<Group<'a>>,
    index: HashMap<PartIdentity, usize>,
}

impl<'a> ScanResult<'a> {
    /// Groups in the order their identities were first seen
    pub fn groups(&self) -> &[Group<'a>] {
        &self.groups
    }

    pub fn group(&self, identity: &str) -> Option<&Group<'a>> {
        self.index.get(identity).map(|&i| &self.groups[i])
    }

    /// Occurrence count for an identity
    pub fn count(&self, identity: &str) -> Option<u32> {
        self.group(identity).map(|g| g.count)
    }

    /// Representative occurrence for an identity
    pub fn representative(&self, identity: &str) -> Option<&'a Occurrence> {
        self.group(identity).map(|g| g.representative)
    }

    /// Sum of all group counts
    pub fn total_occurrences(&self) -> usize {
        self.groups.iter().map(|g| g.count as usize).sum()
    }

    /// Number of distinct part identities
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Group an assembly's occurrences by the part document they place
pub fn scan(assembly: &Assembly) -> ScanResult<'_> {
    let mut result = ScanResult::default();

    for occurrence in &assembly.occurrences {
        let identity = PartIdentity::of_occurrence(occurrence);
        match result.index.get(&identity) {
            Some(&i) => result.groups[i].count += 1,
            None => {
                result.index.insert(identity.clone(), result.groups.len());
                result.groups.push(Group {
                    identity,
                    representative: occurrence,
                    count: 1,
                });
            }
        }
    }

    debug!(
        assembly = %assembly.display_name,
        occurrences = assembly.len(),
        distinct = result.len(),
        "scanned assembly"
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PartDocument;
    use std::rc::Rc;

    /// Builds an assembly from a pattern like "AABCA", one part per letter
    fn assembly_from(pattern: &str) -> Assembly {
        let mut parts: HashMap<char, Rc<PartDocument>> = HashMap::new();
        let mut asm = Assembly::new("Test.iam");
        for c in pattern.chars() {
            let part = parts
                .entry(c)
                .or_insert_with(|| Rc::new(PartDocument::generic(format!("{}.ipt", c))))
                .clone();
            asm.place(&part);
        }
        asm
    }

    #[test]
    fn test_counts_sum_to_occurrences() {
        let asm = assembly_from("AABCAD");
        let result = scan(&asm);
        assert_eq!(result.len(), 4);
        assert_eq!(result.total_occurrences(), 6);
        assert_eq!(result.count("A.ipt"), Some(3));
        assert_eq!(result.count("B.ipt"), Some(1));
        assert_eq!(result.count("Z.ipt"), None);
    }

    #[test]
    fn test_same_document_counted_together_regardless_of_position() {
        let asm = assembly_from("ABABBA");
        let result = scan(&asm);
        assert_eq!(result.count("A.ipt"), Some(3));
        assert_eq!(result.count("B.ipt"), Some(3));
    }

    #[test]
    fn test_representative_is_first_occurrence() {
        let asm = assembly_from("BAAB");
        let result = scan(&asm);
        assert_eq!(result.representative("A.ipt").unwrap().name, "A:1");
        assert_eq!(result.representative("B.ipt").unwrap().name, "B:1");
        assert!(std::ptr::eq(
            result.representative("A.ipt").unwrap(),
            &asm.occurrences[1]
        ));
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let asm = assembly_from("CABAC");
        let names: Vec<_> = scan(&asm)
            .groups()
            .iter()
            .map(|g| g.identity.to_string())
            .collect();
        assert_eq!(names, vec!["C.ipt", "A.ipt", "B.ipt"]);
    }

    #[test]
    fn test_rescan_is_deterministic() {
        let asm = assembly_from("AABCA");
        let first = scan(&asm);
        let second = scan(&asm);
        for (a, b) in first.groups().iter().zip(second.groups()) {
            assert_eq!(a.identity, b.identity);
            assert_eq!(a.count, b.count);
            assert!(std::ptr::eq(a.representative, b.representative));
        }
    }

    #[test]
    fn test_empty_assembly() {
        let asm = Assembly::new("Empty.iam");
        let result = scan(&asm);
        assert!(result.is_empty());
        assert_eq!(result.total_occurrences(), 0);
    }

    #[test]
    fn test_distinct_documents_with_same_name_share_identity() {
        // The host keys documents by display name; two loads of one file
        // are the same part
        let mut asm = Assembly::new("Test.iam");
        asm.place(&Rc::new(PartDocument::generic("A.ipt")));
        asm.place(&Rc::new(PartDocument::generic("A.ipt")));
        assert_eq!(scan(&asm).count("A.ipt"), Some(2));
    }
}
