//! Buckets records into KeePass groups by their LastPass grouping label.

use std::collections::HashMap;

use super::record::{Record, SourceRow};

/// Group that holds ungrouped entries and encloses every other group.
pub const DEFAULT_GROUP: &str = "General";

/// LastPass writes this when an entry has no folder.
pub const NO_GROUP_SENTINEL: &str = "(none)";

/// Group name a raw grouping label maps to.
///
/// No trimming or case folding is applied.
pub fn group_name_for(grouping: &str) -> &str {
    if grouping.is_empty() || grouping == NO_GROUP_SENTINEL {
        DEFAULT_GROUP
    } else {
        grouping
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub records: Vec<Record>,
}

impl Group {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            records: Vec::new(),
        }
    }
}

/// Groups in emission order: the default group first, then the others in
/// the order their label was first seen.
#[derive(Debug, Clone)]
pub struct GroupedRecords {
    groups: Vec<Group>,
    index: HashMap<String, usize>,
}

impl Default for GroupedRecords {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupedRecords {
    pub fn new() -> Self {
        let mut index = HashMap::new();
        index.insert(DEFAULT_GROUP.to_string(), 0);
        Self {
            groups: vec![Group::new(DEFAULT_GROUP)],
            index,
        }
    }

    /// Append `record` to the group its label maps to.
    pub fn insert(&mut self, grouping: &str, record: Record) {
        let name = group_name_for(grouping);
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                self.groups.push(Group::new(name));
                self.index.insert(name.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[idx].records.push(record);
    }

    /// The default group. Always present, possibly empty.
    pub fn general(&self) -> &Group {
        &self.groups[0]
    }

    /// Every group other than the default one, in first-seen order.
    pub fn others(&self) -> &[Group] {
        &self.groups[1..]
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn get(&self, name: &str) -> Option<&Group> {
        self.index.get(name).map(|&idx| &self.groups[idx])
    }

    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|g| g.records.len()).sum()
    }
}

/// Bucket parsed rows, preserving input order within each group.
pub fn group_records<I>(rows: I) -> GroupedRecords
where
    I: IntoIterator<Item = SourceRow>,
{
    let mut grouped = GroupedRecords::new();
    for row in rows {
        grouped.insert(&row.grouping, row.record);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_and_empty_map_to_default() {
        assert_eq!(group_name_for(""), DEFAULT_GROUP);
        assert_eq!(group_name_for("(none)"), DEFAULT_GROUP);
        assert_eq!(group_name_for("(None)"), "(None)");
        assert_eq!(group_name_for(" Finance"), " Finance");
    }

    #[test]
    fn test_default_group_exists_when_empty() {
        let grouped = GroupedRecords::new();
        assert_eq!(grouped.groups().len(), 1);
        assert_eq!(grouped.general().name, DEFAULT_GROUP);
        assert!(grouped.others().is_empty());
    }

    #[test]
    fn test_explicit_general_label_merges_with_default() {
        let mut grouped = GroupedRecords::new();
        grouped.insert("General", Record::default());
        grouped.insert("", Record::default());
        assert_eq!(grouped.groups().len(), 1);
        assert_eq!(grouped.general().records.len(), 2);
    }
}
