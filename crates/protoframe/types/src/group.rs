//! Instances grouped by frame type.

use std::collections::{BTreeMap, HashSet};

use crate::frame::FrameInstance;

/// Frame instances grouped by frame type.
///
/// Frame types iterate in sorted order and each group keeps the order in
/// which its instances were first inserted, so every batch operation sees
/// one explicit, reproducible sequence. Duplicate ids within a group are
/// dropped (first occurrence wins).
#[derive(Clone, Debug, Default)]
pub struct FrameGroups {
    groups: BTreeMap<String, Vec<FrameInstance>>,
    seen: HashSet<(String, String)>,
}

impl FrameGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group an instance sequence by frame type.
    pub fn from_instances<I>(instances: I) -> Self
    where
        I: IntoIterator<Item = FrameInstance>,
    {
        let mut groups = Self::new();
        for instance in instances {
            groups.insert(instance);
        }
        groups
    }

    /// Append an instance to its frame type's group.
    ///
    /// Returns `false` when an instance with the same id is already present
    /// in that group.
    pub fn insert(&mut self, instance: FrameInstance) -> bool {
        let key = (instance.frame_type.clone(), instance.id.clone());
        if !self.seen.insert(key) {
            return false;
        }
        self.groups
            .entry(instance.frame_type.clone())
            .or_default()
            .push(instance);
        true
    }

    /// Instances of one frame type, in insertion order.
    pub fn get(&self, frame_type: &str) -> Option<&[FrameInstance]> {
        self.groups.get(frame_type).map(Vec::as_slice)
    }

    /// Iterate `(frame_type, instances)` in sorted frame-type order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FrameInstance])> {
        self.groups
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of frame types.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of instances across all groups.
    pub fn total_instances(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}
