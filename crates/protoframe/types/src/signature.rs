//! Canonical signatures for structural duplicate detection.

use std::collections::BTreeMap;

use crate::frame::FrameInstance;

/// Order-independent structural identity of a frame instance.
///
/// Built from the frame type and the role → entity mapping sorted by role.
/// Two instances with equal signatures are treated as the same fact by
/// frequency-based selection.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalSignature {
    frame_type: String,
    elements: Vec<(String, String)>,
}

impl CanonicalSignature {
    pub fn of(instance: &FrameInstance) -> Self {
        let mapping: BTreeMap<&str, &str> = instance
            .elements
            .iter()
            .map(|fe| (fe.role.as_str(), fe.entity.as_str()))
            .collect();
        Self {
            frame_type: instance.frame_type.clone(),
            elements: mapping
                .into_iter()
                .map(|(r, e)| (r.to_string(), e.to_string()))
                .collect(),
        }
    }

    pub fn frame_type(&self) -> &str {
        &self.frame_type
    }

    pub fn elements(&self) -> &[(String, String)] {
        &self.elements
    }
}

impl From<&FrameInstance> for CanonicalSignature {
    fn from(instance: &FrameInstance) -> Self {
        Self::of(instance)
    }
}
