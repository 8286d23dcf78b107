//! Frame elements and frame instances.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single role-filler pair inside a frame instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameElement {
    /// Role name (frame element name), e.g. `Buyer`.
    pub role: String,
    /// Opaque concept identifier, usually a URI-like token.
    pub entity: String,
}

impl FrameElement {
    pub fn new(role: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            entity: entity.into(),
        }
    }

    /// Concept key of the filler (last URI path segment).
    pub fn concept_key(&self) -> &str {
        concept_key(&self.entity)
    }
}

/// One concrete occurrence of a frame with its role fillers.
///
/// Instances are produced upstream and only read here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInstance {
    /// Frame instance identifier, unique within a batch.
    pub id: String,
    /// Frame type name.
    pub frame_type: String,
    /// Ordered role fillers.
    #[serde(default)]
    pub elements: Vec<FrameElement>,
}

impl FrameInstance {
    pub fn new(
        id: impl Into<String>,
        frame_type: impl Into<String>,
        elements: Vec<FrameElement>,
    ) -> Self {
        Self {
            id: id.into(),
            frame_type: frame_type.into(),
            elements,
        }
    }

    /// Whether two instances have the same frame type and the same
    /// ordered elements, regardless of id.
    pub fn same_structure(&self, other: &FrameInstance) -> bool {
        self.frame_type == other.frame_type && self.elements == other.elements
    }

    /// Lowercased role → concept key mapping.
    ///
    /// This is the view handed to validity filters and written to output
    /// records. A role that appears twice keeps its last filler.
    pub fn role_map(&self) -> BTreeMap<String, String> {
        self.elements
            .iter()
            .map(|fe| (fe.role.to_lowercase(), fe.concept_key().to_string()))
            .collect()
    }
}

/// Extract the concept key from an entity token.
///
/// `<http://babelnet.org/rdf/s00046516n>` → `s00046516n`. Tokens without
/// a path separator are returned with surrounding angle brackets removed.
pub fn concept_key(entity: &str) -> &str {
    let trimmed = entity
        .trim()
        .trim_start_matches('<')
        .trim_end_matches('>');
    match trimmed.rsplit_once('/') {
        Some((_, last)) => last,
        None => trimmed,
    }
}
