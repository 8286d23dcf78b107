//! Selected prototypes in the shape downstream consumers read.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::frame::FrameInstance;

/// A selected prototype: frame type plus lowercased role → concept key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrototypeRecord {
    #[serde(rename = "type")]
    pub frame_type: String,
    pub elements: BTreeMap<String, String>,
}

impl From<&FrameInstance> for PrototypeRecord {
    fn from(instance: &FrameInstance) -> Self {
        Self {
            frame_type: instance.frame_type.clone(),
            elements: instance.role_map(),
        }
    }
}

/// Prototypes keyed by the representative frame id.
///
/// Every selection strategy produces this same shape.
pub type Prototypes = BTreeMap<String, PrototypeRecord>;
