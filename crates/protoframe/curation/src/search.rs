//! Per-frame-type prototype search.

use protoframe_cluster::PrototypeSelector;
use protoframe_types::{FrameGroups, Prototypes};
use tracing::{debug, info};

use crate::error::{CurationError, CurationResult};

/// Runs a selector over every large enough frame-type group.
pub struct PrototypeSearch {
    selector: Box<dyn PrototypeSelector>,
    min_group_size: usize,
}

impl PrototypeSearch {
    pub fn new(selector: Box<dyn PrototypeSelector>, min_group_size: usize) -> Self {
        Self {
            selector,
            min_group_size,
        }
    }

    pub fn selector(&self) -> &dyn PrototypeSelector {
        self.selector.as_ref()
    }

    /// Select prototypes for each frame type, in sorted frame-type order.
    ///
    /// Groups with fewer than `min_group_size` instances are skipped.
    pub fn run(&self, groups: &FrameGroups) -> CurationResult<Prototypes> {
        let mut prototypes = Prototypes::new();
        let mut searched = 0usize;

        for (frame_type, group) in groups.iter() {
            if group.len() < self.min_group_size {
                debug!(frame_type, instances = group.len(), min = self.min_group_size, "group too small, skipped");
                continue;
            }
            info!(frame_type, instances = group.len(), strategy = self.selector.name(), "selecting prototypes");

            let selected = self
                .selector
                .select(group)
                .map_err(|source| CurationError::Selection {
                    frame_type: frame_type.to_string(),
                    source,
                })?;
            searched += 1;
            prototypes.extend(selected);
        }

        info!(
            frame_types = groups.len(),
            searched,
            prototypes = prototypes.len(),
            "prototype search finished"
        );
        Ok(prototypes)
    }
}
