//! Validity filtering ahead of prototype selection.

use protoframe_types::{FrameGroups, FrameInstance};
use tracing::info;

use crate::validator::FrameValidator;

/// Keep the instances `validator` accepts, grouped by frame type.
///
/// The validator sees the lowercased frame type; groups keep the original
/// spelling and the input order.
pub fn filter_instances<I>(instances: I, validator: &dyn FrameValidator) -> FrameGroups
where
    I: IntoIterator<Item = FrameInstance>,
{
    let mut groups = FrameGroups::new();
    let mut seen = 0usize;
    let mut rejected = 0usize;

    for instance in instances {
        seen += 1;
        if validator.is_valid(&instance.frame_type.to_lowercase(), &instance.role_map()) {
            groups.insert(instance);
        } else {
            rejected += 1;
        }
    }

    info!(
        validator = validator.name(),
        instances = seen,
        kept = groups.total_instances(),
        rejected,
        frame_types = groups.len(),
        "filtered frame instances"
    );
    groups
}
