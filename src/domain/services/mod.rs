mod classifier;
mod placement;

pub use classifier::{ErrorClassifier, Pattern, PatternTable};
pub use placement::{Placement, MAX_JITTER_RADIUS};
