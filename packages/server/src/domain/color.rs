//! Display color generation.

use super::value_object::DisplayColor;

/// Source of display colors for newly joined connections
///
/// Injected into the join use case so tests can pin the color.
#[cfg_attr(test, mockall::automock)]
pub trait ColorGenerator: Send + Sync {
    fn generate(&self) -> DisplayColor;
}
