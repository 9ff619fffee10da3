//! Domain logic - pure tagging rules independent of the container engine

pub mod tag;
pub mod version;

pub use tag::{ImageRepository, SkipReason, Tag, TagPlan};
pub use version::VersionString;
