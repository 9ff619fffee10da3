//! Console output for the publish pipeline.

pub mod formatter;

pub use formatter::{
    display_error, display_publish_summary, display_status, display_success, display_tag_plan,
    display_version, display_warning,
};
