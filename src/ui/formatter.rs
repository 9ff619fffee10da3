//! Formatting functions for console output.
//!
//! The console is the only progress channel of a run: stage announcements
//! and results go to stdout, warnings and errors to stderr.

use crate::cli::orchestration::WorkflowResult;
use crate::domain::{SkipReason, TagPlan, VersionString};
use crate::warning::PublishWarning;
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print a non-fatal warning.
pub fn display_warning(warning: &PublishWarning) {
    eprintln!("{} {}", style("⚠ Warning:").yellow().bold(), warning);
}

/// Print the resolved version.
pub fn display_version(version: &VersionString) {
    if version.is_empty() {
        println!("Version: {}", style("<none>").dim());
    } else {
        println!("Version: {}", style(version).bold());
    }
}

fn skip_note(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::PreRelease => "pre-release",
        SkipReason::MissingVersion => "no version",
    }
}

/// Display the tags a run will create and push.
pub fn display_tag_plan(plan: &TagPlan) {
    println!("\n{}", style("Tag plan:").bold());
    for tag in plan.tags() {
        println!("  {}", style(tag).green());
    }
    if let Some(reason) = plan.skipped {
        println!(
            "  {}",
            style(format!("(versioned tag skipped: {})", skip_note(reason))).dim()
        );
    }
}

/// Display the final summary of a run.
pub fn display_publish_summary(result: &WorkflowResult) {
    if result.dry_run {
        println!(
            "\n{} Dry run: nothing was built or pushed",
            style("✓").green()
        );
        return;
    }

    println!(
        "\n{} Published {} reference(s):",
        style("✓").green(),
        result.pushed.len()
    );
    for reference in &result.pushed {
        println!("  - {}", reference);
    }
}
