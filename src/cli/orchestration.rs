//! Main workflow orchestration logic
//!
//! Runs the publish pipeline: resolve version, build, authenticate, tag,
//! push. Every stage returns a `Result` and the first error ends the run.
//! The CLI layer only parses arguments and loads configuration.

use crate::config::{MissingVersionPolicy, PipelineConfig};
use crate::domain::{SkipReason, TagPlan, VersionString};
use crate::engine::Capabilities;
use crate::error::{ImagePublishError, Result};
use crate::ui;
use crate::version::resolve_version;
use crate::warning::PublishWarning;

/// Arguments for the publish workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PublishWorkflowArgs {
    /// Resolve and report the tag plan without invoking the engine
    pub dry_run: bool,
}

/// Result of a successful publish workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The version resolved from the manifest
    pub version: VersionString,

    /// Tags planned for this run, in push order
    pub planned: Vec<String>,

    /// References actually pushed
    pub pushed: Vec<String>,

    /// Warnings raised while planning
    pub warnings: Vec<PublishWarning>,

    pub dry_run: bool,
}

/// Resolves the version and the tag plan, applying the missing-version policy.
///
/// Runs before any engine call, so a `fail` policy aborts ahead of the build.
pub fn plan_publish(
    config: &PipelineConfig,
) -> Result<(VersionString, TagPlan, Vec<PublishWarning>)> {
    let marker = &config.tagging.prerelease_marker;
    let version = resolve_version(&config.manifest, marker)?;
    let mut warnings = Vec::new();

    if version.is_empty() {
        let manifest = config.manifest.path.display().to_string();
        if config.tagging.on_missing_version == MissingVersionPolicy::Fail {
            return Err(ImagePublishError::version_not_found(format!(
                "no version token in the first {} lines of '{}'",
                config.manifest.scan_lines, manifest
            )));
        }
        warnings.push(PublishWarning::VersionNotFound {
            manifest,
            scan_lines: config.manifest.scan_lines,
        });
    } else if version.semver().is_none() {
        warnings.push(PublishWarning::NonSemverVersion {
            version: version.to_string(),
        });
    }

    let plan = TagPlan::new(&config.repository, &version);

    if plan.skipped == Some(SkipReason::PreRelease) {
        warnings.push(PublishWarning::PrereleaseVersionSkipped {
            version: version.to_string(),
            marker: marker.clone(),
        });
    }

    Ok((version, plan, warnings))
}

/// Main publish workflow
///
/// Orchestrates the release:
/// 1. Resolve the version from the manifest
/// 2. Build the local image
/// 3. Log in to the registry
/// 4. Create every planned tag
/// 5. Push every planned tag
///
/// No stage runs after a failing one.
///
/// # Arguments
///
/// * `args` - Workflow arguments (dry_run)
/// * `config` - Resolved pipeline configuration
/// * `engine` - Build, login and publish capabilities
///
/// # Returns
///
/// The resolved version and pushed references, or the first stage error
pub fn run_publish_workflow(
    args: &PublishWorkflowArgs,
    config: &PipelineConfig,
    engine: Capabilities<'_>,
) -> Result<WorkflowResult> {
    ui::display_status(&format!(
        "Resolving version from {}...",
        config.manifest.path.display()
    ));
    let (version, plan, warnings) = plan_publish(config)?;
    ui::display_version(&version);
    for warning in &warnings {
        ui::display_warning(warning);
    }

    let tags = plan.tags();
    let planned: Vec<String> = tags.iter().map(|t| t.to_string()).collect();

    if args.dry_run {
        ui::display_tag_plan(&plan);
        return Ok(WorkflowResult {
            version,
            planned,
            pushed: Vec::new(),
            warnings,
            dry_run: true,
        });
    }

    ui::display_status(&format!("Building {}...", config.build.image_name));
    engine.builder.build(&config.build)?;
    ui::display_success(&format!("Built {}", config.build.image_name));

    ui::display_status(&format!(
        "Logging in to {} as {}...",
        config.registry.server.as_deref().unwrap_or("registry"),
        config.registry.username
    ));
    engine.authenticator.login(&config.registry)?;

    ui::display_status(&format!("Tagging {}...", planned.join(", ")));
    for tag in &tags {
        engine.publisher.tag(&config.build.image_name, tag)?;
    }

    ui::display_status(&format!("Publishing {}...", config.repository));
    let mut pushed = Vec::with_capacity(tags.len());
    for tag in &tags {
        engine.publisher.push(tag)?;
        ui::display_success(&format!("Pushed {}", tag));
        pushed.push(tag.to_string());
    }

    Ok(WorkflowResult {
        version,
        planned,
        pushed,
        warnings,
        dry_run: false,
    })
}
