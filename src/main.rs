use anyhow::{Context, Result};
use clap::Parser;

use image_publish::cli::{run_publish_workflow, PublishWorkflowArgs};
use image_publish::config::{self, PipelineConfig};
use image_publish::engine::{Capabilities, DockerEngine};
use image_publish::{ui, ImagePublishError};

#[derive(clap::Parser)]
#[command(
    name = "image-publish",
    version,
    about = "Build, tag and publish a container image versioned from the project manifest"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Resolve the version and show the tag plan without building or pushing")]
    dry_run: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(err) = run(args) {
        ui::display_error(&format!("{:#}", err));
        let code = err
            .downcast_ref::<ImagePublishError>()
            .map(ImagePublishError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;
    let pipeline = PipelineConfig::resolve(config)?;

    let engine = DockerEngine::new(pipeline.engine.program.clone());
    let workflow_args = PublishWorkflowArgs {
        dry_run: args.dry_run,
    };

    let result = run_publish_workflow(
        &workflow_args,
        &pipeline,
        Capabilities::from_engine(&engine),
    )?;

    ui::display_publish_summary(&result);
    Ok(())
}
