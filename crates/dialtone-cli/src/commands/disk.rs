use crate::commands::{print_json, Context};
use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use dialtone_disk::{
    run_smoke, token_from_env, DiskClient, DiskSettings, ResourceStore, DEFAULT_SMOKE_DIR,
};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Subcommand)]
pub enum DiskCommand {
    /// Report whether a resource exists
    Stat(PathArgs),
    /// Create a folder
    Mkdir(PathArgs),
    /// Delete a resource
    Rm(RmArgs),
    /// Create, inspect and delete a scratch folder
    Smoke(SmokeArgs),
}

#[derive(Debug, Args)]
pub struct PathArgs {
    pub path: String,
}

#[derive(Debug, Args)]
pub struct RmArgs {
    pub path: String,
    /// Skip the trash
    #[arg(long)]
    pub permanently: bool,
}

#[derive(Debug, Args)]
pub struct SmokeArgs {
    #[arg(long, default_value = DEFAULT_SMOKE_DIR)]
    pub dir: String,
}

#[derive(Debug, Serialize)]
struct ResourceReport<'a> {
    path: &'a str,
    state: &'static str,
}

fn open_client(ctx: &Context<'_>) -> Result<DiskClient> {
    let disk = &ctx.config.disk;
    let token = token_from_env(&disk.token_env)?;
    debug!(base_url = %disk.base_url, "opening disk client");
    let settings = DiskSettings {
        user_agent: Some(disk.user_agent.clone()),
        timeout: Duration::from_secs(disk.timeout_seconds),
        ..DiskSettings::new(disk.base_url.clone(), token)
    };
    DiskClient::new(settings).with_context(|| "build disk client")
}

fn emit(ctx: &Context<'_>, path: &str, state: &'static str) -> Result<()> {
    if ctx.json {
        return print_json(&ResourceReport { path, state });
    }
    println!("{state}");
    Ok(())
}

pub fn stat(ctx: &Context<'_>, args: PathArgs) -> Result<()> {
    let client = open_client(ctx)?;
    let state = client
        .stat(&args.path)
        .with_context(|| format!("stat {}", args.path))?;
    emit(ctx, &args.path, state.label())
}

pub fn mkdir(ctx: &Context<'_>, args: PathArgs) -> Result<()> {
    let client = open_client(ctx)?;
    client
        .create_folder(&args.path)
        .with_context(|| format!("create folder {}", args.path))?;
    emit(ctx, &args.path, "created")
}

pub fn remove(ctx: &Context<'_>, args: RmArgs) -> Result<()> {
    let client = open_client(ctx)?;
    let outcome = client
        .delete(&args.path, args.permanently)
        .with_context(|| format!("delete {}", args.path))?;
    emit(ctx, &args.path, outcome.label())
}

pub fn smoke(ctx: &Context<'_>, args: SmokeArgs) -> Result<()> {
    let client = open_client(ctx)?;
    let report =
        run_smoke(&client, &args.dir).with_context(|| format!("smoke test on {}", args.dir))?;

    if ctx.json {
        return print_json(&report);
    }

    for step in &report.steps {
        println!("{}: {}", step.step, step.observed);
    }
    println!("smoke test passed for {}", report.path);
    Ok(())
}
