//! Command dispatch and handlers.

pub mod summary;
pub mod tree;

use std::env;
use std::path::PathBuf;

use crate::cassette::session::RecordingSession;
use crate::cli::{Command, SourceArgs};
use crate::config::ForgeConfig;
use crate::context::ServiceContext;
use crate::reference::RepositoryReference;
use crate::resolver::TreeResolver;
use crate::tree::FilteredFileList;

/// Environment variable naming the directory to record forge cassettes into.
pub const RECORD_ENV: &str = "REPOVIZ_RECORD";

/// Dispatch a parsed command to its handler.
///
/// When `REPOVIZ_RECORD` is set to a directory path, forge interactions are
/// recorded to a cassette in a timestamped directory beneath it.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let args = command.source();
    let reference = RepositoryReference::parse(&args.source).map_err(|e| e.to_string())?;
    let config = ForgeConfig::load(args.config.as_deref()).map_err(|e| e.to_string())?;

    let (ctx, session) = build_context(args, config)?;
    if let Some(session) = &session {
        session.set_target(&reference.to_string());
    }

    let result = resolve(&ctx, &reference).and_then(|list| match command {
        Command::Tree { json, .. } => tree::run(&reference, &list, *json),
        Command::Summary { limit, .. } => summary::run(&reference, &list, *limit),
    });

    // Finish recording after command completes (even on error)
    if let Some(session) = session {
        // Drop context first to release Arc references
        drop(ctx);
        return settle(result, finish_recording(session));
    }

    result
}

/// Combines the command result with the recording result.
///
/// The command's own error wins; a recording failure is reported on stderr
/// and only fails an otherwise successful command.
fn settle(result: Result<(), String>, recording: Result<(), String>) -> Result<(), String> {
    match (result, recording) {
        (Err(command), Err(recording)) => {
            eprintln!("Failed to save recording: {recording}");
            Err(command)
        }
        (Ok(()), Err(recording)) => Err(format!("Failed to save recording: {recording}")),
        (result, Ok(())) => result,
    }
}

/// Picks the replaying, recording or live context.
fn build_context(
    args: &SourceArgs,
    config: ForgeConfig,
) -> Result<(ServiceContext, Option<RecordingSession>), String> {
    if let Some(cassette) = &args.replay {
        return Ok((ServiceContext::replaying(config, cassette)?, None));
    }
    if let Ok(dir) = env::var(RECORD_ENV) {
        let (ctx, session) = ServiceContext::recording_at(config, &PathBuf::from(dir))?;
        return Ok((ctx, Some(session)));
    }
    Ok((ServiceContext::live(config)?, None))
}

/// Runs the resolver to completion on a current-thread runtime.
fn resolve(
    ctx: &ServiceContext,
    reference: &RepositoryReference,
) -> Result<FilteredFileList, String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;

    let resolver = TreeResolver::new(ctx.forge.as_ref(), &ctx.config);
    runtime.block_on(resolver.resolve_reference(reference)).map_err(|e| e.to_string())
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
