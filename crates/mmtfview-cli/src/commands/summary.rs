use super::decode;
use crate::cli::SummaryArgs;
use crate::config;
use crate::error::{CliError, Result};
use crate::utils::progress::FileProgress;
use mmtfview::engine::DecodeOptions;
use mmtfview::workflows::{self, StructureSummary};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Decodes and summarizes one file. Each call owns its structure, so files can
/// be processed on independent workers.
pub(crate) fn summarize_file(path: &Path, options: &DecodeOptions) -> Result<StructureSummary> {
    let structure = decode(path, options)?;
    Ok(workflows::summarize(&structure)?)
}

pub(crate) fn format_line(path: &Path, outcome: &Result<StructureSummary>) -> String {
    match outcome {
        Ok(summary) => format!("{}\t{summary}", path.display()),
        Err(e) => format!("{}\terror: {e}", path.display()),
    }
}

pub fn run(args: SummaryArgs) -> Result<()> {
    let options = config::resolve_options(&args.decode)?;
    let progress = FileProgress::new(args.inputs.len());
    info!(
        files = args.inputs.len(),
        threads = rayon::current_num_threads(),
        "Summarizing files."
    );

    let outcomes: Vec<(PathBuf, Result<StructureSummary>)> = args
        .inputs
        .par_iter()
        .map(|path| {
            let outcome = summarize_file(path, &options);
            progress.file_done();
            (path.clone(), outcome)
        })
        .collect();
    progress.finish();

    let mut failures = 0;
    for (path, outcome) in &outcomes {
        if let Err(e) = outcome {
            warn!("Failed to summarize {:?}: {}", path, e);
            failures += 1;
        }
        println!("{}", format_line(path, outcome));
    }

    if failures > 0 {
        return Err(CliError::Other(anyhow::anyhow!(
            "{failures} of {} file(s) could not be summarized",
            outcomes.len()
        )));
    }
    Ok(())
}
