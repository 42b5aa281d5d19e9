use anyhow::Context;
use gametes_sweep_core::script::JOB_WALLTIME;
use gametes_sweep_core::{run_sweep, RunOptions, SweepReport};
use tracing::info;

use crate::adapters::command_submitter::CommandSubmitter;
use crate::cli::Cli;

/// Resolves options from the command line and runs the whole sweep.
pub fn run(cli: Cli) -> anyhow::Result<SweepReport> {
    let options = cli.into_run_options().context("invalid run options")?;
    run_with_options(&options)
}

pub fn run_with_options(options: &RunOptions) -> anyhow::Result<SweepReport> {
    info!(
        fingerprint = %options.fingerprint(),
        options = %options.stable_json(),
        "run options"
    );
    if options.do_not_submit
        || options.resubmit_jobs_with_errors
        || options.resubmit_jobs_without_output
    {
        info!(
            do_not_submit = options.do_not_submit,
            resubmit_jobs_with_errors = options.resubmit_jobs_with_errors,
            resubmit_jobs_without_output = options.resubmit_jobs_without_output,
            "collate and resubmit flags are accepted but have no effect"
        );
    }
    info!(
        time = %options.walltime,
        email = %options.email,
        walltime = JOB_WALLTIME,
        notify_user = %options.notify_user,
        "time and email flags have no effect, scripts use the fixed walltime and current user"
    );

    let submitter = CommandSubmitter::from_command_line(&options.qsub_cmd)
        .context("invalid submission command")?;
    let report = run_sweep(options, &submitter)?;
    Ok(report)
}
