use std::path::Path;

use crate::config::RunOptions;
use crate::job::JobDescriptor;

/// Walltime requested for every job, whatever `--time` says.
pub const JOB_WALLTIME: &str = "10:00:00";

/// Renders the PBS submission script for one job.
///
/// `stdout_path` and `stderr_path` must already be absolute; the scheduler
/// copies output back relative to the submitting host, not the job's cwd.
pub fn render_submission_script(
    options: &RunOptions,
    job: &JobDescriptor,
    stdout_path: &Path,
    stderr_path: &Path,
) -> String {
    let mut lines = vec!["#!/bin/bash -l".to_string()];

    if !options.queue.is_empty() {
        lines.push(format!("#PBS -q {}", options.queue));
    }

    lines.extend([
        format!("#PBS -N {}", job.job_name),
        format!("#PBS -l walltime={JOB_WALLTIME}"),
        "#PBS -l nodes=1:ppn=1".to_string(),
        "#PBS -l feature=noib".to_string(),
        format!("#PBS -M {}", options.notify_user),
        format!("#PBS -o localhost:{}", stdout_path.display()),
        format!("#PBS -e localhost:{}", stderr_path.display()),
        // group members can read job output
        "#PBS -W umask=022".to_string(),
        "cd $PBS_O_WORKDIR".to_string(),
        job.command.clone(),
    ]);

    let mut script = lines.join("\n");
    script.push('\n');
    script
}
