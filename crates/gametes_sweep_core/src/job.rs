use std::path::PathBuf;

use crate::combination::ParameterCombination;
use crate::command::build_command;
use crate::config::RunOptions;
use crate::naming::PathSegments;

/// Everything derived for one combination before touching the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescriptor {
    pub job_name: String,
    pub folder: PathBuf,
    pub script_path: PathBuf,
    pub output_path: PathBuf,
    pub error_path: PathBuf,
    /// Prefix GAMETES writes its model and dataset files under.
    pub dataset_output: PathBuf,
    pub command: String,
}

impl JobDescriptor {
    pub fn derive(
        options: &RunOptions,
        segments: &PathSegments,
        combination: &ParameterCombination,
    ) -> Self {
        let folder = segments.folder_path(options.output_root.as_deref());
        let job_name = segments.job_name(options.random_seed);
        let dataset_output = folder.join(&job_name);
        let command = build_command(options, combination, &dataset_output);

        Self {
            script_path: folder.join(format!("{job_name}.pbs")),
            output_path: folder.join(format!("{job_name}.o")),
            error_path: folder.join(format!("{job_name}.e")),
            dataset_output,
            command,
            folder,
            job_name,
        }
    }
}
