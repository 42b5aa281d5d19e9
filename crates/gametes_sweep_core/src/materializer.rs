use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::combination::ParameterCombination;
use crate::config::RunOptions;
use crate::error::MaterializeError;
use crate::job::JobDescriptor;
use crate::naming::PathSegments;
use crate::script::render_submission_script;
use crate::submission::JobSubmitter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// Script written and handed to the submitter; `job_number` counts from 1.
    Submitted { job_number: usize },
    /// A script from an earlier run already exists.
    Skipped { output_exists: bool },
}

/// Writes and submits one job per combination, skipping combinations whose
/// submission script is already on disk.
///
/// The existence check and the write are not atomic, so two concurrent runs
/// over the same output tree can both submit a combination.
pub struct Materializer<'a> {
    options: &'a RunOptions,
    submitter: &'a dyn JobSubmitter,
    submitted: usize,
}

impl<'a> Materializer<'a> {
    pub fn new(options: &'a RunOptions, submitter: &'a dyn JobSubmitter) -> Self {
        Self {
            options,
            submitter,
            submitted: 0,
        }
    }

    pub fn submitted(&self) -> usize {
        self.submitted
    }

    pub fn materialize(
        &mut self,
        segments: &PathSegments,
        combination: &ParameterCombination,
    ) -> Result<JobOutcome, MaterializeError> {
        let job = JobDescriptor::derive(self.options, segments, combination);
        ensure_folder(&job.folder)?;

        if job.script_path.is_file() {
            let output_exists = job.output_path.is_file();
            info!(
                script = %job.script_path.display(),
                output_exists,
                "skipping job, submission script already exists"
            );
            return Ok(JobOutcome::Skipped { output_exists });
        }

        let stdout_path = absolute(&job.output_path)?;
        let stderr_path = absolute(&job.error_path)?;
        let script = render_submission_script(self.options, &job, &stdout_path, &stderr_path);
        fs::write(&job.script_path, script).map_err(|source| MaterializeError::WriteScript {
            path: job.script_path.clone(),
            source,
        })?;

        self.submitted += 1;
        info!(
            job_number = self.submitted,
            job_name = %job.job_name,
            "submitting job"
        );
        info!(command = %job.command, "job command");

        if let Err(error) = self.submitter.submit(&job.script_path) {
            warn!(
                script = %job.script_path.display(),
                %error,
                "submission command failed"
            );
        }

        Ok(JobOutcome::Submitted {
            job_number: self.submitted,
        })
    }
}

fn ensure_folder(folder: &Path) -> Result<(), MaterializeError> {
    fs::create_dir_all(folder).map_err(|source| MaterializeError::CreateDir {
        path: folder.to_path_buf(),
        source,
    })
}

fn absolute(path: &Path) -> Result<PathBuf, MaterializeError> {
    std::path::absolute(path).map_err(|source| MaterializeError::ResolvePath {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use crate::combination::PhenotypeParameter;
    use crate::config::tests::sample_options;

    use super::*;

    fn combination() -> ParameterCombination {
        ParameterCombination {
            num_models_per_dataset: 1,
            num_snps_per_model: 2,
            heritability: 0.1,
            maf: 0.2,
            total_count: 2000,
            total_attribute_count: 100,
            phenotype: PhenotypeParameter::Prevalence(0.5),
        }
    }

    fn segments() -> PathSegments {
        PathSegments::root()
            .descend("1x2-way_heterogeneous")
            .descend("her-0.1")
    }

    #[test]
    fn writes_script_and_submits_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut options = sample_options();
        options.output_root = Some(dir.path().to_path_buf());
        let submitted = RefCell::new(Vec::new());
        let submitter = |path: &Path| -> Result<(), String> {
            submitted.borrow_mut().push(path.to_path_buf());
            Ok(())
        };

        let mut materializer = Materializer::new(&options, &submitter);
        let outcome = materializer.materialize(&segments(), &combination()).unwrap();

        assert_eq!(outcome, JobOutcome::Submitted { job_number: 1 });
        assert_eq!(materializer.submitted(), 1);
        let script_path = dir
            .path()
            .join("1x2-way_heterogeneous/her-0.1/1x2-way_heterogeneous_her-0.1_seed-42.pbs");
        assert!(script_path.is_file());
        assert_eq!(submitted.borrow().as_slice(), &[script_path.clone()]);

        let script = fs::read_to_string(&script_path).unwrap();
        assert!(script.starts_with("#!/bin/bash -l\n"));
        assert!(script.contains(&format!(
            "#PBS -o localhost:{}",
            script_path.with_extension("o").display()
        )));
    }

    #[test]
    fn skips_existing_script_without_submitting() {
        let dir = tempfile::tempdir().unwrap();
        let mut options = sample_options();
        options.output_root = Some(dir.path().to_path_buf());
        let folder = segments().folder_path(Some(dir.path()));
        fs::create_dir_all(&folder).unwrap();
        let script_path = folder.join("1x2-way_heterogeneous_her-0.1_seed-42.pbs");
        fs::write(&script_path, "previous run").unwrap();
        fs::write(folder.join("1x2-way_heterogeneous_her-0.1_seed-42.o"), "done").unwrap();

        let calls = RefCell::new(0usize);
        let submitter = |_: &Path| -> Result<(), String> {
            *calls.borrow_mut() += 1;
            Ok(())
        };
        let mut materializer = Materializer::new(&options, &submitter);
        let outcome = materializer.materialize(&segments(), &combination()).unwrap();

        assert_eq!(
            outcome,
            JobOutcome::Skipped {
                output_exists: true
            }
        );
        assert_eq!(materializer.submitted(), 0);
        assert_eq!(*calls.borrow(), 0);
        assert_eq!(fs::read_to_string(&script_path).unwrap(), "previous run");
    }

    #[test]
    fn submission_failure_does_not_abort() {
        let dir = tempfile::tempdir().unwrap();
        let mut options = sample_options();
        options.output_root = Some(dir.path().to_path_buf());
        let submitter =
            |_: &Path| -> Result<(), String> { Err("qsub: command not found".to_string()) };

        let mut materializer = Materializer::new(&options, &submitter);
        let outcome = materializer.materialize(&segments(), &combination()).unwrap();

        assert_eq!(outcome, JobOutcome::Submitted { job_number: 1 });
    }

    #[test]
    fn directory_failure_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("1x2-way_heterogeneous");
        fs::write(&blocker, "not a directory").unwrap();
        let mut options = sample_options();
        options.output_root = Some(dir.path().to_path_buf());
        let submitter = |_: &Path| -> Result<(), String> { Ok(()) };

        let mut materializer = Materializer::new(&options, &submitter);
        let error = materializer
            .materialize(&segments(), &combination())
            .expect_err("file in place of directory should fail");

        assert!(matches!(error, MaterializeError::CreateDir { .. }));
        assert_eq!(materializer.submitted(), 0);
    }
}
