use std::path::PathBuf;
use std::str::FromStr;

use clap::{ArgAction, Parser};
use gametes_sweep_core::config::{parse_bool_token, resolve_random_seed};
use gametes_sweep_core::{ConfigError, DatasetType, RunOptions, SweepAxis};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Debug, Clone, Parser)]
#[command(
    name = "gametes_sweep",
    about = "Generate and submit a sweep of GAMETES model and dataset jobs",
    long_about = "Expands every combination of the listed parameters, writes one PBS\n\
                  submission script per combination into a directory tree named after\n\
                  the parameters, and submits it. Combinations whose script already\n\
                  exists are skipped, so an interrupted sweep can simply be re-run."
)]
pub struct Cli {
    /// File path to the GAMETES jar file
    #[arg(long, default_value = "gametes.jar")]
    pub gametes: String,

    /// Heritabilities to sweep
    #[arg(long, num_args = 1.., value_delimiter = ',',
          default_values_t = [0.001, 0.01, 0.025, 0.05, 0.1, 0.2, 0.3, 0.4])]
    pub heritability: Vec<f64>,

    /// How the models of one dataset are combined
    #[arg(long = "mixedModelDatasetType", value_parser = DatasetType::from_str,
          default_value = "heterogeneous")]
    pub mixed_model_dataset_type: DatasetType,

    /// Numbers of models per dataset to sweep
    #[arg(long = "numModelsPerDataset", num_args = 1.., value_delimiter = ',',
          default_values_t = [1u32, 2, 3, 4])]
    pub num_models_per_dataset: Vec<u32>,

    /// Numbers of SNPs per model to sweep
    #[arg(long = "numSnpsPerModel", num_args = 1.., value_delimiter = ',',
          default_values_t = [2u32])]
    pub num_snps_per_model: Vec<u32>,

    /// Minor allele frequencies for all model alleles
    #[arg(long, num_args = 1.., value_delimiter = ',', default_values_t = [0.2, 0.4])]
    pub maf: Vec<f64>,

    /// Fixed prevalence for every generated model
    #[arg(long = "modelPrevalence")]
    pub model_prevalence: Option<f64>,

    /// Rank models by the COR difficulty estimate instead of EDM
    #[arg(long = "useOddsRatio", action = ArgAction::Set, value_parser = parse_bool_token,
          num_args = 0..=1, default_value = "false", default_missing_value = "true",
          value_name = "BOOL")]
    pub use_odds_ratio: bool,

    /// Total numbers of attributes to sweep
    #[arg(long = "totalAttributeCount", num_args = 1.., value_delimiter = ',',
          default_values_t = [100u32, 1000])]
    pub total_attribute_count: Vec<u32>,

    /// Replicate datasets generated from each model set
    #[arg(long = "replicateCount", default_value_t = 100)]
    pub replicate_count: u32,

    /// Case/control ratios to sweep (discrete endpoints)
    #[arg(long = "datasetPrevalence", num_args = 1.., value_delimiter = ',',
          default_values_t = [0.5])]
    pub dataset_prevalence: Vec<f64>,

    /// Samples per dataset to sweep
    #[arg(long = "totalCount", num_args = 1.., value_delimiter = ',',
          default_values_t = [2000u32, 8000])]
    pub total_count: Vec<u32>,

    /// Minimum minor allele frequency of background attributes
    #[arg(long = "alleleFrequencyMin", default_value_t = 0.01)]
    pub allele_frequency_min: f64,

    /// Maximum minor allele frequency of background attributes
    #[arg(long = "alleleFrequencyMax", default_value_t = 0.5)]
    pub allele_frequency_max: f64,

    /// Generate continuous endpoints instead of case/control
    #[arg(long, action = ArgAction::Set, value_parser = parse_bool_token,
          num_args = 0..=1, default_value = "false", default_missing_value = "true",
          value_name = "BOOL")]
    pub continuous: bool,

    /// Standard deviations to sweep (continuous endpoints)
    #[arg(long = "standardDeviation", num_args = 1.., value_delimiter = ',',
          default_values_t = [0.1, 0.3, 0.5])]
    pub standard_deviation: Vec<f64>,

    /// Lower bound penetrance values are mapped to
    #[arg(long = "rangeMinimum", default_value_t = 0.0)]
    pub range_minimum: f64,

    /// Upper bound penetrance values are mapped to
    #[arg(long = "rangeMaximum", default_value_t = 1.0)]
    pub range_maximum: f64,

    /// Difficulty quantiles saved to the model file
    #[arg(long = "rasQuantileCount", default_value_t = 1)]
    pub ras_quantile_count: u32,

    /// Candidate models generated before quantile selection
    #[arg(long = "rasPopulationCount", default_value_t = 1000)]
    pub ras_population_count: u32,

    /// Attempts to generate a model satisfying the constraints
    #[arg(long = "rasTryCount", default_value_t = 50000)]
    pub ras_try_count: u32,

    /// Random seed for the runs; -1 draws one
    #[arg(long = "randomSeed", default_value_t = 0, allow_negative_numbers = true)]
    pub random_seed: i64,

    /// Accepted but unused; scripts notify the current user [default: current user]
    #[arg(long)]
    pub email: Option<String>,

    /// Accepted but unused; scripts request a 10:00:00 walltime
    #[arg(long, default_value = "120:00:00")]
    pub time: String,

    /// Only collate results
    #[arg(long = "doNotSubmit", action = ArgAction::Set, value_parser = parse_bool_token,
          num_args = 0..=1, default_value = "false", default_missing_value = "true",
          value_name = "BOOL")]
    pub do_not_submit: bool,

    /// Resubmit jobs whose error file has content
    #[arg(long = "resubmitJobsWithErrors", action = ArgAction::Set,
          value_parser = parse_bool_token, num_args = 0..=1, default_value = "false",
          default_missing_value = "true", value_name = "BOOL")]
    pub resubmit_jobs_with_errors: bool,

    /// Resubmit jobs without an output file
    #[arg(long = "resubmitJobsWithoutOutput", action = ArgAction::Set,
          value_parser = parse_bool_token, num_args = 0..=1, default_value = "false",
          default_missing_value = "true", value_name = "BOOL")]
    pub resubmit_jobs_without_output: bool,

    /// Queue to submit jobs to
    #[arg(long, env = "GAMETES_SWEEP_QUEUE", default_value = "")]
    pub queue: String,

    /// Command that submits a script; "bash" runs jobs on this machine
    #[arg(long = "qsubCmd", env = "GAMETES_SWEEP_QSUB_CMD", default_value = "qsub")]
    pub qsub_cmd: String,

    /// Directory the sweep tree is created under [default: working directory]
    #[arg(long = "outputRoot")]
    pub output_root: Option<PathBuf>,
}

impl Cli {
    /// Validates the parsed arguments and resolves the seed sentinel.
    pub fn into_run_options(self) -> Result<RunOptions, ConfigError> {
        Ok(RunOptions {
            gametes: self.gametes,
            heritability: SweepAxis::new("heritability", self.heritability)?,
            mixed_model_dataset_type: self.mixed_model_dataset_type,
            num_models_per_dataset: SweepAxis::new(
                "numModelsPerDataset",
                self.num_models_per_dataset,
            )?,
            num_snps_per_model: SweepAxis::new("numSnpsPerModel", self.num_snps_per_model)?,
            maf: SweepAxis::new("maf", self.maf)?,
            model_prevalence: self.model_prevalence,
            use_odds_ratio: self.use_odds_ratio,
            total_attribute_count: SweepAxis::new(
                "totalAttributeCount",
                self.total_attribute_count,
            )?,
            replicate_count: self.replicate_count,
            dataset_prevalence: SweepAxis::new("datasetPrevalence", self.dataset_prevalence)?,
            total_count: SweepAxis::new("totalCount", self.total_count)?,
            allele_frequency_min: self.allele_frequency_min,
            allele_frequency_max: self.allele_frequency_max,
            continuous: self.continuous,
            standard_deviation: SweepAxis::new("standardDeviation", self.standard_deviation)?,
            range_minimum: self.range_minimum,
            range_maximum: self.range_maximum,
            ras_quantile_count: self.ras_quantile_count,
            ras_population_count: self.ras_population_count,
            ras_try_count: self.ras_try_count,
            random_seed: resolve_random_seed(self.random_seed),
            notify_user: whoami::username(),
            email: self.email.unwrap_or_else(whoami::username),
            walltime: self.time,
            do_not_submit: self.do_not_submit,
            resubmit_jobs_with_errors: self.resubmit_jobs_with_errors,
            resubmit_jobs_without_output: self.resubmit_jobs_without_output,
            queue: self.queue,
            qsub_cmd: self.qsub_cmd,
            output_root: self.output_root,
        })
    }
}
