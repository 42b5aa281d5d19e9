use std::fmt;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::str::FromStr;

use rand::Rng;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::ConfigError;

/// `--randomSeed` value that asks for a freshly drawn seed.
pub const RANDOM_SEED_SENTINEL: i64 = -1;
pub const RANDOM_SEED_RANGE: RangeInclusive<i64> = 1_000_000..=2_000_000;

const TRUE_TOKENS: [&str; 5] = ["yes", "true", "t", "1", "on"];
const FALSE_TOKENS: [&str; 5] = ["no", "false", "f", "0", "off"];

/// Ordered, non-empty list of values for one sweep dimension.
///
/// Values are visited in the order supplied; nothing is sorted or
/// deduplicated because the order shows up in generated directory names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SweepAxis<T> {
    values: Vec<T>,
}

impl<T> SweepAxis<T> {
    pub fn new(name: &str, values: Vec<T>) -> Result<Self, ConfigError> {
        if values.is_empty() {
            return Err(ConfigError::new(format!(
                "Axis '{name}' must be a non-empty list"
            )));
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetType {
    Heterogeneous,
    Hierarchical,
}

impl DatasetType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heterogeneous => "heterogeneous",
            Self::Hierarchical => "hierarchical",
        }
    }
}

impl fmt::Display for DatasetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetType {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "heterogeneous" => Ok(Self::Heterogeneous),
            "hierarchical" => Ok(Self::Hierarchical),
            other => Err(ConfigError::new(format!(
                "mixedModelDatasetType must be 'heterogeneous' or 'hierarchical', got '{other}'"
            ))),
        }
    }
}

/// Parses the boolean tokens accepted on the command line.
pub fn parse_bool_token(value: &str) -> Result<bool, ConfigError> {
    let token = value.trim().to_lowercase();
    if TRUE_TOKENS.contains(&token.as_str()) {
        Ok(true)
    } else if FALSE_TOKENS.contains(&token.as_str()) {
        Ok(false)
    } else {
        Err(ConfigError::new(format!(
            "Value passed in as a boolean parameter was not recognized. Passed in value: {value}"
        )))
    }
}

pub fn resolve_random_seed(requested: i64) -> i64 {
    resolve_random_seed_with(requested, &mut rand::thread_rng())
}

pub fn resolve_random_seed_with<R: Rng + ?Sized>(requested: i64, rng: &mut R) -> i64 {
    if requested == RANDOM_SEED_SENTINEL {
        rng.gen_range(RANDOM_SEED_RANGE)
    } else {
        requested
    }
}

/// Everything a sweep reads. Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunOptions {
    pub gametes: String,
    pub heritability: SweepAxis<f64>,
    pub mixed_model_dataset_type: DatasetType,
    pub num_models_per_dataset: SweepAxis<u32>,
    pub num_snps_per_model: SweepAxis<u32>,
    pub maf: SweepAxis<f64>,
    pub model_prevalence: Option<f64>,
    pub use_odds_ratio: bool,
    pub total_attribute_count: SweepAxis<u32>,
    pub replicate_count: u32,
    pub dataset_prevalence: SweepAxis<f64>,
    pub total_count: SweepAxis<u32>,
    pub allele_frequency_min: f64,
    pub allele_frequency_max: f64,
    pub continuous: bool,
    pub standard_deviation: SweepAxis<f64>,
    pub range_minimum: f64,
    pub range_maximum: f64,
    pub ras_quantile_count: u32,
    pub ras_population_count: u32,
    pub ras_try_count: u32,
    pub random_seed: i64,
    /// Account named in the scheduler's notification directive.
    pub notify_user: String,
    /// Accepted for compatibility; scripts use a fixed walltime and notify
    /// `notify_user`.
    pub email: String,
    pub walltime: String,
    pub do_not_submit: bool,
    pub resubmit_jobs_with_errors: bool,
    pub resubmit_jobs_without_output: bool,
    pub queue: String,
    pub qsub_cmd: String,
    pub output_root: Option<PathBuf>,
}

impl RunOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gametes.trim().is_empty() {
            return Err(ConfigError::new("gametes jar path cannot be empty"));
        }
        if self.qsub_cmd.trim().is_empty() {
            return Err(ConfigError::new("qsubCmd cannot be empty"));
        }
        if self.random_seed == RANDOM_SEED_SENTINEL {
            return Err(ConfigError::new(
                "randomSeed sentinel must be resolved before the sweep starts",
            ));
        }
        Ok(())
    }

    /// Innermost axis: standard deviations for continuous endpoints,
    /// dataset prevalences otherwise.
    pub fn phenotype_axis(&self) -> &SweepAxis<f64> {
        if self.continuous {
            &self.standard_deviation
        } else {
            &self.dataset_prevalence
        }
    }

    pub fn planned_combinations(&self) -> usize {
        [
            self.num_models_per_dataset.len(),
            self.num_snps_per_model.len(),
            self.heritability.len(),
            self.maf.len(),
            self.total_count.len(),
            self.total_attribute_count.len(),
            self.phenotype_axis().len(),
        ]
        .into_iter()
        .fold(1usize, usize::saturating_mul)
    }

    pub fn stable_json(&self) -> String {
        serde_json::to_string(self).expect("serialization of run options should not fail")
    }

    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.stable_json());
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    /// Small two-by-two sweep used across the crate's unit tests.
    pub(crate) fn sample_options() -> RunOptions {
        RunOptions {
            gametes: "gametes.jar".to_string(),
            heritability: SweepAxis::new("heritability", vec![0.1, 0.2]).unwrap(),
            mixed_model_dataset_type: DatasetType::Heterogeneous,
            num_models_per_dataset: SweepAxis::new("numModelsPerDataset", vec![2]).unwrap(),
            num_snps_per_model: SweepAxis::new("numSnpsPerModel", vec![2]).unwrap(),
            maf: SweepAxis::new("maf", vec![0.2]).unwrap(),
            model_prevalence: None,
            use_odds_ratio: false,
            total_attribute_count: SweepAxis::new("totalAttributeCount", vec![100]).unwrap(),
            replicate_count: 100,
            dataset_prevalence: SweepAxis::new("datasetPrevalence", vec![0.5]).unwrap(),
            total_count: SweepAxis::new("totalCount", vec![2000, 8000]).unwrap(),
            allele_frequency_min: 0.01,
            allele_frequency_max: 0.5,
            continuous: false,
            standard_deviation: SweepAxis::new("standardDeviation", vec![0.1, 0.3, 0.5])
                .unwrap(),
            range_minimum: 0.0,
            range_maximum: 1.0,
            ras_quantile_count: 1,
            ras_population_count: 1000,
            ras_try_count: 50000,
            random_seed: 42,
            notify_user: "researcher".to_string(),
            email: "researcher@example.org".to_string(),
            walltime: "120:00:00".to_string(),
            do_not_submit: false,
            resubmit_jobs_with_errors: false,
            resubmit_jobs_without_output: false,
            queue: String::new(),
            qsub_cmd: "qsub".to_string(),
            output_root: None,
        }
    }

    #[test]
    fn axis_rejects_empty_values() {
        let error = SweepAxis::<f64>::new("maf", Vec::new()).expect_err("empty axis should fail");
        assert_eq!(error.message(), "Axis 'maf' must be a non-empty list");
    }

    #[test]
    fn axis_preserves_supplied_order_and_duplicates() {
        let axis = SweepAxis::new("heritability", vec![0.4, 0.1, 0.4]).unwrap();
        assert_eq!(axis.values(), &[0.4, 0.1, 0.4]);
    }

    #[test]
    fn bool_tokens_accept_enumerated_values_only() {
        for token in ["yes", "TRUE", "t", "1", "On"] {
            assert!(parse_bool_token(token).unwrap(), "{token} should be true");
        }
        for token in ["no", "False", "f", "0", "OFF"] {
            assert!(!parse_bool_token(token).unwrap(), "{token} should be false");
        }

        let error = parse_bool_token("maybe").expect_err("unknown token should fail");
        assert!(error.message().contains("Passed in value: maybe"));
    }

    #[test]
    fn dataset_type_parses_both_choices() {
        assert_eq!(
            "heterogeneous".parse::<DatasetType>().unwrap(),
            DatasetType::Heterogeneous
        );
        assert_eq!(
            "hierarchical".parse::<DatasetType>().unwrap(),
            DatasetType::Hierarchical
        );
        assert!("mixed".parse::<DatasetType>().is_err());
    }

    #[test]
    fn sentinel_seed_is_drawn_from_fixed_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let seed = resolve_random_seed_with(RANDOM_SEED_SENTINEL, &mut rng);
            assert!(RANDOM_SEED_RANGE.contains(&seed));
        }
        assert_eq!(resolve_random_seed_with(42, &mut rng), 42);
        assert_eq!(resolve_random_seed_with(0, &mut rng), 0);
    }

    #[test]
    fn planned_combinations_follow_continuous_branch() {
        let mut options = sample_options();
        assert_eq!(options.planned_combinations(), 2 * 2);

        options.continuous = true;
        assert_eq!(options.planned_combinations(), 2 * 2 * 3);
    }

    #[test]
    fn validate_rejects_unresolved_seed_and_blank_submit_command() {
        let mut options = sample_options();
        options.random_seed = RANDOM_SEED_SENTINEL;
        assert!(options.validate().is_err());

        let mut options = sample_options();
        options.qsub_cmd = "  ".to_string();
        let error = options.validate().expect_err("blank qsubCmd should fail");
        assert_eq!(error.message(), "qsubCmd cannot be empty");
    }

    #[test]
    fn fingerprint_is_stable_and_tracks_changes() {
        let options = sample_options();
        assert_eq!(options.fingerprint(), sample_options().fingerprint());

        let mut changed = sample_options();
        changed.random_seed = 43;
        assert_ne!(options.fingerprint(), changed.fingerprint());
    }
}
