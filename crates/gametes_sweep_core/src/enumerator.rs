//! Cross-product expansion of the configured sweep axes.
//!
//! Axes nest in a fixed order, outermost first: model shape
//! (`numModelsPerDataset` x `numSnpsPerModel`), heritability, minor allele
//! frequency, population size, attribute count, then the phenotype parameter.
//! The same order names the directory levels on disk.

use serde::Serialize;
use tracing::info;

use crate::combination::{ParameterCombination, PhenotypeParameter};
use crate::config::RunOptions;
use crate::error::SweepError;
use crate::materializer::{JobOutcome, Materializer};
use crate::naming::{self, PathSegments};
use crate::submission::JobSubmitter;

/// One leaf of the sweep: the nesting path and the values selected on it.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepLeaf {
    pub segments: PathSegments,
    pub combination: ParameterCombination,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub planned: usize,
    pub submitted: usize,
    pub skipped: usize,
}

/// Values chosen on the levels above the one being expanded.
#[derive(Debug, Clone, Copy, Default)]
struct PartialCombination {
    num_models_per_dataset: u32,
    num_snps_per_model: u32,
    heritability: f64,
    maf: f64,
    total_count: u32,
    total_attribute_count: u32,
}

impl PartialCombination {
    fn complete(self, phenotype: PhenotypeParameter) -> ParameterCombination {
        ParameterCombination {
            num_models_per_dataset: self.num_models_per_dataset,
            num_snps_per_model: self.num_snps_per_model,
            heritability: self.heritability,
            maf: self.maf,
            total_count: self.total_count,
            total_attribute_count: self.total_attribute_count,
            phenotype,
        }
    }
}

pub struct SweepPlan<'a> {
    options: &'a RunOptions,
}

impl<'a> SweepPlan<'a> {
    pub fn new(options: &'a RunOptions) -> Self {
        Self { options }
    }

    pub fn planned_combinations(&self) -> usize {
        self.options.planned_combinations()
    }

    /// Lazily yields every combination in nesting order.
    pub fn leaves(&self) -> impl Iterator<Item = SweepLeaf> + 'a {
        let options = self.options;
        options
            .num_models_per_dataset
            .iter()
            .flat_map(move |&num_models_per_dataset| {
                options
                    .num_snps_per_model
                    .iter()
                    .flat_map(move |&num_snps_per_model| {
                        let segments = PathSegments::root().descend(naming::model_shape_segment(
                            num_models_per_dataset,
                            num_snps_per_model,
                            options.mixed_model_dataset_type,
                        ));
                        let partial = PartialCombination {
                            num_models_per_dataset,
                            num_snps_per_model,
                            ..PartialCombination::default()
                        };
                        expand_heritability(options, segments, partial)
                    })
            })
    }
}

fn expand_heritability(
    options: &RunOptions,
    parent: PathSegments,
    partial: PartialCombination,
) -> impl Iterator<Item = SweepLeaf> + '_ {
    options.heritability.iter().flat_map(move |&heritability| {
        let segments = parent.descend(naming::heritability_segment(heritability));
        expand_maf(
            options,
            segments,
            PartialCombination {
                heritability,
                ..partial
            },
        )
    })
}

fn expand_maf(
    options: &RunOptions,
    parent: PathSegments,
    partial: PartialCombination,
) -> impl Iterator<Item = SweepLeaf> + '_ {
    options.maf.iter().flat_map(move |&maf| {
        let segments = parent.descend(naming::maf_segment(maf));
        expand_population(options, segments, PartialCombination { maf, ..partial })
    })
}

fn expand_population(
    options: &RunOptions,
    parent: PathSegments,
    partial: PartialCombination,
) -> impl Iterator<Item = SweepLeaf> + '_ {
    options.total_count.iter().flat_map(move |&total_count| {
        let segments = parent.descend(naming::population_segment(total_count));
        expand_attributes(
            options,
            segments,
            PartialCombination {
                total_count,
                ..partial
            },
        )
    })
}

fn expand_attributes(
    options: &RunOptions,
    parent: PathSegments,
    partial: PartialCombination,
) -> impl Iterator<Item = SweepLeaf> + '_ {
    options
        .total_attribute_count
        .iter()
        .flat_map(move |&total_attribute_count| {
            let segments = parent.descend(naming::attributes_segment(total_attribute_count));
            expand_phenotype(
                options,
                segments,
                PartialCombination {
                    total_attribute_count,
                    ..partial
                },
            )
        })
}

fn expand_phenotype(
    options: &RunOptions,
    parent: PathSegments,
    partial: PartialCombination,
) -> impl Iterator<Item = SweepLeaf> + '_ {
    let continuous = options.continuous;
    options.phenotype_axis().iter().map(move |&value| {
        let phenotype = if continuous {
            PhenotypeParameter::StandardDeviation(value)
        } else {
            PhenotypeParameter::Prevalence(value)
        };
        SweepLeaf {
            segments: parent.descend(naming::phenotype_segment(phenotype)),
            combination: partial.complete(phenotype),
        }
    })
}

/// Materializes every combination in order.
///
/// The first materialization error stops the sweep; jobs already written and
/// submitted stay in place, and a re-run skips them.
pub fn run_sweep(
    options: &RunOptions,
    submitter: &dyn JobSubmitter,
) -> Result<SweepReport, SweepError> {
    options.validate()?;

    let plan = SweepPlan::new(options);
    let planned = plan.planned_combinations();
    info!(planned, "generating GAMETES models and datasets");

    let mut materializer = Materializer::new(options, submitter);
    let mut skipped = 0usize;
    for leaf in plan.leaves() {
        match materializer.materialize(&leaf.segments, &leaf.combination) {
            Ok(JobOutcome::Submitted { .. }) => {}
            Ok(JobOutcome::Skipped { .. }) => skipped += 1,
            Err(source) => {
                return Err(SweepError::Aborted {
                    active_path: leaf.segments,
                    source,
                });
            }
        }
    }

    let report = SweepReport {
        planned,
        submitted: materializer.submitted(),
        skipped,
    };
    info!(skipped = report.skipped, "{} jobs submitted.", report.submitted);
    Ok(report)
}
