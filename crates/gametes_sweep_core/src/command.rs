//! GAMETES invocation text embedded in each submission script.
//!
//! Flag order is fixed so regenerated scripts diff cleanly across runs.

use std::path::Path;

use crate::combination::{ParameterCombination, PhenotypeParameter};
use crate::config::RunOptions;
use crate::naming::format_float;

/// One `--model "..."` clause. Repeated once per model in the dataset.
pub fn model_clause(options: &RunOptions, combination: &ParameterCombination) -> String {
    let mut clause = format!("--heritability {}", format_float(combination.heritability));

    // zero means unset, GAMETES picks the prevalence itself
    if let Some(prevalence) = options.model_prevalence.filter(|prevalence| *prevalence != 0.0) {
        clause.push_str(&format!(" -p {}", format_float(prevalence)));
    }

    let maf = format_float(combination.maf);
    for _ in 0..combination.num_snps_per_model {
        clause.push_str(" -a ");
        clause.push_str(&maf);
    }

    if options.use_odds_ratio {
        clause.push_str(" --useOddsRatio");
    }

    format!("--model \"{clause}\"")
}

pub fn dataset_clause(
    options: &RunOptions,
    combination: &ParameterCombination,
    dataset_output: &Path,
) -> String {
    let mut clause = format!(
        "--datasetOutputFile {} --mixedModelDatasetType {} --alleleFrequencyMin {} --alleleFrequencyMax {} --totalCount {} --totalAttributeCount {} --replicateCount {}",
        dataset_output.display(),
        options.mixed_model_dataset_type,
        format_float(options.allele_frequency_min),
        format_float(options.allele_frequency_max),
        combination.total_count,
        combination.total_attribute_count,
        options.replicate_count,
    );

    match combination.phenotype {
        PhenotypeParameter::StandardDeviation(standard_deviation) => {
            clause.push_str(&format!(
                " --continuous --standardDeviation {} --rangeMinimum {} --rangeMaximum {}",
                format_float(standard_deviation),
                format_float(options.range_minimum),
                format_float(options.range_maximum),
            ));
        }
        PhenotypeParameter::Prevalence(prevalence) => {
            clause.push_str(&format!(" --prevalence {}", format_float(prevalence)));
        }
    }

    format!("--dataset \"{clause}\"")
}

pub fn build_command(
    options: &RunOptions,
    combination: &ParameterCombination,
    dataset_output: &Path,
) -> String {
    let mut command = format!("java -jar {}", options.gametes);

    let model = model_clause(options, combination);
    for _ in 0..combination.num_models_per_dataset {
        command.push(' ');
        command.push_str(&model);
    }

    command.push(' ');
    command.push_str(&dataset_clause(options, combination, dataset_output));

    command.push_str(&format!(
        " --rasQuantileCount {} --rasPopulationCount {} --rasTryCount {} --randomSeed {}",
        options.ras_quantile_count,
        options.ras_population_count,
        options.ras_try_count,
        options.random_seed,
    ));

    command
}

#[cfg(test)]
mod tests {
    use crate::config::tests::sample_options;

    use super::*;

    fn combination(phenotype: PhenotypeParameter) -> ParameterCombination {
        ParameterCombination {
            num_models_per_dataset: 2,
            num_snps_per_model: 2,
            heritability: 0.1,
            maf: 0.2,
            total_count: 2000,
            total_attribute_count: 100,
            phenotype,
        }
    }

    #[test]
    fn renders_discrete_command_in_fixed_order() {
        let options = sample_options();
        let command = build_command(
            &options,
            &combination(PhenotypeParameter::Prevalence(0.5)),
            Path::new("out/job"),
        );

        assert_eq!(
            command,
            "java -jar gametes.jar \
             --model \"--heritability 0.1 -a 0.2 -a 0.2\" \
             --model \"--heritability 0.1 -a 0.2 -a 0.2\" \
             --dataset \"--datasetOutputFile out/job --mixedModelDatasetType heterogeneous \
             --alleleFrequencyMin 0.01 --alleleFrequencyMax 0.5 --totalCount 2000 \
             --totalAttributeCount 100 --replicateCount 100 --prevalence 0.5\" \
             --rasQuantileCount 1 --rasPopulationCount 1000 --rasTryCount 50000 --randomSeed 42"
        );
        assert_eq!(command.matches("--model ").count(), 2);
        assert_eq!(command.matches("--dataset ").count(), 1);
        assert!(!command.contains("--standardDeviation"));
    }

    #[test]
    fn continuous_dataset_clause_excludes_prevalence() {
        let options = sample_options();
        let clause = dataset_clause(
            &options,
            &combination(PhenotypeParameter::StandardDeviation(0.3)),
            Path::new("out/job"),
        );

        assert!(clause.ends_with(
            "--continuous --standardDeviation 0.3 --rangeMinimum 0.0 --rangeMaximum 1.0\""
        ));
        assert!(!clause.contains("--prevalence"));
    }

    #[test]
    fn model_clause_carries_optional_flags() {
        let mut options = sample_options();
        options.model_prevalence = Some(0.3);
        options.use_odds_ratio = true;
        let mut combo = combination(PhenotypeParameter::Prevalence(0.5));
        combo.num_snps_per_model = 3;

        assert_eq!(
            model_clause(&options, &combo),
            "--model \"--heritability 0.1 -p 0.3 -a 0.2 -a 0.2 -a 0.2 --useOddsRatio\""
        );
    }

    #[test]
    fn zero_model_prevalence_is_left_out() {
        let mut options = sample_options();
        options.model_prevalence = Some(0.0);

        assert_eq!(
            model_clause(&options, &combination(PhenotypeParameter::Prevalence(0.5))),
            "--model \"--heritability 0.1 -a 0.2 -a 0.2\""
        );
    }
}
