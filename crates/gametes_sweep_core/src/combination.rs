/// Innermost sweep value. Which variant is produced depends on the run's
/// `continuous` setting, so a combination never carries both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhenotypeParameter {
    StandardDeviation(f64),
    Prevalence(f64),
}

impl PhenotypeParameter {
    pub fn value(self) -> f64 {
        match self {
            Self::StandardDeviation(value) | Self::Prevalence(value) => value,
        }
    }

    pub fn is_continuous(self) -> bool {
        matches!(self, Self::StandardDeviation(_))
    }
}

/// One value selected from every sweep axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterCombination {
    pub num_models_per_dataset: u32,
    pub num_snps_per_model: u32,
    pub heritability: f64,
    pub maf: f64,
    pub total_count: u32,
    pub total_attribute_count: u32,
    pub phenotype: PhenotypeParameter,
}
