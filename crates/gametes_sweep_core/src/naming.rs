use std::fmt;
use std::path::{Path, PathBuf};

use crate::combination::PhenotypeParameter;
use crate::config::DatasetType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepLevel {
    Heritability,
    MinorAlleleFrequency,
    Population,
    Attributes,
    ContinuousPhenotype,
    DiscretePhenotype,
}

impl SweepLevel {
    fn prefix(self) -> &'static str {
        match self {
            Self::Heritability => "her",
            Self::MinorAlleleFrequency => "maf",
            Self::Population => "pop",
            Self::Attributes => "attribs",
            Self::ContinuousPhenotype => "phenotype-continuous_sd",
            Self::DiscretePhenotype => "phenotype-discrete_prevalence",
        }
    }
}

/// Renders a float the way generated paths and command lines spell it:
/// integral values keep one decimal (`2.0`), everything else uses the
/// shortest round-trip form (`0.025`). Decimal exponents below -4 or from 16
/// up switch to signed, two-digit exponent notation (`5e-05`, `1e+16`).
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return format!("{value:.1}");
    }

    let scientific = format!("{value:e}");
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };
    if !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs());
    }

    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

pub fn level_segment(level: SweepLevel, value: impl fmt::Display) -> String {
    format!("{}-{value}", level.prefix())
}

pub fn model_shape_segment(
    num_models_per_dataset: u32,
    num_snps_per_model: u32,
    dataset_type: DatasetType,
) -> String {
    format!("{num_models_per_dataset}x{num_snps_per_model}-way_{dataset_type}")
}

pub fn heritability_segment(heritability: f64) -> String {
    level_segment(SweepLevel::Heritability, format_float(heritability))
}

pub fn maf_segment(maf: f64) -> String {
    level_segment(SweepLevel::MinorAlleleFrequency, format_float(maf))
}

pub fn population_segment(total_count: u32) -> String {
    level_segment(SweepLevel::Population, total_count)
}

pub fn attributes_segment(total_attribute_count: u32) -> String {
    level_segment(SweepLevel::Attributes, total_attribute_count)
}

pub fn phenotype_segment(phenotype: PhenotypeParameter) -> String {
    let level = if phenotype.is_continuous() {
        SweepLevel::ContinuousPhenotype
    } else {
        SweepLevel::DiscretePhenotype
    };
    level_segment(level, format_float(phenotype.value()))
}

/// Nesting path of the sweep, one segment per entered level.
///
/// Values are immutable: descending returns a new path and leaves the parent
/// untouched, so each level only ever sees its own prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSegments {
    segments: Vec<String>,
}

impl PathSegments {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn descend(&self, segment: impl Into<String>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment.into());
        Self { segments }
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.segments
    }

    /// Directory holding this combination's artifacts, optionally rooted.
    pub fn folder_path(&self, output_root: Option<&Path>) -> PathBuf {
        let mut path = output_root.map(Path::to_path_buf).unwrap_or_default();
        for segment in &self.segments {
            path.push(segment);
        }
        path
    }

    pub fn job_name(&self, random_seed: i64) -> String {
        format!("{}_seed-{random_seed}", self.segments.join("_"))
    }
}

impl fmt::Display for PathSegments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}
