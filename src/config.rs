//! Configuration file parsing.
//!
//! The optional TOML file mirrors the two option bundles the program needs:
//! where the data comes from ([`SourceOptions`]) and how the pipeline runs
//! ([`PipelineOptions`]). Every key is optional; missing keys fall back to
//! the built-in defaults.
//!
//! ```toml
//! [source]
//! url = "https://…/India.csv"
//! cache_path = "India.csv"
//! probe_addr = "1.1.1.1:53"
//! timeout_secs = 30
//!
//! [pipeline]
//! smoothing = { mode = "moving_window", window_size = 2 }
//! acceleration = "per_point_mean"
//!
//! [milestones]
//! reference_population = 1380004385
//! targets = [
//!     { label = "50%", fraction = 0.5 },
//!     { label = "herd", population_threshold = 966003070 },
//! ]
//! ```
use crate::{
    io::fetch::SourceOptions,
    pipeline::{
        options::DEFAULT_REFERENCE_POPULATION, AccelerationDefinition, MilestoneTarget,
        PipelineOptions, SmoothingMode,
    },
};
use anyhow::{bail, Context};
use serde::Deserialize;
use std::{path::Path, path::PathBuf, time::Duration};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub source: SourceSection,
    pub pipeline: PipelineSection,
    pub milestones: MilestoneSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceSection {
    pub url: Option<String>,
    pub cache_path: Option<PathBuf>,
    pub probe_addr: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineSection {
    pub smoothing: Option<SmoothingMode>,
    pub acceleration: Option<AccelerationDefinition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MilestoneSection {
    pub reference_population: Option<u64>,
    pub targets: Option<Vec<MilestoneEntry>>,
}

/// One milestone: either a fraction of the reference population or an
/// absolute threshold, not both.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MilestoneEntry {
    pub label: String,
    pub fraction: Option<f64>,
    pub population_threshold: Option<u64>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn source_options(&self) -> SourceOptions {
        let defaults = SourceOptions::default();
        let source = &self.source;
        SourceOptions {
            url: source.url.clone().unwrap_or(defaults.url),
            cache_path: source.cache_path.clone().unwrap_or(defaults.cache_path),
            probe_addr: source.probe_addr.clone().unwrap_or(defaults.probe_addr),
            timeout: source.timeout_secs.map(Duration::from_secs).unwrap_or(defaults.timeout),
        }
    }

    pub fn pipeline_options(&self) -> anyhow::Result<PipelineOptions> {
        let reference_population =
            self.milestones.reference_population.unwrap_or(DEFAULT_REFERENCE_POPULATION);

        let milestones = match &self.milestones.targets {
            None => PipelineOptions::default_milestones(reference_population)?,
            Some(entries) => entries
                .iter()
                .map(|entry| entry.resolve(reference_population))
                .collect::<anyhow::Result<Vec<_>>>()?,
        };

        Ok(PipelineOptions::new(
            self.pipeline.smoothing.unwrap_or_default(),
            self.pipeline.acceleration.unwrap_or_default(),
            milestones,
        )?)
    }
}

impl MilestoneEntry {
    fn resolve(&self, reference_population: u64) -> anyhow::Result<MilestoneTarget> {
        let target = match (self.fraction, self.population_threshold) {
            (Some(fraction), None) => {
                MilestoneTarget::from_fraction(&self.label, fraction, reference_population)?
            }
            (None, Some(threshold)) => MilestoneTarget::new(&self.label, threshold)?,
            _ => bail!(
                "milestone '{}' needs exactly one of `fraction` or `population_threshold`",
                self.label
            ),
        };
        Ok(target)
    }
}
