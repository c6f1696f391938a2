use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::chart::PlotOrder;
use crate::data::filter::RowOrder;
use crate::error::ReportError;

/// Smallest canvas edge, in pixels, that still fits axes and a legend.
const MIN_CANVAS: u32 = 64;

// ---------------------------------------------------------------------------
// Variant – the two observed report behaviours
// ---------------------------------------------------------------------------

/// Which of the two report behaviours to reproduce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Labels `blocks`/`gripper`/`logistics`, rows sorted by problem number.
    #[default]
    Sorted,
    /// Labels `domain`/`_domain`/`cs_domain`, rows in file order, every chart
    /// re-sorted by the HSP value.
    Legacy,
}

impl Variant {
    pub fn row_order(self) -> RowOrder {
        match self {
            Variant::Sorted => RowOrder::ProblemNumber,
            Variant::Legacy => RowOrder::FileOrder,
        }
    }

    pub fn plot_order(self) -> PlotOrder {
        match self {
            Variant::Sorted => PlotOrder::AsGiven,
            Variant::Legacy => PlotOrder::ByHsp,
        }
    }

    /// The three default chart groups, with this variant's match labels.
    pub fn default_domains(self) -> Vec<DomainChartConfig> {
        let (blocks, logistics, gripper) = match self {
            Variant::Sorted => ("blocks", "logistics", "gripper"),
            Variant::Legacy => ("domain", "cs_domain", "_domain"),
        };
        vec![
            DomainChartConfig {
                label: blocks.to_string(),
                runtime_title: "Resolution time of MCP and HSP planners in blocksworld".to_string(),
                runtime_file: "graphRuntimeBlocks.png".to_string(),
                steps_title: "Number of steps needed by MCP and HSP planners to resolve problem in blocksworld".to_string(),
                steps_file: "graphNumberOfStepsBlocks.png".to_string(),
            },
            DomainChartConfig {
                label: logistics.to_string(),
                runtime_title: "Resolution time of MCP and HSP planners in logistics".to_string(),
                runtime_file: "graphRuntimeLogistics.png".to_string(),
                steps_title: "Number of steps needed by MCP and HSP planners to resolve problem with logistics".to_string(),
                steps_file: "graphNumberOfStepsLogistics.png".to_string(),
            },
            DomainChartConfig {
                label: gripper.to_string(),
                runtime_title: "Resolution time of MCP and HSP planners in gripper".to_string(),
                runtime_file: "graphRuntimeGripper.png".to_string(),
                steps_title: "Number of steps needed by MCP and HSP planners to resolve problem with gripper".to_string(),
                steps_file: "graphNumberOfStepsGripper.png".to_string(),
            },
        ]
    }
}

impl FromStr for Variant {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sorted" | "b" => Ok(Variant::Sorted),
            "legacy" | "a" => Ok(Variant::Legacy),
            _ => Err(ReportError::UnknownVariant(s.to_string())),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Sorted => f.write_str("sorted"),
            Variant::Legacy => f.write_str("legacy"),
        }
    }
}

// ---------------------------------------------------------------------------
// ReportConfig
// ---------------------------------------------------------------------------

/// One domain group: the label rows must match and its two charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainChartConfig {
    pub label: String,
    pub runtime_title: String,
    pub runtime_file: String,
    pub steps_title: String,
    pub steps_file: String,
}

/// Report settings. Every field has a default, so `{}` is a valid file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub variant: Variant,
    pub width: u32,
    pub height: u32,
    /// TrueType font for chart text; searched for in system dirs when unset.
    pub font: Option<PathBuf>,
    /// Chart groups; the variant's defaults when unset.
    pub domains: Option<Vec<DomainChartConfig>>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            input: PathBuf::from("data.csv"),
            output_dir: PathBuf::from("."),
            variant: Variant::default(),
            width: 640,
            height: 480,
            font: None,
            domains: None,
        }
    }
}

impl ReportConfig {
    /// Configured chart groups, falling back to the variant's defaults.
    pub fn domains(&self) -> Vec<DomainChartConfig> {
        self.domains
            .clone()
            .unwrap_or_else(|| self.variant.default_domains())
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.width >= MIN_CANVAS && self.height >= MIN_CANVAS,
            "chart size {}x{} is too small (minimum {MIN_CANVAS}x{MIN_CANVAS})",
            self.width,
            self.height
        );
        for d in self.domains() {
            ensure!(
                !d.runtime_file.is_empty() && !d.steps_file.is_empty(),
                "domain '{}' has an empty output file name",
                d.label
            );
        }
        Ok(())
    }
}

/// Read a JSON report configuration.
pub fn load_report_config(path: &Path) -> Result<ReportConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: ReportConfig = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_from_str() {
        assert_eq!("sorted".parse::<Variant>().unwrap(), Variant::Sorted);
        assert_eq!("LEGACY".parse::<Variant>().unwrap(), Variant::Legacy);
        assert!(matches!(
            "newest".parse::<Variant>(),
            Err(ReportError::UnknownVariant(_))
        ));
    }

    #[test]
    fn tiny_canvas_is_rejected() {
        let cfg = ReportConfig {
            width: 10,
            ..ReportConfig::default()
        };
        assert!(cfg.validate().is_err());
        assert!(ReportConfig::default().validate().is_ok());
    }
}
