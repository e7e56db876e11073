use serde::{Deserialize, Serialize};

/// Canonical, normalized coverage analysis result. Built once per fetch and
/// replaced wholesale on the next one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CoverageReport {
    pub design: String,
    pub overall_coverage_percent: Option<f64>,
    pub uncovered_bins: Vec<UncoveredBin>,
    /// Sorted by score descending. Nothing downstream re-sorts it.
    pub suggestions: Vec<Suggestion>,
    pub closure_prediction: Option<ClosurePrediction>,
    pub cross_coverage: Vec<CrossCoverage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UncoveredBin {
    pub covergroup: String,
    pub coverpoint: String,
    pub bin: String,
}

impl UncoveredBin {
    pub fn new(covergroup: &str, coverpoint: &str, bin: &str) -> Self {
        Self {
            covergroup: covergroup.to_string(),
            coverpoint: coverpoint.to_string(),
            bin: bin.to_string(),
        }
    }

    /// Text the search box matches against.
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.covergroup, self.coverpoint, self.bin)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Suggestion {
    pub target_bin: String,
    pub score: f64,
    pub priority: String,
    pub difficulty: String,
    pub suggestion_text: String,
    pub dependencies: Vec<String>,
    pub test_outline: Vec<String>,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClosurePrediction {
    pub estimated_time_to_closure_hours: Option<f64>,
    /// Fraction in [0, 1]. Scaled to a percentage only when rendered.
    pub closure_probability: Option<f64>,
    pub blocking_bins: Vec<BlockingBin>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockingBin {
    pub bin: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CrossCoverage {
    pub name: String,
    pub uncovered: Vec<String>,
}
