use serde_json::{Map, Value};
use tracing::debug;

use super::{
    ranker::rank,
    types::{BlockingBin, ClosurePrediction, CoverageReport, CrossCoverage, Suggestion, UncoveredBin},
};

const SUGGESTION_KEYS: [&str; 2] = ["suggestions", "prioritized_suggestions"];
const CLOSURE_KEYS: [&str; 2] = ["coverage_closure_prediction", "closure_prediction"];

type Object = Map<String, Value>;

/// The two suggestion layouts the analysis service has been seen to emit.
/// Resolved here once; everything past the normalizer sees `Suggestion`.
enum RawSuggestion<'a> {
    /// `{target_bin, score, priority, suggestion: "<text>", ...}`
    Flat(&'a Object),
    /// `{target, score, suggestion: {priority, suggestion, reasoning, ...}}`
    Nested { outer: &'a Object, detail: &'a Object },
}

impl<'a> RawSuggestion<'a> {
    fn detect(element: &'a Object) -> Self {
        match element.get("suggestion") {
            Some(Value::Object(detail)) => RawSuggestion::Nested {
                outer: element,
                detail,
            },
            _ => RawSuggestion::Flat(element),
        }
    }

    fn into_suggestion(self) -> Suggestion {
        match self {
            RawSuggestion::Flat(fields) => Suggestion {
                target_bin: first_str(&[fields], &["target_bin", "target"]),
                score: first_num(&[fields], "score").unwrap_or_default(),
                priority: first_str(&[fields], &["priority"]),
                difficulty: first_str(&[fields], &["difficulty"]),
                suggestion_text: first_str(&[fields], &["suggestion"]),
                dependencies: str_list(&[fields], "dependencies"),
                test_outline: str_list(&[fields], "test_outline"),
                reasoning: first_str(&[fields], &["reasoning"]),
            },
            RawSuggestion::Nested { outer, detail } => {
                // Detail wins; the outer object fills whatever it leaves out.
                let layers = [detail, outer];
                Suggestion {
                    target_bin: first_str(&[outer, detail], &["target", "target_bin"]),
                    score: first_num(&[outer, detail], "score").unwrap_or_default(),
                    priority: first_str(&layers, &["priority"]),
                    difficulty: first_str(&layers, &["difficulty"]),
                    suggestion_text: first_str(&[detail], &["suggestion"]),
                    dependencies: str_list(&layers, "dependencies"),
                    test_outline: str_list(&layers, "test_outline"),
                    reasoning: first_str(&layers, &["reasoning"]),
                }
            }
        }
    }
}

/// Turns whatever the analysis service returned into a `CoverageReport`.
///
/// Never fails: missing or wrongly typed fields fall back to their defaults
/// so a partial response still renders.
pub fn normalize(raw: &Value) -> CoverageReport {
    let Some(root) = raw.as_object() else {
        debug!("coverage payload is not a JSON object, using empty report");
        return CoverageReport::default();
    };

    let suggestions = SUGGESTION_KEYS
        .iter()
        .find_map(|key| root.get(*key).and_then(Value::as_array))
        .map(|elements| elements.iter().map(normalize_suggestion).collect())
        .unwrap_or_default();

    let closure_prediction = CLOSURE_KEYS
        .iter()
        .find_map(|key| root.get(*key).and_then(Value::as_object))
        .map(normalize_closure_prediction);

    let report = CoverageReport {
        design: first_str(&[root], &["design"]),
        overall_coverage_percent: first_num(&[root], "overall_coverage"),
        uncovered_bins: array(root, "uncovered_bins")
            .iter()
            .map(normalize_bin)
            .collect(),
        suggestions: rank(suggestions),
        closure_prediction,
        cross_coverage: array(root, "cross_coverage")
            .iter()
            .filter_map(Value::as_object)
            .map(|cross| CrossCoverage {
                name: first_str(&[cross], &["name"]),
                uncovered: str_list(&[cross], "uncovered"),
            })
            .collect(),
    };
    debug!(
        design = %report.design,
        bins = report.uncovered_bins.len(),
        suggestions = report.suggestions.len(),
        "normalized coverage payload"
    );
    report
}

fn normalize_bin(element: &Value) -> UncoveredBin {
    match element.as_object() {
        Some(fields) => UncoveredBin {
            covergroup: first_str(&[fields], &["covergroup"]),
            coverpoint: first_str(&[fields], &["coverpoint"]),
            bin: first_str(&[fields], &["bin"]),
        },
        None => UncoveredBin::default(),
    }
}

fn normalize_suggestion(element: &Value) -> Suggestion {
    match element.as_object() {
        Some(fields) => RawSuggestion::detect(fields).into_suggestion(),
        None => Suggestion::default(),
    }
}

fn normalize_closure_prediction(fields: &Object) -> ClosurePrediction {
    ClosurePrediction {
        estimated_time_to_closure_hours: first_num(&[fields], "estimated_time_to_closure_hours"),
        closure_probability: first_num(&[fields], "closure_probability"),
        blocking_bins: array(fields, "blocking_bins")
            .iter()
            .filter_map(|blocking| match blocking {
                Value::Object(entry) => Some(BlockingBin {
                    bin: first_str(&[entry], &["bin"]),
                }),
                Value::String(bin) => Some(BlockingBin { bin: bin.clone() }),
                _ => None,
            })
            .collect(),
    }
}

fn array<'a>(fields: &'a Object, key: &str) -> &'a [Value] {
    fields
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn first_str(layers: &[&Object], keys: &[&str]) -> String {
    layers
        .iter()
        .flat_map(|fields| keys.iter().filter_map(move |key| fields.get(*key)))
        .find_map(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn first_num(layers: &[&Object], key: &str) -> Option<f64> {
    layers
        .iter()
        .find_map(|fields| fields.get(key).and_then(Value::as_f64))
}

fn str_list(layers: &[&Object], key: &str) -> Vec<String> {
    layers
        .iter()
        .find_map(|fields| fields.get(key).and_then(Value::as_array))
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
