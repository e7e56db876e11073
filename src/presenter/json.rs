use serde_json::{Value, json};

use crate::view::DerivedView;

use super::{Presenter, Screen};

/// Machine-readable rendering of the same screens, for piping into other
/// tools.
#[derive(Debug, Clone, Default)]
pub struct JsonPresenter;

impl Presenter for JsonPresenter {
    fn render(&self, screen: &Screen<'_>) -> String {
        let document = match screen {
            Screen::Loading { source } => json!({"status": "loading", "source": source}),
            Screen::Failed { source, error } => json!({
                "status": "failed",
                "source": source,
                "error": error.to_string(),
            }),
            Screen::Ready(view) => view_document("ready", view),
            Screen::Stale {
                source,
                error,
                view,
            } => {
                let mut document = view_document("stale", view);
                document["source"] = json!(source);
                document["error"] = json!(error.to_string());
                document
            }
        };
        let mut output = serde_json::to_string_pretty(&document).unwrap_or_default();
        output.push('\n');
        output
    }
}

fn view_document(status: &str, view: &DerivedView<'_>) -> Value {
    json!({
        "status": status,
        "design": view.report.design,
        "overall_coverage_percent": view.report.overall_coverage_percent,
        "search_query": view.search_query,
        "uncovered_bin_count": view.report.uncovered_bins.len(),
        "visible_bins": view.visible_bins,
        "suggestions": view.suggestions,
        "closure_prediction": view.report.closure_prediction,
        "cross_coverage": view.report.cross_coverage,
    })
}
