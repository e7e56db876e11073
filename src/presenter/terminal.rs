use colored::Colorize;
use itertools::Itertools;
use tabled::{Table, Tabled, settings::Style};

use crate::{
    report::ClosurePrediction,
    view::{DerivedView, Priority, SuggestionView},
};

use super::{Presenter, Screen, format_optional, format_probability};

const TITLE: &str = "Coverage Analyzer Dashboard";

#[derive(Tabled)]
struct BinRow {
    #[tabled(rename = "Covergroup")]
    covergroup: String,
    #[tabled(rename = "Coverpoint")]
    coverpoint: String,
    #[tabled(rename = "Bin")]
    bin: String,
}

#[derive(Debug, Clone)]
pub struct TerminalPresenter {
    color: bool,
}

impl TerminalPresenter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn bold(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn priority(&self, priority: Priority, label: &str) -> String {
        if !self.color {
            return label.to_string();
        }
        match priority {
            Priority::High => label.red().bold().to_string(),
            Priority::Medium => label.yellow().to_string(),
            Priority::Low => label.green().to_string(),
        }
    }

    fn field(&self, output: &mut String, indent: &str, name: &str, value: &str) {
        output.push_str(&format!("{}{} {}\n", indent, self.bold(name), value));
    }

    fn render_ready(&self, view: &DerivedView<'_>) -> String {
        let report = view.report;
        let mut output = String::new();
        output.push_str(&format!("{}\n\n", self.bold(TITLE)));
        self.field(&mut output, "", "Design:", &report.design);
        self.field(
            &mut output,
            "",
            "Overall Coverage:",
            &report
                .overall_coverage_percent
                .map_or(format_optional(None), |percent| format!("{}%", percent)),
        );

        output.push('\n');
        self.render_bins(&mut output, view);
        if !report.cross_coverage.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", self.bold("Cross Coverage")));
            for cross in &report.cross_coverage {
                output.push_str(&format!(
                    "  {}: {}\n",
                    cross.name,
                    if cross.uncovered.is_empty() {
                        "None".to_string()
                    } else {
                        cross.uncovered.join(", ")
                    }
                ));
            }
        }

        output.push('\n');
        output.push_str(&format!(
            "{}\n",
            self.bold(&format!("Prioritized Suggestions ({})", view.suggestions.len()))
        ));
        if view.suggestions.is_empty() {
            output.push_str("  No suggestions.\n");
        }
        for suggestion in &view.suggestions {
            self.render_suggestion(&mut output, suggestion);
        }

        output.push('\n');
        self.render_closure(&mut output, report.closure_prediction.as_ref());
        output
    }

    fn render_bins(&self, output: &mut String, view: &DerivedView<'_>) {
        let total = view.report.uncovered_bins.len();
        let header = if view.is_filtered() {
            format!(
                "Uncovered Bins ({} of {} matching \"{}\")",
                view.visible_bins.len(),
                total,
                view.search_query
            )
        } else {
            format!("Uncovered Bins ({})", total)
        };
        output.push_str(&format!("{}\n", self.bold(&header)));
        if view.visible_bins.is_empty() {
            output.push_str("  No uncovered bins.\n");
            return;
        }
        let rows = view.visible_bins.iter().map(|bin| BinRow {
            covergroup: bin.covergroup.clone(),
            coverpoint: bin.coverpoint.clone(),
            bin: bin.bin.clone(),
        });
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        output.push_str(&table.to_string());
        output.push('\n');
    }

    fn render_suggestion(&self, output: &mut String, view: &SuggestionView<'_>) {
        let suggestion = view.suggestion;
        let marker = if view.expanded { "-" } else { "+" };
        output.push_str(&format!(
            "{} [{}] {}  score {}  priority {}  difficulty {}\n",
            marker,
            view.index + 1,
            self.bold(&suggestion.target_bin),
            suggestion.score,
            self.priority(view.priority, &suggestion.priority),
            suggestion.difficulty
        ));
        self.field(output, "    ", "Suggestion:", &suggestion.suggestion_text);
        if !view.expanded {
            return;
        }
        let dependencies = if suggestion.dependencies.is_empty() {
            "None".to_string()
        } else {
            suggestion.dependencies.join(", ")
        };
        self.field(output, "    ", "Dependencies:", &dependencies);
        output.push_str(&format!("    {}\n", self.bold("Test Outline:")));
        if suggestion.test_outline.is_empty() {
            output.push_str("      None\n");
        }
        for (step_no, step) in suggestion.test_outline.iter().enumerate() {
            output.push_str(&format!("      {}. {}\n", step_no + 1, step));
        }
        self.field(output, "    ", "Reasoning:", &suggestion.reasoning);
    }

    fn render_closure(&self, output: &mut String, prediction: Option<&ClosurePrediction>) {
        output.push_str(&format!("{}\n", self.bold("Coverage Closure Prediction")));
        let hours = prediction.and_then(|p| p.estimated_time_to_closure_hours);
        let probability = prediction.and_then(|p| p.closure_probability);
        let blocking = prediction
            .map(|p| p.blocking_bins.iter().map(|b| b.bin.as_str()).join(", "))
            .filter(|joined| !joined.is_empty())
            .unwrap_or_else(|| "None".to_string());
        let hours_text = hours.map_or(format_optional(None), |h| format!("{} hours", h));
        self.field(output, "  ", "Estimated Time to Closure:", &hours_text);
        self.field(
            output,
            "  ",
            "Closure Probability:",
            &format_probability(probability),
        );
        self.field(output, "  ", "Blocking Bins:", &blocking);
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Presenter for TerminalPresenter {
    fn render(&self, screen: &Screen<'_>) -> String {
        match screen {
            Screen::Loading { source } => format!("Loading coverage data from {}...\n", source),
            Screen::Failed { source, error } => {
                let failure = format!("Could not load coverage data from {}: {}", source, error);
                format!(
                    "{}\n\n{}\nNo coverage data available.\n",
                    self.bold(TITLE),
                    if self.color {
                        failure.red().to_string()
                    } else {
                        failure
                    }
                )
            }
            Screen::Ready(view) => self.render_ready(view),
            Screen::Stale {
                source,
                error,
                view,
            } => {
                let note = format!(
                    "Refresh from {} failed: {}. Showing the last loaded report.",
                    source, error
                );
                format!(
                    "{}\n\n{}",
                    if self.color {
                        note.yellow().to_string()
                    } else {
                        note
                    },
                    self.render_ready(view)
                )
            }
        }
    }
}
