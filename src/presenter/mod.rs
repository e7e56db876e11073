use crate::{errors::CovError, view::DerivedView};

pub mod json;
pub mod terminal;

pub use json::JsonPresenter;
pub use terminal::TerminalPresenter;

/// Everything a presenter may be asked to draw.
#[derive(Debug)]
pub enum Screen<'a> {
    Loading { source: String },
    Failed { source: String, error: &'a CovError },
    Ready(DerivedView<'a>),
    /// Last good report, drawn under a note that refreshing it failed.
    Stale {
        source: String,
        error: &'a CovError,
        view: DerivedView<'a>,
    },
}

pub trait Presenter {
    fn render(&self, screen: &Screen<'_>) -> String;
}

/// Unknown numbers render as "N/A", never as 0.
pub fn format_optional(value: Option<f64>) -> String {
    value.map_or("N/A".to_string(), |number| number.to_string())
}

/// Probability is kept as a fraction; only the rendered text is scaled.
pub fn format_probability(value: Option<f64>) -> String {
    value.map_or("N/A".to_string(), |fraction| {
        let percent = (fraction * 10000.0).round() / 100.0;
        format!("{}%", percent)
    })
}
