pub mod filter;
pub mod priority;
pub mod state;

pub use filter::filter;
pub use priority::{Priority, classify};
pub use state::{DerivedView, SuggestionView, ViewState};
