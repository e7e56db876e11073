pub mod cli;
pub mod errors;
pub mod logging;
pub mod presenter;
pub mod report;
pub mod runner;
pub mod session;
pub mod source;
pub mod view;

pub use errors::CovError;
