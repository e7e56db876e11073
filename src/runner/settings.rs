use crate::{cli::settings::update_settings, errors::CovError};

use super::Runner;

pub struct SettingsRunner;

impl Runner for SettingsRunner {
    fn run(&self) -> Result<(), CovError> {
        update_settings()
    }
}
