use crate::errors::CovError;

pub mod dashboard;
pub mod interactive;
pub mod settings;

pub trait Runner {
    fn run(&self) -> Result<(), CovError>;
}
