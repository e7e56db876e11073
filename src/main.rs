use covdash::{cli::cli_parser::parse_cli, errors::CovError};

fn main() -> Result<(), CovError> {
    let runner = parse_cli()?;
    runner.run()
}
