use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{
    errors::CovError,
    logging::init_tracing,
    runner::{Runner, dashboard::DashboardRunner, settings::SettingsRunner},
};

use super::{
    Config, OutputFormat, SourceConfig,
    settings::{Settings, load_settings},
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(long, help = "Base URL of the coverage analysis service")]
    base_url: Option<String>,

    #[arg(
        long,
        short,
        conflicts_with = "base_url",
        help = "Read a saved coverage payload instead of querying the service"
    )]
    file: Option<PathBuf>,

    #[arg(long, short, help = "Only show uncovered bins matching this text")]
    query: Option<String>,

    #[arg(long, short, help = "Show suggestion number N expanded")]
    expand: Option<usize>,

    #[arg(long, value_parser=["text", "json"])]
    format: Option<String>,

    #[arg(long, default_value_t = false, help = "Disable coloured output")]
    no_color: bool,

    #[arg(
        long,
        short,
        default_value_t = false,
        help = "Keep the dashboard open and read commands from stdin"
    )]
    interactive: bool,

    #[arg(long, short, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the settings file in $VISUAL / $EDITOR
    Config,
}

fn build_config(cli: &Cli, settings: Settings) -> Result<Config, CovError> {
    let source = match &cli.file {
        Some(path) => SourceConfig::File { path: path.clone() },
        None => SourceConfig::Http {
            base_url: cli.base_url.clone().unwrap_or(settings.base_url),
        },
    };
    let format = match cli.format.as_deref() {
        Some(format) => format.parse()?,
        None => settings.format,
    };
    let expand = match cli.expand {
        Some(0) => {
            return Err(CovError::InvalidArgument(
                "Suggestion numbers start at 1".to_string(),
            ));
        }
        Some(number) => Some(number - 1),
        None => None,
    };
    Ok(Config {
        source,
        format,
        color: settings.color && !cli.no_color && format == OutputFormat::Text,
        interactive: cli.interactive,
        query: cli.query.clone(),
        expand,
    })
}

pub fn parse_cli() -> Result<Box<dyn Runner>, CovError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Some(Commands::Config) = cli.command {
        return Ok(Box::new(SettingsRunner));
    }

    let config = build_config(&cli, load_settings()?)?;
    Ok(Box::new(DashboardRunner::new(config)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(args: &[&str], settings: Settings) -> Result<Config, CovError> {
        let cli = Cli::try_parse_from(args).unwrap();
        build_config(&cli, settings)
    }

    #[test]
    fn defaults_come_from_settings() {
        let settings = Settings {
            base_url: "http://analysis.lan:9000".to_string(),
            format: OutputFormat::Text,
            color: true,
        };

        let config = config_from(&["covdash"], settings).unwrap();

        assert_eq!(
            config,
            Config {
                source: SourceConfig::Http {
                    base_url: "http://analysis.lan:9000".to_string()
                },
                format: OutputFormat::Text,
                color: true,
                interactive: false,
                query: None,
                expand: None,
            }
        );
    }

    #[test]
    fn flags_override_settings() {
        let config = config_from(
            &[
                "covdash",
                "--base-url",
                "http://other:8000",
                "--format",
                "json",
                "-q",
                "alu",
                "-e",
                "2",
                "-i",
            ],
            Settings::default(),
        )
        .unwrap();

        assert_eq!(
            config.source,
            SourceConfig::Http {
                base_url: "http://other:8000".to_string()
            }
        );
        assert_eq!(config.format, OutputFormat::Json);
        assert!(!config.color);
        assert!(config.interactive);
        assert_eq!(config.query, Some("alu".to_string()));
        assert_eq!(config.expand, Some(1));
    }

    #[test]
    fn file_source() {
        let config = config_from(&["covdash", "--file", "report.json", "--no-color"], Settings::default())
            .unwrap();
        assert_eq!(
            config.source,
            SourceConfig::File {
                path: PathBuf::from("report.json")
            }
        );
        assert!(!config.color);
    }

    #[test]
    fn expand_zero_is_rejected() {
        assert!(config_from(&["covdash", "-e", "0"], Settings::default()).is_err());
    }

    #[test]
    fn file_conflicts_with_base_url() {
        assert!(
            Cli::try_parse_from(["covdash", "--file", "a.json", "--base-url", "http://x"]).is_err()
        );
    }

    #[test]
    fn config_subcommand() {
        let cli = Cli::try_parse_from(["covdash", "config"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Config)));
    }
}
