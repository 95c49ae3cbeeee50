use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use dashboard_core::{
    Config, Coordinates, DashboardPipeline, HtmlSink, NullSink, Overflow, ReqwestHttp,
    SelectionStrategy, TextSink,
};
use std::{path::PathBuf, sync::Arc};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "dashboard", version, about = "Today's weather and the next departures nearby")]
pub struct Cli {
    /// More logging on stderr (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Read configuration from this file instead of the default location.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show today's temperatures and upcoming departures.
    Show {
        /// Latitude in degrees; skips IP geolocation. Requires --lon.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude in degrees. Requires --lat.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,

        /// Maximum number of departures.
        #[arg(long)]
        limit: Option<u32>,

        /// Station selection strategy: "nearest" or "ordinal".
        #[arg(long)]
        strategy: Option<String>,

        /// Position picked by the ordinal strategy.
        #[arg(long)]
        index: Option<usize>,

        /// With the ordinal strategy, fall back to the last station instead of failing.
        #[arg(long)]
        clamp: bool,
    },

    /// Print the config file path and the effective configuration.
    Config,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        match self.command {
            Command::Config => {
                match &self.config {
                    Some(path) => println!("# {}", path.display()),
                    None => println!("# {}", Config::config_file_path()?.display()),
                }
                print!("{}", config.to_toml()?);
            }
            Command::Show { lat, lon, format, limit, strategy, index, clamp } => {
                if let (Some(lat), Some(lon)) = (lat, lon) {
                    config.location = Some(Coordinates::new(lat, lon));
                }
                if let Some(limit) = limit {
                    config.board.limit = limit;
                }
                if let Some(strategy) = strategy {
                    config.selection.strategy = SelectionStrategy::try_from(strategy.as_str())?;
                }
                if let Some(index) = index {
                    config.selection.index = index;
                }
                if clamp {
                    config.selection.overflow = Overflow::ClampToLast;
                }

                tracing::debug!(?config, "effective configuration");
                show(&config, format).await?;
            }
        }

        Ok(())
    }
}

/// Run the pipeline once and print whatever got rendered, even on failure.
async fn show(config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let pipeline = DashboardPipeline::from_config(config, Arc::new(ReqwestHttp::new()));

    let result = match format {
        OutputFormat::Text => {
            let mut sink = TextSink::new();
            let result = pipeline.run(&mut sink).await;
            print!("{}", sink.as_str());
            result.map(drop)
        }
        OutputFormat::Html => {
            let mut sink = HtmlSink::new();
            let result = pipeline.run(&mut sink).await;
            println!("{}", sink.render().context("Failed to render HTML")?);
            result.map(drop)
        }
        OutputFormat::Json => {
            let result = pipeline.run(&mut NullSink).await;
            if let Ok(dashboard) = &result {
                println!("{}", serde_json::to_string_pretty(dashboard)?);
            }
            result.map(drop)
        }
    };

    result.context("Could not build the dashboard")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_defaults() {
        let cli = Cli::try_parse_from(["dashboard", "show"]).unwrap();
        match cli.command {
            Command::Show { lat, lon, format, limit, strategy, index, clamp } => {
                assert_eq!((lat, lon), (None, None));
                assert_eq!(format, OutputFormat::Text);
                assert_eq!(limit, None);
                assert_eq!(strategy, None);
                assert_eq!(index, None);
                assert!(!clamp);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn show_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "dashboard", "show", "--lat", "-33.8688", "--lon", "151.2093", "--format", "json",
        ])
        .unwrap();

        match cli.command {
            Command::Show { lat, lon, format, .. } => {
                assert_eq!(lat, Some(-33.8688));
                assert_eq!(lon, Some(151.2093));
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn lat_without_lon_is_rejected() {
        assert!(Cli::try_parse_from(["dashboard", "show", "--lat", "46.5"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["dashboard", "show", "-vv", "--config", "/tmp/d.toml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/d.toml")));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
