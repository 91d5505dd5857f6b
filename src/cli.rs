use clap::{Parser, Subcommand};
use greenhouse::models::TimeOfDay;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "greenhouse", version, about = "Greenhouse watering controller")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Use a throwaway in-memory rule repository
    #[arg(long)]
    pub memory: bool,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the rule table and plant catalog, replacing existing contents
    Seed,
    /// List watering rules
    Rules,
    /// Decide how much to water one plant type
    Decide {
        #[arg(long)]
        plant_type: String,
        #[arg(long, allow_negative_numbers = true)]
        temperature: f64,
        #[arg(long, allow_negative_numbers = true)]
        humidity: f64,
        /// night, morning, day or evening
        #[arg(long, value_parser = parse_time_of_day)]
        time_of_day: TimeOfDay,
        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
    },
    /// Simulate the greenhouse until every plant has grown
    Simulate {
        /// Plant names, e.g. Rose Cactus Tomato
        #[arg(required = true)]
        plants: Vec<String>,
        /// Seed for the temperature sensor
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        max_ticks: Option<u32>,
        /// Print one JSON report per tick
        #[arg(long)]
        json: bool,
    },
    /// Validate config and test the rule repository
    Check,
}

fn parse_time_of_day(s: &str) -> Result<TimeOfDay, String> {
    TimeOfDay::from_str(s)
        .ok_or_else(|| format!("unknown time of day '{}' (night, morning, day, evening)", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decide_arguments() {
        let cli = Cli::parse_from([
            "greenhouse",
            "--memory",
            "decide",
            "--plant-type",
            "Flowering plants",
            "--temperature",
            "-3",
            "--humidity",
            "35",
            "--time-of-day",
            "Evening",
        ]);
        assert!(cli.memory);
        match cli.command {
            Commands::Decide {
                plant_type,
                temperature,
                time_of_day,
                json,
                ..
            } => {
                assert_eq!(plant_type, "Flowering plants");
                assert_eq!(temperature, -3.0);
                assert_eq!(time_of_day, TimeOfDay::Evening);
                assert!(!json);
            }
            _ => panic!("expected decide"),
        }
    }

    #[test]
    fn accepts_negative_readings() {
        let cli = Cli::parse_from([
            "greenhouse",
            "decide",
            "--plant-type",
            "Ferns",
            "--temperature",
            "-12.5",
            "--humidity",
            "-4",
            "--time-of-day",
            "night",
        ]);
        match cli.command {
            Commands::Decide {
                temperature,
                humidity,
                ..
            } => {
                assert_eq!(temperature, -12.5);
                assert_eq!(humidity, -4.0);
            }
            _ => panic!("expected decide"),
        }
    }

    #[test]
    fn rejects_unknown_time_of_day() {
        let result = Cli::try_parse_from([
            "greenhouse",
            "decide",
            "--plant-type",
            "x",
            "--temperature",
            "20",
            "--humidity",
            "50",
            "--time-of-day",
            "noon",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn simulate_requires_plants() {
        assert!(Cli::try_parse_from(["greenhouse", "simulate"]).is_err());
        let cli = Cli::try_parse_from(["greenhouse", "-vv", "simulate", "Rose", "--seed", "9"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Simulate { plants, seed, .. } => {
                assert_eq!(plants, vec!["Rose".to_string()]);
                assert_eq!(seed, Some(9));
            }
            _ => panic!("expected simulate"),
        }
    }
}
