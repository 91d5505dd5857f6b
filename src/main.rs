mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use greenhouse::app::{Greenhouse, RandomSensor, TickReport};
use greenhouse::config::{Config, RepositoryBackend};
use greenhouse::db::Database;
use greenhouse::logic::rules::{InMemoryRuleRepository, TracingObserver};
use greenhouse::logic::{Decision, DecisionEngine, RuleRepository};
use greenhouse::models::Rule;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_ref()).context("Configuration error")?;

    match &cli.command {
        Commands::Seed => {
            let seed = config.seed_data().context("Failed to load seed data")?;
            let repository = open_repository(&cli, &config, false)?;
            repository.seed(&seed)?;
            println!(
                "Seeded {} rules and {} plant categories",
                seed.rules.len(),
                seed.plant_categories.len()
            );
        }
        Commands::Rules => {
            let repository = open_repository(&cli, &config, true)?;
            print_rules(&repository.rules()?, &config)?;
        }
        Commands::Decide {
            plant_type,
            temperature,
            humidity,
            time_of_day,
            json,
        } => {
            let repository = open_repository(&cli, &config, true)?;
            let engine = build_engine(&config, repository)?;
            let decision = engine.evaluate(plant_type, *temperature, *humidity, *time_of_day)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&decision)?);
            } else {
                print_decision(&decision);
            }
        }
        Commands::Simulate {
            plants,
            seed,
            max_ticks,
            json,
        } => {
            let repository = open_repository(&cli, &config, true)?;
            let engine = build_engine(&config, repository)?;
            let sim = &config.simulation;
            let sensor = RandomSensor::new(
                seed.or(sim.seed),
                sim.min_temperature,
                sim.max_temperature,
            );
            let mut greenhouse = Greenhouse::new(engine, Box::new(sensor), plants, sim)?;

            let json = *json;
            let summary = greenhouse.run(max_ticks.unwrap_or(sim.max_ticks), |report| {
                if json {
                    match serde_json::to_string(report) {
                        Ok(line) => println!("{}", line),
                        Err(e) => tracing::warn!("Failed to serialize tick report: {}", e),
                    }
                } else {
                    print_tick(report);
                }
            })?;

            if json {
                println!("{}", serde_json::to_string(&summary)?);
            } else if summary.finished {
                println!(
                    "All plants grown after {} days ({} ticks)",
                    summary.days, summary.ticks
                );
            } else {
                println!(
                    "Stopped after {} ticks on day {}; still growing: {}",
                    summary.ticks,
                    summary.days,
                    summary.remaining.join(", ")
                );
            }
        }
        Commands::Check => {
            config.validate()?;
            let resolver = config.resolver()?;
            println!(
                "Config: OK (actions: {})",
                resolver.labels().collect::<Vec<_>>().join(", ")
            );

            let repository = open_repository(&cli, &config, false)?;
            let rules = match repository.rules() {
                Ok(rules) => rules,
                Err(e) => {
                    println!("Repository: UNAVAILABLE ({})", e);
                    std::process::exit(1);
                }
            };
            println!("Repository: OK ({} rules)", rules.len());

            for rule in &rules {
                if resolver.try_resolve(&rule.action).is_err() {
                    println!(
                        "  warning: rule '{}' uses action '{}' with no magnitude; it waters 0",
                        rule.id, rule.action
                    );
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    // Logs go to stderr so --json output on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Open the configured rule repository. An in-memory repository is always
/// seeded; a SQLite one only when `seed_if_empty` is set and it has no rules.
fn open_repository(
    cli: &Cli,
    config: &Config,
    seed_if_empty: bool,
) -> Result<Arc<dyn RuleRepository>> {
    if cli.memory || config.repository.backend == RepositoryBackend::Memory {
        let seed = config.seed_data().context("Failed to load seed data")?;
        return Ok(Arc::new(InMemoryRuleRepository::with_seed(&seed)?));
    }

    let db_path = Config::db_path(cli.data_dir.as_ref())?;
    let db = Database::open(&db_path, config.repository.busy_timeout())
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

    if seed_if_empty && db.rule_count()? == 0 {
        tracing::info!(path = %db_path.display(), "Rule table empty, seeding");
        let seed = config.seed_data().context("Failed to load seed data")?;
        db.seed(&seed)?;
    }

    Ok(Arc::new(db))
}

fn build_engine(config: &Config, repository: Arc<dyn RuleRepository>) -> Result<DecisionEngine> {
    Ok(
        DecisionEngine::new(config.classifier()?, config.resolver()?, repository)
            .with_observer(TracingObserver),
    )
}

fn print_rules(rules: &[Rule], config: &Config) -> Result<()> {
    let resolver = config.resolver()?;
    println!(
        "{:<9} {:<34} {:<24} {:<8} {:<8} {:<8} {:<11} {:>6}",
        "TIER", "ID", "PLANT TYPE", "HUMID", "TEMP", "TIME", "ACTION", "AMOUNT"
    );
    for rule in rules {
        let temperature = rule
            .temperature_level
            .map_or("*", |c| c.as_str());
        let time_of_day = rule.time_of_day.map_or("*", |t| t.as_str());
        println!(
            "{:<9} {:<34} {:<24} {:<8} {:<8} {:<8} {:<11} {:>6.1}",
            rule.tier.as_str(),
            rule.id,
            rule.plant_type,
            rule.humidity_level.as_str(),
            temperature,
            time_of_day,
            rule.action,
            resolver.resolve(&rule.action)
        );
    }
    Ok(())
}

fn print_decision(decision: &Decision) {
    println!("Plant type:   {}", decision.plant_type);
    println!(
        "Temperature:  {:.1} ({})",
        decision.temperature, decision.temperature_level
    );
    println!(
        "Humidity:     {:.1} ({})",
        decision.humidity, decision.humidity_level
    );
    println!("Time of day:  {}", decision.time_of_day);
    match &decision.matched {
        Some(rule) => {
            println!("Rule:         {} [{}]", rule.name, rule.tier);
            println!("Action:       {}", rule.action);
        }
        None => {
            println!("Rule:         none");
            println!("Action:       none");
        }
    }
    println!("Amount:       {:.1}", decision.amount);
}

fn print_tick(report: &TickReport) {
    println!(
        "Day {} {} - temperature {:.0}",
        report.day, report.time_of_day, report.temperature
    );
    for plant in &report.plants {
        println!(
            "  {:<16} {:<24} day {}/{}  humidity {:>5.1} -> {:>5.1} -> {:>5.1}  {}",
            plant.name,
            plant.plant_type,
            plant.current_days,
            plant.growth_days,
            plant.humidity_before,
            plant.humidity_after_drying,
            plant.humidity_after,
            plant.action.as_deref().unwrap_or("no watering")
        );
    }
    for name in &report.grown {
        println!("  {} is fully grown", name);
    }
}
