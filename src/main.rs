use chrono::{NaiveDate, Utc};
use serde::Serialize;
use skirmish::build_info;
use skirmish::core::BalanceConfig;
use skirmish::ledger::types::UserId;
use skirmish::store::JsonFileStore;
use skirmish::{Engine, EngineError};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Parsed command line.
struct Cli {
    store: Option<PathBuf>,
    seed: Option<u64>,
    command: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'skirmish --help' for usage.");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Result<Cli, String> {
    let mut cli = Cli {
        store: None,
        seed: None,
        command: Vec::new(),
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--version" | "-v" => {
                println!(
                    "skirmish {} ({})",
                    build_info::BUILD_DATE,
                    build_info::BUILD_COMMIT
                );
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--store" => {
                let path = args.get(i + 1).ok_or("--store needs a path")?;
                cli.store = Some(PathBuf::from(path));
                i += 1;
            }
            "--seed" | "-s" => {
                let seed = args.get(i + 1).ok_or("--seed needs a number")?;
                cli.seed = Some(
                    seed.parse()
                        .map_err(|_| format!("Invalid seed: {}", seed))?,
                );
                i += 1;
            }
            other => cli.command.push(other.to_string()),
        }
        i += 1;
    }

    if cli.command.is_empty() {
        return Err("No command given.".to_string());
    }
    Ok(cli)
}

fn run(cli: Cli) -> Result<(), EngineError> {
    let store = match &cli.store {
        Some(path) => JsonFileStore::open(path)?,
        None => JsonFileStore::open_default()?,
    };
    let engine = Engine::with_config(store, BalanceConfig::from_env());
    let words: Vec<&str> = cli.command.iter().map(String::as_str).collect();

    match words.as_slice() {
        ["opponents"] => print_json(&engine.list_opponents()?),
        ["preview", user, opponent] => {
            print_json(&engine.preview(&UserId::from(*user), opponent, cli.seed)?)
        }
        ["preview", opponent] => print_json(&engine.preview_open(opponent, cli.seed)?),
        ["fight", user, opponent] => {
            print_json(&engine.fight(&UserId::from(*user), opponent, cli.seed)?)
        }
        ["select-class", user, class] => {
            print_json(&engine.select_class(&UserId::from(*user), class)?)
        }
        ["complete", user, quest] => {
            let quest_id = parse_quest_id(quest);
            let changed = engine.complete_quest(&UserId::from(*user), quest_id, Utc::now())?;
            print_json(&serde_json::json!({ "questId": quest_id, "changed": changed }))
        }
        ["claim", user, quest] => {
            let quest_id = parse_quest_id(quest);
            print_json(&engine.claim_quest(&UserId::from(*user), quest_id, Utc::now())?)
        }
        ["completed", user] => print_json(&engine.list_completed_quests(&UserId::from(*user))?),
        ["quests"] => print_json(&engine.list_quests(None)?),
        ["quests", kind] => print_json(&engine.list_quests(Some(*kind))?),
        ["daily"] => print_json(&engine.select_daily_quests(Utc::now().date_naive())?),
        ["daily", date] => match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(date) => print_json(&engine.select_daily_quests(date)?),
            Err(_) => {
                eprintln!("Invalid date: {} (expected YYYY-MM-DD)", date);
                std::process::exit(2);
            }
        },
        _ => {
            eprintln!("Unknown command: {}", cli.command.join(" "));
            eprintln!("Run 'skirmish --help' for usage.");
            std::process::exit(2);
        }
    }
}

fn parse_quest_id(raw: &str) -> u32 {
    match raw.parse() {
        Ok(id) => id,
        Err(_) => {
            eprintln!("Invalid quest id: {}", raw);
            std::process::exit(2);
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), EngineError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_help() {
    println!("Skirmish - combat simulation and reward settlement\n");
    println!("Usage: skirmish [--store <path>] [--seed <n>] <command>\n");
    println!("Commands:");
    println!("  opponents                   List opponents by level");
    println!("  preview [user] <opponent>   Win rate and combat numbers");
    println!("  fight <user> <opponent>     Fight and settle the reward");
    println!("  select-class <user> <class> Create a character (Mage, Tanker, Fighter, Assassin, Archer)");
    println!("  complete <user> <quest>     Mark a quest completed now");
    println!("  claim <user> <quest>        Claim a completed quest's reward");
    println!("  completed <user>            List the user's completed quests");
    println!("  quests [type]               List catalog quests, optionally by type");
    println!("  daily [YYYY-MM-DD]          Daily quest rotation (default: today, UTC)");
    println!();
    println!("Options:");
    println!("  --store <path>  Store file (default: ~/.skirmish/store.json)");
    println!("  --seed <n>      Seed the fight RNG for a reproducible run");
    println!("  --version       Show version information");
    println!("  --help          Show this help message");
    println!();
    println!("Balance knobs are read from DEFENSE_REDUCTION, SPEED_EVADE_COEF,");
    println!("SPEED_EVADE_CAP, MAX_EVADE, BATTLE_SAMPLES, EXP_PER_LEVEL and TURN_LIMIT.");
    println!("Set RUST_LOG=info for logs on stderr.");
}
