//! Combat balance simulator CLI.
//!
//! Estimates a hero's win rate against an opponent with the same resolver
//! real fights use, and prints the numbers behind it.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                          # Default matchup, 300 fights
//!   cargo run --bin simulate -- -n 5000 --seed 42     # Reproducible large sample
//!   cargo run --bin simulate -- --foe-hp 200 --fights 3

use skirmish::combat::logic::resolve_logged;
use skirmish::combat::types::{Outcome, StatProfile};
use skirmish::core::BalanceConfig;
use skirmish::rng_for;
use skirmish::simulator::{estimate, CombatCalc, StrikeSample};
use std::env;
use tracing_subscriber::EnvFilter;

struct SimConfig {
    hero: StatProfile,
    foe: StatProfile,
    samples: u32,
    seed: Option<u64>,
    fights: u32,
    balance: BalanceConfig,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              SKIRMISH COMBAT SIMULATOR                        ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Samples:        {}", config.samples);
    println!("  Turn Limit:     {}", config.balance.turn_limit);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    print_profile("Hero", &config.hero);
    print_profile("Foe", &config.foe);
    println!();

    let mut rng = rng_for(config.seed);
    let tally = estimate(
        &config.hero,
        &config.foe,
        config.samples,
        &config.balance,
        &mut rng,
    );

    println!("Results:");
    println!("  Wins:           {}", tally.wins);
    println!("  Stalemates:     {}", tally.stalemates);
    println!("  Win Rate:       {:.1}%", tally.win_rate * 100.0);
    println!();

    let calc = CombatCalc::new(&config.hero, &config.foe, &config.balance);
    println!("Formulas:");
    println!("  {}", calc.damage_formula);
    println!("  {}", calc.evade_formula);
    println!();
    print_strike("Hero -> Foe", &calc.hero_to_opponent);
    print_strike("Foe -> Hero", &calc.opponent_to_hero);

    for n in 1..=config.fights {
        let fight = resolve_logged(&config.hero, &config.foe, &config.balance, &mut rng);
        let verdict = match fight.outcome {
            Outcome::HeroWon => "hero wins",
            Outcome::OpponentWon => "foe wins",
            Outcome::Stalemate => "stalemate",
        };
        let crits = fight.log.iter().filter(|e| e.crit).count();
        let misses = fight.log.iter().filter(|e| e.evaded).count();
        println!(
            "  Fight {:>3}: {:<10} in {:>4} turns  hero {:>6.1} hp  foe {:>6.1} hp  ({} crits, {} misses)",
            n,
            verdict,
            fight.turns,
            fight.hero_hp_remaining,
            fight.opponent_hp_remaining,
            crits,
            misses
        );
    }
}

fn print_profile(label: &str, p: &StatProfile) {
    println!(
        "  {:<5} hp {:>6.1}  atk {:>5.1}  def {:>5.1}  spd {:>5.1}  crit {:.2} x{:.2}  evade {:.2}",
        label, p.hp, p.attack, p.defense, p.speed, p.crit_chance, p.crit_mult, p.evade
    );
}

fn print_strike(label: &str, s: &StrikeSample) {
    println!(
        "  {:<12} evade {:>5.1}%  hit {:>4}  crit {:>4}",
        label,
        s.evade * 100.0,
        s.non_crit_damage,
        s.crit_damage
    );
}

/// Parse the value after a flag, keeping `current` when it is missing or bad.
fn flag_value<T: std::str::FromStr>(args: &[String], i: &mut usize, current: T) -> T {
    match args.get(*i + 1).map(|v| v.parse()) {
        Some(Ok(value)) => {
            *i += 1;
            value
        }
        _ => current,
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig {
        hero: StatProfile::HERO_DEFAULTS,
        foe: StatProfile::OPPONENT_DEFAULTS,
        samples: 0,
        seed: None,
        fights: 0,
        balance: BalanceConfig::from_env(),
    };
    config.samples = config.balance.sample_count;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-n" | "--samples" => config.samples = flag_value(args, &mut i, config.samples),
            "-s" | "--seed" => {
                if let Some(seed) = args.get(i + 1).and_then(|v| v.parse().ok()) {
                    config.seed = Some(seed);
                    i += 1;
                }
            }
            "--fights" => config.fights = flag_value(args, &mut i, config.fights),
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {
                if let Some(stat) = flag.strip_prefix("--hero-") {
                    set_stat(&mut config.hero, stat, args, &mut i);
                } else if let Some(stat) = flag.strip_prefix("--foe-") {
                    set_stat(&mut config.foe, stat, args, &mut i);
                }
            }
        }
        i += 1;
    }

    config
}

fn set_stat(profile: &mut StatProfile, stat: &str, args: &[String], i: &mut usize) {
    let field = match stat {
        "hp" => &mut profile.hp,
        "attack" => &mut profile.attack,
        "defense" => &mut profile.defense,
        "speed" => &mut profile.speed,
        "crit" => &mut profile.crit_chance,
        "crit-mult" => &mut profile.crit_mult,
        "evade" => &mut profile.evade,
        _ => return,
    };
    *field = flag_value(args, i, *field).max(0.0);
    if stat == "crit" || stat == "evade" {
        *field = (*field).min(1.0);
    }
}

fn print_help() {
    println!("Skirmish Combat Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --samples <N>      Number of silent fights (default: BATTLE_SAMPLES or 300)");
    println!("    -s, --seed <S>         Random seed for reproducibility");
    println!("    --fights <K>           Also run and summarize K logged fights");
    println!("    --hero-<stat> <V>      Override a hero stat");
    println!("    --foe-<stat> <V>       Override a foe stat");
    println!("    -h, --help             Show this help");
    println!();
    println!("STATS:");
    println!("    hp, attack, defense, speed, crit, crit-mult, evade");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate -- --seed 42");
    println!("    cargo run --bin simulate -- --hero-attack 14 --foe-hp 120 -n 2000");
    println!("    cargo run --bin simulate -- --fights 5");
}
