//! Turn-based fight resolution.
//!
//! Two modes share one turn loop:
//!
//! 1. **Silent** (`simulate_outcome()`, `hero_wins()`) - no log retained,
//!    used by the win-rate estimator.
//! 2. **Logged** (`resolve_logged()`) - full `CombatEvent` sequence, used for
//!    a real fight.
//!
//! The mode only decides what happens to each event, so estimator
//! statistics always describe the fights players actually get.

use super::types::{CombatEvent, FightResult, Outcome, Side, StatProfile};
use crate::core::combat_math::{bernoulli, roll_strike};
use crate::core::config::BalanceConfig;
use rand::Rng;
use tracing::warn;

/// Receives each turn as it resolves.
trait TurnObserver {
    fn observe(&mut self, event: CombatEvent);
}

/// Silent mode: drop every event.
impl TurnObserver for () {
    fn observe(&mut self, _event: CombatEvent) {}
}

impl TurnObserver for Vec<CombatEvent> {
    fn observe(&mut self, event: CombatEvent) {
        self.push(event);
    }
}

/// Final state of a fight, before any log is attached.
#[derive(Debug, Clone, Copy)]
struct FightEnd {
    outcome: Outcome,
    hero_hp: f64,
    opponent_hp: f64,
    turns: u32,
}

/// Who acts first: the faster side, or a coin flip on equal speed.
pub fn first_actor(hero: &StatProfile, opponent: &StatProfile, rng: &mut impl Rng) -> Side {
    if hero.speed > opponent.speed {
        Side::Hero
    } else if hero.speed < opponent.speed {
        Side::Opponent
    } else if bernoulli(0.5, rng) {
        Side::Hero
    } else {
        Side::Opponent
    }
}

fn run_fight(
    hero: &StatProfile,
    opponent: &StatProfile,
    config: &BalanceConfig,
    rng: &mut impl Rng,
    observer: &mut impl TurnObserver,
) -> FightEnd {
    let mut hero_hp = hero.hp;
    let mut opponent_hp = opponent.hp;
    let mut actor = first_actor(hero, opponent, rng);
    let mut turns = 0u32;

    while hero_hp > 0.0 && opponent_hp > 0.0 && turns < config.turn_limit {
        turns += 1;

        let (attacker, defender) = match actor {
            Side::Hero => (hero, opponent),
            Side::Opponent => (opponent, hero),
        };
        let strike = roll_strike(attacker, defender, config, rng);

        let (actor_hp, defender_hp) = match actor {
            Side::Hero => (hero_hp, &mut opponent_hp),
            Side::Opponent => (opponent_hp, &mut hero_hp),
        };
        *defender_hp -= f64::from(strike.damage);

        observer.observe(CombatEvent {
            turn: turns,
            actor,
            target: actor.opposite(),
            evasion_chance: strike.evade_chance,
            evaded: strike.evaded,
            crit: strike.crit,
            damage: strike.damage,
            actor_hp_remaining: actor_hp.max(0.0),
            defender_hp_remaining: (*defender_hp).max(0.0),
        });

        actor = actor.opposite();
    }

    let outcome = if hero_hp > 0.0 && opponent_hp <= 0.0 {
        Outcome::HeroWon
    } else if hero_hp <= 0.0 {
        Outcome::OpponentWon
    } else {
        Outcome::Stalemate
    };

    FightEnd {
        outcome,
        hero_hp: hero_hp.max(0.0),
        opponent_hp: opponent_hp.max(0.0),
        turns,
    }
}

/// Silent fight, outcome only.
pub fn simulate_outcome(
    hero: &StatProfile,
    opponent: &StatProfile,
    config: &BalanceConfig,
    rng: &mut impl Rng,
) -> Outcome {
    run_fight(hero, opponent, config, rng, &mut ()).outcome
}

/// Silent fight: did the hero win? A stalemate is not a win.
pub fn hero_wins(
    hero: &StatProfile,
    opponent: &StatProfile,
    config: &BalanceConfig,
    rng: &mut impl Rng,
) -> bool {
    simulate_outcome(hero, opponent, config, rng) == Outcome::HeroWon
}

/// Logged fight with the full turn-by-turn record.
pub fn resolve_logged(
    hero: &StatProfile,
    opponent: &StatProfile,
    config: &BalanceConfig,
    rng: &mut impl Rng,
) -> FightResult {
    let mut log = Vec::new();
    let end = run_fight(hero, opponent, config, rng, &mut log);

    if end.outcome == Outcome::Stalemate {
        warn!(
            turns = end.turns,
            hero_hp = end.hero_hp,
            opponent_hp = end.opponent_hp,
            "fight hit the turn limit with both sides standing"
        );
    }

    FightResult {
        outcome: end.outcome,
        hero_hp_remaining: end.hero_hp,
        opponent_hp_remaining: end.opponent_hp,
        turns: end.turns,
        log,
        rewards_granted: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn hero() -> StatProfile {
        StatProfile {
            hp: 100.0,
            attack: 10.0,
            defense: 3.0,
            speed: 2.0,
            crit_chance: 0.1,
            crit_mult: 1.5,
            evade: 0.05,
        }
    }

    fn slime() -> StatProfile {
        StatProfile {
            hp: 50.0,
            attack: 5.0,
            defense: 2.0,
            speed: 1.0,
            crit_chance: 0.05,
            crit_mult: 1.5,
            evade: 0.02,
        }
    }

    #[test]
    fn test_faster_side_acts_first() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(first_actor(&hero(), &slime(), &mut rng), Side::Hero);
        assert_eq!(first_actor(&slime(), &hero(), &mut rng), Side::Opponent);
    }

    #[test]
    fn test_equal_speed_coin_flip_hits_both_sides() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let a = hero();
        let mut hero_first = 0;
        for _ in 0..200 {
            if first_actor(&a, &a, &mut rng) == Side::Hero {
                hero_first += 1;
            }
        }
        assert!(hero_first > 50 && hero_first < 150, "hero_first = {}", hero_first);
    }

    #[test]
    fn test_logged_fight_is_consistent() {
        let config = BalanceConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let result = resolve_logged(&hero(), &slime(), &config, &mut rng);

        assert_eq!(result.turns as usize, result.log.len());
        assert_eq!(result.log[0].actor, Side::Hero);
        for (i, event) in result.log.iter().enumerate() {
            assert_eq!(event.turn as usize, i + 1);
            assert_eq!(event.target, event.actor.opposite());
            if event.evaded {
                assert_eq!(event.damage, 0);
                assert!(!event.crit);
            } else {
                assert!(event.damage >= 1);
            }
            if i > 0 {
                assert_ne!(event.actor, result.log[i - 1].actor);
            }
        }

        let last = result.log.last().unwrap();
        assert_eq!(last.hero_hp(), result.hero_hp_remaining);
        assert_eq!(last.opponent_hp(), result.opponent_hp_remaining);
    }

    #[test]
    fn test_same_seed_same_fight() {
        let config = BalanceConfig::default();
        let a = resolve_logged(&hero(), &slime(), &config, &mut ChaCha8Rng::seed_from_u64(9));
        let b = resolve_logged(&hero(), &slime(), &config, &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_silent_and_logged_agree_for_same_seed() {
        let config = BalanceConfig::default();
        for seed in 0..20 {
            let logged =
                resolve_logged(&hero(), &slime(), &config, &mut ChaCha8Rng::seed_from_u64(seed));
            let silent =
                simulate_outcome(&hero(), &slime(), &config, &mut ChaCha8Rng::seed_from_u64(seed));
            assert_eq!(logged.outcome, silent);
        }
    }

    #[test]
    fn test_turn_limit_is_a_stalemate() {
        let config = BalanceConfig {
            turn_limit: 10,
            ..Default::default()
        };
        let wall = StatProfile {
            hp: 1_000_000.0,
            ..slime()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let result = resolve_logged(
            &StatProfile {
                hp: 1_000_000.0,
                ..hero()
            },
            &wall,
            &config,
            &mut rng,
        );
        assert_eq!(result.outcome, Outcome::Stalemate);
        assert_eq!(result.turns, 10);
        assert_eq!(result.winner(), None);
        assert!(!hero_wins(
            &StatProfile {
                hp: 1_000_000.0,
                ..hero()
            },
            &wall,
            &config,
            &mut rng
        ));
    }

    #[test]
    fn test_dead_on_arrival() {
        let config = BalanceConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let dead_hero = StatProfile { hp: 0.0, ..hero() };
        let result = resolve_logged(&dead_hero, &slime(), &config, &mut rng);
        assert_eq!(result.outcome, Outcome::OpponentWon);
        assert_eq!(result.turns, 0);
        assert!(result.log.is_empty());
    }
}
