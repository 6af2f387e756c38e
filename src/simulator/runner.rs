//! Main simulation runner driving the real `GameEngine`.
//!
//! Each session gets its own engine, seeded RNG and manual clock. The clock
//! advances by the engine's own timer interval before every tick, so moving
//! walls and level time behave as they would in a real-time session.

use std::sync::Arc;

use serde::Serialize;

use super::autopilot::choose_direction;
use super::config::SimConfig;
use super::report::SimReport;
use crate::core::{ManualClock, RngSource};
use crate::engine::GameEngine;
use crate::levels::{Level, LevelManager, LevelStore, MemoryLevelStore};

/// How one autopiloted session ended.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub level_id: String,
    pub won: bool,
    pub died: bool,
    pub timed_out: bool,
    pub ticks: u64,
    pub score: u32,
    pub final_length: usize,
    /// Seconds of level time, as the per-second ticker counted them.
    pub level_time: u32,
    pub food_collected: u32,
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    run_simulation_with(config, MemoryLevelStore::new())
}

/// Same as [`run_simulation`], with levels taken from `store`.
pub fn run_simulation_with<S: LevelStore>(config: &SimConfig, store: S) -> SimReport {
    let manager = LevelManager::new(store);
    let levels = selected_levels(&manager, config);
    let mut all_runs = Vec::with_capacity(levels.len() * config.runs_per_level as usize);

    for (level_idx, level) in levels.iter().enumerate() {
        for run_idx in 0..config.runs_per_level {
            let seed = config
                .seed
                .map(|s| s.wrapping_add(level_idx as u64 * 100_000 + run_idx as u64));
            let stats = simulate_single_run(&manager, level.clone(), config.max_ticks_per_run, seed);

            if config.verbosity >= 2 {
                println!(
                    "{} run {}/{} - {} score {}, length {}, {} ticks, {}s",
                    level.name,
                    run_idx + 1,
                    config.runs_per_level,
                    outcome_label(&stats),
                    stats.score,
                    stats.final_length,
                    stats.ticks,
                    stats.level_time
                );
            }
            all_runs.push(stats);
        }
    }

    SimReport::from_runs(&levels, all_runs)
}

fn selected_levels<S: LevelStore>(manager: &LevelManager<S>, config: &SimConfig) -> Vec<Arc<Level>> {
    if config.level_ids.is_empty() {
        return manager.preset_levels().to_vec();
    }
    config
        .level_ids
        .iter()
        .filter_map(|id| {
            let level = manager.find_level(id);
            if level.is_none() {
                tracing::warn!(level_id = %id, "unknown level, skipping");
            }
            level
        })
        .collect()
}

/// Plays one session of `level` until victory, death or the tick cap.
pub fn simulate_single_run<S: LevelStore>(
    manager: &LevelManager<S>,
    level: Arc<Level>,
    max_ticks: u64,
    seed: Option<u64>,
) -> RunStats {
    let random = match seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    };
    let clock = ManualClock::new(0);
    let mut engine = GameEngine::new(Box::new(random), Box::new(clock.clone()));

    engine.set_level(level.clone());
    engine.initialize();
    engine.start_game();

    let mut ticks = 0;
    let mut pending_ms = 0i64;
    let mut won = false;

    while ticks < max_ticks {
        let interval = engine.timer_interval() as i64;
        clock.advance(interval);
        pending_ms += interval;

        engine.try_change_direction(choose_direction(&engine));
        engine.move_snake();
        engine.check_collisions();
        engine.update_dynamic_obstacles();
        ticks += 1;

        while pending_ms >= 1000 {
            engine.update_level_time();
            pending_ms -= 1000;
        }

        if engine.state().is_game_over {
            break;
        }
        if manager.check_victory_condition(engine.state()) {
            won = true;
            break;
        }
    }

    let state = engine.state();
    tracing::debug!(level_id = %level.id, won, ticks, score = state.score, "run finished");

    RunStats {
        level_id: level.id.clone(),
        won,
        died: state.is_game_over,
        timed_out: !won && !state.is_game_over,
        ticks,
        score: state.score,
        final_length: state.snake_length(),
        level_time: state.level_time,
        food_collected: state.food_collected,
    }
}

fn outcome_label(stats: &RunStats) -> &'static str {
    if stats.won {
        "won"
    } else if stats.died {
        "died"
    } else {
        "timed out"
    }
}
