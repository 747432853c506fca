//! Coin Rush headless runner
//!
//! Runs a session under the autopilot at the fixed tick rate and logs what
//! happens. Rendering and keyboard input belong to the host front-end.
//!
//! Usage: coin-rush [--settings PATH] [--seconds N] [--dump]

use std::path::PathBuf;

use coin_rush::Settings;
use coin_rush::consts::{SIM_DT, TICK_RATE};
use coin_rush::sim::{GameEvent, GameState, autopilot_input, tick};

/// Command line options
struct Options {
    settings: Option<PathBuf>,
    seconds: u32,
    dump: bool,
}

impl Options {
    fn parse() -> Self {
        let mut options = Options {
            settings: None,
            seconds: 60,
            dump: false,
        };
        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--settings" => options.settings = args.next().map(PathBuf::from),
                "--seconds" => match args.next().and_then(|s| s.parse().ok()) {
                    Some(seconds) => options.seconds = seconds,
                    None => log::warn!("--seconds expects a whole number, keeping {}", options.seconds),
                },
                "--dump" => options.dump = true,
                other => log::warn!("Ignoring unknown argument {}", other),
            }
        }
        options
    }
}

fn main() {
    env_logger::init();
    log::info!("Coin Rush (headless) starting...");

    let options = Options::parse();
    let settings = match &options.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    log::info!(
        "{} player(s), seed {}, {} simulated seconds",
        settings.player_count(),
        settings.seed,
        options.seconds
    );

    let mut state = GameState::new(&settings, 0.0);
    let total_ticks = options.seconds as u64 * TICK_RATE as u64;
    let mut now = 0.0;

    for step in 0..total_ticks {
        now = step as f64 * SIM_DT;
        let input = autopilot_input(&state);
        tick(&mut state, now, &input);

        for event in &state.events {
            match event {
                GameEvent::PowerUpCollected(kind) => log::info!("[{:6.2}s] {} collected", now, kind),
                GameEvent::EffectExpired(kind) => log::info!("[{:6.2}s] {} expired", now, kind),
                GameEvent::RoundReset { final_score } => {
                    log::info!("[{:6.2}s] Round reset after scoring {}", now, final_score)
                }
                _ => {}
            }
        }

        if (step + 1) % TICK_RATE as u64 == 0 {
            log::debug!(
                "[{:6.2}s] score {} level {} best {} (coins {}, power-ups {}, platforms {})",
                now,
                state.score,
                state.level,
                state.best_score,
                state.coins.len(),
                state.power_ups.len(),
                state.platforms.len()
            );
        }
    }

    log::info!(
        "Finished: score {}, level {}, best {}, {} round(s) logged",
        state.score,
        state.level,
        state.best_score,
        state.history.len()
    );
    for round in state.history.iter() {
        log::info!("  {:6.1}s: {} coins (level {})", round.ended_at, round.score, round.level);
    }

    if options.dump {
        match serde_json::to_string_pretty(&state.snapshot(now)) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Could not serialize snapshot: {}", e),
        }
    }
}
