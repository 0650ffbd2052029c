//! Physics Lab headless demo
//!
//! Runs the arcade quiz-shooter against the wall clock with a scripted
//! autopilot and logs the result.
//!
//! Usage: `physics-lab [settings.json] [--seed N]`

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use physics_lab::platform::{Clock, SystemClock};
use physics_lab::quiz::arcade_questions;
use physics_lab::sim::GamePhase;
use physics_lab::{GameLoop, Settings};

/// Default bound on simulated frames (about a minute at 60 Hz)
const MAX_FRAMES: u32 = 3_600;
/// Frames between autopilot shots
const SHOT_INTERVAL: u32 = 12;
/// Chance the autopilot picks the right answer
const QUIZ_ACCURACY: f64 = 0.75;

#[derive(Parser, Debug)]
#[command(name = "physics-lab")]
#[command(about = "Headless run of the physics lab quiz shooter with a scripted autopilot")]
struct Args {
    /// Settings JSON file (preferences plus a `tuning` block)
    settings: Option<PathBuf>,
    /// RNG seed; defaults to the current time
    #[arg(long)]
    seed: Option<u64>,
    /// Upper bound on simulated frames
    #[arg(long, default_value_t = MAX_FRAMES)]
    max_frames: u32,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    log::info!("Physics Lab (headless) starting...");

    let settings = match &args.settings {
        Some(path) => Settings::load_file(path),
        None => Settings::default(),
    };
    let seed = args.seed.unwrap_or_else(time_seed);
    log::info!("Game initialized with seed: {}", seed);

    let mut game = GameLoop::new(
        SystemClock::new(),
        settings.tuning.clone(),
        arcade_questions(),
        seed,
    );
    let mut pilot = Pcg32::seed_from_u64(seed.wrapping_add(1));
    let frame = Duration::from_secs_f64(f64::from(settings.tuning.frame_ms) / 1000.0);

    game.mount();
    for frame_index in 0..args.max_frames {
        if game.phase() == GamePhase::GameOver {
            break;
        }
        steer(&mut game);
        if frame_index % SHOT_INTERVAL == 0 {
            game.shoot();
        }
        answer_quiz(&mut game, &mut pilot);
        game.on_frame();
        thread::sleep(frame);
    }
    game.teardown();

    let session = game.session();
    match game.summary() {
        Some(summary) => log::info!(
            "Game over: score {}, {} questions answered",
            summary.score,
            summary.questions_answered
        ),
        None => log::info!(
            "Stopped after {:.1}s: score {}, lives {}, {} questions answered",
            game.clock().now_ms() / 1000.0,
            session.score,
            session.lives,
            session.questions_answered
        ),
    }
}

/// Chase the lowest asteroid
fn steer<C: Clock>(game: &mut GameLoop<C>) {
    let player = game.state().player.rect;
    let target = game
        .state()
        .asteroids
        .iter()
        .max_by(|a, b| a.rect.y.total_cmp(&b.rect.y))
        .map(|a| a.rect.center().x);

    game.release_left();
    game.release_right();
    if let Some(x) = target {
        let center = player.center().x;
        if x < center - 4.0 {
            game.press_left();
        } else if x > center + 4.0 {
            game.press_right();
        }
    }
}

fn answer_quiz<C: Clock>(game: &mut GameLoop<C>, rng: &mut Pcg32) {
    if game.quiz().verdict().is_some() {
        return;
    }
    let Some((_, question)) = game.quiz().current() else {
        return;
    };
    let correct = question.correct;
    let option = if rng.random_bool(QUIZ_ACCURACY) {
        correct
    } else {
        (correct + rng.random_range(1..4)) % 4
    };
    game.choose_answer(option);
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
