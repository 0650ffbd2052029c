//! Variable-delta simulation tick
//!
//! Advances every entity by one frame, resolves collisions and runs the
//! spawn ramp. Order within a tick: player, bullets, asteroids vs player,
//! bullets vs asteroids, spawn.

use super::state::{GameEvent, GamePhase, GameState};

/// Held-direction flags read once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
}

/// Advance the game state by `delta_ms` of real time.
///
/// Does nothing unless the phase is `Running`. Returns the events produced
/// during the tick, in the order they happened.
pub fn tick(state: &mut GameState, input: &TickInput, delta_ms: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Running {
        return events;
    }

    let dt = state.tuning.frame_multiplier(delta_ms);
    state.time_ticks += 1;

    // Player: both directions may be held, in which case they cancel out
    let step = state.tuning.player_speed * dt;
    let mut dx = 0.0;
    if input.move_left {
        dx -= step;
    }
    if input.move_right {
        dx += step;
    }
    state.move_player(dx);

    // Bullets fly up and leave once fully above the field
    for bullet in &mut state.bullets {
        bullet.rect.y -= bullet.speed * dt;
    }
    state.bullets.retain(|b| b.rect.y > -b.rect.height);

    if move_asteroids(state, dt, &mut events) {
        return events;
    }

    resolve_bullet_hits(state, &mut events);

    if state.spawner.advance(dt) {
        let asteroid = state.spawn_asteroid();
        log::trace!("Spawned asteroid (delay now {:.1})", state.spawner.delay);
        events.push(GameEvent::AsteroidSpawned {
            size: asteroid.rect.width,
        });
    }

    events
}

/// Move asteroids down, dropping those past the bottom and those that hit
/// the player. Returns true if the game ended.
fn move_asteroids(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) -> bool {
    let field_height = state.tuning.field_height;
    let player = state.player.rect;
    let mut survivors = Vec::with_capacity(state.asteroids.len());

    for mut asteroid in std::mem::take(&mut state.asteroids) {
        asteroid.rect.y += asteroid.speed * dt;

        if asteroid.rect.y > field_height {
            continue;
        }

        if state.phase == GamePhase::Running && player.intersects(&asteroid.rect) {
            // The asteroid is consumed by the hit
            let dead = state.lose_life();
            events.push(GameEvent::PlayerHit {
                lives_left: state.session.lives,
            });
            if dead {
                state.phase = GamePhase::GameOver;
                log::info!("Game over (score {})", state.session.score);
                events.push(GameEvent::GameOver {
                    final_score: state.session.score,
                });
            }
            continue;
        }

        survivors.push(asteroid);
    }

    state.asteroids = survivors;
    state.phase == GamePhase::GameOver
}

/// Scan bullets and asteroids from the back. A bullet destroys at most one
/// asteroid, the first found in scan order.
fn resolve_bullet_hits(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let mut quiz_triggered = false;

    for bi in (0..state.bullets.len()).rev() {
        let bullet = state.bullets[bi].rect;
        let Some(ai) = state
            .asteroids
            .iter()
            .rposition(|a| bullet.intersects(&a.rect))
        else {
            continue;
        };

        state.bullets.remove(bi);
        state.asteroids.remove(ai);

        let session = &mut state.session;
        session.score += state.tuning.score_per_asteroid;
        events.push(GameEvent::AsteroidDestroyed {
            score: session.score,
        });

        // A pending quiz already covers any further threshold crossings
        if !quiz_triggered && session.score >= session.next_quiz_score {
            quiz_triggered = true;
            events.push(GameEvent::QuizTriggered {
                score: session.score,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Rect;
    use crate::sim::state::{Asteroid, Bullet};
    use proptest::prelude::*;

    const FRAME: f32 = 16.67;

    fn running_state() -> GameState {
        let mut state = GameState::new(12345);
        state.phase = GamePhase::Running;
        // Keep the spawner quiet unless a test wants it
        state.spawner.delay = f32::MAX;
        state
    }

    #[test]
    fn test_unchecked_tuning_does_not_panic() {
        let mut state = running_state();
        state.tuning.max_frame_multiplier = -1.0;
        tick(&mut state, &TickInput::default(), FRAME);

        state.tuning.max_frame_multiplier = f32::NAN;
        state.tuning.frame_ms = 0.0;
        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.phase, GamePhase::Running);
    }

    fn asteroid_at(x: f32, y: f32, size: f32, speed: f32) -> Asteroid {
        Asteroid {
            rect: Rect::new(x, y, size, size),
            speed,
        }
    }

    fn bullet_at(x: f32, y: f32) -> Bullet {
        Bullet {
            rect: Rect::new(x, y, 4.0, 16.0),
            speed: 8.0,
        }
    }

    #[test]
    fn test_tick_ignored_unless_running() {
        let mut state = GameState::new(1);
        state.asteroids.push(asteroid_at(100.0, 100.0, 40.0, 3.0));
        for phase in [GamePhase::Idle, GamePhase::Paused, GamePhase::GameOver] {
            state.phase = phase;
            let events = tick(&mut state, &TickInput::default(), FRAME);
            assert!(events.is_empty());
            assert_eq!(state.asteroids[0].rect.y, 100.0);
        }
    }

    #[test]
    fn test_player_moves_and_cancels() {
        let mut state = running_state();
        let left = TickInput {
            move_left: true,
            ..Default::default()
        };
        tick(&mut state, &left, FRAME);
        assert!((state.player.rect.x - 369.0).abs() < 1e-3);

        let both = TickInput {
            move_left: true,
            move_right: true,
        };
        tick(&mut state, &both, FRAME);
        assert!((state.player.rect.x - 369.0).abs() < 1e-3);
    }

    #[test]
    fn test_stall_is_capped() {
        let mut state = running_state();
        let right = TickInput {
            move_right: true,
            ..Default::default()
        };
        tick(&mut state, &right, 5_000.0);
        // 6 * 2.2
        assert!((state.player.rect.x - (375.0 + 13.2)).abs() < 1e-3);
    }

    #[test]
    fn test_bullet_leaves_field() {
        let mut state = running_state();
        state.bullets.push(bullet_at(100.0, 0.0));
        // After one frame: y = -8, still partially visible
        tick(&mut state, &TickInput::default(), FRAME);
        assert_eq!(state.bullets.len(), 1);
        // After two frames: y = -16 == -height, gone
        tick(&mut state, &TickInput::default(), FRAME);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_asteroid_leaves_bottom() {
        let mut state = running_state();
        state.asteroids.push(asteroid_at(0.0, 598.0, 30.0, 3.0));
        tick(&mut state, &TickInput::default(), FRAME);
        assert!(state.asteroids.is_empty());
        assert_eq!(state.session.lives, 3);
    }

    #[test]
    fn test_player_hits_and_game_over() {
        let mut state = running_state();
        let p = state.player.rect;

        for expected_lives in [2u8, 1] {
            state.asteroids.push(asteroid_at(p.x, p.y - 5.0, 40.0, 2.0));
            let events = tick(&mut state, &TickInput::default(), FRAME);
            assert!(events.contains(&GameEvent::PlayerHit {
                lives_left: expected_lives
            }));
            assert_eq!(state.session.lives, expected_lives);
            assert_eq!(state.phase, GamePhase::Running);
            assert!(state.asteroids.is_empty(), "asteroid is consumed by the hit");
        }

        state.asteroids.push(asteroid_at(p.x, p.y - 5.0, 40.0, 2.0));
        let events = tick(&mut state, &TickInput::default(), FRAME);
        assert_eq!(state.session.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(events.contains(&GameEvent::GameOver { final_score: 0 }));
    }

    #[test]
    fn test_bullet_destroys_asteroid_and_scores() {
        let mut state = running_state();
        state.asteroids.push(asteroid_at(90.0, 100.0, 40.0, 2.0));
        state.bullets.push(bullet_at(100.0, 140.0));
        let events = tick(&mut state, &TickInput::default(), FRAME);
        assert!(state.asteroids.is_empty());
        assert!(state.bullets.is_empty());
        assert_eq!(state.session.score, 10);
        assert_eq!(events, vec![GameEvent::AsteroidDestroyed { score: 10 }]);
    }

    #[test]
    fn test_bullet_destroys_at_most_one_asteroid() {
        let mut state = running_state();
        // Two overlapping asteroids under one bullet
        state.asteroids.push(asteroid_at(90.0, 100.0, 40.0, 2.0));
        state.asteroids.push(asteroid_at(95.0, 105.0, 40.0, 2.0));
        state.bullets.push(bullet_at(100.0, 140.0));
        tick(&mut state, &TickInput::default(), FRAME);
        assert_eq!(state.asteroids.len(), 1);
        // Scan runs from the back, so the later asteroid goes first
        assert_eq!(state.asteroids[0].rect.x, 90.0);
        assert_eq!(state.session.score, 10);
    }

    #[test]
    fn test_two_bullets_two_asteroids() {
        let mut state = running_state();
        state.asteroids.push(asteroid_at(90.0, 100.0, 40.0, 2.0));
        state.asteroids.push(asteroid_at(400.0, 100.0, 40.0, 2.0));
        state.bullets.push(bullet_at(100.0, 140.0));
        state.bullets.push(bullet_at(410.0, 140.0));
        state.bullets.push(bullet_at(700.0, 300.0));
        tick(&mut state, &TickInput::default(), FRAME);
        assert!(state.asteroids.is_empty());
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].rect.x, 700.0);
        assert_eq!(state.session.score, 20);
    }

    #[test]
    fn test_quiz_triggers_once_at_threshold() {
        let mut state = running_state();
        let mut quiz_ticks = Vec::new();

        for kill in 1..=5u32 {
            state.asteroids.push(asteroid_at(90.0, 100.0, 40.0, 0.0));
            state.bullets.push(bullet_at(100.0, 140.0));
            let events = tick(&mut state, &TickInput::default(), FRAME);
            assert_eq!(state.session.score, kill * 10);
            if events
                .iter()
                .any(|e| matches!(e, GameEvent::QuizTriggered { .. }))
            {
                quiz_ticks.push(kill);
            }
        }

        assert_eq!(quiz_ticks, vec![5]);
    }

    #[test]
    fn test_one_quiz_per_tick() {
        let mut state = running_state();
        state.session.score = 40;
        state.asteroids.push(asteroid_at(90.0, 100.0, 40.0, 0.0));
        state.asteroids.push(asteroid_at(400.0, 100.0, 40.0, 0.0));
        state.bullets.push(bullet_at(100.0, 140.0));
        state.bullets.push(bullet_at(410.0, 140.0));
        let events = tick(&mut state, &TickInput::default(), FRAME);
        let quizzes = events
            .iter()
            .filter(|e| matches!(e, GameEvent::QuizTriggered { .. }))
            .count();
        assert_eq!(quizzes, 1);
        assert_eq!(state.session.score, 60);
    }

    #[test]
    fn test_spawn_ramp() {
        let mut state = GameState::new(5);
        state.phase = GamePhase::Running;
        let mut spawned = 0;
        for _ in 0..61 {
            let events = tick(&mut state, &TickInput::default(), FRAME);
            spawned += events
                .iter()
                .filter(|e| matches!(e, GameEvent::AsteroidSpawned { .. }))
                .count();
        }
        assert_eq!(spawned, 1);
        assert_eq!(state.asteroids.len(), 1);
        assert_eq!(state.spawner.delay, 59.5);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999);
        let mut b = GameState::new(99999);
        a.phase = GamePhase::Running;
        b.phase = GamePhase::Running;
        let input = TickInput {
            move_left: true,
            ..Default::default()
        };
        for i in 0..600 {
            if i % 20 == 0 {
                a.shoot();
                b.shoot();
            }
            assert_eq!(
                tick(&mut a, &input, FRAME),
                tick(&mut b, &input, FRAME)
            );
        }
        assert_eq!(a.asteroids, b.asteroids);
        assert_eq!(a.session, b.session);
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            steps in prop::collection::vec((any::<bool>(), any::<bool>(), 0.0f32..200.0), 1..300)
        ) {
            let mut state = running_state();
            for (move_left, move_right, delta) in steps {
                tick(&mut state, &TickInput { move_left, move_right }, delta);
                let x = state.player.rect.x;
                prop_assert!((0.0..=750.0).contains(&x));
                if state.phase != GamePhase::Running {
                    break;
                }
            }
        }

        #[test]
        fn prop_bullet_gone_once_past_top(y0 in 0.0f32..600.0) {
            let mut state = running_state();
            state.bullets.push(bullet_at(10.0, y0));
            let mut elapsed_frames = 0.0f32;
            while elapsed_frames < 200.0 {
                tick(&mut state, &TickInput::default(), FRAME);
                elapsed_frames += 1.0;
                if y0 - 8.0 * elapsed_frames <= -16.0 - 0.01 {
                    prop_assert!(state.bullets.is_empty());
                    break;
                }
            }
        }
    }
}
