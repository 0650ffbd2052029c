//! Frame-driven game loop
//!
//! The host calls [`GameLoop::on_frame`] from its display refresh callback.
//! While the game is `Running` a simulation tick is scheduled for every
//! frame; while `Paused` or `GameOver` only deferred timers are serviced.
//! Time comes from an injected [`Clock`], so tests can drive the loop with a
//! [`crate::platform::ManualClock`].

use serde::Serialize;

use crate::platform::{Clock, TimerQueue};
use crate::quiz::{Question, QuizController, Resolution, Verdict};
use crate::sim::{GameEvent, GamePhase, GameState, Rect, SessionStats, TickInput, tick};
use crate::tuning::Tuning;

/// Deferred work owned by the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopTimer {
    /// Close the quiz after its feedback has been shown
    QuizFeedback { generation: u64 },
}

/// Final numbers shown on the game over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub score: u32,
    pub questions_answered: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackView {
    pub correct: bool,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizView {
    pub prompt: String,
    pub options: Vec<String>,
    pub feedback: Option<FeedbackView>,
}

/// Everything the presentation layer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub render_epoch: u64,
    pub phase: GamePhase,
    pub session: SessionStats,
    pub player: Rect,
    pub bullets: Vec<Rect>,
    pub asteroids: Vec<Rect>,
    pub quiz: Option<QuizView>,
}

/// Game instance holding all state
pub struct GameLoop<C: Clock> {
    clock: C,
    state: GameState,
    quiz: QuizController,
    input: TickInput,
    timers: TimerQueue<LoopTimer>,
    frame_scheduled: bool,
    last_frame_ms: Option<f64>,
    /// Bumped on restart and teardown; timers from older generations are stale
    generation: u64,
    render_epoch: u64,
}

impl<C: Clock> GameLoop<C> {
    pub fn new(clock: C, tuning: Tuning, questions: Vec<Question>, seed: u64) -> Self {
        Self {
            clock,
            state: GameState::with_tuning(seed, tuning),
            // Separate stream so quiz draws don't shift asteroid spawns
            quiz: QuizController::new(questions, seed ^ 0x9e37_79b9_7f4a_7c15),
            input: TickInput::default(),
            timers: TimerQueue::new(),
            frame_scheduled: false,
            last_frame_ms: None,
            generation: 0,
            render_epoch: 0,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn quiz(&self) -> &QuizController {
        &self.quiz
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn session(&self) -> &SessionStats {
        &self.state.session
    }

    /// True while a simulation tick will run on the next frame
    pub fn is_frame_scheduled(&self) -> bool {
        self.frame_scheduled
    }

    /// Changes whenever the presentation layer should redraw
    pub fn render_epoch(&self) -> u64 {
        self.render_epoch
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Attach to a host view. Starts the game on first mount; on a later
    /// mount resumes scheduling with a fresh elapsed-time tracker.
    pub fn mount(&mut self) {
        if self.state.phase == GamePhase::Idle {
            self.state.phase = GamePhase::Running;
            log::info!("Game started (seed {})", self.state.seed);
        }

        // Feedback timers are dropped on teardown; re-arm a pending one
        if let Some(verdict) = self.quiz.verdict() {
            if self.timers.is_empty() {
                self.schedule_feedback(verdict);
            }
        }

        if self.state.phase == GamePhase::Running {
            self.schedule_frames();
        }
        self.mark_dirty();
    }

    /// Detach from the host view: cancel the pending frame and any deferred
    /// timers so nothing fires against a view that is gone.
    pub fn teardown(&mut self) {
        self.halt_frames();
        self.timers.clear();
        self.generation += 1;
        log::debug!("Game loop torn down");
    }

    /// Display refresh callback. Returns true when a redraw is needed.
    pub fn on_frame(&mut self) -> bool {
        let now = self.clock.now_ms();
        let epoch = self.render_epoch;

        self.fire_due_timers(now);

        if self.frame_scheduled {
            // First frame after (re)scheduling has no meaningful delta
            let delta = match self.last_frame_ms {
                Some(last) => (now - last).max(0.0),
                None => 0.0,
            };
            self.last_frame_ms = Some(now);

            let events = tick(&mut self.state, &self.input, delta as f32);
            self.handle_events(&events);
            self.mark_dirty();

            if self.state.phase != GamePhase::Running {
                self.halt_frames();
            }
        }

        self.render_epoch != epoch
    }

    pub fn press_left(&mut self) {
        self.input.move_left = true;
    }

    pub fn release_left(&mut self) {
        self.input.move_left = false;
    }

    pub fn press_right(&mut self) {
        self.input.move_right = true;
    }

    pub fn release_right(&mut self) {
        self.input.move_right = false;
    }

    /// Fire a bullet; ignored while paused or after game over
    pub fn shoot(&mut self) -> bool {
        let fired = self.state.shoot();
        if fired {
            self.mark_dirty();
        }
        fired
    }

    /// Answer the open quiz question and start the feedback delay
    pub fn choose_answer(&mut self, option: usize) -> Option<Verdict> {
        let verdict = self.quiz.choose(option, &mut self.state.session)?;
        self.schedule_feedback(verdict);
        self.mark_dirty();
        Some(verdict)
    }

    /// Reset everything to initial values and start running again
    pub fn restart(&mut self) {
        self.state.reset();
        self.quiz.reset();
        self.timers.clear();
        self.generation += 1;
        self.input = TickInput::default();
        self.state.phase = GamePhase::Running;
        self.halt_frames();
        self.schedule_frames();
        self.mark_dirty();
        log::info!("Game restarted");
    }

    pub fn summary(&self) -> Option<GameSummary> {
        (self.state.phase == GamePhase::GameOver).then(|| GameSummary {
            score: self.state.session.score,
            questions_answered: self.state.session.questions_answered,
        })
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        let quiz = self.quiz.current().map(|(_, q)| QuizView {
            prompt: q.prompt.clone(),
            options: q.options.to_vec(),
            feedback: self.quiz.verdict().map(|v| FeedbackView {
                correct: v == Verdict::Correct,
                message: v.message(),
            }),
        });

        RenderSnapshot {
            render_epoch: self.render_epoch,
            phase: self.state.phase,
            session: self.state.session.clone(),
            player: self.state.player.rect,
            bullets: self.state.bullets.iter().map(|b| b.rect).collect(),
            asteroids: self.state.asteroids.iter().map(|a| a.rect).collect(),
            quiz,
        }
    }

    fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::QuizTriggered { score } => {
                    if self.state.phase == GamePhase::Running && self.quiz.open().is_some() {
                        log::debug!("Quiz interruption at score {}", score);
                        self.state.phase = GamePhase::Paused;
                    }
                }
                GameEvent::GameOver { final_score } => {
                    log::info!(
                        "Final score {} with {} questions answered",
                        final_score,
                        self.state.session.questions_answered
                    );
                }
                _ => {}
            }
        }
    }

    fn fire_due_timers(&mut self, now: f64) {
        for timer in self.timers.drain_due(now) {
            match timer {
                LoopTimer::QuizFeedback { generation } => {
                    if generation != self.generation {
                        continue;
                    }
                    self.finish_quiz();
                }
            }
        }
    }

    fn finish_quiz(&mut self) {
        let Some(resolution) = self.quiz.resolve(&mut self.state.session, &self.state.tuning)
        else {
            return;
        };
        if self.state.phase != GamePhase::Paused {
            return;
        }

        match resolution {
            Resolution::Resume => {
                self.state.phase = GamePhase::Running;
                self.schedule_frames();
                log::debug!(
                    "Quiz closed, next at {}",
                    self.state.session.next_quiz_score
                );
            }
            Resolution::GameOver => {
                self.state.phase = GamePhase::GameOver;
                log::info!("Game over after quiz (score {})", self.state.session.score);
            }
        }
        self.mark_dirty();
    }

    fn schedule_feedback(&mut self, verdict: Verdict) {
        let due = self.clock.now_ms() + verdict.feedback_delay_ms(&self.state.tuning);
        self.timers.schedule(
            due,
            LoopTimer::QuizFeedback {
                generation: self.generation,
            },
        );
    }

    fn schedule_frames(&mut self) {
        if !self.frame_scheduled {
            self.frame_scheduled = true;
            self.last_frame_ms = None;
        }
    }

    fn halt_frames(&mut self) {
        self.frame_scheduled = false;
        self.last_frame_ms = None;
    }

    fn mark_dirty(&mut self) {
        self.render_epoch += 1;
    }
}
