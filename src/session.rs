//! Game session controller
//!
//! Owns one run at a time and everything around it: the frame loop (through
//! the injected scheduler), held keys, pause, restart, the high score, word
//! pronunciation and UI notifications.
//!
//! Lifecycle: `NotStarted → Running ⇄ Paused → GameOver`, and `restart()`
//! from anywhere back to `Running` with a fresh field. The endless variant
//! starts on `start()`; the phoneme variant waits for the first key so the
//! first word is pronounced in response to a user gesture.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::*;
use crate::corpus::{Corpus, PhonemeSet};
use crate::error::SessionError;
use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::platform::{FrameId, FrameScheduler, Speech};
use crate::renderer::{self, DrawCommand, Scene};
use crate::settings::{GameConfig, Variant};
use crate::sim::{GameEvent, GameOverReason, GamePhase, GameState, TickInput, tick};

/// How to build a session
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub config: GameConfig,
    /// Seed for the first run; later runs derive theirs from it. Random when
    /// not given.
    pub seed: Option<u64>,
    /// Phoneme pair label (e.g. "С-Ш"); a random pair when not given
    pub pair: Option<String>,
}

impl SessionOptions {
    pub fn new(variant: Variant) -> Self {
        Self {
            config: GameConfig::for_variant(variant),
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_pair(mut self, pair: impl Into<String>) -> Self {
        self.pair = Some(pair.into());
        self
    }
}

/// Control keys the session understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Pause,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            "Escape" => Some(Key::Pause),
            _ => None,
        }
    }
}

/// Cold UI state pushed to observers when it changes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UiSnapshot {
    pub variant: Variant,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: Option<u8>,
    pub high_score: u64,
    pub current_word: Option<String>,
    pub words_left: Option<usize>,
    pub pair: Option<String>,
    pub game_over_reason: Option<GameOverReason>,
}

impl UiSnapshot {
    pub fn capture(state: &GameState, high_score: u64, phonemes: Option<&PhonemeSet>) -> Self {
        Self {
            variant: state.variant(),
            phase: state.phase,
            score: state.score,
            lives: state.lives,
            high_score,
            current_word: state.current_word().map(|w| w.word.clone()),
            words_left: state.task.as_ref().map(|t| t.remaining()),
            pair: phonemes.map(|p| p.pair.clone()),
            game_over_reason: state.game_over_reason,
        }
    }
}

type Observer = Box<dyn FnMut(&UiSnapshot)>;
type CompletionHandler = Box<dyn FnMut(u64)>;

/// One game session
pub struct Session {
    state: GameState,
    config: GameConfig,
    phonemes: Option<PhonemeSet>,
    /// Derives per-run seeds
    seeder: Pcg32,

    store: Box<dyn KeyValueStore>,
    speech: Box<dyn Speech>,
    scheduler: Box<dyn FrameScheduler>,

    high_score: HighScore,
    pending_frame: Option<FrameId>,
    input: TickInput,
    accumulator: f32,
    last_time: Option<f64>,
    started: bool,
    closed: bool,

    observers: Vec<Observer>,
    on_complete: Option<CompletionHandler>,
    completion_reported: bool,
    snapshot: UiSnapshot,
}

impl Session {
    /// Build a session. Nothing runs until `start()`.
    pub fn new(
        options: SessionOptions,
        store: Box<dyn KeyValueStore>,
        speech: Box<dyn Speech>,
        scheduler: Box<dyn FrameScheduler>,
    ) -> Result<Self, SessionError> {
        let config = options.config;
        config.validate()?;

        let seed = options.seed.unwrap_or_else(rand::random);
        let mut seeder = Pcg32::seed_from_u64(seed);

        let phonemes = match config.variant {
            Variant::Endless => None,
            Variant::Phoneme => {
                let corpus = Corpus::builtin()?;
                Some(corpus.pick(options.pair.as_deref(), &mut seeder)?.clone())
            }
        };

        let high_score = HighScore::load(store.as_ref(), config.variant);
        let state = new_run(&config, phonemes.as_ref(), &mut seeder);
        log::info!(
            "Session created: {} variant, seed {}{}",
            config.variant.as_str(),
            seed,
            phonemes
                .as_ref()
                .map(|p| format!(", pair {}", p.pair))
                .unwrap_or_default()
        );

        let snapshot = UiSnapshot::capture(&state, high_score.score, phonemes.as_ref());
        Ok(Self {
            state,
            config,
            phonemes,
            seeder,
            store,
            speech,
            scheduler,
            high_score,
            pending_frame: None,
            input: TickInput::default(),
            accumulator: 0.0,
            last_time: None,
            started: false,
            closed: false,
            observers: Vec::new(),
            on_complete: None,
            completion_reported: false,
            snapshot,
        })
    }

    /// Begin the frame loop. The endless variant starts running right away.
    pub fn start(&mut self) {
        if self.started || self.closed {
            return;
        }
        self.started = true;
        if !self.config.variant.waits_for_input() {
            self.begin_run();
        }
        self.ensure_frame();
        self.notify();
    }

    pub fn pause(&mut self) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        self.state.phase = GamePhase::Paused;
        self.input = TickInput::default();
        log::info!("Paused at score {}", self.state.score);
        self.notify();
    }

    pub fn resume(&mut self) {
        if self.state.phase != GamePhase::Paused || self.closed {
            return;
        }
        self.state.phase = GamePhase::Running;
        // Time spent paused must not turn into a burst of ticks
        self.last_time = None;
        self.accumulator = 0.0;
        log::info!("Resumed");
        self.ensure_frame();
        self.notify();
    }

    pub fn toggle_pause(&mut self) {
        match self.state.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => {}
        }
    }

    /// Throw the current run away and start a fresh one. The high score is
    /// kept; the word queue is reshuffled.
    pub fn restart(&mut self) {
        if self.closed {
            return;
        }
        self.speech.cancel();
        self.state = new_run(&self.config, self.phonemes.as_ref(), &mut self.seeder);
        self.input = TickInput::default();
        self.accumulator = 0.0;
        self.last_time = None;
        self.completion_reported = false;
        self.started = true;
        log::info!("Restarted with seed {}", self.state.seed);
        self.begin_run();
        self.ensure_frame();
        self.notify();
    }

    /// Stop for good: cancel the pending frame and go silent. Does not report
    /// completion.
    pub fn quit(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.cancel_frame();
        self.speech.cancel();
        log::info!("Session closed");
    }

    /// Pronounce the current word again. Leaves the task untouched.
    pub fn repeat_word(&mut self) {
        if let Some(word) = self.state.current_word() {
            self.speech.speak(&word.word, WORD_SPEECH_RATE);
        }
    }

    /// Handle a key press (DOM key names)
    pub fn key_down(&mut self, key: &str) {
        if self.closed {
            return;
        }
        let mapped = Key::from_dom(key);
        if mapped == Some(Key::Pause) {
            self.toggle_pause();
            return;
        }

        // First captured key starts a waiting phoneme run
        if self.started && self.state.phase == GamePhase::NotStarted {
            self.begin_run();
            self.ensure_frame();
            self.notify();
        }

        match mapped {
            Some(Key::Left) => self.input.left = true,
            Some(Key::Right) => self.input.right = true,
            _ => {}
        }
    }

    pub fn key_up(&mut self, key: &str) {
        match Key::from_dom(key) {
            Some(Key::Left) => self.input.left = false,
            Some(Key::Right) => self.input.right = false,
            _ => {}
        }
    }

    /// Frame callback. Runs the fixed-timestep ticks due since the previous
    /// frame, schedules the next frame while the run is live and returns the
    /// frame's draw list.
    pub fn on_frame(&mut self, timestamp_ms: f64) -> Vec<DrawCommand> {
        self.pending_frame = None;
        if self.closed {
            return Vec::new();
        }

        let dt = match self.last_time {
            Some(last) => ((timestamp_ms - last) / 1000.0) as f32,
            None => SIM_DT,
        };
        self.last_time = Some(timestamp_ms);

        if self.state.phase == GamePhase::Running {
            self.accumulator += dt.clamp(0.0, 0.1);
            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.step();
                self.accumulator -= SIM_DT;
                substeps += 1;
                if self.state.phase != GamePhase::Running {
                    self.accumulator = 0.0;
                    break;
                }
            }
        }

        if matches!(self.state.phase, GamePhase::NotStarted | GamePhase::Running) {
            self.ensure_frame();
        }

        self.render()
    }

    /// Run exactly one simulation tick with the held keys
    pub fn step(&mut self) {
        if self.closed || self.state.phase != GamePhase::Running {
            return;
        }
        let input = self.input;
        tick(&mut self.state, &input);
        self.handle_events();
        self.notify();
    }

    /// Draw list for the current state
    pub fn render(&self) -> Vec<DrawCommand> {
        renderer::render(&Scene {
            state: &self.state,
            phonemes: self.phonemes.as_ref(),
            high_score: self.high_score.score,
        })
    }

    /// Observe UI changes. The observer receives the current snapshot right
    /// away and again whenever it changes.
    pub fn subscribe(&mut self, mut observer: impl FnMut(&UiSnapshot) + 'static) {
        observer(&self.snapshot);
        self.observers.push(Box::new(observer));
    }

    /// Called with the final score when a run ends
    pub fn on_complete(&mut self, handler: impl FnMut(u64) + 'static) {
        self.on_complete = Some(Box::new(handler));
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.score
    }

    pub fn snapshot(&self) -> &UiSnapshot {
        &self.snapshot
    }

    pub fn phonemes(&self) -> Option<&PhonemeSet> {
        self.phonemes.as_ref()
    }

    /// Whether a frame callback is outstanding
    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    fn begin_run(&mut self) {
        if self.state.phase != GamePhase::NotStarted {
            return;
        }
        self.state.phase = GamePhase::Running;
        log::info!("Run started ({})", self.config.variant.as_str());
        // Announce the first word queued while waiting
        self.handle_events();
    }

    fn handle_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::WordAdvanced { word } => {
                    self.speech.speak(&word, WORD_SPEECH_RATE);
                }
                GameEvent::LifeLost { remaining } => {
                    log::debug!("Life lost, {} left", remaining);
                }
                GameEvent::GameOver { .. } => self.finish(),
                _ => {}
            }
        }
    }

    /// Record the final score and report completion, once per run
    fn finish(&mut self) {
        if self.completion_reported {
            return;
        }
        self.completion_reported = true;

        let score = self.state.score;
        if self.high_score.submit(score) {
            log::info!("New {} high score: {}", self.config.variant.as_str(), score);
            self.high_score.save(self.store.as_mut());
        }
        if let Some(handler) = self.on_complete.as_mut() {
            handler(score);
        }
    }

    fn ensure_frame(&mut self) {
        if self.pending_frame.is_none() && !self.closed {
            self.pending_frame = Some(self.scheduler.request_frame());
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(id) = self.pending_frame.take() {
            self.scheduler.cancel_frame(id);
        }
    }

    /// Push the snapshot to observers if anything they show changed
    fn notify(&mut self) {
        let snapshot =
            UiSnapshot::capture(&self.state, self.high_score.score, self.phonemes.as_ref());
        if snapshot == self.snapshot {
            return;
        }
        self.snapshot = snapshot;
        for observer in &mut self.observers {
            observer(&self.snapshot);
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.cancel_frame();
    }
}

/// Fresh run state, waiting for `begin_run`
fn new_run(config: &GameConfig, phonemes: Option<&PhonemeSet>, seeder: &mut Pcg32) -> GameState {
    let seed = seeder.random::<u64>();
    let words = phonemes
        .map(|set| set.run_queue(seeder))
        .unwrap_or_default();
    let mut state = GameState::with_words(config.clone(), seed, words);
    if state.phase == GamePhase::Running {
        state.phase = GamePhase::NotStarted;
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::platform::{ManualScheduler, NullSpeech, RecordingSpeech};
    use crate::sim::{Platform, PlatformKind};
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Harness {
        session: Session,
        frames: ManualScheduler,
        speech: RecordingSpeech,
    }

    fn harness(options: SessionOptions, store: MemoryStore) -> Harness {
        let frames = ManualScheduler::new();
        let speech = RecordingSpeech::new();
        let session = Session::new(
            options,
            Box::new(store),
            Box::new(speech.clone()),
            Box::new(frames.clone()),
        )
        .unwrap();
        Harness {
            session,
            frames,
            speech,
        }
    }

    fn endless(seed: u64) -> Harness {
        harness(SessionOptions::new(Variant::Endless).with_seed(seed), MemoryStore::new())
    }

    fn phoneme(seed: u64) -> Harness {
        harness(
            SessionOptions::new(Variant::Phoneme)
                .with_seed(seed)
                .with_pair("С-Ш"),
            MemoryStore::new(),
        )
    }

    /// Make the player fall off the bottom on the next tick
    fn drop_player(session: &mut Session) {
        let state = &mut session.state;
        state.platforms.iter_mut().for_each(|p| p.broken = true);
        state.player.pos.y = CANVAS_HEIGHT - 1.0;
        state.player.vel.y = 5.0;
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut options = SessionOptions::new(Variant::Endless);
        options.config.platform_gap = 1000.0;
        let result = Session::new(
            options,
            Box::new(MemoryStore::new()),
            Box::new(NullSpeech),
            Box::new(ManualScheduler::new()),
        );
        assert!(matches!(result, Err(SessionError::Config(_))));

        let result = Session::new(
            SessionOptions::new(Variant::Phoneme).with_pair("Ы-Э"),
            Box::new(MemoryStore::new()),
            Box::new(NullSpeech),
            Box::new(ManualScheduler::new()),
        );
        assert!(matches!(result, Err(SessionError::Corpus(_))));
    }

    #[test]
    fn test_start_schedules_one_frame() {
        let mut h = endless(1);
        assert_eq!(h.session.phase(), GamePhase::NotStarted);
        assert_eq!(h.frames.requested(), 0);

        h.session.start();
        h.session.start();
        assert_eq!(h.session.phase(), GamePhase::Running);
        assert_eq!(h.frames.requested(), 1);

        // Every delivered frame schedules exactly one more
        for i in 0..10 {
            assert!(h.frames.take_pending().is_some());
            h.session.on_frame(i as f64 * 16.7);
            assert_eq!(h.frames.requested(), 2 + i);
        }
        assert!(h.frames.pending().is_some());
    }

    #[test]
    fn test_frame_pacing_runs_fixed_ticks() {
        let mut h = endless(2);
        h.session.start();
        h.session.on_frame(0.0);
        assert_eq!(h.session.state().time_ticks, 1);

        // 60 ms later: three ticks due
        h.session.on_frame(60.0);
        assert_eq!(h.session.state().time_ticks, 4);

        // Long stall is capped
        h.session.on_frame(5000.0);
        assert_eq!(h.session.state().time_ticks, 4 + MAX_SUBSTEPS as u64);
    }

    #[test]
    fn test_pause_stops_rescheduling() {
        let mut h = endless(3);
        h.session.start();
        h.frames.take_pending();
        h.session.on_frame(0.0);
        let ticks = h.session.state().time_ticks;

        h.session.key_down("Escape");
        assert_eq!(h.session.phase(), GamePhase::Paused);

        // The frame already in flight arrives but nothing new is scheduled
        let requested = h.frames.requested();
        h.frames.take_pending();
        h.session.on_frame(16.0);
        assert_eq!(h.frames.requested(), requested);
        assert!(!h.session.has_pending_frame());
        assert_eq!(h.session.state().time_ticks, ticks);

        h.session.key_down("Escape");
        assert_eq!(h.session.phase(), GamePhase::Running);
        assert_eq!(h.frames.requested(), requested + 1);
    }

    #[test]
    fn test_resume_before_frame_keeps_single_pending() {
        let mut h = endless(4);
        h.session.start();
        h.session.pause();
        h.session.resume();
        h.session.toggle_pause();
        h.session.toggle_pause();
        assert_eq!(h.frames.requested(), 1);
        assert!(h.frames.pending().is_some());
    }

    #[test]
    fn test_endless_fall_completes_once() {
        let mut h = endless(5);
        let completed = Rc::new(RefCell::new(Vec::new()));
        let sink = completed.clone();
        h.session.on_complete(move |score| sink.borrow_mut().push(score));
        h.session.start();

        h.session.state.score = 42;
        drop_player(&mut h.session);
        h.session.step();
        assert_eq!(h.session.phase(), GamePhase::GameOver);
        assert_eq!(*completed.borrow(), vec![42]);

        for _ in 0..5 {
            h.session.step();
        }
        h.frames.take_pending();
        h.session.on_frame(16.0);
        assert_eq!(*completed.borrow(), vec![42]);
        assert_eq!(h.session.state().score, 42);
        // Game over does not keep the loop alive
        assert!(h.frames.pending().is_none());

        assert_eq!(h.session.high_score(), 42);
    }

    #[test]
    fn test_high_score_written_through_store() {
        let store = MemoryStore::new();
        let mut h = harness(SessionOptions::new(Variant::Endless).with_seed(6), store);
        h.session.start();
        h.session.state.score = 90;
        drop_player(&mut h.session);
        h.session.step();
        assert_eq!(
            h.session.store.get("doodlejump_highscore").as_deref(),
            Some("90")
        );
    }

    #[test]
    fn test_restart_resets_run_and_keeps_best() {
        let mut store = MemoryStore::new();
        store.set("croco_jump_phoneme_highscore", "500");
        let mut h = harness(
            SessionOptions::new(Variant::Phoneme)
                .with_seed(7)
                .with_pair("Р-Л"),
            store,
        );
        h.session.start();
        h.session.key_down("ArrowLeft");
        h.session.state.score = 30;
        h.session.state.lives = Some(1);
        h.session.state.end(GameOverReason::OutOfLives);
        h.session.step();
        h.session.handle_events();
        assert_eq!(h.session.high_score(), 500);

        let old_seed = h.session.state().seed;
        h.session.restart();
        let state = h.session.state();
        assert_eq!(h.session.phase(), GamePhase::Running);
        assert_eq!(state.lives, Some(3));
        assert_eq!(state.score, 0);
        assert_eq!(state.platforms.len(), 7);
        assert_ne!(state.seed, old_seed);
        assert_eq!(h.session.high_score(), 500);
        assert!(state.current_word().is_some());
        assert!(h.frames.pending().is_some());
    }

    #[test]
    fn test_phoneme_waits_for_first_key_then_speaks() {
        let mut h = phoneme(8);
        h.session.start();
        assert_eq!(h.session.phase(), GamePhase::NotStarted);
        assert!(h.speech.spoken().is_empty());

        // Waiting screen keeps rendering without ticking
        h.frames.take_pending();
        h.session.on_frame(0.0);
        assert_eq!(h.session.state().time_ticks, 0);
        assert!(h.frames.pending().is_some());

        h.session.key_down("d");
        assert_eq!(h.session.phase(), GamePhase::Running);
        let word = h.session.state().current_word().unwrap().word.clone();
        assert_eq!(h.speech.spoken(), vec![word]);
    }

    #[test]
    fn test_correct_landing_speaks_next_word() {
        let mut h = phoneme(9);
        h.session.start();
        h.session.key_down("ArrowRight");
        h.session.key_up("ArrowRight");

        let target = h.session.state().current_word().unwrap().side;
        let state = &mut h.session.state;
        let id = state.next_entity_id();
        state.platforms = vec![Platform::new(
            id,
            Vec2::new(100.0, 500.0),
            70.0,
            PlatformKind::Phoneme(target),
        )];
        state.player.pos = Vec2::new(110.0, 447.0);
        state.player.vel = Vec2::new(0.0, 3.0);

        h.session.step();
        assert_eq!(h.session.state().score, CORRECT_LANDING_POINTS);
        let spoken = h.speech.spoken();
        assert_eq!(spoken.len(), 2);
        assert_eq!(
            spoken[1],
            h.session.state().current_word().unwrap().word
        );
    }

    #[test]
    fn test_repeat_word_does_not_touch_task() {
        let mut h = phoneme(10);
        h.session.start();
        h.session.key_down("a");
        let before = h.session.state().task.clone().unwrap();

        h.session.repeat_word();
        h.session.repeat_word();

        let after = h.session.state().task.clone().unwrap();
        assert_eq!(before.current(), after.current());
        assert_eq!(before.remaining(), after.remaining());
        let spoken = h.speech.spoken();
        assert_eq!(spoken.len(), 3);
        assert!(spoken.iter().all(|w| *w == spoken[0]));
    }

    #[test]
    fn test_observers_fire_only_on_change() {
        let mut h = endless(11);
        let seen = Rc::new(RefCell::new(Vec::<UiSnapshot>::new()));
        let sink = seen.clone();
        h.session.subscribe(move |s| sink.borrow_mut().push(s.clone()));
        assert_eq!(seen.borrow().len(), 1);

        h.session.start();
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(seen.borrow()[1].phase, GamePhase::Running);

        // Plain bouncing around changes nothing the UI shows
        h.session.state.player.pos.y = 450.0;
        for _ in 0..5 {
            h.session.step();
        }
        assert_eq!(seen.borrow().len(), 2);

        h.session.pause();
        h.session.pause();
        assert_eq!(seen.borrow().len(), 3);
        assert_eq!(seen.borrow()[2].phase, GamePhase::Paused);
    }

    #[test]
    fn test_quit_cancels_frame_without_completion() {
        let mut h = endless(12);
        let completed = Rc::new(RefCell::new(0));
        let sink = completed.clone();
        h.session.on_complete(move |_| *sink.borrow_mut() += 1);
        h.session.start();
        assert!(h.frames.pending().is_some());

        h.session.quit();
        assert!(h.frames.pending().is_none());
        assert_eq!(h.frames.cancelled(), 1);
        assert!(h.session.on_frame(16.0).is_empty());
        h.session.restart();
        assert_eq!(*completed.borrow(), 0);
        assert!(h.frames.pending().is_none());
    }

    #[test]
    fn test_drop_cancels_pending_frame() {
        let h = endless(13);
        let frames = h.frames.clone();
        let mut session = h.session;
        session.start();
        assert!(frames.pending().is_some());
        drop(session);
        assert!(frames.pending().is_none());
    }

    #[test]
    fn test_held_keys_steer() {
        let mut h = endless(14);
        h.session.start();
        let x0 = h.session.state().player.pos.x;
        h.session.key_down("ArrowLeft");
        h.session.step();
        assert_eq!(h.session.state().player.pos.x, x0 - 5.0);
        h.session.key_up("ArrowLeft");
        h.session.step();
        assert!(h.session.state().player.vel.x > -5.0);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = phoneme(15);
        let mut b = phoneme(15);
        assert_eq!(a.session.state().seed, b.session.state().seed);
        assert_eq!(
            a.session.state().current_word(),
            b.session.state().current_word()
        );
        a.session.restart();
        b.session.restart();
        assert_eq!(a.session.state().seed, b.session.state().seed);
        let words = |h: &Harness| {
            h.session
                .state()
                .task
                .as_ref()
                .map(|t| (t.len(), t.current().cloned()))
        };
        assert_eq!(words(&a), words(&b));
    }
}
