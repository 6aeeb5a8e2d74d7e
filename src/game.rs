use crate::effects::HitBurst;
use crate::vocab::{RandomPicker, Vocabulary, WordPicker};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A single falling word the player must type to eliminate
#[derive(Debug, Clone, PartialEq)]
pub struct WordToken {
    /// Unique per session run, assigned at spawn, never reused
    pub id: u64,
    pub text: String,
    /// Horizontal position, percent of field width, fixed at spawn
    pub x: f64,
    /// Vertical position, percent of field height, advances every tick
    pub y: f64,
}

/// Difficulty curve and scoring knobs.
///
/// The defaults reproduce the original pacing: a word every two seconds,
/// speeding up by 10ms per point down to a hard floor, falling at 12% of
/// the field per second plus 0.6% per point.
#[derive(Debug, Clone)]
pub struct GameTuning {
    pub base_spawn_interval_ms: f64,
    pub min_spawn_interval_ms: f64,
    pub spawn_decay_ms_per_point: f64,
    /// Fall rate at score 0, in percent of field height per second
    pub base_fall_rate: f64,
    pub fall_rate_per_point: f64,
    pub loss_threshold: f64,
    pub match_reward: u32,
    /// Require exact case when matching input against words
    pub strict_case: bool,
}

impl Default for GameTuning {
    fn default() -> Self {
        Self {
            base_spawn_interval_ms: 2000.0,
            min_spawn_interval_ms: 500.0,
            spawn_decay_ms_per_point: 10.0,
            base_fall_rate: 12.0,
            fall_rate_per_point: 0.6,
            loss_threshold: 90.0,
            match_reward: 10,
            strict_case: false,
        }
    }
}

impl GameTuning {
    /// Milliseconds between spawns at the given score. Strictly decreasing
    /// in score until it hits the floor.
    pub fn spawn_interval_ms(&self, score: u32) -> f64 {
        (self.base_spawn_interval_ms - score as f64 * self.spawn_decay_ms_per_point)
            .max(self.min_spawn_interval_ms)
    }

    /// Fall rate at the given score, percent of field height per second.
    /// Strictly increasing in score.
    pub fn fall_rate(&self, score: u32) -> f64 {
        self.base_fall_rate + score as f64 * self.fall_rate_per_point
    }
}

/// Owns all mini-game state: active words, score, over/playing status and
/// the player's in-progress input. Mutated only from the embedding loop's
/// tick and key handlers.
pub struct GameSession {
    vocab: Vocabulary,
    tuning: GameTuning,
    picker: Box<dyn WordPicker>,
    rng: StdRng,
    words: Vec<WordToken>,
    score: u32,
    is_over: bool,
    current_input: String,
    words_cleared: u32,
    elapsed_ms: f64,
    since_spawn_ms: f64,
    next_id: u64,
    pub hit_burst: HitBurst,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("vocab", &self.vocab.name)
            .field("words", &self.words)
            .field("score", &self.score)
            .field("is_over", &self.is_over)
            .field("current_input", &self.current_input)
            .finish()
    }
}

impl GameSession {
    pub fn new(vocab: Vocabulary, tuning: GameTuning, picker: Box<dyn WordPicker>) -> Self {
        Self {
            vocab,
            tuning,
            picker,
            rng: StdRng::from_entropy(),
            words: Vec::new(),
            score: 0,
            is_over: false,
            current_input: String::new(),
            words_cleared: 0,
            elapsed_ms: 0.0,
            since_spawn_ms: 0.0,
            next_id: 0,
            hit_burst: HitBurst::new(),
        }
    }

    /// Fully deterministic session: seeds both the horizontal-position rng
    /// and the word picker.
    pub fn with_seed(vocab: Vocabulary, tuning: GameTuning, seed: u64) -> Self {
        let mut session = Self::new(vocab, tuning, Box::new(RandomPicker::seeded(seed)));
        session.rng = StdRng::seed_from_u64(seed);
        session
    }

    /// Re-initialize to a playable state: empty field, score 0, input
    /// cleared, spawn timer re-armed. Word ids keep counting up so an id is
    /// never reused across restarts.
    pub fn start(&mut self) {
        self.words.clear();
        self.score = 0;
        self.is_over = false;
        self.current_input.clear();
        self.words_cleared = 0;
        self.elapsed_ms = 0.0;
        self.since_spawn_ms = 0.0;
        self.hit_burst.clear();
    }

    pub fn reset(&mut self) {
        self.start();
    }

    /// Advance the session by `delta_ms` of wall-clock time: spawn first,
    /// then move, then check for loss, so a freshly spawned word at y=0 can
    /// never end the game on the tick that created it. Frozen once over.
    pub fn tick(&mut self, delta_ms: f64) {
        if self.is_over {
            return;
        }

        // Negative or NaN deltas would move words backwards or poison
        // positions, clamp to zero instead.
        let delta_ms = if delta_ms.is_finite() && delta_ms > 0.0 {
            delta_ms
        } else {
            0.0
        };
        self.elapsed_ms += delta_ms;

        self.since_spawn_ms += delta_ms;
        if self.since_spawn_ms >= self.tuning.spawn_interval_ms(self.score) {
            self.spawn_word();
            self.since_spawn_ms = 0.0;
        }

        let dy = self.tuning.fall_rate(self.score) * delta_ms / 1000.0;
        for word in &mut self.words {
            word.y += dy;
        }

        if self
            .words
            .iter()
            .any(|w| w.y > self.tuning.loss_threshold)
        {
            self.is_over = true;
        }
    }

    fn spawn_word(&mut self) {
        let text = self.picker.pick(&self.vocab);
        let token = WordToken {
            id: self.next_id,
            text,
            x: self.rng.gen_range(10.0..90.0),
            y: 0.0,
        };
        self.next_id += 1;
        self.words.push(token);
    }

    /// Replace the in-progress input and try to match it against the active
    /// words. On the first match in spawn order: remove the word, score the
    /// reward, clear the input and raise the hit burst. A non-matching
    /// input is kept so the player can continue typing.
    pub fn submit_input(&mut self, text: &str) {
        if self.is_over {
            return;
        }

        self.current_input = text.to_string();
        if self.current_input.is_empty() {
            return;
        }

        let strict = self.tuning.strict_case;
        let matched = self.words.iter().position(|w| {
            if strict {
                w.text == self.current_input
            } else {
                w.text.eq_ignore_ascii_case(&self.current_input)
            }
        });

        if let Some(idx) = matched {
            let word = self.words.remove(idx);
            self.score += self.tuning.match_reward;
            self.words_cleared += 1;
            self.current_input.clear();
            self.hit_burst.start(word.x, word.y);
        }
    }

    /// Keystroke helper for the TUI: extend the input by one char
    pub fn push_char(&mut self, c: char) {
        if self.is_over {
            return;
        }
        let mut input = self.current_input.clone();
        input.push(c);
        self.submit_input(&input);
    }

    /// Keystroke helper for the TUI: drop the last char of the input
    pub fn backspace(&mut self) {
        if self.is_over || self.current_input.is_empty() {
            return;
        }
        let mut input = self.current_input.clone();
        input.pop();
        self.current_input = input;
    }

    /// Advance only the transient hit animation. Safe to call in any state,
    /// including after the session is over.
    pub fn update_effects(&mut self, delta_ms: f64) {
        if delta_ms.is_finite() && delta_ms > 0.0 {
            self.hit_burst.update(delta_ms / 1000.0);
        }
    }

    pub fn words(&self) -> &[WordToken] {
        &self.words
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    pub fn current_input(&self) -> &str {
        &self.current_input
    }

    pub fn words_cleared(&self) -> u32 {
        self.words_cleared
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_ms / 1000.0
    }

    pub fn vocab_name(&self) -> &str {
        &self.vocab.name
    }

    pub fn tuning(&self) -> &GameTuning {
        &self.tuning
    }
}
