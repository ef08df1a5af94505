//! The game service
//!
//! [`Simulation`] owns one [`GameState`], the random source that drives
//! spawns and the record store. Frontends call commands between ticks, drain
//! events after each tick and read everything else through the queries.

use glam::Vec2;
use rand_pcg::Pcg32;

use crate::highscores::{HighScores, RecordOutcome};
use crate::persistence::{MemoryStore, RecordStore};
use crate::sim::{
    self, CommandError, Difficulty, Enemy, GameEvent, GamePhase, GameSpeed, GameState, Particle,
    Projectile, RandomSource, Tower, TowerId, TowerKind, TowerSpot, Upgrade, WavePreview,
};
use crate::tuning::Tuning;

pub struct Simulation<R: RandomSource = Pcg32> {
    state: GameState,
    rng: R,
    records: HighScores,
    store: Box<dyn RecordStore>,
}

impl Simulation<Pcg32> {
    /// Simulation with a seeded PCG source
    pub fn seeded(tuning: Tuning, seed: u64, store: Box<dyn RecordStore>) -> Self {
        Self::new(tuning, sim::seeded(seed), store)
    }
}

impl<R: RandomSource> Simulation<R> {
    /// Build a simulation sitting in the menu; records are read from `store`
    pub fn new(tuning: Tuning, rng: R, store: Box<dyn RecordStore>) -> Self {
        let records = HighScores::load(store.as_ref());
        Self {
            state: GameState::new(tuning),
            rng,
            records,
            store,
        }
    }

    /// Simulation whose records vanish with it
    pub fn in_memory(tuning: Tuning, rng: R) -> Self {
        Self::new(tuning, rng, Box::new(MemoryStore::new()))
    }

    // === Commands ===

    /// Begin a fresh run, discarding any run in progress
    pub fn start_game(&mut self, difficulty: Difficulty) {
        sim::start_game(&mut self.state, difficulty);
    }

    pub fn place_tower(&mut self, kind: TowerKind, pos: Vec2) -> Result<TowerId, CommandError> {
        sim::place_tower(&mut self.state, kind, pos)
    }

    pub fn select_tower_near(&mut self, pos: Vec2) -> Option<TowerId> {
        sim::select_tower_near(&mut self.state, pos)
    }

    pub fn upgrade_selected_tower(&mut self) -> Result<Upgrade, CommandError> {
        sim::upgrade_selected_tower(&mut self.state)
    }

    pub fn sell_selected_tower(&mut self) -> Result<u32, CommandError> {
        sim::sell_selected_tower(&mut self.state)
    }

    pub fn start_next_wave(&mut self) -> Result<u32, CommandError> {
        sim::start_next_wave(&mut self.state)
    }

    pub fn toggle_pause(&mut self) -> Result<bool, CommandError> {
        sim::toggle_pause(&mut self.state)
    }

    pub fn set_game_speed(&mut self, speed: GameSpeed) {
        sim::commands::set_game_speed(&mut self.state, speed);
    }

    pub fn toggle_fast_forward(&mut self) -> GameSpeed {
        sim::toggle_fast_forward(&mut self.state)
    }

    pub fn activate_nuke(&mut self) -> Result<u32, CommandError> {
        sim::activate_nuke(&mut self.state)
    }

    /// Advance by `elapsed_ms` of wall-clock time. Records are updated and
    /// saved on the tick that ends the run.
    pub fn tick(&mut self, elapsed_ms: f32) {
        let was_running = self.state.phase == GamePhase::Playing;
        sim::tick(&mut self.state, &mut self.rng, elapsed_ms);
        if was_running && self.state.phase == GamePhase::GameOver {
            self.finish_run();
        }
    }

    fn finish_run(&mut self) {
        let score = self.state.economy.score;
        let wave = self.state.wave.current;
        let outcome = self.records.record_run(score, wave);
        if outcome.any() {
            self.records.save(self.store.as_mut());
        }
        self.announce_records(outcome);
    }

    fn announce_records(&mut self, outcome: RecordOutcome) {
        if outcome.new_high_score {
            self.state.emit(GameEvent::Achievement {
                title: "New High Score".to_string(),
                description: format!("{} points!", self.records.high_score),
            });
        }
        if outcome.new_longest_wave {
            self.state.emit(GameEvent::Notification(format!(
                "New record: reached wave {}",
                self.records.longest_wave
            )));
        }
    }

    /// Take every event produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    // === Queries ===

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn difficulty(&self) -> Difficulty {
        self.state.difficulty
    }

    pub fn game_speed(&self) -> GameSpeed {
        self.state.speed
    }

    pub fn gold(&self) -> u32 {
        self.state.economy.gold
    }

    pub fn lives(&self) -> i32 {
        self.state.economy.lives
    }

    pub fn score(&self) -> u64 {
        self.state.economy.score
    }

    /// Current wave number (the next one to start when none is active)
    pub fn wave(&self) -> u32 {
        self.state.wave.current
    }

    pub fn wave_active(&self) -> bool {
        self.state.wave.active
    }

    /// Remaining inter-wave countdown (ms)
    pub fn wave_timer_ms(&self) -> f32 {
        self.state.wave.cooldown_ms
    }

    pub fn kill_count(&self) -> u32 {
        self.state.economy.kill_count
    }

    pub fn total_damage(&self) -> u64 {
        self.state.economy.total_damage
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.state.enemies
    }

    pub fn towers(&self) -> &[Tower] {
        &self.state.towers
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.state.projectiles
    }

    pub fn particles(&self) -> &[Particle] {
        &self.state.particles
    }

    pub fn spots(&self) -> &[TowerSpot] {
        &self.state.spots
    }

    pub fn selected_tower(&self) -> Option<&Tower> {
        self.state.selected()
    }

    pub fn wave_preview(&self) -> &[WavePreview] {
        &self.state.preview
    }

    /// Remaining nuke cooldown (ms); zero when ready
    pub fn nuke_cooldown_ms(&self) -> f32 {
        self.state.nuke_cooldown_ms
    }

    pub fn records(&self) -> HighScores {
        self.records
    }

    pub fn tuning(&self) -> &Tuning {
        &self.state.tuning
    }
}
