//! Scene lifecycle
//!
//! Two scenes: the difficulty menu and the game itself. A `SceneHost` owns
//! whichever is active and applies the transitions they request.

use super::difficulty::Difficulty;
use super::spawner::{seed_initial_hazards, spawn_falling_wave};
use super::state::GameState;
use super::tick::{TickInput, tick};
use crate::error::Result;
use crate::tuning::Tuning;

/// Which scene to start, with its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKey {
    Menu,
    Game(Difficulty),
}

/// A request to change scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneTransition {
    Start(SceneKey),
    /// Tear down and rebuild the current scene
    Restart,
}

/// Entry points invoked by whoever owns the frame loop
pub trait Scene {
    type Payload;

    fn init(&mut self, payload: Self::Payload);
    fn update(&mut self, time_ms: f64, delta_ms: f32, input: &TickInput);
    fn teardown(&mut self);
}

/// Difficulty selection
#[derive(Debug, Clone, Default)]
pub struct MenuScene {
    /// Highlighted option, remembered from the last run
    pub highlighted: Difficulty,
}

impl MenuScene {
    /// Labels shown on the menu buttons, in order
    pub fn options(&self) -> [Difficulty; 3] {
        Difficulty::ALL
    }

    /// A button was pressed. Unknown labels are rejected, never defaulted.
    pub fn select(&mut self, label: &str) -> Result<SceneTransition> {
        let difficulty: Difficulty = label.parse()?;
        self.highlighted = difficulty;
        Ok(SceneTransition::Start(SceneKey::Game(difficulty)))
    }
}

impl Scene for MenuScene {
    type Payload = Difficulty;

    fn init(&mut self, highlighted: Difficulty) {
        self.highlighted = highlighted;
    }

    fn update(&mut self, _time_ms: f64, _delta_ms: f32, _input: &TickInput) {}

    fn teardown(&mut self) {}
}

/// The playable scene
#[derive(Debug, Clone)]
pub struct GameScene {
    pub state: GameState,
    tuning: Tuning,
    base_seed: u64,
}

impl GameScene {
    /// Build, initialise and populate a game scene
    pub fn start(difficulty: Difficulty, tuning: Tuning, base_seed: u64) -> Self {
        let state = GameState::new(difficulty, tuning.clone(), base_seed, 0);
        let mut scene = Self {
            state,
            tuning,
            base_seed,
        };
        scene.init(difficulty);
        scene.create();
        scene
    }

    pub fn difficulty(&self) -> Difficulty {
        self.state.difficulty
    }

    /// Populate the level: player, stars, then hazards per difficulty
    pub fn create(&mut self) {
        self.state.spawn_stars();
        self.adjust_difficulty();
        log::info!(
            "Game scene created: difficulty={}, generation={}",
            self.state.difficulty,
            self.state.generation
        );
    }

    /// Seed the opening bombs and the first meteor wave
    pub fn adjust_difficulty(&mut self) {
        let counts = self.state.difficulty.hazard_counts();
        seed_initial_hazards(&mut self.state, counts.initial_hazards);
        spawn_falling_wave(&mut self.state, counts.falling_wave_size);
    }

    /// Full reset with the same difficulty
    pub fn restart(&mut self) {
        let difficulty = self.state.difficulty;
        self.teardown();
        self.init(difficulty);
        self.create();
    }

    pub fn return_to_menu(&self) -> SceneTransition {
        SceneTransition::Start(SceneKey::Menu)
    }
}

impl Scene for GameScene {
    type Payload = Difficulty;

    /// Fresh state: score 0, not walking, playing. Bumps the generation so
    /// timers left over from a previous run are ignored.
    fn init(&mut self, difficulty: Difficulty) {
        let generation = self.state.generation.wrapping_add(1);
        let seed = self
            .base_seed
            .wrapping_add((generation as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        self.state = GameState::new(difficulty, self.tuning.clone(), seed, generation);
    }

    fn update(&mut self, _time_ms: f64, delta_ms: f32, input: &TickInput) {
        if self.state.is_game_over() {
            return;
        }
        tick(&mut self.state, input, delta_ms);
    }

    fn teardown(&mut self) {
        self.state.scheduler.cancel_all();
    }
}

/// Whichever scene is on screen
#[derive(Debug, Clone)]
pub enum ActiveScene {
    Menu(MenuScene),
    Game(GameScene),
}

/// Owns the active scene and performs transitions
#[derive(Debug, Clone)]
pub struct SceneHost {
    active: ActiveScene,
    tuning: Tuning,
    seed: u64,
    /// Last difficulty played, pre-selected on the menu
    last_difficulty: Difficulty,
}

impl SceneHost {
    /// Start on the menu
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            active: ActiveScene::Menu(MenuScene::default()),
            tuning,
            seed,
            last_difficulty: Difficulty::default(),
        }
    }

    pub fn active(&self) -> &ActiveScene {
        &self.active
    }

    pub fn game(&self) -> Option<&GameState> {
        match &self.active {
            ActiveScene::Game(scene) => Some(&scene.state),
            ActiveScene::Menu(_) => None,
        }
    }

    pub fn game_mut(&mut self) -> Option<&mut GameState> {
        match &mut self.active {
            ActiveScene::Game(scene) => Some(&mut scene.state),
            ActiveScene::Menu(_) => None,
        }
    }

    pub fn last_difficulty(&self) -> Difficulty {
        self.last_difficulty
    }

    /// Pre-select a difficulty on the menu
    pub fn set_last_difficulty(&mut self, difficulty: Difficulty) {
        self.last_difficulty = difficulty;
        if let ActiveScene::Menu(menu) = &mut self.active {
            menu.init(difficulty);
        }
    }

    /// Menu button pressed with `label`
    pub fn select_difficulty(&mut self, label: &str) -> Result<()> {
        let transition = match &mut self.active {
            ActiveScene::Menu(menu) => menu.select(label)?,
            // Only reachable from a stale menu button; still validate the label
            ActiveScene::Game(_) => {
                SceneTransition::Start(SceneKey::Game(label.parse::<Difficulty>()?))
            }
        };
        self.apply(transition);
        Ok(())
    }

    pub fn start(&mut self, key: SceneKey) {
        self.teardown_active();
        self.seed = self.seed.wrapping_add(1);
        self.active = match key {
            SceneKey::Menu => {
                let mut menu = MenuScene::default();
                menu.init(self.last_difficulty);
                log::info!("Returning to menu");
                ActiveScene::Menu(menu)
            }
            SceneKey::Game(difficulty) => {
                self.last_difficulty = difficulty;
                ActiveScene::Game(GameScene::start(difficulty, self.tuning.clone(), self.seed))
            }
        };
    }

    pub fn restart(&mut self) {
        match &mut self.active {
            ActiveScene::Game(scene) => scene.restart(),
            ActiveScene::Menu(menu) => {
                menu.teardown();
                menu.init(self.last_difficulty);
            }
        }
    }

    pub fn apply(&mut self, transition: SceneTransition) {
        match transition {
            SceneTransition::Start(key) => self.start(key),
            SceneTransition::Restart => self.restart(),
        }
    }

    /// Leave the game for the menu
    pub fn return_to_menu(&mut self) {
        let transition = match &self.active {
            ActiveScene::Game(scene) => scene.return_to_menu(),
            ActiveScene::Menu(_) => return,
        };
        self.apply(transition);
    }

    /// Run one frame of the active scene
    pub fn update(&mut self, time_ms: f64, delta_ms: f32, input: &TickInput) {
        match &mut self.active {
            ActiveScene::Menu(menu) => menu.update(time_ms, delta_ms, input),
            ActiveScene::Game(scene) => scene.update(time_ms, delta_ms, input),
        }
    }

    fn teardown_active(&mut self) {
        match &mut self.active {
            ActiveScene::Menu(menu) => menu.teardown(),
            ActiveScene::Game(scene) => scene.teardown(),
        }
    }
}
