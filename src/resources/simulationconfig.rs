//! Simulation configuration resource.
//!
//! Holds every setting of a session: play-area size, grid cell size, pacing,
//! spawning, and the runtime toggles (grid overlay, bounding boxes, enemy and
//! bullet movement). The toggles live here instead of in global state; the
//! input systems flip them and the other systems read them each step.
//!
//! # Configuration File Format
//!
//! ```ini
//! [playarea]
//! width = 1024
//! height = 768
//!
//! [grid]
//! cell_width = 100
//! cell_height = 100
//!
//! [simulation]
//! fps = 60
//! seed = 42
//! enemies_per_wave = 5
//! respawn_delay = 3.0
//!
//! [debug]
//! show_grid = true
//! show_bounding_boxes = false
//!
//! [movement]
//! move_enemies = true
//! move_bullets = true
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use crate::resources::collisiongrid::DEFAULT_CELL_SIZE;

/// Default safe values for startup
const DEFAULT_PLAYAREA_WIDTH: u32 = 1024;
const DEFAULT_PLAYAREA_HEIGHT: u32 = 768;
const DEFAULT_FPS: u32 = 60;
const DEFAULT_ENEMIES_PER_WAVE: u32 = 5;
const DEFAULT_RESPAWN_DELAY: f32 = 3.0;
const DEFAULT_SHOW_GRID: bool = true;
const DEFAULT_SHOW_BOUNDING_BOXES: bool = false;
const DEFAULT_MOVE_ENEMIES: bool = true;
const DEFAULT_MOVE_BULLETS: bool = true;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Resource, Debug, Clone, Serialize)]
pub struct SimulationConfig {
    /// Play-area width in world units.
    pub width: u32,
    /// Play-area height in world units.
    pub height: u32,
    /// Nominal grid cell width before the remainder is distributed.
    pub cell_width: u32,
    /// Nominal grid cell height before the remainder is distributed.
    pub cell_height: u32,
    /// Fixed simulation rate; each step advances `1 / fps` seconds.
    pub fps: u32,
    /// Seed for the session RNG. `None` picks a random seed.
    pub seed: Option<u64>,
    /// Enemies spawned per wave.
    pub enemies_per_wave: u32,
    /// Seconds before the ship or a new wave comes back.
    pub respawn_delay: f32,
    /// Log the grid occupancy map every step.
    pub show_grid: bool,
    /// Log every tracked bounding box every step.
    pub show_bounding_boxes: bool,
    /// Enemies move sideways.
    pub move_enemies: bool,
    /// Enemy bullets move and enemies fire.
    pub move_bullets: bool,
    /// Path to the configuration file.
    #[serde(skip)]
    pub config_path: PathBuf,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            width: DEFAULT_PLAYAREA_WIDTH,
            height: DEFAULT_PLAYAREA_HEIGHT,
            cell_width: DEFAULT_CELL_SIZE,
            cell_height: DEFAULT_CELL_SIZE,
            fps: DEFAULT_FPS,
            seed: None,
            enemies_per_wave: DEFAULT_ENEMIES_PER_WAVE,
            respawn_delay: DEFAULT_RESPAWN_DELAY,
            show_grid: DEFAULT_SHOW_GRID,
            show_bounding_boxes: DEFAULT_SHOW_BOUNDING_BOXES,
            move_enemies: DEFAULT_MOVE_ENEMIES,
            move_bullets: DEFAULT_MOVE_BULLETS,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);

        info!(
            "Loaded config: {}x{} play area, {}x{} cells, fps={}, seed={:?}",
            self.width, self.height, self.cell_width, self.cell_height, self.fps, self.seed
        );

        Ok(())
    }

    /// Load configuration from INI text.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        let get_u32 = |section: &str, key: &str| {
            config
                .getuint(section, key)
                .ok()
                .flatten()
                .and_then(|v| u32::try_from(v).ok())
        };
        let get_bool = |section: &str, key: &str| config.getbool(section, key).ok().flatten();

        // [playarea] section
        if let Some(width) = get_u32("playarea", "width") {
            self.width = width;
        }
        if let Some(height) = get_u32("playarea", "height") {
            self.height = height;
        }

        // [grid] section
        if let Some(w) = get_u32("grid", "cell_width") {
            self.cell_width = w;
        }
        if let Some(h) = get_u32("grid", "cell_height") {
            self.cell_height = h;
        }

        // [simulation] section
        if let Some(fps) = get_u32("simulation", "fps") {
            self.fps = fps.max(1);
        }
        if let Some(seed) = config.getuint("simulation", "seed").ok().flatten() {
            self.seed = Some(seed);
        }
        if let Some(n) = get_u32("simulation", "enemies_per_wave") {
            self.enemies_per_wave = n;
        }
        if let Some(delay) = config.getfloat("simulation", "respawn_delay").ok().flatten() {
            self.respawn_delay = delay as f32;
        }

        // [debug] section
        if let Some(v) = get_bool("debug", "show_grid") {
            self.show_grid = v;
        }
        if let Some(v) = get_bool("debug", "show_bounding_boxes") {
            self.show_bounding_boxes = v;
        }

        // [movement] section
        if let Some(v) = get_bool("movement", "move_enemies") {
            self.move_enemies = v;
        }
        if let Some(v) = get_bool("movement", "move_bullets") {
            self.move_bullets = v;
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("playarea", "width", Some(self.width.to_string()));
        config.set("playarea", "height", Some(self.height.to_string()));

        config.set("grid", "cell_width", Some(self.cell_width.to_string()));
        config.set("grid", "cell_height", Some(self.cell_height.to_string()));

        config.set("simulation", "fps", Some(self.fps.to_string()));
        if let Some(seed) = self.seed {
            config.set("simulation", "seed", Some(seed.to_string()));
        }
        config.set(
            "simulation",
            "enemies_per_wave",
            Some(self.enemies_per_wave.to_string()),
        );
        config.set(
            "simulation",
            "respawn_delay",
            Some(self.respawn_delay.to_string()),
        );

        config.set("debug", "show_grid", Some(self.show_grid.to_string()));
        config.set(
            "debug",
            "show_bounding_boxes",
            Some(self.show_bounding_boxes.to_string()),
        );

        config.set("movement", "move_enemies", Some(self.move_enemies.to_string()));
        config.set("movement", "move_bullets", Some(self.move_bullets.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Seconds advanced by one step.
    pub fn step_seconds(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }

    /// Play-area size as `(width, height)`.
    pub fn play_area(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
