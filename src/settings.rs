//! Run settings for the command line tool.
//!
//! Values come from an optional TOML file, then `KEEPER_` environment
//! variables (`KEEPER_ENGINE__SEED=7`), then command line flags.

use std::path::Path;

use config::{Config, ConfigError, Environment, File, FileFormat};
use keeper_script::sim::SimHost;
use keeper_script::{EngineOptions, NameTables};
use keeper_types::limits::PLAYERS_COUNT;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MapPoint {
    pub number: u32,
    pub x: i64,
    pub y: i64,
}

/// A player walking into an action point at a given turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Activation {
    pub turn: u64,
    pub action_point: u32,
    pub player: u8,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub engine: EngineOptions,
    pub turns: u64,
    pub my_player: u8,
    pub network_active: bool,
    pub income_per_turn: i64,
    pub action_points: Vec<MapPoint>,
    pub hero_gates: Vec<MapPoint>,
    pub activations: Vec<Activation>,
    /// Replaces the built-in creature, room, door, trap and power names.
    pub names: Option<NameTables>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            engine: EngineOptions::default(),
            turns: 1000,
            my_player: 0,
            network_active: false,
            income_per_turn: 0,
            action_points: Vec::new(),
            hero_gates: Vec::new(),
            activations: Vec::new(),
            names: None,
        }
    }
}

/// Settings given on the command line, applied last.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub seed: Option<u32>,
    pub turns: Option<u64>,
    pub run_after_victory: bool,
}

impl Settings {
    pub fn load(path: Option<&Path>, overrides: Overrides) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }
        let mut builder = builder
            .add_source(
                Environment::with_prefix("KEEPER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("engine.seed", overrides.seed.map(i64::from))?
            .set_override_option("turns", overrides.turns.and_then(|t| i64::try_from(t).ok()))?;
        if overrides.run_after_victory {
            builder = builder.set_override("engine.run_after_victory", true)?;
        }
        builder.build()?.try_deserialize()
    }

    /// The simulated game a script runs against.
    pub fn host(&self) -> SimHost {
        let mut host = SimHost::new();
        host.my_player = self.my_player;
        host.network_active = self.network_active;
        host.income_per_turn = self.income_per_turn;
        if let Some(names) = &self.names {
            host.names = names.clone();
        }
        for point in &self.action_points {
            host.add_action_point(point.number, (point.x, point.y));
        }
        for gate in &self.hero_gates {
            host.add_hero_gate(gate.number, (gate.x, gate.y));
        }
        for a in &self.activations {
            if usize::from(a.player) >= PLAYERS_COUNT {
                log::warn!("Ignoring activation by player {} at turn {}", a.player, a.turn);
                continue;
            }
            host.schedule_activation(a.turn, a.action_point, a.player);
        }
        host
    }
}
