//! Loading a level script and running it turn by turn.

use keeper_rng::KeeperRng;
use keeper_types::limits::{
    CONDITIONS_COUNT, CREATURE_MAX_LEVEL, CREATURE_PARTYS_COUNT, PARTY_TRIGGERS_COUNT, PLAYERS_COUNT,
    SCRIPT_VALUES_COUNT, TUNNELLER_TRIGGERS_COUNT,
};
use serde::{Deserialize, Serialize};

use crate::condition::process_conditions;
use crate::error::{Diagnostic, Severity};
use crate::host::GameHost;
use crate::level::LevelScript;
use crate::loader::{LoadState, Loader, Pass};
use crate::trigger::{
    process_party_triggers, process_tunneller_triggers, process_values, process_win_and_lose,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Seed of the generator behind `RANDOM` arguments.
    pub seed: u32,
    /// Keep processing the script after the local player won or lost.
    pub run_after_victory: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            seed: 1,
            run_after_victory: false,
        }
    }
}

/// A level script together with everything needed to load and run it.
#[derive(Debug, Clone)]
pub struct ScriptEngine {
    script: LevelScript,
    state: LoadState,
    rng: KeeperRng,
    options: EngineOptions,
}

impl Default for ScriptEngine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

impl ScriptEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            script: LevelScript::new(),
            state: LoadState::default(),
            rng: KeeperRng::new(options.seed),
            options,
        }
    }

    pub fn script(&self) -> &LevelScript {
        &self.script
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.state.diagnostics
    }

    pub fn level_version(&self) -> i64 {
        self.state.level_version
    }

    fn loader<'a>(&'a mut self, host: &'a mut dyn GameHost) -> Loader<'a> {
        Loader {
            script: &mut self.script,
            host,
            rng: &mut self.rng,
            state: &mut self.state,
        }
    }

    /// Run the commands which must be known before the level is set up.
    pub fn preload(&mut self, text: &str, host: &mut dyn GameHost) {
        self.state = LoadState::default();
        self.script.clear_quick_messages();
        self.loader(host).run(text, Pass::Preload);
    }

    /// Read the whole script, applying setup commands and storing the rest.
    pub fn load(&mut self, text: &str, host: &mut dyn GameHost) {
        host.flash_button(0, 0);
        self.script.clear();
        self.state.reset_blocks();
        let rules = host.rules_mut();
        rules.bonus_time = 0;
        rules.countdown_visible = false;
        rules.dead_back_to_pool = true;
        for player in 0..PLAYERS_COUNT as u8 {
            let dungeon = host.dungeon_mut(player);
            dungeon.creature_max_level.fill(CREATURE_MAX_LEVEL);
            dungeon.reset_timers_and_flags();
        }

        self.loader(host).run(text, Pass::Full);

        if self.script.win_conditions.is_empty() {
            self.state
                .report(Severity::Warning, "No WIN GAME conditions in script file.");
        }
        if self.state.open_blocks() > 0 {
            self.state
                .report(Severity::Warning, "Missing ENDIF's in script file.");
        }
        let s = &self.script;
        self.state.report(
            Severity::Info,
            format!(
                "Used script resources: {}/{} tunneller triggers, {}/{} party triggers, \
                 {}/{} script values, {}/{} IF conditions, {}/{} party definitions",
                s.tunneller_triggers.len(),
                TUNNELLER_TRIGGERS_COUNT,
                s.party_triggers.len(),
                PARTY_TRIGGERS_COUNT,
                s.values.len(),
                SCRIPT_VALUES_COUNT,
                s.conditions.len(),
                CONDITIONS_COUNT,
                s.parties.len(),
                CREATURE_PARTYS_COUNT,
            ),
        );
    }

    /// Preload and load `text` as a fresh level.
    pub fn load_level(&mut self, text: &str, host: &mut dyn GameHost) {
        self.preload(text, host);
        self.load(text, host);
    }

    /// Run one game turn of the script.
    pub fn tick(&mut self, host: &mut dyn GameHost) {
        if host.victory_decided() && !self.options.run_after_victory {
            return;
        }
        process_conditions(&mut self.script, host);
        process_party_triggers(&mut self.script, host);
        process_tunneller_triggers(&mut self.script, host);
        process_values(&mut self.script, host);
        let me = host.my_player();
        process_win_and_lose(&self.script, host, me);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics()
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}
