//! Reading a script file into a [`LevelScript`].
//!
//! A file is read twice. The preload pass only runs the few commands which
//! must be known before anything else, `LEVEL_VERSION` among them, since it
//! selects the grammar the full pass scans with.

use keeper_rng::KeeperRng;
use keeper_types::{CommandKind, ConditionStatus, TriggerFlags};

use crate::command_table::{ArgKind, CommandDesc, DEFAULT_LEVEL_VERSION, find_command};
use crate::commands::ScriptCommand;
use crate::error::{Diagnostic, ScriptError, Severity};
use crate::host::GameHost;
use crate::level::{Condition, ConditionId, LevelScript, PartyTrigger, ScriptValue, TunnellerTrigger};
use crate::lexer::{LineScanner, ScanError, Word, WordKind};
use crate::numeric::parse_number;
use crate::trigger::{spawn_party_trigger, spawn_tunneller_trigger};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Preload,
    Full,
}

/// Lines of a script file, with `/* ... */` block comments removed.
///
/// A block comment is recognised only where it starts a line, after
/// optional spaces or tabs, and may span several lines. An unterminated
/// comment is left in place.
pub struct ScriptLines<'a> {
    rest: &'a str,
    line: usize,
}

impl<'a> ScriptLines<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            rest: text,
            line: 1,
        }
    }

    fn skip_block_comment(&mut self) {
        let body = self.rest.trim_start_matches([' ', '\t']);
        let Some(comment) = body.strip_prefix("/*") else {
            return;
        };
        if let Some(end) = comment.find("*/") {
            self.line += comment[..end].matches('\n').count();
            self.rest = &comment[end + 2..];
        }
    }
}

impl<'a> Iterator for ScriptLines<'a> {
    /// Line number and text, without the line terminator.
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        self.skip_block_comment();
        let (text, rest) = self.rest.split_once('\n').unwrap_or((self.rest, ""));
        self.rest = rest;
        let number = self.line;
        self.line += 1;
        Some((number, text.strip_suffix('\r').unwrap_or(text)))
    }
}

/// A command keyword and its arguments as read from one line.
#[derive(Debug, Clone)]
pub struct ScriptLine {
    pub desc: &'static CommandDesc,
    words: Vec<String>,
    numbers: Vec<i64>,
}

impl ScriptLine {
    pub fn kind(&self) -> CommandKind {
        self.desc.kind
    }

    /// Number of arguments present on the line.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn word(&self, i: usize) -> &str {
        self.words.get(i).map_or("", String::as_str)
    }

    pub fn num(&self, i: usize) -> i64 {
        self.numbers.get(i).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Registered(ConditionId),
    /// A condition which failed to register. Commands inside are dropped.
    Unregistered,
}

/// Loader state carried from one line to the next.
#[derive(Debug, Clone)]
pub struct LoadState {
    pub level_version: i64,
    blocks: Vec<Block>,
    /// Lines left before `NEXT_COMMAND_REUSABLE` expires.
    reusable_lines: u8,
    line: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl Default for LoadState {
    fn default() -> Self {
        Self {
            level_version: DEFAULT_LEVEL_VERSION,
            blocks: Vec::new(),
            reusable_lines: 0,
            line: 0,
            diagnostics: Vec::new(),
        }
    }
}

impl LoadState {
    /// Forget open blocks and a pending `NEXT_COMMAND_REUSABLE`.
    pub fn reset_blocks(&mut self) {
        self.blocks.clear();
        self.reusable_lines = 0;
    }

    pub fn open_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Condition gating commands on the current line.
    pub fn current_condition(&self) -> Option<ConditionId> {
        match self.blocks.last() {
            Some(Block::Registered(id)) => Some(*id),
            _ => None,
        }
    }

    fn in_condition(&self) -> bool {
        !self.blocks.is_empty()
    }

    fn reusable(&self) -> bool {
        self.reusable_lines > 0
    }

    pub(crate) fn report(&mut self, severity: Severity, message: impl Into<String>) {
        let message = message.into();
        let line = self.line;
        match severity {
            Severity::Error => log::error!("Script (line {line}): {message}"),
            Severity::Warning => log::warn!("Script (line {line}): {message}"),
            Severity::Info => log::info!("{message}"),
        }
        self.diagnostics.push(Diagnostic {
            line,
            severity,
            message,
        });
    }

    pub(crate) fn warn(&mut self, message: impl Into<String>) {
        self.report(Severity::Warning, message);
    }
}

/// Everything a script line may read or change while it is loaded.
pub(crate) struct Loader<'a> {
    pub script: &'a mut LevelScript,
    pub host: &'a mut dyn GameHost,
    pub rng: &'a mut KeeperRng,
    pub state: &'a mut LoadState,
}

impl Loader<'_> {
    pub fn run(&mut self, text: &str, pass: Pass) {
        for (number, line) in ScriptLines::new(text) {
            self.state.line = number;
            if let Err(e) = self.scan_line(line, pass) {
                self.state.report(Severity::Error, e.to_string());
            }
        }
        self.state.line = 0;
    }

    /// Scan one line and run or store the command on it.
    pub fn scan_line(&mut self, text: &str, pass: Pass) -> Result<(), ScriptError> {
        self.state.reusable_lines = self.state.reusable_lines.saturating_sub(1);
        let Some(line) = self.read_line(text, pass)? else {
            return Ok(());
        };
        let kind = line.kind();
        if kind.is_setup_only() && self.state.in_condition() {
            self.state.warn(format!(
                "Command '{}' placed inside a conditional block",
                line.desc.keyword
            ));
        }
        if self.state.blocks.last() == Some(&Block::Unregistered) && kind != CommandKind::Endif {
            if kind.opens_condition() {
                self.state.blocks.push(Block::Unregistered);
            }
            self.state.warn(format!(
                "Command '{}' dropped, its condition was not registered",
                line.desc.keyword
            ));
            return Ok(());
        }
        let result = self
            .parse_command(&line)
            .and_then(|command| self.register(command));
        if result.is_err() && kind.opens_condition() {
            self.state.blocks.push(Block::Unregistered);
        }
        result
    }

    fn next_word(&mut self, scanner: &mut LineScanner) -> Result<Option<Word>, ScanError> {
        let word = scanner.next_word(self.rng);
        for warning in scanner.take_warnings() {
            self.state.warn(warning);
        }
        word
    }

    /// Tokenize a line. `Ok(None)` for blank lines, comments and commands
    /// not handled by this pass.
    pub(crate) fn read_line(&mut self, text: &str, pass: Pass) -> Result<Option<ScriptLine>, ScriptError> {
        let mut scanner = LineScanner::new(text);
        let Some(first) = self.next_word(&mut scanner)? else {
            return Ok(None);
        };
        let desc = match first.kind {
            WordKind::Name => find_command(&first.text, self.state.level_version),
            _ => None,
        };
        let Some(desc) = desc else {
            // Reported once, by the full pass.
            if pass == Pass::Full && first.text.starts_with(|c: char| c.is_ascii_alphanumeric()) {
                return Err(ScriptError::InvalidCommand {
                    word: first.text,
                    level_version: self.state.level_version,
                });
            }
            return Ok(None);
        };
        if desc.kind == CommandKind::Rem {
            return Ok(None);
        }
        if desc.kind.is_preloaded() != (pass == Pass::Preload) {
            return Ok(None);
        }

        let mut words = Vec::new();
        let mut numbers = Vec::new();
        for arg in desc.arg_kinds().take(desc.arg_count()) {
            if scanner.at_line_end() {
                break;
            }
            let Some(word) = self.next_word(&mut scanner)? else {
                break;
            };
            if word.text.is_empty() {
                break;
            }
            let number = match arg {
                ArgKind::Number => {
                    let parsed = parse_number(&word.text);
                    if !parsed.complete {
                        self.state.warn(format!(
                            "Numerical value '{}' interpreted as {}",
                            word.text, parsed.value
                        ));
                    }
                    parsed.value
                }
                ArgKind::Word => 0,
            };
            words.push(word.text);
            numbers.push(number);
        }
        if words.len() < desc.required_args() {
            return Err(ScriptError::NotEnoughParameters(desc.keyword));
        }
        Ok(Some(ScriptLine {
            desc,
            words,
            numbers,
        }))
    }

    /// Whether effects on this line are stored rather than applied now.
    fn deferred(&self) -> bool {
        self.state.current_condition().is_some() || self.state.reusable()
    }

    fn trigger_flags(&self) -> TriggerFlags {
        if self.state.reusable() {
            TriggerFlags::REUSABLE
        } else {
            TriggerFlags::empty()
        }
    }

    fn register(&mut self, command: ScriptCommand) -> Result<(), ScriptError> {
        let condition = self.state.current_condition();
        let flags = self.trigger_flags();
        match command {
            ScriptCommand::Condition { player, check } => {
                let id = self.script.add_condition(Condition {
                    parent: condition,
                    player,
                    check,
                    status: ConditionStatus::empty(),
                })?;
                self.state.blocks.push(Block::Registered(id));
            }
            ScriptCommand::Endif => {
                self.state.blocks.pop().ok_or(ScriptError::UnexpectedEndif)?;
            }
            ScriptCommand::Value(op) => {
                if self.deferred() {
                    self.script.add_value(ScriptValue {
                        condition,
                        flags,
                        op,
                    })?;
                } else {
                    op.apply(self.script, self.host);
                }
            }
            ScriptCommand::Spawn {
                player,
                location,
                spawn,
            } => {
                if self.deferred() {
                    self.script.add_party_trigger(PartyTrigger {
                        condition,
                        flags,
                        player,
                        location,
                        spawn,
                    })?;
                } else {
                    spawn_party_trigger(self.script, self.host, player, location, spawn);
                }
            }
            ScriptCommand::Tunneller(spawn) => {
                if self.deferred() {
                    self.script.add_tunneller_trigger(TunnellerTrigger {
                        condition,
                        flags,
                        spawn,
                    })?;
                } else {
                    spawn_tunneller_trigger(self.script, self.host, &spawn);
                }
            }
            ScriptCommand::CreateParty(name) => {
                if self.script.find_party(&name).is_some() {
                    self.state.warn(format!("Party '{name}' defined again"));
                    return Ok(());
                }
                self.script.create_party(&name)?;
            }
            ScriptCommand::AddToParty { party, member } => {
                let id = self
                    .script
                    .find_party(&party)
                    .ok_or(ScriptError::UndefinedParty(party))?;
                self.script.add_party_member(id, member)?;
            }
            ScriptCommand::Setup(op) => op.apply(self.host)?,
            ScriptCommand::WinGame => {
                let id = condition.ok_or(ScriptError::NoCondition("WIN GAME"))?;
                self.script.add_win_condition(id)?;
            }
            ScriptCommand::LoseGame => {
                let id = condition.ok_or(ScriptError::NoCondition("LOSE GAME"))?;
                self.script.add_lose_condition(id)?;
            }
            ScriptCommand::NextCommandReusable => self.state.reusable_lines = 2,
            ScriptCommand::LevelVersion(version) => {
                self.state.level_version = version;
                log::info!("Level files version {version}.");
            }
            ScriptCommand::Comment => {}
            ScriptCommand::BetaOnly(keyword) => {
                self.state.warn(format!(
                    "Command '{keyword}' is only supported in Dungeon Keeper Beta"
                ));
            }
        }
        Ok(())
    }
}
