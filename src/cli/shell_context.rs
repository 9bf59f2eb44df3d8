//! Runtime state shared by every shell command.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::NaiveDate;
use serde::Serialize;
use spendwise_core::{AggregateCache, Clock, ReportAssembler};
use spendwise_domain::LedgerSnapshot;

use crate::cli::{commands, output, registry::CommandRegistry, render::AmountFormatter};
use crate::cli::system_clock::SystemClock;
use crate::config::{self, Config, ConfigManager};
use crate::errors::{CliError, CommandError};
use crate::utils::persistence::load_snapshot_from_file;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub clock: Arc<dyn Clock>,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub snapshot: Option<LedgerSnapshot>,
    pub snapshot_path: Option<PathBuf>,
    pub cache: AggregateCache,
    pub json_output: bool,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_clock(mode, Arc::new(SystemClock))
    }

    pub fn with_clock(mode: CliMode, clock: Arc<dyn Clock>) -> Result<Self, CliError> {
        let config_manager = config::default_manager()?;
        let config = config_manager.load()?;
        if !config.ui_color_enabled {
            colored::control::set_override(false);
        }

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let mut context = Self {
            mode,
            registry,
            clock,
            config_manager,
            config,
            snapshot: None,
            snapshot_path: None,
            cache: AggregateCache::new(),
            json_output: false,
            last_command: None,
            running: true,
        };
        context.auto_load();
        Ok(context)
    }

    /// Loads the configured default snapshot, if one is set and present.
    fn auto_load(&mut self) {
        let Some(path) = self.config.default_snapshot_path.clone() else {
            return;
        };
        if !path.exists() {
            return;
        }
        if let Err(err) = self.load_snapshot(&path) {
            output::warning(format!("Could not load `{}`: {err}", path.display()));
        }
    }

    pub fn prompt(&self) -> String {
        match self.snapshot_path.as_ref().and_then(|path| path.file_stem()) {
            Some(stem) => format!("spendwise [{}]> ", stem.to_string_lossy()),
            None => "spendwise> ".to_string(),
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn load_snapshot(&mut self, path: &Path) -> Result<(), CommandError> {
        let loaded = load_snapshot_from_file(path)?;
        for warning in &loaded.warnings {
            output::warning(warning);
        }
        self.cache.clear();
        output::success(format!(
            "Loaded snapshot `{}` ({} transactions, {} budgets).",
            path.display(),
            loaded.snapshot.transactions.len(),
            loaded.snapshot.budgets.len()
        ));
        self.snapshot = Some(loaded.snapshot);
        self.snapshot_path = Some(path.to_path_buf());
        Ok(())
    }

    pub fn snapshot(&self) -> Result<&LedgerSnapshot, CommandError> {
        self.snapshot.as_ref().ok_or(CommandError::SnapshotNotLoaded)
    }

    /// Report builder over the loaded snapshot, backed by the session cache.
    pub fn reports(&self) -> Result<ReportAssembler<'_>, CommandError> {
        let snapshot = self.snapshot()?;
        Ok(ReportAssembler::new(snapshot)?.with_cache(&self.cache))
    }

    pub fn amount_formatter(&self) -> AmountFormatter {
        AmountFormatter::from_config(&self.config)
    }

    pub fn persist_config(&self) -> Result<(), CommandError> {
        self.config_manager
            .save(&self.config)
            .map_err(|err| CommandError::Cli(err.into()))
    }

    pub fn emit_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), CommandError> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    pub fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.find(command).map(|entry| entry.handler) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        if let Some(best) = self.registry.suggest(input) {
            output::info(format!("Suggestion: `{best}`?"));
        }
    }

    pub fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::SnapshotNotLoaded => {
                output::error(CommandError::SnapshotNotLoaded);
                output::hint("Try `load path/to/snapshot.json`.");
            }
            other => output::error(other),
        }
    }
}
