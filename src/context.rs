//! Engine-side owner of the binding tables, dispatcher and command queue.
//!
//! Input events resolve to commands in a queue. `run_queued` drains the
//! queue: binding commands run against the tables with their triggering key,
//! anything else is handed back to the caller.

use crate::console::{self, CommandEnv, ConsoleCommand};
use anyhow::{Context as _, Result};
use gzcore_bindings::{
    BindingSet, BindingTable, Clock, CommandSink, CustomKeySection, DefbindsLump,
    InputDispatcher, InputEvent, KeyTag, MonotonicClock,
};
use gzcore_config::Config;
use std::collections::VecDeque;
use std::path::Path;

/// Commands resolved from input, waiting to run.
#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: VecDeque<(String, KeyTag)>,
}

impl CommandQueue {
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pop(&mut self) -> Option<(String, KeyTag)> {
        self.pending.pop_front()
    }
}

impl CommandSink for CommandQueue {
    fn add_command(&mut self, command: &str, key: KeyTag) {
        self.pending.push_back((command.to_string(), key));
    }
}

/// Result of draining the command queue.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueuedOutcome {
    /// Lines printed by binding commands.
    pub output: Vec<String>,
    /// Commands this layer does not handle, in queue order.
    pub passthrough: Vec<(String, KeyTag)>,
}

pub struct EngineContext<C: Clock = MonotonicClock> {
    config: Config,
    bindings: BindingSet,
    dispatcher: InputDispatcher<C>,
    queue: CommandQueue,
    lumps: Vec<DefbindsLump>,
    custom_sections: Vec<CustomKeySection>,
    automap_active: bool,
}

impl EngineContext<MonotonicClock> {
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, MonotonicClock::default())
    }
}

impl<C: Clock> EngineContext<C> {
    pub fn with_clock(config: Config, clock: C) -> Self {
        let mut dispatcher = InputDispatcher::with_clock(clock);
        dispatcher.set_double_click_window(u64::from(config.input.double_click_ms));
        Self {
            config,
            bindings: BindingSet::new(),
            dispatcher,
            queue: CommandQueue::default(),
            lumps: Vec::new(),
            custom_sections: Vec::new(),
            automap_active: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn bindings(&self) -> &BindingSet {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut BindingSet {
        &mut self.bindings
    }

    pub fn dispatcher(&self) -> &InputDispatcher<C> {
        &self.dispatcher
    }

    pub fn queue(&self) -> &CommandQueue {
        &self.queue
    }

    /// Register a DEFBINDS lump. Takes effect on the next `load_bindings`
    /// or `binddefaults`.
    pub fn add_lump(&mut self, lump: DefbindsLump) {
        self.lumps.push(lump);
    }

    pub fn add_custom_section(&mut self, section: CustomKeySection) {
        self.custom_sections.push(section);
    }

    pub fn custom_sections(&self) -> &[CustomKeySection] {
        &self.custom_sections
    }

    /// Route events through the automap table instead of primary/double.
    pub fn set_automap_active(&mut self, active: bool) {
        self.automap_active = active;
    }

    pub fn set_chat_mode(&mut self, on: bool) {
        self.dispatcher.set_chat_mode(on);
    }

    /// Reset to defaults, then overlay the persisted sections.
    ///
    /// Custom key sections are applied to the primary table last. Returns
    /// the number of config entries applied.
    pub fn load_bindings(&mut self) -> usize {
        let report = self.bindings.set_default_bindings(&self.lumps);
        for (lump, error) in &report.errors {
            crate::debug_error!("BINDINGS", "{}: {}", lump, error);
        }

        let loaded = self.bindings.load_from_config(&self.config) + self.reload_custom_sections();
        crate::debug_info!(
            "BINDINGS",
            "{} default(s), {} persisted binding(s)",
            report.applied,
            loaded
        );
        loaded
    }

    /// Feed one input event to the dispatcher.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        let (binds, double) = active_tables(&self.bindings, self.automap_active);
        self.dispatcher.dispatch(event, binds, double, &mut self.queue)
    }

    /// Same as [`Self::handle_event`] with an explicit timestamp.
    pub fn handle_event_at(&mut self, now: u64, event: &InputEvent) -> bool {
        let (binds, double) = active_tables(&self.bindings, self.automap_active);
        self.dispatcher
            .dispatch_at(now, event, binds, double, &mut self.queue)
    }

    /// Drain the queue.
    pub fn run_queued(&mut self) -> QueuedOutcome {
        let mut outcome = QueuedOutcome::default();
        while let Some((command, tag)) = self.queue.pop() {
            let is_binding_command = console::tokenize(&command)
                .ok()
                .and_then(|args| args.first().and_then(|a| ConsoleCommand::from_name(a)))
                .is_some();
            if !is_binding_command {
                outcome.passthrough.push((command, tag));
                continue;
            }
            let env = CommandEnv {
                trigger: Some(tag),
                lumps: &self.lumps,
            };
            outcome
                .output
                .extend(console::execute_line(&mut self.bindings, &env, &command));
        }
        outcome
    }

    /// Run a line typed at the console.
    pub fn execute(&mut self, line: &str) -> Vec<String> {
        crate::debug_log!("CONSOLE", "{}", line);
        let env = CommandEnv {
            trigger: None,
            lumps: &self.lumps,
        };
        console::execute_line(&mut self.bindings, &env, line)
    }

    /// Write the tables into the config. Keys moved to custom sections are
    /// rebound from those sections afterwards.
    pub fn archive_bindings(&mut self) {
        self.bindings
            .archive(&mut self.config, &self.custom_sections);
        self.reload_custom_sections();
    }

    fn reload_custom_sections(&mut self) -> usize {
        let mut loaded = 0;
        for custom in &self.custom_sections {
            if let Some(section) = self.config.section(&custom.name) {
                loaded += self.bindings.primary.load_section(section);
            }
        }
        loaded
    }

    /// Archive and write the config to `path`, or the default location.
    pub fn save(&mut self, path: Option<&Path>) -> Result<()> {
        self.archive_bindings();
        match path {
            Some(path) => self
                .config
                .save_to(path)
                .with_context(|| format!("saving {}", path.display())),
            None => self.config.save(),
        }
    }
}

fn active_tables(
    bindings: &BindingSet,
    automap_active: bool,
) -> (&BindingTable, Option<&BindingTable>) {
    if automap_active {
        (&bindings.automap, None)
    } else {
        (&bindings.primary, Some(&bindings.double))
    }
}
