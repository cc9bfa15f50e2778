//! Console commands that operate on the binding tables.
//!
//! Each command returns the lines it prints. Errors never abort: they are
//! turned into a message line by [`execute_line`].

use gzcore_bindings::{BindError, BindingKind, BindingSet, DefbindsLump, KeyTag, NO_KEY};
use thiserror::Error;

const DEFAULTBIND_USAGE: &str = "Usage: defaultbind <key> <command>";

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Invalid command line: {0}")]
    Parse(#[from] shell_words::ParseError),

    #[error("Unknown command \"{0}\"")]
    UnknownCommand(String),

    #[error(transparent)]
    Bind(#[from] BindError),
}

/// Binding-related console commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// `bind`, `doublebind`, `mapbind`
    Bind(BindingKind),
    /// `unbind`, `undoublebind`, `unmapbind`
    Unbind(BindingKind),
    UnbindAll,
    DefaultBind,
    Rebind,
    BindDefaults,
}

impl ConsoleCommand {
    pub const ALL: [ConsoleCommand; 10] = [
        ConsoleCommand::Bind(BindingKind::Primary),
        ConsoleCommand::Bind(BindingKind::DoubleClick),
        ConsoleCommand::Bind(BindingKind::Automap),
        ConsoleCommand::Unbind(BindingKind::Primary),
        ConsoleCommand::Unbind(BindingKind::DoubleClick),
        ConsoleCommand::Unbind(BindingKind::Automap),
        ConsoleCommand::UnbindAll,
        ConsoleCommand::DefaultBind,
        ConsoleCommand::Rebind,
        ConsoleCommand::BindDefaults,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ConsoleCommand::Bind(BindingKind::Primary) => "bind",
            ConsoleCommand::Bind(BindingKind::DoubleClick) => "doublebind",
            ConsoleCommand::Bind(BindingKind::Automap) => "mapbind",
            ConsoleCommand::Unbind(BindingKind::Primary) => "unbind",
            ConsoleCommand::Unbind(BindingKind::DoubleClick) => "undoublebind",
            ConsoleCommand::Unbind(BindingKind::Automap) => "unmapbind",
            ConsoleCommand::UnbindAll => "unbindall",
            ConsoleCommand::DefaultBind => "defaultbind",
            ConsoleCommand::Rebind => "rebind",
            ConsoleCommand::BindDefaults => "binddefaults",
        }
    }

    /// Case-insensitive lookup by command name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

/// What a command can see besides the binding tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandEnv<'a> {
    /// Key whose binding queued this command. `None` when typed at the
    /// console.
    pub trigger: Option<KeyTag>,
    /// DEFBINDS lumps for `binddefaults`.
    pub lumps: &'a [DefbindsLump],
}

/// Split a console line into arguments.
pub fn tokenize(line: &str) -> Result<Vec<String>, ConsoleError> {
    Ok(shell_words::split(line)?)
}

/// Run one console line, reporting errors as output lines.
pub fn execute_line(bindings: &mut BindingSet, env: &CommandEnv<'_>, line: &str) -> Vec<String> {
    match tokenize(line).and_then(|args| execute(bindings, env, &args)) {
        Ok(lines) => lines,
        Err(e) => {
            log::warn!("{line}: {e}");
            vec![e.to_string()]
        }
    }
}

/// Run a tokenized command. `args[0]` is the command name.
pub fn execute(
    bindings: &mut BindingSet,
    env: &CommandEnv<'_>,
    args: &[String],
) -> Result<Vec<String>, ConsoleError> {
    let Some(name) = args.first() else {
        return Ok(Vec::new());
    };
    let command = ConsoleCommand::from_name(name)
        .ok_or_else(|| ConsoleError::UnknownCommand(name.clone()))?;
    log::debug!("console: {}", args.join(" "));

    let lines = match command {
        ConsoleCommand::Bind(kind) => perform_bind(bindings, kind, &args[1..])?,
        ConsoleCommand::Unbind(kind) => {
            if let Some(key) = args.get(1) {
                bindings.table_mut(kind).unbind(key)?;
            }
            Vec::new()
        }
        ConsoleCommand::UnbindAll => {
            bindings.unbind_all();
            Vec::new()
        }
        ConsoleCommand::DefaultBind => {
            let (Some(key), Some(cmd)) = (args.get(1), args.get(2)) else {
                return Err(BindError::MissingArgument(DEFAULTBIND_USAGE).into());
            };
            bindings.primary.default_bind(key, cmd)?;
            Vec::new()
        }
        ConsoleCommand::Rebind => rebind(bindings, env.trigger, args.get(1))?,
        ConsoleCommand::BindDefaults => {
            let report = bindings.bind_defaults(env.lumps);
            report
                .errors
                .iter()
                .map(|(lump, e)| format!("{lump}: {e}"))
                .collect()
        }
    };
    Ok(lines)
}

/// `bind` family: list with no arguments, show with a key, set with a key
/// and a command.
fn perform_bind(
    bindings: &mut BindingSet,
    kind: BindingKind,
    args: &[String],
) -> Result<Vec<String>, BindError> {
    let table = bindings.table_mut(kind);
    let Some(key) = args.first() else {
        return Ok(table.print_bindings(kind.list_header()));
    };

    let code = table.names().code(key);
    if code == NO_KEY {
        return Err(BindError::UnknownKey(key.clone()));
    }
    match args.get(1) {
        None => Ok(vec![format!("\"{}\" = \"{}\"", key, table.binding(code))]),
        Some(command) => {
            if !table.set_bind(code, command) {
                return Err(BindError::KeyOutOfRange(u32::from(code)));
            }
            Ok(Vec::new())
        }
    }
}

/// Rebind whichever key triggered the running command.
fn rebind(
    bindings: &mut BindingSet,
    trigger: Option<KeyTag>,
    command: Option<&String>,
) -> Result<Vec<String>, BindError> {
    let tag = trigger
        .filter(|t| t.code() != NO_KEY)
        .ok_or(BindError::NoTriggeringKey)?;
    let kind = if tag.is_double_click() {
        BindingKind::DoubleClick
    } else {
        BindingKind::Primary
    };
    if let Some(command) = command {
        bindings.table_mut(kind).set_bind(tag.code(), command);
    }
    Ok(Vec::new())
}
