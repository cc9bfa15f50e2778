//! Command-line interface for gzcore.
//!
//! Each subcommand loads the config, applies any DEFBINDS files and runs
//! against a fresh [`EngineContext`]. Output goes to the writer passed to
//! [`run`].

use crate::context::EngineContext;
use anyhow::{Context as _, Result, bail};
use clap::{Parser, Subcommand};
use gzcore_bindings::{BindingKind, DefbindsLump};
use gzcore_config::Config;
use gzcore_render::{IRect, SurfaceSize, ViewWindow, ViewportCalculator};
use std::io::Write;
use std::path::{Path, PathBuf};

/// gzcore - key bindings and viewport geometry for a Doom-engine port
#[derive(Parser, Debug)]
#[command(name = "gzcore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// DEFBINDS file applied before the config bindings (repeatable)
    #[arg(long = "defbinds", value_name = "PATH", global = true)]
    pub defbinds: Vec<PathBuf>,

    /// Set debug log level (overrides config and RUST_LOG)
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Binding table selector
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum TableArg {
    Primary,
    Double,
    Automap,
}

impl From<TableArg> for BindingKind {
    fn from(arg: TableArg) -> Self {
        match arg {
            TableArg::Primary => BindingKind::Primary,
            TableArg::Double => BindingKind::DoubleClick,
            TableArg::Automap => BindingKind::Automap,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List bindings (all tables when none is given)
    List {
        #[arg(value_enum)]
        table: Option<TableArg>,
    },

    /// Run console commands (bind, unbind, defaultbind, ...) in order
    Exec {
        /// One console line per argument
        #[arg(required = true)]
        commands: Vec<String>,

        /// Write the resulting bindings back to the config file
        #[arg(long)]
        save: bool,
    },

    /// Reset all bindings to the given DEFBINDS files and save
    Defaults {
        #[arg(required = true, value_name = "LUMP_FILE")]
        lumps: Vec<PathBuf>,
    },

    /// Show which keys are bound to a command
    Keys {
        command: String,
    },

    /// Print the viewport rectangles for a surface
    Viewport {
        /// Framebuffer size
        #[arg(long, value_name = "WxH", default_value = "640x480", value_parser = parse_size)]
        framebuffer: (i32, i32),

        /// Client-window size (defaults to the framebuffer size)
        #[arg(long, value_name = "WxH", value_parser = parse_size)]
        client: Option<(i32, i32)>,

        /// Status-bar size override (0-12)
        #[arg(long, value_name = "N")]
        blocks: Option<i32>,

        #[arg(long)]
        fullscreen: bool,
    },
}

/// Parse `WIDTHxHEIGHT`.
pub fn parse_size(s: &str) -> Result<(i32, i32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got \"{s}\""))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<i32>()
            .map_err(|e| format!("invalid dimension \"{v}\": {e}"))
    };
    Ok((parse(w)?, parse(h)?))
}

/// Load the config from `path`, or the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Read DEFBINDS files. The lump name is the file name.
pub fn read_lumps(paths: &[PathBuf]) -> Result<Vec<DefbindsLump>> {
    paths
        .iter()
        .map(|path| {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Ok(DefbindsLump::new(name, text))
        })
        .collect()
}

/// View window the game layer would use for `blocks`, centered on screen.
pub fn view_window(width: i32, height: i32, blocks: i32) -> ViewWindow {
    if blocks >= 10 {
        return ViewWindow::full(width, height);
    }
    let shrink = |extent: i32| (i64::from(blocks.max(0)) * i64::from(extent) / 10) as i32 & !7;
    let view_width = shrink(width);
    let view_height = shrink(height);
    ViewWindow {
        x: (width - view_width) / 2,
        y: (height - view_height) / 2,
        width: view_width,
        height: view_height,
    }
}

/// The three viewport rectangles as report lines.
pub fn viewport_report(calc: &ViewportCalculator) -> Vec<String> {
    let fmt = |name: &str, r: IRect| {
        format!(
            "{name:<10} {:>5},{:<5} {}x{}",
            r.left, r.top, r.width, r.height
        )
    };
    vec![
        fmt("letterbox", calc.letterbox()),
        fmt("screen", calc.screen()),
        fmt("scene", calc.scene()),
    ]
}

/// Run a parsed command line.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    config.validate()?;

    if let Commands::Viewport {
        framebuffer,
        client,
        blocks,
        fullscreen,
    } = &cli.command
    {
        let (width, height) = *framebuffer;
        if width <= 0 || height <= 0 {
            bail!("framebuffer size must be positive, got {width}x{height}");
        }
        let (client_width, client_height) = client.unwrap_or(*framebuffer);
        let mut render = config.render;
        if let Some(blocks) = blocks {
            render.screen_blocks = *blocks;
        }
        let mut calc = ViewportCalculator::new(&render);
        let surface = SurfaceSize {
            width,
            height,
            client_width,
            client_height,
            fullscreen: *fullscreen || render.fullscreen,
        };
        calc.set_output_viewport(
            None,
            &surface,
            view_window(width, height, render.screen_blocks),
        );
        log::debug!("viewport for {width}x{height}: {:?}", calc.scene());
        for line in viewport_report(&calc) {
            writeln!(out, "{line}")?;
        }
        return Ok(());
    }

    let mut ctx = EngineContext::new(config);
    for lump in read_lumps(&cli.defbinds)? {
        ctx.add_lump(lump);
    }
    ctx.load_bindings();

    match &cli.command {
        Commands::List { table } => {
            let kinds: Vec<BindingKind> = match table {
                Some(t) => vec![(*t).into()],
                None => BindingKind::ALL.to_vec(),
            };
            for kind in kinds {
                for line in ctx.bindings().table(kind).print_bindings(kind.list_header()) {
                    writeln!(out, "{line}")?;
                }
            }
        }
        Commands::Exec { commands, save } => {
            for line in commands {
                for output in ctx.execute(line) {
                    writeln!(out, "{output}")?;
                }
            }
            if *save {
                ctx.save(cli.config.as_deref())?;
                log::info!("Saved bindings");
            }
        }
        Commands::Defaults { lumps } => {
            let lumps = read_lumps(lumps)?;
            let report = ctx.bindings_mut().set_default_bindings(&lumps);
            for (lump, error) in &report.errors {
                writeln!(out, "{lump}: {error}")?;
            }
            ctx.save(cli.config.as_deref())?;
            writeln!(out, "{} default binding(s) applied", report.applied)?;
        }
        Commands::Keys { command } => {
            let description = ctx.bindings().primary.describe_command(command);
            if description.is_empty() {
                writeln!(out, "\"{command}\" is not bound")?;
            } else {
                writeln!(out, "{description}")?;
            }
        }
        Commands::Viewport { .. } => {}
    }
    Ok(())
}
