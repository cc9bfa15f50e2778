//! Engine-level binding flow: defaults, dispatch, console, persistence.

mod common;

use common::TestDir;
use gzcore::EngineContext;
use gzcore::bindings::{Clock, CustomKeySection, DefbindsLump, InputEvent, KeyNameTable};
use gzcore::config::Config;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Default)]
struct ManualClock(Rc<Cell<u64>>);

impl ManualClock {
    fn advance(&self, ms: u64) {
        self.0.set(self.0.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

fn code(name: &str) -> u16 {
    KeyNameTable::global().code(name)
}

const DEFAULTS: &str = r#"
// base bindings
w       +forward
mouse1  +attack
t       messagemode
doublebind mouse1 +use
mapbind tab togglemap
"#;

fn engine(config: Config) -> (EngineContext<ManualClock>, ManualClock) {
    let clock = ManualClock::default();
    let mut ctx = EngineContext::with_clock(config, clock.clone());
    ctx.add_lump(DefbindsLump::new("DEFBINDS", DEFAULTS));
    ctx.load_bindings();
    (ctx, clock)
}

fn commands(ctx: &mut EngineContext<ManualClock>) -> Vec<String> {
    ctx.run_queued()
        .passthrough
        .into_iter()
        .map(|(c, _)| c)
        .collect()
}

#[test]
fn test_double_click_window_comes_from_config() {
    let mut config = Config::default();
    config.input.double_click_ms = 200;
    let (mut ctx, clock) = engine(config);
    let m1 = code("mouse1");

    ctx.handle_event(&InputEvent::key_down(m1));
    ctx.handle_event(&InputEvent::key_up(m1));
    clock.advance(300);
    ctx.handle_event(&InputEvent::key_down(m1));
    assert_eq!(commands(&mut ctx), ["+attack", "-attack", "+attack"]);

    ctx.handle_event(&InputEvent::key_up(m1));
    clock.advance(100);
    ctx.handle_event(&InputEvent::key_down(m1));
    assert_eq!(commands(&mut ctx), ["-attack", "+use"]);
}

#[test]
fn test_chat_mode_blocks_mouse_bindings_only() {
    let (mut ctx, _) = engine(Config::default());
    ctx.set_chat_mode(true);
    assert!(!ctx.handle_event(&InputEvent::key_down(code("mouse1"))));
    assert!(ctx.handle_event(&InputEvent::key_down(code("t"))));
    assert_eq!(commands(&mut ctx), ["messagemode"]);
}

#[test]
fn test_console_and_bound_commands_share_tables() {
    let (mut ctx, _) = engine(Config::default());
    assert!(ctx.execute("unbind w").is_empty());
    assert!(!ctx.handle_event(&InputEvent::key_down(code("w"))));

    ctx.execute("bind f9 \"mapbind tab am_toggle\"");
    ctx.handle_event(&InputEvent::key_down(code("f9")));
    let outcome = ctx.run_queued();
    assert!(outcome.passthrough.is_empty());
    assert_eq!(ctx.bindings().automap.binding(code("tab")), "am_toggle");
}

#[test]
fn test_binddefaults_restores_defaults_over_changes() {
    let (mut ctx, _) = engine(Config::default());
    ctx.execute("bind w +jump");
    ctx.execute("bind x +crouch");
    assert!(ctx.execute("binddefaults").is_empty());
    assert_eq!(ctx.bindings().primary.binding(code("w")), "+forward");
    assert_eq!(ctx.bindings().primary.binding(code("x")), "+crouch");
}

#[test]
fn test_saved_bindings_survive_a_restart() {
    let tmp = TestDir::new();
    let path = tmp.config_path();

    let (mut ctx, _) = engine(Config::default());
    ctx.add_custom_section(CustomKeySection::new("Mod.Bindings", ["+dash", "+grapple"]));
    ctx.execute("bind q +dash");
    ctx.execute("bind e +grapple");
    ctx.execute("unbind w");
    ctx.save(Some(&path)).unwrap();
    assert_eq!(ctx.bindings().primary.binding(code("q")), "+dash");
    assert_eq!(ctx.bindings().primary.binding(code("w")), "");

    let saved = Config::load_from(&path).unwrap();
    let custom = saved.section("Mod.Bindings").unwrap();
    assert_eq!(custom.len(), 2);
    let primary = saved.section("Bindings").unwrap();
    assert_eq!(primary.get("q"), None);
    assert_eq!(primary.get("w"), None);

    let (mut restarted, _) = engine(saved);
    restarted.add_custom_section(CustomKeySection::new("Mod.Bindings", ["+dash", "+grapple"]));
    restarted.load_bindings();
    let table = &restarted.bindings().primary;
    assert_eq!(table.binding(code("q")), "+dash");
    assert_eq!(table.binding(code("e")), "+grapple");
    assert_eq!(table.binding(code("mouse1")), "+attack");
}
