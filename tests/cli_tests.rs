mod common;

use clap::Parser;
use common::TestDir;
use gzcore::cli::{Cli, run};
use gzcore::config::Config;

fn run_cli(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(args)?;
    let mut out = Vec::new();
    run(&cli, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn test_missing_config_is_created() {
    let tmp = TestDir::new();
    let config = tmp.config_path();
    let out = run_cli(&["gzcore", "list", "--config", config.to_str().unwrap()]).unwrap();

    assert!(config.exists());
    assert!(out.starts_with("Current key bindings:\n"));
    assert!(out.contains("Current automap key bindings:"));
}

#[test]
fn test_exec_save_round_trip() {
    let tmp = TestDir::new();
    let config = tmp.config_path();
    let config = config.to_str().unwrap();

    run_cli(&[
        "gzcore",
        "exec",
        "bind w +forward",
        "doublebind mouse1 +use",
        "bind [ invprev",
        "--save",
        "--config",
        config,
    ])
    .unwrap();

    let saved = Config::load_from(&tmp.config_path()).unwrap();
    let bindings = saved.section("Bindings").unwrap();
    assert_eq!(bindings.get("w"), Some("+forward"));
    assert_eq!(bindings.get("LeftBracket"), Some("invprev"));
    assert_eq!(
        saved.section("DoubleBindings").and_then(|s| s.get("mouse1")),
        Some("+use")
    );

    let out = run_cli(&["gzcore", "list", "primary", "--config", config]).unwrap();
    assert!(out.contains("w \"+forward\""));
    assert!(out.contains("[ \"invprev\""));
}

#[test]
fn test_exec_without_save_leaves_config_alone() {
    let tmp = TestDir::new();
    let config = tmp.config_path();
    let config = config.to_str().unwrap();
    run_cli(&["gzcore", "list", "--config", config]).unwrap();
    let before = tmp.read_config();

    let out = run_cli(&["gzcore", "exec", "bind w +forward", "--config", config]).unwrap();
    assert!(out.is_empty());
    assert_eq!(tmp.read_config(), before);
}

#[test]
fn test_exec_reports_errors_inline() {
    let tmp = TestDir::new();
    let config = tmp.config_path();
    let out = run_cli(&[
        "gzcore",
        "exec",
        "bind nosuchkey foo",
        "rebind +jump",
        "--config",
        config.to_str().unwrap(),
    ])
    .unwrap();
    assert_eq!(
        out,
        "Unknown key \"nosuchkey\"\nRebind cannot be used from the console\n"
    );
}

#[test]
fn test_defbinds_files_and_keys() {
    let tmp = TestDir::new();
    let config = tmp.config_path();
    let lump = tmp.write_defbinds("DEFBINDS.txt", "w +forward\nuparrow +forward\n");
    let out = run_cli(&[
        "gzcore",
        "keys",
        "+forward",
        "--defbinds",
        lump.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ])
    .unwrap();
    assert_eq!(out, "w or uparrow\n");

    let out = run_cli(&[
        "gzcore",
        "keys",
        "+jump",
        "--config",
        config.to_str().unwrap(),
    ])
    .unwrap();
    assert_eq!(out, "\"+jump\" is not bound\n");
}

#[test]
fn test_viewport_report() {
    let tmp = TestDir::new();
    let config = tmp.config_path();
    let out = run_cli(&[
        "gzcore",
        "viewport",
        "--framebuffer",
        "640x480",
        "--client",
        "800x800",
        "--config",
        config.to_str().unwrap(),
    ])
    .unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("letterbox"));
    assert!(lines[0].ends_with("800x600"));
    // Scaled into the letterbox by default.
    assert!(lines[1].starts_with("screen"));
    assert!(lines[1].ends_with("800x600"));
}

#[test]
fn test_viewport_rejects_empty_framebuffer() {
    let tmp = TestDir::new();
    let config = tmp.config_path();
    let err = run_cli(&[
        "gzcore",
        "viewport",
        "--framebuffer",
        "0x480",
        "--config",
        config.to_str().unwrap(),
    ])
    .unwrap_err();
    assert!(err.to_string().contains("framebuffer size must be positive"));
}

#[test]
fn test_defaults_replaces_saved_bindings() {
    let tmp = TestDir::new();
    let config = tmp.config_path();
    let config = config.to_str().unwrap();
    run_cli(&["gzcore", "exec", "bind q quit", "--save", "--config", config]).unwrap();

    let lump = tmp.write_defbinds("base.txt", "w +forward\nmapbind tab togglemap\n");
    let out = run_cli(&["gzcore", "defaults", lump.to_str().unwrap(), "--config", config]).unwrap();
    assert_eq!(out, "2 default binding(s) applied\n");

    let saved = Config::load_from(&tmp.config_path()).unwrap();
    let bindings = saved.section("Bindings").unwrap();
    assert_eq!(bindings.get("q"), None);
    assert_eq!(bindings.get("w"), Some("+forward"));
    assert_eq!(
        saved.section("AutomapBindings").and_then(|s| s.get("tab")),
        Some("togglemap")
    );
}

#[test]
fn test_viewport_wide_framebuffer_with_status_bar() {
    let tmp = TestDir::new();
    let config = tmp.config_path();
    let out = run_cli(&[
        "gzcore",
        "viewport",
        "--framebuffer",
        "300000000x480",
        "--blocks",
        "9",
        "--config",
        config.to_str().unwrap(),
    ])
    .unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[2].starts_with("scene"));
}
