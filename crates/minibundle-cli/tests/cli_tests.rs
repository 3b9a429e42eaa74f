//! Integration tests for the `minibundle` binary.

use std::fs;
use std::path::Path;

use assert_cmd::{Command, cargo};
use predicates::prelude::*;
use tempfile::TempDir;

/// A command isolated from the user's config and log settings.
fn minibundle(home: &Path) -> Command {
    let mut cmd = cargo::cargo_bin_cmd!("minibundle");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("MINIBUNDLE_MINIFIER__PROGRAM")
        .env_remove("MINIBUNDLE_MINIFIER__ARGS")
        .env_remove("MINIBUNDLE_OUTPUT__FORMAT");
    cmd
}

fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (rel, content) in files {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

const TEMPLATE: &str = "{{LICENSE}}\n(function(){\n  {{DEPS}}\n  {{WORKER}}\n})()\n";

/// The arbor source tree with the built-in layout.
fn arbor_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let files = [
        ("src/etc.js", "var trace = function(){}\n"),
        (
            "src/kernel.js",
            "var w = new Worker(arbor_path()+'physics/worker.js')\n",
        ),
        ("src/physics/atoms.js", "var Point = function(){}\n"),
        ("src/physics/system.js", "var ParticleSystem = 1\n"),
        ("src/physics/barnes-hut.js", "var BarnesHutTree = 1\n"),
        ("src/physics/physics.js", "var Physics = 1\n"),
        (
            "src/physics/worker.js",
            "importScripts('atoms.js')\nvar physics = Physics()\n",
        ),
        ("src/graphics/colors.js", "var Colors = 1\n"),
        ("src/graphics/primitives.js", "var Primitives = 1\n"),
        ("src/graphics/graphics.js", "var Graphics = 1\n"),
        ("src/tween/easing.js", "var Easing = 1\n"),
        ("src/tween/tween.js", "var Tween = 1\n"),
        ("build/tmpl/arbor.js", TEMPLATE),
        ("build/tmpl/arbor-tween.js", TEMPLATE),
        ("build/tmpl/arbor-graphics.js", TEMPLATE),
        (
            "build/tmpl/LICENSE",
            "// (c) {{YEAR}} Samizdat Drafting Co.\n// springy.js derived\n",
        ),
    ];
    write_tree(dir.path(), &files);
    dir
}

// ── help / version ────────────────────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    minibundle(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn version_flag() {
    let home = TempDir::new().unwrap();
    minibundle(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn quiet_and_verbose_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    minibundle(home.path())
        .args(["--quiet", "--verbose", "list"])
        .assert()
        .code(2);
}

// ── list ──────────────────────────────────────────────────────────────────────

#[test]
fn list_names_builtin_targets_in_order() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    minibundle(home.path())
        .arg("list")
        .arg("-C")
        .arg(project.path())
        .args(["--format", "list"])
        .assert()
        .success()
        .stdout("arbor.js\narbor-tween.js\narbor-graphics.js\n");
}

#[test]
fn list_json_describes_sources_and_worker() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let out = minibundle(home.path())
        .arg("list")
        .arg("-C")
        .arg(project.path())
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["name"], "arbor.js");
    assert_eq!(rows[0]["worker"], true);
    assert_eq!(rows[2]["worker"], false);
    assert_eq!(rows[0]["sources"][1], "kernel.js");
}

#[test]
fn list_uses_project_manifest() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    write_tree(
        project.path(),
        &[(
            "minibundle.toml",
            "[[targets]]\nname = \"app.js\"\nsources = [\"a.js\"]\n",
        )],
    );
    minibundle(home.path())
        .arg("list")
        .arg("-C")
        .arg(project.path())
        .args(["--format", "list"])
        .assert()
        .success()
        .stdout("app.js\n");
}

#[test]
fn malformed_manifest_is_a_config_error() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    write_tree(project.path(), &[("minibundle.toml", "[[targets]\n")]);
    minibundle(home.path())
        .arg("list")
        .arg("-C")
        .arg(project.path())
        .assert()
        .code(4);
}

// ── init ──────────────────────────────────────────────────────────────────────

#[test]
fn init_writes_manifest_and_refuses_to_overwrite() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let manifest = project.path().join("minibundle.toml");

    minibundle(home.path())
        .arg("init")
        .arg("-C")
        .arg(project.path())
        .assert()
        .success();
    let written = fs::read_to_string(&manifest).unwrap();
    assert!(written.contains("name = \"arbor-graphics.js\""));

    minibundle(home.path())
        .arg("init")
        .arg("-C")
        .arg(project.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));

    fs::write(&manifest, "# edited\n").unwrap();
    minibundle(home.path())
        .args(["init", "--force", "-C"])
        .arg(project.path())
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&manifest).unwrap(), written);
}

// ── config / completions ──────────────────────────────────────────────────────

#[test]
fn config_get_reads_environment() {
    let home = TempDir::new().unwrap();
    minibundle(home.path())
        .args(["config", "get", "minifier.program"])
        .env("MINIBUNDLE_MINIFIER__PROGRAM", "esbuild")
        .assert()
        .success()
        .stdout("esbuild\n");
}

#[test]
fn config_get_unknown_key_fails() {
    let home = TempDir::new().unwrap();
    minibundle(home.path())
        .args(["config", "get", "nope"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("minifier.program"));
}

#[test]
fn config_file_sets_minifier() {
    let home = TempDir::new().unwrap();
    let cfg = home.path().join("custom.toml");
    fs::write(&cfg, "[minifier]\nprogram = \"terser\"\nargs = [\"-c\"]\n").unwrap();
    minibundle(home.path())
        .arg("--config")
        .arg(&cfg)
        .args(["config", "get", "minifier.args"])
        .assert()
        .success()
        .stdout("-c\n");
}

#[test]
fn missing_config_file_exits_with_config_code() {
    let home = TempDir::new().unwrap();
    minibundle(home.path())
        .args(["--config", "/definitely/not/here.toml", "list"])
        .assert()
        .code(4);
}

#[test]
fn completions_for_bash() {
    let home = TempDir::new().unwrap();
    minibundle(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("minibundle"));
}

// ── build ─────────────────────────────────────────────────────────────────────

#[cfg(unix)]
#[test]
fn build_with_cat_writes_every_bundle() {
    let home = TempDir::new().unwrap();
    let project = arbor_project();

    minibundle(home.path())
        .arg("build")
        .arg("-C")
        .arg(project.path())
        .args(["--year", "2011", "--minifier", "cat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Built 3 bundles"));

    let arbor = fs::read_to_string(project.path().join("lib/arbor.js")).unwrap();
    assert!(arbor.starts_with("// (c) 2011 Samizdat Drafting Co.\n// springy.js derived\n"));
    assert!(arbor.contains("  /*        etc.js */  var trace = function(){}\n"));
    assert!(arbor.contains("new Worker(arbor_path()+\"arbor.js\")"));
    assert!(arbor.contains("  /*     worker.js */  var physics = Physics()\n"));

    let tween = fs::read_to_string(project.path().join("lib/arbor-tween.js")).unwrap();
    assert!(!tween.contains("springy.js"));
    assert!(tween.contains("  /*  tween.js */  var Tween = 1\n"));
}

#[cfg(unix)]
#[test]
fn no_subcommand_builds() {
    let home = TempDir::new().unwrap();
    let project = arbor_project();
    minibundle(home.path())
        .current_dir(project.path())
        .env("MINIBUNDLE_MINIFIER__PROGRAM", "cat")
        .env("MINIBUNDLE_MINIFIER__ARGS", "-")
        .assert()
        .success();
    assert!(project.path().join("lib/arbor-graphics.js").is_file());
}

#[cfg(unix)]
#[test]
fn dry_run_writes_nothing() {
    let home = TempDir::new().unwrap();
    let project = arbor_project();

    minibundle(home.path())
        .arg("build")
        .arg("-C")
        .arg(project.path())
        .args(["--dry-run", "--minifier", "cat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert!(!project.path().join("lib").exists());
}

#[cfg(unix)]
#[test]
fn json_report_lists_selected_bundles() {
    let home = TempDir::new().unwrap();
    let project = arbor_project();

    let out = minibundle(home.path())
        .args(["--output-format", "json", "build", "-C"])
        .arg(project.path())
        .args(["-t", "arbor-graphics.js", "--minifier", "cat"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let bundles = report["bundles"].as_array().unwrap();
    assert_eq!(bundles.len(), 1);
    assert_eq!(bundles[0]["name"], "arbor-graphics.js");
    assert_eq!(bundles[0]["fragments"], 4);
    assert_eq!(bundles[0]["written"], true);
    assert!(!project.path().join("lib/arbor.js").exists());
}

#[test]
fn unknown_target_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    let project = arbor_project();
    minibundle(home.path())
        .arg("build")
        .arg("-C")
        .arg(project.path())
        .args(["-t", "nope.js", "--minifier", "cat"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("nope.js"))
        .stderr(predicate::str::contains("arbor-tween.js"));
}

#[cfg(unix)]
#[test]
fn missing_template_is_not_found() {
    let home = TempDir::new().unwrap();
    let project = arbor_project();
    fs::remove_file(project.path().join("build/tmpl/arbor-tween.js")).unwrap();

    minibundle(home.path())
        .arg("build")
        .arg("-C")
        .arg(project.path())
        .args(["--minifier", "cat"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("arbor-tween.js"));

    // Bundles before the failing one are kept.
    assert!(project.path().join("lib/arbor.js").is_file());
    assert!(!project.path().join("lib/arbor-graphics.js").exists());
}

#[cfg(unix)]
#[test]
fn failing_minifier_exits_with_tool_code() {
    let home = TempDir::new().unwrap();
    let project = arbor_project();

    minibundle(home.path())
        .arg("build")
        .arg("-C")
        .arg(project.path())
        .args(["--minifier", "sh", "--", "-c", "echo 'Unexpected token' >&2; exit 1"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Unexpected token"))
        .stderr(predicate::str::contains("etc.js"));

    assert!(!project.path().join("lib/arbor.js").exists());
}

#[cfg(unix)]
#[test]
fn trailing_words_are_flags_for_the_configured_program() {
    let home = TempDir::new().unwrap();
    let project = arbor_project();

    // `echo` ignores stdin, so each fragment body is the flags it was given.
    minibundle(home.path())
        .env("MINIBUNDLE_MINIFIER__PROGRAM", "echo")
        .arg("build")
        .arg("-C")
        .arg(project.path())
        .args(["-t", "arbor-tween.js", "--", "--beautify"])
        .assert()
        .success();

    let bundle = fs::read_to_string(project.path().join("lib/arbor-tween.js")).unwrap();
    assert!(bundle.contains("/*  tween.js */  --beautify\n"));
    assert!(!bundle.contains("--compress"));
}

#[test]
fn missing_minifier_program_exits_with_tool_code() {
    let home = TempDir::new().unwrap();
    let project = arbor_project();

    minibundle(home.path())
        .arg("build")
        .arg("-C")
        .arg(project.path())
        .args(["--minifier", "minibundle-test-no-such-minifier"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("minibundle-test-no-such-minifier"));
}

#[cfg(unix)]
#[test]
fn log_file_receives_events() {
    let home = TempDir::new().unwrap();
    let project = arbor_project();
    let log = home.path().join("build.log");

    minibundle(home.path())
        .arg("-vv")
        .arg("--log-file")
        .arg(&log)
        .arg("build")
        .arg("-C")
        .arg(project.path())
        .args(["-t", "arbor-tween.js", "--minifier", "cat"])
        .assert()
        .success();

    let text = fs::read_to_string(&log).unwrap();
    assert!(text.contains("arbor-tween.js"));
}
