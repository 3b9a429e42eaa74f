//! Last-minute text rewrites applied before a source reaches the minifier.
//!
//! All functions are pure and return `Cow::Borrowed` when nothing matched.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// `new Worker(<prefix>'<dir>/worker...')`
static WORKER_CTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"new Worker\((.*)['"](.*)/worker.*?\)"#).expect("worker constructor pattern")
});

/// Everything from the last `//.alias` marker that is followed by an
/// `endalias` marker, through the end of the `endalias` line.
static ALIAS_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(.*)//.alias.*endalias.*?\n(.*)").expect("alias block pattern")
});

/// One `importScripts(...)` statement and the rest of its line.
static IMPORT_SCRIPTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"importScripts\(.*?\).*?\n").expect("importScripts pattern"));

/// Point the kernel's worker construction at the bundle itself.
///
/// Once bundled, the worker script lives inside `bundle`, so a call like
/// `new Worker(base()+'physics/worker.js')` becomes `new Worker(base()+"arbor.js")`.
pub fn rewrite_worker_path<'a>(source: &'a str, bundle: &str) -> Cow<'a, str> {
    WORKER_CTOR.replace_all(source, |caps: &Captures<'_>| {
        format!("new Worker({}\"{}\")", &caps[1], bundle)
    })
}

/// Remove the alias block from a worker driver.
pub fn strip_alias_block(source: &str) -> Cow<'_, str> {
    match ALIAS_BLOCK.captures(source) {
        Some(caps) => Cow::Owned(format!("{}{}", &caps[1], &caps[2])),
        None => Cow::Borrowed(source),
    }
}

/// Drop `importScripts(...)` lines; the scripts they load are already bundled.
pub fn strip_import_scripts(source: &str) -> Cow<'_, str> {
    IMPORT_SCRIPTS.replace_all(source, "")
}

/// Full worker driver preparation: trim, strip aliases, strip imports.
pub fn prepare_worker_driver(source: &str) -> String {
    let trimmed = source.trim();
    let without_alias = strip_alias_block(trimmed);
    strip_import_scripts(&without_alias).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_worker_path_points_at_bundle() {
        let src = "this._physics = new Worker(arbor_path()+'physics/worker.js')\nnext()";
        let out = rewrite_worker_path(src, "arbor.js");
        assert_eq!(
            out,
            "this._physics = new Worker(arbor_path()+\"arbor.js\")\nnext()"
        );
    }

    #[test]
    fn double_quoted_worker_path_rewritten() {
        let out = rewrite_worker_path(r#"w = new Worker("lib/worker.js")"#, "bundle.js");
        assert_eq!(out, r#"w = new Worker("bundle.js")"#);
    }

    #[test]
    fn unrelated_source_is_borrowed() {
        let src = "var x = new Thing('a/b')";
        assert!(matches!(rewrite_worker_path(src, "a.js"), Cow::Borrowed(_)));
    }

    #[test]
    fn alias_region_is_removed() {
        let src = "head();\n// alias\nvar a = b;\nvar c = d;\n// endalias\ntail();";
        assert_eq!(strip_alias_block(src), "head();\ntail();");
    }

    #[test]
    fn alias_without_end_marker_is_kept() {
        let src = "head();\n// alias\nvar a = b;\ntail();";
        assert_eq!(strip_alias_block(src), src);
    }

    #[test]
    fn import_scripts_lines_removed() {
        let src = "importScripts('atoms.js');\nimportScripts('physics.js');  \nvar w = 1\n";
        assert_eq!(strip_import_scripts(src), "var w = 1\n");
    }

    #[test]
    fn import_on_last_line_without_newline_survives() {
        // The statement must end its line to be removed.
        assert_eq!(strip_import_scripts("importScripts('a.js')"), "importScripts('a.js')");
    }

    #[test]
    fn driver_preparation_combines_steps() {
        let src = "\n\n// worker.js\nimportScripts('atoms.js');\n//-alias\nvar $ = x\n//-endalias\nvar PhysicsWorker = 1\n\n";
        assert_eq!(
            prepare_worker_driver(src),
            "// worker.js\nvar PhysicsWorker = 1"
        );
    }
}
