//! Built-in manifest: the arbor target table.
//!
//! Used when a project has no `minibundle.toml`, and written out by
//! `minibundle init`.

use minibundle_core::error::{BundleError, BundleResult};

use crate::manifest_loader::Manifest;

/// Canonical text of the built-in manifest.
pub const BUILTIN_MANIFEST: &str = r#"# minibundle build manifest

[paths]
src = "src"
templates = "build/tmpl"
license = "build/tmpl/LICENSE"
output = "lib"

[worker]
kernel = "kernel.js"
driver = "physics/worker.js"
title = "worker.js"

[license]
exclude_marker = "springy.js"
exclude_for = ["graphics", "tween"]

[[targets]]
name = "arbor.js"
sources = [
    "etc.js",
    "kernel.js",
    "physics/atoms.js",
    "physics/system.js",
    "physics/barnes-hut.js",
    "physics/physics.js",
]

[[targets]]
name = "arbor-tween.js"
sources = ["etc.js", "graphics/colors.js", "tween/easing.js", "tween/tween.js"]

[[targets]]
name = "arbor-graphics.js"
sources = [
    "etc.js",
    "graphics/colors.js",
    "graphics/primitives.js",
    "graphics/graphics.js",
]
"#;

/// Parse [`BUILTIN_MANIFEST`].
pub fn builtin_manifest() -> BundleResult<Manifest> {
    Manifest::from_toml_str(BUILTIN_MANIFEST).map_err(|e| BundleError::Internal {
        message: format!("built-in manifest is invalid: {e}"),
    })
}
