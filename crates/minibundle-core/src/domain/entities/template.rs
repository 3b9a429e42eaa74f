//! Wrapper templates and the placeholder renderer.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  WrapperTemplate (one per bundle, e.g. build/tmpl/arbor.js)  │
//! │  ├── (function($){                                           │
//! │  │     {{LICENSE}}        ← replaced line by line            │
//! │  │     {{DEPS}}           ← indent kept on every value line  │
//! │  │   })(this.jQuery)                                         │
//! │  └───────────────────────────────────────────────────────────│
//! │  RenderContext (ordered NAME → value pairs)                  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Placeholder rules
//!
//! - A tag only counts when it opens its line, after optional spaces/tabs.
//! - The whole tag line is replaced; anything after the tag is dropped.
//! - Every newline inside the value is followed by the tag line's indent.
//! - Names are substituted in context order. A value that itself starts with
//!   a later tag is therefore substituted again.
//! - Unknown tags are left as-is.

/// Ordered set of placeholder values for one render.
///
/// Names are upper-cased on insertion, so `deps` and `DEPS` are the same tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    variables: Vec<(String, String)>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a variable, consuming self.
    ///
    /// Replacing keeps the variable's original position.
    pub fn with_variable(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        let key = key.as_ref().to_uppercase();
        let value = value.into();
        match self.variables.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.variables.push((key, value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        let key = key.to_uppercase();
        self.variables
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Raw template text for one bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperTemplate {
    name: String,
    text: String,
}

impl WrapperTemplate {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Substitute every variable of `ctx` into the template.
    pub fn render(&self, ctx: &RenderContext) -> String {
        let mut lines: Vec<String> = self.text.split('\n').map(str::to_owned).collect();

        for (key, value) in ctx.iter() {
            let tag = format!("{{{{{key}}}}}");
            for line in lines.iter_mut() {
                if let Some(indent) = tag_indent(line, &tag) {
                    let replaced = indent_value(indent, value);
                    *line = replaced;
                }
            }
        }

        lines.join("\n")
    }
}

/// Leading whitespace of `line` if the line opens with `tag`.
fn tag_indent<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    let rest = line.trim_start_matches([' ', '\t']);
    rest.starts_with(tag)
        .then(|| &line[..line.len() - rest.len()])
}

fn indent_value(indent: &str, value: &str) -> String {
    let mut out = String::with_capacity(value.len() + indent.len());
    out.push_str(indent);
    out.push_str(&value.replace('\n', &format!("\n{indent}")));
    out
}
