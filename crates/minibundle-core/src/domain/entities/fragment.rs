use std::fmt;

/// The minified, header-annotated text derived from one source.
///
/// Displays as `/* <pad><title> */  <code>`, with the title right-aligned to
/// `width` columns so headers in one bundle line up. Untitled fragments are
/// just the code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    title: Option<String>,
    width: usize,
    code: String,
}

impl Fragment {
    pub fn new(title: Option<String>, width: usize, code: impl Into<String>) -> Self {
        Self {
            title,
            width,
            code: code.into(),
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Join fragments in order, one per line.
    pub fn concat(fragments: &[Fragment]) -> String {
        fragments
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.title {
            Some(title) => {
                let pad = self.width.saturating_sub(title.chars().count());
                write!(f, "/* {}{} */  {}", " ".repeat(pad), title, self.code)
            }
            None => f.write_str(&self.code),
        }
    }
}
