//! Terminal progress for `minibundle build`.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use minibundle_core::application::BuildObserver;

/// Spinner on stderr showing the bundle and fragment currently being built.
///
/// A disabled observer draws nothing; the build command still prints its
/// summary through the output manager.
pub struct SpinnerObserver {
    bar: ProgressBar,
}

impl SpinnerObserver {
    pub fn new(enabled: bool) -> Self {
        let bar = if enabled {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.cyan} {prefix:.bold} {wide_msg:.dim}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar.enable_steady_tick(Duration::from_millis(80));
            bar
        } else {
            ProgressBar::hidden()
        };
        Self { bar }
    }

    /// Remove the spinner line.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl BuildObserver for SpinnerObserver {
    fn target_started(&self, name: &str, sources: usize) {
        self.bar.set_prefix(name.to_string());
        self.bar.set_message(format!("{sources} sources"));
    }

    fn fragment_compiled(&self, title: &str) {
        self.bar.set_message(title.to_string());
    }

    fn target_finished(&self, name: &str, bytes: usize, written: bool) {
        let verb = if written { "wrote" } else { "rendered" };
        self.bar.set_message(format!("{verb} {name} ({bytes} bytes)"));
    }
}

impl Drop for SpinnerObserver {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_observer_accepts_events() {
        let observer = SpinnerObserver::new(false);
        observer.target_started("arbor.js", 10);
        observer.fragment_compiled("etc.js");
        observer.target_finished("arbor.js", 1024, true);
        observer.finish();
        assert!(observer.bar.is_finished());
    }
}
