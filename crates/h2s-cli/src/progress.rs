use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::ui;

const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";
const DOCUMENTS_TEMPLATE: &str = "{bar:30.cyan/blue} {pos}/{len} documents {msg}";

/// Optional indicatif bar on stderr; every method is a no-op when progress
/// output is disabled.
pub struct Progress {
    bar: Option<ProgressBar>,
}

impl Progress {
    /// Spinner for a single document conversion.
    #[must_use]
    pub fn spinner(message: &str) -> Self {
        let Some(bar) = Self::enabled(ProgressBar::new_spinner) else {
            return Self { bar: None };
        };
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template(SPINNER_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    /// Bar counting converted documents in a batch.
    #[must_use]
    pub fn documents(total: usize) -> Self {
        let total = u64::try_from(total).unwrap_or(u64::MAX);
        let Some(bar) = Self::enabled(|| ProgressBar::new(total)) else {
            return Self { bar: None };
        };
        bar.set_style(
            ProgressStyle::with_template(DOCUMENTS_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self { bar: Some(bar) }
    }

    fn enabled(make: impl FnOnce() -> ProgressBar) -> Option<ProgressBar> {
        if !ui::prefs().progress {
            return None;
        }
        let bar = make();
        bar.set_draw_target(ProgressDrawTarget::stderr());
        Some(bar)
    }

    pub fn set_message(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(message.to_string());
        }
    }

    /// Print a line above the bar without tearing it.
    pub fn println(&self, line: &str) {
        match &self.bar {
            Some(bar) => bar.println(line),
            None => eprintln!("{line}"),
        }
    }

    pub fn inc(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    pub fn finish_ok(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(message.to_string());
        }
    }

    pub fn finish_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    pub fn finish_err(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(message.to_string());
        }
    }
}
