//! Spinner shown while a blocking git call runs.
//!
//! Presentation only: it carries no data and has no effect on the submission
//! outcome. `indicatif` hides the bar automatically when stderr is not a
//! terminal, so tests and pipes see nothing.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.yellow} {wide_msg}")
        .unwrap()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " "])
}

/// Run `f` with an animated spinner and the given message; the spinner is
/// cleared before returning, whatever `f` produced.
pub fn with_phase<T>(message: &str, f: impl FnOnce() -> T) -> T {
    let pb = ProgressBar::new_spinner();
    pb.set_style(spinner_style());
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));

    let out = f();
    pb.finish_and_clear();
    out
}
