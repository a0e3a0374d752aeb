use console::{style, Term};
use std::time::Instant;
use usergen::progress::Progress;

const MIN_BAR_WIDTH: usize = 10;
const MAX_BAR_WIDTH: usize = 50;

/// Single-line progress bar on stderr, redrawn in place.
///
/// Draws nothing when stderr is not a terminal, so piped output stays clean.
pub(super) struct TerminalProgress {
    term: Term,
    enabled: bool,
    label: String,
    total: usize,
    current: usize,
    started: Instant,
}

impl TerminalProgress {
    pub(super) fn new() -> Self {
        let term = Term::stderr();
        let enabled = term.is_term();
        Self {
            term,
            enabled,
            label: String::new(),
            total: 0,
            current: 0,
            started: Instant::now(),
        }
    }

    fn draw(&self) {
        if !self.enabled {
            return;
        }
        let (_, columns) = self.term.size();
        let line = render_bar(
            &self.label,
            self.current,
            self.total,
            self.started.elapsed().as_secs(),
            columns as usize,
        );
        let _ = self.term.clear_line();
        let _ = self.term.write_str(&line);
    }
}

impl Progress for TerminalProgress {
    fn start(&mut self, label: &str, total: usize) {
        self.label = label.to_string();
        self.total = total;
        self.current = 0;
        self.started = Instant::now();
        self.draw();
    }

    fn tick(&mut self) {
        self.current = (self.current + 1).min(self.total);
        self.draw();
    }

    fn finish(&mut self) {
        self.current = self.total;
        self.draw();
        if self.enabled {
            let _ = self.term.write_line("");
        }
    }
}

/// `<label>  <pct>% [=====>     ] m:ss`
pub(super) fn render_bar(
    label: &str,
    current: usize,
    total: usize,
    elapsed_secs: u64,
    columns: usize,
) -> String {
    let percent = if total == 0 {
        100
    } else {
        current * 100 / total
    };
    let elapsed = format!("{}:{:02}", elapsed_secs / 60, elapsed_secs % 60);

    // label, two spaces, "100% ", brackets, space, elapsed
    let fixed = console::measure_text_width(label) + 2 + 5 + 2 + 1 + elapsed.len();
    let width = columns
        .saturating_sub(fixed)
        .clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH);

    let filled = if total == 0 {
        width
    } else {
        current * width / total
    };
    let mut bar = "=".repeat(filled);
    if filled < width {
        bar.push('>');
        bar.push_str(&" ".repeat(width - filled - 1));
    }

    format!(
        "{}  {:>3}% [{}] {}",
        label,
        percent,
        style(bar).cyan(),
        elapsed
    )
}
