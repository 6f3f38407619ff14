//! Phase timing checkpoints.
//!
//! A [`Checkpoints`] log records `(label, source line, instant)` at phase
//! boundaries and renders the time spent between consecutive marks. Use the
//! [`checkpoint!`](crate::checkpoint!) macro so the line tag is filled in
//! automatically.

use std::fmt::Write as _;
use std::time::{Duration, Instant};

/// One recorded phase boundary.
#[derive(Clone, Debug)]
pub struct Mark {
    pub label: String,
    pub line: u32,
    pub at: Instant,
}

#[derive(Debug)]
pub struct Checkpoints {
    origin: Instant,
    marks: Vec<Mark>,
}

impl Default for Checkpoints {
    fn default() -> Self {
        Self::new()
    }
}

impl Checkpoints {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            marks: Vec::new(),
        }
    }

    /// Record a phase boundary.
    pub fn mark(&mut self, label: impl Into<String>, line: u32) {
        let label = label.into();
        let at = Instant::now();
        log::debug!(
            "checkpoint '{}' (line {}) at {:.3}s",
            label,
            line,
            at.duration_since(self.origin).as_secs_f64()
        );
        self.marks.push(Mark { label, line, at });
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// Time since the previous mark (or since construction) for every mark.
    pub fn intervals(&self) -> Vec<(&Mark, Duration)> {
        let mut prev = self.origin;
        self.marks
            .iter()
            .map(|m| {
                let d = m.at.duration_since(prev);
                prev = m.at;
                (m, d)
            })
            .collect()
    }

    pub fn total(&self) -> Duration {
        self.marks
            .last()
            .map_or(Duration::ZERO, |m| m.at.duration_since(self.origin))
    }

    pub fn summary(&self) -> String {
        let mut out = String::new();
        let width = self
            .marks
            .iter()
            .map(|m| m.label.len())
            .max()
            .unwrap_or(0)
            .max(5);
        for (m, d) in self.intervals() {
            let _ = writeln!(
                out,
                "  {:<width$}  line {:>4}  {:>9.3} ms",
                m.label,
                m.line,
                d.as_secs_f64() * 1e3,
            );
        }
        let _ = writeln!(
            out,
            "  {:<width$}             {:>9.3} ms",
            "total",
            self.total().as_secs_f64() * 1e3,
        );
        out
    }

    pub fn print_summary(&self) {
        println!("\nCheckpoints:");
        print!("{}", self.summary());
    }
}

/// Record a checkpoint tagged with the current source line.
#[macro_export]
macro_rules! checkpoint {
    ($cp:expr, $label:expr) => {
        $cp.mark($label, line!())
    };
}
