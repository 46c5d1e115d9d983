//! Progress reporting for evaluation runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use judge_application::EvaluationProgress;
use std::sync::Mutex;

/// Reports progress with an indicatif bar, one tick per evaluator
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock()
            && let Some(bar) = guard.as_ref()
        {
            f(bar);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl EvaluationProgress for ProgressReporter {
    fn on_evaluation_start(&self, repository: &str, total_evaluators: usize) {
        let bar = ProgressBar::new(total_evaluators as u64);
        bar.set_style(Self::bar_style());
        bar.set_prefix(repository.to_string());
        bar.set_message("Fetching repository...");

        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(bar);
        }
    }

    fn on_fetch_complete(&self, success: bool) {
        if !success {
            self.with_bar(|bar| bar.println(format!("{} repository fetch failed", "!".yellow())));
        }
    }

    fn on_rubric_start(&self, category: &str) {
        self.with_bar(|bar| bar.set_message(category.to_string()));
    }

    fn on_rubric_complete(&self, category: &str, score: u32, success: bool) {
        self.with_bar(|bar| {
            let status = if success {
                format!("{} {} ({})", "v".green(), category, score)
            } else {
                format!("{} {} (failed)", "x".red(), category)
            };
            bar.println(status);
            bar.inc(1);
        });
    }

    fn on_evaluation_complete(&self, total_score: u32) {
        if let Ok(mut guard) = self.bar.lock()
            && let Some(bar) = guard.take()
        {
            bar.finish_with_message(format!("{} total {}", "Done:".green(), total_score));
        }
    }
}

/// Simple text-based progress (no fancy UI), for non-terminal output
pub struct SimpleProgress;

impl EvaluationProgress for SimpleProgress {
    fn on_evaluation_start(&self, repository: &str, total_evaluators: usize) {
        eprintln!(
            "{} {} ({} evaluators)",
            "->".cyan(),
            repository.bold(),
            total_evaluators
        );
    }

    fn on_fetch_complete(&self, success: bool) {
        if !success {
            eprintln!("  {} repository fetch failed", "!".yellow());
        }
    }

    fn on_rubric_start(&self, _category: &str) {}

    fn on_rubric_complete(&self, category: &str, score: u32, success: bool) {
        if success {
            eprintln!("  {} {} ({})", "v".green(), category, score);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), category);
        }
    }

    fn on_evaluation_complete(&self, total_score: u32) {
        eprintln!("  total {}", total_score);
    }
}
