//! Display mode abstraction for terminal output
//!
//! Commands render either human-readable text or a single JSON document.
//! Callers describe what to show; the mode decides how it looks.

use crate::flow::{ActionResult, AdvanceOutcome, FlowSnapshot};
use colored::Colorize;
use serde::Serialize;

/// JSON envelope for machine-readable output
#[derive(Serialize)]
struct JsonOut<T: Serialize> {
    ok: bool,
    data: T,
}

/// Display mode determines how output is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Human-readable lines
    Text,

    /// One JSON document per command
    Json,
}

impl DisplayMode {
    /// Pick the mode and apply the color preference
    pub fn new(json: bool, color: bool) -> Self {
        colored::control::set_override(color && !json);
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }

    /// Check if this is JSON mode
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    /// Show an informational message (text mode only)
    pub fn show_info(&self, message: &str) {
        if let Self::Text = self {
            println!("{}", message);
        }
    }

    /// Show a success message (text mode only)
    pub fn show_success(&self, message: &str) {
        if let Self::Text = self {
            println!("{} {}", "✓".green(), message.green());
        }
    }

    /// Show a warning message (text mode only)
    pub fn show_warning(&self, message: &str) {
        if let Self::Text = self {
            println!("{} {}", "Warning:".yellow(), message);
        }
    }

    /// Show an error message on stderr
    pub fn show_error(&self, message: &str) {
        eprintln!("{} {}", "Error:".red().bold(), message);
    }

    /// Emit `data` as the command's JSON result
    pub fn emit_json<T: Serialize>(&self, data: T) -> serde_json::Result<()> {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
        Ok(())
    }

    /// One line describing a replayed action
    pub fn format_action(result: &ActionResult) -> String {
        let snap = &result.snapshot;
        let outcome = match (result.advance, result.retreated) {
            (Some(AdvanceOutcome::Moved(_)), _) => "continue".green().to_string(),
            (Some(AdvanceOutcome::Blocked), _) => "blocked".yellow().to_string(),
            (Some(AdvanceOutcome::Completed), _) => "complete".cyan().bold().to_string(),
            (Some(AdvanceOutcome::AlreadyComplete), _) => "already complete".dimmed().to_string(),
            (None, Some(true)) => "back".blue().to_string(),
            (None, Some(false)) => "back (no-op)".dimmed().to_string(),
            (None, None) => "update".normal().to_string(),
        };
        format!(
            "#{:<3} {:<18} {}",
            result.index,
            outcome,
            Self::format_position(snap)
        )
    }

    /// Position line for a snapshot
    pub fn format_position(snap: &FlowSnapshot) -> String {
        match snap.state.step() {
            Some(step) => format!(
                "step {}/{} {:<20} {:>5.1}%  continue {}",
                step + 1,
                snap.total_steps,
                snap.step_name,
                snap.progress_percent,
                if snap.can_advance { "enabled" } else { "disabled" }
            ),
            None => format!("complete ({} steps)", snap.total_steps),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_selection() {
        assert!(DisplayMode::new(true, true).is_json());
        assert!(!DisplayMode::new(false, false).is_json());
    }
}
