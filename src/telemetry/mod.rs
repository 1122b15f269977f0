//! Telemetry for flow sessions
//!
//! In-process event log and counters for one flow instance, plus a terminal
//! summary. Nothing here leaves the process.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Events kept in the log; counters keep running past this
pub const MAX_TELEMETRY_EVENTS: usize = 256;

/// Telemetry event types
#[derive(Debug, Clone)]
pub enum TelemetryEvent {
    StepAdvanced {
        from: usize,
        to: usize,
        timestamp: Instant,
    },
    AdvanceBlocked {
        step: usize,
        failed_checks: Vec<String>,
        timestamp: Instant,
    },
    StepRetreated {
        from: usize,
        to: usize,
        timestamp: Instant,
    },
    AnswerUpdated {
        field: String,
        step: Option<usize>,
        timestamp: Instant,
    },
    FlowCompleted {
        timestamp: Instant,
    },
}

/// Telemetry statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TelemetryStats {
    pub advances: usize,
    pub blocked_advances: usize,
    pub retreats: usize,
    pub updates: usize,
    pub completed: bool,
}

/// Telemetry collector owned by a single flow
#[derive(Debug, Clone)]
pub struct FlowTelemetry {
    /// Ring of the most recent events
    events: VecDeque<TelemetryEvent>,
    max_events: usize,
    stats: TelemetryStats,
    start_time: Instant,
}

impl FlowTelemetry {
    /// Create a new telemetry collector
    pub fn new() -> Self {
        Self::with_capacity(MAX_TELEMETRY_EVENTS)
    }

    /// Create a collector retaining at most `max_events` events
    pub fn with_capacity(max_events: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_events.min(MAX_TELEMETRY_EVENTS)),
            max_events,
            stats: TelemetryStats::default(),
            start_time: Instant::now(),
        }
    }

    /// Record an event
    pub fn record(&mut self, event: TelemetryEvent) {
        match &event {
            TelemetryEvent::StepAdvanced { .. } => self.stats.advances += 1,
            TelemetryEvent::AdvanceBlocked { .. } => self.stats.blocked_advances += 1,
            TelemetryEvent::StepRetreated { .. } => self.stats.retreats += 1,
            TelemetryEvent::AnswerUpdated { .. } => self.stats.updates += 1,
            TelemetryEvent::FlowCompleted { .. } => self.stats.completed = true,
        }
        if self.events.len() >= self.max_events {
            self.events.pop_front();
        }
        if self.max_events > 0 {
            self.events.push_back(event);
        }
    }

    /// Get current statistics
    pub fn stats(&self) -> &TelemetryStats {
        &self.stats
    }

    /// Get elapsed time since start
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Number of events still held in the log
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Get recent events (last n)
    pub fn recent_events(&self, n: usize) -> Vec<TelemetryEvent> {
        let start = self.events.len().saturating_sub(n);
        self.events.range(start..).cloned().collect()
    }

    /// Share of advance attempts the validator let through
    pub fn acceptance_rate(&self) -> f64 {
        let total = self.stats.advances + self.stats.blocked_advances;
        if total == 0 {
            1.0
        } else {
            self.stats.advances as f64 / total as f64
        }
    }
}

impl Default for FlowTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple telemetry display
pub struct TelemetryDisplay<'a> {
    telemetry: &'a FlowTelemetry,
    verbosity: crate::cli::Verbosity,
}

impl<'a> TelemetryDisplay<'a> {
    /// Create a new display
    pub fn new(telemetry: &'a FlowTelemetry, verbosity: crate::cli::Verbosity) -> Self {
        Self {
            telemetry,
            verbosity,
        }
    }

    /// Display summary statistics
    pub fn display_summary(&self) {
        if !self.verbosity.show_progress() {
            return;
        }

        let stats = self.telemetry.stats();
        println!("\nSession Summary");
        println!("─────────────────────────────────────");
        println!("Duration:          {:?}", self.telemetry.elapsed());
        println!("Answers updated:   {}", stats.updates);
        println!("Steps advanced:    {}", stats.advances);
        println!("Blocked advances:  {}", stats.blocked_advances);
        println!("Steps back:        {}", stats.retreats);
        println!("Acceptance rate:   {:.1}%", self.telemetry.acceptance_rate() * 100.0);
        println!("Completed:         {}", if stats.completed { "yes" } else { "no" });
        println!();
    }

    /// Check if should show per-event output
    pub fn should_show_details(&self) -> bool {
        self.verbosity.show_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_creation() {
        let telemetry = FlowTelemetry::new();
        assert_eq!(telemetry.event_count(), 0);
        assert_eq!(telemetry.stats(), &TelemetryStats::default());
    }

    #[test]
    fn test_record_counts() {
        let mut telemetry = FlowTelemetry::new();
        telemetry.record(TelemetryEvent::AnswerUpdated {
            field: "email".to_string(),
            step: Some(1),
            timestamp: Instant::now(),
        });
        telemetry.record(TelemetryEvent::StepAdvanced {
            from: 0,
            to: 1,
            timestamp: Instant::now(),
        });
        telemetry.record(TelemetryEvent::FlowCompleted {
            timestamp: Instant::now(),
        });

        let stats = telemetry.stats();
        assert_eq!(stats.updates, 1);
        assert_eq!(stats.advances, 1);
        assert!(stats.completed);
        assert_eq!(telemetry.event_count(), 3);
    }

    #[test]
    fn test_acceptance_rate() {
        let mut telemetry = FlowTelemetry::new();
        assert_eq!(telemetry.acceptance_rate(), 1.0);

        telemetry.record(TelemetryEvent::StepAdvanced {
            from: 0,
            to: 1,
            timestamp: Instant::now(),
        });
        telemetry.record(TelemetryEvent::AdvanceBlocked {
            step: 1,
            failed_checks: vec!["email".to_string()],
            timestamp: Instant::now(),
        });
        assert!((telemetry.acceptance_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_recent_events() {
        let mut telemetry = FlowTelemetry::new();
        for i in 0..10 {
            telemetry.record(TelemetryEvent::StepRetreated {
                from: i + 1,
                to: i,
                timestamp: Instant::now(),
            });
        }
        assert_eq!(telemetry.recent_events(3).len(), 3);
        assert_eq!(telemetry.recent_events(30).len(), 10);
    }

    #[test]
    fn test_event_log_is_bounded() {
        let mut telemetry = FlowTelemetry::with_capacity(4);
        for i in 0..10 {
            telemetry.record(TelemetryEvent::AnswerUpdated {
                field: "email".to_string(),
                step: Some(i),
                timestamp: Instant::now(),
            });
        }

        assert_eq!(telemetry.event_count(), 4);
        assert_eq!(telemetry.stats().updates, 10);

        let recent = telemetry.recent_events(10);
        assert_eq!(recent.len(), 4);
        assert!(matches!(recent[0], TelemetryEvent::AnswerUpdated { step: Some(6), .. }));
        assert!(matches!(recent[3], TelemetryEvent::AnswerUpdated { step: Some(9), .. }));
    }
}
