use std::fmt;

use serde::{Deserialize, Serialize};

/// Task urgency. Serialized lower-case, matching the on-disk format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// low → medium → high → low.
    pub fn next(self) -> Self {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }

    /// Display rank: high sorts first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    /// Single-character marker used in the task panel.
    pub fn marker(self) -> char {
        match self {
            Priority::High => '!',
            Priority::Medium => 'o',
            Priority::Low => '-',
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

/// One entry of the task list. Identity is its position in storage order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub text: String,
    pub done: bool,
    #[serde(default)]
    pub priority: Priority,
}

impl Task {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            done: false,
            priority: Priority::Medium,
        }
    }

    fn with(text: &str, done: bool, priority: Priority) -> Self {
        Self {
            text: text.to_string(),
            done,
            priority,
        }
    }

    /// Tasks shown on first launch, before anything has been persisted.
    pub fn seed() -> Vec<Task> {
        vec![
            Task::with("Review project documentation", false, Priority::Medium),
            Task::with("Debug terminal interface", true, Priority::High),
            Task::with("Implement weather module", false, Priority::Medium),
            Task::with("Optimize system performance", false, Priority::Low),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_cycle_has_period_three() {
        for p in [Priority::Low, Priority::Medium, Priority::High] {
            assert_eq!(p.next().next().next(), p);
        }
        assert_eq!(Priority::Low.next(), Priority::Medium);
        assert_eq!(Priority::Medium.next(), Priority::High);
        assert_eq!(Priority::High.next(), Priority::Low);
    }

    #[test]
    fn priority_rank_orders_high_first() {
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
    }

    #[test]
    fn task_json_shape() {
        let json = serde_json::to_string(&Task::new("buy milk")).unwrap();
        assert_eq!(json, r#"{"text":"buy milk","done":false,"priority":"medium"}"#);
    }

    #[test]
    fn missing_priority_defaults_to_medium() {
        let t: Task = serde_json::from_str(r#"{"text":"x","done":true}"#).unwrap();
        assert_eq!(t.priority, Priority::Medium);
        assert!(t.done);
    }

    #[test]
    fn seed_has_both_done_states() {
        let seed = Task::seed();
        assert!(seed.iter().any(|t| t.done));
        assert!(seed.iter().any(|t| !t.done));
    }
}
