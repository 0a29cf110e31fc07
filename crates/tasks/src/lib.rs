//! Task registry for scout.
//!
//! One task name maps to one task implementation. The registry is a closed
//! set of tagged variants — there are no runtime-loaded tasks, so open-ended
//! dynamic dispatch buys nothing here.

pub mod garment;

pub use garment::GarmentResearchTask;

use scout_core::task::ResearchTask;

/// The closed set of runnable tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    GarmentResearch,
}

impl TaskKind {
    /// Every registered task, in display order.
    pub const ALL: &'static [TaskKind] = &[TaskKind::GarmentResearch];

    /// The stable CLI name of this task.
    pub fn name(&self) -> &'static str {
        match self {
            TaskKind::GarmentResearch => "garment-research",
        }
    }

    /// One-line description for listings.
    pub fn description(&self) -> &'static str {
        match self {
            TaskKind::GarmentResearch => {
                "Monthly sweep of garment simulation & computational fashion research"
            }
        }
    }

    /// Instantiate the task implementation.
    pub fn build(&self, lookback_days: u32, max_items: usize) -> Box<dyn ResearchTask> {
        match self {
            TaskKind::GarmentResearch => {
                Box::new(GarmentResearchTask::new(lookback_days, max_items))
            }
        }
    }
}

impl std::str::FromStr for TaskKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskKind::ALL
            .iter()
            .copied()
            .find(|k| k.name() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = TaskKind::ALL.iter().map(|k| k.name()).collect();
                format!("unknown task '{s}', available: {}", known.join(", "))
            })
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in TaskKind::ALL {
            let parsed: TaskKind = kind.name().parse().unwrap();
            assert_eq!(parsed, *kind);
        }
    }

    #[test]
    fn unknown_name_lists_known_tasks() {
        let err = "mystery-task".parse::<TaskKind>().unwrap_err();
        assert!(err.contains("garment-research"));
    }

    #[test]
    fn build_wires_parameters_through() {
        let task = TaskKind::GarmentResearch.build(14, 5);
        assert_eq!(task.name(), "garment-research");
        assert_eq!(task.lookback_days(), 14);
        assert_eq!(task.max_items(), 5);
    }
}
