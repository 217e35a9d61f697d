use chrono::{DateTime, Utc};
use serde::Serialize;

/// Counters the achievement rules are evaluated against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub total_checkins: u32,
    pub current_streak: u32,
    pub completed_tasks: u32,
    pub saved_papers: u32,
    pub research_interests: u32,
    pub first_checkin_at: Option<DateTime<Utc>>,
    pub first_task_completed_at: Option<DateTime<Utc>>,
    pub first_paper_saved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
    pub progress: u32,
    pub target: u32,
}

#[derive(Clone, Copy)]
enum Metric {
    Checkins,
    Streak,
    CompletedTasks,
    SavedPapers,
    Interests,
}

struct Rule {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
    metric: Metric,
    target: u32,
}

const RULES: [Rule; 10] = [
    Rule {
        id: "first_checkin",
        name: "First check-in",
        description: "Complete your first daily check-in",
        icon: "📅",
        metric: Metric::Checkins,
        target: 1,
    },
    Rule {
        id: "checkin_week",
        name: "One-week streak",
        description: "Check in 7 days in a row",
        icon: "🔥",
        metric: Metric::Streak,
        target: 7,
    },
    Rule {
        id: "checkin_month",
        name: "Monthly champion",
        description: "Check in 30 days in a row",
        icon: "🏆",
        metric: Metric::Streak,
        target: 30,
    },
    Rule {
        id: "task_beginner",
        name: "Task beginner",
        description: "Complete 10 tasks",
        icon: "✅",
        metric: Metric::CompletedTasks,
        target: 10,
    },
    Rule {
        id: "task_expert",
        name: "Task expert",
        description: "Complete 100 tasks",
        icon: "🎯",
        metric: Metric::CompletedTasks,
        target: 100,
    },
    Rule {
        id: "paper_collector",
        name: "Paper collector",
        description: "Save 50 papers",
        icon: "📚",
        metric: Metric::SavedPapers,
        target: 50,
    },
    Rule {
        id: "paper_master",
        name: "Paper master",
        description: "Save 200 papers",
        icon: "🎓",
        metric: Metric::SavedPapers,
        target: 200,
    },
    Rule {
        id: "researcher",
        name: "Researcher",
        description: "Add 5 research interests",
        icon: "🔬",
        metric: Metric::Interests,
        target: 5,
    },
    Rule {
        id: "first_task",
        name: "Getting started",
        description: "Complete your first task",
        icon: "🚀",
        metric: Metric::CompletedTasks,
        target: 1,
    },
    Rule {
        id: "first_paper",
        name: "Knowledge builder",
        description: "Save your first paper",
        icon: "📖",
        metric: Metric::SavedPapers,
        target: 1,
    },
];

/// Evaluate every achievement. Unlock times are only known for the
/// "first ..." achievements, which unlock with the first record.
pub fn evaluate(snapshot: &ProgressSnapshot) -> Vec<Achievement> {
    RULES
        .iter()
        .map(|rule| {
            let value = match rule.metric {
                Metric::Checkins => snapshot.total_checkins,
                Metric::Streak => snapshot.current_streak,
                Metric::CompletedTasks => snapshot.completed_tasks,
                Metric::SavedPapers => snapshot.saved_papers,
                Metric::Interests => snapshot.research_interests,
            };
            let unlocked = value >= rule.target;

            let unlocked_at = match (rule.target, rule.metric) {
                (1, Metric::Checkins) => snapshot.first_checkin_at,
                (1, Metric::CompletedTasks) => snapshot.first_task_completed_at,
                (1, Metric::SavedPapers) => snapshot.first_paper_saved_at,
                _ => None,
            }
            .filter(|_| unlocked);

            Achievement {
                id: rule.id,
                name: rule.name,
                description: rule.description,
                icon: rule.icon,
                unlocked,
                unlocked_at,
                progress: value.min(rule.target),
                target: rule.target,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by_id<'a>(list: &'a [Achievement], id: &str) -> &'a Achievement {
        list.iter().find(|a| a.id == id).unwrap()
    }

    #[test]
    fn nothing_unlocked_for_new_user() {
        let list = evaluate(&ProgressSnapshot::default());
        assert_eq!(list.len(), 10);
        assert!(list.iter().all(|a| !a.unlocked && a.progress == 0));
    }

    #[test]
    fn progress_is_capped_at_target() {
        let first = Utc::now();
        let snapshot = ProgressSnapshot {
            total_checkins: 40,
            current_streak: 9,
            completed_tasks: 12,
            saved_papers: 0,
            research_interests: 2,
            first_checkin_at: Some(first),
            first_task_completed_at: Some(first),
            first_paper_saved_at: None,
        };
        let list = evaluate(&snapshot);

        let week = by_id(&list, "checkin_week");
        assert!(week.unlocked);
        assert_eq!(week.progress, 7);

        let month = by_id(&list, "checkin_month");
        assert!(!month.unlocked);
        assert_eq!(month.progress, 9);

        assert!(by_id(&list, "task_beginner").unlocked);
        assert_eq!(by_id(&list, "task_expert").progress, 12);
        assert_eq!(by_id(&list, "researcher").progress, 2);

        assert_eq!(by_id(&list, "first_checkin").unlocked_at, Some(first));
        assert_eq!(by_id(&list, "first_task").unlocked_at, Some(first));
        assert_eq!(by_id(&list, "first_paper").unlocked_at, None);
        assert_eq!(by_id(&list, "checkin_week").unlocked_at, None);
    }
}
