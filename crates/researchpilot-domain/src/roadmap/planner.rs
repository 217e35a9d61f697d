use chrono::{DateTime, Utc};

use super::{Roadmap, RoadmapPhase, RoadmapSettings};
use crate::shared::UserId;

struct PhaseTemplate {
    name: &'static str,
    /// Share of total weeks in tenths of a percent; `None` takes the remainder.
    share_permille: Option<u32>,
    tasks: &'static [&'static str],
}

const PHASES: [PhaseTemplate; 4] = [
    PhaseTemplate {
        name: "Phase 1: Literature review and theoretical groundwork",
        share_permille: Some(300),
        tasks: &[
            "Read the classic and recent literature of the field",
            "Organize the relevant concepts and theoretical framework",
            "Pick the entry point and methods of the research",
            "Write a literature review",
        ],
    },
    PhaseTemplate {
        name: "Phase 2: Problem modeling and method design",
        share_permille: Some(400),
        tasks: &[
            "State the research problem mathematically",
            "Design the solution or proof strategy",
            "Carry out a preliminary theoretical analysis",
            "Check feasibility on small cases",
        ],
    },
    PhaseTemplate {
        name: "Phase 3: In-depth research and validation",
        share_permille: Some(250),
        tasks: &[
            "Complete the main derivations or computations",
            "Validate results thoroughly",
            "Analyze results and refine the method",
            "Consolidate data and conclusions",
        ],
    },
    PhaseTemplate {
        name: "Phase 4: Writing and submission",
        share_permille: None,
        tasks: &[
            "Write the first draft",
            "Revise and polish the paper",
            "Prepare submission materials",
            "Submit and follow up on reviews",
        ],
    },
];

/// Split `settings.total_weeks` into the four research phases.
///
/// Shares are floored; the last phase takes what is left. Phases that end up
/// with zero weeks are dropped and `start_week` stays consecutive over the
/// remaining ones.
pub fn plan(user_id: UserId, settings: RoadmapSettings, created_at: DateTime<Utc>) -> Roadmap {
    let total = settings.total_weeks;
    let mut allocated = 0u32;
    let mut next_start = 1u32;
    let mut phases = Vec::with_capacity(PHASES.len());

    for template in &PHASES {
        let weeks = match template.share_permille {
            Some(permille) => total * permille / 1000,
            None => total.saturating_sub(allocated),
        };
        allocated += weeks;

        if weeks == 0 {
            continue;
        }

        phases.push(RoadmapPhase {
            name: template.name.to_string(),
            weeks,
            start_week: next_start,
            tasks: template.tasks.iter().map(|t| t.to_string()).collect(),
        });
        next_start += weeks;
    }

    Roadmap::restore(
        user_id,
        settings.topic,
        total,
        settings.daily_hours,
        settings.theory_ratio,
        created_at,
        phases,
    )
}
