#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::shared::UserId;
    use chrono::Utc;

    fn weeks_of(total: u32) -> Vec<(u32, u32)> {
        let settings = RoadmapSettings::new("Knot invariants", total, 4, 0.7).unwrap();
        plan(UserId::new(1), settings, Utc::now())
            .phases()
            .iter()
            .map(|p| (p.weeks, p.start_week))
            .collect()
    }

    #[test]
    fn test_twelve_weeks_split() {
        // 3, 4, 3 and the remaining 2
        assert_eq!(weeks_of(12), vec![(3, 1), (4, 4), (3, 8), (2, 11)]);
    }

    #[test]
    fn test_ten_weeks_split() {
        // 3, 4, 2 and the remaining 1
        assert_eq!(weeks_of(10), vec![(3, 1), (4, 4), (2, 8), (1, 10)]);
    }

    #[test]
    fn test_zero_week_phases_are_dropped() {
        // floor(0.3) = floor(0.4) = floor(0.25) = 0, remainder 1
        assert_eq!(weeks_of(1), vec![(1, 1)]);
        // 0, 1, 0, remainder 2
        assert_eq!(weeks_of(3), vec![(1, 1), (2, 2)]);
    }

    #[test]
    fn test_phase_weeks_sum_to_total() {
        for total in 1..=52 {
            let phases = weeks_of(total);
            assert_eq!(phases.iter().map(|(w, _)| w).sum::<u32>(), total);
            assert_eq!(phases[0].1, 1);
            for pair in phases.windows(2) {
                assert_eq!(pair[1].1, pair[0].1 + pair[0].0);
            }
        }
    }

    #[test]
    fn test_each_phase_has_four_tasks() {
        let settings = RoadmapSettings::new("PDE", 20, 2, 0.5).unwrap();
        let roadmap = plan(UserId::new(9), settings, Utc::now());

        assert_eq!(roadmap.phases().len(), 4);
        assert!(roadmap.phases().iter().all(|p| p.tasks.len() == 4));
        assert_eq!(roadmap.topic(), "PDE");
        assert_eq!(roadmap.total_weeks(), 20);
        assert_eq!(roadmap.user_id(), UserId::new(9));
    }

    #[test]
    fn test_settings_bounds() {
        assert!(RoadmapSettings::new("t", 0, 4, 0.5).is_err());
        assert!(RoadmapSettings::new("t", 53, 4, 0.5).is_err());
        assert!(RoadmapSettings::new("t", 12, 0, 0.5).is_err());
        assert!(RoadmapSettings::new("t", 12, 25, 0.5).is_err());
        assert!(RoadmapSettings::new("t", 12, 4, 1.5).is_err());
        assert!(RoadmapSettings::new("t", 12, 4, f64::NAN).is_err());
        assert!(RoadmapSettings::new("", 12, 4, 0.5).is_err());
        assert!(RoadmapSettings::new("t", 52, 24, 1.0).is_ok());
    }
}
