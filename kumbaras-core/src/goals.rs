//! Savings goals: progress, completion projection, and monthly allocation

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Days per projected month
const DAYS_PER_MONTH: i64 = 30;

/// Projection stops once the balance overshoots the target by this factor
const OVERSHOOT: f64 = 1.1;

/// Goals further out than this (100 years) are reported as out of reach
pub const MAX_PROJECTION_MONTHS: f64 = 1200.0;

/// A savings bucket the owner is filling
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingsGoal {
    pub name: String,
    pub target: f64,
    pub saved: f64,
    /// Fraction (0.0 - 1.0) of each month's savings routed here.
    /// Goals without a share split whatever is left equally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share: Option<f64>,
}

impl SavingsGoal {
    pub fn new(name: impl Into<String>, target: f64, saved: f64) -> Self {
        Self {
            name: name.into(),
            target,
            saved,
            share: None,
        }
    }

    /// Fill level, clamped to 0.0-1.0
    pub fn progress(&self) -> f64 {
        if self.target <= 0.0 {
            return 1.0;
        }
        (self.saved / self.target).clamp(0.0, 1.0)
    }

    pub fn remaining(&self) -> f64 {
        (self.target - self.saved).max(0.0)
    }

    pub fn project(&self, monthly_rate: f64, today: NaiveDate) -> GoalProjection {
        project_goal(self.saved, self.target, monthly_rate, today)
    }
}

/// Goals seeded into a fresh config
pub fn default_goals() -> Vec<SavingsGoal> {
    vec![
        SavingsGoal::new("🚗 Car Fund", 15000.0, 2000.0),
        SavingsGoal::new("✈️ Copenhagen Trip", 2000.0, 500.0),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointKind {
    Current,
    Projected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub date: NaiveDate,
    pub balance: f64,
    pub kind: PointKind,
}

/// Outcome of projecting a goal forward at a constant monthly rate
#[derive(Debug, Clone, PartialEq)]
pub enum GoalProjection {
    /// Already saved at least the target
    Reached,
    /// A non-positive rate never closes the gap
    Never,
    /// The rate is positive but too small to get there within
    /// [`MAX_PROJECTION_MONTHS`]
    OutOfReach,
    OnTrack {
        months_needed: f64,
        target_date: NaiveDate,
        series: Vec<ProjectionPoint>,
    },
}

impl GoalProjection {
    pub fn summary(&self) -> String {
        match self {
            GoalProjection::Reached => "🎉 Goal reached!".to_string(),
            GoalProjection::Never => {
                "⚠️ With zero or negative savings you will never get there".to_string()
            }
            GoalProjection::OutOfReach => {
                "⚠️ At this rate the goal is more than 100 years away".to_string()
            }
            GoalProjection::OnTrack {
                months_needed,
                target_date,
                ..
            } => format!(
                "📅 Estimated date: {} (in {:.1} months)",
                target_date.format("%d/%m/%Y"),
                months_needed
            ),
        }
    }
}

/// Project when `saved` reaches `target` if `monthly_rate` is added every month.
pub fn project_goal(
    saved: f64,
    target: f64,
    monthly_rate: f64,
    today: NaiveDate,
) -> GoalProjection {
    if saved >= target {
        return GoalProjection::Reached;
    }
    if monthly_rate <= 0.0 {
        return GoalProjection::Never;
    }

    let months_needed = (target - saved) / monthly_rate;
    if !months_needed.is_finite() || months_needed > MAX_PROJECTION_MONTHS {
        return GoalProjection::OutOfReach;
    }
    let days_needed = (months_needed * DAYS_PER_MONTH as f64) as i64;
    let target_date = Duration::try_days(days_needed).and_then(|d| today.checked_add_signed(d));
    let Some(target_date) = target_date else {
        return GoalProjection::OutOfReach;
    };

    let mut series = vec![ProjectionPoint {
        date: today,
        balance: saved,
        kind: PointKind::Current,
    }];

    let mut balance = saved;
    let mut date = today;
    let step = Duration::days(DAYS_PER_MONTH);
    for _ in 0..(months_needed as usize + 2) {
        let Some(next) = date.checked_add_signed(step) else {
            break;
        };
        date = next;
        balance += monthly_rate;
        series.push(ProjectionPoint {
            date,
            balance,
            kind: PointKind::Projected,
        });
        if balance >= target * OVERSHOOT {
            break;
        }
    }

    GoalProjection::OnTrack {
        months_needed,
        target_date,
        series,
    }
}

/// Money routed to one goal from a month's savings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Allocation {
    pub name: String,
    pub added: f64,
    pub new_total: f64,
    pub target: f64,
    pub progress: f64,
}

/// Split a month's savings across goals by their shares.
///
/// A negative month adds nothing. Explicit shares are taken first (capped so
/// they never exceed the whole); goals without a share split the remainder.
pub fn allocate_savings(monthly_savings: f64, goals: &[SavingsGoal]) -> Vec<Allocation> {
    let pool = monthly_savings.max(0.0);

    let explicit: f64 = goals.iter().filter_map(|g| g.share).map(|s| s.max(0.0)).sum();
    let scale = if explicit > 1.0 { 1.0 / explicit } else { 1.0 };
    let unshared = goals.iter().filter(|g| g.share.is_none()).count();
    let leftover = (1.0 - explicit * scale).max(0.0);

    goals
        .iter()
        .map(|g| {
            let fraction = match g.share {
                Some(s) => s.max(0.0) * scale,
                None => leftover / unshared as f64,
            };
            let added = pool * fraction;
            let new_total = g.saved + added;
            Allocation {
                name: g.name.clone(),
                added,
                new_total,
                target: g.target,
                progress: if g.target > 0.0 { new_total / g.target } else { 1.0 },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    #[test]
    fn test_reached_goal() {
        assert_eq!(project_goal(700.0, 700.0, 50.0, today()), GoalProjection::Reached);
    }

    #[test]
    fn test_non_positive_rate_never_reaches() {
        assert_eq!(project_goal(100.0, 700.0, 0.0, today()), GoalProjection::Never);
        assert_eq!(project_goal(100.0, 700.0, -20.0, today()), GoalProjection::Never);
    }

    #[test]
    fn test_float_dust_rate_is_out_of_reach() {
        // what 0.1 + 0.2 - 0.3 leaves behind as "savings"
        let dust = 0.1 + 0.2 - 0.3;
        assert!(dust > 0.0);
        assert_eq!(project_goal(2000.0, 15000.0, dust, today()), GoalProjection::OutOfReach);
        assert_eq!(project_goal(0.0, 2000.0, 0.0001, today()), GoalProjection::OutOfReach);
        assert!(project_goal(0.0, 2000.0, 0.0001, today()).summary().contains("100 years"));
    }

    #[test]
    fn test_longest_projection_stays_bounded() {
        // exactly at the horizon: 1200 months
        match project_goal(0.0, 1200.0, 1.0, today()) {
            GoalProjection::OnTrack { series, .. } => {
                assert!(series.len() <= 1200 + 3);
                assert!(series.last().unwrap().balance >= 1200.0);
            }
            other => panic!("expected OnTrack, got {:?}", other),
        }
    }

    #[test]
    fn test_projection_date_and_series() {
        match project_goal(1100.0, 2000.0, 400.0, today()) {
            GoalProjection::OnTrack {
                months_needed,
                target_date,
                series,
            } => {
                assert_eq!(months_needed, 2.25);
                // 2.25 * 30 = 67 whole days
                assert_eq!(target_date, NaiveDate::from_ymd_opt(2026, 3, 9).unwrap());
                assert_eq!(series[0].kind, PointKind::Current);
                assert_eq!(series[0].balance, 1100.0);
                // 1500, 1900, 2300 (past 110% of target, stops)
                assert_eq!(series.len(), 4);
                assert_eq!(series.last().unwrap().balance, 2300.0);
            }
            other => panic!("expected OnTrack, got {:?}", other),
        }
    }

    #[test]
    fn test_summary_formats_day_first() {
        let p = project_goal(0.0, 300.0, 100.0, today());
        assert_eq!(p.summary(), "📅 Estimated date: 01/04/2026 (in 3.0 months)");
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(SavingsGoal::new("a", 100.0, 150.0).progress(), 1.0);
        assert_eq!(SavingsGoal::new("a", 100.0, 25.0).progress(), 0.25);
        assert_eq!(SavingsGoal::new("a", 100.0, 150.0).remaining(), 0.0);
    }

    #[test]
    fn test_allocation_with_shares() {
        let mut car = SavingsGoal::new("car", 5500.0, 1000.0);
        car.share = Some(0.8);
        let mut trip = SavingsGoal::new("trip", 700.0, 100.0);
        trip.share = Some(0.2);

        let out = allocate_savings(500.0, &[car, trip]);
        assert_eq!(out[0].added, 400.0);
        assert_eq!(out[0].new_total, 1400.0);
        assert_eq!(out[1].added, 100.0);
        assert_eq!(out[1].new_total, 200.0);
    }

    #[test]
    fn test_allocation_splits_remainder_equally() {
        let goals = default_goals();
        let out = allocate_savings(300.0, &goals);
        assert_eq!(out[0].added, 150.0);
        assert_eq!(out[1].added, 150.0);
    }

    #[test]
    fn test_negative_month_allocates_nothing() {
        let out = allocate_savings(-120.0, &default_goals());
        assert!(out.iter().all(|a| a.added == 0.0));
        assert_eq!(out[0].new_total, 2000.0);
    }
}
