//! Supervision timeline assessment.
//!
//! A guidance record carries a planned and an actual ("done") date for each
//! of three milestones: project, qualification and conclusion. The functions
//! here derive the current stage, the days remaining (or elapsed) and the
//! on-time/overdue status from those dates and a reference day.

use serde::{Deserialize, Serialize};

use crate::types::Date;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Milestone a supervision is currently working towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    #[serde(rename = "PROJETO")]
    Project,
    #[serde(rename = "QUALIFICAÇÃO")]
    Qualification,
    #[serde(rename = "CONCLUSÃO")]
    Conclusion,
    #[serde(rename = "FINALIZADO")]
    Finished,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Project => "PROJETO",
            Stage::Qualification => "QUALIFICAÇÃO",
            Stage::Conclusion => "CONCLUSÃO",
            Stage::Finished => "FINALIZADO",
        }
    }
}

/// Whether any open milestone is past its planned date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackingStatus {
    #[serde(rename = "EM DIA")]
    OnTime,
    #[serde(rename = "EM ATRASO")]
    Overdue,
}

/// Planned and done dates for the three milestones of a supervision.
#[derive(Debug, Clone, Default)]
pub struct Milestones {
    pub planned_project: Option<Date>,
    pub done_project: Option<Date>,
    pub planned_qualification: Option<Date>,
    pub done_qualification: Option<Date>,
    pub planned_conclusion: Option<Date>,
    pub done_conclusion: Option<Date>,
}

/// Derived view of a supervision timeline at a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assessment {
    pub stage: Stage,
    /// Days until the open milestone's planned date (negative when overdue),
    /// or days since conclusion once finished. `None` when the open milestone
    /// has no planned date.
    pub pending_days: Option<i64>,
    /// Largest overrun, in days, among open milestones already past due.
    pub delay_days: i64,
    pub status: TrackingStatus,
}

impl Milestones {
    fn stages(&self) -> [(Stage, Option<Date>, Option<Date>); 3] {
        [
            (Stage::Project, self.planned_project, self.done_project),
            (
                Stage::Qualification,
                self.planned_qualification,
                self.done_qualification,
            ),
            (
                Stage::Conclusion,
                self.planned_conclusion,
                self.done_conclusion,
            ),
        ]
    }
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// First milestone without a done date, or [`Stage::Finished`].
pub fn current_stage(m: &Milestones) -> Stage {
    m.stages()
        .into_iter()
        .find(|(_, _, done)| done.is_none())
        .map(|(stage, _, _)| stage)
        .unwrap_or(Stage::Finished)
}

/// Days remaining for the open milestone, or days elapsed since conclusion.
pub fn pending_days(m: &Milestones, today: Date) -> Option<i64> {
    match m
        .stages()
        .into_iter()
        .find(|(_, _, done)| done.is_none())
    {
        Some((_, planned, _)) => planned.map(|p| (p - today).num_days()),
        None => m.done_conclusion.map(|d| (today - d).num_days()),
    }
}

/// Largest overrun among open milestones whose planned date has passed.
pub fn delay_days(m: &Milestones, today: Date) -> i64 {
    m.stages()
        .into_iter()
        .filter_map(|(_, planned, done)| match (planned, done) {
            (Some(p), None) if p < today => Some((today - p).num_days()),
            _ => None,
        })
        .max()
        .unwrap_or(0)
}

/// Full assessment of a timeline at `today`.
pub fn assess(m: &Milestones, today: Date) -> Assessment {
    let delay = delay_days(m, today);
    Assessment {
        stage: current_stage(m),
        pending_days: pending_days(m, today),
        delay_days: delay,
        status: if delay > 0 {
            TrackingStatus::Overdue
        } else {
            TrackingStatus::OnTime
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    fn planned_only() -> Milestones {
        Milestones {
            planned_project: Some(d(2024, 3, 1)),
            planned_qualification: Some(d(2024, 9, 1)),
            planned_conclusion: Some(d(2025, 3, 1)),
            ..Default::default()
        }
    }

    #[test]
    fn fresh_record_is_in_project_stage_and_on_time() {
        let a = assess(&planned_only(), d(2024, 2, 20));
        assert_eq!(a.stage, Stage::Project);
        assert_eq!(a.pending_days, Some(10));
        assert_eq!(a.delay_days, 0);
        assert_eq!(a.status, TrackingStatus::OnTime);
    }

    #[test]
    fn missed_project_date_is_overdue() {
        let a = assess(&planned_only(), d(2024, 3, 11));
        assert_eq!(a.pending_days, Some(-10));
        assert_eq!(a.delay_days, 10);
        assert_eq!(a.status, TrackingStatus::Overdue);
    }

    #[test]
    fn delay_takes_the_worst_open_milestone() {
        let a = assess(&planned_only(), d(2024, 10, 1));
        // project: 214 days late, qualification: 30 days late
        assert_eq!(a.delay_days, 214);
        assert_eq!(a.stage, Stage::Project);
    }

    #[test]
    fn completed_milestones_do_not_count_as_delay() {
        let m = Milestones {
            done_project: Some(d(2024, 2, 28)),
            ..planned_only()
        };
        let a = assess(&m, d(2024, 8, 1));
        assert_eq!(a.stage, Stage::Qualification);
        assert_eq!(a.pending_days, Some(31));
        assert_eq!(a.status, TrackingStatus::OnTime);
    }

    #[test]
    fn missing_planned_date_yields_no_pending_days() {
        let m = Milestones {
            done_project: Some(d(2024, 2, 28)),
            planned_qualification: None,
            ..planned_only()
        };
        assert_eq!(pending_days(&m, d(2024, 8, 1)), None);
        assert_eq!(current_stage(&m), Stage::Qualification);
    }

    #[test]
    fn finished_record_counts_days_since_conclusion() {
        let m = Milestones {
            done_project: Some(d(2024, 3, 1)),
            done_qualification: Some(d(2024, 9, 1)),
            done_conclusion: Some(d(2025, 3, 1)),
            ..planned_only()
        };
        let a = assess(&m, d(2025, 3, 11));
        assert_eq!(a.stage, Stage::Finished);
        assert_eq!(a.pending_days, Some(10));
        assert_eq!(a.status, TrackingStatus::OnTime);
    }

    #[test]
    fn stage_serializes_to_portuguese_labels() {
        let json = serde_json::to_string(&Stage::Qualification).unwrap();
        assert_eq!(json, "\"QUALIFICAÇÃO\"");
        let json = serde_json::to_string(&TrackingStatus::Overdue).unwrap();
        assert_eq!(json, "\"EM ATRASO\"");
        assert_eq!(Stage::Finished.as_str(), "FINALIZADO");
    }
}
