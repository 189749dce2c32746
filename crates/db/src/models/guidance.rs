//! Guidance tracking and guidance configuration models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use simcc_core::guidance::{assess, Assessment, Milestones};
use simcc_core::types::{Date, DbId, Timestamp};

/// A row from the `guidance_tracking` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GuidanceTracking {
    pub id: DbId,
    pub student_researcher_id: DbId,
    pub supervisor_researcher_id: DbId,
    pub co_supervisor_researcher_id: Option<DbId>,
    pub graduate_program_id: Option<DbId>,
    pub start_date: Date,
    pub planned_date_project: Option<Date>,
    pub done_date_project: Option<Date>,
    pub planned_date_qualification: Option<Date>,
    pub done_date_qualification: Option<Date>,
    pub planned_date_conclusion: Option<Date>,
    pub done_date_conclusion: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl GuidanceTracking {
    pub fn milestones(&self) -> Milestones {
        Milestones {
            planned_project: self.planned_date_project,
            done_project: self.done_date_project,
            planned_qualification: self.planned_date_qualification,
            done_qualification: self.done_date_qualification,
            planned_conclusion: self.planned_date_conclusion,
            done_conclusion: self.done_date_conclusion,
        }
    }

    /// Attach the derived stage/status as of `today`.
    pub fn assessed(self, today: Date) -> AssessedGuidance {
        let assessment = assess(&self.milestones(), today);
        AssessedGuidance {
            tracking: self,
            assessment,
        }
    }
}

/// A tracking row enriched with its current assessment.
#[derive(Debug, Clone, Serialize)]
pub struct AssessedGuidance {
    #[serde(flatten)]
    pub tracking: GuidanceTracking,
    #[serde(flatten)]
    pub assessment: Assessment,
}

#[derive(Debug, Deserialize)]
pub struct CreateGuidanceTracking {
    pub student_researcher_id: DbId,
    pub supervisor_researcher_id: DbId,
    pub co_supervisor_researcher_id: Option<DbId>,
    pub graduate_program_id: Option<DbId>,
    pub start_date: Date,
    pub planned_date_project: Option<Date>,
    pub done_date_project: Option<Date>,
    pub planned_date_qualification: Option<Date>,
    pub done_date_qualification: Option<Date>,
    pub planned_date_conclusion: Option<Date>,
    pub done_date_conclusion: Option<Date>,
}

/// Full replacement of the editable fields.
pub type UpdateGuidanceTracking = CreateGuidanceTracking;

#[derive(Debug, Default, Deserialize)]
pub struct GuidanceFilter {
    pub supervisor_researcher_id: Option<DbId>,
    pub graduate_program_id: Option<DbId>,
}

/// A row from the `guidance_config` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GuidanceConfig {
    pub id: DbId,
    pub config_name: String,
    pub duration_project_months: i32,
    pub duration_qualification_months: i32,
    pub duration_conclusion_months: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateGuidanceConfig {
    pub config_name: String,
    pub duration_project_months: i32,
    pub duration_qualification_months: i32,
    pub duration_conclusion_months: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateGuidanceConfig {
    pub config_name: Option<String>,
    pub duration_project_months: Option<i32>,
    pub duration_qualification_months: Option<i32>,
    pub duration_conclusion_months: Option<i32>,
}
