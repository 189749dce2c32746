//! Handlers for the `/technician` resource.
//!
//! Technicians are imported once per semester from the HR export, whose
//! column names are kept as the wire format.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use simcc_core::academic::{parse_optional_br_date, semester_reference};
use simcc_core::error::CoreError;
use simcc_core::types::{DbId, DepId};
use simcc_db::models::department::{Department, SemesterRef};
use simcc_db::models::technician::{
    DepartmentTechnician, NewTechnician, Technician, TechnicianRole,
};
use simcc_db::repositories::TechnicianRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::OneOrMany;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// One row of the HR technician export.
#[derive(Debug, Deserialize)]
pub struct TechnicianImport {
    pub matric: String,
    #[serde(rename = "insUFMG")]
    pub ins_ufmg: Option<String>,
    pub nome: String,
    pub genero: Option<String>,
    #[serde(rename = "denoSit")]
    pub deno_sit: Option<String>,
    pub rt: Option<String>,
    pub classe: Option<String>,
    pub cargo: Option<String>,
    pub nivel: Option<String>,
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub titulacao: Option<String>,
    pub setor: Option<String>,
    #[serde(rename = "detalheSetor")]
    pub detalhe_setor: Option<String>,
    #[serde(rename = "dtIngOrg")]
    pub dt_ing_org: Option<String>,
    #[serde(rename = "dataProg")]
    pub data_prog: Option<String>,
    pub year_charge: String,
    pub semester: String,
}

impl TryFrom<TechnicianImport> for NewTechnician {
    type Error = CoreError;

    fn try_from(t: TechnicianImport) -> Result<Self, Self::Error> {
        if t.matric.trim().is_empty() {
            return Err(CoreError::Validation("matric is required".into()));
        }
        Ok(NewTechnician {
            organization_entry_date: parse_optional_br_date(t.dt_ing_org.as_deref())?,
            last_promotion_date: parse_optional_br_date(t.data_prog.as_deref())?,
            semester_reference: semester_reference(&t.year_charge, &t.semester),
            registration_number: t.matric,
            ufmg_registration_number: t.ins_ufmg,
            full_name: t.nome,
            gender: t.genero,
            status_code: t.deno_sit,
            work_regime: t.rt,
            job_class: t.classe,
            job_title: t.cargo,
            job_rank: t.nivel,
            job_reference_code: t.reference,
            academic_degree: t.titulacao,
            department_name: t.setor,
            academic_unit: t.detalhe_setor,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SemesterParams {
    pub year: Option<String>,
    pub semester: Option<String>,
}

impl SemesterParams {
    /// The requested `YYYY.S`, or `None` for the latest imported term.
    pub fn reference(&self) -> AppResult<Option<String>> {
        match (self.year.as_deref(), self.semester.as_deref()) {
            (Some(year), Some(semester)) => Ok(Some(semester_reference(year, semester))),
            (None, None) => Ok(None),
            _ => Err(AppError::BadRequest(
                "year and semester must be given together".into(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UnlinkParams {
    pub technician_id: DbId,
    pub dep_id: DepId,
}

/// POST /api/v1/technician
///
/// Re-importing a registration number for the same semester replaces it.
pub async fn import(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<OneOrMany<TechnicianImport>>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<Technician>>>)> {
    let rows = input
        .into_vec()
        .into_iter()
        .map(NewTechnician::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let saved = TechnicianRepo::upsert_many(&state.pool, &rows).await?;
    tracing::info!(count = saved.len(), "Technicians imported");
    Ok((StatusCode::CREATED, Json(DataResponse { data: saved })))
}

/// GET /api/v1/technician
///
/// Without `year` and `semester` the latest imported semester is returned.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SemesterParams>,
) -> AppResult<Json<DataResponse<Vec<Technician>>>> {
    let reference = params.reference()?;
    let rows = TechnicianRepo::list(&state.pool, reference.as_deref()).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/technician/semester
pub async fn semesters(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SemesterRef>>>> {
    let rows = TechnicianRepo::semesters(&state.pool).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// POST /api/v1/technician/role
pub async fn add_roles(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<OneOrMany<TechnicianRole>>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<TechnicianRole>>>)> {
    let roles = input.into_vec();
    TechnicianRepo::add_roles(&state.pool, &roles).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: roles })))
}

/// GET /api/v1/technician/role
pub async fn list_roles(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<TechnicianRole>>>> {
    let rows = TechnicianRepo::list_roles(&state.pool).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// POST /api/v1/technician/department
pub async fn link_departments(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<OneOrMany<DepartmentTechnician>>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<DepartmentTechnician>>>)> {
    let links = input.into_vec();
    TechnicianRepo::link_departments(&state.pool, &links).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: links })))
}

/// DELETE /api/v1/technician/department?technician_id=&dep_id=
pub async fn unlink_department(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<UnlinkParams>,
) -> AppResult<Json<MessageResponse>> {
    let link = DepartmentTechnician {
        dep_id: params.dep_id,
        technician_id: params.technician_id,
    };
    let removed = TechnicianRepo::unlink_departments(&state.pool, &[link]).await?;
    if removed == 0 {
        return Err(AppError::Core(CoreError::Missing(
            "Technician is not linked to this department".into(),
        )));
    }
    Ok(Json(MessageResponse {
        message: "Technician removed from department".into(),
    }))
}

/// GET /api/v1/technician/{id}/department
pub async fn departments(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Department>>>> {
    let rows = TechnicianRepo::departments(&state.pool, id).await?;
    Ok(Json(DataResponse { data: rows }))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use simcc_core::types::Date;

    use super::*;

    fn import_row(dt_ing_org: &str) -> TechnicianImport {
        serde_json::from_value(serde_json::json!({
            "matric": "000123",
            "insUFMG": "9988",
            "nome": "Maria Silva",
            "denoSit": "ATIVO",
            "ref": "D101",
            "detalheSetor": "ICEx",
            "dtIngOrg": dt_ing_org,
            "dataProg": "",
            "year_charge": "2024",
            "semester": "1"
        }))
        .unwrap()
    }

    #[test]
    fn import_maps_export_columns() {
        let t = NewTechnician::try_from(import_row("15/03/2010")).unwrap();
        assert_eq!(t.registration_number, "000123");
        assert_eq!(t.ufmg_registration_number.as_deref(), Some("9988"));
        assert_eq!(t.job_reference_code.as_deref(), Some("D101"));
        assert_eq!(t.academic_unit.as_deref(), Some("ICEx"));
        assert_eq!(t.semester_reference, "2024.1");
        assert_eq!(
            t.organization_entry_date,
            Date::from_ymd_opt(2010, 3, 15)
        );
        assert_eq!(t.last_promotion_date, None);
    }

    #[test]
    fn import_rejects_iso_dates() {
        assert_matches!(
            NewTechnician::try_from(import_row("2010-03-15")),
            Err(CoreError::Validation(_))
        );
    }
}
