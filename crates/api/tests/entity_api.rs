//! Institutions, researchers, graduate programs, departments and
//! technicians through the HTTP API.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, post_auth, post_json, post_json_auth, put_json_auth,
    user_with_token,
};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn create_institution(app: axum::Router, token: &str, name: &str) -> String {
    let response = post_json_auth(
        app,
        "/api/v1/institution",
        token,
        json!({ "name": name, "acronym": "UFX" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"][0]["institution_id"]
        .as_str()
        .unwrap()
        .to_string()
}

async fn create_researcher(
    app: axum::Router,
    token: &str,
    name: &str,
    lattes_id: &str,
    institution_id: &str,
) -> String {
    let response = post_json_auth(
        app,
        "/api/v1/researcher",
        token,
        json!({
            "name": name,
            "lattes_id": lattes_id,
            "institution_id": institution_id,
            "ufmg_registration": format!("ufmg-{lattes_id}")
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"][0]["researcher_id"]
        .as_str()
        .unwrap()
        .to_string()
}

// ---------------------------------------------------------------------------
// Institutions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn institution_writes_require_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/institution", json!({ "name": "UFMG" })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn institution_crud_and_counts(pool: PgPool) {
    let (_user, token) = user_with_token(&pool, "curator").await;
    let app = common::build_test_app(pool);

    let id = create_institution(app.clone(), &token, "Universidade X").await;
    create_researcher(app.clone(), &token, "Ana", "111", &id).await;
    create_researcher(app.clone(), &token, "Bruno", "222", &id).await;

    let fetched = body_json(get(app.clone(), &format!("/api/v1/institution/{id}")).await).await;
    assert_eq!(fetched["data"]["name"], "Universidade X");
    assert_eq!(fetched["data"]["count_r"], 2);
    assert_eq!(fetched["data"]["count_gp"], 0);

    let updated = put_json_auth(
        app.clone(),
        "/api/v1/institution",
        &token,
        json!({ "institution_id": id, "acronym": "UX" }),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(body_json(updated).await["data"]["acronym"], "UX");

    let listed = body_json(get(app.clone(), "/api/v1/institution").await).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    let deleted = delete_auth(app.clone(), &format!("/api/v1/institution/{id}"), &token).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = get(app, &format!("/api/v1/institution/{id}")).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn institution_batch_is_all_or_nothing(pool: PgPool) {
    let (_user, token) = user_with_token(&pool, "curator").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/institution",
        &token,
        json!([{ "name": "Dup" }, { "name": "Dup" }]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let listed = body_json(get(app, "/api/v1/institution").await).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 0);
}

// ---------------------------------------------------------------------------
// Researchers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn researcher_lattes_id_is_unique(pool: PgPool) {
    let (_user, token) = user_with_token(&pool, "curator").await;
    let app = common::build_test_app(pool);
    let institution = create_institution(app.clone(), &token, "Universidade X").await;

    create_researcher(app.clone(), &token, "Ana", "111", &institution).await;
    let duplicate = post_json_auth(
        app,
        "/api/v1/researcher",
        &token,
        json!({ "name": "Outra Ana", "lattes_id": "111" }),
    )
    .await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn researcher_count_and_filters(pool: PgPool) {
    let (_user, token) = user_with_token(&pool, "curator").await;
    let app = common::build_test_app(pool);
    let a = create_institution(app.clone(), &token, "A").await;
    let b = create_institution(app.clone(), &token, "B").await;
    create_researcher(app.clone(), &token, "Ana", "111", &a).await;
    create_researcher(app.clone(), &token, "Bruno", "222", &b).await;

    let all = body_json(get(app.clone(), "/api/v1/researcher/count").await).await;
    assert_eq!(all["data"]["count"], 2);

    let only_a = body_json(
        get(app.clone(), &format!("/api/v1/researcher/count?institution_id={a}")).await,
    )
    .await;
    assert_eq!(only_a["data"]["count"], 1);

    let by_lattes = body_json(get(app, "/api/v1/researcher?lattes_id=222").await).await;
    assert_eq!(by_lattes["data"][0]["name"], "Bruno");
}

// ---------------------------------------------------------------------------
// Graduate programs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn graduate_program_rosters_and_visibility(pool: PgPool) {
    let (_user, token) = user_with_token(&pool, "curator").await;
    let app = common::build_test_app(pool);
    let institution = create_institution(app.clone(), &token, "Universidade X").await;
    let researcher = create_researcher(app.clone(), &token, "Ana", "111", &institution).await;

    let created = post_json_auth(
        app.clone(),
        "/api/v1/graduate-program",
        &token,
        json!({
            "code": "PPG-01",
            "name": "Ciência da Computação",
            "area": "Computação",
            "modality": "ACADÊMICO",
            "type": "MESTRADO/DOUTORADO",
            "institution_id": institution,
            "state": "MG",
            "city": "Belo Horizonte"
        }),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let program: Value = body_json(created).await["data"][0].clone();
    let program_id = program["graduate_program_id"].as_str().unwrap().to_string();
    assert_eq!(program["visible"], false);
    assert_eq!(program["state"], "MG");
    assert_eq!(program["region"], "Nordeste");

    let added = post_json_auth(
        app.clone(),
        "/api/v1/graduate-program/researcher",
        &token,
        json!({
            "graduate_program_id": program_id,
            "researcher_id": researcher,
            "type_": "PERMANENTE",
            "year": "2021;2022"
        }),
    )
    .await;
    assert_eq!(added.status(), StatusCode::CREATED);

    let students = post_json_auth(
        app.clone(),
        "/api/v1/graduate-program/student",
        &token,
        json!([{
            "graduate_program_id": program_id,
            "lattes_id": "999",
            "name": "Discente Novo",
            "year": "2023"
        }]),
    )
    .await;
    assert_eq!(students.status(), StatusCode::CREATED);

    let roster = body_json(
        get(
            app.clone(),
            &format!("/api/v1/graduate-program/{program_id}/researcher?type_=PERMANENTE"),
        )
        .await,
    )
    .await;
    assert_eq!(roster["data"][0]["name"], "Ana");
    assert_eq!(roster["data"][0]["years"], json!([2021, 2022]));

    let collaborators = body_json(
        get(
            app.clone(),
            &format!("/api/v1/graduate-program/{program_id}/researcher?type_=COLABORADOR"),
        )
        .await,
    )
    .await;
    assert_eq!(collaborators["data"].as_array().unwrap().len(), 0);

    let enrolled = body_json(
        get(app.clone(), &format!("/api/v1/graduate-program/{program_id}/student")).await,
    )
    .await;
    assert_eq!(enrolled["data"][0]["lattes_id"], "999");

    let summary = body_json(
        get(
            app.clone(),
            &format!("/api/v1/graduate-program?graduate_program_id={program_id}"),
        )
        .await,
    )
    .await;
    assert_eq!(summary["data"][0]["qtd_permanente"], 1);
    assert_eq!(summary["data"][0]["qtd_colaborador"], 0);
    assert_eq!(summary["data"][0]["qtd_discente"], 1);

    let count = body_json(get(app.clone(), "/api/v1/graduate-program/count").await).await;
    assert_eq!(count["data"]["count"], 1);

    let toggled = post_auth(
        app.clone(),
        &format!("/api/v1/graduate-program/{program_id}/visibility"),
        &token,
    )
    .await;
    assert_eq!(body_json(toggled).await["data"]["visible"], true);

    let removed = delete_auth(
        app.clone(),
        &format!("/api/v1/graduate-program/{program_id}/researcher/{researcher}"),
        &token,
    )
    .await;
    assert_eq!(removed.status(), StatusCode::NO_CONTENT);

    let again = delete_auth(
        app,
        &format!("/api/v1/graduate-program/{program_id}/researcher/{researcher}"),
        &token,
    )
    .await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn graduate_program_rejects_malformed_years(pool: PgPool) {
    let (_user, token) = user_with_token(&pool, "curator").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/graduate-program/researcher",
        &token,
        json!({
            "graduate_program_id": uuid::Uuid::nil(),
            "researcher_id": uuid::Uuid::nil(),
            "type_": "PERMANENTE",
            "year": "dois mil"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Departments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn department_with_disciplines(pool: PgPool) {
    let (_user, token) = user_with_token(&pool, "curator").await;
    let app = common::build_test_app(pool);
    let institution = create_institution(app.clone(), &token, "Universidade X").await;
    let researcher = create_researcher(app.clone(), &token, "Ana Souza", "111", &institution).await;

    let body = json!({ "dep_id": 42, "dep_nom": "Departamento de Computação", "dep_sigla": "DCC" });
    let created = post_json_auth(app.clone(), "/api/v1/department", &token, body.clone()).await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let duplicate = post_json_auth(app.clone(), "/api/v1/department", &token, body).await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let linked = post_json_auth(
        app.clone(),
        "/api/v1/department/researcher",
        &token,
        json!({ "dep_id": 42, "researcher_id": researcher }),
    )
    .await;
    assert_eq!(linked.status(), StatusCode::CREATED);

    let members = body_json(get(app.clone(), "/api/v1/department/42/researcher").await).await;
    assert_eq!(members["data"][0]["name"], "Ana Souza");

    let disciplines = post_json_auth(
        app.clone(),
        "/api/v1/department/discipline",
        &token,
        json!([{
            "dep_id": 42,
            "semester": "2024/1",
            "academic_activity_code": "DCC001",
            "academic_activity_name": "Algoritmos",
            "id": "TA1",
            "professor": "Ana Souza,ufmg-111,Titular\nVisitante,000,Colaborador"
        }]),
    )
    .await;
    assert_eq!(disciplines.status(), StatusCode::CREATED);
    let discipline = body_json(disciplines).await["data"][0].clone();
    assert_eq!(discipline["semester"], "2024.1");
    assert_eq!(discipline["id"], "TA1");
    assert_eq!(discipline["researcher_ids"], json!([researcher, null]));
    assert_eq!(discipline["researcher_names"], json!(["Ana Souza", "Visitante"]));

    let semesters = body_json(
        get(app.clone(), "/api/v1/department/discipline/semester?dep_id=42").await,
    )
    .await;
    assert_eq!(semesters["data"], json!([{ "year": "2024", "semester": "1" }]));

    let updated = put_json_auth(
        app.clone(),
        "/api/v1/department/42",
        &token,
        json!({ "dep_email": "dcc@ufx.br" }),
    )
    .await;
    assert_eq!(body_json(updated).await["data"]["dep_email"], "dcc@ufx.br");

    let deleted = delete_auth(app.clone(), "/api/v1/department/42", &token).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let remaining = body_json(get(app.clone(), "/api/v1/department/discipline?dep_id=42").await).await;
    assert_eq!(remaining["data"].as_array().unwrap().len(), 0);
    assert_eq!(
        get(app, "/api/v1/department/42").await.status(),
        StatusCode::NOT_FOUND
    );
}

// ---------------------------------------------------------------------------
// Technicians
// ---------------------------------------------------------------------------

fn technician(matric: &str, nome: &str, year: &str, semester: &str) -> Value {
    json!({
        "matric": matric,
        "nome": nome,
        "insUFMG": "UFMG-1",
        "cargo": "ANALISTA",
        "dtIngOrg": "01/03/2010",
        "dataProg": "",
        "year_charge": year,
        "semester": semester
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn technician_import_defaults_to_latest_semester(pool: PgPool) {
    let (_user, token) = user_with_token(&pool, "curator").await;
    let app = common::build_test_app(pool);

    let imported = post_json_auth(
        app.clone(),
        "/api/v1/technician",
        &token,
        json!([
            technician("1", "Carla", "2023", "2"),
            technician("1", "Carla", "2024", "1"),
            technician("2", "Diego", "2024", "1")
        ]),
    )
    .await;
    assert_eq!(imported.status(), StatusCode::CREATED);

    let reimport = post_json_auth(
        app.clone(),
        "/api/v1/technician",
        &token,
        technician("2", "Diego Alves", "2024", "1"),
    )
    .await;
    assert_eq!(reimport.status(), StatusCode::CREATED);

    let latest = body_json(get(app.clone(), "/api/v1/technician").await).await;
    let names: Vec<&str> = latest["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["full_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Carla", "Diego Alves"]);
    assert_eq!(latest["data"][0]["organization_entry_date"], "2010-03-01");
    assert_eq!(latest["data"][0]["last_promotion_date"], Value::Null);

    let older = body_json(get(app.clone(), "/api/v1/technician?year=2023&semester=2").await).await;
    assert_eq!(older["data"].as_array().unwrap().len(), 1);

    let half = get(app.clone(), "/api/v1/technician?year=2023").await;
    assert_eq!(half.status(), StatusCode::BAD_REQUEST);

    let semesters = body_json(get(app, "/api/v1/technician/semester").await).await;
    assert_eq!(
        semesters["data"],
        json!([
            { "year": "2024", "semester": "1" },
            { "year": "2023", "semester": "2" }
        ])
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn technician_rejects_bad_dates(pool: PgPool) {
    let (_user, token) = user_with_token(&pool, "curator").await;
    let app = common::build_test_app(pool);

    let mut row = technician("1", "Carla", "2024", "1");
    row["dtIngOrg"] = json!("2010-03-01");
    let response = post_json_auth(app, "/api/v1/technician", &token, row).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn technician_department_links(pool: PgPool) {
    let (_user, token) = user_with_token(&pool, "curator").await;
    let app = common::build_test_app(pool);

    post_json_auth(
        app.clone(),
        "/api/v1/department",
        &token,
        json!({ "dep_id": 7, "dep_nom": "Secretaria" }),
    )
    .await;
    let imported = post_json_auth(
        app.clone(),
        "/api/v1/technician",
        &token,
        technician("9", "Elisa", "2024", "1"),
    )
    .await;
    let technician_id = body_json(imported).await["data"][0]["technician_id"]
        .as_str()
        .unwrap()
        .to_string();

    let linked = post_json_auth(
        app.clone(),
        "/api/v1/technician/department",
        &token,
        json!({ "dep_id": 7, "technician_id": technician_id }),
    )
    .await;
    assert_eq!(linked.status(), StatusCode::CREATED);

    let departments = body_json(
        get(app.clone(), &format!("/api/v1/technician/{technician_id}/department")).await,
    )
    .await;
    assert_eq!(departments["data"][0]["dep_nom"], "Secretaria");

    let uri = format!("/api/v1/technician/department?technician_id={technician_id}&dep_id=7");
    assert_eq!(delete_auth(app.clone(), &uri, &token).await.status(), StatusCode::OK);
    assert_eq!(delete_auth(app, &uri, &token).await.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Research groups
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn research_group_crud(pool: PgPool) {
    let (_user, token) = user_with_token(&pool, "curator").await;
    let app = common::build_test_app(pool);
    let body = json!({
        "name": "Grupo de Bancos de Dados",
        "group_identifier": "dgp-0001",
        "area": "Ciência da Computação",
        "census": 2023
    });

    let anonymous = get(app.clone(), "/api/v1/group").await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let created = post_json_auth(app.clone(), "/api/v1/group", &token, body.clone()).await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let id = body_json(created).await["data"]["id"].as_str().unwrap().to_string();

    let duplicate = post_json_auth(app.clone(), "/api/v1/group", &token, body).await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let updated = put_json_auth(
        app.clone(),
        "/api/v1/group",
        &token,
        json!({ "id": id, "category": "Consolidado" }),
    )
    .await;
    assert_eq!(body_json(updated).await["data"]["category"], "Consolidado");

    let deleted = delete_auth(app.clone(), &format!("/api/v1/group/{id}"), &token).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = common::get_auth(app, &format!("/api/v1/group/{id}"), &token).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}
