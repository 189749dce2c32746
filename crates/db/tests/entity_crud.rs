//! Integration tests for the academic entity repositories.
//!
//! Exercises rosters, discipline imports, technician snapshots and chat
//! lookups against a real database.

use assert_matches::assert_matches;
use sqlx::PgPool;
use simcc_core::academic::Professor;
use simcc_db::models::department::{CreateDepartment, NewDiscipline, SemesterRef};
use simcc_db::models::graduate_program::{
    CreateGraduateProgram, GraduateProgramFilter, MemberType, NewProgramResearcher,
    NewProgramStudent,
};
use simcc_db::models::institution::CreateInstitution;
use simcc_db::models::researcher::{CreateResearcher, ResearcherFilter};
use simcc_db::models::technician::NewTechnician;
use simcc_db::models::user::CreateUser;
use simcc_db::repositories::{
    ChatRepo, DepartmentRepo, GraduateProgramRepo, InstitutionRepo, ResearcherRepo,
    TechnicianRepo, UserRepo,
};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_institution(pool: &PgPool) -> Uuid {
    let input = CreateInstitution {
        institution_id: None,
        name: "Universidade Federal".to_string(),
        acronym: Some("UF".to_string()),
        lattes_id: None,
    };
    InstitutionRepo::create_many(pool, &[input]).await.unwrap()[0].institution_id
}

fn new_program(institution_id: Uuid, code: &str) -> CreateGraduateProgram {
    CreateGraduateProgram {
        graduate_program_id: None,
        code: code.to_string(),
        name: format!("Programa {code}"),
        name_en: None,
        basic_area: None,
        cooperation_project: None,
        area: "CIÊNCIA DA COMPUTAÇÃO".to_string(),
        modality: "ACADÊMICO".to_string(),
        program_type: Some("MESTRADO".to_string()),
        rating: None,
        institution_id,
        state: None,
        city: None,
        region: None,
        url_image: None,
        acronym: None,
        description: None,
        visible: None,
        site: None,
        coordinator: None,
        email: None,
        start: None,
        phone: None,
        periodicity: None,
    }
}

fn new_researcher(name: &str, lattes_id: &str, registration: Option<&str>) -> CreateResearcher {
    CreateResearcher {
        researcher_id: None,
        name: name.to_string(),
        lattes_id: lattes_id.to_string(),
        institution_id: None,
        ufmg_registration: registration.map(str::to_string),
    }
}

fn new_department(dep_id: i32) -> CreateDepartment {
    CreateDepartment {
        dep_id,
        org_cod: None,
        dep_nom: format!("Departamento {dep_id}"),
        dep_des: None,
        dep_email: None,
        dep_site: None,
        dep_sigla: None,
        dep_tel: None,
    }
}

fn new_technician(registration: &str, semester: &str) -> NewTechnician {
    NewTechnician {
        registration_number: registration.to_string(),
        ufmg_registration_number: None,
        full_name: format!("Técnico {registration}"),
        gender: None,
        status_code: None,
        work_regime: None,
        job_class: None,
        job_title: None,
        job_rank: None,
        job_reference_code: None,
        academic_degree: None,
        department_name: None,
        academic_unit: None,
        organization_entry_date: None,
        last_promotion_date: None,
        semester_reference: semester.to_string(),
    }
}

fn new_user(email: &str) -> CreateUser {
    CreateUser {
        username: email.split('@').next().unwrap_or(email).to_string(),
        email: email.to_string(),
        password_hash: "x".to_string(),
        provider: "local".to_string(),
        institution_id: None,
        linkedin: None,
        lattes_id: None,
    }
}

// ---------------------------------------------------------------------------
// Graduate programs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_program_defaults_and_duplicate_code(pool: PgPool) {
    let institution_id = seed_institution(&pool).await;
    let created = GraduateProgramRepo::create_many(&pool, &[new_program(institution_id, "P1")])
        .await
        .unwrap();
    assert_eq!(created[0].state, "BA");
    assert_eq!(created[0].city, "Salvador");
    assert!(!created[0].visible);

    let err = GraduateProgramRepo::create_many(&pool, &[new_program(institution_id, "P1")])
        .await
        .unwrap_err();
    assert_matches!(err, sqlx::Error::Database(ref db) if db.code().as_deref() == Some("23505"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_program_roster_counts(pool: PgPool) {
    let institution_id = seed_institution(&pool).await;
    let program = &GraduateProgramRepo::create_many(&pool, &[new_program(institution_id, "P2")])
        .await
        .unwrap()[0];
    let researchers = ResearcherRepo::create_many(
        &pool,
        &[new_researcher("Ana", "1", None), new_researcher("Bruno", "2", None)],
    )
    .await
    .unwrap();

    let members: Vec<NewProgramResearcher> = researchers
        .iter()
        .zip([MemberType::Permanente, MemberType::Colaborador])
        .map(|(r, member_type)| NewProgramResearcher {
            graduate_program_id: program.graduate_program_id,
            researcher_id: r.researcher_id,
            member_type,
            years: vec![2023, 2024],
        })
        .collect();
    GraduateProgramRepo::add_researchers(&pool, &members).await.unwrap();

    // Unknown student gets registered as a researcher.
    let student = NewProgramStudent {
        graduate_program_id: program.graduate_program_id,
        lattes_id: "3".to_string(),
        name: Some("Carla".to_string()),
        institution_id: Some(institution_id),
        years: vec![2024],
    };
    GraduateProgramRepo::add_students(&pool, &[student]).await.unwrap();

    let filter = GraduateProgramFilter {
        institution_id: Some(institution_id),
        graduate_program_id: None,
    };
    let summary = GraduateProgramRepo::list_with_counts(&pool, &filter).await.unwrap();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].qtd_permanente, 1);
    assert_eq!(summary[0].qtd_colaborador, 1);
    assert_eq!(summary[0].qtd_discente, 1);

    let permanent = GraduateProgramRepo::list_researchers(
        &pool,
        program.graduate_program_id,
        Some("PERMANENTE"),
    )
    .await
    .unwrap();
    assert_eq!(permanent.len(), 1);
    assert_eq!(permanent[0].name, "Ana");

    let students = GraduateProgramRepo::list_students(&pool, program.graduate_program_id)
        .await
        .unwrap();
    assert_eq!(students[0].name, "Carla");

    assert!(GraduateProgramRepo::delete(&pool, program.graduate_program_id).await.unwrap());
    assert!(GraduateProgramRepo::list_students(&pool, program.graduate_program_id)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_program_visibility_toggles(pool: PgPool) {
    let institution_id = seed_institution(&pool).await;
    let program = &GraduateProgramRepo::create_many(&pool, &[new_program(institution_id, "P3")])
        .await
        .unwrap()[0];

    let toggled = GraduateProgramRepo::toggle_visibility(&pool, program.graduate_program_id)
        .await
        .unwrap()
        .unwrap();
    assert!(toggled.visible);

    let toggled = GraduateProgramRepo::toggle_visibility(&pool, program.graduate_program_id)
        .await
        .unwrap()
        .unwrap();
    assert!(!toggled.visible);
}

// ---------------------------------------------------------------------------
// Departments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_discipline_professors_resolve_by_registration(pool: PgPool) {
    DepartmentRepo::create(&pool, &new_department(10)).await.unwrap();
    let known = &ResearcherRepo::create_many(&pool, &[new_researcher("Ana", "1", Some("123"))])
        .await
        .unwrap()[0];

    let discipline = NewDiscipline {
        dep_id: 10,
        semester: "2024.1".to_string(),
        department: None,
        academic_activity_code: Some("DCC001".to_string()),
        academic_activity_name: Some("Algoritmos".to_string()),
        academic_activity_ch: None,
        demanding_courses: None,
        oft: None,
        offering_id: Some("TA".to_string()),
        available_slots: None,
        occupied_slots: None,
        percent_occupied_slots: None,
        schedule: None,
        language: None,
        professors: vec![
            Professor {
                name: "Ana".to_string(),
                ufmg_id: "123".to_string(),
                responsibility: "60".to_string(),
            },
            Professor {
                name: "Visitante".to_string(),
                ufmg_id: "999".to_string(),
                responsibility: "30".to_string(),
            },
        ],
        status: None,
    };
    let stored = DepartmentRepo::add_disciplines(&pool, &[discipline]).await.unwrap();
    assert_eq!(stored[0].researcher_ids, vec![Some(known.researcher_id), None]);
    assert_eq!(stored[0].researcher_names, vec!["Ana", "Visitante"]);
    assert_eq!(stored[0].workloads, vec!["60", "30"]);

    let semesters = DepartmentRepo::discipline_semesters(&pool, Some(10)).await.unwrap();
    assert_eq!(
        semesters,
        vec![SemesterRef {
            year: "2024".to_string(),
            semester: "1".to_string()
        }]
    );
}

// ---------------------------------------------------------------------------
// Technicians
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_technicians_default_to_latest_semester(pool: PgPool) {
    TechnicianRepo::upsert_many(
        &pool,
        &[
            new_technician("A1", "2023.2"),
            new_technician("A1", "2024.1"),
            new_technician("B2", "2024.1"),
        ],
    )
    .await
    .unwrap();

    let latest = TechnicianRepo::list(&pool, None).await.unwrap();
    assert_eq!(latest.len(), 2);
    assert!(latest.iter().all(|t| t.semester_reference == "2024.1"));

    let older = TechnicianRepo::list(&pool, Some("2023.2")).await.unwrap();
    assert_eq!(older.len(), 1);

    // Re-import of the same snapshot refreshes instead of duplicating.
    TechnicianRepo::upsert_many(&pool, &[new_technician("B2", "2024.1")])
        .await
        .unwrap();
    assert_eq!(TechnicianRepo::list(&pool, None).await.unwrap().len(), 2);

    let semesters = TechnicianRepo::semesters(&pool).await.unwrap();
    assert_eq!(semesters.len(), 2);
    assert_eq!(semesters[0].year, "2024");
}

// ---------------------------------------------------------------------------
// Researchers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_researcher_name_filter_is_a_literal_prefix(pool: PgPool) {
    ResearcherRepo::create_many(
        &pool,
        &[
            new_researcher("Ana_Maria Lopes", "0201", None),
            new_researcher("Anabela Costa", "0202", None),
            new_researcher("100% Pesquisa", "0203", None),
        ],
    )
    .await
    .unwrap();

    let names = |name: &str| {
        let filter = ResearcherFilter {
            name: Some(name.to_string()),
            ..Default::default()
        };
        let pool = pool.clone();
        async move {
            let mut names: Vec<String> = ResearcherRepo::list(&pool, &filter, 100, 0)
                .await
                .unwrap()
                .into_iter()
                .map(|r| r.name)
                .collect();
            names.sort();
            names
        }
    };

    assert_eq!(names("ana").await, vec!["Ana_Maria Lopes", "Anabela Costa"]);
    assert_eq!(names("ANA_").await, vec!["Ana_Maria Lopes"]);
    assert_eq!(names("100%").await, vec!["100% Pesquisa"]);
    assert!(names("%").await.is_empty());
    assert!(names("_").await.is_empty());
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_private_chat_lookup(pool: PgPool) {
    let a = UserRepo::create(&pool, &new_user("a@example.com")).await.unwrap();
    let b = UserRepo::create(&pool, &new_user("b@example.com")).await.unwrap();
    let c = UserRepo::create(&pool, &new_user("c@example.com")).await.unwrap();

    assert!(ChatRepo::find_private(&pool, a.user_id, b.user_id).await.unwrap().is_none());

    let (chat, created) = ChatRepo::find_or_create_private(&pool, "a & b", a.user_id, b.user_id)
        .await
        .unwrap();
    assert!(created);
    let (again, created) = ChatRepo::find_or_create_private(&pool, "b & a", b.user_id, a.user_id)
        .await
        .unwrap();
    assert!(!created);
    assert_eq!(again.chat_id, chat.chat_id);
    assert_eq!(again.chat_name, "a & b");

    ChatRepo::create_group(&pool, "grupo", a.user_id, &[a.user_id, b.user_id, c.user_id])
        .await
        .unwrap();

    let found = ChatRepo::find_private(&pool, b.user_id, a.user_id).await.unwrap().unwrap();
    assert_eq!(found.chat_id, chat.chat_id);

    ChatRepo::insert_message(&pool, chat.chat_id, a.user_id, "oi").await.unwrap();
    ChatRepo::insert_message(&pool, chat.chat_id, b.user_id, "olá").await.unwrap();
    let messages = ChatRepo::messages(&pool, chat.chat_id).await.unwrap();
    let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["oi", "olá"]);

    let chats = ChatRepo::list_for_user(&pool, c.user_id).await.unwrap();
    assert_eq!(chats.len(), 1);
    assert_eq!(chats[0].users.len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_private_chat_creation_converges(pool: PgPool) {
    for i in 0..10 {
        let a = UserRepo::create(&pool, &new_user(&format!("a{i}@example.com")))
            .await
            .unwrap();
        let b = UserRepo::create(&pool, &new_user(&format!("b{i}@example.com")))
            .await
            .unwrap();

        let (left, right) = tokio::join!(
            ChatRepo::find_or_create_private(&pool, "x", a.user_id, b.user_id),
            ChatRepo::find_or_create_private(&pool, "y", b.user_id, a.user_id),
        );
        let (left, left_created) = left.unwrap();
        let (right, right_created) = right.unwrap();

        assert_eq!(left.chat_id, right.chat_id);
        assert!(left_created ^ right_created);
        assert_eq!(ChatRepo::participants(&pool, left.chat_id).await.unwrap().len(), 2);
    }

    let private_chats: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chats WHERE NOT is_group")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(private_chats, 10);
}
