//! Integration tests for soft-delete behaviour.
//!
//! Soft-deleted rows must disappear from `find_by_id` and list queries,
//! and a second delete must report `false`.

use sqlx::PgPool;
use simcc_db::models::collection::CreateCollection;
use simcc_db::models::graduate_program::{
    CreateGraduateProgram, GraduateProgramFilter, MemberType, NewProgramResearcher,
    NewProgramStudent,
};
use simcc_db::models::institution::CreateInstitution;
use simcc_db::models::researcher::{CreateResearcher, ResearcherFilter};
use simcc_db::models::user::CreateUser;
use simcc_db::repositories::{
    CollectionRepo, GraduateProgramRepo, InstitutionRepo, ResearcherRepo, UserRepo,
};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_institution(name: &str) -> CreateInstitution {
    CreateInstitution {
        institution_id: None,
        name: name.to_string(),
        acronym: None,
        lattes_id: None,
    }
}

fn new_researcher(name: &str, lattes_id: &str) -> CreateResearcher {
    CreateResearcher {
        researcher_id: None,
        name: name.to_string(),
        lattes_id: lattes_id.to_string(),
        institution_id: None,
        ufmg_registration: None,
    }
}

fn new_program(institution_id: Uuid) -> CreateGraduateProgram {
    CreateGraduateProgram {
        graduate_program_id: None,
        code: "28001010".to_string(),
        name: "Programa de Computação".to_string(),
        name_en: None,
        basic_area: None,
        cooperation_project: None,
        area: "CIÊNCIA DA COMPUTAÇÃO".to_string(),
        modality: "ACADÊMICO".to_string(),
        program_type: None,
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

fn new_user(email: &str) -> CreateUser {
    CreateUser {
        username: "Soft Delete".to_string(),
        email: email.to_string(),
        password_hash: "x".to_string(),
        provider: "local".to_string(),
        institution_id: None,
        linkedin: None,
        lattes_id: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_deleted_institution_is_hidden(pool: PgPool) {
    let created = InstitutionRepo::create_many(&pool, &[new_institution("UFBA")])
        .await
        .unwrap();
    let id = created[0].institution_id;

    assert!(InstitutionRepo::soft_delete(&pool, id).await.unwrap());
    assert!(InstitutionRepo::find_by_id(&pool, id).await.unwrap().is_none());

    let listed = InstitutionRepo::list_with_stats(&pool, None).await.unwrap();
    assert!(listed.iter().all(|s| s.institution.institution_id != id));

    // Second delete is a no-op.
    assert!(!InstitutionRepo::soft_delete(&pool, id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_deleted_researcher_frees_lattes_id(pool: PgPool) {
    let first = ResearcherRepo::create_many(&pool, &[new_researcher("Ana", "0001")])
        .await
        .unwrap();
    assert!(ResearcherRepo::soft_delete(&pool, first[0].researcher_id).await.unwrap());

    let filter = ResearcherFilter::default();
    let listed = ResearcherRepo::list(&pool, &filter, 100, 0).await.unwrap();
    assert!(listed.is_empty());

    // The unique index only covers live rows.
    ResearcherRepo::create_many(&pool, &[new_researcher("Ana", "0001")])
        .await
        .unwrap();
    assert_eq!(ResearcherRepo::count(&pool, None).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_collection_delete_requires_owner(pool: PgPool) {
    let owner = UserRepo::create(&pool, &new_user("owner@example.com")).await.unwrap();
    let other = UserRepo::create(&pool, &new_user("other@example.com")).await.unwrap();

    let input = CreateCollection {
        name: "Favoritos".to_string(),
        description: String::new(),
    };
    let collection = CollectionRepo::create(&pool, owner.user_id, &input).await.unwrap();

    assert!(!CollectionRepo::soft_delete(&pool, collection.collection_id, other.user_id)
        .await
        .unwrap());
    assert!(CollectionRepo::soft_delete(&pool, collection.collection_id, owner.user_id)
        .await
        .unwrap());
    assert!(CollectionRepo::find_by_id(&pool, collection.collection_id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_deleted_user_cannot_be_found_by_email(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("Gone@Example.com")).await.unwrap();
    assert!(UserRepo::find_by_email(&pool, "gone@example.com").await.unwrap().is_some());

    assert!(UserRepo::soft_delete(&pool, user.user_id).await.unwrap());
    assert!(UserRepo::find_by_email(&pool, "gone@example.com").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_deleted_researcher_leaves_rosters_and_stats(pool: PgPool) {
    let institution_id = InstitutionRepo::create_many(&pool, &[new_institution("UFMG")])
        .await
        .unwrap()[0]
        .institution_id;
    let program_id = GraduateProgramRepo::create_many(&pool, &[new_program(institution_id)])
        .await
        .unwrap()[0]
        .graduate_program_id;

    let mut input = new_researcher("Carla", "0100");
    input.institution_id = Some(institution_id);
    let researcher_id = ResearcherRepo::create_many(&pool, &[input]).await.unwrap()[0].researcher_id;

    GraduateProgramRepo::add_researchers(
        &pool,
        &[NewProgramResearcher {
            graduate_program_id: program_id,
            researcher_id,
            member_type: MemberType::Permanente,
            years: vec![2024],
        }],
    )
    .await
    .unwrap();
    GraduateProgramRepo::add_students(
        &pool,
        &[NewProgramStudent {
            graduate_program_id: program_id,
            lattes_id: "0100".to_string(),
            name: None,
            institution_id: None,
            years: vec![2024],
        }],
    )
    .await
    .unwrap();

    assert!(ResearcherRepo::soft_delete(&pool, researcher_id).await.unwrap());

    let filter = GraduateProgramFilter {
        institution_id: None,
        graduate_program_id: Some(program_id),
    };
    let summary = &GraduateProgramRepo::list_with_counts(&pool, &filter).await.unwrap()[0];
    assert_eq!(summary.qtd_permanente, 0);
    assert_eq!(summary.qtd_colaborador, 0);
    assert_eq!(summary.qtd_discente, 0);

    assert!(GraduateProgramRepo::list_researchers(&pool, program_id, None)
        .await
        .unwrap()
        .is_empty());
    assert!(GraduateProgramRepo::list_students(&pool, program_id)
        .await
        .unwrap()
        .is_empty());

    let stats = InstitutionRepo::list_with_stats(&pool, Some(institution_id))
        .await
        .unwrap();
    assert_eq!(stats[0].count_r, 0);
    assert_eq!(stats[0].count_gp, 1);
    assert_eq!(stats[0].count_gpr, 0);
    assert_eq!(stats[0].count_gps, 0);
}
