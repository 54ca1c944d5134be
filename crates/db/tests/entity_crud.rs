//! Integration tests for the repository layer.
//!
//! Exercises every repository against a real database:
//! - Create then find returns the submitted values
//! - Cascade delete from users and marriages
//! - Unique, foreign key and check constraint violations
//! - Lookups by foreign key, name and deanery

use assert_matches::assert_matches;
use ccb_core::types::Date;
use ccb_db::models::baptism::CreateBaptism;
use ccb_db::models::confirmation::CreateConfirmation;
use ccb_db::models::eucharist::CreateEucharist;
use ccb_db::models::marriage::CreateMarriage;
use ccb_db::models::marriage_document::CreateMarriageDocument;
use ccb_db::models::marriage_party::CreateMarriageParty;
use ccb_db::models::parish::CreateParish;
use ccb_db::models::user::{CreateUser, UserProfile};
use ccb_db::repositories::{
    BaptismRepo, ConfirmationRepo, EucharistRepo, MarriageDocumentRepo, MarriagePartyRepo,
    MarriageRepo, ParishRepo, UserRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd_opt(y, m, d).unwrap()
}

fn new_user(email: &str, first: &str, last: &str) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        role: "member".to_string(),
        profile: UserProfile {
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            ..Default::default()
        },
    }
}

fn new_parish(name: &str, deanery: Option<&str>) -> CreateParish {
    CreateParish {
        parish_name: name.to_string(),
        deanery: deanery.map(str::to_string),
    }
}

fn new_marriage(user_id: i64) -> CreateMarriage {
    CreateMarriage {
        user_id,
        certificate_number: Some("CERT-001".to_string()),
        submission_location: None,
        submission_sub_county: None,
        submission_county: None,
        marriage_date: Some(date(2020, 6, 20)),
        marriage_entry_number: None,
        registrar_certification_number: None,
        special_license_number: None,
        conducted_by: Some("Fr. Odongo".to_string()),
        private_parties_count: Some(0),
        private_parties_names: None,
    }
}

fn new_party(marriage_id: i64, party_type: &str, full_name: &str) -> CreateMarriageParty {
    CreateMarriageParty {
        marriage_id,
        party_type: party_type.to_string(),
        full_name: full_name.to_string(),
        age: Some(30),
        marital_status: None,
        residence_address: None,
        residence_county: None,
        residence_sub_county: None,
        occupation: None,
        father_name: None,
        father_occupation: None,
        father_residence: None,
        mother_name: None,
        mother_occupation: None,
        mother_residence: None,
    }
}

fn new_document(marriage_id: i64, stored: &str) -> CreateMarriageDocument {
    CreateMarriageDocument {
        marriage_id,
        document_type: Some("certificate".to_string()),
        file_name: "cert.pdf".to_string(),
        file_path: stored.to_string(),
        file_size: 1024,
    }
}

fn db_constraint(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) => db.constraint().map(str::to_string),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_and_find_user(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("a@x.com", "Achieng", "Okello"))
        .await
        .unwrap();
    assert_eq!(user.email, "a@x.com");
    assert_eq!(user.role, "member");
    assert!(!user.email_verified);

    let found = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(found.first_name.as_deref(), Some("Achieng"));
    assert_eq!(found.last_name.as_deref(), Some("Okello"));

    let by_email = UserRepo::find_by_email(&pool, "a@x.com").await.unwrap();
    assert_eq!(by_email.map(|u| u.id), Some(user.id));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_email_rejected(pool: PgPool) {
    UserRepo::create(&pool, &new_user("dup@x.com", "A", "B"))
        .await
        .unwrap();
    let err = UserRepo::create(&pool, &new_user("dup@x.com", "C", "D"))
        .await
        .unwrap_err();
    assert_eq!(db_constraint(&err).as_deref(), Some("uq_users_email"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_role_rejected(pool: PgPool) {
    let mut input = new_user("r@x.com", "R", "S");
    input.role = "bishop".to_string();
    let err = UserRepo::create(&pool, &input).await.unwrap_err();
    assert_eq!(db_constraint(&err).as_deref(), Some("ck_users_role"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_find_user_by_name(pool: PgPool) {
    let a = UserRepo::create(&pool, &new_user("a@x.com", "Mary", "Nakato"))
        .await
        .unwrap();
    UserRepo::create(&pool, &new_user("b@x.com", "John", "Mukasa"))
        .await
        .unwrap();

    for query in ["mary", "NAKATO", "  Mary Nakato  "] {
        let found = UserRepo::find_by_name(&pool, query).await.unwrap();
        assert_eq!(found.len(), 1, "query {query:?}");
        assert_eq!(found[0].id, a.id);
    }
    assert!(UserRepo::find_by_name(&pool, "Peter")
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_count_and_list_by_parish(pool: PgPool) {
    let parish = ParishRepo::create(&pool, &new_parish("St. Kizito", Some("Kampala")))
        .await
        .unwrap();
    let mut member = new_user("p@x.com", "P", "Q");
    member.profile.parish_id = Some(parish.id);
    let member = UserRepo::create(&pool, &member).await.unwrap();
    UserRepo::create(&pool, &new_user("o@x.com", "O", "R"))
        .await
        .unwrap();

    assert_eq!(UserRepo::count(&pool).await.unwrap(), 2);
    let members = UserRepo::list_by_parish(&pool, parish.id).await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, member.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_user_with_unknown_parish_rejected(pool: PgPool) {
    let mut input = new_user("p@x.com", "P", "Q");
    input.profile.parish_id = Some(9999);
    let err = UserRepo::create(&pool, &input).await.unwrap_err();
    assert_eq!(db_constraint(&err).as_deref(), Some("fk_users_parish_id"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_mark_email_verified(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("v@x.com", "V", "W"))
        .await
        .unwrap();
    assert!(UserRepo::mark_email_verified(&pool, user.id).await.unwrap());
    let user = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(user.email_verified);
    assert!(!UserRepo::mark_email_verified(&pool, 9999).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_user_cascades_to_sacraments(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("c@x.com", "C", "D"))
        .await
        .unwrap();
    let baptism = BaptismRepo::create(
        &pool,
        &CreateBaptism {
            user_id: user.id,
            parish: Some("St. Kizito".into()),
            baptism_date: Some(date(1990, 1, 7)),
            minister: None,
            sponsor: None,
        },
    )
    .await
    .unwrap();
    let marriage = MarriageRepo::create(&pool, &new_marriage(user.id))
        .await
        .unwrap();

    assert!(UserRepo::delete(&pool, user.id).await.unwrap());
    assert!(BaptismRepo::find_by_id(&pool, baptism.id)
        .await
        .unwrap()
        .is_none());
    assert!(MarriageRepo::find_by_id(&pool, marriage.id)
        .await
        .unwrap()
        .is_none());
    assert!(!UserRepo::delete(&pool, user.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Parishes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_parish_name_unique_case_insensitive(pool: PgPool) {
    ParishRepo::create(&pool, &new_parish("Christ the King", None))
        .await
        .unwrap();
    let err = ParishRepo::create(&pool, &new_parish("christ the king", None))
        .await
        .unwrap_err();
    assert_eq!(db_constraint(&err).as_deref(), Some("uq_parishes_parish_name"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_parish_full_text_and_deanery_lookup(pool: PgPool) {
    let kizito = ParishRepo::create(&pool, &new_parish("St. Kizito Bugolobi", Some("Kampala")))
        .await
        .unwrap();
    ParishRepo::create(&pool, &new_parish("Our Lady of Africa", Some("Mukono")))
        .await
        .unwrap();

    let found = ParishRepo::find_by_name(&pool, "kizito").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, kizito.id);

    let kampala = ParishRepo::list_by_deanery(&pool, "kampala").await.unwrap();
    assert_eq!(kampala.len(), 1);
    assert_eq!(ParishRepo::list(&pool).await.unwrap().len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_parish_clears_member_parish(pool: PgPool) {
    let parish = ParishRepo::create(&pool, &new_parish("Rubaga", None))
        .await
        .unwrap();
    let mut input = new_user("m@x.com", "M", "N");
    input.profile.parish_id = Some(parish.id);
    let user = UserRepo::create(&pool, &input).await.unwrap();

    assert!(ParishRepo::delete(&pool, parish.id).await.unwrap());
    let user = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(user.parish_id, None);
}

// ---------------------------------------------------------------------------
// Sacraments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_one_baptism_per_person(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("b@x.com", "B", "C"))
        .await
        .unwrap();
    let input = CreateBaptism {
        user_id: user.id,
        parish: None,
        baptism_date: None,
        minister: None,
        sponsor: None,
    };
    BaptismRepo::create(&pool, &input).await.unwrap();
    let err = BaptismRepo::create(&pool, &input).await.unwrap_err();
    assert_eq!(db_constraint(&err).as_deref(), Some("uq_baptisms_user_id"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_sacrament_for_unknown_user_rejected(pool: PgPool) {
    let err = EucharistRepo::create(
        &pool,
        &CreateEucharist {
            user_id: 4242,
            eucharist_place: None,
            eucharist_date: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(db_constraint(&err).as_deref(), Some("fk_eucharists_user_id"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_confirmations_by_user(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("k@x.com", "K", "L"))
        .await
        .unwrap();
    let created = ConfirmationRepo::create(
        &pool,
        &CreateConfirmation {
            user_id: user.id,
            confirmation_place: Some("Namugongo".into()),
            confirmation_date: Some(date(2005, 6, 3)),
            confirmation_no: Some("C-17".into()),
            minister: Some("Bp. Lwanga".into()),
        },
    )
    .await
    .unwrap();
    assert_eq!(created.confirmation_date, Some(date(2005, 6, 3)));

    let listed = ConfirmationRepo::list_by_user(&pool, user.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].confirmation_no.as_deref(), Some("C-17"));
    assert!(ConfirmationRepo::list_by_user(&pool, user.id + 1)
        .await
        .unwrap()
        .is_empty());
}

// ---------------------------------------------------------------------------
// Marriages, parties, documents
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_party_type_and_age_checked(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("g@x.com", "G", "H"))
        .await
        .unwrap();
    let marriage = MarriageRepo::create(&pool, &new_marriage(user.id))
        .await
        .unwrap();

    let err = MarriagePartyRepo::create(&pool, &new_party(marriage.id, "best_man", "X"))
        .await
        .unwrap_err();
    assert_eq!(
        db_constraint(&err).as_deref(),
        Some("ck_marriage_parties_party_type")
    );

    let mut old = new_party(marriage.id, "witness", "Y");
    old.age = Some(200);
    let err = MarriagePartyRepo::create(&pool, &old).await.unwrap_err();
    assert_eq!(db_constraint(&err).as_deref(), Some("ck_marriage_parties_age"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_marriage_with_details(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("w@x.com", "W", "Z"))
        .await
        .unwrap();
    let first = MarriageRepo::create(&pool, &new_marriage(user.id))
        .await
        .unwrap();
    let mut later = new_marriage(user.id);
    later.marriage_date = Some(date(2023, 2, 11));
    let second = MarriageRepo::create(&pool, &later).await.unwrap();

    MarriagePartyRepo::create(&pool, &new_party(first.id, "witness", "Witness One"))
        .await
        .unwrap();
    MarriagePartyRepo::create(&pool, &new_party(first.id, "bride", "Bride One"))
        .await
        .unwrap();
    MarriagePartyRepo::create(&pool, &new_party(first.id, "groom", "Groom One"))
        .await
        .unwrap();
    MarriageDocumentRepo::create(&pool, &new_document(first.id, "1_cert.pdf"))
        .await
        .unwrap();

    let details = MarriageRepo::list_with_details_by_user(&pool, user.id)
        .await
        .unwrap();
    assert_eq!(details.len(), 2);

    // Most recent marriage first.
    assert_eq!(details[0].marriage.id, second.id);
    assert!(details[0].parties.is_empty());
    assert!(details[0].documents.is_empty());

    assert_eq!(details[1].marriage.id, first.id);
    let kinds: Vec<&str> = details[1]
        .parties
        .iter()
        .map(|p| p.party_type.as_str())
        .collect();
    assert_eq!(kinds, ["groom", "bride", "witness"]);
    assert_eq!(details[1].documents.len(), 1);

    assert!(MarriageRepo::list_with_details_by_user(&pool, user.id + 1)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_marriage_cascades(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("d@x.com", "D", "E"))
        .await
        .unwrap();
    let marriage = MarriageRepo::create(&pool, &new_marriage(user.id))
        .await
        .unwrap();
    let party = MarriagePartyRepo::create(&pool, &new_party(marriage.id, "groom", "G"))
        .await
        .unwrap();
    let doc = MarriageDocumentRepo::create(&pool, &new_document(marriage.id, "2_cert.pdf"))
        .await
        .unwrap();

    assert!(MarriageRepo::delete(&pool, marriage.id).await.unwrap());
    assert!(MarriagePartyRepo::find_by_id(&pool, party.id)
        .await
        .unwrap()
        .is_none());
    assert!(MarriageDocumentRepo::find_by_id(&pool, doc.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_document_delete_returns_row(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("f@x.com", "F", "G"))
        .await
        .unwrap();
    let marriage = MarriageRepo::create(&pool, &new_marriage(user.id))
        .await
        .unwrap();
    let doc = MarriageDocumentRepo::create(&pool, &new_document(marriage.id, "3_cert.pdf"))
        .await
        .unwrap();

    let found = MarriageDocumentRepo::find_by_file_path(&pool, "3_cert.pdf")
        .await
        .unwrap();
    assert_eq!(found.map(|d| d.id), Some(doc.id));

    let deleted = MarriageDocumentRepo::delete(&pool, doc.id).await.unwrap();
    assert_matches!(deleted, Some(d) if d.file_path == "3_cert.pdf");
    assert!(MarriageDocumentRepo::delete(&pool, doc.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_stored_path_rejected(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("s@x.com", "S", "T"))
        .await
        .unwrap();
    let marriage = MarriageRepo::create(&pool, &new_marriage(user.id))
        .await
        .unwrap();
    MarriageDocumentRepo::create(&pool, &new_document(marriage.id, "4_cert.pdf"))
        .await
        .unwrap();
    let err = MarriageDocumentRepo::create(&pool, &new_document(marriage.id, "4_cert.pdf"))
        .await
        .unwrap_err();
    assert_eq!(
        db_constraint(&err).as_deref(),
        Some("uq_marriage_documents_file_path")
    );
}
