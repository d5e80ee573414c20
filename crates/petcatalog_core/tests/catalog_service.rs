use petcatalog_core::db::open_db_in_memory;
use petcatalog_core::{
    CatalogError, CatalogService, ContentType, DeleteOutcome, FormError, GatewayError, Gender,
    PetAddress, PetForm, PetValidationError, SaveOutcome, SqlitePetGateway,
};
use rusqlite::Connection;

fn catalog(conn: &Connection) -> CatalogService<SqlitePetGateway<'_>> {
    CatalogService::new(SqlitePetGateway::try_new(conn).expect("migrated db has the pets table"))
}

fn stored_dummy(service: &CatalogService<SqlitePetGateway<'_>>) -> PetAddress {
    service
        .insert_dummy_pet()
        .expect("dummy insert should not error")
        .expect("dummy pet should be stored")
}

fn form(name: &str, breed: &str, gender: Gender, weight: &str) -> PetForm {
    PetForm {
        name: name.to_string(),
        breed: breed.to_string(),
        gender,
        weight: weight.to_string(),
    }
}

#[test]
fn save_new_pet_inserts_and_lists_it() {
    let conn = open_db_in_memory().expect("in-memory db should open");
    let service = catalog(&conn);

    let outcome = service
        .save_pet(None, &form("Toto", " Terrier ", Gender::Male, "7"))
        .expect("save should not error");
    assert_eq!(outcome, SaveOutcome::Inserted(PetAddress::Item(1)));

    let pets = service.list_pets().expect("list should succeed");
    assert_eq!(pets.len(), 1);
    assert_eq!(pets[0].breed.as_deref(), Some("Terrier"));
    assert_eq!(pets[0].weight, 7);
}

#[test]
fn blank_new_form_is_skipped() {
    let conn = open_db_in_memory().expect("in-memory db should open");
    let service = catalog(&conn);

    let outcome = service
        .save_pet(None, &PetForm::blank())
        .expect("save should not error");
    assert_eq!(outcome, SaveOutcome::Skipped);
    assert!(service.list_pets().expect("list should succeed").is_empty());
}

#[test]
fn new_form_without_name_is_a_validation_error() {
    let conn = open_db_in_memory().expect("in-memory db should open");
    let service = catalog(&conn);

    let err = service
        .save_pet(None, &form("", "Terrier", Gender::Unknown, ""))
        .expect_err("save must fail");
    assert!(matches!(
        err,
        CatalogError::Gateway(GatewayError::Validation(PetValidationError::NameRequired))
    ));
}

#[test]
fn non_numeric_weight_is_a_form_error() {
    let conn = open_db_in_memory().expect("in-memory db should open");
    let service = catalog(&conn);

    let err = service
        .save_pet(None, &form("Toto", "", Gender::Male, "7kg"))
        .expect_err("save must fail");
    assert!(matches!(err, CatalogError::Form(FormError::InvalidWeight(_))));
}

#[test]
fn edit_existing_pet_updates_all_fields() {
    let conn = open_db_in_memory().expect("in-memory db should open");
    let service = catalog(&conn);
    let address = stored_dummy(&service);

    let pet = service
        .load_pet(address)
        .expect("load should succeed")
        .expect("pet should exist");
    let original = PetForm::from_pet(&pet);
    let edited = PetForm {
        breed: String::new(),
        gender: Gender::Female,
        weight: String::new(),
        ..original
    };

    let outcome = service
        .save_pet(Some(address), &edited)
        .expect("save should not error");
    assert_eq!(outcome, SaveOutcome::Updated(1));

    let reloaded = service
        .load_pet(address)
        .expect("load should succeed")
        .expect("pet should exist");
    assert_eq!(reloaded.name, "Toto");
    assert_eq!(reloaded.breed.as_deref(), Some(""));
    assert_eq!(reloaded.gender, Gender::Female);
    assert_eq!(reloaded.weight, 0);
}

#[test]
fn editing_a_deleted_pet_reports_update_failed() {
    let conn = open_db_in_memory().expect("in-memory db should open");
    let service = catalog(&conn);

    let outcome = service
        .save_pet(Some(PetAddress::Item(8)), &form("Toto", "", Gender::Male, "1"))
        .expect("save should not error");
    assert_eq!(outcome, SaveOutcome::UpdateFailed);
    let missing = service
        .load_pet(PetAddress::Item(8))
        .expect("load should succeed");
    assert_eq!(missing, None);
}

#[test]
fn edit_rejected_by_store_reports_update_failed() {
    let conn = open_db_in_memory().expect("in-memory db should open");
    let service = catalog(&conn);
    let address = stored_dummy(&service);
    conn.execute_batch(
        "CREATE TRIGGER pets_frozen BEFORE UPDATE ON pets
         BEGIN
             SELECT RAISE(ABORT, 'frozen');
         END;",
    )
    .expect("trigger should install");

    let outcome = service
        .save_pet(Some(address), &form("Rex", "Boxer", Gender::Female, "30"))
        .expect("store rejection is not an error");
    assert_eq!(outcome, SaveOutcome::UpdateFailed);

    let pet = service
        .load_pet(address)
        .expect("load should succeed")
        .expect("pet should still exist");
    assert_eq!(pet.name, "Toto");
    assert_eq!(pet.gender, Gender::Male);
}

#[test]
fn collection_targets_are_rejected_for_item_actions() {
    let conn = open_db_in_memory().expect("in-memory db should open");
    let service = catalog(&conn);

    let save_err = service
        .save_pet(Some(PetAddress::Collection), &form("Toto", "", Gender::Male, "1"))
        .expect_err("save must fail");
    assert!(matches!(
        save_err,
        CatalogError::Gateway(GatewayError::UnsupportedAddress {
            operation: "save",
            ..
        })
    ));

    assert!(service.load_pet(PetAddress::Collection).is_err());
    assert!(service.delete_pet(PetAddress::Collection).is_err());
}

#[test]
fn delete_pet_reports_outcome() {
    let conn = open_db_in_memory().expect("in-memory db should open");
    let service = catalog(&conn);
    let address = stored_dummy(&service);

    let first = service.delete_pet(address).expect("delete should not error");
    assert_eq!(first, DeleteOutcome::Deleted(1));
    let second = service.delete_pet(address).expect("delete should not error");
    assert_eq!(second, DeleteOutcome::DeleteFailed);
}

#[test]
fn delete_all_returns_prior_row_count() {
    let conn = open_db_in_memory().expect("in-memory db should open");
    let service = catalog(&conn);
    for _ in 0..3 {
        stored_dummy(&service);
    }

    let removed = service
        .delete_all_pets()
        .expect("delete all should not error");
    assert_eq!(removed, 3);
    assert!(service.list_pets().expect("list should succeed").is_empty());
}

#[test]
fn list_is_ordered_by_id() {
    let conn = open_db_in_memory().expect("in-memory db should open");
    let service = catalog(&conn);
    for name in ["Zed", "Amy", "Max"] {
        service
            .save_pet(None, &form(name, "", Gender::Unknown, "1"))
            .expect("save should not error");
    }

    let ids: Vec<_> = service
        .list_pets()
        .expect("list should succeed")
        .into_iter()
        .map(|pet| pet.id)
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn content_type_passes_through_gateway() {
    let conn = open_db_in_memory().expect("in-memory db should open");
    let service = catalog(&conn);

    let content_type = service
        .content_type("pets/2")
        .expect("address should resolve");
    assert_eq!(content_type, ContentType::Item);
    assert!(matches!(
        service.content_type("dogs"),
        Err(CatalogError::Gateway(GatewayError::UnknownAddress(_)))
    ));
}
