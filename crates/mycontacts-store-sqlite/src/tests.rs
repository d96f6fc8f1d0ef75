//! Integration tests for `SqliteStore` and `ContactService` against an
//! in-memory database.

use mycontacts_core::{
  Error,
  address::NewAddress,
  contact::{AddressEntry, ContactAggregate},
  person::NewPerson,
  service::ContactService,
  store::Storage,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn service() -> ContactService<SqliteStore> {
  ContactService::new(store().await)
}

fn address(country: &str, city: &str) -> AddressEntry {
  AddressEntry {
    country:      country.into(),
    city:         city.into(),
    street:       "Broadway".into(),
    house_number: "12".into(),
    apartment:    Some("4B".into()),
  }
}

fn contact(
  name: &str,
  email: &str,
  addresses: Vec<AddressEntry>,
  phones: &[&str],
) -> ContactAggregate {
  ContactAggregate {
    full_name:     name.into(),
    email:         email.into(),
    addresses,
    phone_numbers: phones.iter().map(|p| p.to_string()).collect(),
  }
}

fn ann() -> ContactAggregate {
  contact("Ann Lee", "a@x.com", vec![address("US", "NY")], &["555-1111"])
}

async fn count_rows(s: &SqliteStore, table: &'static str) -> i64 {
  s.inspect(move |conn| {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
  })
  .await
  .unwrap()
}

// ─── Collections ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn save_assigns_id_and_find_by_name_returns_it() {
  let s = store().await;

  let saved = s
    .transaction(|uow| uow.persons().save(NewPerson::new("Ann Lee", "a@x.com")))
    .await
    .unwrap();

  let found = s
    .transaction(|uow| uow.persons().find_by_full_name("Ann Lee"))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(found, saved);
}

#[tokio::test]
async fn save_with_id_replaces_row_in_place() {
  let s = store().await;

  let first = s
    .transaction(|uow| uow.persons().save(NewPerson::new("Ann Lee", "old@x.com")))
    .await
    .unwrap();

  let id = first.id;
  let second = s
    .transaction(move |uow| {
      uow
        .persons()
        .save(NewPerson::new("Ann Lee", "new@x.com").with_id(id))
    })
    .await
    .unwrap();
  assert_eq!(second.id, first.id);

  let all = s.transaction(|uow| uow.persons().find_all()).await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].email, "new@x.com");
}

#[tokio::test]
async fn find_by_id_missing_returns_none() {
  let s = store().await;
  let found = s
    .transaction(|uow| uow.persons().find_by_id(Uuid::new_v4()))
    .await
    .unwrap();
  assert!(found.is_none());
}

#[tokio::test]
async fn deleting_person_with_children_is_rejected() {
  let s = store().await;
  let svc = ContactService::new(s.clone());
  svc.create_contact(ann()).await.unwrap();

  let err = s
    .transaction(|uow| {
      let person = uow.persons().find_by_full_name("Ann Lee")?.unwrap();
      uow.persons().delete(&person)
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Storage(_)));

  // Still fully there.
  let back = svc.get_contact_by_name("Ann Lee").await.unwrap();
  assert_eq!(back, ann());
}

#[tokio::test]
async fn child_rows_need_an_existing_owner() {
  let s = store().await;
  let err = s
    .transaction(|uow| {
      uow.addresses().save_all(vec![NewAddress {
        owner:        Uuid::new_v4(),
        created_date: chrono::Utc::now(),
        country:      "US".into(),
        city:         "NY".into(),
        street:       "Broadway".into(),
        house_number: "12".into(),
        apartment:    None,
      }])
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Storage(_)));
  assert_eq!(count_rows(&s, "addresses").await, 0);
}

// ─── Create / read ───────────────────────────────────────────────────────────

#[tokio::test]
async fn create_then_read_by_name_roundtrips() {
  let svc = service().await;
  let input = contact(
    "Ann Lee",
    "a@x.com",
    vec![address("US", "NY"), address("CA", "Toronto")],
    &["555-1111", "555-3333"],
  );

  svc.create_contact(input.clone()).await.unwrap();

  let back = svc.get_contact_by_name("Ann Lee").await.unwrap();
  assert_eq!(back, input);
}

#[tokio::test]
async fn create_with_no_children() {
  let svc = service().await;
  svc
    .create_contact(contact("Bo Chen", "bo@x.com", vec![], &[]))
    .await
    .unwrap();

  let back = svc.get_contact_by_name("Bo Chen").await.unwrap();
  assert!(back.addresses.is_empty());
  assert!(back.phone_numbers.is_empty());
}

#[tokio::test]
async fn get_all_contacts_assembles_each_person() {
  let svc = service().await;
  svc.create_contact(ann()).await.unwrap();
  svc
    .create_contact(contact("Bo Chen", "bo@x.com", vec![], &["555-9999"]))
    .await
    .unwrap();

  let mut all = svc.get_all_contacts().await.unwrap();
  all.sort_by(|a, b| a.full_name.cmp(&b.full_name));

  assert_eq!(all.len(), 2);
  assert_eq!(all[0], ann());
  assert_eq!(all[1].phone_numbers, ["555-9999"]);
}

#[tokio::test]
async fn identities_expose_person_rows() {
  let svc = service().await;
  svc.create_contact(ann()).await.unwrap();

  let people = svc.get_all_identities().await.unwrap();
  assert_eq!(people.len(), 1);
  assert_eq!(people[0].full_name, "Ann Lee");
  assert_eq!(people[0].email, "a@x.com");
}

#[tokio::test]
async fn lookup_by_phone_returns_owner_with_all_numbers() {
  let svc = service().await;
  svc
    .create_contact(contact(
      "Ann Lee",
      "a@x.com",
      vec![address("US", "NY")],
      &["555-1111", "555-3333"],
    ))
    .await
    .unwrap();

  let found = svc.get_contact_by_phone_number("555-3333").await.unwrap();
  assert_eq!(found.full_name, "Ann Lee");
  assert_eq!(found.email, "a@x.com");
  assert_eq!(found.phone_numbers, ["555-1111", "555-3333"]);
  assert_eq!(found.addresses, [address("US", "NY")]);
}

// ─── Not found ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn unknown_name_is_user_not_found() {
  let svc = service().await;
  let err = svc.get_contact_by_name("Nobody").await.unwrap_err();
  assert!(matches!(err, Error::UserNotFound(ref n) if n == "Nobody"));
}

#[tokio::test]
async fn unknown_id_delete_is_user_not_found() {
  let svc = service().await;
  let err = svc.delete_contact(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::UserNotFound(_)));
}

#[tokio::test]
async fn unknown_number_is_phone_number_not_found() {
  let svc = service().await;
  svc.create_contact(ann()).await.unwrap();
  let err = svc.get_contact_by_phone_number("555-0000").await.unwrap_err();
  assert!(matches!(err, Error::PhoneNumberNotFound(ref n) if n == "555-0000"));
}

#[tokio::test]
async fn update_of_unknown_name_is_user_not_found() {
  let svc = service().await;
  let err = svc.update_contact(ann()).await.unwrap_err();
  assert!(matches!(err, Error::UserNotFound(_)));
  assert!(svc.get_all_identities().await.unwrap().is_empty());
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_replaces_children_and_keeps_id() {
  let svc = service().await;
  svc.create_contact(ann()).await.unwrap();
  let before = svc.get_all_identities().await.unwrap().remove(0);

  svc
    .update_contact(contact(
      "Ann Lee",
      "ann@y.org",
      vec![address("FR", "Paris")],
      &["555-2222"],
    ))
    .await
    .unwrap();

  let after = svc.get_all_identities().await.unwrap();
  assert_eq!(after.len(), 1);
  assert_eq!(after[0].id, before.id);
  assert_eq!(after[0].email, "ann@y.org");
  assert!(after[0].created_date >= before.created_date);

  let back = svc.get_contact_by_name("Ann Lee").await.unwrap();
  assert_eq!(back.addresses, [address("FR", "Paris")]);
  assert_eq!(back.phone_numbers, ["555-2222"]);
}

#[tokio::test]
async fn update_with_same_children_does_not_duplicate() {
  let svc = service().await;
  let s = svc.storage().clone();
  svc.create_contact(ann()).await.unwrap();
  svc.update_contact(ann()).await.unwrap();

  assert_eq!(count_rows(&s, "addresses").await, 1);
  assert_eq!(count_rows(&s, "phone_numbers").await, 1);
  assert_eq!(svc.get_contact_by_name("Ann Lee").await.unwrap(), ann());
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_cascades_to_children() {
  let svc = service().await;
  let s = svc.storage().clone();
  svc.create_contact(ann()).await.unwrap();
  svc
    .create_contact(contact("Bo Chen", "bo@x.com", vec![address("US", "SF")], &["555-9999"]))
    .await
    .unwrap();

  let ann_id = svc
    .get_all_identities()
    .await
    .unwrap()
    .into_iter()
    .find(|p| p.full_name == "Ann Lee")
    .unwrap()
    .id;

  svc.delete_contact(ann_id).await.unwrap();

  let gone = s
    .transaction(move |uow| uow.persons().find_by_id(ann_id))
    .await
    .unwrap();
  assert!(gone.is_none());

  let owned: i64 = s
    .inspect(move |conn| {
      conn.query_row(
        "SELECT (SELECT COUNT(*) FROM addresses WHERE owner_id = ?1)
              + (SELECT COUNT(*) FROM phone_numbers WHERE owner_id = ?1)",
        rusqlite::params![ann_id.hyphenated().to_string()],
        |r| r.get(0),
      )
    })
    .await
    .unwrap();
  assert_eq!(owned, 0);

  // The other contact is untouched.
  assert_eq!(count_rows(&s, "addresses").await, 1);
  assert_eq!(count_rows(&s, "phone_numbers").await, 1);
  assert!(matches!(
    svc.get_contact_by_phone_number("555-1111").await,
    Err(Error::PhoneNumberNotFound(_))
  ));
}

// ─── Atomicity ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn failed_create_leaves_nothing_behind() {
  let svc = service().await;
  let s = svc.storage().clone();
  svc.create_contact(ann()).await.unwrap();

  // "555-1111" already belongs to Ann; the phone insert fails after the
  // person and before the addresses.
  let err = svc
    .create_contact(contact("Bo Chen", "bo@x.com", vec![address("US", "SF")], &["555-1111"]))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Storage(_)));

  assert!(matches!(
    svc.get_contact_by_name("Bo Chen").await,
    Err(Error::UserNotFound(_))
  ));
  assert_eq!(count_rows(&s, "persons").await, 1);
  assert_eq!(count_rows(&s, "addresses").await, 1);
  assert_eq!(count_rows(&s, "phone_numbers").await, 1);
}

#[tokio::test]
async fn failed_update_keeps_previous_contact() {
  let svc = service().await;
  svc.create_contact(ann()).await.unwrap();
  svc
    .create_contact(contact("Bo Chen", "bo@x.com", vec![], &["555-9999"]))
    .await
    .unwrap();

  // Bo's number cannot move to Ann while Bo still owns it.
  let err = svc
    .update_contact(contact("Ann Lee", "new@x.com", vec![], &["555-9999"]))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Storage(_)));

  assert_eq!(svc.get_contact_by_name("Ann Lee").await.unwrap(), ann());
  let bo = svc.get_contact_by_phone_number("555-9999").await.unwrap();
  assert_eq!(bo.full_name, "Bo Chen");
}

#[tokio::test]
async fn duplicate_full_name_is_rejected() {
  let svc = service().await;
  svc.create_contact(ann()).await.unwrap();

  let err = svc
    .create_contact(contact("Ann Lee", "other@x.com", vec![], &["555-7777"]))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Storage(_)));

  assert_eq!(svc.get_all_identities().await.unwrap().len(), 1);
  assert_eq!(svc.get_contact_by_name("Ann Lee").await.unwrap(), ann());
}

// ─── Scenario ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_update_lookup_scenario() {
  let svc = service().await;

  svc.create_contact(ann()).await.unwrap();

  let all = svc.get_all_contacts().await.unwrap();
  assert_eq!(all, [ann()]);

  svc
    .update_contact(contact("Ann Lee", "a@x.com", vec![], &["555-2222"]))
    .await
    .unwrap();

  let back = svc.get_contact_by_name("Ann Lee").await.unwrap();
  assert!(back.addresses.is_empty());
  assert_eq!(back.phone_numbers, ["555-2222"]);

  let err = svc.get_contact_by_phone_number("555-1111").await.unwrap_err();
  assert!(matches!(err, Error::PhoneNumberNotFound(_)));
}

#[tokio::test]
async fn concurrent_creates_all_commit() {
  let svc = std::sync::Arc::new(service().await);

  let handles: Vec<_> = (0..8)
    .map(|i| {
      let svc = svc.clone();
      tokio::spawn(async move {
        svc
          .create_contact(contact(
            &format!("Person {i}"),
            &format!("p{i}@x.com"),
            vec![address("US", "NY")],
            &[format!("555-000{i}").as_str()],
          ))
          .await
      })
    })
    .collect();

  for handle in handles {
    handle.await.unwrap().unwrap();
  }

  let all = svc.get_all_contacts().await.unwrap();
  assert_eq!(all.len(), 8);
  assert!(all.iter().all(|c| c.addresses.len() == 1 && c.phone_numbers.len() == 1));
}
