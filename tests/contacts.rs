mod scenarii;

use serde_json::json;

use join_board::contact::ContactForm;
use join_board::validation::{ContactFormError, InvalidForm};
use join_board::{AddressBook, Key};


#[tokio::test]
async fn test_list_contacts() {
    let _ = env_logger::builder().is_test(true).try_init();

    let book = AddressBook::new(scenarii::sample_store());
    let names: Vec<String> = book.list().await.unwrap().iter().map(|c| c.name().to_string()).collect();
    assert_eq!(names, vec!["Anton Mayer", "Benedikt Ziegler", "Sofia Müller"]);

    let groups = book.grouped().await.unwrap();
    assert_eq!(groups.keys().copied().collect::<Vec<char>>(), vec!['A', 'B', 'S']);

    let anton = book.get(&Key::from(scenarii::ANTON)).await.unwrap().unwrap();
    assert_eq!(anton.initials(), "AM");
    assert_eq!(anton.color_hex(), "#ff7a00");
    assert!(book.get(&Key::from("-Nobody")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_add_and_edit_contact() {
    let _ = env_logger::builder().is_test(true).try_init();

    let book = AddressBook::new(scenarii::sample_store());
    let id = book.add(&ContactForm::new(" Eva Fischer ", "eva@gmail.com", "+49 3333 333 33 3")).await.unwrap();

    let stored = book.store().snapshot()["users"][id.as_str()].clone();
    assert_eq!(stored["name"], json!("Eva Fischer"));
    assert_eq!(stored["password"], json!("pw"));
    assert!(stored["color"].as_str().unwrap().starts_with("rgba("));

    let edited = book.edit(&id, &ContactForm::new("Eva Maria Fischer", "evam@gmail.com", "+49 4444 444 44 4")).await.unwrap();
    assert!(edited);
    let eva = book.get(&id).await.unwrap().unwrap();
    assert_eq!(eva.name(), "Eva Maria Fischer");
    assert_eq!(eva.mail(), "evam@gmail.com");
    assert_eq!(eva.initials(), "EF");
    // Not part of the form, so they are kept
    assert_eq!(eva.data().password, "pw");
    assert_eq!(eva.color(), stored["color"].as_str().unwrap());

    let missing = book.edit(&Key::from("-Nobody"), &ContactForm::new("a", "a@b.cd", "1")).await.unwrap();
    assert!(missing == false);
    assert!(book.get(&Key::from("-Nobody")).await.unwrap().is_none());

    let err = book.edit(&id, &ContactForm::new("", "evam@gmail.com", "")).await.unwrap_err();
    let invalid = err.downcast_ref::<InvalidForm<ContactFormError>>().unwrap();
    assert_eq!(invalid.errors, vec![ContactFormError::MissingName, ContactFormError::MissingPhone]);
}

#[tokio::test]
async fn test_delete_contact_cascades() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = scenarii::sample_store();
    let book = AddressBook::new(&store);

    let report = book.delete(&Key::from(scenarii::BENEDIKT)).await.unwrap();
    assert!(report.deleted);
    assert!(report.is_success());
    assert_eq!(report.updated_tasks, vec![Key::from(scenarii::RECIPE_TASK), Key::from(scenarii::CSS_TASK)]);

    let content = store.snapshot();
    assert!(content["users"].get(scenarii::BENEDIKT).is_none());
    assert_eq!(content["tasks"]["toDo"][scenarii::RECIPE_TASK]["contacts"], json!([scenarii::ANTON]));
    // The last assignee is gone, and so is the list
    assert!(content["tasks"]["progress"][scenarii::CSS_TASK].get("contacts").is_none());
    assert_eq!(content["tasks"]["done"][scenarii::TEMPLATE_TASK]["contacts"], json!([scenarii::ANTON]));
}

#[tokio::test]
async fn test_delete_missing_contact() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = scenarii::sample_store();
    let book = AddressBook::new(&store);

    let report = book.delete(&Key::from("-Nobody")).await.unwrap();
    assert!(report.deleted == false);
    assert!(report.updated_tasks.is_empty());
    assert_eq!(store.snapshot(), scenarii::sample_content());
}

#[tokio::test]
async fn test_partial_cascade() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (store, behaviour) = scenarii::sample_store_with_mock();
    let book = AddressBook::new(&store);

    // The first task is updated, the second one is not
    behaviour.lock().unwrap().put_behaviour = (1, 1);
    let report = book.delete(&Key::from(scenarii::BENEDIKT)).await.unwrap();
    assert!(report.deleted);
    assert!(report.is_success() == false);
    assert_eq!(report.n_errors, 1);
    assert_eq!(report.updated_tasks, vec![Key::from(scenarii::RECIPE_TASK)]);

    let content = store.snapshot();
    assert!(content["users"].get(scenarii::BENEDIKT).is_none());
    assert_eq!(content["tasks"]["progress"][scenarii::CSS_TASK]["contacts"], json!([scenarii::BENEDIKT]));
}
