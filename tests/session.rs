mod scenarii;

use serde_json::json;

use join_board::session::{LoginError, SignUpForm};
use join_board::validation::{InvalidForm, SignUpError};
use join_board::Session;


fn sign_up_form(mail: &str) -> SignUpForm {
    SignUpForm {
        name: "Emmanuel Mauer".to_string(),
        mail: mail.to_string(),
        password: "emma1234".to_string(),
        confirm_password: "emma1234".to_string(),
        accept_privacy_policy: true,
    }
}

fn sign_up_error(err: &Box<dyn std::error::Error>) -> Vec<SignUpError> {
    err.downcast_ref::<InvalidForm<SignUpError>>().unwrap().errors.clone()
}


#[tokio::test]
async fn test_login() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = scenarii::sample_store();
    let session = Session::new(&store);

    let user = session.login("sofiam@gmail.com", "sofia1234").await.unwrap();
    assert_eq!(user.name(), "Sofia Müller");
    assert_eq!(session.current_user().await.unwrap(), Some("Sofia Müller".to_string()));

    let err = session.login("sofiam@gmail.com", "wrong").await.unwrap_err();
    assert_eq!(err.downcast_ref::<LoginError>(), Some(&LoginError::WrongPassword));
    assert_eq!(err.to_string(), "Check your password. Please try again.");

    let err = session.login("SOFIAM@gmail.com", "sofia1234").await.unwrap_err();
    assert_eq!(err.downcast_ref::<LoginError>(), Some(&LoginError::UnknownMail));

    let err = session.login("sofiam", "sofia1234").await.unwrap_err();
    assert_eq!(err.downcast_ref::<LoginError>(), Some(&LoginError::InvalidMail));
    assert_eq!(err.to_string(), "Check your email. Please try again.");
}

#[tokio::test]
async fn test_guest_and_logout() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = scenarii::sample_store();
    let session = Session::new(&store);

    session.guest_login().await.unwrap();
    assert_eq!(store.snapshot()["loggedIn"], json!({"name": "Guest"}));
    assert!(session.is_guest().await.unwrap());

    session.logout().await.unwrap();
    assert_eq!(store.snapshot()["loggedIn"], json!({"name": ""}));
    assert_eq!(session.current_user().await.unwrap(), None);
    assert!(session.is_guest().await.unwrap() == false);
}

#[tokio::test]
async fn test_sign_up() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = scenarii::sample_store();
    let session = Session::new(&store);

    let id = session.sign_up(&sign_up_form("emmanuelma@gmail.com")).await.unwrap();
    let stored = store.snapshot()["users"][id.as_str()].clone();
    assert_eq!(stored["name"], json!("Emmanuel Mauer"));
    assert_eq!(stored["password"], json!("emma1234"));
    assert!(stored.get("phone").is_none());
    assert_eq!(session.current_user().await.unwrap(), Some("Emmanuel Mauer".to_string()));

    // The name is stored without surrounding spaces
    let mut padded = sign_up_form("evaf@gmail.com");
    padded.name = "  Eva Fischer ".to_string();
    let id = session.sign_up(&padded).await.unwrap();
    assert_eq!(store.snapshot()["users"][id.as_str()]["name"], json!("Eva Fischer"));
    assert_eq!(session.current_user().await.unwrap(), Some("Eva Fischer".to_string()));

    // The new users can log in
    session.logout().await.unwrap();
    session.login("emmanuelma@gmail.com", "emma1234").await.unwrap();
}

#[tokio::test]
async fn test_refused_sign_up() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = scenarii::sample_store();
    let session = Session::new(&store);

    let err = session.sign_up(&sign_up_form("antom@gmail.com")).await.unwrap_err();
    assert_eq!(sign_up_error(&err), vec![SignUpError::MailAlreadyUsed]);

    let mut form = sign_up_form("emmanuelma@gmail.com");
    form.confirm_password = "emma".to_string();
    let err = session.sign_up(&form).await.unwrap_err();
    assert_eq!(sign_up_error(&err), vec![SignUpError::PasswordMismatch]);
    assert_eq!(err.to_string(), "Invalid form: Your passwords don't match. Please try again.");

    form.accept_privacy_policy = false;
    let err = session.sign_up(&form).await.unwrap_err();
    assert_eq!(sign_up_error(&err), vec![SignUpError::PrivacyPolicyNotAccepted]);

    // Nothing has been written
    assert_eq!(store.snapshot(), scenarii::sample_content());
}
