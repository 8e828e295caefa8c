//! Logging in, signing up and out
//!
//! The store only holds one `loggedIn` record, which every login, guest login and logout overwrites. It is shared by every client of the store.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::contact::{self, Contact, ContactData};
use crate::contacts::{fetch_contacts, USERS_PATH};
use crate::key::Key;
use crate::traits::DocumentStore;
use crate::validation::{self, InvalidForm, SignUpError};

/// The store path of the session record
pub const SESSION_PATH: &str = "loggedIn";

/// Why a login was refused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginError {
    /// This is not an email address
    InvalidMail,
    /// No user has this email address
    UnknownMail,
    WrongPassword,
}

impl Display for LoginError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LoginError::InvalidMail | LoginError::UnknownMail => write!(f, "Check your email. Please try again."),
            LoginError::WrongPassword => write!(f, "Check your password. Please try again."),
        }
    }
}

impl Error for LoginError {}


/// The content of the sign-up form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub name: String,
    pub mail: String,
    pub password: String,
    pub confirm_password: String,
    pub accept_privacy_policy: bool,
}


/// The session record, as stored under `loggedIn`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
struct SessionRecord {
    #[serde(default)]
    name: String,
}

/// Handles who is logged in
pub struct Session<S> {
    store: S,
}

impl<S> Session<S>
where
    S: DocumentStore + Sync,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Log in a registered user.
    ///
    /// A refused login is a [`LoginError`]. Other errors are failures of the store
    pub async fn login(&self, mail: &str, password: &str) -> Result<Contact, Box<dyn Error>> {
        if validation::is_valid_email(mail) == false {
            return Err(Box::new(LoginError::InvalidMail));
        }

        let users = fetch_contacts(&self.store).await?;
        let user = match users.into_iter().find(|user| user.mail() == mail) {
            None => {
                log::info!("Login refused: no user with mail {}", mail);
                return Err(Box::new(LoginError::UnknownMail));
            },
            Some(user) => user,
        };
        if user.data().password != password {
            log::info!("Login refused: wrong password for {}", mail);
            return Err(Box::new(LoginError::WrongPassword));
        }

        self.set_current_user(user.name()).await?;
        log::info!("{} is logged in", user.name());
        Ok(user)
    }

    /// Log in as the guest user
    pub async fn guest_login(&self) -> Result<(), Box<dyn Error>> {
        let guest = crate::config::get(&crate::config::GUEST_NAME);
        self.set_current_user(&guest).await?;
        log::info!("Logged in as {}", guest);
        Ok(())
    }

    /// Register a new user (with a random colour) and log them in.
    ///
    /// An invalid form is an [`InvalidForm<SignUpError>`](InvalidForm)
    pub async fn sign_up(&self, form: &SignUpForm) -> Result<Key, Box<dyn Error>> {
        if form.accept_privacy_policy == false {
            // Nothing needs to be fetched to refuse this one
            return Err(Box::new(InvalidForm { errors: vec![SignUpError::PrivacyPolicyNotAccepted] }));
        }

        let users = fetch_contacts(&self.store).await?;
        let mails: Vec<&str> = users.iter().map(|user| user.mail()).collect();
        validation::validate_sign_up(form, &mails)?;

        let data = ContactData {
            name: form.name.trim().to_string(),
            mail: form.mail.clone(),
            phone: String::new(),
            color: contact::random_color(),
            password: form.password.clone(),
        };
        let key = self.store.post(USERS_PATH, &serde_json::to_value(&data)?).await?;
        log::info!("Signed up {} ({})", data.name, key);

        self.set_current_user(&data.name).await?;
        Ok(key)
    }

    /// Clear the session record
    pub async fn logout(&self) -> Result<(), Box<dyn Error>> {
        self.set_current_user("").await?;
        log::info!("Logged out");
        Ok(())
    }

    /// The name of whoever is logged in, if anyone
    pub async fn current_user(&self) -> Result<Option<String>, Box<dyn Error>> {
        let record = self.store.get(SESSION_PATH).await?;
        if record.is_null() {
            return Ok(None);
        }
        let record: SessionRecord = serde_json::from_value(record)?;
        match record.name.is_empty() {
            true => Ok(None),
            false => Ok(Some(record.name)),
        }
    }

    /// Whether the guest is logged in
    pub async fn is_guest(&self) -> Result<bool, Box<dyn Error>> {
        let guest = crate::config::get(&crate::config::GUEST_NAME);
        Ok(self.current_user().await? == Some(guest))
    }

    async fn set_current_user(&self, name: &str) -> Result<(), Box<dyn Error>> {
        self.store.put(SESSION_PATH, &json!({ "name": name })).await
    }
}


/// Credentials saved by the "remember me" checkbox of the login form.
///
/// They are stored in plain text
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RememberMe {
    pub email: String,
    pub password: String,
}

impl RememberMe {
    pub fn new<S: ToString>(email: S, password: S) -> Self {
        Self { email: email.to_string(), password: password.to_string() }
    }

    /// Save or forget credentials, depending on whether the checkbox is checked
    pub fn update(path: &Path, remember: bool, email: &str, password: &str) -> Result<(), Box<dyn Error>> {
        match remember {
            true => Self::new(email, password).save(path),
            false => Self::clear(path),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(path)?;
        serde_json::to_writer(file, self)?;
        log::debug!("Saved credentials to {:?}", path);
        Ok(())
    }

    /// Returns the saved credentials, if any
    pub fn load(path: &Path) -> Result<Option<Self>, Box<dyn Error>> {
        let file = match std::fs::File::open(path) {
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(format!("Unable to open file {:?}: {}", path, err).into()),
            Ok(file) => file,
        };
        Ok(Some(serde_json::from_reader(file)?))
    }

    pub fn clear(path: &Path) -> Result<(), Box<dyn Error>> {
        match std::fs::remove_file(path) {
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
            Ok(()) => Ok(()),
        }
    }
}
