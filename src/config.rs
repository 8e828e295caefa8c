//! Support for library configuration options

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// The document store every [`Client`](crate::client::Client) built with [`Client::from_config`](crate::client::Client::from_config) talks to.
/// Feel free to override it when initing this library.
pub static BASE_URL: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("https://join-eaf29-default-rtdb.europe-west1.firebasedatabase.app".to_string())));

/// The name written to the session record on a guest login
pub static GUEST_NAME: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("Guest".to_string())));

/// Password given to contacts that are created from the address book rather than signing up themselves
pub static PLACEHOLDER_PASSWORD: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("pw".to_string())));

/// Returns a copy of a configuration value
pub fn get(setting: &Lazy<Arc<Mutex<String>>>) -> String {
    match setting.lock() {
        Ok(value) => value.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Overrides a configuration value
pub fn set<S: ToString>(setting: &Lazy<Arc<Mutex<String>>>, value: S) {
    match setting.lock() {
        Ok(mut current) => *current = value.to_string(),
        Err(poisoned) => *poisoned.into_inner() = value.to_string(),
    }
}

/// Get the path to the file that stores "remember me" credentials
pub fn remember_me_file() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".config/join-board/remember_me.json"),
        None => PathBuf::from("remember_me.json"),
    }
}
