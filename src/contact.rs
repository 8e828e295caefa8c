//! Contacts (a.k.a. users) of the address book

use serde::{Deserialize, Serialize};
use rand::seq::SliceRandom;

use crate::key::Key;
use crate::validation::{self, ContactFormError, InvalidForm};

/// The colours a new contact can randomly be given
pub const PALETTE: [(u8, u8, u8, u8); 15] = [
    (255, 122, 0, 1),
    (255, 113, 255, 1),
    (110, 82, 255, 1),
    (152, 39, 255, 1),
    (0, 190, 232, 1),
    (31, 215, 193, 1),
    (252, 89, 84, 1),
    (255, 163, 84, 1),
    (248, 89, 255, 1),
    (255, 222, 70, 1),
    (70, 47, 138, 1),
    (190, 255, 43, 1),
    (255, 246, 70, 1),
    (255, 70, 70, 1),
    (255, 183, 84, 1),
];

/// The colour used for contacts that cannot be found (or that have an invalid colour)
pub const UNKNOWN_COLOR: &str = "#000000";

/// Pick one of the [`PALETTE`] colours, formatted as a CSS `rgba(...)` string
pub fn random_color() -> String {
    let mut rng = rand::thread_rng();
    let (r, g, b, a) = PALETTE.choose(&mut rng).copied().unwrap_or(PALETTE[0]);
    format!("rgba({}, {}, {}, {})", r, g, b, a)
}


/// The body of a contact, as it is stored under `users/{id}`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mail: String,
    /// Users that signed up by themselves have no phone number
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub phone: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub password: String,
}

/// An entry of the address book
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contact {
    id: Key,
    data: ContactData,
}

impl Contact {
    pub fn new(id: Key, data: ContactData) -> Self {
        Self { id, data }
    }

    /// Read a contact from a document of the store
    pub fn from_document(id: Key, document: serde_json::Value) -> Result<Self, serde_json::Error> {
        Ok(Self::new(id, serde_json::from_value(document)?))
    }

    pub fn id(&self) -> &Key            { &self.id         }
    pub fn name(&self) -> &str          { &self.data.name  }
    pub fn mail(&self) -> &str          { &self.data.mail  }
    pub fn phone(&self) -> &str         { &self.data.phone }
    pub fn color(&self) -> &str         { &self.data.color }
    pub fn data(&self) -> &ContactData  { &self.data       }

    /// The letters shown in the avatar bubble
    pub fn initials(&self) -> String {
        initials(&self.data.name)
    }

    /// The letter this contact is listed under in the address book
    pub fn initial_letter(&self) -> Option<char> {
        self.data.name.trim().chars().next().and_then(|c| c.to_uppercase().next())
    }

    /// The colour of this contact, normalised as `#rrggbb` (or `#rrggbbaa` for translucent colours)
    pub fn color_hex(&self) -> String {
        match csscolorparser::parse(self.data.color.trim()) {
            Ok(color) => color.to_hex_string(),
            Err(err) => {
                log::debug!("Contact {} has an invalid colour {:?}: {}", self.id, self.data.color, err);
                UNKNOWN_COLOR.to_string()
            },
        }
    }

    /// Overwrite the editable fields with the content of a form
    pub fn merge(&mut self, form: &ContactForm) {
        self.data.name = form.name.trim().to_string();
        self.data.mail = form.mail.trim().to_string();
        self.data.phone = form.phone.trim().to_string();
    }
}

/// Uppercase initials of the first and the last word of a name (`"Anton Mayer"` gives `"AM"`)
pub fn initials(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let first_letter = |word: &&str| word.chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default();

    match words.as_slice() {
        [] => String::new(),
        [single] => first_letter(single),
        [first, .., last] => format!("{}{}", first_letter(first), first_letter(last)),
    }
}

/// Sort contacts by name, case-insensitively
pub fn sort_by_name(contacts: &mut [Contact]) {
    contacts.sort_by(|a, b| {
        a.name().to_lowercase().cmp(&b.name().to_lowercase())
            .then_with(|| a.id().cmp(b.id()))
    });
}


/// The content of the "add contact" (or "edit contact") form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub mail: String,
    pub phone: String,
}

impl ContactForm {
    pub fn new<S: ToString>(name: S, mail: S, phone: S) -> Self {
        Self { name: name.to_string(), mail: mail.to_string(), phone: phone.to_string() }
    }

    pub fn validate(&self) -> Result<(), InvalidForm<ContactFormError>> {
        validation::validate_contact_form(self)
    }
}

impl From<&Contact> for ContactForm {
    fn from(contact: &Contact) -> Self {
        Self::new(contact.name(), contact.mail(), contact.phone())
    }
}
