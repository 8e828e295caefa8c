//! The address book: contacts stored under `users/`

use std::collections::BTreeMap;
use std::error::Error;

use serde_json::Value;

use crate::board;
use crate::contact::{self, Contact, ContactData, ContactForm};
use crate::key::{keyed_children, Key};
use crate::status::Status;
use crate::traits::DocumentStore;

/// The store path of the user list
pub const USERS_PATH: &str = "users";

/// The store path of a contact
pub fn contact_path(id: &Key) -> String {
    format!("{}/{}", USERS_PATH, id)
}

/// Fetch every user of the store, in no particular order.
///
/// Entries that cannot be read are skipped (and logged)
pub async fn fetch_contacts<S>(store: &S) -> Result<Vec<Contact>, Box<dyn Error>>
where
    S: DocumentStore + Sync,
{
    let users = store.get(USERS_PATH).await?;
    Ok(contacts_from_value(users))
}

pub(crate) fn contacts_from_value(users: Value) -> Vec<Contact> {
    keyed_children(users)
        .into_iter()
        .filter_map(|(id, document)| match Contact::from_document(id.clone(), document) {
            Ok(contact) => Some(contact),
            Err(err) => {
                log::warn!("Ignoring invalid contact {}: {}", id, err);
                None
            },
        })
        .collect()
}


/// What happened when a contact was deleted
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeleteReport {
    /// Whether the contact existed (and has been deleted)
    pub deleted: bool,
    /// The tasks the contact has been unassigned from
    pub updated_tasks: Vec<Key>,
    /// How many steps of the cleanup of the tasks failed
    pub n_errors: u32,
}

impl DeleteReport {
    /// Whether the contact is gone and no task references it any more (as far as we know)
    pub fn is_success(&self) -> bool {
        self.n_errors == 0
    }
}


/// The address book
pub struct AddressBook<S> {
    store: S,
}

impl<S> AddressBook<S>
where
    S: DocumentStore + Sync,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every contact, sorted by name
    pub async fn list(&self) -> Result<Vec<Contact>, Box<dyn Error>> {
        let mut contacts = fetch_contacts(&self.store).await?;
        contact::sort_by_name(&mut contacts);
        Ok(contacts)
    }

    /// Every contact, sorted by name and grouped by initial letter.
    ///
    /// Contacts whose name does not start with a letter are listed under `'#'`
    pub async fn grouped(&self) -> Result<BTreeMap<char, Vec<Contact>>, Box<dyn Error>> {
        let mut groups: BTreeMap<char, Vec<Contact>> = BTreeMap::new();
        for contact in self.list().await? {
            let letter = match contact.initial_letter() {
                Some(c) if c.is_alphabetic() => c,
                _ => '#',
            };
            groups.entry(letter).or_default().push(contact);
        }
        Ok(groups)
    }

    /// Returns a contact, or `None` if there is no such contact
    pub async fn get(&self, id: &Key) -> Result<Option<Contact>, Box<dyn Error>> {
        let document = self.store.get(&contact_path(id)).await?;
        if document.is_null() {
            return Ok(None);
        }
        Ok(Some(Contact::from_document(id.clone(), document)?))
    }

    /// Create a contact from the "add contact" form. It is given a random colour
    pub async fn add(&self, form: &ContactForm) -> Result<Key, Box<dyn Error>> {
        form.validate()?;

        let data = ContactData {
            name: form.name.trim().to_string(),
            mail: form.mail.trim().to_string(),
            phone: form.phone.trim().to_string(),
            color: contact::random_color(),
            password: crate::config::get(&crate::config::PLACEHOLDER_PASSWORD),
        };
        let key = self.store.post(USERS_PATH, &serde_json::to_value(&data)?).await?;
        log::info!("Added contact {} ({})", data.name, key);
        Ok(key)
    }

    /// Update the name, mail and phone of a contact (its colour and password are kept).
    ///
    /// Returns `false` if there is no such contact
    pub async fn edit(&self, id: &Key, form: &ContactForm) -> Result<bool, Box<dyn Error>> {
        form.validate()?;

        let mut contact = match self.get(id).await? {
            None => {
                log::warn!("Unable to edit contact {}: it does not exist", id);
                return Ok(false);
            },
            Some(contact) => contact,
        };
        contact.merge(form);
        self.store.put(&contact_path(id), &serde_json::to_value(contact.data())?).await?;
        log::info!("Edited contact {}", id);
        Ok(true)
    }

    /// Delete a contact, then unassign it from every task.
    ///
    /// The second step is best-effort: a task that cannot be updated is logged and counted in the returned report, and does not stop the cleanup of the others
    pub async fn delete(&self, id: &Key) -> Result<DeleteReport, Box<dyn Error>> {
        let mut report = DeleteReport::default();

        if self.store.get(&contact_path(id)).await?.is_null() {
            log::info!("Contact {} does not exist, nothing to delete", id);
            return Ok(report);
        }
        self.store.delete(&contact_path(id)).await?;
        report.deleted = true;
        log::info!("Deleted contact {}", id);

        let all_tasks = match self.store.get(board::TASKS_PATH).await {
            Ok(tasks) => tasks,
            Err(err) => {
                log::warn!("Unable to unassign contact {} from its tasks: {}", id, err);
                report.n_errors += 1;
                return Ok(report);
            },
        };

        for status in Status::ALL.iter() {
            let column = all_tasks.get(status.as_str()).cloned().unwrap_or(Value::Null);
            for mut task in board::tasks_from_value(*status, column) {
                if task.remove_contact(id) == false {
                    continue;
                }
                match self.store.put(&task.path(), &task.to_document()).await {
                    Ok(()) => {
                        log::debug!("Unassigned contact {} from task {}", id, task.path());
                        report.updated_tasks.push(task.id().clone());
                    },
                    Err(err) => {
                        log::warn!("Unable to unassign contact {} from task {}: {}", id, task.path(), err);
                        report.n_errors += 1;
                    },
                }
            }
        }

        Ok(report)
    }
}
