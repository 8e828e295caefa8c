//! Validation of the forms (task, contact, sign-up) before anything is sent to the store

use std::fmt::{Debug, Display, Formatter};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::contact::ContactForm;
use crate::session::SignUpForm;
use crate::task::{TaskDraft, DATE_FORMAT};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap(/* this is a valid, constant regex */)
});

/// How many years ahead a due date can be typed
pub const MAX_YEARS_AHEAD: i32 = 5;

/// Whether this looks like an email address (`something@domain.tld`)
pub fn is_valid_email(mail: &str) -> bool {
    mail.is_empty() == false && EMAIL_REGEX.is_match(mail)
}


/// A form that cannot be submitted, and every reason why
#[derive(Clone, Debug, PartialEq)]
pub struct InvalidForm<E> {
    pub errors: Vec<E>,
}

impl<E> InvalidForm<E> {
    pub fn contains(&self, error: &E) -> bool
    where
        E: PartialEq,
    {
        self.errors.contains(error)
    }
}

impl<E: Display> Display for InvalidForm<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        write!(f, "Invalid form: {}", messages.join(" "))
    }
}

impl<E: Display + Debug> std::error::Error for InvalidForm<E> {}

fn check<E>(errors: Vec<E>) -> Result<(), InvalidForm<E>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(InvalidForm { errors })
    }
}


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskFormError {
    MissingTitle,
    TitleTooShort,
    MissingDueDate,
    InvalidDueDate,
    MissingCategory,
}

impl Display for TaskFormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskFormError::MissingTitle => write!(f, "This field is required."),
            TaskFormError::TitleTooShort => write!(f, "The title must be at least 3 characters long."),
            TaskFormError::MissingDueDate => write!(f, "This field is required."),
            TaskFormError::InvalidDueDate => write!(f, "Please enter a valid date (DD/MM/YYYY)."),
            TaskFormError::MissingCategory => write!(f, "Please select a task category."),
        }
    }
}

/// Validate the "add task" form. Every field is checked, so that all errors can be shown at once
pub fn validate_task_form(draft: &TaskDraft) -> Result<(), InvalidForm<TaskFormError>> {
    let mut errors = Vec::new();

    let title = draft.title.trim();
    if title.is_empty() {
        errors.push(TaskFormError::MissingTitle);
    } else if title.chars().count() < 3 {
        errors.push(TaskFormError::TitleTooShort);
    }

    let date = draft.date.trim();
    if date.is_empty() {
        errors.push(TaskFormError::MissingDueDate);
    } else if date.len() < 10 || NaiveDate::parse_from_str(date, DATE_FORMAT).is_err() {
        errors.push(TaskFormError::InvalidDueDate);
    }

    let has_category = match &draft.category {
        None => false,
        Some(category) => category.as_str().trim().is_empty() == false,
    };
    if has_category == false {
        errors.push(TaskFormError::MissingCategory);
    }

    check(errors)
}


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactFormError {
    MissingName,
    MissingMail,
    MissingPhone,
    InvalidMail,
}

impl Display for ContactFormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ContactFormError::MissingName
            | ContactFormError::MissingMail
            | ContactFormError::MissingPhone => write!(f, "This field is required"),
            ContactFormError::InvalidMail => write!(f, "Wrong Email Format"),
        }
    }
}

/// Validate the "add contact" and "edit contact" forms
pub fn validate_contact_form(form: &ContactForm) -> Result<(), InvalidForm<ContactFormError>> {
    let mut errors = Vec::new();

    if form.name.trim().is_empty() {
        errors.push(ContactFormError::MissingName);
    }
    let mail = form.mail.trim();
    if mail.is_empty() {
        errors.push(ContactFormError::MissingMail);
    } else if is_valid_email(mail) == false {
        errors.push(ContactFormError::InvalidMail);
    }
    if form.phone.trim().is_empty() {
        errors.push(ContactFormError::MissingPhone);
    }

    check(errors)
}


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignUpError {
    PrivacyPolicyNotAccepted,
    MissingName,
    InvalidMail,
    MailAlreadyUsed,
    MissingPassword,
    PasswordMismatch,
}

impl Display for SignUpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SignUpError::PrivacyPolicyNotAccepted => write!(f, "Please accept the Privacy Policy."),
            SignUpError::MissingName => write!(f, "Please insert a name. Please try again."),
            SignUpError::InvalidMail => write!(f, "Please enter a valid email address."),
            SignUpError::MailAlreadyUsed => write!(f, "Check your email and password. Please try again."),
            SignUpError::MissingPassword => write!(f, "Please insert a password."),
            SignUpError::PasswordMismatch => write!(f, "Your passwords don't match. Please try again."),
        }
    }
}

/// Validate the sign-up form against the mail addresses that are already registered.
///
/// This stops at the first problem, in the order the form is read (policy, name, mail, password)
pub fn validate_sign_up<S: AsRef<str>>(form: &SignUpForm, registered_mails: &[S]) -> Result<(), InvalidForm<SignUpError>> {
    let error = if form.accept_privacy_policy == false {
        Some(SignUpError::PrivacyPolicyNotAccepted)
    } else if form.name.trim().is_empty() {
        Some(SignUpError::MissingName)
    } else if is_valid_email(&form.mail) == false {
        Some(SignUpError::InvalidMail)
    } else if registered_mails.iter().any(|m| m.as_ref() == form.mail) {
        Some(SignUpError::MailAlreadyUsed)
    } else if form.password.is_empty() {
        Some(SignUpError::MissingPassword)
    } else if form.password != form.confirm_password {
        Some(SignUpError::PasswordMismatch)
    } else {
        None
    };

    check(error.into_iter().collect())
}


/// Normalise what is being typed in the due date field.
///
/// Only digits are kept, and they are split as `DD/MM/YYYY`.
/// Complete parts are clamped: the day to 01-31, the month to 01-12, and the year from `current_year` to `current_year + MAX_YEARS_AHEAD`.
pub fn format_date_input(raw: &str, current_year: i32) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).take(8).collect();

    let day = clamp_part(slice(&digits, 0, 2), 2, 1, 31);
    let month = clamp_part(slice(&digits, 2, 4), 2, 1, 12);
    let year = clamp_part(slice(&digits, 4, 8), 4, current_year, current_year + MAX_YEARS_AHEAD);

    let parts = [day, month, year];
    parts.join("/").trim_end_matches('/').to_string()
}

fn slice(digits: &str, from: usize, to: usize) -> &str {
    let to = to.min(digits.len());
    if from >= to {
        return "";
    }
    &digits[from..to]
}

fn clamp_part(part: &str, width: usize, min: i32, max: i32) -> String {
    if part.len() != width {
        return part.to_string();
    }
    let value: i32 = match part.parse() {
        Ok(v) => v,
        Err(_) => return part.to_string(),
    };
    format!("{:0width$}", value.max(min).min(max), width = width)
}
