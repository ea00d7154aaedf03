//! Declarative form binding.
//!
//! A form is a static table of [`FieldDescriptor`]s. [`bind`] walks that table
//! against the raw URL-encoded submission, coerces and validates each field,
//! and writes accepted values into a [`FormTarget`]. Fields are independent:
//! a valid field is written even when another one fails, so the caller must
//! only persist the target when [`BoundForm::is_valid`] holds.

use std::collections::HashMap;

use validator::ValidateEmail;

use crate::models::{Role, UserDraft};

pub const NOT_BLANK: &str = "This value should not be blank.";
pub const INVALID_EMAIL: &str = "This value is not a valid email address.";
pub const SELECT_ROLE: &str = "Please select a role.";
pub const INVALID_CHOICE: &str = "The selected choice is invalid.";
pub const INVALID_VALUE: &str = "This value is not valid.";
pub const ALREADY_USED: &str = "This value is already used.";

/// `(label, stored value)` pairs offered by the role selector.
pub const ROLE_CHOICES: &[(&str, &str)] =
    &[("Administrador", "ROLE_ADMIN"), ("Usuario", "ROLE_USER")];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    /// Trimmed free text
    Text,
    /// Trimmed text that must be a syntactically valid address
    Email,
    /// Untrimmed text, never echoed back
    Password,
    /// One of the `(label, value)` options
    Choice(&'static [(&'static str, &'static str)]),
    /// Boolean; an absent key means unchecked
    Checkbox,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// Key in the submitted form
    pub name: &'static str,
    pub label: &'static str,
    pub kind: WidgetKind,
    pub required: bool,
    /// Maximum length in characters
    pub max_length: Option<usize>,
    /// Empty option shown first in a choice list
    pub placeholder: Option<&'static str>,
}

impl FieldDescriptor {
    const fn new(name: &'static str, label: &'static str, kind: WidgetKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            max_length: None,
            placeholder: None,
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    const fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }
}

/// The user creation form, in display order.
///
/// Length limits mirror the `users` table columns.
pub static USER_FORM: &[FieldDescriptor] = &[
    FieldDescriptor::new("username", "Username", WidgetKind::Text)
        .required()
        .max_length(25),
    FieldDescriptor::new("firstName", "First name", WidgetKind::Text).max_length(100),
    FieldDescriptor::new("lastName", "Last name", WidgetKind::Text).max_length(100),
    FieldDescriptor::new("email", "Email", WidgetKind::Email)
        .required()
        .max_length(255),
    FieldDescriptor::new("password", "Password", WidgetKind::Password)
        .required()
        .max_length(4096),
    FieldDescriptor::new("role", "Role", WidgetKind::Choice(ROLE_CHOICES))
        .required()
        .placeholder("Selecciona un rol"),
    FieldDescriptor::new("isActive", "Active", WidgetKind::Checkbox),
];

/// A coerced field value handed to the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Empty for an optional field left blank
    Text(String),
    Bool(bool),
    /// Stored value of the selected option
    Choice(&'static str),
}

/// Something a form can bind into.
pub trait FormTarget {
    /// Store `value` under the descriptor `field`.
    ///
    /// Returning an error message turns it into a field error.
    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Outcome of a bind: field errors plus what to show when re-rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundForm {
    errors: Vec<FieldError>,
    values: HashMap<String, String>,
}

impl BoundForm {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Field errors in descriptor order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// First error reported for `field`.
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Value to pre-fill `field` with. Always empty for passwords.
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    /// Record an error found after binding, such as a taken username.
    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }
}

/// Bind `input` into `target` following `descriptors`.
///
/// Keys of `input` that match no descriptor are ignored.
pub fn bind<T: FormTarget>(
    descriptors: &[FieldDescriptor],
    input: &HashMap<String, String>,
    target: &mut T,
) -> BoundForm {
    let mut form = BoundForm::default();

    for descriptor in descriptors {
        let raw = input.get(descriptor.name).map(String::as_str);

        let result = coerce(descriptor, raw).and_then(|value| {
            if let Some(echo) = echo_value(descriptor, &value) {
                form.values.insert(descriptor.name.to_string(), echo);
            }
            target.set_field(descriptor.name, value)
        });

        if let Err(message) = result {
            if descriptor.kind != WidgetKind::Password {
                if let Some(raw) = raw {
                    form.values
                        .insert(descriptor.name.to_string(), raw.trim().to_string());
                }
            }
            form.add_error(descriptor.name, &message);
        }
    }

    if !form.is_valid() {
        tracing::debug!(errors = form.errors.len(), "Form submission rejected");
    }

    form
}

fn coerce(descriptor: &FieldDescriptor, raw: Option<&str>) -> Result<FieldValue, String> {
    match descriptor.kind {
        WidgetKind::Text => coerce_text(descriptor, raw.unwrap_or("").trim()),
        WidgetKind::Email => {
            let value = coerce_text(descriptor, raw.unwrap_or("").trim())?;
            match &value {
                FieldValue::Text(email) if !email.is_empty() && !email.validate_email() => {
                    Err(INVALID_EMAIL.to_string())
                }
                _ => Ok(value),
            }
        }
        WidgetKind::Password => coerce_text(descriptor, raw.unwrap_or("")),
        WidgetKind::Choice(options) => {
            let submitted = raw.unwrap_or("").trim();
            if submitted.is_empty() {
                return if descriptor.required {
                    Err(SELECT_ROLE.to_string())
                } else {
                    Ok(FieldValue::Text(String::new()))
                };
            }

            options
                .iter()
                .find(|(label, value)| *label == submitted || *value == submitted)
                .map(|(_, value)| FieldValue::Choice(value))
                .ok_or_else(|| INVALID_CHOICE.to_string())
        }
        WidgetKind::Checkbox => match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            None | Some("" | "0" | "off" | "false" | "no") => Ok(FieldValue::Bool(false)),
            Some("1" | "on" | "true" | "yes") => Ok(FieldValue::Bool(true)),
            Some(_) => Err(INVALID_VALUE.to_string()),
        },
    }
}

fn coerce_text(descriptor: &FieldDescriptor, value: &str) -> Result<FieldValue, String> {
    if value.is_empty() && descriptor.required {
        return Err(NOT_BLANK.to_string());
    }

    if let Some(max) = descriptor.max_length {
        if value.chars().count() > max {
            return Err(format!(
                "This value is too long. It should have {} characters or less.",
                max
            ));
        }
    }

    Ok(FieldValue::Text(value.to_string()))
}

/// What to pre-fill when re-rendering an accepted field.
fn echo_value(descriptor: &FieldDescriptor, value: &FieldValue) -> Option<String> {
    match (descriptor.kind, value) {
        (WidgetKind::Password, _) => None,
        (_, FieldValue::Text(text)) => Some(text.clone()),
        (_, FieldValue::Choice(stored)) => Some(stored.to_string()),
        (_, FieldValue::Bool(checked)) => checked.then(|| "1".to_string()),
    }
}

impl FormTarget for UserDraft {
    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), String> {
        match (field, value) {
            ("username", FieldValue::Text(v)) => self.username = v,
            ("firstName", FieldValue::Text(v)) => self.first_name = non_empty(v),
            ("lastName", FieldValue::Text(v)) => self.last_name = non_empty(v),
            ("email", FieldValue::Text(v)) => self.email = v,
            ("password", FieldValue::Text(v)) => self.password = v,
            ("role", FieldValue::Choice(v)) => {
                self.role = Some(v.parse::<Role>().map_err(|_| INVALID_CHOICE.to_string())?)
            }
            ("isActive", FieldValue::Bool(v)) => self.is_active = v,
            (field, value) => {
                return Err(format!("Unsupported value {:?} for field '{}'", value, field));
            }
        }
        Ok(())
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}
