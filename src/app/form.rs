//! State of the create/edit user form.

use crate::model::{User, UserId};
use crate::validation::{FieldErrors, UserForm};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    City,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Name, FormField::Email, FormField::City];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name *",
            FormField::Email => "Email *",
            FormField::City => "City",
        }
    }

    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Email,
            FormField::Email => FormField::City,
            FormField::City => FormField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Name => FormField::City,
            FormField::Email => FormField::Name,
            FormField::City => FormField::Email,
        }
    }

    pub fn is_last(self) -> bool {
        self == FormField::City
    }
}

/// An open form. `target` is the record being edited; `None` means a new user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormState {
    pub target: Option<UserId>,
    pub values: UserForm,
    pub focus: FormField,
    pub errors: FieldErrors,
}

impl FormState {
    /// Blank form for a new user.
    pub fn blank() -> Self {
        Self {
            target: None,
            values: UserForm::default(),
            focus: FormField::Name,
            errors: FieldErrors::default(),
        }
    }

    /// Form pre-filled from an existing record.
    pub fn editing(user: &User) -> Self {
        Self {
            target: Some(user.id.clone()),
            values: UserForm::new(user.name.clone(), user.email.clone(), user.city.clone()),
            focus: FormField::Name,
            errors: FieldErrors::default(),
        }
    }

    pub fn title(&self) -> &'static str {
        if self.target.is_some() { "Edit user" } else { "New user" }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.values.name,
            FormField::Email => &self.values.email,
            FormField::City => &self.values.city,
        }
    }

    fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.values.name,
            FormField::Email => &mut self.values.email,
            FormField::City => &mut self.values.city,
        }
    }

    pub fn error(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Name => self.errors.name.as_deref(),
            FormField::Email => self.errors.email.as_deref(),
            FormField::City => None,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.value_mut(self.focus).push(c);
    }

    pub fn pop_char(&mut self) {
        self.value_mut(self.focus).pop();
    }
}
