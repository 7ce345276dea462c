//! Interactive host form
//!
//! The form is an explicit table: each row is one prompt bound to exactly
//! one [`RawHostInput`] field through a typed accessor.

use crate::constants::{FORM_DEFAULT_PORT, FORM_DEFAULT_USERNAME};
use crate::models::RawHostInput;
use crate::utils::FormError;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Password};

/// Field accessor for one form row
#[derive(Clone, Copy)]
pub enum FieldBinding {
    /// Echoed free text
    Text(fn(&mut RawHostInput) -> &mut String),
    /// Hidden text
    Secret(fn(&mut RawHostInput) -> &mut String),
    /// Yes/no toggle
    Toggle(fn(&mut RawHostInput) -> &mut bool),
}

/// One prompt of the host form
#[derive(Clone, Copy)]
pub struct FormField {
    pub label: &'static str,
    pub binding: FieldBinding,
}

/// Rows of the host form, in prompt order
pub const HOST_FORM: &[FormField] = &[
    FormField {
        label: "Hostname: ",
        binding: FieldBinding::Text(|input| &mut input.hostname),
    },
    FormField {
        label: "Username: ",
        binding: FieldBinding::Text(|input| &mut input.username),
    },
    FormField {
        label: "Password: ",
        binding: FieldBinding::Secret(|input| &mut *input.password),
    },
    FormField {
        label: "Root Password: ",
        binding: FieldBinding::Secret(|input| &mut *input.root_password),
    },
    FormField {
        label: "Port: ",
        binding: FieldBinding::Text(|input| &mut input.port),
    },
    FormField {
        label: "Use Sudo",
        binding: FieldBinding::Toggle(|input| &mut input.use_sudo),
    },
];

/// Values shown when the form opens
pub fn initial_state() -> RawHostInput {
    RawHostInput::new("", FORM_DEFAULT_USERNAME, FORM_DEFAULT_PORT)
}

/// Source of answers for the form
pub trait FormPrompter {
    fn text(&mut self, label: &str, initial: &str) -> Result<String, FormError>;
    fn secret(&mut self, label: &str) -> Result<String, FormError>;
    fn toggle(&mut self, label: &str, initial: bool) -> Result<bool, FormError>;
}

/// Ask every row of [`HOST_FORM`] and store the answers in `input`
///
/// Text rows offer the current value as the initial text. Secret rows whose
/// field is already filled (e.g. from the environment) are not asked again.
pub fn fill(input: &mut RawHostInput, prompter: &mut dyn FormPrompter) -> Result<(), FormError> {
    for field in HOST_FORM {
        match field.binding {
            FieldBinding::Text(get) => {
                let slot = get(input);
                let answer = prompter.text(field.label.trim_end(), slot)?;
                *slot = answer;
            }
            FieldBinding::Secret(get) => {
                let slot = get(input);
                if slot.is_empty() {
                    *slot = prompter.secret(field.label.trim_end())?;
                }
            }
            FieldBinding::Toggle(get) => {
                let slot = get(input);
                let answer = prompter.toggle(field.label, *slot)?;
                *slot = answer;
            }
        }
    }
    Ok(())
}

/// Terminal prompts via dialoguer
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

fn prompt_error(label: &str, err: dialoguer::Error) -> FormError {
    FormError::Prompt {
        field: label.trim_end_matches(':').to_string(),
        reason: err.to_string(),
    }
}

impl FormPrompter for TerminalPrompter {
    fn text(&mut self, label: &str, initial: &str) -> Result<String, FormError> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(label.trim_end_matches(':'))
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| prompt_error(label, e))
    }

    fn secret(&mut self, label: &str) -> Result<String, FormError> {
        Password::with_theme(&self.theme)
            .with_prompt(label.trim_end_matches(':'))
            .allow_empty_password(true)
            .interact()
            .map_err(|e| prompt_error(label, e))
    }

    fn toggle(&mut self, label: &str, initial: bool) -> Result<bool, FormError> {
        Confirm::with_theme(&self.theme)
            .with_prompt(label)
            .default(initial)
            .interact()
            .map_err(|e| prompt_error(label, e))
    }
}
