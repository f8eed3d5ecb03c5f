use serde::Serialize;
use unveil_protocol::{DomCommand, NodeId, classes};

/// The three contact-form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FormField {
    Name,
    Email,
    Message,
}

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldError {
    Empty,
    InvalidEmail,
}

/// Validation result for one submission attempt. Serializable so the wasm
/// bridge can hand it to the page as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValidationReport {
    pub name: Option<FieldError>,
    pub email: Option<FieldError>,
    pub message: Option<FieldError>,
}

impl ValidationReport {
    /// Every field passed; the submission may proceed (submission itself
    /// is a stub — there is no endpoint to post to).
    pub fn is_valid(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }
}

/// Validate a submission. Empty checks trim whitespace; the email check
/// runs on the raw value.
pub fn validate(name: &str, email: &str, message: &str) -> ValidationReport {
    ValidationReport {
        name: if name.trim().is_empty() {
            Some(FieldError::Empty)
        } else {
            None
        },
        email: if email.trim().is_empty() {
            Some(FieldError::Empty)
        } else if !is_valid_email(email) {
            Some(FieldError::InvalidEmail)
        } else {
            None
        },
        message: if message.trim().is_empty() {
            Some(FieldError::Empty)
        } else {
            None
        },
    }
}

/// Structural email check: one '@' splitting two non-empty halves, no
/// whitespace anywhere, and an interior dot in the domain half.
/// Deliverability is the mail server's problem.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // At least one dot that is neither the first nor the last domain char.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i < domain.len() - 1)
}

/// The nodes a field renders its error through: the input itself plus the
/// message element next to it.
#[derive(Debug, Clone, Copy)]
pub struct FieldNodes {
    pub input: NodeId,
    pub message: NodeId,
}

/// Node bindings for the whole form.
#[derive(Debug, Clone, Copy)]
pub struct FormNodes {
    pub name: FieldNodes,
    pub email: FieldNodes,
    pub message: FieldNodes,
}

fn error_text(field: FormField, error: FieldError) -> &'static str {
    match (field, error) {
        (FormField::Name, _) => "Please enter your name",
        (FormField::Email, FieldError::Empty) => "Please enter your email",
        (FormField::Email, FieldError::InvalidEmail) => "Please enter a valid email",
        (FormField::Message, _) => "Please enter a message",
    }
}

fn field_commands(
    field: FormField,
    nodes: FieldNodes,
    error: Option<FieldError>,
    commands: &mut Vec<DomCommand>,
) {
    match error {
        Some(error) => {
            commands.push(DomCommand::SetText {
                node: nodes.message,
                text: error_text(field, error).into(),
            });
            commands.push(DomCommand::Show {
                node: nodes.message,
            });
            commands.push(DomCommand::AddClass {
                node: nodes.input,
                class: classes::ERROR.into(),
            });
        }
        None => {
            commands.push(DomCommand::Hide {
                node: nodes.message,
            });
            commands.push(DomCommand::RemoveClass {
                node: nodes.input,
                class: classes::ERROR.into(),
            });
        }
    }
}

/// Render a validation report onto the form: failing fields show their
/// message and gain the error class, passing fields clear both.
pub fn report_commands(report: &ValidationReport, nodes: &FormNodes) -> Vec<DomCommand> {
    let mut commands = Vec::new();
    field_commands(FormField::Name, nodes.name, report.name, &mut commands);
    field_commands(FormField::Email, nodes.email, report.email, &mut commands);
    field_commands(
        FormField::Message,
        nodes.message,
        report.message,
        &mut commands,
    );
    commands
}
