//! Values of the judging form and their validation rules.

use serde::Serialize;
use validator::{Validate, ValidationErrors};

use crate::state::gag::{GagKind, RatingValue};

/// Message shown under every missing answer.
pub const REQUIRED_MESSAGE: &str = "This is a required question";

/// Everything the judge fills in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Validate)]
pub struct FormValues {
    /// Judge name.
    #[validate(length(min = 1, message = "This is a required question"))]
    pub name: String,
    /// Boldness rating.
    #[validate(required(message = "This is a required question"))]
    pub boldness: Option<RatingValue>,
    /// Execution rating.
    #[validate(required(message = "This is a required question"))]
    pub execution: Option<RatingValue>,
    /// Humor rating.
    #[validate(required(message = "This is a required question"))]
    pub humor: Option<RatingValue>,
    /// Creativity rating.
    #[validate(required(message = "This is a required question"))]
    pub creativity: Option<RatingValue>,
    /// Presentation rating.
    #[validate(required(message = "This is a required question"))]
    pub presentation: Option<RatingValue>,
    /// Free-text comment, optional.
    pub comment: String,
}

impl FormValues {
    /// Current answer of a rating question.
    pub fn rating(&self, gag: GagKind) -> Option<RatingValue> {
        match gag {
            GagKind::Boldness => self.boldness,
            GagKind::Execution => self.execution,
            GagKind::Humor => self.humor,
            GagKind::Creativity => self.creativity,
            GagKind::Presentation => self.presentation,
        }
    }

    fn rating_mut(&mut self, gag: GagKind) -> &mut Option<RatingValue> {
        match gag {
            GagKind::Boldness => &mut self.boldness,
            GagKind::Execution => &mut self.execution,
            GagKind::Humor => &mut self.humor,
            GagKind::Creativity => &mut self.creativity,
            GagKind::Presentation => &mut self.presentation,
        }
    }
}

/// Field of the form a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    /// The judge name input.
    Name,
    /// One of the rating questions.
    Rating(GagKind),
}

impl FormField {
    /// Fields in display order.
    pub fn in_order() -> impl Iterator<Item = FormField> {
        std::iter::once(FormField::Name).chain(GagKind::ALL.into_iter().map(FormField::Rating))
    }

    /// Field name as used by the validation rules.
    pub fn name(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Rating(gag) => gag.field_name(),
        }
    }
}

/// One message to display under a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Offending field.
    pub field: FormField,
    /// User-facing message.
    pub message: String,
}

/// The form as owned by a session. Ratings only change through [`FormState::commit`].
#[derive(Debug, Clone, Default)]
pub struct FormState {
    values: FormValues,
}

impl FormState {
    /// Empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current values.
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Store a rating the same way the rendered radio control would.
    pub fn commit(&mut self, gag: GagKind, value: RatingValue) {
        *self.values.rating_mut(gag) = Some(value);
    }

    /// Replace the judge name.
    pub fn set_name(&mut self, name: String) {
        self.values.name = name;
    }

    /// Replace the comment.
    pub fn set_comment(&mut self, comment: String) {
        self.values.comment = comment;
    }

    /// Back to the empty form.
    pub fn reset(&mut self) {
        self.values = FormValues::default();
    }

    /// Check required answers, returning one message per missing field in display order.
    pub fn validate(&self) -> Result<FormValues, Vec<FieldError>> {
        match self.values.validate() {
            Ok(()) => Ok(self.values.clone()),
            Err(errors) => Err(field_errors(&errors)),
        }
    }
}

fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let by_field = errors.field_errors();
    FormField::in_order()
        .filter_map(|field| {
            let (_, messages) = by_field.iter().find(|(key, _)| {
                let key: &str = key;
                key == field.name()
            })?;
            let message = messages
                .iter()
                .find_map(|error| error.message.as_ref().map(|message| message.to_string()))
                .unwrap_or_else(|| REQUIRED_MESSAGE.to_string());
            Some(FieldError { field, message })
        })
        .collect()
}
