use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult, FieldError},
    models::Book,
};

pub const NAME_MAX_LEN: usize = 255;

const NOT_BLANK: &str = "This value should not be blank.";

/// Submitted (or pre-filled) book form. Fields are kept as raw JSON values so
/// that missing or mistyped input is reported per field instead of as a
/// decode failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookForm {
    #[schema(value_type = Option<String>)]
    pub name: Option<Value>,
    #[schema(value_type = Option<i64>)]
    pub price: Option<Value>,
}

/// A book form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidBook {
    pub name: String,
    pub price: i64,
}

impl BookForm {
    pub fn validate(self) -> AppResult<ValidBook> {
        let mut errors = Vec::new();

        let name = match self.name {
            None => {
                errors.push(FieldError::new("name", NOT_BLANK));
                None
            }
            Some(Value::String(raw)) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    errors.push(FieldError::new("name", NOT_BLANK));
                    None
                } else if trimmed.chars().count() > NAME_MAX_LEN {
                    errors.push(FieldError::new(
                        "name",
                        format!("This value is too long. It should have {NAME_MAX_LEN} characters or less."),
                    ));
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Some(_) => {
                errors.push(FieldError::invalid("name"));
                None
            }
        };

        // Integer minor units only; strings and fractional amounts are not valid.
        let price = match self.price.as_ref().map(Value::as_i64) {
            None => {
                errors.push(FieldError::new("price", NOT_BLANK));
                None
            }
            Some(None) => {
                errors.push(FieldError::invalid("price"));
                None
            }
            Some(Some(p)) if p < 0 => {
                errors.push(FieldError::new(
                    "price",
                    "This value should be either positive or zero.",
                ));
                None
            }
            Some(Some(p)) => Some(p),
        };

        match (name, price) {
            (Some(name), Some(price)) if errors.is_empty() => Ok(ValidBook { name, price }),
            _ => Err(AppError::Validation(errors)),
        }
    }
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            name: Some(Value::from(book.name.clone())),
            price: Some(Value::from(book.price)),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct BookList {
    #[schema(value_type = Vec<Book>)]
    pub items: Vec<Book>,
}
