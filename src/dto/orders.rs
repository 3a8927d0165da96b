use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult, FieldError},
    models::Book,
};

/// Order creation form: a multi-select of book ids, kept as raw JSON so a
/// mistyped selection is reported against the `books` field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct OrderForm {
    #[schema(value_type = Option<Vec<i32>>)]
    pub books: Option<Value>,
}

impl OrderForm {
    /// Selected ids with duplicates collapsed. An absent selection is empty.
    pub fn selected(&self) -> AppResult<BTreeSet<i32>> {
        let items = match &self.books {
            None => return Ok(BTreeSet::new()),
            Some(Value::Array(items)) => items,
            Some(_) => return Err(AppError::Validation(vec![FieldError::invalid("books")])),
        };

        items
            .iter()
            .map(|item| {
                item.as_i64()
                    .and_then(|id| i32::try_from(id).ok())
                    .ok_or_else(|| AppError::Validation(vec![FieldError::invalid("books")]))
            })
            .collect()
    }
}

/// One selectable entry of the order form, labelled with the book's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BookChoice {
    pub value: i32,
    pub label: String,
}

impl From<&Book> for BookChoice {
    fn from(book: &Book) -> Self {
        Self {
            value: book.id,
            label: book.name.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderFormView {
    pub choices: Vec<BookChoice>,
    pub form: OrderForm,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderView {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub books: Vec<Book>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderList {
    #[schema(value_type = Vec<OrderView>)]
    pub items: Vec<OrderView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn rejected_field(form: &OrderForm) -> String {
        match form.selected() {
            Err(AppError::Validation(errors)) => errors[0].field.clone(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn selected_collapses_duplicates() {
        let form = OrderForm {
            books: Some(json!([3, 1, 3, 2, 1])),
        };
        let ids = form.selected().expect("valid selection");
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn missing_books_field_means_empty_selection() {
        let form: OrderForm = serde_json::from_str("{}").expect("decodes");
        assert!(form.selected().expect("valid selection").is_empty());
    }

    #[test]
    fn non_numeric_selection_is_not_valid() {
        let form: OrderForm = serde_json::from_str(r#"{"books":["x"]}"#).expect("decodes");
        assert_eq!(rejected_field(&form), "books");
    }

    #[test]
    fn scalar_or_out_of_range_selection_is_not_valid() {
        assert_eq!(rejected_field(&OrderForm { books: Some(json!(3)) }), "books");
        assert_eq!(
            rejected_field(&OrderForm {
                books: Some(json!([i64::from(i32::MAX) + 1]))
            }),
            "books"
        );
    }
}
