use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, AppResult, FieldError};

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PriceQuery {
    /// Lower bound in minor units, exclusive. Defaults to 0.
    #[param(value_type = Option<i64>)]
    #[schema(value_type = Option<i64>)]
    pub price: Option<String>,
}

impl PriceQuery {
    /// Parsed here rather than by the extractor so a bad value is reported
    /// against the `price` field.
    pub fn threshold(&self) -> AppResult<i64> {
        match self.price.as_deref().map(str::trim) {
            None | Some("") => Ok(0),
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| AppError::Validation(vec![FieldError::invalid("price")])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(price: Option<&str>) -> PriceQuery {
        PriceQuery {
            price: price.map(String::from),
        }
    }

    #[test]
    fn absent_or_empty_price_defaults_to_zero() {
        assert_eq!(query(None).threshold().unwrap(), 0);
        assert_eq!(query(Some("")).threshold().unwrap(), 0);
    }

    #[test]
    fn integer_price_is_parsed() {
        assert_eq!(query(Some("-3")).threshold().unwrap(), -3);
        assert_eq!(query(Some("1200")).threshold().unwrap(), 1200);
    }

    #[test]
    fn fractional_or_text_price_is_a_field_error() {
        for raw in ["9.5", "abc"] {
            match query(Some(raw)).threshold() {
                Err(AppError::Validation(errors)) => {
                    assert_eq!(errors, vec![FieldError::invalid("price")])
                }
                other => panic!("expected validation error for {raw}, got {other:?}"),
            }
        }
    }
}
