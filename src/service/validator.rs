use serde_json::{Map, Value};
use thiserror::Error;

use crate::data::features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};

/// Why a `/predict` body could not be turned into a [`FeatureVector`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("request body is not a JSON object")]
    NotAnObject,

    #[error("missing fields: {0:?}")]
    MissingFields(Vec<&'static str>),

    #[error("field '{field}' is not a number: {detail}")]
    InvalidValue { field: &'static str, detail: String },
}

/// Check that every required field is present, then coerce each one to `f64`.
///
/// Extra keys are ignored. Values are not range checked.
pub fn validate_request(body: &Value) -> Result<FeatureVector, ValidationError> {
    let object = body.as_object().ok_or(ValidationError::NotAnObject)?;

    let missing: Vec<&'static str> = FEATURE_NAMES
        .iter()
        .copied()
        .filter(|name| !object.contains_key(*name))
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    let mut values = [0.0; FEATURE_COUNT];
    for (slot, field) in values.iter_mut().zip(FEATURE_NAMES) {
        *slot = coerce(object, field)?;
    }
    Ok(FeatureVector::from_array(values))
}

fn coerce(object: &Map<String, Value>, field: &'static str) -> Result<f64, ValidationError> {
    let invalid = |detail: String| ValidationError::InvalidValue { field, detail };
    match object.get(field) {
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| invalid(format!("{} is not representable as f64", n))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| invalid(format!("could not convert {:?}: {}", s, e))),
        Some(Value::Bool(b)) => Ok(if *b { 1.0 } else { 0.0 }),
        Some(other) => Err(invalid(format!("unsupported JSON value {}", other))),
        None => Err(invalid("absent".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn example() -> Value {
        json!({"N": 90, "P": 42, "K": 43, "temperature": 20.8, "humidity": 82, "ph": 6.5, "rainfall": 202.9})
    }

    #[test]
    fn accepts_complete_numeric_body() {
        let features = validate_request(&example()).unwrap();
        assert_eq!(features.to_array(), [90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9]);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let mut body = example();
        body["soil"] = json!("loam");
        assert!(validate_request(&body).is_ok());
    }

    #[test]
    fn reports_every_missing_field() {
        let body = json!({"N": 1, "temperature": 20});
        assert_eq!(
            validate_request(&body),
            Err(ValidationError::MissingFields(vec!["P", "K", "humidity", "ph", "rainfall"]))
        );
    }

    #[test]
    fn coerces_numeric_strings_and_booleans() {
        let mut body = example();
        body["N"] = json!(" 12.5 ");
        body["ph"] = json!(true);
        let features = validate_request(&body).unwrap();
        assert_eq!(features.nitrogen, 12.5);
        assert_eq!(features.ph, 1.0);
    }

    #[test]
    fn rejects_non_numeric_values() {
        for bad in [json!("abc"), json!(null), json!([1]), json!({"v": 1})] {
            let mut body = example();
            body["humidity"] = bad;
            match validate_request(&body) {
                Err(ValidationError::InvalidValue { field, .. }) => assert_eq!(field, "humidity"),
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn out_of_domain_values_pass_through() {
        let mut body = example();
        body["rainfall"] = json!(-50);
        body["ph"] = json!(15);
        let features = validate_request(&body).unwrap();
        assert_eq!(features.rainfall, -50.0);
        assert_eq!(features.ph, 15.0);
    }

    #[test]
    fn arrays_are_not_objects() {
        assert_eq!(validate_request(&json!([1, 2])), Err(ValidationError::NotAnObject));
    }
}
