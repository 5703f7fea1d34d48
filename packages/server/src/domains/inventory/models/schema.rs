use serde_json::{Map, Value};

use super::inventory::Inventory;
use crate::common::{InventoryError, InventoryResult, ValidationErrors};

const KNOWN_FIELDS: [&str; 4] = ["id", "name", "quantity", "status"];

/// Validation rules for incoming inventory payloads.
///
/// `name`, `quantity` and `status` are required; `id` is optional and ignored.
/// Unknown fields are rejected.
#[derive(Debug, Clone, Default)]
pub struct InventorySchema {
    /// When set, `status` must be one of these (exact match)
    pub allowed_statuses: Option<Vec<String>>,
}

impl InventorySchema {
    pub fn with_allowed_statuses<I, S>(statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_statuses: Some(statuses.into_iter().map(Into::into).collect()),
        }
    }

    /// Validate a decoded JSON payload into an unsaved `Inventory`.
    ///
    /// All failing fields are reported together.
    pub fn validate(&self, data: &Value) -> InventoryResult<Inventory> {
        let object = data.as_object().ok_or_else(|| {
            InventoryError::validation("body", "must be a JSON object")
        })?;

        let mut errors = ValidationErrors::default();

        if let Some(id) = object.get("id") {
            if id.as_i64().is_none() {
                errors.push("id", type_message(id, "integer"));
            }
        }

        let name = required_string(object, "name", &mut errors);
        let quantity = required_integer(object, "quantity", &mut errors);
        let status = required_string(object, "status", &mut errors);

        if let (Some(status), Some(allowed)) = (&status, &self.allowed_statuses) {
            if !allowed.iter().any(|s| s == status) {
                errors.push("status", format!("unallowed value {}", status));
            }
        }

        for key in object.keys() {
            if !KNOWN_FIELDS.contains(&key.as_str()) {
                errors.push(key.clone(), "unknown field");
            }
        }

        match (name, quantity, status) {
            (Some(name), Some(quantity), Some(status)) if errors.is_empty() => {
                Ok(Inventory::new(name, quantity, status))
            }
            _ => Err(InventoryError::Validation(errors)),
        }
    }
}

fn required_string(
    object: &Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match object.get(field) {
        None => {
            errors.push(field, "required field");
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            errors.push(field, type_message(other, "string"));
            None
        }
    }
}

fn required_integer(
    object: &Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<i64> {
    match object.get(field) {
        None => {
            errors.push(field, "required field");
            None
        }
        Some(value) => match value.as_i64() {
            Some(n) => Some(n),
            None if is_integral_beyond_i64(value) => {
                errors.push(field, "integer out of range");
                None
            }
            None => {
                errors.push(field, type_message(value, "integer"));
                None
            }
        },
    }
}

/// Whole numbers serde_json could not hold as `i64`: large positives arrive
/// as `u64`, large negatives as `f64`
fn is_integral_beyond_i64(value: &Value) -> bool {
    if value.is_u64() {
        return true;
    }
    value
        .as_f64()
        .map(|n| n.fract() == 0.0 && n.abs() >= i64::MAX as f64)
        .unwrap_or(false)
}

fn type_message(value: &Value, expected: &str) -> String {
    if value.is_null() {
        "null value not allowed".to_string()
    } else {
        format!("must be of {} type", expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validation_errors(result: InventoryResult<Inventory>) -> ValidationErrors {
        match result {
            Err(InventoryError::Validation(errors)) => errors,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn valid_payload_produces_unsaved_inventory() {
        let schema = InventorySchema::default();
        let inventory = schema
            .validate(&json!({"name": "shampoo", "quantity": 2, "status": "new"}))
            .unwrap();

        assert_eq!(inventory.id, 0);
        assert_eq!(inventory.name, "shampoo");
        assert_eq!(inventory.quantity, 2);
        assert_eq!(inventory.status, "new");
    }

    #[test]
    fn input_id_is_ignored() {
        let schema = InventorySchema::default();
        let inventory = schema
            .validate(&json!({"id": 42, "name": "shampoo", "quantity": 2, "status": "new"}))
            .unwrap();

        assert_eq!(inventory.id, 0);
    }

    #[test]
    fn negative_quantity_is_accepted() {
        let schema = InventorySchema::default();
        let inventory = schema
            .validate(&json!({"name": "shampoo", "quantity": -3, "status": "new"}))
            .unwrap();

        assert_eq!(inventory.quantity, -3);
    }

    #[test]
    fn missing_name_is_named() {
        let schema = InventorySchema::default();
        let errors = validation_errors(schema.validate(&json!({"quantity": 2, "status": "new"})));

        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["name"]);
        assert_eq!(errors.to_string(), "name: required field");
    }

    #[test]
    fn every_failing_field_is_reported() {
        let schema = InventorySchema::default();
        let errors = validation_errors(schema.validate(&json!({"quantity": "two"})));

        assert!(errors.has_field("name"));
        assert!(errors.has_field("quantity"));
        assert!(errors.has_field("status"));
    }

    #[test]
    fn float_and_bool_quantities_are_rejected() {
        let schema = InventorySchema::default();

        let errors = validation_errors(
            schema.validate(&json!({"name": "a", "quantity": 2.5, "status": "new"})),
        );
        assert_eq!(errors.to_string(), "quantity: must be of integer type");

        let errors = validation_errors(
            schema.validate(&json!({"name": "a", "quantity": true, "status": "new"})),
        );
        assert!(errors.has_field("quantity"));
    }

    #[test]
    fn null_values_are_rejected() {
        let schema = InventorySchema::default();
        let errors = validation_errors(
            schema.validate(&json!({"name": null, "quantity": 1, "status": "new"})),
        );
        assert_eq!(errors.to_string(), "name: null value not allowed");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let schema = InventorySchema::default();
        let errors = validation_errors(schema.validate(
            &json!({"name": "a", "quantity": 1, "status": "new", "color": "red"}),
        ));
        assert_eq!(errors.to_string(), "color: unknown field");
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let schema = InventorySchema::default();
        let errors = validation_errors(schema.validate(&json!("this is not an inventory")));
        assert!(errors.has_field("body"));
    }

    #[test]
    fn allowed_statuses_are_enforced_when_configured() {
        let schema = InventorySchema::with_allowed_statuses(["new", "openBox", "used"]);

        assert!(schema
            .validate(&json!({"name": "a", "quantity": 1, "status": "openBox"}))
            .is_ok());

        let errors = validation_errors(
            schema.validate(&json!({"name": "a", "quantity": 1, "status": "broken"})),
        );
        assert_eq!(errors.to_string(), "status: unallowed value broken");
    }

    #[test]
    fn integer_beyond_i64_is_out_of_range() {
        let schema = InventorySchema::default();

        let payload: Value = serde_json::from_str(
            r#"{"name": "a", "quantity": 18446744073709551615, "status": "new"}"#,
        )
        .unwrap();
        let errors = validation_errors(schema.validate(&payload));
        assert_eq!(errors.to_string(), "quantity: integer out of range");

        let payload: Value = serde_json::from_str(
            r#"{"name": "a", "quantity": -9223372036854775809, "status": "new"}"#,
        )
        .unwrap();
        let errors = validation_errors(schema.validate(&payload));
        assert_eq!(errors.to_string(), "quantity: integer out of range");
    }

    #[test]
    fn i64_bounds_are_accepted() {
        let schema = InventorySchema::default();
        for quantity in [i64::MAX, i64::MIN] {
            let inventory = schema
                .validate(&json!({"name": "a", "quantity": quantity, "status": "new"}))
                .unwrap();
            assert_eq!(inventory.quantity, quantity);
        }
    }
}
