use sea_query::Iden;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub mod DBTables {
    pub const CUSTOMERS: &str = "customers";
}

/// Column identifiers for the customers table
#[derive(Iden, Debug, Clone, Copy)]
pub enum Customers {
    Table,
    Id,
    Name,
    Age,
}

/// Customer record, shared by the wire format and the customers table.
///
/// Serialized field order is `id`, `name`, `age`. Decoding fails closed:
/// unknown fields are rejected and `name` / `age` are required. An absent
/// `id` decodes to the empty string, which asks the store to assign one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(deny_unknown_fields)]
pub struct Customer {
    #[serde(default)]
    #[validate(length(max = 64))]
    pub id: String,
    #[validate(length(max = 255))]
    pub name: String,
    #[validate(range(min = 0))]
    pub age: i64,
}

impl Customer {
    pub fn new(id: impl Into<String>, name: impl Into<String>, age: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age,
        }
    }

    /// True when the record carries a caller-supplied id
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_preserves_field_order() {
        let customer = Customer::new("1", "user01", 18);
        let json = serde_json::to_string(&customer).unwrap();
        assert_eq!(json, r#"{"id":"1","name":"user01","age":18}"#);

        let decoded: Customer = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, customer);
    }

    #[test]
    fn test_missing_id_defaults_to_empty() {
        let decoded: Customer = serde_json::from_str(r#"{"name":"user04","age":18}"#).unwrap();
        assert_eq!(decoded.id, "");
        assert!(!decoded.has_id());
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let err = serde_json::from_str::<Customer>(r#"{"id":"1","name":"user01"}"#).unwrap_err();
        assert!(err.to_string().contains("missing field `age`"));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err =
            serde_json::from_str::<Customer>(r#"{"id":"1","name":"a","age":1,"email":"x"}"#)
                .unwrap_err();
        assert!(err.to_string().contains("unknown field `email`"));
    }

    #[test]
    fn test_validation_rejects_negative_age() {
        let customer = Customer::new("1", "user01", -1);
        assert!(customer.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_long_name() {
        let customer = Customer::new("1", "x".repeat(256), 18);
        assert!(customer.validate().is_err());
    }

    #[test]
    fn test_validation_accepts_plain_record() {
        assert!(Customer::new("", "user01", 0).validate().is_ok());
    }

    #[test]
    fn test_table_iden_names() {
        assert_eq!(Customers::Table.to_string(), DBTables::CUSTOMERS);
        assert_eq!(Customers::Age.to_string(), "age");
    }
}
