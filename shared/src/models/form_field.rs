//! Diploma Form Field Model
//!
//! User-defined schema entries describing extra attributes a diploma record
//! may carry in its `customFields` map.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::util::lenient;
use crate::validation::{identifier, max_len, required_text};

const NAME_MAX: usize = 100;
const CODE_MAX: usize = 50;
const DESCRIPTION_MAX: usize = 500;

/// Data type of a custom field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldDataType {
    #[default]
    String,
    Number,
    Date,
}

impl FieldDataType {
    /// Whether a JSON value is acceptable for this type
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => match value {
                Value::Number(_) => true,
                Value::String(s) => s.trim().parse::<f64>().is_ok(),
                _ => false,
            },
            Self::Date => value
                .as_str()
                .and_then(crate::util::parse_calendar_date)
                .is_some(),
        }
    }
}

/// Diploma form field entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiplomaFormField {
    pub id: String,
    pub name: String,
    /// Key used in `DiplomaInfo::custom_fields`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub data_type: FieldDataType,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub required: bool,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "lenient::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DiplomaFormField {
    /// Map key for this field; falls back to the display name
    pub fn key(&self) -> &str {
        self.code.as_deref().unwrap_or(&self.name)
    }
}

/// Create form field payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiplomaFormFieldCreate {
    pub name: String,
    pub code: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub data_type: FieldDataType,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DiplomaFormFieldCreate {
    /// Validate and return a trimmed copy ready to send
    pub fn normalized(&self) -> Result<Self, ValidationError> {
        let name = required_text("Field name", Some(&self.name), NAME_MAX)?;
        let code = required_text("Field code", Some(&self.code), CODE_MAX)?;
        identifier("Field code", code)?;
        let description = crate::util::non_blank(self.description.as_deref());
        if let Some(description) = description {
            max_len("Description", description, DESCRIPTION_MAX)?;
        }
        Ok(Self {
            name: name.to_string(),
            code: code.to_string(),
            data_type: self.data_type,
            required: self.required,
            order: self.order,
            description: description.map(str::to_string),
        })
    }
}

/// Update form field payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiplomaFormFieldUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<FieldDataType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DiplomaFormFieldUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            required_text("Field name", Some(name), NAME_MAX)?;
        }
        if let Some(code) = &self.code {
            let code = required_text("Field code", Some(code), CODE_MAX)?;
            identifier("Field code", code)?;
        }
        if let Some(description) = &self.description {
            max_len("Description", description, DESCRIPTION_MAX)?;
        }
        Ok(())
    }
}

/// Check custom field values against the form field schema.
///
/// Required fields must be present and non-empty; present values must match
/// the declared type. Keys without a schema entry pass through.
pub fn validate_custom_fields(
    schema: &[DiplomaFormField],
    values: &Map<String, Value>,
) -> Result<(), ValidationError> {
    for field in schema {
        let key = field.key();
        let value = values.get(key).filter(|v| match v {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        });
        match value {
            None if field.required => {
                return Err(ValidationError::CustomField {
                    field: key.to_string(),
                    reason: "is required".to_string(),
                });
            }
            None => {}
            Some(value) if !field.data_type.accepts(value) => {
                return Err(ValidationError::CustomField {
                    field: key.to_string(),
                    reason: format!("expected a {:?} value", field.data_type),
                });
            }
            Some(_) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(code: &str, data_type: FieldDataType, required: bool) -> DiplomaFormField {
        DiplomaFormField {
            id: format!("f-{code}"),
            name: code.to_uppercase(),
            code: Some(code.to_string()),
            data_type,
            required,
            order: 0,
            description: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_data_type_wire_names() {
        assert_eq!(serde_json::to_string(&FieldDataType::Date).unwrap(), r#""Date""#);
        let parsed: FieldDataType = serde_json::from_str(r#""Number""#).unwrap();
        assert_eq!(parsed, FieldDataType::Number);
    }

    #[test]
    fn test_data_type_accepts() {
        assert!(FieldDataType::String.accepts(&json!("x")));
        assert!(!FieldDataType::String.accepts(&json!(1)));
        assert!(FieldDataType::Number.accepts(&json!(8.5)));
        assert!(FieldDataType::Number.accepts(&json!("8.5")));
        assert!(!FieldDataType::Number.accepts(&json!("eight")));
        assert!(FieldDataType::Date.accepts(&json!("2020-01-31")));
        assert!(!FieldDataType::Date.accepts(&json!("31-31-2020")));
    }

    #[test]
    fn test_create_rejects_bad_code() {
        let payload = DiplomaFormFieldCreate {
            name: "Major".into(),
            code: "major name".into(),
            data_type: FieldDataType::String,
            required: false,
            order: None,
            description: None,
        };
        assert!(matches!(
            payload.normalized(),
            Err(ValidationError::InvalidFormat { field: "Field code", .. })
        ));
    }

    #[test]
    fn test_create_drops_blank_description() {
        let payload = DiplomaFormFieldCreate {
            name: " Major ".into(),
            code: "major".into(),
            data_type: FieldDataType::String,
            required: true,
            order: Some(1),
            description: Some("  ".into()),
        };
        let normalized = payload.normalized().unwrap();
        assert_eq!(normalized.name, "Major");
        assert_eq!(normalized.description, None);
    }

    #[test]
    fn test_custom_fields_required_and_typed() {
        let schema = vec![
            field("gpa", FieldDataType::Number, true),
            field("graduated_on", FieldDataType::Date, false),
        ];

        let ok = json!({"gpa": 3.4, "graduated_on": "2024-06-30", "extra": true});
        assert!(validate_custom_fields(&schema, ok.as_object().unwrap()).is_ok());

        let missing = json!({"gpa": " "});
        assert_eq!(
            validate_custom_fields(&schema, missing.as_object().unwrap()),
            Err(ValidationError::CustomField {
                field: "gpa".into(),
                reason: "is required".into()
            })
        );

        let wrong = json!({"gpa": 3, "graduated_on": "soon"});
        assert!(validate_custom_fields(&schema, wrong.as_object().unwrap()).is_err());
    }
}
