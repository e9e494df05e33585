//! Application payload types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The JSON document POSTed to the application endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationPayload {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub job_title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_attempt: Option<bool>,

    /// Free-form object; anything but a JSON object is rejected when parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_information: Option<Map<String, Value>>,
}

impl ApplicationPayload {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        job_title: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            job_title: job_title.into(),
            final_attempt: None,
            extra_information: None,
        }
    }

    pub fn with_final_attempt(mut self, final_attempt: Option<bool>) -> Self {
        self.final_attempt = final_attempt;
        self
    }

    pub fn with_extra_information(mut self, extra: Map<String, Value>) -> Self {
        self.extra_information = Some(extra);
        self
    }
}

/// Shape of the default `extra_information` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub personal_attributes: Vec<String>,
    pub experience: Experience,
    pub why_hire_me: String,
    pub technical_skills: Vec<String>,
    pub education: String,
    pub location: String,
    pub availability: String,
}

impl CandidateProfile {
    /// Flatten into the JSON object carried by `extra_information`.
    pub fn into_extra_information(self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

/// Professional experience section of a `CandidateProfile`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub years_of_experience: u32,
    pub previous_roles: Vec<String>,
    pub key_projects: Vec<String>,
    #[serde(rename = "programming_languages")]
    pub languages: Vec<String>,
    pub frameworks: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_optional_fields_are_omitted() {
        let payload = ApplicationPayload::new("Jane Doe", "jane@example.com", "Engineer");
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({"name": "Jane Doe", "email": "jane@example.com", "job_title": "Engineer"})
        );
    }

    #[test]
    fn test_extra_information_must_be_object() {
        let err = serde_json::from_value::<ApplicationPayload>(json!({
            "name": "Jane", "email": "jane@example.com", "job_title": "Engineer",
            "extra_information": ["not", "an", "object"]
        }));
        assert!(err.is_err());
    }

    #[test]
    fn test_profile_uses_wire_field_names() {
        let profile = CandidateProfile {
            personal_attributes: vec!["Curious".into()],
            experience: Experience {
                years_of_experience: 2,
                previous_roles: vec![],
                key_projects: vec![],
                languages: vec!["Rust".into()],
                frameworks: vec![],
            },
            why_hire_me: String::new(),
            technical_skills: vec![],
            education: String::new(),
            location: String::new(),
            availability: String::new(),
        };
        let map = profile.into_extra_information();
        assert_eq!(map["experience"]["programming_languages"], json!(["Rust"]));
    }
}
