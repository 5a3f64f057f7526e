//! OpenAPI documentation for operations returning [`Outcome`](outcome_core::Outcome).
//!
//! The success payload type `T` documents the success response: its schema
//! is generated with `schemars` and placed under the media type the web
//! adapter would negotiate for it. The unit outcome documents as `204 No
//! Content` with no body. Failures document as `application/problem+json`
//! responses referencing a shared `ProblemDetails` component.
//!
//! # Example
//!
//! ```
//! use outcome_openapi::OutcomeDocs;
//!
//! let docs = OutcomeDocs::for_outcome::<String>()
//!     .with_problem(404, "Order not found")
//!     .with_default_problems();
//!
//! let responses = docs.responses();
//! assert!(responses["200"]["content"]["text/plain"].is_object());
//! assert_eq!(
//!     responses["404"]["content"]["application/problem+json"]["schema"]["$ref"],
//!     "#/components/schemas/ProblemDetails"
//! );
//! ```

use outcome_core::status::reason_phrase;
use outcome_core::{ContentCategory, ProblemDetails, is_empty_payload};
use schemars::generate::SchemaSettings;
use schemars::JsonSchema;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

/// Media type of failure responses.
pub const PROBLEM_MEDIA_TYPE: &str = "application/problem+json";

/// Component name of the shared problem schema.
pub const PROBLEM_SCHEMA_NAME: &str = "ProblemDetails";

const PROBLEM_SCHEMA_REF: &str = "#/components/schemas/ProblemDetails";

/// Schema of the problem document, generated from [`ProblemDetails`].
#[must_use]
pub fn problem_details_schema() -> Value {
    problem_definitions()
        .remove(PROBLEM_SCHEMA_NAME)
        .unwrap_or_default()
}

/// Component definitions needed to reference [`ProblemDetails`].
fn problem_definitions() -> Map<String, Value> {
    let mut generator = SchemaSettings::openapi3().into_generator();
    let _ = generator.subschema_for::<ProblemDetails>();
    generator.definitions().clone()
}

/// Response documentation for one operation.
#[derive(Debug, Clone)]
pub struct OutcomeDocs {
    success_status: u16,
    success_content: Option<Value>,
    problems: BTreeMap<u16, String>,
    definitions: Map<String, Value>,
}

impl OutcomeDocs {
    /// Document an operation returning `Outcome<T>`.
    ///
    /// `Outcome<()>` documents as `204 No Content`.
    #[must_use]
    pub fn for_outcome<T: JsonSchema + 'static>() -> Self {
        if is_empty_payload::<T>() {
            return Self::for_unit();
        }

        let mut generator = SchemaSettings::openapi3().into_generator();
        let (media_type, schema) = match ContentCategory::of::<T>() {
            ContentCategory::PlainText => ("text/plain", json!({ "type": "string" })),
            ContentCategory::Binary => (
                "application/octet-stream",
                json!({ "type": "string", "format": "binary" }),
            ),
            ContentCategory::Xml => ("application/xml", json!({ "type": "string" })),
            ContentCategory::Json => (
                "application/json",
                generator.subschema_for::<T>().to_value(),
            ),
        };

        let mut content = Map::new();
        content.insert(media_type.to_string(), json!({ "schema": schema }));

        Self {
            success_status: 200,
            success_content: Some(Value::Object(content)),
            problems: BTreeMap::new(),
            definitions: generator.definitions().clone(),
        }
    }

    /// Document an operation returning the non-generic `Outcome`.
    #[must_use]
    pub fn for_unit() -> Self {
        Self {
            success_status: 204,
            success_content: None,
            problems: BTreeMap::new(),
            definitions: Map::new(),
        }
    }

    /// Use a different success status, such as `201`.
    #[must_use]
    pub const fn with_success_status(mut self, status: u16) -> Self {
        self.success_status = status;
        self
    }

    /// Document a failure status.
    #[must_use]
    pub fn with_problem(mut self, status: u16, description: impl Into<String>) -> Self {
        self.problems.insert(status, description.into());
        self
    }

    /// Document `400` and `500` unless already present.
    #[must_use]
    pub fn with_default_problems(mut self) -> Self {
        for status in [400, 500] {
            self.problems
                .entry(status)
                .or_insert_with(|| reason_phrase(status).unwrap_or("Error").to_string());
        }
        self
    }

    /// Success status code.
    #[must_use]
    pub const fn success_status(&self) -> u16 {
        self.success_status
    }

    /// The OpenAPI `responses` object.
    #[must_use]
    pub fn responses(&self) -> Value {
        let mut responses = Map::new();

        let mut success = Map::new();
        success.insert(
            "description".to_string(),
            Value::from(reason_phrase(self.success_status).unwrap_or("Success")),
        );
        if let Some(content) = &self.success_content {
            success.insert("content".to_string(), content.clone());
        }
        responses.insert(self.success_status.to_string(), Value::Object(success));

        for (status, description) in &self.problems {
            let mut content = Map::new();
            content.insert(
                PROBLEM_MEDIA_TYPE.to_string(),
                json!({ "schema": { "$ref": PROBLEM_SCHEMA_REF } }),
            );
            responses.insert(
                status.to_string(),
                json!({ "description": description, "content": content }),
            );
        }

        Value::Object(responses)
    }

    /// The OpenAPI `components` object holding every referenced schema.
    #[must_use]
    pub fn components(&self) -> Value {
        let mut schemas = self.definitions.clone();
        if !self.problems.is_empty() {
            schemas.extend(problem_definitions());
        }
        json!({ "schemas": schemas })
    }

    /// An OpenAPI operation object with these responses.
    #[must_use]
    pub fn operation(&self, operation_id: &str) -> Value {
        json!({
            "operationId": operation_id,
            "responses": self.responses(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outcome_core::{ByteStream, XmlDocument};

    #[test]
    fn test_unit_documents_no_content() {
        let responses = OutcomeDocs::for_outcome::<()>().responses();
        assert_eq!(responses["204"]["description"], "No Content");
        assert!(responses["204"].get("content").is_none());
    }

    #[test]
    fn test_binary_payload() {
        let responses = OutcomeDocs::for_outcome::<Vec<u8>>().responses();
        assert_eq!(
            responses["200"]["content"]["application/octet-stream"]["schema"]["format"],
            "binary"
        );
    }

    #[test]
    fn test_default_problems_do_not_override() {
        let docs = OutcomeDocs::for_unit()
            .with_problem(400, "Invalid order")
            .with_default_problems();
        let responses = docs.responses();
        assert_eq!(responses["400"]["description"], "Invalid order");
        assert_eq!(responses["500"]["description"], "Internal Server Error");
    }

    #[test]
    fn test_problem_component_only_when_referenced() {
        let bare = OutcomeDocs::for_unit().components();
        assert!(bare["schemas"].get(PROBLEM_SCHEMA_NAME).is_none());

        let with_problem = OutcomeDocs::for_unit().with_problem(409, "Conflict").components();
        let required = with_problem["schemas"][PROBLEM_SCHEMA_NAME]["required"]
            .as_array()
            .cloned()
            .unwrap_or_default();
        for member in ["type", "title", "status"] {
            assert!(required.contains(&json!(member)), "{member} should be required");
        }
        assert!(!required.contains(&json!("detail")));
    }

    #[test]
    fn test_problem_schema_follows_wire_shape() {
        let schema = problem_details_schema();
        let properties = &schema["properties"];
        for member in ["type", "title", "status", "detail", "instance", "errors"] {
            assert!(properties[member].is_object(), "missing {member}");
        }
        assert!(properties.get("type_uri").is_none());
        assert!(properties.get("extensions").is_none());
        assert_eq!(properties["status"]["type"], "integer");
        assert_eq!(properties["status"]["minimum"], 0);
    }

    #[test]
    fn test_success_status_override() {
        let responses = OutcomeDocs::for_outcome::<String>()
            .with_success_status(201)
            .responses();
        assert_eq!(responses["201"]["description"], "Created");
        assert!(responses.get("200").is_none());
    }

    #[test]
    fn test_operation() {
        let operation = OutcomeDocs::for_unit().operation("deleteOrder");
        assert_eq!(operation["operationId"], "deleteOrder");
        assert!(operation["responses"]["204"].is_object());
    }

    #[test]
    fn test_xml_payload() {
        let responses = OutcomeDocs::for_outcome::<XmlDocument>().responses();
        assert_eq!(
            responses["200"]["content"]["application/xml"]["schema"]["type"],
            "string"
        );
    }

    #[test]
    fn test_stream_payload() {
        let responses = OutcomeDocs::for_outcome::<ByteStream>().responses();
        assert!(responses["200"]["content"]["application/octet-stream"].is_object());
    }
}
