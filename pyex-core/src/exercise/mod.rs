//! Generated exercise schema and validation.

pub mod schema;
pub mod validator;

pub use schema::{SchemaError, parse_exercise};
pub use validator::{ValidatedExercise, parse_response};

use serde::{Deserialize, Serialize};
use serde_json::json;

/// A generated programming exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub topic: String,
    pub title: String,
    pub problem_statement: String,
    pub solution: String,
}

impl Exercise {
    /// Field names with the descriptions shown to the model
    pub const FIELDS: [(&'static str, &'static str); 4] = [
        ("topic", "The topic of the exercise"),
        ("title", "The title of the exercise"),
        ("problem_statement", "The question of the exercise"),
        ("solution", "The sample solution of the exercise"),
    ];

    /// Instructions appended to the prompt so the model answers with this shape
    pub fn format_instructions() -> String {
        let mut properties = serde_json::Map::new();
        for (name, description) in Self::FIELDS {
            properties.insert(
                name.to_string(),
                json!({ "title": title_case(name), "description": description, "type": "string" }),
            );
        }
        let required: Vec<&str> = Self::FIELDS.iter().map(|(name, _)| *name).collect();
        let schema = json!({ "properties": properties, "required": required });

        format!(
            "The output should be formatted as a JSON instance that conforms to the JSON schema below.\n\n\
As an example, for the schema {{\"properties\": {{\"foo\": {{\"title\": \"Foo\", \"description\": \"a list of strings\", \"type\": \"array\", \"items\": {{\"type\": \"string\"}}}}}}, \"required\": [\"foo\"]}}\n\
the object {{\"foo\": [\"bar\", \"baz\"]}} is a well-formatted instance of the schema. The object {{\"properties\": {{\"foo\": [\"bar\", \"baz\"]}}}} is not well-formatted.\n\n\
Here is the output schema:\n```\n{schema}\n```"
        )
    }
}

fn title_case(field: &str) -> String {
    field
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
