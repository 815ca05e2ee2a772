use super::Exercise;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("completion is empty")]
    Empty,
    #[error("no JSON object found in completion")]
    NoJsonObject,
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
    #[error("expected a JSON object at the top level")]
    NotAnObject,
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{0}` must be a string")]
    WrongType(&'static str),
    #[error("field `{0}` must not be empty")]
    EmptyField(&'static str),
}

/// Strictly parse a completion into an [`Exercise`].
///
/// Prose or a markdown fence around the object is tolerated; the object itself
/// must carry all four fields as non-empty strings.
pub fn parse_exercise(raw: &str) -> Result<Exercise, SchemaError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SchemaError::Empty);
    }

    let candidate = extract_json_object(trimmed).ok_or(SchemaError::NoJsonObject)?;
    let value: Value =
        serde_json::from_str(candidate).map_err(|e| SchemaError::InvalidJson(e.to_string()))?;
    let object = value.as_object().ok_or(SchemaError::NotAnObject)?;

    let field = |name: &'static str| -> Result<String, SchemaError> {
        let value = object.get(name).ok_or(SchemaError::MissingField(name))?;
        let text = value.as_str().ok_or(SchemaError::WrongType(name))?;
        if text.trim().is_empty() {
            return Err(SchemaError::EmptyField(name));
        }
        Ok(text.to_string())
    };

    Ok(Exercise {
        topic: field("topic")?,
        title: field("title")?,
        problem_statement: field("problem_statement")?,
        solution: field("solution")?,
    })
}

/// Slice from the first `{` to the last `}`
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
