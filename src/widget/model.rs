use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One comment as served by the list endpoint. Fields missing or `null` in
/// the payload read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    #[serde(deserialize_with = "nullable_string")]
    pub username: String,
    #[serde(deserialize_with = "nullable_string")]
    pub content: String,
    /// Preformatted by the server; rendered verbatim.
    #[serde(deserialize_with = "nullable_string")]
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentListResponse {
    #[serde(default)]
    pub comments: Option<Vec<Comment>>,
}

impl CommentListResponse {
    pub fn comments(&self) -> &[Comment] {
        self.comments.as_deref().unwrap_or_default()
    }
}

/// Interpretation of an add-comment response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddCommentResult {
    /// `success` is truthy.
    Accepted,
    /// `error` is truthy and `success` is not.
    Rejected(String),
    /// Neither field is set; the page does nothing.
    Ignored,
}

impl AddCommentResult {
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        Ok(Self::from_value(&value))
    }

    pub fn from_value(value: &Value) -> Self {
        if value.get("success").is_some_and(is_truthy) {
            return Self::Accepted;
        }
        match error_message(value) {
            Some(message) => Self::Rejected(message),
            None => Self::Ignored,
        }
    }
}

/// Truthy `error` field of a JSON body, if the body parses.
pub(crate) fn error_message_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    error_message(&value)
}

fn error_message(value: &Value) -> Option<String> {
    let error = value.get("error").filter(|error| is_truthy(error))?;
    Some(match error {
        Value::String(message) => message.clone(),
        other => other.to_string(),
    })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn nullable_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
