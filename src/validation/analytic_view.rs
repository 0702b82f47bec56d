use serde::{Deserialize, Deserializer};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

const NAME_MAX_CHARS: usize = 255;

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(Default::default())
}

/// Names are stored trimmed, so the bounds apply to the trimmed value.
fn validate_view_name(name: &str) -> Result<(), ValidationError> {
    let len = name.trim().chars().count();
    if (1..=NAME_MAX_CHARS).contains(&len) {
        return Ok(());
    }
    let mut error = ValidationError::new("length");
    error.message = Some(Cow::from("Name must be 1-255 characters"));
    Err(error)
}

/// Keeps an explicit `null` apart from an absent field.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Body of a saved view creation. Workspace and author come from the
/// request context, never from the body.
#[derive(Deserialize, Validate, Debug)]
pub struct CreateAnalyticViewRequest {
    #[validate(custom(function = "validate_view_name"))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "empty_object")]
    pub query_dict: serde_json::Value,
}

#[derive(Deserialize, Validate, Debug, Default)]
pub struct UpdateAnalyticViewRequest {
    #[validate(custom(function = "validate_view_name"))]
    pub name: Option<String>,
    /// Absent leaves the description alone, `null` clears it.
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub query_dict: Option<serde_json::Value>,
}
