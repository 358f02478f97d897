//! Placeholder model loader. Returns a dummy handle for any name.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelHandle {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

pub fn load_model(name: &str) -> ModelHandle {
    tracing::debug!(model = name, "loading placeholder model");
    ModelHandle {
        name: name.to_string(),
        kind: "dummy_model".to_string(),
    }
}
