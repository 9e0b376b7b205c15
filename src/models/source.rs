use serde::{Deserialize, Serialize};

/// A named origin of billed expense, e.g. one external image-generation API.
/// Sources are created by configuration, never by record entry; removing one
/// cascades into every record (see `AppData::remove_source`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSource {
    pub id: String,
    pub name: String,
    /// Chart color hint, e.g. "#0052d9".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CostSource {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn color_or_default(&self) -> &str {
        self.color.as_deref().unwrap_or("#6b7280")
    }
}
