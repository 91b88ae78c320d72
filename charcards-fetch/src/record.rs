use serde::{Deserialize, Serialize};

/// The minimal data needed to render one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub name: String,
    pub species: String,
    #[serde(rename = "image")]
    pub image_url: String,
}

impl CharacterRecord {
    pub fn new(
        name: impl Into<String>,
        species: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            species: species.into(),
            image_url: image_url.into(),
        }
    }
}

/// Envelope returned by the listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterPage {
    pub info: PageInfo,
    pub results: Vec<CharacterRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInfo {
    pub count: u64,
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
}
