use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Display category derived from an entry's capability tags.
///
/// `All` is a browse filter that matches every entry; it is never assigned to
/// a model.
pub enum ModelCategory {
    All,
    Image,
    Video,
    Audio,
    Coding,
    Embedding,
}

/// Category keyword table, evaluated top to bottom. The first category with a
/// keyword contained in any capability tag wins.
pub const CATEGORY_KEYWORDS: &[(ModelCategory, &[&str])] = &[
    (ModelCategory::Image, &["image-generation", "vision"]),
    (
        ModelCategory::Video,
        &["video-generation", "text-to-video", "image-to-video"],
    ),
    (
        ModelCategory::Audio,
        &[
            "audio",
            "speech",
            "transcription",
            "translation",
            "audio-generation",
            "text-to-speech",
        ],
    ),
    (ModelCategory::Coding, &["code", "text-generation"]),
    (ModelCategory::Embedding, &["embedding", "semantic-search"]),
];

impl ModelCategory {
    /// Categories a model can carry, in table priority order.
    pub const ASSIGNABLE: [ModelCategory; 5] = [
        ModelCategory::Image,
        ModelCategory::Video,
        ModelCategory::Audio,
        ModelCategory::Coding,
        ModelCategory::Embedding,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Image => "Image",
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::Coding => "Coding",
            Self::Embedding => "Embedding",
        }
    }

    /// Browse-filter test: `All` matches everything, including uncategorized
    /// entries; any other category matches only itself.
    pub fn matches(self, category: Option<ModelCategory>) -> bool {
        self == Self::All || category == Some(self)
    }
}

impl fmt::Display for ModelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelCategory {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            "audio" => Ok(Self::Audio),
            "coding" => Ok(Self::Coding),
            "embedding" => Ok(Self::Embedding),
            _ => Err(format!(
                "unknown category '{raw}' (expected one of: all, image, video, audio, coding, embedding)"
            )),
        }
    }
}

/// Derives the display category for a capability list.
pub fn derive_category<S: AsRef<str>>(capabilities: &[S]) -> Option<ModelCategory> {
    let lowered = capabilities
        .iter()
        .map(|capability| capability.as_ref().to_ascii_lowercase())
        .collect::<Vec<_>>();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| {
            lowered
                .iter()
                .any(|capability| keywords.iter().any(|keyword| capability.contains(keyword)))
        })
        .map(|(category, _)| *category)
}
