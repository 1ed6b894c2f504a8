//! Hand-maintained catalog entries for models the live listings do not expose.

use crate::{InvocationMethod, ModelDraft, SourceType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A constant catalog entry, shaped like a normalized listing item.
pub struct CuratedModel {
    pub id: &'static str,
    pub name: &'static str,
    pub provider: &'static str,
    pub description: &'static str,
    pub capabilities: &'static [&'static str],
    pub endpoint: &'static str,
    pub method: InvocationMethod,
    pub source_type: SourceType,
}

impl CuratedModel {
    pub fn to_draft(&self) -> ModelDraft {
        ModelDraft {
            id: self.id.to_string(),
            name: self.name.to_string(),
            provider: self.provider.to_string(),
            capabilities: self
                .capabilities
                .iter()
                .map(|capability| capability.to_string())
                .collect(),
            description: self.description.to_string(),
            endpoint: self.endpoint.to_string(),
            method: self.method,
            source_type: self.source_type,
        }
    }
}

const CURATED_MODELS: &[CuratedModel] = &[
    CuratedModel {
        id: "audio-whisper-transcription",
        name: "Whisper",
        provider: "OpenAI",
        description: "Speech-to-text transcription for meetings, podcasts and voice notes.",
        capabilities: &["transcription", "audio"],
        endpoint: "/v1/audio/transcriptions",
        method: InvocationMethod::Post,
        source_type: SourceType::Audio,
    },
    CuratedModel {
        id: "audio-whisper-translation",
        name: "Whisper Translation",
        provider: "OpenAI",
        description: "Translates spoken audio in any supported language into English text.",
        capabilities: &["translation", "audio"],
        endpoint: "/v1/audio/translations",
        method: InvocationMethod::Post,
        source_type: SourceType::Audio,
    },
    CuratedModel {
        id: "audio-tts",
        name: "TTS Model",
        provider: "OpenAI",
        description: "Natural-sounding text-to-speech with multiple preset voices.",
        capabilities: &["text-to-speech", "audio-generation"],
        endpoint: "/v1/audio/speech",
        method: InvocationMethod::Post,
        source_type: SourceType::Audio,
    },
    CuratedModel {
        id: "video-alibaba-wan-i2v",
        name: "Alibaba Wan 2.2 I2V 720p",
        provider: "Alibaba",
        description: "Animates a still image into a 5 second 720p clip guided by a prompt.",
        capabilities: &["image-to-video", "video-generation"],
        endpoint: "/v1/multimodal/video/wan22",
        method: InvocationMethod::Post,
        source_type: SourceType::Video,
    },
    CuratedModel {
        id: "video-seedance-i2v",
        name: "Seedance I2V",
        provider: "ByteDance",
        description: "Image-to-video generation with smooth camera motion.",
        capabilities: &["image-to-video", "video-generation"],
        endpoint: "/v1/multimodal/video/seedance",
        method: InvocationMethod::Post,
        source_type: SourceType::Video,
    },
    CuratedModel {
        id: "video-sora-2",
        name: "Sora 2",
        provider: "OpenAI",
        description: "Text-to-video generation with synchronized audio.",
        capabilities: &["text-to-video", "video-generation"],
        endpoint: "/v1/multimodal/video/sora2",
        method: InvocationMethod::Post,
        source_type: SourceType::Video,
    },
    CuratedModel {
        id: "image-qwen-image-edit",
        name: "Qwen Image Edit",
        provider: "Alibaba",
        description: "Instruction-driven image editing and generation.",
        capabilities: &["image-generation", "image-editing"],
        endpoint: "/v1/multimodal/image/qwen-edit",
        method: InvocationMethod::Post,
        source_type: SourceType::Image,
    },
    CuratedModel {
        id: "image-flux-schnell",
        name: "FLUX.1 Schnell",
        provider: "Black Forest Labs",
        description: "Fast text-to-image generation in one to four steps.",
        capabilities: &["image-generation", "text-to-image"],
        endpoint: "/v1/multimodal/image/flux-schnell",
        method: InvocationMethod::Post,
        source_type: SourceType::Image,
    },
];

/// Curated entries appended to every aggregation, in declaration order.
pub fn curated_models() -> &'static [CuratedModel] {
    CURATED_MODELS
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::{derive_category, slugify, ModelCategory};

    #[test]
    fn conformance_curated_audio_trio_matches_published_ids() {
        let audio = curated_models()
            .iter()
            .filter(|model| model.source_type == SourceType::Audio)
            .map(|model| (model.id, model.name))
            .collect::<Vec<_>>();
        assert_eq!(
            audio,
            vec![
                ("audio-whisper-transcription", "Whisper"),
                ("audio-whisper-translation", "Whisper Translation"),
                ("audio-tts", "TTS Model"),
            ]
        );
        assert!(curated_models()
            .iter()
            .filter(|model| model.source_type == SourceType::Audio)
            .all(|model| model.provider == "OpenAI" && model.method == InvocationMethod::Post));
    }

    #[test]
    fn conformance_curated_ids_are_unique_and_namespaced_by_source_type() {
        let mut ids = HashSet::new();
        for model in curated_models() {
            assert!(ids.insert(model.id), "duplicate curated id {}", model.id);
            let prefix = format!("{}-", model.source_type.as_str());
            assert!(
                model.id.starts_with(&prefix),
                "curated id {} should start with {prefix}",
                model.id
            );
        }
    }

    #[test]
    fn conformance_curated_categories_follow_source_type() {
        for model in curated_models() {
            let expected = match model.source_type {
                SourceType::Audio => ModelCategory::Audio,
                SourceType::Video => ModelCategory::Video,
                SourceType::Image => ModelCategory::Image,
                other => panic!("unexpected curated source type {other}"),
            };
            assert_eq!(
                derive_category(model.capabilities),
                Some(expected),
                "curated model {} is miscategorized",
                model.id
            );
        }
    }

    #[test]
    fn regression_curated_names_produce_distinct_slugs() {
        let mut slugs = HashSet::new();
        for model in curated_models() {
            let slug = slugify(model.name);
            assert!(!slug.is_empty(), "curated model {} has no slug", model.id);
            assert!(slugs.insert(slug.clone()), "curated slug {slug} collides");
        }
    }

    #[test]
    fn unit_to_draft_copies_every_field() {
        let draft = curated_models()[2].to_draft();
        assert_eq!(draft.id, "audio-tts");
        assert_eq!(draft.capabilities, vec!["text-to-speech", "audio-generation"]);
        assert_eq!(draft.endpoint, "/v1/audio/speech");
        assert_eq!(draft.source_type, SourceType::Audio);
    }
}
