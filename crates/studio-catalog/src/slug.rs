use std::collections::HashSet;

/// Slug used when neither the name nor the id contains any ASCII alphanumerics.
pub const FALLBACK_SLUG: &str = "model";

/// Lowercases `input` and collapses every run of characters outside
/// `[a-z0-9]` into a single hyphen, trimming hyphens at both ends.
///
/// Returns an empty string when `input` has no ASCII alphanumerics.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// True when `value` matches `^[a-z0-9]+(-[a-z0-9]+)*$`.
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value.split('-').all(|segment| {
            !segment.is_empty()
                && segment
                    .bytes()
                    .all(|byte| byte.is_ascii_lowercase() || byte.is_ascii_digit())
        })
}

#[derive(Debug, Default, Clone)]
/// Slugs claimed so far within one aggregation.
pub struct SlugRegistry {
    taken: HashSet<String>,
}

impl SlugRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.taken.contains(slug)
    }

    pub fn len(&self) -> usize {
        self.taken.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }

    /// Claims a unique slug for an entry.
    ///
    /// The base comes from `name`, then `id`, then [`FALLBACK_SLUG`]. A taken
    /// base gets the provider appended (`gpt-4-azure`); if that is taken too,
    /// or the provider has no usable characters, a counter starting at 2 is
    /// appended (`gpt-4-azure-2`).
    pub fn claim(&mut self, name: &str, id: &str, provider: &str) -> String {
        let base = [slugify(name), slugify(id)]
            .into_iter()
            .find(|candidate| !candidate.is_empty())
            .unwrap_or_else(|| FALLBACK_SLUG.to_string());
        if self.taken.insert(base.clone()) {
            return base;
        }

        let provider_slug = slugify(provider);
        let qualified = if provider_slug.is_empty() || base.ends_with(&format!("-{provider_slug}"))
        {
            base
        } else {
            format!("{base}-{provider_slug}")
        };
        if self.taken.insert(qualified.clone()) {
            return qualified;
        }

        let mut counter = 2usize;
        loop {
            let candidate = format!("{qualified}-{counter}");
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            counter += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn unit_slugify_lowercases_and_collapses_separators() {
        assert_eq!(slugify("GPT-4o mini"), "gpt-4o-mini");
        assert_eq!(slugify("Whisper Translation"), "whisper-translation");
        assert_eq!(slugify("  Llama 3.3 (70B) -- Instruct  "), "llama-3-3-70b-instruct");
        assert_eq!(slugify("meta/llama-3.1_8b"), "meta-llama-3-1-8b");
    }

    #[test]
    fn unit_slugify_drops_non_ascii_and_can_be_empty() {
        assert_eq!(slugify("Qwen 图像 Edit"), "qwen-edit");
        assert_eq!(slugify("Café Noir"), "caf-noir");
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn unit_is_valid_slug_enforces_pattern() {
        assert!(is_valid_slug("tts-model"));
        assert!(is_valid_slug("gpt-4o"));
        assert!(is_valid_slug("o3"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug("trailing-"));
        assert!(!is_valid_slug("double--hyphen"));
        assert!(!is_valid_slug("Upper"));
        assert!(!is_valid_slug("under_score"));
    }

    #[test]
    fn functional_registry_falls_back_from_name_to_id_to_constant() {
        let mut registry = SlugRegistry::new();
        assert_eq!(registry.claim("TTS Model", "audio-tts", "OpenAI"), "tts-model");
        assert_eq!(registry.claim("", "audio-tts-hd", "OpenAI"), "audio-tts-hd");
        assert_eq!(registry.claim("???", "!!!", "OpenAI"), "model");
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn functional_registry_disambiguates_with_provider_then_counter() {
        let mut registry = SlugRegistry::new();
        assert_eq!(registry.claim("GPT-4", "gpt-4", "OpenAI"), "gpt-4");
        assert_eq!(registry.claim("GPT-4", "azure/gpt-4", "Azure"), "gpt-4-azure");
        assert_eq!(registry.claim("GPT 4", "azure/gpt-4-0613", "Azure"), "gpt-4-azure-2");
        assert_eq!(registry.claim("GPT-4", "mirror/gpt-4", "???"), "gpt-4-2");
        assert!(registry.contains("gpt-4-azure-2"));
    }

    #[test]
    fn regression_registry_does_not_repeat_provider_suffix() {
        let mut registry = SlugRegistry::new();
        assert_eq!(registry.claim("Wan OpenAI", "a", "OpenAI"), "wan-openai");
        assert_eq!(registry.claim("Wan OpenAI", "b", "OpenAI"), "wan-openai-2");
    }

    #[test]
    fn regression_registry_skips_counter_values_claimed_by_literal_names() {
        let mut registry = SlugRegistry::new();
        assert_eq!(registry.claim("Sora 2", "video-sora-2", "OpenAI"), "sora-2");
        assert_eq!(registry.claim("Sora", "sora", ""), "sora");
        assert_eq!(registry.claim("Sora", "sora-mirror", ""), "sora-3");
    }

    proptest! {
        #[test]
        fn slugify_output_is_empty_or_valid(input in ".{0,64}") {
            let slug = slugify(&input);
            prop_assert!(slug.is_empty() || is_valid_slug(&slug));
        }

        #[test]
        fn slugify_is_idempotent(input in ".{0,64}") {
            let slug = slugify(&input);
            prop_assert_eq!(slugify(&slug), slug);
        }

        #[test]
        fn registry_claims_are_valid_and_distinct(
            entries in proptest::collection::vec((".{0,24}", ".{0,24}", ".{0,12}"), 0..40)
        ) {
            let mut registry = SlugRegistry::new();
            let mut seen = HashSet::new();
            for (name, id, provider) in &entries {
                let slug = registry.claim(name, id, provider);
                prop_assert!(is_valid_slug(&slug), "invalid slug {slug:?}");
                prop_assert!(seen.insert(slug.clone()), "duplicate slug {slug:?}");
            }
        }
    }
}
