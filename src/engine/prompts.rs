//! Prompt templates for the image strategy engine. The exact alt strings are
//! part of the engine's output contract and are asserted by tests.

pub const CLASSIFIER_SYSTEM_PROMPT: &str = r#"You are an AI image generation strategy expert. Analyze keywords and determine if they are:
1. GENERIC/COMMON - Can be easily generated with AI (landscapes, emotions, abstract concepts, common objects)
2. NICHE/SPECIFIC - Require reference images for accuracy (specific products, technical items, rare subjects, branded items, specific locations, unique designs)

Return ONLY a JSON object with this exact format:
{
  "useEnhanced": boolean,
  "reasoning": "brief explanation"
}"#;

pub fn classifier_user_prompt(keyword: &str, title: &str) -> String {
    format!(
        "Analyze these keywords and title:\nKeywords: \"{}\"\nTitle: \"{}\"\n\nShould we use enhanced image generation (search real images + AI vision + regenerate) or standard AI generation?",
        keyword, title
    )
}

/// A ready-to-send image prompt and the alt text of the resulting image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePrompt {
    pub prompt: String,
    pub alt: String,
}

/// The five-step ladder used by the standard pipeline: hero, supporting
/// illustration, contextual, background, supplementary.
pub fn standard_prompt_ladder(title: &str) -> Vec<ImagePrompt> {
    vec![
        ImagePrompt {
            prompt: format!(
                "Professional hero image for article: \"{}\". High-quality, engaging, photorealistic, 1280x720 aspect ratio, editorial style.",
                title
            ),
            alt: format!("Featured image for {}", title),
        },
        ImagePrompt {
            prompt: format!(
                "Supporting illustration for article about {}. Photorealistic, detailed, professional, 1280x720 aspect ratio.",
                title
            ),
            alt: format!("Detailed view related to {}", title),
        },
        ImagePrompt {
            prompt: format!(
                "Contextual image showing key concepts from: {}. Clear, informative, high-quality, 1280x720 aspect ratio.",
                title
            ),
            alt: format!("Key concepts illustration for {}", title),
        },
        ImagePrompt {
            prompt: format!(
                "Professional background image representing {}. Atmospheric, high-resolution, 1280x720 aspect ratio.",
                title
            ),
            alt: format!("Background illustration for {}", title),
        },
        ImagePrompt {
            prompt: format!(
                "Supplementary visual for {}. Engaging, clear, photorealistic, 1280x720 aspect ratio.",
                title
            ),
            alt: format!("Additional visual content for {}", title),
        },
    ]
}

/// Generic prompts used to top up the enhanced pipeline when fewer reference
/// images than requested were usable. At most three slots can be filled.
pub fn topup_prompts(title: &str, keyword: &str) -> Vec<ImagePrompt> {
    let alt = format!("Professional image for {}", title);
    vec![
        ImagePrompt {
            prompt: format!("Professional image for {}, photorealistic, 1280x720", title),
            alt: alt.clone(),
        },
        ImagePrompt {
            prompt: format!(
                "High-quality editorial image about {}, clean composition",
                keyword
            ),
            alt: alt.clone(),
        },
        ImagePrompt {
            prompt: format!("Detailed illustration for {}, professional style", title),
            alt,
        },
    ]
}

pub fn vision_analysis_prompt(remove_contact_info: bool) -> String {
    let mut prompt = String::from(
        "Analyze this image and describe:\n1. Main subject and composition\n2. Color palette and lighting\n3. Visual style (photorealistic, illustration, abstract, etc.)\n4. Key visual elements\n5. Any text, watermarks, logos, or contact information present\n\nFocus on elements that can inspire a NEW original image.",
    );
    if remove_contact_info {
        prompt.push_str(" Note any text or branding that should NOT be included in the recreation.");
    }
    prompt
}

pub fn enhanced_generation_prompt(
    analysis: &str,
    keyword: &str,
    remove_contact_info: bool,
) -> String {
    let mut prompt = format!(
        "Create a professional, high-quality image inspired by this description: {}\n\nRequirements:\n- Image should be original and unique (NOT a copy)\n- Professional, photorealistic style\n- 1280x720 aspect ratio\n- High resolution and sharp details\n- Related to: {}",
        analysis, keyword
    );
    if remove_contact_info {
        prompt.push_str("\n- NO text, watermarks, logos, or contact information");
        prompt.push_str("\n- Clean, professional composition without any branding");
    }
    prompt.push_str("\n- Suitable for editorial/blog use");
    prompt
}

pub fn enhanced_alt(keyword: &str) -> String {
    format!(
        "Professional image for {} (AI-generated, reference-inspired)",
        keyword
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladder_has_five_steps() {
        let ladder = standard_prompt_ladder("Handmade Teapots");
        assert_eq!(ladder.len(), 5);
        assert_eq!(ladder[0].alt, "Featured image for Handmade Teapots");
        assert_eq!(ladder[1].alt, "Detailed view related to Handmade Teapots");
        assert_eq!(
            ladder[2].alt,
            "Key concepts illustration for Handmade Teapots"
        );
    }

    #[test]
    fn test_topup_is_capped_at_three() {
        let prompts = topup_prompts("Handmade Teapots", "artisan teapot");
        assert_eq!(prompts.len(), 3);
        for p in &prompts {
            assert_eq!(p.alt, "Professional image for Handmade Teapots");
        }
    }

    #[test]
    fn test_enhanced_prompt_branding_instructions() {
        let with = enhanced_generation_prompt("a teapot on a table", "artisan teapot", true);
        assert!(with.contains("NO text, watermarks, logos, or contact information"));
        assert!(with.ends_with("- Suitable for editorial/blog use"));

        let without = enhanced_generation_prompt("a teapot on a table", "artisan teapot", false);
        assert!(!without.contains("NO text, watermarks"));
    }

    #[test]
    fn test_vision_prompt_exclusion_note() {
        assert!(vision_analysis_prompt(true).contains("should NOT be included"));
        assert!(!vision_analysis_prompt(false).contains("should NOT be included"));
    }
}
