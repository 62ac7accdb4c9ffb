use regex::Regex;

use crate::error::{Diagnostic, SdkError};
use crate::sdk::models::ImageResource;
use crate::sdk::VrmClient;

#[derive(Debug, Clone, Default)]
pub struct ImageFilter {
    /// Exact tag match. Mutually exclusive with `tag_pattern`.
    pub tag: Option<String>,
    /// Glob pattern (`*`, `?`) matched against each tag.
    pub tag_pattern: Option<String>,
}

impl ImageFilter {
    fn matches(&self, image: &ImageResource) -> bool {
        if let Some(tag) = &self.tag {
            return image.tags.iter().any(|t| t == tag);
        }
        if let Some(pattern) = &self.tag_pattern {
            if let Ok(re) = glob_to_regex(pattern) {
                return image.tags.iter().any(|t| re.is_match(t));
            }
            return false;
        }
        true
    }
}

/// Translates a shell-style glob (`*` any run, `?` single char) into an
/// anchored regex, reusing the `regex` crate already in the dependency
/// stack rather than hand-rolling glob matching.
fn glob_to_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let mut re = String::from("^");
    for c in pattern.chars() {
        match c {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            _ => re.push_str(&regex::escape(&c.to_string())),
        }
    }
    re.push('$');
    Regex::new(&re)
}

pub fn validate_image_filter(filter: &ImageFilter) -> Option<Diagnostic> {
    if filter.tag.is_some() && filter.tag_pattern.is_some() {
        Some(Diagnostic::error(
            "tag and tag_pattern are mutually exclusive",
            "set at most one of tag or tag_pattern",
        ))
    } else {
        None
    }
}

pub async fn list_images(client: &dyn VrmClient, filter: &ImageFilter) -> Result<Vec<ImageResource>, SdkError> {
    let mut images: Vec<ImageResource> = client
        .list_images()
        .await?
        .into_iter()
        .filter(|i| filter.matches(i))
        .collect();
    super::sort_by_id(&mut images, |i| i.id.as_str());
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(id: &str, tags: &[&str]) -> ImageResource {
        ImageResource {
            id: id.to_string(),
            name: id.to_string(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn exact_tag_requires_full_match() {
        let filter = ImageFilter {
            tag: Some("stable".to_string()),
            tag_pattern: None,
        };
        assert!(filter.matches(&image("i1", &["stable", "amd64"])));
        assert!(!filter.matches(&image("i2", &["stable-2024"])));
    }

    #[test]
    fn glob_pattern_matches_tag_prefix() {
        let filter = ImageFilter {
            tag: None,
            tag_pattern: Some("stable-*".to_string()),
        };
        assert!(filter.matches(&image("i1", &["stable-2024"])));
        assert!(!filter.matches(&image("i2", &["beta-2024"])));
    }

    #[test]
    fn both_tag_and_pattern_is_rejected() {
        let filter = ImageFilter {
            tag: Some("stable".to_string()),
            tag_pattern: Some("stable-*".to_string()),
        };
        assert!(validate_image_filter(&filter).is_some());
    }

    #[test]
    fn neither_filter_matches_everything() {
        let filter = ImageFilter::default();
        assert!(filter.matches(&image("i1", &[])));
    }
}
