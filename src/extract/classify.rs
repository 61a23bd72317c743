use crate::data::types::Category;
use std::collections::HashMap;

/// Classify a tag mapping against the two patterns of interest.
///
/// Comparison is exact, with no case folding or alias handling: OSM tagging
/// conventions are exact-string conventions, and divergent spellings like
/// `generator:source=Wind` are tagging errors the downstream audit wants to
/// see, not noise to paper over. A missing key never matches. The wind rule
/// is checked first, so an element carrying both patterns classifies as a
/// wind generator.
pub fn classify(tags: &HashMap<String, String>) -> Option<Category> {
    let has = |key: &str, value: &str| tags.get(key).map(String::as_str) == Some(value);

    if has("power", "generator") && has("generator:source", "wind") {
        return Some(Category::WindGenerator);
    }
    if has("power", "plant") && has("plant:source", "solar") {
        return Some(Category::SolarPlant);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_wind_generator() {
        let t = tags(&[("power", "generator"), ("generator:source", "wind")]);
        assert_eq!(classify(&t), Some(Category::WindGenerator));
    }

    #[test]
    fn test_solar_plant() {
        let t = tags(&[("power", "plant"), ("plant:source", "solar")]);
        assert_eq!(classify(&t), Some(Category::SolarPlant));
    }

    #[test]
    fn test_mismatched_combination() {
        // A generator sourced from solar is outside the taxonomy.
        let t = tags(&[("power", "generator"), ("generator:source", "solar")]);
        assert_eq!(classify(&t), None);

        let t = tags(&[("power", "plant"), ("plant:source", "wind")]);
        assert_eq!(classify(&t), None);
    }

    #[test]
    fn test_missing_keys_never_match() {
        assert_eq!(classify(&tags(&[])), None);
        assert_eq!(classify(&tags(&[("power", "generator")])), None);
        assert_eq!(classify(&tags(&[("generator:source", "wind")])), None);
    }

    #[test]
    fn test_exact_match_no_case_folding() {
        let t = tags(&[("power", "generator"), ("generator:source", "Wind")]);
        assert_eq!(classify(&t), None);

        let t = tags(&[("power", "Generator"), ("generator:source", "wind")]);
        assert_eq!(classify(&t), None);
    }

    #[test]
    fn test_wind_rule_wins_on_conflicting_tags() {
        let t = tags(&[
            ("power", "generator"),
            ("generator:source", "wind"),
            ("plant:source", "solar"),
        ]);
        assert_eq!(classify(&t), Some(Category::WindGenerator));
    }

    #[test]
    fn test_unrelated_tags_ignored() {
        let t = tags(&[("highway", "residential"), ("name", "Main Street")]);
        assert_eq!(classify(&t), None);
    }
}
