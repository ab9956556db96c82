/// Replace every occurrence of `placeholder` in `template` with `text`.
/// A template without the placeholder is returned unchanged.
pub fn fill_prompt(template: &str, placeholder: &str, text: &str) -> String {
    if placeholder.is_empty() {
        return template.to_string();
    }
    template.replace(placeholder, text)
}

/// Language hint for the transcription service. Languages it cannot take as
/// an explicit tag are left to auto-detection; every other code is passed
/// through as given.
pub fn language_hint<'a>(source_language: &'a str, auto_detect: &[String]) -> Option<&'a str> {
    if auto_detect.iter().any(|lang| lang == source_language) {
        None
    } else {
        Some(source_language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_single_placeholder() {
        assert_eq!(
            fill_prompt("Translate: __TEXT__", "__TEXT__", "Bonjour"),
            "Translate: Bonjour"
        );
    }

    #[test]
    fn replaces_every_occurrence() {
        assert_eq!(
            fill_prompt("__TEXT__ / __TEXT__", "__TEXT__", "sabaidee"),
            "sabaidee / sabaidee"
        );
    }

    #[test]
    fn template_without_placeholder_is_unchanged() {
        assert_eq!(fill_prompt("Translate this", "__TEXT__", "Bonjour"), "Translate this");
        assert_eq!(fill_prompt("", "__TEXT__", "Bonjour"), "");
    }

    #[test]
    fn substitution_is_literal() {
        assert_eq!(fill_prompt("[__TEXT__]", "__TEXT__", "$1 {x} __TEXT__"), "[$1 {x} __TEXT__]");
        assert_eq!(fill_prompt("a__TEXT__b", "__TEXT__", ""), "ab");
    }

    #[test]
    fn lao_is_auto_detected() {
        let auto = vec!["lo".to_string()];
        assert_eq!(language_hint("lo", &auto), None);
        assert_eq!(language_hint("fr", &auto), Some("fr"));
        assert_eq!(language_hint("en", &auto), Some("en"));
        assert_eq!(language_hint("LO", &auto), Some("LO"));
    }
}
