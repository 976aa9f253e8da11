//! Input scrubbing for names that end up as file and directory names.

const ALLOWED_SPECIAL: &[char] = &[' ', '_', '-'];

/// Strips characters that are unsafe in a filename, keeping letters, digits,
/// spaces, underscores, and hyphens, then drops trailing whitespace.
pub fn scrub_input(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_alphanumeric() || ALLOWED_SPECIAL.contains(c))
        .collect::<String>()
        .trim_end()
        .to_string()
}

/// Scrubbed form with spaces collapsed to underscores, usable as a directory
/// name component.
pub fn sanitize_class_name(input: &str) -> String {
    scrub_input(input).replace(' ', "_")
}

/// True when the input carries no usable name: empty strings, runs of
/// whitespace or underscores, and punctuation-only replies all count as blank.
pub fn is_essentially_blank(input: &str) -> bool {
    !scrub_input(input).chars().any(char::is_alphanumeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrub_keeps_word_characters() {
        assert_eq!(scrub_input("the_flying_circus"), "the_flying_circus");
        assert_eq!(scrub_input("year 7 maths"), "year 7 maths");
        assert_eq!(scrub_input("semi-final group"), "semi-final group");
    }

    #[test]
    fn scrub_drops_path_and_shell_characters() {
        assert_eq!(scrub_input("hells/grannys"), "hellsgrannys");
        assert_eq!(scrub_input("up..\\and\\over"), "upandover");
        assert_eq!(scrub_input("no*glob?here!"), "noglobhere");
    }

    #[test]
    fn scrub_trims_trailing_whitespace_only() {
        assert_eq!(scrub_input("  class 9b   "), "  class 9b");
    }

    #[test]
    fn sanitize_replaces_spaces_with_underscores() {
        assert_eq!(sanitize_class_name("the flying circus"), "the_flying_circus");
        assert_eq!(sanitize_class_name(" leading space"), "_leading_space");
        assert_eq!(sanitize_class_name("tidy"), "tidy");
    }

    #[test]
    fn blank_inputs_are_blank() {
        for input in ["", " ", "  ", "   ", "     ", "_", "__", "___", "_____"] {
            assert!(is_essentially_blank(input), "input {input:?}");
        }
        assert!(is_essentially_blank(" _ _ _"));
        assert!(is_essentially_blank(r#"~`!@#$%^&*()-_+{}[]|\:;"',.<>?/"#));
    }

    #[test]
    fn named_inputs_are_not_blank() {
        for input in [
            " test",
            "   test",
            "test ",
            "test   ",
            " test ",
            "test",
            "not the Spanish inquisition",
            " not the spanish inquisition ",
            " because nobody_expects_the _spanish_ inquisition the 2nd time",
            " because nobody_expects_the !@#$%ing _spanish_ inquisition the 2nd ?~)*% time",
        ] {
            assert!(!is_essentially_blank(input), "input {input:?}");
        }
    }
}
