//! Markdown rendering of function documentation.

use crate::domains::catalog::clean_doc;

/// Placeholder shown for functions without documentation.
pub const NO_DOCUMENTATION_AVAILABLE: &str = "No documentation available.";

/// Separator between functions in the aggregate document.
pub const DIVIDER: &str = "\n\n---\n\n";

/// Title-cased words whose display form is an abbreviation.
const DISPLAY_OVERRIDES: &[(&str, &str)] = &[
    // Financial Independence
    ("Fi", "FI"),
    // Pay-Over-Tuition
    ("Pot", "POT"),
];

/// Human-readable title for a function name.
///
/// `buy_a_day_of_freedom` becomes `Buy A Day Of Freedom`; words listed in
/// the override table are replaced whole, so `fi_number` becomes
/// `FI Number` while `final` stays `Final`.
pub fn display_name(function_name: &str) -> String {
    function_name
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let titled = title_case(word);
            DISPLAY_OVERRIDES
                .iter()
                .find(|(from, _)| *from == titled)
                .map_or(titled, |(_, to)| to.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Markdown help for one function: a heading followed by its documentation.
pub fn format_help(function_name: &str, doc: Option<&str>, heading_level: usize) -> String {
    let body = doc
        .map(clean_doc)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| NO_DOCUMENTATION_AVAILABLE.to_string());
    format!(
        "{} {}\n\n{}",
        "#".repeat(heading_level),
        display_name(function_name),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_title_cases_words() {
        assert_eq!(display_name("future_value"), "Future Value");
        assert_eq!(display_name("rule_of_72"), "Rule Of 72");
    }

    #[test]
    fn test_display_name_abbreviations() {
        assert_eq!(display_name("fi_number"), "FI Number");
        assert_eq!(display_name("coast_fi"), "Coast FI");
        assert_eq!(display_name("pot_score"), "POT Score");
    }

    #[test]
    fn test_display_name_only_replaces_whole_words() {
        assert_eq!(display_name("final_potluck"), "Final Potluck");
    }

    #[test]
    fn test_format_help() {
        let help = format_help("fi_ratio", Some(" Progress to FI.\n\n ### Args:\n"), 1);
        assert_eq!(help, "# FI Ratio\n\nProgress to FI.\n\n### Args:");

        let help = format_help("mystery", None, 2);
        assert_eq!(help, "## Mystery\n\nNo documentation available.");
    }
}
