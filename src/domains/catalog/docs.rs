//! Doc Parser - splits markdown function documentation into sections.
//!
//! The convention is a free-text description, then an optional `### Args:`
//! section with one `- **name**: text` bullet per parameter, then an
//! optional `### Returns:` section:
//!
//! ```text
//! Calculate the future value of money.
//!
//! ### Args:
//! - **present_value**: the starting amount.
//! - **annual_rate**: yearly growth rate as a percentage
//!   (7 means 7%).
//!
//! ### Returns:
//! The value after compounding.
//! ```

use std::collections::BTreeMap;

/// Structured documentation of one function.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDoc {
    /// Text before the first section heading, trimmed.
    pub description: String,

    /// Parameter name to whitespace-collapsed description.
    pub params: BTreeMap<String, String>,

    /// Whitespace-collapsed text of the `Returns` section.
    pub returns: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Description,
    Args,
    Returns,
    Other,
}

impl ParsedDoc {
    /// Parse raw documentation. `None` yields an all-empty result.
    pub fn parse(raw_doc: Option<&str>) -> Self {
        match raw_doc {
            Some(raw) if !raw.trim().is_empty() => Self::parse_cleaned(&clean_doc(raw)),
            _ => Self::default(),
        }
    }

    /// Description of a parameter, if the `Args` section names it.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    fn parse_cleaned(text: &str) -> Self {
        let mut section = Section::Description;
        let mut description = Vec::new();
        let mut returns = Vec::new();
        let mut params = BTreeMap::new();
        let mut current: Option<(String, Vec<&str>)> = None;

        for line in text.lines() {
            if let Some(heading) = heading_title(line) {
                flush_param(&mut current, &mut params);
                section = match heading.to_ascii_lowercase().as_str() {
                    "args" => Section::Args,
                    "returns" => Section::Returns,
                    _ => Section::Other,
                };
                continue;
            }

            match section {
                Section::Description => description.push(line),
                Section::Args => {
                    if let Some((name, text)) = param_bullet(line) {
                        flush_param(&mut current, &mut params);
                        current = Some((name.to_string(), vec![text]));
                    } else if line.trim_start().starts_with('-') {
                        // A bullet outside the convention still ends the entry above it.
                        flush_param(&mut current, &mut params);
                    } else if let Some((_, lines)) = current.as_mut() {
                        lines.push(line);
                    }
                }
                Section::Returns => returns.push(line),
                Section::Other => {}
            }
        }
        flush_param(&mut current, &mut params);

        Self {
            description: description.join("\n").trim().to_string(),
            params,
            returns: collapse_whitespace(&returns.join(" ")),
        }
    }
}

/// Look up a parameter description, synthesizing one when undocumented.
///
/// Never fails, even for functions without documentation.
pub fn describe_parameter(raw_doc: Option<&str>, param_name: &str) -> String {
    ParsedDoc::parse(raw_doc)
        .param(param_name)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Parameter: {param_name}"))
}

/// Normalize documentation text for display and parsing.
///
/// Removes the indentation shared by all non-blank lines, trailing
/// whitespace, and leading and trailing blank lines.
pub fn clean_doc(raw: &str) -> String {
    let indent = raw
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);

    let lines: Vec<&str> = raw
        .lines()
        .map(|line| strip_chars(line, indent).trim_end())
        .collect();

    let start = lines.iter().position(|line| !line.is_empty());
    let end = lines.iter().rposition(|line| !line.is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}

/// Drop the first `count` characters of a line.
fn strip_chars(line: &str, count: usize) -> &str {
    match line.char_indices().nth(count) {
        Some((offset, _)) => &line[offset..],
        None => "",
    }
}

/// Collapse every whitespace run to one space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn flush_param(current: &mut Option<(String, Vec<&str>)>, params: &mut BTreeMap<String, String>) {
    if let Some((name, lines)) = current.take() {
        let text = collapse_whitespace(&lines.join(" "));
        if !text.is_empty() {
            params.insert(name, text);
        }
    }
}

/// Title of a markdown heading line (`### Args:` gives `Args`).
fn heading_title(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('#')?;
    let rest = rest.trim_start_matches('#');
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let title = rest.trim().trim_end_matches(':').trim_end();
    (!title.is_empty()).then_some(title)
}

/// Split a `- **name**: text` bullet into its name and first-line text.
fn param_bullet(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim_start().strip_prefix('-')?.trim_start();
    let rest = rest.strip_prefix("**")?;
    let (name, rest) = rest.split_once("**")?;
    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }
    let text = rest.strip_prefix(':')?;
    Some((name, text.trim()))
}
