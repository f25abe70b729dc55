//! Pattern-based language detection for snippet bodies.
//!
//! Detection is purely advisory: the result pre-fills the language field and
//! the user may override it. The indicator table is ordered and the order is
//! part of the contract: on ambiguous input the first language to clear the
//! two-indicator threshold wins.

mod table;

use table::indicator_table;

/// Tag returned when nothing in the table matches.
pub const FALLBACK_LANGUAGE: &str = "text";

/// Best-guess language tag for a piece of source text.
///
/// Counts, per candidate language, how many of its indicator patterns match.
/// The first candidate (in table order) reaching two or more matches wins;
/// failing that, the first candidate with at least one match; failing that,
/// `"text"`. Deterministic and total.
pub fn detect_language(code: &str) -> &'static str {
    if code.trim().is_empty() {
        return FALLBACK_LANGUAGE;
    }

    for (language, indicators) in indicator_table() {
        let hits = indicators.iter().filter(|re| re.is_match(code)).count();
        if hits >= 2 {
            return language;
        }
    }

    // Coarse fallback: a single strong indicator, still in table order.
    for (language, indicators) in indicator_table() {
        if indicators.iter().any(|re| re.is_match(code)) {
            return language;
        }
    }

    FALLBACK_LANGUAGE
}

/// Human-readable name for a language tag.
///
/// Unknown tags are title-cased rather than rejected so user-supplied
/// languages still render reasonably.
pub fn display_name(tag: &str) -> String {
    let known = match tag {
        "javascript" => "JavaScript",
        "python" => "Python",
        "css" => "CSS",
        "html" => "HTML",
        "json" => "JSON",
        "markdown" => "Markdown",
        "sql" => "SQL",
        "bash" => "Bash/Shell",
        "php" => "PHP",
        "java" => "Java",
        "c" => "C",
        "cpp" => "C++",
        "go" => "Go",
        "rust" => "Rust",
        "yaml" => "YAML",
        "xml" => "XML",
        "dockerfile" => "Dockerfile",
        "text" => "Plain Text",
        _ => "",
    };
    if !known.is_empty() {
        return known.to_string();
    }
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
