// SPDX-License-Identifier: PMPL-1.0-or-later

//! Identifier extraction from skin markup lines.
//!
//! Finds substrings that plausibly carry localization ids — a
//! `$LOCALIZE[..]` wrapper, an XML `<label>` element, an `$INFO[..]`
//! expression, or quoted `label=`/`labelID=` attributes — and harvests
//! the digit runs inside them, after stripping the runtime-value calls
//! (`Property(..)`, `Control(..)`, `Container(..)`, `ListItem(..)`) that
//! merely look like ids.
//!
//! This runs once per visible line on every redraw, so the shape test is
//! a single alternation that rejects uninteresting lines immediately.

use regex::Regex;
use std::sync::OnceLock;

/// The five markup shapes that can carry a localization id.
fn shape_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?i)(\$LOCALIZE\[\d+\])|(<label>\d+</label>)|(\$INFO\[[^\]]*\d+[^\]]*\])|(label="\d+")|(labelID="\d+")"#,
        )
        .unwrap()
    })
}

/// Runtime-value call syntax that wraps numbers which are not ids.
fn false_positive_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(Property|Control|Container|ListItem)\([^)]*\)").unwrap()
    })
}

fn digits_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").unwrap())
}

/// Extract candidate raw identifiers from one line of markup.
///
/// Returns the maximal digit runs found inside matching markup shapes,
/// in left-to-right order of appearance. Duplicates are preserved: each
/// occurrence produces its own annotation downstream. Lines with no
/// matching shape return an empty vec without further work.
pub fn extract(line: &str) -> Vec<String> {
    let shapes = shape_regex();
    if !shapes.is_match(line) {
        return Vec::new();
    }

    let mut out = Vec::new();
    for shape in shapes.find_iter(line) {
        // Drop runtime-value calls before harvesting digits, so
        // `$INFO[Window.Property(313)]` contributes nothing.
        let cleaned = false_positive_regex().replace_all(shape.as_str(), "");
        for digits in digits_regex().find_iter(&cleaned) {
            out.push(digits.as_str().to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localize_wrapper_is_extracted() {
        assert_eq!(extract("$LOCALIZE[313]"), vec!["313"]);
    }

    #[test]
    fn label_element_is_extracted() {
        assert_eq!(extract("<label>60000</label>"), vec!["60000"]);
    }

    #[test]
    fn label_attributes_are_extracted() {
        assert_eq!(extract(r#"<control label="31005">"#), vec!["31005"]);
        assert_eq!(extract(r#"<include labelID="31006"/>"#), vec!["31006"]);
    }

    #[test]
    fn info_expression_digits_are_extracted() {
        assert_eq!(extract("$INFO[System.Temperature,311,312]"), vec!["311", "312"]);
    }

    #[test]
    fn plain_text_line_is_rejected_cheaply() {
        assert!(extract("<control type=\"group\">").is_empty());
        assert!(extract("").is_empty());
    }

    #[test]
    fn bare_number_outside_known_shapes_is_ignored() {
        // A number not inside any of the five shapes is not a candidate.
        assert!(extract("<posx>313</posx>").is_empty());
    }

    #[test]
    fn property_call_is_not_an_id() {
        assert!(extract("$INFO[Window.Property(313)]").is_empty());
        assert!(extract("$INFO[Control(42).HasFocus]").is_empty());
        assert!(extract("$INFO[Container(50).ListItem.Label]").is_empty());
        assert!(extract("$INFO[ListItem(2).Title]").is_empty());
    }

    #[test]
    fn mixed_line_keeps_real_ids_and_drops_runtime_values() {
        let line = "$LOCALIZE[313] $INFO[Window.Property(9000)] <label>31000</label>";
        assert_eq!(extract(line), vec!["313", "31000"]);
    }

    #[test]
    fn duplicates_are_preserved_in_order() {
        let line = "$LOCALIZE[313] $LOCALIZE[313]";
        assert_eq!(extract(line), vec!["313", "313"]);
    }

    #[test]
    fn case_insensitive_shapes() {
        assert_eq!(extract("$localize[42]"), vec!["42"]);
        assert_eq!(extract("<LABEL>42</LABEL>"), vec!["42"]);
    }
}
