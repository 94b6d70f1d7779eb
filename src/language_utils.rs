//! Language utilities for ISO language code handling
//!
//! This module provides the language registry used to recognize language
//! tags in file names and configuration, and to map them to ISO 639-1
//! (2-letter) codes for comparison with detector output.

use isolang::Language;

/// Tag used when the language of a document could not be determined
pub const UNDETERMINED: &str = "und";

/// Lookup of language tags
pub trait LanguageRegistry {
    /// Whether the tag names a known language
    fn is_language(&self, tag: &str) -> bool;

    /// ISO 639-1 code of the tag, when the language has one
    fn get_2letter_code(&self, tag: &str) -> Option<String>;
}

/// ISO 639-2/B codes that differ from their ISO 639-2/T counterparts
const PART2B_TO_PART2T: &[(&str, &str)] = &[
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

fn part2b_to_part2t(code: &str) -> Option<&'static str> {
    PART2B_TO_PART2T
        .iter()
        .find(|(b, _)| *b == code)
        .map(|(_, t)| *t)
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Resolve a code or English name to an isolang language
fn lookup(tag: &str) -> Option<Language> {
    let normalized = tag.trim().to_lowercase();
    if normalized.is_empty() || normalized == UNDETERMINED {
        return None;
    }

    match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => Language::from_639_3(&normalized)
            .or_else(|| part2b_to_part2t(&normalized).and_then(Language::from_639_3)),
        _ => Language::from_name(&title_case(&normalized)),
    }
}

/// Registry backed by the ISO 639 tables of isolang
#[derive(Debug, Default, Clone, Copy)]
pub struct IsoLanguageRegistry;

impl LanguageRegistry for IsoLanguageRegistry {
    fn is_language(&self, tag: &str) -> bool {
        lookup(tag).is_some()
    }

    fn get_2letter_code(&self, tag: &str) -> Option<String> {
        lookup(tag)
            .and_then(|lang| lang.to_639_1())
            .map(str::to_string)
    }
}
