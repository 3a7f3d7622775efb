//! Case and diacritic folding for keyword matching.
//!
//! # Invariants
//! - Output is lowercase.
//! - Every precomposed Vietnamese vowel variant folds to its base letter and
//!   `đ` folds to `d`.
//! - Combining marks (U+0300..U+036F) are dropped, so decomposed input folds
//!   the same way as precomposed input.

use crate::model::student::Student;
use once_cell::sync::Lazy;
use std::collections::HashMap;

const FOLD_TABLE: &[(char, &str)] = &[
    ('a', "àáảãạăằắẳẵặâầấẩẫậ"),
    ('e', "èéẻẽẹêềếểễệ"),
    ('i', "ìíỉĩị"),
    ('o', "òóỏõọôồốổỗộơờớởỡợ"),
    ('u', "ùúủũụưừứửữự"),
    ('y', "ỳýỷỹỵ"),
    ('d', "đ"),
];

static FOLD_MAP: Lazy<HashMap<char, char>> = Lazy::new(|| {
    FOLD_TABLE
        .iter()
        .flat_map(|(base, variants)| variants.chars().map(move |variant| (variant, *base)))
        .collect()
});

/// Lowercases and folds diacritics for substring matching.
pub fn normalize_search_text(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .filter(|ch| !is_combining_mark(*ch))
        .map(|ch| FOLD_MAP.get(&ch).copied().unwrap_or(ch))
        .collect()
}

/// Returns whether an already-normalized keyword occurs in the id, name or
/// class label of `student`.
pub fn student_matches(student: &Student, normalized_keyword: &str) -> bool {
    [student.id(), student.name(), student.class_label()]
        .into_iter()
        .any(|field| normalize_search_text(field).contains(normalized_keyword))
}

fn is_combining_mark(ch: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&ch)
}
