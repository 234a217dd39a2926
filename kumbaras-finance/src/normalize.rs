//! Text normalization for keyword matching.
//!
//! Uppercase first, then fold the accented Greek capitals to their base
//! letter, so `Ενοίκιο`, `ΕΝΟΊΚΙΟ` and `ΕΝΟΙΚΙΟ` all read `ΕΝΟΙΚΙΟ`.

const ACCENT_FOLDS: [(char, char); 7] = [
    ('Ά', 'Α'),
    ('Έ', 'Ε'),
    ('Ή', 'Η'),
    ('Ί', 'Ι'),
    ('Ό', 'Ο'),
    ('Ύ', 'Υ'),
    ('Ώ', 'Ω'),
];

fn fold(c: char) -> char {
    ACCENT_FOLDS
        .iter()
        .find(|(accented, _)| *accented == c)
        .map(|(_, base)| *base)
        .unwrap_or(c)
}

/// Uppercase and accent-fold a single field.
pub fn fold_upper(s: &str) -> String {
    s.to_uppercase().chars().map(fold).collect()
}

/// Matching text for a transaction: `description + " " + comments`, normalized.
/// Absent fields read as empty.
pub fn normalize(description: Option<&str>, comments: Option<&str>) -> String {
    let raw = format!("{} {}", description.unwrap_or(""), comments.unwrap_or(""));
    fold_upper(&raw)
}
