use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Options applied to composed parameter values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueOptions {
    pub lowercase: bool,
}

impl Default for ValueOptions {
    fn default() -> Self {
        Self { lowercase: false }
    }
}

/// Remove diacritics by decomposing and dropping combining marks ("Été" -> "Ete")
pub fn fold_diacritics(input: &str) -> String {
    input.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Collapse whitespace runs to a single space and trim the edges
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Canonical lookup key for a column name.
///
/// Case, diacritics and surrounding/repeated whitespace are ignored so that
/// `"Campaña  Name"`, `"campana name"` and `" CAMPANA NAME "` all resolve to
/// the same column.
pub fn normalize_key(name: &str) -> String {
    collapse_whitespace(&fold_diacritics(name)).to_lowercase()
}

/// Canonical form of a cell value before it is composed into a parameter
pub fn normalize_value(value: &str, options: ValueOptions) -> String {
    let folded = collapse_whitespace(&fold_diacritics(value));
    if options.lowercase {
        folded.to_lowercase()
    } else {
        folded
    }
}

/// Replace every whitespace run with `replacement`
pub fn replace_whitespace(value: &str, replacement: char) -> String {
    let mut buf = [0u8; 4];
    let replacement: &str = replacement.encode_utf8(&mut buf);
    value.split_whitespace().collect::<Vec<_>>().join(replacement)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_ignore_case_accents_and_spacing() {
        assert_eq!(normalize_key("Campaña  Name"), "campana name");
        assert_eq!(normalize_key("  CAMPANA NAME "), "campana name");
        assert_eq!(normalize_key("Été"), "ete");
    }

    #[test]
    fn values_keep_case_unless_asked() {
        let keep = ValueOptions::default();
        let lower = ValueOptions { lowercase: true };
        assert_eq!(normalize_value("  Black   Friday ", keep), "Black Friday");
        assert_eq!(normalize_value("Noël Promo", lower), "noel promo");
    }

    #[test]
    fn whitespace_runs_become_one_replacement() {
        assert_eq!(replace_whitespace("black \t friday sale", '-'), "black-friday-sale");
        assert_eq!(replace_whitespace("single", '-'), "single");
        assert_eq!(replace_whitespace("", '-'), "");
    }
}
