//! Sentence-level text helpers.

/// Extract the first sentence from text without breaking URLs or
/// abbreviations.
///
/// A `.`, `!` or `?` only terminates a sentence when it sits at the end of
/// the text or is followed by whitespace, and the token before it is neither
/// a URL fragment nor a single capital-letter abbreviation ("U.", "S.").
/// When no terminator qualifies, the whole trimmed text is returned.
pub fn first_sentence(text: &str) -> String {
    let txt = text.trim();

    for (pos, ch) in txt.char_indices() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        let end = pos + ch.len_utf8();
        if let Some(next) = txt[end..].chars().next() {
            if !next.is_whitespace() {
                continue;
            }
        }
        let candidate = txt[..end].trim();
        if candidate.is_empty() {
            continue;
        }
        let last_token = candidate.split_whitespace().last().unwrap_or("");
        if last_token.starts_with("http") {
            continue;
        }
        if is_capital_abbreviation(last_token) {
            continue;
        }
        return candidate.to_string();
    }

    txt.to_string()
}

/// "X." style single capital-letter abbreviations.
fn is_capital_abbreviation(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(first), Some('.'), None) if first.is_ascii_uppercase()
    )
}
