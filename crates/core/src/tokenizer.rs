// Column-name tokenizer - splits names on delimiters and case boundaries

use regex::Regex;

lazy_static::lazy_static! {
    static ref DELIMITERS: Regex = Regex::new(r"[_\-\s.]+").unwrap();
}

/// Split a column name into raw tokens.
///
/// Handles snake_case, kebab-case, dotted and spaced names, then
/// camelCase/PascalCase boundaries within each part, keeping acronym runs
/// together:
///
/// - `user_id` -> `user`, `id`
/// - `userCreatedAt` -> `user`, `Created`, `At`
/// - `TOTAL_AMT_USD` -> `TOTAL`, `AMT`, `USD`
/// - `HTTPStatusCode` -> `HTTP`, `Status`, `Code`
pub fn tokenize(column_name: &str) -> Vec<String> {
    if column_name.is_empty() {
        return Vec::new();
    }
    let mut tokens = Vec::new();
    for part in DELIMITERS.split(column_name) {
        split_case_boundaries(part, &mut tokens);
    }
    tokens
}

fn split_case_boundaries(part: &str, out: &mut Vec<String>) {
    let chars: Vec<char> = part.chars().collect();
    if chars.is_empty() {
        return;
    }
    let mut start = 0;
    for i in 1..chars.len() {
        let rising = chars[i].is_uppercase() && !chars[i - 1].is_uppercase();
        // End of an acronym run: the last uppercase belongs to the next word.
        let acronym_end = chars[i].is_uppercase()
            && chars[i - 1].is_uppercase()
            && chars.get(i + 1).is_some_and(|c| c.is_lowercase());
        if rising || acronym_end {
            out.push(chars[start..i].iter().collect());
            start = i;
        }
    }
    out.push(chars[start..].iter().collect());
}
