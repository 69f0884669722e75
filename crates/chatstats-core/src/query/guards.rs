//! Shared guardrails for query payload bounds.

pub const MAX_TOP_N: usize = 1000;
pub const MAX_KEYWORDS: usize = 64;
pub const MAX_KEYWORD_LENGTH: usize = 256;
pub const MAX_WORKERS: usize = 64;

pub fn clamp_int(value: usize, minimum: usize, maximum: usize) -> usize {
    value.max(minimum).min(maximum)
}

pub fn clamp_limit(value: usize, maximum: usize) -> usize {
    clamp_int(value, 1, maximum)
}

pub fn clamp_workers(value: usize) -> usize {
    clamp_int(value, 1, MAX_WORKERS)
}

/// Trim a keyword and cut it to `MAX_KEYWORD_LENGTH` bytes on a char boundary.
pub fn truncate_keyword(keyword: &str) -> String {
    let stripped = keyword.trim();
    if stripped.len() <= MAX_KEYWORD_LENGTH {
        return stripped.to_string();
    }
    let mut end = MAX_KEYWORD_LENGTH;
    while !stripped.is_char_boundary(end) {
        end -= 1;
    }
    stripped[..end].to_string()
}

/// Trimmed, non-empty, de-duplicated keywords in first-seen order, capped at
/// `MAX_KEYWORDS`.
pub fn normalize_keywords<S: AsRef<str>>(keywords: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for keyword in keywords {
        let keyword = truncate_keyword(keyword.as_ref());
        if keyword.is_empty() || out.contains(&keyword) {
            continue;
        }
        out.push(keyword);
        if out.len() == MAX_KEYWORDS {
            break;
        }
    }
    out
}
