// src/core/sanitize.rs

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// `"Enabled by default:"` → `"Enabled by default"`.
pub fn clean_label(s: &str) -> String {
    normalize_ws(s).trim_end_matches(':').trim_end().to_string()
}

/// Human label → camelCase key.
/// First word lower-cased, every later word gets an upper-cased first letter
/// and keeps the rest verbatim: `"Minimum Swift compiler version"` →
/// `"minimumSwiftCompilerVersion"`.
pub fn label_to_key(label: &str) -> String {
    let mut words = label.split_whitespace();
    let mut key = match words.next() {
        Some(first) => first.to_lowercase(),
        None => return s!(),
    };
    for word in words {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            key.extend(first.to_uppercase());
            key.push_str(chars.as_str());
        }
    }
    key
}
