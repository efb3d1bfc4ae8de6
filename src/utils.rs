// src/utils.rs
use anyhow::Result;

/// Normalize a template id for lookup
pub fn normalize_template_id(id: &str) -> String {
    id.trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            ' ' | '_' => '-',
            c => c,
        })
        .collect()
}

/// URL-safe slug: lowercase ASCII alphanumerics separated by single dashes
pub fn slugify(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Filesystem-safe name: letters and digits (any script) are kept, whitespace
/// becomes `_`, everything else is dropped.
pub fn sanitize_filename(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() || c == '_' {
                Some(c)
            } else if c.is_whitespace() {
                Some('_')
            } else {
                None
            }
        })
        .collect()
}

/// Accept a CSS color in hex, rgb()/rgba() or plain named form.
/// Anything else returns `None` so callers can keep their default.
pub fn sanitize_color(value: &str) -> Option<String> {
    let value = value.trim();

    if let Some(hex) = value.strip_prefix('#') {
        let valid_len = matches!(hex.len(), 3 | 4 | 6 | 8);
        if valid_len && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Some(format!("#{}", hex.to_lowercase()));
        }
        return None;
    }

    let lower = value.to_lowercase();
    for prefix in ["rgba(", "rgb("] {
        if let Some(inner) = lower.strip_prefix(prefix).and_then(|r| r.strip_suffix(')')) {
            let valid = inner
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | ' ' | '%'));
            return if valid && !inner.trim().is_empty() {
                Some(lower)
            } else {
                None
            };
        }
    }

    if !lower.is_empty() && lower.len() <= 24 && lower.chars().all(|c| c.is_ascii_lowercase()) {
        return Some(lower);
    }

    None
}

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Validate file extension against allowed types
pub fn validate_file_extension(filename: &str, allowed: &[&str]) -> Result<()> {
    let ext = get_file_extension(filename)
        .ok_or_else(|| anyhow::anyhow!("File has no extension: {}", filename))?;

    if !allowed.contains(&ext.as_str()) {
        anyhow::bail!(
            "Unsupported file extension: {}. Allowed: {:?}",
            ext,
            allowed
        );
    }

    Ok(())
}
