use chrono::{DateTime, Utc};
use rand::{distributions::Alphanumeric, thread_rng, Rng};

/// Generates the storage key of an upload:
/// `YYYYMMDDHHMMSS-<sanitized file stem><extension>`.
pub fn asset_key(file_name: &str, now: DateTime<Utc>) -> String {
    let base_name = base_name(file_name);
    let extension = file_extension(base_name);
    let stem = &base_name[..base_name.len() - extension.len()];

    let mut stem = sanitize(stem);
    if stem.is_empty() {
        stem.push_str("upload");
    }

    format!("{}-{}{}", now.format("%Y%m%d%H%M%S"), stem, extension)
}

/// The extension of `file_name` including its leading dot, or an empty string.
/// Only short alphanumeric extensions count.
pub fn file_extension(file_name: &str) -> &str {
    let base_name = base_name(file_name);
    match base_name.rfind('.') {
        Some(0) | None => "",
        Some(dot) => {
            let extension = &base_name[dot + 1..];
            let valid = !extension.is_empty()
                && extension.len() <= 8
                && extension.chars().all(|c| c.is_ascii_alphanumeric());
            if valid {
                &base_name[dot..]
            } else {
                ""
            }
        }
    }
}

/// Inserts a random alphanumeric suffix before the extension of `key`.
pub fn with_random_suffix(key: &str, length: usize) -> String {
    let rng = thread_rng();

    let suffix: String = rng
        .sample_iter(Alphanumeric)
        .take(length)
        .map(char::from)
        .collect();

    let extension = file_extension(key);
    let stem = &key[..key.len() - extension.len()];
    format!("{}-{}{}", stem, suffix, extension)
}

// Clients may send full paths as the file name
fn base_name(file_name: &str) -> &str {
    file_name
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(file_name)
}

fn sanitize(stem: &str) -> String {
    let sanitized: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    sanitized.trim_matches('_').to_owned()
}
