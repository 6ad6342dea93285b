//! Form input normalization

/// Trim and title-case a form value: `" north indian "` becomes `"North Indian"`.
///
/// A letter is upper-cased when it follows a non-letter and lower-cased
/// otherwise, so `"new-DELHI"` becomes `"New-Delhi"`.
pub fn normalize_input(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    let mut after_letter = false;

    for c in raw.trim().chars() {
        if c.is_alphabetic() {
            if after_letter {
                normalized.extend(c.to_lowercase());
            } else {
                normalized.extend(c.to_uppercase());
            }
            after_letter = true;
        } else {
            normalized.push(c);
            after_letter = false;
        }
    }

    normalized
}
