/// Slugs that collide with console routes and can never name an
/// organization or project.
pub const RESERVED_SLUGS: &[&str] = &["view", "new"];

pub const RESERVED_SLUG_MESSAGE: &str = "Slug is reserved";

pub fn validate_slug(slug: &str) -> Result<(), &'static str> {
    let is_valid = !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if is_valid {
        Ok(())
    } else {
        Err("Slug must be lowercase kebab-case")
    }
}

pub fn is_reserved_slug(slug: &str) -> bool {
    RESERVED_SLUGS.contains(&slug)
}

/// Derive a slug from a human-entered display name: lowercase, collapse
/// every run of non-alphanumeric characters into a single dash, trim the
/// ends.
pub fn derive_slug(name: &str) -> Result<String, &'static str> {
    let candidate = name.to_ascii_lowercase();

    let mut slug = String::new();
    let mut last_was_dash = false;

    for ch in candidate.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            slug.push(ch);
            last_was_dash = false;
        } else if !last_was_dash && !slug.is_empty() {
            slug.push('-');
            last_was_dash = true;
        }
    }

    let slug = slug.trim_matches('-').to_string();

    if slug.is_empty() {
        return Err("Name cannot be converted to a valid slug");
    }

    Ok(slug)
}
