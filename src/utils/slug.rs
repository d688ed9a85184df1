use rand::distr::Alphanumeric;
use rand::Rng;

/// Derive a URL slug from a listing title: lowercase, runs of
/// non-alphanumeric characters collapsed to single hyphens, no leading or
/// trailing hyphen.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Slug for a new listing. A symbol-only title slugifies to nothing, which
/// would collide with every other empty slug in the agency; fall back to a
/// generated one instead.
pub fn property_slug(title: &str) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        format!("property-{}", random_suffix(5))
    } else {
        slug
    }
}

/// Short lowercase alphanumeric suffix appended when a slug collides within
/// an agency.
pub fn random_suffix(length: usize) -> String {
    let rng = rand::rng();
    rng.sample_iter(Alphanumeric)
        .take(length)
        .map(|byte| (byte as char).to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Stunning 3 Bed Home"), "stunning-3-bed-home");
    }

    #[test]
    fn slugify_collapses_symbol_runs() {
        assert_eq!(slugify("  Quay St. -- Harbour View!!  "), "quay-st-harbour-view");
    }

    #[test]
    fn slugify_drops_edge_hyphens() {
        assert_eq!(slugify("...Penthouse..."), "penthouse");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn symbol_only_titles_get_a_generated_slug() {
        let slug = property_slug("!!!!!");
        assert!(slug.starts_with("property-"));
        assert_eq!(slug.len(), "property-".len() + 5);

        assert_eq!(property_slug("Seafront Cottage"), "seafront-cottage");
    }

    #[test]
    fn random_suffix_is_lowercase_alphanumeric() {
        let suffix = random_suffix(5);
        assert_eq!(suffix.len(), 5);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }
}
