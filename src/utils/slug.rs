//! Slug generation and uniqueness resolution.
//!
//! [`generate_base`] turns a display name into a normalized, URL-safe
//! identifier; [`resolve_unique`] probes the storage layer for collisions
//! and suffixes a counter until the candidate is free. Probing is
//! check-then-act, so the storage unique index stays the authoritative
//! guard — a commit-time conflict means "probe again", not "give up".

use serde_json::json;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::error::AppError;

/// Generates the normalized base slug for a display name.
///
/// # Normalization Rules
///
/// 1. Lowercase.
/// 2. Cyrillic letters transliterated through a fixed character table.
/// 3. Remaining text NFD-decomposed with combining marks stripped, so
///    accented Latin letters lose their diacritics.
/// 4. Characters outside `[a-z0-9]`, whitespace, and `-` are dropped.
/// 5. Whitespace and hyphen runs collapse to a single `-`; leading and
///    trailing hyphens are trimmed.
///
/// # Errors
///
/// Returns [`AppError::Validation`] when the input is empty, blank, or
/// normalizes to nothing (e.g. a name made only of punctuation). Callers
/// must reject the command instead of resolving uniqueness for an empty
/// base.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(generate_base("Happy  Paws!").unwrap(), "happy-paws");
/// assert_eq!(generate_base("Притулок Сірко").unwrap(), "prytulok-sirko");
/// ```
pub fn generate_base(name: &str) -> Result<String, AppError> {
    if name.trim().is_empty() {
        return Err(AppError::bad_request(
            "Name must not be empty",
            json!({ "name": name }),
        ));
    }

    let mut transliterated = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        match transliterate_cyrillic(c) {
            Some(latin) => transliterated.push_str(latin),
            None => transliterated.push(c),
        }
    }

    let mut slug = String::with_capacity(transliterated.len());
    let mut pending_hyphen = false;
    for c in transliterated.nfd().filter(|c| !is_combining_mark(*c)) {
        match c {
            'a'..='z' | '0'..='9' => {
                if pending_hyphen && !slug.is_empty() {
                    slug.push('-');
                }
                pending_hyphen = false;
                slug.push(c);
            }
            '-' => pending_hyphen = true,
            c if c.is_whitespace() => pending_hyphen = true,
            _ => {}
        }
    }

    if slug.is_empty() {
        return Err(AppError::bad_request(
            "Name does not contain any sluggable characters",
            json!({ "name": name }),
        ));
    }

    Ok(slug)
}

/// Resolves a free slug by probing `base`, then `base-1`, `base-2`, ….
///
/// `exists` is typically a closure over a repository's
/// `slug_exists(candidate, exclude_id)`; update paths must exclude the
/// record being renamed so self-collision is not a collision. Terminates
/// because the row set is finite; collision depth is bounded in practice
/// by the number of same-named entities.
///
/// # Errors
///
/// Propagates any error returned by `exists`.
pub async fn resolve_unique<F, Fut>(base: &str, mut exists: F) -> Result<String, AppError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<bool, AppError>>,
{
    let mut candidate = base.to_string();
    let mut suffix = 0u32;

    while exists(candidate.clone()).await? {
        suffix += 1;
        candidate = format!("{base}-{suffix}");
    }

    Ok(candidate)
}

/// Fixed transliteration table for Cyrillic letters.
///
/// Ukrainian romanization, with the Russian-only letters folded in.
/// Lowercase input only; `generate_base` lowercases first.
fn transliterate_cyrillic(c: char) -> Option<&'static str> {
    let latin = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "h",
        'ґ' => "g",
        'д' => "d",
        'е' => "e",
        'є' => "ie",
        'ж' => "zh",
        'з' => "z",
        'и' => "y",
        'і' => "i",
        'ї' => "i",
        'й' => "i",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ь' => "",
        'ю' => "iu",
        'я' => "ia",
        'ё' => "e",
        'ъ' => "",
        'ы' => "y",
        'э' => "e",
        _ => return None,
    };
    Some(latin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_base_simple() {
        assert_eq!(generate_base("Happy Paws").unwrap(), "happy-paws");
    }

    #[test]
    fn test_generate_base_is_idempotent_on_input() {
        let first = generate_base("Fluffy Shelter").unwrap();
        let second = generate_base("Fluffy Shelter").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_base_strips_punctuation() {
        assert_eq!(generate_base("Happy Paws, Ltd.!").unwrap(), "happy-paws-ltd");
    }

    #[test]
    fn test_generate_base_collapses_whitespace() {
        assert_eq!(generate_base("  Happy \t  Paws  ").unwrap(), "happy-paws");
    }

    #[test]
    fn test_generate_base_collapses_hyphen_runs() {
        assert_eq!(generate_base("happy---paws").unwrap(), "happy-paws");
        assert_eq!(generate_base("happy - - paws").unwrap(), "happy-paws");
    }

    #[test]
    fn test_generate_base_trims_hyphens() {
        assert_eq!(generate_base("-happy paws-").unwrap(), "happy-paws");
    }

    #[test]
    fn test_generate_base_strips_diacritics() {
        assert_eq!(generate_base("Café Zoë").unwrap(), "cafe-zoe");
    }

    #[test]
    fn test_generate_base_transliterates_ukrainian() {
        assert_eq!(
            generate_base("Притулок Щасливі Лапи").unwrap(),
            "prytulok-shchaslyvi-lapy"
        );
    }

    #[test]
    fn test_generate_base_transliterates_soft_sign_to_nothing() {
        assert_eq!(generate_base("Кінь").unwrap(), "kin");
    }

    #[test]
    fn test_generate_base_mixed_scripts() {
        assert_eq!(generate_base("Shelter Дім 24").unwrap(), "shelter-dim-24");
    }

    #[test]
    fn test_generate_base_empty_is_invalid() {
        let result = generate_base("");
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[test]
    fn test_generate_base_blank_is_invalid() {
        let result = generate_base("   \t ");
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[test]
    fn test_generate_base_unsluggable_is_invalid() {
        let result = generate_base("!!! ???");
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_resolve_unique_no_collision() {
        let taken: HashSet<String> = HashSet::new();

        let slug = resolve_unique("fluffy-shelter", |candidate| {
            let taken = taken.clone();
            async move { Ok(taken.contains(&candidate)) }
        })
        .await
        .unwrap();

        assert_eq!(slug, "fluffy-shelter");
    }

    #[tokio::test]
    async fn test_resolve_unique_suffixes_past_collisions() {
        let taken: HashSet<String> = ["fluffy-shelter", "fluffy-shelter-1"]
            .into_iter()
            .map(String::from)
            .collect();

        let slug = resolve_unique("fluffy-shelter", |candidate| {
            let taken = taken.clone();
            async move { Ok(taken.contains(&candidate)) }
        })
        .await
        .unwrap();

        assert_eq!(slug, "fluffy-shelter-2");
    }

    #[tokio::test]
    async fn test_resolve_unique_skips_gaps() {
        let taken: HashSet<String> = ["barsik", "barsik-1", "barsik-2", "barsik-4"]
            .into_iter()
            .map(String::from)
            .collect();

        let slug = resolve_unique("barsik", |candidate| {
            let taken = taken.clone();
            async move { Ok(taken.contains(&candidate)) }
        })
        .await
        .unwrap();

        assert_eq!(slug, "barsik-3");
    }

    #[tokio::test]
    async fn test_resolve_unique_propagates_probe_errors() {
        let result = resolve_unique("fluffy", |_| async {
            Err(AppError::internal("probe failed", serde_json::json!({})))
        })
        .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }
}
