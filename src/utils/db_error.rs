//! Predicates over database errors for constraint-specific handling.

/// True when the error is a unique violation on one of the slug indexes.
///
/// The unique index is the authoritative guard behind the slug probe's
/// check-then-act window; services treat this as "re-probe", not failure.
pub fn is_unique_violation_on_slug(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(
        db_err.constraint(),
        Some("shelters_slug_key") | Some("animals_slug_key")
    )
}
