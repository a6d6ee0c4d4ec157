//! Incremental maintenance of the shelter rating aggregate.
//!
//! Pure recomputation of a running `(average, count)` pair. The caller
//! persists the returned pair in the same commit that inserts or removes
//! the feedback row itself.

/// Folds one new rating into the running aggregate.
///
/// Defined for `current_count == 0`: the result is `(new_rating, 1)`.
pub fn apply_add(current_avg: f64, current_count: i32, new_rating: f64) -> (f64, i32) {
    let new_count = current_count + 1;
    let new_avg = (current_avg * f64::from(current_count) + new_rating) / f64::from(new_count);
    (new_avg, new_count)
}

/// Removes one rating from the running aggregate.
///
/// The count floors at zero and an empty aggregate resets to `0.0`. The
/// numerator clamp guards against floating-point drift producing a
/// negative sum after repeated add/remove cycles.
pub fn apply_remove(current_avg: f64, current_count: i32, removed_rating: f64) -> (f64, i32) {
    let new_count = (current_count - 1).max(0);
    if new_count == 0 {
        return (0.0, 0);
    }

    let numerator = (current_avg * f64::from(current_count) - removed_rating).max(0.0);
    (numerator / f64::from(new_count), new_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_add_zero_to_one_transition() {
        let (avg, count) = apply_add(0.0, 0, 4.0);
        assert!((avg - 4.0).abs() < EPS);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_add_concrete_scenario() {
        // ratings 2 and 4 -> avg 3.0, count 2; adding 5 -> 11/3
        let (avg, count) = apply_add(3.0, 2, 5.0);
        assert!((avg - 11.0 / 3.0).abs() < EPS);
        assert_eq!(count, 3);
    }

    #[test]
    fn test_remove_concrete_scenario() {
        // ratings 2, 4, 5 -> avg 11/3, count 3; removing 2 -> (4.5, 2)
        let (avg, count) = apply_remove(11.0 / 3.0, 3, 2.0);
        assert!((avg - 4.5).abs() < EPS);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_remove_last_rating_resets_to_zero() {
        let (avg, count) = apply_remove(4.0, 1, 4.0);
        assert_eq!(avg, 0.0);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_remove_from_empty_stays_empty() {
        let (avg, count) = apply_remove(0.0, 0, 3.0);
        assert_eq!(avg, 0.0);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_remove_clamps_negative_numerator() {
        // Drifted state where the removal would push the sum below zero.
        let (avg, count) = apply_remove(1.0, 2, 4.0);
        assert!(avg >= 0.0);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_add_remove_round_trip_restores_initial_pair() {
        let ratings = [5.0, 1.0, 3.5, 4.0, 2.0];

        let (mut avg, mut count) = (3.0, 2);
        let initial = (avg, count);

        for r in ratings {
            (avg, count) = apply_add(avg, count, r);
        }
        for r in ratings.iter().rev() {
            (avg, count) = apply_remove(avg, count, *r);
        }

        assert!((avg - initial.0).abs() < 1e-6);
        assert_eq!(count, initial.1);
    }

    #[test]
    fn test_count_never_negative_under_excess_removes() {
        let (mut avg, mut count) = (4.0, 1);
        for _ in 0..5 {
            (avg, count) = apply_remove(avg, count, 4.0);
            assert!(count >= 0);
            assert!(avg >= 0.0);
        }
    }
}
