//! Rating rules applied when books are taken and returned.

use crate::domain::entities::ReservationStatus;

/// Domain service for the rental limit and return penalties.
pub struct RatingPolicy;

impl RatingPolicy {
    /// Points deducted per violation found on return.
    pub const PENALTY_POINTS: i32 = 10;

    /// Points awarded for a clean return.
    pub const CLEAN_RETURN_BONUS: i32 = 1;

    /// Whether a user holding `rented` books may take another one.
    pub fn can_take(rented: usize, stars: i32) -> bool {
        // A negative rating blocks every rental.
        i64::try_from(rented).map_or(false, |rented| rented < i64::from(stars))
    }

    /// Penalty for a return: one deduction for a changed condition and one
    /// for an overdue reservation. Deductions add up without a cap.
    pub fn penalty(condition_changed: bool, status: ReservationStatus) -> i32 {
        let mut penalty = 0;

        if condition_changed {
            penalty += Self::PENALTY_POINTS;
        }

        if status == ReservationStatus::Expired {
            penalty += Self::PENALTY_POINTS;
        }

        penalty
    }

    /// Rating after a return. No floor is applied.
    pub fn next_stars(stars: i32, penalty: i32) -> i32 {
        if penalty == 0 {
            stars.saturating_add(Self::CLEAN_RETURN_BONUS)
        } else {
            stars.saturating_sub(penalty)
        }
    }
}
