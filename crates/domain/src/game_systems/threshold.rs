//! Buildup threshold arithmetic.

/// Base bonus plus one per escalation tier plus the manual offset.
pub fn effective_bonus(base_bonus: i64, escalations: u32, pb_offset: i32) -> i64 {
    base_bonus
        .saturating_add(i64::from(escalations))
        .saturating_add(i64::from(pb_offset))
}

/// `ability_score * max(1, effective_bonus)`.
///
/// The bonus never counts for less than 1, so a heavily negative offset
/// cannot produce a zero or negative threshold.
pub fn threshold(ability_score: i64, base_bonus: i64, escalations: u32, pb_offset: i32) -> i64 {
    let bonus = effective_bonus(base_bonus, escalations, pb_offset).max(1);
    ability_score.saturating_mul(bonus)
}
