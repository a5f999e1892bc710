//! Conflict detection strategy registry: each strategy inspects a fact pair
//! and returns a conflict if its pattern matches, in order of specificity —
//! first match wins.

use vesper_core::models::{ConflictType, Fact, Severity};

pub struct Detection {
    pub conflict_type: ConflictType,
    pub description: String,
    pub severity: Severity,
}

/// Preference shift: on a `preference`-typed entity, a newer
/// fact overriding an older one on the same property is a shift, never a
/// contradiction — the caller is expected to treat the newer value as the
/// live preference.
fn preference_shift(entity_is_preference: bool, a: &Fact, b: &Fact) -> Option<Detection> {
    if !entity_is_preference || a.property != b.property || a.value == b.value {
        return None;
    }
    let (older, newer) = order_by_recency(a, b)?;
    Some(Detection {
        conflict_type: ConflictType::PreferenceShift,
        description: format!("preference for '{}' shifted from '{}' to '{}'", older.property, older.value, newer.value),
        severity: Severity::Low,
    })
}

/// Contradiction: same entity/property, different values, both
/// still open-ended (no `valid_until`) — they cannot both be currently true.
fn contradiction(a: &Fact, b: &Fact) -> Option<Detection> {
    if a.property != b.property || a.value == b.value {
        return None;
    }
    if !a.is_open_ended() || !b.is_open_ended() {
        return None;
    }
    Some(Detection {
        conflict_type: ConflictType::Contradiction,
        description: format!("'{}' holds both '{}' and '{}' with no end to either", a.property, a.value, b.value),
        severity: Severity::High,
    })
}

/// Temporal: same entity/property, different values, validity
/// intervals overlap (whether or not either is open-ended).
fn temporal(a: &Fact, b: &Fact) -> Option<Detection> {
    if a.property != b.property || a.value == b.value {
        return None;
    }
    if !a.overlaps(b) {
        return None;
    }
    Some(Detection {
        conflict_type: ConflictType::Temporal,
        description: format!("'{}' values '{}' and '{}' have overlapping validity windows", a.property, a.value, b.value),
        severity: Severity::Medium,
    })
}

fn order_by_recency<'a>(a: &'a Fact, b: &'a Fact) -> Option<(&'a Fact, &'a Fact)> {
    let a_ts = a.valid_from?;
    let b_ts = b.valid_from?;
    if a_ts == b_ts {
        return None;
    }
    if a_ts < b_ts {
        Some((a, b))
    } else {
        Some((b, a))
    }
}

/// Run every strategy against a fact pair in order of specificity, returning
/// the first match (one conflict per unordered pair).
pub fn detect_all(entity_is_preference: bool, a: &Fact, b: &Fact) -> Option<Detection> {
    preference_shift(entity_is_preference, a, b)
        .or_else(|| contradiction(a, b))
        .or_else(|| temporal(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vesper_core::models::Fact;

    fn fact(property: &str, value: &str) -> Fact {
        Fact::new("default", uuid::Uuid::new_v4(), property, value)
    }

    #[test]
    fn two_open_ended_facts_on_same_property_contradict() {
        let a = fact("favorite_color", "blue");
        let mut b = fact("favorite_color", "green");
        b.entity_id = a.entity_id;

        let detection = detect_all(false, &a, &b).unwrap();
        assert_eq!(detection.conflict_type, ConflictType::Contradiction);
    }

    #[test]
    fn preference_entity_yields_shift_not_contradiction() {
        let mut a = fact("favorite_color", "blue");
        a.valid_from = Some(chrono::Utc::now() - chrono::Duration::days(10));
        let mut b = fact("favorite_color", "green");
        b.entity_id = a.entity_id;

        let detection = detect_all(true, &a, &b).unwrap();
        assert_eq!(detection.conflict_type, ConflictType::PreferenceShift);
    }

    #[test]
    fn identical_values_never_conflict() {
        let a = fact("favorite_color", "blue");
        let mut b = fact("favorite_color", "blue");
        b.entity_id = a.entity_id;
        assert!(detect_all(false, &a, &b).is_none());
    }
}
