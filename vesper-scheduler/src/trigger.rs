use chrono::{DateTime, Local, NaiveDate, TimeZone};

/// Detects a daily wall-clock boundary crossing. Fires at most once per
/// calendar day, the first time it observes the local hour at or past the
/// configured trigger
/// hour — so a process that was asleep through several missed boundaries
/// only fires once when it next checks in, instead of once per missed day.
pub struct DailyTrigger {
    trigger_hour: u32,
    last_fired: Option<NaiveDate>,
}

impl DailyTrigger {
    pub fn new(trigger_hour: u32) -> Self {
        Self { trigger_hour, last_fired: None }
    }

    /// Returns `true` exactly once per calendar day, the first time `now`'s
    /// local hour is at or past `trigger_hour`.
    pub fn check_and_arm<Tz: TimeZone>(&mut self, now: DateTime<Tz>) -> bool {
        use chrono::Timelike;
        let today = now.date_naive();
        let past_boundary = now.hour() >= self.trigger_hour;
        if past_boundary && self.last_fired != Some(today) {
            self.last_fired = Some(today);
            return true;
        }
        false
    }
}

impl Default for DailyTrigger {
    fn default() -> Self {
        Self::new(vesper_core::constants::CONSOLIDATION_HOUR_UTC_LOCAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 1, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn does_not_fire_before_the_boundary() {
        let mut trigger = DailyTrigger::new(3);
        assert!(!trigger.check_and_arm(at(1, 2)));
    }

    #[test]
    fn fires_once_at_the_boundary() {
        let mut trigger = DailyTrigger::new(3);
        assert!(trigger.check_and_arm(at(1, 3)));
    }

    #[test]
    fn does_not_refire_later_the_same_day() {
        let mut trigger = DailyTrigger::new(3);
        assert!(trigger.check_and_arm(at(1, 3)));
        assert!(!trigger.check_and_arm(at(1, 10)));
        assert!(!trigger.check_and_arm(at(1, 23)));
    }

    #[test]
    fn fires_again_the_next_day() {
        let mut trigger = DailyTrigger::new(3);
        assert!(trigger.check_and_arm(at(1, 3)));
        assert!(trigger.check_and_arm(at(2, 4)));
    }

    #[test]
    fn coalesces_several_missed_days_into_one_fire() {
        let mut trigger = DailyTrigger::new(3);
        // Process was asleep through days 1-4; wakes on day 5 past the boundary.
        assert!(trigger.check_and_arm(at(5, 9)));
        // The next poll tick the same day must not refire.
        assert!(!trigger.check_and_arm(at(5, 10)));
    }
}
