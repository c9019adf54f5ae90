//! Alarm registry — named daily triggers evaluated once per tick.
//!
//! The registry owns an insertion-ordered collection of [`AlarmRecord`]s
//! and evaluates a wall-clock sample against each of them.  It is
//! intentionally decoupled from the clock and from persistence: the
//! caller samples the clock and passes a [`WallClock`] in, and fires are
//! delivered through the [`AlarmDelegate`] callback rather than an event
//! queue.  This makes the registry independently testable and reusable
//! across execution contexts.
//!
//! Single-threaded by design — the tick loop and the command layer must
//! serialise access.  The delegate is invoked synchronously and must not
//! mutate the registry it was called from.

use log::info;

use crate::app::ports::AlarmDelegate;

/// Maximum alarm-name length in bytes (32 on the wire, NUL included).
pub const MAX_NAME_LEN: usize = 31;

/// A wall-clock sample: hour-of-day and minute, as supplied by the
/// platform clock adapter once per evaluation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallClock {
    /// Hour of day, 0–23.
    pub hour: u8,
    /// Minute, 0–59.
    pub minute: u8,
}

impl WallClock {
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    /// Whether this sample falls in the midnight reset window.
    pub const fn is_midnight(self) -> bool {
        self.hour == 0 && self.minute == 0
    }
}

/// One scheduled daily trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmRecord {
    pub hour: u8,
    pub minute: u8,
    pub name: heapless::String<MAX_NAME_LEN>,
    /// Set once the alarm has fired for the current calendar day;
    /// cleared when the clock crosses midnight.  Never persisted.
    pub fired_today: bool,
}

impl AlarmRecord {
    /// Build a record with the fired flag cleared.
    ///
    /// `name` is clipped to [`MAX_NAME_LEN`] bytes; range validation of
    /// `hour`/`minute` is the command layer's job, not the record's.
    pub fn new(hour: u8, minute: u8, name: &str) -> Self {
        let mut clipped = heapless::String::new();
        // Cannot fail: clip_name bounds the input to capacity.
        let _ = clipped.push_str(clip_name(name));
        Self {
            hour,
            minute,
            name: clipped,
            fired_today: false,
        }
    }

    /// Signed minutes from `now` until this alarm's time today.
    /// Negative means the slot has already passed.
    pub fn minutes_until(&self, now: WallClock) -> i16 {
        let target = i16::from(self.hour) * 60 + i16::from(self.minute);
        let current = i16::from(now.hour) * 60 + i16::from(now.minute);
        target - current
    }
}

/// Clip a name to at most [`MAX_NAME_LEN`] bytes on a char boundary.
pub fn clip_name(name: &str) -> &str {
    if name.len() <= MAX_NAME_LEN {
        return name;
    }
    let mut end = MAX_NAME_LEN;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

/// The daily-alarm registry.
///
/// Insertion order is preserved; neither names nor times are required to
/// be unique.  Deletion by name removes the first match only.
pub struct AlarmRegistry {
    alarms: Vec<AlarmRecord>,
}

impl AlarmRegistry {
    pub fn new() -> Self {
        Self { alarms: Vec::new() }
    }

    /// Append a daily alarm, disarmed for today.
    ///
    /// Precondition: the caller has range-checked `hour`/`minute` and
    /// normalised `name`.  Out-of-range values are not rejected here —
    /// they simply never match a real clock sample and stay dormant.
    pub fn add(&mut self, hour: u8, minute: u8, name: &str) {
        let record = AlarmRecord::new(hour, minute, name);
        info!(
            "AlarmRegistry: added '{}' at {:02}:{:02}",
            record.name, hour, minute
        );
        self.alarms.push(record);
    }

    /// Remove the first alarm whose name matches exactly (byte equality).
    /// Returns whether a removal occurred.
    pub fn delete_by_name(&mut self, name: &str) -> bool {
        match self.alarms.iter().position(|a| a.name.as_str() == name) {
            Some(idx) => {
                let removed = self.alarms.remove(idx);
                info!(
                    "AlarmRegistry: removed '{}' ({:02}:{:02})",
                    removed.name, removed.hour, removed.minute
                );
                true
            }
            None => false,
        }
    }

    /// Read-only view of the alarms in insertion order.
    pub fn alarms(&self) -> &[AlarmRecord] {
        &self.alarms
    }

    /// Replace the whole collection (hydration from the persisted blob).
    pub fn install(&mut self, records: Vec<AlarmRecord>) {
        self.alarms = records;
    }

    pub fn len(&self) -> usize {
        self.alarms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alarms.is_empty()
    }

    /// Evaluate one clock sample against every alarm, in order.
    ///
    /// Per record the two branches are mutually exclusive within one
    /// call: an armed alarm whose time matches fires (and is marked
    /// fired for the day); otherwise a 00:00 sample clears the fired
    /// flag.  The fire check runs first, so an alarm scheduled at 00:00
    /// fires on the midnight tick instead of being reset by it; it
    /// re-arms on a later tick inside the 00:00 minute or at the next
    /// midnight.  Repeated calls within the same minute are idempotent
    /// with respect to firing.
    pub fn evaluate(&mut self, now: WallClock, delegate: &mut dyn AlarmDelegate) {
        for alarm in &mut self.alarms {
            if !alarm.fired_today && now.hour == alarm.hour && now.minute == alarm.minute {
                alarm.fired_today = true;
                delegate.on_alarm_fired(&alarm.name, now);
            } else if now.is_midnight() {
                alarm.fired_today = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test delegate that records every fire.
    struct RecordingDelegate {
        fires: Vec<(String, WallClock)>,
    }

    impl RecordingDelegate {
        fn new() -> Self {
            Self { fires: Vec::new() }
        }
    }

    impl AlarmDelegate for RecordingDelegate {
        fn on_alarm_fired(&mut self, name: &str, now: WallClock) {
            self.fires.push((name.to_string(), now));
        }
    }

    #[test]
    fn fires_at_most_once_per_day() {
        let mut reg = AlarmRegistry::new();
        let mut delegate = RecordingDelegate::new();
        reg.add(7, 0, "wake");

        for _ in 0..5 {
            reg.evaluate(WallClock::new(7, 0), &mut delegate);
        }
        assert_eq!(delegate.fires.len(), 1);
        assert_eq!(delegate.fires[0].0, "wake");

        // Midnight re-arms, then 07:00 fires again.
        reg.evaluate(WallClock::new(0, 0), &mut delegate);
        assert_eq!(delegate.fires.len(), 1);
        reg.evaluate(WallClock::new(7, 0), &mut delegate);
        assert_eq!(delegate.fires.len(), 2);
    }

    #[test]
    fn midnight_reset_is_idempotent() {
        let mut reg = AlarmRegistry::new();
        let mut delegate = RecordingDelegate::new();
        reg.add(7, 0, "wake");

        reg.evaluate(WallClock::new(7, 0), &mut delegate);
        for _ in 0..3 {
            reg.evaluate(WallClock::new(0, 0), &mut delegate);
        }
        // Only the 07:00 fire; midnight never fires a 07:00 alarm.
        assert_eq!(delegate.fires.len(), 1);
        assert!(!reg.alarms()[0].fired_today);
    }

    #[test]
    fn alarm_at_midnight_fires_on_midnight_tick() {
        let mut reg = AlarmRegistry::new();
        let mut delegate = RecordingDelegate::new();
        reg.add(0, 0, "midnight");

        // Fire branch wins over the reset branch on the 00:00 tick.
        reg.evaluate(WallClock::new(0, 0), &mut delegate);
        assert_eq!(delegate.fires.len(), 1);
        assert!(reg.alarms()[0].fired_today);

        // The next 00:00 tick takes the reset branch and re-arms it...
        reg.evaluate(WallClock::new(0, 0), &mut delegate);
        assert_eq!(delegate.fires.len(), 1);
        assert!(!reg.alarms()[0].fired_today);

        // ...so a third 00:00 tick fires again.
        reg.evaluate(WallClock::new(0, 0), &mut delegate);
        assert_eq!(delegate.fires.len(), 2);
    }

    #[test]
    fn no_fire_outside_scheduled_minute() {
        let mut reg = AlarmRegistry::new();
        let mut delegate = RecordingDelegate::new();
        reg.add(8, 30, "water");

        reg.evaluate(WallClock::new(8, 29), &mut delegate);
        reg.evaluate(WallClock::new(8, 31), &mut delegate);
        reg.evaluate(WallClock::new(9, 30), &mut delegate);
        assert!(delegate.fires.is_empty());
    }

    #[test]
    fn delete_removes_first_match_only() {
        let mut reg = AlarmRegistry::new();
        reg.add(6, 0, "X");
        reg.add(18, 0, "X");

        assert!(reg.delete_by_name("X"));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.alarms()[0].hour, 18);

        assert!(reg.delete_by_name("X"));
        assert!(!reg.delete_by_name("X"));
        assert!(reg.is_empty());
    }

    #[test]
    fn delete_is_case_sensitive() {
        let mut reg = AlarmRegistry::new();
        reg.add(6, 0, "Morning");
        assert!(!reg.delete_by_name("morning"));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn insertion_order_preserved() {
        let mut reg = AlarmRegistry::new();
        reg.add(20, 0, "late");
        reg.add(6, 0, "early");
        let names: Vec<&str> = reg.alarms().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["late", "early"]);
    }

    #[test]
    fn record_name_is_clipped_on_char_boundary() {
        // 16 two-byte chars = 32 bytes; must clip to 30 (char boundary).
        let name = "é".repeat(16);
        let rec = AlarmRecord::new(7, 0, &name);
        assert_eq!(rec.name.len(), 30);
        assert!(rec.name.as_str().chars().all(|c| c == 'é'));
    }

    #[test]
    fn minutes_until_signed() {
        let rec = AlarmRecord::new(8, 30, "water");
        assert_eq!(rec.minutes_until(WallClock::new(7, 0)), 90);
        assert_eq!(rec.minutes_until(WallClock::new(8, 30)), 0);
        assert_eq!(rec.minutes_until(WallClock::new(10, 0)), -90);
    }

    #[test]
    fn out_of_range_alarm_is_dormant() {
        let mut reg = AlarmRegistry::new();
        let mut delegate = RecordingDelegate::new();
        // The registry trusts its caller; 25:99 is accepted but can
        // never match a real clock sample.
        reg.add(25, 99, "dormant");
        for h in 0..24u8 {
            for m in 0..60u8 {
                reg.evaluate(WallClock::new(h, m), &mut delegate);
            }
        }
        assert!(delegate.fires.is_empty());
    }
}
