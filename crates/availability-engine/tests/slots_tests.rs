//! Tests for slot generation and same-day truncation.

use chrono::NaiveDateTime;
use availability_engine::interval::TimeWindow;
use availability_engine::slots::{candidate_starts, drop_elapsed, generate_slots, SlotMinutes};
use availability_engine::{AvailabilityError, CalendarDate, ClockTime, EngineConfig};

fn window(start: &str, end: &str) -> TimeWindow {
    TimeWindow::between(ClockTime::parse(start).unwrap(), ClockTime::parse(end).unwrap()).unwrap()
}

fn date(s: &str) -> CalendarDate {
    CalendarDate::parse(s).unwrap()
}

fn at(s: &str) -> NaiveDateTime {
    s.parse().unwrap()
}

fn hhmm(times: &[ClockTime]) -> Vec<String> {
    times.iter().map(|t| t.to_string()).collect()
}

#[test]
fn whole_window_is_cut_into_slots() {
    let slots = candidate_starts(window("09:00", "11:00"), SlotMinutes::new(30));
    assert_eq!(hhmm(&slots), ["09:00", "09:30", "10:00", "10:30"]);
}

#[test]
fn trailing_partial_slot_is_excluded() {
    let slots = candidate_starts(window("09:00", "09:50"), SlotMinutes::new(30));
    assert_eq!(hhmm(&slots), ["09:00"]);
}

#[test]
fn slot_longer_than_window_yields_nothing() {
    let slots = candidate_starts(window("09:00", "09:20"), SlotMinutes::new(30));
    assert!(slots.is_empty());
}

#[test]
fn window_ending_at_midnight_allows_last_slot() {
    let slots = candidate_starts(window("23:00", "23:59"), SlotMinutes::new(30));
    assert_eq!(hhmm(&slots), ["23:00"]);

    let full = candidate_starts(TimeWindow::new(23 * 60, 24 * 60).unwrap(), SlotMinutes::new(30));
    assert_eq!(hhmm(&full), ["23:00", "23:30"]);
}

#[test]
fn same_day_drops_slots_not_strictly_after_now() {
    let today = date("2026-03-16");
    let now = at("2026-03-16T14:32:00");
    let slots = generate_slots(window("13:00", "17:00"), SlotMinutes::new(30), today, now);
    assert_eq!(hhmm(&slots), ["15:00", "15:30", "16:00", "16:30"]);
}

#[test]
fn slot_starting_exactly_now_is_dropped() {
    let today = date("2026-03-16");
    let candidates = vec![ClockTime::parse("14:00").unwrap(), ClockTime::parse("14:30").unwrap()];
    let kept = drop_elapsed(today, candidates, at("2026-03-16T14:00:00"));
    assert_eq!(hhmm(&kept), ["14:30"]);
}

#[test]
fn other_dates_are_not_truncated() {
    let now = at("2026-03-16T14:32:00");
    let future = generate_slots(window("09:00", "10:00"), SlotMinutes::new(30), date("2026-03-17"), now);
    assert_eq!(hhmm(&future), ["09:00", "09:30"]);

    let past = generate_slots(window("09:00", "10:00"), SlotMinutes::new(30), date("2026-03-15"), now);
    assert_eq!(hhmm(&past), ["09:00", "09:30"]);
}

#[test]
fn slot_minutes_clamps_to_floor() {
    assert_eq!(SlotMinutes::new(1).get(), 5);
    assert_eq!(SlotMinutes::new(0).get(), 5);
    assert_eq!(SlotMinutes::new(45).get(), 45);
    assert_eq!(SlotMinutes::default().get(), 30);
}

#[test]
fn slot_minutes_parse_from_query_value() {
    let config = EngineConfig::default();
    assert_eq!(SlotMinutes::parse(None, &config).unwrap().get(), 30);
    assert_eq!(SlotMinutes::parse(Some(""), &config).unwrap().get(), 30);
    assert_eq!(SlotMinutes::parse(Some("15"), &config).unwrap().get(), 15);
    assert_eq!(SlotMinutes::parse(Some("2"), &config).unwrap().get(), 5);
    assert_eq!(SlotMinutes::parse(Some("-10"), &config).unwrap().get(), 5);
    assert!(matches!(
        SlotMinutes::parse(Some("abc"), &config),
        Err(AvailabilityError::InvalidInput(_))
    ));
    assert!(SlotMinutes::parse(Some("12.5"), &config).is_err());
}

#[test]
fn slot_minutes_parse_honors_config() {
    let config = EngineConfig {
        default_slot_minutes: 20,
        min_slot_minutes: 10,
        ..Default::default()
    };
    assert_eq!(SlotMinutes::parse(None, &config).unwrap().get(), 20);
    assert_eq!(SlotMinutes::parse(Some("5"), &config).unwrap().get(), 10);
}

#[test]
fn deserialized_slot_minutes_respect_floor() {
    let zero: SlotMinutes = serde_json::from_str("0").unwrap();
    assert_eq!(zero.get(), 5);
    let three: SlotMinutes = serde_json::from_str("3").unwrap();
    assert_eq!(candidate_starts(window("09:00", "10:00"), three).len(), 12);
    let hour: SlotMinutes = serde_json::from_str("60").unwrap();
    assert_eq!(serde_json::to_string(&hour).unwrap(), "60");
}

#[test]
fn deserialized_availability_clamps_slot_minutes() {
    let json = r#"{"date":"2026-03-16","slotMinutes":1,"times":[],"sourceKind":"None","holidayLabel":null,"holidayComment":null,"isOpenOverride":false}"#;
    let result: availability_engine::Availability = serde_json::from_str(json).unwrap();
    assert_eq!(result.slot_minutes.get(), 5);
}
