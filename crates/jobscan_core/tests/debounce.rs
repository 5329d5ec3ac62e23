use std::time::{Duration, Instant};

use jobscan_core::{DebounceDelays, DebounceTimer, TriggerSource};

#[test]
fn fires_once_after_deadline() {
    let start = Instant::now();
    let mut timer = DebounceTimer::new();
    timer.arm(start, Duration::from_millis(500), TriggerSource::ContentChanged);

    assert_eq!(timer.fire(start + Duration::from_millis(499)), None);
    assert_eq!(
        timer.fire(start + Duration::from_millis(500)),
        Some(TriggerSource::ContentChanged)
    );
    assert_eq!(timer.fire(start + Duration::from_secs(5)), None);
    assert!(!timer.is_pending());
}

#[test]
fn rearming_restarts_the_quiet_period() {
    let start = Instant::now();
    let mut timer = DebounceTimer::new();
    timer.arm(start, Duration::from_millis(500), TriggerSource::ContentChanged);
    timer.arm(
        start + Duration::from_millis(300),
        Duration::from_millis(500),
        TriggerSource::TabActivated,
    );

    assert_eq!(timer.fire(start + Duration::from_millis(600)), None);
    assert_eq!(
        timer.deadline(),
        Some(start + Duration::from_millis(800))
    );
    assert_eq!(
        timer.fire(start + Duration::from_millis(800)),
        Some(TriggerSource::TabActivated)
    );
}

#[test]
fn cancel_drops_pending_deadline() {
    let start = Instant::now();
    let mut timer = DebounceTimer::new();
    timer.arm(start, Duration::from_millis(10), TriggerSource::TabLoaded);
    timer.cancel();
    assert_eq!(timer.fire(start + Duration::from_secs(1)), None);
}

#[test]
fn default_delays_per_source() {
    let delays = DebounceDelays::default();
    assert_eq!(
        delays.for_source(TriggerSource::TabActivated),
        Duration::from_millis(500)
    );
    assert_eq!(
        delays.for_source(TriggerSource::TabLoaded),
        Duration::from_millis(1000)
    );
    assert_eq!(
        delays.for_source(TriggerSource::ContentChanged),
        Duration::from_millis(500)
    );
}

#[test]
fn shorter_trigger_replaces_longer_pending_deadline() {
    let start = Instant::now();
    let delays = DebounceDelays::default();
    let mut timer = DebounceTimer::new();
    timer.arm(start, delays.tab_loaded, TriggerSource::TabLoaded);
    timer.arm(
        start + Duration::from_millis(100),
        delays.content_changed,
        TriggerSource::ContentChanged,
    );

    assert_eq!(timer.deadline(), Some(start + Duration::from_millis(600)));
    assert_eq!(
        timer.fire(start + Duration::from_millis(600)),
        Some(TriggerSource::ContentChanged)
    );
    assert_eq!(timer.fire(start + Duration::from_millis(1000)), None);
}
