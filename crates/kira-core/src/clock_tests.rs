// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::TimeZone;

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap()
}

#[test]
fn fake_clock_auto_advances() {
    let clock = FakeClock::new(epoch());
    let a = clock.now_utc();
    let b = clock.now_utc();
    assert!(b > a);
}

#[test]
fn frozen_clock_does_not_advance() {
    let clock = FakeClock::frozen(epoch());
    let a = clock.now_utc();
    let b = clock.now_utc();
    assert_eq!(a, b);
}

#[test]
fn advance_moves_clock_forward() {
    let clock = FakeClock::frozen(epoch());
    clock.advance(chrono::Duration::hours(1));
    assert_eq!(clock.now_utc(), epoch() + chrono::Duration::hours(1));
}

#[test]
fn set_overrides_clock() {
    let clock = FakeClock::frozen(epoch());
    let target = epoch() + chrono::Duration::days(3);
    clock.set(target);
    assert_eq!(clock.now_utc(), target);
}

#[test]
fn system_clock_returns_real_time() {
    let clock = SystemClock;
    let before = Utc::now();
    let now = clock.now_utc();
    assert!(now >= before);
}

#[test]
fn fake_clock_is_shared_across_clones() {
    let clock = FakeClock::frozen(epoch());
    let clone = clock.clone();
    clone.advance(chrono::Duration::seconds(5));
    assert_eq!(clock.now_utc(), epoch() + chrono::Duration::seconds(5));
}
