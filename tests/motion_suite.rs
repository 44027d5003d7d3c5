use std::time::{Duration, Instant};

use loop_gallery::gallery::{
    AutoplayScheduler, IdleTimer, PlaybackMode, VelocityIntegrator, NOMINAL_STEP,
};

fn scheduler() -> AutoplayScheduler {
    AutoplayScheduler::new(Duration::from_millis(3000), Duration::from_secs(1))
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

// ── Velocity integrator ────────────────────────────────────────────────────

#[test]
fn rest_stays_at_rest_without_autoplay() {
    let mut v = VelocityIntegrator::new(0.95, 0.3);
    for _ in 0..60 {
        assert_eq!(v.tick(NOMINAL_STEP, false), 0.0);
    }
}

#[test]
fn impulse_lands_on_next_tick_and_is_damped_once_per_nominal_step() {
    let mut v = VelocityIntegrator::new(0.95, 0.3);
    v.apply_impulse(1.0);
    assert_eq!(v.velocity(), 0.0, "impulse must wait for the tick");
    let after = v.tick(NOMINAL_STEP, false);
    assert!((after - 0.95).abs() < 1e-5, "got {after}");
}

#[test]
fn velocity_decays_to_near_zero_within_two_seconds() {
    let mut v = VelocityIntegrator::new(0.95, 0.3);
    v.apply_impulse(10.0);
    for _ in 0..120 {
        v.tick(NOMINAL_STEP, false);
    }
    assert!(v.velocity().abs() < 0.05, "velocity {}", v.velocity());
}

#[test]
fn damping_does_not_depend_on_refresh_rate() {
    let mut slow = VelocityIntegrator::new(0.95, 0.0);
    let mut fast = VelocityIntegrator::new(0.95, 0.0);
    slow.apply_impulse(5.0);
    fast.apply_impulse(5.0);
    for _ in 0..60 {
        slow.tick(1.0 / 60.0, false);
    }
    for _ in 0..144 {
        fast.tick(1.0 / 144.0, false);
    }
    assert!((slow.velocity() - fast.velocity()).abs() < 1e-3);
}

#[test]
fn autoplay_adds_forward_drift() {
    let mut v = VelocityIntegrator::new(0.95, 0.3);
    for _ in 0..30 {
        v.tick(NOMINAL_STEP, true);
    }
    assert!(v.velocity() > 0.0);
}

#[test]
fn negative_impulses_reverse_direction() {
    let mut v = VelocityIntegrator::new(0.95, 0.3);
    v.apply_impulse(-2.4);
    assert!(v.tick(NOMINAL_STEP, false) < 0.0);
}

#[test]
fn non_finite_input_never_reaches_velocity() {
    let mut v = VelocityIntegrator::new(0.95, 0.3);
    v.apply_impulse(f32::NAN);
    v.apply_impulse(f32::INFINITY);
    assert_eq!(v.tick(NOMINAL_STEP, false), 0.0);

    v.apply_impulse(f32::MAX);
    v.apply_impulse(f32::MAX);
    let out = v.tick(NOMINAL_STEP, false);
    assert!(out.is_finite());

    let out = v.tick(f32::NAN, true);
    assert!(out.is_finite());
}

// ── Idle timer ─────────────────────────────────────────────────────────────

#[test]
fn idle_timer_fires_on_cadence_points() {
    let t0 = Instant::now();
    let mut timer = IdleTimer::new(Duration::from_secs(1));
    assert!(!timer.due(t0 + ms(5000)), "unarmed timer never fires");

    timer.arm(t0);
    assert!(!timer.due(t0 + ms(999)));
    assert!(timer.due(t0 + ms(1000)));
    assert_eq!(timer.next_check(), Some(t0 + ms(2000)));
    assert!(!timer.due(t0 + ms(1500)));
    // Late poll skips missed points instead of firing repeatedly.
    assert!(timer.due(t0 + ms(4300)));
    assert_eq!(timer.next_check(), Some(t0 + ms(5000)));

    timer.disarm();
    assert!(!timer.is_armed());
    assert!(!timer.due(t0 + ms(9000)));
}

// ── Autoplay scheduler ─────────────────────────────────────────────────────

#[test]
fn starts_in_autoplay_with_timer_idle() {
    let s = scheduler();
    assert_eq!(s.mode(), PlaybackMode::Autoplay);
    assert!(s.last_interaction().is_none());
    assert!(!s.timer().is_armed());
}

#[test]
fn input_switches_to_manual_and_records_time() {
    let t0 = Instant::now();
    let mut s = scheduler();
    s.record_interaction(t0);
    assert_eq!(s.mode(), PlaybackMode::Manual);
    assert_eq!(s.last_interaction(), Some(t0));
    assert!(s.timer().is_armed());
}

#[test]
fn idle_check_resumes_at_threshold_not_before() {
    let t0 = Instant::now();
    let mut s = scheduler();
    s.record_interaction(t0);

    assert!(!s.check_idle(t0 + ms(2999)));
    assert_eq!(s.mode(), PlaybackMode::Manual);

    assert!(s.check_idle(t0 + ms(3000)));
    assert_eq!(s.mode(), PlaybackMode::Autoplay);
    assert!(!s.timer().is_armed(), "timer released once autoplay resumes");
}

#[test]
fn periodic_poll_resumes_after_three_idle_seconds() {
    let t0 = Instant::now();
    let mut s = scheduler();
    s.record_interaction(t0);

    for t in [500, 1000, 1700, 2000, 2500, 2999] {
        s.poll(t0 + ms(t));
        assert_eq!(s.mode(), PlaybackMode::Manual, "resumed early at {t} ms");
    }
    assert!(s.poll(t0 + ms(3000)));
    assert_eq!(s.mode(), PlaybackMode::Autoplay);
}

#[test]
fn new_input_restarts_the_idle_window() {
    let t0 = Instant::now();
    let mut s = scheduler();
    s.record_interaction(t0);
    s.poll(t0 + ms(2000));
    s.record_interaction(t0 + ms(2500));

    s.poll(t0 + ms(3500));
    s.poll(t0 + ms(4500));
    s.poll(t0 + ms(5499));
    assert_eq!(s.mode(), PlaybackMode::Manual);

    s.poll(t0 + ms(5500));
    assert_eq!(s.mode(), PlaybackMode::Autoplay);
}

#[test]
fn autoplay_is_not_left_by_elapsed_time_alone() {
    let t0 = Instant::now();
    let mut s = scheduler();
    for sec in 0..30 {
        s.poll(t0 + Duration::from_secs(sec));
        assert!(!s.check_idle(t0 + Duration::from_secs(sec)));
        assert_eq!(s.mode(), PlaybackMode::Autoplay);
    }
}

#[test]
fn stop_releases_the_timer() {
    let t0 = Instant::now();
    let mut s = scheduler();
    s.record_interaction(t0);
    s.stop();
    assert!(!s.timer().is_armed());
    assert!(!s.poll(t0 + ms(10_000)));
    assert_eq!(s.mode(), PlaybackMode::Manual);
}
