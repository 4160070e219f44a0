use super::*;

#[test]
fn countdown_formats_minutes_and_padded_seconds() {
    assert_eq!(format_countdown(0), "0:00");
    assert_eq!(format_countdown(59), "0:59");
    assert_eq!(format_countdown(65), "1:05");
    assert_eq!(format_countdown(600), "10:00");
    assert_eq!(format_countdown(900), "15:00");
    assert_eq!(format_countdown(3599), "59:59");
}

#[test]
fn countdown_formula_holds_for_the_whole_range() {
    for s in 0..3600u32 {
        let expected = format!("{}:{:02}", s / 60, s % 60);
        assert_eq!(format_countdown(s), expected);
    }
}

#[test]
fn session_starts_pending_with_full_window() {
    let session = PaymentSession::new(900);
    assert_eq!(session.phase(), PaymentPhase::Pending);
    assert_eq!(session.remaining_secs(), 900);
    assert!(session.can_pay());
    assert!(!session.is_terminal());
}

#[test]
fn tick_decrements_and_expires_exactly_once() {
    let mut session = PaymentSession::new(2);

    assert!(!session.tick());
    assert_eq!(session.remaining_secs(), 1);
    assert_eq!(session.phase(), PaymentPhase::Pending);

    // The transition to Expired fires on the tick that reaches zero...
    assert!(session.tick());
    assert_eq!(session.phase(), PaymentPhase::Expired);
    assert_eq!(session.remaining_secs(), 0);

    // ...and never again on later ticks.
    assert!(!session.tick());
    assert!(!session.tick());
    assert_eq!(session.phase(), PaymentPhase::Expired);
}

#[test]
fn payment_flow_success_is_terminal() {
    let mut session = PaymentSession::new(900);
    assert!(session.begin_payment());
    assert_eq!(session.phase(), PaymentPhase::Processing);
    assert!(!session.can_pay());

    session.confirm_success();
    assert_eq!(session.phase(), PaymentPhase::Succeeded);
    assert!(session.is_terminal());

    // Ticks after success must not resurrect the countdown or expire it.
    assert!(!session.tick());
    assert_eq!(session.phase(), PaymentPhase::Succeeded);
}

#[test]
fn payment_failure_returns_to_pending() {
    let mut session = PaymentSession::new(900);
    assert!(session.begin_payment());
    session.confirm_failure();
    assert_eq!(session.phase(), PaymentPhase::Pending);
    assert!(session.can_pay());
}

#[test]
fn failure_after_expiry_stays_expired() {
    let mut session = PaymentSession::new(1);
    assert!(session.begin_payment());
    // Countdown keeps running while the request is in flight.
    assert!(session.tick());
    assert_eq!(session.phase(), PaymentPhase::Expired);

    session.confirm_failure();
    assert_eq!(session.phase(), PaymentPhase::Expired);
    assert!(!session.can_pay());
}

#[test]
fn begin_payment_rejected_outside_pending() {
    let mut session = PaymentSession::new(1);
    session.tick();
    assert_eq!(session.phase(), PaymentPhase::Expired);
    assert!(!session.begin_payment());

    let mut session = PaymentSession::new(900);
    session.begin_payment();
    assert!(!session.begin_payment());
}
