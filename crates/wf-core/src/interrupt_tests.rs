use super::*;

#[test]
fn signals_outside_a_shielded_section_are_not_buffered() {
    let shield = InterruptShield::new();
    assert!(!shield.record(TerminationSignal::Sigterm));
}

#[test]
fn signals_inside_a_shielded_section_are_buffered_in_order() {
    let shield = InterruptShield::new();
    let guard = shield.enter();
    assert!(shield.record(TerminationSignal::Sigint));
    assert!(shield.record(TerminationSignal::Sigterm));
    assert_eq!(
        guard.take_buffered(),
        vec![TerminationSignal::Sigint, TerminationSignal::Sigterm]
    );
}

#[test]
fn exiting_the_shield_restores_immediate_delivery() {
    let shield = InterruptShield::new();
    {
        let _guard = shield.enter();
        assert!(shield.is_active());
    }
    assert!(!shield.is_active());
    assert!(!shield.record(TerminationSignal::Sigterm));
}

#[test]
fn take_buffered_drains_only_once() {
    let shield = InterruptShield::new();
    let guard = shield.enter();
    shield.record(TerminationSignal::Sigint);
    assert_eq!(guard.take_buffered().len(), 1);
    assert_eq!(guard.take_buffered().len(), 0);
}
