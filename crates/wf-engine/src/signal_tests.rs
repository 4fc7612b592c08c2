use super::*;
use yare::parameterized;

#[parameterized(
    sigint = { TerminationSignal::Sigint },
    sigterm = { TerminationSignal::Sigterm },
)]
fn idle_shield_cancels_immediately(signal: TerminationSignal) {
    let shield = InterruptShield::new();
    let cancel = CancellationToken::new();
    handle_signal(&shield, &cancel, signal);
    assert!(cancel.is_cancelled());
}

#[parameterized(
    sigint = { TerminationSignal::Sigint },
    sigterm = { TerminationSignal::Sigterm },
)]
fn active_shield_buffers_instead_of_cancelling(signal: TerminationSignal) {
    let shield = InterruptShield::new();
    let cancel = CancellationToken::new();
    let guard = shield.enter();

    handle_signal(&shield, &cancel, signal);

    assert!(!cancel.is_cancelled());
    assert_eq!(guard.take_buffered(), vec![signal]);
}
