mod common;

use common::{deliver, radio, raise, Chip, SimRadio, DATA_QUALITY, FIFO_READY};
use proptest::prelude::*;
use rfm12::{Config, Error, Outgoing, ReadEvent, State, StatusFlags};
use std::cell::RefCell;
use std::future::Future;
use std::pin::pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

/// Walks the radio into `target` through legal transitions only.
fn drive_to(radio: &mut SimRadio, target: State) {
    let path: &[State] = match target {
        State::Idle => &[],
        State::Listen => &[State::Listen],
        State::Rx => &[State::Listen, State::Rx],
        State::TxSync0 => &[State::TxSync0],
        State::TxSync1 => &[State::TxSync0, State::TxSync1],
        State::Tx => &[State::TxSync0, State::TxSync1, State::Tx],
        State::TxEnd => &[State::TxSync0, State::TxSync1, State::Tx, State::TxEnd],
        State::TxResync => &[State::TxSync0, State::TxSync1, State::Tx, State::TxResync],
    };
    for &state in path {
        radio.transition(state).unwrap();
    }
    assert_eq!(radio.state(), target);
}

/// Raises one fifo-ready interrupt and reports the state it leads to.
fn step(radio: &mut SimRadio, chip: &Rc<RefCell<Chip>>) -> State {
    raise(chip, FIFO_READY);
    radio.handle_interrupt().unwrap();
    radio.state()
}

#[test]
fn initialize_writes_configuration() {
    let (radio, chip) = radio();
    let chip = chip.borrow();

    assert_eq!(chip.commands, Config::default().init_sequence());
    assert!(chip.data_high);
    assert_eq!(radio.state(), State::Idle);
    assert!(!radio.auto_relisten());
    assert_eq!(radio.status(), StatusFlags::empty());
}

#[test]
fn rejected_transitions_leave_state_untouched() {
    for &from in &State::ALL {
        for &to in &State::ALL {
            if to.can_enter_from(from) {
                continue;
            }
            let (mut radio, chip) = radio();
            drive_to(&mut radio, from);
            let sent = chip.borrow().commands.len();

            assert_eq!(
                radio.transition(to),
                Err(Error::InvalidTransition { from, to })
            );
            assert_eq!(radio.state(), from);
            assert_eq!(chip.borrow().commands.len(), sent);
        }
    }
}

#[test]
fn same_state_request_is_silent() {
    let (mut radio, chip) = radio();
    drive_to(&mut radio, State::Listen);
    let sent = chip.borrow().commands.len();

    radio.transition(State::Listen).unwrap();
    assert_eq!(chip.borrow().commands.len(), sent);
}

#[test]
fn listen_entry_actions() {
    let (mut radio, chip) = radio();
    let sent = chip.borrow().commands.len();

    radio.listen(true).unwrap();
    assert_eq!(radio.state(), State::Listen);
    assert_eq!(chip.borrow().commands_since(sent), &[0x82C9, 0xCA83]);

    let sent = chip.borrow().commands.len();
    radio.listen(false).unwrap();
    assert_eq!(radio.state(), State::Idle);
    assert!(!radio.auto_relisten());
    assert_eq!(chip.borrow().commands_since(sent), &[0x8201, 0xCA81]);
}

#[test]
fn receive_sequence_follows_data_quality() {
    let (mut radio, chip) = radio();
    radio.transition(State::Listen).unwrap();

    deliver(&chip, FIFO_READY, 0x10);
    radio.handle_interrupt().unwrap();
    assert_eq!(radio.state(), State::Rx);

    deliver(&chip, FIFO_READY | DATA_QUALITY, 0x11);
    radio.handle_interrupt().unwrap();
    assert_eq!(radio.state(), State::Rx);

    deliver(&chip, FIFO_READY, 0x12);
    radio.handle_interrupt().unwrap();
    assert_eq!(radio.state(), State::Idle);

    assert_eq!(
        radio.handler().received,
        vec![
            (ReadEvent::Start, 0x10),
            (ReadEvent::Continue, 0x11),
            (ReadEvent::End, 0x12),
        ]
    );
}

#[test]
fn auto_relisten_returns_to_listen_after_receive() {
    let (mut radio, chip) = radio();
    radio.listen(true).unwrap();

    deliver(&chip, FIFO_READY, 0xA1);
    deliver(&chip, FIFO_READY | DATA_QUALITY, 0xA2);
    deliver(&chip, FIFO_READY, 0xA3);
    let sent = chip.borrow().commands.len();

    // a single drain covers the whole burst of interrupt sources
    radio.handle_interrupt().unwrap();

    assert_eq!(radio.state(), State::Listen);
    assert_eq!(radio.handler().received.len(), 3);
    assert_eq!(
        chip.borrow().commands_since(sent),
        &[0x0000, 0xB000, 0x0000, 0xB000, 0x0000, 0xB000, 0xCA81, 0xCA83]
    );
}

#[test]
fn handler_can_abort_reception() {
    let (mut radio, chip) = radio();
    radio.handler_mut().reject = Some(ReadEvent::Continue);
    radio.transition(State::Listen).unwrap();

    deliver(&chip, FIFO_READY | DATA_QUALITY, 1);
    deliver(&chip, FIFO_READY | DATA_QUALITY, 2);
    radio.handle_interrupt().unwrap();

    assert_eq!(radio.state(), State::Idle);
    assert_eq!(
        radio.handler().received,
        vec![(ReadEvent::Start, 1), (ReadEvent::Continue, 2)]
    );
}

#[test]
fn rejected_first_byte_rearms_sync_detection() {
    let (mut radio, chip) = radio();
    radio.handler_mut().reject = Some(ReadEvent::Start);
    radio.listen(true).unwrap();
    let sent = chip.borrow().commands.len();

    deliver(&chip, FIFO_READY | DATA_QUALITY, 0x55);
    radio.handle_interrupt().unwrap();

    assert_eq!(radio.state(), State::Listen);
    assert_eq!(
        chip.borrow().commands_since(sent),
        &[0x0000, 0xB000, 0xCA81, 0xCA83]
    );
}

#[test]
fn transient_flags_stay_latched_until_cleared() {
    let (mut radio, chip) = radio();
    radio.transition(State::Listen).unwrap();

    raise(&chip, 0x2000 | 0x0100);
    raise(&chip, 0x0040);
    radio.handle_interrupt().unwrap();

    let status = radio.status();
    assert!(status.contains(StatusFlags::FIFO_OVERFLOW));
    assert!(status.contains(StatusFlags::CLOCK_LOCKED));
    assert!(!status.contains(StatusFlags::SIGNAL_STRENGTH));
    assert_eq!(radio.state(), State::Listen);

    radio.clear_interrupts();
    assert_eq!(radio.status(), StatusFlags::empty());
}

#[test]
fn idle_ignores_pending_interrupts() {
    let (mut radio, chip) = radio();

    raise(&chip, FIFO_READY);
    raise(&chip, FIFO_READY);
    radio.handle_interrupt().unwrap();

    assert_eq!(radio.state(), State::Idle);
    assert_eq!(chip.borrow().statuses.len(), 1);
    assert!(radio.is_interrupt_pending().unwrap());
}

#[test]
fn transmit_sequence_frames_payload() {
    let (mut radio, chip) = radio();
    radio
        .handler_mut()
        .outgoing
        .extend([Outgoing::Byte(0x01), Outgoing::Byte(0x02)]);

    let sent = chip.borrow().commands.len();
    radio.send_packet().unwrap();
    assert_eq!(radio.state(), State::TxSync0);
    assert_eq!(chip.borrow().commands_since(sent), &[0xB8AA, 0xB8AA, 0x8239]);

    let visited: Vec<State> = (0..6).map(|_| step(&mut radio, &chip)).collect();
    assert_eq!(
        visited,
        vec![
            State::TxSync1,
            State::Tx,
            State::Tx,
            State::Tx,
            State::TxEnd,
            State::Idle,
        ]
    );
    assert_eq!(
        chip.borrow().transmitted,
        vec![0xAA, 0xAA, 0x2D, 0xD4, 0x01, 0x02, 0xAA]
    );
    assert_eq!(chip.borrow().commands.last(), Some(&0xCA81));
}

#[test]
fn send_packet_drains_pending_interrupts() {
    let (mut radio, chip) = radio();
    raise(&chip, FIFO_READY);
    raise(&chip, FIFO_READY);

    radio.send_packet().unwrap();
    assert_eq!(radio.state(), State::Tx);
}

#[test]
fn resync_restarts_preamble_without_idling() {
    let (mut radio, chip) = radio();
    radio.handler_mut().outgoing.extend([
        Outgoing::Byte(0x01),
        Outgoing::Resync,
        Outgoing::Byte(0x02),
        Outgoing::EndOfTransfer,
    ]);
    radio.send_packet().unwrap();

    let visited: Vec<State> = (0..10).map(|_| step(&mut radio, &chip)).collect();
    assert_eq!(
        visited,
        vec![
            State::TxSync1,
            State::Tx,
            State::Tx,
            State::TxResync,
            State::TxSync0,
            State::TxSync1,
            State::Tx,
            State::Tx,
            State::TxEnd,
            State::Idle,
        ]
    );
    assert_eq!(
        chip.borrow().transmitted,
        vec![0xAA, 0xAA, 0x2D, 0xD4, 0x01, 0xAA, 0xAA, 0x2D, 0xD4, 0x02, 0xAA]
    );
    // transmitter was enabled exactly once
    let enables = chip.borrow().commands.iter().filter(|&&w| w == 0x8239).count();
    assert_eq!(enables, 1);
}

#[test]
fn transmit_end_relistens() {
    let (mut radio, chip) = radio();
    radio.listen(true).unwrap();
    radio.send_packet().unwrap();

    for _ in 0..3 {
        step(&mut radio, &chip);
    }
    assert_eq!(radio.state(), State::TxEnd);
    assert_eq!(step(&mut radio, &chip), State::Listen);
}

#[test]
fn send_packet_refused_while_receiving() {
    let (mut radio, chip) = radio();
    drive_to(&mut radio, State::Rx);
    let sent = chip.borrow().commands.len();

    assert_eq!(
        radio.send_packet(),
        Err(Error::InvalidTransition {
            from: State::Rx,
            to: State::TxSync0
        })
    );
    assert_eq!(radio.state(), State::Rx);
    assert_eq!(chip.borrow().commands.len(), sent);
}

#[test]
fn stop_sending_abandons_transmission() {
    let (mut plain, _chip) = radio();
    drive_to(&mut plain, State::Tx);
    plain.stop_sending().unwrap();
    assert_eq!(plain.state(), State::Idle);

    let (mut relistening, _chip) = radio();
    relistening.listen(true).unwrap();
    relistening.send_packet().unwrap();
    relistening.stop_sending().unwrap();
    assert_eq!(relistening.state(), State::Listen);
}

#[test]
fn stop_receiving_depends_on_auto_relisten() {
    let (mut plain, _chip) = radio();
    drive_to(&mut plain, State::Rx);
    plain.stop_receiving().unwrap();
    assert_eq!(plain.state(), State::Idle);

    let (mut relistening, chip) = radio();
    relistening.listen(true).unwrap();
    relistening.transition(State::Rx).unwrap();
    let sent = chip.borrow().commands.len();
    relistening.stop_receiving().unwrap();
    assert_eq!(relistening.state(), State::Listen);
    assert_eq!(chip.borrow().commands_since(sent), &[0xCA81, 0xCA83]);
}

#[test]
fn stop_receiving_elsewhere_is_a_no_op() {
    for &state in &[State::Idle, State::Listen, State::TxSync0, State::Tx] {
        let (mut radio, chip) = radio();
        drive_to(&mut radio, state);
        let sent = chip.borrow().commands.len();

        assert_eq!(radio.stop_receiving(), Ok(()));
        assert_eq!(radio.state(), state);
        assert_eq!(chip.borrow().commands.len(), sent);
    }
}

#[test]
fn listen_during_transmission_only_sets_policy() {
    let (mut radio, _chip) = radio();
    radio.send_packet().unwrap();

    radio.listen(true).unwrap();
    assert_eq!(radio.state(), State::TxSync0);
    assert!(radio.auto_relisten());
}

#[test]
fn poll_wait_services_one_interrupt() {
    let (mut radio, chip) = radio();
    radio.transition(State::Listen).unwrap();
    deliver(&chip, FIFO_READY | DATA_QUALITY, 0x7E);

    radio.poll_wait().unwrap();
    assert_eq!(radio.state(), State::Rx);
    assert_eq!(radio.handler().received, vec![(ReadEvent::Start, 0x7E)]);
}

#[test]
fn poll_wait_async_parks_until_interrupt() {
    let (mut radio, chip) = radio();
    radio.transition(State::Listen).unwrap();

    let mut cx = Context::from_waker(Waker::noop());
    {
        let mut wait = pin!(radio.poll_wait_async());
        assert!(wait.as_mut().poll(&mut cx).is_pending());
        assert!(wait.as_mut().poll(&mut cx).is_pending());

        deliver(&chip, FIFO_READY | DATA_QUALITY, 0x3C);
        assert_eq!(wait.as_mut().poll(&mut cx), Poll::Ready(Ok(())));
    }

    assert_eq!(radio.state(), State::Rx);
    assert_eq!(radio.handler().received, vec![(ReadEvent::Start, 0x3C)]);
    assert!(!radio.is_interrupt_pending().unwrap());
}

#[test]
fn reinitialize_turns_auto_relisten_off() {
    let (mut radio, chip) = radio();
    radio.listen(true).unwrap();
    deliver(&chip, FIFO_READY | DATA_QUALITY, 0x01);
    radio.handle_interrupt().unwrap();
    assert_eq!(radio.state(), State::Rx);

    radio.initialize().unwrap();
    assert_eq!(radio.state(), State::Idle);
    assert!(!radio.auto_relisten());

    // a packet ending after re-initialization must not bring the receiver back
    radio.transition(State::Listen).unwrap();
    deliver(&chip, FIFO_READY, 0x02);
    deliver(&chip, FIFO_READY, 0x03);
    radio.handle_interrupt().unwrap();
    assert_eq!(radio.state(), State::Idle);
}

#[test]
fn instances_are_independent() {
    let (mut first, first_chip) = radio();
    let (mut second, second_chip) = radio();

    first.listen(true).unwrap();
    second.send_packet().unwrap();
    deliver(&first_chip, FIFO_READY | DATA_QUALITY, 9);
    first.handle_interrupt().unwrap();

    assert_eq!(first.state(), State::Rx);
    assert_eq!(second.state(), State::TxSync0);
    assert!(second_chip.borrow().rx_fifo.is_empty());
    assert!(first_chip.borrow().transmitted.is_empty());
}

#[test]
fn release_returns_handler() {
    let (mut radio, chip) = radio();
    radio.transition(State::Listen).unwrap();
    deliver(&chip, FIFO_READY | DATA_QUALITY, 3);
    radio.handle_interrupt().unwrap();

    let (_pins, handler) = radio.release();
    assert_eq!(handler.received, vec![(ReadEvent::Start, 3)]);
}

proptest! {
    #[test]
    fn transmit_visits_every_state_once_for_any_length(len in 0usize..24) {
        let (mut radio, chip) = radio();
        radio
            .handler_mut()
            .outgoing
            .extend((0..len).map(|i| Outgoing::Byte(i as u8)));
        radio.send_packet().unwrap();

        let mut visited = vec![radio.state()];
        while radio.state() != State::Idle {
            visited.push(step(&mut radio, &chip));
            prop_assert!(visited.len() <= len + 5);
        }

        let mut expected = vec![State::TxSync0, State::TxSync1, State::Tx];
        expected.extend(std::iter::repeat(State::Tx).take(len));
        expected.extend([State::TxEnd, State::Idle]);
        prop_assert_eq!(visited, expected);
        prop_assert_eq!(chip.borrow().transmitted.len(), len + 5);
    }
}
