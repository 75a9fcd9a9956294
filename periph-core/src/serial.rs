//! Interrupt-driven serial channel
//!
//! Outbound messages queue up in FIFO order. Only the front message is
//! ever armed on the hardware; the transmission-complete interrupt pops
//! it and arms the next one. Inbound traffic arrives one byte per
//! receive interrupt and accumulates in an unbounded log with no framing.
//!
//! # Interrupt wiring
//!
//! ```ignore
//! static CONSOLE: SerialChannel<&'static mut Usart2Tx, &'static mut Usart2Rx> =
//!     SerialChannel::new(...);
//!
//! #[interrupt]
//! fn USART2() {
//!     if tx_complete() { CONSOLE.on_transmission_complete(); }
//!     if rx_not_empty() { CONSOLE.on_byte_received(); }
//! }
//! ```
//!
//! All state sits behind one critical-section mutex, so foreground calls
//! and the two callbacks never observe a half-finished update. The one
//! exception is the polled transfer of [`SerialChannel::send_blocking`]:
//! the transmitter is lent out of the mutex for its duration so the
//! receive interrupt keeps running.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use periph_hal::uart::{UartRx, UartTx};

/// Errors from [`SerialChannel::send_blocking`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendError<E> {
    /// Another blocking send holds the transmitter
    InUse,
    /// The UART reported an error
    Uart(E),
}

struct ChannelState<T, R> {
    /// `None` while a blocking send has the transmitter
    tx: Option<T>,
    rx: R,
    /// Front is the in-flight message while `busy`
    pending: VecDeque<Vec<u8>>,
    busy: bool,
    /// Front is in flight but could not be armed yet
    deferred: bool,
    received: Vec<u8>,
}

impl<T: UartTx, R> ChannelState<T, R> {
    fn arm_front(&mut self) {
        match (self.tx.as_mut(), self.pending.front()) {
            (Some(tx), Some(front)) => {
                tx.start_write(front);
                self.deferred = false;
            }
            (None, Some(_)) => self.deferred = true,
            (_, None) => {}
        }
    }
}

/// Queued UART transmitter and byte-wise receiver
///
/// Pass `&'static mut` handles to keep the UART halves owned elsewhere.
pub struct SerialChannel<T, R> {
    state: Mutex<CriticalSectionRawMutex, RefCell<ChannelState<T, R>>>,
}

impl<T, R> SerialChannel<T, R> {
    /// Wrap the two halves of a configured UART. Reception is not armed
    /// until [`start_receiving`](Self::start_receiving).
    pub const fn new(tx: T, rx: R) -> Self {
        Self {
            state: Mutex::new(RefCell::new(ChannelState {
                tx: Some(tx),
                rx,
                pending: VecDeque::new(),
                busy: false,
                deferred: false,
                received: Vec::new(),
            })),
        }
    }

    /// Messages queued, the in-flight one included
    pub fn depth(&self) -> usize {
        self.state.lock(|state| state.borrow().pending.len())
    }

    /// A transmission is in flight and not yet complete
    pub fn is_busy(&self) -> bool {
        self.state.lock(|state| state.borrow().busy)
    }

    /// Copy of the message currently on the wire
    pub fn in_flight(&self) -> Option<Vec<u8>> {
        self.state.lock(|state| {
            let state = state.borrow();
            if state.busy {
                state.pending.front().cloned()
            } else {
                None
            }
        })
    }

    /// Bytes received and not yet taken
    pub fn received_len(&self) -> usize {
        self.state.lock(|state| state.borrow().received.len())
    }

    /// Drain the receive log
    pub fn take_received(&self) -> Vec<u8> {
        self.state
            .lock(|state| core::mem::take(&mut state.borrow_mut().received))
    }
}

impl<T: UartTx, R> SerialChannel<T, R> {
    /// Queue `message` for interrupt-driven transmission
    ///
    /// Returns:
    /// - `0` for an empty message, which is dropped
    /// - the message length when the channel was idle and the message
    ///   went straight onto the wire
    /// - the queue depth (in-flight message included) when it had to
    ///   wait behind a transmission in progress
    pub fn send(&self, message: impl AsRef<[u8]>) -> usize {
        let message = message.as_ref();
        if message.is_empty() {
            return 0;
        }

        self.state.lock(|state| {
            let mut state = state.borrow_mut();
            state.pending.push_back(message.to_vec());
            if state.busy {
                return state.pending.len();
            }

            state.busy = true;
            state.arm_front();
            message.len()
        })
    }

    /// Transmit `message` by polling, bypassing the queue
    ///
    /// Interrupts stay enabled during the transfer, so bytes keep
    /// arriving through [`on_byte_received`](Self::on_byte_received).
    /// A message that needs arming meanwhile (an idle-channel `send`, or
    /// a completion with more queued) waits and goes out as soon as the
    /// transmitter is back. Calling this while a queued message is on
    /// the wire interleaves the two.
    pub fn send_blocking(&self, message: impl AsRef<[u8]>) -> Result<usize, SendError<T::Error>> {
        let message = message.as_ref();
        let mut tx = self
            .state
            .lock(|state| state.borrow_mut().tx.take())
            .ok_or(SendError::InUse)?;

        let result = tx.write_blocking(message);

        self.state.lock(|state| {
            let mut state = state.borrow_mut();
            state.tx = Some(tx);
            if state.deferred {
                state.arm_front();
            }
        });

        result.map(|()| message.len()).map_err(SendError::Uart)
    }

    /// Transmission-complete interrupt callback
    ///
    /// Retires the in-flight message and arms the next one, or marks the
    /// channel idle. Returns the number of messages still queued.
    pub fn on_transmission_complete(&self) -> usize {
        self.state.lock(|state| {
            let mut state = state.borrow_mut();
            state.pending.pop_front();
            if state.pending.is_empty() {
                state.busy = false;
                state.deferred = false;
            } else {
                state.arm_front();
            }
            state.pending.len()
        })
    }
}

impl<T, R: UartRx> SerialChannel<T, R> {
    /// Arm the first one-byte reception
    pub fn start_receiving(&self) {
        self.state.lock(|state| state.borrow_mut().rx.start_read_byte());
    }

    /// Receive-complete interrupt callback
    ///
    /// Logs the byte and re-arms for the next one.
    pub fn on_byte_received(&self) {
        self.state.lock(|state| {
            let mut state = state.borrow_mut();
            let byte = state.rx.last_byte();
            state.received.push(byte);
            state.rx.start_read_byte();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeTx {
        armed: Vec<Vec<u8>>,
        blocking: Vec<Vec<u8>>,
        fail_blocking: bool,
    }

    #[derive(Debug, PartialEq)]
    struct Overrun;

    impl UartTx for FakeTx {
        type Error = Overrun;

        fn start_write(&mut self, data: &[u8]) {
            self.armed.push(data.to_vec());
        }

        fn write_blocking(&mut self, data: &[u8]) -> Result<(), Overrun> {
            if self.fail_blocking {
                return Err(Overrun);
            }
            self.blocking.push(data.to_vec());
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeRx {
        armed: usize,
        line: u8,
    }

    impl UartRx for FakeRx {
        fn start_read_byte(&mut self) {
            self.armed += 1;
        }

        fn last_byte(&self) -> u8 {
            self.line
        }
    }

    #[test]
    fn test_send_on_idle_channel_arms_immediately() {
        let (mut tx, mut rx) = (FakeTx::default(), FakeRx::default());
        let channel = SerialChannel::new(&mut tx, &mut rx);

        assert_eq!(channel.send("hello"), 5);
        assert!(channel.is_busy());
        assert_eq!(channel.in_flight(), Some(b"hello".to_vec()));
        assert_eq!(channel.depth(), 1);
        drop(channel);

        assert_eq!(tx.armed, vec![b"hello".to_vec()]);
    }

    #[test]
    fn test_send_while_busy_only_enqueues() {
        let (mut tx, mut rx) = (FakeTx::default(), FakeRx::default());
        let channel = SerialChannel::new(&mut tx, &mut rx);

        assert_eq!(channel.send("first"), 5);
        assert_eq!(channel.send("second"), 2);
        assert_eq!(channel.send("x"), 3);
        assert_eq!(channel.in_flight(), Some(b"first".to_vec()));
        drop(channel);

        assert_eq!(tx.armed.len(), 1);
    }

    #[test]
    fn test_empty_message_is_ignored() {
        let (mut tx, mut rx) = (FakeTx::default(), FakeRx::default());
        let channel = SerialChannel::new(&mut tx, &mut rx);

        assert_eq!(channel.send(""), 0);
        assert!(!channel.is_busy());
        assert_eq!(channel.depth(), 0);
        drop(channel);

        assert!(tx.armed.is_empty());
    }

    #[test]
    fn test_completion_sequence() {
        let (mut tx, mut rx) = (FakeTx::default(), FakeRx::default());
        let channel = SerialChannel::new(&mut tx, &mut rx);

        assert_eq!(channel.send("A"), 1);
        assert_eq!(channel.in_flight(), Some(b"A".to_vec()));

        assert_eq!(channel.send("BB"), 2);
        assert_eq!(channel.in_flight(), Some(b"A".to_vec()));

        assert_eq!(channel.on_transmission_complete(), 1);
        assert_eq!(channel.in_flight(), Some(b"BB".to_vec()));
        assert!(channel.is_busy());

        assert_eq!(channel.on_transmission_complete(), 0);
        assert!(!channel.is_busy());
        assert_eq!(channel.in_flight(), None);
        drop(channel);

        assert_eq!(tx.armed, vec![b"A".to_vec(), b"BB".to_vec()]);
    }

    #[test]
    fn test_idle_after_last_completion_rearms_on_send() {
        let (mut tx, mut rx) = (FakeTx::default(), FakeRx::default());
        let channel = SerialChannel::new(&mut tx, &mut rx);

        channel.send("one");
        assert_eq!(channel.on_transmission_complete(), 0);
        assert!(!channel.is_busy());

        assert_eq!(channel.send("two"), 3);
        assert!(channel.is_busy());
        drop(channel);

        assert_eq!(tx.armed, vec![b"one".to_vec(), b"two".to_vec()]);
    }

    #[test]
    fn test_spurious_completion_keeps_channel_idle() {
        let (mut tx, mut rx) = (FakeTx::default(), FakeRx::default());
        let channel = SerialChannel::new(&mut tx, &mut rx);

        assert_eq!(channel.on_transmission_complete(), 0);
        assert!(!channel.is_busy());
        assert_eq!(channel.send("ok"), 2);
    }

    #[test]
    fn test_send_blocking_bypasses_queue() {
        let (mut tx, mut rx) = (FakeTx::default(), FakeRx::default());
        let channel = SerialChannel::new(&mut tx, &mut rx);

        channel.send("queued");
        channel.send("behind");
        assert_eq!(channel.send_blocking(b"raw"), Ok(3));
        assert_eq!(channel.depth(), 2);
        assert!(channel.is_busy());
        drop(channel);

        assert_eq!(tx.blocking, vec![b"raw".to_vec()]);
        assert_eq!(tx.armed, vec![b"queued".to_vec()]);
    }

    #[test]
    fn test_send_blocking_reports_hardware_error() {
        let mut tx = FakeTx {
            fail_blocking: true,
            ..Default::default()
        };
        let mut rx = FakeRx::default();
        let channel = SerialChannel::new(&mut tx, &mut rx);

        assert_eq!(channel.send_blocking("raw"), Err(SendError::Uart(Overrun)));
        // Transmitter is handed back even on failure
        assert_eq!(channel.send("next"), 4);
    }

    #[test]
    fn test_receive_logs_bytes_and_rearms() {
        let mut tx = FakeTx::default();
        let mut rx = FakeRx {
            line: b'z',
            ..Default::default()
        };
        let channel = SerialChannel::new(&mut tx, &mut rx);

        channel.start_receiving();
        channel.on_byte_received();
        channel.on_byte_received();
        assert_eq!(channel.received_len(), 2);
        assert_eq!(channel.take_received(), b"zz".to_vec());
        assert_eq!(channel.received_len(), 0);
        drop(channel);

        assert_eq!(rx.armed, 3);
    }

    #[test]
    fn test_receive_does_not_touch_transmit_queue() {
        let (mut tx, mut rx) = (FakeTx::default(), FakeRx::default());
        let channel = SerialChannel::new(&mut tx, &mut rx);

        channel.send("tx");
        channel.on_byte_received();
        assert_eq!(channel.in_flight(), Some(b"tx".to_vec()));
        assert_eq!(channel.depth(), 1);
    }

    // Interrupt handlers firing while a polled transfer is in progress,
    // replayed from inside `write_blocking` against a static channel.
    static INTERRUPTED: SerialChannel<InterruptedTx, LineRx> =
        SerialChannel::new(InterruptedTx, LineRx);
    static ARMED: AtomicUsize = AtomicUsize::new(0);
    static NESTED_IN_USE: AtomicBool = AtomicBool::new(false);

    struct InterruptedTx;

    impl UartTx for InterruptedTx {
        type Error = Overrun;

        fn start_write(&mut self, _data: &[u8]) {
            ARMED.fetch_add(1, Ordering::SeqCst);
        }

        fn write_blocking(&mut self, _data: &[u8]) -> Result<(), Overrun> {
            INTERRUPTED.on_byte_received();
            INTERRUPTED.on_byte_received();
            INTERRUPTED.send("queued");
            let nested = INTERRUPTED.send_blocking("nested");
            NESTED_IN_USE.store(nested == Err(SendError::InUse), Ordering::SeqCst);
            Ok(())
        }
    }

    struct LineRx;

    impl UartRx for LineRx {
        fn start_read_byte(&mut self) {}

        fn last_byte(&self) -> u8 {
            b'r'
        }
    }

    #[test]
    fn test_interrupts_served_during_send_blocking() {
        assert_eq!(INTERRUPTED.send_blocking("polled"), Ok(6));

        assert_eq!(INTERRUPTED.take_received(), b"rr".to_vec());
        assert!(NESTED_IN_USE.load(Ordering::SeqCst));

        // The send made while the transmitter was lent out is armed on return
        assert!(INTERRUPTED.is_busy());
        assert_eq!(INTERRUPTED.in_flight(), Some(b"queued".to_vec()));
        assert_eq!(ARMED.load(Ordering::SeqCst), 1);

        assert_eq!(INTERRUPTED.on_transmission_complete(), 0);
        assert!(!INTERRUPTED.is_busy());
    }
}
