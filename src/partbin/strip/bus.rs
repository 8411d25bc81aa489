use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use crate::location::LocationCode;
use crate::strip::transport::Transport;

/// Gap between off commands when clearing the recently-lit set.
const RECENT_OFF_GAP: Duration = Duration::from_millis(5);
/// Gap between off commands when blanking the whole strip. The controller
/// buffers serial input; pushing a full strip's worth of commands
/// back-to-back drops some of them.
const FULL_OFF_GAP: Duration = Duration::from_millis(50);

/// What happened to a hardware call. `NoDevice` and `NoAddress` are
/// ordinary outcomes, not errors: the ledger must keep working with the
/// strip unplugged, and callers choose whether to surface them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// Command written to the link.
    Sent,
    /// No device link is open.
    NoDevice,
    /// The code does not resolve to an index on this strip.
    NoAddress,
}

/// Generation counter and recently-lit set, guarded together: a highlight
/// request checking its token and a clear snapshotting the set must see a
/// consistent view.
#[derive(Default)]
struct StripState {
    generation: u64,
    recent: HashSet<usize>,
}

/// The physical address bus: resolves bin codes to serpentine strip
/// indices and writes `SET` commands over the (single, shared) link.
pub struct LedBus {
    link: Mutex<Option<Box<dyn Transport>>>,
    state: Mutex<StripState>,
    num_slots: usize,
}

impl LedBus {
    pub fn new(num_slots: usize) -> Self {
        Self {
            link: Mutex::new(None),
            state: Mutex::new(StripState::default()),
            num_slots,
        }
    }

    pub fn with_link(num_slots: usize, link: Box<dyn Transport>) -> Self {
        let bus = Self::new(num_slots);
        bus.reconnect(Some(link));
        bus
    }

    /// Swap the device link at runtime. `None` detaches the hardware.
    pub fn reconnect(&self, link: Option<Box<dyn Transport>>) {
        *self.link.lock().unwrap_or_else(PoisonError::into_inner) = link;
    }

    pub fn has_link(&self) -> bool {
        self.link
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn num_slots(&self) -> usize {
        self.num_slots
    }

    /// Resolve a bin code to its strip index, or `None` when the code is
    /// malformed or lands past the end of the strip.
    pub fn physical_index(&self, code: &str) -> Option<usize> {
        let index = LocationCode::parse(code)?.physical_index();
        (index < self.num_slots).then_some(index)
    }

    /// Light one bin. On success the index joins the recently-lit set.
    pub fn set(&self, code: &str, r: u8, g: u8, b: u8) -> SetOutcome {
        let Some(index) = self.physical_index(code) else {
            log::debug!("no address for location '{code}'");
            return SetOutcome::NoAddress;
        };
        let outcome = self.write(index, r, g, b);
        if outcome == SetOutcome::Sent {
            self.lock_state().recent.insert(index);
        }
        outcome
    }

    /// Turn one bin off and forget it from the recently-lit set.
    pub fn off(&self, code: &str) -> SetOutcome {
        let Some(index) = self.physical_index(code) else {
            return SetOutcome::NoAddress;
        };
        let outcome = self.write(index, 0, 0, 0);
        if outcome == SetOutcome::Sent {
            self.lock_state().recent.remove(&index);
        }
        outcome
    }

    /// Turn off exactly the bins lit since the last clear.
    ///
    /// The set is snapshotted and emptied in one critical section, so a
    /// concurrent `set` either lands in the snapshot (and is turned off
    /// here) or in the fresh set (and survives until the next clear) —
    /// never both, never neither. The generation counter is untouched.
    pub fn clear_recent(&self) -> SetOutcome {
        let lit: Vec<usize> = {
            let mut state = self.lock_state();
            let lit = state.recent.iter().copied().collect();
            state.recent.clear();
            lit
        };

        let mut link = self.link.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(link) = link.as_mut() else {
            return SetOutcome::NoDevice;
        };
        for index in lit {
            Self::send(link.as_mut(), index, 0, 0, 0);
            thread::sleep(RECENT_OFF_GAP);
        }
        SetOutcome::Sent
    }

    /// Blank the whole strip, index by index, and reset the recently-lit
    /// set. Slow by design (see [`FULL_OFF_GAP`]).
    pub fn clear_all(&self) -> SetOutcome {
        {
            let mut link = self.link.lock().unwrap_or_else(PoisonError::into_inner);
            let Some(link) = link.as_mut() else {
                return SetOutcome::NoDevice;
            };
            for index in 0..self.num_slots {
                Self::send(link.as_mut(), index, 0, 0, 0);
                thread::sleep(FULL_OFF_GAP);
            }
        }
        self.lock_state().recent.clear();
        SetOutcome::Sent
    }

    /// Bump the highlight generation and return the new token.
    pub(crate) fn next_generation(&self) -> u64 {
        let mut state = self.lock_state();
        state.generation += 1;
        state.generation
    }

    /// Whether `token` is still the latest highlight request.
    pub(crate) fn is_current(&self, token: u64) -> bool {
        self.lock_state().generation == token
    }

    #[cfg(test)]
    fn recent(&self) -> Vec<usize> {
        let mut lit: Vec<usize> = self.lock_state().recent.iter().copied().collect();
        lit.sort_unstable();
        lit
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, StripState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write one command under the link lock. All writers funnel through
    /// here, so bytes from concurrent threads never interleave.
    fn write(&self, index: usize, r: u8, g: u8, b: u8) -> SetOutcome {
        let mut link = self.link.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(link) = link.as_mut() else {
            return SetOutcome::NoDevice;
        };
        Self::send(link.as_mut(), index, r, g, b);
        SetOutcome::Sent
    }

    fn send(link: &mut dyn Transport, index: usize, r: u8, g: u8, b: u8) {
        let command = format!("SET {index} {r} {g} {b}\n");
        if let Err(err) = link.send(&command) {
            // fire-and-forget protocol: log and move on
            log::warn!("LED link write failed: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strip::transport::mock::MockLink;

    fn bus_with_mock(num_slots: usize) -> (LedBus, MockLink) {
        let mock = MockLink::new();
        let bus = LedBus::with_link(num_slots, Box::new(mock.clone()));
        (bus, mock)
    }

    #[test]
    fn set_writes_serpentine_wire_command() {
        let (bus, mock) = bus_with_mock(104);
        assert_eq!(bus.set("1A", 0, 255, 0), SetOutcome::Sent);
        assert_eq!(bus.set("2A", 0, 0, 255), SetOutcome::Sent);
        assert_eq!(mock.sent(), vec!["SET 0 0 255 0\n", "SET 51 0 0 255\n"]);
    }

    #[test]
    fn no_device_and_no_address_are_reported_not_raised() {
        let bus = LedBus::new(104);
        assert_eq!(bus.set("1A", 255, 0, 0), SetOutcome::NoDevice);

        let (bus, mock) = bus_with_mock(104);
        assert_eq!(bus.set("garbage", 255, 0, 0), SetOutcome::NoAddress);
        assert_eq!(bus.set("1AB", 255, 0, 0), SetOutcome::NoAddress);
        // row 5 starts at index 104 — past the end of this strip
        assert_eq!(bus.set("5A", 255, 0, 0), SetOutcome::NoAddress);
        assert!(mock.sent().is_empty());
    }

    #[test]
    fn clear_recent_turns_off_exactly_what_was_lit() {
        let (bus, mock) = bus_with_mock(104);
        bus.set("1A", 0, 255, 0); // index 0
        bus.set("1C", 0, 255, 0); // index 2
        assert_eq!(bus.recent(), vec![0, 2]);

        assert_eq!(bus.clear_recent(), SetOutcome::Sent);
        assert!(bus.recent().is_empty());

        let offs: Vec<String> = mock.sent()[2..].to_vec();
        assert_eq!(offs.len(), 2);
        assert!(offs.contains(&"SET 0 0 0 0\n".to_string()));
        assert!(offs.contains(&"SET 2 0 0 0\n".to_string()));
    }

    #[test]
    fn clear_recent_leaves_generation_untouched() {
        let (bus, _mock) = bus_with_mock(104);
        let token = bus.next_generation();
        bus.set("1A", 0, 255, 0);
        bus.clear_recent();
        assert!(bus.is_current(token));
    }

    #[test]
    fn clear_all_blanks_every_slot() {
        let (bus, mock) = bus_with_mock(4);
        bus.set("1B", 0, 255, 0);
        assert_eq!(bus.clear_all(), SetOutcome::Sent);
        assert!(bus.recent().is_empty());

        let sent = mock.sent();
        let offs = &sent[1..];
        assert_eq!(offs.len(), 4);
        for (i, cmd) in offs.iter().enumerate() {
            assert_eq!(cmd, &format!("SET {i} 0 0 0\n"));
        }
    }

    #[test]
    fn off_forgets_the_index() {
        let (bus, mock) = bus_with_mock(104);
        bus.set("1B", 0, 255, 0);
        assert_eq!(bus.off("1B"), SetOutcome::Sent);
        assert!(bus.recent().is_empty());
        assert_eq!(mock.sent()[1], "SET 1 0 0 0\n");
    }

    #[test]
    fn reconnect_attaches_and_detaches() {
        let bus = LedBus::new(104);
        assert!(!bus.has_link());
        bus.reconnect(Some(Box::new(MockLink::new())));
        assert!(bus.has_link());
        bus.reconnect(None);
        assert_eq!(bus.set("1A", 1, 2, 3), SetOutcome::NoDevice);
    }
}
