use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::strip::bus::LedBus;

/// Debounced highlight requests over a shared [`LedBus`].
///
/// Every `highlight` call supersedes the previous one: requests capture a
/// generation token at submission, and the delayed relight only fires if
/// the token is still current. Batch lighting is deliberately exempt from
/// cancellation — "light everything for this job" must not be killed by
/// the operator clicking around.
pub struct Highlighter {
    bus: Arc<LedBus>,
}

impl Highlighter {
    pub fn new(bus: Arc<LedBus>) -> Self {
        Self { bus }
    }

    pub fn bus(&self) -> &Arc<LedBus> {
        &self.bus
    }

    /// Track the operator's current selection.
    ///
    /// Immediately clears whatever was lit, then — after `delay` — lights
    /// `code` unless a newer request has arrived in the meantime. Returns
    /// the request token; the spawned check rereads the generation under
    /// the same lock that guards it, so a superseded request never writes.
    pub fn highlight(&self, code: &str, delay: Duration) -> u64 {
        let token = self.bus.next_generation();
        self.bus.clear_recent();

        let bus = Arc::clone(&self.bus);
        let code = code.to_string();
        thread::spawn(move || {
            thread::sleep(delay);
            if !bus.is_current(token) {
                log::debug!("highlight for '{code}' superseded, skipping");
                return;
            }
            let (r, g, b) = parity_color(&code);
            bus.set(&code, r, g, b);
        });
        token
    }

    /// Light every bin a job needs, spacing the writes by `stagger` so the
    /// controller's input buffer keeps up. Not cancellable. The returned
    /// handle lets callers wait for the strip to settle.
    pub fn highlight_many(&self, codes: &[String], stagger: Duration) -> JoinHandle<()> {
        let bus = Arc::clone(&self.bus);
        let codes = codes.to_vec();
        thread::spawn(move || {
            for code in codes {
                let (r, g, b) = parity_color(&code);
                bus.set(&code, r, g, b);
                thread::sleep(stagger);
            }
        })
    }
}

/// Column-parity color: odd letters (A, C, ..) green, even letters blue.
/// Alternating colors keep adjacent lit bins visually distinct.
pub fn parity_color(code: &str) -> (u8, u8, u8) {
    let Some(letter) = code.chars().last().filter(char::is_ascii_alphabetic) else {
        return (0, 0, 0);
    };
    let ordinal = (letter.to_ascii_uppercase() as u8 - b'A') + 1;
    if ordinal % 2 == 1 {
        (0, 255, 0)
    } else {
        (0, 0, 255)
    }
}
