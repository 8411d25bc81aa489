//! Physical addressing and highlight control for the LED strip.
//!
//! - [`transport`]: the device link seam — anything that can carry an
//!   ASCII command line to the controller.
//! - [`bus`]: logical bin code → serpentine physical index → wire command,
//!   plus the recently-lit set used for batch clearing.
//! - [`scheduler`]: debounced "light this bin" requests that cancel when
//!   superseded, and staggered batch lighting.
//!
//! Hardware absence is never an error here: every call that would touch
//! the device reports [`bus::SetOutcome::NoDevice`] and otherwise does
//! nothing, so the ledger keeps working with the strip unplugged.

pub mod bus;
pub mod scheduler;
pub mod transport;
