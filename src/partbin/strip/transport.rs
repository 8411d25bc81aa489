use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// One-way link to the LED controller. Implementations deliver a single
/// ASCII command line; the protocol has no acknowledgement channel, so
/// there is nothing to read back.
pub trait Transport: Send {
    fn send(&mut self, command: &str) -> io::Result<()>;
}

/// Raw serial device node (e.g. `/dev/ttyUSB0`), written as a plain file.
/// Line settings (baud rate, parity) are expected to be configured on the
/// port beforehand, e.g. by `stty` or a udev rule.
pub struct TtyLink {
    device: File,
}

impl TtyLink {
    pub fn open(path: &Path) -> io::Result<Self> {
        let device = OpenOptions::new().write(true).open(path)?;
        Ok(Self { device })
    }
}

impl Transport for TtyLink {
    fn send(&mut self, command: &str) -> io::Result<()> {
        self.device.write_all(command.as_bytes())?;
        self.device.flush()
    }
}

/// Records every command instead of sending it. Test double.
#[cfg(any(test, feature = "test_utils"))]
pub mod mock {
    use super::Transport;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    pub struct MockLink {
        sent: Arc<Mutex<Vec<String>>>,
    }

    impl MockLink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn sent(&self) -> Vec<String> {
            self.sent.lock().expect("mock link poisoned").clone()
        }
    }

    impl Transport for MockLink {
        fn send(&mut self, command: &str) -> io::Result<()> {
            self.sent
                .lock()
                .expect("mock link poisoned")
                .push(command.to_string());
            Ok(())
        }
    }
}
