//! Boundary with the hooked process
//!
//! The host hands the reloader string addresses. How a buffer at an address
//! is decoded, and how a new buffer is allocated for the output, depends on
//! the process and its encoding, so both sit behind [`HostStrings`].

use crate::engine::Reloader;
use crate::error::Result;

/// Attempts at processing one address before passing it through
pub const MAX_ATTEMPTS: usize = 3;

/// Addresses at or below this are character codes, not pointers
pub const CHAR_CODE_LIMIT: usize = 0xFFFF;

/// String access inside the hooked process
pub trait HostStrings {
    /// Read the NUL-terminated string at `address`
    fn decode(&self, address: usize) -> Result<String>;

    /// Store `text` as a new NUL-terminated string, returning its address
    fn encode(&self, text: &str) -> Result<usize>;
}

impl Reloader {
    /// Translate the string at `address`, returning the address to use.
    ///
    /// The input address comes back whenever nothing changes. Errors are
    /// logged and retried; after [`MAX_ATTEMPTS`] the input passes through.
    pub fn process<H: HostStrings + ?Sized>(&self, host: &H, address: usize) -> usize {
        if address == 0 {
            return 0;
        }
        if address <= CHAR_CODE_LIMIT {
            return usize::from(self.remap_char(address as u16));
        }

        for attempt in 1..=MAX_ATTEMPTS {
            match self.try_process(host, address) {
                Ok(output) => return output,
                Err(e) => tracing::error!(
                    "Failed to process string at {:#x} (attempt {}/{}): {}",
                    address,
                    attempt,
                    MAX_ATTEMPTS,
                    e
                ),
            }
        }
        address
    }

    fn try_process<H: HostStrings + ?Sized>(&self, host: &H, address: usize) -> Result<usize> {
        let snapshot = self.snapshot();
        let options = *snapshot.options();

        if options.cache_pointers {
            if let Some(output) = self.cached_pointer(address) {
                return Ok(output);
            }
        }

        let input = host.decode(address)?;
        if input.chars().all(char::is_whitespace) {
            return Ok(address);
        }

        let Some(translation) = self.resolve_with(&snapshot, &input) else {
            return Ok(address);
        };
        if translation.text == input || options.no_reload {
            return Ok(address);
        }

        let output = host.encode(&translation.text)?;
        if options.cache_pointers {
            self.remember_pointer(address, output);
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineOptions, Snapshot, TableBuilder};
    use crate::error::Error;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    /// Strings keyed by fake address
    #[derive(Default)]
    struct FakeHost {
        strings: RefCell<HashMap<usize, String>>,
        next: Cell<usize>,
        failures: Cell<usize>,
    }

    impl FakeHost {
        fn with(address: usize, text: &str) -> Self {
            let host = Self::default();
            host.strings.borrow_mut().insert(address, text.to_string());
            host.next.set(0x9000_0000);
            host
        }
    }

    impl HostStrings for FakeHost {
        fn decode(&self, address: usize) -> Result<String> {
            if self.failures.get() > 0 {
                self.failures.set(self.failures.get() - 1);
                return Err(Error::Host("decode failed".into()));
            }
            self.strings
                .borrow()
                .get(&address)
                .cloned()
                .ok_or_else(|| Error::Host(format!("no string at {address:#x}")))
        }

        fn encode(&self, text: &str) -> Result<usize> {
            let address = self.next.get();
            self.next.set(address + 0x100);
            self.strings.borrow_mut().insert(address, text.to_string());
            Ok(address)
        }
    }

    fn reloader(options: EngineOptions) -> Reloader {
        let mut builder = TableBuilder::new(false);
        builder.add_entry("Hello".into(), "Olá".into());
        Reloader::from_snapshot(Snapshot {
            options,
            table: builder.build(),
            ..Snapshot::default()
        })
    }

    fn options() -> EngineOptions {
        EngineOptions {
            dialog_check: false,
            ..EngineOptions::default()
        }
    }

    #[test]
    fn test_process_encodes_translation() {
        let host = FakeHost::with(0x1_0000, "Hello");
        let reloader = reloader(options());
        let output = reloader.process(&host, 0x1_0000);
        assert_ne!(output, 0x1_0000);
        assert_eq!(host.decode(output).unwrap(), "Olá");
    }

    #[test]
    fn test_null_char_and_miss_pass_through() {
        let host = FakeHost::with(0x1_0000, "Unknown");
        let reloader = reloader(options());
        assert_eq!(reloader.process(&host, 0), 0);
        assert_eq!(reloader.process(&host, 0x41), 0x41);
        assert_eq!(reloader.process(&host, 0x1_0000), 0x1_0000);
    }

    #[test]
    fn test_read_only_mode() {
        let host = FakeHost::with(0x1_0000, "Hello");
        let reloader = reloader(EngineOptions {
            no_reload: true,
            ..options()
        });
        assert_eq!(reloader.process(&host, 0x1_0000), 0x1_0000);
        assert!(reloader.is_recent_reply("Olá"));
    }

    #[test]
    fn test_pointer_cache() {
        let host = FakeHost::with(0x1_0000, "Hello");
        let reloader = reloader(EngineOptions {
            cache_pointers: true,
            ..options()
        });
        let first = reloader.process(&host, 0x1_0000);
        // served from the cache, without decoding again
        host.failures.set(MAX_ATTEMPTS);
        assert_eq!(reloader.process(&host, 0x1_0000), first);
    }

    #[test]
    fn test_retries_then_passes_through() {
        let host = FakeHost::with(0x1_0000, "Hello");
        let reloader = reloader(options());

        host.failures.set(MAX_ATTEMPTS - 1);
        assert_ne!(reloader.process(&host, 0x1_0000), 0x1_0000);

        let host = FakeHost::with(0x1_0000, "Hello");
        host.failures.set(MAX_ATTEMPTS);
        assert_eq!(reloader.process(&host, 0x1_0000), 0x1_0000);
    }
}
