use std::fmt::{self, Write as _};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::process;

use tracing::{debug, error};

use crate::config::{BufferConfig, GrowthPolicy, OomPolicy, READ_CHUNK_SIZE};
use crate::error::BufferError;

/// Growable reusable byte buffer
///
/// Owns a contiguous heap region of exactly `capacity` bytes, of which the
/// first `len` are in use. Works standalone (`Box<ByteBuffer>`) or embedded
/// by value in a larger struct; `Drop` releases storage either way.
#[derive(Debug)]
pub struct ByteBuffer {
    storage: Box<[u8]>,
    len: usize,
    config: BufferConfig,
}

impl ByteBuffer {
    /// Zero-initialized buffer with the default config (additive growth,
    /// unbounded capacity, abort on allocation failure)
    pub fn new(initial_capacity: usize) -> Self {
        Self::with_config(initial_capacity, BufferConfig::default())
    }

    /// A capacity of 0 is accepted but degenerate: every append must grow first
    pub fn with_config(initial_capacity: usize, config: BufferConfig) -> Self {
        Self {
            storage: vec![0u8; initial_capacity].into_boxed_slice(),
            len: 0,
            config,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// The bytes currently in use
    pub fn as_slice(&self) -> &[u8] {
        &self.storage[..self.len]
    }

    /// True when the stored content ends in a NUL byte and is therefore
    /// usable as a conventional C string
    pub fn is_string(&self) -> bool {
        self.len > 0 && self.storage[self.len - 1] == 0
    }

    /// Zero all bytes in use and reset length; capacity is retained.
    /// Use when previously stored bytes must not remain readable.
    pub fn clear(&mut self) {
        self.storage[..self.len].fill(0);
        self.len = 0;
    }

    /// Reset length and zero only the first byte; cheaper than `clear`,
    /// but bytes past offset 0 stay physically present until overwritten
    pub fn soft_clear(&mut self) {
        self.len = 0;
        if let Some(first) = self.storage.first_mut() {
            *first = 0;
        }
    }

    /// Grow capacity to `size` if currently smaller; never shrinks
    pub fn reserve(&mut self, size: usize) -> Result<(), BufferError> {
        if self.capacity() < size {
            self.realloc(size)?;
        }
        Ok(())
    }

    /// Reallocate storage to exactly `new_size` bytes. Shrinking below the
    /// current length truncates the length to `new_size`.
    pub fn resize(&mut self, new_size: usize) -> Result<(), BufferError> {
        debug_assert!(new_size > 0, "resize to zero bytes");
        self.realloc(new_size)
    }

    /// Append `data` to the end, growing capacity on demand.
    /// Empty input is a no-op.
    pub fn append(&mut self, data: &[u8]) -> Result<(), BufferError> {
        if data.is_empty() {
            return Ok(());
        }
        self.grow_for(data.len())?;
        let end = self.len + data.len();
        self.storage[self.len..end].copy_from_slice(data);
        self.len = end;
        Ok(())
    }

    /// Single-byte append
    pub fn append_char(&mut self, c: u8) -> Result<(), BufferError> {
        self.grow_for(1)?;
        self.storage[self.len] = c;
        self.len += 1;
        Ok(())
    }

    /// Append the bytes of `s`; no terminator is added
    pub fn append_str(&mut self, s: &str) -> Result<(), BufferError> {
        self.append(s.as_bytes())
    }

    /// Append a sequence of strings back to back, in order
    pub fn append_strs<'a, I>(&mut self, strs: I) -> Result<(), BufferError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for s in strs {
            self.append_str(s)?;
        }
        Ok(())
    }

    /// Append a NUL byte, putting the buffer in string mode
    pub fn terminate(&mut self) -> Result<(), BufferError> {
        self.append_char(0)
    }

    /// Append formatted text plus a trailing NUL that is written but not
    /// counted in the length. On a formatter error the buffer is unchanged.
    /// Invoked as `buf.append_fmt(format_args!(...))`.
    pub fn append_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), BufferError> {
        let mut text = String::new();
        text.write_fmt(args).map_err(|_| BufferError::Fmt)?;

        self.grow_to(self.len + text.len() + 1)?;
        let end = self.len + text.len();
        self.storage[self.len..end].copy_from_slice(text.as_bytes());
        self.storage[end] = 0;
        self.len = end;
        Ok(())
    }

    /// Stream a file into the buffer in fixed-size chunks. An open failure
    /// leaves the buffer untouched; a read error mid-stream leaves the bytes
    /// appended so far in place (no rollback).
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), BufferError> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|err| {
            error!("Failed to open {:?}: {}", path, err);
            BufferError::Io(err)
        })?;

        let mut chunk = [0u8; READ_CHUNK_SIZE];
        loop {
            let nread = match file.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    error!("Read error on {:?}: {}", path, err);
                    return Err(BufferError::Io(err));
                }
            };
            self.append(&chunk[..nread])?;
        }

        debug!("Loaded {:?}: buffer now {} bytes", path, self.len);
        Ok(())
    }

    /// ASCII-lowercase every byte in use, in place
    pub fn to_lowercase(&mut self) {
        self.storage[..self.len].make_ascii_lowercase();
    }

    fn grow_for(&mut self, extra: usize) -> Result<(), BufferError> {
        let required = self.len + extra;
        if required <= self.capacity() {
            return Ok(());
        }
        let new_cap = match self.config.growth {
            // grow by exactly what this append needs, nothing more
            GrowthPolicy::Additive => self.capacity() + extra,
            GrowthPolicy::Doubling => required.max(self.capacity() * 2),
        };
        self.realloc(new_cap)
    }

    fn grow_to(&mut self, required: usize) -> Result<(), BufferError> {
        if required <= self.capacity() {
            return Ok(());
        }
        let new_cap = match self.config.growth {
            GrowthPolicy::Additive => required,
            GrowthPolicy::Doubling => required.max(self.capacity() * 2),
        };
        self.realloc(new_cap)
    }

    fn realloc(&mut self, new_cap: usize) -> Result<(), BufferError> {
        if let Some(max) = self.config.max_capacity {
            if new_cap > max {
                return Err(BufferError::CapacityExceeded {
                    requested: new_cap,
                    max,
                });
            }
        }

        let mut next: Vec<u8> = Vec::new();
        if next.try_reserve_exact(new_cap).is_err() {
            match self.config.oom {
                OomPolicy::Abort => {
                    error!("Allocation of {} bytes failed, aborting", new_cap);
                    process::abort();
                }
                OomPolicy::Recover => {
                    return Err(BufferError::AllocFailed { requested: new_cap });
                }
            }
        }
        next.resize(new_cap, 0);

        let keep = self.len.min(new_cap);
        next[..keep].copy_from_slice(&self.storage[..keep]);
        self.storage = next.into_boxed_slice();
        if self.len > new_cap {
            self.len = new_cap;
        }
        Ok(())
    }
}
