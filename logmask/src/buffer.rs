//! Reusable scratch space for masking calls.
//!
//! A [`MaskingBuffer`] is plain owned state with no synchronization. Callers
//! that mask in a tight loop can own one and pass it to
//! [`MaskingEngine::mask_body_with_buffer`](crate::MaskingEngine::mask_body_with_buffer);
//! everyone else gets a per-thread buffer that is checked out for exactly one
//! synchronous call.

use std::cell::RefCell;

/// Buffers that grew beyond this are shrunk back after a thread-local checkout.
const MAX_RETAINED_CAPACITY: usize = 64 * 1024;

const INITIAL_CAPACITY: usize = 256;

thread_local! {
    static LOCAL_BUFFER: RefCell<MaskingBuffer> =
        RefCell::new(MaskingBuffer::with_capacity(INITIAL_CAPACITY));
}

/// A character accumulator reused across masking calls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MaskingBuffer {
    text: String,
}

impl MaskingBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
        }
    }

    /// Clears the buffer and hands it out for a new masking call.
    pub fn acquire(&mut self) -> &mut Self {
        self.text.clear();
        self
    }

    pub fn push(&mut self, ch: char) -> &mut Self {
        self.text.push(ch);
        self
    }

    pub fn push_str(&mut self, text: &str) -> &mut Self {
        self.text.push_str(text);
        self
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Copies the accumulated text out, leaving the buffer's allocation in place.
    pub fn to_output(&self) -> String {
        self.text.clone()
    }

    /// Runs `f` with this thread's buffer, already cleared.
    ///
    /// Re-entrant calls on the same thread, and calls made while the thread
    /// is tearing down its locals, get a fresh temporary buffer instead of
    /// the shared one.
    pub fn with_local<R>(mut f: impl FnMut(&mut MaskingBuffer) -> R) -> R {
        LOCAL_BUFFER
            .try_with(|cell| {
                let mut buffer = cell.try_borrow_mut().ok()?;
                let result = f(buffer.acquire());
                buffer.clear();
                if buffer.text.capacity() > MAX_RETAINED_CAPACITY {
                    buffer.text.shrink_to(INITIAL_CAPACITY);
                }
                Some(result)
            })
            .ok()
            .flatten()
            .unwrap_or_else(|| f(&mut MaskingBuffer::with_capacity(INITIAL_CAPACITY)))
    }
}

impl std::fmt::Display for MaskingBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_empty() {
        let buffer = MaskingBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
    }

    #[test]
    fn appends_chain() {
        let mut buffer = MaskingBuffer::new();
        buffer.push_str("Hello").push(' ').push_str("World");
        assert_eq!(buffer.as_str(), "Hello World");
        assert_eq!(buffer.len(), 11);
        assert_eq!(buffer.to_string(), "Hello World");
    }

    #[test]
    fn acquire_clears_previous_content() {
        let mut buffer = MaskingBuffer::new();
        buffer.push_str("stale");
        let buffer = buffer.acquire();
        assert!(buffer.is_empty());
    }

    #[test]
    fn output_is_independent_of_buffer() {
        let mut buffer = MaskingBuffer::new();
        buffer.push_str("abc");
        let output = buffer.to_output();
        buffer.clear();
        assert_eq!(output, "abc");
        assert!(buffer.is_empty());
    }

    #[test]
    fn local_buffer_starts_cleared() {
        MaskingBuffer::with_local(|buffer| {
            buffer.push_str("first call");
        });
        MaskingBuffer::with_local(|buffer| {
            assert!(buffer.is_empty());
        });
    }

    #[test]
    fn local_buffer_supports_reentrant_use() {
        let inner = MaskingBuffer::with_local(|outer| {
            outer.push_str("outer");
            let inner = MaskingBuffer::with_local(|inner| {
                inner.push_str("inner");
                inner.to_output()
            });
            assert_eq!(outer.as_str(), "outer");
            inner
        });
        assert_eq!(inner, "inner");
    }

    #[test]
    fn local_buffer_sheds_oversized_allocations() {
        MaskingBuffer::with_local(|buffer| {
            buffer.push_str(&"x".repeat(MAX_RETAINED_CAPACITY * 2));
        });
        LOCAL_BUFFER.with(|cell| {
            assert!(cell.borrow().text.capacity() <= MAX_RETAINED_CAPACITY);
        });
    }

    #[test]
    fn local_buffer_is_usable_during_thread_teardown() {
        use std::{sync::Mutex, thread};

        static LATE_OUTPUT: Mutex<Option<String>> = Mutex::new(None);

        struct BufferOnDrop;

        impl Drop for BufferOnDrop {
            fn drop(&mut self) {
                let output = MaskingBuffer::with_local(|buffer| {
                    buffer.push_str("late");
                    buffer.to_output()
                });
                if let Ok(mut slot) = LATE_OUTPUT.lock() {
                    *slot = Some(output);
                }
            }
        }

        thread_local! {
            static GUARD: BufferOnDrop = BufferOnDrop;
        }

        thread::spawn(|| {
            // registered before the local buffer
            GUARD.with(|_| {});
            MaskingBuffer::with_local(|buffer| {
                buffer.push('x');
            });
        })
        .join()
        .unwrap();

        assert_eq!(LATE_OUTPUT.lock().unwrap().as_deref(), Some("late"));
    }
}
