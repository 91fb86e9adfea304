//! Word and Address Model
//!
//! Type-safe wrapper for addresses supplied by user mode. A [`UserAddr`] is
//! raw and untrusted: it carries no guarantee of being mapped, aligned, or
//! even below the kernel split. It cannot be dereferenced - the only route
//! from a `UserAddr` to the byte it names is the Address Validator plus the
//! platform probe family.
//!
//! # Security Properties
//! - Unchecked dereference of user memory is a compile-time impossibility
//! - Address arithmetic wraps instead of panicking; out-of-range results
//!   are rejected later by validation, not by arithmetic

use core::fmt;

/// Native machine word, as seen by system call arguments and results.
pub type Word = i32;

/// Unsigned view of a machine word.
pub type UWord = u32;

/// Size of a machine word in bytes.
pub const WORD_SIZE: u32 = 4;

/// First address of the kernel half of the virtual address space.
///
/// User-accessible memory lies strictly below this split; the split address
/// itself already belongs to the kernel.
pub const KERNEL_BASE: u32 = 0xC000_0000;

/// A raw, untrusted address into the calling process's address space.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct UserAddr(u32);

impl UserAddr {
    /// Wrap a raw address. No validation happens here.
    #[inline]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Get the raw address value.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Check whether the address lies in the user half of the address
    /// space. Necessary but not sufficient for safe access: a user-range
    /// address can still be unmapped, which only a probe can detect.
    #[inline]
    pub const fn is_user(self) -> bool {
        self.0 < KERNEL_BASE
    }

    /// Add a byte offset, wrapping on overflow.
    #[inline]
    pub const fn offset(self, bytes: u32) -> Self {
        Self(self.0.wrapping_add(bytes))
    }
}

impl fmt::Debug for UserAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserAddr({:#010x})", self.0)
    }
}

impl fmt::Display for UserAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}
