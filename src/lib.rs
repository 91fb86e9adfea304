//! Margay Syscall Core - Trusted System-Call Boundary
//!
//! The mechanism by which untrusted user-mode code requests privileged
//! services, and the mechanism by which the kernel defends itself against
//! malicious or buggy pointers supplied by that code.
//!
//! # Security Model
//! - Whitelist dispatch: only enumerated call numbers run; everything else
//!   is silently ignored
//! - Every user-supplied address passes a single validator before any
//!   dereference
//! - User memory is reached only through fault-safe probes: a bad pointer
//!   can kill the calling process, never the kernel
//!
//! # Architecture
//! - 32-bit words; user/kernel split at `addr::KERNEL_BASE`
//! - The surrounding kernel supplies paging, console, power and process
//!   lifecycle through the [`Platform`] trait
//! - Interrupt glue hands each trap to [`handle_trap`] and acts on the
//!   returned [`TrapOutcome`]

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod addr;
pub mod logger;
pub mod platform;
pub mod syscall;
pub mod trap;

pub use addr::{UserAddr, Word};
pub use platform::{Pid, Platform};
pub use trap::{handle_trap, TrapFrame, TrapOutcome};
