//! Platform Boundary
//!
//! Everything this core needs from the surrounding kernel, expressed as one
//! trait: the fault-safe probe pair into user memory, the console device,
//! power control, and the process-lifecycle collaborators.
//!
//! # Security Considerations
//! - `probe_byte`/`poke_byte` are the only routes into user memory. A real
//!   implementation performs the access at a designated recovery address
//!   known to the page-fault handler, so a fault is redirected into the
//!   failure return instead of escalating into a kernel fault. That trick
//!   stays an internal detail of the platform; this core only ever sees the
//!   fallible result.
//! - Console output atomicity is owned by the device layer; concurrent
//!   writers are serialized there, not here.

use crate::addr::{UserAddr, Word};

/// Process identifier handed out by the process-lifecycle collaborator.
pub type Pid = i32;

/// Services the embedding kernel provides to the syscall core.
pub trait Platform {
    /// Fault-safe read of one byte of user memory.
    ///
    /// Returns `None` if the address is unmapped or otherwise inaccessible;
    /// never faults the kernel.
    fn probe_byte(&self, addr: UserAddr) -> Option<u8>;

    /// Fault-safe write of one byte of user memory.
    ///
    /// Returns `false` on failure instead of faulting. Exists alongside
    /// `probe_byte` so handlers that fill caller-supplied buffers have a
    /// write path with the same guarantees.
    fn poke_byte(&mut self, addr: UserAddr, byte: u8) -> bool;

    /// Powers down the machine immediately.
    ///
    /// Never returns on real hardware; mock platforms may return so the
    /// outcome stays observable in tests.
    fn power_off(&mut self);

    /// Blocking read of one character from the console input device.
    fn read_console_char(&mut self) -> u8;

    /// Writes `len` bytes starting at `base` to the console output device
    /// verbatim. `base` has passed the Address Validator; the device layer
    /// resolves the rest of the range.
    fn write_console_bytes(&mut self, base: UserAddr, len: usize);

    /// Starts a new process from the NUL-terminated executable name at
    /// `name` (validated to be readable at its first byte). Returns the new
    /// process id, or -1 if the process could not be started.
    fn start_process(&mut self, name: UserAddr) -> Pid;

    /// Blocks the caller until process `pid` terminates and returns its
    /// exit status, or -1 if `pid` is not a waitable child.
    fn await_process(&mut self, pid: Pid) -> Word;

    /// Name of the currently executing process, for exit notices.
    fn current_name(&self) -> &str;

    /// Records the current process's exit status. Last writer wins.
    fn set_exit_status(&mut self, status: Word);

    /// Ends the current process. Control never returns to the interrupted
    /// user context; the core does no further work on the caller's behalf
    /// after this call.
    fn terminate_current(&mut self);
}
