//! Trap Entry for System Calls
//!
//! The privileged entry point reached when user mode executes the syscall
//! trap. The interrupt glue of the surrounding kernel saves the caller's
//! registers, builds a [`TrapFrame`] view of them, calls [`handle_trap`]
//! and then resumes, reschedules or powers off according to the returned
//! [`TrapOutcome`].
//!
//! # Security Considerations
//! - Nothing read from the caller's stack is trusted until the address it
//!   came from passed the Address Validator - including the call number
//!   itself
//! - Unknown call numbers do nothing observable: no termination, no error,
//!   return slot untouched (a deliberately permissive default)
//! - Every invalid reference funnels into the one termination path

use log::debug;

use crate::addr::{UserAddr, UWord, Word};
use crate::platform::Platform;
use crate::syscall::{
    dispatch, read_user_word, terminate_for_invalid_access, validate_user_addr, Action, ArgSlots,
    Syscall,
};

/// Interrupt vector reserved for the syscall trap.
pub const SYSCALL_VECTOR: u8 = 0x30;

/// Minimal view of the trap frame the interrupt glue must supply: the
/// caller's stack pointer at trap time, and a writable return-value slot
/// mapped to the caller's return register.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct TrapFrame {
    /// Caller's stack pointer at trap time.
    pub user_sp: UWord,
    /// Return-value slot; written only for calls that return a value.
    pub retval: Word,
}

/// What the interrupt glue must do after the trap is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapOutcome {
    /// Resume the interrupted user context.
    Resumed,
    /// The calling process no longer exists; schedule something else.
    Terminated,
    /// Power-off was requested. Only observable with platforms whose
    /// `power_off` returns.
    PoweredOff,
}

/// Handle one syscall trap.
///
/// Validates the caller's stack pointer, reads the call number, computes
/// the argument slots and dispatches. The handler's result (if any) is
/// stored into the frame's return slot - unless the calling process was
/// terminated, in which case the frame is left alone and the caller is
/// never resumed.
pub fn handle_trap<P: Platform>(platform: &mut P, frame: &mut TrapFrame) -> TrapOutcome {
    let sp = UserAddr::new(frame.user_sp);

    // The call number is only trusted once the stack pointer addressing it
    // has itself passed validation.
    if !validate_user_addr(platform, sp) {
        terminate_for_invalid_access(platform);
        return TrapOutcome::Terminated;
    }

    let nr = match read_user_word(platform, sp) {
        Ok(nr) => nr,
        Err(_) => {
            terminate_for_invalid_access(platform);
            return TrapOutcome::Terminated;
        }
    };

    let call = match Syscall::from_nr(nr) {
        Some(call) => call,
        None => {
            debug!("ignoring unimplemented syscall {}", nr);
            return TrapOutcome::Resumed;
        }
    };

    let args = ArgSlots::from_stack_pointer(sp);

    match dispatch(platform, call, &args) {
        Ok(Action::Return(value)) => {
            frame.retval = value;
            TrapOutcome::Resumed
        }
        Ok(Action::Terminated) => TrapOutcome::Terminated,
        Ok(Action::PowerOff) => TrapOutcome::PoweredOff,
        Err(_) => {
            terminate_for_invalid_access(platform);
            TrapOutcome::Terminated
        }
    }
}
