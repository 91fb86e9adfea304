//! System Call Handlers and Dispatch
//!
//! Routes a decoded call to its handler and implements the handlers
//! themselves, plus the uniform termination path for invalid references.
//!
//! # Security Considerations
//! - The dispatcher validates exactly the call-selecting pointers it
//!   inspects itself (exec's filename pointer, read/write's buffer
//!   pointer); each handler re-validates every slot it dereferences
//! - A failed validation anywhere surfaces as [`InvalidAccess`] and is
//!   resolved by [`terminate_for_invalid_access`] - the process dies, the
//!   kernel continues
//! - Handler-local domain errors return the [`FAILURE`] sentinel and leave
//!   the process running

use log::{info, warn};

use crate::addr::{UserAddr, Word, WORD_SIZE};
use crate::platform::Platform;

use super::number::Syscall;
use super::validate::{self, InvalidAccess};

/// Console input descriptor (the only readable one).
pub const STDIN_FD: Word = 0;

/// Console output descriptor (the only writable one).
pub const STDOUT_FD: Word = 1;

/// Sentinel returned for handler-local domain errors.
pub const FAILURE: Word = -1;

/// Exit status recorded when a process is killed for an invalid reference.
pub const EXIT_STATUS_KILLED: Word = -1;

/// Largest index whose Fibonacci number still fits a signed word.
pub const MAX_FIBONACCI_INDEX: Word = 46;

/// No call takes more than this many word-sized arguments.
pub const MAX_ARGS: usize = 4;

/// Raw addresses of the caller's argument slots.
///
/// Slot `k` is `sp + k * WORD_SIZE`. These are addresses into the caller's
/// address space, not yet known to be valid; whoever dereferences a slot
/// validates it first.
#[derive(Debug, Clone, Copy)]
pub struct ArgSlots([UserAddr; MAX_ARGS]);

impl ArgSlots {
    /// Compute the slot addresses for a (validated) stack pointer. No
    /// dereference happens here.
    pub fn from_stack_pointer(sp: UserAddr) -> Self {
        Self(core::array::from_fn(|k| {
            sp.offset((k as u32 + 1) * WORD_SIZE)
        }))
    }

    /// Address of argument `k`, 1-based to match the calling convention.
    pub fn arg(&self, k: usize) -> UserAddr {
        debug_assert!((1..=MAX_ARGS).contains(&k));
        self.0[k - 1]
    }
}

/// What the trap return path must do once a call completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Store the value in the frame's return slot and resume the caller.
    Return(Word),
    /// The calling process no longer exists; do not resume it.
    Terminated,
    /// Power-off was requested. Only reachable with platforms whose
    /// `power_off` returns (real hardware never comes back).
    PowerOff,
}

/// Invoke the handler for a decoded call.
///
/// Validates the call-selecting pointers this layer inspects before the
/// handler runs; the handler owns validation of everything it dereferences
/// itself. An `Err` means the caller referenced memory it should not have
/// and must be resolved through [`terminate_for_invalid_access`].
pub fn dispatch<P: Platform>(
    platform: &mut P,
    call: Syscall,
    args: &ArgSlots,
) -> Result<Action, InvalidAccess> {
    match call {
        Syscall::Exec => require_pointee(platform, args.arg(1))?,
        Syscall::Read | Syscall::Write => require_pointee(platform, args.arg(2))?,
        _ => {}
    }

    match call {
        Syscall::Halt => sys_halt(platform),
        Syscall::Exit => sys_exit(platform, args),
        Syscall::Exec => sys_exec(platform, args).map(Action::Return),
        Syscall::Wait => sys_wait(platform, args).map(Action::Return),
        Syscall::Read => sys_read(platform, args).map(Action::Return),
        Syscall::Write => sys_write(platform, args).map(Action::Return),
        Syscall::Pibonacci => sys_pibonacci(platform, args).map(Action::Return),
        Syscall::SumOfFourIntegers => {
            sys_sum_of_four_integers(platform, args).map(Action::Return)
        }
    }
}

/// Uniform handling of "this process touched memory it should not have".
///
/// Records the fixed failure status, emits the exit notice and ends the
/// current process. Control never returns to the faulting call site; the
/// trap layer must not resume the caller after this runs. Safe to reach
/// from multiple call sites - a process only really terminates once.
pub fn terminate_for_invalid_access<P: Platform>(platform: &mut P) {
    warn!("{}: exit({})", platform.current_name(), EXIT_STATUS_KILLED);
    platform.set_exit_status(EXIT_STATUS_KILLED);
    platform.terminate_current();
}

/// Read the pointer stored in `slot` and validate the address it names.
///
/// This is the double-indirection check the dispatcher performs for
/// pointer arguments it inspects before dispatching: the slot itself is
/// validated by `read_user_word`, then the pointed-to address is run
/// through the validator.
fn require_pointee<P: Platform>(platform: &P, slot: UserAddr) -> Result<(), InvalidAccess> {
    let ptr = validate::read_user_word(platform, slot)?;
    if validate::validate_user_addr(platform, UserAddr::new(ptr as u32)) {
        Ok(())
    } else {
        Err(InvalidAccess)
    }
}

/// halt: powers down the machine immediately; does not return.
fn sys_halt<P: Platform>(platform: &mut P) -> Result<Action, InvalidAccess> {
    platform.power_off();
    // Unreachable on real hardware.
    Ok(Action::PowerOff)
}

/// exit(status): records the exit status, emits the notice, terminates the
/// current process normally.
fn sys_exit<P: Platform>(platform: &mut P, args: &ArgSlots) -> Result<Action, InvalidAccess> {
    let status = validate::read_user_word(platform, args.arg(1))?;
    info!("{}: exit({})", platform.current_name(), status);
    platform.set_exit_status(status);
    platform.terminate_current();
    Ok(Action::Terminated)
}

/// exec(filename): starts a new process from the named executable and
/// returns its pid.
fn sys_exec<P: Platform>(platform: &mut P, args: &ArgSlots) -> Result<Word, InvalidAccess> {
    let filename = validate::read_user_word(platform, args.arg(1))?;
    Ok(platform.start_process(UserAddr::new(filename as u32)))
}

/// wait(pid): blocks until the child terminates and returns its exit
/// status.
fn sys_wait<P: Platform>(platform: &mut P, args: &ArgSlots) -> Result<Word, InvalidAccess> {
    let pid = validate::read_user_word(platform, args.arg(1))?;
    Ok(platform.await_process(pid))
}

/// read(fd, buf, len): console input reads exactly `len` characters one at
/// a time into the caller's buffer. Every other descriptor reads nothing
/// and returns 0 - callers cannot tell "zero bytes" from "unsupported".
fn sys_read<P: Platform>(platform: &mut P, args: &ArgSlots) -> Result<Word, InvalidAccess> {
    let fd = validate::read_user_word(platform, args.arg(1))?;
    let buf = validate::read_user_word(platform, args.arg(2))?;
    let len = validate::read_user_word(platform, args.arg(3))?;

    if fd != STDIN_FD {
        return Ok(0);
    }

    let base = UserAddr::new(buf as u32);
    let mut i: u32 = 0;
    while (i as Word) < len {
        let ch = platform.read_console_char();
        validate::write_user_byte(platform, base.offset(i), ch)?;
        i += 1;
    }
    Ok(len)
}

/// write(fd, buf, len): console output writes the buffer verbatim. Every
/// other descriptor writes nothing and returns 0.
fn sys_write<P: Platform>(platform: &mut P, args: &ArgSlots) -> Result<Word, InvalidAccess> {
    let fd = validate::read_user_word(platform, args.arg(1))?;
    let buf = validate::read_user_word(platform, args.arg(2))?;
    let len = validate::read_user_word(platform, args.arg(3))?;

    if fd != STDOUT_FD {
        return Ok(0);
    }

    if len > 0 {
        platform.write_console_bytes(UserAddr::new(buf as u32), len as usize);
    }
    Ok(len)
}

/// pibonacci(n): demo call; iterative Fibonacci in signed words. Indices
/// above [`MAX_FIBONACCI_INDEX`] return the failure sentinel with a
/// diagnostic; the process keeps running.
fn sys_pibonacci<P: Platform>(platform: &mut P, args: &ArgSlots) -> Result<Word, InvalidAccess> {
    let n = validate::read_user_word(platform, args.arg(1))?;

    if n > MAX_FIBONACCI_INDEX {
        warn!(
            "{}-th Fibonacci number is the largest number as signed integer.",
            MAX_FIBONACCI_INDEX
        );
        return Ok(FAILURE);
    }
    if n <= 0 {
        return Ok(0);
    }

    let (mut prev, mut cur): (Word, Word) = (0, 1);
    // Stops at index n, so nothing past the representable bound is ever
    // computed.
    for _ in 1..n {
        let next = prev + cur;
        prev = cur;
        cur = next;
    }
    Ok(cur)
}

/// sum_of_four_integers(a, b, c, d): demo call; fixed-width signed sum with
/// wraparound.
fn sys_sum_of_four_integers<P: Platform>(
    platform: &mut P,
    args: &ArgSlots,
) -> Result<Word, InvalidAccess> {
    let mut sum: Word = 0;
    for k in 1..=MAX_ARGS {
        sum = sum.wrapping_add(validate::read_user_word(platform, args.arg(k))?);
    }
    Ok(sum)
}
