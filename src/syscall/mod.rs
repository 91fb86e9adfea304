//! System Call Interface
//!
//! Provides the secure system call surface for user-mode processes.
//!
//! # Security Model
//! - Whitelist approach: only enumerated calls run; reserved and unknown
//!   numbers are silently ignored
//! - All pointer arguments pass the Address Validator before use
//! - An invalid reference kills the calling process, never the kernel
//!
//! # Current Syscalls
//! - 0:  halt() - power down the machine
//! - 1:  exit(status) - terminate the current process
//! - 2:  exec(filename) - start a new process
//! - 3:  wait(pid) - await a child's exit status
//! - 8:  read(fd, buf, len) - console input
//! - 9:  write(fd, buf, len) - console output
//! - 13: pibonacci(n) - demo: n-th Fibonacci number
//! - 14: sum_of_four_integers(a, b, c, d) - demo: wrapping sum

mod handler;
mod number;
mod validate;

pub use handler::{
    dispatch, terminate_for_invalid_access, Action, ArgSlots, EXIT_STATUS_KILLED, FAILURE,
    MAX_ARGS, MAX_FIBONACCI_INDEX, STDIN_FD, STDOUT_FD,
};
pub use number::Syscall;
pub use validate::{
    read_user_byte, read_user_word, validate_user_addr, write_user_byte, InvalidAccess,
};
