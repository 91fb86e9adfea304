//! System Call Input Validation
//!
//! Decides whether user-supplied addresses are safe to dereference, and
//! provides the fault-safe word/byte accessors built on top of the
//! platform probe.
//!
//! # Security Principles
//! - Validate ALL user addresses before use
//! - Fail-secure: an address is invalid unless proven otherwise
//! - Range check AND probe: "user range" is necessary but not sufficient,
//!   since an address below the split can still be unmapped - only the
//!   probe detects that
//! - One chokepoint: every validation in this crate funnels through
//!   [`validate_user_addr`]; no caller inlines its own range check

use crate::addr::{UserAddr, Word, WORD_SIZE};
use crate::platform::Platform;

/// A user-supplied address failed validation.
///
/// Propagated with `?` to the trap layer and resolved exclusively by
/// terminating the offending process; never recovered locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidAccess;

/// Decide whether a user-supplied address is safe to dereference.
///
/// True iff the address lies strictly below the kernel split and a
/// fault-safe probe of the byte it names succeeds. No side effects beyond
/// the probe's.
pub fn validate_user_addr<P: Platform>(platform: &P, addr: UserAddr) -> bool {
    read_user_byte(platform, addr).is_ok()
}

/// Fault-safe read of one byte of user memory.
///
/// Range check plus a single probe; the probe that proves the byte
/// readable is the one that fetches it, so there is no window between
/// checking and reading.
pub fn read_user_byte<P: Platform>(platform: &P, addr: UserAddr) -> Result<u8, InvalidAccess> {
    if !addr.is_user() {
        return Err(InvalidAccess);
    }
    platform.probe_byte(addr).ok_or(InvalidAccess)
}

/// Fault-safe read of one little-endian word of user memory.
///
/// Every byte of the word is validated individually, so a word straddling
/// the edge of a mapping is rejected rather than partially read.
pub fn read_user_word<P: Platform>(platform: &P, addr: UserAddr) -> Result<Word, InvalidAccess> {
    let mut bytes = [0u8; WORD_SIZE as usize];
    for (i, byte) in bytes.iter_mut().enumerate() {
        *byte = read_user_byte(platform, addr.offset(i as u32))?;
    }
    Ok(Word::from_le_bytes(bytes))
}

/// Fault-safe write of one byte of user memory at a validated address.
pub fn write_user_byte<P: Platform>(
    platform: &mut P,
    addr: UserAddr,
    byte: u8,
) -> Result<(), InvalidAccess> {
    if !validate_user_addr(platform, addr) {
        return Err(InvalidAccess);
    }
    if platform.poke_byte(addr, byte) {
        Ok(())
    } else {
        Err(InvalidAccess)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addr::KERNEL_BASE;
    use crate::platform::mock::{MockPlatform, WINDOW_BASE, WINDOW_SIZE};

    #[test]
    fn accepts_mapped_user_address() {
        let p = MockPlatform::new();
        assert!(validate_user_addr(&p, UserAddr::new(WINDOW_BASE)));
        assert!(validate_user_addr(
            &p,
            UserAddr::new(WINDOW_BASE + WINDOW_SIZE - 1)
        ));
    }

    #[test]
    fn rejects_unmapped_user_address() {
        let p = MockPlatform::new();
        assert!(!validate_user_addr(&p, UserAddr::new(WINDOW_BASE - 1)));
        assert!(!validate_user_addr(
            &p,
            UserAddr::new(WINDOW_BASE + WINDOW_SIZE)
        ));
    }

    #[test]
    fn boundary_at_kernel_split_is_exact() {
        // Window straddles the split so the probe alone would succeed on
        // both sides; the range check must still reject the kernel half.
        let p = MockPlatform::with_window(KERNEL_BASE - 0x800, 0x1000);
        assert!(validate_user_addr(&p, UserAddr::new(KERNEL_BASE - 1)));
        assert!(!validate_user_addr(&p, UserAddr::new(KERNEL_BASE)));
        assert!(!validate_user_addr(&p, UserAddr::new(KERNEL_BASE + 1)));
    }

    #[test]
    fn reads_little_endian_word() {
        let mut p = MockPlatform::new();
        p.store_bytes(WINDOW_BASE, &[0x78, 0x56, 0x34, 0x12]);
        assert_eq!(
            read_user_word(&p, UserAddr::new(WINDOW_BASE)),
            Ok(0x1234_5678)
        );
    }

    #[test]
    fn rejects_word_straddling_end_of_mapping() {
        let p = MockPlatform::new();
        let straddle = WINDOW_BASE + WINDOW_SIZE - 2;
        assert_eq!(
            read_user_word(&p, UserAddr::new(straddle)),
            Err(InvalidAccess)
        );
    }

    #[test]
    fn writes_byte_through_poke() {
        let mut p = MockPlatform::new();
        let addr = WINDOW_BASE + 0x40;
        assert_eq!(write_user_byte(&mut p, UserAddr::new(addr), 0xAB), Ok(()));
        assert_eq!(p.byte_at(addr), 0xAB);
    }

    #[test]
    fn read_user_byte_probes_exactly_once() {
        use crate::platform::Pid;
        use core::cell::Cell;

        struct ProbeCounter {
            probes: Cell<usize>,
        }

        impl Platform for ProbeCounter {
            fn probe_byte(&self, addr: UserAddr) -> Option<u8> {
                self.probes.set(self.probes.get() + 1);
                if addr.is_user() {
                    Some(0x7F)
                } else {
                    None
                }
            }
            fn poke_byte(&mut self, _addr: UserAddr, _byte: u8) -> bool {
                false
            }
            fn power_off(&mut self) {}
            fn read_console_char(&mut self) -> u8 {
                0
            }
            fn write_console_bytes(&mut self, _base: UserAddr, _len: usize) {}
            fn start_process(&mut self, _name: UserAddr) -> Pid {
                -1
            }
            fn await_process(&mut self, _pid: Pid) -> Word {
                -1
            }
            fn current_name(&self) -> &str {
                "probe-counter"
            }
            fn set_exit_status(&mut self, _status: Word) {}
            fn terminate_current(&mut self) {}
        }

        let p = ProbeCounter {
            probes: Cell::new(0),
        };
        assert_eq!(read_user_byte(&p, UserAddr::new(0x1000)), Ok(0x7F));
        assert_eq!(p.probes.get(), 1);

        // A kernel address is rejected by the range check alone.
        p.probes.set(0);
        assert_eq!(
            read_user_byte(&p, UserAddr::new(KERNEL_BASE)),
            Err(InvalidAccess)
        );
        assert_eq!(p.probes.get(), 0);
    }

    #[test]
    fn rejects_write_outside_mapping() {
        let mut p = MockPlatform::new();
        assert_eq!(
            write_user_byte(&mut p, UserAddr::new(KERNEL_BASE), 1),
            Err(InvalidAccess)
        );
        assert_eq!(
            write_user_byte(&mut p, UserAddr::new(WINDOW_BASE - 1), 1),
            Err(InvalidAccess)
        );
    }
}
