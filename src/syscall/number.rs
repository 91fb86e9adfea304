//! System Call Numbers
//!
//! The dispatch table, expressed as an enumerated type instead of a
//! function-pointer array: every implemented call is a variant, and every
//! reserved or out-of-range number decodes to `None` - an explicit
//! "unimplemented" case rather than a null slot.
//!
//! Numbers 4-7 and 10-12 are reserved for the file-system calls this
//! kernel does not implement; the dispatcher silently ignores them.

use crate::addr::Word;

/// An implemented system call, selected by the word at the caller's stack
/// pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syscall {
    Halt,
    Exit,
    Exec,
    Wait,
    Read,
    Write,
    Pibonacci,
    SumOfFourIntegers,
}

impl Syscall {
    /// Decode a call number read from the caller's stack.
    ///
    /// Reserved and out-of-range numbers decode to `None`; the caller must
    /// treat that as "do nothing observable", not as an error.
    pub const fn from_nr(nr: Word) -> Option<Self> {
        match nr {
            0 => Some(Self::Halt),
            1 => Some(Self::Exit),
            2 => Some(Self::Exec),
            3 => Some(Self::Wait),
            8 => Some(Self::Read),
            9 => Some(Self::Write),
            13 => Some(Self::Pibonacci),
            14 => Some(Self::SumOfFourIntegers),
            // 4-7 and 10-12 are reserved file-system slots; everything
            // else is out of range.
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_implemented_calls() {
        assert_eq!(Syscall::from_nr(0), Some(Syscall::Halt));
        assert_eq!(Syscall::from_nr(1), Some(Syscall::Exit));
        assert_eq!(Syscall::from_nr(2), Some(Syscall::Exec));
        assert_eq!(Syscall::from_nr(3), Some(Syscall::Wait));
        assert_eq!(Syscall::from_nr(8), Some(Syscall::Read));
        assert_eq!(Syscall::from_nr(9), Some(Syscall::Write));
        assert_eq!(Syscall::from_nr(13), Some(Syscall::Pibonacci));
        assert_eq!(Syscall::from_nr(14), Some(Syscall::SumOfFourIntegers));
    }

    #[test]
    fn reserved_slots_are_unimplemented() {
        for nr in [4, 5, 6, 7, 10, 11, 12] {
            assert_eq!(Syscall::from_nr(nr), None);
        }
    }

    #[test]
    fn out_of_range_numbers_are_unimplemented() {
        assert_eq!(Syscall::from_nr(15), None);
        assert_eq!(Syscall::from_nr(-1), None);
        assert_eq!(Syscall::from_nr(Word::MAX), None);
        assert_eq!(Syscall::from_nr(Word::MIN), None);
    }
}
