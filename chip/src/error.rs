use std::io;

use thiserror::Error;

use crate::opcode::Opcode;

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum ProcessError {
    #[error("Invalid opcode state '{0}'.")]
    Opcode(#[from] OpcodeError),
    #[error("Invalid stack state '{0}'.")]
    Stack(#[from] StackError),
    #[error("Memory access {from:#06X} - {to:#06X} is outside of the {len} bytes of memory.")]
    OutOfBounds { from: usize, to: usize, len: usize },
}

impl ProcessError {
    /// Only a fetch outside of memory stops the machine, every other
    /// failure is reported and skipped over.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ProcessError::Opcode(OpcodeError::MemoryInvalid { .. }))
    }
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum OpcodeError {
    #[error("An unsupported opcode was used {0:#06X?}.")]
    InvalidOpcode(Opcode),
    #[error("Pointer location invalid there can not be an opcode at {pointer}, if data len is {len}")]
    MemoryInvalid { pointer: usize, len: usize },
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum StackError {
    #[error("Stack is full!")]
    Full,
    #[error("Stack is empty!")]
    Empty,
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Unable to read the rom: {0}")]
    Io(#[from] io::Error),
    #[error("The rom is {size} bytes long, but only {max} bytes fit into memory.")]
    TooLarge { size: usize, max: usize },
}

#[derive(Error, Debug)]
pub enum RunError {
    #[error("The machine stopped: {0}")]
    Process(#[from] ProcessError),
    #[error("A device failed: {0}")]
    Device(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_errors() {
        let fetch = ProcessError::from(OpcodeError::MemoryInvalid {
            pointer: 0xFFF,
            len: 0x1000,
        });
        assert!(fetch.is_fatal());

        let recoverable = [
            ProcessError::from(OpcodeError::InvalidOpcode(0x00EA)),
            ProcessError::from(StackError::Full),
            ProcessError::from(StackError::Empty),
            ProcessError::OutOfBounds {
                from: 0xFFE,
                to: 0x1000,
                len: 0x1000,
            },
        ];
        for err in recoverable.iter() {
            assert!(!err.is_fatal(), "{} should not be fatal", err);
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            "Invalid opcode state 'An unsupported opcode was used 0x00EA.'.",
            ProcessError::from(OpcodeError::InvalidOpcode(0x00EA)).to_string()
        );
        assert_eq!(
            "The rom is 3585 bytes long, but only 3584 bytes fit into memory.",
            LoadError::TooLarge {
                size: 3585,
                max: 3584
            }
            .to_string()
        );
    }
}
