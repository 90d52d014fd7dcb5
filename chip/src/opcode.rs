//! Opcode abstractions, functionality and constants.
use std::{
    convert::{TryFrom, TryInto},
    fmt,
};

use crate::{definitions::memory, OpcodeError, ProcessError};

/// the base mask used for generating all the other sub masks
pub(crate) const OPCODE_MASK_FFFF: u16 = u16::MAX;

/// the mask for the first twelve bits
pub(crate) const OPCODE_MASK_FFF0: u16 = OPCODE_MASK_FFFF << 4;

/// the mask for the first eight bits
pub(crate) const OPCODE_MASK_FF00: u16 = OPCODE_MASK_FFFF << 8;

/// the mask for the first four bits
pub(crate) const OPCODE_MASK_F000: u16 = OPCODE_MASK_FFFF << 12;

/// the mask for the last four bits
pub(crate) const OPCODE_MASK_000F: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FFF0;

/// the mask for the last eight bits
pub(crate) const OPCODE_MASK_00FF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FF00;

/// the mask for the last twelve bits
pub(crate) const OPCODE_MASK_0FFF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_F000;

/// the size of a single byte
const BYTE_SIZE: u16 = 0x8;

/// a wrapper type for u16 to make it clear what is meant to be used
pub type Opcode = u16;

/// will build an opcode from data and the given point
/// # Arguments
///
/// - `data` - A slice of u8 data entries used to generate the opcodes
/// - `pointer` - Where in the data the opcode shall be extracted, so `pointer` and `pointer + 1` make
/// the opcode up
///
/// # Example
/// ```rust
/// # use chip::opcode::*;
/// # use chip::OpcodeError;
///  const OPCODES: [Opcode; 2] = [0x00EE, 0x1EDA];
///  const SPLIT_OPCODE: [u8; 4] = [0x00, 0xEE, 0x1E, 0xDA];
///  for (i, val) in OPCODES.iter().enumerate() {
///      let opcode = build_opcode(&SPLIT_OPCODE, i * 2).expect("This will work.");
///      assert_eq!(opcode, *val);
///  }
/// # let pointer = 3;
/// # let err = OpcodeError::MemoryInvalid {pointer, len: SPLIT_OPCODE.len() };
/// # assert_eq!(
/// #    Err(err),
/// #    build_opcode(&SPLIT_OPCODE, pointer)
/// # );
/// ```
pub fn build_opcode(data: &[u8], pointer: usize) -> Result<Opcode, OpcodeError> {
    // controlling that there is no illegal access here
    if pointer < data.len() && pointer + 1 < data.len() {
        Ok(Opcode::from_be_bytes([data[pointer], data[pointer + 1]]))
    } else {
        Err(OpcodeError::MemoryInvalid {
            pointer,
            len: data.len(),
        })
    }
}

/// These are special traits used to filter out information
/// from opcodes
pub trait OpcodeTrait {
    /// the instruction family, the highest nibble `T` of `TNNN`
    fn t(&self) -> usize;

    /// this is an opcode extractor for the opcode type `TNNN`
    /// - `NNN` is an address
    fn nnn(&self) -> usize;

    /// this is an opcode extractor for the opcode type `TXNN`
    /// - `X` is a register index
    /// - `NN` is a constant
    fn xnn(&self) -> (usize, u8);

    /// this is an opcode extractor for the opcode type `TXYN`
    /// - `X` is a register index
    /// - `Y` is a register index
    /// - `N` is a constant or an opcode subtype
    fn xyn(&self) -> (usize, usize, usize);

    /// this is an opcode extractor for the opcode type `TXYT`
    fn xy(&self) -> (usize, usize);

    /// this is an opcode extractor for the opcode type `TXTT`
    fn x(&self) -> usize;
}

impl OpcodeTrait for Opcode {
    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.t(), 0x1);
    /// ```
    fn t(&self) -> usize {
        const SHIFT: u16 = 3 * BYTE_SIZE / 2;
        ((self & OPCODE_MASK_F000) >> SHIFT) as usize
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.nnn(), 0xEDA)
    /// ```
    fn nnn(&self) -> usize {
        (self & OPCODE_MASK_0FFF) as usize
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.xnn(), (0xE, 0xDA));
    /// ```
    fn xnn(&self) -> (usize, u8) {
        let x = self.x();
        let nn = (self & OPCODE_MASK_00FF) as u8;
        (x, nn)
    }

    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.xyn(), (0xE, 0xD, 0xA));
    /// ```
    fn xyn(&self) -> (usize, usize, usize) {
        let (x, y) = self.xy();
        let n = (self & OPCODE_MASK_000F) as usize;
        (x, y, n)
    }

    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.xy(), (0xE, 0xD));
    /// ```
    fn xy(&self) -> (usize, usize) {
        let x = self.x();
        const MASK: u16 = OPCODE_MASK_00FF ^ OPCODE_MASK_000F;
        const NIBBLE: u16 = BYTE_SIZE / 2;
        let y = ((self & MASK) >> NIBBLE) as usize;
        (x, y)
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.x(), 0xE);
    /// ```
    fn x(&self) -> usize {
        ((self & OPCODE_MASK_0FFF & OPCODE_MASK_FF00) >> BYTE_SIZE) as usize
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
/// Represents the program steps that the chip
/// can take.
pub enum ProgramCounterStep {
    /// Will not change the program counter
    None,
    /// Will move the program counter to the next opcode
    Next,
    /// Will jump over the next opcode
    Skip,
    /// Will simply move the program counter to the given location.
    /// A location outside of memory is only detected by the next fetch.
    Jump(usize),
}

impl ProgramCounterStep {
    /// Will return a Skip if the condition is true.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::Next, ProgramCounterStep::cond(false));
    /// assert_eq!(ProgramCounterStep::Skip, ProgramCounterStep::cond(true));
    /// ```
    #[inline]
    pub fn cond(cond: bool) -> Self {
        if cond {
            ProgramCounterStep::Skip
        } else {
            ProgramCounterStep::Next
        }
    }

    /// Maps the [`ProgramCounterStep`](ProgramCounterStep) to the corresponding movement distance,
    /// or the target in the case of a jump.
    #[inline]
    pub fn step(&self) -> usize {
        match *self {
            ProgramCounterStep::Next => memory::opcodes::SIZE,
            ProgramCounterStep::Skip => 2 * memory::opcodes::SIZE,
            ProgramCounterStep::None => 0,
            ProgramCounterStep::Jump(pointer) => pointer,
        }
    }
}

/// Wrapper used by the conversion macros, so that the decoded operand types
/// can be built from raw opcodes without implementing `TryFrom` on them directly.
#[repr(transparent)]
struct TryIntoHandler<T>(T);

#[inline]
fn err<T>(value: Opcode) -> Result<T, OpcodeError> {
    Err(OpcodeError::InvalidOpcode(value))
}

#[inline]
fn try_into<To, From>(val: From, value: Opcode) -> Result<To, OpcodeError>
where
    From: TryInto<TryIntoHandler<To>>,
{
    let inner: TryIntoHandler<To> = val.try_into().or_else(|_| err(value))?;
    Ok(inner.0)
}

macro_rules! implTryIntoInner {
    ( $type_name:ty : $type_from:ty : $inner:expr) => {
        impl TryFrom<$type_from> for TryIntoHandler<$type_name> {
            type Error = ();

            fn try_from(value: $type_from) -> Result<Self, Self::Error> {
                let inner = $inner(value)?;
                Ok(Self(inner))
            }
        }
    };
}

macro_rules! implTryIntoEnum {
    ($type_name:ty : $type_from:ty : $( $key:literal => $val:expr ),+ $(,)? ) => {
        implTryIntoInner!(
            $type_name : $type_from :
            |value: $type_from| {
                match value {
                    $(
                        $key => Ok($val),
                    )+
                    _ => Err(()),
                }
            }
        );
    };
}

/// Operand of the form `TNNN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address {
    pub nnn: usize,
}

implTryIntoInner!(Address : Opcode : |value: Opcode| -> Result<Address, ()> {
    Ok(Address { nnn: value.nnn() })
});

/// Operand of the form `TXNN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterConst {
    pub x: usize,
    pub nn: u8,
}

implTryIntoInner!(RegisterConst : Opcode : |value: Opcode| -> Result<RegisterConst, ()> {
    let (x, nn) = value.xnn();
    Ok(RegisterConst { x, nn })
});

/// Operand of the form `TXY0`, any other low nibble is not a valid opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterPair {
    pub x: usize,
    pub y: usize,
}

implTryIntoInner!(RegisterPair : Opcode : |value: Opcode| -> Result<RegisterPair, ()> {
    match value.xyn() {
        (x, y, 0) => Ok(RegisterPair { x, y }),
        _ => Err(()),
    }
});

/// Operand of the draw opcode `DXYN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub x: usize,
    pub y: usize,
    pub n: usize,
}

implTryIntoInner!(Sprite : Opcode : |value: Opcode| -> Result<Sprite, ()> {
    let (x, y, n) = value.xyn();
    Ok(Sprite { x, y, n })
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum System {
    /// Clears the display
    Clear,
    /// Returns from the subroutine
    Return,
}

implTryIntoEnum!(System : Opcode :
    // 00E0
    // clear display
    0x00E0 => System::Clear,
    // 00EE
    // Return from sub routine => pop from stack
    0x00EE => System::Return,
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOpcode {
    Assign,
    Or,
    And,
    Xor,
    Add,
    Sub,
    ShiftRight,
    SubReverse,
    ShiftLeft,
}

implTryIntoEnum!(ArithmeticOpcode : usize :
    0x0 => ArithmeticOpcode::Assign,
    0x1 => ArithmeticOpcode::Or,
    0x2 => ArithmeticOpcode::And,
    0x3 => ArithmeticOpcode::Xor,
    0x4 => ArithmeticOpcode::Add,
    0x5 => ArithmeticOpcode::Sub,
    0x6 => ArithmeticOpcode::ShiftRight,
    0x7 => ArithmeticOpcode::SubReverse,
    0xE => ArithmeticOpcode::ShiftLeft,
);

/// Operand of the register to register family `8XYT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arithmetic {
    pub ops: ArithmeticOpcode,
    pub x: usize,
    pub y: usize,
}

implTryIntoInner!(Arithmetic : Opcode : |value: Opcode| -> Result<Arithmetic, ()> {
    let (x, y, n) = value.xyn();
    let ops = try_into(n, value).map_err(|_| ())?;
    Ok(Arithmetic { ops, x, y })
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOpcode {
    Pressed,
    NotPressed,
}

implTryIntoEnum!(KeyOpcode : u8 :
    // EX9E
    0x9E => KeyOpcode::Pressed,
    // EXA1
    0xA1 => KeyOpcode::NotPressed,
);

/// Operand of the key family `EXTT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    pub ops: KeyOpcode,
    pub x: usize,
}

implTryIntoInner!(Key : Opcode : |value: Opcode| -> Result<Key, ()> {
    let (x, nn) = value.xnn();
    let ops = try_into(nn, value).map_err(|_| ())?;
    Ok(Key { ops, x })
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiscOpcode {
    GetDelayTimer,
    AwaitKeyPress,
    SetDelayTimer,
    SetSoundTimer,
    AddVxToI,
    SetIToSprite,
    StoreBCD,
    StoreV0ToVx,
    FillV0ToVx,
}

implTryIntoEnum!(MiscOpcode : u8 :
    0x07 => MiscOpcode::GetDelayTimer,
    0x0A => MiscOpcode::AwaitKeyPress,
    0x15 => MiscOpcode::SetDelayTimer,
    0x18 => MiscOpcode::SetSoundTimer,
    0x1E => MiscOpcode::AddVxToI,
    0x29 => MiscOpcode::SetIToSprite,
    0x33 => MiscOpcode::StoreBCD,
    0x55 => MiscOpcode::StoreV0ToVx,
    0x65 => MiscOpcode::FillV0ToVx,
);

/// Operand of the timer, memory and input family `FXTT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Misc {
    pub ops: MiscOpcode,
    pub x: usize,
}

implTryIntoInner!(Misc : Opcode : |value: Opcode| -> Result<Misc, ()> {
    let (x, nn) = value.xnn();
    let ops = try_into(nn, value).map_err(|_| ())?;
    Ok(Misc { ops, x })
});

/// A fully decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcodes {
    /// `00E0`, `00EE`
    System(System),
    /// `1NNN`
    Jump(Address),
    /// `2NNN`
    Call(Address),
    /// `3XNN`
    SkipEqualConst(RegisterConst),
    /// `4XNN`
    SkipNotEqualConst(RegisterConst),
    /// `5XY0`
    SkipEqual(RegisterPair),
    /// `6XNN`
    SetConst(RegisterConst),
    /// `7XNN`
    AddConst(RegisterConst),
    /// `8XYT`
    Arithmetic(Arithmetic),
    /// `9XY0`
    SkipNotEqual(RegisterPair),
    /// `ANNN`
    SetIndex(Address),
    /// `BNNN`
    JumpOffset(Address),
    /// `CXNN`
    Random(RegisterConst),
    /// `DXYN`
    Draw(Sprite),
    /// `EX9E`, `EXA1`
    Key(Key),
    /// `FXTT`
    Misc(Misc),
}

impl TryFrom<Opcode> for Opcodes {
    type Error = OpcodeError;

    fn try_from(value: Opcode) -> Result<Self, Self::Error> {
        let res = match value.t() {
            0x0 => Opcodes::System(try_into(value, value)?),
            0x1 => Opcodes::Jump(try_into(value, value)?),
            0x2 => Opcodes::Call(try_into(value, value)?),
            0x3 => Opcodes::SkipEqualConst(try_into(value, value)?),
            0x4 => Opcodes::SkipNotEqualConst(try_into(value, value)?),
            0x5 => Opcodes::SkipEqual(try_into(value, value)?),
            0x6 => Opcodes::SetConst(try_into(value, value)?),
            0x7 => Opcodes::AddConst(try_into(value, value)?),
            0x8 => Opcodes::Arithmetic(try_into(value, value)?),
            0x9 => Opcodes::SkipNotEqual(try_into(value, value)?),
            0xA => Opcodes::SetIndex(try_into(value, value)?),
            0xB => Opcodes::JumpOffset(try_into(value, value)?),
            0xC => Opcodes::Random(try_into(value, value)?),
            0xD => Opcodes::Draw(try_into(value, value)?),
            0xE => Opcodes::Key(try_into(value, value)?),
            0xF => Opcodes::Misc(try_into(value, value)?),
            _ => return err(value),
        };
        Ok(res)
    }
}

impl fmt::Display for Opcodes {
    /// Renders the instruction as an assembly like mnemonic.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Opcodes::System(System::Clear) => write!(f, "CLS"),
            Opcodes::System(System::Return) => write!(f, "RET"),
            Opcodes::Jump(Address { nnn }) => write!(f, "JP {:#05X}", nnn),
            Opcodes::Call(Address { nnn }) => write!(f, "CALL {:#05X}", nnn),
            Opcodes::SkipEqualConst(RegisterConst { x, nn }) => {
                write!(f, "SE V{:X}, {:#04X}", x, nn)
            }
            Opcodes::SkipNotEqualConst(RegisterConst { x, nn }) => {
                write!(f, "SNE V{:X}, {:#04X}", x, nn)
            }
            Opcodes::SkipEqual(RegisterPair { x, y }) => write!(f, "SE V{:X}, V{:X}", x, y),
            Opcodes::SetConst(RegisterConst { x, nn }) => write!(f, "LD V{:X}, {:#04X}", x, nn),
            Opcodes::AddConst(RegisterConst { x, nn }) => write!(f, "ADD V{:X}, {:#04X}", x, nn),
            Opcodes::Arithmetic(Arithmetic { ops, x, y }) => match ops {
                ArithmeticOpcode::Assign => write!(f, "LD V{:X}, V{:X}", x, y),
                ArithmeticOpcode::Or => write!(f, "OR V{:X}, V{:X}", x, y),
                ArithmeticOpcode::And => write!(f, "AND V{:X}, V{:X}", x, y),
                ArithmeticOpcode::Xor => write!(f, "XOR V{:X}, V{:X}", x, y),
                ArithmeticOpcode::Add => write!(f, "ADD V{:X}, V{:X}", x, y),
                ArithmeticOpcode::Sub => write!(f, "SUB V{:X}, V{:X}", x, y),
                ArithmeticOpcode::ShiftRight => write!(f, "SHR V{:X}", x),
                ArithmeticOpcode::SubReverse => write!(f, "SUBN V{:X}, V{:X}", x, y),
                ArithmeticOpcode::ShiftLeft => write!(f, "SHL V{:X}", x),
            },
            Opcodes::SkipNotEqual(RegisterPair { x, y }) => write!(f, "SNE V{:X}, V{:X}", x, y),
            Opcodes::SetIndex(Address { nnn }) => write!(f, "LD I, {:#05X}", nnn),
            Opcodes::JumpOffset(Address { nnn }) => write!(f, "JP V0, {:#05X}", nnn),
            Opcodes::Random(RegisterConst { x, nn }) => write!(f, "RND V{:X}, {:#04X}", x, nn),
            Opcodes::Draw(Sprite { x, y, n }) => write!(f, "DRW V{:X}, V{:X}, {:X}", x, y, n),
            Opcodes::Key(Key { ops, x }) => match ops {
                KeyOpcode::Pressed => write!(f, "SKP V{:X}", x),
                KeyOpcode::NotPressed => write!(f, "SKNP V{:X}", x),
            },
            Opcodes::Misc(Misc { ops, x }) => match ops {
                MiscOpcode::GetDelayTimer => write!(f, "LD V{:X}, DT", x),
                MiscOpcode::AwaitKeyPress => write!(f, "LD V{:X}, K", x),
                MiscOpcode::SetDelayTimer => write!(f, "LD DT, V{:X}", x),
                MiscOpcode::SetSoundTimer => write!(f, "LD ST, V{:X}", x),
                MiscOpcode::AddVxToI => write!(f, "ADD I, V{:X}", x),
                MiscOpcode::SetIToSprite => write!(f, "LD F, V{:X}", x),
                MiscOpcode::StoreBCD => write!(f, "LD B, V{:X}", x),
                MiscOpcode::StoreV0ToVx => write!(f, "LD [I], V{:X}", x),
                MiscOpcode::FillV0ToVx => write!(f, "LD V{:X}, [I]", x),
            },
        }
    }
}

/// Represents a step of the program counter
/// this requires the enum ProgramCounterStep
/// to work.
pub trait ProgramCounter {
    /// will move the program counter forward by a step.
    fn step(&mut self, step: ProgramCounterStep);
}

#[derive(Debug, PartialEq, Clone, Copy)]
/// Represents a command from the interpreter up to the host.
pub enum Operation {
    /// If no action has to be taken.
    None,
    /// The program waits for the next key press, the same opcode
    /// will be executed again on the next step.
    Wait,
    /// The display buffer changed.
    Draw,
}

/// The opcode table, one handler per instruction family.
///
/// Every handler returns how the program counter has to move,
/// [`calc`](ChipOpcodes::calc) applies that movement only once the
/// handler succeeded.
pub trait ChipOpcodes: ProgramCounter {
    /// will execute a single decoded opcode
    fn calc(&mut self, opcode: &Opcodes) -> Result<Operation, ProcessError> {
        let none = |step: ProgramCounterStep| (step, Operation::None);

        let (step, operation) = match opcode {
            Opcodes::System(opcode) => self.system(opcode),
            Opcodes::Jump(opcode) => self.jump(opcode).map(none),
            Opcodes::Call(opcode) => self.call(opcode).map(none),
            Opcodes::SkipEqualConst(opcode) => self.skip_equal_const(opcode).map(none),
            Opcodes::SkipNotEqualConst(opcode) => self.skip_not_equal_const(opcode).map(none),
            Opcodes::SkipEqual(opcode) => self.skip_equal(opcode).map(none),
            Opcodes::SetConst(opcode) => self.set_const(opcode).map(none),
            Opcodes::AddConst(opcode) => self.add_const(opcode).map(none),
            Opcodes::Arithmetic(opcode) => self.arithmetic(opcode).map(none),
            Opcodes::SkipNotEqual(opcode) => self.skip_not_equal(opcode).map(none),
            Opcodes::SetIndex(opcode) => self.set_index(opcode).map(none),
            Opcodes::JumpOffset(opcode) => self.jump_offset(opcode).map(none),
            Opcodes::Random(opcode) => self.random(opcode).map(none),
            Opcodes::Draw(opcode) => self.draw(opcode),
            Opcodes::Key(opcode) => self.key(opcode).map(none),
            Opcodes::Misc(opcode) => self.misc(opcode),
        }?;

        self.step(step);
        Ok(operation)
    }

    /// - `00E0` - Display  - `disp_clear()`        - Clears the screen.
    /// - `00EE` - Flow     - `return;`             - Returns from a subroutine.
    fn system(&mut self, opcode: &System) -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// - `1NNN` - Flow     - `goto NNN;`           - Jumps to address `NNN`.
    fn jump(&self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError>;

    /// - `2NNN` - Flow     - `*(0xNNN)()`          - Calls subroutine at `NNN`.
    fn call(&mut self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError>;

    /// - `3XNN` - Cond     - `if(Vx==NN)`          - Skips the next instruction if `VX` equals `NN`.
    fn skip_equal_const(&self, opcode: &RegisterConst) -> Result<ProgramCounterStep, ProcessError>;

    /// - `4XNN` - Cond     - `if(Vx!=NN)`          - Skips the next instruction if `VX` doesn't equal `NN`.
    fn skip_not_equal_const(
        &self,
        opcode: &RegisterConst,
    ) -> Result<ProgramCounterStep, ProcessError>;

    /// - `5XY0` - Cond     - `if(Vx==Vy)`          - Skips the next instruction if `VX` equals `VY`.
    fn skip_equal(&self, opcode: &RegisterPair) -> Result<ProgramCounterStep, ProcessError>;

    /// - `6XNN` - Const    - `Vx = NN`             - Sets `VX` to `NN`.
    fn set_const(&mut self, opcode: &RegisterConst) -> Result<ProgramCounterStep, ProcessError>;

    /// - `7XNN` - Const    - `Vx += NN`            - Adds `NN` to `VX`. (Carry flag is not changed)
    fn add_const(&mut self, opcode: &RegisterConst) -> Result<ProgramCounterStep, ProcessError>;

    /// - `8XY0` - Assign   - `Vx=Vy`               - Sets `VX` to the value of `VY`.
    /// - `8XY1` - BitOp    - `Vx=Vx|Vy`            - Sets `VX` to `VX` or `VY`.
    /// - `8XY2` - BitOp    - `Vx=Vx&Vy`            - Sets `VX` to `VX` and `VY`.
    /// - `8XY3` - BitOp    - `Vx=Vx^Vy`            - Sets `VX` to `VX` xor `VY`.
    /// - `8XY4` - Math     - `Vx += Vy`            - Adds `VY` to `VX`. `VF` is set to `1` when there's a carry, and to `0` when there isn't.
    /// - `8XY5` - Math     - `Vx -= Vy`            - `VY` is subtracted from `VX`. `VF` is set to `0` when there's a borrow, and `1` when there isn't.
    /// - `8XY6` - BitOp    - `Vx>>=1`              - Stores the least significant bit of `VX` in `VF` and then shifts `VX` to the right by `1`.
    /// - `8XY7` - Math     - `Vx=Vy-Vx`            - Sets `VX` to `VY` minus `VX`. `VF` is set to `0` when there's a borrow, and `1` when there isn't.
    /// - `8XYE` - BitOp    - `Vx<<=1`              - Stores the most significant bit of `VX` in `VF` and then shifts `VX` to the left by `1`.
    fn arithmetic(&mut self, opcode: &Arithmetic) -> Result<ProgramCounterStep, ProcessError>;

    /// - `9XY0` - Cond     - `if(Vx!=Vy)`          - Skips the next instruction if `VX` doesn't equal `VY`.
    fn skip_not_equal(&self, opcode: &RegisterPair) -> Result<ProgramCounterStep, ProcessError>;

    /// - `ANNN` - MEM      - `I = NNN`             - Sets `I` to the address `NNN`.
    fn set_index(&mut self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError>;

    /// - `BNNN` - Flow     - `PC=V0+NNN`           - Jumps to the address `NNN` plus `V0`.
    fn jump_offset(&self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError>;

    /// - `CXNN` - Rand     - `Vx=rand()&NN`        - Sets `VX` to a random byte masked with `NN`.
    fn random(&mut self, opcode: &RegisterConst) -> Result<ProgramCounterStep, ProcessError>;

    /// - `DXYN` - Disp     - `draw(Vx,Vy,N)`       - XORs an `8 x N` sprite read from `I` onto the display at `(VX, VY)`. `VF` is set to `1` if any set pixel got erased.
    fn draw(&mut self, opcode: &Sprite) -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// - `EX9E` - KeyOp    - `if(key()==Vx)`       - Skips the next instruction if the key stored in `VX` is pressed.
    /// - `EXA1` - KeyOp    - `if(key()!=Vx)`       - Skips the next instruction if the key stored in `VX` isn't pressed.
    fn key(&self, opcode: &Key) -> Result<ProgramCounterStep, ProcessError>;

    /// - `FX07` - Timer    - `Vx = get_delay()`    - Sets `VX` to the value of the delay timer.
    /// - `FX0A` - KeyOp    - `Vx = get_key()`      - A key press is awaited, and then stored in `VX`.
    /// - `FX15` - Timer    - `delay_timer(Vx)`     - Sets the delay timer to `VX`.
    /// - `FX18` - Sound    - `sound_timer(Vx)`     - Sets the sound timer to `VX`.
    /// - `FX1E` - MEM      - `I +=Vx`              - Adds `VX` to `I`. `VF` is not affected.
    /// - `FX29` - MEM      - `I=sprite_addr[Vx]`   - Sets `I` to the location of the font glyph for `VX`.
    /// - `FX33` - BCD      - `set_BCD(Vx)`         - Stores the decimal digits of `VX` at `I`, `I+1` and `I+2`.
    /// - `FX55` - MEM      - `reg_dump(Vx,&I)`     - Stores `V0` to `VX` (including `VX`) in memory starting at address `I`.
    /// - `FX65` - MEM      - `reg_load(Vx,&I)`     - Fills `V0` to `VX` (including `VX`) with values from memory starting at address `I`.
    fn misc(&mut self, opcode: &Misc) -> Result<(ProgramCounterStep, Operation), ProcessError>;
}
