use std::convert::TryFrom;

use {
    crate::{
        definitions::{cpu, display, memory},
        devices::Keyboard,
        opcode::{self, ChipOpcodes, Opcode, Opcodes, Operation, ProgramCounter, ProgramCounterStep},
        resources::Rom,
        timer::Timer,
        ProcessError, StackError,
    },
    rand::RngCore,
};

/// The ChipSet struct represents the current state
/// of the system, it contains all the structures
/// needed for emulating an instant on the
/// Chip8 CPU.
pub struct ChipSet {
    /// name of the loaded rom
    pub(super) name: String,
    /// all two bytes long and stored big-endian
    pub(super) opcode: Opcode,
    /// - `0x000-0x04F` - Used for the built in `4x5` pixel font set (`0-F`)
    /// - `0x050-0x1FF` - Unused
    /// - `0x200-0xFFF` - Program ROM and work RAM
    pub(super) memory: Box<[u8; memory::SIZE]>,
    /// `8-bit` data registers named `V0` to `VF`. The `VF` register doubles as a flag for some
    /// instructions. In an addition operation, `VF` is the carry flag, while in subtraction,
    /// it is the "no borrow" flag. In the draw instruction `VF` is set upon pixel collision.
    pub(super) registers: [u8; cpu::register::SIZE],
    /// The index register `I`, it wraps around at 16 bits.
    pub(super) index_register: u16,
    /// The program counter is a CPU register in the computer processor which has the address of the
    /// next instruction to be executed from memory.
    pub(super) program_counter: usize,
    /// The stack is only used to store return addresses when subroutines are called.
    /// It can hold up to `16` levels of nesting.
    pub(super) stack: Vec<usize>,
    /// Delay timer: This timer is intended to be used for timing the events of games. Its value
    /// can be set and read.
    pub(super) delay_timer: Timer,
    /// Sound timer: This timer is used for sound effects. When its value is nonzero, a beeping
    /// sound is made.
    pub(super) sound_timer: Timer,
    /// The graphics of the Chip 8 are black and white and the screen has a total of `2048` pixels
    /// `(64 x 32)`, stored row by row with one byte `(1 or 0)` per pixel.
    pub(super) display: Box<[u8; display::RESOLUTION]>,
    /// Set whenever the display got changed, until the host consumes it.
    pub(super) draw_flag: bool,
    /// The sixteen keys of the hex keyboard.
    pub(super) keyboard: Keyboard,
    /// This stores the random number generator, used by the chipset.
    /// It is stored into the chipset, so as to enable simple mocking
    /// of the given type.
    pub(super) rng: Box<dyn RngCore + Send>,
}

impl ChipSet {
    /// will create a new chipset object
    pub fn new(rom: Rom) -> Self {
        Self::with_rng(rom, Box::new(rand::rngs::OsRng))
    }

    /// will create a new chipset object that draws its random numbers from `rng`
    pub fn with_rng(rom: Rom, rng: Box<dyn RngCore + Send>) -> Self {
        // initialize all the memory with 0
        let mut ram = Box::new([0; memory::SIZE]);

        // load fonts
        let font = display::fontset::LOCATION;
        ram[font..(font + display::fontset::FONTSET.len())]
            .copy_from_slice(&display::fontset::FONTSET);

        // write the rom data into memory, the rom guarantees that it fits
        let data = rom.get_data();
        ram[cpu::PROGRAM_COUNTER..(cpu::PROGRAM_COUNTER + data.len())].copy_from_slice(data);

        log::info!("loaded {} ({} bytes)", rom.get_name(), data.len());

        Self {
            name: rom.get_name().to_string(),
            opcode: 0,
            memory: ram,
            registers: [0; cpu::register::SIZE],
            index_register: 0,
            program_counter: cpu::PROGRAM_COUNTER,
            stack: Vec::with_capacity(cpu::stack::SIZE),
            delay_timer: Timer::new(0),
            sound_timer: Timer::new(0),
            display: Box::new([0; display::RESOLUTION]),
            draw_flag: false,
            keyboard: Keyboard::new(),
            rng,
        }
    }

    /// will get the next opcode from memory
    pub(super) fn set_opcode(&mut self) -> Result<(), ProcessError> {
        // will build the opcode given from the pointer
        self.opcode = opcode::build_opcode(&self.memory[..], self.program_counter)?;
        Ok(())
    }

    /// will advance the program by a single step
    ///
    /// A failing instruction other than a fetch outside of memory does not change the
    /// machine, apart from moving the program counter past it.
    pub fn next(&mut self) -> Result<Operation, ProcessError> {
        // get next opcode
        self.set_opcode()?;

        let pc = self.program_counter;
        let result = Opcodes::try_from(self.opcode)
            .map_err(ProcessError::from)
            .and_then(|decoded| {
                log::trace!("{:#06X} {:#06X} {}", pc, self.opcode, decoded);
                self.calc(&decoded)
            });

        match result {
            Ok(Operation::Draw) => {
                self.draw_flag = true;
                Ok(Operation::Draw)
            }
            Ok(op) => Ok(op),
            Err(err) => {
                log::debug!("{:#06X} {:#06X} failed: {}", pc, self.opcode, err);
                self.step(ProgramCounterStep::Next);
                Err(err)
            }
        }
    }

    /// Will decrement both timers by one, called at 60 Hz by the host.
    pub fn tick_timers(&mut self) {
        self.delay_timer.tick();
        self.sound_timer.tick();
    }

    /// Will write keyboard data into interncal keyboard representation.
    pub fn set_keyboard(&mut self, keys: &[bool]) {
        // copy_from_slice checks the keys lenght during copy
        self.keyboard.set_mult(keys);
    }

    /// Will set the value of the given key
    pub fn set_key(&mut self, key: usize, to: bool) {
        self.keyboard.set_key(key, to)
    }

    /// Will get the current state of the keyboard
    pub fn get_keyboard(&self) -> &[bool] {
        self.keyboard.get_keys()
    }

    /// will return the sound timer
    pub fn get_sound_timer(&self) -> u8 {
        self.sound_timer.get_value()
    }

    /// will return the delay timer
    pub fn get_delay_timer(&self) -> u8 {
        self.delay_timer.get_value()
    }

    /// The tone has to play as long as the sound timer is running.
    pub fn is_sound_active(&self) -> bool {
        self.sound_timer.get_value() > 0
    }

    /// Will return a immutable slice of the current display configuration
    pub fn get_display(&self) -> &[u8] {
        &self.display[..]
    }

    /// Will return if the display changed since the last call and clear that state.
    pub fn consume_draw_flag(&mut self) -> bool {
        std::mem::replace(&mut self.draw_flag, false)
    }

    /// will return the name of the loaded rom
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// will return the address of the next instruction
    pub fn get_program_counter(&self) -> usize {
        self.program_counter
    }

    /// Will push the current pointer to the stack
    pub(super) fn push_stack(&mut self, pointer: usize) -> Result<(), StackError> {
        if self.stack.len() >= cpu::stack::SIZE {
            Err(StackError::Full)
        } else {
            self.stack.push(pointer);
            Ok(())
        }
    }

    /// Will pop from the stack
    pub(super) fn pop_stack(&mut self) -> Result<usize, StackError> {
        self.stack.pop().ok_or(StackError::Empty)
    }

    /// Checks that `len` bytes starting at `from` are inside of memory and
    /// returns the range.
    pub(super) fn memory_range(
        &self,
        from: usize,
        len: usize,
    ) -> Result<std::ops::Range<usize>, ProcessError> {
        let to = from + len;
        if to <= self.memory.len() {
            Ok(from..to)
        } else {
            Err(ProcessError::OutOfBounds {
                from,
                to,
                len: self.memory.len(),
            })
        }
    }
}

impl ProgramCounter for ChipSet {
    fn step(&mut self, step: ProgramCounterStep) {
        self.program_counter = if let ProgramCounterStep::Jump(_) = step {
            step.step()
        } else {
            self.program_counter + step.step()
        }
    }
}
