use crate::{
    definitions::{cpu, display},
    opcode::{
        Address, Arithmetic, ArithmeticOpcode, ChipOpcodes, Key, KeyOpcode, Misc, MiscOpcode,
        Operation, ProgramCounterStep, RegisterConst, RegisterPair, Sprite, System,
    },
    ProcessError,
};

use super::ChipSet;

impl ChipSet {
    /// Writes a flag result: `VF` first and the register second, so that
    /// an instruction targeting `VF` itself keeps its result.
    #[inline]
    fn set_with_flag(&mut self, x: usize, value: u8, flag: bool) {
        self.registers[cpu::register::LAST] = flag as u8;
        self.registers[x] = value;
    }
}

impl ChipOpcodes for ChipSet {
    fn system(&mut self, opcode: &System) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        match opcode {
            System::Clear => {
                // 00E0
                // clear display
                self.display.iter_mut().for_each(|pixel| *pixel = 0);
                Ok((ProgramCounterStep::Next, Operation::Draw))
            }
            System::Return => {
                // 00EE
                // Return from sub routine => pop from stack, the stored
                // pointer is the call site itself
                let pc = self.pop_stack()?;
                log::debug!("return to {:#06X}", pc);
                Ok((
                    ProgramCounterStep::Jump(pc + ProgramCounterStep::Next.step()),
                    Operation::None,
                ))
            }
        }
    }

    fn jump(&self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError> {
        // 1NNN
        // Jumps to address NNN.
        Ok(ProgramCounterStep::Jump(opcode.nnn))
    }

    fn call(&mut self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError> {
        // 2NNN
        // Calls subroutine at NNN
        self.push_stack(self.program_counter)?;
        Ok(ProgramCounterStep::Jump(opcode.nnn))
    }

    fn skip_equal_const(&self, opcode: &RegisterConst) -> Result<ProgramCounterStep, ProcessError> {
        // 3XNN
        Ok(ProgramCounterStep::cond(self.registers[opcode.x] == opcode.nn))
    }

    fn skip_not_equal_const(
        &self,
        opcode: &RegisterConst,
    ) -> Result<ProgramCounterStep, ProcessError> {
        // 4XNN
        Ok(ProgramCounterStep::cond(self.registers[opcode.x] != opcode.nn))
    }

    fn skip_equal(&self, opcode: &RegisterPair) -> Result<ProgramCounterStep, ProcessError> {
        // 5XY0
        Ok(ProgramCounterStep::cond(
            self.registers[opcode.x] == self.registers[opcode.y],
        ))
    }

    fn set_const(&mut self, opcode: &RegisterConst) -> Result<ProgramCounterStep, ProcessError> {
        // 6XNN
        // Sets VX to NN.
        self.registers[opcode.x] = opcode.nn;
        Ok(ProgramCounterStep::Next)
    }

    fn add_const(&mut self, opcode: &RegisterConst) -> Result<ProgramCounterStep, ProcessError> {
        // 7XNN
        // let VX overflow, but ignore carry
        let x = opcode.x;
        self.registers[x] = self.registers[x].wrapping_add(opcode.nn);
        Ok(ProgramCounterStep::Next)
    }

    fn arithmetic(&mut self, opcode: &Arithmetic) -> Result<ProgramCounterStep, ProcessError> {
        let Arithmetic { ops, x, y } = *opcode;
        // all operands are read before anything is written back
        let vx = self.registers[x];
        let vy = self.registers[y];
        match ops {
            ArithmeticOpcode::Assign => self.registers[x] = vy,
            ArithmeticOpcode::Or => self.registers[x] = vx | vy,
            ArithmeticOpcode::And => self.registers[x] = vx & vy,
            ArithmeticOpcode::Xor => self.registers[x] = vx ^ vy,
            ArithmeticOpcode::Add => {
                let (res, carry) = vx.overflowing_add(vy);
                self.set_with_flag(x, res, carry);
            }
            ArithmeticOpcode::Sub => {
                self.set_with_flag(x, vx.wrapping_sub(vy), vx >= vy);
            }
            ArithmeticOpcode::ShiftRight => {
                self.set_with_flag(x, vx >> 1, vx & 0x01 == 0x01);
            }
            ArithmeticOpcode::SubReverse => {
                self.set_with_flag(x, vy.wrapping_sub(vx), vy >= vx);
            }
            ArithmeticOpcode::ShiftLeft => {
                const MOST_SIGNIFICANT: u8 = 1 << 7;
                self.set_with_flag(x, vx << 1, vx & MOST_SIGNIFICANT == MOST_SIGNIFICANT);
            }
        }
        Ok(ProgramCounterStep::Next)
    }

    fn skip_not_equal(&self, opcode: &RegisterPair) -> Result<ProgramCounterStep, ProcessError> {
        // 9XY0
        Ok(ProgramCounterStep::cond(
            self.registers[opcode.x] != self.registers[opcode.y],
        ))
    }

    fn set_index(&mut self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError> {
        // ANNN
        // Sets I to the address NNN.
        self.index_register = opcode.nnn as u16;
        Ok(ProgramCounterStep::Next)
    }

    fn jump_offset(&self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError> {
        // BNNN
        // Jumps to the address NNN plus V0.
        let v0 = self.registers[0] as usize;
        Ok(ProgramCounterStep::Jump(opcode.nnn + v0))
    }

    fn random(&mut self, opcode: &RegisterConst) -> Result<ProgramCounterStep, ProcessError> {
        // CXNN
        // using a fill bytes call here, as the trait RngCore does not
        // support random u8.
        let mut rand: [u8; 1] = [0];
        self.rng.fill_bytes(&mut rand);
        self.registers[opcode.x] = opcode.nn & rand[0];
        Ok(ProgramCounterStep::Next)
    }

    fn draw(&mut self, opcode: &Sprite) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        // DXYN
        // The start position wraps around the screen, the parts of the
        // sprite running over the right or bottom edge are clipped.
        // see https://tobiasvl.github.io/blog/write-a-chip-8-emulator/
        let Sprite { x, y, n } = *opcode;

        let range = self.memory_range(self.index_register as usize, n)?;
        let coorx = self.registers[x] as usize % display::WIDTH;
        let coory = self.registers[y] as usize % display::HEIGHT;

        const BYTE: usize = 8;
        let mut collision = false;

        for (i, row) in self.memory[range].iter().enumerate() {
            let y = coory + i;
            if y >= display::HEIGHT {
                break;
            }

            for j in 0..BYTE {
                let x = coorx + j;
                if x >= display::WIDTH {
                    break;
                }

                let mask: u8 = 0x80 >> j;
                if row & mask == 0 {
                    continue;
                }

                let pixel = &mut self.display[y * display::WIDTH + x];
                collision |= *pixel == 1;
                *pixel ^= 1;
            }
        }

        self.registers[cpu::register::LAST] = collision as u8;

        Ok((ProgramCounterStep::Next, Operation::Draw))
    }

    fn key(&self, opcode: &Key) -> Result<ProgramCounterStep, ProcessError> {
        let pressed = self.keyboard.is_pressed(self.registers[opcode.x] as usize);
        let step = match opcode.ops {
            // EX9E
            KeyOpcode::Pressed => ProgramCounterStep::cond(pressed),
            // EXA1
            KeyOpcode::NotPressed => ProgramCounterStep::cond(!pressed),
        };
        Ok(step)
    }

    fn misc(&mut self, opcode: &Misc) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        let x = opcode.x;
        let mut op = Operation::None;
        let mut pcs = ProgramCounterStep::Next;
        match opcode.ops {
            MiscOpcode::GetDelayTimer => {
                // FX07
                self.registers[x] = self.get_delay_timer();
            }
            MiscOpcode::AwaitKeyPress => {
                // FX0A
                // The program counter stays put until a key is down, so the
                // host keeps running while the program waits.
                match self.keyboard.first_pressed() {
                    Some(key) => self.registers[x] = key as u8,
                    None => {
                        op = Operation::Wait;
                        pcs = ProgramCounterStep::None;
                    }
                }
            }
            MiscOpcode::SetDelayTimer => {
                // FX15
                self.delay_timer.set_value(self.registers[x]);
            }
            MiscOpcode::SetSoundTimer => {
                // FX18
                self.sound_timer.set_value(self.registers[x]);
            }
            MiscOpcode::AddVxToI => {
                // FX1E
                // VF is not affected
                self.index_register = self.index_register.wrapping_add(self.registers[x] as u16);
            }
            MiscOpcode::SetIToSprite => {
                // FX29
                let glyph = self.registers[x] as usize * display::fontset::GLYPH_SIZE;
                self.index_register = (display::fontset::LOCATION + glyph) as u16;
            }
            MiscOpcode::StoreBCD => {
                // FX33
                let range = self.memory_range(self.index_register as usize, 3)?;
                let r = self.registers[x];
                self.memory[range].copy_from_slice(&[r / 100, r / 10 % 10, r % 10]);
            }
            MiscOpcode::StoreV0ToVx => {
                // FX55
                // I itself is left unmodified
                let range = self.memory_range(self.index_register as usize, x + 1)?;
                self.memory[range].copy_from_slice(&self.registers[..=x]);
            }
            MiscOpcode::FillV0ToVx => {
                // FX65
                let range = self.memory_range(self.index_register as usize, x + 1)?;
                self.registers[..=x].copy_from_slice(&self.memory[range]);
            }
        }
        Ok((pcs, op))
    }
}
