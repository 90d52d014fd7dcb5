//! The pretty print implementation of the [`ChipSet`](super::ChipSet), used to dump the
//! machine state once something went wrong.
//! This implementation was split up into this file for smaller file sizes and higher
//! cohesion.

use super::ChipSet;
use crate::definitions::cpu;
use once_cell::sync::Lazy;
use std::fmt;

/// The amount of entries shown per line, has to be bigger then 0
const HEX_PRINT_STEP: usize = 8;

const END_OF_LINE: char = '\n';
const INDENT_FILLAMENT: char = '\t';
const INDENT_SIZE: usize = 2;

/// Will add an indent
fn indent_helper(text: &mut String, indent: usize) {
    for _ in 0..indent {
        text.push(INDENT_FILLAMENT);
    }
}

macro_rules! intformat {
    () => {
        // 2 sysbols for the prefix (0x) and 4 for the rest
        "{:#06X}"
    };
}

/// The printed length of a single integer
static INTEGER_LEN: Lazy<usize> = Lazy::new(|| {
    let mut string = String::new();
    // writing into a string can not fail
    integer_print::formatter(&mut string, 0u8).unwrap();
    string.len()
});

/// Handles all the printing of the pointer values.
mod pointer_print {
    use std::fmt::Write;

    /// will format a range of addresses
    pub(super) fn formatter(line: &mut String, from: usize, to: usize) -> std::fmt::Result {
        write!(line, concat!(intformat!(), " - ", intformat!(), " :"), from, to)
    }
}

/// handles printting of any and all of intergers.
mod integer_print {
    use super::{pointer_print, END_OF_LINE, HEX_PRINT_STEP};
    use num_traits::Unsigned;
    use std::fmt::{self, Write};

    /// will format all integer types
    pub(super) fn formatter<T>(line: &mut String, data: T) -> fmt::Result
    where
        T: fmt::UpperHex + Unsigned + Copy,
    {
        write!(line, intformat!(), data)
    }

    /// will pretty print all the integer data given, one row per [`HEX_PRINT_STEP`] entries
    pub(super) fn printer<T>(data: &[T], indent: usize) -> Result<String, fmt::Error>
    where
        T: fmt::UpperHex + Unsigned + Copy,
    {
        let mut res = String::new();
        for (row, chunk) in data.chunks(HEX_PRINT_STEP).enumerate() {
            let from = row * HEX_PRINT_STEP;
            super::indent_helper(&mut res, indent);
            pointer_print::formatter(&mut res, from, from + chunk.len() - 1)?;

            for entry in chunk {
                res.push(' ');
                formatter(&mut res, *entry)?;
            }
            res.push(END_OF_LINE);
        }
        // Remove the trailing new line
        res.pop();
        Ok(res)
    }
}

/// Handles all the opcode prints
mod opcode_print {
    use super::{integer_print, pointer_print, END_OF_LINE, HEX_PRINT_STEP};
    use crate::{
        definitions::memory,
        opcode::{self, Opcode},
    };
    use std::fmt::{self, Write};

    /// The amount of bytes shown in a single row
    const POINTER_INCREMENT: usize = HEX_PRINT_STEP * memory::opcodes::SIZE;
    /// The values that are used when there are at lease two rows of zeros.
    const FILLER_BASE: &str = "...";

    /// this struct will simulate a single row of opcodes
    struct Row {
        from: usize,
        to: usize,
        data: [Opcode; HEX_PRINT_STEP],
        only_null: bool,
    }

    impl fmt::Display for Row {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let mut res = String::new();
            pointer_print::formatter(&mut res, self.from, self.to)?;

            if self.only_null {
                res.push(' ');
                integer_print::formatter(&mut res, 0u16)?;
                res.push(' ');
                res.push_str(FILLER_BASE);
                res.push(' ');
                integer_print::formatter(&mut res, 0u16)?;
            } else {
                for entry in self.data.iter() {
                    res.push(' ');
                    integer_print::formatter(&mut res, *entry)?;
                }
            }
            write!(f, "{}", res)
        }
    }

    /// will pretty print the content of the raw memory, consecutive rows
    /// that only hold zeros are merged into one
    pub(super) fn printer(memory: &[u8], indent: usize) -> Result<String, fmt::Error> {
        let mut rows: Vec<Row> = Vec::with_capacity(memory.len() / POINTER_INCREMENT);

        for from in (0..memory.len()).step_by(POINTER_INCREMENT) {
            let to = (from + POINTER_INCREMENT).min(memory.len()) - 1;

            let mut data = [0; HEX_PRINT_STEP];
            for (entry, index) in data.iter_mut().zip((from..to).step_by(memory::opcodes::SIZE)) {
                // a trailing odd byte can not form an opcode and is left out
                *entry = opcode::build_opcode(memory, index).unwrap_or(0);
            }
            let only_null = data.iter().all(|&entry| entry == 0);

            let mut row = Row {
                from,
                to,
                data,
                only_null,
            };

            if only_null {
                if let Some(last_row) = rows.last() {
                    if last_row.only_null {
                        row.from = last_row.from;
                        rows.pop();
                    }
                }
            }
            rows.push(row)
        }

        let mut string = String::new();
        for row in rows {
            super::indent_helper(&mut string, indent);
            write!(string, "{}{}", row, END_OF_LINE)?;
        }
        // Remove the trailing new line
        string.pop();
        Ok(string)
    }
}

/// Handles all the boolean data types.
mod bool_print {
    use super::{pointer_print, END_OF_LINE, HEX_PRINT_STEP, INTEGER_LEN};

    /// pads the value to the width of a printed integer
    fn formatter(value: bool) -> String {
        format!("{:<width$}", value, width = *INTEGER_LEN)
    }

    /// will pretty print all the boolean data given
    pub(super) fn printer(data: &[bool], indent: usize) -> Result<String, std::fmt::Error> {
        let mut res = String::new();

        for (row, chunk) in data.chunks(HEX_PRINT_STEP).enumerate() {
            let from = row * HEX_PRINT_STEP;
            super::indent_helper(&mut res, indent);
            pointer_print::formatter(&mut res, from, from + chunk.len() - 1)?;

            for value in chunk {
                res.push(' ');
                res.push_str(&formatter(*value));
            }
            // the last entry does not need the padding
            res.truncate(res.trim_end().len());
            res.push(END_OF_LINE);
        }
        res.pop();

        Ok(res)
    }
}

impl fmt::Display for ChipSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let single = |value: usize| -> Result<String, fmt::Error> {
            let mut line = String::new();
            indent_helper(&mut line, INDENT_SIZE);
            integer_print::formatter(&mut line, value)?;
            Ok(line)
        };

        let mut nam = String::new();
        indent_helper(&mut nam, INDENT_SIZE);
        nam.push_str(&self.name);

        let opc = single(self.opcode as usize)?;
        let prc = single(self.program_counter)?;
        let idx = single(self.index_register as usize)?;
        let tim = integer_print::printer(
            &[self.get_delay_timer(), self.get_sound_timer()],
            INDENT_SIZE,
        )?;
        let mem = opcode_print::printer(&self.memory[..], INDENT_SIZE)?;
        let key = bool_print::printer(self.keyboard.get_keys(), INDENT_SIZE)?;

        // the stack is filled up, so that it always shows all the entries
        let mut stack = [0; cpu::stack::SIZE];
        stack[0..self.stack.len()].copy_from_slice(&self.stack);
        let sta = integer_print::printer(&stack, INDENT_SIZE)?;
        let reg = integer_print::printer(&self.registers, INDENT_SIZE)?;

        write!(
            f,
            "Chipset {{\n\
                \tProgram Name :\n{}\n\
                \tOpcode :\n{}\n\
                \tProgram Counter :\n{}\n\
                \tIndex Register :\n{}\n\
                \tTimers (Delay, Sound) :\n{}\n\
                \tMemory :\n{}\n\
                \tKeyboard :\n{}\n\
                \tStack :\n{}\n\
                \tRegister :\n{}\n\
                }}",
            nam, opc, prc, idx, tim, mem, key, sta, reg
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests;
    use crate::{definitions::keyboard, resources::Rom};

    const OUTPUT_PRINT: &str = "\
        Chipset {\n\
            \tProgram Name :\n\
                \t\tprint\n\
            \tOpcode :\n\
                \t\t0x0000\n\
            \tProgram Counter :\n\
                \t\t0x0200\n\
            \tIndex Register :\n\
                \t\t0x0000\n\
            \tTimers (Delay, Sound) :\n\
                \t\t0x0000 - 0x0001 : 0x0000 0x0000\n\
            \tMemory :\n\
                \t\t0x0000 - 0x000F : 0xF090 0x9090 0xF020 0x6020 0x2070 0xF010 0xF080 0xF0F0\n\
                \t\t0x0010 - 0x001F : 0x10F0 0x10F0 0x9090 0xF010 0x10F0 0x80F0 0x10F0 0xF080\n\
                \t\t0x0020 - 0x002F : 0xF090 0xF0F0 0x1020 0x4040 0xF090 0xF090 0xF0F0 0x90F0\n\
                \t\t0x0030 - 0x003F : 0x10F0 0xF090 0xF090 0x90E0 0x90E0 0x90E0 0xF080 0x8080\n\
                \t\t0x0040 - 0x004F : 0xF0E0 0x9090 0x90E0 0xF080 0xF080 0xF0F0 0x80F0 0x8080\n\
                \t\t0x0050 - 0x01FF : 0x0000 ... 0x0000\n\
                \t\t0x0200 - 0x020F : 0x00E0 0xA22A 0x600C 0x6108 0xD01F 0x1208 0x0000 0x0000\n\
                \t\t0x0210 - 0x0FFF : 0x0000 ... 0x0000\n\
            \tKeyboard :\n\
                \t\t0x0000 - 0x0007 : false  true   false  true   false  true   false  true\n\
                \t\t0x0008 - 0x000F : false  true   false  true   false  true   false  true\n\
            \tStack :\n\
                \t\t0x0000 - 0x0007 : 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
                \t\t0x0008 - 0x000F : 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
            \tRegister :\n\
                \t\t0x0000 - 0x0007 : 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
                \t\t0x0008 - 0x000F : 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
        }";

    #[test]
    /// tests if the pretty print output is as expected
    fn test_full_print() {
        let data = [0x00, 0xE0, 0xA2, 0x2A, 0x60, 0x0C, 0x61, 0x08, 0xD0, 0x1F, 0x12, 0x08];
        let rom = Rom::new("print", &data).unwrap();
        let mut chip = tests::setup_chip(rom);

        let mut keys = [false; keyboard::SIZE];
        for (index, key) in keys.iter_mut().enumerate() {
            *key = index % 2 != 0;
        }
        chip.set_keyboard(&keys);

        // override the chip register as they are generated randomly
        chip.registers = [0; 16];

        let actual_full = format!("{}", chip);
        let actual_split: Vec<_> = actual_full.split('\n').collect();
        let expected: Vec<_> = OUTPUT_PRINT.split('\n').collect();

        assert_eq!(expected.len(), actual_split.len());
        for (exp, act) in expected.iter().zip(actual_split.iter()) {
            assert_eq!(exp, act);
        }
    }
}
