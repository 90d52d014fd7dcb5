use std::{
    thread,
    time::{Duration, Instant},
};

use crate::{
    chip8::ChipSet,
    definitions::{cpu, timer},
    devices::{DisplayCommands, Input, KeyboardCommands, SoundCommands},
    opcode::Operation,
    timer::Interval,
    RunError,
};

/// What the host loop shall do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Continue,
    Quit,
}

/// Drives a [`ChipSet`] with the given devices.
///
/// The instructions run at [`cpu::HERTZ`] and the countdown timers at
/// [`timer::HERTZ`], both derived from the same clock so that the ratio
/// between them stays fixed.
pub struct Runner<D, K, S> {
    chip: ChipSet,
    display: D,
    keyboard: K,
    sound: S,
    cpu: Interval,
    timers: Interval,
    tone: bool,
}

impl<D, K, S> Runner<D, K, S>
where
    D: DisplayCommands,
    K: KeyboardCommands,
    S: SoundCommands,
{
    pub fn new(chip: ChipSet, display: D, keyboard: K, sound: S) -> Self {
        Self::starting_at(chip, display, keyboard, sound, Instant::now())
    }

    /// Will create a runner whose first cycles are due right after `start`.
    pub fn starting_at(chip: ChipSet, display: D, keyboard: K, sound: S, start: Instant) -> Self {
        Self {
            chip,
            display,
            keyboard,
            sound,
            cpu: Interval::from_hertz(cpu::HERTZ, start),
            timers: Interval::from_hertz(timer::HERTZ, start),
            tone: false,
        }
    }

    pub fn chip(&self) -> &ChipSet {
        &self.chip
    }

    /// Runs everything that is due at `now`.
    ///
    /// The keyboard is polled once, then the pending instructions run,
    /// the display gets the frame if anything was drawn and the timers
    /// count down. Only a fetch outside of memory or a failing device
    /// stops the machine, every other fault is logged and skipped.
    pub fn tick(&mut self, now: Instant) -> Result<State, RunError> {
        match self.keyboard.poll()? {
            Input::Quit => {
                log::info!("quit requested");
                return Ok(State::Quit);
            }
            Input::Keys(keys) => self.chip.set_keyboard(&keys),
        }

        for _ in 0..self.cpu.due(now) {
            match self.chip.next() {
                // the keys will not change before the next poll
                Ok(Operation::Wait) => break,
                Ok(_) => {}
                Err(err) if err.is_fatal() => {
                    log::error!("{}", err);
                    log::error!("{}", self.chip);
                    return Err(err.into());
                }
                Err(err) => log::warn!(
                    "skipped the instruction before {:#06X}: {}",
                    self.chip.get_program_counter(),
                    err
                ),
            }
        }

        if self.chip.consume_draw_flag() {
            self.display.display(self.chip.get_display())?;
        }

        for _ in 0..self.timers.due(now) {
            self.chip.tick_timers();
        }

        let tone = self.chip.is_sound_active();
        if tone != self.tone {
            log::debug!("tone {}", if tone { "on" } else { "off" });
            self.sound.set_tone(tone)?;
            self.tone = tone;
        }

        Ok(State::Continue)
    }

    /// Will tick the machine until the keyboard asks to quit or something fails.
    pub fn run(&mut self) -> Result<(), RunError> {
        loop {
            if let State::Quit = self.tick(Instant::now())? {
                return Ok(());
            }

            let deadline = self.cpu.next_deadline().min(self.timers.next_deadline());
            let wait = deadline.saturating_duration_since(Instant::now());
            if wait > Duration::from_secs(0) {
                thread::sleep(wait);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        definitions::{display, keyboard},
        devices::{MockDisplayCommands, MockKeyboardCommands, MockSoundCommands},
        resources::Rom,
    };
    use mockall::{predicate::eq, Sequence};

    fn chip(data: &[u8]) -> ChipSet {
        ChipSet::new(Rom::new("runner", data).unwrap())
    }

    fn idle_keyboard() -> MockKeyboardCommands {
        let mut keyboard = MockKeyboardCommands::new();
        keyboard
            .expect_poll()
            .returning(|| Ok(Input::Keys([false; keyboard::SIZE])));
        keyboard
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_quit() {
        let mut keyboard = MockKeyboardCommands::new();
        keyboard.expect_poll().times(1).returning(|| Ok(Input::Quit));
        let mut display = MockDisplayCommands::new();
        display.expect_display().never();
        let mut sound = MockSoundCommands::new();
        sound.expect_set_tone().never();

        let start = Instant::now();
        let mut runner = Runner::starting_at(chip(&[0x00, 0xE0]), display, keyboard, sound, start);

        assert_eq!(runner.tick(start + ms(10)).unwrap(), State::Quit);
        assert_eq!(runner.chip().get_program_counter(), cpu::PROGRAM_COUNTER);
    }

    #[test]
    fn test_draw_once() {
        let mut display = MockDisplayCommands::new();
        display
            .expect_display()
            .withf(|pixels| pixels.len() == display::RESOLUTION && pixels.iter().all(|&p| p == 0))
            .times(1)
            .returning(|_| Ok(()));
        let mut sound = MockSoundCommands::new();
        sound.expect_set_tone().never();

        let start = Instant::now();
        // CLS followed by a jump onto itself
        let chip = chip(&[0x00, 0xE0, 0x12, 0x02]);
        let mut runner = Runner::starting_at(chip, display, idle_keyboard(), sound, start);

        // nothing is due yet
        assert_eq!(runner.tick(start).unwrap(), State::Continue);
        assert_eq!(runner.chip().get_program_counter(), cpu::PROGRAM_COUNTER);

        assert_eq!(runner.tick(start + ms(2)).unwrap(), State::Continue);
        assert_eq!(runner.chip().get_program_counter(), 0x202);

        assert_eq!(runner.tick(start + ms(8)).unwrap(), State::Continue);
        assert_eq!(runner.chip().get_program_counter(), 0x202);
    }

    #[test]
    fn test_fatal_fetch() {
        let mut display = MockDisplayCommands::new();
        display.expect_display().never();

        let start = Instant::now();
        // jump to the last byte of memory
        let chip = chip(&[0x1F, 0xFF]);
        let mut runner =
            Runner::starting_at(chip, display, idle_keyboard(), MockSoundCommands::new(), start);

        let err = runner.tick(start + ms(4)).unwrap_err();
        assert!(matches!(err, RunError::Process(err) if err.is_fatal()));
        assert_eq!(runner.chip().get_program_counter(), 0xFFF);
    }

    #[test]
    fn test_recoverable_error() {
        let start = Instant::now();
        // an unknown opcode followed by a jump onto itself
        let chip = chip(&[0x00, 0x01, 0x12, 0x02]);
        let mut runner = Runner::starting_at(
            chip,
            MockDisplayCommands::new(),
            idle_keyboard(),
            MockSoundCommands::new(),
            start,
        );

        assert_eq!(runner.tick(start + ms(4)).unwrap(), State::Continue);
        assert_eq!(runner.chip().get_program_counter(), 0x202);
    }

    #[test]
    fn test_keys_are_forwarded() {
        let mut keys = [false; keyboard::SIZE];
        keys[0x5] = true;
        let mut keyboard = MockKeyboardCommands::new();
        keyboard
            .expect_poll()
            .returning(move || Ok(Input::Keys(keys)));

        let start = Instant::now();
        // wait for a key, then jump onto itself
        let chip = chip(&[0xF0, 0x0A, 0x12, 0x02]);
        let mut runner = Runner::starting_at(
            chip,
            MockDisplayCommands::new(),
            keyboard,
            MockSoundCommands::new(),
            start,
        );

        assert_eq!(runner.tick(start + ms(2)).unwrap(), State::Continue);
        assert_eq!(runner.chip().get_keyboard(), &keys[..]);
        assert_eq!(runner.chip().get_program_counter(), 0x202);
    }

    #[test]
    fn test_waiting_for_a_key() {
        let start = Instant::now();
        let chip = chip(&[0xF0, 0x0A, 0x12, 0x02]);
        let mut runner = Runner::starting_at(
            chip,
            MockDisplayCommands::new(),
            idle_keyboard(),
            MockSoundCommands::new(),
            start,
        );

        assert_eq!(runner.tick(start + ms(10)).unwrap(), State::Continue);
        assert_eq!(runner.chip().get_program_counter(), cpu::PROGRAM_COUNTER);
    }

    #[test]
    fn test_tone() {
        let mut seq = Sequence::new();
        let mut sound = MockSoundCommands::new();
        sound
            .expect_set_tone()
            .with(eq(true))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        sound
            .expect_set_tone()
            .with(eq(false))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let start = Instant::now();
        // V0 = 2, sound timer = V0, jump onto itself
        let chip = chip(&[0x60, 0x02, 0xF0, 0x18, 0x12, 0x04]);
        let mut runner =
            Runner::starting_at(chip, MockDisplayCommands::new(), idle_keyboard(), sound, start);

        assert_eq!(runner.tick(start + ms(6)).unwrap(), State::Continue);
        assert_eq!(runner.chip().get_sound_timer(), 2);

        // the tone is only switched when it changes
        assert_eq!(runner.tick(start + ms(10)).unwrap(), State::Continue);

        // two timer periods passed
        assert_eq!(runner.tick(start + ms(34)).unwrap(), State::Continue);
        assert_eq!(runner.chip().get_sound_timer(), 0);
    }

    #[test]
    fn test_device_failure() {
        let mut display = MockDisplayCommands::new();
        display
            .expect_display()
            .times(1)
            .returning(|_| Err(std::io::Error::new(std::io::ErrorKind::Other, "gone")));

        let start = Instant::now();
        let chip = chip(&[0x00, 0xE0, 0x12, 0x02]);
        let mut runner =
            Runner::starting_at(chip, display, idle_keyboard(), MockSoundCommands::new(), start);

        assert!(matches!(
            runner.tick(start + ms(2)),
            Err(RunError::Device(_))
        ));
    }
}
