use log::{debug, info, trace};

use crate::config::Config;
use crate::error::Fault;
use crate::instruction::Instruction;
use crate::memory::Memory;
use crate::operations;
use crate::state::{FrameBuffer, Machine};

/// # Chip8
///
/// The interpreter controller. Owns the machine state and the memory image
/// and drives them through the fetch-decode-execute cycle.
///
/// Supplies interfaces for:
/// - loading programs
/// - pressing and releasing pad keys
/// - stepping the CPU and ticking the timers on independent cadences
/// - pausing, resuming, and shutting down
/// - inspecting the frame buffer for rendering by some display
pub struct Chip8 {
    machine: Machine,
    memory: Memory,
    run_state: RunState,
    config: Config,
}

/// The controller's lifecycle state.
///
/// Transitions happen only in response to external pause/resume/quit
/// requests, except that a fatal fault forces `Quit`. `Quit` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
    Quit,
}

/// What a call to [`Chip8::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// One instruction was fetched and executed.
    Executed,
    /// The interpreter is paused or shut down; nothing happened.
    Idle,
}

impl Chip8 {
    pub fn new(config: Config) -> Self {
        Chip8 {
            machine: Machine::new(config.width, config.height),
            memory: Memory::new(),
            run_state: RunState::Running,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Loads a program, resetting the machine and memory image first.
    ///
    /// Fails with `CapacityExceeded` when the image doesn't fit above the
    /// entry point; the caller must not start the run loop in that case.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), Fault> {
        self.machine = Machine::new(self.config.width, self.config.height);
        self.memory = Memory::new();
        self.memory.load(rom)?;
        self.run_state = RunState::Running;
        info!("loaded {} byte program", rom.len());
        Ok(())
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Flips between `Running` and `Paused`; no-op once shut down.
    pub fn toggle_pause(&mut self) {
        self.run_state = match self.run_state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
            RunState::Quit => RunState::Quit,
        };
        debug!("run state is now {:?}", self.run_state);
    }

    /// Shuts the interpreter down; terminal.
    pub fn quit(&mut self) {
        self.run_state = RunState::Quit;
        debug!("run state is now {:?}", self.run_state);
    }

    /// Marks a pad key as pressed. Honored even while paused so that input
    /// is buffered in the keypad for the next step.
    pub fn key_press(&mut self, key: u8) {
        if let Some(pressed) = self.machine.keypad.get_mut(usize::from(key)) {
            *pressed = true;
        }
    }

    /// Marks a pad key as released.
    pub fn key_release(&mut self, key: u8) {
        if let Some(pressed) = self.machine.keypad.get_mut(usize::from(key)) {
            *pressed = false;
        }
    }

    /// Runs one fetch-decode-execute cycle when `Running`.
    ///
    /// A fault shuts the interpreter down before being returned; subsequent
    /// calls are `Idle` no-ops.
    pub fn step(&mut self) -> Result<StepOutcome, Fault> {
        if self.run_state != RunState::Running {
            return Ok(StepOutcome::Idle);
        }
        match self.cycle() {
            Ok(()) => Ok(StepOutcome::Executed),
            Err(fault) => {
                self.run_state = RunState::Quit;
                Err(fault)
            }
        }
    }

    fn cycle(&mut self) -> Result<(), Fault> {
        let pc = self.machine.pc;
        let op = self.memory.read_word(pc)?;
        self.machine.pc = pc.wrapping_add(2);
        let instruction = Instruction::decode(op);
        trace!("{pc:04X}: {op:04X} -> {instruction:?}");
        operations::execute(instruction, &mut self.machine, &mut self.memory)
    }

    /// Decrements both timers toward zero; one call per 60Hz tick.
    ///
    /// Runs on its own cadence, independent of how many instructions the
    /// caller steps per tick. Timers hold while paused.
    pub fn tick(&mut self) {
        if self.run_state != RunState::Running {
            return;
        }
        self.machine.delay_timer = self.machine.delay_timer.saturating_sub(1);
        self.machine.sound_timer = self.machine.sound_timer.saturating_sub(1);
    }

    /// Returns the frame buffer if the display should be redrawn, clearing
    /// the dirty flag.
    pub fn frame(&mut self) -> Option<&FrameBuffer> {
        if self.machine.draw_flag {
            self.machine.draw_flag = false;
            Some(&self.machine.frame_buffer)
        } else {
            None
        }
    }

    /// Read-only view of the display, dirty or not.
    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.machine.frame_buffer
    }

    /// Whether the sound countdown is live. Turning this into audio is the
    /// caller's concern.
    pub fn sound_active(&self) -> bool {
        self.machine.sound_timer > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{ENTRY_POINT, STACK_DEPTH};

    fn with_rom(rom: &[u8]) -> Chip8 {
        let mut chip8 = Chip8::new(Config::default());
        chip8.load_rom(rom).unwrap();
        chip8
    }

    #[test]
    fn load_rom_rejects_an_oversized_program() {
        let mut chip8 = Chip8::new(Config::default());
        let rom = vec![0; 0xE01];
        assert!(matches!(
            chip8.load_rom(&rom),
            Err(Fault::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn step_fetches_big_endian_and_advances() {
        let mut chip8 = with_rom(&[0x00, 0xE0]);
        assert_eq!(chip8.step(), Ok(StepOutcome::Executed));
        assert_eq!(chip8.machine.pc, ENTRY_POINT + 2);
    }

    #[test]
    fn a_short_program_runs_to_the_expected_register_state() {
        // V0 = 5, then V0 += 3
        let mut chip8 = with_rom(&[0x60, 0x05, 0x70, 0x03]);
        chip8.step().unwrap();
        chip8.step().unwrap();
        assert_eq!(chip8.machine.v[0x0], 8);
    }

    #[test]
    fn a_return_with_an_empty_stack_shuts_down() {
        let mut chip8 = with_rom(&[0x60, 0x05, 0x70, 0x03, 0x00, 0xEE]);
        chip8.step().unwrap();
        chip8.step().unwrap();
        assert_eq!(chip8.step(), Err(Fault::StackUnderflow));
        assert_eq!(chip8.run_state(), RunState::Quit);
        // Shut down means later steps are no-ops
        assert_eq!(chip8.step(), Ok(StepOutcome::Idle));
    }

    #[test]
    fn call_and_return_round_trip() {
        // 0x200: call 0x204; 0x202: (return target); 0x204: return
        let mut chip8 = with_rom(&[0x22, 0x04, 0x00, 0x00, 0x00, 0xEE]);
        chip8.step().unwrap();
        assert_eq!(chip8.machine.pc, 0x204);
        chip8.step().unwrap();
        assert_eq!(chip8.machine.pc, 0x202);
        assert!(chip8.machine.stack.is_empty());
    }

    #[test]
    fn thirteen_unreturned_calls_overflow_the_stack() {
        // Each instruction calls the next address, nesting without returning
        let mut rom = Vec::new();
        for depth in 0..=STACK_DEPTH as u16 {
            let target = ENTRY_POINT + 2 * (depth + 1);
            rom.push(0x20 | (target >> 8) as u8);
            rom.push(target as u8);
        }
        let mut chip8 = with_rom(&rom);
        for _ in 0..STACK_DEPTH {
            chip8.step().unwrap();
        }
        assert_eq!(
            chip8.step(),
            Err(Fault::StackOverflow { depth: STACK_DEPTH })
        );
        assert_eq!(chip8.run_state(), RunState::Quit);
    }

    #[test]
    fn fetching_past_the_end_of_memory_shuts_down() {
        let mut chip8 = with_rom(&[]);
        chip8.machine.pc = 0x1000;
        assert_eq!(
            chip8.step(),
            Err(Fault::OutOfBounds { address: 0x1000 })
        );
        assert_eq!(chip8.run_state(), RunState::Quit);
    }

    #[test]
    fn unknown_opcodes_are_skipped_over() {
        // 0x0123 is a machine-code call on real hardware; here it's a no-op
        let mut chip8 = with_rom(&[0x01, 0x23, 0x60, 0x07]);
        chip8.step().unwrap();
        chip8.step().unwrap();
        assert_eq!(chip8.machine.v[0x0], 0x07);
    }

    #[test]
    fn ticks_drive_the_timers_to_zero_and_no_further() {
        let mut chip8 = with_rom(&[]);
        chip8.machine.delay_timer = 0x2;
        chip8.machine.sound_timer = 0xFF;
        for _ in 0..300 {
            chip8.tick();
        }
        assert_eq!(chip8.machine.delay_timer, 0);
        assert_eq!(chip8.machine.sound_timer, 0);
        assert!(!chip8.sound_active());
    }

    #[test]
    fn timers_tick_independently() {
        let mut chip8 = with_rom(&[]);
        chip8.machine.delay_timer = 0x1;
        chip8.machine.sound_timer = 0x3;
        chip8.tick();
        chip8.tick();
        assert_eq!(chip8.machine.delay_timer, 0);
        assert_eq!(chip8.machine.sound_timer, 0x1);
        assert!(chip8.sound_active());
    }

    #[test]
    fn pausing_freezes_stepping_and_timers() {
        let mut chip8 = with_rom(&[0x60, 0x05]);
        chip8.machine.delay_timer = 0x5;
        chip8.toggle_pause();
        assert_eq!(chip8.run_state(), RunState::Paused);
        assert_eq!(chip8.step(), Ok(StepOutcome::Idle));
        chip8.tick();
        assert_eq!(chip8.machine.pc, ENTRY_POINT);
        assert_eq!(chip8.machine.delay_timer, 0x5);

        chip8.toggle_pause();
        assert_eq!(chip8.step(), Ok(StepOutcome::Executed));
        assert_eq!(chip8.machine.v[0x0], 0x05);
    }

    #[test]
    fn keys_are_buffered_while_paused() {
        let mut chip8 = with_rom(&[]);
        chip8.toggle_pause();
        chip8.key_press(0xA);
        assert!(chip8.machine.keypad[0xA]);
        chip8.key_release(0xA);
        assert!(!chip8.machine.keypad[0xA]);
    }

    #[test]
    fn quit_is_terminal() {
        let mut chip8 = with_rom(&[]);
        chip8.quit();
        chip8.toggle_pause();
        assert_eq!(chip8.run_state(), RunState::Quit);
        assert_eq!(chip8.step(), Ok(StepOutcome::Idle));
    }

    #[test]
    fn wait_key_blocks_by_re_executing() {
        let mut chip8 = with_rom(&[0xF1, 0x0A]);
        chip8.step().unwrap();
        chip8.step().unwrap();
        assert_eq!(chip8.machine.pc, ENTRY_POINT);

        chip8.key_press(0xB);
        chip8.step().unwrap();
        assert_eq!(chip8.machine.v[0x1], 0xB);
        assert_eq!(chip8.machine.pc, ENTRY_POINT + 2);
    }

    #[test]
    fn frame_reports_dirty_exactly_once() {
        let mut chip8 = with_rom(&[0x00, 0xE0]);
        assert!(chip8.frame().is_none());
        chip8.step().unwrap();
        assert!(chip8.frame().is_some());
        assert!(chip8.frame().is_none());
    }

    #[test]
    fn load_rom_resets_prior_state() {
        let mut chip8 = with_rom(&[0x60, 0x05]);
        chip8.step().unwrap();
        chip8.quit();
        chip8.load_rom(&[0x00, 0xE0]).unwrap();
        assert_eq!(chip8.run_state(), RunState::Running);
        assert_eq!(chip8.machine.pc, ENTRY_POINT);
        assert_eq!(chip8.machine.v[0x0], 0);
    }
}
