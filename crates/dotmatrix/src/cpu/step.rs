use super::{Bus, Cpu, CpuState, ExecResult, OPCODES};

impl Cpu {
    /// Execute one instruction (or interrupt entry, or one idle HALT/STOP
    /// cycle) and return the M-cycles it took.
    ///
    /// Faults latched by the bus during the instruction are returned once
    /// the instruction has completed.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> ExecResult {
        self.step_dyn(bus)
    }

    fn step_dyn(&mut self, bus: &mut dyn Bus) -> ExecResult {
        match self.state {
            CpuState::Stopped => {
                if bus.any_button_pressed() {
                    self.state = CpuState::Fetching;
                }
                return Ok(1);
            }
            CpuState::Halted => {
                if bus.pending_interrupts() == 0 {
                    return Ok(1);
                }
                // Any pending interrupt wakes the core, even with IME clear.
                self.state = CpuState::Fetching;
            }
            CpuState::Fetching => {}
        }

        if let Some(cycles) = self.service_interrupt(bus) {
            return Ok(cycles);
        }

        let code = self.fetch8(bus);
        let op = &OPCODES[code as usize];
        log::trace!("GB CPU pc=0x{:04X} {}", self.regs.pc.wrapping_sub(1), op);
        let cycles = (op.handler)(self, bus, op)?;

        if let Some(fault) = bus.take_fault() {
            log::error!("GB CPU bus fault after {}: {}", op, fault);
            return Err(fault);
        }

        self.apply_ime_delay();
        Ok(cycles)
    }
}
