//! Divider and timer (DIV/TIMA/TMA/TAC).
//!
//! A 16-bit system counter advances once per T-cycle; DIV exposes its
//! upper byte. TIMA counts falling edges of the counter bit selected by
//! TAC, ANDed with the enable bit, which also reproduces the extra
//! increments caused by DIV and TAC writes.

use super::Interrupts;
use crate::error::GbError;

/// Counter value after the boot ROM; DIV reads 0xAB.
const BOOT_COUNTER: u16 = 0xABCC;

/// TAC clock select.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerFrequency {
    /// 4096 Hz, every 1024 T-cycles.
    Hz4096,
    /// 262144 Hz, every 16 T-cycles.
    Hz262144,
    /// 65536 Hz, every 64 T-cycles.
    Hz65536,
    /// 16384 Hz, every 256 T-cycles.
    Hz16384,
}

impl TimerFrequency {
    /// Counter bit whose falling edge clocks TIMA.
    #[inline]
    fn counter_bit(self) -> u16 {
        match self {
            TimerFrequency::Hz4096 => 9,
            TimerFrequency::Hz262144 => 3,
            TimerFrequency::Hz65536 => 5,
            TimerFrequency::Hz16384 => 7,
        }
    }

    /// T-cycles between TIMA increments.
    pub fn period(self) -> u32 {
        2 << self.counter_bit()
    }
}

impl TryFrom<u8> for TimerFrequency {
    type Error = GbError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TimerFrequency::Hz4096),
            1 => Ok(TimerFrequency::Hz262144),
            2 => Ok(TimerFrequency::Hz65536),
            3 => Ok(TimerFrequency::Hz16384),
            other => Err(GbError::InvalidTimerFrequency(other)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Timer {
    counter: u16,
    tima: u8,
    tma: u8,
    enabled: bool,
    frequency: TimerFrequency,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub fn new() -> Self {
        Self {
            counter: BOOT_COUNTER,
            tima: 0,
            tma: 0,
            enabled: false,
            frequency: TimerFrequency::Hz4096,
        }
    }

    /// Timer input: the selected counter bit gated by TAC enable.
    #[inline]
    fn input(&self) -> bool {
        self.enabled && (self.counter >> self.frequency.counter_bit()) & 1 != 0
    }

    /// Increment TIMA; on overflow reload from TMA and request INT $50.
    fn increment_tima(&mut self) -> Interrupts {
        let (next, overflow) = self.tima.overflowing_add(1);
        if overflow {
            self.tima = self.tma;
            Interrupts::TIMER
        } else {
            self.tima = next;
            Interrupts::empty()
        }
    }

    /// Advance by `cycles` T-cycles and report any interrupt raised.
    pub fn tick(&mut self, cycles: u32) -> Interrupts {
        let mut raised = Interrupts::empty();
        for _ in 0..cycles {
            let before = self.input();
            self.counter = self.counter.wrapping_add(1);
            if before && !self.input() {
                raised |= self.increment_tima();
            }
        }
        raised
    }

    #[inline]
    pub fn div(&self) -> u8 {
        (self.counter >> 8) as u8
    }

    pub fn read(&self, addr: u16) -> u8 {
        match addr {
            0xFF04 => self.div(),
            0xFF05 => self.tima,
            0xFF06 => self.tma,
            0xFF07 => self.tac(),
            _ => 0xFF,
        }
    }

    fn tac(&self) -> u8 {
        let clock = match self.frequency {
            TimerFrequency::Hz4096 => 0,
            TimerFrequency::Hz262144 => 1,
            TimerFrequency::Hz65536 => 2,
            TimerFrequency::Hz16384 => 3,
        };
        0xF8 | (u8::from(self.enabled) << 2) | clock
    }

    /// Register write. A write that drops the timer input from 1 to 0
    /// clocks TIMA once, so it may raise the timer interrupt.
    pub fn write(&mut self, addr: u16, value: u8) -> Result<Interrupts, GbError> {
        let before = self.input();
        match addr {
            // Any write clears the whole system counter.
            0xFF04 => self.counter = 0,
            0xFF05 => self.tima = value,
            0xFF06 => self.tma = value,
            0xFF07 => {
                // The masked code always decodes; only raw codes above 3 are rejected.
                self.frequency = TimerFrequency::try_from(value & 0x03)?;
                self.enabled = value & 0x04 != 0;
            }
            _ => return Err(GbError::UnmappedAddress { addr }),
        }
        if before && !self.input() {
            Ok(self.increment_tima())
        } else {
            Ok(Interrupts::empty())
        }
    }
}
