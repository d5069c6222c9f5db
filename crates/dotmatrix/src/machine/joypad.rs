use super::Interrupts;

/// The eight DMG buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Right,
    Left,
    Up,
    Down,
    A,
    B,
    Select,
    Start,
}

impl Button {
    /// (is direction group, bit in the low nibble)
    #[inline]
    fn line(self) -> (bool, u8) {
        match self {
            Button::Right => (true, 0x01),
            Button::Left => (true, 0x02),
            Button::Up => (true, 0x04),
            Button::Down => (true, 0x08),
            Button::A => (false, 0x01),
            Button::B => (false, 0x02),
            Button::Select => (false, 0x04),
            Button::Start => (false, 0x08),
        }
    }
}

/// P1/JOYP (FF00).
///
/// Pressed state is kept active-high internally and inverted on read.
#[derive(Clone, Debug)]
pub struct Joypad {
    select: u8,
    directions: u8,
    buttons: u8,
}

impl Default for Joypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Joypad {
    pub fn new() -> Self {
        Self {
            select: 0x30,
            directions: 0,
            buttons: 0,
        }
    }

    pub fn read(&self) -> u8 {
        // Bits 7-6 always read as 1; bits 5-4 select a group when 0.
        let mut low = 0x0F;
        if self.select & 0x10 == 0 {
            low &= !self.directions & 0x0F;
        }
        if self.select & 0x20 == 0 {
            low &= !self.buttons & 0x0F;
        }
        0xC0 | self.select | low
    }

    pub fn write(&mut self, value: u8) {
        // Only the selection bits are writable.
        self.select = value & 0x30;
    }

    /// Record a press. A newly pressed button requests the joypad interrupt.
    pub fn press(&mut self, button: Button) -> Interrupts {
        let (direction, bit) = button.line();
        let group = if direction {
            &mut self.directions
        } else {
            &mut self.buttons
        };
        let newly = *group & bit == 0;
        *group |= bit;
        if newly {
            Interrupts::JOYPAD
        } else {
            Interrupts::empty()
        }
    }

    pub fn release(&mut self, button: Button) {
        let (direction, bit) = button.line();
        if direction {
            self.directions &= !bit;
        } else {
            self.buttons &= !bit;
        }
    }

    /// Whether any button is held, regardless of group selection.
    pub fn any_pressed(&self) -> bool {
        (self.directions | self.buttons) != 0
    }
}
