use super::Interrupts;

/// Serial port (SB/SC) without a link partner.
///
/// A transfer started with the internal clock completes immediately: the
/// outgoing byte is captured, SB reads back 0xFF as if no cable were
/// attached, and the serial interrupt is requested.
#[derive(Clone, Debug, Default)]
pub struct Serial {
    sb: u8,
    sc: u8,
    output: Vec<u8>,
    echo: bool,
}

impl Serial {
    pub fn new(echo: bool) -> Self {
        Self {
            echo,
            ..Self::default()
        }
    }

    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn read(&self, addr: u16) -> u8 {
        match addr {
            0xFF01 => self.sb,
            0xFF02 => self.sc | 0x7E,
            _ => 0xFF,
        }
    }

    pub fn write(&mut self, addr: u16, value: u8) -> Interrupts {
        match addr {
            0xFF01 => {
                self.sb = value;
                Interrupts::empty()
            }
            0xFF02 => {
                self.sc = value;
                // Start bit with the internal clock selected.
                if value & 0x81 == 0x81 {
                    self.complete_transfer()
                } else {
                    Interrupts::empty()
                }
            }
            _ => Interrupts::empty(),
        }
    }

    fn complete_transfer(&mut self) -> Interrupts {
        let byte = self.sb;
        self.output.push(byte);
        if self.echo {
            log::info!("GB serial: 0x{:02X} {:?}", byte, byte as char);
        } else {
            log::debug!("GB serial: 0x{:02X}", byte);
        }
        self.sb = 0xFF;
        self.sc &= 0x7F;
        Interrupts::SERIAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_clock_transfer_captures_byte() {
        let mut serial = Serial::new(false);
        serial.write(0xFF01, b'o');
        assert_eq!(serial.write(0xFF02, 0x81), Interrupts::SERIAL);
        serial.write(0xFF01, b'k');
        serial.write(0xFF02, 0x81);
        assert_eq!(serial.output(), b"ok");
        assert_eq!(serial.read(0xFF01), 0xFF);
        assert_eq!(serial.read(0xFF02), 0x7F);
    }

    #[test]
    fn external_clock_waits_forever() {
        let mut serial = Serial::new(false);
        serial.write(0xFF01, 0x42);
        assert_eq!(serial.write(0xFF02, 0x80), Interrupts::empty());
        assert!(serial.output().is_empty());
        assert_eq!(serial.read(0xFF01), 0x42);
    }
}
