/// A device that owns a contiguous slice of the address space.
///
/// The MMU decodes the address and forwards the access unchanged, so
/// implementations see absolute addresses.
pub trait Memory {
    fn read(&self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, value: u8);
}

/// Plain read/write RAM mapped at `base`.
///
/// Used for both work RAM banks and high RAM.
#[derive(Clone, Debug)]
pub struct Ram {
    base: u16,
    data: Box<[u8]>,
}

impl Ram {
    pub fn new(base: u16, size: usize) -> Self {
        Self {
            base,
            data: vec![0; size].into_boxed_slice(),
        }
    }

    #[inline]
    fn offset(&self, addr: u16) -> usize {
        addr.wrapping_sub(self.base) as usize
    }
}

impl Memory for Ram {
    fn read(&self, addr: u16) -> u8 {
        self.data.get(self.offset(addr)).copied().unwrap_or(0xFF)
    }

    fn write(&mut self, addr: u16, value: u8) {
        let offset = self.offset(addr);
        if let Some(slot) = self.data.get_mut(offset) {
            *slot = value;
        }
    }
}
