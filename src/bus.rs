/// Access to the 16-bit SBUS register space.
///
/// This is the only piece of platform code `sbus-dio` needs.  On the board itself it is usually
/// backed by the vendor `sbus_peek16()`/`sbus_poke16()` routines or an `mmap()` of the syscon
/// window; on a host it can be a [`RegisterBank`][crate::RegisterBank].
///
/// Implementations must return the most recently written value from `peek16()` and must not
/// clear unrelated bits on `poke16()`.
pub trait Sbus {
    type Error;

    /// Read the 16-bit register at `addr`.
    fn peek16(&mut self, addr: u16) -> Result<u16, Self::Error>;

    /// Write `value` to the 16-bit register at `addr`.
    fn poke16(&mut self, addr: u16, value: u16) -> Result<(), Self::Error>;
}

impl<T: Sbus + ?Sized> Sbus for &mut T {
    type Error = T::Error;

    fn peek16(&mut self, addr: u16) -> Result<u16, Self::Error> {
        T::peek16(self, addr)
    }

    fn poke16(&mut self, addr: u16, value: u16) -> Result<(), Self::Error> {
        T::poke16(self, addr, value)
    }
}

pub(crate) trait SbusExt {
    type Error;

    fn update16(&mut self, addr: u16, mask_set: u16, mask_clear: u16) -> Result<(), Self::Error>;
    fn read_bit(&mut self, addr: u16, bit: u8) -> Result<bool, Self::Error>;
}

impl<S: Sbus> SbusExt for S {
    type Error = S::Error;

    fn update16(&mut self, addr: u16, mask_set: u16, mask_clear: u16) -> Result<(), Self::Error> {
        let mut value = self.peek16(addr)?;
        value |= mask_set;
        value &= !mask_clear;
        self.poke16(addr, value)
    }

    fn read_bit(&mut self, addr: u16, bit: u8) -> Result<bool, Self::Error> {
        Ok((self.peek16(addr)? >> bit) & 0x0001 != 0)
    }
}
