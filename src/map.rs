use crate::board::{RegisterBlock, BLOCKS};

/// A single bit in an SBUS register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterBit {
    pub addr: u16,
    pub bit: u8,
}

impl RegisterBit {
    pub const fn mask(&self) -> u16 {
        1 << self.bit
    }
}

/// Where a DIO pin lives in the register space.
///
/// This is the whole pin-to-register translation: once a pin is located, its input, output and
/// direction bits are known.  Only pins on the DIO header can be located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinLocation {
    block: RegisterBlock,
    index: u8,
}

impl PinLocation {
    /// Locate `pin`, or `None` if it is not a DIO pin.
    pub fn of(pin: u8) -> Option<Self> {
        BLOCKS
            .iter()
            .find(|block| block.contains(pin))
            .map(|block| Self {
                block: *block,
                index: pin - block.first_pin,
            })
    }

    pub fn block(&self) -> &RegisterBlock {
        &self.block
    }

    /// Position of the pin within its block, starting at 0.
    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn input(&self) -> RegisterBit {
        RegisterBit {
            addr: self.block.input,
            bit: self.block.input_shift + self.index,
        }
    }

    pub fn output(&self) -> RegisterBit {
        RegisterBit {
            addr: self.block.output,
            bit: self.block.output_shift + self.index,
        }
    }

    pub fn direction(&self) -> RegisterBit {
        RegisterBit {
            addr: self.block.direction,
            bit: self.block.direction_shift + self.index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PinLocation, RegisterBit};

    fn bit(addr: u16, bit: u8) -> RegisterBit {
        RegisterBit { addr, bit }
    }

    #[test]
    fn combined_register_offsets() {
        for pin in 37..=40u8 {
            let loc = PinLocation::of(pin).unwrap();
            assert_eq!(loc.direction(), bit(0x66, pin - 33));
            assert_eq!(loc.output(), bit(0x66, pin - 29));
            assert_eq!(loc.input(), bit(0x66, pin - 25));
        }
        assert_eq!(PinLocation::of(37).unwrap().input(), bit(0x66, 12));
        assert_eq!(PinLocation::of(40).unwrap().input(), bit(0x66, 15));
        assert_eq!(PinLocation::of(39).unwrap().output().mask(), 0x0400);
        assert_eq!(PinLocation::of(39).unwrap().direction().mask(), 0x0040);
    }

    #[test]
    fn dedicated_register_offsets() {
        for pin in 21..=36u8 {
            let loc = PinLocation::of(pin).unwrap();
            assert_eq!(loc.input(), bit(0x68, pin - 21));
            assert_eq!(loc.output(), bit(0x6a, pin - 21));
            assert_eq!(loc.direction(), bit(0x6c, pin - 21));
        }
        for pin in 5..=20u8 {
            let loc = PinLocation::of(pin).unwrap();
            assert_eq!(loc.input(), bit(0x6e, pin - 5));
            assert_eq!(loc.output(), bit(0x70, pin - 5));
            assert_eq!(loc.direction(), bit(0x72, pin - 5));
        }
    }

    #[test]
    fn range_edges() {
        assert_eq!(PinLocation::of(5).unwrap().index(), 0);
        assert_eq!(PinLocation::of(20).unwrap().index(), 15);
        assert_eq!(PinLocation::of(21).unwrap().index(), 0);
        assert_eq!(PinLocation::of(36).unwrap().index(), 15);
        assert_eq!(PinLocation::of(37).unwrap().index(), 0);
        assert_eq!(PinLocation::of(40).unwrap().index(), 3);
    }

    #[test]
    fn pins_off_the_header() {
        for pin in [0, 1, 4, 41, 42, 99, 255] {
            assert_eq!(PinLocation::of(pin), None);
        }
    }
}
