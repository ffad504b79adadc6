//! Register layout of the DIO header.
//!
//! The 36 DIO lines are spread over three register blocks on the SBUS.  Pins 37 to 40 share one
//! combined register with the tag-memory control, the other two blocks have a dedicated 16-bit
//! register each for input, output and direction.
//!
//! Within each field the lowest pin number of the block is the least significant bit.  A set bit
//! in a direction field makes the pin an output.

/// One register block of the DIO header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterBlock {
    /// First pin governed by this block.
    pub first_pin: u8,
    /// Last pin governed by this block (inclusive).
    pub last_pin: u8,
    /// Address of the read-only input register.
    pub input: u16,
    /// Address of the output latch register.
    pub output: u16,
    /// Address of the direction register.
    pub direction: u16,
    /// Bit position of `first_pin` within the input register.
    pub input_shift: u8,
    /// Bit position of `first_pin` within the output register.
    pub output_shift: u8,
    /// Bit position of `first_pin` within the direction register.
    pub direction_shift: u8,
}

impl RegisterBlock {
    /// Number of pins in this block.
    pub const fn width(&self) -> u8 {
        self.last_pin - self.first_pin + 1
    }

    /// Mask covering one field of this block, right-aligned.
    pub const fn field_mask(&self) -> u16 {
        u16::MAX >> (16 - self.width() as u32)
    }

    pub const fn contains(&self, pin: u8) -> bool {
        pin >= self.first_pin && pin <= self.last_pin
    }

    /// Whether input, output and direction all live in the same register.
    pub const fn is_combined(&self) -> bool {
        self.input == self.output && self.output == self.direction
    }
}

/// Register 0x66, "DIO and tagmem control".
///
/// * bits 15..12: input for pins 40..37 (read-only)
/// * bits 11..8: output for pins 40..37
/// * bits 7..4: direction for pins 40..37
pub const DIO_37_40: RegisterBlock = RegisterBlock {
    first_pin: 37,
    last_pin: 40,
    input: 0x66,
    output: 0x66,
    direction: 0x66,
    input_shift: 12,
    output_shift: 8,
    direction_shift: 4,
};

/// Registers 0x68 (input), 0x6a (output) and 0x6c (direction) for pins 36..21.
pub const DIO_21_36: RegisterBlock = RegisterBlock {
    first_pin: 21,
    last_pin: 36,
    input: 0x68,
    output: 0x6a,
    direction: 0x6c,
    input_shift: 0,
    output_shift: 0,
    direction_shift: 0,
};

/// Registers 0x6e (input), 0x70 (output) and 0x72 (direction) for pins 20..5.
pub const DIO_5_20: RegisterBlock = RegisterBlock {
    first_pin: 5,
    last_pin: 20,
    input: 0x6e,
    output: 0x70,
    direction: 0x72,
    input_shift: 0,
    output_shift: 0,
    direction_shift: 0,
};

pub const BLOCKS: [RegisterBlock; 3] = [DIO_37_40, DIO_21_36, DIO_5_20];

/// Relay driver lines on the carrier board.  A relay is energized by driving its pin high.
pub const RELAY_1: u8 = 39;
pub const RELAY_2: u8 = 37;
pub const RELAY_3: u8 = 35;
