//! In-memory stand-in for the DIO registers.
//!
//! [`RegisterBank`] behaves like the SBUS side of the DIO header: input fields are read-only and
//! show the level on the line, which is the latched output for pins configured as outputs and
//! whatever [`drive_line()`][RegisterBank::drive_line] put there for all others.  Only the DIO
//! register addresses are decoded.
use crate::board::{RegisterBlock, BLOCKS};
use crate::map::PinLocation;
use heapless::LinearMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BankError {
    /// Nothing is mapped at this SBUS address.
    Unmapped(u16),
}

#[derive(Debug, Clone)]
pub struct RegisterBank {
    latches: LinearMap<u16, u16, 8>,
    // external line levels per block, keyed by input register, right-aligned
    lines: LinearMap<u16, u16, 4>,
}

impl RegisterBank {
    /// All registers cleared: every pin is an input, every latch LOW, every line LOW.
    pub fn new() -> Self {
        let mut latches = LinearMap::new();
        let mut lines = LinearMap::new();
        for block in BLOCKS.iter() {
            // capacity holds every DIO register, inserts cannot fail
            let _ = latches.insert(block.input, 0);
            let _ = latches.insert(block.output, 0);
            let _ = latches.insert(block.direction, 0);
            let _ = lines.insert(block.input, 0);
        }
        Self { latches, lines }
    }

    /// The writable content of the register at `addr`, input fields read as 0.
    pub fn latched(&self, addr: u16) -> Option<u16> {
        self.latches.get(&addr).copied()
    }

    /// Set the level an external circuit applies to `pin`.
    ///
    /// It is only visible on the input field while the pin is not an output.
    pub fn drive_line(&mut self, pin: u8, high: bool) -> Result<(), crate::Error<BankError>> {
        let loc = PinLocation::of(pin).ok_or(crate::Error::InvalidPin(pin))?;
        let input = loc.block().input;
        let line = self
            .lines
            .get_mut(&input)
            .ok_or(crate::Error::Bus(BankError::Unmapped(input)))?;
        if high {
            *line |= 1 << loc.index();
        } else {
            *line &= !(1 << loc.index());
        }
        Ok(())
    }

    fn field(&self, addr: u16, shift: u8, mask: u16) -> u16 {
        (self.latched(addr).unwrap_or(0) >> shift) & mask
    }

    fn levels(&self, block: &RegisterBlock) -> u16 {
        let mask = block.field_mask();
        let out = self.field(block.output, block.output_shift, mask);
        let dir = self.field(block.direction, block.direction_shift, mask);
        let ext = self.lines.get(&block.input).copied().unwrap_or(0);
        ((out & dir) | (ext & !dir)) & mask
    }

    fn read_only_mask(addr: u16) -> u16 {
        BLOCKS
            .iter()
            .filter(|b| b.input == addr)
            .map(|b| {
                if b.is_combined() {
                    b.field_mask() << b.input_shift
                } else {
                    // dedicated input register, nothing in it is writable
                    u16::MAX
                }
            })
            .fold(0, |m, field| m | field)
    }
}

impl Default for RegisterBank {
    fn default() -> Self {
        Self::new()
    }
}

impl crate::Sbus for RegisterBank {
    type Error = BankError;

    fn peek16(&mut self, addr: u16) -> Result<u16, Self::Error> {
        let mut value = self.latched(addr).ok_or(BankError::Unmapped(addr))?;
        for block in BLOCKS.iter().filter(|b| b.input == addr) {
            let field = block.field_mask() << block.input_shift;
            value = (value & !field) | (self.levels(block) << block.input_shift);
        }
        Ok(value)
    }

    fn poke16(&mut self, addr: u16, value: u16) -> Result<(), Self::Error> {
        let read_only = Self::read_only_mask(addr);
        let latch = self
            .latches
            .get_mut(&addr)
            .ok_or(BankError::Unmapped(addr))?;
        *latch = (*latch & read_only) | (value & !read_only);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{BankError, RegisterBank};
    use crate::map::PinLocation;
    use crate::{Direction, Dio, Error, PinState, Sbus};

    const REGISTERS: [u16; 7] = [0x66, 0x68, 0x6a, 0x6c, 0x6e, 0x70, 0x72];
    const STATES: [PinState; 3] = [PinState::Low, PinState::High, PinState::HighImpedance];

    fn set(bank: &mut RegisterBank, pin: u8, state: PinState) {
        Dio::new(bank).set_pin(pin, state).unwrap();
    }

    fn get(bank: &mut RegisterBank, pin: u8) -> bool {
        Dio::new(bank).get_pin(pin).unwrap()
    }

    fn snapshot(bank: &RegisterBank) -> [u16; 7] {
        REGISTERS.map(|addr| bank.latched(addr).unwrap())
    }

    #[test]
    fn combined_register_scenario() {
        let mut bank = RegisterBank::new();
        set(&mut bank, 39, PinState::High);
        assert_eq!(bank.latched(0x66), Some(0x0440));
        // output drives the line, visible in bit 14
        assert_eq!(bank.peek16(0x66), Ok(0x4440));
        assert!(get(&mut bank, 39));

        set(&mut bank, 39, PinState::HighImpedance);
        assert_eq!(bank.latched(0x66), Some(0x0400));
        assert!(!get(&mut bank, 39));
        bank.drive_line(39, true).unwrap();
        assert!(get(&mut bank, 39));
    }

    #[test]
    fn dedicated_register_scenario() {
        let mut bank = RegisterBank::new();
        set(&mut bank, 25, PinState::Low);
        assert_eq!(bank.latched(0x6c), Some(0x0010));
        assert_eq!(bank.latched(0x6a), Some(0x0000));
    }

    #[test]
    fn round_trip_every_pin() {
        let mut bank = RegisterBank::new();
        for pin in 5..=40 {
            set(&mut bank, pin, PinState::High);
            assert!(get(&mut bank, pin), "pin {}", pin);
            set(&mut bank, pin, PinState::Low);
            assert!(!get(&mut bank, pin), "pin {}", pin);
        }
    }

    #[test]
    fn writes_only_touch_own_bits() {
        for pin in 5..=40 {
            for state in STATES {
                let mut bank = RegisterBank::new();
                for other in 5..=40u8 {
                    set(&mut bank, other, STATES[other as usize % 3]);
                }
                let before = snapshot(&bank);

                set(&mut bank, pin, state);

                let after = snapshot(&bank);
                let loc = PinLocation::of(pin).unwrap();
                for (i, addr) in REGISTERS.iter().enumerate() {
                    let mut allowed = 0;
                    for bit in [loc.output(), loc.direction()] {
                        if bit.addr == *addr {
                            allowed |= bit.mask();
                        }
                    }
                    assert_eq!(
                        (before[i] ^ after[i]) & !allowed,
                        0,
                        "pin {} {:?} disturbed register {:#04x}",
                        pin,
                        state,
                        addr
                    );
                }
            }
        }
    }

    #[test]
    fn high_impedance_keeps_latch() {
        for pin in 5..=40 {
            for high in [false, true] {
                let mut bank = RegisterBank::new();
                set(&mut bank, pin, PinState::from(high));
                set(&mut bank, pin, PinState::HighImpedance);

                let dio = Dio::new(&mut bank);
                assert_eq!(dio.direction(pin), Ok(Direction::Input));
                assert_eq!(dio.is_set_high(pin), Ok(high));
            }
        }
    }

    #[test]
    fn levels_force_output() {
        for pin in 5..=40 {
            for prior in STATES {
                for state in [PinState::Low, PinState::High] {
                    let mut bank = RegisterBank::new();
                    set(&mut bank, pin, prior);
                    set(&mut bank, pin, state);

                    let dio = Dio::new(&mut bank);
                    assert_eq!(dio.direction(pin), Ok(Direction::Output));
                    assert_eq!(dio.is_set_high(pin), Ok(state == PinState::High));
                }
            }
        }
    }

    #[test]
    fn invalid_pins_leave_registers_alone() {
        let mut bank = RegisterBank::new();
        let dio = Dio::new(&mut bank);
        for pin in [0, 4, 41, 255] {
            for state in STATES {
                assert_eq!(dio.set_pin(pin, state), Err(Error::InvalidPin(pin)));
            }
            assert_eq!(dio.get_pin(pin), Err(Error::InvalidPin(pin)));
        }
        assert_eq!(snapshot(&bank), [0; 7]);
        assert_eq!(bank.drive_line(41, true), Err(Error::InvalidPin(41)));
    }

    #[test]
    fn input_fields_are_read_only() {
        let mut bank = RegisterBank::new();
        bank.poke16(0x68, 0xffff).unwrap();
        bank.poke16(0x66, 0xffff).unwrap();
        assert_eq!(bank.latched(0x68), Some(0x0000));
        assert_eq!(bank.latched(0x66), Some(0x0fff));
        // pins 37..40 are outputs driving HIGH now
        assert_eq!(bank.peek16(0x66), Ok(0xffff));
    }

    #[test]
    fn unmapped_addresses() {
        let mut bank = RegisterBank::new();
        assert_eq!(bank.peek16(0x64), Err(BankError::Unmapped(0x64)));
        assert_eq!(bank.poke16(0x74, 1), Err(BankError::Unmapped(0x74)));
    }
}
