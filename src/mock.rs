//! Scripted SBUS mock for driver tests.
//!
//! Built on the generic expectation queue from `embedded-hal-mock`, so it behaves just like the
//! I2C mock: clone it into the code under test and call `done()` at the end.

/// Error returned by transactions scripted to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    Peek { addr: u16, value: Result<u16, MockError> },
    Poke { addr: u16, value: u16, fail: bool },
}

impl Transaction {
    /// Expect a `peek16(addr)` and answer it with `value`.
    pub fn peek(addr: u16, value: u16) -> Self {
        Transaction::Peek { addr, value: Ok(value) }
    }

    /// Expect a `poke16(addr, value)`.
    pub fn poke(addr: u16, value: u16) -> Self {
        Transaction::Poke { addr, value, fail: false }
    }

    /// Expect a `peek16(addr)` and fail it.
    pub fn peek_error(addr: u16) -> Self {
        Transaction::Peek { addr, value: Err(MockError) }
    }

    /// Expect a `poke16(addr, value)` and fail it.
    pub fn poke_error(addr: u16, value: u16) -> Self {
        Transaction::Poke { addr, value, fail: true }
    }
}

pub type Mock = embedded_hal_mock::common::Generic<Transaction>;

impl crate::Sbus for Mock {
    type Error = MockError;

    fn peek16(&mut self, addr: u16) -> Result<u16, Self::Error> {
        match self.next() {
            Some(Transaction::Peek { addr: expected, value }) => {
                assert_eq!(addr, expected, "peek16 from unexpected address");
                value
            }
            other => panic!("expected {:?}, got peek16({:#04x})", other, addr),
        }
    }

    fn poke16(&mut self, addr: u16, value: u16) -> Result<(), Self::Error> {
        match self.next() {
            Some(Transaction::Poke {
                addr: expected_addr,
                value: expected_value,
                fail,
            }) => {
                assert_eq!(addr, expected_addr, "poke16 to unexpected address");
                assert_eq!(
                    value, expected_value,
                    "poke16({:#04x}) wrote unexpected value",
                    addr
                );
                if fail {
                    Err(MockError)
                } else {
                    Ok(())
                }
            }
            other => panic!(
                "expected {:?}, got poke16({:#04x}, {:#06x})",
                other, addr, value
            ),
        }
    }
}
