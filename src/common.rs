pub trait DioDriver {
    type Error;

    /// Put `pin` into `state`.
    ///
    /// For [`PinState::Low`] and [`PinState::High`] the driver must latch the level first and
    /// then make the pin an output.  [`PinState::HighImpedance`] only releases the pin, the
    /// latched level must be kept.
    fn set_pin(&mut self, pin: u8, state: PinState) -> Result<(), Error<Self::Error>>;

    /// Read the level present on `pin`.
    fn get_pin(&mut self, pin: u8) -> Result<bool, Error<Self::Error>>;

    /// Check whether the output latch of `pin` is set HIGH.
    fn is_set_high(&mut self, pin: u8) -> Result<bool, Error<Self::Error>>;

    /// Read back the direction `pin` is configured for.
    fn direction(&mut self, pin: u8) -> Result<Direction, Error<Self::Error>>;

    fn toggle(&mut self, pin: u8) -> Result<(), Error<Self::Error>> {
        let state = if self.is_set_high(pin)? {
            PinState::Low
        } else {
            PinState::High
        };
        self.set_pin(pin, state)
    }
}

/// State a DIO pin can be put into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinState {
    /// Drive the pin LOW.
    Low,
    /// Drive the pin HIGH.
    High,
    /// Release the pin; it becomes an input and the output latch keeps its value.
    HighImpedance,
}

impl From<bool> for PinState {
    fn from(high: bool) -> Self {
        if high {
            PinState::High
        } else {
            PinState::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Input,
    Output,
}

/// Errors returned by DIO operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The pin number is not on the DIO header (valid pins are 5 to 40).
    InvalidPin(u8),
    /// The SBUS backend reported an error.
    Bus(E),
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidPin(pin) => write!(f, "pin {} is not a DIO pin", pin),
            Error::Bus(e) => write!(f, "SBUS access failed: {:?}", e),
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for Error<E> {}

impl<E: core::fmt::Debug> embedded_hal::digital::Error for Error<E> {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

/// Pin Modes
pub mod mode {
    /// Trait for pin-modes which can be used to set a logic level.
    pub trait HasOutput {}
    /// Trait for pin-modes which can be used to read a logic level.
    pub trait HasInput {}

    /// Pin configured as a high-impedance input.
    pub struct Input;
    impl HasInput for Input {}

    /// Pin configured as an output.
    pub struct Output;
    impl HasOutput for Output {}
}
