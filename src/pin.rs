use core::marker::PhantomData;
use embedded_hal::digital::{self as hal_digital, ErrorType};

/// Representation of a DIO pin.
///
/// `Pin` is not constructed directly, this type is obtained from [`Dio::split()`] or by calling
/// [`Dio::pin()`] with the pin number.  All register access goes through the bus lock of the
/// `Dio` it came from.
///
/// [`Dio::split()`]: crate::Dio::split
/// [`Dio::pin()`]: crate::Dio::pin
pub struct Pin<'a, MODE, MUTEX> {
    pin: u8,
    driver: &'a MUTEX,
    _m: PhantomData<MODE>,
}

impl<'a, MODE, MUTEX> Pin<'a, MODE, MUTEX> {
    /// `pin` must be a DIO header pin (5 to 40).
    pub(crate) const fn new_unchecked(pin: u8, driver: &'a MUTEX) -> Self {
        Self {
            pin,
            driver,
            _m: PhantomData,
        }
    }
}

impl<'a, MODE, MUTEX, PD> Pin<'a, MODE, MUTEX>
where
    PD: crate::DioDriver,
    MUTEX: crate::BusMutex<Bus = PD>,
{
    pub(crate) fn new(pin: u8, driver: &'a MUTEX) -> Result<Self, crate::Error<PD::Error>> {
        if crate::map::PinLocation::of(pin).is_none() {
            return Err(crate::Error::InvalidPin(pin));
        }
        Ok(Self::new_unchecked(pin, driver))
    }

    /// The DIO header pin number of this pin.
    pub fn pin_number(&self) -> u8 {
        self.pin
    }

    pub(crate) fn driver(&self) -> &'a MUTEX {
        self.driver
    }

    /// Release the pin (high impedance), making it an input.
    ///
    /// The output latch keeps its value.
    pub fn into_input(self) -> Result<Pin<'a, crate::mode::Input, MUTEX>, crate::Error<PD::Error>> {
        self.driver
            .lock(|drv| drv.set_pin(self.pin, crate::PinState::HighImpedance))?;
        Ok(Pin {
            pin: self.pin,
            driver: self.driver,
            _m: PhantomData,
        })
    }

    /// Turn the pin into an output driving LOW.
    pub fn into_output(
        self,
    ) -> Result<Pin<'a, crate::mode::Output, MUTEX>, crate::Error<PD::Error>> {
        self.into_output_with_state(false)
    }

    /// Turn the pin into an output driving HIGH.
    pub fn into_output_high(
        self,
    ) -> Result<Pin<'a, crate::mode::Output, MUTEX>, crate::Error<PD::Error>> {
        self.into_output_with_state(true)
    }

    fn into_output_with_state(
        self,
        high: bool,
    ) -> Result<Pin<'a, crate::mode::Output, MUTEX>, crate::Error<PD::Error>> {
        self.driver
            .lock(|drv| drv.set_pin(self.pin, crate::PinState::from(high)))?;
        Ok(Pin {
            pin: self.pin,
            driver: self.driver,
            _m: PhantomData,
        })
    }

    /// Read back whether the pin is currently configured as an output.
    pub fn direction(&self) -> Result<crate::Direction, crate::Error<PD::Error>> {
        self.driver.lock(|drv| drv.direction(self.pin))
    }
}

impl<'a, MODE: crate::mode::HasInput, MUTEX, PD> Pin<'a, MODE, MUTEX>
where
    PD: crate::DioDriver,
    MUTEX: crate::BusMutex<Bus = PD>,
{
    pub fn is_high(&self) -> Result<bool, crate::Error<PD::Error>> {
        self.driver.lock(|drv| drv.get_pin(self.pin))
    }

    pub fn is_low(&self) -> Result<bool, crate::Error<PD::Error>> {
        self.is_high().map(|b| !b)
    }
}

impl<'a, MODE: crate::mode::HasOutput, MUTEX, PD> Pin<'a, MODE, MUTEX>
where
    PD: crate::DioDriver,
    MUTEX: crate::BusMutex<Bus = PD>,
{
    pub fn set_high(&mut self) -> Result<(), crate::Error<PD::Error>> {
        self.driver
            .lock(|drv| drv.set_pin(self.pin, crate::PinState::High))
    }

    pub fn set_low(&mut self) -> Result<(), crate::Error<PD::Error>> {
        self.driver
            .lock(|drv| drv.set_pin(self.pin, crate::PinState::Low))
    }

    pub fn is_set_high(&self) -> Result<bool, crate::Error<PD::Error>> {
        self.driver.lock(|drv| drv.is_set_high(self.pin))
    }

    pub fn is_set_low(&self) -> Result<bool, crate::Error<PD::Error>> {
        self.is_set_high().map(|b| !b)
    }

    pub fn toggle(&mut self) -> Result<(), crate::Error<PD::Error>> {
        self.driver.lock(|drv| drv.toggle(self.pin))
    }
}

impl<'a, MODE, MUTEX, PD> ErrorType for Pin<'a, MODE, MUTEX>
where
    PD: crate::DioDriver,
    PD::Error: core::fmt::Debug,
    MUTEX: crate::BusMutex<Bus = PD>,
{
    type Error = crate::Error<PD::Error>;
}

impl<'a, MODE: crate::mode::HasInput, MUTEX, PD> hal_digital::InputPin for Pin<'a, MODE, MUTEX>
where
    PD: crate::DioDriver,
    PD::Error: core::fmt::Debug,
    MUTEX: crate::BusMutex<Bus = PD>,
{
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Pin::is_high(self)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Pin::is_low(self)
    }
}

impl<'a, MODE: crate::mode::HasOutput, MUTEX, PD> hal_digital::OutputPin for Pin<'a, MODE, MUTEX>
where
    PD: crate::DioDriver,
    PD::Error: core::fmt::Debug,
    MUTEX: crate::BusMutex<Bus = PD>,
{
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Pin::set_low(self)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Pin::set_high(self)
    }
}

impl<'a, MODE: crate::mode::HasOutput, MUTEX, PD> hal_digital::StatefulOutputPin
    for Pin<'a, MODE, MUTEX>
where
    PD: crate::DioDriver,
    PD::Error: core::fmt::Debug,
    MUTEX: crate::BusMutex<Bus = PD>,
{
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Pin::is_set_high(self)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Pin::is_set_low(self)
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        Pin::toggle(self)
    }
}
