//! Support for the DIO header on the SBUS register interface
use crate::bus::SbusExt;
use crate::map::PinLocation;
use crate::{BusMutex, Direction, DioDriver, Error, PinState, Sbus};

/// The DIO header, pins 5 to 40.
///
/// Each method takes the bus lock once and runs its complete register sequence inside it.
pub struct Dio<M>(pub(crate) M);

impl<S> Dio<core::cell::RefCell<Driver<S>>>
where
    S: Sbus,
{
    pub fn new(sbus: S) -> Self {
        Self::with_mutex(sbus)
    }
}

impl<S, M> Dio<M>
where
    S: Sbus,
    M: BusMutex<Bus = Driver<S>>,
{
    pub fn with_mutex(sbus: S) -> Self {
        Self(BusMutex::create(Driver::new(sbus)))
    }

    /// Drive `pin` LOW or HIGH, or release it with [`PinState::HighImpedance`].
    pub fn set_pin(&self, pin: u8, state: PinState) -> Result<(), Error<S::Error>> {
        self.0.lock(|drv| drv.set_pin(pin, state))
    }

    /// Read the level on `pin`.
    pub fn get_pin(&self, pin: u8) -> Result<bool, Error<S::Error>> {
        self.0.lock(|drv| drv.get_pin(pin))
    }

    /// Read the output latch of `pin`.
    pub fn is_set_high(&self, pin: u8) -> Result<bool, Error<S::Error>> {
        self.0.lock(|drv| drv.is_set_high(pin))
    }

    pub fn direction(&self, pin: u8) -> Result<Direction, Error<S::Error>> {
        self.0.lock(|drv| drv.direction(pin))
    }

    /// Invert the output latch of `pin`, making it an output.
    pub fn toggle(&self, pin: u8) -> Result<(), Error<S::Error>> {
        self.0.lock(|drv| drv.toggle(pin))
    }

    /// Get a typed handle for `pin`.
    ///
    /// The handle starts out in [`Input`][crate::mode::Input] mode and no register is touched;
    /// use `into_output()` and friends to configure it.
    ///
    /// Handles from this method are not exclusive: calling it twice for the same pin gives two
    /// handles that both drive the same register bits, and the typed mode of one does not follow
    /// changes made through the other.  Use [`split()`][Dio::split] to get exactly one handle per
    /// pin.
    pub fn pin(&self, pin: u8) -> Result<crate::Pin<'_, crate::mode::Input, M>, Error<S::Error>> {
        crate::Pin::new(pin, &self.0)
    }

    /// Split the header into one handle per pin.
    ///
    /// All handles start out in [`Input`][crate::mode::Input] mode and no register is touched.
    pub fn split(&mut self) -> Parts<'_, M> {
        Parts {
            dio5: crate::Pin::new_unchecked(5, &self.0),
            dio6: crate::Pin::new_unchecked(6, &self.0),
            dio7: crate::Pin::new_unchecked(7, &self.0),
            dio8: crate::Pin::new_unchecked(8, &self.0),
            dio9: crate::Pin::new_unchecked(9, &self.0),
            dio10: crate::Pin::new_unchecked(10, &self.0),
            dio11: crate::Pin::new_unchecked(11, &self.0),
            dio12: crate::Pin::new_unchecked(12, &self.0),
            dio13: crate::Pin::new_unchecked(13, &self.0),
            dio14: crate::Pin::new_unchecked(14, &self.0),
            dio15: crate::Pin::new_unchecked(15, &self.0),
            dio16: crate::Pin::new_unchecked(16, &self.0),
            dio17: crate::Pin::new_unchecked(17, &self.0),
            dio18: crate::Pin::new_unchecked(18, &self.0),
            dio19: crate::Pin::new_unchecked(19, &self.0),
            dio20: crate::Pin::new_unchecked(20, &self.0),
            dio21: crate::Pin::new_unchecked(21, &self.0),
            dio22: crate::Pin::new_unchecked(22, &self.0),
            dio23: crate::Pin::new_unchecked(23, &self.0),
            dio24: crate::Pin::new_unchecked(24, &self.0),
            dio25: crate::Pin::new_unchecked(25, &self.0),
            dio26: crate::Pin::new_unchecked(26, &self.0),
            dio27: crate::Pin::new_unchecked(27, &self.0),
            dio28: crate::Pin::new_unchecked(28, &self.0),
            dio29: crate::Pin::new_unchecked(29, &self.0),
            dio30: crate::Pin::new_unchecked(30, &self.0),
            dio31: crate::Pin::new_unchecked(31, &self.0),
            dio32: crate::Pin::new_unchecked(32, &self.0),
            dio33: crate::Pin::new_unchecked(33, &self.0),
            dio34: crate::Pin::new_unchecked(34, &self.0),
            dio35: crate::Pin::new_unchecked(35, &self.0),
            dio36: crate::Pin::new_unchecked(36, &self.0),
            dio37: crate::Pin::new_unchecked(37, &self.0),
            dio38: crate::Pin::new_unchecked(38, &self.0),
            dio39: crate::Pin::new_unchecked(39, &self.0),
            dio40: crate::Pin::new_unchecked(40, &self.0),
        }
    }
}

/// One handle for each pin of the DIO header, see [`Dio::split()`].
pub struct Parts<'a, M> {
    pub dio5: crate::Pin<'a, crate::mode::Input, M>,
    pub dio6: crate::Pin<'a, crate::mode::Input, M>,
    pub dio7: crate::Pin<'a, crate::mode::Input, M>,
    pub dio8: crate::Pin<'a, crate::mode::Input, M>,
    pub dio9: crate::Pin<'a, crate::mode::Input, M>,
    pub dio10: crate::Pin<'a, crate::mode::Input, M>,
    pub dio11: crate::Pin<'a, crate::mode::Input, M>,
    pub dio12: crate::Pin<'a, crate::mode::Input, M>,
    pub dio13: crate::Pin<'a, crate::mode::Input, M>,
    pub dio14: crate::Pin<'a, crate::mode::Input, M>,
    pub dio15: crate::Pin<'a, crate::mode::Input, M>,
    pub dio16: crate::Pin<'a, crate::mode::Input, M>,
    pub dio17: crate::Pin<'a, crate::mode::Input, M>,
    pub dio18: crate::Pin<'a, crate::mode::Input, M>,
    pub dio19: crate::Pin<'a, crate::mode::Input, M>,
    pub dio20: crate::Pin<'a, crate::mode::Input, M>,
    pub dio21: crate::Pin<'a, crate::mode::Input, M>,
    pub dio22: crate::Pin<'a, crate::mode::Input, M>,
    pub dio23: crate::Pin<'a, crate::mode::Input, M>,
    pub dio24: crate::Pin<'a, crate::mode::Input, M>,
    pub dio25: crate::Pin<'a, crate::mode::Input, M>,
    pub dio26: crate::Pin<'a, crate::mode::Input, M>,
    pub dio27: crate::Pin<'a, crate::mode::Input, M>,
    pub dio28: crate::Pin<'a, crate::mode::Input, M>,
    pub dio29: crate::Pin<'a, crate::mode::Input, M>,
    pub dio30: crate::Pin<'a, crate::mode::Input, M>,
    pub dio31: crate::Pin<'a, crate::mode::Input, M>,
    pub dio32: crate::Pin<'a, crate::mode::Input, M>,
    pub dio33: crate::Pin<'a, crate::mode::Input, M>,
    pub dio34: crate::Pin<'a, crate::mode::Input, M>,
    pub dio35: crate::Pin<'a, crate::mode::Input, M>,
    pub dio36: crate::Pin<'a, crate::mode::Input, M>,
    pub dio37: crate::Pin<'a, crate::mode::Input, M>,
    pub dio38: crate::Pin<'a, crate::mode::Input, M>,
    pub dio39: crate::Pin<'a, crate::mode::Input, M>,
    pub dio40: crate::Pin<'a, crate::mode::Input, M>,
}

pub struct Driver<S> {
    sbus: S,
}

impl<S> Driver<S> {
    pub fn new(sbus: S) -> Self {
        Self { sbus }
    }
}

impl<S: Sbus> Driver<S> {
    fn locate(pin: u8) -> Result<PinLocation, Error<S::Error>> {
        PinLocation::of(pin).ok_or_else(|| {
            #[cfg(feature = "defmt")]
            defmt::debug!("dio: rejecting pin {=u8}", pin);
            Error::InvalidPin(pin)
        })
    }
}

impl<S: Sbus> DioDriver for Driver<S> {
    type Error = S::Error;

    fn set_pin(&mut self, pin: u8, state: PinState) -> Result<(), Error<Self::Error>> {
        let loc = Self::locate(pin)?;
        #[cfg(feature = "defmt")]
        defmt::trace!("dio: pin {=u8} -> {}", pin, state);

        let direction = loc.direction();
        if state == PinState::HighImpedance {
            return self
                .sbus
                .update16(direction.addr, 0, direction.mask())
                .map_err(Error::Bus);
        }

        // latch the level before switching direction to prevent a glitch
        let output = loc.output();
        let (mask_set, mask_clear) = match state {
            PinState::High => (output.mask(), 0),
            _ => (0, output.mask()),
        };
        self.sbus
            .update16(output.addr, mask_set, mask_clear)
            .map_err(Error::Bus)?;
        self.sbus
            .update16(direction.addr, direction.mask(), 0)
            .map_err(Error::Bus)
    }

    fn get_pin(&mut self, pin: u8) -> Result<bool, Error<Self::Error>> {
        let input = Self::locate(pin)?.input();
        let level = self
            .sbus
            .read_bit(input.addr, input.bit)
            .map_err(Error::Bus)?;
        #[cfg(feature = "defmt")]
        defmt::trace!("dio: pin {=u8} reads {=bool}", pin, level);
        Ok(level)
    }

    fn is_set_high(&mut self, pin: u8) -> Result<bool, Error<Self::Error>> {
        let output = Self::locate(pin)?.output();
        let latched = self
            .sbus
            .read_bit(output.addr, output.bit)
            .map_err(Error::Bus)?;
        #[cfg(feature = "defmt")]
        defmt::trace!("dio: pin {=u8} latched {=bool}", pin, latched);
        Ok(latched)
    }

    fn direction(&mut self, pin: u8) -> Result<Direction, Error<Self::Error>> {
        let direction = Self::locate(pin)?.direction();
        let is_output = self
            .sbus
            .read_bit(direction.addr, direction.bit)
            .map_err(Error::Bus)?;
        let direction = if is_output {
            Direction::Output
        } else {
            Direction::Input
        };
        #[cfg(feature = "defmt")]
        defmt::trace!("dio: pin {=u8} is {}", pin, direction);
        Ok(direction)
    }
}
