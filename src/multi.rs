/// Set multiple pins while holding the bus lock once.
///
/// The usual method of setting multiple pins
///
/// ```no_run
/// # let mut bank = sbus_dio::RegisterBank::new();
/// # let dio = sbus_dio::Dio::new(&mut bank);
/// # let mut relay1 = dio.pin(sbus_dio::board::RELAY_1).unwrap().into_output().unwrap();
/// # let mut relay2 = dio.pin(sbus_dio::board::RELAY_2).unwrap().into_output().unwrap();
/// relay1.set_high().unwrap();
/// relay2.set_low().unwrap();
/// ```
///
/// takes and releases the lock for each pin, so another user of the SBUS can get in between the
/// two updates.  `write_multiple()` applies all states in a single lock acquisition, in the order
/// given.
///
/// ## Example
/// ```
/// # let mut bank = sbus_dio::RegisterBank::new();
/// # let dio = sbus_dio::Dio::new(&mut bank);
/// # let mut relay1 = dio.pin(sbus_dio::board::RELAY_1).unwrap().into_output().unwrap();
/// # let mut relay2 = dio.pin(sbus_dio::board::RELAY_2).unwrap().into_output().unwrap();
/// sbus_dio::write_multiple(
///     [&mut relay1, &mut relay2],
///     [true, false],
/// ).unwrap();
/// ```
pub fn write_multiple<PD, MUTEX, MODE: crate::mode::HasOutput, const N: usize>(
    pins: [&mut crate::Pin<'_, MODE, MUTEX>; N],
    states: [bool; N],
) -> Result<(), crate::Error<PD::Error>>
where
    PD: crate::DioDriver,
    MUTEX: crate::BusMutex<Bus = PD>,
{
    let Some(first) = pins.first() else {
        return Ok(());
    };
    let driver = first.driver();
    for pin in pins.iter() {
        assert!(core::ptr::eq(pin.driver(), driver));
    }

    driver.lock(|drv| {
        for (pin, state) in pins.iter().zip(states.iter()) {
            drv.set_pin(pin.pin_number(), crate::PinState::from(*state))?;
        }
        Ok(())
    })
}

/// Read multiple pins while holding the bus lock once.
///
/// Pins sharing an input register are still read with one bus access each; the lock only
/// guarantees no other SBUS user runs in between.
///
/// ## Example
/// ```
/// # let mut bank = sbus_dio::RegisterBank::new();
/// # let dio = sbus_dio::Dio::new(&mut bank);
/// # let in0 = dio.pin(5).unwrap();
/// # let in1 = dio.pin(6).unwrap();
/// let values = sbus_dio::read_multiple([&in0, &in1]).unwrap();
/// if values[0] {
///     // ...
/// } else if values[1] {
///     // ...
/// }
/// ```
pub fn read_multiple<PD, MUTEX, MODE: crate::mode::HasInput, const N: usize>(
    pins: [&crate::Pin<'_, MODE, MUTEX>; N],
) -> Result<[bool; N], crate::Error<PD::Error>>
where
    PD: crate::DioDriver,
    MUTEX: crate::BusMutex<Bus = PD>,
{
    let mut ret = [false; N];
    let Some(first) = pins.first() else {
        return Ok(ret);
    };
    let driver = first.driver();
    for pin in pins.iter() {
        assert!(core::ptr::eq(pin.driver(), driver));
    }

    driver.lock(|drv| {
        for (pin, state) in pins.iter().zip(ret.iter_mut()) {
            *state = drv.get_pin(pin.pin_number())?;
        }
        Ok(ret)
    })
}
