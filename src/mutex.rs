/// Common interface for the SBUS lock.
///
/// Every register update done by `sbus-dio` is a read-modify-write, so the whole sequence must run
/// while no one else touches the bus.  The lock is coarse: one mutex guards the entire DIO
/// register space, and it is held for the duration of the closure passed to [`lock()`].  Release
/// happens on every exit path, including early returns on error.
///
/// | Mutex | Feature Name | Notes |
/// | --- | --- | --- |
/// | [`core::cell::RefCell`] | _always available_ | For sharing within a single execution context. |
/// | [`critical_section::Mutex<RefCell<T>>`][mutex-cs] | `critical-section` | For sharing with interrupt handlers. |
/// | [`std::sync::Mutex`][mutex-std] | `std` | For platforms where `std` is available. |
///
/// [mutex-cs]: https://docs.rs/critical-section/latest/critical_section/struct.Mutex.html
/// [mutex-std]: https://doc.rust-lang.org/std/sync/struct.Mutex.html
/// [`lock()`]: BusMutex::lock
///
/// Boards where other processes also use the SBUS provide their own global lock (for example
/// `sbuslock()`/`sbusunlock()`).  That lock has to be wrapped in a custom implementation so it is
/// taken around each operation:
///
/// ```
/// # fn sbuslock() {}
/// # fn sbusunlock() {}
/// struct SystemLock<T>(core::cell::RefCell<T>);
///
/// impl<T> sbus_dio::BusMutex for SystemLock<T> {
///     type Bus = T;
///
///     fn create(v: T) -> Self {
///         Self(core::cell::RefCell::new(v))
///     }
///
///     fn lock<R, F: FnOnce(&mut Self::Bus) -> R>(&self, f: F) -> R {
///         struct Unlock;
///         impl Drop for Unlock {
///             fn drop(&mut self) {
///                 sbusunlock();
///             }
///         }
///
///         sbuslock();
///         let _unlock = Unlock;
///         f(&mut self.0.borrow_mut())
///     }
/// }
/// ```
pub trait BusMutex {
    /// The DIO driver that is wrapped inside this mutex.
    type Bus;

    /// Create a new mutex of this type.
    fn create(v: Self::Bus) -> Self;

    /// Lock the mutex and give a closure access to the driver inside.
    fn lock<R, F: FnOnce(&mut Self::Bus) -> R>(&self, f: F) -> R;
}

impl<T> BusMutex for core::cell::RefCell<T> {
    type Bus = T;

    fn create(v: Self::Bus) -> Self {
        core::cell::RefCell::new(v)
    }

    fn lock<R, F: FnOnce(&mut Self::Bus) -> R>(&self, f: F) -> R {
        let mut v = self.borrow_mut();
        f(&mut v)
    }
}

#[cfg(feature = "critical-section")]
impl<T> BusMutex for critical_section::Mutex<core::cell::RefCell<T>> {
    type Bus = T;

    fn create(v: Self::Bus) -> Self {
        critical_section::Mutex::new(core::cell::RefCell::new(v))
    }

    fn lock<R, F: FnOnce(&mut Self::Bus) -> R>(&self, f: F) -> R {
        critical_section::with(|cs| {
            let mut v = self.borrow_ref_mut(cs);
            f(&mut v)
        })
    }
}

#[cfg(any(test, feature = "std"))]
impl<T> BusMutex for std::sync::Mutex<T> {
    type Bus = T;

    fn create(v: Self::Bus) -> Self {
        std::sync::Mutex::new(v)
    }

    fn lock<R, F: FnOnce(&mut Self::Bus) -> R>(&self, f: F) -> R {
        // A panic in another holder leaves the registers in whatever state the hardware has.
        let mut v = self.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut v)
    }
}
