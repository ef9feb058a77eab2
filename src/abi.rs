//! Calling convention of host instance methods.
//!
//! On 32-bit x86 Windows the host compiler uses `thiscall`: `self` in `ecx`,
//! everything else on the stack. Every other target passes `self` as the
//! first argument of an ordinary C call. The two macros here pick the right
//! ABI string so nothing else in the crate has to.

/// Expands to the function pointer type of a host instance method.
///
/// The first argument is always the object pointer.
///
/// ```
/// use std::ffi::c_void;
///
/// type AlphaModulate = hostbind::host_fn!((*mut c_void, f32));
/// type IsTranslucent = hostbind::host_fn!((*mut c_void) -> bool);
///
/// assert_eq!(std::mem::size_of::<AlphaModulate>(), std::mem::size_of::<*const ()>());
/// assert_eq!(std::mem::size_of::<IsTranslucent>(), std::mem::size_of::<*const ()>());
/// ```
#[cfg(all(target_arch = "x86", windows))]
#[macro_export]
macro_rules! host_fn {
    (($($arg:ty),* $(,)?) $(-> $ret:ty)?) => {
        unsafe extern "thiscall" fn($($arg),*) $(-> $ret)?
    };
}

/// Expands to the function pointer type of a host instance method.
///
/// The first argument is always the object pointer.
///
/// ```
/// use std::ffi::c_void;
///
/// type AlphaModulate = hostbind::host_fn!((*mut c_void, f32));
/// type IsTranslucent = hostbind::host_fn!((*mut c_void) -> bool);
///
/// assert_eq!(std::mem::size_of::<AlphaModulate>(), std::mem::size_of::<*const ()>());
/// assert_eq!(std::mem::size_of::<IsTranslucent>(), std::mem::size_of::<*const ()>());
/// ```
#[cfg(not(all(target_arch = "x86", windows)))]
#[macro_export]
macro_rules! host_fn {
    (($($arg:ty),* $(,)?) $(-> $ret:ty)?) => {
        unsafe extern "C" fn($($arg),*) $(-> $ret)?
    };
}

/// Defines a function callable through a [`host_fn!`] pointer.
///
/// Used to stand in for host code: mock objects in tests and benches fill
/// their vtables with these.
#[cfg(all(target_arch = "x86", windows))]
#[macro_export]
macro_rules! host_method {
    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident($($arg:ident: $ty:ty),* $(,)?) $(-> $ret:ty)? $body:block
    ) => {
        $(#[$meta])*
        $vis extern "thiscall" fn $name($($arg: $ty),*) $(-> $ret)? $body
    };
}

/// Defines a function callable through a [`host_fn!`] pointer.
///
/// Used to stand in for host code: mock objects in tests and benches fill
/// their vtables with these.
#[cfg(not(all(target_arch = "x86", windows)))]
#[macro_export]
macro_rules! host_method {
    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident($($arg:ident: $ty:ty),* $(,)?) $(-> $ret:ty)? $body:block
    ) => {
        $(#[$meta])*
        $vis extern "C" fn $name($($arg: $ty),*) $(-> $ret)? $body
    };
}

#[cfg(test)]
mod tests {
    use std::ffi::c_void;

    crate::host_method! {
        fn add(_this: *mut c_void, a: i32, b: i32) -> i32 {
            a + b
        }
    }

    crate::host_method! {
        fn ignore(_this: *mut c_void) {}
    }

    #[test]
    fn host_method_coerces_to_host_fn() {
        let add_fn: crate::host_fn!((*mut c_void, i32, i32) -> i32) = add;
        let ignore_fn: crate::host_fn!((*mut c_void)) = ignore;

        // SAFETY: both point at functions defined above with the same ABI.
        unsafe {
            assert_eq!(add_fn(std::ptr::null_mut(), 2, 3), 5);
            ignore_fn(std::ptr::null_mut());
        }
    }
}
