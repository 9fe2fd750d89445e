//===========================================================================//

macro_rules! invalid_format {
    ($e:expr) => {
        return Err($crate::error::Error::InvalidFormat(($e).to_string()))
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err($crate::error::Error::InvalidFormat(format!($fmt, $($arg)+)))
    };
}

//===========================================================================//
