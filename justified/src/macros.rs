#[cfg(feature = "tracing")]
macro_rules! jtrace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "justified", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! jtrace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! jdebug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "justified", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! jdebug {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! jwarn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "justified", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! jwarn {
    ($($tt:tt)*) => {};
}
