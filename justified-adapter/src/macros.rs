#[cfg(feature = "tracing")]
macro_rules! jtrace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "justified_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! jtrace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! jdebug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "justified_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! jdebug {
    ($($tt:tt)*) => {};
}
