//! Pluggable warning side channel.
//!
//! The library never panics or logs through a framework dependency: callers who want warnings
//! routed somewhere specific (a log crate, a UI toast, a test `Vec<String>` sink) install a
//! closure; callers who don't care get a default `eprintln!`. The `quiet` feature elides the
//! whole channel at compile time.

/// A boxed callback invoked with a human-readable warning message.
///
/// Installed on [`crate::keys::Keys`] and [`crate::builder::BuildConfig`]; both forward to
/// [`emit`] internally.
pub type WarnSink = Box<dyn Fn(&str)>;

/// Emit a warning through `sink`, or to stderr if no sink was installed.
///
/// A no-op entirely under the `quiet` feature, including the caller's message formatting (the
/// caller should build `msg` lazily if formatting it is itself non-trivial).
#[inline]
pub fn emit(sink: Option<&WarnSink>, msg: &str) {
    #[cfg(not(feature = "quiet"))]
    {
        match sink {
            Some(f) => f(msg),
            None => eprintln!("chm_mphf: {msg}"),
        }
    }
    #[cfg(feature = "quiet")]
    {
        let _ = (sink, msg);
    }
}
