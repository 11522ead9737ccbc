#[cfg(not(feature = "debug_log"))]
macro_rules! debug_log {
    () => {};
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug_log")]
#[macro_use]
pub mod internal {
    use std::cell::Cell;

    thread_local! {
        pub static DEPTH: Cell<usize> = Cell::new(0);
    }

    pub struct Indenter;

    impl Indenter {
        pub fn indent() -> Indenter {
            DEPTH.with(|depth| depth.set(depth.get() + 1));
            Self
        }
    }

    impl Drop for Indenter {
        fn drop(&mut self) {
            DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
        }
    }

    pub fn blanks() -> String {
        "| ".repeat(DEPTH.with(Cell::get))
    }

    // Records stay indented for as long as the calling scope is alive, so
    // recursive tree building reads as a nested dump.
    macro_rules! debug_log {
        () => {
            log::trace!(target: "certlens_asn1", "|");
        };
        ($($arg:tt)*) => {
            log::trace!(
                target: "certlens_asn1",
                "{}{}",
                $crate::debug_log::internal::blanks(),
                format_args!($($arg)*)
            );
            let _indenter = $crate::debug_log::internal::Indenter::indent();
        };
    }
}
