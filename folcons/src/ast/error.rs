use thiserror::Error;

/// The error returned when an accessor that is only defined for some variants of [`Term`] or
/// [`Formula`] is used on a variant that lacks the requested field.
///
/// This always indicates a defect in the caller, which should have matched on the variant first.
/// The panicking accessors (like [`Formula::variable`]) report it by panicking with this message.
///
/// [`Term`]: super::Term
/// [`Formula`]: super::Formula
/// [`Formula::variable`]: super::Formula::variable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("accessor `{accessor}` is not supported on {variant} '{expression}'")]
pub struct AccessError {
    /// The name of the accessor that was called.
    pub accessor: &'static str,

    /// The name of the variant it was called on.
    pub variant: &'static str,

    /// The printed expression it was called on.
    pub expression: String,
}

impl AccessError {
    pub(super) fn new(accessor: &'static str, variant: &'static str, expression: String) -> Self {
        Self { accessor, variant, expression }
    }

    /// Panics with this error as the message.
    pub(super) fn raise(self) -> ! {
        panic!("{}", self)
    }
}
