//! Error taxonomy
//!
//! Every module owns its own error enum. Each of them maps onto one of these
//! kinds so callers presenting errors to people can branch on the category
//! without matching every variant.

use std::fmt;

/// Broad category of a booking error.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Out-of-range input: negative amounts, seats outside capacity,
    /// discount percentages outside `0..=100`, unknown methods or statuses.
    Validation,

    /// Seat reduction beyond availability, or restocking beyond capacity.
    Capacity,

    /// A value was used where a capability it does not provide was required.
    Contract,

    /// The operation is not valid for the current lifecycle state.
    State,

    /// The persistence or export collaborator failed.
    Storage,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Capacity => "capacity",
            ErrorKind::Contract => "contract",
            ErrorKind::State => "state",
            ErrorKind::Storage => "storage",
        };

        f.write_str(name)
    }
}
