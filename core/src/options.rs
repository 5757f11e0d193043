//! Configuration options for constant hoisting.

use crate::String;

/// Controls how generated names are spelled.
///
/// Generated names are `prefix` followed by a decimal counter that starts at
/// `first_index`.
///
/// # Example
///
/// ```
/// use hoist_core::HoistOptions;
///
/// let options = HoistOptions {
///     prefix: "_const".into(),
///     first_index: 1,
/// };
/// assert_eq!(HoistOptions::default().prefix, "_c");
/// # let _ = options;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoistOptions {
    /// Leading text of every generated name.
    ///
    /// Default: `"_c"`
    pub prefix: String,

    /// Counter value used for the first generated name.
    ///
    /// Default: 0
    pub first_index: u32,
}

impl Default for HoistOptions {
    fn default() -> Self {
        Self {
            prefix: String::from("_c"),
            first_index: 0,
        }
    }
}
