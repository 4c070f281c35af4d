//! Treatment of form keys that arrive with more than one value.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Policy applied when a request repeats a parameter key.
///
/// Form decoding yields every value supplied for a key. Commands bind a single
/// value per parameter, so repeated keys are either refused outright or joined
/// together with no separator, which is how earlier deployments behaved.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MultiValuePolicy {
    /// Fail binding when a declared parameter carries several values.
    #[default]
    Reject,
    /// Concatenate all values in arrival order without a separator.
    Concatenate,
}

/// Errors encountered while parsing a [`MultiValuePolicy`] from text.
pub type MultiValuePolicyParseError = strum::ParseError;
