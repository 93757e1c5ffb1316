//! Core State trait for finite state sets.
//!
//! Every domain machine declares its states as a plain enum implementing
//! this trait. A state set is closed: `all()` lists every member and exactly
//! one of them is the initial state.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for members of a machine's finite state set.
///
/// All methods are pure. States are small `Copy` values so that history
/// entries and transition tables can hold them by value.
///
/// # Required Traits
///
/// - `Copy` + `Eq` + `Hash`: states key the transition table
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: histories and snapshots are persisted
///
/// # Example
///
/// ```rust
/// use chargestate::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Link {
///     Unknown,
///     Up,
///     Down,
/// }
///
/// impl State for Link {
///     fn name(&self) -> &'static str {
///         match self {
///             Self::Unknown => "unknown",
///             Self::Up => "up",
///             Self::Down => "down",
///         }
///     }
///
///     fn all() -> &'static [Self] {
///         &[Self::Unknown, Self::Up, Self::Down]
///     }
///
///     fn initial() -> Self {
///         Self::Unknown
///     }
/// }
///
/// assert_eq!(Link::initial().name(), "unknown");
/// assert!(Link::Unknown.is_initial());
/// ```
pub trait State:
    Copy + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Get the state's name as it appears in produced tables.
    fn name(&self) -> &'static str;

    /// Every member of the state set, in declaration order.
    fn all() -> &'static [Self];

    /// The single initial state of the set.
    fn initial() -> Self;

    /// Check if this is the initial state.
    fn is_initial(&self) -> bool {
        *self == Self::initial()
    }

    /// Look a state up by its name.
    fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.name() == name)
    }
}

/// Marker trait for the event alphabet a machine reacts to.
///
/// Implemented for every type with the right bounds, so any `Copy` enum can
/// serve as an alphabet.
pub trait Event: Copy + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> Event for T where T: Copy + Eq + Hash + Debug + Send + Sync + 'static {}
