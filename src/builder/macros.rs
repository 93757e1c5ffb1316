//! Macros for ergonomic state set declaration.

/// Declare a state enum and generate its `State` implementation.
///
/// Each variant carries the name it is reported under; exactly one variant
/// is named as the initial state.
///
/// # Example
///
/// ```
/// use chargestate::core::State;
/// use chargestate::state_enum;
///
/// state_enum! {
///     pub enum DoorStatus {
///         Unknown => "unknown",
///         Open => "open",
///         Closed => "closed",
///     }
///     initial: Unknown
/// }
///
/// assert_eq!(DoorStatus::Open.name(), "open");
/// assert_eq!(DoorStatus::initial(), DoorStatus::Unknown);
/// assert_eq!(DoorStatus::all().len(), 3);
/// assert_eq!(DoorStatus::Closed.to_string(), "closed");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $label:literal
            ),* $(,)?
        }

        initial: $initial:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $label)]
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),*
                }
            }

            fn all() -> &'static [Self] {
                &[$(Self::$variant),*]
            }

            fn initial() -> Self {
                Self::$initial
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::State::name(self))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::State;

    state_enum! {
        enum TestState {
            Idle => "idle",
            Busy => "busy",
            Down => "down",
        }
        initial: Idle
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Idle.name(), "idle");
        assert_eq!(TestState::Busy.name(), "busy");
        assert_eq!(TestState::initial(), TestState::Idle);
        assert!(TestState::Idle.is_initial());
        assert!(!TestState::Down.is_initial());
    }

    #[test]
    fn state_enum_lists_variants_in_order() {
        assert_eq!(
            TestState::all(),
            &[TestState::Idle, TestState::Busy, TestState::Down]
        );
    }

    #[test]
    fn state_enum_serializes_by_label() {
        let json = serde_json::to_string(&TestState::Busy).unwrap();
        assert_eq!(json, "\"busy\"");
        assert_eq!(serde_json::from_str::<TestState>(&json).unwrap(), TestState::Busy);
    }

    #[test]
    fn state_enum_supports_visibility() {
        state_enum! {
            pub enum PublicState {
                A => "a",
                B => "b",
            }
            initial: B
        }

        assert_eq!(PublicState::initial().to_string(), "b");
    }
}
