use std::fmt;
use std::ops::Deref;

use gpui::{ElementId, SharedString};

/// Identity of one component instance. All per-instance state is keyed by it.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ComponentId {
    value: SharedString,
}

impl ComponentId {
    #[track_caller]
    pub fn auto(prefix: &str) -> Self {
        Self {
            value: stable_auto_id(prefix).into(),
        }
    }

    pub fn as_str(&self) -> &str {
        self.value.as_ref()
    }

    pub fn slot(&self, name: &str) -> SharedString {
        format!("{}::{name}", self.value).into()
    }
}

impl Default for ComponentId {
    #[track_caller]
    fn default() -> Self {
        Self::auto("floatlabel")
    }
}

impl Deref for ComponentId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ComponentId {
    fn from(value: &str) -> Self {
        Self {
            value: SharedString::from(value.to_string()),
        }
    }
}

impl From<String> for ComponentId {
    fn from(value: String) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl From<SharedString> for ComponentId {
    fn from(value: SharedString) -> Self {
        Self { value }
    }
}

impl From<ComponentId> for ElementId {
    fn from(value: ComponentId) -> Self {
        ElementId::Name(value.value)
    }
}

impl From<&ComponentId> for ElementId {
    fn from(value: &ComponentId) -> Self {
        ElementId::Name(value.value.clone())
    }
}

#[track_caller]
pub fn stable_auto_id(prefix: &str) -> String {
    let location = std::panic::Location::caller();
    let seed = format!(
        "{prefix}:{}:{}:{}",
        location.file(),
        location.line(),
        location.column()
    );
    format!("{prefix}-{:016x}", fnv1a64(seed.as_bytes()))
}

fn fnv1a64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x00000100000001b3;

    let mut hash = OFFSET_BASIS;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn field_id() -> ComponentId {
        ComponentId::auto("field")
    }

    #[test]
    fn auto_id_is_stable_for_same_callsite() {
        let ids = (0..3).map(|_| field_id()).collect::<Vec<_>>();
        assert!(ids.windows(2).all(|pair| pair[0] == pair[1]));
        assert!(ids[0].starts_with("field-"));
    }

    #[test]
    fn auto_id_differs_between_callsites() {
        let first = field_id();
        let second = ComponentId::auto("field");
        assert_ne!(first, second);
    }

    #[test]
    fn slots_are_namespaced_under_the_instance() {
        let id = ComponentId::from("email");
        assert_eq!(id.slot("label").as_ref(), "email::label");
        assert_eq!(id.to_string(), "email");
    }
}
