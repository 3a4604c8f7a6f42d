use std::{
    any::Any,
    collections::HashMap,
    sync::{LazyLock, Mutex},
};

type Slot = Box<dyn Any + Send>;

static INSTANCE_STATE: LazyLock<Mutex<HashMap<String, Slot>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

fn key(id: &str, slot: &str) -> String {
    format!("{id}::{slot}")
}

/// Runs `update` against the state stored for `(id, slot)`, creating it with `init`
/// first if absent. A slot holding another type is replaced. The store is locked
/// while `update` runs, so `update` must not call back into this module.
pub fn with_state<T, R>(
    id: &str,
    slot: &str,
    init: impl Fn() -> T,
    update: impl FnOnce(&mut T) -> R,
) -> R
where
    T: Any + Send,
{
    let Ok(mut states) = INSTANCE_STATE.lock() else {
        let mut detached = init();
        return update(&mut detached);
    };
    let composed = key(id, slot);
    let reusable = states.get(&composed).is_some_and(|entry| entry.is::<T>());
    if !reusable {
        states.insert(composed.clone(), Box::new(init()));
    }
    let state = states
        .get_mut(&composed)
        .and_then(|entry| entry.downcast_mut::<T>());
    match state {
        Some(state) => update(state),
        None => update(&mut init()),
    }
}

pub fn read_state<T>(id: &str, slot: &str) -> Option<T>
where
    T: Any + Send + Clone,
{
    let states = INSTANCE_STATE.lock().ok()?;
    states.get(&key(id, slot))?.downcast_ref::<T>().cloned()
}

pub fn set_state<T>(id: &str, slot: &str, value: T)
where
    T: Any + Send,
{
    if let Ok(mut states) = INSTANCE_STATE.lock() {
        states.insert(key(id, slot), Box::new(value));
    }
}

pub fn flag(id: &str, slot: &str) -> bool {
    read_state::<bool>(id, slot).unwrap_or(false)
}

pub fn set_flag(id: &str, slot: &str, value: bool) {
    set_state(id, slot, value);
}

/// Drops every slot owned by `id`, including slots of nested parts keyed `id::part`.
pub fn release(id: &str) -> usize {
    let prefix = format!("{id}::");
    let Ok(mut states) = INSTANCE_STATE.lock() else {
        return 0;
    };
    let before = states.len();
    states.retain(|slot_key, _| !slot_key.starts_with(&prefix));
    before - states.len()
}

#[cfg(test)]
pub fn clear_all() {
    if let Ok(mut states) = INSTANCE_STATE.lock() {
        states.clear();
    }
}
