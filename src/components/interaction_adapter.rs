use std::rc::Rc;

use gpui::{InteractiveElement, MouseButton, StatefulInteractiveElement, Window};

use crate::id::ComponentId;

pub type ActivateHandler = Rc<dyn Fn(&mut Window, &mut gpui::App)>;

/// Press wiring shared by small pressable parts: a left pointer press runs
/// `on_activate`.
#[derive(Clone, Default)]
pub struct PressAdapter {
    pub id: ComponentId,
    pub on_activate: Option<ActivateHandler>,
}

impl PressAdapter {
    pub fn new(id: impl Into<ComponentId>) -> Self {
        Self {
            id: id.into(),
            on_activate: None,
        }
    }

    pub fn on_activate(mut self, value: Option<ActivateHandler>) -> Self {
        self.on_activate = value;
        self
    }
}

pub fn bind_press_adapter<T>(mut node: T, adapter: PressAdapter) -> T
where
    T: InteractiveElement + StatefulInteractiveElement,
{
    let Some(handler) = adapter.on_activate else {
        return node;
    };

    // Mouse down rather than click so the press lands before the text field
    // would lose focus to it.
    let id = adapter.id;
    node = node.on_mouse_down(MouseButton::Left, move |_, window, cx| {
        log::trace!("{id}: pressed");
        cx.stop_propagation();
        (handler)(window, cx);
        window.refresh();
    });

    node
}
