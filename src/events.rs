use std::rc::Rc;

use gpui::{SharedString, Window};

use crate::id::ComponentId;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FocusChange {
    Focus,
    Blur,
}

/// Raw focus or blur notification from the text field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FocusEvent {
    pub target: ComponentId,
    pub change: FocusChange,
    pub text: SharedString,
}

/// Emitted when editing ends (the field lost focus); carries the final text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EndEditingEvent {
    pub target: ComponentId,
    pub text: SharedString,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubmitEditingEvent {
    pub target: ComponentId,
    pub text: SharedString,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyPressEvent {
    pub target: ComponentId,
    pub key: SharedString,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChangeEvent {
    pub target: ComponentId,
    pub previous: SharedString,
    pub text: SharedString,
}

pub type FocusHandler = Rc<dyn Fn(&FocusEvent, &mut Window, &mut gpui::App)>;
pub type ChangeTextHandler = Rc<dyn Fn(SharedString, &mut Window, &mut gpui::App)>;
pub type EndEditingHandler = Rc<dyn Fn(&EndEditingEvent, &mut Window, &mut gpui::App)>;
pub type SubmitEditingHandler = Rc<dyn Fn(&SubmitEditingEvent, &mut Window, &mut gpui::App)>;
pub type KeyPressHandler = Rc<dyn Fn(&KeyPressEvent, &mut Window, &mut gpui::App)>;
pub type ChangeHandler = Rc<dyn Fn(&ChangeEvent, &mut Window, &mut gpui::App)>;

/// Host callbacks. Every slot is optional and each emit is a no-op when empty.
#[derive(Clone, Default)]
pub struct TextFieldCallbacks {
    pub on_focus: Option<FocusHandler>,
    pub on_blur: Option<FocusHandler>,
    pub on_change_text: Option<ChangeTextHandler>,
    pub on_end_editing: Option<EndEditingHandler>,
    pub on_submit_editing: Option<SubmitEditingHandler>,
    pub on_key_press: Option<KeyPressHandler>,
    pub on_change: Option<ChangeHandler>,
}

impl TextFieldCallbacks {
    pub fn emit_focus(&self, event: &FocusEvent, window: &mut Window, cx: &mut gpui::App) {
        let handler = match event.change {
            FocusChange::Focus => self.on_focus.as_ref(),
            FocusChange::Blur => self.on_blur.as_ref(),
        };
        if let Some(handler) = handler {
            (handler)(event, window, cx);
        }
    }

    pub fn emit_change(&self, event: &ChangeEvent, window: &mut Window, cx: &mut gpui::App) {
        if let Some(handler) = self.on_change_text.as_ref() {
            (handler)(event.text.clone(), window, cx);
        }
        if let Some(handler) = self.on_change.as_ref() {
            (handler)(event, window, cx);
        }
    }

    pub fn emit_end_editing(
        &self,
        event: &EndEditingEvent,
        window: &mut Window,
        cx: &mut gpui::App,
    ) {
        if let Some(handler) = self.on_end_editing.as_ref() {
            (handler)(event, window, cx);
        }
    }

    pub fn emit_submit_editing(
        &self,
        event: &SubmitEditingEvent,
        window: &mut Window,
        cx: &mut gpui::App,
    ) {
        if let Some(handler) = self.on_submit_editing.as_ref() {
            (handler)(event, window, cx);
        }
    }

    pub fn emit_key_press(&self, event: &KeyPressEvent, window: &mut Window, cx: &mut gpui::App) {
        if let Some(handler) = self.on_key_press.as_ref() {
            (handler)(event, window, cx);
        }
    }
}
