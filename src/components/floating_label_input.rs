use std::{rc::Rc, time::Instant};

use gpui::{
    App, FocusHandle, ImageSource, InteractiveElement, IntoElement, MouseButton, ParentElement,
    Refineable, RenderOnce, SharedString, StyleRefinement, Styled, Window, div, px,
};

use crate::events::{
    ChangeEvent, EndEditingEvent, FocusEvent, FocusHandler, KeyPressEvent, SubmitEditingEvent,
    TextFieldCallbacks,
};
use crate::id::ComponentId;
use crate::options::{
    AutoCapitalize, ClearButtonMode, KeyboardType, ReturnKeyType, TextInputOptions,
};
use crate::style::FieldStyles;

use super::control;
use super::label_state::{self, LabelStateInput};
use super::text_field::{InputRefHandler, TextField, TextFieldHandle};
use super::visibility_toggle::VisibilityToggle;

const FOCUS_HANDLE_SLOT: &str = "focus-handle";

/// Text input whose label rests inside the empty field and floats above it once the
/// field is focused or holds text. Secret fields get a show/hide toggle.
#[derive(IntoElement)]
pub struct FloatingLabelInput {
    id: ComponentId,
    label: SharedString,
    options: TextInputOptions,
    callbacks: TextFieldCallbacks,
    input_ref: Option<InputRefHandler>,
    obscured_image: Option<ImageSource>,
    revealed_image: Option<ImageSource>,
    style: StyleRefinement,
    input_style: StyleRefinement,
    label_style: StyleRefinement,
}

impl FloatingLabelInput {
    #[track_caller]
    pub fn new(label: impl Into<SharedString>) -> Self {
        Self {
            id: ComponentId::auto("floating-label-input"),
            label: label.into(),
            options: TextInputOptions::default(),
            callbacks: TextFieldCallbacks::default(),
            input_ref: None,
            obscured_image: None,
            revealed_image: None,
            style: StyleRefinement::default(),
            input_style: StyleRefinement::default(),
            label_style: StyleRefinement::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn label(mut self, label: impl Into<SharedString>) -> Self {
        self.label = label.into();
        self
    }

    /// Replaces every option at once, e.g. with a set loaded through serde.
    pub fn options(mut self, options: TextInputOptions) -> Self {
        self.options = options;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.options.value = Some(value.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.options.placeholder = Some(placeholder.into());
        self
    }

    pub fn secure_text_entry(mut self, value: bool) -> Self {
        self.options.secure_text_entry = Some(value);
        self
    }

    pub fn password(mut self, value: bool) -> Self {
        self.options.password = value;
        self
    }

    pub fn editable(mut self, value: bool) -> Self {
        self.options.editable = value;
        self
    }

    pub fn disabled(self, value: bool) -> Self {
        self.editable(!value)
    }

    pub fn multiline(mut self, value: bool) -> Self {
        self.options.multiline = value;
        self
    }

    pub fn number_of_lines(mut self, value: u16) -> Self {
        self.options.number_of_lines = Some(value);
        self
    }

    pub fn auto_focus(mut self, value: bool) -> Self {
        self.options.auto_focus = value;
        self
    }

    pub fn auto_capitalize(mut self, value: AutoCapitalize) -> Self {
        self.options.auto_capitalize = value;
        self
    }

    pub fn auto_correct(mut self, value: bool) -> Self {
        self.options.auto_correct = value;
        self
    }

    pub fn keyboard_type(mut self, value: KeyboardType) -> Self {
        self.options.keyboard_type = value;
        self
    }

    pub fn return_key_type(mut self, value: ReturnKeyType) -> Self {
        self.options.return_key_type = value;
        self
    }

    pub fn spell_check(mut self, value: bool) -> Self {
        self.options.spell_check = Some(value);
        self
    }

    pub fn clear_button_mode(mut self, value: ClearButtonMode) -> Self {
        self.options.clear_button_mode = value;
        self
    }

    pub fn clear_text_on_focus(mut self, value: bool) -> Self {
        self.options.clear_text_on_focus = value;
        self
    }

    pub fn select_text_on_focus(mut self, value: bool) -> Self {
        self.options.select_text_on_focus = value;
        self
    }

    pub fn enables_return_key_automatically(mut self, value: bool) -> Self {
        self.options.enables_return_key_automatically = value;
        self
    }

    pub fn caret_hidden(mut self, value: bool) -> Self {
        self.options.caret_hidden = value;
        self
    }

    /// Layered over the base input style.
    pub fn input_style(mut self, style: StyleRefinement) -> Self {
        self.input_style.refine(&style);
        self
    }

    /// Layered over the base label style. Font size and vertical offset stay animated.
    pub fn label_style(mut self, style: StyleRefinement) -> Self {
        self.label_style.refine(&style);
        self
    }

    /// Toggle image while the secret is masked.
    pub fn obscured_image(mut self, source: impl Into<ImageSource>) -> Self {
        self.obscured_image = Some(source.into());
        self
    }

    /// Toggle image while the secret is shown.
    pub fn revealed_image(mut self, source: impl Into<ImageSource>) -> Self {
        self.revealed_image = Some(source.into());
        self
    }

    pub fn on_focus(
        mut self,
        handler: impl Fn(&FocusEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.callbacks.on_focus = Some(Rc::new(handler));
        self
    }

    pub fn on_blur(
        mut self,
        handler: impl Fn(&FocusEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.callbacks.on_blur = Some(Rc::new(handler));
        self
    }

    pub fn on_change_text(
        mut self,
        handler: impl Fn(SharedString, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.callbacks.on_change_text = Some(Rc::new(handler));
        self
    }

    pub fn on_end_editing(
        mut self,
        handler: impl Fn(&EndEditingEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.callbacks.on_end_editing = Some(Rc::new(handler));
        self
    }

    pub fn on_submit_editing(
        mut self,
        handler: impl Fn(&SubmitEditingEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.callbacks.on_submit_editing = Some(Rc::new(handler));
        self
    }

    pub fn on_key_press(
        mut self,
        handler: impl Fn(&KeyPressEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.callbacks.on_key_press = Some(Rc::new(handler));
        self
    }

    pub fn on_change(
        mut self,
        handler: impl Fn(&ChangeEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.callbacks.on_change = Some(Rc::new(handler));
        self
    }

    /// Receives a handle to the underlying field once, after its first render.
    pub fn input_ref(
        mut self,
        handler: impl Fn(TextFieldHandle, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.input_ref = Some(Rc::new(handler));
        self
    }

    /// Forgets everything kept for the instance `id`, stopping a running label
    /// transition. Call when the input leaves the tree for good.
    pub fn release(id: &ComponentId) {
        label_state::release(id, Instant::now());
    }

    pub fn is_dirty(id: &ComponentId) -> bool {
        label_state::is_dirty(id)
    }

    fn field_id(&self) -> ComponentId {
        ComponentId::from(self.id.slot("field"))
    }

    /// Routes field events through the tracker before the host sees them.
    fn field_callbacks(&self) -> TextFieldCallbacks {
        let user = self.callbacks.clone();
        let mut callbacks = TextFieldCallbacks {
            on_end_editing: user.on_end_editing.clone(),
            on_submit_editing: user.on_submit_editing.clone(),
            on_key_press: user.on_key_press.clone(),
            on_change: user.on_change.clone(),
            ..TextFieldCallbacks::default()
        };

        callbacks.on_focus = Some(forward_focus(
            self.id.clone(),
            user.on_focus.clone(),
            label_state::focus,
        ));
        callbacks.on_blur = Some(forward_focus(
            self.id.clone(),
            user.on_blur.clone(),
            label_state::blur,
        ));

        let id = self.id.clone();
        let on_change_text = user.on_change_text;
        callbacks.on_change_text = Some(Rc::new(
            move |text: SharedString, window: &mut Window, cx: &mut App| {
                let moved = route_to_tracker(
                    || label_state::change_text(&id, &text, Instant::now()),
                    on_change_text.as_ref(),
                    |handler| (handler)(text.clone(), window, cx),
                );
                if moved {
                    window.refresh();
                }
            },
        ));

        callbacks
    }

    fn focus_handle(&self, cx: &App) -> FocusHandle {
        control::with_state(
            &self.id,
            FOCUS_HANDLE_SLOT,
            || cx.focus_handle(),
            |handle| handle.clone(),
        )
    }
}

/// Whether the show/hide toggle is drawn beside the input.
pub(crate) fn shows_toggle(options: &TextInputOptions) -> bool {
    options.is_secret()
}

/// Runs the tracker `transition` first, then hands the event to the host handler if
/// there is one. Returns whether the label started moving.
pub(crate) fn route_to_tracker<H: ?Sized>(
    transition: impl FnOnce() -> bool,
    handler: Option<&Rc<H>>,
    forward: impl FnOnce(&H),
) -> bool {
    let moved = transition();
    if let Some(handler) = handler {
        forward(handler);
    }
    moved
}

fn forward_focus(
    id: ComponentId,
    handler: Option<FocusHandler>,
    transition: fn(&str, Instant) -> bool,
) -> FocusHandler {
    Rc::new(move |event: &FocusEvent, window: &mut Window, cx: &mut App| {
        let moved = route_to_tracker(
            || transition(&id, Instant::now()),
            handler.as_ref(),
            |handler| (handler)(event, window, cx),
        );
        if moved {
            window.refresh();
        }
    })
}

impl Styled for FloatingLabelInput {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl RenderOnce for FloatingLabelInput {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let now = Instant::now();
        let frame = label_state::resolve(
            LabelStateInput {
                id: &self.id,
                value: self.options.value.as_deref(),
                placeholder: self.options.placeholder.as_deref(),
            },
            now,
        );
        if frame.animating {
            log::trace!(
                "{}: label frame size={} top={}",
                self.id,
                frame.label.font_size,
                frame.label.top
            );
            window.request_animation_frame();
        }

        let styles = FieldStyles::compose(&self.style, &self.input_style, &self.label_style);
        let focus_handle = self.focus_handle(cx);
        let secret = self.options.is_secret();
        let visibility = frame.password;

        let mut label = div()
            .absolute()
            .whitespace_nowrap()
            .cursor_text()
            .child(self.label.clone());
        label.style().refine(&styles.label);
        label = label
            .top(px(frame.label.top))
            .text_size(px(frame.label.font_size));
        if let Some(lines) = self.options.number_of_lines {
            label = label.whitespace_normal().line_clamp(usize::from(lines.max(1)));
        }
        let label = label.on_mouse_down(MouseButton::Left, {
            let focus_handle = focus_handle.clone();
            move |_, window, cx| window.focus(&focus_handle, cx)
        });

        let mut field = TextField::new()
            .with_id(self.field_id())
            .value(frame.text.clone())
            .options(self.options.clone())
            .obscured(visibility.obscures(secret))
            .focus_handle(focus_handle)
            .callbacks(self.field_callbacks())
            .input_ref_handler(self.input_ref.clone())
            .flex_1()
            .min_w_0();
        field.style().refine(&styles.input);

        let mut row = div().flex().flex_row().items_end().w_full().child(field);
        if shows_toggle(&self.options) {
            let id = self.id.clone();
            row = row.child(
                VisibilityToggle::new(visibility.hidden())
                    .with_id(self.id.slot("toggle"))
                    .hidden_image(self.obscured_image.clone())
                    .revealed_image(self.revealed_image.clone())
                    .on_toggle(move |window, _cx| {
                        let hidden = label_state::toggle_password(&id);
                        log::debug!("{id}: password {}", if hidden { "hidden" } else { "shown" });
                        window.refresh();
                    }),
            );
        }

        let mut container = div().id(self.id.slot("root"));
        container.style().refine(&styles.container);
        container.child(row).child(label)
    }
}

crate::impl_disableable!(FloatingLabelInput);
