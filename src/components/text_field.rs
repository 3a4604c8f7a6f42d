use std::{ops::Range, rc::Rc, sync::Arc, time::Duration};

use gpui::{
    Animation, AnimationExt, App, Bounds, ClipboardItem, Div, FocusHandle, Hsla, InputHandler,
    InteractiveElement, IntoElement, MouseButton, ParentElement, Pixels, Refineable, RenderOnce,
    SharedString, Stateful, StyleRefinement, Styled, UTF16Selection, Window, canvas, div, point,
    px, rgb,
};

use crate::events::{
    ChangeEvent, ChangeHandler, ChangeTextHandler, EndEditingEvent, EndEditingHandler, FocusChange,
    FocusEvent, FocusHandler, KeyPressEvent, KeyPressHandler, SubmitEditingEvent,
    SubmitEditingHandler, TextFieldCallbacks,
};
use crate::id::ComponentId;
use crate::options::TextInputOptions;
use crate::style::{INPUT_FONT_SIZE_PX, INPUT_LINE_HEIGHT_PX, input_text_color, label_color};

use super::control;
use super::edit_buffer::{EditBuffer, byte_index};
use super::text_input_actions::{
    CopySelection, CutSelection, DeleteBackward, DeleteForward, InsertNewline, MoveDown, MoveEnd,
    MoveHome, MoveLeft, MoveRight, MoveUp, PasteClipboard, SelectAll, SelectDown, SelectEnd,
    SelectHome, SelectLeft, SelectRight, SelectUp, Submit, ensure_text_keybindings, key_context,
};

pub type InputRefHandler = Rc<dyn Fn(TextFieldHandle, &mut Window, &mut App)>;

const BUFFER_SLOT: &str = "buffer";
const FOCUSED_SLOT: &str = "focused";
const GEOMETRY_SLOT: &str = "geometry";
const FOCUS_HANDLE_SLOT: &str = "focus-handle";
const AUTO_FOCUSED_SLOT: &str = "auto-focused";
const REF_DELIVERED_SLOT: &str = "ref-delivered";
const MASK_CHAR: char = '•';
const CARET_BLINK_CYCLE_MS: u64 = 1_060;
const MULTILINE_PADDING_PX: f32 = 16.0;

/// Imperative access to a mounted field, handed out through `input_ref`.
#[derive(Clone)]
pub struct TextFieldHandle {
    id: ComponentId,
    focus_handle: FocusHandle,
    options: Rc<TextInputOptions>,
}

impl TextFieldHandle {
    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    pub fn focus_handle(&self) -> &FocusHandle {
        &self.focus_handle
    }

    pub fn focus(&self, window: &mut Window, cx: &mut App) {
        window.focus(&self.focus_handle, cx);
    }

    pub fn blur(&self, window: &mut Window) {
        if self.focus_handle.is_focused(window) {
            window.blur();
        }
    }

    pub fn is_focused(&self, window: &Window) -> bool {
        self.focus_handle.is_focused(window)
    }

    pub fn text(&self) -> String {
        control::read_state::<EditBuffer>(&self.id, BUFFER_SLOT)
            .map(|buffer| buffer.text().to_string())
            .unwrap_or_default()
    }

    /// Options the field was rendered with, including platform hints such as
    /// `auto_correct` and `return_key_type` that the field itself does not act on.
    pub fn options(&self) -> &TextInputOptions {
        &self.options
    }
}

/// Masks every character except line breaks.
pub fn display_text(text: &str, obscured: bool) -> String {
    if !obscured {
        return text.to_string();
    }
    text.chars()
        .map(|ch| if ch == '\n' { ch } else { MASK_CHAR })
        .collect()
}

/// Applies line mode, keyboard type and capitalization to text about to replace
/// `range` of `buffer`.
pub fn prepare_insert(
    options: &TextInputOptions,
    buffer: &EditBuffer,
    range: Range<usize>,
    text: &str,
) -> String {
    let text = text.replace('\r', "");
    let text = if options.multiline {
        text
    } else {
        text.replace('\n', " ")
    };
    let len = buffer.len();
    let start = range.start.min(len);
    let end = range.end.min(len).max(start);
    let preceding = buffer.slice(0..start);
    let mut kept = preceding.clone();
    kept.push_str(&buffer.slice(end..len));

    let filtered = options.keyboard_type.filter(&text, &kept);
    if options.is_secret() {
        return filtered;
    }
    options.auto_capitalize.apply(&preceding, &filtered)
}

/// Splits one display line into the text before, inside and after the selection.
/// `line_start` is the char index of the line within the whole text.
pub fn split_line(
    line: &str,
    line_start: usize,
    selection: Option<&Range<usize>>,
) -> (String, String, String) {
    let line_len = line.chars().count();
    let Some(selection) = selection else {
        return (line.to_string(), String::new(), String::new());
    };
    let from = selection.start.clamp(line_start, line_start + line_len) - line_start;
    let to = selection.end.clamp(line_start, line_start + line_len) - line_start;
    let take = |range: Range<usize>| -> String {
        line.chars()
            .skip(range.start)
            .take(range.end - range.start)
            .collect()
    };
    (take(0..from), take(from..to), take(to..line_len))
}

/// Each line of `text` with the char index where it starts.
pub fn lines_with_offsets(text: &str) -> Vec<(&str, usize)> {
    let mut offset = 0;
    text.split('\n')
        .map(|line| {
            let start = offset;
            offset += line.chars().count() + 1;
            (line, start)
        })
        .collect()
}

fn line_layout(window: &Window, text: &str) -> Arc<gpui::LineLayout> {
    let font_size = px(INPUT_FONT_SIZE_PX);
    let mut text_style = window.text_style();
    text_style.font_size = font_size.into();
    let run = text_style.to_run(text.len());
    window
        .text_system()
        .layout_line(text, font_size, &[run], None)
}

fn x_for_col(window: &Window, line: &str, col: usize) -> f32 {
    if line.is_empty() {
        return 0.0;
    }
    let layout = line_layout(window, line);
    f32::from(layout.x_for_index(byte_index(line, col)))
}

fn col_for_x(window: &Window, line: &str, x: f32) -> usize {
    if line.is_empty() {
        return 0;
    }
    let layout = line_layout(window, line);
    let mut byte = layout.closest_index_for_x(px(x.max(0.0))).min(line.len());
    while byte > 0 && !line.is_char_boundary(byte) {
        byte -= 1;
    }
    line[..byte].chars().count()
}

fn selection_color() -> Hsla {
    Hsla::from(rgb(0x3390ff)).alpha(0.28)
}

/// Everything an event listener needs to edit the field after render returned.
#[derive(Clone)]
struct EditSession {
    id: ComponentId,
    options: Rc<TextInputOptions>,
    obscured: bool,
    callbacks: TextFieldCallbacks,
}

impl EditSession {
    fn buffer(&self) -> EditBuffer {
        control::read_state::<EditBuffer>(&self.id, BUFFER_SLOT).unwrap_or_default()
    }

    fn text(&self) -> String {
        self.buffer().text().to_string()
    }

    fn edit(&self, window: &mut Window, cx: &mut App, op: impl FnOnce(&mut EditBuffer)) {
        let (previous, next) =
            control::with_state(&self.id, BUFFER_SLOT, EditBuffer::default, |buffer| {
                let previous = buffer.text().to_string();
                op(buffer);
                (previous, buffer.text().to_string())
            });
        window.refresh();
        if previous != next {
            let event = ChangeEvent {
                target: self.id.clone(),
                previous: previous.into(),
                text: next.into(),
            };
            self.callbacks.emit_change(&event, window, cx);
        }
    }

    fn insert_typed(
        &self,
        range: Option<Range<usize>>,
        text: &str,
        window: &mut Window,
        cx: &mut App,
    ) {
        if !self.options.editable {
            return;
        }
        let options = self.options.clone();
        self.edit(window, cx, |buffer| {
            let range = range
                .or_else(|| buffer.marked())
                .unwrap_or_else(|| buffer.selection_or_caret());
            let prepared = prepare_insert(&options, buffer, range.clone(), text);
            buffer.replace(range, &prepared);
        });
    }

    fn copy(&self, cx: &mut App) {
        if self.obscured {
            return;
        }
        let selected = self.buffer().selected_text();
        if !selected.is_empty() {
            cx.write_to_clipboard(ClipboardItem::new_string(selected));
        }
    }

    fn cut(&self, window: &mut Window, cx: &mut App) {
        if self.obscured {
            return;
        }
        let selected = self.buffer().selected_text();
        if selected.is_empty() {
            return;
        }
        cx.write_to_clipboard(ClipboardItem::new_string(selected));
        self.edit(window, cx, |buffer| {
            buffer.delete_backward();
        });
    }

    fn paste(&self, window: &mut Window, cx: &mut App) {
        let Some(item) = cx.read_from_clipboard() else {
            return;
        };
        let Some(text) = item.text() else {
            return;
        };
        self.insert_typed(None, &text, window, cx);
    }

    fn submit(&self, window: &mut Window, cx: &mut App) {
        let text = self.text();
        if self.options.enables_return_key_automatically && text.is_empty() {
            return;
        }
        log::trace!("{}: submit editing", self.id);
        let event = SubmitEditingEvent {
            target: self.id.clone(),
            text: text.into(),
        };
        self.callbacks.emit_submit_editing(&event, window, cx);
    }

    fn focus_changed(&self, focused: bool, window: &mut Window, cx: &mut App) {
        if focused {
            if self.options.clear_text_on_focus && self.options.editable {
                self.edit(window, cx, |buffer| {
                    buffer.clear();
                });
            } else if self.options.select_text_on_focus {
                self.edit(window, cx, EditBuffer::select_all);
            }
        } else {
            control::with_state(&self.id, BUFFER_SLOT, EditBuffer::default, |buffer| {
                buffer.move_to(buffer.caret(), false);
                buffer.set_marked(None);
            });
            let event = EndEditingEvent {
                target: self.id.clone(),
                text: self.text().into(),
            };
            self.callbacks.emit_end_editing(&event, window, cx);
        }

        let event = FocusEvent {
            target: self.id.clone(),
            change: if focused {
                FocusChange::Focus
            } else {
                FocusChange::Blur
            },
            text: self.text().into(),
        };
        self.callbacks.emit_focus(&event, window, cx);
        window.refresh();
    }

    fn display_line(&self, buffer: &EditBuffer, line: usize) -> String {
        display_text(buffer.text(), self.obscured)
            .split('\n')
            .nth(line)
            .unwrap_or_default()
            .to_string()
    }

    fn index_at(&self, position: gpui::Point<Pixels>, window: &Window) -> Option<usize> {
        let geometry = control::read_state::<Bounds<Pixels>>(&self.id, GEOMETRY_SLOT)?;
        let buffer = self.buffer();
        let local_x = f32::from(position.x - geometry.origin.x);
        let local_y = f32::from(position.y - geometry.origin.y).max(0.0);
        let line = if self.options.multiline {
            (local_y / INPUT_LINE_HEIGHT_PX).floor() as usize
        } else {
            0
        };
        let (last_line, _) = buffer.line_col(buffer.len());
        let line = line.min(last_line);
        let col = col_for_x(window, &self.display_line(&buffer, line), local_x);
        Some((buffer.line_start(line) + col).min(buffer.len()))
    }
}

struct TextFieldInputHandler {
    session: EditSession,
}

impl InputHandler for TextFieldInputHandler {
    fn selected_text_range(
        &mut self,
        _ignore_disabled_input: bool,
        _window: &mut Window,
        _cx: &mut App,
    ) -> Option<UTF16Selection> {
        let buffer = self.session.buffer();
        Some(UTF16Selection {
            range: buffer.utf16_from_chars(buffer.selection_or_caret()),
            reversed: buffer.is_reversed(),
        })
    }

    fn marked_text_range(&mut self, _window: &mut Window, _cx: &mut App) -> Option<Range<usize>> {
        let buffer = self.session.buffer();
        buffer.marked().map(|range| buffer.utf16_from_chars(range))
    }

    fn text_for_range(
        &mut self,
        range_utf16: Range<usize>,
        adjusted_range: &mut Option<Range<usize>>,
        _window: &mut Window,
        _cx: &mut App,
    ) -> Option<String> {
        let buffer = self.session.buffer();
        let len = buffer.len();
        let range = buffer.chars_from_utf16(range_utf16);
        let range = range.start.min(len)..range.end.min(len);
        adjusted_range.replace(buffer.utf16_from_chars(range.clone()));
        Some(display_text(&buffer.slice(range), self.session.obscured))
    }

    fn replace_text_in_range(
        &mut self,
        replacement_range: Option<Range<usize>>,
        text: &str,
        window: &mut Window,
        cx: &mut App,
    ) {
        let range = replacement_range.map(|range| self.session.buffer().chars_from_utf16(range));
        self.session.insert_typed(range, text, window, cx);
    }

    fn replace_and_mark_text_in_range(
        &mut self,
        range_utf16: Option<Range<usize>>,
        new_text: &str,
        new_selected_range_utf16: Option<Range<usize>>,
        window: &mut Window,
        cx: &mut App,
    ) {
        if !self.session.options.editable {
            return;
        }
        let composed = new_text.replace(['\r', '\n'], "");
        self.session.edit(window, cx, |buffer| {
            let range = range_utf16
                .map(|range| buffer.chars_from_utf16(range))
                .or_else(|| buffer.marked())
                .unwrap_or_else(|| buffer.selection_or_caret());
            let start = range.start.min(buffer.len());
            buffer.replace(range, &composed);
            let inserted = composed.chars().count();
            buffer.set_marked((inserted > 0).then_some(start..start + inserted));
            if let Some(selected) = new_selected_range_utf16 {
                let relative = EditBuffer::new(composed.clone()).chars_from_utf16(selected);
                buffer.select(start + relative.start, start + relative.end);
            }
        });
    }

    fn unmark_text(&mut self, _window: &mut Window, _cx: &mut App) {
        control::with_state(
            &self.session.id,
            BUFFER_SLOT,
            EditBuffer::default,
            |buffer| buffer.set_marked(None),
        );
    }

    fn bounds_for_range(
        &mut self,
        range_utf16: Range<usize>,
        window: &mut Window,
        _cx: &mut App,
    ) -> Option<Bounds<Pixels>> {
        let geometry = control::read_state::<Bounds<Pixels>>(&self.session.id, GEOMETRY_SLOT)?;
        let buffer = self.session.buffer();
        let range = buffer.chars_from_utf16(range_utf16);
        let (line, start_col) = buffer.line_col(range.start);
        let (end_line, end_col) = buffer.line_col(range.end);
        let text = self.session.display_line(&buffer, line);
        let start_x = x_for_col(window, &text, start_col);
        let end_x = if end_line == line {
            x_for_col(window, &text, end_col)
        } else {
            x_for_col(window, &text, text.chars().count())
        };
        let top = line as f32 * INPUT_LINE_HEIGHT_PX;
        Some(Bounds::from_corners(
            point(geometry.origin.x + px(start_x), geometry.origin.y + px(top)),
            point(
                geometry.origin.x + px(end_x.max(start_x + 1.0)),
                geometry.origin.y + px(top + INPUT_LINE_HEIGHT_PX),
            ),
        ))
    }

    fn character_index_for_point(
        &mut self,
        point: gpui::Point<Pixels>,
        window: &mut Window,
        _cx: &mut App,
    ) -> Option<usize> {
        let index = self.session.index_at(point, window)?;
        Some(self.session.buffer().utf16_from_char(index))
    }

    fn accepts_text_input(&mut self, _window: &mut Window, _cx: &mut App) -> bool {
        self.session.options.editable
    }
}

fn bind_edit<A: gpui::Action>(
    field: Stateful<Div>,
    session: &EditSession,
    op: fn(&mut EditBuffer),
) -> Stateful<Div> {
    let session = session.clone();
    field.on_action(move |_: &A, window, cx| session.edit(window, cx, op))
}

/// The text-entry primitive under the floating label: a focusable single or
/// multi-line field that reports focus, blur, edits, submit and key presses.
#[derive(IntoElement)]
pub struct TextField {
    id: ComponentId,
    value: Option<SharedString>,
    options: TextInputOptions,
    obscured: bool,
    focus_handle: Option<FocusHandle>,
    callbacks: TextFieldCallbacks,
    input_ref: Option<InputRefHandler>,
    style: StyleRefinement,
}

impl TextField {
    #[track_caller]
    pub fn new() -> Self {
        Self {
            id: ComponentId::auto("text-field"),
            value: None,
            options: TextInputOptions::default(),
            obscured: false,
            focus_handle: None,
            callbacks: TextFieldCallbacks::default(),
            input_ref: None,
            style: StyleRefinement::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = id.into();
        self
    }

    /// Makes the field controlled: every render resets the text to `value`.
    pub fn value(mut self, value: impl Into<SharedString>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn options(mut self, options: TextInputOptions) -> Self {
        self.options = options;
        self
    }

    pub fn disabled(mut self, value: bool) -> Self {
        self.options.editable = !value;
        self
    }

    pub fn obscured(mut self, obscured: bool) -> Self {
        self.obscured = obscured;
        self
    }

    pub fn focus_handle(mut self, focus_handle: FocusHandle) -> Self {
        self.focus_handle = Some(focus_handle);
        self
    }

    pub fn callbacks(mut self, callbacks: TextFieldCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn on_focus(
        mut self,
        handler: impl Fn(&FocusEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.callbacks.on_focus = Some(Rc::new(handler) as FocusHandler);
        self
    }

    pub fn on_blur(
        mut self,
        handler: impl Fn(&FocusEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.callbacks.on_blur = Some(Rc::new(handler) as FocusHandler);
        self
    }

    pub fn on_change_text(
        mut self,
        handler: impl Fn(SharedString, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.callbacks.on_change_text = Some(Rc::new(handler) as ChangeTextHandler);
        self
    }

    pub fn on_end_editing(
        mut self,
        handler: impl Fn(&EndEditingEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.callbacks.on_end_editing = Some(Rc::new(handler) as EndEditingHandler);
        self
    }

    pub fn on_submit_editing(
        mut self,
        handler: impl Fn(&SubmitEditingEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.callbacks.on_submit_editing = Some(Rc::new(handler) as SubmitEditingHandler);
        self
    }

    pub fn on_key_press(
        mut self,
        handler: impl Fn(&KeyPressEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.callbacks.on_key_press = Some(Rc::new(handler) as KeyPressHandler);
        self
    }

    pub fn on_change(
        mut self,
        handler: impl Fn(&ChangeEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.callbacks.on_change = Some(Rc::new(handler) as ChangeHandler);
        self
    }

    pub fn input_ref(
        mut self,
        handler: impl Fn(TextFieldHandle, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.input_ref = Some(Rc::new(handler));
        self
    }

    pub(crate) fn input_ref_handler(mut self, handler: Option<InputRefHandler>) -> Self {
        self.input_ref = handler;
        self
    }

    fn resolved_focus_handle(&self, cx: &App) -> FocusHandle {
        if let Some(focus_handle) = self.focus_handle.as_ref() {
            return focus_handle.clone();
        }
        control::with_state(
            &self.id,
            FOCUS_HANDLE_SLOT,
            || cx.focus_handle(),
            |handle| handle.clone(),
        )
    }

    fn session(&self) -> EditSession {
        EditSession {
            id: self.id.clone(),
            options: Rc::new(self.options.clone()),
            obscured: self.obscured,
            callbacks: self.callbacks.clone(),
        }
    }

    /// Detects focus transitions between passes and reports them after the pass.
    fn sync_focus(
        &self,
        session: &EditSession,
        focus_handle: &FocusHandle,
        window: &mut Window,
        cx: &mut App,
    ) -> bool {
        let focused = focus_handle.is_focused(window);
        if focused == control::flag(&self.id, FOCUSED_SLOT) {
            return focused;
        }
        control::set_flag(&self.id, FOCUSED_SLOT, focused);
        log::debug!("{}: {}", self.id, if focused { "focus" } else { "blur" });
        let session = session.clone();
        window.defer(cx, move |window, cx| session.focus_changed(focused, window, cx));
        focused
    }

    fn deliver_ref(
        &self,
        session: &EditSession,
        focus_handle: &FocusHandle,
        window: &mut Window,
        cx: &mut App,
    ) {
        let Some(handler) = self.input_ref.clone() else {
            return;
        };
        if control::flag(&self.id, REF_DELIVERED_SLOT) {
            return;
        }
        control::set_flag(&self.id, REF_DELIVERED_SLOT, true);
        let handle = TextFieldHandle {
            id: self.id.clone(),
            focus_handle: focus_handle.clone(),
            options: session.options.clone(),
        };
        window.defer(cx, move |window, cx| (handler)(handle, window, cx));
    }

    fn render_lines(&self, buffer: &EditBuffer) -> Vec<gpui::AnyElement> {
        let display = display_text(buffer.text(), self.obscured);
        let selection = buffer.selection();
        lines_with_offsets(&display)
            .into_iter()
            .map(|(line, start)| {
                let (before, selected, after) = split_line(line, start, selection.as_ref());
                let mut row = div()
                    .flex()
                    .flex_row()
                    .whitespace_nowrap()
                    .h(px(INPUT_LINE_HEIGHT_PX))
                    .child(before);
                if !selected.is_empty() {
                    row = row.child(div().bg(selection_color()).child(selected));
                }
                row.child(after).into_any_element()
            })
            .collect()
    }

    fn render_caret(&self, buffer: &EditBuffer, window: &Window) -> gpui::AnyElement {
        let display = display_text(buffer.text(), self.obscured);
        let (line, col) = buffer.line_col(buffer.caret());
        let line_text = display.split('\n').nth(line).unwrap_or_default();
        let left = x_for_col(window, line_text, col);
        let caret = div()
            .id(self.id.slot("caret"))
            .w(px(1.5))
            .h(px(INPUT_LINE_HEIGHT_PX - 4.0))
            .bg(input_text_color())
            .with_animation(
                self.id.slot("caret-blink"),
                Animation::new(Duration::from_millis(CARET_BLINK_CYCLE_MS))
                    .repeat()
                    .with_easing(gpui::linear),
                |this, delta| {
                    let visible = (delta * 2.0).fract() < 0.5;
                    this.opacity(if visible { 1.0 } else { 0.0 })
                },
            );
        div()
            .absolute()
            .left(px(left))
            .top(px(line as f32 * INPUT_LINE_HEIGHT_PX + 2.0))
            .child(caret)
            .into_any_element()
    }
}

impl Default for TextField {
    #[track_caller]
    fn default() -> Self {
        Self::new()
    }
}

impl Styled for TextField {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl RenderOnce for TextField {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        ensure_text_keybindings(cx);
        let session = self.session();
        let focus_handle = self.resolved_focus_handle(cx);
        let value = self.value.as_ref().map(|value| value.to_string());
        let buffer = control::with_state(
            &self.id,
            BUFFER_SLOT,
            || EditBuffer::new(value.clone().unwrap_or_default()),
            |buffer| {
                match value.as_deref() {
                    Some(value) if buffer.text() != value => buffer.set_text(value),
                    _ => {}
                }
                buffer.clone()
            },
        );

        if self.options.auto_focus && !control::flag(&self.id, AUTO_FOCUSED_SLOT) {
            control::set_flag(&self.id, AUTO_FOCUSED_SLOT, true);
            window.focus(&focus_handle, cx);
        }
        let focused = self.sync_focus(&session, &focus_handle, window, cx);
        self.deliver_ref(&session, &focus_handle, window, cx);

        let editable = self.options.editable;
        let multiline = self.options.multiline;
        let mut field = div()
            .id(self.id.slot("box"))
            .key_context(key_context(multiline))
            .track_focus(&focus_handle)
            .relative()
            .flex()
            .flex_row()
            .overflow_hidden();
        field = if multiline {
            field.items_start()
        } else {
            field.items_center()
        };
        field.style().refine(&self.style);
        if multiline {
            let lines = f32::from(self.options.visible_lines());
            field = field.h(px(lines * INPUT_LINE_HEIGHT_PX + MULTILINE_PADDING_PX));
        }
        field = if editable {
            field.cursor_text()
        } else {
            field.cursor_default()
        };

        field = field
            .on_mouse_down(MouseButton::Left, {
                let session = session.clone();
                let focus_handle = focus_handle.clone();
                move |event, window, cx| {
                    window.focus(&focus_handle, cx);
                    if let Some(index) = session.index_at(event.position, window) {
                        let extend = event.modifiers.shift;
                        control::with_state(
                            &session.id,
                            BUFFER_SLOT,
                            EditBuffer::default,
                            |buffer| buffer.move_to(index, extend),
                        );
                    }
                    window.refresh();
                }
            })
            .on_key_down({
                let session = session.clone();
                move |event, window, cx| {
                    let key_event = KeyPressEvent {
                        target: session.id.clone(),
                        key: event.keystroke.key.clone().into(),
                    };
                    session.callbacks.emit_key_press(&key_event, window, cx);
                }
            });

        field = bind_edit::<MoveLeft>(field, &session, |buffer| buffer.move_left(false));
        field = bind_edit::<MoveRight>(field, &session, |buffer| buffer.move_right(false));
        field = bind_edit::<MoveHome>(field, &session, |buffer| buffer.move_home(false));
        field = bind_edit::<MoveEnd>(field, &session, |buffer| buffer.move_end(false));
        field = bind_edit::<SelectLeft>(field, &session, |buffer| buffer.move_left(true));
        field = bind_edit::<SelectRight>(field, &session, |buffer| buffer.move_right(true));
        field = bind_edit::<SelectHome>(field, &session, |buffer| buffer.move_home(true));
        field = bind_edit::<SelectEnd>(field, &session, |buffer| buffer.move_end(true));
        field = bind_edit::<MoveUp>(field, &session, |buffer| buffer.move_up(false));
        field = bind_edit::<MoveDown>(field, &session, |buffer| buffer.move_down(false));
        field = bind_edit::<SelectUp>(field, &session, |buffer| buffer.move_up(true));
        field = bind_edit::<SelectDown>(field, &session, |buffer| buffer.move_down(true));
        field = bind_edit::<SelectAll>(field, &session, EditBuffer::select_all);
        field = field
            .on_action({
                let session = session.clone();
                move |_: &CopySelection, _window, cx| session.copy(cx)
            })
            .on_action({
                let session = session.clone();
                move |_: &Submit, window, cx| session.submit(window, cx)
            });

        if editable {
            field = bind_edit::<DeleteBackward>(field, &session, |buffer| {
                buffer.delete_backward();
            });
            field = bind_edit::<DeleteForward>(field, &session, |buffer| {
                buffer.delete_forward();
            });
            field = field
                .on_action({
                    let session = session.clone();
                    move |_: &CutSelection, window, cx| session.cut(window, cx)
                })
                .on_action({
                    let session = session.clone();
                    move |_: &PasteClipboard, window, cx| session.paste(window, cx)
                })
                .on_action({
                    let session = session.clone();
                    move |_: &InsertNewline, window, cx| {
                        if session.options.multiline {
                            session.insert_typed(None, "\n", window, cx);
                        }
                    }
                });
        }

        window.handle_input(
            &focus_handle,
            TextFieldInputHandler {
                session: session.clone(),
            },
            cx,
        );

        let mut content = div()
            .id(self.id.slot("content"))
            .relative()
            .flex_1()
            .min_w_0()
            .flex()
            .flex_col()
            .overflow_hidden()
            .text_size(px(INPUT_FONT_SIZE_PX))
            .line_height(px(INPUT_LINE_HEIGHT_PX))
            .child({
                let id = self.id.clone();
                canvas(
                    move |bounds, _, _cx| control::set_state(&id, GEOMETRY_SLOT, bounds),
                    |_, _, _, _| {},
                )
                .absolute()
                .size_full()
            });

        let show_placeholder = buffer.is_empty()
            && self
                .options
                .placeholder
                .as_ref()
                .is_some_and(|placeholder| !placeholder.is_empty());
        if show_placeholder {
            let placeholder = self.options.placeholder.clone().unwrap_or_default();
            content = content.child(
                div()
                    .truncate()
                    .text_color(label_color())
                    .child(SharedString::from(placeholder)),
            );
        } else {
            content = content.children(self.render_lines(&buffer));
        }
        let show_caret = focused
            && editable
            && !self.options.caret_hidden
            && buffer.selection().is_none();
        if show_caret {
            content = content.child(self.render_caret(&buffer, window));
        }
        field = field.child(content);

        if editable
            && self
                .options
                .clear_button_mode
                .visible(focused, !buffer.is_empty())
        {
            let session = session.clone();
            field = field.child(
                div()
                    .id(self.id.slot("clear"))
                    .flex_none()
                    .px(px(6.0))
                    .cursor_pointer()
                    .text_color(label_color())
                    .child("×")
                    .on_mouse_down(MouseButton::Left, move |_, window, cx| {
                        cx.stop_propagation();
                        session.edit(window, cx, |buffer| {
                            buffer.clear();
                        });
                    }),
            );
        }

        field
    }
}

crate::impl_disableable!(TextField);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{AutoCapitalize, KeyboardType};

    #[test]
    fn obscured_text_masks_everything_but_line_breaks() {
        assert_eq!(display_text("pa\nss", true), "••\n••");
        assert_eq!(display_text("pass", false), "pass");
    }

    #[test]
    fn single_line_inserts_flatten_line_breaks() {
        let options = TextInputOptions {
            auto_capitalize: AutoCapitalize::None,
            ..TextInputOptions::default()
        };
        let buffer = EditBuffer::default();
        assert_eq!(prepare_insert(&options, &buffer, 0..0, "a\r\nb"), "a b");

        let multiline = TextInputOptions {
            multiline: true,
            ..options
        };
        assert_eq!(prepare_insert(&multiline, &buffer, 0..0, "a\r\nb"), "a\nb");
    }

    #[test]
    fn inserts_are_filtered_then_capitalized() {
        let options = TextInputOptions {
            auto_capitalize: AutoCapitalize::Words,
            ..TextInputOptions::default()
        };
        let buffer = EditBuffer::new("jane");
        assert_eq!(prepare_insert(&options, &buffer, 4..4, " doe"), " Doe");

        let decimal = TextInputOptions {
            keyboard_type: KeyboardType::DecimalPad,
            ..TextInputOptions::default()
        };
        let buffer = EditBuffer::new("1.5");
        assert_eq!(prepare_insert(&decimal, &buffer, 3..3, ".2"), "2");
        assert_eq!(prepare_insert(&decimal, &buffer, 1..3, ".2"), ".2");
    }

    #[test]
    fn secret_fields_skip_capitalization() {
        let options = TextInputOptions {
            secure_text_entry: Some(true),
            auto_capitalize: AutoCapitalize::Characters,
            ..TextInputOptions::default()
        };
        assert_eq!(
            prepare_insert(&options, &EditBuffer::default(), 0..0, "abc"),
            "abc"
        );
    }

    #[test]
    fn split_line_clips_selection_to_the_line() {
        assert_eq!(
            split_line("hello", 0, None),
            ("hello".into(), String::new(), String::new())
        );
        assert_eq!(
            split_line("hello", 0, Some(&(1..3))),
            ("h".into(), "el".into(), "lo".into())
        );
        assert_eq!(
            split_line("world", 6, Some(&(2..8))),
            (String::new(), "wo".into(), "rld".into())
        );
        assert_eq!(
            split_line("world", 6, Some(&(0..2))),
            ("world".into(), String::new(), String::new())
        );
    }

    #[test]
    fn lines_carry_their_char_offsets() {
        assert_eq!(
            lines_with_offsets("ab\n\ncd"),
            vec![("ab", 0), ("", 3), ("cd", 4)]
        );
        assert_eq!(lines_with_offsets(""), vec![("", 0)]);
    }
}
