use std::sync::Once;

use gpui::{App, KeyBinding, actions};

pub const SINGLE_LINE_KEY_CONTEXT: &str = "floatlabel_text_field";
pub const MULTILINE_KEY_CONTEXT: &str = "floatlabel_text_area";

actions!(
    floatlabel_text_field,
    [
        MoveLeft,
        MoveRight,
        MoveHome,
        MoveEnd,
        MoveUp,
        MoveDown,
        SelectLeft,
        SelectRight,
        SelectHome,
        SelectEnd,
        SelectUp,
        SelectDown,
        DeleteBackward,
        DeleteForward,
        SelectAll,
        CopySelection,
        CutSelection,
        PasteClipboard,
        Submit,
        InsertNewline,
    ]
);

static BINDINGS_INIT: Once = Once::new();

pub fn ensure_text_keybindings(cx: &mut App) {
    BINDINGS_INIT.call_once(|| {
        cx.bind_keys(editing_bindings(SINGLE_LINE_KEY_CONTEXT));
        cx.bind_keys(editing_bindings(MULTILINE_KEY_CONTEXT));
        cx.bind_keys(vertical_bindings());
        cx.bind_keys(enter_bindings());
    });
}

fn editing_bindings(context: &'static str) -> Vec<KeyBinding> {
    vec![
        KeyBinding::new("left", MoveLeft, Some(context)),
        KeyBinding::new("right", MoveRight, Some(context)),
        KeyBinding::new("home", MoveHome, Some(context)),
        KeyBinding::new("end", MoveEnd, Some(context)),
        KeyBinding::new("shift-left", SelectLeft, Some(context)),
        KeyBinding::new("shift-right", SelectRight, Some(context)),
        KeyBinding::new("shift-home", SelectHome, Some(context)),
        KeyBinding::new("shift-end", SelectEnd, Some(context)),
        KeyBinding::new("backspace", DeleteBackward, Some(context)),
        KeyBinding::new("delete", DeleteForward, Some(context)),
        KeyBinding::new("cmd-a", SelectAll, Some(context)),
        KeyBinding::new("ctrl-a", SelectAll, Some(context)),
        KeyBinding::new("cmd-c", CopySelection, Some(context)),
        KeyBinding::new("ctrl-c", CopySelection, Some(context)),
        KeyBinding::new("cmd-x", CutSelection, Some(context)),
        KeyBinding::new("ctrl-x", CutSelection, Some(context)),
        KeyBinding::new("cmd-v", PasteClipboard, Some(context)),
        KeyBinding::new("ctrl-v", PasteClipboard, Some(context)),
    ]
}

/// Line-to-line caret movement, multiline only.
fn vertical_bindings() -> Vec<KeyBinding> {
    vec![
        KeyBinding::new("up", MoveUp, Some(MULTILINE_KEY_CONTEXT)),
        KeyBinding::new("down", MoveDown, Some(MULTILINE_KEY_CONTEXT)),
        KeyBinding::new("shift-up", SelectUp, Some(MULTILINE_KEY_CONTEXT)),
        KeyBinding::new("shift-down", SelectDown, Some(MULTILINE_KEY_CONTEXT)),
    ]
}

/// Enter submits a single-line field and breaks the line in a multiline one.
fn enter_bindings() -> Vec<KeyBinding> {
    vec![
        KeyBinding::new("enter", Submit, Some(SINGLE_LINE_KEY_CONTEXT)),
        KeyBinding::new("enter", InsertNewline, Some(MULTILINE_KEY_CONTEXT)),
        KeyBinding::new("cmd-enter", Submit, Some(MULTILINE_KEY_CONTEXT)),
        KeyBinding::new("ctrl-enter", Submit, Some(MULTILINE_KEY_CONTEXT)),
    ]
}

pub fn key_context(multiline: bool) -> &'static str {
    if multiline {
        MULTILINE_KEY_CONTEXT
    } else {
        SINGLE_LINE_KEY_CONTEXT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_context_follows_line_mode() {
        assert_eq!(key_context(false), "floatlabel_text_field");
        assert_eq!(key_context(true), "floatlabel_text_area");
    }

    #[test]
    fn editing_bindings_cover_navigation_and_clipboard() {
        assert_eq!(editing_bindings(SINGLE_LINE_KEY_CONTEXT).len(), 18);
    }

    #[test]
    fn multiline_fields_move_between_lines() {
        assert_eq!(vertical_bindings().len(), 4);
    }

    #[test]
    fn multiline_fields_keep_a_submit_shortcut() {
        assert_eq!(enter_bindings().len(), 4);
    }
}
