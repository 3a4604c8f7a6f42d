use super::*;
use crate::options::{ClearButtonMode, KeyboardType, TextInputOptions};
use gpui::{AnyElement, IntoElement, StyleRefinement, Styled, px, rgb};

fn into_any(element: impl IntoElement) -> AnyElement {
    element.into_any_element()
}

#[test]
fn smoke_floating_label_inputs_render_into_any_element() {
    let _ = into_any(FloatingLabelInput::new("Email"));
    let _ = into_any(
        FloatingLabelInput::new("Email")
            .with_id("smoke-email")
            .value("")
            .placeholder("you@example.com")
            .keyboard_type(KeyboardType::EmailAddress)
            .clear_button_mode(ClearButtonMode::WhileEditing)
            .input_style(StyleRefinement::default().bg(rgb(0xf5f5f5)))
            .label_style(StyleRefinement::default().text_color(rgb(0x336699)))
            .w(px(320.0)),
    );
    let _ = into_any(
        FloatingLabelInput::new("Password")
            .secure_text_entry(true)
            .obscured_image("icons/eye-off.png")
            .revealed_image("icons/eye.png")
            .on_change_text(|_, _, _| {}),
    );
    let _ = into_any(
        FloatingLabelInput::new("Notes")
            .multiline(true)
            .number_of_lines(3)
            .disabled(true),
    );
}

#[test]
fn smoke_options_loaded_from_data_render() {
    let options: TextInputOptions = match serde_json::from_str(
        r#"{"placeholder":"Name","autoCapitalize":"words","clearButtonMode":"always"}"#,
    ) {
        Ok(options) => options,
        Err(err) => panic!("options should parse: {err}"),
    };
    let _ = into_any(FloatingLabelInput::new("Name").options(options));
}

#[test]
fn smoke_parts_render_into_any_element() {
    let _ = into_any(TextField::new().value("hello"));
    let _ = into_any(
        TextField::new()
            .value("secret")
            .obscured(true)
            .on_submit_editing(|_, _, _| {}),
    );
    let _ = into_any(VisibilityToggle::new(true));
    let _ = into_any(VisibilityToggle::new(false).revealed_image(Some("icons/eye.png".into())));
    let _ = into_any(VisibilityToggle::new(true).on_toggle(|_, _| {}));
}
