pub mod control;
pub mod edit_buffer;
mod floating_label_input;
mod interaction_adapter;
pub mod label_state;
mod text_field;
pub mod text_input_actions;
mod visibility_toggle;

pub use floating_label_input::FloatingLabelInput;
pub use text_field::{
    InputRefHandler, TextField, TextFieldHandle, display_text, lines_with_offsets,
    prepare_insert, split_line,
};
pub use visibility_toggle::VisibilityToggle;

#[cfg(test)]
mod test_component_smoke;
#[cfg(test)]
mod test_state_logic;
