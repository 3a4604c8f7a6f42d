pub mod components;
pub mod contracts;
pub mod events;
pub mod id;
pub mod motion;
pub mod options;
pub mod prelude;
pub mod style;

pub use components::{FloatingLabelInput, TextField, TextFieldHandle, VisibilityToggle};
pub use options::TextInputOptions;
