pub use crate::components::{FloatingLabelInput, TextField, TextFieldHandle, VisibilityToggle};
pub use crate::contracts::Disableable;
pub use crate::events::{
    ChangeEvent, EndEditingEvent, FocusChange, FocusEvent, KeyPressEvent, SubmitEditingEvent,
    TextFieldCallbacks,
};
pub use crate::id::ComponentId;
pub use crate::options::{
    AutoCapitalize, ClearButtonMode, KeyboardType, ReturnKeyType, TextInputOptions,
};
pub use crate::style::{CLEAN, DIRTY, LabelEndpoint, LabelPhase};
