use std::rc::Rc;

use gpui::{
    App, ImageSource, InteractiveElement, IntoElement, ParentElement, RenderOnce, Styled,
    Window, div, img, px,
};

use crate::id::ComponentId;
use crate::style::{INPUT_HEIGHT_PX, TOGGLE_PADDING_PX, TOGGLE_WIDTH_PX};

use super::interaction_adapter::{ActivateHandler, PressAdapter, bind_press_adapter};

/// Press target that flips password visibility. Shows `hidden_image` while the
/// secret is masked and `revealed_image` once it is shown; a missing image leaves
/// an empty but still pressable region.
#[derive(IntoElement)]
pub struct VisibilityToggle {
    id: ComponentId,
    hidden: bool,
    hidden_image: Option<ImageSource>,
    revealed_image: Option<ImageSource>,
    on_toggle: Option<ActivateHandler>,
}

impl VisibilityToggle {
    #[track_caller]
    pub fn new(hidden: bool) -> Self {
        Self {
            id: ComponentId::auto("visibility-toggle"),
            hidden,
            hidden_image: None,
            revealed_image: None,
            on_toggle: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn hidden_image(mut self, source: Option<ImageSource>) -> Self {
        self.hidden_image = source;
        self
    }

    pub fn revealed_image(mut self, source: Option<ImageSource>) -> Self {
        self.revealed_image = source;
        self
    }

    pub fn on_toggle(mut self, handler: impl Fn(&mut Window, &mut App) + 'static) -> Self {
        self.on_toggle = Some(Rc::new(handler));
        self
    }

    fn current_image(&self) -> Option<ImageSource> {
        if self.hidden {
            self.hidden_image.clone()
        } else {
            self.revealed_image.clone()
        }
    }
}

impl RenderOnce for VisibilityToggle {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        let image_size = TOGGLE_WIDTH_PX - TOGGLE_PADDING_PX * 2.0;
        let image = self.current_image();

        let mut node = div()
            .id(self.id.slot("press"))
            .flex_none()
            .flex()
            .items_center()
            .justify_center()
            .w(px(TOGGLE_WIDTH_PX))
            .h(px(INPUT_HEIGHT_PX))
            .p(px(TOGGLE_PADDING_PX))
            .cursor_pointer();
        if let Some(source) = image {
            node = node.child(img(source).size(px(image_size)));
        }

        bind_press_adapter(
            node,
            PressAdapter::new(self.id.clone()).on_activate(self.on_toggle.clone()),
        )
    }
}
