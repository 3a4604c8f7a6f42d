use gpui::{Hsla, Refineable, StyleRefinement, Styled, px, rgb};

/// Visual record of the label at rest in one phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelEndpoint {
    pub font_size: f32,
    pub top: f32,
}

pub const CLEAN: LabelEndpoint = LabelEndpoint {
    font_size: 20.0,
    top: 7.0,
};

pub const DIRTY: LabelEndpoint = LabelEndpoint {
    font_size: 12.0,
    top: -17.0,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LabelPhase {
    /// Large, inline, placeholder-like.
    Clean,
    /// Small, raised above the field.
    Dirty,
}

impl LabelPhase {
    pub fn from_dirty(dirty: bool) -> Self {
        if dirty { Self::Dirty } else { Self::Clean }
    }

    pub fn is_dirty(self) -> bool {
        self == Self::Dirty
    }

    pub fn endpoint(self) -> LabelEndpoint {
        match self {
            Self::Clean => CLEAN,
            Self::Dirty => DIRTY,
        }
    }
}

pub const LABEL_MARGIN_TOP_PX: f32 = 21.0;
pub const INPUT_HEIGHT_PX: f32 = 40.0;
pub const INPUT_FONT_SIZE_PX: f32 = 20.0;
pub const INPUT_MARGIN_TOP_PX: f32 = 20.0;
pub const INPUT_RADIUS_PX: f32 = 4.0;
pub const INPUT_LINE_HEIGHT_PX: f32 = 24.0;
pub const TOGGLE_WIDTH_PX: f32 = 35.0;
pub const TOGGLE_PADDING_PX: f32 = 5.0;

pub fn label_color() -> Hsla {
    rgb(0xaaaaaa).into()
}

pub fn input_border_color() -> Hsla {
    rgb(0x808080).into()
}

pub fn input_text_color() -> Hsla {
    rgb(0x000000).into()
}

/// Base look of the three styled parts plus whatever the caller layered on top.
#[derive(Clone, Debug, Default)]
pub struct FieldStyles {
    pub container: StyleRefinement,
    pub input: StyleRefinement,
    pub label: StyleRefinement,
}

impl FieldStyles {
    pub fn base() -> Self {
        Self {
            container: StyleRefinement::default().relative(),
            input: StyleRefinement::default()
                .flex_grow()
                .h(px(INPUT_HEIGHT_PX))
                .border_1()
                .border_color(input_border_color())
                .rounded(px(INPUT_RADIUS_PX))
                .text_size(px(INPUT_FONT_SIZE_PX))
                .text_color(input_text_color())
                .pl(px(0.0))
                .mt(px(INPUT_MARGIN_TOP_PX)),
            label: StyleRefinement::default()
                .absolute()
                .mt(px(LABEL_MARGIN_TOP_PX))
                .pl(px(0.0))
                .text_color(label_color()),
        }
    }

    /// Caller styles extend the base; fields they leave unset keep the base value.
    pub fn compose(
        container: &StyleRefinement,
        input: &StyleRefinement,
        label: &StyleRefinement,
    ) -> Self {
        let mut styles = Self::base();
        styles.container.refine(container);
        styles.input.refine(input);
        styles.label.refine(label);
        styles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_match_the_two_label_phases() {
        assert_eq!(LabelPhase::Clean.endpoint(), CLEAN);
        assert_eq!(LabelPhase::Dirty.endpoint(), DIRTY);
        assert_eq!(CLEAN.font_size, 20.0);
        assert_eq!(CLEAN.top, 7.0);
        assert_eq!(DIRTY.font_size, 12.0);
        assert_eq!(DIRTY.top, -17.0);
    }

    #[test]
    fn phase_round_trips_through_dirty_flag() {
        assert_eq!(LabelPhase::from_dirty(true), LabelPhase::Dirty);
        assert_eq!(LabelPhase::from_dirty(false), LabelPhase::Clean);
        assert!(LabelPhase::Dirty.is_dirty());
        assert!(!LabelPhase::Clean.is_dirty());
    }

    #[test]
    fn caller_input_style_extends_instead_of_replacing() {
        let caller = StyleRefinement::default().bg(rgb(0xffeecc));
        let styles = FieldStyles::compose(
            &StyleRefinement::default(),
            &caller,
            &StyleRefinement::default(),
        );

        assert!(FieldStyles::base().input.background.is_none());
        assert!(styles.input.background.is_some());
        assert!(styles.input.size.height.is_some());
        assert_eq!(styles.input.border_color, Some(input_border_color()));
    }

    #[test]
    fn caller_border_color_wins_over_base() {
        let override_color: Hsla = rgb(0x336699).into();
        let styles = FieldStyles::compose(
            &StyleRefinement::default().border_color(override_color),
            &StyleRefinement::default().border_color(override_color),
            &StyleRefinement::default(),
        );
        assert_eq!(styles.input.border_color, Some(override_color));
        assert_eq!(styles.container.border_color, Some(override_color));
        assert!(styles.container.position.is_some());
        assert!(styles.label.position.is_some());
    }
}
