use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoCapitalize {
    None,
    #[default]
    Sentences,
    Words,
    Characters,
}

impl AutoCapitalize {
    /// Capitalizes `inserted` given the text that precedes the insertion point.
    pub fn apply(self, preceding: &str, inserted: &str) -> String {
        match self {
            AutoCapitalize::None => inserted.to_string(),
            AutoCapitalize::Characters => inserted.to_uppercase(),
            AutoCapitalize::Words => {
                capitalize_after(preceding, inserted, |prev| prev.is_whitespace())
            }
            AutoCapitalize::Sentences => capitalize_sentences(preceding, inserted),
        }
    }
}

fn capitalize_after(preceding: &str, inserted: &str, boundary: impl Fn(char) -> bool) -> String {
    let mut previous = preceding.chars().last();
    let mut out = String::with_capacity(inserted.len());
    for ch in inserted.chars() {
        let at_boundary = previous.is_none_or(&boundary);
        if at_boundary && ch.is_alphabetic() {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        previous = Some(ch);
    }
    out
}

fn capitalize_sentences(preceding: &str, inserted: &str) -> String {
    let mut sentence_start = preceding
        .trim_end()
        .chars()
        .last()
        .is_none_or(|ch| matches!(ch, '.' | '!' | '?'));
    let mut out = String::with_capacity(inserted.len());
    for ch in inserted.chars() {
        if sentence_start && ch.is_alphabetic() {
            out.extend(ch.to_uppercase());
            sentence_start = false;
        } else {
            if matches!(ch, '.' | '!' | '?') {
                sentence_start = true;
            } else if !ch.is_whitespace() {
                sentence_start = false;
            }
            out.push(ch);
        }
    }
    out
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyboardType {
    #[default]
    Default,
    EmailAddress,
    Numeric,
    PhonePad,
    NumberPad,
    DecimalPad,
    Url,
}

impl KeyboardType {
    /// Whether `ch` may be typed into a field already holding `current`.
    pub fn accepts(self, ch: char, current: &str) -> bool {
        match self {
            KeyboardType::Default => true,
            KeyboardType::EmailAddress | KeyboardType::Url => !ch.is_whitespace(),
            KeyboardType::NumberPad => ch.is_ascii_digit(),
            KeyboardType::PhonePad => ch.is_ascii_digit() || matches!(ch, '+' | '*' | '#'),
            KeyboardType::Numeric => {
                ch.is_ascii_digit() || (ch == '-' && current.is_empty()) || decimal_point(ch, current)
            }
            KeyboardType::DecimalPad => ch.is_ascii_digit() || decimal_point(ch, current),
        }
    }

    pub fn filter(self, inserted: &str, current: &str) -> String {
        let mut accepted = String::with_capacity(inserted.len());
        for ch in inserted.chars() {
            let mut context = String::with_capacity(current.len() + accepted.len());
            context.push_str(current);
            context.push_str(&accepted);
            if self.accepts(ch, &context) {
                accepted.push(ch);
            }
        }
        accepted
    }
}

fn decimal_point(ch: char, current: &str) -> bool {
    ch == '.' && !current.contains('.')
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnKeyType {
    #[default]
    Default,
    Done,
    Go,
    Next,
    Search,
    Send,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClearButtonMode {
    #[default]
    Never,
    WhileEditing,
    UnlessEditing,
    Always,
}

impl ClearButtonMode {
    pub fn visible(self, focused: bool, has_text: bool) -> bool {
        has_text
            && match self {
                ClearButtonMode::Never => false,
                ClearButtonMode::WhileEditing => focused,
                ClearButtonMode::UnlessEditing => !focused,
                ClearButtonMode::Always => true,
            }
    }
}

/// Every text-entry option the field understands. Loading from data rejects keys
/// outside this set.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct TextInputOptions {
    pub value: Option<String>,
    pub placeholder: Option<String>,
    pub secure_text_entry: Option<bool>,
    pub password: bool,
    pub editable: bool,
    pub multiline: bool,
    pub number_of_lines: Option<u16>,
    pub auto_focus: bool,
    pub auto_capitalize: AutoCapitalize,
    pub auto_correct: bool,
    pub keyboard_type: KeyboardType,
    pub return_key_type: ReturnKeyType,
    pub spell_check: Option<bool>,
    pub clear_button_mode: ClearButtonMode,
    pub clear_text_on_focus: bool,
    pub select_text_on_focus: bool,
    pub enables_return_key_automatically: bool,
    pub caret_hidden: bool,
}

impl Default for TextInputOptions {
    fn default() -> Self {
        Self {
            value: None,
            placeholder: None,
            secure_text_entry: None,
            password: false,
            editable: true,
            multiline: false,
            number_of_lines: None,
            auto_focus: false,
            auto_capitalize: AutoCapitalize::default(),
            auto_correct: true,
            keyboard_type: KeyboardType::default(),
            return_key_type: ReturnKeyType::default(),
            spell_check: None,
            clear_button_mode: ClearButtonMode::default(),
            clear_text_on_focus: false,
            select_text_on_focus: false,
            enables_return_key_automatically: false,
            caret_hidden: false,
        }
    }
}

impl TextInputOptions {
    /// `secure_text_entry`, when given, overrides the legacy `password` flag.
    pub fn is_secret(&self) -> bool {
        self.secure_text_entry.unwrap_or(self.password)
    }

    /// Spell checking follows auto-correct unless set explicitly.
    pub fn spell_check_enabled(&self) -> bool {
        self.spell_check.unwrap_or(self.auto_correct)
    }

    pub fn visible_lines(&self) -> u16 {
        if self.multiline {
            self.number_of_lines.unwrap_or(1).max(1)
        } else {
            1
        }
    }
}
