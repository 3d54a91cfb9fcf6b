//! The five schema-independent engine options.

use std::fmt;
use std::str::FromStr;

/// Engine option ids.
pub const ASCII_MODE: &str = "ascii_mode";
pub const FULL_SHAPE: &str = "full_shape";
pub const EXTENDED_CHARSET: &str = "extended_charset";
pub const ASCII_PUNCT: &str = "ascii_punct";
pub const EMOJI_SUGGESTION: &str = "emoji_suggestion";

/// A named boolean engine option, orthogonal to schema and variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicOption {
    /// English (ASCII) input instead of the schema's language
    AsciiMode,
    /// Full-width character shape
    FullShape,
    /// Extended CJK character set
    ExtendedCharset,
    /// ASCII punctuation instead of full-width punctuation
    AsciiPunct,
    /// Emoji candidates
    EmojiSuggestion,
}

impl BasicOption {
    /// Every option in iteration order. Protocols that walk the options
    /// (schema switch, inbound sync) use this order.
    pub const ALL: [BasicOption; 5] = [
        BasicOption::AsciiMode,
        BasicOption::FullShape,
        BasicOption::ExtendedCharset,
        BasicOption::AsciiPunct,
        BasicOption::EmojiSuggestion,
    ];

    /// Engine option id.
    pub fn id(self) -> &'static str {
        match self {
            BasicOption::AsciiMode => ASCII_MODE,
            BasicOption::FullShape => FULL_SHAPE,
            BasicOption::ExtendedCharset => EXTENDED_CHARSET,
            BasicOption::AsciiPunct => ASCII_PUNCT,
            BasicOption::EmojiSuggestion => EMOJI_SUGGESTION,
        }
    }

    /// Value of the option when a session starts.
    pub fn default_value(self) -> bool {
        matches!(self, BasicOption::EmojiSuggestion)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Look an option up by its engine id.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.id() == id)
    }
}

impl fmt::Display for BasicOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for BasicOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| format!("unknown option: {}", s))
    }
}
