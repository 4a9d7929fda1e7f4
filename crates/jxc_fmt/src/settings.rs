//! Serializer settings and presets.

/// Which quote character strings are written with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StringQuoteMode {
    #[default]
    Double,
    Single,
}

impl StringQuoteMode {
    pub fn quote_char(self) -> char {
        match self {
            StringQuoteMode::Double => '"',
            StringQuoteMode::Single => '\'',
        }
    }
}

/// Finite float rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FloatMode {
    /// Shortest form that round-trips, switching to scientific notation
    /// for very large/small magnitudes.
    #[default]
    Shortest,
    /// Fixed decimal places per `float_precision`.
    Fixed {
        /// Strip trailing zeros (one digit always stays after the point).
        trim_trailing_zeros: bool,
    },
}

/// How a naive datetime (no offset) serializes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DateTimeMode {
    /// Write naive datetimes with a trailing `Z`.
    #[default]
    ForceUtc,
    /// Write naive datetimes with no timezone qualifier.
    Unqualified,
}

/// Output shaping for [`Serializer`](crate::Serializer).
#[derive(Clone, Debug)]
pub struct SerializerSettings {
    /// Newline-and-indent layout for arrays and objects.
    pub pretty_print: bool,
    /// One level of indentation (pretty mode only).
    pub indent: String,
    /// Written between peer values (a newline plus indentation follows in
    /// pretty mode).
    pub value_separator: String,
    /// Written between an object key and its value.
    pub key_separator: String,
    pub default_quote: StringQuoteMode,
    /// Significant fractional digits for [`FloatMode::Fixed`]; also caps
    /// [`FloatMode::Shortest`] output.
    pub float_precision: u32,
    pub float_mode: FloatMode,
    pub datetime_mode: DateTimeMode,
    /// Permit raw-heredoc output for escape-heavy strings.
    pub allow_raw_strings: bool,
}

impl Default for SerializerSettings {
    fn default() -> Self {
        SerializerSettings::pretty()
    }
}

impl SerializerSettings {
    /// Multi-line output with four-space indentation.
    pub fn pretty() -> Self {
        SerializerSettings {
            pretty_print: true,
            indent: "    ".to_string(),
            value_separator: ",".to_string(),
            key_separator: ": ".to_string(),
            default_quote: StringQuoteMode::default(),
            float_precision: 16,
            float_mode: FloatMode::default(),
            datetime_mode: DateTimeMode::default(),
            allow_raw_strings: false,
        }
    }

    /// Single-line output with minimal separators.
    pub fn compact() -> Self {
        SerializerSettings {
            pretty_print: false,
            indent: String::new(),
            value_separator: ",".to_string(),
            key_separator: ":".to_string(),
            ..SerializerSettings::pretty()
        }
    }

    /// Replace the indent string (enables pretty printing).
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self.pretty_print = true;
        self
    }

    /// Replace both separators, JSON `dumps`-style: `(value, key)`.
    #[must_use]
    pub fn with_separators(mut self, value_separator: &str, key_separator: &str) -> Self {
        self.value_separator = value_separator.to_string();
        self.key_separator = key_separator.to_string();
        self
    }

    /// Replace the string quote character.
    #[must_use]
    pub fn with_quote(mut self, quote: StringQuoteMode) -> Self {
        self.default_quote = quote;
        self
    }
}
