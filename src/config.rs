/// How rendered JSON values are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStyle {
    /// One value per line, no insignificant whitespace.
    #[default]
    Compact,
    /// Indented, multi-line output.
    Pretty,
}

/// Options for the JSON boundary of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JsonConfig {
    /// Treat every `'` in input JSON text as `"` before parsing.
    ///
    /// This makes hand-written documents like `{'a': 'b'}` easier to type.
    /// Note that it is a plain substitution: apostrophes inside string
    /// values are replaced as well.
    ///
    /// Defaults to `false`.
    pub single_quotes: bool,

    /// Defaults to [`OutputStyle::Compact`].
    pub output: OutputStyle,
}
