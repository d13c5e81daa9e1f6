/// Various styles of SQL parameter placeholders.
///
/// The style only affects the text written in place of a bound value; the
/// order of bind values is the same for every style.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PlaceholderStyle {
    /// Anonymous positional placeholders (`?`)
    #[default]
    Positional,
    /// Numbered placeholders (`$1`, `$2`, ...)
    Numbered,
    /// Colon style placeholders (`:name`, or `:p1` for unnamed values)
    Colon,
    /// At-sign style placeholders (`@name`, or `@p1` for unnamed values)
    AtSign,
}
