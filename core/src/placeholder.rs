use core::fmt::Write;

pub use arel_types::PlaceholderStyle;

/// Writes the placeholder for the `index`-th (1-based) bind.
///
/// - `Positional`: `?`
/// - `Numbered`: `$1`, `$2`, ...
/// - `Colon`: `:name`, or `:p1` for anonymous binds
/// - `AtSign`: `@name`, or `@p1` for anonymous binds
pub fn write_placeholder(style: PlaceholderStyle, index: usize, name: Option<&str>, out: &mut String) {
    // Writing into a String cannot fail.
    let _ = match (style, name) {
        (PlaceholderStyle::Positional, _) => {
            out.push('?');
            Ok(())
        }
        (PlaceholderStyle::Numbered, _) => write!(out, "${index}"),
        (PlaceholderStyle::Colon, Some(name)) => write!(out, ":{name}"),
        (PlaceholderStyle::Colon, None) => write!(out, ":p{index}"),
        (PlaceholderStyle::AtSign, Some(name)) => write!(out, "@{name}"),
        (PlaceholderStyle::AtSign, None) => write!(out, "@p{index}"),
    };
}
