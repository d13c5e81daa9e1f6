//! Unified SQL dialect enum
//!
//! A single source of truth for dialect identification. The query engine
//! picks its visitor, its quoting rules and its default placeholder style
//! from this value; nothing is read from the environment.

use crate::PlaceholderStyle;

/// SQL dialect for database-specific rendering
///
/// Each dialect has different identifier quoting, literal spelling,
/// placeholder syntax and a handful of syntax differences (`ILIKE`,
/// `<=>`, `LIMIT -1`, ...).
///
/// # Examples
///
/// ```
/// use arel_types::Dialect;
///
/// let dialect = Dialect::PostgreSQL;
/// assert!(dialect.uses_numbered_placeholders());
///
/// let sqlite = Dialect::SQLite;
/// assert!(!sqlite.uses_numbered_placeholders());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Dialect {
    /// Dialect-neutral SQL - double-quoted identifiers, `?` placeholders
    #[default]
    Generic,

    /// PostgreSQL - uses `$1, $2, ...` numbered placeholders
    PostgreSQL,

    /// MySQL - backtick identifiers, `?` positional placeholders
    MySQL,

    /// SQLite - uses `?` positional placeholders
    SQLite,
}

impl Dialect {
    /// Every supported dialect, in declaration order.
    pub const ALL: [Dialect; 4] = [
        Dialect::Generic,
        Dialect::PostgreSQL,
        Dialect::MySQL,
        Dialect::SQLite,
    ];

    /// Returns `true` if this dialect uses numbered placeholders (`$1, $2, ...`)
    ///
    /// Currently only PostgreSQL uses numbered placeholders.
    #[inline]
    #[must_use]
    pub const fn uses_numbered_placeholders(&self) -> bool {
        matches!(self, Dialect::PostgreSQL)
    }

    /// The placeholder style used when compiling parameterized SQL.
    #[inline]
    #[must_use]
    pub const fn placeholder_style(&self) -> PlaceholderStyle {
        if self.uses_numbered_placeholders() {
            PlaceholderStyle::Numbered
        } else {
            PlaceholderStyle::Positional
        }
    }

    /// Parse a dialect from a string (case-insensitive)
    ///
    /// Supports various common aliases:
    /// - Generic: `"generic"`, `"ansi"`, `"sql"`
    /// - PostgreSQL: `"postgresql"`, `"postgres"`, `"pg"`
    /// - MySQL: `"mysql"`, `"mariadb"`
    /// - SQLite: `"sqlite"`, `"sqlite3"`
    ///
    /// # Examples
    ///
    /// ```
    /// use arel_types::Dialect;
    ///
    /// assert_eq!(Dialect::parse("sqlite"), Some(Dialect::SQLite));
    /// assert_eq!(Dialect::parse("postgres"), Some(Dialect::PostgreSQL));
    /// assert_eq!(Dialect::parse("pg"), Some(Dialect::PostgreSQL));
    /// assert_eq!(Dialect::parse("unknown"), None);
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("generic")
            || s.eq_ignore_ascii_case("ansi")
            || s.eq_ignore_ascii_case("sql")
        {
            Some(Dialect::Generic)
        } else if s.eq_ignore_ascii_case("postgresql")
            || s.eq_ignore_ascii_case("postgres")
            || s.eq_ignore_ascii_case("pg")
        {
            Some(Dialect::PostgreSQL)
        } else if s.eq_ignore_ascii_case("mysql") || s.eq_ignore_ascii_case("mariadb") {
            Some(Dialect::MySQL)
        } else if s.eq_ignore_ascii_case("sqlite") || s.eq_ignore_ascii_case("sqlite3") {
            Some(Dialect::SQLite)
        } else {
            None
        }
    }

    /// Get the dialect name as a lowercase string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Dialect::Generic => "generic",
            Dialect::PostgreSQL => "postgresql",
            Dialect::MySQL => "mysql",
            Dialect::SQLite => "sqlite",
        }
    }
}

impl core::fmt::Display for Dialect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Dialect {
    type Err = DialectParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::parse(s).ok_or(DialectParseError)
    }
}

/// Error returned when parsing an unknown dialect string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectParseError;

impl core::fmt::Display for DialectParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("unknown dialect")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DialectParseError {}
