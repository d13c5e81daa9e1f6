//! Output sinks the visitors render into.
//!
//! A visitor walks the same tree whichever collector it writes to; only leaf
//! values differ. [`SqlString`] quotes them inline, [`BindCollector`]
//! leaves a placeholder slot and records the value.

use compact_str::CompactString;
use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::error::{ArelError, Result};
use crate::placeholder::{PlaceholderStyle, write_placeholder};
use crate::value::Value;
use crate::visitors::Quoting;

/// A value (or a named slot still waiting for one) produced while rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bind {
    pub name: Option<CompactString>,
    pub value: Option<Value>,
}

impl Bind {
    /// An anonymous bind carrying `value`.
    pub fn value(value: Value) -> Self {
        Self {
            name: None,
            value: Some(value),
        }
    }

    fn unbound_error(&self) -> ArelError {
        ArelError::UnboundParameter(self.name.clone().unwrap_or_else(|| CompactString::const_new("?")))
    }
}

/// Append-only sink for rendered SQL.
pub trait Collector {
    fn push_str(&mut self, sql: &str);

    fn push_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.push_str(c.encode_utf8(&mut buf));
    }

    /// Emits a leaf value, inline or as a placeholder.
    fn add_bind(&mut self, bind: Bind, quoting: &dyn Quoting) -> Result<()>;
}

// =============================================================================
// SqlString
// =============================================================================

/// Renders values inline as quoted literals.
#[derive(Debug, Default, Clone)]
pub struct SqlString {
    sql: String,
}

impl SqlString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.sql
    }

    pub fn into_string(self) -> String {
        self.sql
    }
}

impl Collector for SqlString {
    #[inline]
    fn push_str(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    #[inline]
    fn push_char(&mut self, c: char) {
        self.sql.push(c);
    }

    fn add_bind(&mut self, bind: Bind, quoting: &dyn Quoting) -> Result<()> {
        match &bind.value {
            Some(value) => {
                quoting.quote_value(value, &mut self.sql);
                Ok(())
            }
            None => Err(bind.unbound_error()),
        }
    }
}

// =============================================================================
// BindCollector
// =============================================================================

/// Records placeholder positions and the ordered bind list.
///
/// Placeholders are spliced in by [`finish`](BindCollector::finish), so the
/// same walk serves every [`PlaceholderStyle`].
#[derive(Debug, Default, Clone)]
pub struct BindCollector {
    sql: String,
    slots: SmallVec<[usize; 8]>,
    binds: Vec<Bind>,
}

impl BindCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of binds recorded so far.
    pub fn len(&self) -> usize {
        self.binds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.binds.is_empty()
    }

    /// Splices placeholders into the recorded SQL.
    pub fn finish(self, style: PlaceholderStyle) -> CompiledQuery {
        let mut sql = String::with_capacity(self.sql.len() + self.slots.len() * 3);
        let mut last = 0;
        for (index, (&at, bind)) in self.slots.iter().zip(&self.binds).enumerate() {
            sql.push_str(&self.sql[last..at]);
            write_placeholder(style, index + 1, bind.name.as_deref(), &mut sql);
            last = at;
        }
        sql.push_str(&self.sql[last..]);
        CompiledQuery {
            sql,
            binds: self.binds,
            style,
        }
    }
}

impl Collector for BindCollector {
    #[inline]
    fn push_str(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    #[inline]
    fn push_char(&mut self, c: char) {
        self.sql.push(c);
    }

    fn add_bind(&mut self, bind: Bind, _quoting: &dyn Quoting) -> Result<()> {
        self.slots.push(self.sql.len());
        self.binds.push(bind);
        Ok(())
    }
}

// =============================================================================
// CompiledQuery
// =============================================================================

/// Parameterized SQL plus its binds, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    sql: String,
    binds: Vec<Bind>,
    style: PlaceholderStyle,
}

impl CompiledQuery {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn binds(&self) -> &[Bind] {
        &self.binds
    }

    pub fn style(&self) -> PlaceholderStyle {
        self.style
    }

    /// Sets the value of every bind named `name`.
    pub fn bind(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        let value = value.into();
        for bind in &mut self.binds {
            if bind.name.as_deref() == Some(name) {
                bind.value = Some(value.clone());
            }
        }
        self
    }

    /// Sets several named binds at once.
    pub fn bind_all<I, K, V>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<CompactString>,
        V: Into<Value>,
    {
        let values: HashMap<CompactString, Value> = pairs
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        for bind in &mut self.binds {
            if let Some(value) = bind.name.as_ref().and_then(|name| values.get(name)) {
                bind.value = Some(value.clone());
            }
        }
        self
    }

    /// Names of binds that still have no value.
    pub fn unbound(&self) -> impl Iterator<Item = &str> {
        self.binds
            .iter()
            .filter(|bind| bind.value.is_none())
            .map(|bind| bind.name.as_deref().unwrap_or("?"))
    }

    /// The bind values in placeholder order.
    pub fn values(&self) -> Result<Vec<Value>> {
        self.binds
            .iter()
            .map(|bind| bind.value.clone().ok_or_else(|| bind.unbound_error()))
            .collect()
    }

    /// Splits into SQL text and bind values.
    pub fn into_parts(self) -> Result<(String, Vec<Value>)> {
        let values = self.values()?;
        Ok((self.sql, values))
    }
}
