//! Relations and column references.

use compact_str::CompactString;

use super::Node;

/// A named relation, optionally rendered with a table alias
/// (`"users" "u"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Table {
    pub name: CompactString,
    pub table_alias: Option<CompactString>,
}

impl Table {
    /// Creates a reference to the table `name`.
    pub fn new(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            table_alias: None,
        }
    }

    /// Creates a reference to `name` that renders as `"name" "alias"` and
    /// whose attributes are qualified by the alias.
    pub fn aliased(name: impl Into<CompactString>, alias: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            table_alias: Some(alias.into()),
        }
    }

    /// The name columns of this table are qualified with.
    #[inline]
    pub fn qualifier(&self) -> &str {
        self.table_alias.as_deref().unwrap_or(&self.name)
    }

    /// Column `name` of this table.
    pub fn attr(&self, name: impl Into<CompactString>) -> Attribute {
        Attribute {
            relation: self.clone(),
            name: name.into(),
        }
    }

    /// `"table".*`
    pub fn star(&self) -> Node {
        Node::Attribute(self.attr("*"))
    }

    /// Wraps the table in a [`TableAlias`] (`"users" "u"`).
    pub fn alias(&self, name: impl Into<CompactString>) -> TableAlias {
        TableAlias {
            relation: Box::new(Node::Table(self.clone())),
            name: name.into(),
        }
    }
}

/// A reference to one column of a relation.
///
/// Attributes are leaves: they never contain other nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    pub relation: Table,
    pub name: CompactString,
}

impl Attribute {
    /// The column rendered without its table qualifier, as used on the left
    /// of `SET` assignments and in `INSERT` column lists.
    pub fn unqualified(&self) -> Node {
        Node::UnqualifiedColumn(self.clone())
    }
}

/// Any relation (table or sub-select) renamed with `AS`-less alias syntax.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableAlias {
    pub relation: Box<Node>,
    pub name: CompactString,
}

impl TableAlias {
    /// Column `name` qualified by this alias.
    pub fn attr(&self, name: impl Into<CompactString>) -> Attribute {
        Attribute {
            relation: Table::new(self.name.clone()),
            name: name.into(),
        }
    }

    /// `"alias".*`
    pub fn star(&self) -> Node {
        Node::Attribute(self.attr("*"))
    }
}

impl From<Table> for Node {
    fn from(table: Table) -> Self {
        Node::Table(table)
    }
}

impl From<&Table> for Node {
    fn from(table: &Table) -> Self {
        Node::Table(table.clone())
    }
}

impl From<TableAlias> for Node {
    fn from(alias: TableAlias) -> Self {
        Node::TableAlias(alias)
    }
}

impl From<&TableAlias> for Node {
    fn from(alias: &TableAlias) -> Self {
        Node::TableAlias(alias.clone())
    }
}

impl From<Attribute> for Node {
    fn from(attribute: Attribute) -> Self {
        Node::Attribute(attribute)
    }
}

impl From<&Attribute> for Node {
    fn from(attribute: &Attribute) -> Self {
        Node::Attribute(attribute.clone())
    }
}
