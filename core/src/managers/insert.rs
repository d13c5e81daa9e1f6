use super::impl_render;
use crate::error::Result;
use crate::nodes::{Attribute, InsertSource, InsertStatement, Node, Operand, SelectStatement, Table};

/// Builds an INSERT.
///
/// ```ignore
/// let users = Table::new("users");
/// let mut insert = InsertManager::new();
/// insert.insert([(users.attr("name"), "alice"), (users.attr("email"), "a@x")]);
/// // INSERT INTO "users" ("name", "email") VALUES ('alice', 'a@x')
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertManager {
    ast: InsertStatement,
}

impl InsertManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn check(&self) -> Result<()> {
        Ok(())
    }

    /// Sets the target table.
    pub fn into_table(&mut self, table: &Table) -> &mut Self {
        self.ast.relation = Some(table.clone());
        self
    }

    /// Appends to the column list.
    pub fn columns<I>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = Attribute>,
    {
        self.ast.columns.extend(columns);
        self
    }

    /// Appends one row. Values are quoted against the column at the same
    /// position.
    pub fn values<I>(&mut self, row: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Operand>,
    {
        let row = self.quote_row(row);
        match &mut self.ast.source {
            Some(InsertSource::Values(rows)) => rows.push(row),
            source => *source = Some(InsertSource::Values(vec![row])),
        }
        self
    }

    /// Appends several rows.
    pub fn values_list<I, R>(&mut self, rows: I) -> &mut Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator,
        R::Item: Into<Operand>,
    {
        for row in rows {
            self.values(row);
        }
        self
    }

    /// Adds one row of `(column, value)` pairs, filling the column list and,
    /// if unset, the target table from the first column. No pairs leaves the
    /// statement as `DEFAULT VALUES`.
    pub fn insert<I, V>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = (Attribute, V)>,
        V: Into<Operand>,
    {
        let mut values = Vec::new();
        for (column, value) in pairs {
            if self.ast.relation.is_none() {
                self.ast.relation = Some(column.relation.clone());
            }
            let value: Operand = value.into();
            values.push(value.quoted_for(&Node::Attribute(column.clone())));
            self.ast.columns.push(column);
        }
        if !values.is_empty() {
            self.ast.source = Some(InsertSource::Values(vec![values]));
        }
        self
    }

    /// `INSERT INTO ... SELECT ...`
    pub fn select(&mut self, query: impl Into<SelectStatement>) -> &mut Self {
        self.ast.source = Some(InsertSource::Select(Box::new(query.into())));
        self
    }

    pub fn ast(&self) -> &InsertStatement {
        &self.ast
    }

    pub fn into_ast(self) -> InsertStatement {
        self.ast
    }

    fn quote_row<I>(&self, row: I) -> Vec<Node>
    where
        I: IntoIterator,
        I::Item: Into<Operand>,
    {
        row.into_iter()
            .enumerate()
            .map(|(i, value)| {
                let value: Operand = value.into();
                match self.ast.columns.get(i) {
                    Some(column) => value.quoted_for(&Node::Attribute(column.clone())),
                    None => value.into_node(),
                }
            })
            .collect()
    }
}

impl_render!(InsertManager, visit_insert_statement);

impl From<InsertManager> for Node {
    fn from(manager: InsertManager) -> Self {
        manager.ast.into()
    }
}
