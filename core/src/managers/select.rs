use compact_str::CompactString;

use super::{constrain, constrain_using, impl_render, push_join, row_count};
use crate::error::{ArelError, Result};
use crate::nodes::{
    Cte, JoinKind, Lock, NamedWindow, Node, Operand, SelectBody, SelectCore, SelectStatement,
    SetOperation, SetOperator, SetQuantifier, TableAlias, UnaryOperator, With,
};

/// Builds a SELECT.
///
/// ```ignore
/// let users = Table::new("users");
/// let mut query = users.from();
/// query
///     .project([users.attr("id")])
///     .r#where(users.attr("id").eq(10));
/// assert_eq!(
///     query.to_sql()?,
///     r#"SELECT "users"."id" FROM "users" WHERE "users"."id" = 10"#
/// );
/// ```
///
/// Set operations (`union`, `intersect`, ...) return a new manager whose
/// body is the compound. Core clauses (projections, FROM, WHERE, joins,
/// grouping) cannot be added to a compound; doing so is remembered and
/// reported as [`ArelError::CompoundMutation`] by the next render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectManager {
    ast: SelectStatement,
    error: Option<ArelError>,
}

impl SelectManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The single core, or `None` (and a recorded error) for a compound.
    fn core_for(&mut self, clause: &'static str) -> Option<&mut SelectCore> {
        match &mut self.ast.body {
            SelectBody::Core(core) => Some(core.as_mut()),
            SelectBody::Compound(_) => {
                self.error
                    .get_or_insert(ArelError::CompoundMutation { clause });
                None
            }
        }
    }

    fn check(&self) -> Result<()> {
        match &self.error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    //--------------------------------------------------------------------------
    // Core clauses
    //--------------------------------------------------------------------------

    /// Sets the FROM relation. A [`Join`](crate::nodes::Join) node is
    /// appended instead.
    pub fn from(&mut self, relation: impl Into<Node>) -> &mut Self {
        if let Some(core) = self.core_for("FROM") {
            core.source.push(relation.into());
        }
        self
    }

    pub fn project<I>(&mut self, projections: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        if let Some(core) = self.core_for("projections") {
            core.projections
                .extend(projections.into_iter().map(Into::into));
        }
        self
    }

    /// Adds a predicate; all predicates are ANDed.
    pub fn r#where(&mut self, predicate: impl Into<Node>) -> &mut Self {
        if let Some(core) = self.core_for("WHERE") {
            core.wheres.push(predicate.into());
        }
        self
    }

    /// `INNER JOIN relation`; raw SQL is appended verbatim.
    pub fn join(&mut self, relation: impl Into<Node>) -> &mut Self {
        self.join_with(relation, JoinKind::Inner)
    }

    /// `LEFT OUTER JOIN relation`
    pub fn outer_join(&mut self, relation: impl Into<Node>) -> &mut Self {
        self.join_with(relation, JoinKind::LeftOuter)
    }

    pub fn join_with(&mut self, relation: impl Into<Node>, kind: JoinKind) -> &mut Self {
        if let Some(core) = self.core_for("JOIN") {
            push_join(&mut core.source, relation.into(), kind);
        }
        self
    }

    /// A hand-written join fragment, e.g. `"INNER JOIN posts USING (id)"`.
    pub fn join_raw(&mut self, sql: impl Into<CompactString>) -> &mut Self {
        self.join_with(Node::SqlLiteral(sql.into()), JoinKind::String)
    }

    /// Constrains the most recent join with `ON predicate`.
    pub fn on(&mut self, predicate: impl Into<Node>) -> Result<&mut Self> {
        match &mut self.ast.body {
            SelectBody::Core(core) => constrain(&mut core.source, predicate.into())?,
            SelectBody::Compound(_) => return Err(ArelError::CompoundMutation { clause: "ON" }),
        }
        Ok(self)
    }

    /// Constrains the most recent join with `USING (columns)`.
    pub fn using<I>(&mut self, columns: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<CompactString>,
    {
        let columns = columns.into_iter().map(Into::into).collect();
        match &mut self.ast.body {
            SelectBody::Core(core) => constrain_using(&mut core.source, columns)?,
            SelectBody::Compound(_) => {
                return Err(ArelError::CompoundMutation { clause: "USING" });
            }
        }
        Ok(self)
    }

    pub fn group<I>(&mut self, groups: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        if let Some(core) = self.core_for("GROUP BY") {
            core.groups.extend(groups.into_iter().map(Into::into));
        }
        self
    }

    pub fn having(&mut self, predicate: impl Into<Node>) -> &mut Self {
        if let Some(core) = self.core_for("HAVING") {
            core.havings.push(predicate.into());
        }
        self
    }

    pub fn distinct(&mut self) -> &mut Self {
        if let Some(core) = self.core_for("DISTINCT") {
            core.set_quantifier = Some(SetQuantifier::Distinct);
        }
        self
    }

    /// PostgreSQL's `DISTINCT ON (exprs)`.
    pub fn distinct_on<I>(&mut self, exprs: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        if let Some(core) = self.core_for("DISTINCT ON") {
            core.set_quantifier = Some(SetQuantifier::DistinctOn(
                exprs.into_iter().map(Into::into).collect(),
            ));
        }
        self
    }

    /// Declares a window in the `WINDOW` clause; reference it with
    /// `over_named` or `over(&window)`.
    pub fn window(&mut self, window: NamedWindow) -> &mut Self {
        if let Some(core) = self.core_for("WINDOW") {
            core.windows.push(window);
        }
        self
    }

    /// Appends a `/* comment */`.
    pub fn comment(&mut self, text: impl Into<CompactString>) -> &mut Self {
        if let Some(core) = self.core_for("comment") {
            core.comment.push(text.into());
        }
        self
    }

    /// Sets the `/*+ hints */` block after `SELECT`.
    pub fn optimizer_hints<I>(&mut self, hints: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<CompactString>,
    {
        if let Some(core) = self.core_for("optimizer hints") {
            core.optimizer_hints
                .extend(hints.into_iter().map(Into::into));
        }
        self
    }

    //--------------------------------------------------------------------------
    // Statement clauses (valid on compounds too)
    //--------------------------------------------------------------------------

    pub fn order<I>(&mut self, orders: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.ast.orders.extend(orders.into_iter().map(Into::into));
        self
    }

    /// `LIMIT n`
    pub fn take(&mut self, limit: u64) -> &mut Self {
        self.ast.limit = Some(row_count(limit));
        self
    }

    /// `OFFSET n`
    pub fn skip(&mut self, offset: u64) -> &mut Self {
        self.ast.offset = Some(row_count(offset));
        self
    }

    /// `FOR UPDATE`
    pub fn lock(&mut self) -> &mut Self {
        self.ast.lock = Some(Lock::ForUpdate);
        self
    }

    /// A hand-written locking clause such as `FOR SHARE SKIP LOCKED`.
    pub fn lock_with(&mut self, clause: impl Into<CompactString>) -> &mut Self {
        self.ast.lock = Some(Lock::Raw(clause.into()));
        self
    }

    pub fn with<I>(&mut self, ctes: I) -> &mut Self
    where
        I: IntoIterator<Item = Cte>,
    {
        self.push_ctes(false, ctes);
        self
    }

    pub fn with_recursive<I>(&mut self, ctes: I) -> &mut Self
    where
        I: IntoIterator<Item = Cte>,
    {
        self.push_ctes(true, ctes);
        self
    }

    fn push_ctes(&mut self, recursive: bool, ctes: impl IntoIterator<Item = Cte>) {
        let with = self.ast.with.get_or_insert(With {
            recursive,
            ctes: Vec::new(),
        });
        with.recursive |= recursive;
        with.ctes.extend(ctes);
    }

    //--------------------------------------------------------------------------
    // Derived nodes
    //--------------------------------------------------------------------------

    /// The statement as a named subquery: `(SELECT ...) "name"`.
    pub fn alias(&self, name: impl Into<CompactString>) -> TableAlias {
        TableAlias {
            relation: Box::new(self.ast.clone().into()),
            name: name.into(),
        }
    }

    /// `EXISTS (SELECT ...)`
    pub fn exists(&self) -> Node {
        crate::helpers::exists(self.ast.clone())
    }

    /// `LATERAL (SELECT ...)`, optionally aliased.
    pub fn lateral(&self, name: Option<&str>) -> Node {
        match name {
            Some(name) => Node::unary(UnaryOperator::Lateral, self.alias(name)),
            None => Node::unary(UnaryOperator::Lateral, self.ast.clone()),
        }
    }

    //--------------------------------------------------------------------------
    // Set operations
    //--------------------------------------------------------------------------

    fn compound(&self, op: SetOperator, other: &SelectManager) -> SelectManager {
        SelectManager {
            ast: SelectStatement {
                body: SelectBody::Compound(SetOperation {
                    op,
                    left: Box::new(self.ast.clone()),
                    right: Box::new(other.ast.clone()),
                }),
                ..SelectStatement::default()
            },
            error: self.error.clone().or_else(|| other.error.clone()),
        }
    }

    pub fn union(&self, other: &SelectManager) -> SelectManager {
        self.compound(SetOperator::Union, other)
    }

    pub fn union_all(&self, other: &SelectManager) -> SelectManager {
        self.compound(SetOperator::UnionAll, other)
    }

    pub fn intersect(&self, other: &SelectManager) -> SelectManager {
        self.compound(SetOperator::Intersect, other)
    }

    pub fn except(&self, other: &SelectManager) -> SelectManager {
        self.compound(SetOperator::Except, other)
    }

    //--------------------------------------------------------------------------
    // Accessors
    //--------------------------------------------------------------------------

    pub fn ast(&self) -> &SelectStatement {
        &self.ast
    }

    pub fn into_ast(self) -> SelectStatement {
        self.ast
    }

    /// The WHERE predicates of the core; empty for a compound.
    pub fn constraints(&self) -> &[Node] {
        self.ast
            .core()
            .map(|core| core.wheres.as_slice())
            .unwrap_or_default()
    }

    /// The projections of the core; empty for a compound.
    pub fn projections(&self) -> &[Node] {
        self.ast
            .core()
            .map(|core| core.projections.as_slice())
            .unwrap_or_default()
    }
}

impl_render!(SelectManager, visit_select_statement);

impl From<SelectManager> for SelectStatement {
    fn from(manager: SelectManager) -> Self {
        manager.ast
    }
}

impl From<&SelectManager> for SelectStatement {
    fn from(manager: &SelectManager) -> Self {
        manager.ast.clone()
    }
}

impl From<SelectManager> for Node {
    fn from(manager: SelectManager) -> Self {
        manager.ast.into()
    }
}

impl From<&SelectManager> for Node {
    fn from(manager: &SelectManager) -> Self {
        manager.ast.clone().into()
    }
}

impl From<&SelectManager> for Operand {
    fn from(manager: &SelectManager) -> Self {
        Operand::Node(manager.into())
    }
}

impl From<SelectManager> for Operand {
    fn from(manager: SelectManager) -> Self {
        Operand::Node(manager.into())
    }
}
