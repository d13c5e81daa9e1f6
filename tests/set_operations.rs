use arel::error::ArelError;
use arel::prelude::*;

const A: &str = r#"SELECT "users"."id" FROM "users""#;
const B: &str = r#"SELECT "posts"."user_id" FROM "posts""#;
const C: &str = r#"SELECT "comments"."user_id" FROM "comments""#;

fn operands() -> (SelectManager, SelectManager, SelectManager) {
    let users = Table::new("users");
    let posts = Table::new("posts");
    let comments = Table::new("comments");
    (
        users.project([users.attr("id")]),
        posts.project([posts.attr("user_id")]),
        comments.project([comments.attr("user_id")]),
    )
}

#[test]
fn test_each_operator() {
    let (a, b, _) = operands();
    assert_eq!(a.union(&b).to_sql().unwrap(), format!("({A}) UNION ({B})"));
    assert_eq!(a.union_all(&b).to_sql().unwrap(), format!("({A}) UNION ALL ({B})"));
    assert_eq!(a.intersect(&b).to_sql().unwrap(), format!("({A}) INTERSECT ({B})"));
    assert_eq!(a.except(&b).to_sql().unwrap(), format!("({A}) EXCEPT ({B})"));
}

#[test]
fn test_same_operator_chains_are_flattened() {
    let (a, b, c) = operands();
    let expected = format!("({A}) UNION ({B}) UNION ({C})");
    assert_eq!(a.union(&b).union(&c).to_sql().unwrap(), expected);
    assert_eq!(a.union(&b.union(&c)).to_sql().unwrap(), expected);
}

#[test]
fn test_except_only_flattens_on_the_left() {
    let (a, b, c) = operands();
    assert_eq!(
        a.except(&b).except(&c).to_sql().unwrap(),
        format!("({A}) EXCEPT ({B}) EXCEPT ({C})")
    );
    assert_eq!(
        a.except(&b.except(&c)).to_sql().unwrap(),
        format!("({A}) EXCEPT (({B}) EXCEPT ({C}))")
    );
}

#[test]
fn test_mixed_operators_are_parenthesized() {
    let (a, b, c) = operands();
    assert_eq!(
        a.union(&b).intersect(&c).to_sql().unwrap(),
        format!("(({A}) UNION ({B})) INTERSECT ({C})")
    );
}

#[test]
fn test_order_and_limit_apply_to_the_whole_compound() {
    let (a, b, _) = operands();
    let users = Table::new("users");
    let mut union = a.union(&b);
    union.order([users.attr("id").desc()]).take(3);

    assert_eq!(
        union.to_sql().unwrap(),
        format!(r#"({A}) UNION ({B}) ORDER BY "users"."id" DESC LIMIT 3"#)
    );
}

#[test]
fn test_compound_as_subquery() {
    let (a, b, _) = operands();
    let ids = a.union(&b).alias("ids");

    let mut query = SelectManager::new();
    query.from(ids.clone()).project([ids.attr("id")]);

    assert_eq!(
        query.to_sql().unwrap(),
        format!(r#"SELECT "ids"."id" FROM (({A}) UNION ({B})) "ids""#)
    );
}

#[test]
fn test_core_clauses_on_a_compound_fail_at_render() {
    let (a, b, _) = operands();
    let users = Table::new("users");
    let mut union = a.union(&b);
    union.project([users.attr("name")]);

    assert_eq!(
        union.to_sql().unwrap_err(),
        ArelError::CompoundMutation {
            clause: "projections"
        }
    );
}

#[test]
fn test_sqlite_writes_bare_operands() {
    let (a, b, c) = operands();
    assert_eq!(
        a.union(&b).union_all(&c).to_sql_in(Dialect::SQLite).unwrap(),
        format!("{A} UNION {B} UNION ALL {C}")
    );
    assert_eq!(
        a.union(&b.union(&c)).to_sql_in(Dialect::SQLite).unwrap_err(),
        ArelError::Unsupported {
            dialect: Dialect::SQLite,
            feature: "nested compound select on the right of a set operation"
        }
    );

    let mut limited = a.clone();
    limited.take(1);
    assert!(matches!(
        limited.union(&b).to_sql_in(Dialect::SQLite),
        Err(ArelError::Unsupported { .. })
    ));
}
