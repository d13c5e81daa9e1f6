use arel::error::ArelError;
use arel::prelude::*;

fn sample() -> SelectManager {
    let users = Table::new("users");
    let mut query = users.project([users.attr("id")]);
    query
        .r#where(users.attr("active").eq(true))
        .r#where(users.attr("name").eq("it's"));
    query
}

#[test]
fn test_identifier_and_literal_quoting_per_dialect() {
    let query = sample();
    assert_eq!(
        query.to_sql_in(Dialect::Generic).unwrap(),
        r#"SELECT "users"."id" FROM "users" WHERE "users"."active" = TRUE AND "users"."name" = 'it''s'"#
    );
    assert_eq!(
        query.to_sql_in(Dialect::PostgreSQL).unwrap(),
        r#"SELECT "users"."id" FROM "users" WHERE "users"."active" = TRUE AND "users"."name" = 'it''s'"#
    );
    assert_eq!(
        query.to_sql_in(Dialect::MySQL).unwrap(),
        "SELECT `users`.`id` FROM `users` WHERE `users`.`active` = TRUE AND `users`.`name` = 'it''s'"
    );
    assert_eq!(
        query.to_sql_in(Dialect::SQLite).unwrap(),
        r#"SELECT "users"."id" FROM "users" WHERE "users"."active" = 1 AND "users"."name" = 'it''s'"#
    );
}

#[test]
fn test_visitor_lookup() {
    for dialect in Dialect::ALL {
        assert_eq!(dialect.visitor().dialect(), dialect);
        assert_eq!(
            sample().to_sql_with(dialect.visitor()).unwrap(),
            sample().to_sql_in(dialect).unwrap()
        );
    }
}

#[test]
fn test_case_insensitive_like() {
    let name = Table::new("users").attr("name");
    let node = name.matches("a%");
    assert_eq!(node.to_sql().unwrap(), r#""users"."name" LIKE 'a%'"#);
    assert_eq!(
        node.to_sql_in(Dialect::PostgreSQL).unwrap(),
        r#""users"."name" ILIKE 'a%'"#
    );
    assert_eq!(
        name.does_not_match("a%").to_sql_in(Dialect::PostgreSQL).unwrap(),
        r#""users"."name" NOT ILIKE 'a%'"#
    );
    assert_eq!(
        name.matches_with("a%", None, true)
            .to_sql_in(Dialect::PostgreSQL)
            .unwrap(),
        r#""users"."name" LIKE 'a%'"#
    );
}

#[test]
fn test_regular_expressions() {
    let name = Table::new("users").attr("name");
    assert_eq!(
        name.matches_regexp("^a").to_sql_in(Dialect::PostgreSQL).unwrap(),
        r#""users"."name" ~ '^a'"#
    );
    assert_eq!(
        name.matches_regexp_with("^a", false)
            .to_sql_in(Dialect::PostgreSQL)
            .unwrap(),
        r#""users"."name" ~* '^a'"#
    );
    assert_eq!(
        name.does_not_match_regexp("^a")
            .to_sql_in(Dialect::PostgreSQL)
            .unwrap(),
        r#""users"."name" !~ '^a'"#
    );
    assert_eq!(
        name.matches_regexp("^a").to_sql_in(Dialect::SQLite).unwrap(),
        r#""users"."name" REGEXP '^a'"#
    );
    assert_eq!(
        name.matches_regexp("^a").to_sql().unwrap_err(),
        ArelError::Unsupported {
            dialect: Dialect::Generic,
            feature: "regular expression match"
        }
    );
}

#[test]
fn test_distinct_on_is_postgres_only() {
    let users = Table::new("users");
    let mut query = users.project([users.attr("email"), users.attr("id")]);
    query.distinct_on([users.attr("email")]);

    assert_eq!(
        query.to_sql_in(Dialect::PostgreSQL).unwrap(),
        r#"SELECT DISTINCT ON ("users"."email") "users"."email", "users"."id" FROM "users""#
    );
    assert_eq!(
        query.to_sql_in(Dialect::MySQL).unwrap_err(),
        ArelError::Unsupported {
            dialect: Dialect::MySQL,
            feature: "DISTINCT ON"
        }
    );
}

#[test]
fn test_null_safe_comparison() {
    let a = Table::new("users").attr("a");
    let node = a.is_not_distinct_from(1);
    assert_eq!(
        node.to_sql().unwrap(),
        r#""users"."a" IS NOT DISTINCT FROM 1"#
    );
    assert_eq!(node.to_sql_in(Dialect::MySQL).unwrap(), "`users`.`a` <=> 1");
    assert_eq!(node.to_sql_in(Dialect::SQLite).unwrap(), r#""users"."a" IS 1"#);
}

#[test]
fn test_string_concatenation() {
    let users = Table::new("users");
    let full = users.attr("first").concat(users.attr("last"));
    assert_eq!(
        full.to_sql().unwrap(),
        r#""users"."first" || "users"."last""#
    );
    assert_eq!(
        full.to_sql_in(Dialect::MySQL).unwrap(),
        "CONCAT(`users`.`first`, `users`.`last`)"
    );
}

#[test]
fn test_offset_without_limit() {
    let users = Table::new("users");
    let query = users.skip(5);
    assert_eq!(query.to_sql().unwrap(), r#"SELECT * FROM "users" OFFSET 5"#);
    assert_eq!(
        query.to_sql_in(Dialect::SQLite).unwrap(),
        r#"SELECT * FROM "users" LIMIT -1 OFFSET 5"#
    );
    assert_eq!(
        query.to_sql_in(Dialect::MySQL).unwrap(),
        "SELECT * FROM `users` LIMIT 18446744073709551615 OFFSET 5"
    );
}

#[test]
fn test_sqlite_ignores_locks() {
    let users = Table::new("users");
    let mut query = users.from();
    query.lock();
    assert_eq!(
        query.to_sql_in(Dialect::SQLite).unwrap(),
        r#"SELECT * FROM "users""#
    );
    assert_eq!(
        query.to_sql_in(Dialect::PostgreSQL).unwrap(),
        r#"SELECT * FROM "users" FOR UPDATE"#
    );
}

#[test]
fn test_bitwise_xor() {
    let flags = Table::new("users").attr("flags");
    assert_eq!(
        flags.bitwise_xor(4).to_sql().unwrap(),
        r#"("users"."flags" ^ 4)"#
    );
    assert_eq!(
        flags.bitwise_xor(4).to_sql_in(Dialect::PostgreSQL).unwrap(),
        r#"("users"."flags" # 4)"#
    );
}

#[test]
fn test_mysql_escapes_backslashes() {
    let path = Table::new("files").attr("path");
    assert_eq!(
        path.eq(r"C:\tmp").to_sql_in(Dialect::MySQL).unwrap(),
        r"`files`.`path` = 'C:\\tmp'"
    );
    assert_eq!(
        path.eq(r"C:\tmp").to_sql().unwrap(),
        r#""files"."path" = 'C:\tmp'"#
    );
}
