use arel::core::predications;
use arel::prelude::*;

fn render(node: Node) -> String {
    node.to_sql().unwrap()
}

fn users() -> Table {
    Table::new("users")
}

#[test]
fn test_comparisons() {
    let age = users().attr("age");
    assert_eq!(render(age.eq(1)), r#""users"."age" = 1"#);
    assert_eq!(render(age.not_eq(1)), r#""users"."age" != 1"#);
    assert_eq!(render(age.gt(1)), r#""users"."age" > 1"#);
    assert_eq!(render(age.gteq(1)), r#""users"."age" >= 1"#);
    assert_eq!(render(age.lt(1)), r#""users"."age" < 1"#);
    assert_eq!(render(age.lteq(1)), r#""users"."age" <= 1"#);
}

#[test]
fn test_null_comparisons_use_is() {
    let name = users().attr("name");
    assert_eq!(render(name.eq(None::<&str>)), r#""users"."name" IS NULL"#);
    assert_eq!(render(name.not_eq(None::<&str>)), r#""users"."name" IS NOT NULL"#);
    assert_eq!(render(name.eq(Value::Null)), r#""users"."name" IS NULL"#);
}

#[test]
fn test_column_to_column() {
    let users = users();
    let posts = Table::new("posts");
    assert_eq!(
        render(posts.attr("user_id").eq(users.attr("id"))),
        r#""posts"."user_id" = "users"."id""#
    );
}

#[test]
fn test_string_literals_are_escaped() {
    assert_eq!(
        render(users().attr("name").eq("O'Brien")),
        r#""users"."name" = 'O''Brien'"#
    );
}

#[test]
fn test_any_and_all() {
    let id = users().attr("id");
    assert_eq!(
        render(id.eq_any([1, 2])),
        r#"("users"."id" = 1 OR "users"."id" = 2)"#
    );
    assert_eq!(
        render(id.eq_all([1, 2])),
        r#"("users"."id" = 1 AND "users"."id" = 2)"#
    );
    assert_eq!(
        render(id.not_eq_all([1, 2])),
        r#"("users"."id" != 1 AND "users"."id" != 2)"#
    );
    assert_eq!(render(id.eq_any(Vec::<i32>::new())), "1=0");
    assert_eq!(render(id.eq_all(Vec::<i32>::new())), "1=1");
}

#[test]
fn test_any_inside_where_keeps_its_parentheses() {
    let users = users();
    let mut query = users.from();
    query
        .r#where(users.attr("active").eq(true))
        .r#where(users.attr("name").matches_any(["a%", "b%"]));

    assert_eq!(
        query.to_sql().unwrap(),
        r#"SELECT * FROM "users" WHERE "users"."active" = TRUE AND ("users"."name" LIKE 'a%' OR "users"."name" LIKE 'b%')"#
    );
}

#[test]
fn test_membership() {
    let id = users().attr("id");
    assert_eq!(render(id.r#in([1, 2, 3])), r#""users"."id" IN (1, 2, 3)"#);
    assert_eq!(render(id.not_in([1, 2])), r#""users"."id" NOT IN (1, 2)"#);
    assert_eq!(render(id.r#in(Vec::<i32>::new())), "1=0");
    assert_eq!(render(id.not_in(Vec::<i32>::new())), "1=1");
    assert_eq!(
        render(id.not_in_all([vec![1], vec![2]])),
        r#"("users"."id" NOT IN (1) AND "users"."id" NOT IN (2))"#
    );
    assert_eq!(
        render(id.not_in_any([vec![1, 2], vec![3]])),
        r#"("users"."id" NOT IN (1, 2) OR "users"."id" NOT IN (3))"#
    );
    assert_eq!(
        render(id.in_any([vec![1], vec![2, 3]])),
        r#"("users"."id" IN (1) OR "users"."id" IN (2, 3))"#
    );
    assert_eq!(
        render(id.in_all([vec![1, 2], vec![2, 3]])),
        r#"("users"."id" IN (1, 2) AND "users"."id" IN (2, 3))"#
    );
}

#[test]
fn test_list_any_and_all_without_lists() {
    let id = users().attr("id");
    assert_eq!(render(id.not_in_any(Vec::<Vec<i32>>::new())), "1=0");
    assert_eq!(render(id.in_any(Vec::<Vec<i32>>::new())), "1=0");
    assert_eq!(render(id.not_in_all(Vec::<Vec<i32>>::new())), "1=1");
    assert_eq!(render(id.in_all(Vec::<Vec<i32>>::new())), "1=1");
    assert_eq!(render(id.not_eq_any(Vec::<i32>::new())), "1=0");
    assert_eq!(render(id.not_eq_all(Vec::<i32>::new())), "1=1");
}

#[test]
fn test_ranges() {
    let age = users().attr("age");
    assert_eq!(render(age.between(18..=65)), r#""users"."age" BETWEEN 18 AND 65"#);
    assert_eq!(
        render(age.between(18..65)),
        r#""users"."age" >= 18 AND "users"."age" < 65"#
    );
    assert_eq!(render(age.between(18..)), r#""users"."age" >= 18"#);
    assert_eq!(render(age.between(..=65)), r#""users"."age" <= 65"#);
    assert_eq!(render(age.between::<i32, _>(..)), "1=1");
    assert_eq!(
        render(age.not_between(18..=65)),
        r#"("users"."age" < 18 OR "users"."age" > 65)"#
    );
    assert_eq!(render(age.not_between::<i32, _>(..)), "1=0");
}

#[test]
fn test_pattern_matching() {
    let name = users().attr("name");
    assert_eq!(render(name.matches("a%")), r#""users"."name" LIKE 'a%'"#);
    assert_eq!(render(name.does_not_match("a%")), r#""users"."name" NOT LIKE 'a%'"#);
    assert_eq!(
        render(name.matches_with("a!%%", Some("!"), false)),
        r#""users"."name" LIKE 'a!%%' ESCAPE '!'"#
    );
}

#[test]
fn test_distinct_from() {
    let name = users().attr("name");
    assert_eq!(
        render(name.is_distinct_from("bob")),
        r#""users"."name" IS DISTINCT FROM 'bob'"#
    );
    assert_eq!(
        render(name.is_not_distinct_from("bob")),
        r#""users"."name" IS NOT DISTINCT FROM 'bob'"#
    );
}

#[test]
fn test_boolean_combinators() {
    let users = users();
    let a = users.attr("a").eq(1);
    let b = users.attr("b").eq(2);
    let c = users.attr("c").eq(3);

    assert_eq!(
        render(a.clone().and(b.clone()).and(c.clone())),
        r#""users"."a" = 1 AND "users"."b" = 2 AND "users"."c" = 3"#
    );
    assert_eq!(
        render(a.clone().or(b.clone()).and(c.clone())),
        r#"("users"."a" = 1 OR "users"."b" = 2) AND "users"."c" = 3"#
    );
    assert_eq!(
        render(a.clone().and(b.clone()).not()),
        r#"NOT ("users"."a" = 1 AND "users"."b" = 2)"#
    );
    assert_eq!(render(!a.clone()), r#"NOT "users"."a" = 1"#);
    assert_eq!(
        render(a | b & c),
        r#"("users"."a" = 1 OR "users"."b" = 2 AND "users"."c" = 3)"#
    );
}

#[test]
fn test_arithmetic() {
    let users = users();
    let price = users.attr("price");
    let qty = users.attr("qty");

    assert_eq!(render(&price * &qty), r#""users"."price" * "users"."qty""#);
    assert_eq!(render((&price + 1) * 2), r#"("users"."price" + 1) * 2"#);
    assert_eq!(render((&price - &qty).gt(0)), r#"("users"."price" - "users"."qty") > 0"#);
}

#[test]
fn test_free_functions_match_methods() {
    let name = users().attr("name");
    assert_eq!(predications::eq(&name, "bob"), name.eq("bob"));
    assert_eq!(predications::matches(&name, "b%"), name.matches("b%"));
    assert_eq!(
        predications::between(&name, "a"..="m"),
        name.between("a"..="m")
    );
}

#[test]
fn test_window_and_filter_on_aggregates() {
    let users = users();
    let total = users
        .attr("salary")
        .sum()
        .filter(users.attr("active").eq(true));
    assert_eq!(
        render(total),
        r#"SUM("users"."salary") FILTER (WHERE "users"."active" = TRUE)"#
    );
}
