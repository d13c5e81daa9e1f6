use arel::error::ArelError;
use arel::prelude::*;

#[test]
fn test_update_with_where() {
    let users = Table::new("users");
    let mut update = UpdateManager::new();
    update
        .table(&users)
        .set([(users.attr("name"), "bob")])
        .r#where(users.attr("id").eq(1));

    assert_eq!(
        update.to_sql().unwrap(),
        r#"UPDATE "users" SET "name" = 'bob' WHERE "users"."id" = 1"#
    );
}

#[test]
fn test_raw_assignment() {
    let users = Table::new("users");
    let mut update = UpdateManager::new();
    update
        .table(&users)
        .set([(users.attr("active"), true)])
        .set_raw("login_count = login_count + 1");

    assert_eq!(
        update.to_sql().unwrap(),
        r#"UPDATE "users" SET "active" = TRUE, login_count = login_count + 1"#
    );
}

#[test]
fn test_missing_relation_is_an_error() {
    let users = Table::new("users");
    let mut update = UpdateManager::new();
    update.set([(users.attr("name"), "bob")]);

    assert_eq!(
        update.to_sql().unwrap_err(),
        ArelError::Incomplete {
            statement: "UPDATE",
            missing: "no target relation"
        }
    );
}

#[test]
fn test_missing_assignments_is_an_error() {
    let users = Table::new("users");
    let mut update = UpdateManager::new();
    update.table(&users);

    assert_eq!(
        update.to_sql().unwrap_err(),
        ArelError::Incomplete {
            statement: "UPDATE",
            missing: "no SET assignments"
        }
    );
}

#[test]
fn test_order_and_limit_move_into_key_subselect() {
    let users = Table::new("users");
    let mut update = UpdateManager::new();
    update
        .table(&users)
        .set([(users.attr("active"), false)])
        .r#where(users.attr("score").lt(10))
        .order([users.attr("id").asc()])
        .take(100)
        .key(users.attr("id"));

    assert_eq!(
        update.to_sql().unwrap(),
        r#"UPDATE "users" SET "active" = FALSE WHERE "users"."id" IN (SELECT "users"."id" FROM "users" WHERE "users"."score" < 10 ORDER BY "users"."id" ASC LIMIT 100)"#
    );
}

#[test]
fn test_joined_update_uses_key_subselect() {
    let users = Table::new("users");
    let posts = Table::new("posts");

    let mut update = UpdateManager::new();
    update
        .table(&users)
        .join(&posts)
        .on(posts.attr("user_id").eq(users.attr("id")))
        .unwrap()
        .set([(users.attr("flagged"), true)])
        .r#where(posts.attr("spam").eq(true))
        .key(users.attr("id"));

    assert_eq!(
        update.to_sql().unwrap(),
        r#"UPDATE "users" SET "flagged" = TRUE WHERE "users"."id" IN (SELECT "users"."id" FROM "users" INNER JOIN "posts" ON "posts"."user_id" = "users"."id" WHERE "posts"."spam" = TRUE)"#
    );
}

#[test]
fn test_limit_without_key_is_an_error() {
    let users = Table::new("users");
    let mut update = UpdateManager::new();
    update
        .table(&users)
        .set([(users.attr("active"), false)])
        .take(1);

    assert_eq!(
        update.to_sql().unwrap_err(),
        ArelError::Incomplete {
            statement: "UPDATE",
            missing: "joins, ORDER BY or LIMIT require a key"
        }
    );
}

#[test]
fn test_mysql_keeps_order_and_limit_in_place() {
    let users = Table::new("users");
    let mut update = UpdateManager::new();
    update
        .table(&users)
        .set([(users.attr("active"), false)])
        .r#where(users.attr("score").lt(10))
        .order([users.attr("id").asc()])
        .take(100);

    assert_eq!(
        update.to_sql_in(Dialect::MySQL).unwrap(),
        "UPDATE `users` SET `active` = FALSE WHERE `users`.`score` < 10 ORDER BY `users`.`id` ASC LIMIT 100"
    );
}

#[test]
fn test_mysql_joined_update_with_limit_uses_derived_table() {
    let users = Table::new("users");
    let bans = Table::new("bans");
    let mut update = UpdateManager::new();
    update
        .table(&users)
        .join(&bans)
        .on(bans.attr("user_id").eq(users.attr("id")))
        .unwrap()
        .set([(users.attr("active"), false)])
        .order([users.attr("id").asc()])
        .take(10)
        .key(users.attr("id"));

    assert_eq!(
        update.to_sql_in(Dialect::MySQL).unwrap(),
        "UPDATE `users` SET `active` = FALSE WHERE `users`.`id` IN (SELECT `id` FROM (SELECT `users`.`id` FROM `users` INNER JOIN `bans` ON `bans`.`user_id` = `users`.`id` ORDER BY `users`.`id` ASC LIMIT 10) `__arel_temp`)"
    );
}

#[test]
fn test_mysql_joined_update_without_limit_stays_in_place() {
    let users = Table::new("users");
    let bans = Table::new("bans");
    let mut update = UpdateManager::new();
    update
        .table(&users)
        .join(&bans)
        .on(bans.attr("user_id").eq(users.attr("id")))
        .unwrap()
        .set([(users.attr("active"), false)])
        .key(users.attr("id"));

    assert_eq!(
        update.to_sql_in(Dialect::MySQL).unwrap(),
        "UPDATE `users` INNER JOIN `bans` ON `bans`.`user_id` = `users`.`id` SET `active` = FALSE"
    );
}

#[test]
fn test_mysql_update_with_offset_uses_derived_table() {
    let users = Table::new("users");
    let mut update = UpdateManager::new();
    update
        .table(&users)
        .set([(users.attr("active"), false)])
        .skip(5)
        .key(users.attr("id"));

    assert_eq!(
        update.to_sql_in(Dialect::MySQL).unwrap(),
        "UPDATE `users` SET `active` = FALSE WHERE `users`.`id` IN (SELECT `id` FROM (SELECT `users`.`id` FROM `users` LIMIT 18446744073709551615 OFFSET 5) `__arel_temp`)"
    );
}

#[test]
fn test_compiled_update_binds_in_order() {
    let users = Table::new("users");
    let mut update = UpdateManager::new();
    update
        .table(&users)
        .set([(users.attr("name"), "dave")])
        .r#where(users.attr("id").eq(7));

    let query = update.compile(Dialect::PostgreSQL).unwrap();
    assert_eq!(
        query.sql(),
        r#"UPDATE "users" SET "name" = $1 WHERE "users"."id" = $2"#
    );
    assert_eq!(
        query.values().unwrap(),
        vec![Value::Text("dave".into()), Value::Integer(7)]
    );
}
