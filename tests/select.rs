use arel::error::ArelError;
use arel::prelude::*;

#[test]
fn test_select_where() {
    let users = Table::new("users");
    let mut query = users.from();
    query
        .project([users.attr("id")])
        .r#where(users.attr("id").eq(10));

    assert_eq!(
        query.to_sql().unwrap(),
        r#"SELECT "users"."id" FROM "users" WHERE "users"."id" = 10"#
    );
}

#[test]
fn test_select_without_projections_is_star() {
    let users = Table::new("users");
    assert_eq!(users.from().to_sql().unwrap(), r#"SELECT * FROM "users""#);
    assert_eq!(
        users.project([users.star()]).to_sql().unwrap(),
        r#"SELECT "users".* FROM "users""#
    );
}

#[test]
fn test_wheres_are_anded_in_call_order() {
    let users = Table::new("users");
    let mut query = users.from();
    query
        .r#where(users.attr("age").gt(18))
        .r#where(users.attr("name").eq("bob"));

    assert_eq!(
        query.to_sql().unwrap(),
        r#"SELECT * FROM "users" WHERE "users"."age" > 18 AND "users"."name" = 'bob'"#
    );
}

#[test]
fn test_or_is_grouped_inside_and() {
    let users = Table::new("users");
    let either = users.attr("a").eq(1).or(users.attr("b").eq(2));
    let query = users.r#where(users.attr("c").eq(3).and(either));

    assert_eq!(
        query.to_sql().unwrap(),
        r#"SELECT * FROM "users" WHERE "users"."c" = 3 AND ("users"."a" = 1 OR "users"."b" = 2)"#
    );
}

#[test]
fn test_in_any() {
    let users = Table::new("users");
    let mut query = users.project([users.attr("id")]);
    query.r#where(users.attr("id").in_any([vec![1, 2], vec![3, 4]]));

    assert_eq!(
        query.to_sql().unwrap(),
        r#"SELECT "users"."id" FROM "users" WHERE ("users"."id" IN (1, 2) OR "users"."id" IN (3, 4))"#
    );
}

#[test]
fn test_aggregates_get_implicit_aliases() {
    let users = Table::new("users");

    assert_eq!(
        users.project([users.attr("id").average()]).to_sql().unwrap(),
        r#"SELECT AVG("users"."id") AS avg_id FROM "users""#
    );
    assert_eq!(
        users
            .project([users.attr("id").count_distinct()])
            .to_sql()
            .unwrap(),
        r#"SELECT COUNT(DISTINCT "users"."id") AS count_id FROM "users""#
    );
    assert_eq!(
        users
            .project([users.attr("id").count().alias("total")])
            .to_sql()
            .unwrap(),
        r#"SELECT COUNT("users"."id") AS total FROM "users""#
    );
    assert_eq!(
        users.project([Node::Star.count()]).to_sql().unwrap(),
        r#"SELECT COUNT(*) FROM "users""#
    );
}

#[test]
fn test_implicit_aliases_are_plain_words() {
    let orders = Table::new("orders");
    let query = orders.project([
        orders.attr("unit price").average(),
        orders.attr("a-b").sum(),
        orders.attr("Total").maximum(),
    ]);

    assert_eq!(
        query.to_sql().unwrap(),
        r#"SELECT AVG("orders"."unit price") AS avg_unit_price, SUM("orders"."a-b") AS sum_a_b, MAX("orders"."Total") AS max_total FROM "orders""#
    );
}

#[test]
fn test_group_and_having() {
    let users = Table::new("users");
    let mut query = users.project([Node::from(users.attr("dept")), users.attr("id").count()]);
    query
        .group([users.attr("dept")])
        .having(users.attr("id").count().gt(5));

    assert_eq!(
        query.to_sql().unwrap(),
        r#"SELECT "users"."dept", COUNT("users"."id") AS count_id FROM "users" GROUP BY "users"."dept" HAVING COUNT("users"."id") > 5"#
    );
}

#[test]
fn test_order_limit_offset() {
    let users = Table::new("users");
    let mut query = users.order([users.attr("name").asc(), users.attr("id").desc()]);
    query.take(10).skip(20);

    assert_eq!(
        query.to_sql().unwrap(),
        r#"SELECT * FROM "users" ORDER BY "users"."name" ASC, "users"."id" DESC LIMIT 10 OFFSET 20"#
    );
}

#[test]
fn test_nulls_placement() {
    let users = Table::new("users");
    let query = users.order([users.attr("name").desc().nulls_last()]);
    assert_eq!(
        query.to_sql().unwrap(),
        r#"SELECT * FROM "users" ORDER BY "users"."name" DESC NULLS LAST"#
    );
}

#[test]
fn test_joins_render_in_call_order() {
    let users = Table::new("users");
    let posts = Table::new("posts");
    let comments = Table::new("comments");

    let mut query = users.project([users.attr("id")]);
    query
        .project([posts.attr("title")])
        .join(&posts)
        .on(posts.attr("user_id").eq(users.attr("id")))
        .unwrap()
        .outer_join(&comments)
        .on(comments.attr("post_id").eq(posts.attr("id")))
        .unwrap();

    assert_eq!(
        query.to_sql().unwrap(),
        r#"SELECT "users"."id", "posts"."title" FROM "users" INNER JOIN "posts" ON "posts"."user_id" = "users"."id" LEFT OUTER JOIN "comments" ON "comments"."post_id" = "posts"."id""#
    );
}

#[test]
fn test_second_on_is_anded() {
    let users = Table::new("users");
    let posts = Table::new("posts");

    let mut query = users.from();
    query
        .join(&posts)
        .on(posts.attr("user_id").eq(users.attr("id")))
        .unwrap()
        .on(posts.attr("published").eq(true))
        .unwrap();

    assert_eq!(
        query.to_sql().unwrap(),
        r#"SELECT * FROM "users" INNER JOIN "posts" ON "posts"."user_id" = "users"."id" AND "posts"."published" = TRUE"#
    );
}

#[test]
fn test_join_using() {
    let users = Table::new("users");
    let profiles = Table::new("profiles");

    let mut query = users.from();
    query.join(&profiles).using(["user_id"]).unwrap();

    assert_eq!(
        query.to_sql().unwrap(),
        r#"SELECT * FROM "users" INNER JOIN "profiles" USING ("user_id")"#
    );
}

#[test]
fn test_raw_join_is_verbatim_and_cannot_be_constrained() {
    let users = Table::new("users");
    let mut query = users.from();
    query.join("INNER JOIN posts ON posts.user_id = users.id");

    assert_eq!(
        query.to_sql().unwrap(),
        r#"SELECT * FROM "users" INNER JOIN posts ON posts.user_id = users.id"#
    );
    assert_eq!(
        query.on(sql("TRUE")).unwrap_err(),
        ArelError::RawJoinConstraint
    );
}

#[test]
fn test_on_without_join_fails() {
    let users = Table::new("users");
    let mut query = users.from();
    assert_eq!(
        query.on(users.attr("id").eq(1)).unwrap_err(),
        ArelError::NoJoinToConstrain
    );
}

#[test]
fn test_self_join_with_table_aliases() {
    let employees = Table::aliased("users", "e");
    let managers = Table::aliased("users", "m");

    let mut query = employees.project([employees.attr("name")]);
    query
        .project([managers.attr("name").alias("manager")])
        .join(&managers)
        .on(managers.attr("id").eq(employees.attr("manager_id")))
        .unwrap();

    assert_eq!(
        query.to_sql().unwrap(),
        r#"SELECT "e"."name", "m"."name" AS manager FROM "users" "e" INNER JOIN "users" "m" ON "m"."id" = "e"."manager_id""#
    );
}

#[test]
fn test_subquery_as_relation() {
    let users = Table::new("users");
    let active = users
        .r#where(users.attr("active").eq(true))
        .alias("active_users");

    let mut query = SelectManager::new();
    query.from(active.clone()).project([active.attr("id")]);

    assert_eq!(
        query.to_sql().unwrap(),
        r#"SELECT "active_users"."id" FROM (SELECT * FROM "users" WHERE "users"."active" = TRUE) "active_users""#
    );
}

#[test]
fn test_distinct() {
    let users = Table::new("users");
    let mut query = users.project([users.attr("name")]);
    query.distinct();
    assert_eq!(
        query.to_sql().unwrap(),
        r#"SELECT DISTINCT "users"."name" FROM "users""#
    );
}

#[test]
fn test_locks() {
    let users = Table::new("users");
    let mut query = users.from();
    query.lock();
    assert_eq!(query.to_sql().unwrap(), r#"SELECT * FROM "users" FOR UPDATE"#);

    query.lock_with("FOR SHARE SKIP LOCKED");
    assert_eq!(
        query.to_sql().unwrap(),
        r#"SELECT * FROM "users" FOR SHARE SKIP LOCKED"#
    );
}

#[test]
fn test_comments_and_hints() {
    let users = Table::new("users");
    let mut query = users.from();
    query
        .optimizer_hints(["INDEX(users idx_users_email)"])
        .comment("load users */ DROP TABLE users");

    assert_eq!(
        query.to_sql().unwrap(),
        r#"SELECT /*+ INDEX(users idx_users_email) */ * FROM "users" /* load users  DROP TABLE users */"#
    );
}

#[test]
fn test_common_table_expressions() {
    let users = Table::new("users");
    let mut adults = users.project([users.attr("id")]);
    adults.r#where(users.attr("age").gteq(18));

    let cte = Cte::new("adults", &adults);
    let table = cte.table();
    let mut query = table.project([table.attr("id")]);
    query.with([cte]);

    assert_eq!(
        query.to_sql().unwrap(),
        r#"WITH "adults" AS (SELECT "users"."id" FROM "users" WHERE "users"."age" >= 18) SELECT "adults"."id" FROM "adults""#
    );
}

#[test]
fn test_recursive_materialized_cte() {
    let nodes = Table::new("nodes");
    let tree = Table::new("tree");

    let base = nodes.r#where(nodes.attr("parent_id").eq(None::<i64>));
    let mut step = nodes.from();
    step.join(&tree)
        .on(nodes.attr("parent_id").eq(tree.attr("id")))
        .unwrap();
    let body = base.union_all(&step);

    let mut query = tree.from();
    query
        .with([Cte::new("other", &tree.from())])
        .with_recursive([Cte::new("tree", &body).materialized()]);

    assert_eq!(
        query.to_sql().unwrap(),
        r#"WITH RECURSIVE "other" AS (SELECT * FROM "tree"), "tree" AS MATERIALIZED ((SELECT * FROM "nodes" WHERE "nodes"."parent_id" IS NULL) UNION ALL (SELECT * FROM "nodes" INNER JOIN "tree" ON "nodes"."parent_id" = "tree"."id")) SELECT * FROM "tree""#
    );
}

#[test]
fn test_exists_subquery() {
    let users = Table::new("users");
    let posts = Table::new("posts");

    let mut authored = posts.project([posts.attr("id")]);
    authored.r#where(posts.attr("user_id").eq(users.attr("id")));

    let expected = r#"SELECT * FROM "users" WHERE EXISTS (SELECT "posts"."id" FROM "posts" WHERE "posts"."user_id" = "users"."id")"#;
    assert_eq!(users.r#where(exists(&authored)).to_sql().unwrap(), expected);
    assert_eq!(users.r#where(authored.exists()).to_sql().unwrap(), expected);
}

#[test]
fn test_in_subquery_checks_arity() {
    let users = Table::new("users");
    let posts = Table::new("posts");

    let authors = posts.project([posts.attr("user_id")]);
    let predicate = users.attr("id").in_subquery(&authors).unwrap();
    assert_eq!(
        users.r#where(predicate).to_sql().unwrap(),
        r#"SELECT * FROM "users" WHERE "users"."id" IN (SELECT "posts"."user_id" FROM "posts")"#
    );

    let pairs = posts.project([posts.attr("id"), posts.attr("user_id")]);
    assert_eq!(
        users.attr("id").in_subquery(&pairs).unwrap_err(),
        ArelError::SubqueryArity {
            expected: 1,
            found: 2
        }
    );
    assert!(
        tuple([users.attr("id"), users.attr("manager_id")])
            .in_subquery(&pairs)
            .is_ok()
    );
}

#[test]
fn test_lateral_join() {
    let users = Table::new("users");
    let posts = Table::new("posts");

    let mut latest = posts.project([posts.attr("id")]);
    latest
        .r#where(posts.attr("user_id").eq(users.attr("id")))
        .order([posts.attr("created_at").desc()])
        .take(1);

    let mut query = users.from();
    query
        .join(latest.lateral(Some("latest")))
        .on(Node::True)
        .unwrap();

    assert_eq!(
        query.to_sql().unwrap(),
        r#"SELECT * FROM "users" INNER JOIN LATERAL (SELECT "posts"."id" FROM "posts" WHERE "posts"."user_id" = "users"."id" ORDER BY "posts"."created_at" DESC LIMIT 1) "latest" ON TRUE"#
    );
}

#[test]
fn test_rendering_is_repeatable() {
    let users = Table::new("users");
    let mut query = users.project([users.attr("id")]);
    query.r#where(users.attr("name").matches("a%")).take(5);

    let first = query.to_sql().unwrap();
    assert_eq!(query.to_sql().unwrap(), first);
    assert_eq!(
        query.compile(Dialect::PostgreSQL).unwrap(),
        query.compile(Dialect::PostgreSQL).unwrap()
    );
}

#[test]
fn test_clones_are_independent() {
    let users = Table::new("users");
    let base = users.project([users.attr("id")]);
    let before = base.to_sql().unwrap();

    let mut filtered = base.clone();
    filtered.r#where(users.attr("id").gt(100)).take(1);

    assert_eq!(base.to_sql().unwrap(), before);
    assert_eq!(
        filtered.to_sql().unwrap(),
        r#"SELECT "users"."id" FROM "users" WHERE "users"."id" > 100 LIMIT 1"#
    );
}

#[test]
fn test_case_expression() {
    let users = Table::new("users");
    let label = users
        .attr("status")
        .when(1, "active")
        .when(2, "banned")
        .r#else("unknown");
    let query = users.project([Node::from(label).alias("label")]);

    assert_eq!(
        query.to_sql().unwrap(),
        r#"SELECT CASE "users"."status" WHEN 1 THEN 'active' WHEN 2 THEN 'banned' ELSE 'unknown' END AS label FROM "users""#
    );
}

#[test]
fn test_named_function_cast_and_extract() {
    let users = Table::new("users");
    let query = users.project([
        named_function("COALESCE", [Node::from(users.attr("nick")), quoted("anon")]),
        cast(users.attr("age"), "TEXT"),
        extract(users.attr("created_at"), "year"),
    ]);

    assert_eq!(
        query.to_sql().unwrap(),
        r#"SELECT COALESCE("users"."nick", 'anon'), CAST("users"."age" AS TEXT), EXTRACT(YEAR FROM "users"."created_at") FROM "users""#
    );
}

#[test]
fn test_rendering_across_threads() {
    let users = Table::new("users");
    let mut query = users.project([users.attr("id")]);
    query.r#where(users.attr("name").eq("bob"));
    let query = &query;

    let rendered: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = Dialect::ALL
            .into_iter()
            .map(|dialect| scope.spawn(move || query.to_sql_in(dialect).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(rendered.len(), Dialect::ALL.len());
    assert!(rendered.iter().all(|sql| sql.contains("'bob'")));
    assert_eq!(
        rendered[0],
        r#"SELECT "users"."id" FROM "users" WHERE "users"."name" = 'bob'"#
    );
}

#[test]
fn test_join_without_from_is_an_error() {
    let posts = Table::new("posts");
    let mut query = SelectManager::new();
    query.join(&posts);

    assert_eq!(
        query.to_sql().unwrap_err(),
        ArelError::Incomplete {
            statement: "SELECT",
            missing: "joins without a FROM relation"
        }
    );
}
