//! End-to-end compiler scenarios, one per target dialect feature.

use sqlcraft::dialect::Dialect;
use sqlcraft::query::Query;
use sqlcraft::value::Value;

#[test]
fn s1_sqlserver_top_where_order_by() {
    let q = Query::new()
        .select(["Id", "Name"])
        .from("Users")
        .where_cond("Active", "=", true)
        .order_by_descending("Id")
        .top(10);

    let (sql, params) = q.compile_with_parameters(Dialect::SqlServer).unwrap();
    assert_eq!(
        sql,
        "SELECT TOP 10 [Id], [Name] FROM [Users] WHERE [Active] = @p0 ORDER BY [Id] DESC"
    );
    assert_eq!(params, vec![Value::Boolean(true)]);
}

#[test]
fn s2_postgres_limit_offset_in_grouped_or() {
    let q = Query::new()
        .select(["*"])
        .from("t")
        .begin_group()
        .where_cond("a", "=", 1)
        .or_where("b", "=", 2)
        .end_group()
        .where_in("c", vec![3.into(), 4.into(), 5.into()])
        .limit(20)
        .offset(40);

    let (sql, params) = q.compile_with_parameters(Dialect::Postgres).unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM \"t\" WHERE (\"a\" = @p0 OR \"b\" = @p1) AND \"c\" IN (@p2, @p3, @p4) LIMIT 20 OFFSET 40"
    );
    assert_eq!(
        params,
        vec![
            Value::Integer(1),
            Value::Integer(2),
            Value::Integer(3),
            Value::Integer(4),
            Value::Integer(5),
        ]
    );
}

#[test]
fn s3_mysql_upsert() {
    let q = Query::new().insert_or_update(
        "t",
        [("id", Value::from(1i64)), ("name", Value::from("x"))],
        ["id"],
    );

    let (sql, params) = q.compile_with_parameters(Dialect::MySql).unwrap();
    assert_eq!(
        sql,
        "INSERT INTO `t` (`id`, `name`) VALUES (@p0, @p1) ON DUPLICATE KEY UPDATE `id` = VALUES(`id`), `name` = VALUES(`name`)"
    );
    assert_eq!(params, vec![Value::Integer(1), Value::String("x".into())]);
}

#[test]
fn s4_sqlite_upsert_restricted_update_set() {
    let q = Query::new()
        .insert_or_update(
            "t",
            [
                ("id", Value::from(1i64)),
                ("name", Value::from("x")),
                ("ts", Value::from("2024-01-01")),
            ],
            ["id"],
        )
        .upsert_update_only(["name", "ts"]);

    let (sql, params) = q.compile_with_parameters(Dialect::Sqlite).unwrap();
    assert_eq!(
        sql,
        "INSERT INTO \"t\" (\"id\", \"name\", \"ts\") VALUES (@p0, @p1, @p2) ON CONFLICT (\"id\") DO UPDATE SET \"name\" = EXCLUDED.\"name\", \"ts\" = EXCLUDED.\"ts\""
    );
    assert_eq!(
        params,
        vec![
            Value::Integer(1),
            Value::String("x".into()),
            Value::String("2024-01-01".into()),
        ]
    );
}

#[test]
fn s5_sqlserver_merge_upsert() {
    let q = Query::new().insert_or_update(
        "t",
        [("id", Value::from(1i64)), ("name", Value::from("x"))],
        ["id"],
    );

    let (sql, params) = q.compile_with_parameters(Dialect::SqlServer).unwrap();
    assert_eq!(
        sql,
        "MERGE INTO [t] AS target USING (VALUES (@p0, @p1)) AS source ([id], [name]) ON (target.[id] = source.[id]) WHEN MATCHED THEN UPDATE SET target.[id] = source.[id], target.[name] = source.[name] WHEN NOT MATCHED THEN INSERT ([id], [name]) VALUES (source.[id], source.[name])"
    );
    assert_eq!(params, vec![Value::Integer(1), Value::String("x".into())]);
}

#[test]
fn s6_update_with_subquery_predicate() {
    let subquery = Query::new()
        .select(["id"])
        .from("s")
        .where_cond("x", ">", 0);

    let q = Query::new()
        .update("u")
        .set("flag", true)
        .where_cond("id", "IN", subquery);

    let (sql, params) = q.compile_with_parameters(Dialect::Postgres).unwrap();
    assert_eq!(
        sql,
        "UPDATE \"u\" SET \"flag\" = @p0 WHERE \"id\" IN (SELECT \"id\" FROM \"s\" WHERE \"x\" > @p1)"
    );
    assert_eq!(params, vec![Value::Boolean(true), Value::Integer(0)]);
}
