//! Compiled-SQL coverage for each join kind, one dialect apiece.

use sqlcraft::dialect::Dialect;
use sqlcraft::query::Query;

#[test]
fn inner_join_renders_inner_join() {
    let q = Query::new()
        .select(["*"])
        .from("orders")
        .join("customers", "orders.customer_id = customers.id");
    let sql = q.compile(Dialect::Postgres).unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM \"orders\" INNER JOIN \"customers\" ON orders.customer_id = customers.id"
    );
}

#[test]
fn left_join_renders_left_join() {
    let q = Query::new()
        .select(["*"])
        .from("orders")
        .left_join("customers", "orders.customer_id = customers.id");
    let sql = q.compile(Dialect::Postgres).unwrap();
    assert!(sql.contains("LEFT JOIN \"customers\""));
}

#[test]
fn right_join_renders_right_join() {
    let q = Query::new()
        .select(["*"])
        .from("orders")
        .right_join("customers", "orders.customer_id = customers.id");
    let sql = q.compile(Dialect::MySql).unwrap();
    assert!(sql.contains("RIGHT JOIN `customers`"));
}

#[test]
fn full_outer_join_renders_full_outer_join() {
    let q = Query::new()
        .select(["*"])
        .from("orders")
        .full_outer_join("customers", "orders.customer_id = customers.id");
    let sql = q.compile(Dialect::SqlServer).unwrap();
    assert!(sql.contains("FULL OUTER JOIN [customers]"));
}

#[test]
fn cross_join_renders_cross_join_with_no_on_clause() {
    let q = Query::new().select(["*"]).from("a").cross_join("b");
    let sql = q.compile(Dialect::Sqlite).unwrap();
    assert_eq!(sql, "SELECT * FROM \"a\" CROSS JOIN \"b\"");
}
