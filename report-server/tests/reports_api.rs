//! End-to-end report API tests over the in-memory store with a fixed clock

mod common;

use std::sync::Arc;

use common::*;
use http::StatusCode;
use report_server::store::Snapshot;
use serde_json::json;
use shared::models::{ExpenseCategory, PaymentMethod, RecordStatus, TransactionStatus};

fn sales_snapshot() -> Snapshot {
    Snapshot {
        transactions: vec![
            tx(
                "t1",
                27,
                TransactionStatus::Completed,
                "2024-05-13T08:10:00Z",
                PaymentMethod::Card,
                vec![item("latte", "Latte", 4, 3), item("cake", "Cake", 5, 3)],
            ),
            tx(
                "t2",
                18,
                TransactionStatus::Completed,
                "2024-05-14T12:40:00Z",
                PaymentMethod::Cash,
                vec![item("tea", "Tea", 3, 1), item("latte", "Latte", 4, 2), item("cake", "Cake", 5, 1)],
            ),
            tx(
                "t3",
                12,
                TransactionStatus::Completed,
                "2024-05-15T08:55:00Z",
                PaymentMethod::Online,
                vec![item("tea", "Tea", 3, 4)],
            ),
            tx(
                "t4",
                99,
                TransactionStatus::Preparing,
                "2024-05-15T09:00:00Z",
                PaymentMethod::Card,
                vec![item("cake", "Cake", 5, 20)],
            ),
        ],
        products: vec![
            product("latte", "Drinks", "Coffee"),
            product("tea", "Drinks", ""),
        ],
        ..Default::default()
    }
}

// ========== auth ==========

#[tokio::test]
async fn test_health_is_public() {
    let app = app(Snapshot::default());
    let (status, body) = get(&app, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "report-server");
}

#[tokio::test]
async fn test_missing_token_is_401() {
    let app = app(Snapshot::default());
    let (status, body) = get(&app, "/reports/overview", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], 1001);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_garbage_token_is_401() {
    let app = app(Snapshot::default());
    let (status, body) = get(&app, "/reports/overview", Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1004);
}

#[tokio::test]
async fn test_expired_token_is_401() {
    let app = app(Snapshot::default());
    let expired = report_server::JwtService::with_config(config_with(&[]).jwt)
        .generate_token_with_ttl("u-1", "tester", "admin", chrono::Duration::hours(-3))
        .unwrap();
    let (status, body) = get(&app, "/reports/overview", Some(&expired)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1003);
}

#[tokio::test]
async fn test_non_report_role_is_403() {
    let app = app(Snapshot::default());
    let (status, body) = get(&app, "/reports/financial-summary", Some(&token("cashier"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], 2001);
}

#[tokio::test]
async fn test_every_report_role_is_admitted() {
    let app = app(Snapshot::default());
    for role in ["main_admin", "admin", "manager", "accountant"] {
        let (status, _) = get(&app, "/reports/overview", Some(&token(role))).await;
        assert_eq!(status, StatusCode::OK, "role {role}");
    }
}

// ========== sales ==========

#[tokio::test]
async fn test_overview_excludes_pending() {
    let app = app(Snapshot {
        transactions: vec![
            completed("a", 100, "2024-05-15T10:00:00Z"),
            tx(
                "b",
                50,
                TransactionStatus::Pending,
                "2024-05-15T11:00:00Z",
                PaymentMethod::Cash,
                vec![],
            ),
        ],
        ..Default::default()
    });

    let data = report(&app, "/reports/overview").await;
    assert_eq!(data["totalRevenue"], 100.0);
    assert_eq!(data["totalOrders"], 1);
    assert_eq!(data["averageOrderValue"], 100.0);
}

#[tokio::test]
async fn test_overview_with_no_orders_is_all_zero() {
    let app = app(Snapshot::default());
    let data = report(&app, "/reports/overview").await;
    assert_eq!(
        data,
        json!({
            "totalOrders": 0,
            "totalRevenue": 0.0,
            "totalSubtotal": 0.0,
            "totalTax": 0.0,
            "averageOrderValue": 0.0,
            "totalItemsSold": 0
        })
    );
}

#[tokio::test]
async fn test_overview_explicit_range_counts_items() {
    let app = app(sales_snapshot());
    let data = report(
        &app,
        "/reports/overview?startDate=2024-05-13&endDate=2024-05-15",
    )
    .await;
    assert_eq!(data["totalOrders"], 3);
    assert_eq!(data["totalRevenue"], 57.0);
    assert_eq!(data["averageOrderValue"], 19.0);
    // 3+3 + 1+2+1 + 4; the preparing order is ignored
    assert_eq!(data["totalItemsSold"], 14);
}

#[tokio::test]
async fn test_top_products_limit_and_order() {
    let app = app(Snapshot {
        transactions: vec![tx(
            "t",
            0,
            TransactionStatus::Completed,
            "2024-05-10T12:00:00Z",
            PaymentMethod::Card,
            vec![
                item("c", "Gamma", 1, 1),
                item("a", "Alpha", 1, 5),
                item("b", "Beta", 1, 3),
            ],
        )],
        ..Default::default()
    });

    let data = report(&app, "/reports/top-products?limit=2").await;
    let rows = data.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["productId"], "a");
    assert_eq!(rows[0]["name"], "Alpha");
    assert_eq!(rows[0]["quantity"], 5);
    assert_eq!(rows[1]["productId"], "b");
    assert_eq!(rows[1]["quantity"], 3);
}

#[tokio::test]
async fn test_top_products_uses_line_revenue() {
    let app = app(sales_snapshot());
    let data = report(&app, "/reports/top-products").await;
    let rows = data.as_array().unwrap();
    // latte 5, tea 5, cake 4; latte seen first wins the tie
    assert_eq!(rows[0]["productId"], "latte");
    assert_eq!(rows[0]["revenue"], 20.0);
    assert_eq!(rows[1]["productId"], "tea");
    assert_eq!(rows[2]["productId"], "cake");
    assert_eq!(rows[2]["quantity"], 4);
}

#[tokio::test]
async fn test_sales_by_category_partitions_line_revenue() {
    let app = app(sales_snapshot());
    let data = report(&app, "/reports/sales-by-category").await;
    let rows = data.as_array().unwrap();

    let categories: Vec<&str> = rows.iter().map(|r| r["category"].as_str().unwrap()).collect();
    assert_eq!(categories, vec!["Coffee", "Uncategorized", "Drinks"]);

    let revenue: f64 = rows.iter().map(|r| r["revenue"].as_f64().unwrap()).sum();
    // 12+15 + 3+8+5 + 12
    assert_eq!(revenue, 55.0);
    assert_eq!(rows[0]["quantity"], 5);
    assert_eq!(rows[0]["items"], 2);
}

#[tokio::test]
async fn test_payment_methods_first_seen_order() {
    let app = app(sales_snapshot());
    let data = report(&app, "/reports/payment-methods").await;
    assert_eq!(
        data,
        json!([
            { "method": "card", "count": 1, "revenue": 27.0 },
            { "method": "cash", "count": 1, "revenue": 18.0 },
            { "method": "online", "count": 1, "revenue": 12.0 }
        ])
    );
}

#[tokio::test]
async fn test_sales_by_hour_sorted() {
    let app = app(sales_snapshot());
    let data = report(&app, "/reports/sales-by-hour").await;
    let hours: Vec<u64> = data
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["hour"].as_u64().unwrap())
        .collect();
    assert_eq!(hours, vec![8, 12]);
    assert_eq!(data[0]["orders"], 2);
    assert_eq!(data[0]["revenue"], 39.0);
}

#[tokio::test]
async fn test_sales_by_day_names() {
    let app = app(sales_snapshot());
    let data = report(&app, "/reports/sales-by-day").await;
    assert_eq!(
        data,
        json!([
            { "dayNumber": 2, "day": "Monday", "revenue": 27.0, "orders": 1 },
            { "dayNumber": 3, "day": "Tuesday", "revenue": 18.0, "orders": 1 },
            { "dayNumber": 4, "day": "Wednesday", "revenue": 12.0, "orders": 1 }
        ])
    );
}

#[tokio::test]
async fn test_sales_by_day_has_at_most_seven_buckets() {
    let transactions = (1..=28)
        .map(|d| completed(&format!("t{d}"), 10, &format!("2024-04-{d:02}T12:00:00Z")))
        .collect();
    let app = app(Snapshot {
        transactions,
        ..Default::default()
    });

    let data = report(
        &app,
        "/reports/sales-by-day?startDate=2024-04-01&endDate=2024-04-30",
    )
    .await;
    let rows = data.as_array().unwrap();
    assert_eq!(rows.len(), 7);
    for row in rows {
        let n = row["dayNumber"].as_u64().unwrap();
        assert!((1..=7).contains(&n));
        assert_eq!(row["orders"], 4);
    }
}

#[tokio::test]
async fn test_revenue_over_time_buckets() {
    let app = app(sales_snapshot());

    let daily = report(&app, "/reports/revenue-over-time").await;
    assert_eq!(
        daily,
        json!([
            { "period": "2024-05-13", "revenue": 27.0, "orders": 1 },
            { "period": "2024-05-14", "revenue": 18.0, "orders": 1 },
            { "period": "2024-05-15", "revenue": 12.0, "orders": 1 }
        ])
    );

    let monthly = report(&app, "/reports/revenue-over-time?groupBy=month").await;
    assert_eq!(
        monthly,
        json!([{ "period": "2024-05", "revenue": 57.0, "orders": 3 }])
    );

    let hourly = report(&app, "/reports/revenue-over-time?groupBy=hour").await;
    assert_eq!(hourly[0]["period"], "2024-05-13 08:00");
}

#[tokio::test]
async fn test_trailing_window_excludes_old_sales() {
    let app = app(Snapshot {
        transactions: vec![
            completed("old", 70, "2024-04-01T12:00:00Z"),
            completed("new", 30, "2024-05-01T12:00:00Z"),
        ],
        ..Default::default()
    });
    let data = report(&app, "/reports/revenue-over-time?groupBy=month").await;
    assert_eq!(data, json!([{ "period": "2024-05", "revenue": 30.0, "orders": 1 }]));
}

#[tokio::test]
async fn test_business_timezone_moves_buckets() {
    let app = app_configured(
        &[("BUSINESS_TIMEZONE", "America/New_York")],
        Snapshot {
            transactions: vec![completed("late", 40, "2024-05-14T02:30:00Z")],
            ..Default::default()
        },
    );

    // 02:30 UTC is 22:30 the previous evening in New York
    let data = report(&app, "/reports/sales-by-hour").await;
    assert_eq!(data, json!([{ "hour": 22, "revenue": 40.0, "orders": 1 }]));
    let data = report(&app, "/reports/revenue-over-time").await;
    assert_eq!(data[0]["period"], "2024-05-13");
}

#[tokio::test]
async fn test_lone_end_date_moves_trailing_window() {
    let app = app(Snapshot {
        transactions: vec![
            completed("feb", 5, "2024-02-20T12:00:00Z"),
            completed("mar", 25, "2024-03-20T12:00:00Z"),
            completed("apr", 70, "2024-04-10T12:00:00Z"),
        ],
        ..Default::default()
    });

    let data = report(&app, "/reports/revenue-over-time?endDate=2024-03-31&groupBy=month").await;
    assert_eq!(data, json!([{ "period": "2024-03", "revenue": 25.0, "orders": 1 }]));
}

// ========== expenses ==========

fn expense_snapshot() -> Snapshot {
    let mut inactive = expense("e3", ExpenseCategory::Rent, 10, "2024-05-15");
    inactive.status = RecordStatus::Inactive;
    let mut gas = expense("e4", ExpenseCategory::Utilities, 40, "2024-05-15");
    gas.subcategory = "Gas".into();
    let mut power = expense("e5", ExpenseCategory::Utilities, 25, "2024-05-14");
    power.subcategory = "Electricity".into();
    let mut more_gas = expense("e6", ExpenseCategory::Utilities, 5, "2024-05-03");
    more_gas.subcategory = "Gas".into();

    Snapshot {
        expenses: vec![
            expense("e1", ExpenseCategory::Rent, 30, "2024-05-15"),
            expense("e2", ExpenseCategory::Rent, 20, "2024-05-15"),
            inactive,
            gas,
            power,
            more_gas,
        ],
        staff: vec![
            staff("s1", 80, RecordStatus::Active),
            staff("s2", 70, RecordStatus::Active),
            staff("s3", 500, RecordStatus::Inactive),
        ],
        ..Default::default()
    }
}

#[tokio::test]
async fn test_expense_business_date_is_not_shifted_by_timezone() {
    let app = app_configured(
        &[("BUSINESS_TIMEZONE", "America/New_York")],
        Snapshot {
            expenses: vec![expense("e", ExpenseCategory::Rent, 100, "2024-05-10")],
            ..Default::default()
        },
    );
    let query = "startDate=2024-05-10&endDate=2024-05-10";

    let data = report(&app, &format!("/reports/expenses-by-category?{query}")).await;
    assert_eq!(data, json!([{ "category": "Rent", "total": 100.0, "count": 1 }]));

    let data = report(&app, &format!("/reports/expenses-over-time?{query}")).await;
    assert_eq!(data, json!([{ "period": "2024-05-10", "total": 100.0, "count": 1 }]));

    let data = report(&app, &format!("/reports/financial-summary?{query}")).await;
    assert_eq!(data["expenses"], json!({ "total": 100.0, "count": 1 }));

    let data = report(&app, "/reports/expenses-by-category?startDate=2024-05-09&endDate=2024-05-09").await;
    assert_eq!(data, json!([]));
}

#[tokio::test]
async fn test_expenses_by_category_active_only() {
    let app = app(expense_snapshot());
    let data = report(&app, "/reports/expenses-by-category").await;
    assert_eq!(
        data,
        json!([
            { "category": "Rent", "total": 50.0, "count": 2 },
            { "category": "Utilities", "total": 40.0, "count": 1 }
        ])
    );
}

#[tokio::test]
async fn test_expense_overview_two_day_range() {
    let app = app(Snapshot {
        expenses: vec![
            expense("a", ExpenseCategory::Cogs, 60, "2024-05-01"),
            expense("b", ExpenseCategory::Other, 40, "2024-05-02"),
        ],
        staff: vec![staff("s1", 100, RecordStatus::Active)],
        ..Default::default()
    });

    let data = report(
        &app,
        "/reports/expense-overview?startDate=2024-05-01&endDate=2024-05-02",
    )
    .await;
    assert_eq!(data["totalExpenses"], 100.0);
    assert_eq!(data["count"], 2);
    assert_eq!(data["daysInRange"], 2);
    assert_eq!(data["dailyAverage"], 50.0);
    assert_eq!(data["weeklyAverage"], 350.0);
    assert_eq!(data["monthlyAverage"], 1500.0);
    assert_eq!(
        data["staffCosts"],
        json!({ "daily": 100.0, "monthly": 3000.0, "yearly": 36500.0 })
    );
}

#[tokio::test]
async fn test_expense_overview_daily_average_recovers_total() {
    let app = app(expense_snapshot());
    let data = report(
        &app,
        "/reports/expense-overview?startDate=2024-05-01&endDate=2024-05-15",
    )
    .await;
    let total = data["totalExpenses"].as_f64().unwrap();
    let days = data["daysInRange"].as_f64().unwrap();
    let daily = data["dailyAverage"].as_f64().unwrap();
    assert_eq!(days, 15.0);
    assert!((daily * days - total).abs() < 0.01 * days);
    assert_eq!(data["staffCosts"]["daily"], 150.0);
}

#[tokio::test]
async fn test_expense_category_totals_partition_overview() {
    let app = app(expense_snapshot());
    let query = "startDate=2024-05-01&endDate=2024-05-15";
    let overview = report(&app, &format!("/reports/expense-overview?{query}")).await;
    let by_category = report(&app, &format!("/reports/expenses-by-category?{query}")).await;

    let sum: f64 = by_category
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["total"].as_f64().unwrap())
        .sum();
    assert_eq!(sum, overview["totalExpenses"].as_f64().unwrap());
}

#[tokio::test]
async fn test_expenses_over_time_by_day_and_week() {
    let app = app(expense_snapshot());

    let daily = report(&app, "/reports/expenses-over-time").await;
    assert_eq!(
        daily,
        json!([
            { "period": "2024-05-03", "total": 5.0, "count": 1 },
            { "period": "2024-05-14", "total": 25.0, "count": 1 },
            { "period": "2024-05-15", "total": 90.0, "count": 3 }
        ])
    );

    // Sunday-start weeks: 2024-05-12 opens week 19
    let weekly = report(&app, "/reports/expenses-over-time?groupBy=week").await;
    assert_eq!(
        weekly,
        json!([
            { "period": "2024-W17", "total": 5.0, "count": 1 },
            { "period": "2024-W19", "total": 115.0, "count": 4 }
        ])
    );
}

#[tokio::test]
async fn test_top_expense_categories_composite_key() {
    let app = app(expense_snapshot());
    let data = report(&app, "/reports/top-expense-categories?limit=2").await;
    assert_eq!(
        data,
        json!([
            { "category": "Rent", "subcategory": "", "totalAmount": 50.0, "count": 2 },
            { "category": "Utilities", "subcategory": "Gas", "totalAmount": 45.0, "count": 2 }
        ])
    );
}

// ========== financial summary ==========

#[tokio::test]
async fn test_financial_summary_profit_and_margin() {
    let app = app(Snapshot {
        transactions: vec![
            completed("a", 600, "2024-05-15T09:00:00Z"),
            completed("b", 400, "2024-05-15T13:00:00Z"),
        ],
        expenses: vec![expense("e", ExpenseCategory::Rent, 400, "2024-05-15")],
        ..Default::default()
    });

    let data = report(&app, "/reports/financial-summary").await;
    assert_eq!(
        data,
        json!({
            "revenue": { "total": 1000.0, "orders": 2 },
            "expenses": { "total": 400.0, "count": 1 },
            "profit": { "gross": 600.0, "margin": 60.0 }
        })
    );
}

#[tokio::test]
async fn test_financial_summary_without_revenue() {
    let app = app(Snapshot {
        expenses: vec![expense("e", ExpenseCategory::Rent, 80, "2024-05-15")],
        ..Default::default()
    });
    let data = report(&app, "/reports/financial-summary").await;
    assert_eq!(data["profit"]["gross"], -80.0);
    assert_eq!(data["profit"]["margin"], 0.0);
}

// ========== errors ==========

#[tokio::test]
async fn test_malformed_date_is_400() {
    let app = app(Snapshot::default());
    let (status, body) = get(
        &app,
        "/reports/overview?startDate=2024-02-30",
        Some(&token("manager")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], 4001);
    assert!(body["message"].as_str().unwrap().contains("startDate"));
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_inverted_range_is_400() {
    let app = app(Snapshot::default());
    let (status, body) = get(
        &app,
        "/reports/sales-by-hour?startDate=2024-05-10&endDate=2024-05-01",
        Some(&token("manager")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4001);
}

#[tokio::test]
async fn test_bad_parameters_are_400() {
    let app = app(Snapshot::default());
    let admin = token("admin");
    for uri in [
        "/reports/top-products?limit=0",
        "/reports/top-products?limit=ten",
        "/reports/top-expense-categories?limit=1000",
        "/reports/revenue-over-time?groupBy=year",
        "/reports/expenses-over-time?groupBy=hour",
    ] {
        let (status, body) = get(&app, uri, Some(&admin)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["code"], 4002, "{uri}");
    }
}

#[tokio::test]
async fn test_store_failure_is_503() {
    let app = app_with_stores(stores_replacing(
        Snapshot::default(),
        Some(Arc::new(DownStore)),
        None,
    ));
    let (status, body) = get(&app, "/reports/overview", Some(&token("admin"))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], 9002);
}

#[tokio::test]
async fn test_composite_report_fails_whole_when_one_store_fails() {
    let app = app_with_stores(stores_replacing(
        sales_snapshot(),
        None,
        Some(Arc::new(DownStore)),
    ));
    let (status, body) = get(&app, "/reports/financial-summary", Some(&token("admin"))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_stalled_store_times_out_as_503() {
    let app = app_with_stores(stores_replacing(
        Snapshot::default(),
        None,
        Some(Arc::new(StalledStore)),
    ));
    let (status, body) = get(&app, "/reports/expense-overview", Some(&token("admin"))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], 9002);
    assert!(body["message"].as_str().unwrap().contains("timed out"));
}

// ========== determinism ==========

#[tokio::test]
async fn test_repeated_calls_are_byte_identical() {
    let app = app(sales_snapshot());
    let admin = token("admin");
    for uri in [
        "/reports/payment-methods",
        "/reports/sales-by-category",
        "/reports/top-products",
        "/reports/revenue-over-time?groupBy=week",
    ] {
        let (_, first) = get_raw(&app, uri, Some(&admin)).await;
        let (_, second) = get_raw(&app, uri, Some(&admin)).await;
        assert_eq!(first, second, "{uri}");
    }
}
