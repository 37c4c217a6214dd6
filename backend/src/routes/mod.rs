//! Route definitions for the VENUS platform

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes
        .nest("/auth", auth_routes(state.clone()))
        // Protected routes - inventory
        .nest("/items", item_routes(state.clone()))
        // Protected routes - orders
        .nest("/orders", order_routes(state.clone()))
        // Protected routes - quotations
        .nest("/quotations", quotation_routes(state.clone()))
        // Protected routes - warehouse fulfillment
        .nest("/warehouse", warehouse_routes(state.clone()))
        // Protected routes - customers
        .nest("/customers", customer_routes(state.clone()))
        // Protected routes - dashboard
        .nest("/dashboard", dashboard_routes(state))
}

/// Authentication routes (login public, me protected)
fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::login))
        .route(
            "/me",
            get(handlers::me)
                .route_layer(middleware::from_fn_with_state(state, auth_middleware)),
        )
}

/// Inventory routes (protected)
fn item_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_items).post(handlers::create_item),
        )
        .route("/low-stock", get(handlers::low_stock_items))
        .route("/reserve", post(handlers::reserve_stock))
        .route("/release", post(handlers::release_stock))
        .route(
            "/:sku",
            get(handlers::get_item).put(handlers::update_item),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Order routes (protected)
fn order_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_orders).post(handlers::create_order),
        )
        .route(
            "/:id",
            get(handlers::get_order).delete(handlers::cancel_order),
        )
        .route("/:id/status", put(handlers::update_order_status))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Quotation routes (protected)
fn quotation_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_quotations).post(handlers::create_quotation),
        )
        .route("/:id", get(handlers::get_quotation))
        .route("/:id/status", put(handlers::update_quotation_status))
        .route("/:id/convert-to-order", post(handlers::convert_quotation))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Warehouse fulfillment routes (protected)
fn warehouse_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/inbound", get(handlers::list_inbound))
        .route("/inbound/:id/receive", put(handlers::receive_inbound))
        .route("/picklists", get(handlers::list_pick_lists))
        .route("/picklists/:id/pick", put(handlers::pick_items))
        .route("/dispatch", get(handlers::list_dispatch))
        .route("/dispatch/:id/ship", put(handlers::ship_dispatch))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Customer routes (protected)
fn customer_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_customers).post(handlers::create_customer),
        )
        .route(
            "/:id",
            get(handlers::get_customer).put(handlers::update_customer),
        )
        .route("/:id/orders", get(handlers::customer_orders))
        .route("/:id/quotations", get(handlers::customer_quotations))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Dashboard routes (protected)
fn dashboard_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/overview", get(handlers::dashboard_overview))
        .route("/stock-levels", get(handlers::dashboard_stock_levels))
        .route("/sales-metrics", get(handlers::dashboard_sales_metrics))
        .route(
            "/warehouse-metrics",
            get(handlers::dashboard_warehouse_metrics),
        )
        .route(
            "/inventory-alerts",
            get(handlers::dashboard_inventory_alerts),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
