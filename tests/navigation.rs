//! Navigation table and dispatcher tests through the public API.

use std::sync::Arc;

use parking_client::config::parse_config;
use parking_client::routing::{
    Dispatcher, History, MemoryHistory, RouteEntry, RouteMatch, RouteTable,
};

#[test]
fn test_home_admin_table() {
    let table = RouteTable::new(vec![
        RouteEntry::new("/", "Home"),
        RouteEntry::new("/admin", "Admin"),
    ]);

    assert_eq!(table.resolve("/admin"), RouteMatch::Matched("Admin"));
    assert_eq!(table.resolve("/missing"), RouteMatch::NoMatch);
}

#[test]
fn test_configured_routes_keep_order() {
    let config = parse_config(
        r#"
        [[routes]]
        path = "/lots"
        view = "LotList"

        [[routes]]
        path = "/"
        view = "HomePage"
        "#,
    )
    .unwrap();

    let table = RouteTable::from_config(&config.routes);
    let patterns: Vec<_> = table.entries().iter().map(|e| e.path_pattern()).collect();
    assert_eq!(patterns, ["/lots", "/"]);
    assert_eq!(table.resolve("/lots").view(), Some("LotList"));
    assert_eq!(table.resolve("/admin").view(), None);
}

#[test]
fn test_dispatcher_with_default_routes() {
    let config = parking_client::AppConfig::default();
    let dispatcher = Dispatcher::new(
        Arc::new(RouteTable::from_config(&config.routes)),
        MemoryHistory::default(),
    );

    assert_eq!(dispatcher.current().view.as_deref(), Some("HomePage"));

    let render = dispatcher.navigate("/admin#stats");
    assert_eq!(render.path, "/admin");
    assert_eq!(render.view.as_deref(), Some("AdminDashboard"));

    let render = dispatcher.navigate("/admin/users");
    assert!(!render.is_resolved());
    assert_eq!(dispatcher.history().current(), "/admin/users");

    assert_eq!(
        dispatcher.back().and_then(|r| r.view),
        Some("AdminDashboard".to_string())
    );
}
