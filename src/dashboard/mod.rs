//! Web dashboard served at `/`.
//!
//! The page template is embedded at build time. Fragments already rendered
//! into the [`Page`](crate::page::Page) are injected on first paint; after
//! that the browser applies [`PageUpdate`](crate::page::PageUpdate)s pushed
//! over `/ws` and calls the action endpoints for view switches, the database
//! check and drilldowns.

pub mod error;
pub mod handler;
pub mod websocket;

pub use error::DashboardError;
pub use handler::{
    assets_handler, check_db_handler, close_details_handler, dashboard_handler, details_handler,
    fragments_handler, view_handler, DetailsResponse,
};
pub use websocket::websocket_handler;
