//! Element ids shared with the page template.
//!
//! The template in `dashboard/index.html` must carry an element for each of
//! these; renderers never create or remove them, only replace their content.

pub const PAGE_TITLE: &str = "page-title";
pub const LAST_UPDATE: &str = "last-update";

pub const STAT_INFERENCE: &str = "stat-inf";
pub const STAT_SERVERS: &str = "stat-srv";
pub const STAT_ALERTS: &str = "stat-alert";
pub const OVERVIEW_ALERTS: &str = "overview-alerts";

pub const INFERENCE_GRID: &str = "inf-grid";
pub const INFERENCE_COUNT_BADGE: &str = "inf-count-badge";

pub const SERVER_TBODY: &str = "srv-tbody";

pub const REPL_ERRORS: &str = "repl-errors-container";

pub const DB_MASTER: &str = "db-master-container";
pub const DB_SLAVES: &str = "db-slaves-container";
pub const CHECK_DB_BUTTON: &str = "btn-check-db";

pub const DETAIL_MODAL: &str = "detail-modal";
pub const DETAIL_BODY: &str = "modal-json";
