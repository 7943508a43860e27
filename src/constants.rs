// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// monday.com API boundaries
// ---------------------------------------------------------------------------

/// GraphQL endpoint for the monday.com platform API.
pub const MONDAY_API_URL: &str = "https://api.monday.com/v2";

/// API version sent with every request as the `API-Version` header.
pub const MONDAY_API_VERSION: &str = "2024-10";

/// Environment variable holding the API token.
pub const MONDAY_API_KEY_ENV: &str = "MONDAY_API_KEY";

/// Optional environment override for the endpoint (proxies, test servers).
pub const MONDAY_API_URL_ENV: &str = "MONDAY_API_URL";

/// Optional environment override for the API version header.
pub const MONDAY_API_VERSION_ENV: &str = "MONDAY_API_VERSION";

/// How many items one `items_page` request asks for.
///
/// Pure tuning knob: traversal output does not depend on it.
pub const DEFAULT_ITEMS_PAGE_SIZE: u32 = 100;

/// Largest `limit` monday.com accepts for `items_page`.
pub const MAX_ITEMS_PAGE_SIZE: u32 = 500;

/// Per-request timeout enforced by the transport.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Board search
// ---------------------------------------------------------------------------

/// How many boards the search query lists before filtering by name.
pub const BOARD_SEARCH_SCAN_LIMIT: u32 = 100;

/// How many matching boards contribute item suggestions for a project.
pub const SUGGESTION_BOARD_LIMIT: usize = 3;

/// Separator in the `Developer - Project - Item type` board naming convention.
pub const BOARD_NAME_SEPARATOR: &str = " - ";

// ---------------------------------------------------------------------------
// Email updates
// ---------------------------------------------------------------------------

/// Email bodies longer than this are truncated when posted as item updates.
pub const EMAIL_BODY_PREVIEW_CHARS: usize = 2000;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
