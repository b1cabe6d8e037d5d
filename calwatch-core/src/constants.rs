/// Default depth bound for the recursive value locator.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Depth bound for the calendar root search.
pub const CALENDAR_SEARCH_MAX_DEPTH: usize = 25;

/// Field holding the calendar root somewhere in the page model.
pub const CALENDAR_ROOT_KEY: &str = "calendarConfig";

/// Wrapper object the CMS nests most content fields under.
pub const FIELDS_KEY: &str = "fields";

/// Subtrees that never hold the calendar. Skipped during the root search.
pub const CALENDAR_SEARCH_EXCLUDED_KEYS: &[&str] = &[
    "metadata",
    "categories",
    "media",
    "images",
    "seo",
    "analytics",
    "tracking",
];

/// Label used when a block carries no readable label.
pub const UNKNOWN_DISPLAY_TIME: &str = "Unknown";

/// Case-insensitive marker in a block style that flags the slot as tentative.
pub const DISABLED_STYLE_MARKER: &str = "disabled";

/// Case-insensitive marker in a feature description that flags a closure.
pub const CLOSURE_MARKER: &str = "temporarily closed";

/// Category tag carried by every change event.
pub const CHANGE_CATEGORY: &str = "schedule";
