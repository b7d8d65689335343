//! Sidebar navigation configuration

use serde::{Deserialize, Serialize};

/// One entry in the persistent side navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarEntry {
    /// Unique key for the section
    pub slug: String,
    /// Target path, pointing at the section's default leaf
    pub link: String,
    pub title: String,
    pub icon: String,
    /// Whether this entry is the current one in the default view
    pub active: bool,
}

impl SidebarEntry {
    fn new(slug: &str, link: &str, title: &str, icon: &str, active: bool) -> Self {
        Self {
            slug: slug.to_string(),
            link: link.to_string(),
            title: title.to_string(),
            icon: icon.to_string(),
            active,
        }
    }
}

/// Ordered sidebar entries, one per top-level section
pub fn sidebar_routes() -> Vec<SidebarEntry> {
    vec![
        SidebarEntry::new("dashboard", "/dashboard", "Dashboard", "icon-four-square", true),
        SidebarEntry::new(
            "invoice-imports",
            "/invoice-imports",
            "Invoice Imports",
            "icon-directbox-notif",
            false,
        ),
        SidebarEntry::new(
            "invoice-compliance",
            "/invoice-compliance/valid",
            "Invoice Compliance",
            "icon-shield-tick",
            false,
        ),
        SidebarEntry::new(
            "invoice-tracker",
            "/invoice-tracker/outgoing",
            "Invoice Tracker",
            "icon-radar",
            false,
        ),
        SidebarEntry::new(
            "activity-logs",
            "/activity-logs",
            "Activity Logs",
            "icon-note",
            false,
        ),
        SidebarEntry::new("settings", "/settings/profile", "Settings", "icon-cog", false),
    ]
}
