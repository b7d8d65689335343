//! UI route table for the dashboard module
//!
//! Declarative tree consumed by the application shell's router. Leaves are
//! named and carry page metadata; grouping entries only pick the layout view
//! their children render inside.

use serde::{Deserialize, Serialize};

/// View a route resolves to, by identifier
///
/// Stands in for the shell's lazily-loaded component references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    DashboardLayout,
    Dashboard,
    InvoiceIrn,
    InvoiceComplianceLayout,
    InvoiceComplianceValid,
    InvoiceComplianceInvalid,
    InvoiceDetailPdf,
    InvoiceTrackerLayout,
    InvoiceTrackerOutgoing,
    InvoiceTrackerIncoming,
    ActivityLogs,
}

/// Metadata consumed by the shell for the page chrome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
}

/// Per-route metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub title: String,
    pub page: PageMeta,
}

/// One entry in the route tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub view: View,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<RouteMeta>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteEntry>,
}

impl RouteEntry {
    fn group(path: &str, view: View, children: Vec<RouteEntry>) -> Self {
        Self {
            path: path.to_string(),
            name: None,
            view,
            meta: None,
            children,
        }
    }

    fn leaf(path: &str, name: &str, view: View, title: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            name: Some(name.to_string()),
            view,
            meta: Some(RouteMeta {
                requires_auth: true,
                title: title.to_string(),
                page: PageMeta {
                    title: title.to_string(),
                    description: description.to_string(),
                },
            }),
            children: Vec::new(),
        }
    }

    /// All named leaves under this entry, in declaration order
    pub fn leaves(&self) -> Vec<&RouteEntry> {
        if self.children.is_empty() {
            return vec![self];
        }
        self.children.iter().flat_map(RouteEntry::leaves).collect()
    }
}

/// The dashboard module route tree
pub fn dashboard_routes() -> Vec<RouteEntry> {
    vec![RouteEntry::group(
        "/dashboard",
        View::DashboardLayout,
        vec![
            RouteEntry::leaf("", "Dashboard", View::Dashboard, "Dashboard", "CISL Dashboard"),
            RouteEntry::leaf(
                "/invoice-imports",
                "InvoiceImports",
                View::InvoiceIrn,
                "Invoice IRN",
                "CISL Invoice IRN",
            ),
            RouteEntry::group(
                "/invoice-compliance",
                View::InvoiceComplianceLayout,
                vec![
                    RouteEntry::leaf(
                        "valid",
                        "ValidInvoiceCompliance",
                        View::InvoiceComplianceValid,
                        "Invoice Compliance",
                        "CISL Invoice Compliance",
                    ),
                    RouteEntry::leaf(
                        "invalid",
                        "InvalidInvoiceCompliance",
                        View::InvoiceComplianceInvalid,
                        "Invoice Compliance",
                        "CISL Invoice Compliance",
                    ),
                ],
            ),
            RouteEntry::leaf(
                "/view-invoice/:invoice_id",
                "InvoiceDetailPDF",
                View::InvoiceDetailPdf,
                "Invoice Detail PDF",
                "CISL Invoice Detail PDF",
            ),
            RouteEntry::group(
                "/invoice-tracker",
                View::InvoiceTrackerLayout,
                vec![
                    RouteEntry::leaf(
                        "outgoing",
                        "InvoiceTrackerOutgoing",
                        View::InvoiceTrackerOutgoing,
                        "Outgoing Invoice",
                        "CISL Outgoing Invoice",
                    ),
                    RouteEntry::leaf(
                        "incoming",
                        "InvoiceTrackerIncoming",
                        View::InvoiceTrackerIncoming,
                        "Incoming Invoice",
                        "CISL Incoming Invoice",
                    ),
                ],
            ),
            RouteEntry::leaf(
                "/activity-logs",
                "ActivityLogs",
                View::ActivityLogs,
                "Activity Logs",
                "CISL Activity Logs",
            ),
        ],
    )]
}

/// Named leaves with their absolute paths
///
/// Resolution follows the shell router's rules: a child path with a leading
/// slash replaces the parent prefix, an empty path is the parent itself,
/// anything else nests under the parent.
pub fn named_paths(tree: &[RouteEntry]) -> Vec<(String, String)> {
    fn walk(entry: &RouteEntry, prefix: &str, out: &mut Vec<(String, String)>) {
        let full = if entry.path.starts_with('/') {
            entry.path.clone()
        } else if entry.path.is_empty() {
            prefix.to_string()
        } else {
            format!("{}/{}", prefix.trim_end_matches('/'), entry.path)
        };
        if let Some(name) = &entry.name {
            out.push((name.clone(), full.clone()));
        }
        for child in &entry.children {
            walk(child, &full, out);
        }
    }

    let mut out = Vec::new();
    for entry in tree {
        walk(entry, "", &mut out);
    }
    out
}

/// Find a named leaf anywhere in the tree
pub fn find_route<'a>(tree: &'a [RouteEntry], name: &str) -> Option<&'a RouteEntry> {
    tree.iter()
        .flat_map(RouteEntry::leaves)
        .find(|entry| entry.name.as_deref() == Some(name))
}

/// Check that every named leaf is unique within the tree
pub fn leaf_names_unique(tree: &[RouteEntry]) -> bool {
    let mut names: Vec<&str> = tree
        .iter()
        .flat_map(RouteEntry::leaves)
        .filter_map(|entry| entry.name.as_deref())
        .collect();
    let total = names.len();
    names.sort_unstable();
    names.dedup();
    names.len() == total
}
