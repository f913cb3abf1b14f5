//! Plain-text rendering of records, contributor tables, and trees.
//!
//! The aggregators emit structured data; everything about column widths,
//! rules, and glyphs lives here.

use crate::report::{ContributorLine, SocialReport, StructureReport};
use crate::tree::{NodeKind, TreeNode};
use crate::types::MetricRecord;

const RULE_WIDTH: usize = 60;

/// Renders a record as a two-column table under a titled rule.
pub fn render_record(record: &MetricRecord) -> String {
    let label_width = record
        .rows()
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(record.title());
    out.push('\n');
    out.push_str(&"━".repeat(RULE_WIDTH));
    out.push('\n');
    for (name, value) in record.rows() {
        out.push_str(&format!("  {:<width$}   {}\n", name, value, width = label_width));
    }
    out
}

/// Renders the social report: the record, then either the contributor
/// table or the no-contributors notice.
pub fn render_social(report: &SocialReport) -> String {
    let mut out = render_record(&report.record);
    out.push('\n');
    if report.has_visible_contributors() {
        out.push_str(&render_contributors(&report.contributors));
    } else {
        out.push_str("No contributors visible, or the repository is empty.\n");
    }
    out
}

fn render_contributors(lines: &[ContributorLine]) -> String {
    let login_width = lines
        .iter()
        .map(|line| line.login.chars().count())
        .max()
        .unwrap_or(0)
        .max("Contributor".len());

    let mut out = String::new();
    out.push_str("Leading contributors\n");
    out.push_str(&format!(
        "  {:<width$}   {:>13}\n",
        "Contributor",
        "Contributions",
        width = login_width
    ));
    for line in lines {
        out.push_str(&format!(
            "  {:<width$}   {:>13}\n",
            line.login,
            line.contributions,
            width = login_width
        ));
    }
    out
}

/// Renders the reconstructed file hierarchy with branch glyphs.
pub fn render_structure(report: &StructureReport) -> String {
    let mut out = format!("{} ({})\n", report.root.name, report.branch);
    render_children(&report.root, "", &mut out);
    out
}

fn render_children(node: &TreeNode, prefix: &str, out: &mut String) {
    let count = node.children.len();
    for (index, child) in node.children.iter().enumerate() {
        let last = index == count - 1;
        let glyph = if last { "└─" } else { "├─" };
        let marker = match child.kind {
            NodeKind::Directory => "/",
            NodeKind::File => "",
        };
        out.push_str(&format!("{}{} {}{}\n", prefix, glyph, child.name, marker));

        let child_prefix = if last {
            format!("{}   ", prefix)
        } else {
            format!("{}│  ", prefix)
        };
        render_children(child, &child_prefix, out);
    }
}
