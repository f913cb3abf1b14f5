//! Reconstructs a directory hierarchy from the flat recursive tree listing.

use crate::github::TreeEntry;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File,
}

/// One node of the reconstructed hierarchy. Children keep the order in
/// which the service first listed their paths.
#[derive(Clone, Debug)]
pub struct TreeNode {
    pub name: String,
    pub kind: NodeKind,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn directory(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: NodeKind::Directory,
            children: Vec::new(),
        }
    }
}

/// Builds the hierarchy by materializing each path prefix exactly once.
///
/// Intermediate segments become directories; the final segment of a `blob`
/// entry is a file, anything else is a directory.
pub fn build_tree(root_name: &str, entries: &[TreeEntry]) -> TreeNode {
    let mut root = TreeNode::directory(root_name);

    for entry in entries {
        let segments: Vec<&str> = entry.path.split('/').filter(|s| !s.is_empty()).collect();
        let mut current = &mut root;

        for (depth, segment) in segments.iter().enumerate() {
            let is_leaf = depth == segments.len() - 1;
            let index = match current.children.iter().position(|c| c.name == *segment) {
                Some(index) => index,
                None => {
                    let kind = if is_leaf && entry.kind == "blob" {
                        NodeKind::File
                    } else {
                        NodeKind::Directory
                    };
                    current.children.push(TreeNode {
                        name: segment.to_string(),
                        kind,
                        children: Vec::new(),
                    });
                    current.children.len() - 1
                }
            };
            current = &mut current.children[index];
        }
    }

    root
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(path: &str) -> TreeEntry {
        TreeEntry {
            path: path.to_string(),
            kind: "blob".to_string(),
        }
    }

    fn dir(path: &str) -> TreeEntry {
        TreeEntry {
            path: path.to_string(),
            kind: "tree".to_string(),
        }
    }

    #[test]
    fn test_each_prefix_materializes_once() {
        let entries = vec![
            dir("a"),
            blob("a/b.txt"),
            dir("a/c"),
            blob("a/c/d.rs"),
        ];
        let root = build_tree("demo", &entries);

        assert_eq!(root.children.len(), 1);
        let a = &root.children[0];
        assert_eq!(a.name, "a");
        assert_eq!(a.kind, NodeKind::Directory);
        assert_eq!(a.children.len(), 2);
        assert_eq!(a.children[0].name, "b.txt");
        assert_eq!(a.children[0].kind, NodeKind::File);
        assert_eq!(a.children[1].name, "c");
        assert_eq!(a.children[1].children.len(), 1);
        assert_eq!(a.children[1].children[0].name, "d.rs");
    }

    #[test]
    fn test_missing_intermediate_prefixes_become_directories() {
        // The listing may name a deep blob without its parents.
        let root = build_tree("demo", &[blob("src/core/lib.rs")]);

        let src = &root.children[0];
        assert_eq!(src.kind, NodeKind::Directory);
        let core = &src.children[0];
        assert_eq!(core.kind, NodeKind::Directory);
        assert_eq!(core.children[0].name, "lib.rs");
        assert_eq!(core.children[0].kind, NodeKind::File);
    }

    #[test]
    fn test_service_order_is_preserved() {
        let entries = vec![blob("zebra.md"), blob("alpha.md"), blob("midway.md")];
        let root = build_tree("demo", &entries);

        let names: Vec<&str> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["zebra.md", "alpha.md", "midway.md"]);
    }

    #[test]
    fn test_empty_listing_yields_bare_root() {
        let root = build_tree("demo", &[]);
        assert_eq!(root.name, "demo");
        assert!(root.children.is_empty());
    }
}
