//! Case-insensitive name search over the category tree.

use super::OsintNode;

pub const MIN_QUERY_LEN: usize = 2;
pub const MAX_SEARCH_RESULTS: usize = 10;

#[derive(Debug, Clone)]
pub struct SearchHit<'a> {
    pub node: &'a OsintNode,
    /// Names of the enclosing nodes, outermost category first. The root is not included.
    pub path: Vec<&'a str>,
}

impl<'a> SearchHit<'a> {
    /// Top-level category the hit belongs to; a matched category is its own.
    pub fn category(&self) -> &'a str {
        self.path
            .first()
            .copied()
            .unwrap_or_else(|| self.node.display_name())
    }
}

/// Trims the raw query and drops it when it is too short to search on.
pub fn normalize_query(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|query| query.chars().count() >= MIN_QUERY_LEN)
}

/// Walks every node below the root in document order and returns at most
/// [`MAX_SEARCH_RESULTS`] nodes whose name contains `query`.
pub fn search_tree<'a>(tree: &'a OsintNode, query: &str) -> Vec<SearchHit<'a>> {
    let needle = query.trim().to_lowercase();
    let mut hits = Vec::new();
    if needle.is_empty() {
        return hits;
    }

    let mut path = Vec::new();
    collect_hits(tree.children(), &needle, &mut path, &mut hits);
    hits
}

fn collect_hits<'a>(
    nodes: &'a [OsintNode],
    needle: &str,
    path: &mut Vec<&'a str>,
    hits: &mut Vec<SearchHit<'a>>,
) {
    for node in nodes {
        if hits.len() >= MAX_SEARCH_RESULTS {
            return;
        }

        if let Some(name) = node.name.as_deref() {
            if name.to_lowercase().contains(needle) {
                hits.push(SearchHit {
                    node,
                    path: path.clone(),
                });
            }
        }

        if !node.children().is_empty() {
            path.push(node.display_name());
            collect_hits(node.children(), needle, path, hits);
            path.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::osint::NodeKind;

    fn sample_tree() -> OsintNode {
        serde_json::from_str(
            r#"{"name":"OSINT Framework","type":"folder","children":[
                {"name":"Username","type":"folder","children":[
                    {"name":"Username Search Engines","type":"folder","children":[
                        {"name":"Namechk","type":"url","url":"https://namechk.com/"},
                        {"name":"KnowEm","type":"url","url":"https://knowem.com/"}
                    ]}
                ]},
                {"name":"Domain Name","type":"folder","children":[
                    {"name":"Whois Records","type":"folder","children":[
                        {"name":"Domain Dossier","type":"url","url":"https://centralops.net/"}
                    ]}
                ]}
            ]}"#,
        )
        .expect("parse tree")
    }

    #[test]
    fn finds_nested_url_with_its_path() {
        let tree = sample_tree();
        let hits = search_tree(&tree, "NAMECHK");

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].node.kind, Some(NodeKind::Url));
        assert_eq!(hits[0].node.url.as_deref(), Some("https://namechk.com/"));
        assert_eq!(hits[0].path, vec!["Username", "Username Search Engines"]);
        assert_eq!(hits[0].category(), "Username");
    }

    #[test]
    fn matches_folders_and_leaves_in_document_order() {
        let tree = sample_tree();
        let names: Vec<_> = search_tree(&tree, "domain")
            .iter()
            .map(|hit| hit.node.display_name())
            .collect();

        assert_eq!(names, vec!["Domain Name", "Domain Dossier"]);
        assert_eq!(search_tree(&tree, "domain name")[0].category(), "Domain Name");
    }

    #[test]
    fn unmatched_query_returns_nothing() {
        assert!(search_tree(&sample_tree(), "shodan").is_empty());
        assert!(search_tree(&sample_tree(), "   ").is_empty());
    }

    #[test]
    fn results_are_capped() {
        let tree = OsintNode::folder(
            "root",
            (0..25)
                .map(|index| OsintNode::item(format!("tool {index}")))
                .collect(),
        );
        assert_eq!(search_tree(&tree, "tool").len(), MAX_SEARCH_RESULTS);
    }

    #[test]
    fn short_queries_are_ignored() {
        assert_eq!(normalize_query(None), None);
        assert_eq!(normalize_query(Some("  ")), None);
        assert_eq!(normalize_query(Some(" a ")), None);
        assert_eq!(normalize_query(Some(" who ")), Some("who"));
    }
}
