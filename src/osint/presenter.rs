use super::OsintNode;

pub const DEFAULT_ICON: &str = "fa-folder-open";
pub const PREFERRED_CATEGORY: &str = "Domain Name";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarCategory {
    pub name: String,
    pub icon: &'static str,
    pub slug: String,
}

/// Font Awesome icon for a top-level category. Names must match exactly.
pub fn category_icon(name: &str) -> &'static str {
    match name {
        "Username" => "fa-user-secret",
        "Email Address" => "fa-envelope-open-text",
        "Domain Name" => "fa-network-wired",
        "IP & MAC Address" => "fa-laptop-code",
        "Images / Videos / Docs" => "fa-photo-video",
        "Social Networks" => "fa-users-cog",
        "Instant Messaging" => "fa-comments",
        "People Search Engines" => "fa-address-book",
        "Dating" => "fa-heart",
        "Telephone Numbers" => "fa-phone-square-alt",
        "Public Records" => "fa-landmark",
        "Business Records" => "fa-building",
        "Transportation" => "fa-car-side",
        "Geolocation Tools / Maps" => "fa-map-marked-alt",
        "Search Engines" => "fa-search-plus",
        "Forums / Blogs / IRC" => "fa-rss-square",
        "Archives" => "fa-archive",
        "Language Translation" => "fa-language",
        "Metadata" => "fa-cogs",
        "Mobile Emulation" => "fa-mobile-alt",
        "Terrorism" => "fa-biohazard",
        "Dark Web" => "fa-user-ninja",
        "Digital Currency" => "fa-coins",
        "Classifieds" => "fa-bullhorn",
        "Encoding / Decoding" => "fa-terminal",
        "Tools" => "fa-tools",
        "AI Tools" => "fa-brain",
        "Malicious File Analysis" => "fa-file-medical-alt",
        "Exploits & Advisories" => "fa-shield-virus",
        "Threat Intelligence" => "fa-chart-line",
        "OpSec" => "fa-user-shield",
        "Documentation / Evidence Capture" => "fa-camera-retro",
        "Training" => "fa-graduation-cap",
        _ => DEFAULT_ICON,
    }
}

/// Lowercases and turns spaces and slashes into hyphens. Nothing else is touched.
pub fn category_slug(name: &str) -> String {
    name.to_lowercase().replace([' ', '/'], "-")
}

pub fn sidebar_categories(tree: &OsintNode) -> Vec<SidebarCategory> {
    tree.children()
        .iter()
        .map(|child| {
            let name = child.display_name();
            SidebarCategory {
                name: name.to_string(),
                icon: category_icon(name),
                slug: category_slug(name),
            }
        })
        .collect()
}

pub fn default_active_category(categories: &[SidebarCategory]) -> Option<&SidebarCategory> {
    categories
        .iter()
        .find(|category| category.name == PREFERRED_CATEGORY)
        .or_else(|| categories.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(names: &[&str]) -> OsintNode {
        OsintNode::folder(
            "root",
            names
                .iter()
                .map(|name| OsintNode::folder(*name, Vec::new()))
                .collect(),
        )
    }

    #[test]
    fn preferred_category_is_default_and_slugged() {
        let tree: OsintNode = serde_json::from_str(
            r#"{"name":"root","children":[{"name":"Domain Name","type":"folder"}]}"#,
        )
        .expect("parse");

        let categories = sidebar_categories(&tree);
        let active = default_active_category(&categories).expect("default category");

        assert_eq!(active.name, "Domain Name");
        assert_eq!(active.slug, "domain-name");
        assert_eq!(active.icon, "fa-network-wired");
    }

    #[test]
    fn unmapped_category_gets_default_icon() {
        let categories = sidebar_categories(&tree_of(&["Underwater Basket Weaving"]));
        assert_eq!(categories[0].icon, DEFAULT_ICON);
    }

    #[test]
    fn icon_lookup_is_exact_match() {
        assert_eq!(category_icon("Dark Web"), "fa-user-ninja");
        assert_eq!(category_icon("dark web"), DEFAULT_ICON);
    }

    #[test]
    fn slug_only_replaces_spaces_and_slashes() {
        assert_eq!(
            category_slug("Images / Videos / Docs"),
            "images---videos---docs"
        );
        assert_eq!(category_slug("IP & MAC Address"), "ip-&-mac-address");
        assert_eq!(category_slug("OpSec"), "opsec");
    }

    #[test]
    fn falls_back_to_first_category() {
        let categories = sidebar_categories(&tree_of(&["Username", "Email Address"]));
        let active = default_active_category(&categories).expect("default category");
        assert_eq!(active.name, "Username");
    }

    #[test]
    fn preferred_category_wins_regardless_of_position() {
        let categories = sidebar_categories(&tree_of(&["Username", "Domain Name", "Training"]));
        let active = default_active_category(&categories).expect("default category");
        assert_eq!(active.name, "Domain Name");
    }

    #[test]
    fn empty_tree_has_no_default() {
        let categories = sidebar_categories(&OsintNode::default());
        assert!(categories.is_empty());
        assert!(default_active_category(&categories).is_none());
    }

    #[test]
    fn nameless_child_is_presented_as_unknown() {
        let tree: OsintNode =
            serde_json::from_str(r#"{"name":"root","children":[{"type":"folder"}]}"#)
                .expect("parse");
        let categories = sidebar_categories(&tree);
        assert_eq!(categories[0].name, "Unknown Category");
        assert_eq!(categories[0].slug, "unknown-category");
    }

    #[test]
    fn error_tree_presents_its_message() {
        let categories = sidebar_categories(&OsintNode::error_tree("arf.json not found"));
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].slug, "arf.json-not-found");
    }
}
