use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;

use crate::{
    osint::{
        NodeKind, OsintNode,
        presenter::{SidebarCategory, category_icon, default_active_category},
        search::{SearchHit, normalize_query, search_tree},
    },
    web::{
        AppState, escape_html,
        flash::compose_flash_message,
        session,
        templates::{DashboardLayout, render_dashboard_page},
    },
};

#[derive(Default, Deserialize)]
pub struct DashboardQuery {
    pub status: Option<String>,
    pub error: Option<String>,
    pub q: Option<String>,
}

pub async fn dashboard(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(params): Query<DashboardQuery>,
) -> Result<Html<String>, Redirect> {
    let user = session::require_session(&jar)?;

    let catalog = state.catalog();
    let categories = catalog.categories();
    let query = normalize_query(params.q.as_deref());
    let hits = query
        .map(|query| search_tree(catalog.tree(), query))
        .unwrap_or_default();

    // Jump to the category of the first hit, the way a result click would.
    let active_name = hits
        .first()
        .map(SearchHit::category)
        .filter(|name| categories.iter().any(|category| category.name == *name))
        .or_else(|| default_active_category(categories).map(|category| category.name.as_str()));

    let sidebar_html = render_sidebar(categories, active_name);
    let sections_html = render_sections(catalog.tree().children(), categories, active_name);
    let search_html = query
        .map(|query| render_search_results(query, &hits))
        .unwrap_or_default();
    let flash_html = compose_flash_message(params.status.as_deref(), params.error.as_deref());

    Ok(Html(render_dashboard_page(DashboardLayout {
        username: &user.username,
        flash_html: &flash_html,
        search_query: query.unwrap_or_default(),
        search_html: &search_html,
        sidebar_html: &sidebar_html,
        sections_html: &sections_html,
        tree_json: catalog.tree_json(),
    })))
}

fn render_search_results(query: &str, hits: &[SearchHit<'_>]) -> String {
    let query = escape_html(query);
    if hits.is_empty() {
        return format!(
            r#"<section class="search-results"><h2>Search results for &quot;{query}&quot;</h2><p class="empty">No resources match &quot;{query}&quot;.</p></section>"#
        );
    }

    let items = hits.iter().map(render_search_hit).collect::<String>();
    format!(
        r#"<section class="search-results"><h2>Search results for &quot;{query}&quot;</h2><ul>{items}</ul></section>"#
    )
}

fn render_search_hit(hit: &SearchHit<'_>) -> String {
    let node = hit.node;
    let name = escape_html(node.display_name());
    let icon = match node.kind {
        Some(NodeKind::Folder) => category_icon(node.display_name()),
        Some(NodeKind::Url) => "fa-link",
        _ => "fa-question-circle",
    };
    let label = match node.url.as_deref().filter(|url| is_web_link(url)) {
        Some(url) => format!(
            r#"<a href="{href}" target="_blank" rel="noopener noreferrer">{name}</a>"#,
            href = escape_html(url),
        ),
        None => name,
    };
    let path = hit
        .path
        .iter()
        .map(|segment| escape_html(segment))
        .collect::<Vec<_>>()
        .join(" &gt; ");

    format!(
        r#"<li class="search-hit"><i class="fas {icon}"></i> {label} <span class="item-path">{path}</span></li>"#
    )
}

fn render_sidebar(categories: &[SidebarCategory], active_name: Option<&str>) -> String {
    if categories.is_empty() {
        return r#"<p class="empty">No categories available.</p>"#.to_string();
    }

    categories
        .iter()
        .map(|category| {
            let active = if Some(category.name.as_str()) == active_name {
                " active"
            } else {
                ""
            };
            format!(
                r##"<a class="category-link{active}" href="#{slug}" data-id="{slug}"><i class="fas {icon}"></i><span>{name}</span></a>"##,
                slug = escape_html(&category.slug),
                icon = category.icon,
                name = escape_html(&category.name),
            )
        })
        .collect()
}

/// One section per top-level category; only the active one is visible on load.
fn render_sections(
    nodes: &[OsintNode],
    categories: &[SidebarCategory],
    active_name: Option<&str>,
) -> String {
    nodes
        .iter()
        .zip(categories)
        .map(|(node, category)| {
            let active = if Some(category.name.as_str()) == active_name {
                " active"
            } else {
                ""
            };
            let body = if node.children().is_empty() {
                r#"<p class="empty">No resources listed.</p>"#.to_string()
            } else {
                render_node_list(node.children())
            };
            format!(
                r#"<section class="category-section{active}" id="{slug}" data-id="{slug}"><h2><i class="fas {icon}"></i> {name}</h2>{body}</section>"#,
                slug = escape_html(&category.slug),
                icon = category.icon,
                name = escape_html(&category.name),
            )
        })
        .collect()
}

fn render_node_list(nodes: &[OsintNode]) -> String {
    let items = nodes.iter().map(render_node).collect::<String>();
    format!("<ul>{items}</ul>")
}

fn render_node(node: &OsintNode) -> String {
    let name = escape_html(node.display_name());

    if !node.children().is_empty() || node.kind == Some(NodeKind::Folder) {
        let children = if node.children().is_empty() {
            String::new()
        } else {
            render_node_list(node.children())
        };
        return format!(r#"<li class="folder"><span>{name}</span>{children}</li>"#);
    }

    match node.url.as_deref().filter(|url| is_web_link(url)) {
        Some(url) => format!(
            r#"<li class="item"><a href="{href}" target="_blank" rel="noopener noreferrer">{name}</a></li>"#,
            href = escape_html(url),
        ),
        None => format!(r#"<li class="item">{name}</li>"#),
    }
}

fn is_web_link(url: &str) -> bool {
    let lowered = url.trim_start().to_ascii_lowercase();
    lowered.starts_with("https://") || lowered.starts_with("http://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::osint::presenter::sidebar_categories;

    fn sample_tree() -> OsintNode {
        serde_json::from_str(
            r#"{"name":"OSINT Framework","type":"folder","children":[
                {"name":"Username","type":"folder","children":[
                    {"name":"Username Search Engines","type":"folder","children":[
                        {"name":"Namechk","type":"url","url":"https://namechk.com/"}
                    ]}
                ]},
                {"name":"Domain Name","type":"folder","children":[
                    {"name":"Sketchy","type":"url","url":"javascript:alert(1)"}
                ]}
            ]}"#,
        )
        .expect("parse tree")
    }

    #[test]
    fn sidebar_marks_preferred_category_active() {
        let categories = sidebar_categories(&sample_tree());
        let html = render_sidebar(&categories, Some("Domain Name"));

        assert!(html.contains(r##"class="category-link active" href="#domain-name""##));
        assert!(html.contains(r##"class="category-link" href="#username""##));
        assert!(html.contains("fa-network-wired"));
    }

    #[test]
    fn sections_render_nested_links() {
        let tree = sample_tree();
        let categories = sidebar_categories(&tree);
        let html = render_sections(tree.children(), &categories, Some("Domain Name"));

        assert!(html.contains(r#"<section class="category-section" id="username""#));
        assert!(html.contains(r#"<section class="category-section active" id="domain-name""#));
        assert!(html.contains(r#"<a href="https://namechk.com/""#));
        assert!(html.contains("<span>Username Search Engines</span>"));
    }

    #[test]
    fn non_web_links_render_as_text() {
        let node = OsintNode {
            url: Some("javascript:alert(1)".to_string()),
            ..OsintNode::item("Sketchy")
        };
        assert_eq!(render_node(&node), r#"<li class="item">Sketchy</li>"#);
    }

    #[test]
    fn search_results_show_link_and_category_path() {
        let tree = sample_tree();
        let html = render_search_results("namechk", &search_tree(&tree, "namechk"));

        assert!(html.contains(r#"<i class="fas fa-link"></i> <a href="https://namechk.com/""#));
        assert!(html.contains(
            r#"<span class="item-path">Username &gt; Username Search Engines</span>"#
        ));
    }

    #[test]
    fn search_results_never_link_unsafe_urls() {
        let tree = sample_tree();
        let html = render_search_results("sketchy", &search_tree(&tree, "sketchy"));

        assert!(!html.contains("javascript:"));
        assert!(html.contains(r#"<span class="item-path">Domain Name</span>"#));
    }

    #[test]
    fn empty_search_results_echo_escaped_query() {
        let html = render_search_results("<b>", &[]);

        assert!(html.contains("No resources match &quot;&lt;b&gt;&quot;."));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn empty_sidebar_has_placeholder() {
        assert!(render_sidebar(&[], None).contains("No categories available."));
    }
}
