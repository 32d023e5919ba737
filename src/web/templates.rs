use chrono::{Datelike, Utc};

const APP_TITLE: &str = "OSINT Framework Dashboard";

pub fn render_login_register_page(flash_html: &str) -> String {
    let footer = render_footer();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Login or Register</title>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="robots" content="noindex,nofollow">
    <style>
        :root {{ color-scheme: light; }}
        body {{ font-family: "Helvetica Neue", Arial, sans-serif; display: flex; flex-direction: column; align-items: center; justify-content: center; min-height: 100vh; margin: 0; background: #f1f5f9; color: #0f172a; padding: 1.5rem; box-sizing: border-box; gap: 1.5rem; }}
        main {{ width: 100%; max-width: 880px; display: flex; flex-direction: column; align-items: center; gap: 1.5rem; }}
        .panels {{ display: grid; gap: 1.5rem; grid-template-columns: repeat(auto-fit, minmax(320px, 1fr)); width: 100%; }}
        .panel {{ background: #ffffff; padding: 2.5rem 2.25rem; border-radius: 18px; box-shadow: 0 20px 60px rgba(15, 23, 42, 0.08); border: 1px solid #e2e8f0; box-sizing: border-box; }}
        .panel:target {{ border-color: #2563eb; }}
        h1 {{ margin: 0; font-size: 1.8rem; text-align: center; }}
        h2 {{ margin: 0 0 1rem; font-size: 1.35rem; }}
        label {{ display: block; margin-top: 1.2rem; font-weight: 600; letter-spacing: 0.01em; color: #0f172a; }}
        input {{ width: 100%; padding: 0.85rem; margin-top: 0.65rem; border-radius: 10px; border: 1px solid #cbd5f5; background: #f8fafc; color: #0f172a; font-size: 1rem; box-sizing: border-box; }}
        input:focus {{ outline: none; border-color: #2563eb; box-shadow: 0 0 0 3px rgba(37, 99, 235, 0.15); }}
        button {{ margin-top: 2rem; width: 100%; padding: 0.95rem; border: none; border-radius: 10px; background: #2563eb; color: #ffffff; font-weight: 600; font-size: 1.05rem; cursor: pointer; transition: background 0.15s ease; }}
        button:hover {{ background: #1d4ed8; }}
        .flash-message {{ width: 100%; padding: 1rem 1.25rem; border-radius: 10px; font-weight: 600; border: 1px solid transparent; box-sizing: border-box; }}
        .flash-message.success {{ background: #ecfdf3; border-color: #bbf7d0; color: #166534; }}
        .flash-message.info {{ background: #eff6ff; border-color: #bfdbfe; color: #1d4ed8; }}
        .flash-message.warning {{ background: #fffbeb; border-color: #fde68a; color: #92400e; }}
        .flash-message.danger {{ background: #fef2f2; border-color: #fecaca; color: #b91c1c; }}
        .app-footer {{ margin-top: 2.5rem; text-align: center; font-size: 0.85rem; color: #64748b; }}
    </style>
</head>
<body>
    <main>
        <h1>{title}</h1>
        {flash_html}
        <div class="panels">
            <section class="panel" id="login">
                <h2>Sign in</h2>
                <form method="post" action="/login_process">
                    <label for="login-username">Username</label>
                    <input id="login-username" name="username" autocomplete="username" required>
                    <label for="login-password">Password</label>
                    <input id="login-password" type="password" name="password" autocomplete="current-password" required>
                    <button type="submit">Sign in</button>
                </form>
            </section>
            <section class="panel" id="register">
                <h2>Create account</h2>
                <form method="post" action="/register_process">
                    <label for="register-username">Username</label>
                    <input id="register-username" name="username" autocomplete="username" required>
                    <label for="register-email">Email</label>
                    <input id="register-email" type="email" name="email" autocomplete="email" required>
                    <label for="register-password">Password</label>
                    <input id="register-password" type="password" name="password" autocomplete="new-password" required>
                    <button type="submit">Sign up</button>
                </form>
            </section>
        </div>
        {footer}
    </main>
</body>
</html>"#,
        title = APP_TITLE,
        flash_html = flash_html,
        footer = footer,
    )
}

pub struct DashboardLayout<'a> {
    pub username: &'a str,
    pub flash_html: &'a str,
    pub search_query: &'a str,
    pub search_html: &'a str,
    pub sidebar_html: &'a str,
    pub sections_html: &'a str,
    pub tree_json: &'a str,
}

pub fn render_dashboard_page(layout: DashboardLayout<'_>) -> String {
    let DashboardLayout {
        username,
        flash_html,
        search_query,
        search_html,
        sidebar_html,
        sections_html,
        tree_json,
    } = layout;

    let username = escape_html(username);
    let search_query = escape_html(search_query);
    let footer = render_footer();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="robots" content="noindex,nofollow">
    <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/5.15.4/css/all.min.css">
    <style>
        :root {{ color-scheme: light; }}
        body {{ font-family: "Helvetica Neue", Arial, sans-serif; margin: 0; background: #f8fafc; color: #0f172a; min-height: 100vh; display: flex; flex-direction: column; }}
        header {{ background: #ffffff; padding: 1.5rem 2rem; display: flex; justify-content: space-between; align-items: center; flex-wrap: wrap; gap: 1rem; border-bottom: 1px solid #e2e8f0; }}
        header h1 {{ margin: 0; font-size: 1.6rem; }}
        .header-actions {{ display: flex; align-items: center; gap: 1rem; color: #475569; }}
        .logout-link {{ padding: 0.55rem 1.2rem; border-radius: 999px; background: #2563eb; color: #ffffff; text-decoration: none; font-weight: 600; }}
        .logout-link:hover {{ background: #1d4ed8; }}
        .layout {{ flex: 1; display: flex; min-height: 0; }}
        .sidebar-nav {{ width: 280px; background: #0f172a; padding: 1rem 0; overflow-y: auto; }}
        .sidebar-nav a {{ display: flex; align-items: center; gap: 0.75rem; padding: 0.65rem 1.5rem; color: #cbd5f5; text-decoration: none; font-size: 0.95rem; }}
        .sidebar-nav a:hover {{ background: #1e293b; color: #ffffff; }}
        .sidebar-nav a.active {{ background: #2563eb; color: #ffffff; }}
        .sidebar-nav i {{ width: 1.25rem; text-align: center; }}
        main {{ flex: 1; padding: 2rem; overflow-y: auto; box-sizing: border-box; }}
        .category-section {{ display: none; }}
        .category-section.active {{ display: block; }}
        .category-section ul {{ list-style: none; padding-left: 1.25rem; border-left: 2px solid #e2e8f0; }}
        .category-section li {{ margin: 0.35rem 0; }}
        .category-section .folder > span {{ font-weight: 600; }}
        .category-section a {{ color: #2563eb; text-decoration: none; }}
        .category-section a:hover {{ text-decoration: underline; }}
        .flash-message {{ padding: 1rem 1.25rem; border-radius: 10px; margin-bottom: 1.5rem; font-weight: 600; border: 1px solid transparent; }}
        .flash-message.success {{ background: #ecfdf3; border-color: #bbf7d0; color: #166534; }}
        .flash-message.info {{ background: #eff6ff; border-color: #bfdbfe; color: #1d4ed8; }}
        .flash-message.warning {{ background: #fffbeb; border-color: #fde68a; color: #92400e; }}
        .flash-message.danger {{ background: #fef2f2; border-color: #fecaca; color: #b91c1c; }}
        .search-form input {{ padding: 0.55rem 0.9rem; border-radius: 999px; border: 1px solid #cbd5f5; background: #f8fafc; color: inherit; min-width: 220px; }}
        .search-results {{ background: #ffffff; border: 1px solid #e2e8f0; border-radius: 12px; padding: 1rem 1.5rem; margin-bottom: 1.5rem; }}
        .search-results h2 {{ margin-top: 0; font-size: 1.15rem; }}
        .search-results ul {{ list-style: none; padding: 0; }}
        .search-results li {{ margin: 0.45rem 0; }}
        .search-results a {{ color: #2563eb; text-decoration: none; }}
        .item-path {{ color: #64748b; font-size: 0.85rem; margin-left: 0.5rem; }}
        .theme-toggle {{ display: flex; align-items: center; gap: 0.4rem; font-size: 0.8rem; font-weight: 600; cursor: pointer; }}
        body.dark-mode {{ background: #0b1120; color: #e2e8f0; }}
        body.dark-mode header, body.dark-mode .search-results {{ background: #111827; border-color: #1f2937; }}
        body.dark-mode .header-actions {{ color: #cbd5f5; }}
        body.dark-mode .search-form input {{ background: #1f2937; border-color: #334155; }}
        body.dark-mode .category-section ul {{ border-left-color: #1f2937; }}
        body.dark-mode .category-section a, body.dark-mode .search-results a {{ color: #93c5fd; }}
        .empty {{ color: #64748b; }}
        .app-footer {{ margin-top: 3rem; text-align: center; font-size: 0.85rem; color: #94a3b8; }}
        @media (max-width: 768px) {{
            .layout {{ flex-direction: column; }}
            .sidebar-nav {{ width: 100%; }}
        }}
    </style>
</head>
<body class="dashboard-body">
    <header>
        <h1>{title}</h1>
        <div class="header-actions">
            <form class="search-form" method="get" action="/dashboard" role="search">
                <input type="search" name="q" value="{search_query}" placeholder="Search resources" minlength="2" aria-label="Search resources">
            </form>
            <label class="theme-toggle">
                <input type="checkbox" id="themeToggle">
                <span id="themeLabel">LIGHT</span>
            </label>
            <span>Signed in as <strong>{username}</strong></span>
            <a class="logout-link" href="/logout">Log out</a>
        </div>
    </header>
    <div class="layout">
        <nav class="sidebar-nav">
            {sidebar_html}
        </nav>
        <main>
            {flash_html}
            {search_html}
            {sections_html}
            {footer}
        </main>
    </div>
    <script type="application/json" id="osint-data">{tree_json}</script>
    <script>
        (function () {{
            var toggle = document.getElementById('themeToggle');
            var label = document.getElementById('themeLabel');
            function applyTheme(theme) {{
                document.body.classList.toggle('dark-mode', theme === 'dark');
                document.body.classList.toggle('light-mode', theme !== 'dark');
                toggle.checked = theme === 'dark';
                label.textContent = theme === 'dark' ? 'DARK' : 'LIGHT';
            }}
            applyTheme(localStorage.getItem('theme') || 'light');
            toggle.addEventListener('change', function () {{
                var theme = toggle.checked ? 'dark' : 'light';
                applyTheme(theme);
                localStorage.setItem('theme', theme);
            }});
        }})();
        document.querySelectorAll('.sidebar-nav a[data-id]').forEach(function (link) {{
            link.addEventListener('click', function (event) {{
                event.preventDefault();
                var target = link.getAttribute('data-id');
                document.querySelectorAll('.sidebar-nav a[data-id]').forEach(function (other) {{
                    other.classList.toggle('active', other === link);
                }});
                document.querySelectorAll('.category-section').forEach(function (section) {{
                    section.classList.toggle('active', section.getAttribute('data-id') === target);
                }});
            }});
        }});
    </script>
</body>
</html>"#,
        title = APP_TITLE,
        username = username,
        flash_html = flash_html,
        search_query = search_query,
        search_html = search_html,
        sidebar_html = sidebar_html,
        sections_html = sections_html,
        tree_json = tree_json,
        footer = footer,
    )
}

pub fn render_footer() -> String {
    let current_year = Utc::now().year();
    format!(
        r#"<footer class="app-footer">© {year} OSINT Dashboard</footer>"#,
        year = current_year
    )
}

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Makes serialized JSON safe to inline in a `<script>` element.
pub fn escape_script_json(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn script_json_stays_valid_json() {
        let escaped = escape_script_json(r#"{"name":"</script> & more"}"#);
        assert!(!escaped.contains("</script>"));
        let value: serde_json::Value = serde_json::from_str(&escaped).expect("valid json");
        assert_eq!(value["name"], "</script> & more");
    }

    #[test]
    fn dashboard_escapes_username() {
        let html = render_dashboard_page(DashboardLayout {
            username: "<img src=x>",
            flash_html: "",
            search_query: "\"><script>",
            search_html: "",
            sidebar_html: "",
            sections_html: "",
            tree_json: "{}",
        });
        assert!(html.contains("&lt;img src=x&gt;"));
        assert!(!html.contains("<img src=x>"));
        assert!(html.contains(r#"value="&quot;&gt;&lt;script&gt;""#));
    }

    #[test]
    fn dashboard_remembers_theme_choice() {
        let html = render_dashboard_page(DashboardLayout {
            username: "alice",
            flash_html: "",
            search_query: "",
            search_html: "",
            sidebar_html: "",
            sections_html: "",
            tree_json: "{}",
        });
        assert!(html.contains(r#"id="themeToggle""#));
        assert!(html.contains("localStorage.setItem('theme', theme)"));
        assert!(html.contains(r#"<form class="search-form" method="get" action="/dashboard""#));
    }

    #[test]
    fn login_page_posts_to_both_processes() {
        let html = render_login_register_page("");
        assert!(html.contains(r#"action="/login_process""#));
        assert!(html.contains(r#"action="/register_process""#));
        assert!(html.contains(r#"id="register""#));
    }
}
