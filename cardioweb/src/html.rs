//! HTML content helpers for the cardioweb UI.
//!
//! Exports the static landing page (`INDEX_PAGE`) and the render
//! helpers for the glossary, data table, and global statistics pages.
//! Keep large HTML blobs here to avoid runtime template dependencies.
//!
use cardiodata::record::{COLUMN_LABELS, GLOSSARY};

use crate::stats::{CDC_STATS, StatsOutcome};

/// HTML page for the landing view with links to the data pages
pub(crate) const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Heart Failure Records</title>
    <style>
        :root {
            --bg-dark: #1a1a1a;
            --panel-bg: #252526;
            --accent: #007acc;
            --text: #cccccc;
        }

        body {
            margin: 0;
            background: var(--bg-dark);
            color: var(--text);
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
        }

        nav {
            background: var(--panel-bg);
            border-bottom: 1px solid #333;
            padding: 12px 20px;
        }

        nav a {
            color: var(--accent);
            text-decoration: none;
            margin-right: 18px;
        }

        main {
            max-width: 760px;
            margin: 40px auto;
            padding: 0 20px;
        }

        h1 { color: #ffffff; }
    </style>
</head>
<body>
    <nav>
        <a href="/">Home</a>
        <a href="/about">About the Data</a>
        <a href="/data">Clinical Records</a>
        <a href="/global-stats">Global Statistics</a>
    </nav>
    <main>
        <h1>Heart Failure Clinical Records</h1>
        <p>This site displays a set of clinical observations collected
        from heart failure patients: demographics, indicator flags,
        lab measurements, and the follow-up outcome.</p>
        <p>Use <a href="/data">Clinical Records</a> to browse the
        table, <a href="/about">About the Data</a> for what each field
        means, and <a href="/global-stats">Global Statistics</a> for
        heart-health topics from Health.gov.</p>
    </main>
</body>
</html>"#;

/// Shared style block for the rendered pages, matching the landing page.
const PAGE_STYLE: &str = "
    :root {
        --bg-dark: #1a1a1a;
        --panel-bg: #252526;
        --accent: #007acc;
        --text: #cccccc;
    }
    body {
        margin: 0;
        background: var(--bg-dark);
        color: var(--text);
        font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
    }
    nav {
        background: var(--panel-bg);
        border-bottom: 1px solid #333;
        padding: 12px 20px;
    }
    nav a {
        color: var(--accent);
        text-decoration: none;
        margin-right: 18px;
    }
    main { margin: 30px 20px; overflow-x: auto; }
    h1, h2 { color: #ffffff; }
    table.data {
        border-collapse: collapse;
        font-size: 14px;
    }
    table.data th {
        background: var(--panel-bg);
        color: #ffffff;
        text-align: left;
    }
    table.data th, table.data td {
        border: 1px solid #333;
        padding: 6px 10px;
    }
    table.data tr:nth-child(even) td { background: #202021; }
    a { color: var(--accent); }
    .message { color: #e0a030; }
";

/// Wrap a body fragment in the shared page chrome.
fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>{PAGE_STYLE}</style>
</head>
<body>
    <nav>
        <a href="/">Home</a>
        <a href="/about">About the Data</a>
        <a href="/data">Clinical Records</a>
        <a href="/global-stats">Global Statistics</a>
    </nav>
    <main>
{body}
    </main>
</body>
</html>"#
    )
}

/// Escape text for interpolation into HTML.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the glossary page describing every field in the dataset.
pub(crate) fn render_about() -> String {
    let mut body = String::from("<h1>About the Data</h1>\n<table class=\"data\">\n");
    body.push_str("<tr><th>Field</th><th>Description</th></tr>\n");
    for (field, description) in GLOSSARY {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            escape(field),
            escape(description)
        ));
    }
    body.push_str("</table>");
    page("About the Data", &body)
}

/// Render formatted record rows as the data table page.
pub(crate) fn render_data(rows: &[Vec<String>]) -> String {
    let mut body = String::from("<h1>Clinical Records</h1>\n<table class=\"data\">\n<tr>");
    for label in COLUMN_LABELS {
        body.push_str(&format!("<th>{}</th>", escape(label)));
    }
    body.push_str("</tr>\n");
    for row in rows {
        body.push_str("<tr>");
        for cell in row {
            body.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        body.push_str("</tr>\n");
    }
    body.push_str("</table>");
    page("Clinical Records", &body)
}

/// Render the global statistics page: live topics plus the CDC
/// reference block, or the degraded message when the upstream call
/// failed.
pub(crate) fn render_global_stats(outcome: &StatsOutcome) -> String {
    let mut body = String::from("<h1>Global Heart Health Statistics</h1>\n");
    match outcome {
        StatsOutcome::Unavailable(message) => {
            body.push_str(&format!(
                "<p class=\"message\">{}</p>",
                escape(message)
            ));
        }
        StatsOutcome::Topics(topics) => {
            body.push_str("<h2>Health.gov Topics</h2>\n<table class=\"data\">\n");
            body.push_str("<tr><th>Title</th><th>Category</th><th>Last Update</th></tr>\n");
            for topic in topics {
                body.push_str(&format!(
                    "<tr><td><a href=\"{}\">{}</a></td><td>{}</td><td>{}</td></tr>\n",
                    escape(&topic.url),
                    escape(&topic.title),
                    escape(&topic.category),
                    escape(&topic.last_update)
                ));
            }
            body.push_str("</table>\n<h2>Reference Statistics</h2>\n<table class=\"data\">\n");
            body.push_str(
                "<tr><th>Country</th><th>Fact</th><th>Value</th><th>Source</th><th>Year</th></tr>\n",
            );
            for stat in CDC_STATS {
                body.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                    escape(stat.country),
                    escape(stat.fact),
                    escape(stat.value),
                    escape(stat.source),
                    escape(stat.year)
                ));
            }
            body.push_str("</table>");
        }
    }
    page("Global Statistics", &body)
}
