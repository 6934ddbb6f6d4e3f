//! HTML rendering for the viewer pages

/// Escape text for embedding in HTML
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// The log file list page
pub fn list_page(names: &[String]) -> String {
    let mut items = String::new();
    for name in names {
        let name = escape_html(name);
        items.push_str(&format!(
            "\t\t\t<li><a href=\"/logs?file={name}\">{name}</a></li>\n"
        ));
    }
    format!(
        r#"<html>
<head>
	<title>Log Viewer</title>
	<style>
		body {{ font-family: sans-serif; background: #f4f4f4; }}
		ul {{ list-style: none; padding: 0; }}
		li {{ margin: 8px 0; }}
		a {{ color: #007bff; text-decoration: none; font-weight: bold; }}
		a:hover {{ text-decoration: underline; }}
	</style>
</head>
<body>
	<h2>Available Logs</h2>
	<ul>
{items}	</ul>
</body>
</html>"#
    )
}

/// A single log file's contents, with an auto-refresh so a file being
/// appended to stays current in the browser
pub fn file_page(name: &str, content: &str) -> String {
    let name = escape_html(name);
    let content = escape_html(content);
    format!(
        r#"<html>
<head>
	<title>Log Viewer</title>
	<meta http-equiv="refresh" content="5">
	<style>
		body {{ background: #111; color: #0f0; font-family: monospace; }}
		pre {{ background: #000; padding: 15px; border-radius: 8px; overflow-x: auto; }}
		a {{ color: #08f; text-decoration: none; }}
		.header {{ margin-bottom: 10px; }}
	</style>
</head>
<body>
	<div class="header">
		<h2>Viewing Log: {name}</h2>
		<a href="/logs">Back to log list</a>
	</div>
	<pre>{content}</pre>
</body>
</html>"#
    )
}
