use crate::domain::model::CommandResult;

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        title = escape_html(title),
        body = body
    )
}

pub fn home(title: &str, commands: &[(&str, &str)]) -> String {
    let items: String = commands
        .iter()
        .map(|(name, help)| {
            format!(
                "<li><code>{}</code>: {}</li>\n",
                escape_html(name),
                escape_html(help)
            )
        })
        .collect();

    let body = format!(
        "<h1>{}</h1>\n<p><a href=\"/run-command/\">Run the hello command</a></p>\n\
         <h2>Management commands</h2>\n<ul>\n{}</ul>",
        escape_html(title),
        items
    );
    layout(title, &body)
}

pub fn run_command_form() -> String {
    let body = "<h1>Run hello command</h1>\n\
        <form method=\"post\" action=\"/run-command/\">\n\
        <label>Name <input type=\"text\" name=\"name\" value=\"Web User\"></label>\n\
        <label><input type=\"checkbox\" name=\"shout\"> Shout</label>\n\
        <label>Count <input type=\"number\" name=\"count\" value=\"1\" min=\"0\"></label>\n\
        <button type=\"submit\">Run</button>\n\
        </form>";
    layout("Run command", body)
}

pub fn command_result(result: &CommandResult, name: &str) -> String {
    let status = if result.success { "Success" } else { "Failed" };
    let mut body = format!(
        "<h1>Command result for {}</h1>\n<p class=\"status\">{}: {}</p>\n",
        escape_html(name),
        status,
        escape_html(&result.message)
    );
    if let Some(output) = &result.output {
        body.push_str(&format!("<pre class=\"output\">{}</pre>\n", escape_html(output)));
    }
    if let Some(error) = &result.error {
        body.push_str(&format!("<pre class=\"error\">{}</pre>\n", escape_html(error)));
    }
    body.push_str("<p><a href=\"/run-command/\">Run again</a></p>");
    layout("Command result", &body)
}

pub fn bad_request(message: &str) -> String {
    let body = format!(
        "<h1>Bad request</h1>\n<p>{}</p>\n<p><a href=\"/run-command/\">Back</a></p>",
        escape_html(message)
    );
    layout("Bad request", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>alert('x') & \"y\"</script>"),
            "&lt;script&gt;alert(&#x27;x&#x27;) &amp; &quot;y&quot;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_result_page_escapes_name_and_output() {
        let result = CommandResult::succeeded("Hello, <b>!\n".to_string(), "ok");
        let html = command_result(&result, "<b>");

        assert!(html.contains("Command result for &lt;b&gt;"));
        assert!(html.contains("Hello, &lt;b&gt;!"));
        assert!(!html.contains("<b>"));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn test_home_lists_commands() {
        let html = home("🎵 LuteMusic", &[("hello", "greets")]);
        assert!(html.contains("<h1>🎵 LuteMusic</h1>"));
        assert!(html.contains("<code>hello</code>: greets"));
    }
}
