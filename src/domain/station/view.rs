//! Control page markup

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::dto::ControlView;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem; background: #111; color: #eee; }
section { margin-bottom: 1.5rem; }
ul.stations { list-style: none; padding: 0; }
ul.stations li { display: flex; gap: 0.75rem; align-items: center; margin: 0.25rem 0; }
.online { color: #2ecc71; }
.offline { color: #e74c3c; }
.pending { color: #999; }
pre.logs { background: #000; padding: 1rem; max-height: 30rem; overflow-y: auto; }
"#;

pub fn render_page(view: &ControlView) -> String {
    let mut html = String::with_capacity(4096);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n<title>Station Watch</title>\n");
    html.push_str("<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<h1>Station Watch</h1>\n");

    html.push_str("<section>\n<h2>Add station</h2>\n");
    html.push_str("<form method=\"post\" action=\"/\">\n");
    html.push_str(
        "<input type=\"text\" name=\"station\" placeholder=\"EGLL_TWR\" maxlength=\"32\" autofocus>\n",
    );
    html.push_str("<button type=\"submit\" name=\"add_station\" value=\"1\">Add</button>\n");
    html.push_str("</form>\n</section>\n");

    html.push_str("<section>\n<h2>Monitored stations</h2>\n");
    if view.stations.is_empty() {
        html.push_str("<p>No stations monitored.</p>\n");
    } else {
        html.push_str("<ul class=\"stations\">\n");
        for station in &view.stations {
            html.push_str(&station_row(station, view.statuses.get(station).copied()));
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</section>\n");

    html.push_str("<section>\n<h2>Debug</h2>\n<form method=\"post\" action=\"/\">\n");
    html.push_str(&format!(
        "<button type=\"submit\" name=\"toggle_debug\" value=\"1\">Debug mode: {}</button>\n",
        if view.debug_mode { "ON" } else { "OFF" }
    ));
    html.push_str("</form>\n</section>\n");

    html.push_str("<section>\n<h2>Log</h2>\n<pre class=\"logs\">");
    for line in &view.logs {
        html.push_str(&encode_text(line));
        html.push('\n');
    }
    html.push_str("</pre>\n</section>\n</body>\n</html>\n");

    html
}

fn station_row(station: &str, online: Option<bool>) -> String {
    let (class, label) = match online {
        Some(true) => ("online", "ONLINE"),
        Some(false) => ("offline", "OFFLINE"),
        None => ("pending", "PENDING"),
    };

    format!(
        "<li><span class=\"station\">{}</span> <span class=\"{}\">{}</span>\
         <form method=\"post\" action=\"/\">\
         <button type=\"submit\" name=\"remove_station\" value=\"{}\">Remove</button>\
         </form></li>\n",
        encode_text(station),
        class,
        label,
        encode_double_quoted_attribute(station),
    )
}
