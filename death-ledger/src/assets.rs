//! The stylesheet and preview page that accompany the fonts

use crate::{config::BuildConfig, outline::coverage, style::Style};

pub const CSS_FILE_NAME: &str = "font.css";
pub const HTML_FILE_NAME: &str = "index.html";

/// The class the stylesheet defines for setting text in the family.
const CONVENIENCE_CLASS: &str = "death-ledger";

/// The file name of one style's font, e.g. `DeathLedger-BoldItalic.ttf`.
pub fn font_file_name(config: &BuildConfig, style: Style) -> String {
    format!(
        "{}-{}.ttf",
        config.postscript_family(),
        style.postscript_suffix()
    )
}

/// One `@font-face` block per style, then a rule for the family.
pub fn font_css(config: &BuildConfig) -> String {
    let family = css_string(&config.family_name);
    let mut css: String = Style::ALL
        .into_iter()
        .map(|style| {
            format!(
                "@font-face {{\n  font-family: '{family}';\n  src: url('./{}') format('truetype');\n  font-weight: {};\n  font-style: {};\n}}\n\n",
                font_file_name(config, style),
                style.css_weight(),
                style.css_style(),
            )
        })
        .collect();
    css.push_str(&format!(
        ".{CONVENIENCE_CLASS} {{\n  font-family: '{family}', serif;\n}}\n"
    ));
    css
}

/// A page that loads the stylesheet and shows every covered character in
/// each style.
pub fn index_html(config: &BuildConfig) -> String {
    let family = escape_html(&config.family_name);
    let sample = escape_html(&coverage().collect::<String>());
    let rows: String = Style::ALL
        .into_iter()
        .map(|style| {
            format!(
                "    <section>\n      <h2>{}</h2>\n      <p style=\"font-weight: {}; font-style: {}\">{sample}</p>\n    </section>\n",
                style.subfamily_name(),
                style.css_weight(),
                style.css_style(),
            )
        })
        .collect();
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>{family}</title>
  <link rel="stylesheet" href="./{CSS_FILE_NAME}" />
  <style>
    body {{ margin: 2rem; background: #111; color: #f5f5f5; }}
    h2 {{ font-family: sans-serif; font-size: 0.9rem; opacity: 0.7; }}
    p {{ font-size: 2rem; line-height: 1.35; overflow-wrap: anywhere; }}
  </style>
</head>
<body class="{CONVENIENCE_CLASS}">
  <main>
    <h1>{family}</h1>
{rows}  </main>
</body>
</html>
"#
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Escape a value for a single-quoted css string.
fn css_string(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}
