//! Built-in element defaults.

/// User-agent stylesheet applied beneath every author sheet.
pub const USER_AGENT_CSS: &str = r#"
html, address, blockquote, body, center, dd, div, dl, dt, fieldset, figcaption,
figure, footer, form, h1, h2, h3, h4, h5, h6, header, hr, legend, main, nav, ol,
p, pre, section, article, aside, ul, details, summary, dialog {
    display: block;
}
head, link, meta, script, style, title, template, noscript { display: none; }
li { display: list-item; }
table { display: table; }
thead { display: table-header-group; }
tbody { display: table-row-group; }
tfoot { display: table-footer-group; }
tr { display: table-row; }
td, th { display: table-cell; }
button, input, select, textarea, meter, progress { display: inline-block; }

body { margin: 8px; }
p, blockquote, figure, dl, ul, ol { margin-top: 1em; margin-bottom: 1em; }
blockquote, figure { margin-left: 40px; margin-right: 40px; }
ul, ol { padding-left: 40px; }
ul { list-style-type: disc; }
ol { list-style-type: decimal; }

h1 { font-size: 2em; margin-top: 0.67em; margin-bottom: 0.67em; font-weight: bold; }
h2 { font-size: 1.5em; margin-top: 0.83em; margin-bottom: 0.83em; font-weight: bold; }
h3 { font-size: 1.17em; margin-top: 1em; margin-bottom: 1em; font-weight: bold; }
h4 { margin-top: 1.33em; margin-bottom: 1.33em; font-weight: bold; }
h5 { font-size: 0.83em; margin-top: 1.67em; margin-bottom: 1.67em; font-weight: bold; }
h6 { font-size: 0.67em; margin-top: 2.33em; margin-bottom: 2.33em; font-weight: bold; }

b, strong, th { font-weight: bold; }
i, em, cite, var, dfn, address { font-style: italic; }
small { font-size: smaller; }
big { font-size: larger; }
pre, code, kbd, samp { font-family: monospace; }
pre { white-space: pre; }
th, center, button { text-align: center; }
a { color: #0000ee; text-decoration: underline; cursor: pointer; }
hr { color: gray; border-style: inset; border-width: 1px; margin: 0.5em auto; }
"#;
