use std::fmt::Write as _;

use handlebars::Handlebars;
use serde::Serialize;

use crate::config::CardStyle;
use crate::error::ShoutoutError;
use crate::projector::CardRecord;
use crate::session::SessionView;

pub const ERROR_TITLE: &str = "Error";
pub const UPLOAD_PROMPT: &str = "Click to upload Excel file";
pub const UPLOAD_HINT: &str = "(.xlsx, .xls)";
pub const IMPORT_AGAIN: &str = "Import Again";

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{title}}</title>
<style>
body { background: #f3f4f6; font-family: sans-serif; margin: 0; }
main { max-width: 72rem; margin: 0 auto; padding: 1rem; }
h1 { text-align: center; }
.upload { border: 2px dashed #F7931E; border-radius: .5rem; padding: 2rem; text-align: center; background: #fff; }
.upload label { color: #F7931E; font-weight: 500; display: block; }
.upload .hint { color: #6b7280; font-size: .875rem; }
.alert { border: 1px solid #dc2626; color: #dc2626; border-radius: .5rem; padding: 1rem; max-width: 28rem; margin: 1.5rem auto; }
.alert h2 { font-size: 1rem; margin: 0 0 .25rem; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(18rem, 1fr)); gap: 1.5rem; }
.card { background: #fff; border-radius: .5rem; box-shadow: 0 4px 12px rgba(0,0,0,.12); display: flex; flex-direction: column; overflow: hidden; }
.card header { background: linear-gradient(to right, #F7931E, #FFA94D, #FFBE7A); color: #fff; padding: 1rem; font-size: 1.25rem; font-weight: 600; }
.card .quote { color: #374151; font-size: 1.125rem; font-style: italic; padding: 1rem; flex-grow: 1; }
.card img { max-width: 100%; margin: 1rem auto 0; }
.card footer { background: #d1d5db; padding: 1rem; text-align: right; color: #4b5563; font-weight: 700; font-size: .875rem; }
.again { background: #F7931E; color: #fff; border: 0; border-radius: .375rem; padding: .5rem 1rem; width: 100%; margin-top: 2rem; }
</style>
</head>
<body>
<main>
<h1>{{title}}</h1>
{{#if show_upload}}
<section class="upload">
<label for="file-upload">{{upload_prompt}}</label>
<span class="hint">{{upload_hint}}</span>
</section>
{{/if}}
{{#if error}}
<div class="alert" role="alert">
<h2>{{error_title}}</h2>
<p>{{error}}</p>
</div>
{{/if}}
{{#if cards}}
<div class="grid">
{{#each cards}}
<article class="card">
{{#if ../show_heading}}<header>{{teammate_name}}</header>{{/if}}
<p class="quote">&quot;{{quote_text}}&quot;</p>
{{#if photo_key}}<img src="{{photo_key}}" alt="{{attributed_name}}">{{/if}}
<footer>{{../footer_prefix}}{{attributed_name}}</footer>
</article>
{{/each}}
</div>
<button type="button" class="again">{{import_again}}</button>
{{/if}}
</main>
</body>
</html>
"#;

#[derive(Serialize)]
struct PageData<'a> {
    title: &'a str,
    error: Option<&'a str>,
    error_title: &'a str,
    cards: &'a [CardRecord],
    show_upload: bool,
    show_heading: bool,
    footer_prefix: &'a str,
    upload_prompt: &'a str,
    upload_hint: &'a str,
    import_again: &'a str,
}

/// Standalone HTML page. All card text is HTML-escaped.
pub fn render_html(
    view: &SessionView<'_>,
    style: CardStyle,
    title: &str,
) -> Result<String, ShoutoutError> {
    let data = PageData {
        title,
        error: view.error,
        error_title: ERROR_TITLE,
        cards: view.cards,
        show_upload: view.show_upload,
        show_heading: style.show_heading,
        footer_prefix: style.footer_prefix,
        upload_prompt: UPLOAD_PROMPT,
        upload_hint: UPLOAD_HINT,
        import_again: IMPORT_AGAIN,
    };
    Ok(Handlebars::new().render_template(PAGE_TEMPLATE, &data)?)
}

pub fn render_text(view: &SessionView<'_>, style: CardStyle, title: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count().max(1)));

    if view.show_upload {
        let _ = writeln!(out, "\n{UPLOAD_PROMPT} {UPLOAD_HINT}");
    }
    if let Some(error) = view.error {
        let _ = writeln!(out, "\n[{ERROR_TITLE}] {error}");
    }
    for card in view.cards {
        out.push('\n');
        if style.show_heading {
            let _ = writeln!(out, "## {}", card.teammate_name);
        }
        let _ = writeln!(out, "\"{}\"", card.quote_text);
        if let Some(photo) = &card.photo_key {
            let _ = writeln!(out, "[photo: {photo}]");
        }
        let _ = writeln!(out, "{}{}", style.footer_prefix, card.attributed_name);
    }
    out
}

#[derive(Serialize)]
struct JsonView<'a> {
    title: &'a str,
    error: Option<&'a str>,
    cards: &'a [CardRecord],
}

pub fn render_json(view: &SessionView<'_>, title: &str) -> Result<String, ShoutoutError> {
    let mut out = serde_json::to_string_pretty(&JsonView {
        title,
        error: view.error,
        cards: view.cards,
    })?;
    out.push('\n');
    Ok(out)
}
