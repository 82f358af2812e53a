// src/core/parser.rs

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static FORM: Lazy<Selector> = Lazy::new(|| Selector::parse("form").unwrap());
static INPUT: Lazy<Selector> = Lazy::new(|| Selector::parse("input").unwrap());
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    /// Raw `action` attribute; `None` when the form posts back to its own page.
    pub action: Option<String>,
    pub method: String,
    pub inputs: Vec<FormInput>,
}

impl Form {
    /// True when at least one `<input>` name looks like an anti-CSRF token.
    pub fn has_csrf_token(&self) -> bool {
        self.inputs.iter().filter_map(|i| i.name.as_deref()).any(|name| {
            let name = name.to_lowercase();
            name.contains("csrf") || name.contains("token")
        })
    }
}

/// Forms and hyperlinks extracted from one HTML document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    pub forms: Vec<Form>,
    /// Raw `href` values in document order.
    pub links: Vec<String>,
}

pub fn parse_page(body: &str) -> ParsedPage {
    let document = Html::parse_document(body);

    let forms = document.select(&FORM).map(parse_form).collect();
    let links = document
        .select(&LINK)
        .filter_map(|a| a.value().attr("href"))
        .map(|href| href.trim().to_string())
        .collect();

    ParsedPage { forms, links }
}

fn parse_form(form: ElementRef<'_>) -> Form {
    let element = form.value();
    let inputs = form
        .select(&INPUT)
        .map(|input| FormInput {
            name: input.value().attr("name").map(String::from),
        })
        .collect();

    Form {
        action: element
            .attr("action")
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty()),
        method: element.attr("method").unwrap_or("get").to_uppercase(),
        inputs,
    }
}
