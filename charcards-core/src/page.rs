// Standalone HTML document around a card grid

use crate::render::{Container, Element};

#[derive(Debug, Clone)]
pub struct PageOptions {
    pub title: String,
    pub stylesheet: Option<String>,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            title: "Characters".to_string(),
            stylesheet: None,
        }
    }
}

pub fn render_page(container: &Container, options: &PageOptions) -> String {
    let mut head = Element::new("head")
        .with_child(Element::new("meta").with_attr("charset", "utf-8"))
        .with_child(
            Element::new("meta")
                .with_attr("name", "viewport")
                .with_attr("content", "width=device-width, initial-scale=1"),
        )
        .with_child(Element::new("title").with_text(options.title.as_str()));

    if let Some(ref href) = options.stylesheet {
        head.append(
            Element::new("link")
                .with_attr("rel", "stylesheet")
                .with_attr("href", href.as_str()),
        );
    }

    let body = Element::new("body").with_child(
        Element::new("div")
            .with_attr("id", "content")
            .with_child(container.to_element()),
    );

    let document = Element::new("html")
        .with_attr("lang", "en")
        .with_child(head)
        .with_child(body);

    let mut page = String::from("<!DOCTYPE html>\n");
    document.write_html(&mut page, 0);
    page
}
