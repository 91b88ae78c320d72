// Card rendering into an owned HTML element tree

use charcards_fetch::CharacterRecord;

const VOID_ELEMENTS: &[&str] = &["img", "br", "hr", "link", "meta", "input"];
const INDENT: &str = "  ";

/// A minimal HTML node: tag, classes, attributes, optional text and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    classes: Vec<&'static str>,
    attributes: Vec<(&'static str, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn with_class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    pub fn with_attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn append(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn tag(&self) -> &str {
        self.tag
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Depth-first search, starting with `self`
    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_class(class))
    }

    pub fn find_by_tag(&self, tag: &str) -> Option<&Element> {
        if self.tag == tag {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_tag(tag))
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out, 0);
        out
    }

    /// Serialize with two-space indentation starting at `depth`.
    pub fn write_html(&self, out: &mut String, depth: usize) {
        let indent = INDENT.repeat(depth);
        out.push_str(&indent);
        out.push('<');
        out.push_str(self.tag);

        if !self.classes.is_empty() {
            out.push_str(&format!(r#" class="{}""#, escape_html(&self.classes.join(" "))));
        }
        for (name, value) in &self.attributes {
            out.push_str(&format!(r#" {}="{}""#, name, escape_html(value)));
        }

        if VOID_ELEMENTS.contains(&self.tag) {
            out.push_str(" />\n");
            return;
        }
        out.push('>');

        if self.children.is_empty() {
            if let Some(ref text) = self.text {
                out.push_str(&escape_html(text));
            }
            out.push_str(&format!("</{}>\n", self.tag));
            return;
        }

        out.push('\n');
        if let Some(ref text) = self.text {
            out.push_str(&INDENT.repeat(depth + 1));
            out.push_str(&escape_html(text));
            out.push('\n');
        }
        for child in &self.children {
            child.write_html(out, depth + 1);
        }
        out.push_str(&indent);
        out.push_str(&format!("</{}>\n", self.tag));
    }
}

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

/// The visual unit for one character: a picture area and a footer with
/// name and species.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    element: Element,
}

impl Card {
    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn name(&self) -> Option<&str> {
        self.element.find_by_class("character-name")?.text()
    }

    pub fn species(&self) -> Option<&str> {
        self.element
            .find_by_class("card-footer")?
            .children()
            .get(1)?
            .text()
    }

    pub fn image_src(&self) -> Option<&str> {
        self.element.find_by_tag("img")?.attr("src")
    }

    pub fn to_html(&self) -> String {
        self.element.to_html()
    }
}

/// The grid surface cards are mounted into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    cards: Vec<Card>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn to_element(&self) -> Element {
        self.cards
            .iter()
            .fold(Element::new("div").with_class("characters-grid"), |grid, card| {
                grid.with_child(card.element.clone())
            })
    }

    pub fn to_html(&self) -> String {
        self.to_element().to_html()
    }
}

pub fn render_card(record: &CharacterRecord) -> Card {
    let picture = Element::new("div").with_class("picture-wrap").with_child(
        Element::new("img")
            .with_attr("src", record.image_url.as_str())
            .with_attr("title", record.name.as_str())
            .with_attr("alt", ""),
    );

    let footer = Element::new("div")
        .with_class("card-footer")
        .with_child(
            Element::new("h3")
                .with_class("character-name")
                .with_text(record.name.as_str()),
        )
        .with_child(Element::new("div").with_text(record.species.as_str()));

    Card {
        element: Element::new("div")
            .with_class("card")
            .with_child(picture)
            .with_child(footer),
    }
}

pub fn mount(container: &mut Container, card: Card) {
    container.cards.push(card);
}

pub fn clear(container: &mut Container) {
    container.cards.clear();
}

/// Replace the container's content with one card per record, in order.
pub fn render_all(container: &mut Container, records: &[CharacterRecord]) {
    clear(container);
    for record in records {
        mount(container, render_card(record));
    }
}
