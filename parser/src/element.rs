use thiserror::Error;

#[derive(Clone, Debug, PartialEq)]
pub enum Span {
    Plain(String),
    Bold(String),
    Italic(String),
    Code(String),
    Link { text: String, location: String },
    Image { alt: String, location: String },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Leaf {
        tag: Option<String>,
        value: String,
        props: Vec<(String, String)>,
    },
    Parent {
        tag: String,
        children: Vec<Element>,
        props: Vec<(String, String)>,
    },
}

impl Element {
    pub fn leaf<S: Into<String>>(tag: Option<&str>, value: S) -> Self {
        Element::Leaf {
            tag: tag.map(String::from),
            value: value.into(),
            props: vec![],
        }
    }

    pub fn parent<S: Into<String>>(tag: S, children: Vec<Element>) -> Self {
        Element::Parent {
            tag: tag.into(),
            children,
            props: vec![],
        }
    }

    pub fn render(&self) -> Result<String, RenderError> {
        match self {
            Element::Leaf { tag, value, props } => {
                // An img carries everything in its props. Anything else
                // without a value has nothing to show.
                if value.is_empty() && tag.as_deref() != Some("img") {
                    return Err(RenderError::EmptyLeafValue);
                }

                match tag {
                    None => Ok(value.clone()),
                    Some(tag) => Ok(format!(
                        "<{tag}{props}>{value}</{tag}>",
                        tag = tag,
                        props = props_html(props),
                        value = value
                    )),
                }
            }
            Element::Parent {
                tag,
                children,
                props,
            } => {
                if tag.is_empty() || children.is_empty() {
                    return Err(RenderError::InvalidParent);
                }

                let mut ret = format!("<{}{}>", tag, props_html(props));
                for child in children {
                    ret.push_str(&child.render()?);
                }
                ret.push_str("</");
                ret.push_str(tag);
                ret.push('>');

                Ok(ret)
            }
        }
    }
}

fn props_html(props: &[(String, String)]) -> String {
    let mut ret = String::new();

    for (key, value) in props {
        ret.push_str(&format!(" {}=\"{}\"", key, value));
    }

    ret
}

impl From<Span> for Element {
    fn from(span: Span) -> Self {
        match span {
            Span::Plain(text) => Element::leaf(None, text),
            Span::Bold(text) => Element::leaf(Some("b"), text),
            Span::Italic(text) => Element::leaf(Some("i"), text),
            Span::Code(text) => Element::leaf(Some("code"), text),
            Span::Link { text, location } => Element::Leaf {
                tag: Some(String::from("a")),
                value: text,
                props: vec![(String::from("href"), location)],
            },
            Span::Image { alt, location } => Element::Leaf {
                tag: Some(String::from("img")),
                value: String::new(),
                props: vec![
                    (String::from("src"), location),
                    (String::from("alt"), alt),
                ],
            },
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("leaf elements need a value unless they are an img")]
    EmptyLeafValue,
    #[error("parent elements need a tag and at least one child")]
    InvalidParent,
}
