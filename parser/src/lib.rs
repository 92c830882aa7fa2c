pub mod element;
pub mod inline;

use element::{Element, RenderError};

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BlockKind {
    Heading(u8),
    CodeFence,
    Quote,
    UnorderedList,
    OrderedList,
    Paragraph,
}

// Blocks are separated by at least one blank line, which is to say two
// newlines back to back. A lone newline is part of its block, so a blank
// looking line inside a code fence doesn't split it.
pub fn segment(document: &str) -> Vec<&str> {
    document
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

// First match wins, order matters. A block that almost qualifies, like a
// quote with one unmarked line, degrades to a paragraph whole.
pub fn classify(raw: &str) -> BlockKind {
    let lines: Vec<&str> = raw.split('\n').collect();

    let hashes = raw.bytes().take_while(|byte| *byte == b'#').count();
    if (1..=6).contains(&hashes) && raw[hashes..].starts_with(' ') {
        return BlockKind::Heading(hashes as u8);
    }

    if lines.len() > 1 && lines[0].starts_with("```") && lines[lines.len() - 1].starts_with("```") {
        return BlockKind::CodeFence;
    }

    if raw.starts_with('>') {
        if lines.iter().all(|line| line.starts_with('>')) {
            return BlockKind::Quote;
        }
        return BlockKind::Paragraph;
    }

    if raw.starts_with("- ") {
        if lines.iter().all(|line| line.starts_with("- ")) {
            return BlockKind::UnorderedList;
        }
        return BlockKind::Paragraph;
    }

    if raw.starts_with("1. ") {
        let numbered = lines
            .iter()
            .enumerate()
            .all(|(idx, line)| line.starts_with(&format!("{}. ", idx + 1)));

        if numbered {
            return BlockKind::OrderedList;
        }
    }

    BlockKind::Paragraph
}

pub fn document_tree(document: &str) -> Result<Element, Error> {
    let mut children = vec![];

    for block in segment(document) {
        children.push(block_tree(block, classify(block))?);
    }

    Ok(Element::parent("div", children))
}

fn block_tree(raw: &str, kind: BlockKind) -> Result<Element, Error> {
    match kind {
        BlockKind::Heading(level) => {
            let after_hashes = &raw[level as usize..];
            let text = after_hashes.strip_prefix(' ').unwrap_or(after_hashes);

            Ok(Element::parent(format!("h{}", level), spans_to_children(text)?))
        }
        BlockKind::Paragraph => {
            let text = raw.split('\n').collect::<Vec<&str>>().join(" ");

            Ok(Element::parent("p", spans_to_children(&text)?))
        }
        BlockKind::CodeFence => {
            let lines: Vec<&str> = raw.split('\n').collect();

            // The first and last lines are the fence markers. What's between
            // them is emitted verbatim, never inline parsed.
            let mut value = lines[1..lines.len() - 1].join("\n");
            value.push('\n');

            let code = Element::leaf(Some("code"), value);
            Ok(Element::parent("pre", vec![code]))
        }
        BlockKind::Quote => {
            let text = raw
                .split('\n')
                .map(|line| line.trim_start_matches('>').trim_start())
                .collect::<Vec<&str>>()
                .join(" ");

            Ok(Element::parent("blockquote", spans_to_children(&text)?))
        }
        BlockKind::UnorderedList => {
            let mut items = vec![];

            for line in raw.split('\n') {
                if line.trim().is_empty() {
                    continue;
                }

                let item = line.strip_prefix("- ").unwrap_or(line);
                items.push(Element::parent("li", spans_to_children(item)?));
            }

            Ok(Element::parent("ul", items))
        }
        BlockKind::OrderedList => {
            let mut items = vec![];
            let mut number = 1;

            for line in raw.split('\n') {
                if line.trim().is_empty() {
                    continue;
                }

                // Strip the expected marker. If it isn't there, take the
                // trimmed line as it stands; the classifier is stricter
                // than we are.
                let trimmed = line.trim();
                let marker = format!("{}. ", number);
                let item = trimmed.strip_prefix(marker.as_str()).unwrap_or(trimmed);

                items.push(Element::parent("li", spans_to_children(item)?));
                number += 1;
            }

            Ok(Element::parent("ol", items))
        }
    }
}

fn spans_to_children(text: &str) -> Result<Vec<Element>, Error> {
    let spans = inline::tokenize(text)?;
    Ok(spans.into_iter().map(Element::from).collect())
}

pub fn render(markdown: &str) -> Result<String, Error> {
    let tree = document_tree(markdown)?;
    Ok(tree.render()?)
}

pub fn extract_title(markdown: &str) -> Result<String, Error> {
    for line in markdown.lines() {
        let line = line.trim();

        if line.starts_with("# ") {
            return Ok(line.trim_start_matches('#').trim().to_owned());
        }
    }

    Err(ParseError::MissingTitle.into())
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("unmatched {delimiter} delimiter, every opening {delimiter} needs a closing one")]
    UnmatchedDelimiter { delimiter: &'static str },
    #[error("the inline marker {marker} could not be consumed from its surrounding text")]
    MalformedInlineMarkup { marker: String },
    #[error("the document has no top level heading")]
    MissingTitle,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Render(#[from] RenderError),
}
