use crate::element::Span;
use crate::ParseError;

// The passes run in a fixed order. Delimiters first so a code span can
// swallow its contents whole, then images, then links. Images have to come
// before links or `![alt](url)` would match the link scan with the bang
// left dangling in the plain text.
pub fn tokenize<S: AsRef<str>>(raw: S) -> Result<Vec<Span>, ParseError> {
    let mut spans = vec![Span::Plain(raw.as_ref().to_owned())];

    spans = split_delimiter(spans, "**", Span::Bold)?;
    spans = split_delimiter(spans, "_", Span::Italic)?;
    spans = split_delimiter(spans, "`", Span::Code)?;
    spans = split_markers(spans, true)?;
    spans = split_markers(spans, false)?;

    Ok(spans)
}

// One full sweep for a single delimiter. Splitting plain text on the
// delimiter string leaves the delimited runs at the odd indices; an even
// part count means somebody forgot to close one.
fn split_delimiter<F>(
    spans: Vec<Span>,
    delimiter: &'static str,
    make: F,
) -> Result<Vec<Span>, ParseError>
where
    F: Fn(String) -> Span,
{
    let mut ret = vec![];

    for span in spans {
        let text = match span {
            Span::Plain(text) => text,
            other => {
                ret.push(other);
                continue;
            }
        };

        let parts: Vec<&str> = text.split(delimiter).collect();
        if parts.len() % 2 == 0 {
            return Err(ParseError::UnmatchedDelimiter { delimiter });
        }

        for (idx, part) in parts.into_iter().enumerate() {
            if part.is_empty() {
                continue;
            }

            if idx % 2 == 0 {
                ret.push(Span::Plain(part.to_owned()));
            } else {
                ret.push(make(part.to_owned()));
            }
        }
    }

    Ok(ret)
}

fn split_markers(spans: Vec<Span>, image: bool) -> Result<Vec<Span>, ParseError> {
    let mut ret = vec![];

    for span in spans {
        let text = match span {
            Span::Plain(text) => text,
            other => {
                ret.push(other);
                continue;
            }
        };

        let markers = extract_markers(&text, image);
        if markers.is_empty() {
            ret.push(Span::Plain(text));
            continue;
        }

        let mut remaining = text.as_str();
        for (label, location) in markers {
            let literal = if image {
                format!("![{}]({})", label, location)
            } else {
                format!("[{}]({})", label, location)
            };

            // Consume the marker by splitting on its literal text, the way
            // it appeared in the source
            let (before, after) = match remaining.split_once(literal.as_str()) {
                Some(halves) => halves,
                None => return Err(ParseError::MalformedInlineMarkup { marker: literal }),
            };

            if !before.is_empty() {
                ret.push(Span::Plain(before.to_owned()));
            }

            if image {
                ret.push(Span::Image {
                    alt: label,
                    location,
                });
            } else {
                ret.push(Span::Link {
                    text: label,
                    location,
                });
            }

            remaining = after;
        }

        if !remaining.is_empty() {
            ret.push(Span::Plain(remaining.to_owned()));
        }
    }

    Ok(ret)
}

// Forward scan for `[label](location)` constructs, returned in source order.
// `image` selects between `![..](..)` and bare `[..](..)`; a bare match
// directly after a bang is the image syntax and is never a link. The label
// may not contain square brackets and the location may not contain parens.
fn extract_markers(text: &str, image: bool) -> Vec<(String, String)> {
    let bytes = text.as_bytes();
    let mut markers = vec![];
    let mut idx = 0;

    while idx < bytes.len() {
        if bytes[idx] != b'[' {
            idx += 1;
            continue;
        }

        let banged = idx > 0 && bytes[idx - 1] == b'!';
        if banged != image {
            idx += 1;
            continue;
        }

        let label_end = match scan_until(bytes, idx + 1, b']', b'[') {
            Some(end) => end,
            None => {
                idx += 1;
                continue;
            }
        };

        if bytes.get(label_end + 1) != Some(&b'(') {
            idx += 1;
            continue;
        }

        let location_end = match scan_until(bytes, label_end + 2, b')', b'(') {
            Some(end) => end,
            None => {
                idx += 1;
                continue;
            }
        };

        // All four delimiters are single ascii bytes, so these ranges sit
        // on character boundaries
        markers.push((
            text[idx + 1..label_end].to_owned(),
            text[label_end + 2..location_end].to_owned(),
        ));
        idx = location_end + 1;
    }

    markers
}

// Advance to `stop`, giving up if `reject` or the end shows up first
fn scan_until(bytes: &[u8], mut idx: usize, stop: u8, reject: u8) -> Option<usize> {
    while idx < bytes.len() {
        if bytes[idx] == stop {
            return Some(idx);
        }
        if bytes[idx] == reject {
            return None;
        }
        idx += 1;
    }

    None
}

#[cfg(test)]
mod test {
    use super::*;

    fn plain(text: &str) -> Span {
        Span::Plain(String::from(text))
    }

    #[test]
    fn plain_text_stays_whole() {
        assert_eq!(
            tokenize("nothing special here").unwrap(),
            vec![plain("nothing special here")]
        );
    }

    #[test]
    fn bold_splits_out() {
        assert_eq!(
            tokenize("a **b** c").unwrap(),
            vec![plain("a "), Span::Bold(String::from("b")), plain(" c")]
        );
    }

    #[test]
    fn italic_and_code_split_out() {
        assert_eq!(
            tokenize("some _slanted_ and `mono` text").unwrap(),
            vec![
                plain("some "),
                Span::Italic(String::from("slanted")),
                plain(" and "),
                Span::Code(String::from("mono")),
                plain(" text"),
            ]
        );
    }

    #[test]
    fn delimiter_at_the_edges() {
        assert_eq!(
            tokenize("**loud** start").unwrap(),
            vec![Span::Bold(String::from("loud")), plain(" start")]
        );
        assert_eq!(
            tokenize("end `quiet`").unwrap(),
            vec![plain("end "), Span::Code(String::from("quiet"))]
        );
    }

    #[test]
    fn unmatched_delimiter_is_fatal() {
        assert_eq!(
            tokenize("a **b c"),
            Err(ParseError::UnmatchedDelimiter { delimiter: "**" })
        );
        assert_eq!(
            tokenize("tick ` tick"),
            Err(ParseError::UnmatchedDelimiter { delimiter: "`" })
        );
    }

    #[test]
    fn earlier_passes_shield_their_contents() {
        // The underscores were consumed by the code pass, the italic pass
        // must leave them alone
        assert_eq!(
            tokenize("`not _italic_`").unwrap(),
            vec![Span::Code(String::from("not _italic_"))]
        );
    }

    #[test]
    fn image_splits_out() {
        assert_eq!(
            tokenize("look ![a bird](bird.png) here").unwrap(),
            vec![
                plain("look "),
                Span::Image {
                    alt: String::from("a bird"),
                    location: String::from("bird.png"),
                },
                plain(" here"),
            ]
        );
    }

    #[test]
    fn link_splits_out() {
        assert_eq!(
            tokenize("go [home](https://example.com) now").unwrap(),
            vec![
                plain("go "),
                Span::Link {
                    text: String::from("home"),
                    location: String::from("https://example.com"),
                },
                plain(" now"),
            ]
        );
    }

    #[test]
    fn image_is_not_a_link() {
        // The bang belongs to the image, the link pass must not strand it
        assert_eq!(
            tokenize("![alt](img.png)").unwrap(),
            vec![Span::Image {
                alt: String::from("alt"),
                location: String::from("img.png"),
            }]
        );
    }

    #[test]
    fn image_and_link_side_by_side() {
        assert_eq!(
            tokenize("![pic](p.png) and [text](t.html)").unwrap(),
            vec![
                Span::Image {
                    alt: String::from("pic"),
                    location: String::from("p.png"),
                },
                plain(" and "),
                Span::Link {
                    text: String::from("text"),
                    location: String::from("t.html"),
                },
            ]
        );
    }

    #[test]
    fn two_links_in_one_span() {
        assert_eq!(
            tokenize("[one](1.html)[two](2.html)").unwrap(),
            vec![
                Span::Link {
                    text: String::from("one"),
                    location: String::from("1.html"),
                },
                Span::Link {
                    text: String::from("two"),
                    location: String::from("2.html"),
                },
            ]
        );
    }

    #[test]
    fn bracket_text_without_destination_is_plain() {
        assert_eq!(
            tokenize("just [brackets] here").unwrap(),
            vec![plain("just [brackets] here")]
        );
        assert_eq!(
            tokenize("nested [br[ack]ets](x) stay").unwrap(),
            vec![plain("nested [br[ack]ets](x) stay")]
        );
    }

    #[test]
    fn empty_delimited_runs_are_dropped() {
        assert_eq!(tokenize("a **** b").unwrap(), vec![plain("a "), plain(" b")]);
    }

    #[test]
    fn everything_at_once() {
        assert_eq!(
            tokenize("**b** _i_ `c` ![p](u.png) [l](u.html)").unwrap(),
            vec![
                Span::Bold(String::from("b")),
                plain(" "),
                Span::Italic(String::from("i")),
                plain(" "),
                Span::Code(String::from("c")),
                plain(" "),
                Span::Image {
                    alt: String::from("p"),
                    location: String::from("u.png"),
                },
                plain(" "),
                Span::Link {
                    text: String::from("l"),
                    location: String::from("u.html"),
                },
            ]
        );
    }
}
