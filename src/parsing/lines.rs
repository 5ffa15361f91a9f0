//! Logical line extraction from flattened markup.

use tracing::warn;

use crate::parsing::markup::{preformatted_block, MarkupEvent, MarkupEvents};
use crate::parsing::ParseError;

/// Lazily joins markup events into logical lines.
///
/// Every [`MarkupEvent::Break`] ends the current line. Text before the first
/// break is discarded, and whatever follows the last break is emitted as the
/// final line. Lines are never trimmed: column inference depends on exact
/// character positions.
pub struct LineExtractor<I> {
    events: I,
    line: String,
    started: bool,
    finished: bool,
    unexpected_tags: usize,
}

impl<I> LineExtractor<I>
where
    I: Iterator<Item = MarkupEvent>,
{
    pub fn new(events: I) -> Self {
        Self {
            events,
            line: String::new(),
            started: false,
            finished: false,
            unexpected_tags: 0,
        }
    }

    /// Number of unexpected tags reported so far
    #[must_use]
    pub fn unexpected_tags(&self) -> usize {
        self.unexpected_tags
    }
}

impl<I> Iterator for LineExtractor<I>
where
    I: Iterator<Item = MarkupEvent>,
{
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        for event in self.events.by_ref() {
            match event {
                MarkupEvent::Break if self.started => {
                    return Some(std::mem::take(&mut self.line));
                }
                MarkupEvent::Break => self.started = true,
                MarkupEvent::Text(text) => {
                    if self.started {
                        self.line.push_str(&text);
                    }
                }
                MarkupEvent::UnexpectedTag(name) => {
                    self.unexpected_tags += 1;
                    warn!("Found tag with unexpected name <{name}> in alignment block");
                }
            }
        }

        self.finished = true;
        self.started.then(|| std::mem::take(&mut self.line))
    }
}

/// Extract the logical lines of a raw alignment document.
///
/// # Errors
///
/// Returns `ParseError::MissingPreformattedBlock` if the document has no `<pre>` block.
pub fn extract_lines(document: &str) -> Result<LineExtractor<MarkupEvents<'_>>, ParseError> {
    let block = preformatted_block(document)?;
    Ok(LineExtractor::new(MarkupEvents::new(block)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(document: &str) -> Vec<String> {
        extract_lines(document).unwrap().collect()
    }

    #[test]
    fn test_three_segments() {
        let doc = "<html><pre>ignored header text<br>  line one <br>line  two<br>   line three</pre></html>";
        assert_eq!(
            lines(doc),
            vec!["  line one ", "line  two", "   line three"]
        );
    }

    #[test]
    fn test_spans_continue_the_line() {
        let doc = "<pre><br>A*01  <span>AC</span> <span>GT</span><br>x</pre>";
        assert_eq!(lines(doc), vec!["A*01  AC GT", "x"]);
    }

    #[test]
    fn test_trailing_break_yields_empty_final_line() {
        let doc = "<pre><br>a<br></pre>";
        assert_eq!(lines(doc), vec!["a", ""]);
    }

    #[test]
    fn test_no_break_yields_no_lines() {
        assert!(lines("<pre>just a title</pre>").is_empty());
    }

    #[test]
    fn test_unexpected_tags_are_counted_not_fatal() {
        let doc = "<pre><br>a<b>bold</b>c<br>d<i>x</i></pre>";
        let mut extractor = extract_lines(doc).unwrap();
        let collected: Vec<String> = extractor.by_ref().collect();
        assert_eq!(collected, vec!["ac", "d"]);
        assert_eq!(extractor.unexpected_tags(), 2);
    }

    #[test]
    fn test_exhausted_extractor_stays_exhausted() {
        let mut extractor = extract_lines("<pre><br>a</pre>").unwrap();
        assert_eq!(extractor.next().as_deref(), Some("a"));
        assert_eq!(extractor.next(), None);
        assert_eq!(extractor.next(), None);
    }

    #[test]
    fn test_missing_pre_block() {
        assert!(matches!(
            extract_lines("<p>no alignment</p>"),
            Err(ParseError::MissingPreformattedBlock)
        ));
    }
}
