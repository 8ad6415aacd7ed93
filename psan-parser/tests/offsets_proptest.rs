//! Property-based tests for offset tracking
//!
//! Documents are generated the way the recognizer writes them: token ids are the running
//! character offset, candidates wrap whole tokens. The reader must agree with the generator
//! about every offset, whatever the text contains.

use proptest::prelude::*;
use psan_parser::{Event, StructuralReader};

/// Words, including characters that need escaping and multi-byte letters.
fn word_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z]{1,8}",
        "[0-9]{1,4}",
        Just("AT&T".to_string()),
        Just("<b>".to_string()),
        Just("Žižka".to_string()),
        Just("\"quoted\"".to_string()),
    ]
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Build a document from sentences of (word, wrapped-in-candidate) pairs.
/// Returns the markup, the plain text and the expected token ids.
fn build(sentences: &[Vec<(String, bool)>]) -> (String, String, Vec<usize>) {
    let mut xml = String::from("<doc>");
    let mut plain = String::new();
    let mut ids = Vec::new();
    for sentence in sentences {
        xml.push_str("<sentence>");
        for (i, (word, wrapped)) in sentence.iter().enumerate() {
            if i > 0 {
                xml.push(' ');
                plain.push(' ');
            }
            let id = plain.chars().count();
            let end = id + word.chars().count();
            ids.push(id);
            let token = format!("<token id=\"{id}\">{}</token>", escape(word));
            if *wrapped {
                xml.push_str(&format!(
                    "<ne start=\"{id}\" end=\"{end}\" type=\"pf\">{token}</ne>"
                ));
            } else {
                xml.push_str(&token);
            }
            plain.push_str(word);
        }
        xml.push_str("</sentence>\n");
        plain.push('\n');
    }
    xml.push_str("</doc>");
    (xml, plain, ids)
}

fn document_strategy() -> impl Strategy<Value = Vec<Vec<(String, bool)>>> {
    prop::collection::vec(
        prop::collection::vec((word_strategy(), any::<bool>()), 1..8),
        1..6,
    )
}

proptest! {
    #[test]
    fn test_token_ids_match_running_offset(sentences in document_strategy()) {
        let (xml, _, ids) = build(&sentences);
        let mut reader = StructuralReader::new(xml.as_bytes());
        let mut seen = Vec::new();
        while let Some(event) = reader.next_event().unwrap() {
            if let Event::StartToken { id } = event {
                prop_assert_eq!(id, reader.offset());
                seen.push(id);
            }
        }
        prop_assert_eq!(seen, ids);
    }

    #[test]
    fn test_text_runs_reproduce_plain_text(sentences in document_strategy()) {
        let (xml, plain, _) = build(&sentences);
        let mut text = String::new();
        for event in StructuralReader::new(xml.as_bytes()) {
            if let Event::Text(run) = event.unwrap() {
                prop_assert_eq!(run.span.start, text.chars().count());
                text.push_str(&run.content);
                prop_assert_eq!(run.span.end, text.chars().count());
            }
        }
        prop_assert_eq!(text, plain);
    }

    #[test]
    fn test_candidate_end_matches_offset(sentences in document_strategy()) {
        let (xml, _, _) = build(&sentences);
        let mut reader = StructuralReader::new(xml.as_bytes());
        while let Some(event) = reader.next_event().unwrap() {
            if let Event::EndCandidate(candidate) = event {
                prop_assert_eq!(candidate.span.end, reader.offset());
            }
        }
    }
}
