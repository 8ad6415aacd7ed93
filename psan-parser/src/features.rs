//! Confirmed-entity feature extraction
//!
//! An offline reducer used for evaluation data: it walks an annotated document once, hands every
//! text run to a text sink and reports each confirmed candidate as a `(start, end, label)`
//! feature. Feature offsets index the plain text the sink receives.
//!
//! Unlike the review renderer there is no window, no nesting and no decision overlay. Only one
//! feature is tracked at a time; the first candidate end after a confirmed start closes it.

use crate::error::ReadError;
use crate::markup::{MarkupEvent, MarkupReader};
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Attribute names and markers the extractor looks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureOptions {
    pub element: String,
    pub status_attribute: String,
    pub confirmed_prefix: String,
    pub label_attribute: String,
}

impl Default for FeatureOptions {
    fn default() -> Self {
        Self {
            element: "ne".to_string(),
            status_attribute: "status".to_string(),
            confirmed_prefix: "confirmed".to_string(),
            label_attribute: "anonymizedlabel".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub start: usize,
    pub end: usize,
    pub label: Option<String>,
}

impl Feature {
    /// Write the feature as one CSV row: `start,end,label`.
    pub fn write_csv<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let label = self.label.as_deref().unwrap_or("");
        if needs_quotes(label) {
            writeln!(
                out,
                "{},{},\"{}\"",
                self.start,
                self.end,
                label.replace('"', "\"\"")
            )
        } else {
            writeln!(out, "{},{},{}", self.start, self.end, label)
        }
    }
}

/// Whether a field must be written quoted. Edge whitespace counts, since readers trim it.
fn needs_quotes(field: &str) -> bool {
    field.contains([',', '"', '\n', '\r'])
        || field.starts_with(char::is_whitespace)
        || field.ends_with(char::is_whitespace)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureSummary {
    pub features: usize,
    pub characters: usize,
}

/// Stream `input`, reporting features and text as they are found.
pub fn extract_features<R, F, T>(
    input: R,
    options: &FeatureOptions,
    mut on_feature: F,
    mut on_text: T,
) -> Result<FeatureSummary, ReadError>
where
    R: BufRead,
    F: FnMut(Feature) -> io::Result<()>,
    T: FnMut(&str) -> io::Result<()>,
{
    let mut reader = MarkupReader::new(input);
    let mut current: Option<(usize, Option<String>)> = None;
    let mut summary = FeatureSummary::default();

    while let Some(event) = reader.next_event()? {
        match event {
            MarkupEvent::Start(tag) if tag.name == options.element => {
                let confirmed = tag
                    .attribute(&options.status_attribute)
                    .is_some_and(|status| status.starts_with(&options.confirmed_prefix));
                if confirmed {
                    let label = tag.attribute(&options.label_attribute).map(str::to_string);
                    current = Some((reader.offset(), label));
                }
            }
            MarkupEvent::End(name) if name == options.element => {
                if let Some((start, label)) = current.take_if(|(start, _)| reader.offset() > *start)
                {
                    on_feature(Feature {
                        start,
                        end: reader.offset(),
                        label,
                    })?;
                    summary.features += 1;
                }
            }
            MarkupEvent::Text(run) => on_text(&run.content)?,
            _ => {}
        }
    }

    summary.characters = reader.offset();
    debug!(
        features = summary.features,
        characters = summary.characters,
        "feature extraction finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn run(source: &str) -> (Vec<Feature>, String) {
        let mut features = Vec::new();
        let mut text = String::new();
        extract_features(
            source.as_bytes(),
            &FeatureOptions::default(),
            |f| {
                features.push(f);
                Ok(())
            },
            |t| {
                text.push_str(t);
                Ok(())
            },
        )
        .unwrap();
        (features, text)
    }

    #[test]
    fn test_confirmed_candidates_become_features() {
        let source = r#"<doc><ne status="confirmed" anonymizedlabel="NAME">Anna</ne> met <ne status="rejected">Bob</ne> in <ne status="confirmed-auto" anonymizedlabel="CITY">Brno</ne>.</doc>"#;
        let (features, text) = run(source);
        assert_eq!(text, "Anna met Bob in Brno.");
        assert_eq!(
            features,
            vec![
                Feature {
                    start: 0,
                    end: 4,
                    label: Some("NAME".to_string())
                },
                Feature {
                    start: 16,
                    end: 20,
                    label: Some("CITY".to_string())
                },
            ]
        );
        assert_eq!(&text[16..20], "Brno");
    }

    #[test]
    fn test_empty_candidate_is_skipped() {
        let (features, _) = run(r#"<doc>a<ne status="confirmed"/>b</doc>"#);
        assert!(features.is_empty());
    }

    #[test]
    fn test_missing_status_is_not_confirmed() {
        let (features, text) = run(r#"<doc><ne anonymizedlabel="X">abc</ne></doc>"#);
        assert!(features.is_empty());
        assert_eq!(text, "abc");
    }

    #[test]
    fn test_csv_rows() {
        let mut out = Vec::new();
        Feature {
            start: 1,
            end: 3,
            label: None,
        }
        .write_csv(&mut out)
        .unwrap();
        Feature {
            start: 4,
            end: 9,
            label: Some("a, \"b\"".to_string()),
        }
        .write_csv(&mut out)
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1,3,\n4,9,\"a, \"\"b\"\"\"\n");
    }

    #[rstest]
    #[case::plain("Person", "Person")]
    #[case::carriage_return("a\rb", "\"a\rb\"")]
    #[case::leading_space(" Person", "\" Person\"")]
    #[case::trailing_tab("Person\t", "\"Person\t\"")]
    #[case::inner_space("New York", "New York")]
    fn test_csv_label_quoting(#[case] label: &str, #[case] field: &str) {
        let mut out = Vec::new();
        Feature {
            start: 0,
            end: 2,
            label: Some(label.to_string()),
        }
        .write_csv(&mut out)
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), format!("0,2,{field}\n"));
    }
}
