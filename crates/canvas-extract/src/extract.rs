//! Artifact extractor: an ordered cascade of detection strategies over the
//! raw text a pipeline step produced.
//!
//! The first strategy that finds at least one match owns the entire input;
//! the strategies are mutually exclusive passes, not accumulative. Every
//! anomaly in the data (malformed JSON, truncated fences, unterminated
//! inline objects) degrades to plain text; extraction never fails.

use crate::blocks::{ArtifactPayload, ContentBlock, GEOJSON_DOCUMENT_NAME, HTML_PAGE_NAME};
use crate::format::OutputFormat;
use crate::scanner::extract_balanced_object;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Decomposes `text` into an ordered block sequence.
///
/// `format` is the declared output format of the producing step, when it
/// supplied one; only `map` and `html` change the result. The returned
/// sequence is a lossless partition of the input: regions that cannot be
/// classified come back as `Text` blocks, never get dropped.
pub fn extract_blocks(text: &str, format: Option<OutputFormat>) -> Vec<ContentBlock> {
    if let Some(blocks) = format.and_then(|format| hint_override(text, format)) {
        return blocks;
    }
    run_cascade(text)
}

fn run_cascade(text: &str) -> Vec<ContentBlock> {
    let strategies: [fn(&str) -> Option<Vec<ContentBlock>>; 2] =
        [fenced_artifacts, inline_artifacts];
    for strategy in strategies {
        if let Some(blocks) = strategy(text) {
            return blocks;
        }
    }
    classify_remainder(text)
}

/// An explicit `map`/`html` declaration from the producing step wins even
/// when the text itself does not look structured. Fenced artifacts of the
/// declared kind still take precedence; otherwise the entire input becomes
/// one forced block, verbatim.
fn hint_override(text: &str, format: OutputFormat) -> Option<Vec<ContentBlock>> {
    if !format.biases_extraction() {
        return None;
    }

    if let Some(blocks) = fenced_artifacts(text) {
        let satisfied = blocks.iter().any(|block| match format {
            OutputFormat::Map => matches!(block, ContentBlock::GeoJson { .. }),
            _ => matches!(block, ContentBlock::Html { .. }),
        });
        if satisfied {
            return Some(blocks);
        }
    }

    let forced = match format {
        OutputFormat::Map => ContentBlock::geojson(GEOJSON_DOCUMENT_NAME, text),
        _ => ContentBlock::html(HTML_PAGE_NAME, text),
    };
    Some(vec![forced])
}

fn fenced_regex() -> &'static Regex {
    static FENCED: OnceLock<Regex> = OnceLock::new();
    FENCED.get_or_init(|| {
        Regex::new(r"(?s)```artifact[ \t]*\r?\n(.*?)```")
            .expect("fenced artifact pattern should compile")
    })
}

/// Strategy 1: fenced code blocks tagged `artifact`. Each fence body is
/// parsed as a payload object; bodies that fail to parse or carry an
/// unrecognized type are emitted as text, verbatim.
fn fenced_artifacts(text: &str) -> Option<Vec<ContentBlock>> {
    let mut blocks = Vec::new();
    let mut cursor = 0usize;
    let mut matched = false;

    for captures in fenced_regex().captures_iter(text) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        matched = true;
        flush_text(&mut blocks, &text[cursor..whole.start()]);

        let body = captures
            .get(1)
            .map(|group| group.as_str())
            .unwrap_or_default()
            .trim();
        if let Some(block) = classify_artifact_json(body) {
            push_block(&mut blocks, block);
        }
        cursor = whole.end();
    }

    if !matched {
        return None;
    }
    for block in classify_remainder(&text[cursor..]) {
        push_block(&mut blocks, block);
    }
    Some(blocks)
}

fn inline_anchor_regex() -> &'static Regex {
    static ANCHOR: OnceLock<Regex> = OnceLock::new();
    ANCHOR.get_or_init(|| {
        Regex::new(r#"\{"type":"(?:image|geojson|html)""#)
            .expect("inline anchor pattern should compile")
    })
}

fn inline_fast_regex() -> &'static Regex {
    static FAST: OnceLock<Regex> = OnceLock::new();
    FAST.get_or_init(|| {
        Regex::new(r#"(?s)^\{"type":"(?:image|geojson|html)".*?"data":".*?"\}"#)
            .expect("inline fast-path pattern should compile")
    })
}

/// Strategy 2: bare artifact objects embedded in prose without fencing.
/// Anchors on the literal `{"type":"..."` prefix; candidates that cannot
/// be recovered whole stay part of the surrounding plain text.
fn inline_artifacts(text: &str) -> Option<Vec<ContentBlock>> {
    let mut blocks = Vec::new();
    let mut cursor = 0usize;
    let mut matched = false;

    for anchor in inline_anchor_regex().find_iter(text) {
        if anchor.start() < cursor {
            // Anchor inside an object already consumed.
            continue;
        }
        let Some((candidate_len, block)) = inline_candidate(text, anchor.start()) else {
            continue;
        };
        matched = true;
        flush_text(&mut blocks, &text[cursor..anchor.start()]);
        push_block(&mut blocks, block);
        cursor = anchor.start() + candidate_len;
    }

    if !matched {
        return None;
    }
    for block in classify_remainder(&text[cursor..]) {
        push_block(&mut blocks, block);
    }
    Some(blocks)
}

/// Bounded fast path first; the balanced scanner is the ground truth when
/// the fast pattern bites off an unparseable prefix (escaped quotes or
/// nested braces inside `data`).
fn inline_candidate(text: &str, start: usize) -> Option<(usize, ContentBlock)> {
    if let Some(found) = inline_fast_regex().find(&text[start..]) {
        if let Some(block) = parse_inline_payload(found.as_str()) {
            return Some((found.end(), block));
        }
    }

    let candidate = extract_balanced_object(text, start)?;
    let block = parse_inline_payload(candidate)?;
    Some((candidate.len(), block))
}

/// Inline candidates must carry both `type` and `data` to become a block.
fn parse_inline_payload(candidate: &str) -> Option<ContentBlock> {
    let payload = serde_json::from_str::<ArtifactPayload>(candidate).ok()?;
    if payload.data.is_none() {
        return None;
    }
    payload.into_block()
}

/// Strategy 3, shared remainder classifier: sniffs a whole span that no
/// earlier strategy claimed. Produces at most one block; an empty trimmed
/// span produces none.
fn classify_remainder(text: &str) -> Vec<ContentBlock> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if starts_with_ignore_case(trimmed, "<!doctype html") || starts_with_ignore_case(trimmed, "<html")
    {
        return vec![ContentBlock::html(HTML_PAGE_NAME, trimmed)];
    }
    if trimmed.starts_with('{') && is_feature_collection(trimmed) {
        return vec![ContentBlock::geojson(GEOJSON_DOCUMENT_NAME, trimmed)];
    }
    vec![ContentBlock::text(trimmed)]
}

fn is_feature_collection(text: &str) -> bool {
    serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|value| {
            value
                .get("type")
                .and_then(Value::as_str)
                .map(|kind| kind == "FeatureCollection")
        })
        .unwrap_or(false)
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// Parses an artifact JSON body; unknown or missing types degrade to a
/// text block carrying the original JSON, and an empty body degrades to
/// nothing at all.
fn classify_artifact_json(raw: &str) -> Option<ContentBlock> {
    if let Ok(payload) = serde_json::from_str::<ArtifactPayload>(raw) {
        if let Some(block) = payload.into_block() {
            return Some(block);
        }
    }
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(ContentBlock::text(trimmed))
    }
}

fn flush_text(blocks: &mut Vec<ContentBlock>, span: &str) {
    let trimmed = span.trim();
    if !trimmed.is_empty() {
        push_block(blocks, ContentBlock::text(trimmed));
    }
}

/// Appends a block, merging consecutive text blocks so the output never
/// holds two `Text` neighbors.
fn push_block(blocks: &mut Vec<ContentBlock>, block: ContentBlock) {
    if let ContentBlock::Text { value } = &block {
        if let Some(ContentBlock::Text { value: previous }) = blocks.last_mut() {
            previous.push_str("\n\n");
            previous.push_str(value);
            return;
        }
    }
    blocks.push(block);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_strategy_reports_no_match_without_fences() {
        assert_eq!(fenced_artifacts("plain prose, nothing fenced"), None);
    }

    #[test]
    fn inline_strategy_reports_no_match_without_anchors() {
        assert_eq!(inline_artifacts(r#"mentions {"type":"table"} only"#), None);
    }

    #[test]
    fn inline_strategy_abandons_unterminated_candidate() {
        assert_eq!(inline_artifacts(r#"cut off {"type":"image","data":"abc"#), None);
    }

    #[test]
    fn inline_fast_path_and_scanner_agree_on_simple_payload() {
        let text = r#"{"type":"image","name":"a.png","data":"AAAA"}"#;
        let fast = inline_fast_regex()
            .find(text)
            .expect("fast path should match");
        assert_eq!(fast.as_str(), text);
        assert_eq!(extract_balanced_object(text, 0), Some(text));
    }

    #[test]
    fn remainder_classifier_sniffs_html_case_insensitively() {
        assert_eq!(
            classify_remainder("  <HTML><body>x</body></HTML>"),
            vec![ContentBlock::html("page.html", "<HTML><body>x</body></HTML>")]
        );
    }

    #[test]
    fn remainder_classifier_requires_feature_collection_type() {
        assert_eq!(
            classify_remainder(r#"{"type":"Feature","geometry":null}"#),
            vec![ContentBlock::text(r#"{"type":"Feature","geometry":null}"#)]
        );
    }

    #[test]
    fn remainder_classifier_skips_empty_span() {
        assert_eq!(classify_remainder("   \n\t  "), Vec::new());
    }

    #[test]
    fn push_block_merges_adjacent_text() {
        let mut blocks = vec![ContentBlock::text("first")];
        push_block(&mut blocks, ContentBlock::text("second"));
        assert_eq!(blocks, vec![ContentBlock::text("first\n\nsecond")]);
    }
}
