use canvas_extract::{BlockAccumulator, ContentBlock, OutputFormat};

#[test]
fn growing_stream_upgrades_text_to_artifact_block() {
    let mut accumulator = BlockAccumulator::new(None);

    accumulator.push_delta("Here is the chart:\n```artifact\n");
    accumulator.push_delta(r#"{"type":"image","name":"chart.png","#);

    // Fence still open: everything renders as text so far.
    assert_eq!(accumulator.blocks().len(), 1);
    assert!(accumulator.blocks()[0].is_text());

    accumulator.push_delta("\"data\":\"iVBORw0KGgo=\"}\n```\nDone.");
    assert_eq!(
        accumulator.blocks(),
        [
            ContentBlock::text("Here is the chart:"),
            ContentBlock::image("chart.png", "iVBORw0KGgo="),
            ContentBlock::text("Done."),
        ]
    );
    assert!(accumulator.text().ends_with("Done."));
}

#[test]
fn stream_with_map_hint_always_yields_geojson_view() {
    let mut accumulator = BlockAccumulator::new(Some(OutputFormat::Map));

    accumulator.push_delta(r#"{"type":"FeatureCo"#);
    assert_eq!(
        accumulator.blocks(),
        [ContentBlock::geojson("data.geojson", r#"{"type":"FeatureCo"#)]
    );

    accumulator.push_delta(r#"llection","features":[]}"#);
    assert_eq!(
        accumulator.blocks(),
        [ContentBlock::geojson(
            "data.geojson",
            r#"{"type":"FeatureCollection","features":[]}"#
        )]
    );
}

#[test]
fn blank_stream_produces_no_blocks() {
    let mut accumulator = BlockAccumulator::new(None);
    accumulator.push_delta("  ");
    accumulator.push_delta("\n");
    assert!(accumulator.blocks().is_empty());
    assert!(!accumulator.is_empty());
}
