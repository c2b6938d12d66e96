use phantom_svg::{
    DEFAULT_DURATION, Document, Element, Frame, Length, ReadOptions, read_svg_str, svg_string,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn vector_frame(fill: &str, duration: f64) -> Frame {
    let mut frame = Frame::new();
    frame.width = Some(Length::Text("64px".to_string()));
    frame.height = Some(Length::Text("64px".to_string()));
    frame.duration = duration;
    frame.surfaces = vec![
        Element::new("rect")
            .with_attr("width", "64")
            .with_attr("height", "64")
            .with_attr("fill", fill.to_string()),
    ];
    frame
}

fn doc_with_frames(count: usize, skip_first: bool) -> Document {
    let mut doc = Document::new();
    for i in 0..count {
        // Frame 0 keeps the default duration when skipped: its timing never
        // reaches the serialized timer chain.
        let duration = if i == 0 && skip_first {
            DEFAULT_DURATION
        } else {
            0.05 + i as f64 * 0.05
        };
        doc.frames.push(vector_frame("#111111", duration));
    }
    doc.skip_first = skip_first;
    doc
}

fn round_trip(doc: &Document) -> Document {
    read_svg_str(&svg_string(doc).unwrap(), &ReadOptions::default()).unwrap()
}

#[test]
fn round_trip_preserves_frame_metadata() {
    init_tracing();
    let mut doc = doc_with_frames(3, false);
    doc.loops = 4;

    let back = round_trip(&doc);
    assert!(back.has_animation);
    assert_eq!(back.frames.len(), 3);
    assert_eq!(back.loops, 4);
    assert!(!back.skip_first);
    for (original, returned) in doc.frames.iter().zip(&back.frames) {
        assert_eq!(returned.duration, original.duration);
        assert_eq!(returned.width, original.width);
        assert_eq!(returned.height, original.height);
        assert_eq!(returned.surfaces, original.surfaces);
    }
}

#[test]
fn second_cycle_is_a_fixed_point() {
    init_tracing();
    let mut doc = doc_with_frames(4, false);
    doc.loops = 2;

    let once = round_trip(&doc);
    let twice = round_trip(&once);
    assert_eq!(once, twice);
}

#[test]
fn skip_first_round_trips_for_thirteen_frames() {
    let doc = doc_with_frames(13, true);
    let back = round_trip(&doc);
    assert_eq!(back.frames.len(), 13);
    assert!(back.skip_first);
    for (original, returned) in doc.frames.iter().zip(&back.frames) {
        assert_eq!(returned.duration, original.duration);
    }
}

#[test]
fn no_skip_first_round_trips_for_twelve_frames() {
    let doc = doc_with_frames(12, false);
    let back = round_trip(&doc);
    assert_eq!(back.frames.len(), 12);
    assert!(!back.skip_first);
}

#[test]
fn degenerate_pair_has_no_symbol_or_controller() {
    let doc = doc_with_frames(2, true);
    let text = svg_string(&doc).unwrap();
    assert!(!text.contains("<symbol"));
    assert!(!text.contains("controller"));
    assert!(!text.contains("<animate "));

    let back = read_svg_str(&text, &ReadOptions::default()).unwrap();
    assert_eq!(back.frames.len(), 2);
    assert!(back.skip_first);
    assert!(back.has_animation);
}

#[test]
fn two_frames_without_skip_first_keep_the_full_scaffolding() {
    let doc = doc_with_frames(2, false);
    let text = svg_string(&doc).unwrap();
    assert!(text.contains("<symbol"));
    assert!(text.contains("controller"));

    let back = read_svg_str(&text, &ReadOptions::default()).unwrap();
    assert_eq!(back.frames.len(), 2);
    assert!(!back.skip_first);
}

#[test]
fn single_frame_writes_a_plain_document() {
    let doc = doc_with_frames(1, false);
    let text = svg_string(&doc).unwrap();
    assert!(!text.contains("id=\"phantom_svg\""));
    assert!(text.contains("preserveAspectRatio=\"none\""));

    let back = read_svg_str(&text, &ReadOptions::default()).unwrap();
    assert_eq!(back.frames.len(), 1);
    assert!(!back.has_animation);
}

#[test]
fn bare_frame_writes_a_plain_document() {
    let frame = vector_frame("#222222", 0.2);
    let text = svg_string(&frame).unwrap();
    assert!(!text.contains("id=\"phantom_svg\""));

    let back = read_svg_str(&text, &ReadOptions::default()).unwrap();
    assert_eq!(back.frames.len(), 1);
    assert!(!back.has_animation);
}

#[test]
fn infinite_loops_serialize_as_indefinite() {
    let mut doc = doc_with_frames(3, false);
    doc.loops = 0;
    let text = svg_string(&doc).unwrap();
    assert!(text.contains("repeatCount=\"indefinite\""));
    assert!(!text.contains("repeatCount=\"0\""));

    let back = read_svg_str(&text, &ReadOptions::default()).unwrap();
    assert_eq!(back.loops, 0);
}

#[test]
fn non_numeric_repeat_count_reads_as_infinite() {
    // Intentional defaulting, not an error: an unrecognized repeat count
    // coerces to 0, which the model treats as infinite.
    let mut doc = doc_with_frames(3, false);
    doc.loops = 7;
    let text = svg_string(&doc)
        .unwrap()
        .replace("repeatCount=\"7\"", "repeatCount=\"forever\"");

    let back = read_svg_str(&text, &ReadOptions::default()).unwrap();
    assert_eq!(back.loops, 0);
}

#[test]
fn documents_without_the_marker_read_as_one_frame() {
    // Nested <svg> elements do not make a document animated; only the
    // marker id on the root does.
    let doc = doc_with_frames(3, false);
    let text = svg_string(&doc).unwrap().replace(
        "id=\"phantom_svg\"",
        "id=\"not_the_marker\"",
    );
    let back = read_svg_str(&text, &ReadOptions::default()).unwrap();
    assert_eq!(back.frames.len(), 1);
    assert!(!back.has_animation);

    let plain = "<svg xmlns=\"http://www.w3.org/2000/svg\"><svg><rect/></svg><svg><rect/></svg></svg>";
    let back = read_svg_str(plain, &ReadOptions::default()).unwrap();
    assert_eq!(back.frames.len(), 1);
    assert!(!back.has_animation);
}

#[test]
fn document_size_falls_back_to_the_first_frame() {
    let doc = doc_with_frames(3, false);
    let back = round_trip(&doc);
    assert_eq!(back.width, Some(Length::Text("64px".to_string())));
    assert_eq!(back.height, Some(Length::Text("64px".to_string())));
}

#[test]
fn reader_overrides_apply_to_every_frame() {
    let doc = doc_with_frames(3, false);
    let text = svg_string(&doc).unwrap();

    let options = ReadOptions {
        duration: Some(0.42),
        width: Some(Length::Text("128px".to_string())),
        ..Default::default()
    };
    let back = read_svg_str(&text, &options).unwrap();
    for frame in &back.frames {
        assert_eq!(frame.duration, 0.42);
        assert_eq!(frame.width, Some(Length::Text("128px".to_string())));
    }
    // Document-level size takes the same override.
    assert_eq!(back.width, Some(Length::Text("128px".to_string())));
}
