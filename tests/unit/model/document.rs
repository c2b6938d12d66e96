use super::*;

fn frame_with_duration(duration: f64) -> Frame {
    Frame {
        duration,
        ..Frame::new()
    }
}

#[test]
fn total_duration_includes_the_skipped_frame() {
    let mut doc = Document::new();
    doc.frames.push(frame_with_duration(0.25));
    doc.frames.push(frame_with_duration(0.5));
    doc.skip_first = true;
    assert_eq!(doc.total_duration(), 0.75);
}

#[test]
fn merge_adopts_metadata_from_animation_sources_only() {
    let mut doc = Document::new();
    doc.loops = 7;

    let mut plain = Document::new();
    plain.frames.push(Frame::new());
    assert_eq!(doc.merge(plain), 1);
    assert_eq!(doc.loops, 7);
    assert!(!doc.has_animation);

    let mut animated = Document::new();
    animated.frames.push(Frame::new());
    animated.frames.push(Frame::new());
    animated.loops = 2;
    animated.skip_first = true;
    animated.has_animation = true;
    assert_eq!(doc.merge(animated), 2);
    assert_eq!(doc.loops, 2);
    assert!(doc.skip_first);
    assert!(doc.has_animation);
    assert_eq!(doc.frames.len(), 3);
}

#[test]
fn merge_keeps_existing_size() {
    let mut doc = Document::new();
    doc.width = Some(Length::Text("64px".to_string()));

    let mut incoming = Document::new();
    incoming.width = Some(Length::Text("128px".to_string()));
    incoming.height = Some(Length::Text("128px".to_string()));
    doc.merge(incoming);

    assert_eq!(doc.width, Some(Length::Text("64px".to_string())));
    assert_eq!(doc.height, Some(Length::Text("128px".to_string())));
}

#[test]
fn reset_restores_the_empty_state() {
    let mut doc = Document::new();
    doc.frames.push(Frame::new());
    doc.loops = 3;
    doc.skip_first = true;
    doc.has_animation = true;
    doc.reset();
    assert_eq!(doc, Document::new());
}

#[test]
fn dispatch_rejects_unknown_extensions() {
    let mut doc = Document::new();
    let err = doc
        .add_frames_from_file("anim.gif", &ReadOptions::default())
        .unwrap_err();
    match err {
        PhantomError::UnsupportedInput(msg) => assert!(msg.contains(".gif")),
        other => panic!("expected UnsupportedInput, got {other:?}"),
    }
}
