use docview::page_input::PageInputError;
use docview::toast::ToastVariant;
use docview::viewer::{LoadState, ViewerState};
use docview::{Rotation, Scale};

type Viewer = ViewerState<String>;

fn loaded(pages: usize) -> Viewer {
    let mut viewer = Viewer::new("https://example.com/doc.pdf", Scale::Normal, 600);
    if let Some(request) = viewer.document_loaded(pages) {
        viewer.render_finished(request.token, format!("page {}", request.key.page));
    }
    viewer
}

#[test]
fn submit_accepts_every_page_in_range() {
    let count = 7;
    for n in 1..=count {
        let mut viewer = loaded(count);
        viewer.submit_page(&n.to_string()).unwrap();
        assert_eq!(viewer.current_page(), n);
        assert_eq!(viewer.page_input().text(), n.to_string());
    }
}

#[test]
fn submit_rejects_out_of_range_pages() {
    let count = 7;
    for n in [-2_i64, 0, 8, 100] {
        let mut viewer = loaded(count);
        viewer.go_to_next();
        let err = viewer.submit_page(&n.to_string()).unwrap_err();
        assert_eq!(err, PageInputError::OutOfRange { page_count: count });
        assert_eq!(viewer.current_page(), 2);
        assert!(viewer.page_input().is_invalid());
        assert_eq!(viewer.page_input().text(), n.to_string());
    }
}

#[test]
fn previous_is_noop_on_first_page_and_decrements_otherwise() {
    let mut viewer = loaded(5);
    assert!(!viewer.can_go_previous());
    viewer.go_to_previous();
    assert_eq!(viewer.current_page(), 1);

    viewer.submit_page("4").unwrap();
    viewer.go_to_previous();
    assert_eq!(viewer.current_page(), 3);
}

#[test]
fn next_is_noop_on_last_page_and_increments_otherwise() {
    let mut viewer = loaded(5);
    viewer.go_to_next();
    assert_eq!(viewer.current_page(), 2);

    viewer.submit_page("5").unwrap();
    assert!(!viewer.can_go_next());
    viewer.go_to_next();
    assert_eq!(viewer.current_page(), 5);
}

#[test]
fn scale_change_transitions_until_render_completes() {
    let mut viewer = loaded(3);
    assert!(viewer.render().is_stable());
    assert_eq!(viewer.render().rendered_scale(), Some(Scale::Normal));

    let request = viewer.set_scale(Scale::Double).unwrap();
    assert!(viewer.render().is_transitioning());
    assert!(viewer.is_loading());
    assert_eq!(viewer.scale(), Scale::Double);
    assert_eq!(viewer.render().rendered_scale(), Some(Scale::Normal));
    assert_eq!(
        viewer.render().visible().map(|f| f.image.as_str()),
        Some("page 1")
    );

    viewer.render_finished(request.token, "page 1 @ 2.0".to_string());
    assert!(viewer.render().is_stable());
    assert!(!viewer.is_loading());
    assert_eq!(viewer.render().rendered_scale(), Some(Scale::Double));
}

#[test]
fn four_rotations_restore_orientation() {
    let mut viewer = loaded(1);
    for _ in 0..4 {
        viewer.rotate();
    }
    assert_eq!(viewer.rotation().degrees(), 360);
    assert_eq!(viewer.rotation().effective_degrees(), 0);
    assert_eq!(
        viewer.rotation().effective_degrees(),
        Rotation::default().effective_degrees()
    );
}

#[test]
fn ten_page_document_walkthrough() {
    let mut viewer = loaded(10);
    assert_eq!(viewer.current_page(), 1);
    assert_eq!(viewer.page_count(), Some(10));

    for _ in 0..9 {
        viewer.go_to_next();
    }
    assert_eq!(viewer.current_page(), 10);

    assert!(viewer.go_to_next().is_none());
    assert_eq!(viewer.current_page(), 10);
}

#[test]
fn failed_load_notifies_once_and_stays_disabled() {
    let mut viewer = Viewer::new("https://example.invalid/missing.pdf", Scale::Normal, 600);

    let toast = viewer.document_failed().unwrap();
    assert_eq!(toast.title, "Error loading pdf");
    assert_eq!(toast.description, "Please try again later");
    assert_eq!(toast.variant, ToastVariant::Destructive);
    assert!(viewer.document_failed().is_none());

    assert_eq!(viewer.load_state(), LoadState::Failed);
    assert_eq!(viewer.page_count(), None);
    for _ in 0..3 {
        viewer.go_to_next();
        viewer.go_to_previous();
    }
    assert!(!viewer.can_go_next());
    assert!(!viewer.can_go_previous());
    assert_eq!(viewer.current_page(), 1);
    assert_eq!(viewer.submit_page("1"), Err(PageInputError::NotLoaded));
}

#[test]
fn out_of_order_completions_are_discarded() {
    let mut viewer = loaded(3);
    let to_one_and_half = viewer.set_scale(Scale::OneAndHalf).unwrap();
    let to_double = viewer.set_scale(Scale::Double).unwrap();

    viewer.render_finished(to_double.token, "2.0".to_string());
    viewer.render_finished(to_one_and_half.token, "1.5".to_string());

    assert_eq!(viewer.render().rendered_scale(), Some(Scale::Double));
    assert_eq!(
        viewer.render().visible().map(|f| f.image.as_str()),
        Some("2.0")
    );
}

#[test]
fn failed_render_settles_on_visible_frame() {
    let mut viewer = loaded(4);
    let to_double = viewer.set_scale(Scale::Double).unwrap();
    viewer.render_failed(to_double.token);

    assert!(viewer.render().is_stable());
    assert_eq!(viewer.render().rendered_scale(), Some(viewer.scale()));
    assert!(!viewer.is_loading());

    let next = viewer.go_to_next().unwrap();
    viewer.render_failed(next.token);
    assert_eq!(
        Some(viewer.current_page()),
        viewer.render().visible().map(|f| f.key.page)
    );
}
