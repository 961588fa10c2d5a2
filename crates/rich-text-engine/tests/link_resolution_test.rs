//! Taps on composed views resolved to link identifiers through the public API.

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use rich_text_engine::observer::{EditAction, can_perform, copy_selection};
use rich_text_engine::{
    AttributedText, BlockView, LinkResolver, MarkdownSource, MonospaceText, Point,
    RichTextObserver, RichTextView, StyleConfig, TextViewOptions, ViewGenerator,
};
use rstest::rstest;

struct Player;

impl BlockView for Player {
    fn accessibility_value(&self) -> Option<&str> {
        None
    }
}

/// 40 columns of 8x16 cells.
struct Terminal;

impl ViewGenerator for Terminal {
    type Media = Player;
    type Text = MonospaceText;

    fn media_view(&self, _tag: &str) -> Option<Player> {
        Some(Player)
    }

    fn text_view(&self, text: &AttributedText, _options: &TextViewOptions<'_>) -> MonospaceText {
        MonospaceText::new(text.clone(), 40, 8.0, 16.0)
    }
}

#[derive(Default)]
struct Recorder {
    links: RefCell<Vec<String>>,
}

impl RichTextObserver for Recorder {
    fn did_tap_link(&self, link_id: &str) {
        self.links.borrow_mut().push(link_id.to_string());
    }

    fn can_perform_action(&self, action: EditAction) -> Option<bool> {
        (action == EditAction::Share).then_some(false)
    }
}

fn view(input: &str, observer: Rc<Recorder>) -> RichTextView<MarkdownSource, Terminal> {
    RichTextView::new(input, MarkdownSource::default(), Terminal, StyleConfig::default())
        .with_observer(observer)
}

/// Centre of the cell at `col`, `row`.
fn cell(col: usize, row: usize) -> Point {
    Point::new(col as f32 * 8.0 + 4.0, row as f32 * 16.0 + 8.0)
}

#[rstest]
#[case::on_the_link(6)]
#[case::before_the_link(1)]
#[case::after_the_link(19)]
fn bare_domain_resolves_from_anywhere(#[case] col: usize) {
    let recorder = Rc::new(Recorder::default());
    let view = view("Visit example.com today", recorder.clone());

    assert_eq!(
        view.tap(cell(col, 0), 320.0).as_deref(),
        Some("http://example.com")
    );
    assert_eq!(*recorder.links.borrow(), vec!["http://example.com".to_string()]);
}

#[rstest]
#[case::after_file_name("Edit config.toml then visit example.com", "http://example.com")]
#[case::after_dotted_name("Learn Node.js at nodejs.org", "http://nodejs.org")]
#[case::after_email("Mail bob@corp.example.com or see docs.rs", "http://docs.rs")]
fn fallback_skips_look_alike_links(#[case] input: &str, #[case] expected: &str) {
    let recorder = Rc::new(Recorder::default());
    let view = view(input, recorder.clone());

    assert_eq!(view.tap(cell(2, 0), 320.0).as_deref(), Some(expected));
    assert_eq!(*recorder.links.borrow(), vec![expected.to_string()]);
}

#[test]
fn explicit_link_beats_detected_url() {
    let recorder = Rc::new(Recorder::default());
    let view = view(
        "Open [question 12](#q-12) or https://example.com",
        recorder.clone(),
    );

    assert_eq!(view.tap(cell(7, 0), 320.0).as_deref(), Some("q-12"));
    assert_eq!(
        view.tap(cell(25, 0), 320.0).as_deref(),
        Some("https://example.com")
    );
    assert_eq!(
        *recorder.links.borrow(),
        vec!["q-12".to_string(), "https://example.com".to_string()]
    );
}

#[test]
fn url_link_attribute_is_returned_verbatim() {
    let recorder = Rc::new(Recorder::default());
    let view = view("[docs](docs.rs/regex) here", recorder);

    assert_eq!(view.tap(cell(1, 0), 320.0).as_deref(), Some("docs.rs/regex"));
}

#[test]
fn tap_past_end_of_text_checks_last_character() {
    let recorder = Rc::new(Recorder::default());
    let view = view("Read [more](#next)", recorder);

    // Far right of the only line lands after the final character.
    assert_eq!(view.tap(Point::new(300.0, 8.0), 320.0).as_deref(), Some("next"));
}

#[test]
fn text_without_links_notifies_nobody() {
    let recorder = Rc::new(Recorder::default());
    let view = view("Nothing to open here", recorder.clone());

    assert_eq!(view.tap(cell(3, 0), 320.0), None);
    assert!(recorder.links.borrow().is_empty());
}

#[test]
fn taps_below_media_hit_following_text() {
    let recorder = Rc::new(Recorder::default());
    let view = view("Intro\n\n![video](abc)\n\nSee www.rust-lang.org", recorder);
    let layout = view.layout(320.0);

    // 16 (intro) + 180 (320 * 9/16) puts the second text block at y = 196.
    assert_eq!(layout.frames()[2].y, 196.0);
    assert_eq!(
        view.tap(Point::new(4.0, 200.0), 320.0).as_deref(),
        Some("http://www.rust-lang.org")
    );
    assert_eq!(view.tap(Point::new(4.0, 100.0), 320.0), None);
}

#[test]
fn wrapped_lines_map_to_the_right_characters() {
    let mut text = AttributedText::plain("aaaa bbbb cccc dddd eeee ffff gggg hhhh iiii jjjj");
    text.add_attribute(
        45..49,
        rich_text_engine::TextAttribute::Link(rich_text_engine::LinkTarget::Custom(
            "last".into(),
        )),
    );
    let grid = MonospaceText::new(text, 40, 8.0, 16.0);

    // The second line starts at "iiii", so "jjjj" sits at columns 5 to 8.
    assert_eq!(grid.line_text(&grid.lines()[1]), "iiii jjjj");
    assert_eq!(
        LinkResolver::new().resolve(cell(6, 1), &grid).as_deref(),
        Some("last")
    );
}

#[test]
fn edit_actions_and_copy_use_the_observer() {
    let recorder = Recorder::default();
    let text = AttributedText::plain("copy me please");

    assert!(!can_perform(EditAction::Share, Some(&recorder), true));
    assert!(can_perform(EditAction::Copy, Some(&recorder), true));
    assert_eq!(
        copy_selection(&text, Some(5..7), Some(&recorder)).as_deref(),
        Some("me")
    );
}
