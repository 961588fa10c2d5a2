use std::ops::Range;

use crate::text::AttributedText;

/// Edit menu actions a host may ask about before showing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditAction {
    Copy,
    Cut,
    Paste,
    SelectAll,
    Share,
    LookUp,
}

/// Receives link taps and copy notifications from composed text blocks.
pub trait RichTextObserver {
    /// Called with the resolved identifier of a tapped link.
    fn did_tap_link(&self, link_id: &str);

    /// Called after the copy action has put the selection on the pasteboard.
    fn copy_menu_item_tapped(&self) {}

    /// Overrides whether an edit action is offered. `None` keeps the host default.
    fn can_perform_action(&self, _action: EditAction) -> Option<bool> {
        None
    }
}

/// Whether `action` is available, honouring an observer override.
pub fn can_perform(
    action: EditAction,
    observer: Option<&dyn RichTextObserver>,
    host_default: bool,
) -> bool {
    observer
        .and_then(|observer| observer.can_perform_action(action))
        .unwrap_or(host_default)
}

/// Runs the copy action: returns the selected text for the pasteboard, then
/// notifies the observer.
///
/// `selection` is a character range; `None` means nothing is selected and
/// the copy is a no-op.
pub fn copy_selection(
    text: &AttributedText,
    selection: Option<Range<usize>>,
    observer: Option<&dyn RichTextObserver>,
) -> Option<String> {
    let selection = selection?;
    let start = text.byte_index(selection.start.min(text.char_len()))?;
    let end = text.byte_index(selection.end.min(text.char_len()))?;
    let copied = text.as_str().get(start..end.max(start))?.to_string();
    if let Some(observer) = observer {
        observer.copy_menu_item_tapped();
    }
    Some(copied)
}
