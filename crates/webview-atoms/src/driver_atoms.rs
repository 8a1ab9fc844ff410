//! A collection of atoms from the WebDriver script library.
//!
//! Every factory binds one leaf script and pairs it with at most one
//! transformer:
//!
//! | Factory | Needs element | Result |
//! |---|---|---|
//! | [`web_click`] | yes | [`Evaluation`] |
//! | [`clear_element`] | yes | [`Evaluation`] |
//! | [`web_keys`] | yes | [`Evaluation`] |
//! | [`web_scroll_into_view`] | yes | `bool` |
//! | [`get_text`] | no | `String` |
//! | [`find_element`] | no | [`ElementReference`] |
//! | [`find_multiple_elements`] | no | `Vec<ElementReference>` |
//! | [`select_active_element`] | no | [`ElementReference`] |
//! | [`select_frame_by_index`] | no | [`WindowReference`] |
//! | [`select_frame_by_id_or_name`] | no | [`WindowReference`] |
//!
//! [`Evaluation`]: crate::evaluation::Evaluation

use crate::atom::{
    FrameByIdOrNameArgs, FrameByIndexArgs, LocatorArgs, SimpleAtom, TransformingAtom, WebKeysArgs,
};
use crate::locator::Locator;
use crate::reference::{ElementReference, WindowReference};
use crate::transform::{CastOrDie, ElementReferenceList};

/// Atom producing an element handle
pub type ElementAtom = TransformingAtom<SimpleAtom, CastOrDie<ElementReference>>;

/// Atom producing a window/frame handle
pub type WindowAtom = TransformingAtom<SimpleAtom, CastOrDie<WindowReference>>;

/// Atom producing text
pub type TextAtom = TransformingAtom<SimpleAtom, CastOrDie<String>>;

/// Atom producing a boolean
pub type BoolAtom = TransformingAtom<SimpleAtom, CastOrDie<bool>>;

/// Atom producing an ordered list of element handles
pub type ElementListAtom = TransformingAtom<SimpleAtom, ElementReferenceList>;

/// Simulate the javascript events to click on the active element
#[must_use]
pub fn web_click() -> SimpleAtom {
    SimpleAtom::WebClick
}

/// Clear content from the active (editable) element
#[must_use]
pub fn clear_element() -> SimpleAtom {
    SimpleAtom::ClearElement
}

/// Simulate javascript key events sent to the active element
#[must_use]
pub fn web_keys(text: impl Into<String>) -> SimpleAtom {
    SimpleAtom::WebKeys(WebKeysArgs { text: text.into() })
}

/// Find an element using the given lookup strategy
#[must_use]
pub fn find_element(locator: Locator, value: impl Into<String>) -> ElementAtom {
    TransformingAtom::new(
        SimpleAtom::FindElement(LocatorArgs {
            locator,
            value: value.into(),
        }),
        CastOrDie::new(),
    )
}

/// Find all elements matching the given lookup strategy
#[must_use]
pub fn find_multiple_elements(locator: Locator, value: impl Into<String>) -> ElementListAtom {
    let value = value.into();
    TransformingAtom::new(
        SimpleAtom::FindElements(LocatorArgs {
            locator,
            value: value.clone(),
        }),
        ElementReferenceList::new(locator, value),
    )
}

/// Find the currently focused element of the document
#[must_use]
pub fn select_active_element() -> ElementAtom {
    TransformingAtom::new(SimpleAtom::ActiveElement, CastOrDie::new())
}

/// Select a subframe of the current window by its index
#[must_use]
pub fn select_frame_by_index(index: i32) -> WindowAtom {
    frame_by_index(index, None)
}

/// Select a subframe of `root` by its index
#[must_use]
pub fn select_frame_by_index_in(index: i32, root: WindowReference) -> WindowAtom {
    frame_by_index(index, Some(root))
}

/// Select a subframe of the current window by its name or id
#[must_use]
pub fn select_frame_by_id_or_name(id_or_name: impl Into<String>) -> WindowAtom {
    frame_by_id_or_name(id_or_name.into(), None)
}

/// Select a subframe of `root` by its name or id
#[must_use]
pub fn select_frame_by_id_or_name_in(
    id_or_name: impl Into<String>,
    root: WindowReference,
) -> WindowAtom {
    frame_by_id_or_name(id_or_name.into(), Some(root))
}

/// Visible text beneath the active element (or the document)
#[must_use]
pub fn get_text() -> TextAtom {
    TransformingAtom::new(SimpleAtom::GetVisibleText, CastOrDie::new())
}

/// `true` if the active element is in view after scrolling
#[must_use]
pub fn web_scroll_into_view() -> BoolAtom {
    TransformingAtom::new(SimpleAtom::ScrollIntoView, CastOrDie::new())
}

fn frame_by_index(index: i32, root: Option<WindowReference>) -> WindowAtom {
    TransformingAtom::new(
        SimpleAtom::FrameByIndex(FrameByIndexArgs { index, root }),
        CastOrDie::new(),
    )
}

fn frame_by_id_or_name(id_or_name: String, root: Option<WindowReference>) -> WindowAtom {
    TransformingAtom::new(
        SimpleAtom::FrameByIdOrName(FrameByIdOrNameArgs { id_or_name, root }),
        CastOrDie::new(),
    )
}
