//! Requests coming back from the rendering layer.

/// A user action on the to-do screen.
///
/// `Delete` carries no partition: the screen shows a trash button on both
/// lists and the store removes the item from whichever one holds it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Add { text: String },
    Complete { id: String },
    Uncomplete { id: String },
    Delete { id: String },
}
