//! Selection-level interactions that are not tools: dragging the selection
//! around and the clipboard.

mod copy_paste;
mod object_move;

pub use copy_paste::CopyPasteHandler;
pub use object_move::ObjectMoveHandler;
