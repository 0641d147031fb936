//! Interaction state machine and token lifecycle.
//!
//! Pointer and UI events flow in, a pure transition function decides the next
//! modal state and a list of effects, and the lifecycle applies those effects
//! to the grid. Exactly one modal flow is live at any time.

pub mod event;
pub mod lifecycle;
pub mod machine;

pub use event::{ContextTarget, Event, MenuAction, PixelMap, PixelPoint, PointerTarget};
pub use lifecycle::{apply, Effect};
pub use machine::{
    transition, DragSource, DragState, InteractionState, Machine, MenuPage, MenuState, Press,
    Step, DRAG_THRESHOLD_PX, MENU_TIMEOUT_TICKS,
};
