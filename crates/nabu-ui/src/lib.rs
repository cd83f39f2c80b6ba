//! Nabu UI: widgets on top of `nabu-engine`.
//!
//! Every widget implements [`Widget`]: it measures itself, paints into a
//! [`Painter`] and consumes [`UiEvent`]s hit-tested against the rectangle the
//! host gave it. Notifications leave widgets through [`Signal`]s or builder
//! callbacks, synchronously and on the event thread.
//!
//! # Extending with custom widgets
//!
//! ```rust,ignore
//! use nabu_ui::prelude::*;
//!
//! pub struct Swatch(Color);
//!
//! impl Widget for Swatch {
//!     fn measure(&self, _ctx: &LayoutCtx) -> Vec2 {
//!         Vec2::new(20.0, 16.0)
//!     }
//!     fn paint(&self, painter: &mut Painter, rect: Rect) {
//!         painter.fill_rect(rect, self.0);
//!     }
//! }
//! ```

pub mod constraints;
pub mod droplist;
pub mod event;
pub mod listview;
pub mod painter;
pub mod signal;
pub mod widget;
pub mod widgets;

pub use signal::Signal;
pub use widget::Widget;

/// Everything needed to build and extend UI.
pub mod prelude {
    pub use crate::constraints::{Edges, LayoutCtx};
    pub use crate::droplist::{
        Align, Dispatch, Droplist, DroplistConfig, DroplistEvent, DroplistItem, InputGrab, NullGrab, PopupId,
        PopupManager,
    };
    pub use crate::event::{EventResult, UiEvent};
    pub use crate::listview::{ListItem, ListView, ListViewConfig, ListViewEvent, SortOrder, TextRow};
    pub use crate::painter::Painter;
    pub use crate::signal::Signal;
    pub use crate::widget::{CursorShape, Widget};
    pub use crate::widgets::{
        Button, ColorButton, ColorButtonEvent, ColorItem, ImageButtonGroup, ImageButtonItem, ToggleButtonGroup,
        ToggleButtonItem,
    };

    pub use nabu_engine::coords::{Rect, Vec2};
    pub use nabu_engine::input::{Key, Modifiers, MouseButton};
    pub use nabu_engine::paint::Color;
    pub use nabu_engine::scroll::{ScrollArea, ScrollHandle};
    pub use nabu_engine::theme::Theme;
}
