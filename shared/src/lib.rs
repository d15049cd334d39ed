pub mod catalog;
pub mod colors;
pub mod device;
pub mod intro;
pub mod presentation;
pub mod stamp;
pub mod tooltip;
pub mod viewport;

pub use catalog::Catalog;
pub use intro::{IntroFrame, IntroLayout, IntroSequence};
pub use presentation::{
    CanvasSize, Cursor, Frame, Navigation, PointerKind, Presentation, Scene, Sketch, StampSprite,
    StampVariant,
};
pub use stamp::{Stamp, StampPlacement, StampSpec};
pub use viewport::MapViewport;
