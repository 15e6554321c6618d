//! Overlay manager for page tooltips
//!
//! Owns the single shared tooltip overlay and the hover/focus/touch state
//! machine that drives it. The browser is reached only through the traits
//! in [`host`], so the same manager runs against `web-sys` in the page and
//! against [`testing::FakeDom`] in native tests.

pub mod annotation;
pub mod config;
pub mod host;
pub mod manager;
pub mod placement;
pub mod testing;
pub mod timers;

pub use config::TooltipConfig;
pub use host::{Dom, Overlay, Scheduler, TimerId, TimerKind};
pub use manager::{Phase, TooltipManager};
pub use page_tooltips_shared::{
    events::{Key, PageEvent, PageEventKind, ShowOrigin},
    Annotation, Point, Rect, Size, TooltipError, TooltipPosition, TooltipResult,
};
