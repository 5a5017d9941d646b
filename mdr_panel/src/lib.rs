//! Frame orchestration for the macrodata refinement panel: screen-space
//! placement of the tile grid under a pannable viewport, pointer-driven
//! refinement into bins, the idle/attract screen, and the persisted display
//! settings. Rendering and input stay behind the [`render::Renderer`] and
//! [`input::InputSource`] seams so a host window loop (or a test) supplies
//! them.

pub mod bins;
pub mod idle;
pub mod input;
pub mod panel;
pub mod presets;
pub mod render;
pub mod session;
pub mod settings;
pub mod theme;
pub mod viewport;

pub use bins::Bin;
pub use idle::IdleScreen;
pub use input::{FrameInput, InputSource, ScriptedInput};
pub use panel::{FrameContext, NumbersPanel, PanelEvent, LOGO_IMAGE};
pub use presets::{DisplayPresets, PresetScaler};
pub use render::{Color, DrawCall, RecordingRenderer, Renderer};
pub use session::{Session, SessionEvent, IDLE_TIMEOUT_SECONDS};
pub use settings::{load_or_default, save_settings, ControlSettings, DisplaySettings, Settings};
pub use theme::Theme;
pub use viewport::Viewport;
