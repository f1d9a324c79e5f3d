pub mod renderer;
pub mod surface;

pub use renderer::{Renderer, Scoreboard};
pub use surface::{FrameBuffer, Surface, draw_board};
