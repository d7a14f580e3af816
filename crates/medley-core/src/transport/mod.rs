pub(crate) mod frame_loop;
mod solo;
mod state;

pub use solo::SoloMute;
pub use state::{PlayState, TimeSelection, TransportState};
