//! Sound playback seam for the Micropolis activity host
//!
//! The relay only needs "load file by path, play once". That contract is
//! the [`SoundPlayer`] trait; [`RodioPlayer`] is the real backend and
//! [`MockPlayer`] records calls for tests.

mod mock;
mod player;
mod traits;

pub use mock::*;
pub use player::*;
pub use traits::*;
