pub mod skeleton;
#[cfg(feature = "desktop")]
pub mod window;

pub use skeleton::{hand_bones, landmark_color, Bone};
#[cfg(feature = "desktop")]
pub use window::MinifbRenderer;
