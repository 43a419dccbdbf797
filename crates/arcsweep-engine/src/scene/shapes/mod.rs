mod arc;

pub use arc::{ArcCmd, Stroke};
