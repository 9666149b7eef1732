pub mod batch;
pub mod content;
pub mod image;
pub mod publish;

pub use batch::*;
pub use content::*;
pub use image::*;
pub use publish::*;
