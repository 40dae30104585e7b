pub mod excerpt;
mod post;
pub mod thumbnail;
mod transform;

pub use post::{Post, Selection};
pub use thumbnail::{ImageSizer, ThumbnailExtractor, ThumbnailPipeline};
pub use transform::{PostTransformer, DEFAULT_AUTHOR, UNTITLED};
