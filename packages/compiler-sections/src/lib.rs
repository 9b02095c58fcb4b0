pub mod converter;
pub mod slug;
pub mod toc;

pub use converter::{
    convert, convert_with_options, ConvertOptions, Input, Phase, SectionConverter,
    PLACEHOLDER_FRAGMENT,
};
pub use slug::{slugify, SlugRegistry};
pub use toc::build_toc;
