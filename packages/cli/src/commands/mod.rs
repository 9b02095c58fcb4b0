pub mod convert;
pub mod init;
pub mod render;
pub mod reorder;

pub use convert::{convert, ConvertArgs};
pub use init::{init, InitArgs};
pub use render::{render, RenderArgs};
pub use reorder::{reorder, ReorderArgs};
