//! 暗黙キーTreapによる整数列のデータ構造

pub mod cartesiantree;
pub mod error;
pub mod util;

pub use cartesiantree::CartesianTree;
pub use error::{Error, Result};
