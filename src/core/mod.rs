pub mod client;
pub mod prompt;

pub use crate::domain::model::{ConnectionTest, Ingredient};
pub use crate::domain::ports::{ConfigProvider, ContentGenerator};
pub use crate::utils::error::Result;
