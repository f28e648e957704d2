pub mod array;

pub use array::{NEU_ERR_ALLOC, NEU_ERR_INDEX, NEU_ERR_NULL, NEU_OK};
