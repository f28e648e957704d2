use thiserror::Error;

/// 动态数组操作的错误类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArrayError {
    /// 分配器无法提供所需的内存块，或布局超出 `isize::MAX` 字节
    #[error("allocation of {requested} slots failed")]
    Alloc { requested: usize },

    /// 倍增后的容量超出 `usize` 范围
    #[error("capacity overflow")]
    CapacityOverflow,

    #[error("index {index} out of bounds for length {len}")]
    OutOfBounds { index: usize, len: usize },

    /// 对空数组调用 `pop`
    #[error("cannot pop from an empty array")]
    Empty,

    #[error("initial capacity must be greater than zero")]
    ZeroCapacity,
}

impl ArrayError {
    /// 下标错误不会修改数组，调用方可以安全地继续
    pub fn is_index_error(&self) -> bool {
        matches!(self, ArrayError::OutOfBounds { .. } | ArrayError::Empty)
    }

    pub fn is_alloc_error(&self) -> bool {
        matches!(self, ArrayError::Alloc { .. } | ArrayError::CapacityOverflow)
    }
}
