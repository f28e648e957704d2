//! 基于 RAII 的动态数组（可增长向量）
//!
//! 容量满时按 [`SCALE_FACTOR`] 倍增，追加操作均摊 O(1)。所有按下标的操作都做边界检查，
//! 失败时通过 [`ArrayError`] 返回，数组保持原状。

use std::alloc::{self, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};
use std::slice;

use log::{debug, trace};

mod error;

pub use error::ArrayError;

/// 扩容倍数
pub const SCALE_FACTOR: usize = 2;

/// `find` 未命中时的返回值
pub const NOT_FOUND: isize = -1;

/// 课堂练习中的整数向量：元素为 i32 的动态数组
pub type NeuVector = DynamicArray<i32>;

/// 基于 RAII 的动态数组实现
///
/// `[0, len)` 为有效元素；`[len, cap)` 的槽位已初始化但内容无意义。
/// 容量只增不减。
pub struct DynamicArray<T: Copy + Default> {
    ptr: NonNull<T>,
    cap: usize,
    len: usize,
    _marker: PhantomData<T>,
}

// SAFETY: 缓冲区由 DynamicArray 独占，只要 T 是 Send 就可以跨线程转移所有权
unsafe impl<T: Copy + Default + Send> Send for DynamicArray<T> {}
// SAFETY: 共享引用只能读取，只要 T 是 Sync 就可以在多线程间共享
unsafe impl<T: Copy + Default + Sync> Sync for DynamicArray<T> {}

impl<T: Copy + Default> DynamicArray<T> {
    /// 创建具有指定初始容量的动态数组
    ///
    /// `capacity` 为 0 时返回 [`ArrayError::ZeroCapacity`]。
    ///
    /// 所有槽位在分配时即写入 `T::default()`，因此超大容量会在创建时触碰全部内存页。
    ///
    /// 零尺寸类型在编译期被拒绝：
    ///
    /// ```compile_fail
    /// let _ = neu_vector::DynamicArray::<()>::with_capacity(1);
    /// ```
    pub fn with_capacity(capacity: usize) -> Result<Self, ArrayError> {
        // 不支持零尺寸类型（ZST），在编译期拒绝
        const { assert!(mem::size_of::<T>() != 0, "Zero-sized types are not supported") };
        if capacity == 0 {
            return Err(ArrayError::ZeroCapacity);
        }

        let layout = Self::layout_for(capacity)?;
        // SAFETY: layout 的大小非零
        let raw = unsafe { alloc::alloc(layout) };
        let ptr = NonNull::new(raw.cast::<T>()).ok_or(ArrayError::Alloc {
            requested: capacity,
        })?;
        // SAFETY: 新内存块恰好容纳 capacity 个 T
        unsafe { Self::fill_default(ptr, 0, capacity) };

        debug!("allocated dynamic array with capacity {capacity}");
        Ok(Self {
            ptr,
            cap: capacity,
            len: 0,
            _marker: PhantomData,
        })
    }

    /// 以切片内容创建数组，容量等于切片长度（至少为 1）
    pub fn from_slice(values: &[T]) -> Result<Self, ArrayError> {
        let mut array = Self::with_capacity(values.len().max(1))?;
        array.buffer_mut()[..values.len()].copy_from_slice(values);
        array.len = values.len();
        Ok(array)
    }

    /// 显式释放数组。所有权被消耗，因此不可能重复释放。
    pub fn release(self) {
        trace!("releasing dynamic array (len {}, cap {})", self.len, self.cap);
        drop(self);
    }

    /// 获取当前元素数量
    pub fn len(&self) -> usize {
        self.len
    }

    /// 同 [`len`](Self::len)
    pub fn size(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 获取当前容量
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// 读取 `index` 处的元素，`index` 必须小于长度（而不是容量）
    pub fn get(&self, index: usize) -> Result<T, ArrayError> {
        self.as_slice()
            .get(index)
            .copied()
            .ok_or(ArrayError::OutOfBounds {
                index,
                len: self.len,
            })
    }

    /// 覆盖 `index` 处的元素，不会触发扩容
    pub fn set(&mut self, index: usize, value: T) -> Result<(), ArrayError> {
        let len = self.len;
        let slot = self
            .as_mut_slice()
            .get_mut(index)
            .ok_or(ArrayError::OutOfBounds { index, len })?;
        *slot = value;
        Ok(())
    }

    /// 在指定位置插入元素，`index == len` 等价于追加
    ///
    /// 满容量时先倍增。下标非法或扩容失败时数组不变。
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), ArrayError> {
        if index > self.len {
            return Err(ArrayError::OutOfBounds {
                index,
                len: self.len,
            });
        }
        if self.len == self.cap {
            self.grow()?;
        }

        let len = self.len;
        let buffer = self.buffer_mut();
        // 将 index 之后的元素向后移动一位
        buffer.copy_within(index..len, index + 1);
        buffer[index] = value;
        self.len += 1;
        Ok(())
    }

    /// 在末尾添加元素
    pub fn append(&mut self, value: T) -> Result<(), ArrayError> {
        self.insert(self.len, value)
    }

    /// 移除并返回指定位置的元素，容量不变
    pub fn remove(&mut self, index: usize) -> Result<T, ArrayError> {
        if index >= self.len {
            return Err(ArrayError::OutOfBounds {
                index,
                len: self.len,
            });
        }

        let len = self.len;
        let buffer = self.buffer_mut();
        let value = buffer[index];
        // 将 index 之后的元素向前移动一位
        buffer.copy_within(index + 1..len, index);
        self.len -= 1;
        Ok(value)
    }

    /// 弹出末尾元素
    pub fn pop(&mut self) -> Result<T, ArrayError> {
        if self.len == 0 {
            return Err(ArrayError::Empty);
        }
        self.remove(self.len - 1)
    }

    /// 丢弃所有元素，保留容量
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// 第一个等于 `value` 的元素下标
    pub fn position(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.as_slice().iter().position(|v| v == value)
    }

    /// 第一个等于 `value` 的元素下标，未找到时返回 [`NOT_FOUND`]
    ///
    /// 未命中属于正常结果，不是错误。
    pub fn find(&self, value: &T) -> isize
    where
        T: PartialEq,
    {
        // len <= isize::MAX，因为 Layout 限制了分配大小
        self.position(value).map_or(NOT_FOUND, |index| index as isize)
    }

    /// 尝试预留容量（OOM 防护接口）
    ///
    /// 通过反复倍增得到足以容纳 `len + additional` 的容量，失败时数组不变。
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), ArrayError> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(ArrayError::CapacityOverflow)?;
        if required <= self.cap {
            return Ok(());
        }

        let mut new_cap = self.cap;
        while new_cap < required {
            new_cap = new_cap
                .checked_mul(SCALE_FACTOR)
                .ok_or(ArrayError::CapacityOverflow)?;
        }
        self.reallocate(new_cap)
    }

    /// 依次追加所有元素。遇到第一个失败即停止，之前追加的元素保留。
    pub fn try_extend<I>(&mut self, values: I) -> Result<(), ArrayError>
    where
        I: IntoIterator<Item = T>,
    {
        values.into_iter().try_for_each(|value| self.append(value))
    }

    /// 复制出一个容量相同的新数组
    pub fn try_clone(&self) -> Result<Self, ArrayError> {
        let mut copy = Self::with_capacity(self.cap)?;
        copy.buffer_mut()[..self.len].copy_from_slice(self.as_slice());
        copy.len = self.len;
        Ok(copy)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.buffer()[..self.len]
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.len;
        &mut self.buffer_mut()[..len]
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// `"[v0, v1, ..., vn]"`，空数组为 `"[]"`
    pub fn to_debug_string(&self) -> String
    where
        T: fmt::Display,
    {
        self.to_string()
    }

    /// 练习程序的打印格式：`"Vector: [1, 2, 3]"`
    pub fn print_string(&self) -> String
    where
        T: fmt::Display,
    {
        format!("Vector: {self}")
    }

    fn grow(&mut self) -> Result<(), ArrayError> {
        let new_cap = self
            .cap
            .checked_mul(SCALE_FACTOR)
            .ok_or(ArrayError::CapacityOverflow)?;
        self.reallocate(new_cap)
    }

    // 失败时 ptr、cap、len 与内容均保持不变
    fn reallocate(&mut self, new_cap: usize) -> Result<(), ArrayError> {
        debug_assert!(new_cap > self.cap);
        let old_layout = Self::layout_for(self.cap)?;
        let new_layout = Self::layout_for(new_cap)?;

        // SAFETY: ptr 由 old_layout 分配；realloc 失败时旧内存块保持有效
        let raw = unsafe {
            alloc::realloc(self.ptr.as_ptr().cast::<u8>(), old_layout, new_layout.size())
        };
        let ptr = NonNull::new(raw.cast::<T>()).ok_or(ArrayError::Alloc { requested: new_cap })?;
        // SAFETY: 新内存块容纳 new_cap 个 T，前 cap 个已由 realloc 拷贝
        unsafe { Self::fill_default(ptr, self.cap, new_cap) };

        debug!("resized dynamic array: {} -> {} slots (len {})", self.cap, new_cap, self.len);
        self.ptr = ptr;
        self.cap = new_cap;
        Ok(())
    }

    fn layout_for(capacity: usize) -> Result<Layout, ArrayError> {
        Layout::array::<T>(capacity).map_err(|_| ArrayError::Alloc {
            requested: capacity,
        })
    }

    /// 逐个写入默认值。扩容时新尾部的每一页都会被触碰，成本与新增槽位数成正比。
    ///
    /// # Safety
    ///
    /// `ptr` 必须指向至少 `end` 个 `T` 的可写内存。
    unsafe fn fill_default(ptr: NonNull<T>, start: usize, end: usize) {
        for i in start..end {
            unsafe { ptr::write(ptr.as_ptr().add(i), T::default()) };
        }
    }

    // 整个缓冲区都已初始化，因此可以按容量视为切片
    fn buffer(&self) -> &[T] {
        // SAFETY: ptr 指向 cap 个已初始化的 T，生命周期受 &self 约束
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.cap) }
    }

    fn buffer_mut(&mut self) -> &mut [T] {
        // SAFETY: ptr 指向 cap 个已初始化的 T，&mut self 保证独占访问
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.cap) }
    }
}

impl<T: Copy + Default> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        // T: Copy，无需逐个析构元素
        if let Ok(layout) = Self::layout_for(self.cap) {
            // SAFETY: 内存块由同一 layout 分配，且只释放一次
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout) };
        }
    }
}

impl<T: Copy + Default> Deref for DynamicArray<T> {
    type Target = [T];
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Copy + Default> DerefMut for DynamicArray<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Copy + Default> AsRef<[T]> for DynamicArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Copy + Default + PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Copy + Default + Eq> Eq for DynamicArray<T> {}

impl<T: Copy + Default + fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Copy + Default + fmt::Display> fmt::Display for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

// 迭代器支持
pub struct IntoIter<T: Copy + Default> {
    array: DynamicArray<T>,
    front: usize,
}

impl<T: Copy + Default> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            array: self,
            front: 0,
        }
    }
}

impl<T: Copy + Default> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let value = self.array.as_slice().get(self.front).copied()?;
        self.front += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.array.len - self.front;
        (remaining, Some(remaining))
    }
}

impl<T: Copy + Default> ExactSizeIterator for IntoIter<T> {}

// 借用迭代器
impl<'a, T: Copy + Default> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T: Copy + Default> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests;
