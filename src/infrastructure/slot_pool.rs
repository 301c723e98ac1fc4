//! 并发槽位池 - 基础设施层
//!
//! 持有唯一的共享资源（信号量），只暴露"获取槽位"的能力

use std::sync::Arc;

use tokio::sync::{AcquireError, OwnedSemaphorePermit, Semaphore};

use crate::error::ConfigError;

/// 并发槽位池
///
/// 职责：
/// - 持有固定容量的信号量
/// - 暴露 acquire() 能力，槽位在 permit 被 drop 时归还
/// - 不认识 Chapter / SummaryResult
/// - 不处理业务流程
#[derive(Clone)]
pub struct SlotPool {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

impl SlotPool {
    /// 允许的最大容量
    pub const MAX_SLOTS: usize = Semaphore::MAX_PERMITS;

    /// 创建新的槽位池，容量必须在 1..=MAX_SLOTS 之间
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        Self::check_capacity(capacity)?;

        Ok(Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        })
    }

    /// 校验容量，不创建信号量
    pub fn check_capacity(capacity: usize) -> Result<(), ConfigError> {
        if capacity == 0 || capacity > Self::MAX_SLOTS {
            return Err(ConfigError::InvalidConcurrencyLimit {
                value: capacity,
                max: Self::MAX_SLOTS,
            });
        }
        Ok(())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 当前空闲槽位数
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// 获取一个槽位，全部占用时等待
    ///
    /// 等待者之间不保证先来先得
    pub async fn acquire(&self) -> Result<OwnedSemaphorePermit, AcquireError> {
        self.semaphore.clone().acquire_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_capacity() {
        assert!(matches!(
            SlotPool::new(0),
            Err(ConfigError::InvalidConcurrencyLimit { value: 0, .. })
        ));
        assert!(SlotPool::new(SlotPool::MAX_SLOTS + 1).is_err());
    }

    #[tokio::test]
    async fn test_permit_is_returned_on_drop() {
        let pool = SlotPool::new(2).unwrap();
        assert_eq!(pool.capacity(), 2);

        let first = pool.acquire().await.unwrap();
        let _second = pool.acquire().await.unwrap();
        assert_eq!(pool.available(), 0);

        drop(first);
        assert_eq!(pool.available(), 1);
    }
}
