//! 请求槽位
//!
//! 单线程协作模型下没有锁，但仍要防止"慢的旧请求"在"快的新请求"之后完成
//! 并覆盖其结果。每个槽位（上传 / 解读 / 导出）任一时刻只认最新一次请求，
//! 过期完成被丢弃——这就是对取消语义的模拟

/// 单次请求的身份标识
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(u64);

/// 一个并发槽位：记录最近签发的请求身份
#[derive(Debug, Default)]
pub struct RequestSlot {
    next: u64,
    latest: u64,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// 签发新的请求身份；新请求总是取代槽内旧请求
    pub fn issue(&mut self) -> RequestId {
        self.next += 1;
        self.latest = self.next;
        RequestId(self.next)
    }

    /// 检查某次完成是否仍是槽内最新请求
    pub fn is_latest(&self, id: RequestId) -> bool {
        id.0 == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_request_supersedes_older() {
        let mut slot = RequestSlot::new();
        let first = slot.issue();
        let second = slot.issue();

        assert!(!slot.is_latest(first));
        assert!(slot.is_latest(second));
    }

    #[test]
    fn test_single_request_is_latest() {
        let mut slot = RequestSlot::new();
        let id = slot.issue();
        assert!(slot.is_latest(id));
    }
}
