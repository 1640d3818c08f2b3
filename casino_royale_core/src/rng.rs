use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 发牌用的随机源。
///
/// 引擎不直接读取全局随机状态，而是通过这个 trait 注入，
/// 测试中可以换成确定性的实现。
pub trait RandomSource {
    /// 返回 `[0, upper)` 范围内的均匀随机下标
    fn pick(&mut self, upper: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn pick(&mut self, upper: usize) -> usize {
        (**self).pick(upper)
    }
}

/// 使用线程本地随机数生成器
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn pick(&mut self, upper: usize) -> usize {
        rand::rng().random_range(0..upper)
    }
}

/// 可复现的随机源，相同的 seed 发出相同的牌序列
#[derive(Clone, Debug)]
pub struct SeededRng {
    inner: StdRng,
}

impl SeededRng {
    pub fn from_seed(seed: u64) -> Self {
        Self { inner: StdRng::seed_from_u64(seed) }
    }

    /// 从操作系统熵源初始化
    pub fn from_os_rng() -> Self {
        Self { inner: StdRng::from_os_rng() }
    }
}

impl RandomSource for SeededRng {
    fn pick(&mut self, upper: usize) -> usize {
        self.inner.random_range(0..upper)
    }
}

#[cfg(test)]
pub(crate) use scripted::ScriptedRng;
