//! 고정 용량 롤링 히스토리 버퍼.
//!
//! CPU/메모리/디스크 사용률, 프로브 응답 시간 등 메트릭 스트림마다
//! 독립된 인스턴스를 하나씩 소유한다.

use std::collections::VecDeque;

/// 호스트/헬스 히스토리 기본 용량 (1분, 라운드당 1샘플 기준 60개)
pub const DEFAULT_HISTORY_CAPACITY: usize = 60;

/// 고정 용량 FIFO 샘플 버퍼
///
/// 용량을 초과하면 가장 오래된 샘플을 버린다. 정렬하지 않으며
/// 삽입 순서만 의미가 있다.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryBuffer<T> {
    samples: VecDeque<T>,
    capacity: usize,
}

impl<T: Clone> HistoryBuffer<T> {
    /// 새 버퍼 생성 (용량 0은 1로 보정)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// 샘플 추가 (가득 차면 가장 오래된 샘플 제거)
    pub fn append(&mut self, value: T) {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    /// 현재 샘플 복사본 (오래된 것부터)
    ///
    /// 반환된 벡터는 이후 `append`의 영향을 받지 않는다.
    pub fn values(&self) -> Vec<T> {
        self.samples.iter().cloned().collect()
    }

    /// 가장 최근 샘플
    pub fn latest(&self) -> Option<&T> {
        self.samples.back()
    }

    /// 현재 샘플 수
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// 비어있는지
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 최대 용량
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl HistoryBuffer<f64> {
    /// 산술 평균 (비어있으면 0)
    pub fn mean(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }
}

impl<T: Clone> Default for HistoryBuffer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
