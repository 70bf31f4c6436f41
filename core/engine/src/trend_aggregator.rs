//! 每日情绪趋势
//!
//! 全量扫描预测日志，取指定日期的记录，按小时和情绪计数，输出 24 行（0..=23 点），无记录的小时全部为 0。

use std::sync::Arc;

use chrono::{NaiveDate, Timelike};

use crate::error::{EngineError, EngineResult};
use crate::prediction_log::PredictionLogger;
use crate::types::{Emotion, PredictionRecord, TrendRow};

pub const HOURS_PER_DAY: u32 = 24;

/// 解析 `YYYY-MM-DD`
pub fn parse_date(value: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
        EngineError::validation(format!("Invalid date {value:?}, expected YYYY-MM-DD: {e}"))
    })
}

/// 按小时分桶；只统计与封闭集合完全一致的标签，其余忽略
pub fn bucket_by_hour(records: &[PredictionRecord], date: NaiveDate) -> Vec<TrendRow> {
    let mut rows: Vec<TrendRow> = (0..HOURS_PER_DAY).map(TrendRow::empty).collect();

    for record in records.iter().filter(|r| r.timestamp.date() == date) {
        match Emotion::from_label(&record.emotion) {
            Some(emotion) => rows[record.timestamp.hour() as usize].increment(emotion),
            None => tracing::debug!(label = %record.emotion, "skipping unknown emotion label"),
        }
    }

    rows
}

pub struct TrendAggregator {
    logger: Arc<PredictionLogger>,
}

impl TrendAggregator {
    pub fn new(logger: Arc<PredictionLogger>) -> Self {
        Self { logger }
    }

    /// 计算某一天的 24 小时情绪分布；日志缺失或格式错误时整体失败
    pub async fn aggregate(&self, date: NaiveDate) -> EngineResult<Vec<TrendRow>> {
        let records = self.logger.read_all().await?;
        let rows = bucket_by_hour(&records, date);
        tracing::debug!(
            %date,
            scanned = records.len(),
            matched = rows.iter().map(TrendRow::total).sum::<u64>(),
            "aggregated emotion trend"
        );
        Ok(rows)
    }
}
