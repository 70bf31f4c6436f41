//! 预测日志
//!
//! 只追加的 CSV 文件，列为 Timestamp, Language, Input Text, Predicted Emotion。
//! 首次创建时写入表头。所有写入经由同一把锁串行化，保证并发请求不会交错写出半行。
//! 锁由阻塞任务持有直到文件操作结束，调用方的 future 被取消也不会提前释放。

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDateTime;
use tokio::sync::Mutex;

use crate::error::{EngineError, EngineResult};
use crate::types::{Language, PredictionRecord, TIMESTAMP_FORMAT};

/// 日志表头
pub const HEADER: [&str; 4] = ["Timestamp", "Language", "Input Text", "Predicted Emotion"];

/// 读取时接受的时间戳格式
const ACCEPTED_TIMESTAMP_FORMATS: &[&str] = &[
    TIMESTAMP_FORMAT,
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

pub struct PredictionLogger {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl PredictionLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 追加一条记录，返回前数据已落盘
    pub async fn append(&self, record: &PredictionRecord) -> EngineResult<()> {
        let guard = Arc::clone(&self.write_lock).lock_owned().await;

        let path = self.path.clone();
        let row = [
            record.formatted_timestamp(),
            record.language.as_str().to_string(),
            record.text.clone(),
            record.emotion.clone(),
        ];

        tokio::task::spawn_blocking(move || {
            let _guard = guard;
            append_row(&path, &row)
        })
        .await
        .map_err(|e| EngineError::io(format!("Log writer task failed: {e}")))?
    }

    /// 读取全部记录（跳过表头）
    ///
    /// 文件缺失、字段数不是 4、时间戳或语言无法解析都会整体失败。
    pub async fn read_all(&self) -> EngineResult<Vec<PredictionRecord>> {
        // 与写入互斥，避免读到写了一半的行
        let guard = Arc::clone(&self.write_lock).lock_owned().await;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let _guard = guard;
            read_records(&path)
        })
        .await
        .map_err(|e| EngineError::aggregation(format!("Log reader task failed: {e}")))?
    }
}

fn append_row(path: &Path, row: &[String; 4]) -> EngineResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            EngineError::io(format!("Failed to create log directory {}: {e}", parent.display()))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path)
        .map_err(|e| EngineError::io(format!("Failed to open log {}: {e}", path.display())))?;

    let len = file
        .metadata()
        .map_err(|e| EngineError::io(format!("Failed to stat log {}: {e}", path.display())))?
        .len();
    let needs_header = len == 0;

    // 上一行没有换行符（手工编辑或写入中断）时先补上，避免新行粘到旧行末尾
    if len > 0 && !ends_with_newline(&mut file, len)? {
        file.write_all(b"\n")
            .map_err(|e| EngineError::io(format!("Failed to repair log tail: {e}")))?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    let write_err = |e: csv::Error| EngineError::io(format!("Failed to write log row: {e}"));
    if needs_header {
        writer.write_record(HEADER).map_err(write_err)?;
    }
    writer.write_record(row).map_err(write_err)?;
    writer
        .flush()
        .map_err(|e| EngineError::io(format!("Failed to flush log: {e}")))?;
    writer
        .get_ref()
        .sync_data()
        .map_err(|e| EngineError::io(format!("Failed to sync log: {e}")))?;
    Ok(())
}

fn ends_with_newline(file: &mut File, len: u64) -> EngineResult<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))
        .and_then(|_| file.read_exact(&mut last))
        .map_err(|e| EngineError::io(format!("Failed to inspect log tail: {e}")))?;
    Ok(last[0] == b'\n')
}

fn read_records(path: &Path) -> EngineResult<Vec<PredictionRecord>> {
    if !path.exists() {
        return Err(EngineError::aggregation(format!(
            "Prediction log not found: {}",
            path.display()
        )));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| EngineError::aggregation(format!("Failed to open prediction log: {e}")))?;

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let line = index + 1;
        let row = row.map_err(|e| {
            EngineError::aggregation(format!("Malformed prediction log at row {line}: {e}"))
        })?;

        if index == 0 && row.get(0) == Some(HEADER[0]) {
            continue;
        }
        if row.len() != HEADER.len() {
            return Err(EngineError::aggregation(format!(
                "Malformed prediction log at row {line}: expected {} fields, found {}",
                HEADER.len(),
                row.len()
            )));
        }

        let timestamp = parse_timestamp(&row[0]).ok_or_else(|| {
            EngineError::aggregation(format!(
                "Malformed prediction log at row {line}: invalid timestamp {:?}",
                &row[0]
            ))
        })?;
        let language = Language::parse(&row[1]).map_err(|e| {
            EngineError::aggregation(format!("Malformed prediction log at row {line}: {e}"))
        })?;

        records.push(PredictionRecord {
            timestamp,
            language,
            text: row[2].to_string(),
            emotion: row[3].to_string(),
        });
    }
    Ok(records)
}

pub(crate) fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    ACCEPTED_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}
