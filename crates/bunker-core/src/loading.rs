//! 請求資料載入
//!
//! 從帶標頭的分隔文字讀取請求，欄位名為 `time` 與 `volume`，
//! 其餘欄位忽略。載入時即檢查時間非負、油量為正以及時間順序，
//! 不合法的資料以 `BunkerError::InvalidInput` 回報並指出資料列。

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::{BunkerError, Request};

#[derive(Debug, Deserialize)]
struct RequestRecord {
    time: i64,
    volume: i64,
}

/// 請求載入器
#[derive(Debug, Clone)]
pub struct RequestLoader {
    delimiter: u8,
}

impl Default for RequestLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestLoader {
    /// 創建新的載入器（逗號分隔）
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// 建構器模式：設置分隔符
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// 從檔案載入
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> crate::Result<Vec<Request>> {
        let file = File::open(path)?;
        self.from_reader(BufReader::new(file))
    }

    /// 從字串載入
    pub fn load_str(&self, content: &str) -> crate::Result<Vec<Request>> {
        self.from_reader(content.as_bytes())
    }

    /// 從任意讀取器載入
    pub fn from_reader<R: Read>(&self, reader: R) -> crate::Result<Vec<Request>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut requests: Vec<Request> = Vec::new();
        for (index, record) in reader.deserialize::<RequestRecord>().enumerate() {
            let record = record?;
            // 標頭佔第 1 列
            let line = index + 2;

            if record.time < 0 {
                return Err(BunkerError::InvalidInput(format!(
                    "第 {} 列: 開始時間不可為負數 ({})",
                    line, record.time
                )));
            }
            if record.volume <= 0 {
                return Err(BunkerError::InvalidInput(format!(
                    "第 {} 列: 油量必須為正數 ({})",
                    line, record.volume
                )));
            }
            if let Some(previous) = requests.last() {
                if record.time < previous.start_time {
                    return Err(BunkerError::InvalidInput(format!(
                        "第 {} 列: 開始時間 {} 早於前一筆 {}",
                        line, record.time, previous.start_time
                    )));
                }
            }

            requests.push(Request::new(record.time, record.volume));
        }

        Ok(requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_requests() {
        let content = "time,volume\n10,40\n100,10\n170,20\n";
        let requests = RequestLoader::new().load_str(content).unwrap();

        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0], Request::new(10, 40));
        assert_eq!(requests[2].end_time(), 190);
    }

    #[test]
    fn test_load_with_extra_columns_and_delimiter() {
        let content = "id;volume;time\nA; 40; 10\nB; 10; 100\n";
        let requests = RequestLoader::new()
            .with_delimiter(b';')
            .load_str(content)
            .unwrap();

        assert_eq!(requests, vec![Request::new(10, 40), Request::new(100, 10)]);
    }

    #[test]
    fn test_load_rejects_unordered() {
        let content = "time,volume\n100,10\n10,40\n";
        let err = RequestLoader::new().load_str(content).unwrap_err();

        assert!(matches!(err, BunkerError::InvalidInput(ref msg) if msg.contains("第 3 列")));
    }

    #[test]
    fn test_load_rejects_non_positive_volume() {
        let content = "time,volume\n10,0\n";
        let err = RequestLoader::new().load_str(content).unwrap_err();
        assert!(matches!(err, BunkerError::InvalidInput(_)));
    }

    #[test]
    fn test_load_rejects_malformed_number() {
        let content = "time,volume\nten,40\n";
        let err = RequestLoader::new().load_str(content).unwrap_err();
        assert!(matches!(err, BunkerError::Csv(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = RequestLoader::new()
            .from_path("/nonexistent/requests.csv")
            .unwrap_err();
        assert!(matches!(err, BunkerError::Io(_)));
    }
}
