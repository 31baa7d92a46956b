//! Size-capped log file.

use std::io;

use file_rotate::compression::Compression;
use file_rotate::suffix::AppendCount;
use file_rotate::{ContentLimit, FileRotate};

use crate::config::PollerSettings;

/// Opens the log file, rotating it once it reaches `log_max_bytes` and
/// keeping `log_max_files` older copies (`homework_bot.log.1`, `.2`, ...).
///
/// # Errors
///
/// Returns an error if the log directory cannot be created.
pub fn rotating_log_file(settings: &PollerSettings) -> io::Result<FileRotate<AppendCount>> {
    std::fs::create_dir_all(&settings.log_dir)?;

    Ok(FileRotate::new(
        settings.log_file(),
        AppendCount::new(settings.log_max_files),
        ContentLimit::Bytes(settings.log_max_bytes),
        Compression::None,
        #[cfg(unix)]
        None,
    ))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir().join(format!("homework_bot_{name}_{}_{nanos}", std::process::id()))
    }

    #[test]
    fn test_log_file_rotates_at_size_cap() {
        let dir = scratch_dir("rotate");
        let settings = PollerSettings {
            log_dir: dir.clone(),
            log_max_bytes: 16,
            log_max_files: 2,
            ..PollerSettings::default()
        };

        let mut log = rotating_log_file(&settings).unwrap();
        for _ in 0..6 {
            log.write_all(b"0123456789\n").unwrap();
        }
        log.flush().unwrap();

        assert!(dir.join("homework_bot.log").exists());
        assert!(dir.join("homework_bot.log.1").exists());
        assert!(dir.join("homework_bot.log.2").exists());
        assert!(!dir.join("homework_bot.log.3").exists());
        let active = std::fs::metadata(dir.join("homework_bot.log")).unwrap();
        assert!(active.len() <= 16);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_creates_missing_log_dir() {
        let dir = scratch_dir("mkdir").join("nested");
        let settings = PollerSettings {
            log_dir: dir.clone(),
            ..PollerSettings::default()
        };

        rotating_log_file(&settings).unwrap();
        assert!(dir.is_dir());

        std::fs::remove_dir_all(dir.parent().unwrap_or(&dir)).ok();
    }
}
