use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::BackupEntry;

/// Separator between the live file name and the backup timestamp.
pub const BACKUP_SEPARATOR: &str = ".backup.";

/// Length of the `YYYYMMDDHHMMSS` backup timestamp.
const TIMESTAMP_LEN: usize = 14;

/// Hook invoked after every successful overwrite of the live file, e.g. to
/// invalidate a host application's cached configuration. Best-effort: the
/// hook has no way to fail the write.
pub type PostWriteHook = Box<dyn Fn()>;

/// Owns the live .env file: verbatim reads and writes, timestamped backups
/// before every overwrite, and rotation of old backups.
///
/// All settings are injected at construction; the manager never reads
/// ambient global state. One instance manages exactly one file, and callers
/// are expected to serialize `write` calls (single-writer model).
pub struct EnvFileManager {
    path: PathBuf,
    max_backups: usize,
    backups_enabled: bool,
    post_write: Option<PostWriteHook>,
}

impl EnvFileManager {
    pub fn new(path: impl Into<PathBuf>, max_backups: usize, backups_enabled: bool) -> Self {
        Self {
            path: path.into(),
            max_backups,
            backups_enabled,
            post_write: None,
        }
    }

    /// Build a manager for the live file named in a config.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.env_file, config.max_backups, config.backups_enabled)
    }

    /// Attach a hook invoked after each successful write.
    pub fn with_post_write(mut self, hook: impl Fn() + 'static) -> Self {
        self.post_write = Some(Box::new(hook));
        self
    }

    /// Path to the live file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the live file's content verbatim.
    ///
    /// A missing file is empty configuration, not an error.
    pub fn read(&self) -> Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite the live file with `content` in full.
    ///
    /// A backup of the current content is taken first (when the file exists
    /// and backups are enabled). If the overwrite itself fails, that backup
    /// is retained; there is no rollback.
    pub fn write(&self, content: &str) -> Result<()> {
        self.backup()?;

        fs::write(&self.path, content)?;

        if let Some(hook) = &self.post_write {
            hook();
        }
        Ok(())
    }

    /// Copy the live file to a timestamped sibling and rotate old backups.
    ///
    /// Returns the created backup path, or `None` when the live file does
    /// not exist or backups are disabled. Two backups within the same second
    /// share a name; the later one overwrites the earlier.
    pub fn backup(&self) -> Result<Option<PathBuf>> {
        if !self.backups_enabled || !self.path.exists() {
            return Ok(None);
        }

        let stamp = Utc::now().format("%Y%m%d%H%M%S").to_string();
        let backup_path = self.backup_path(&stamp);
        fs::copy(&self.path, &backup_path)?;

        self.rotate()?;
        Ok(Some(backup_path))
    }

    /// Delete the oldest backups until at most `max_backups` remain.
    ///
    /// Age is the timestamp embedded in the file name, not filesystem
    /// metadata.
    fn rotate(&self) -> Result<()> {
        let backups = self.list_backups()?;
        if backups.len() <= self.max_backups {
            return Ok(());
        }

        let excess = backups.len() - self.max_backups;
        for entry in &backups[..excess] {
            fs::remove_file(&entry.path)?;
        }
        Ok(())
    }

    /// List this file's backup siblings, oldest first.
    ///
    /// Only names matching `<liveFileName>.backup.<14 digits>` qualify.
    pub fn list_backups(&self) -> Result<Vec<BackupEntry>> {
        let dir = self.parent_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let prefix = format!("{}{BACKUP_SEPARATOR}", self.file_name());
        let mut backups = Vec::new();

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if let Some(stamp) = name.strip_prefix(&prefix) {
                if stamp.len() == TIMESTAMP_LEN && stamp.bytes().all(|b| b.is_ascii_digit()) {
                    backups.push(BackupEntry {
                        path: entry.path(),
                        timestamp: stamp.to_string(),
                        file_name: name,
                    });
                }
            }
        }

        backups.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(backups)
    }

    /// The most recent backup, if any.
    pub fn latest_backup(&self) -> Result<Option<BackupEntry>> {
        Ok(self.list_backups()?.pop())
    }

    /// Write a backup's content back to the live file.
    ///
    /// Goes through `write`, so the pre-restore state is itself backed up
    /// first.
    pub fn restore(&self, timestamp: &str) -> Result<()> {
        let backup_path = self.backup_path(timestamp);
        let content = match fs::read_to_string(&backup_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::BackupNotFound(timestamp.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        self.write(&content)
    }

    fn backup_path(&self, stamp: &str) -> PathBuf {
        self.parent_dir()
            .join(format!("{}{BACKUP_SEPARATOR}{stamp}", self.file_name()))
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::manager_in;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn read_missing_file_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = manager_in(dir.path());
        assert_eq!(mgr.read().unwrap(), "");
    }

    #[test]
    fn write_then_read_round_trips_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = manager_in(dir.path());

        for content in [
            "",
            "A=1\nB=2\n",
            "A=1\r\nB=2\r\n",
            "NO_TRAILING_NEWLINE=yes",
            "# comment only\n\n",
            "UNICODE=\u{1F600} gr\u{00FC}n\n",
        ] {
            mgr.write(content).unwrap();
            assert_eq!(mgr.read().unwrap(), content);
        }
    }

    #[test]
    fn first_write_creates_no_backup() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = manager_in(dir.path());

        mgr.write("B=1\n").unwrap();
        assert_eq!(mgr.read().unwrap(), "B=1\n");
        assert!(mgr.list_backups().unwrap().is_empty());
    }

    #[test]
    fn overwrite_backs_up_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = manager_in(dir.path());

        mgr.write("A=1\n").unwrap();
        mgr.write("B=2\n").unwrap();

        assert_eq!(mgr.read().unwrap(), "B=2\n");
        let backups = mgr.list_backups().unwrap();
        assert_eq!(backups.len(), 1);
        let backed_up = std::fs::read_to_string(&backups[0].path).unwrap();
        assert_eq!(backed_up, "A=1\n");
    }

    #[test]
    fn backup_noop_when_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = EnvFileManager::new(dir.path().join(".env"), 10, false);

        mgr.write("A=1\n").unwrap();
        mgr.write("B=2\n").unwrap();

        assert!(mgr.backup().unwrap().is_none());
        assert!(mgr.list_backups().unwrap().is_empty());
    }

    #[test]
    fn backup_noop_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = manager_in(dir.path());
        assert!(mgr.backup().unwrap().is_none());
    }

    #[test]
    fn backup_name_has_fourteen_digit_stamp() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = manager_in(dir.path());

        mgr.write("A=1\n").unwrap();
        let path = mgr.backup().unwrap().unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();

        let stamp = name.strip_prefix(".env.backup.").unwrap();
        assert_eq!(stamp.len(), 14);
        assert!(stamp.bytes().all(|b| b.is_ascii_digit()));
    }

    fn plant_backup(dir: &std::path::Path, stamp: &str, content: &str) {
        std::fs::write(dir.join(format!(".env.backup.{stamp}")), content).unwrap();
    }

    #[test]
    fn rotation_keeps_only_newest() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = EnvFileManager::new(dir.path().join(".env"), 3, true);

        for i in 1..=5 {
            plant_backup(dir.path(), &format!("2024010100000{i}"), &format!("V={i}\n"));
        }
        mgr.write("SEED=1\n").unwrap();
        // Overwrite: adds one backup (count 6), rotation trims to 3.
        mgr.write("SEED=2\n").unwrap();

        let backups = mgr.list_backups().unwrap();
        assert_eq!(backups.len(), 3);
        // The oldest planted stamps are gone; the newest survivors remain.
        assert_eq!(backups[0].timestamp, "20240101000004");
        assert_eq!(backups[1].timestamp, "20240101000005");
        assert!(backups[2].timestamp > "20240101000005".to_string());
    }

    #[test]
    fn rotation_with_zero_max_deletes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = EnvFileManager::new(dir.path().join(".env"), 0, true);

        mgr.write("A=1\n").unwrap();
        mgr.write("B=2\n").unwrap();
        mgr.write("C=3\n").unwrap();

        assert!(mgr.list_backups().unwrap().is_empty());
        assert_eq!(mgr.read().unwrap(), "C=3\n");
    }

    #[test]
    fn list_backups_ignores_unrelated_siblings() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = manager_in(dir.path());

        mgr.write("A=1\n").unwrap();
        plant_backup(dir.path(), "20240101000001", "old\n");
        // Wrong stamp width, wrong prefix, non-digit stamp.
        std::fs::write(dir.path().join(".env.backup.2024"), "x").unwrap();
        std::fs::write(dir.path().join(".env.bak"), "x").unwrap();
        std::fs::write(dir.path().join("other.backup.20240101000001"), "x").unwrap();
        std::fs::write(dir.path().join(".env.backup.2024010100000a"), "x").unwrap();

        let backups = mgr.list_backups().unwrap();
        assert_eq!(backups.len(), 1);
        assert_eq!(backups[0].timestamp, "20240101000001");
    }

    #[test]
    fn list_backups_sorted_oldest_first() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = manager_in(dir.path());

        plant_backup(dir.path(), "20240301000000", "c\n");
        plant_backup(dir.path(), "20240101000000", "a\n");
        plant_backup(dir.path(), "20240201000000", "b\n");

        let stamps: Vec<_> = mgr
            .list_backups()
            .unwrap()
            .into_iter()
            .map(|b| b.timestamp)
            .collect();
        assert_eq!(
            stamps,
            vec!["20240101000000", "20240201000000", "20240301000000"]
        );
    }

    #[test]
    fn latest_backup_is_newest() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = manager_in(dir.path());

        plant_backup(dir.path(), "20240101000000", "a\n");
        plant_backup(dir.path(), "20240201000000", "b\n");

        let latest = mgr.latest_backup().unwrap().unwrap();
        assert_eq!(latest.timestamp, "20240201000000");
    }

    #[test]
    fn restore_writes_backup_content_and_backs_up_current() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = manager_in(dir.path());

        mgr.write("CURRENT=1\n").unwrap();
        plant_backup(dir.path(), "20240101000000", "OLD=1\n");

        mgr.restore("20240101000000").unwrap();

        assert_eq!(mgr.read().unwrap(), "OLD=1\n");
        // The pre-restore content was backed up by the restore's write.
        let contents: Vec<String> = mgr
            .list_backups()
            .unwrap()
            .iter()
            .map(|b| std::fs::read_to_string(&b.path).unwrap())
            .collect();
        assert!(contents.contains(&"CURRENT=1\n".to_string()));
    }

    #[test]
    fn restore_unknown_timestamp_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = manager_in(dir.path());
        mgr.write("A=1\n").unwrap();

        let err = mgr.restore("19990101000000").unwrap_err();
        assert!(matches!(err, Error::BackupNotFound(_)));
    }

    #[test]
    fn post_write_hook_runs_after_successful_write() {
        let dir = tempfile::tempdir().unwrap();
        let called = Rc::new(Cell::new(0u32));
        let seen = Rc::clone(&called);
        let mgr = EnvFileManager::new(dir.path().join(".env"), 10, true)
            .with_post_write(move || seen.set(seen.get() + 1));

        mgr.write("A=1\n").unwrap();
        mgr.write("B=2\n").unwrap();
        assert_eq!(called.get(), 2);
    }

    #[test]
    fn write_to_unwritable_path_fails_but_read_still_works() {
        let dir = tempfile::tempdir().unwrap();
        // Point the manager at a path whose parent does not exist.
        let mgr = EnvFileManager::new(dir.path().join("missing").join(".env"), 10, true);

        assert!(mgr.write("A=1\n").is_err());
        assert_eq!(mgr.read().unwrap(), "");
    }
}
