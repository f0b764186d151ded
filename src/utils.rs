use std::fs;
use std::io::Write;
use std::path::Path;

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

use crate::global_constants::{INSTANCE_LOCK_FILE_NAME, LOG_TAG_INSTANCE};

/// Stops a previously started instance and records this process in the
/// lock file. Only one poller may own the registry.
pub fn ensure_single_instance() -> bool {
    let lock_file_path = std::env::temp_dir().join(INSTANCE_LOCK_FILE_NAME);

    if let Some(pid) = read_lock_pid(&lock_file_path) {
        log::info!("{} Found existing instance with PID: {}", LOG_TAG_INSTANCE, pid);

        let mut system = System::new();
        system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing(),
        );

        if pid == std::process::id() {
            log::debug!("{} Lock file already points at this process", LOG_TAG_INSTANCE);
        } else if let Some(process) = system.process(Pid::from_u32(pid)) {
            log::warn!("{} Stopping existing instance (PID: {})", LOG_TAG_INSTANCE, pid);
            process.kill();
            std::thread::sleep(std::time::Duration::from_millis(500));
        } else {
            log::info!(
                "{} Previous instance (PID: {}) is not running, cleaning up stale lock file",
                LOG_TAG_INSTANCE,
                pid
            );
        }

        let _ = fs::remove_file(&lock_file_path);
    }

    match write_lock_pid(&lock_file_path, std::process::id()) {
        Ok(()) => {
            log::info!(
                "{} Created lock file with PID: {}",
                LOG_TAG_INSTANCE,
                std::process::id()
            );
            true
        }
        Err(e) => {
            log::error!("{} Failed to create lock file: {}", LOG_TAG_INSTANCE, e);
            false
        }
    }
}

fn read_lock_pid(lock_file_path: &Path) -> Option<u32> {
    fs::read_to_string(lock_file_path)
        .ok()?
        .trim()
        .parse::<u32>()
        .ok()
}

fn write_lock_pid(lock_file_path: &Path, pid: u32) -> std::io::Result<()> {
    fs::File::create(lock_file_path)
        .and_then(|mut file| file.write_all(pid.to_string().as_bytes()))
}
