// File-based logging that won't interfere with the terminal UI.
// Enable with BLOCKFIELD_LOG=1; override the path with BLOCKFIELD_LOG_FILE.
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

use once_cell::sync::Lazy;

static LOG_FILE: Lazy<Mutex<Option<File>>> = Lazy::new(|| {
    if std::env::var("BLOCKFIELD_LOG").is_err() {
        return Mutex::new(None);
    }
    let path = std::env::var("BLOCKFIELD_LOG_FILE")
        .unwrap_or_else(|_| "/tmp/blockfield.log".to_string());
    Mutex::new(OpenOptions::new().create(true).append(true).open(path).ok())
});

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logger::write_log(&format!($($arg)*))
    };
}

pub fn write_log(msg: &str) {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(ref mut file) = *guard {
            let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
            writeln!(file, "[{}] {}", timestamp, msg).ok();
            file.flush().ok();
        }
    }
}
