use log::{Level, LevelFilter};
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::OpenOptions;
use std::path::PathBuf;

/// Where component diagnostics go and which of them are kept
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub enabled: bool,
    pub log_file: PathBuf,
    /// Start from an empty file instead of appending
    pub truncate: bool,
    pub features: LogFeatures,
    /// Ceiling for every record, category or not
    pub level: LevelFilter,
}

/// Per-category switches, checked by the `log_*!` macros
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFeatures {
    pub modal_state: bool,
    pub key_events: bool,
    pub rendering: bool,
    pub api_calls: bool,
}

/// The categories the component macros log under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogCategory {
    ModalState,
    KeyEvents,
    Rendering,
    ApiCalls,
}

impl LogCategory {
    /// Log target of the category's records
    pub fn target(&self) -> &'static str {
        match self {
            LogCategory::ModalState => "modal_state",
            LogCategory::KeyEvents => "key_events",
            LogCategory::Rendering => "rendering",
            LogCategory::ApiCalls => "api_calls",
        }
    }

    /// Level the category's records are written at
    pub fn level(&self) -> Level {
        match self {
            LogCategory::Rendering => Level::Trace,
            _ => Level::Debug,
        }
    }
}

impl LogFeatures {
    fn all(on: bool) -> Self {
        Self {
            modal_state: on,
            key_events: on,
            rendering: on,
            api_calls: on,
        }
    }

    pub fn is_on(&self, category: LogCategory) -> bool {
        match category {
            LogCategory::ModalState => self.modal_state,
            LogCategory::KeyEvents => self.key_events,
            LogCategory::Rendering => self.rendering,
            LogCategory::ApiCalls => self.api_calls,
        }
    }
}

impl Default for LogFeatures {
    // Per-keystroke and per-frame records only under --verbose
    fn default() -> Self {
        Self {
            key_events: false,
            rendering: false,
            ..Self::all(true)
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_file: PathBuf::from("contentflow.log"),
            truncate: false,
            features: LogFeatures::default(),
            level: LevelFilter::Debug,
        }
    }
}

impl LogConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            features: LogFeatures::all(false),
            level: LevelFilter::Off,
            ..Default::default()
        }
    }

    /// Warnings and errors only
    pub fn minimal() -> Self {
        Self {
            features: LogFeatures::all(false),
            level: LevelFilter::Warn,
            ..Default::default()
        }
    }

    pub fn verbose() -> Self {
        Self {
            features: LogFeatures::all(true),
            level: LevelFilter::Trace,
            ..Default::default()
        }
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }

    /// Whether a record in `category` would reach the log file
    pub fn allows(&self, category: LogCategory) -> bool {
        self.enabled && self.features.is_on(category) && category.level() <= self.level
    }
}

/// Install the global file logger described by `config`
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    if !config.enabled {
        let _ = WriteLogger::init(LevelFilter::Off, simplelog::Config::default(), std::io::sink());
        return Ok(());
    }

    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(!config.truncate)
        .truncate(config.truncate)
        .open(&config.log_file)?;

    let format = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|builder| builder)
        .build();

    WriteLogger::init(config.level, format, log_file)?;

    log::info!(
        "Logging to {} at {:?} ({:?})",
        config.log_file.display(),
        config.level,
        config.features
    );
    Ok(())
}

#[doc(hidden)]
#[macro_export]
macro_rules! log_category {
    ($config:expr, $category:expr, $($arg:tt)*) => {{
        let category = $category;
        if $config.allows(category) {
            log::log!(target: category.target(), category.level(), $($arg)*);
        }
    }};
}

/// Modal open/close and session changes
#[macro_export]
macro_rules! log_modal_state {
    ($config:expr, $($arg:tt)*) => {
        $crate::log_category!($config, $crate::logging::LogCategory::ModalState, $($arg)*)
    };
}

/// Keys routed to the modal
#[macro_export]
macro_rules! log_key_event {
    ($config:expr, $($arg:tt)*) => {
        $crate::log_category!($config, $crate::logging::LogCategory::KeyEvents, $($arg)*)
    };
}

/// Frame and caption rendering
#[macro_export]
macro_rules! log_rendering {
    ($config:expr, $($arg:tt)*) => {
        $crate::log_category!($config, $crate::logging::LogCategory::Rendering, $($arg)*)
    };
}

/// Like-toggle requests and responses
#[macro_export]
macro_rules! log_api_call {
    ($config:expr, $($arg:tt)*) => {
        $crate::log_category!($config, $crate::logging::LogCategory::ApiCalls, $($arg)*)
    };
}
