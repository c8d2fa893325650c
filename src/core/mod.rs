//! Core module - scanning, naming and export orchestration

pub mod config;
pub mod error;
pub mod host;
pub mod identity;
pub mod naming;
pub mod notify;
pub mod orchestrator;
pub mod scanner;
pub mod session;

pub use config::{Config, ConfigError};
pub use error::{ExportError, HostError, TranslatorError};
pub use host::{CommandDefinition, CommandId, ExportOptions, Host, Translator, DXF_TRANSLATOR_ID};
pub use identity::PartIdentity;
pub use naming::{FileNamePolicy, NameStyle, NamingPolicy};
pub use notify::{ConsoleNotifier, MemoryNotifier, Notifier, Severity};
pub use orchestrator::{ExportJob, ExportReport, GroupOutcome, Orchestrator, OutcomeStatus};
pub use scanner::{scan, Group, ScanResult};
pub use session::{Session, EXPORT_COMMAND};
