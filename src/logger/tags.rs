/// Log tags identifying the subsystem a message comes from
///
/// Each tag maps to a `--debug-<key>` flag on the binary.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Api,
    Snapshot,
    Paginator,
    Tags,
}

impl LogTag {
    /// Key used in `--debug-<key>` flags and in `LoggerConfig` tag sets
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system",
            LogTag::Config => "config",
            LogTag::Api => "api",
            LogTag::Snapshot => "snapshot",
            LogTag::Paginator => "paginator",
            LogTag::Tags => "tags",
        }
        .to_string()
    }

    /// Uppercase label used in log lines
    pub fn to_plain_string(&self) -> String {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Config => "CONFIG",
            LogTag::Api => "API",
            LogTag::Snapshot => "SNAPSHOT",
            LogTag::Paginator => "PAGINATE",
            LogTag::Tags => "TAGS",
        }
        .to_string()
    }

    pub fn all() -> &'static [LogTag] {
        &[
            LogTag::System,
            LogTag::Config,
            LogTag::Api,
            LogTag::Snapshot,
            LogTag::Paginator,
            LogTag::Tags,
        ]
    }
}
