//! Host environment diagnostics logged on enable.

use bridge_api::{LogLevel, PluginMetadata, ServerContext, ServerInfo};

/// What the plugin found out about the host it is running on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentReport {
    /// The marker that identified a hybrid host, if any matched
    pub hybrid_marker: Option<String>,
    pub host_version: String,
}

impl EnvironmentReport {
    pub fn is_hybrid(&self) -> bool {
        self.hybrid_marker.is_some()
    }
}

/// Looks for any of `markers` in the host version or installed plugin names,
/// ignoring case. The first matching marker is reported.
pub fn detect_environment(info: &ServerInfo, markers: &[String]) -> EnvironmentReport {
    let version = info.version.to_lowercase();
    let plugins: Vec<String> = info.plugins.iter().map(|name| name.to_lowercase()).collect();

    let hybrid_marker = markers
        .iter()
        .filter(|marker| !marker.is_empty())
        .find(|marker| {
            let marker = marker.to_lowercase();
            version.contains(&marker) || plugins.iter().any(|name| name.contains(&marker))
        })
        .cloned();

    EnvironmentReport {
        hybrid_marker,
        host_version: info.version.clone(),
    }
}

pub fn log_environment(context: &dyn ServerContext, report: &EnvironmentReport, metadata: &PluginMetadata<'_>) {
    match &report.hybrid_marker {
        Some(marker) => context.log(
            LogLevel::Info,
            &format!("🎣 CaptureBridge: Detected {} hybrid host ({})", marker, report.host_version),
        ),
        None => context.log(
            LogLevel::Warn,
            &format!(
                "🎣 CaptureBridge: No hybrid host detected ({}), mod events may never arrive",
                report.host_version
            ),
        ),
    }
    context.log(LogLevel::Info, &format!("🎣 CaptureBridge: Author: {}", metadata.authors));
    context.log(LogLevel::Info, &format!("🎣 CaptureBridge: Version: {}", metadata.version));
    context.log(LogLevel::Info, &format!("🎣 CaptureBridge: Description: {}", metadata.description));
}
