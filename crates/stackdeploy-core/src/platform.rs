//! Host platform descriptor used to name the orchestration binary.

/// Operating system family the tool binary is resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Unix,
}

impl Platform {
    /// Platform of the running host.
    pub fn host() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }

    pub fn executable_suffix(self) -> &'static str {
        match self {
            Platform::Windows => ".exe",
            Platform::Unix => "",
        }
    }

    /// Executable name for `tool` on this platform (`docker` -> `docker.exe` on Windows).
    pub fn executable_name(self, tool: &str) -> String {
        format!("{}{}", tool, self.executable_suffix())
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::host()
    }
}
