//! Helper functions for finding the user's documents directory, under which the game keeps its
//! local mod descriptors.

use std::env::var_os;
use std::io;
use std::path::PathBuf;
use std::process::Command;

use home::home_dir;
use thiserror::Error;

/// Set by WSL in the environment of every process it starts.
const WSL_MARKER: &str = "WSL_DISTRO_NAME";
/// Where WSL mounts the Windows user profiles.
const WSL_WINDOWS_USERS: &str = "/mnt/c/Users";

/// The kinds of system we can find the Windows documents directory on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Host {
    NativeWindows,
    /// Running in a Linux distribution under WSL, with the game installed on the Windows side.
    WslHostedWindows,
    UnsupportedHost,
}

impl Host {
    pub fn detect() -> Self {
        Self::classify(cfg!(windows), var_os(WSL_MARKER).is_some())
    }

    pub fn classify(windows: bool, wsl: bool) -> Self {
        match (windows, wsl) {
            (_, true) => Host::WslHostedWindows,
            (true, false) => Host::NativeWindows,
            (false, false) => Host::UnsupportedHost,
        }
    }
}

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Wrong OS. Run this on Windows or in WSL, or give the documents directory with --documents.")]
    Unsupported,
    #[error("Cannot find your home directory.")]
    NoHome,
    #[error("Could not ask Windows for the user name")]
    WindowsUser { source: io::Error },
    #[error("Windows did not report a user name.")]
    NoWindowsUser,
}

/// Find the Windows "Documents" directory of the current user.
pub fn documents_dir(host: Host) -> Result<PathBuf, HostError> {
    match host {
        Host::NativeWindows => home_dir().map(|home| home.join("Documents")).ok_or(HostError::NoHome),
        Host::WslHostedWindows => Ok(wsl_documents_dir(&windows_user_name()?)),
        Host::UnsupportedHost => Err(HostError::Unsupported),
    }
}

/// The Linux side of WSL has its own user name, so ask the Windows side.
fn windows_user_name() -> Result<String, HostError> {
    let output = Command::new("cmd.exe")
        .args(["/c", "echo %USERNAME%"])
        .output()
        .map_err(|source| HostError::WindowsUser { source })?;
    let name = String::from_utf8_lossy(&output.stdout).trim().to_owned();
    // cmd echoes the variable reference itself if it's not set
    if !output.status.success() || name.is_empty() || name == "%USERNAME%" {
        return Err(HostError::NoWindowsUser);
    }
    Ok(name)
}

fn wsl_documents_dir(user: &str) -> PathBuf {
    PathBuf::from(WSL_WINDOWS_USERS).join(user).join("Documents")
}
