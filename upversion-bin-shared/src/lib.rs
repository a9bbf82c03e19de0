mod envfile;
mod gamedir;
mod upversion;

/// String constants associated with the game whose mods are being updated.
#[derive(Debug)]
pub struct GameConsts {
    /// Full name
    pub name: &'static str,
    /// Shortened name
    pub name_short: &'static str,
    /// steam ID
    pub app_id: &'static str,
    /// The directory under the Paradox Interactive directory for local files
    pub paradox_dir: &'static str,
    /// Environment variable, or `.env` key, holding the workshop folder if it's not given as argument
    pub path_var: &'static str,
}

pub use gamedir::{documents_dir, Host, HostError};
pub use upversion::run as upversion;
