//! Standard paths used by studyclock

use std::path::PathBuf;

/// Standard studyclock paths
pub struct Paths {
    /// Data directory (~/.local/share/studyclock)
    pub data: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}

impl Paths {
    pub fn new() -> Self {
        let data = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("studyclock");

        Self { data }
    }
}
