use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq)]
pub struct PersonaDirectory(PathBuf);

impl PersonaDirectory {
    pub fn new(p: PathBuf) -> Self {
        PersonaDirectory(p)
    }

    pub fn new_default() -> Result<Self, Box<dyn std::error::Error>> {
        default_datadir().map(PersonaDirectory::new)
    }

    pub fn exists(&self) -> bool {
        self.0.as_path().exists()
    }

    pub fn init(&self) -> Result<(), Box<dyn std::error::Error>> {
        if !self.exists() {
            std::fs::create_dir_all(self.0.as_path())?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        self.0.as_path()
    }

    /// Path of the local identity store file.
    pub fn identities_file(&self) -> PathBuf {
        let mut path = self.0.clone();
        path.push(crate::app::identities::DEFAULT_FILE_NAME);
        path
    }

    /// Path of the GUI configuration file.
    pub fn config_file(&self) -> PathBuf {
        let mut path = self.0.clone();
        path.push(crate::app::config::DEFAULT_FILE_NAME);
        path
    }
}

/// Get the absolute path to the persona configuration folder.
///
/// This is a "persona" directory in the XDG standard configuration directory
/// for all OSes but Linux-based ones, for which it's `~/.persona`.
fn default_datadir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    #[cfg(target_os = "linux")]
    let configs_dir = dirs::home_dir();

    #[cfg(not(target_os = "linux"))]
    let configs_dir = dirs::config_dir();

    if let Some(mut path) = configs_dir {
        #[cfg(target_os = "linux")]
        path.push(".persona");

        #[cfg(not(target_os = "linux"))]
        path.push("Persona");

        return Ok(path);
    }

    Err("Failed to get default data directory".into())
}
