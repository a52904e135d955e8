//! Local machine name resolution used to scope lookups.

use std::{env, fs, io};

/// Supplies the name of the current machine.
///
/// [`ConfigClient::get`](crate::client::ConfigClient::get) asks its provider
/// for a machine name when the client has no explicit machine. A failed lookup
/// is reported through `tracing` and the request goes out unscoped.
///
/// Closures returning `io::Result<String>` implement this trait:
///
/// ```rust
/// use centralconfig_client::machine::MachineNameProvider;
///
/// let provider = || Ok::<_, std::io::Error>("web-01".to_string());
/// assert_eq!(provider.machine_name().unwrap(), "web-01");
/// ```
pub trait MachineNameProvider: Send + Sync {
    /// Resolve the machine name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name cannot be determined.
    fn machine_name(&self) -> io::Result<String>;
}

impl<F> MachineNameProvider for F
where
    F: Fn() -> io::Result<String> + Send + Sync,
{
    fn machine_name(&self) -> io::Result<String> {
        self()
    }
}

/// Resolves the host name of the running system.
///
/// Checks `HOSTNAME` and `COMPUTERNAME`, then `/proc/sys/kernel/hostname` and
/// `/etc/hostname`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHostname;

const HOSTNAME_VARS: [&str; 2] = ["HOSTNAME", "COMPUTERNAME"];
const HOSTNAME_FILES: [&str; 2] = ["/proc/sys/kernel/hostname", "/etc/hostname"];

impl MachineNameProvider for SystemHostname {
    fn machine_name(&self) -> io::Result<String> {
        let from_env = HOSTNAME_VARS.iter().filter_map(|var| env::var(var).ok());
        let from_files = HOSTNAME_FILES
            .iter()
            .filter_map(|path| fs::read_to_string(path).ok());

        from_env
            .chain(from_files)
            .map(|name| name.trim().to_string())
            .find(|name| !name.is_empty())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    "unable to determine the local host name",
                )
            })
    }
}
