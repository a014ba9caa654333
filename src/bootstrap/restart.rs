use crate::traits::Restarter;
use crate::{MapError, Result};
use std::process::Command;

/// Re-executes the current binary with the same arguments, then exits
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRestarter;

impl Restarter for ProcessRestarter {
    fn restart(&self) -> Result<()> {
        let exe = std::env::current_exe()
            .map_err(|e| MapError::Restart(format!("cannot locate executable: {e}")))?;
        let args: Vec<_> = std::env::args_os().skip(1).collect();

        log::info!("Restarting {} to apply layout direction", exe.display());
        Command::new(&exe)
            .args(&args)
            .spawn()
            .map_err(|e| MapError::Restart(format!("cannot spawn {}: {e}", exe.display())))?;

        std::process::exit(0)
    }
}
