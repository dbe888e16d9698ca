use std::path::Path;
use std::process::{Command, Stdio};

/// Start a copy of this program in the background, showing `path`.
///
/// The child gets no terminal stdio and, on Unix, its own process group so
/// closing or interrupting the shell does not take the viewer down.
pub fn relaunch(path: &Path, no_delete: bool) -> std::io::Result<()> {
    let exe = std::env::current_exe()?;
    let mut cmd = Command::new(exe);
    if no_delete {
        cmd.arg("--no-delete");
    }
    cmd.arg("--")
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    let child = cmd.spawn()?;
    log::info!("Detached as pid {}", child.id());
    Ok(())
}
