// Cross-platform directory access checks for dbprofile

use std::io;
use std::path::Path;

/// Whether the current process may create files in `path`.
///
/// On unix this asks the kernel via `access(2)`, so ownership, group
/// membership, privileges and read-only mounts are all taken into account.
#[cfg(unix)]
pub fn can_write(path: &Path) -> Result<bool, io::Error> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let ret = unsafe { libc::access(c_path.as_ptr(), libc::W_OK) };
    if ret == 0 {
        return Ok(true);
    }

    let err = io::Error::last_os_error();
    match err.raw_os_error() {
        Some(libc::EACCES) | Some(libc::EROFS) | Some(libc::EPERM) => Ok(false),
        _ => Err(err),
    }
}

/// Whether the current process may create files in `path`.
///
/// Without `access(2)` the read-only attribute is the best available answer.
#[cfg(not(unix))]
pub fn can_write(path: &Path) -> Result<bool, io::Error> {
    Ok(!std::fs::metadata(path)?.permissions().readonly())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    /// Ground truth: try to create a file and clean it up again
    fn write_succeeds(dir: &Path) -> bool {
        let marker = dir.join(".write_check");
        match fs::write(&marker, b"x") {
            Ok(()) => {
                let _ = fs::remove_file(&marker);
                true
            }
            Err(_) => false,
        }
    }

    #[test]
    fn test_fresh_directory_is_writable() {
        let temp_dir = tempdir().unwrap();
        assert!(can_write(temp_dir.path()).unwrap());
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let temp_dir = tempdir().unwrap();
        assert!(can_write(&temp_dir.path().join("missing")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_mode_bits_agree_with_actual_write() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempdir().unwrap();
        let dir = temp_dir.path().join("no_write_bits");
        fs::create_dir(&dir).unwrap();
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o555)).unwrap();

        // Root may still write here; an unprivileged user may not
        let reported = can_write(&dir).unwrap();
        let actual = write_succeeds(&dir);
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(reported, actual);
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_owned_by_another_user() {
        // Only meaningful without root privileges; "/" belongs to root
        if unsafe { libc::geteuid() } == 0 {
            return;
        }
        let root = Path::new("/");
        assert_eq!(can_write(root).unwrap(), write_succeeds(root));
    }
}
