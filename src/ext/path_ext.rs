use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Literal path concatenation for names taken from a listing.
///
/// Unlike [`Path::join`], an entry name that starts with `/` does not replace
/// the base, and nothing is normalized: `base` and `name` are glued with a
/// single `/` exactly as written.
pub trait PathExt {
    fn join_verbatim(&self, name: &str) -> PathBuf;
}

impl PathExt for Path {
    fn join_verbatim(&self, name: &str) -> PathBuf {
        let mut joined = OsString::with_capacity(self.as_os_str().len() + 1 + name.len());
        joined.push(self.as_os_str());
        joined.push("/");
        joined.push(name);
        PathBuf::from(joined)
    }
}

impl PathExt for PathBuf {
    fn join_verbatim(&self, name: &str) -> PathBuf {
        self.as_path().join_verbatim(name)
    }
}
