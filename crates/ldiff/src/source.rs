//! Input sources named on the command line

use ldiff_core::input::{read_text, read_text_file};
use ldiff_core::InputError;
use std::path::{Path, PathBuf};

/// Where one side of the diff comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    /// `-` means stdin, anything else is a path
    pub fn from_arg(arg: &Path) -> Self {
        if arg.as_os_str() == "-" {
            Source::Stdin
        } else {
            Source::File(arg.to_path_buf())
        }
    }

    pub fn label(&self) -> String {
        match self {
            Source::Stdin => "<stdin>".to_string(),
            Source::File(path) => path.display().to_string(),
        }
    }

    pub fn read(&self, limit: Option<u64>) -> Result<String, InputError> {
        match self {
            Source::Stdin => read_text(std::io::stdin().lock(), "<stdin>", limit),
            Source::File(path) => read_text_file(path, limit),
        }
    }
}

/// Resolve both sides, rejecting stdin on both
pub fn resolve(old: &Path, new: &Path) -> anyhow::Result<(Source, Source)> {
    let old = Source::from_arg(old);
    let new = Source::from_arg(new);
    if old == Source::Stdin && new == Source::Stdin {
        anyhow::bail!("stdin ('-') can only be used for one side of the diff");
    }
    Ok((old, new))
}
