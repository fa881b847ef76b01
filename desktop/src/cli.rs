//! Command line flags for the desktop build.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("{0} needs a value")]
    MissingValue(String),
    #[error("unsupported scale {0}, use 1, 2, 4, 8, 16 or 32")]
    BadScale(String),
    #[error("unknown argument {0}")]
    Unknown(String),
}

#[derive(Debug)]
pub struct Args {
    pub scale: minifb::Scale,
    pub assets: Option<PathBuf>,
    pub lock_dir: PathBuf,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            scale: minifb::Scale::X4,
            assets: None,
            lock_dir: std::env::temp_dir(),
        }
    }
}

fn parse_scale(value: &str) -> Result<minifb::Scale, ArgsError> {
    match value {
        "1" => Ok(minifb::Scale::X1),
        "2" => Ok(minifb::Scale::X2),
        "4" => Ok(minifb::Scale::X4),
        "8" => Ok(minifb::Scale::X8),
        "16" => Ok(minifb::Scale::X16),
        "32" => Ok(minifb::Scale::X32),
        _ => Err(ArgsError::BadScale(value.to_string())),
    }
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, ArgsError> {
    args.next()
        .ok_or_else(|| ArgsError::MissingValue(flag.to_string()))
}

/// Parses `--scale N`, `--assets DIR` and `--lock-dir DIR`.
pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Args, ArgsError> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();
    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--scale" => parsed.scale = parse_scale(&value(&mut args, &flag)?)?,
            "--assets" => parsed.assets = Some(PathBuf::from(value(&mut args, &flag)?)),
            "--lock-dir" => parsed.lock_dir = PathBuf::from(value(&mut args, &flag)?),
            _ => return Err(ArgsError::Unknown(flag.clone())),
        }
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn defaults_without_flags() {
        let parsed = parse(Vec::new()).unwrap();
        assert!(matches!(parsed.scale, minifb::Scale::X4));
        assert!(parsed.assets.is_none());
        assert_eq!(parsed.lock_dir, std::env::temp_dir());
    }

    #[test]
    fn reads_all_flags() {
        let parsed = parse(args(&[
            "--scale", "8", "--assets", "res", "--lock-dir", "/run",
        ]))
        .unwrap();
        assert!(matches!(parsed.scale, minifb::Scale::X8));
        assert_eq!(parsed.assets, Some(PathBuf::from("res")));
        assert_eq!(parsed.lock_dir, PathBuf::from("/run"));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            parse(args(&["--scale", "3"])).unwrap_err(),
            ArgsError::BadScale("3".to_string())
        );
        assert_eq!(
            parse(args(&["--assets"])).unwrap_err(),
            ArgsError::MissingValue("--assets".to_string())
        );
        assert_eq!(
            parse(args(&["--fast"])).unwrap_err(),
            ArgsError::Unknown("--fast".to_string())
        );
    }
}
