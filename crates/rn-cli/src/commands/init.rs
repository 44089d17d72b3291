use std::fs::OpenOptions;
use std::io::{ErrorKind, Write as _};

use anyhow::{Context, bail};
use rn_config::ENV_TEMPLATE;

use crate::cli::InitArgs;

/// Handle `relnotes init`: write the `.env` template, never overwriting.
pub fn handle(args: &InitArgs) -> anyhow::Result<()> {
    let path = &args.path;
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(error) if error.kind() == ErrorKind::AlreadyExists => {
            bail!("{} already exists; remove it first to write a fresh template", path.display())
        }
        Err(error) => {
            return Err(error).with_context(|| format!("failed to create {}", path.display()));
        }
    };
    file.write_all(ENV_TEMPLATE.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), "wrote configuration template");
    println!("Wrote {}. Fill in the values, then run `relnotes generate`.", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_template_once() {
        let dir = tempfile::tempdir().unwrap();
        let args = InitArgs {
            path: dir.path().join(".env"),
        };

        handle(&args).unwrap();
        let written = std::fs::read_to_string(&args.path).unwrap();
        assert_eq!(written, ENV_TEMPLATE);
        assert!(written.contains("RELNOTES_DEVOPS__PAT="));
    }

    #[test]
    fn refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let args = InitArgs {
            path: dir.path().join(".env"),
        };
        std::fs::write(&args.path, "RELNOTES_DEVOPS__PAT=keep-me\n").unwrap();

        let err = handle(&args).unwrap_err();

        assert!(err.to_string().contains("already exists"));
        assert_eq!(
            std::fs::read_to_string(&args.path).unwrap(),
            "RELNOTES_DEVOPS__PAT=keep-me\n"
        );
    }
}
