//! Volume store that shells out to the `btrfs` command-line tool.

use tokio::process::Command;

use crate::error::{Result, VolumeError};

/// A [`VolumeStore`](super::VolumeStore) invoking the system `btrfs` binary.
///
/// All four operations map 1:1 onto `btrfs subvolume` subcommands. Stdout
/// and stderr are captured together so error reports contain the tool's
/// diagnostics.
#[derive(Debug, Default)]
pub struct BtrfsStore {
    _priv: (),
}

impl BtrfsStore {
    /// Creates a new store.
    pub fn new() -> Self {
        Self::default()
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        let command = format!("btrfs subvolume {}", args.join(" "));

        let output = Command::new("btrfs")
            .arg("subvolume")
            .args(args)
            .output()
            .await
            .map_err(|source| VolumeError::Spawn {
                command: command.clone(),
                source,
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(VolumeError::Failed {
                command,
                status: output.status.to_string(),
                output: combined,
            }
            .into());
        }

        Ok(combined)
    }
}

#[async_trait::async_trait]
impl super::VolumeStore for BtrfsStore {
    async fn create(&self, path: &str) -> Result<()> {
        self.run(&["create", path]).await?;
        Ok(())
    }

    async fn snapshot(&self, source: &str, dest: &str) -> Result<()> {
        self.run(&["snapshot", source, dest]).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.run(&["delete", path]).await?;
        Ok(())
    }

    async fn list(&self, root: &str) -> Result<Vec<String>> {
        let output = self.run(&["list", root]).await?;
        Ok(parse_subvolume_list(&output))
    }
}

/// Extracts subvolume paths from `btrfs subvolume list` output.
///
/// Each line looks like `ID 256 gen 10 top level 5 path @home`; everything
/// after the `path ` token is the subvolume path. Lines without the token
/// are skipped.
fn parse_subvolume_list(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.split_once("path "))
        .map(|(_, path)| path.to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_list_output() {
        let output = "\
            ID 256 gen 10 top level 5 path @home\n\
            ID 257 gen 12 top level 5 path @data/test/@abc\n\
            \n\
            ID 258 gen 13 top level 5 path @var\n";

        let subvolumes = parse_subvolume_list(output);
        assert_eq!(subvolumes, vec!["@home", "@data/test/@abc", "@var"]);
    }

    #[test]
    fn skips_lines_without_path_token() {
        let subvolumes = parse_subvolume_list("garbage line\n\n");
        assert!(subvolumes.is_empty());
    }
}
