use itertools::Itertools;
use std::collections::HashMap;
use std::env;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

pub const ALIASES_FILE_VAR: &str = "GoAliasesFile";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Error reading aliases: {}", .0)]
    Read(#[from] io::Error),
    #[error("Alias not found for executable: {}", .0)]
    AliasNotFound(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug)]
pub struct Config {
    pub alias_file: PathBuf,
}

impl Config {
    /// Builds the configuration from the `GoAliasesFile` environment
    /// variable. An unset or empty variable yields `None`.
    pub fn from_env() -> Option<Config> {
        let raw = env::var(ALIASES_FILE_VAR).ok()?;
        if raw.is_empty() {
            return None;
        }

        Some(Config {
            alias_file: normalize_path(&raw),
        })
    }
}

#[derive(Debug, Default)]
pub struct Aliases {
    map: HashMap<String, String>,
}

impl Aliases {
    /// Loads the alias file at `path`. A missing file is created empty and
    /// yields an empty mapping; any other I/O failure is an error.
    pub fn load(path: &Path) -> Result<Aliases> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                File::create(path)?;
                return Ok(Aliases::default());
            }
            Err(e) => return Err(e.into()),
        };

        let mut map = HashMap::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if let Some((name, command)) = split_alias_line(&line) {
                map.insert(name.to_owned(), command.to_owned());
            }
        }

        Ok(Aliases { map })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let mut contents = self
            .map
            .iter()
            .sorted()
            .map(|(name, command)| format!("{}={}", name, command))
            .join("\n");
        if !contents.is_empty() {
            contents.push('\n');
        }
        fs::write(path, contents)?;

        Ok(())
    }

    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(|command| &**command)
    }

    pub fn insert(&mut self, name: String, command: String) -> Option<String> {
        self.map.insert(name, command)
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.map.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(name, command)| (&**name, &**command))
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

// Only lines containing exactly one `=` count; everything else is skipped.
fn split_alias_line(line: &str) -> Option<(&str, &str)> {
    let (name, command) = line.split_once('=')?;
    if command.contains('=') {
        return None;
    }

    Some((name.trim(), command.trim()))
}

/// Expands a leading `~/` (or `~\`) to the user's home directory and makes
/// the path absolute against the current working directory. Normalization is
/// best-effort: if the home directory or the working directory cannot be
/// resolved, the path is returned as far as it got.
pub fn normalize_path(raw: &str) -> PathBuf {
    let expanded = raw
        .strip_prefix("~/")
        .or_else(|| raw.strip_prefix("~\\"))
        .and_then(|rest| Some(home::home_dir()?.join(rest)))
        .unwrap_or_else(|| PathBuf::from(raw));

    if expanded.is_absolute() {
        return expanded;
    }

    match env::current_dir() {
        Ok(cwd) => cwd.join(expanded),
        Err(_) => expanded,
    }
}

/// Strips the leading `./` an in-place invocation carries; the rest of
/// argv[0] is the lookup key as-is.
pub fn invoked_name(arg0: &str) -> &str {
    arg0.strip_prefix("./").unwrap_or(arg0)
}

pub fn dispatch(config: &Config, name: &str, args: &[String]) -> Result<i32> {
    let aliases = Aliases::load(&config.alias_file)?;
    let command = aliases
        .resolve(name)
        .ok_or_else(|| Error::AliasNotFound(name.to_owned()))?;

    Ok(run(command, args))
}

/// Spawns `command` with `args`, wiring the child's standard streams to this
/// process's own, and waits for it. The outcome is discarded: a failed spawn
/// and a nonzero child both leave the caller exiting 0.
pub fn run(command: &str, args: &[String]) -> i32 {
    let _ = Command::new(command)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status();

    0
}
