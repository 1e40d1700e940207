use anyhow::{anyhow, ensure, Result};
use clap::Parser;
use cmdalias::{normalize_path, Aliases, Config, ALIASES_FILE_VAR};
use indoc::indoc;
use itertools::Itertools;
use std::path::PathBuf;
use std::process::exit;

#[derive(Parser, Debug)]
#[clap(
    name = "cmdaliasctl",
    about = "maintains the alias file used by cmdalias",
    after_help = indoc! {"
        The alias file maps invoking names to commands, one per line:

            g=/usr/bin/git
            k=/usr/local/bin/kubectl

        Its path is taken from the GoAliasesFile environment variable unless
        --file is given.
    "}
)]
enum Args {
    Add(AddArgs),
    Remove(RemoveArgs),
    List(ListArgs),
}

impl Args {
    fn run(&self) -> Result<()> {
        match self {
            Args::Add(args) => args.run(),
            Args::Remove(args) => args.run(),
            Args::List(args) => args.run(),
        }
    }
}

/// Register an alias, resolving the command through PATH first.
#[derive(Parser, Debug)]
struct AddArgs {
    #[clap(short, long)]
    file: Option<String>,
    name: String,
    command: String,
}

impl AddArgs {
    fn run(&self) -> Result<()> {
        let path = alias_file_path(&self.file)?;
        let command = which::which(&self.command)
            .map_err(|e| anyhow!("'{}' not found: {}", self.command, e))?;

        let mut aliases = Aliases::load(&path)?;
        aliases.insert(self.name.clone(), command.display().to_string());
        aliases.save(&path)?;

        println!("alias created: {}={}", self.name, command.display());
        Ok(())
    }
}

#[derive(Parser, Debug)]
struct RemoveArgs {
    #[clap(short, long)]
    file: Option<String>,
    name: String,
}

impl RemoveArgs {
    fn run(&self) -> Result<()> {
        let path = alias_file_path(&self.file)?;

        let mut aliases = Aliases::load(&path)?;
        ensure!(
            aliases.remove(&self.name).is_some(),
            "no alias named '{}' in {}",
            self.name,
            path.display()
        );
        aliases.save(&path)?;

        println!("alias removed: {}", self.name);
        Ok(())
    }
}

#[derive(Parser, Debug)]
struct ListArgs {
    #[clap(short, long)]
    file: Option<String>,
}

impl ListArgs {
    fn run(&self) -> Result<()> {
        let path = alias_file_path(&self.file)?;

        let aliases = Aliases::load(&path)?;
        for (name, command) in aliases.iter().sorted() {
            println!("{}={}", name, command);
        }

        Ok(())
    }
}

fn alias_file_path(file: &Option<String>) -> Result<PathBuf> {
    if let Some(file) = file {
        return Ok(normalize_path(file));
    }

    Config::from_env()
        .map(|config| config.alias_file)
        .ok_or_else(|| anyhow!("no --file given and {} is not set", ALIASES_FILE_VAR))
}

fn main() {
    let args = Args::parse();
    if let Err(e) = args.run() {
        eprintln!("error: {}", e);
        exit(1);
    }
}
