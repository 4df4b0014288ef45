//! Command line entry point for dbprofile
//!
//! Lists, creates, inspects and edits saved database connection profiles.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::TimeZone;

use dbprofile::{ConnectionProfile, ProfileRegistry, RegistryConfig};

const USAGE: &str = "\
Usage: dbprofile [--store PATH] <command>

Commands:
  list                                        List saved profiles
  add NAME URI [--user USER] [--password PW]  Create a profile
  show NAME [--json]                          Print a profile
  set NAME KEY VALUE                          Add a configuration override
  remove NAME                                 Delete a profile";

/// A parsed subcommand
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    List,
    Add {
        name: String,
        uri: String,
        user: Option<String>,
        password: Option<String>,
    },
    Show { name: String, json: bool },
    Set { name: String, key: String, value: String },
    Remove { name: String },
}

/// Full command line: optional store override plus the subcommand
#[derive(Debug, PartialEq, Eq)]
struct Invocation {
    store: Option<PathBuf>,
    command: Command,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(args) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: Vec<String>) -> Result<()> {
    let invocation = parse_args(args)?;
    if invocation.command == Command::Help {
        println!("{USAGE}");
        return Ok(());
    }

    let config = match invocation.store {
        Some(path) => RegistryConfig::with_store_path(path),
        None => RegistryConfig::from_env(),
    };
    let mut registry = config
        .open_registry()
        .with_context(|| format!("Failed to open profile store {}", config.store_path().display()))?;

    match invocation.command {
        Command::Help => Ok(()),
        Command::List => list_profiles(&registry),
        Command::Add { name, uri, user, password } => {
            add_profile(&mut registry, &name, &uri, user.as_deref(), password.as_deref())
        }
        Command::Show { name, json } => show_profile(&registry, &name, json),
        Command::Set { name, key, value } => set_configuration(&mut registry, &name, &key, &value),
        Command::Remove { name } => remove_profile(&mut registry, &name),
    }
}

fn parse_args(args: Vec<String>) -> Result<Invocation> {
    let mut args = args.into_iter();
    let mut store = None;
    let mut command = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--store" => {
                let path = args.next().context("--store requires a path")?;
                store = Some(PathBuf::from(path));
            }
            "--help" | "-h" => {
                return Ok(Invocation { store, command: Command::Help });
            }
            _ => {
                command = Some(arg);
                break;
            }
        }
    }

    let Some(command) = command else {
        return Ok(Invocation { store, command: Command::Help });
    };
    let rest: Vec<String> = args.collect();

    let command = match command.as_str() {
        "list" => {
            if !rest.is_empty() {
                bail!("list takes no arguments\n\n{USAGE}");
            }
            Command::List
        }
        "add" => parse_add(&rest)?,
        "show" => {
            let json = rest.iter().any(|a| a == "--json");
            let names: Vec<&String> = rest.iter().filter(|a| *a != "--json").collect();
            let [name] = names.as_slice() else {
                bail!("show expects NAME\n\n{USAGE}");
            };
            Command::Show { name: name.to_string(), json }
        }
        "set" => {
            let [name, key, value] = rest.as_slice() else {
                bail!("set expects NAME KEY VALUE\n\n{USAGE}");
            };
            Command::Set { name: name.clone(), key: key.clone(), value: value.clone() }
        }
        "remove" => {
            let [name] = rest.as_slice() else {
                bail!("remove expects NAME\n\n{USAGE}");
            };
            Command::Remove { name: name.clone() }
        }
        other => bail!("Unknown command '{other}'\n\n{USAGE}"),
    };

    Ok(Invocation { store, command })
}

fn parse_add(args: &[String]) -> Result<Command> {
    let mut positional = Vec::new();
    let mut user = None;
    let mut password = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--user" => user = Some(iter.next().context("--user requires a value")?.clone()),
            "--password" => password = Some(iter.next().context("--password requires a value")?.clone()),
            _ => positional.push(arg.clone()),
        }
    }

    let [name, uri] = positional.as_slice() else {
        bail!("add expects NAME and URI\n\n{USAGE}");
    };

    Ok(Command::Add {
        name: name.clone(),
        uri: uri.clone(),
        user,
        password,
    })
}

fn list_profiles(registry: &ProfileRegistry) -> Result<()> {
    if registry.is_empty() {
        println!("No profiles in {}", registry.store_path().display());
        return Ok(());
    }
    for profile in registry.profiles() {
        println!("{:<20} {:<7} {}", profile.name(), profile.connection_mode(), profile.uri());
    }
    Ok(())
}

fn add_profile(
    registry: &mut ProfileRegistry,
    name: &str,
    uri: &str,
    user: Option<&str>,
    password: Option<&str>,
) -> Result<()> {
    let profile = ConnectionProfile::new(name, uri, user, password)
        .with_context(|| format!("Cannot create profile '{name}'"))?;
    let mode = profile.connection_mode();
    let stored_uri = profile.uri().to_string();
    registry.add(profile)?;
    registry.save()?;

    println!("Added {mode} profile '{name}' -> {stored_uri}");
    Ok(())
}

fn show_profile(registry: &ProfileRegistry, name: &str, json: bool) -> Result<()> {
    let profile = registry.require(name)?;
    if json {
        println!("{}", profile.to_record().to_json()?);
        return Ok(());
    }

    println!("Name:      {}", profile.name());
    println!("URI:       {}", profile.uri());
    println!("Mode:      {}", profile.connection_mode());
    println!("User:      {}", profile.user_name().unwrap_or("-"));
    println!("Password:  {}", if profile.password().is_some() { "********" } else { "-" });
    if let Some(loaded) = chrono::Utc.timestamp_millis_opt(profile.created_time()).single() {
        println!("Loaded:    {}", loaded.to_rfc3339());
    }

    let mut entries: Vec<_> = profile.configuration_map().iter().collect();
    entries.sort();
    for (key, value) in entries {
        println!("  {key} = {value}");
    }
    Ok(())
}

fn set_configuration(registry: &mut ProfileRegistry, name: &str, key: &str, value: &str) -> Result<()> {
    registry.require_mut(name)?.add_configuration(key, value);
    registry.save()?;
    println!("Set {key} = {value} on '{name}'");
    Ok(())
}

fn remove_profile(registry: &mut ProfileRegistry, name: &str) -> Result<()> {
    if registry.remove(name).is_none() {
        bail!("Profile '{name}' not found");
    }
    registry.save()?;
    println!("Removed '{name}'");
    Ok(())
}
