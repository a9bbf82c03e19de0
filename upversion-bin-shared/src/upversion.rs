use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use upversion_lib::{
    detect_game, local_mod_dir, reconcile, Collect, ConsoleReporter, ModRoots, Options,
    OutputStyle, ReconcileContext,
};

use crate::envfile::{env_file_value, ENV_FILE};
use crate::gamedir::{documents_dir, Host};
use crate::GameConsts;

#[derive(Parser)]
struct Cli {
    /// Path to the game's Steam workshop folder (steamapps/workshop/content/<app id>).
    modpath: Option<PathBuf>,
    /// Path to your Windows Documents folder. Found automatically if not given.
    #[clap(long)]
    documents: Option<PathBuf>,
    /// List the outdated mods without changing them.
    #[clap(long)]
    dry_run: bool,
    /// Omit color from the output.
    #[clap(long)]
    no_color: bool,
    /// Output the results in JSON format.
    #[clap(long)]
    json: bool,
}

/// Run the main upversion application.
///
/// The workshop folder comes from the command line, or else from the game's path variable in the
/// environment or in a `.env` file in the current directory.
pub fn run(
    game_consts: &GameConsts,
    current_version: &'static str,
    bin_name: &'static str,
) -> Result<()> {
    use clap::{CommandFactory, FromArgMatches};

    let &GameConsts { name, name_short, app_id, paradox_dir, path_var } = game_consts;

    let matches = Cli::command()
        .version(current_version)
        .name(bin_name)
        .mut_arg("modpath", |arg| arg.env(path_var))
        .get_matches();
    let args = Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());

    #[cfg(windows)]
    if !args.no_color {
        let _ = ansiterm::enable_ansi_support()
            .map_err(|_| eprintln!("Failed to enable ANSI support for Windows10 users. Continuing probably without colored output."));
    }

    let Some(modpath) = resolve_modpath(args.modpath, Path::new(ENV_FILE), path_var)? else {
        eprintln!("You need to save the path to your {name_short} Steam workshop folder in a {ENV_FILE} file. Use {path_var}=PATH format.");
        eprintln!("Or provide the path as an argument: `{bin_name} PATH`");
        return Ok(());
    };

    let game = detect_game(&modpath)?;
    if game.app_id != app_id {
        eprintln!(
            "{} belongs to steam app {}, but this tool was made for {name} ({app_id}).",
            modpath.display(),
            game.app_id
        );
    }

    let documents = match args.documents {
        Some(documents) => documents,
        None => documents_dir(Host::detect())?,
    };
    let roots =
        ModRoots { local: local_mod_dir(&documents, paradox_dir), workshop: modpath.clone() };
    let context = ReconcileContext::new(modpath, game);
    let options = Options { dry_run: args.dry_run };

    if args.json {
        let summary = reconcile(&context, &roots, options, &mut Collect::default())?;
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let styles = if args.no_color { OutputStyle::no_color() } else { OutputStyle::default() };
        let mut reporter = ConsoleReporter::new(styles, args.dry_run);
        reconcile(&context, &roots, options, &mut reporter)?;
        reporter.done();
    }
    Ok(())
}

/// Pick the workshop folder to work on. `arg` is the command line argument, which clap has
/// already filled in from the environment variable if it was not given. Failing both, the
/// variable is looked up in the `.env` file.
///
/// Returns `None` if the folder is not configured anywhere.
fn resolve_modpath(arg: Option<PathBuf>, env_file: &Path, key: &str) -> Result<Option<PathBuf>> {
    if arg.is_some() {
        return Ok(arg);
    }
    let from_file = env_file_value(env_file, key)
        .with_context(|| format!("Could not read {}", env_file.display()))?;
    Ok(from_file.map(PathBuf::from))
}
